//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port. One `send` is one
//! network attempt; the per-request timeout and cancellation live in
//! the executor, so the client here carries no timeout of its own.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};

use quiver_application::encoder::{EncodedBody, MultipartField};
use quiver_application::executor::ExecutorConfig;
use quiver_application::ports::{Exchange, Transport, TransportError};
use quiver_application::OutgoingRequest;
use quiver_domain::HttpMethod;

/// The primary network adapter, wrapping `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport configured from the executor settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(config: &ExecutorConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a caller-built client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the encoded payload to the request builder.
    async fn attach_body(
        builder: reqwest::RequestBuilder,
        body: &EncodedBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match body {
            EncodedBody::None => Ok(builder),
            EncodedBody::Text { content, .. } => Ok(builder.body(content.clone())),
            EncodedBody::Json { value } => Ok(builder.json(value)),
            EncodedBody::Multipart { fields } => {
                let form = build_form(fields).await?;
                Ok(builder.multipart(form))
            }
        }
    }

    fn map_error(error: reqwest::Error) -> TransportError {
        if error.is_connect() {
            return TransportError::Connect(error.to_string());
        }
        if error.is_redirect() {
            return TransportError::TooManyRedirects;
        }
        TransportError::Other(error.to_string())
    }
}

/// Builds the multipart form, reading file fields from disk.
///
/// The form is built here rather than in the encoder so the boundary
/// parameter in the Content-Type header comes from the same form that
/// is sent.
async fn build_form(fields: &[MultipartField]) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name.clone(), value.clone()),
            MultipartField::File { name, path } => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| TransportError::Body(format!("{path}: {e}")))?;
                let file_name = Path::new(path)
                    .file_name()
                    .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime.as_ref())
                    .map_err(|e| TransportError::Body(e.to_string()))?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<Exchange, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        builder = Self::attach_body(builder, &request.body).await?;

        let response = builder.send().await.map_err(Self::map_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(Exchange {
            status,
            headers,
            body,
        })
    }
}
