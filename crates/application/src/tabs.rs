//! Tab-scoped execution context
//!
//! Tracks, per UI tab, the in-flight cancellation token and the latest
//! settled response. Starting a new request on a tab cancels whatever
//! was in flight there, and a superseded request's late settlement is
//! discarded instead of overwriting the newer result. Tabs never see
//! each other's state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use quiver_domain::NormalizedResponse;

use crate::cancel::{CancelReason, CancelToken};

/// Permission to settle one specific request on one tab.
///
/// The ticket carries the generation it was issued at; settling with a
/// stale ticket is a no-op.
#[derive(Debug, Clone)]
pub struct ExecutionTicket {
    tab_id: String,
    generation: u64,
    token: CancelToken,
}

impl ExecutionTicket {
    /// The tab this ticket belongs to.
    #[must_use]
    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    /// The cancellation token for this request.
    #[must_use]
    pub const fn token(&self) -> &CancelToken {
        &self.token
    }
}

#[derive(Debug)]
struct TabSlot {
    generation: u64,
    token: CancelToken,
    response: Option<NormalizedResponse>,
}

impl TabSlot {
    fn new() -> Self {
        Self {
            generation: 0,
            token: CancelToken::new(),
            response: None,
        }
    }
}

/// The per-tab request registry.
#[derive(Debug, Default)]
pub struct TabContext {
    tabs: Mutex<HashMap<String, TabSlot>>,
}

impl TabContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new tab and returns its identifier.
    #[must_use]
    pub fn open_tab(&self) -> String {
        let id = uuid::Uuid::now_v7().to_string();
        self.lock().insert(id.clone(), TabSlot::new());
        id
    }

    /// Registers a new request on a tab, cancelling any prior one.
    ///
    /// The returned ticket holds a fresh token; the prior in-flight
    /// request (if any) has been cancelled before this returns, so at
    /// most one request per tab is ever live.
    pub fn begin(&self, tab_id: &str) -> ExecutionTicket {
        let mut tabs = self.lock();
        let slot = tabs
            .entry(tab_id.to_string())
            .or_insert_with(TabSlot::new);

        slot.token.cancel(CancelReason::User);
        slot.generation += 1;
        slot.token = CancelToken::new();

        ExecutionTicket {
            tab_id: tab_id.to_string(),
            generation: slot.generation,
            token: slot.token.clone(),
        }
    }

    /// Stores a settled response for the ticket's tab.
    ///
    /// Returns false, leaving the stored response untouched, when the
    /// ticket was superseded or its tab is gone.
    pub fn settle(&self, ticket: &ExecutionTicket, response: NormalizedResponse) -> bool {
        let mut tabs = self.lock();
        match tabs.get_mut(&ticket.tab_id) {
            Some(slot) if slot.generation == ticket.generation => {
                slot.response = Some(response);
                true
            }
            _ => false,
        }
    }

    /// Cancels the tab's in-flight request, if any. Idempotent.
    pub fn cancel(&self, tab_id: &str) {
        if let Some(slot) = self.lock().get(tab_id) {
            slot.token.cancel(CancelReason::User);
        }
    }

    /// Closes a tab, cancelling in-flight work and dropping its result.
    pub fn close(&self, tab_id: &str) {
        if let Some(slot) = self.lock().remove(tab_id) {
            slot.token.cancel(CancelReason::User);
        }
    }

    /// The latest settled response for a tab.
    ///
    /// Persists across tab switches until replaced or the tab closes.
    #[must_use]
    pub fn response(&self, tab_id: &str) -> Option<NormalizedResponse> {
        self.lock().get(tab_id).and_then(|slot| slot.response.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, TabSlot>> {
        self.tabs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
