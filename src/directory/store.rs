//! The user directory store.
//!
//! Owns the fetched records and the status of the fetch cycle. Requests are
//! identified by [`FetchTicket`]s: every [`DirectoryStore::load`] mints a new
//! ticket and forgets the previous one, so a completion carrying an older
//! ticket can no longer reach the state.
//!
//! ```text
//!            load()                 complete(ticket, Ok)
//!   ┌────────────────────► Loading ─────────────────────► Ready
//!   │                        │
//!   │                        │ complete(ticket, Err) / cancel()
//!   │                        ▼
//!   └──────────────────── Failed
//! ```

use crate::directory::fetch::{FetchOutcome, FetchRequest, FetchTicket};
use crate::domain::{FetchFailure, UserId, UserRecord};

/// Status of the current fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// A request is outstanding, or none has been issued yet.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request ended without data.
    Failed(FetchFailure),
}

/// Snapshot of the directory exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryState {
    pub status: FetchStatus,
    /// Records in arrival order. Empty unless `status` is `Ready`.
    pub records: Vec<UserRecord>,
}

impl DirectoryState {
    const fn loading() -> Self {
        Self {
            status: FetchStatus::Loading,
            records: Vec::new(),
        }
    }

    const fn failed(reason: FetchFailure) -> Self {
        Self {
            status: FetchStatus::Failed(reason),
            records: Vec::new(),
        }
    }
}

/// Holds the directory and arbitrates which response may update it.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    endpoint: String,
    state: DirectoryState,
    in_flight: Option<FetchTicket>,
    next_ticket: u64,
    loaded_at: Option<i64>,
}

impl DirectoryStore {
    /// Creates a store in the `Loading` state with nothing in flight.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            state: DirectoryState::loading(),
            in_flight: None,
            next_ticket: 1,
            loaded_at: None,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn state(&self) -> &DirectoryState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> &FetchStatus {
        &self.state.status
    }

    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        &self.state.records
    }

    /// Unix timestamp of the last successful load.
    #[must_use]
    pub const fn loaded_at(&self) -> Option<i64> {
        self.loaded_at
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Looks a record up by id in the current directory.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.state.records.iter().find(|user| user.id == id)
    }

    /// Starts a new fetch cycle.
    ///
    /// Any request still in flight is superseded: its ticket is dropped, so
    /// its completion will be discarded by [`complete`](Self::complete). The
    /// returned request must be handed to the host to actually go out.
    pub fn load(&mut self) -> FetchRequest {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(ticket = %previous, "superseding in-flight directory request");
        }

        let ticket = FetchTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.state = DirectoryState::loading();

        tracing::debug!(ticket = %ticket, endpoint = %self.endpoint, "directory load started");

        FetchRequest::new(self.endpoint.clone(), ticket)
    }

    /// Cancels the in-flight request, if any.
    ///
    /// Safe to call repeatedly. Returns the cancelled ticket.
    pub fn cancel(&mut self) -> Option<FetchTicket> {
        let ticket = self.in_flight.take()?;
        tracing::debug!(ticket = %ticket, "directory request cancelled");
        self.state = DirectoryState::failed(FetchFailure::Cancelled);
        Some(ticket)
    }

    /// Moves the store to `Failed` without a request, dropping any ticket.
    pub fn fail(&mut self, reason: FetchFailure) {
        tracing::debug!(reason = %reason, "directory marked as failed");
        self.in_flight = None;
        self.state = DirectoryState::failed(reason);
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched if `ticket` is not the
    /// request currently in flight (superseded, cancelled or unknown).
    pub fn complete(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                ticket = %ticket,
                in_flight = ?self.in_flight,
                "discarding stale directory response"
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(records) => {
                tracing::debug!(ticket = %ticket, user_count = records.len(), "directory loaded");
                self.loaded_at = Some(chrono::Utc::now().timestamp());
                self.state = DirectoryState {
                    status: FetchStatus::Ready,
                    records,
                };
            }
            Err(reason) => {
                tracing::warn!(ticket = %ticket, reason = %reason, "directory load failed");
                self.state = DirectoryState::failed(reason);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectoryStore, FetchStatus};
    use crate::domain::{FetchFailure, UserRecord};

    fn users() -> Vec<UserRecord> {
        vec![UserRecord::new(1, "Ann"), UserRecord::new(2, "Bob")]
    }

    #[test]
    fn starts_loading_with_nothing_in_flight() {
        let store = DirectoryStore::new("http://example.test/users");
        assert_eq!(store.status(), &FetchStatus::Loading);
        assert!(store.in_flight().is_none());
        assert!(store.records().is_empty());
    }

    #[test]
    fn successful_completion_stores_records_in_order() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let request = store.load();

        assert!(store.complete(request.ticket, Ok(users())));
        assert_eq!(store.status(), &FetchStatus::Ready);
        assert_eq!(store.records(), users().as_slice());
        assert!(store.loaded_at().is_some());
        assert!(store.in_flight().is_none());
    }

    #[test]
    fn failure_keeps_no_partial_data() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let first = store.load();
        store.complete(first.ticket, Ok(users()));

        let second = store.load();
        assert!(store.complete(second.ticket, Err(FetchFailure::Status(500))));
        assert_eq!(store.status(), &FetchStatus::Failed(FetchFailure::Status(500)));
        assert!(store.records().is_empty());
    }

    #[test]
    fn newer_load_wins_over_late_response() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let first = store.load();
        let second = store.load();
        assert_ne!(first.ticket, second.ticket);

        assert!(!store.complete(first.ticket, Ok(users())));
        assert_eq!(store.status(), &FetchStatus::Loading);
        assert!(store.records().is_empty());

        assert!(store.complete(second.ticket, Ok(vec![UserRecord::new(3, "Anna")])));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].name, "Anna");
    }

    #[test]
    fn cancel_is_idempotent_and_suppresses_completion() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let request = store.load();

        assert_eq!(store.cancel(), Some(request.ticket));
        assert_eq!(store.cancel(), None);
        assert_eq!(store.status(), &FetchStatus::Failed(FetchFailure::Cancelled));

        assert!(!store.complete(request.ticket, Ok(users())));
        assert!(store.records().is_empty());
    }

    #[test]
    fn cancel_without_request_keeps_state() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let request = store.load();
        store.complete(request.ticket, Ok(users()));

        assert_eq!(store.cancel(), None);
        assert_eq!(store.status(), &FetchStatus::Ready);
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn find_resolves_ids_against_current_records() {
        let mut store = DirectoryStore::new("http://example.test/users");
        let request = store.load();
        store.complete(request.ticket, Ok(users()));

        assert_eq!(store.find(2).map(|u| u.name.as_str()), Some("Bob"));
        assert!(store.find(42).is_none());
    }
}
