//! Match review session state machine
//!
//! Drives one operator review: `Idle -> Loading -> {Ready, Failed}`; from
//! `Ready` the operator confirms or rejects (terminal for the session) or
//! re-queries. Overlapping queries are serialized by a monotonically
//! increasing generation counter: a result is applied only if it belongs to
//! the most recently issued query, so a slow stale response can never
//! overwrite newer state.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::MantaMatchError;
use crate::errors::Result;
use crate::models::MatchCandidate;

/// Session state visible to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewState {
    Idle,
    Loading {
        generation: u64,
    },
    Ready {
        candidates: Vec<MatchCandidate>,
        generation: u64,
    },
    /// Human-readable failure message, distinct per error kind so operators
    /// can tell transient network issues from data-quality issues.
    Failed {
        message: String,
    },
    Confirmed {
        pk_catalog_id: i64,
    },
    Rejected,
}

impl ReviewState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed { .. } | Self::Rejected)
    }
}

/// Proof of which query generation a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

/// One operator review session.
///
/// Cheap to share between the querying task and the UI task; all state
/// transitions go through `&self`.
pub struct ReviewSession {
    state: Mutex<ReviewState>,
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ReviewState::Idle),
            generation: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ReviewState {
        self.state.lock().expect("review state poisoned").clone()
    }

    /// Token cancelled when the session is torn down; in-flight calls should
    /// select against it.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Start (or restart) a query. Supersedes any in-flight query: its
    /// eventual result will no longer match the current generation and is
    /// discarded on arrival.
    ///
    /// Returns `None` from terminal states.
    pub fn begin_query(&self) -> Option<QueryTicket> {
        let mut state = self.state.lock().expect("review state poisoned");
        if state.is_terminal() {
            return None;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state = ReviewState::Loading { generation };
        debug!("Review query started (generation {})", generation);
        Some(QueryTicket { generation })
    }

    /// Apply a resolved query. Returns true if the result was applied,
    /// false if it was stale (superseded), cancelled, or the session had
    /// already reached a terminal state.
    pub fn apply_result(
        &self,
        ticket: QueryTicket,
        result: Result<Vec<MatchCandidate>>,
    ) -> bool {
        let mut state = self.state.lock().expect("review state poisoned");

        if ticket.generation != self.generation.load(Ordering::SeqCst) {
            debug!(
                "Discarding stale result (generation {} superseded)",
                ticket.generation
            );
            return false;
        }
        if state.is_terminal() {
            return false;
        }

        match result {
            Ok(candidates) => {
                *state = ReviewState::Ready {
                    candidates,
                    generation: ticket.generation,
                };
                true
            }
            // Cancellation silently drops the query; the session keeps its
            // current state rather than showing an error.
            Err(e) if e.is_silent() => false,
            Err(e) => {
                *state = ReviewState::Failed {
                    message: e.to_string(),
                };
                true
            }
        }
    }

    /// Update the verification badge of one displayed candidate. Ignored
    /// unless the session is still showing that generation's candidates.
    pub fn apply_verification(
        &self,
        ticket: QueryTicket,
        pk_catalog_id: i64,
        verification: crate::models::VerificationResult,
    ) -> bool {
        let mut state = self.state.lock().expect("review state poisoned");
        if let ReviewState::Ready {
            candidates,
            generation,
        } = &mut *state
        {
            if *generation != ticket.generation {
                return false;
            }
            if let Some(candidate) = candidates
                .iter_mut()
                .find(|c| c.pk_catalog_id == pk_catalog_id)
            {
                candidate.verification = Some(verification);
                return true;
            }
        }
        false
    }

    /// Operator confirms a candidate. Valid only from `Ready`.
    pub fn confirm(&self, pk_catalog_id: i64) -> Result<()> {
        let mut state = self.state.lock().expect("review state poisoned");
        match &*state {
            ReviewState::Ready { candidates, .. } => {
                if !candidates.iter().any(|c| c.pk_catalog_id == pk_catalog_id) {
                    return Err(MantaMatchError::CatalogEntryNotFound(pk_catalog_id));
                }
                *state = ReviewState::Confirmed { pk_catalog_id };
                Ok(())
            }
            other => Err(MantaMatchError::Config(format!(
                "cannot confirm from state {other:?}"
            ))),
        }
    }

    /// Operator rejects all candidates. Valid only from `Ready`.
    pub fn reject(&self) -> Result<()> {
        let mut state = self.state.lock().expect("review state poisoned");
        match &*state {
            ReviewState::Ready { .. } => {
                *state = ReviewState::Rejected;
                Ok(())
            }
            other => Err(MantaMatchError::Config(format!(
                "cannot reject from state {other:?}"
            ))),
        }
    }

    /// Tear the session down: cancels in-flight work so discarded state is
    /// never updated and connections are freed promptly.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ReviewSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
