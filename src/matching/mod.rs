//! Candidate matching and review
//!
//! Orchestrates the identification flow: embed a query photo, rank catalog
//! entries by vector similarity, optionally verify top candidates
//! geometrically, and drive the operator review session with stale-result
//! protection.

pub mod pipeline;
pub mod review;
pub mod score;
pub mod selfmatch;

pub use pipeline::MatchPipeline;
pub use selfmatch::run_selfmatch;
pub use selfmatch::SelfMatchStats;
pub use review::QueryTicket;
pub use review::ReviewSession;
pub use review::ReviewState;
