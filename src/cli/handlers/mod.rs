//! Command handlers, one module per domain

mod backfill;
mod embed;
mod health;
mod index;
mod init;
mod matching;
mod selfmatch;

pub use backfill::handle_backfill;
pub use embed::handle_embed;
pub use health::handle_health;
pub use health::handle_stats;
pub use index::handle_index;
pub use init::handle_init;
pub use matching::handle_match;
pub use matching::handle_verify;
pub use selfmatch::handle_selfmatch;
