//! TMP account query bot: command routing, lookups and reply formatting.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod router;
pub mod serve;

pub use error::{AppError, AppResult};
pub use format::ResultFormatter;
pub use router::{Router, RouterSettings};
pub use serve::serve;
