//! Chat gateway client: receives group messages and sends replies.

mod client;
mod error;
mod receiver;
mod sink;
mod types;

pub use client::ChatClient;
pub use error::ChatError;
pub use receiver::MessageReceiver;
pub use sink::MessageSink;
pub use types::*;
