mod chat;
mod config;
mod jid;
mod timestamp;

pub use chat::*;
pub use config::*;
pub use jid::*;
pub use timestamp::*;
