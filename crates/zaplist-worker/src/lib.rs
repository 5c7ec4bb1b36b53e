mod entry;
mod error;
mod worker;

pub use entry::ChatEntry;
pub use error::WorkerError;
pub use worker::{ZaplistWorker, user_notification};

pub use zaplist_core::{ChatRow, Config, JidKind};
