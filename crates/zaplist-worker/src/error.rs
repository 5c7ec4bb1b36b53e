use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("database error: {0}")]
    Db(#[from] zaplist_db::DbError),

    #[error("bad database path: {0}")]
    BadDbPath(String),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
