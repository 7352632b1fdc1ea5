#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    /// Skipping is refused once results of the home test are stored.
    #[error("home test already completed")]
    AlreadyCompleted,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ReadError> for UpdateError {
    fn from(ReadError::Storage(err): ReadError) -> Self {
        UpdateError::Storage(err)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("corrupt entry \"{0}\"")]
    Corrupt(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}
