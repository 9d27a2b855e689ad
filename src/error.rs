use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasstuiError {
    #[error("Error: Failed to copy to the clipboard")]
    ClipFailed,
    #[error("Error: Failed to read the clipboard")]
    PasteFailed,
    #[error("Error: Failed to spawn the clipboard clearer -- the clipboard will NOT clear itself")]
    UnclipSpawnFailed,
    #[error("Error: Store does not exist")]
    StoreDoesntExist,
    #[error("Error: Store has no entries")]
    StoreEmpty,
    #[error("Error: {0} is not in the password store")]
    NotInStore(String),
    #[error("Error: Sneaky path {0}")]
    SneakyPath(String),
}
