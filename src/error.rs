use thiserror::Error;

/// Errors surfaced at the edges of the shell: config files, the in-memory
/// filesystem and the login form.
///
/// Window manager and session gate operations never fail; stale ids and
/// repeated calls are silent no-ops.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Submitted admin credentials did not match. The message is shown inline
    /// in the login form.
    #[error("Invalid admin credentials.")]
    InvalidCredentials,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Bad path in the in-memory Zenux filesystem
    #[error("storage error: {0}")]
    Storage(String),
}
