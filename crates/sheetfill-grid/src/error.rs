use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{backend} backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[cfg(feature = "json")]
    #[error("json grid error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sheet {0} not found")]
    SheetNotFound(usize),

    #[error("{0}")]
    Unsupported(String),
}

impl GridError {
    pub fn from_backend<E: std::fmt::Display>(backend: &'static str, err: E) -> Self {
        GridError::Backend {
            backend,
            message: err.to_string(),
        }
    }
}
