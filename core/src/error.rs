use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunProError {
    #[error("invalid hardening config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse fixes at `{path}`: {message}")]
    Parse { path: String, message: String },
    #[error("failed to read CSV fixes: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write GPX: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for RunProError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        RunProError::Parse {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunProError>;
