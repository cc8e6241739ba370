use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build analysis HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
