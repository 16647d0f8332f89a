use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to render pdf: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
