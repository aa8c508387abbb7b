use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PipelineError {
    InputDirMissing(PathBuf),
    Io(std::io::Error),
    Csv(csv::Error),
    Http(reqwest::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::InputDirMissing(dir) => write!(
                f,
                "input directory not found: {} (add .json invoices and try again)",
                dir.display()
            ),
            PipelineError::Io(err) => write!(f, "I/O error: {}", err),
            PipelineError::Csv(err) => write!(f, "CSV error: {}", err),
            PipelineError::Http(err) => write!(f, "HTTP client error: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err)
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Http(err)
    }
}
