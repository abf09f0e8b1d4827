use thiserror::Error;

use crate::analysis::AnalysisError;

#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} is already closed")]
    AlreadyClosed { kind: &'static str, id: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TimesheetError>;
