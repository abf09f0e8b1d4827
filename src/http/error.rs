use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::timesheet::{RangeError, TimesheetError};

use super::envelope::Failure;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing authenticated user")]
    Unauthorized,

    #[error("invalid timestamp(s): {0}")]
    InvalidRange(#[from] RangeError),

    #[error("invalid bucket interval '{0}'")]
    MalformedBucketSize(String),

    #[error("invalid {kind} id '{value}'")]
    InvalidId { kind: &'static str, value: String },

    #[error(transparent)]
    Timesheet(#[from] TimesheetError),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Timesheet(TimesheetError::Analysis(err))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRange(_) | Self::MalformedBucketSize(_) | Self::InvalidId { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Timesheet(err) => match err {
                TimesheetError::NotFound { .. } => StatusCode::NOT_FOUND,
                TimesheetError::AlreadyClosed { .. } => StatusCode::CONFLICT,
                TimesheetError::Analysis(AnalysisError::InvalidBucketSize(_)) => {
                    StatusCode::BAD_REQUEST
                }
                TimesheetError::Analysis(AnalysisError::IncompletePeriod { .. }) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                TimesheetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message sent to the client. Storage details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            Self::Timesheet(TimesheetError::Storage(_)) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {self}");
        }

        let body = Failure {
            success: false,
            http_code: status.as_u16(),
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}
