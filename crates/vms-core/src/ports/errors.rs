use std::fmt;

use thiserror::Error;

/// Backend operation a [`BackendError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    RegisterSelection,
    UnregisterSelection,
    SubmitComparisonSet,
    CancelComparisonSet,
    FetchComparisonResults,
    FetchRankResults,
    SubmitInvestment,
    GetStartup,
    ListStartups,
}

impl BackendOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendOperation::RegisterSelection => "register_selection",
            BackendOperation::UnregisterSelection => "unregister_selection",
            BackendOperation::SubmitComparisonSet => "submit_comparison_set",
            BackendOperation::CancelComparisonSet => "cancel_comparison_set",
            BackendOperation::FetchComparisonResults => "fetch_comparison_results",
            BackendOperation::FetchRankResults => "fetch_rank_results",
            BackendOperation::SubmitInvestment => "submit_investment",
            BackendOperation::GetStartup => "get_startup",
            BackendOperation::ListStartups => "list_startups",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{operation}: resource not found")]
    NotFound { operation: BackendOperation },

    #[error("{operation}: unexpected status {status}")]
    Status {
        operation: BackendOperation,
        status: u16,
    },

    #[error("{operation}: request timed out")]
    Timeout { operation: BackendOperation },

    #[error("{operation}: transport error: {message}")]
    Transport {
        operation: BackendOperation,
        message: String,
    },

    #[error("{operation}: invalid response: {message}")]
    Decode {
        operation: BackendOperation,
        message: String,
    },
}

impl BackendError {
    pub fn operation(&self) -> BackendOperation {
        match self {
            BackendError::NotFound { operation }
            | BackendError::Status { operation, .. }
            | BackendError::Timeout { operation }
            | BackendError::Transport { operation, .. }
            | BackendError::Decode { operation, .. } => *operation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }
}
