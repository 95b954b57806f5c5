// Crate-level error types
use serde_json::{json, Value};

use crate::models::{ContractError, LedgerError};
use crate::services::ServiceError;

/// Umbrella error for callers that drive the whole payout flow (the CLI)
#[derive(Debug, thiserror::Error)]
pub enum PayoutError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl PayoutError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        PayoutError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        PayoutError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PayoutError::Ledger(LedgerError::AlreadyPaid(_)) => "ALREADY_PAID",
            PayoutError::Ledger(LedgerError::MissingReference(_)) => "MISSING_REFERENCE",
            PayoutError::Ledger(LedgerError::LineNotFound(_)) => "LINE_NOT_FOUND",
            PayoutError::Service(ServiceError::Contract(_)) => "INVALID_CONTRACT",
            PayoutError::Service(ServiceError::EventMismatch { .. }) => "EVENT_MISMATCH",
            PayoutError::Service(ServiceError::DuplicatePromoter(_)) => "DUPLICATE_PROMOTER",
            PayoutError::Io { .. } => "IO_ERROR",
            PayoutError::Parse { .. } => "PARSE_ERROR",
        }
    }

    /// Convert to JSON body for machine-readable output
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.to_string(),
            "error_code": self.error_code(),
        });

        if let PayoutError::Service(ServiceError::Contract(ContractError::InvalidField { field, .. })) = self {
            response["field"] = json!(field);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn contract_errors_expose_field() {
        let err = PayoutError::from(ServiceError::from(ContractError::InvalidField {
            field: "per_head_min".into(),
            reason: "expected a non-negative count, got -1".into(),
        }));
        let body = err.to_json();
        assert_eq!(body["error_code"], "INVALID_CONTRACT");
        assert_eq!(body["field"], "per_head_min");
        assert_eq!(body["success"], false);
    }

    #[test]
    fn service_codes_are_specific() {
        let err = PayoutError::from(ServiceError::DuplicatePromoter(Uuid::nil()));
        assert_eq!(err.error_code(), "DUPLICATE_PROMOTER");
        assert!(err.to_json().get("field").is_none());
    }

    #[test]
    fn ledger_errors_map_to_codes() {
        let id = Uuid::nil();
        assert_eq!(PayoutError::from(LedgerError::AlreadyPaid(id)).error_code(), "ALREADY_PAID");
        assert_eq!(PayoutError::from(LedgerError::MissingReference(id)).error_code(), "MISSING_REFERENCE");
        assert_eq!(PayoutError::from(LedgerError::LineNotFound(id)).error_code(), "LINE_NOT_FOUND");
    }
}
