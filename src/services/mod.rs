pub mod closeout_service;
pub mod earnings_service;

pub use closeout_service::{resolve_checkins, CloseoutLine, CloseoutReport, CloseoutService};
pub use earnings_service::{EarningsEstimate, EarningsService};

use uuid::Uuid;

use crate::models::ContractError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),
    #[error("Promoter {promoter_id} belongs to event {found}, expected {expected}")]
    EventMismatch {
        promoter_id: Uuid,
        expected: Uuid,
        found: Uuid,
    },
    #[error("Promoter {0} appears more than once in this event")]
    DuplicatePromoter(Uuid),
}
