pub mod event_promoter;
pub mod lenient;
pub mod payout_line;

pub use event_promoter::{ContractError, EventPromoterRow};
pub use payout_line::{contract_checksum, LedgerError, PayoutLine, PayoutRun};
