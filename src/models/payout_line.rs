use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::payout::{PayoutBreakdown, PromoterContract};
use crate::types::{CheckinSource, PayoutStatus};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Payout line {0} is already paid")]
    AlreadyPaid(Uuid),
    #[error("Payment reference is required to mark line {0} paid")]
    MissingReference(Uuid),
    #[error("No payout line for promoter {0}")]
    LineNotFound(Uuid),
}

/// Finalized amount owed to one promoter for one event.
///
/// Carries the contract as it stood at closeout. Once paid, the line is
/// history and rejects further changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutLine {
    pub id: Uuid,
    pub event_id: Uuid,
    pub promoter_id: Uuid,
    pub promoter_name: Option<String>,
    pub checkins_count: u32,
    pub checkin_source: CheckinSource,
    pub contract: PromoterContract,
    pub contract_checksum: String,
    pub calculated_payout: Decimal,
    pub manual_adjustment: Decimal,
    pub final_payout: Decimal,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
}

impl PayoutLine {
    pub fn from_breakdown(
        event_id: Uuid,
        promoter_id: Uuid,
        promoter_name: Option<String>,
        contract: PromoterContract,
        checkin_source: CheckinSource,
        breakdown: &PayoutBreakdown,
        created_at: DateTime<Utc>,
    ) -> Self {
        let contract_checksum = contract_checksum(&contract);
        Self {
            id: Uuid::new_v4(),
            event_id,
            promoter_id,
            promoter_name,
            checkins_count: breakdown.checkins_count,
            checkin_source,
            contract,
            contract_checksum,
            calculated_payout: breakdown.calculated_payout,
            manual_adjustment: breakdown.manual_adjustment,
            final_payout: breakdown.final_payout,
            status: PayoutStatus::Pending,
            created_at,
            paid_at: None,
            payment_reference: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == PayoutStatus::Paid
    }

    pub fn mark_paid(&mut self, reference: &str, at: DateTime<Utc>) -> Result<(), LedgerError> {
        if self.is_paid() {
            return Err(LedgerError::AlreadyPaid(self.id));
        }
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(LedgerError::MissingReference(self.id));
        }

        self.status = PayoutStatus::Paid;
        self.paid_at = Some(at);
        self.payment_reference = Some(reference.to_string());
        Ok(())
    }

    /// Replace the manual adjustment; the calculated amount is left untouched
    pub fn set_manual_adjustment(&mut self, amount: Option<Decimal>) -> Result<(), LedgerError> {
        if self.is_paid() {
            return Err(LedgerError::AlreadyPaid(self.id));
        }

        self.contract.manual_adjustment_amount = amount;
        self.contract_checksum = contract_checksum(&self.contract);
        self.manual_adjustment = amount.unwrap_or(Decimal::ZERO);
        self.final_payout = self.calculated_payout.saturating_add(self.manual_adjustment);
        Ok(())
    }

    /// False when the stored snapshot no longer matches its checksum
    pub fn verify_snapshot(&self) -> bool {
        contract_checksum(&self.contract) == self.contract_checksum
    }
}

/// Lines produced by one event closeout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRun {
    pub id: Uuid,
    pub event_id: Uuid,
    pub lines: Vec<PayoutLine>,
    pub created_at: DateTime<Utc>,
}

impl PayoutRun {
    pub fn new(event_id: Uuid, lines: Vec<PayoutLine>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            lines,
            created_at,
        }
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.final_payout))
    }

    pub fn outstanding(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| !line.is_paid())
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.final_payout))
    }

    pub fn is_settled(&self) -> bool {
        self.lines.iter().all(PayoutLine::is_paid)
    }

    pub fn line(&self, promoter_id: Uuid) -> Option<&PayoutLine> {
        self.lines.iter().find(|line| line.promoter_id == promoter_id)
    }

    pub fn mark_paid(&mut self, promoter_id: Uuid, reference: &str, at: DateTime<Utc>) -> Result<(), LedgerError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.promoter_id == promoter_id)
            .ok_or(LedgerError::LineNotFound(promoter_id))?;
        line.mark_paid(reference, at)?;

        tracing::info!(
            run_id = %self.id,
            event_id = %self.event_id,
            %promoter_id,
            "payout line marked paid"
        );
        Ok(())
    }
}

/// SHA-256 of the contract's JSON form, hex encoded
pub fn contract_checksum(contract: &PromoterContract) -> String {
    // Struct field order is fixed, so the serialized form is stable. Every
    // field is a plain number, string, option or list, so this cannot fail.
    let json = serde_json::to_string(contract).expect("contract serializes to JSON");
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let checksum = format!("{:x}", hasher.finalize());
    tracing::debug!(%checksum, "computed contract checksum");
    checksum
}
