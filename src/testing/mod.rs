use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::EventPromoterRow;
use crate::payout::PromoterContract;

/// Parse a decimal literal, panicking on bad test input
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| panic!("bad decimal literal {s:?}: {e}"))
}

/// Row for a fresh promoter on `event_id` carrying `contract`
pub fn row_for(event_id: Uuid, contract: &PromoterContract) -> EventPromoterRow {
    let promoter_id = Uuid::new_v4();
    let mut row = EventPromoterRow::new(event_id, promoter_id).with_contract(contract);
    row.promoter_name = Some(format!("promoter_{}", promoter_id.simple()));
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_for_keeps_contract() {
        let contract = PromoterContract::new().with_fixed_fee(dec("75.25"));
        let row = row_for(Uuid::new_v4(), &contract);
        assert_eq!(row.contract().unwrap(), contract);
        assert!(row.promoter_name.is_some());
    }
}
