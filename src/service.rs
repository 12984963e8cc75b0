// 🧮 Receipt Service - submit and score
//
// Owns the store and the scoring engine. Transport layers (HTTP, CLI) hand it
// parsed JSON and get back an id, a points total, or a ReceiptError.

use crate::error::ReceiptResult;
use crate::receipt::Receipt;
use crate::rules::{Points, PointsBreakdown, ScoringEngine};
use crate::store::ReceiptStore;
use crate::validation::parse_receipt;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ReceiptService {
    store: ReceiptStore,
    engine: ScoringEngine,
}

impl ReceiptService {
    /// Empty store, standard rules
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(store: ReceiptStore, engine: ScoringEngine) -> Self {
        ReceiptService { store, engine }
    }

    /// Validate and store a receipt, returning its new id
    pub fn submit(&self, raw: &Value) -> ReceiptResult<String> {
        let receipt = parse_receipt(raw).map_err(|reason| {
            debug!(%reason, field = reason.field(), "receipt rejected");
            reason
        })?;

        let items = receipt.items.len();
        let id = self.store.create(receipt);
        info!(%id, items, "receipt accepted");

        Ok(id)
    }

    /// Points for a stored receipt
    pub fn points(&self, id: &str) -> ReceiptResult<Points> {
        let receipt = self.lookup(id)?;
        let points = self.engine.score(&receipt);
        debug!(%id, points, "points computed");
        Ok(points)
    }

    /// Per-rule points for a stored receipt
    pub fn breakdown(&self, id: &str) -> ReceiptResult<PointsBreakdown> {
        let receipt = self.lookup(id)?;
        Ok(self.engine.breakdown(&receipt))
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    fn lookup(&self, id: &str) -> ReceiptResult<Arc<Receipt>> {
        self.store.get(id).map_err(|err| {
            debug!(%id, "receipt not found");
            err
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReceiptError, ValidationError};
    use serde_json::json;
    use std::collections::HashSet;
    use std::thread;

    fn create_test_receipt() -> Value {
        json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
                { "shortDescription": "Emulator Glass", "price": "12.25" }
            ],
            "total": "35.35"
        })
    }

    #[test]
    fn test_submit_then_points() {
        let service = ReceiptService::new();

        let id = service.submit(&create_test_receipt()).unwrap();
        assert_eq!(service.store().len(), 1);

        // 6 retailer + 5 pair + 6 odd day; "Emulator Glass" is 14 chars
        assert_eq!(service.points(&id), Ok(17));
    }

    #[test]
    fn test_points_match_independent_rule_sum() {
        let service = ReceiptService::new();
        let id = service.submit(&create_test_receipt()).unwrap();

        let breakdown = service.breakdown(&id).unwrap();
        let summed: Points = breakdown.contributions.iter().map(|c| c.points).sum();

        assert_eq!(service.points(&id), Ok(summed));
        assert_eq!(breakdown.points_for("retailer_name"), Some(6));
        assert_eq!(breakdown.points_for("round_total"), Some(0));
        assert_eq!(breakdown.points_for("quarter_total"), Some(0));
        assert_eq!(breakdown.points_for("item_pairs"), Some(5));
        assert_eq!(breakdown.points_for("item_descriptions"), Some(0));
        assert_eq!(breakdown.points_for("odd_day"), Some(6));
        assert_eq!(breakdown.points_for("afternoon"), Some(0));
    }

    #[test]
    fn test_repeated_points_lookup() {
        let service = ReceiptService::new();
        let id = service.submit(&create_test_receipt()).unwrap();

        let first = service.points(&id).unwrap();
        for _ in 0..10 {
            assert_eq!(service.points(&id), Ok(first));
        }
    }

    #[test]
    fn test_rejected_receipt_is_not_stored() {
        let service = ReceiptService::new();
        let mut raw = create_test_receipt();
        raw["items"] = json!([]);

        assert_eq!(
            service.submit(&raw),
            Err(ReceiptError::Validation(ValidationError::Items))
        );
        assert!(service.store().is_empty());
        assert!(matches!(
            service.points("00000000-0000-0000-0000-000000000000"),
            Err(ReceiptError::NotFound(_))
        ));
    }

    #[test]
    fn test_breakdown_unknown_id() {
        let service = ReceiptService::new();
        assert_eq!(
            service.breakdown("nope"),
            Err(ReceiptError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_concurrent_submits() {
        let service = ReceiptService::new();
        let raw = create_test_receipt();

        let ids: Vec<String> = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| service.submit(&raw).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 16);
        assert_eq!(service.store().len(), 16);
        for id in &ids {
            assert_eq!(service.points(id), Ok(17));
        }
    }
}
