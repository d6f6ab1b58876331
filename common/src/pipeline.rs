//! Pure pipeline logic (selection and record assembly)
//!
//! The orchestrator in the CLI crate drives the network stages; the
//! bounded-cost item selection and the final per-item merge live here
//! where they can be exercised without a network.

use crate::reward::compute_reward;
use crate::types::{
    DetectedItem, PolicyRecommendation, ResultRecord, SkippedItem, SustainabilityDecision,
};
use std::collections::HashSet;

/// Items analyzed per run unless configured otherwise. Each selected item
/// costs two further model calls, so the cap bounds request volume.
pub const DEFAULT_ITEM_CAP: usize = 2;

/// Select the items worth the downstream model calls.
///
/// Orders by descending quantity (stable: ties keep detection order) and
/// keeps at most `cap` items. Everything past the cap is echoed as a
/// skipped item, in the original detection order.
///
/// # Returns
/// (selected items, highest quantity first; skipped items, detection order)
pub fn select_items(items: &[DetectedItem], cap: usize) -> (Vec<DetectedItem>, Vec<SkippedItem>) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].quantity.cmp(&items[a].quantity));

    let chosen: HashSet<usize> = order.iter().take(cap).copied().collect();
    let selected = order
        .iter()
        .take(cap)
        .map(|&i| items[i].clone())
        .collect();
    let skipped = items
        .iter()
        .enumerate()
        .filter(|(i, _)| !chosen.contains(i))
        .map(|(_, item)| SkippedItem {
            name: item.name.clone(),
            quantity: item.quantity,
        })
        .collect();

    (selected, skipped)
}

/// Merge the three stage outputs into the final record.
///
/// `co2_saved_kg` and `points` are copied out of the decision and the
/// recommendation; the record is never mutated after this.
pub fn assemble_record(
    item: DetectedItem,
    decision: SustainabilityDecision,
    recommendation: PolicyRecommendation,
    timestamp: String,
) -> ResultRecord {
    let co2_saved_kg = decision.co2_saved_kg;
    let points = recommendation.green_points;
    ResultRecord {
        item,
        decision,
        recommendation,
        co2_saved_kg,
        points,
        timestamp,
    }
}

/// Reward for one record, derived on demand rather than stored.
pub fn record_reward(record: &ResultRecord) -> crate::reward::Reward {
    compute_reward(record.co2_saved_kg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionType, BestAction, Condition, SustainabilityType};
    use std::collections::BTreeSet;

    fn item(name: &str, quantity: u32) -> DetectedItem {
        DetectedItem {
            name: name.to_string(),
            material: "PET".to_string(),
            condition: Condition::Used,
            quantity,
        }
    }

    // =============================================
    // select_items
    // =============================================

    #[test]
    fn test_select_items_cap_and_stable_ties() {
        // quantities [5, 1, 3, 3], cap 2: pick 5 then the first 3;
        // the rest stay in detection order in the skipped list
        let items = vec![item("a", 5), item("b", 1), item("c", 3), item("d", 3)];

        let (selected, skipped) = select_items(&items, 2);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "a");
        assert_eq!(selected[0].quantity, 5);
        assert_eq!(selected[1].name, "c");
        assert_eq!(selected[1].quantity, 3);

        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].name, "b");
        assert_eq!(skipped[0].quantity, 1);
        assert_eq!(skipped[1].name, "d");
        assert_eq!(skipped[1].quantity, 3);
    }

    #[test]
    fn test_select_items_under_cap() {
        let items = vec![item("a", 1)];
        let (selected, skipped) = select_items(&items, 2);
        assert_eq!(selected.len(), 1);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_select_items_empty() {
        let (selected, skipped) = select_items(&[], 2);
        assert!(selected.is_empty());
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_select_items_zero_cap() {
        let items = vec![item("a", 2), item("b", 7)];
        let (selected, skipped) = select_items(&items, 0);
        assert!(selected.is_empty());
        assert_eq!(skipped.len(), 2);
        // detection order, not quantity order
        assert_eq!(skipped[0].name, "a");
        assert_eq!(skipped[1].name, "b");
    }

    #[test]
    fn test_select_items_all_equal_quantities() {
        let items = vec![item("a", 2), item("b", 2), item("c", 2)];
        let (selected, skipped) = select_items(&items, 2);
        assert_eq!(selected[0].name, "a");
        assert_eq!(selected[1].name, "b");
        assert_eq!(skipped[0].name, "c");
    }

    // =============================================
    // assemble_record
    // =============================================

    #[test]
    fn test_assemble_record_copies_reward_fields() {
        let decision = SustainabilityDecision {
            category: "packaging".to_string(),
            sustainability_type: SustainabilityType::Recyclable,
            best_action: BestAction::Recycle,
            resale_value_inr: 0.0,
            co2_saved_kg: 1.5,
            score: 70,
        };
        let recommendation = PolicyRecommendation {
            green_points: 15,
            action_type: ActionType::Community,
            steps: vec![],
            tools: BTreeSet::new(),
            estimated_minutes: 0.0,
        };

        let record = assemble_record(
            item("bottle", 4),
            decision,
            recommendation,
            "2026-08-07 10:00:00".to_string(),
        );

        assert_eq!(record.co2_saved_kg, 1.5);
        assert_eq!(record.points, 15);
        assert_eq!(record.item.name, "bottle");
        assert_eq!(record.timestamp, "2026-08-07 10:00:00");

        let reward = record_reward(&record);
        assert_eq!(reward.credits, 15);
        assert_eq!(reward.cash_inr, 30);
    }
}
