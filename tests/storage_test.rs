//! Storage integration tests
//!
//! Ledger append/list behavior, the identity store and the shop store,
//! all against temp directories.

use recircle::storage::{Ledger, Registration, ShopItem, ShopStore, UserStore};
use recircle_common::{
    ActionType, BestAction, Condition, DetectedItem, PolicyRecommendation, ResultRecord,
    SustainabilityDecision, SustainabilityType,
};
use tempfile::tempdir;

fn record(name: &str, points: u64, co2: f64) -> ResultRecord {
    ResultRecord {
        item: DetectedItem {
            name: name.to_string(),
            material: "PET".to_string(),
            condition: Condition::Used,
            quantity: 1,
        },
        decision: SustainabilityDecision {
            category: "packaging".to_string(),
            sustainability_type: SustainabilityType::Recyclable,
            best_action: BestAction::Recycle,
            resale_value_inr: 0.0,
            co2_saved_kg: co2,
            score: 60,
        },
        recommendation: PolicyRecommendation {
            green_points: points,
            action_type: ActionType::Household,
            steps: vec!["drop at the collection point".to_string()],
            tools: Default::default(),
            estimated_minutes: 10.0,
        },
        co2_saved_kg: co2,
        points,
        timestamp: "2026-08-07 10:00:00".to_string(),
    }
}

/// Appending N records for a user returns exactly those N, in append
/// order, regardless of interleaved appends for other users.
#[test]
fn test_ledger_per_user_append_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let ledger = Ledger::open(dir.path()).expect("open failed");

    for i in 0..5u64 {
        ledger
            .append("asha", &record(&format!("asha-item-{}", i), i, 0.1))
            .unwrap();
        ledger
            .append("ravi", &record(&format!("ravi-item-{}", i), i, 0.2))
            .unwrap();
    }

    let asha = ledger.list_by_user("asha").unwrap();
    assert_eq!(asha.len(), 5);
    for (i, entry) in asha.iter().enumerate() {
        assert_eq!(entry.item.name, format!("asha-item-{}", i));
    }

    let ravi = ledger.list_by_user("ravi").unwrap();
    assert_eq!(ravi.len(), 5);
    for (i, entry) in ravi.iter().enumerate() {
        assert_eq!(entry.item.name, format!("ravi-item-{}", i));
    }

    assert!(ledger.list_by_user("nobody").unwrap().is_empty());
}

#[test]
fn test_ledger_survives_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");

    {
        let ledger = Ledger::open(dir.path()).expect("open failed");
        ledger.append("asha", &record("bottle", 10, 1.0)).unwrap();
    }

    let reopened = Ledger::open(dir.path()).expect("reopen failed");
    let records = reopened.list_by_user("asha").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].points, 10);

    let ids = reopened.list_user_ids().unwrap();
    assert_eq!(ids.len(), 1);
    assert!(ids.contains("asha"));
}

#[test]
fn test_user_store_register_and_verify() {
    let dir = tempdir().expect("Failed to create temp dir");
    let users = UserStore::open(dir.path()).expect("open failed");

    assert_eq!(
        users.register("asha", "green-password").unwrap(),
        Registration::Created
    );
    assert_eq!(
        users.register("asha", "another").unwrap(),
        Registration::AlreadyExists
    );

    assert!(users.verify("asha", "green-password").unwrap());
    assert!(!users.verify("asha", "wrong").unwrap());
    assert!(!users.verify("unknown", "green-password").unwrap());
}

#[test]
fn test_user_store_survives_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");

    {
        let users = UserStore::open(dir.path()).expect("open failed");
        users.register("ravi", "pass").unwrap();
    }

    let reopened = UserStore::open(dir.path()).expect("reopen failed");
    assert!(reopened.exists("ravi").unwrap());
    assert!(reopened.verify("ravi", "pass").unwrap());
}

#[test]
fn test_shop_add_and_list_in_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let shop = ShopStore::open(dir.path()).expect("open failed");

    shop.add(&ShopItem {
        seller: "asha".to_string(),
        item_name: "bottle lamp".to_string(),
        description: "upcycled PET lamp".to_string(),
        price_inr: 250.0,
        image_path: None,
        listed_at: "2026-08-07 10:00:00".to_string(),
    })
    .unwrap();
    shop.add(&ShopItem {
        seller: "ravi".to_string(),
        item_name: "tyre planter".to_string(),
        description: String::new(),
        price_inr: 400.0,
        image_path: Some("uploads/tyre.jpg".to_string()),
        listed_at: "2026-08-07 11:00:00".to_string(),
    })
    .unwrap();

    let items = shop.list_all().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_name, "bottle lamp");
    assert_eq!(items[1].item_name, "tyre planter");
    assert_eq!(items[1].image_path.as_deref(), Some("uploads/tyre.jpg"));
}
