//! Pins the serialized record shapes to the persisted wire contract.

use newborn_core::{Activity, DetailRef, Feeding, FeedingKind, Liquid, Sleep};
use serde_json::json;

#[test]
fn activity_serializes_with_record_id_object() {
    let activity = Activity {
        id: 3,
        start: 1_000,
        end: Some(2_000),
        detail: DetailRef::Feeding(12),
    };

    let value = serde_json::to_value(&activity).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 3,
            "start": 1_000,
            "end": 2_000,
            "recordId": { "id": 12, "tableName": "feedings" }
        })
    );
}

#[test]
fn ongoing_activity_omits_end_entirely() {
    let activity = Activity {
        id: 1,
        start: 500,
        end: None,
        detail: DetailRef::Sleep(4),
    };

    let value = serde_json::to_value(&activity).unwrap();
    assert!(value.get("end").is_none(), "absent end must not be null");
    assert_eq!(value["recordId"]["tableName"], "sleeps");
}

#[test]
fn activity_deserializes_from_wire_shape() {
    let activity: Activity = serde_json::from_value(json!({
        "id": 9,
        "start": 100,
        "recordId": { "id": 2, "tableName": "sleeps" }
    }))
    .unwrap();

    assert_eq!(activity.id, 9);
    assert!(activity.end.is_none());
    assert_eq!(activity.detail, DetailRef::Sleep(2));
}

#[test]
fn feeding_enum_spellings_match_persisted_data() {
    let feeding = Feeding {
        id: 2,
        start: None,
        end: None,
        comment: None,
        kind: Some(FeedingKind::BreastRight),
        liquid: Some(Liquid::Juice),
        amount: None,
    };

    let value = serde_json::to_value(&feeding).unwrap();
    assert_eq!(value, json!({ "id": 2, "type": "BREAST_R", "liquid": "JUCE" }));
}

#[test]
fn all_feeding_spellings_round_trip() {
    let kinds = [
        (FeedingKind::Breast, "BREAST"),
        (FeedingKind::BreastRight, "BREAST_R"),
        (FeedingKind::BreastLeft, "BREAST_L"),
        (FeedingKind::Bottle, "BOTTLE"),
    ];
    for (kind, spelling) in kinds {
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(spelling));
        assert_eq!(
            serde_json::from_value::<FeedingKind>(json!(spelling)).unwrap(),
            kind
        );
    }

    let liquids = [
        (Liquid::BreastMilk, "BREAST_MILK"),
        (Liquid::Formula, "FORMULA"),
        (Liquid::Water, "WATER"),
        (Liquid::Juice, "JUCE"),
    ];
    for (liquid, spelling) in liquids {
        assert_eq!(serde_json::to_value(liquid).unwrap(), json!(spelling));
        assert_eq!(
            serde_json::from_value::<Liquid>(json!(spelling)).unwrap(),
            liquid
        );
    }
}

#[test]
fn sparse_sleep_serializes_to_id_only() {
    let sleep = Sleep {
        id: 5,
        start: None,
        end: None,
        comment: None,
    };

    assert_eq!(serde_json::to_value(&sleep).unwrap(), json!({ "id": 5 }));
}
