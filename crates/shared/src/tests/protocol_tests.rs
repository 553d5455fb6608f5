use super::*;
use serde_json::json;

#[test]
fn conversation_area_uses_town_service_field_names() {
    let model = ConversationAreaModel {
        id: "conv-1".into(),
        topic: Some("rust".to_string()),
        occupants_by_id: vec!["p1".into(), "p2".into()],
    };

    let value = serde_json::to_value(&model).expect("encode");
    assert_eq!(
        value,
        json!({ "id": "conv-1", "topic": "rust", "occupantsByID": ["p1", "p2"] })
    );
}

#[test]
fn absent_topic_is_omitted_and_defaults_on_decode() {
    let model = ConversationAreaModel {
        id: "conv-1".into(),
        topic: None,
        occupants_by_id: Vec::new(),
    };
    let value = serde_json::to_value(&model).expect("encode");
    assert!(value.get("topic").is_none());

    let decoded: ConversationAreaModel =
        serde_json::from_value(json!({ "id": "conv-2" })).expect("decode");
    assert_eq!(decoded.topic, None);
    assert!(decoded.occupants_by_id.is_empty());
}

#[test]
fn viewing_area_uses_camel_case_fields() {
    let decoded: ViewingAreaModel = serde_json::from_value(json!({
        "id": "tv",
        "isPlaying": true,
        "elapsedTimeSec": -3.5,
    }))
    .expect("decode");

    assert_eq!(decoded.id, InteractableId::from("tv"));
    assert!(decoded.is_playing);
    assert_eq!(decoded.elapsed_time_sec, -3.5);
    assert_eq!(decoded.video, None);
}

#[test]
fn interactable_is_tagged_by_type() {
    let raw = json!({
        "type": "ViewingArea",
        "id": "tv",
        "isPlaying": false,
        "elapsedTimeSec": 0.0,
        "video": "abc"
    });
    let interactable: Interactable = serde_json::from_value(raw).expect("decode");

    assert_eq!(interactable.id().as_str(), "tv");
    assert_eq!(interactable.kind_name(), VIEWING_AREA_KIND);
    assert!(matches!(
        interactable,
        Interactable::ViewingArea(ref m) if m.video.as_deref() == Some("abc")
    ));
}

#[test]
fn town_event_uses_type_and_payload() {
    let event = TownEvent::PlayerJoined(PlayerModel {
        id: "p1".into(),
        user_name: "alice".to_string(),
        location: PlayerLocation::default(),
    });

    let raw = encode_event(&event).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["type"], "player_joined");
    assert_eq!(value["payload"]["userName"], "alice");
    assert_eq!(value["payload"]["location"]["rotation"], "front");

    assert_eq!(decode_event(&raw).expect("decode"), event);
}

#[test]
fn player_location_carries_optional_interactable_id() {
    let location: PlayerLocation = serde_json::from_value(json!({
        "x": 1.0,
        "y": 2.0,
        "rotation": "left",
        "moving": true,
        "interactableID": "conv-1"
    }))
    .expect("decode");

    assert_eq!(location.interactable_id, Some(InteractableId::from("conv-1")));
    assert_eq!(location.rotation, crate::domain::Direction::Left);
}

#[test]
fn malformed_event_is_a_decode_error() {
    let err = decode_event("{\"type\":\"unknown\"}").expect_err("should fail");
    assert!(matches!(err, ProtocolError::Decode(_)));
    assert!(err.to_string().starts_with("malformed wire record"));
}

#[test]
fn snapshot_defaults_missing_sections() {
    let snapshot = decode_snapshot("{}").expect("decode");
    assert!(snapshot.players.is_empty());
    assert!(snapshot.interactables.is_empty());
}
