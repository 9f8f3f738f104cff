use crate::Message;

use chrono::{TimeZone, Utc};
use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_message_when_serialized_then_uses_wire_field_names() {
    // Given
    let message = Message {
        id: 7,
        content: "hello".into(),
        lat: 52.52,
        lng: 13.405,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    };

    // When
    let value = serde_json::to_value(&message).unwrap();

    // Then
    assert_that!(
        value,
        eq(&json!({
            "id": 7,
            "content": "hello",
            "lat": 52.52,
            "lng": 13.405,
            "createdAt": "2024-05-01T12:30:00Z",
        }))
    );
}

#[test]
fn given_new_message_when_created_then_timestamp_is_now() {
    // Given
    let before = Utc::now();

    // When
    let message = Message::new(1, "hi".into(), 1.0, 2.0);

    // Then
    let after = Utc::now();
    assert_that!(message.created_at, ge(before));
    assert_that!(message.created_at, le(after));
}

#[test]
fn given_out_of_range_coordinates_when_created_then_kept_verbatim() {
    // When
    let message = Message::new(1, String::new(), 123.0, -400.5);

    // Then
    assert_that!(message.lat, eq(123.0));
    assert_that!(message.lng, eq(-400.5));
    assert_that!(message.content, eq(""));
}
