use crate::ApiError;

use geo_core::CoreError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_bad_request_returns_400_with_json_body() {
    let error = ApiError::BadRequest {
        message: "missing field `lat`".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "missing field `lat`");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "boom".into(),
        cause: "disk on fire".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_json_decode_error_maps_to_bad_request() {
    let decode_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let error = ApiError::from(decode_error);

    assert!(matches!(error, ApiError::BadRequest { .. }));
    assert!(error.to_string().contains("Invalid request body"));
}

#[tokio::test]
async fn test_store_error_maps_to_internal_without_details() {
    let store_error = CoreError::IdentifierExhausted {
        last_id: u64::MAX,
        location: ErrorLocation::from(Location::caller()),
    };

    let response = ApiError::from(store_error).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Failed to store message");
}

#[test]
fn test_store_error_keeps_cause_for_the_log_only() {
    let store_error = CoreError::IdentifierExhausted {
        last_id: u64::MAX,
        location: ErrorLocation::from(Location::caller()),
    };
    let store_message = store_error.to_string();

    let error = ApiError::from(store_error);

    // Display is what IntoResponse logs, once
    assert!(error.to_string().contains(&store_message));
    match error {
        ApiError::Internal { message, cause, .. } => {
            assert_eq!(message, "Failed to store message");
            assert_eq!(cause, store_message);
        }
        other => panic!("expected internal error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_internal_error_body_omits_cause() {
    let error = ApiError::Internal {
        message: "Failed to store message".into(),
        cause: "identifier space exhausted".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let json = body_json(error.into_response()).await;

    assert!(!json.to_string().contains("identifier space exhausted"));
}
