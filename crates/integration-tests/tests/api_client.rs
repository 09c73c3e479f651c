//! Integration tests for the backend REST client against the mock backend.
//!
//! These cover envelope unwrapping, query encoding and the mapping of HTTP
//! failures to `ApiError`.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use rentdesk_admin::api::{
    ApiError, BookingFilter, LookupKind, LookupPayload, PageParams,
};
use rentdesk_core::{BookingId, BookingStatus, LookupId};
use rentdesk_integration_tests::MockBackend;

// =============================================================================
// Envelope Tests
// =============================================================================

#[tokio::test]
async fn test_list_unwraps_envelope_and_meta() {
    let backend = MockBackend::spawn().await;
    let page = backend
        .client()
        .list_bookings(PageParams::new(1, 15), &BookingFilter::default())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].reference(), "BK-1001");
    assert_eq!(page.items[0].nights(), Some(3));
    assert_eq!(page.items[0].total().display(), "360.00 EUR");
    assert_eq!(page.pagination.total, 23);
    assert_eq!(page.pagination.page_count(), 2);
    assert!(page.pagination.has_next());
    assert_eq!(page.count("pending"), Some(4));
    assert_eq!(page.count("accepted"), Some(6));
}

#[tokio::test]
async fn test_list_sends_paging_and_filters() {
    let backend = MockBackend::spawn().await;
    let filter = BookingFilter {
        status: Some(BookingStatus::Pending),
        q: Some("   ".to_string()),
        ..BookingFilter::default()
    };
    backend
        .client()
        .list_bookings(PageParams::new(2, 25), &filter)
        .await
        .unwrap();

    let request = backend.requests().pop().unwrap();
    assert_eq!(request.path, "/api/admin/bookings");
    assert_eq!(request.query.get("page").map(String::as_str), Some("2"));
    assert_eq!(request.query.get("per_page").map(String::as_str), Some("25"));
    assert_eq!(request.query.get("limit").map(String::as_str), Some("25"));
    assert_eq!(request.query.get("status").map(String::as_str), Some("pending"));
    // Blank search boxes never reach the backend.
    assert!(!request.query.contains_key("q"));
}

#[tokio::test]
async fn test_missing_success_flag_is_success() {
    let backend = MockBackend::spawn().await;
    let features = backend
        .client()
        .list_lookups(LookupKind::Features)
        .await
        .unwrap();
    let names: Vec<_> = features.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Wifi", "Pool"]);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_error() {
    let backend = MockBackend::spawn().await;
    let err = backend
        .client()
        .list_transactions(PageParams::new(1, 15), &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unsuccessful(ref m) if m == "Ledger is being rebuilt"));
    assert_eq!(err.user_message(), "Ledger is being rebuilt");
}

#[tokio::test]
async fn test_no_content_is_empty_ack() {
    let backend = MockBackend::spawn().await;
    let payload = LookupPayload {
        name: "Sauna".to_string(),
        icon: None,
        description: None,
    };
    let ack = backend
        .client()
        .create_lookup(LookupKind::Features, &payload)
        .await
        .unwrap();
    assert!(ack.message.is_none());

    let post = backend.requests_with_method("POST").pop().unwrap();
    assert_eq!(post.path, "/api/admin/features");
    assert_eq!(post.body, Some(json!({"name": "Sauna"})));
}

#[tokio::test]
async fn test_empty_ok_body_is_empty_ack() {
    let backend = MockBackend::spawn().await;
    let ack = backend
        .client()
        .delete_lookup(LookupKind::Features, LookupId::new(1))
        .await
        .unwrap();
    assert!(ack.message.is_none());

    let delete = backend.requests_with_method("DELETE").pop().unwrap();
    assert_eq!(delete.path, "/api/admin/features/1");
}

#[tokio::test]
async fn test_failed_mutation_is_not_an_ack() {
    let backend = MockBackend::spawn().await;
    backend.fail_next(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"message": "Database unavailable"}),
    );
    let err = backend
        .client()
        .delete_lookup(LookupKind::Features, LookupId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, .. }));
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_not_found_maps_to_none() {
    let backend = MockBackend::spawn().await;
    let booking = backend.client().get_booking(BookingId::new(404)).await.unwrap();
    assert!(booking.is_none());
}

#[tokio::test]
async fn test_validation_error_carries_field_messages() {
    let backend = MockBackend::spawn().await;
    backend.fail_next(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"message": "The given data was invalid.", "errors": {"name": ["The name has already been taken."]}}),
    );
    let payload = LookupPayload {
        name: "Wifi".to_string(),
        icon: None,
        description: None,
    };
    let err = backend
        .client()
        .create_lookup(LookupKind::Features, &payload)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(err.user_message().contains("The name has already been taken."));
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let backend = MockBackend::spawn().await;
    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "Server Error"}));
    let err = backend
        .client()
        .get_booking(BookingId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_rate_limit_defaults_retry_after() {
    let backend = MockBackend::spawn().await;
    backend.fail_next(StatusCode::TOO_MANY_REQUESTS, json!({}));
    let err = backend.client().list_settings().await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited(60)));
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let backend = MockBackend::spawn().await;
    let err = backend
        .client_with_token("rd_live_wrongTokenValue42")
        .ping()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

// =============================================================================
// Mutation Body Tests
// =============================================================================

#[tokio::test]
async fn test_status_update_body() {
    let backend = MockBackend::spawn().await;
    let ack = backend
        .client()
        .update_booking_status(
            BookingId::new(1),
            BookingStatus::Accepted,
            Some("Confirmed by phone".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Booking status updated"));

    let put = backend.requests_with_method("PUT").pop().unwrap();
    assert_eq!(put.path, "/api/admin/bookings/1");
    assert_eq!(
        put.body,
        Some(json!({"status": "accepted", "note": "Confirmed by phone"}))
    );
}
