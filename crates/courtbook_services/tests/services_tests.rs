//! Integration tests for the resource services

use chrono::NaiveDate;
use courtbook_client::{ApiClient, ApiError};
use courtbook_common::HttpStatus;
use courtbook_config::AppConfig;
use courtbook_services::models::{
    CourtInput, OpeningHours, ProfileUpdate, RegisterRequest, ReservationStatus, SiteInput, SiteRef,
};
use courtbook_services::{
    AvailabilityWindow, BookingForm, CourtFilter, Courtbook, ReservationFilter, SiteFilter,
    UsageStats,
};
use serde_json::json;
use wiremock::matchers::{
    any, body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A server that fails the test if any request reaches it.
async fn silent_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}

fn courtbook(server: &MockServer) -> Courtbook {
    Courtbook::new(ApiClient::new(format!("{}/api", server.uri())).unwrap())
}

async fn signed_in(server: &MockServer) -> Courtbook {
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "T1",
            "refresh": "R1",
            "user": {"id": 3, "email": "a@b.com", "first_name": "Ada", "last_name": "L"},
            "message": "Login successful"
        })))
        .mount(server)
        .await;

    let app = courtbook(server);
    let login = app.auth.login("a@b.com", "x").await.unwrap();
    assert_eq!(login.user.map(|u| u.email), Some("a@b.com".to_string()));
    app
}

#[tokio::test]
async fn test_courts_list_accepts_paginated_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courts/courts/"))
        .and(query_param("sport_type", "TENNIS"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "name": "Court A", "sport_type": "TENNIS", "site_name": "Riverside", "price_per_hour": "20.00"},
                {"id": 2, "name": "Court B", "sport_type": "TENNIS", "site_name": "Riverside", "price_per_hour": 25}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let courts = app
        .courts
        .list(&CourtFilter::default().search("").sport("TENNIS"))
        .await
        .unwrap();

    assert_eq!(courts.len(), 2);
    assert_eq!(courts[0].price_per_hour, 20.0);
    assert_eq!(courts[1].price_per_hour, 25.0);
    assert_eq!(courts[1].site_label(), Some("Riverside"));
}

#[tokio::test]
async fn test_sites_list_accepts_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sites/"))
        .and(query_param("city", "Lyon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Riverside", "city": "Lyon", "courts_count": 4}
        ])))
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let filter = SiteFilter {
        city: Some("Lyon".to_string()),
        ..Default::default()
    };
    let sites = app.sites.list(&filter).await.unwrap();

    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].courts_count, Some(4));
}

#[tokio::test]
async fn test_court_detail_with_nested_site() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courts/courts/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Central",
            "sport_type": "PADEL",
            "site": {"id": 2, "name": "Riverside", "city": "Lyon"},
            "price_per_hour": "30.00",
            "equipments": [{"id": 1, "name": "Lights"}]
        })))
        .mount(&mock_server)
        .await;

    let court = courtbook(&mock_server).courts.retrieve(5).await.unwrap();
    assert_eq!(court.site.as_ref().map(SiteRef::id), Some(2));
    assert_eq!(court.equipments.len(), 1);
}

#[tokio::test]
async fn test_missing_court_reports_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courts/courts/5/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    let err = courtbook(&mock_server).courts.retrieve(5).await.unwrap_err();
    assert_eq!(err.message(), "Not found.");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_court_availability_sends_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courts/courts/5/availability/"))
        .and(query_param("start", "2025-06-01T10:00:00"))
        .and(query_param("end", "2025-06-01T11:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "court_id": 5, "is_available": true,
            "start": "2025-06-01T10:00:00", "end": "2025-06-01T11:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let window = AvailabilityWindow::new("2025-06-01T10:00:00", "2025-06-01T11:00:00");
    assert!(app.courts.availability(5, &window).await.unwrap().is_available);

    let empty = AvailabilityWindow::new("", "2025-06-01T11:00:00");
    assert!(matches!(
        app.courts.availability(5, &empty).await,
        Err(ApiError::Validation(_))
    ));
}

#[tokio::test]
async fn test_book_sends_validated_payload() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/"))
        .and(header("authorization", "Bearer T1"))
        .and(body_json(json!({
            "court": 5,
            "start_datetime": "2025-06-01T09:00:00",
            "end_datetime": "2025-06-01T10:00:00",
            "notes": "Pay on site",
            "user_email": "a@b.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "court": 5,
            "start_datetime": "2025-06-01T09:00:00+02:00",
            "end_datetime": "2025-06-01T10:00:00+02:00",
            "price_per_hour": "20.00",
            "total_amount": "20.00",
            "status": "PENDING"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let form = BookingForm {
        court_id: Some(5),
        date: "2025-06-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        notes: None,
    };
    let reservation = app.reservations.book(&form).await.unwrap();

    assert_eq!(reservation.id, 42);
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.total_amount, 20.0);
}

#[tokio::test]
async fn test_book_without_user_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let form = BookingForm {
        court_id: Some(5),
        date: "2025-06-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        notes: None,
    };
    let err = courtbook(&mock_server)
        .reservations
        .book(&form)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_cancel_posts_reason() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/9/cancel/"))
        .and(body_json(json!({"reason": "Rain"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Reservation cancelled",
            "reservation": {"id": 9, "status": "CANCELLED"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app.reservations.cancel(9, Some("Rain")).await.unwrap();
    assert_eq!(
        response.reservation.map(|r| r.status),
        Some(ReservationStatus::Cancelled)
    );
}

#[tokio::test]
async fn test_cancel_too_late_surfaces_backend_message() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/9/cancel/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"message": "Cannot cancel less than 24h before"})),
        )
        .mount(&mock_server)
        .await;

    let err = app.reservations.cancel(9, None).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Cannot cancel less than 24h before");
}

#[tokio::test]
async fn test_check_availability_and_site_stats() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/check_availability/"))
        .and(body_json(json!({
            "court_id": 5, "start": "2025-06-01T09:00:00", "end": "2025-06-01T10:00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "court_id": 5, "is_available": false, "price_per_hour": 20.0
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/site_stats/"))
        .and(query_param("site_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_reservations": 10,
            "confirmed_reservations": 4,
            "total_revenue": 120.0,
            "occupancy_rate": 40.0
        })))
        .mount(&mock_server)
        .await;

    let check = app
        .reservations
        .check_availability(5, "2025-06-01T09:00:00", "2025-06-01T10:00:00")
        .await
        .unwrap();
    assert!(!check.is_available);
    assert_eq!(check.price_per_hour, 20.0);

    let stats = app.reservations.site_stats(2).await.unwrap();
    assert_eq!(stats.confirmed_reservations, 4);
    assert_eq!(stats.occupancy_rate, 40.0);
}

#[tokio::test]
async fn test_reservation_filter_and_usage_stats() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/"))
        .and(query_param("user_email", "a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {
                "id": 1, "court": 5,
                "court_details": {"id": 5, "name": "Court A", "sport_type": "TENNIS"},
                "start_datetime": "2025-06-10T09:00:00", "end_datetime": "2025-06-10T11:00:00",
                "total_amount": "40.00", "status": "CONFIRMED"
            },
            {
                "id": 2, "court": 6,
                "start_datetime": "2025-05-02T18:00:00", "end_datetime": "2025-05-02T19:00:00",
                "total_amount": "15.50", "status": "CANCELLED"
            }
        ]})))
        .mount(&mock_server)
        .await;

    let filter = ReservationFilter {
        user_email: Some("a@b.com".to_string()),
        ..Default::default()
    };
    let reservations = app.reservations.list(&filter).await.unwrap();
    let now = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap();
    let stats = UsageStats::from_reservations(&reservations, now);

    assert_eq!(stats.total_bookings, 2);
    assert!((stats.total_spent - 55.5).abs() < 1e-9);
    assert_eq!(stats.hours_booked, 3.0);
    assert_eq!(stats.upcoming_bookings, 1);
    assert_eq!(stats.cancelled_bookings, 1);
    assert_eq!(stats.monthly.last().map(|m| m.count), Some(1));
}

#[tokio::test]
async fn test_logout_revokes_then_clears_even_on_failure() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid token"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    app.auth.logout().await;
    assert!(!app.client().is_authenticated());

    // Already signed out: no second revocation call.
    app.auth.logout().await;
}

#[tokio::test]
async fn test_delete_account_clears_session() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/delete_account/"))
        .and(body_json(json!({"password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Account deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app.auth.delete_account("x").await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Account deleted"));
    assert!(!app.client().is_authenticated());
    assert_eq!(app.client().current_user(), None);
}

#[tokio::test]
async fn test_wrong_password_keeps_session() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/change_password/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Wrong password"})))
        .mount(&mock_server)
        .await;

    let err = app.auth.change_password("bad", "new").await.unwrap_err();
    assert_eq!(err.message(), "HTTP Error: 400");
    assert!(app.client().is_authenticated());
}

#[tokio::test]
async fn test_payment_intent_and_refund() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/payments/payments/create_payment_intent/"))
        .and(body_json(json!({"reservation_id": 42})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "payment_intent_id": "pi_123", "client_secret": "secret", "amount": 22.0, "currency": "EUR"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/payments/payments/7/refund/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "reservation": 42, "amount": "22.00", "currency": "EUR",
            "method": "STRIPE", "status": "REFUNDED"
        })))
        .mount(&mock_server)
        .await;

    let intent = app.payments.create_payment_intent(42).await.unwrap();
    assert_eq!(intent.payment_intent_id, "pi_123");

    let refunded = app.payments.refund(7).await.unwrap();
    assert_eq!(refunded.amount, 22.0);
    assert_eq!(
        refunded.status,
        courtbook_services::models::PaymentStatus::Refunded
    );
}

#[tokio::test]
async fn test_update_profile_refreshes_user_used_for_booking() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/auth/me/"))
        .and(body_json(json!({"first_name": "Grace", "phone": "0600000000"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "email": "grace@b.com", "first_name": "Grace", "last_name": "L",
            "phone": "0600000000"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/"))
        .and(body_json(json!({
            "court": 5,
            "start_datetime": "2025-06-01T09:00:00",
            "end_datetime": "2025-06-01T10:00:00",
            "notes": "Pay on site",
            "user_email": "grace@b.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 43, "court": 5, "total_amount": "20.00", "status": "PENDING"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = ProfileUpdate {
        first_name: Some("Grace".to_string()),
        phone: Some("0600000000".to_string()),
        ..Default::default()
    };
    let user = app.auth.update_profile(&update).await.unwrap();
    assert_eq!(user.email, "grace@b.com");

    let cached = app.client().current_user().unwrap();
    assert_eq!(cached["email"], "grace@b.com");
    assert_eq!(cached["first_name"], "Grace");

    let form = BookingForm {
        court_id: Some(5),
        date: "2025-06-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        notes: None,
    };
    assert_eq!(app.reservations.book(&form).await.unwrap().id, 43);
}

#[tokio::test]
async fn test_register_posts_account_and_does_not_sign_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({
            "email": "new@b.com",
            "first_name": "New",
            "last_name": "Player",
            "password": "s3cret!",
            "password_confirm": "s3cret!",
            "gdpr_consent": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": {"id": 8, "email": "new@b.com"},
            "message": "Account created"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let request = RegisterRequest {
        email: "new@b.com".to_string(),
        first_name: "New".to_string(),
        last_name: "Player".to_string(),
        password: "s3cret!".to_string(),
        password_confirm: "s3cret!".to_string(),
        gdpr_consent: true,
        ..Default::default()
    };
    let response = app.auth.register(&request).await.unwrap();

    assert_eq!(response.user.map(|u| u.id), Some(Some(8)));
    assert_eq!(response.message.as_deref(), Some("Account created"));
    assert!(!app.client().is_authenticated());
}

#[tokio::test]
async fn test_register_rejects_bad_input_locally() {
    let mock_server = silent_server().await;
    let app = courtbook(&mock_server);

    let mismatch = RegisterRequest {
        email: "new@b.com".to_string(),
        password: "one".to_string(),
        password_confirm: "two".to_string(),
        ..Default::default()
    };
    let err = app.auth.register(&mismatch).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.message(), "Passwords do not match");

    let blank = RegisterRequest {
        email: "  ".to_string(),
        password: "x".to_string(),
        password_confirm: "x".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        app.auth.register(&blank).await,
        Err(ApiError::Validation(_))
    ));
}

#[tokio::test]
async fn test_me_by_email_sends_lookup_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(query_param("user_email", "a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "email": "a@b.com", "first_name": "Ada", "role_name": "CLIENT"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let user = app.auth.me_by_email("a@b.com").await.unwrap();
    assert_eq!(user.id, Some(3));
    assert_eq!(user.role_name.as_deref(), Some("CLIENT"));
}

#[tokio::test]
async fn test_opening_hours_read_and_set() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/sites/2/opening_hours/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "site": 2, "day_of_week": 0, "day_name": "Monday", "open_time": "08:00:00", "close_time": "22:00:00"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/sites/2/set_opening_hours/"))
        .and(body_json(json!([
            {"day_of_week": 5, "open_time": "09:00", "close_time": "18:00"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "site": 2, "day_of_week": 0, "open_time": "08:00:00", "close_time": "22:00:00"},
            {"id": 6, "site": 2, "day_of_week": 5, "open_time": "09:00:00", "close_time": "18:00:00"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hours = app.sites.opening_hours(2).await.unwrap();
    assert_eq!(hours.len(), 1);
    assert_eq!(hours[0].day_name.as_deref(), Some("Monday"));

    let schedule = app
        .sites
        .set_opening_hours(2, &[OpeningHours::new(5, "09:00", "18:00")])
        .await
        .unwrap();
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule[1].close_time, "18:00:00");

    let err = app
        .sites
        .set_opening_hours(2, &[OpeningHours::new(7, "09:00", "18:00")])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_site_create_update_delete() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    let site = SiteInput {
        name: "Riverside".to_string(),
        address: "1 Quai".to_string(),
        city: "Lyon".to_string(),
        postal_code: "69001".to_string(),
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/api/sites/"))
        .and(body_json(json!({
            "name": "Riverside", "address": "1 Quai", "city": "Lyon", "postal_code": "69001"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "name": "Riverside"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/sites/9/"))
        .and(body_json(json!({
            "name": "Riverside", "address": "1 Quai", "city": "Lyon", "postal_code": "69001",
            "is_active": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "name": "Riverside", "is_active": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/sites/9/"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = app.sites.create(&site).await.unwrap();
    assert_eq!(created.id, 9);

    let closed = SiteInput {
        is_active: Some(false),
        ..site.clone()
    };
    assert_eq!(app.sites.update(9, &closed).await.unwrap().is_active, Some(false));

    app.sites.delete(9).await.unwrap();

    let unnamed = SiteInput {
        name: " ".to_string(),
        ..site
    };
    assert!(matches!(
        app.sites.create(&unnamed).await,
        Err(ApiError::Validation(_))
    ));
}

#[tokio::test]
async fn test_court_create_update_delete() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    let court = CourtInput {
        name: "Court C".to_string(),
        sport_type: "PADEL".to_string(),
        site: 2,
        price_per_hour: 20.0,
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/api/courts/courts/"))
        .and(body_json(json!({
            "name": "Court C", "sport_type": "PADEL", "site": 2, "price_per_hour": 20.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11, "name": "Court C", "sport_type": "PADEL", "site": 2, "price_per_hour": "20.00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/courts/courts/11/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "name": "Court C", "price_per_hour": "24.00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/courts/courts/11/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = app.courts.create(&court).await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.price_per_hour, 20.0);

    let pricier = CourtInput {
        price_per_hour: 24.0,
        ..court.clone()
    };
    assert_eq!(app.courts.update(11, &pricier).await.unwrap().price_per_hour, 24.0);

    app.courts.delete(11).await.unwrap();

    let negative = CourtInput {
        price_per_hour: -1.0,
        ..court
    };
    assert!(matches!(
        app.courts.update(11, &negative).await,
        Err(ApiError::Validation(_))
    ));
}

#[tokio::test]
async fn test_equipments_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courts/equipments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": null, "previous": null,
            "results": [
                {"id": 1, "name": "Lights", "icon": "bulb"},
                {"id": 2, "name": "Showers"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = courtbook(&mock_server);
    let equipments = app.courts.equipments().await.unwrap();
    let names: Vec<&str> = equipments.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Lights", "Showers"]);
    assert_eq!(equipments[0].icon.as_deref(), Some("bulb"));
}

#[tokio::test]
async fn test_confirm_payment_and_invoices() {
    let mock_server = MockServer::start().await;
    let app = signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/payments/payments/confirm_payment/"))
        .and(body_json(json!({"payment_intent_id": "pi_123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "reservation": 42, "amount": "22.00", "currency": "EUR",
            "method": "STRIPE", "status": "COMPLETED"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/payments/invoices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "invoice_number": "INV-2025-0004", "pdf_file": null}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/payments/invoices/4/download/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "/media/invoices/INV-2025-0004.pdf", "invoice_number": "INV-2025-0004"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/payments/invoices/5/download/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Facture PDF non disponible"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let payment = app.payments.confirm_payment("pi_123").await.unwrap();
    assert_eq!(payment.id, 7);

    let invoices = app.payments.invoices().await.unwrap();
    assert_eq!(invoices[0].invoice_number, "INV-2025-0004");

    let download = app.payments.download_invoice(4).await.unwrap();
    assert_eq!(download.url, "/media/invoices/INV-2025-0004.pdf");

    let missing = app.payments.download_invoice(5).await.unwrap_err();
    assert_eq!(missing.status(), Some(404));
}

#[tokio::test]
async fn test_confirm_payment_requires_intent_id() {
    let mock_server = silent_server().await;
    let app = courtbook(&mock_server);

    let err = app.payments.confirm_payment("  ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_from_config_restores_file_session() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.api.base_url = format!("{}/api", mock_server.uri());
    config.session.storage_path = Some(
        dir.path()
            .join("session.json")
            .to_string_lossy()
            .into_owned(),
    );

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "T1", "refresh": "R1", "user": {"email": "a@b.com"}
        })))
        .mount(&mock_server)
        .await;

    Courtbook::from_config(&config)
        .unwrap()
        .auth
        .login("a@b.com", "x")
        .await
        .unwrap();

    let restored = Courtbook::from_config(&config).unwrap();
    assert!(restored.client().is_authenticated());
    assert_eq!(
        restored.client().current_user(),
        Some(json!({"email": "a@b.com"}))
    );
}
