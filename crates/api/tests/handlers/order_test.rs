use axum::http::StatusCode;
use axum::response::IntoResponse;
use carport_api::handlers::order::{order_filter, requester_for};
use carport_api::middleware::error_handling::AppError;
use carport_core::booking::{self, Requester};
use carport_core::models::order::{
    CreateOrderRequest, OrderQuery, OrderStatus, UpdateOrderStatusRequest,
};
use carport_core::models::user::Role;
use carport_core::scheduling::AdmissionPolicy;
use carport_db::mock::repositories::MockAppointmentStore;
use chrono::NaiveDate;
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{TestContext, fake_user, json_body, order, shop_time};

const OWNER: i64 = 10;
const CAR: i64 = 100;

fn booking_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

fn request_at(hour: u32, minute: u32) -> CreateOrderRequest {
    CreateOrderRequest {
        car_id: CAR,
        service_type: " WORKSHOP ".to_string(),
        address: Some("  ".to_string()),
        address_id: None,
        order_time: shop_time(hour, minute),
        services: vec!["oil change".to_string(), "Oil Change".to_string()],
    }
}

/// Status and `error` message a failed booking would be answered with.
async fn error_response(error: carport_core::errors::CarportError) -> (StatusCode, String) {
    let response = AppError(error).into_response();
    let status = response.status();
    let body = json_body(response).await;
    (status, body["error"].as_str().unwrap_or_default().to_string())
}

#[test]
fn test_requester_for() {
    assert_eq!(requester_for(&fake_user(1, Role::Admin)), Requester::Staff);
    assert_eq!(
        requester_for(&fake_user(OWNER, Role::User)),
        Requester::Customer(OWNER)
    );
}

#[tokio::test]
async fn test_order_filter_scopes_customers_to_themselves() {
    let ctx = TestContext::new();
    let customer = fake_user(OWNER, Role::User);
    let query = OrderQuery {
        date: None,
        user_id: Some(99),
        car_id: Some(CAR),
    };

    let filter = order_filter(&ctx.state, &customer, &query);

    assert_eq!(filter.user_id, Some(OWNER));
    assert_eq!(filter.car_id, Some(CAR));
    assert_eq!(filter.from, None);
}

#[tokio::test]
async fn test_order_filter_date_uses_shop_day() {
    let ctx = TestContext::new();
    let admin = fake_user(1, Role::Admin);
    let query = OrderQuery {
        date: Some(booking_day()),
        user_id: Some(99),
        car_id: None,
    };

    let filter = order_filter(&ctx.state, &admin, &query);

    assert_eq!(filter.user_id, Some(99));
    assert_eq!(filter.from, Some(shop_time(0, 0)));
    assert_eq!(filter.to, Some(shop_time(0, 0) + chrono::Duration::days(1)));
}

#[tokio::test]
async fn test_out_of_hours_booking_never_touches_store() {
    // No expectations: any store call panics
    let mut store = MockAppointmentStore::new();
    let policy = AdmissionPolicy::default();

    let error = booking::book(&mut store, &policy, Requester::Staff, request_at(7, 30))
        .await
        .unwrap_err();

    let (status, message) = error_response(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "Invalid order time or duration, outside of operational hours"
    );
}

#[tokio::test]
async fn test_booking_at_closing_hour_is_rejected() {
    let mut store = MockAppointmentStore::new();
    let policy = AdmissionPolicy::default();

    let result = booking::book(&mut store, &policy, Requester::Staff, request_at(17, 30)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_customer_cannot_book_foreign_car() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_lock_day()
        .with(predicate::eq(booking_day()))
        .times(1)
        .returning(|_| Ok(()));
    store
        .expect_find_vehicle_owner()
        .with(predicate::eq(CAR))
        .returning(|_| Ok(Some(OWNER)));
    store.expect_insert_order().never();

    let policy = AdmissionPolicy::default();
    let error = booking::book(&mut store, &policy, Requester::Customer(42), request_at(9, 0))
        .await
        .unwrap_err();

    let (status, _) = error_response(error).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_car_is_not_found() {
    let mut store = MockAppointmentStore::new();
    store.expect_lock_day().returning(|_| Ok(()));
    store.expect_find_vehicle_owner().returning(|_| Ok(None));

    let policy = AdmissionPolicy::default();
    let error = booking::book(&mut store, &policy, Requester::Staff, request_at(9, 0))
        .await
        .unwrap_err();

    let (status, message) = error_response(error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(message.contains("Car with ID 100"));
}

#[tokio::test]
async fn test_full_bays_reject_booking() {
    let mut store = MockAppointmentStore::new();
    store.expect_lock_day().returning(|_| Ok(()));
    store
        .expect_find_vehicle_owner()
        .returning(|_| Ok(Some(OWNER)));
    store.expect_appointments_between().returning(|_, _| {
        Ok(vec![
            order(1, OWNER, CAR, 9, 2).appointment(),
            order(2, 11, 101, 10, 1).appointment(),
        ])
    });
    store.expect_insert_order().never();

    let policy = AdmissionPolicy::default();
    let error = booking::book(&mut store, &policy, Requester::Staff, request_at(10, 30))
        .await
        .unwrap_err();

    let (status, message) = error_response(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Exceeded maximum orders for the given time");
}

#[tokio::test]
async fn test_canceled_orders_free_their_bay() {
    let mut store = MockAppointmentStore::new();
    store.expect_lock_day().returning(|_| Ok(()));
    store
        .expect_find_vehicle_owner()
        .returning(|_| Ok(Some(OWNER)));
    store.expect_appointments_between().returning(|_, _| {
        let mut canceled = order(1, OWNER, CAR, 9, 2);
        canceled.status = OrderStatus::Canceled;
        Ok(vec![canceled.appointment(), order(2, 11, 101, 10, 1).appointment()])
    });
    store
        .expect_insert_order()
        .times(1)
        .returning(|new_order| {
            let mut stored = order(3, new_order.user_id, new_order.car_id, 10, new_order.duration);
            stored.order_time = new_order.order_time;
            Ok(stored)
        });

    let policy = AdmissionPolicy::default();
    let booked = booking::book(&mut store, &policy, Requester::Staff, request_at(10, 30))
        .await
        .unwrap();

    assert_eq!(booked.id, 3);
    assert_eq!(booked.order_time, shop_time(10, 30));
}

#[tokio::test]
async fn test_booking_normalizes_the_new_order() {
    let mut store = MockAppointmentStore::new();
    store.expect_lock_day().returning(|_| Ok(()));
    store
        .expect_find_vehicle_owner()
        .returning(|_| Ok(Some(OWNER)));
    store.expect_appointments_between().returning(|_, _| Ok(vec![]));
    store
        .expect_insert_order()
        .withf(|new_order| {
            new_order.user_id == OWNER
                && new_order.service_type == "WORKSHOP"
                && new_order.address.is_none()
                && new_order.duration == booking::DEFAULT_DURATION_HOURS
                && new_order.services == vec!["Oil Change".to_string()]
        })
        .times(1)
        .returning(|new_order| Ok(order(5, new_order.user_id, new_order.car_id, 9, 1)));

    let policy = AdmissionPolicy::default();
    let booked = booking::book(&mut store, &policy, Requester::Customer(OWNER), request_at(9, 0))
        .await
        .unwrap();

    assert_eq!(booked.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_reschedule_missing_order() {
    let mut store = MockAppointmentStore::new();
    store.expect_find_order().returning(|_| Ok(None));

    let policy = AdmissionPolicy::default();
    let request = UpdateOrderStatusRequest {
        status: OrderStatus::Confirmed,
        duration: Some(2),
    };
    let error = booking::reschedule(&mut store, &policy, 404, request)
        .await
        .unwrap_err();

    let (status, _) = error_response(error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_only_update_skips_admission() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_find_order()
        .returning(|id| Ok(Some(order(id, OWNER, CAR, 9, 1))));
    store.expect_lock_day().never();
    store.expect_appointments_between().never();
    store
        .expect_update_schedule()
        .with(
            predicate::eq(7),
            predicate::eq(OrderStatus::Done),
            predicate::eq(None::<u32>),
        )
        .times(1)
        .returning(|id, status, _| {
            let mut updated = order(id, OWNER, CAR, 9, 1);
            updated.status = status;
            Ok(updated)
        });

    let policy = AdmissionPolicy::default();
    let request = UpdateOrderStatusRequest {
        status: OrderStatus::Done,
        duration: None,
    };
    let updated = booking::reschedule(&mut store, &policy, 7, request)
        .await
        .unwrap();

    assert_eq!(updated.status, OrderStatus::Done);
}

#[tokio::test]
async fn test_extending_past_closing_is_rejected() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_find_order()
        .returning(|id| Ok(Some(order(id, OWNER, CAR, 16, 1))));
    store.expect_lock_day().returning(|_| Ok(()));
    store.expect_appointments_between().returning(|_, _| Ok(vec![]));
    store.expect_update_schedule().never();

    let policy = AdmissionPolicy::default();
    let request = UpdateOrderStatusRequest {
        status: OrderStatus::Confirmed,
        duration: Some(3),
    };
    let error = booking::reschedule(&mut store, &policy, 7, request)
        .await
        .unwrap_err();

    let (status, message) = error_response(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "Invalid order time or duration, outside of operational hours"
    );
}

#[tokio::test]
async fn test_unrepresentable_duration_is_a_bad_request() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_find_order()
        .returning(|id| Ok(Some(order(id, OWNER, CAR, 9, 1))));
    store.expect_lock_day().returning(|_| Ok(()));
    store.expect_appointments_between().returning(|_, _| Ok(vec![]));
    store.expect_update_schedule().never();

    let policy = AdmissionPolicy::default();
    let request = UpdateOrderStatusRequest {
        status: OrderStatus::Confirmed,
        duration: Some(u32::MAX),
    };
    let error = booking::reschedule(&mut store, &policy, 7, request)
        .await
        .unwrap_err();

    let (status, message) = error_response(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "Invalid order time or duration, outside of operational hours"
    );
}
