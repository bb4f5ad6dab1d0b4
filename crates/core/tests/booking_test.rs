use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Jakarta;
use pretty_assertions::assert_eq;
use carport_core::booking::{self, AppointmentStore, Requester};
use carport_core::errors::{CarportError, CarportResult};
use carport_core::models::order::{
    CreateOrderRequest, NewOrder, Order, OrderStatus, UpdateOrderPriceRequest,
    UpdateOrderStatusRequest,
};
use carport_core::scheduling::{AdmissionPolicy, Appointment, Rejection};

const OWNER: i64 = 10;
const CAR: i64 = 100;

/// In-memory unit of work recording which days were locked.
#[derive(Default)]
struct MemoryStore {
    cars: HashMap<i64, i64>,
    orders: Vec<Order>,
    locked_days: Vec<NaiveDate>,
}

impl MemoryStore {
    fn with_car() -> Self {
        let mut store = Self::default();
        store.cars.insert(CAR, OWNER);
        store
    }

    fn seed(&mut self, hour: u32, minute: u32, duration: u32, status: OrderStatus) -> i64 {
        let id = self.orders.len() as i64 + 1;
        let now = Utc::now();
        self.orders.push(Order {
            id,
            user_id: OWNER,
            car_id: CAR,
            service_type: "WORKSHOP".to_string(),
            address: None,
            order_time: local(hour, minute),
            duration,
            price: 0,
            status,
            services: vec![],
            created_at: now,
            updated_at: now,
        });
        id
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn lock_day(&mut self, day: NaiveDate) -> CarportResult<()> {
        self.locked_days.push(day);
        Ok(())
    }

    async fn find_vehicle_owner(&mut self, car_id: i64) -> CarportResult<Option<i64>> {
        Ok(self.cars.get(&car_id).copied())
    }

    async fn appointments_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CarportResult<Vec<Appointment>> {
        Ok(self
            .orders
            .iter()
            .filter(|order| order.order_time >= from && order.order_time < to)
            .map(Order::appointment)
            .collect())
    }

    async fn find_order(&mut self, id: i64) -> CarportResult<Option<Order>> {
        Ok(self.orders.iter().find(|order| order.id == id).cloned())
    }

    async fn insert_order(&mut self, order: NewOrder) -> CarportResult<Order> {
        let now = Utc::now();
        let stored = Order {
            id: self.orders.len() as i64 + 1,
            user_id: order.user_id,
            car_id: order.car_id,
            service_type: order.service_type,
            address: order.address,
            order_time: order.order_time,
            duration: order.duration,
            price: 0,
            status: OrderStatus::Pending,
            services: order.services,
            created_at: now,
            updated_at: now,
        };
        self.orders.push(stored.clone());
        Ok(stored)
    }

    async fn update_schedule(
        &mut self,
        id: i64,
        status: OrderStatus,
        duration: Option<u32>,
    ) -> CarportResult<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CarportError::not_found("Order", id))?;
        order.status = status;
        if let Some(duration) = duration {
            order.duration = duration;
        }
        Ok(order.clone())
    }

    async fn update_price(
        &mut self,
        id: i64,
        status: OrderStatus,
        price: u64,
    ) -> CarportResult<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CarportError::not_found("Order", id))?;
        order.status = status;
        order.price = price;
        Ok(order.clone())
    }
}

fn local(hour: u32, minute: u32) -> DateTime<Utc> {
    Jakarta
        .with_ymd_and_hms(2024, 5, 6, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn request(hour: u32, minute: u32) -> CreateOrderRequest {
    CreateOrderRequest {
        car_id: CAR,
        service_type: "WORKSHOP".to_string(),
        address: Some("".to_string()),
        address_id: None,
        order_time: local(hour, minute),
        services: vec!["ganti oli".to_string(), "Ganti Oli".to_string()],
    }
}

#[tokio::test]
async fn test_book_creates_pending_order_for_owner() {
    let mut store = MemoryStore::with_car();
    let policy = AdmissionPolicy::default();

    let order = booking::book(&mut store, &policy, Requester::Staff, request(8, 0))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, OWNER);
    assert_eq!(order.duration, 1);
    assert_eq!(order.address, None);
    assert_eq!(order.services, vec!["Ganti Oli".to_string()]);
    assert_eq!(
        store.locked_days,
        vec![NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()]
    );
}

#[tokio::test]
async fn test_book_unknown_car_is_not_found() {
    let mut store = MemoryStore::default();
    let policy = AdmissionPolicy::default();

    let result = booking::book(&mut store, &policy, Requester::Staff, request(9, 0)).await;

    assert!(matches!(result, Err(CarportError::NotFound(_))));
    assert!(store.orders.is_empty());
}

#[tokio::test]
async fn test_book_checks_hours_before_touching_the_store() {
    let mut store = MemoryStore::default();
    let policy = AdmissionPolicy::default();

    let result = booking::book(&mut store, &policy, Requester::Staff, request(17, 30)).await;

    assert!(matches!(
        result,
        Err(CarportError::Scheduling(Rejection::OutOfOperatingHours))
    ));
    assert!(store.locked_days.is_empty());
}

#[tokio::test]
async fn test_book_rejects_third_overlapping_order() {
    let mut store = MemoryStore::with_car();
    store.seed(9, 0, 1, OrderStatus::Pending);
    store.seed(9, 30, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let result = booking::book(&mut store, &policy, Requester::Staff, request(9, 45)).await;

    assert!(matches!(
        result,
        Err(CarportError::Scheduling(Rejection::CapacityExceeded))
    ));
    assert_eq!(store.orders.len(), 2);
}

#[tokio::test]
async fn test_book_ignores_cancelled_orders() {
    let mut store = MemoryStore::with_car();
    store.seed(9, 0, 1, OrderStatus::Pending);
    store.seed(9, 30, 1, OrderStatus::Canceled);
    let policy = AdmissionPolicy::default();

    let result = booking::book(&mut store, &policy, Requester::Staff, request(9, 45)).await;

    assert!(result.is_ok());
    assert_eq!(store.orders.len(), 3);
}

#[tokio::test]
async fn test_book_ignores_other_days() {
    let mut store = MemoryStore::with_car();
    store.seed(9, 0, 1, OrderStatus::Pending);
    store.seed(9, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let mut next_day = request(9, 0);
    next_day.order_time = next_day.order_time + chrono::Duration::days(1);

    assert!(
        booking::book(&mut store, &policy, Requester::Staff, next_day)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_customer_cannot_book_someone_elses_car() {
    let mut store = MemoryStore::with_car();
    let policy = AdmissionPolicy::default();

    let result =
        booking::book(&mut store, &policy, Requester::Customer(OWNER + 1), request(9, 0)).await;
    assert!(matches!(result, Err(CarportError::Authorization(_))));

    let result = booking::book(&mut store, &policy, Requester::Customer(OWNER), request(9, 0)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_reschedule_excludes_the_order_itself() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(10, 0, 1, OrderStatus::Pending);
    store.seed(10, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let updated = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Confirmed,
            duration: Some(1),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.status, OrderStatus::Confirmed);
    assert_eq!(updated.duration, 1);
}

#[tokio::test]
async fn test_reschedule_longer_duration_hits_capacity() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(10, 0, 1, OrderStatus::Pending);
    store.seed(11, 0, 1, OrderStatus::Pending);
    store.seed(11, 0, 1, OrderStatus::Confirmed);
    let policy = AdmissionPolicy::default();

    let result = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Confirmed,
            duration: Some(2),
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(CarportError::Scheduling(Rejection::CapacityExceeded))
    ));
    assert_eq!(store.orders[0].duration, 1);
    assert_eq!(store.orders[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_reschedule_past_closing_is_out_of_hours() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(16, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let result = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::InProgress,
            duration: Some(3),
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(CarportError::Scheduling(Rejection::OutOfOperatingHours))
    ));
}

#[tokio::test]
async fn test_reschedule_huge_duration_is_out_of_hours() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(9, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let result = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Confirmed,
            duration: Some(u32::MAX),
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(CarportError::Scheduling(Rejection::OutOfOperatingHours))
    ));
    assert_eq!(store.orders[0].duration, 1);
}

#[tokio::test]
async fn test_status_only_update_skips_admission() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(10, 0, 1, OrderStatus::Canceled);
    store.seed(10, 0, 1, OrderStatus::Pending);
    store.seed(10, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let updated = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Done,
            duration: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.status, OrderStatus::Done);
    assert!(store.locked_days.is_empty());
}

#[tokio::test]
async fn test_reschedule_rejects_zero_duration() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(10, 0, 1, OrderStatus::Pending);
    let policy = AdmissionPolicy::default();

    let result = booking::reschedule(
        &mut store,
        &policy,
        id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Pending,
            duration: Some(0),
        },
    )
    .await;

    assert!(matches!(result, Err(CarportError::Validation(_))));
}

#[tokio::test]
async fn test_reschedule_unknown_order() {
    let mut store = MemoryStore::with_car();
    let policy = AdmissionPolicy::default();

    let result = booking::reschedule(
        &mut store,
        &policy,
        99,
        UpdateOrderStatusRequest {
            status: OrderStatus::Done,
            duration: None,
        },
    )
    .await;

    assert!(matches!(result, Err(CarportError::NotFound(_))));
}

#[tokio::test]
async fn test_set_price() {
    let mut store = MemoryStore::with_car();
    let id = store.seed(10, 0, 1, OrderStatus::Pending);

    let updated = booking::set_price(
        &mut store,
        id,
        UpdateOrderPriceRequest {
            status: OrderStatus::Done,
            price: 350_000,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.price, 350_000);
    assert_eq!(updated.status, OrderStatus::Done);

    let missing = booking::set_price(
        &mut store,
        42,
        UpdateOrderPriceRequest {
            status: OrderStatus::Done,
            price: 1,
        },
    )
    .await;
    assert!(matches!(missing, Err(CarportError::NotFound(_))));
}
