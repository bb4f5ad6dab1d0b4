use async_trait::async_trait;
use carport_core::booking;
use carport_core::errors::CarportResult;
use carport_core::models::order::{NewOrder, Order, OrderStatus};
use carport_core::scheduling::Appointment;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;

// Mock unit of work for the booking workflow
mock! {
    pub AppointmentStore {}

    #[async_trait]
    impl booking::AppointmentStore for AppointmentStore {
        async fn lock_day(&mut self, day: NaiveDate) -> CarportResult<()>;

        async fn find_vehicle_owner(&mut self, car_id: i64) -> CarportResult<Option<i64>>;

        async fn appointments_between(
            &mut self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> CarportResult<Vec<Appointment>>;

        async fn find_order(&mut self, id: i64) -> CarportResult<Option<Order>>;

        async fn insert_order(&mut self, order: NewOrder) -> CarportResult<Order>;

        async fn update_schedule(
            &mut self,
            id: i64,
            status: OrderStatus,
            duration: Option<u32>,
        ) -> CarportResult<Order>;

        async fn update_price(
            &mut self,
            id: i64,
            status: OrderStatus,
            price: u64,
        ) -> CarportResult<Order>;
    }
}
