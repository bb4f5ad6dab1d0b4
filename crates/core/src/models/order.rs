use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;
use crate::errors::{CarportError, CarportResult};
use crate::scheduling::{Appointment, end_after};

/// Lifecycle of a service order. Only `Canceled` affects scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Done,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Done => "DONE",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CarportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "DONE" => Ok(OrderStatus::Done),
            "CANCELED" | "CANCELLED" => Ok(OrderStatus::Canceled),
            other => Err(CarportError::validation(format!("unknown order status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub service_type: String,
    pub address: Option<String>,
    pub order_time: DateTime<Utc>,
    pub duration: u32,
    pub price: u64,
    pub status: OrderStatus,
    #[serde(default)]
    pub services: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn end_time(&self) -> DateTime<Utc> {
        end_after(self.order_time, self.duration).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn appointment(&self) -> Appointment {
        Appointment {
            id: self.id,
            order_time: self.order_time,
            duration: self.duration,
            status: self.status,
        }
    }
}

/// An order accepted by admission, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i64,
    pub car_id: i64,
    pub service_type: String,
    pub address: Option<String>,
    pub order_time: DateTime<Utc>,
    pub duration: u32,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub car_id: i64,
    pub service_type: String,
    pub address: Option<String>,
    /// Saved address to copy into `address` when `address` is blank
    #[serde(default)]
    pub address_id: Option<i64>,
    pub order_time: DateTime<Utc>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.service_type.trim().is_empty() {
            return Err(CarportError::validation("service_type is required"));
        }
        Ok(())
    }

    /// Fills a blank `address` from `saved`. A typed address wins.
    pub fn use_saved_address(&mut self, saved: &Address) {
        let blank = self
            .address
            .as_deref()
            .is_none_or(|address| address.trim().is_empty());
        if blank {
            self.address = Some(saved.location.clone());
        }
    }
}

/// Staff update of status and, optionally, the booked duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderPriceRequest {
    pub status: OrderStatus,
    pub price: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub date: Option<NaiveDate>,
    pub user_id: Option<i64>,
    pub car_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsedSlotsQuery {
    pub date: Option<NaiveDate>,
}

/// A busy interval as published to customers choosing a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedSlot {
    pub order_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: u32,
    pub status: OrderStatus,
}

impl From<&Appointment> for UsedSlot {
    fn from(appointment: &Appointment) -> Self {
        UsedSlot {
            order_time: appointment.order_time,
            end_time: appointment.end_time(),
            duration: appointment.duration,
            status: appointment.status,
        }
    }
}
