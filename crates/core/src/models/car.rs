use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};

/// A registered vehicle with its catalog names resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub license_plate: String,
    pub user_id: i64,
    pub car_type_id: i64,
    pub car_type_name: String,
    pub brand_id: i64,
    pub brand_name: String,
    pub color_id: i64,
    pub color_name: String,
    pub frame_number: Option<String>,
    pub engine_number: Option<String>,
    pub kilometer: u64,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New car. Car type and color are given by name and created on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCarRequest {
    pub license_plate: String,
    pub car_type_name: String,
    pub color_name: String,
    pub brand_id: i64,
    pub frame_number: Option<String>,
    pub engine_number: Option<String>,
    #[serde(default)]
    pub kilometer: u64,
    pub photo_url: Option<String>,
}

impl CreateCarRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if normalize_plate(&self.license_plate).is_empty() {
            return Err(CarportError::validation("license_plate is required"));
        }
        if self.car_type_name.trim().is_empty() {
            return Err(CarportError::validation("car_type_name is required"));
        }
        if self.color_name.trim().is_empty() {
            return Err(CarportError::validation("color_name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateCarRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub car: CreateCarRequest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCarRequest {
    pub license_plate: Option<String>,
    pub car_type_name: Option<String>,
    pub color_name: Option<String>,
    pub brand_id: Option<i64>,
    pub frame_number: Option<String>,
    pub engine_number: Option<String>,
    pub kilometer: Option<u64>,
    pub photo_url: Option<String>,
}

/// Plates are stored upper-case without surrounding or repeated spaces.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
