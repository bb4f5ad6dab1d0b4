use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::validate_phone;
use crate::errors::{CarportError, CarportResult};

/// A question sent from the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub car_brand: String,
    pub car_year: String,
    pub problem: String,
    pub phone: String,
    /// Flipped by staff once the customer has been contacted
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInquiryRequest {
    pub car_brand: String,
    pub car_year: String,
    pub problem: String,
    pub phone: String,
}

impl CreateInquiryRequest {
    pub fn validate(&self) -> CarportResult<()> {
        for (field, value) in [
            ("car_brand", &self.car_brand),
            ("car_year", &self.car_year),
            ("problem", &self.problem),
        ] {
            if value.trim().is_empty() {
                return Err(CarportError::validation(format!("{} is required", field)));
            }
        }
        validate_phone(self.phone.trim())
    }
}

/// Blank or missing fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInquiryRequest {
    pub car_brand: Option<String>,
    pub car_year: Option<String>,
    pub problem: Option<String>,
    pub phone: Option<String>,
}

impl UpdateInquiryRequest {
    pub fn validate(&self) -> CarportResult<()> {
        match self.phone.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => validate_phone(phone),
            _ => Ok(()),
        }
    }

    /// `current` with the non-blank fields of this request applied.
    pub fn apply(&self, current: &Inquiry) -> Inquiry {
        let pick = |update: &Option<String>, stored: &String| match update.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => stored.clone(),
        };

        Inquiry {
            car_brand: pick(&self.car_brand, &current.car_brand),
            car_year: pick(&self.car_year, &current.car_year),
            problem: pick(&self.problem, &current.problem),
            phone: pick(&self.phone, &current.phone),
            ..current.clone()
        }
    }
}
