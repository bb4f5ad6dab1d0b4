use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};

/// A brand voucher. `quantity` is remaining stock, `point` the cost per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i64,
    pub name: String,
    pub discount: u32,
    pub quantity: u32,
    pub point: u32,
    pub brand_id: i64,
    pub brand_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    pub name: String,
    pub discount: u32,
    #[serde(default)]
    pub point: u32,
    pub quantity: u32,
    pub brand_id: i64,
}

impl CreateVoucherRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.name.trim().is_empty() {
            return Err(CarportError::validation("name is required"));
        }
        if self.discount == 0 {
            return Err(CarportError::validation("discount must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemItem {
    pub voucher_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub customer_id: i64,
    pub vouchers: Vec<RedeemItem>,
}

impl RedeemRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.vouchers.is_empty() {
            return Err(CarportError::validation("at least one voucher is required"));
        }
        if let Some(item) = self.vouchers.iter().find(|item| item.quantity == 0) {
            return Err(CarportError::validation(format!(
                "quantity for voucher {} must be at least 1",
                item.voucher_id
            )));
        }
        Ok(())
    }

    /// Lines ordered by voucher id with repeated ids merged. Redemption locks
    /// voucher rows in this order.
    pub fn locking_order(&self) -> Vec<RedeemItem> {
        let mut lines = self.vouchers.clone();
        lines.sort_by_key(|item| item.voucher_id);
        lines.dedup_by(|next, kept| {
            if next.voucher_id != kept.voucher_id {
                return false;
            }
            kept.quantity = kept.quantity.saturating_add(next.quantity);
            true
        });
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRedeem {
    pub id: i64,
    pub voucher_id: i64,
    pub transaction_id: i64,
    pub quantity: u32,
    pub total_points: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub customer_id: i64,
    pub total_points: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub voucher_items: Vec<VoucherRedeem>,
}

/// Outcome of pricing one redemption line against current stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedemptionLine {
    pub voucher_id: i64,
    pub quantity: u32,
    pub total_points: u64,
    pub remaining_stock: u32,
}

/// Checks stock and computes the points owed for `quantity` units of `voucher`.
pub fn price_redemption(voucher: &Voucher, quantity: u32) -> CarportResult<RedemptionLine> {
    if voucher.quantity < quantity {
        return Err(CarportError::validation(format!(
            "Not enough quantity for voucher {}",
            voucher.id
        )));
    }

    Ok(RedemptionLine {
        voucher_id: voucher.id,
        quantity,
        total_points: u64::from(voucher.point) * u64::from(quantity),
        remaining_stock: voucher.quantity - quantity,
    })
}
