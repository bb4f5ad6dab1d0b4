use carport_core::models::{
    address::Address,
    admin_email::AdminEmail,
    article::Article,
    car::Car,
    catalog::{Brand, CarType, Category, Color, Service, Tag},
    inquiry::Inquiry,
    order::Order,
    stnk::Stnk,
    user::User,
    voucher::{Transaction, Voucher, VoucherRedeem},
};
use carport_core::scheduling::Appointment;
use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(user: DbUser) -> Result<Self> {
        Ok(User {
            id: user.id,
            role: user.role.parse()?,
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Row shape shared by brands, colors, services, categories and tags.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNamed {
    pub id: i64,
    pub name: String,
}

macro_rules! named_from_row {
    ($($model:ident),+) => {
        $(
            impl From<DbNamed> for $model {
                fn from(row: DbNamed) -> Self {
                    $model { id: row.id, name: row.name }
                }
            }
        )+
    };
}

named_from_row!(Brand, Color, Service, Category, Tag);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCarType {
    pub id: i64,
    pub name: String,
    pub brand_id: i64,
    pub brand_name: String,
}

impl From<DbCarType> for CarType {
    fn from(row: DbCarType) -> Self {
        CarType {
            id: row.id,
            name: row.name,
            brand_id: row.brand_id,
            brand_name: row.brand_name,
        }
    }
}

/// A car joined with its type, brand and color names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCar {
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
    pub kilometer: i64,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbCar> for Car {
    type Error = eyre::Report;

    fn try_from(car: DbCar) -> Result<Self> {
        Ok(Car {
            kilometer: u64::try_from(car.kilometer)
                .wrap_err_with(|| format!("Negative kilometer on car {}", car.id))?,
            id: car.id,
            license_plate: car.license_plate,
            user_id: car.user_id,
            car_type_id: car.car_type_id,
            car_type_name: car.car_type_name,
            brand_id: car.brand_id,
            brand_name: car.brand_name,
            color_id: car.color_id,
            color_name: car.color_name,
            frame_number: car.frame_number,
            engine_number: car.engine_number,
            photo_url: car.photo_url,
            created_at: car.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOrder {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub service_type: String,
    pub address: Option<String>,
    pub order_time: DateTime<Utc>,
    pub duration: i32,
    pub price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbOrder {
    /// Converts the row, attaching the names of its linked services.
    pub fn into_order(self, services: Vec<String>) -> Result<Order> {
        Ok(Order {
            duration: u32::try_from(self.duration)
                .wrap_err_with(|| format!("Invalid duration on order {}", self.id))?,
            price: u64::try_from(self.price)
                .wrap_err_with(|| format!("Invalid price on order {}", self.id))?,
            status: self.status.parse()?,
            id: self.id,
            user_id: self.user_id,
            car_id: self.car_id,
            service_type: self.service_type,
            address: self.address,
            order_time: self.order_time,
            services,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// The columns admission needs, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub order_time: DateTime<Utc>,
    pub duration: i32,
    pub status: String,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        Ok(Appointment {
            duration: u32::try_from(row.duration)
                .wrap_err_with(|| format!("Invalid duration on order {}", row.id))?,
            status: row.status.parse()?,
            id: row.id,
            order_time: row.order_time,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOrderService {
    pub order_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArticle {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_url: Option<String>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub publish_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DbArticle {
    pub fn into_article(self, tags: Vec<Tag>) -> Article {
        Article {
            id: self.id,
            user_id: self.user_id,
            category_id: self.category_id,
            category_name: self.category_name,
            photo_url: self.photo_url,
            title: self.title,
            content: self.content,
            published: self.published,
            publish_date: self.publish_date,
            tags,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArticleTag {
    pub article_id: i64,
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVoucher {
    pub id: i64,
    pub name: String,
    pub discount: i32,
    pub quantity: i32,
    pub point: i32,
    pub brand_id: i64,
    pub brand_name: Option<String>,
}

impl TryFrom<DbVoucher> for Voucher {
    type Error = eyre::Report;

    fn try_from(row: DbVoucher) -> Result<Self> {
        let field = |value: i32, column: &str| {
            u32::try_from(value)
                .wrap_err_with(|| format!("Invalid {} on voucher {}", column, row.id))
        };

        Ok(Voucher {
            discount: field(row.discount, "discount")?,
            quantity: field(row.quantity, "quantity")?,
            point: field(row.point, "point")?,
            id: row.id,
            name: row.name,
            brand_id: row.brand_id,
            brand_name: row.brand_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub customer_id: i64,
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
}

impl DbTransaction {
    pub fn into_transaction(self, voucher_items: Vec<VoucherRedeem>) -> Result<Transaction> {
        Ok(Transaction {
            total_points: u64::try_from(self.total_points)
                .wrap_err_with(|| format!("Invalid total on transaction {}", self.id))?,
            id: self.id,
            customer_id: self.customer_id,
            created_at: self.created_at,
            voucher_items,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVoucherRedeem {
    pub id: i64,
    pub voucher_id: i64,
    pub transaction_id: i64,
    pub quantity: i32,
    pub total_points: i64,
}

impl TryFrom<DbVoucherRedeem> for VoucherRedeem {
    type Error = eyre::Report;

    fn try_from(row: DbVoucherRedeem) -> Result<Self> {
        Ok(VoucherRedeem {
            quantity: u32::try_from(row.quantity)
                .wrap_err_with(|| format!("Invalid quantity on redeem {}", row.id))?,
            total_points: u64::try_from(row.total_points)
                .wrap_err_with(|| format!("Invalid total on redeem {}", row.id))?,
            id: row.id,
            voucher_id: row.voucher_id,
            transaction_id: row.transaction_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAddress {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbAddress> for Address {
    fn from(address: DbAddress) -> Self {
        Address {
            id: address.id,
            user_id: address.user_id,
            title: address.title,
            location: address.location,
            created_at: address.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStnk {
    pub id: i64,
    pub user_id: i64,
    pub photo_url: String,
    pub verified: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbStnk> for Stnk {
    fn from(stnk: DbStnk) -> Self {
        Stnk {
            id: stnk.id,
            user_id: stnk.user_id,
            photo_url: stnk.photo_url,
            verified: stnk.verified,
            description: stnk.description,
            created_at: stnk.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInquiry {
    pub id: i64,
    pub car_brand: String,
    pub car_year: String,
    pub problem: String,
    pub phone: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbInquiry> for Inquiry {
    fn from(inquiry: DbInquiry) -> Self {
        Inquiry {
            id: inquiry.id,
            car_brand: inquiry.car_brand,
            car_year: inquiry.car_year,
            problem: inquiry.problem,
            phone: inquiry.phone,
            resolved: inquiry.resolved,
            created_at: inquiry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdminEmail {
    pub id: i64,
    pub email: String,
}

impl From<DbAdminEmail> for AdminEmail {
    fn from(row: DbAdminEmail) -> Self {
        AdminEmail {
            id: row.id,
            email: row.email,
        }
    }
}
