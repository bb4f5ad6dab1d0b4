pub mod address;
pub mod admin;
pub mod article;
pub mod auth;
pub mod car;
pub mod catalog;
pub mod health;
pub mod inquiry;
pub mod order;
pub mod stnk;
pub mod voucher;
