pub mod address;
pub mod admin_email;
pub mod appointment_store;
pub mod article;
pub mod car;
pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod session;
pub mod stnk;
pub mod user;
pub mod voucher;
