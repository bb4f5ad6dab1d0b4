use crate::models::DbInquiry;
use carport_core::models::inquiry::{CreateInquiryRequest, Inquiry};
use eyre::Result;
use sqlx::{Pool, Postgres};

const INQUIRY_COLUMNS: &str = "id, car_brand, car_year, problem, phone, resolved, created_at";

pub async fn create_inquiry(pool: &Pool<Postgres>, request: &CreateInquiryRequest) -> Result<DbInquiry> {
    let inquiry = sqlx::query_as::<_, DbInquiry>(&format!(
        r#"
        INSERT INTO inquiries (car_brand, car_year, problem, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING {INQUIRY_COLUMNS}
        "#
    ))
    .bind(request.car_brand.trim())
    .bind(request.car_year.trim())
    .bind(request.problem.trim())
    .bind(request.phone.trim())
    .fetch_one(pool)
    .await?;

    tracing::info!("Inquiry {} received", inquiry.id);
    Ok(inquiry)
}

pub async fn get_inquiry_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbInquiry>> {
    let inquiry = sqlx::query_as::<_, DbInquiry>(&format!(
        "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(inquiry)
}

/// Newest first.
pub async fn list_inquiries(pool: &Pool<Postgres>) -> Result<Vec<DbInquiry>> {
    let inquiries = sqlx::query_as::<_, DbInquiry>(&format!(
        "SELECT {INQUIRY_COLUMNS} FROM inquiries ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(inquiries)
}

/// Stores the editable fields of `inquiry`.
pub async fn update_inquiry(pool: &Pool<Postgres>, inquiry: &Inquiry) -> Result<Option<DbInquiry>> {
    let updated = sqlx::query_as::<_, DbInquiry>(&format!(
        r#"
        UPDATE inquiries
        SET car_brand = $2, car_year = $3, problem = $4, phone = $5
        WHERE id = $1
        RETURNING {INQUIRY_COLUMNS}
        "#
    ))
    .bind(inquiry.id)
    .bind(&inquiry.car_brand)
    .bind(&inquiry.car_year)
    .bind(&inquiry.problem)
    .bind(&inquiry.phone)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Flips `resolved` in place, so two concurrent toggles cancel out.
pub async fn toggle_resolved(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbInquiry>> {
    let inquiry = sqlx::query_as::<_, DbInquiry>(&format!(
        "UPDATE inquiries SET resolved = NOT resolved WHERE id = $1 RETURNING {INQUIRY_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(inquiry)
}

pub async fn delete_inquiry(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
