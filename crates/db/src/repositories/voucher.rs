use crate::models::{DbTransaction, DbVoucher, DbVoucherRedeem};
use carport_core::errors::{CarportError, CarportResult};
use carport_core::models::voucher::{
    CreateVoucherRequest, RedeemRequest, Transaction, Voucher, VoucherRedeem, price_redemption,
};
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres};

const VOUCHER_SELECT: &str = r#"
    SELECT v.id, v.name, v.discount, v.quantity, v.point, v.brand_id, b.name AS brand_name
    FROM vouchers v
    LEFT JOIN brands b ON b.id = v.brand_id
"#;

pub async fn create_voucher(pool: &Pool<Postgres>, request: &CreateVoucherRequest) -> Result<DbVoucher> {
    tracing::debug!("Creating voucher: name={}, brand_id={}", request.name, request.brand_id);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO vouchers (name, discount, quantity, point, brand_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(request.name.trim())
    .bind(i32::try_from(request.discount)?)
    .bind(i32::try_from(request.quantity)?)
    .bind(i32::try_from(request.point)?)
    .bind(request.brand_id)
    .fetch_one(pool)
    .await?;

    get_voucher_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre::eyre!("Voucher {} missing after insert", id))
}

pub async fn get_voucher_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbVoucher>> {
    let voucher = sqlx::query_as::<_, DbVoucher>(&format!("{VOUCHER_SELECT} WHERE v.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(voucher)
}

pub async fn list_vouchers_by_brand(pool: &Pool<Postgres>, brand_id: i64) -> Result<Vec<DbVoucher>> {
    let vouchers = sqlx::query_as::<_, DbVoucher>(&format!(
        "{VOUCHER_SELECT} WHERE v.brand_id = $1 ORDER BY v.id ASC"
    ))
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(vouchers)
}

/// Redeems every requested voucher in one transaction.
///
/// Each voucher row is locked with `FOR UPDATE` before its stock is checked,
/// so two concurrent redemptions cannot both take the last unit. Rows are
/// locked in ascending id order. Any missing voucher or short stock rolls the
/// whole redemption back.
pub async fn redeem(pool: &Pool<Postgres>, request: &RedeemRequest) -> CarportResult<Transaction> {
    tracing::debug!(
        "Redeeming {} voucher lines for customer {}",
        request.vouchers.len(),
        request.customer_id
    );

    let mut tx = pool.begin().await.wrap_err("Failed to begin redemption")?;

    let transaction = sqlx::query_as::<_, DbTransaction>(
        r#"
        INSERT INTO transactions (customer_id, total_points)
        VALUES ($1, 0)
        RETURNING id, customer_id, total_points, created_at
        "#,
    )
    .bind(request.customer_id)
    .fetch_one(&mut *tx)
    .await
    .wrap_err("Failed to create transaction")?;

    let lines = request.locking_order();
    let mut total_points: u64 = 0;
    let mut items: Vec<VoucherRedeem> = Vec::with_capacity(lines.len());

    for item in &lines {
        let row = sqlx::query_as::<_, DbVoucher>(&format!(
            "{VOUCHER_SELECT} WHERE v.id = $1 FOR UPDATE OF v"
        ))
        .bind(item.voucher_id)
        .fetch_optional(&mut *tx)
        .await
        .wrap_err_with(|| format!("Failed to lock voucher {}", item.voucher_id))?
        .ok_or_else(|| CarportError::not_found("Voucher", item.voucher_id))?;

        let voucher = Voucher::try_from(row)?;
        let line = price_redemption(&voucher, item.quantity)?;

        sqlx::query("UPDATE vouchers SET quantity = $2 WHERE id = $1")
            .bind(voucher.id)
            .bind(i32::try_from(line.remaining_stock).wrap_err("Stock out of range")?)
            .execute(&mut *tx)
            .await
            .wrap_err("Failed to update voucher stock")?;

        let redeemed = sqlx::query_as::<_, DbVoucherRedeem>(
            r#"
            INSERT INTO voucher_redeems (voucher_id, transaction_id, quantity, total_points)
            VALUES ($1, $2, $3, $4)
            RETURNING id, voucher_id, transaction_id, quantity, total_points
            "#,
        )
        .bind(voucher.id)
        .bind(transaction.id)
        .bind(i32::try_from(line.quantity).wrap_err("Quantity out of range")?)
        .bind(i64::try_from(line.total_points).wrap_err("Points out of range")?)
        .fetch_one(&mut *tx)
        .await
        .wrap_err("Failed to record voucher redemption")?;

        total_points += line.total_points;
        items.push(VoucherRedeem::try_from(redeemed)?);
    }

    let transaction = sqlx::query_as::<_, DbTransaction>(
        r#"
        UPDATE transactions
        SET total_points = $2
        WHERE id = $1
        RETURNING id, customer_id, total_points, created_at
        "#,
    )
    .bind(transaction.id)
    .bind(i64::try_from(total_points).wrap_err("Points out of range")?)
    .fetch_one(&mut *tx)
    .await
    .wrap_err("Failed to total transaction")?;

    tx.commit().await.wrap_err("Failed to commit redemption")?;

    tracing::info!(
        "Transaction {} redeemed {} points for customer {}",
        transaction.id,
        total_points,
        request.customer_id
    );
    Ok(transaction.into_transaction(items)?)
}
