use crate::models::DbCar;
use crate::repositories::catalog::{self, NamedTable};
use carport_core::models::car::{CreateCarRequest, UpdateCarRequest, normalize_plate};
use carport_core::models::title_case;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};

const CAR_SELECT: &str = r#"
    SELECT c.id, c.license_plate, c.user_id,
           c.car_type_id, ct.name AS car_type_name,
           ct.brand_id, b.name AS brand_name,
           c.color_id, co.name AS color_name,
           c.frame_number, c.engine_number, c.kilometer, c.photo_url, c.created_at
    FROM cars c
    JOIN car_types ct ON ct.id = c.car_type_id
    JOIN brands b ON b.id = ct.brand_id
    JOIN colors co ON co.id = c.color_id
"#;

/// Registers a car for `user_id`, creating its car type and color by name
/// when they do not exist yet.
pub async fn create_car(
    pool: &Pool<Postgres>,
    user_id: i64,
    request: &CreateCarRequest,
) -> Result<DbCar> {
    let plate = normalize_plate(&request.license_plate);
    tracing::debug!("Creating car: plate={}, user_id={}", plate, user_id);

    let mut tx = pool.begin().await?;

    let car_type_id =
        catalog::upsert_car_type(&mut tx, request.brand_id, &title_case(&request.car_type_name))
            .await?;
    let color_id =
        catalog::upsert_named(&mut tx, NamedTable::Colors, &title_case(&request.color_name))
            .await?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO cars (license_plate, user_id, car_type_id, color_id,
                          frame_number, engine_number, kilometer, photo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&plate)
    .bind(user_id)
    .bind(car_type_id)
    .bind(color_id)
    .bind(request.frame_number.as_deref())
    .bind(request.engine_number.as_deref())
    .bind(i64::try_from(request.kilometer)?)
    .bind(request.photo_url.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    let car = sqlx::query_as::<_, DbCar>(&format!("{CAR_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!("Car created successfully: id={}", id);
    Ok(car)
}

pub async fn get_car_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbCar>> {
    let car = sqlx::query_as::<_, DbCar>(&format!("{CAR_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(car)
}

pub async fn get_car_by_plate(pool: &Pool<Postgres>, plate: &str) -> Result<Option<DbCar>> {
    let car = sqlx::query_as::<_, DbCar>(&format!("{CAR_SELECT} WHERE c.license_plate = $1"))
        .bind(normalize_plate(plate))
        .fetch_optional(pool)
        .await?;

    Ok(car)
}

pub async fn list_cars_by_user(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<DbCar>> {
    let cars = sqlx::query_as::<_, DbCar>(&format!(
        "{CAR_SELECT} WHERE c.user_id = $1 ORDER BY c.created_at ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(cars)
}

/// Applies the non-empty fields of `request` on top of `current`.
pub async fn update_car(
    pool: &Pool<Postgres>,
    current: &DbCar,
    request: &UpdateCarRequest,
) -> Result<DbCar> {
    tracing::debug!("Updating car: id={}", current.id);

    let mut tx = pool.begin().await?;

    let brand_id = request.brand_id.unwrap_or(current.brand_id);
    let car_type_name = non_blank(&request.car_type_name)
        .map(title_case)
        .unwrap_or_else(|| current.car_type_name.clone());
    let car_type_id = if brand_id != current.brand_id || car_type_name != current.car_type_name {
        catalog::upsert_car_type(&mut tx, brand_id, &car_type_name).await?
    } else {
        current.car_type_id
    };

    let color_id = match non_blank(&request.color_name) {
        Some(name) => catalog::upsert_named(&mut tx, NamedTable::Colors, &title_case(name)).await?,
        None => current.color_id,
    };

    let plate = non_blank(&request.license_plate)
        .map(normalize_plate)
        .unwrap_or_else(|| current.license_plate.clone());
    let kilometer = match request.kilometer {
        Some(kilometer) => i64::try_from(kilometer)?,
        None => current.kilometer,
    };

    let updated = sqlx::query(
        r#"
        UPDATE cars
        SET license_plate = $2,
            car_type_id = $3,
            color_id = $4,
            frame_number = COALESCE($5, frame_number),
            engine_number = COALESCE($6, engine_number),
            kilometer = $7,
            photo_url = COALESCE($8, photo_url)
        WHERE id = $1
        "#,
    )
    .bind(current.id)
    .bind(&plate)
    .bind(car_type_id)
    .bind(color_id)
    .bind(non_blank(&request.frame_number))
    .bind(non_blank(&request.engine_number))
    .bind(kilometer)
    .bind(non_blank(&request.photo_url))
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(eyre!("Car {} disappeared during update", current.id));
    }

    let car = sqlx::query_as::<_, DbCar>(&format!("{CAR_SELECT} WHERE c.id = $1"))
        .bind(current.id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(car)
}

pub async fn delete_car(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    tracing::debug!("Deleting car: id={}", id);

    let result = sqlx::query("DELETE FROM cars WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
