use std::collections::HashMap;

use crate::models::{DbArticle, DbArticleTag};
use crate::repositories::catalog::{self, NamedTable};
use carport_core::models::article::{
    Article, ArticleQuery, CreateArticleRequest, UpdateArticleRequest, publish_date_for,
};
use carport_core::models::catalog::Tag;
use carport_core::models::normalize_names;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Executor, PgConnection, Pool, Postgres};

const ARTICLE_SELECT: &str = r#"
    SELECT a.id, a.user_id, a.category_id, c.name AS category_name, a.photo_url,
           a.title, a.content, a.published, a.publish_date, a.created_at
    FROM articles a
    LEFT JOIN categories c ON c.id = a.category_id
"#;

pub async fn create_article(
    pool: &Pool<Postgres>,
    user_id: i64,
    request: &CreateArticleRequest,
    now: DateTime<Utc>,
) -> Result<Article> {
    tracing::debug!("Creating article: title={}, user_id={}", request.title, user_id);

    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO articles (user_id, category_id, photo_url, title, content, published, publish_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(request.category_id)
    .bind(request.photo_url.as_deref())
    .bind(request.title.trim())
    .bind(&request.content)
    .bind(request.published)
    .bind(publish_date_for(request.published, None, now))
    .fetch_one(&mut *tx)
    .await?;

    replace_tags(&mut tx, id, &request.tags).await?;
    let article = fetch_article(&mut tx, id).await?;

    tx.commit().await?;
    Ok(article)
}

pub async fn get_article_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query_as::<_, DbArticle>(&format!("{ARTICLE_SELECT} WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(attach_tags(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn list_articles(pool: &Pool<Postgres>, query: &ArticleQuery) -> Result<Vec<Article>> {
    let rows = sqlx::query_as::<_, DbArticle>(&format!(
        r#"
        {ARTICLE_SELECT}
        WHERE ($1::BOOLEAN IS NULL OR a.published = $1)
          AND ($2::BIGINT IS NULL OR a.category_id = $2)
        ORDER BY a.created_at DESC
        "#
    ))
    .bind(query.published)
    .bind(query.category_id)
    .fetch_all(pool)
    .await?;

    attach_tags(pool, rows).await
}

/// Applies the non-empty fields of `request`. A non-empty tag list replaces
/// the current tags.
pub async fn update_article(
    pool: &Pool<Postgres>,
    current: &Article,
    request: &UpdateArticleRequest,
    now: DateTime<Utc>,
) -> Result<Article> {
    tracing::debug!("Updating article: id={}", current.id);

    let published = request.published.unwrap_or(current.published);
    let publish_date = publish_date_for(published, current.publish_date, now);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE articles
        SET category_id = COALESCE($2, category_id),
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            photo_url = COALESCE($5, photo_url),
            published = $6,
            publish_date = $7
        WHERE id = $1
        "#,
    )
    .bind(current.id)
    .bind(request.category_id)
    .bind(non_blank(&request.title))
    .bind(non_blank(&request.content))
    .bind(non_blank(&request.photo_url))
    .bind(published)
    .bind(publish_date)
    .execute(&mut *tx)
    .await?;

    if !normalize_names(&request.tags).is_empty() {
        replace_tags(&mut tx, current.id, &request.tags).await?;
    }

    let article = fetch_article(&mut tx, current.id).await?;
    tx.commit().await?;
    Ok(article)
}

pub async fn set_published(
    pool: &Pool<Postgres>,
    current: &Article,
    published: bool,
    now: DateTime<Utc>,
) -> Result<Option<Article>> {
    let publish_date = publish_date_for(published, current.publish_date, now);

    let result = sqlx::query("UPDATE articles SET published = $2, publish_date = $3 WHERE id = $1")
        .bind(current.id)
        .bind(published)
        .bind(publish_date)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_article_by_id(pool, current.id).await
}

pub async fn delete_article(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    tracing::debug!("Deleting article: id={}", id);

    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

async fn replace_tags(conn: &mut PgConnection, article_id: i64, tags: &[String]) -> Result<()> {
    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut *conn)
        .await?;

    for name in normalize_names(tags) {
        let tag_id = catalog::upsert_named(conn, NamedTable::Tags, &name).await?;
        sqlx::query("INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(article_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn fetch_article(conn: &mut PgConnection, id: i64) -> Result<Article> {
    let row = sqlx::query_as::<_, DbArticle>(&format!("{ARTICLE_SELECT} WHERE a.id = $1"))
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    let mut tags = load_tags(&mut *conn, &[id]).await?;
    Ok(row.into_article(tags.remove(&id).unwrap_or_default()))
}

async fn load_tags<'e, E>(executor: E, article_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, DbArticleTag>(
        r#"
        SELECT at.article_id, t.id, t.name
        FROM article_tags at
        JOIN tags t ON t.id = at.tag_id
        WHERE at.article_id = ANY($1)
        ORDER BY t.name ASC
        "#,
    )
    .bind(article_ids)
    .fetch_all(executor)
    .await?;

    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        tags.entry(row.article_id).or_default().push(Tag {
            id: row.id,
            name: row.name,
        });
    }
    Ok(tags)
}

async fn attach_tags(pool: &Pool<Postgres>, rows: Vec<DbArticle>) -> Result<Vec<Article>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut tags = load_tags(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let article_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_article(article_tags)
        })
        .collect())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
