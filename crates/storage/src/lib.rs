use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::domain::{TermEntry, TermId};

const TERM_COLUMNS: &str = "id, content, sort_order, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Closes every pooled connection. Later queries fail with a pool-closed error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Active entries only, by `sort_order` then `id`.
    pub async fn list_active_terms(&self) -> Result<Vec<TermEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {TERM_COLUMNS}
             FROM terms
             WHERE is_active = 1
             ORDER BY sort_order ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to query active terms")?;
        debug!(count = rows.len(), "loaded active terms");
        rows.iter()
            .map(term_from_row)
            .collect::<Result<Vec<_>>>()
            .context("failed to decode active terms")
    }

    pub async fn list_all_terms(&self) -> Result<Vec<TermEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {TERM_COLUMNS}
             FROM terms
             ORDER BY sort_order ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to query terms")?;
        rows.iter()
            .map(term_from_row)
            .collect::<Result<Vec<_>>>()
            .context("failed to decode terms")
    }

    pub async fn insert_term(&self, content: &str, order: i64, is_active: bool) -> Result<TermId> {
        let rec = sqlx::query(
            "INSERT INTO terms (content, sort_order, is_active) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(content)
        .bind(order)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert term")?;
        Ok(TermId(rec.try_get::<i64, _>(0)?))
    }

    /// Returns `false` when no row has the given id.
    pub async fn set_term_active(&self, term_id: TermId, is_active: bool) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE terms SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(is_active)
        .bind(term_id.0)
        .execute(&self.pool)
        .await
        .context("failed to update term")?;
        Ok(result.rows_affected() > 0)
    }
}

/// Rows written outside this crate can hold any TEXT, so every column is decoded fallibly.
fn term_from_row(r: &SqliteRow) -> Result<TermEntry> {
    let id = r.try_get::<i64, _>(0)?;
    Ok(TermEntry {
        id: TermId(id),
        content: r.try_get::<String, _>(1)?,
        order: r.try_get::<i64, _>(2)?,
        is_active: r.try_get::<bool, _>(3)?,
        created_at: r
            .try_get::<DateTime<Utc>, _>(4)
            .with_context(|| format!("term {id} has an unreadable created_at"))?,
        updated_at: r
            .try_get::<DateTime<Utc>, _>(5)
            .with_context(|| format!("term {id} has an unreadable updated_at"))?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
