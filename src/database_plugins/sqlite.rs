// ABOUTME: SQLite database implementation for admins, refresh tokens, and directory users
// ABOUTME: Stores timestamps as RFC 3339 text and UUIDs as text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! SQLite backend
//!
//! Default backend for local development and testing. Timestamps are stored
//! as RFC 3339 text, which keeps lexicographic and chronological ordering in
//! agreement for UTC values.

use super::{conflict_on_unique, sort_column, DatabaseProvider, UserListQuery, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::models::{Admin, DirectoryUser, RefreshTokenRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// SQLite database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("parse timestamp: {e}")))
}

fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::database(format!("parse id: {e}")))
}

fn row_to_admin(row: &SqliteRow) -> AppResult<Admin> {
    Ok(Admin {
        id: parse_id(&row.try_get::<String, _>("id")?)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        role: row.try_get("role")?,
        is_active: row.try_get("is_active")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn row_to_refresh_token(row: &SqliteRow) -> AppResult<RefreshTokenRecord> {
    Ok(RefreshTokenRecord {
        id: parse_id(&row.try_get::<String, _>("id")?)?,
        admin_id: parse_id(&row.try_get::<String, _>("admin_id")?)?,
        token: row.try_get("token")?,
        expires_at: parse_timestamp(&row.try_get::<String, _>("expires_at")?)?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

fn row_to_user(row: &SqliteRow) -> AppResult<DirectoryUser> {
    let deleted_at: Option<String> = row.try_get("deleted_at")?;
    Ok(DirectoryUser {
        id: parse_id(&row.try_get::<String, _>("id")?)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        role: row.try_get("role")?,
        status: row.try_get("status")?,
        is_email_verified: row.try_get("is_email_verified")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        deleted_at: deleted_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

/// Append status/role/search filters shared by the count and data queries
fn push_user_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &UserListQuery) {
    if !query.statuses.is_empty() {
        builder.push(" AND status IN (");
        let mut separated = builder.separated(", ");
        for status in &query.statuses {
            separated.push_bind(status.clone());
        }
        builder.push(")");
    }
    if !query.roles.is_empty() {
        builder.push(" AND role IN (");
        let mut separated = builder.separated(", ");
        for role in &query.roles {
            separated.push_bind(role.clone());
        }
        builder.push(")");
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        builder.push(" AND (email LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR name LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        // A pooled in-memory database would hand each connection its own
        // empty database; a single connection keeps it alive and shared
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await?
        } else {
            let connection_options = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_string()
            };
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_admins_email ON admins(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                id TEXT PRIMARY KEY,
                admin_id TEXT NOT NULL,
                token TEXT UNIQUE NOT NULL,
                expires_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (admin_id) REFERENCES admins (id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_refresh_tokens_admin_id ON refresh_tokens(admin_id)",
        )
        .execute(&self.pool)
        .await?;

        // Directory user emails are unique only among non-deleted rows, so a
        // soft-deleted user's email can be reused; uniqueness among live rows
        // is the service layer's lookup-then-insert check
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                name TEXT NOT NULL,
                phone TEXT,
                role TEXT NOT NULL,
                status TEXT NOT NULL,
                is_email_verified BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_admin(&self, admin: &Admin) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, email, password_hash, name, role, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(admin.id.to_string())
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.name)
        .bind(&admin.role)
        .bind(admin.is_active)
        .bind(admin.created_at.to_rfc3339())
        .bind(admin.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, AppError::admin_already_exists()))?;

        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_admin).transpose()
    }

    async fn get_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_admin).transpose()
    }

    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, admin_id, token, expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.admin_id.to_string())
        .bind(&record.token)
        .bind(record.expires_at.to_rfc3339())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_refresh_token(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let row = sqlx::query("SELECT * FROM refresh_tokens WHERE token = ?1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_refresh_token).transpose()
    }

    async fn delete_refresh_token(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = ?1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_refresh_tokens_for_admin(&self, admin_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE admin_id = ?1")
            .bind(admin_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired_refresh_tokens(&self) -> AppResult<u64> {
        // RFC 3339 UTC strings compare lexicographically in time order
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?1")
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_user(&self, user: &DirectoryUser) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, phone, role, status, is_email_verified, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.role)
        .bind(&user.status)
        .bind(user.is_email_verified)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1 AND deleted_at IS NULL")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?1 AND deleted_at IS NULL")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<DirectoryUser>, u64)> {
        let mut count_builder =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_user_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT * FROM users WHERE deleted_at IS NULL");
        push_user_filters(&mut builder, query);

        let column = sort_column(query.sort.as_deref());
        builder.push(format!(" ORDER BY {column} {}", query.order.as_sql()));

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit));
        builder.push(" OFFSET ");
        // Widen before multiplying; u32 page * u32 limit can overflow
        builder.push_bind(i64::from(query.page.saturating_sub(1)) * i64::from(query.limit));

        let rows = builder.build().fetch_all(&self.pool).await?;
        let users = rows
            .iter()
            .map(row_to_user)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((users, u64::try_from(total).unwrap_or(0)))
    }

    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> AppResult<()> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now().to_rfc3339());

        if let Some(name) = &update.name {
            builder.push(", name = ");
            builder.push_bind(name.clone());
        }
        if let Some(phone) = &update.phone {
            // Some(None) clears the column
            builder.push(", phone = ");
            builder.push_bind(phone.clone());
        }
        if let Some(role) = &update.role {
            builder.push(", role = ");
            builder.push_bind(role.clone());
        }
        if let Some(status) = &update.status {
            builder.push(", status = ");
            builder.push_bind(status.clone());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(" AND deleted_at IS NULL");

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found());
        }

        Ok(())
    }

    async fn soft_delete_user(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found());
        }

        Ok(())
    }
}
