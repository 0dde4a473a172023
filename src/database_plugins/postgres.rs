// ABOUTME: PostgreSQL database implementation with native UUID and TIMESTAMPTZ columns
// ABOUTME: Enabled with the postgresql feature for cloud deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! PostgreSQL backend
//!
//! Uses native `UUID` and `TIMESTAMPTZ` columns instead of the text encodings
//! the SQLite backend falls back to.

use super::{conflict_on_unique, sort_column, DatabaseProvider, UserListQuery, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::models::{Admin, DirectoryUser, RefreshTokenRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

/// PostgreSQL database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

fn row_to_admin(row: &PgRow) -> AppResult<Admin> {
    Ok(Admin {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        role: row.try_get("role")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn row_to_refresh_token(row: &PgRow) -> AppResult<RefreshTokenRecord> {
    Ok(RefreshTokenRecord {
        id: row.try_get("id")?,
        admin_id: row.try_get("admin_id")?,
        token: row.try_get("token")?,
        expires_at: row.try_get("expires_at")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_user(row: &PgRow) -> AppResult<DirectoryUser> {
    Ok(DirectoryUser {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        role: row.try_get("role")?,
        status: row.try_get("status")?,
        is_email_verified: row.try_get("is_email_verified")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

fn push_user_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &UserListQuery) {
    if !query.statuses.is_empty() {
        builder.push(" AND status = ANY(");
        builder.push_bind(query.statuses.clone());
        builder.push(")");
    }
    if !query.roles.is_empty() {
        builder.push(" AND role = ANY(");
        builder.push_bind(query.roles.clone());
        builder.push(")");
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        builder.push(" AND (email ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR name ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                id UUID PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                id UUID PRIMARY KEY,
                admin_id UUID NOT NULL REFERENCES admins (id) ON DELETE CASCADE,
                token TEXT UNIQUE NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
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

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                email TEXT NOT NULL,
                name TEXT NOT NULL,
                phone TEXT,
                role TEXT NOT NULL,
                status TEXT NOT NULL,
                is_email_verified BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                deleted_at TIMESTAMPTZ
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
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(admin.id)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.name)
        .bind(&admin.role)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, AppError::admin_already_exists()))?;

        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_admin).transpose()
    }

    async fn get_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_admin).transpose()
    }

    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, admin_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.admin_id)
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_refresh_token(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let row = sqlx::query("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_refresh_token).transpose()
    }

    async fn delete_refresh_token(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_refresh_tokens_for_admin(&self, admin_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired_refresh_tokens(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_user(&self, user: &DirectoryUser) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, phone, role, status, is_email_verified, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.role)
        .bind(&user.status)
        .bind(user.is_email_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<DirectoryUser>, u64)> {
        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_user_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM users WHERE deleted_at IS NULL");
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
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(name) = &update.name {
            builder.push(", name = ");
            builder.push_bind(name.clone());
        }
        if let Some(phone) = &update.phone {
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
        builder.push_bind(id);
        builder.push(" AND deleted_at IS NULL");

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found());
        }

        Ok(())
    }

    async fn soft_delete_user(&self, id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found());
        }

        Ok(())
    }
}
