//! sqlx/Postgres backends. Documents live in a single JSONB column; identity,
//! ownership and timestamps are real columns so listing and scoping stay in
//! SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::cv::{CvDocument, CvRecord};
use crate::models::user::{NewUser, User};
use crate::store::{CvStore, StoreError, UserStore};

#[derive(Debug, FromRow)]
struct CvRow {
    id: Uuid,
    owner_id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CvRow {
    fn into_record(self) -> Result<CvRecord, StoreError> {
        Ok(CvRecord {
            id: self.id,
            owner_id: self.owner_id,
            document: serde_json::from_value(self.data)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PgCvStore {
    pool: PgPool,
}

impl PgCvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvStore for PgCvStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<CvRecord>, StoreError> {
        let rows: Vec<CvRow> = sqlx::query_as(
            "SELECT id, owner_id, data, created_at, updated_at
             FROM cvs WHERE owner_id = $1
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CvRow::into_record).collect()
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<CvRecord>, StoreError> {
        let row: Option<CvRow> = sqlx::query_as(
            "SELECT id, owner_id, data, created_at, updated_at
             FROM cvs WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CvRow::into_record).transpose()
    }

    async fn create(&self, owner_id: Uuid, document: CvDocument) -> Result<CvRecord, StoreError> {
        let data = serde_json::to_value(&document)?;
        let row: CvRow = sqlx::query_as(
            "INSERT INTO cvs (id, owner_id, data, created_at, updated_at)
             VALUES ($1, $2, $3, now(), now())
             RETURNING id, owner_id, data, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;

        row.into_record()
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        document: CvDocument,
    ) -> Result<Option<CvRecord>, StoreError> {
        let data = serde_json::to_value(&document)?;
        // GREATEST keeps updated_at non-decreasing even across clock skew.
        let row: Option<CvRow> = sqlx::query_as(
            "UPDATE cvs
             SET data = $3, updated_at = GREATEST(now(), updated_at)
             WHERE id = $1 AND owner_id = $2
             RETURNING id, owner_id, data, created_at, updated_at",
        )
        .bind(id)
        .bind(owner_id)
        .bind(data)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CvRow::into_record).transpose()
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let result: Result<User, sqlx::Error> = sqlx::query_as(
            "INSERT INTO users (id, email, name, password_hash, created_at)
             VALUES ($1, $2, $3, $4, now())
             RETURNING id, email, name, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, name, password_hash, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, name, password_hash, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
