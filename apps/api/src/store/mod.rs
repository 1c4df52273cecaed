//! Persistence traits. Handlers only ever see `Arc<dyn CvStore>` /
//! `Arc<dyn UserStore>`; the Postgres backend is wired in `main`, the
//! in-memory backend backs the unit tests.
//!
//! Owner scoping is enforced here: every scoped operation filters by id AND
//! owner, and a wrong-owner lookup is indistinguishable from a missing row.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::cv::{CvDocument, CvRecord};
use crate::models::user::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait CvStore: Send + Sync {
    /// All documents owned by `owner_id`, newest-first by creation time.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<CvRecord>, StoreError>;

    /// `None` when the id is missing or owned by someone else.
    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<CvRecord>, StoreError>;

    async fn create(&self, owner_id: Uuid, document: CvDocument) -> Result<CvRecord, StoreError>;

    /// Full-document replace; `None` when the id is missing or not owned.
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        document: CvDocument,
    ) -> Result<Option<CvRecord>, StoreError>;

    /// Hard delete. Returns `false` when nothing was removed.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}
