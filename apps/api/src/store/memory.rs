#![allow(dead_code)]

//! In-memory store backends. Used by the unit tests; behavior matches the
//! Postgres implementations, including owner scoping, newest-first listing
//! and non-decreasing timestamps.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::cv::{CvDocument, CvRecord};
use crate::models::user::{NewUser, User};
use crate::store::{CvStore, StoreError, UserStore};

#[derive(Default)]
pub struct MemoryCvStore {
    // Vec keeps insertion (= creation) order; listing walks it in reverse.
    rows: RwLock<Vec<CvRecord>>,
}

impl MemoryCvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CvStore for MemoryCvStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<CvRecord>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<CvRecord>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }

    async fn create(&self, owner_id: Uuid, document: CvDocument) -> Result<CvRecord, StoreError> {
        let now = Utc::now();
        let record = CvRecord {
            id: Uuid::new_v4(),
            owner_id,
            document,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        document: CvDocument,
    ) -> Result<Option<CvRecord>, StoreError> {
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
        {
            Some(record) => {
                record.document = document;
                record.updated_at = record.updated_at.max(Utc::now());
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.owner_id == owner_id));
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_is_owner_scoped() {
        let store = MemoryCvStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let record = store
            .create(alice, CvDocument::placeholder("Alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(store.get(alice, record.id).await.unwrap().is_some());
        // Wrong owner is indistinguishable from a missing row.
        assert!(store.get(bob, record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped() {
        let store = MemoryCvStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let first = store
            .create(alice, CvDocument::placeholder("Alice", "a@example.com"))
            .await
            .unwrap();
        let second = store
            .create(alice, CvDocument::placeholder("Alice", "a@example.com"))
            .await
            .unwrap();
        store
            .create(bob, CvDocument::placeholder("Bob", "b@example.com"))
            .await
            .unwrap();

        let listed = store.list(alice).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_leaves_siblings_alone() {
        let store = MemoryCvStore::new();
        let alice = Uuid::new_v4();

        let doomed = store
            .create(alice, CvDocument::placeholder("Alice", "a@example.com"))
            .await
            .unwrap();
        let sibling = store
            .create(alice, CvDocument::placeholder("Alice", "a@example.com"))
            .await
            .unwrap();

        assert!(store.delete(alice, doomed.id).await.unwrap());
        assert!(!store.delete(alice, doomed.id).await.unwrap());
        assert!(!store.delete(alice, Uuid::new_v4()).await.unwrap());
        assert!(store.get(alice, sibling.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_requires_ownership_and_keeps_timestamps_monotonic() {
        let store = MemoryCvStore::new();
        let alice = Uuid::new_v4();

        let record = store
            .create(alice, CvDocument::placeholder("Alice", "a@example.com"))
            .await
            .unwrap();

        let mut doc = record.document.clone();
        doc.personal_info.full_name = "Alice Updated".into();

        let updated = store
            .update(alice, record.id, doc.clone())
            .await
            .unwrap()
            .expect("owner update succeeds");
        assert_eq!(updated.document.personal_info.full_name, "Alice Updated");
        assert!(updated.updated_at >= updated.created_at);

        assert!(store
            .update(Uuid::new_v4(), record.id, doc)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        let user = NewUser {
            email: "ada@example.com".into(),
            name: "Ada".into(),
            password_hash: "hash".into(),
        };
        store.create(user.clone()).await.unwrap();
        assert!(matches!(
            store.create(user).await,
            Err(StoreError::DuplicateEmail)
        ));
    }
}
