use crate::models::{Job, User};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing documents
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Persisted job seekers and recruiters
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a new user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    /// Replace the stored document with the same id; `None` if it does not exist
    async fn update_user(&self, user: User) -> Result<Option<User>, StoreError>;

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError>;
}

/// Persisted job postings
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job(&self, id: &str) -> Result<Option<Job>, StoreError>;

    /// All jobs in insertion order
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    async fn create_job(&self, job: Job) -> Result<Job, StoreError>;

    async fn update_job(&self, job: Job) -> Result<Option<Job>, StoreError>;

    async fn delete_job(&self, id: &str) -> Result<bool, StoreError>;
}

/// Complete document store backing the API
#[async_trait]
pub trait Storage: UserStore + JobStore + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}
