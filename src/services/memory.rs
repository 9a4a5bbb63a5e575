use crate::models::{Job, User};
use crate::services::store::{JobStore, Storage, StoreError, UserStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Store keeping every document in process memory
///
/// Collections are plain vectors, so listing returns insertion order and
/// every lookup is a linear scan.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; duplicate emails are not checked here
    pub fn with_documents(users: Vec<User>, jobs: Vec<Job>) -> Self {
        Self {
            users: RwLock::new(users),
            jobs: RwLock::new(jobs),
        }
    }
}

fn email_taken(users: &[User], email: &str, except_id: Option<&str>) -> bool {
    users
        .iter()
        .filter(|u| Some(u.id.as_str()) != except_id)
        .any(|u| u.email.eq_ignore_ascii_case(email))
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, Some(&user.id)) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn get_job(&self, id: &str) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn create_job(&self, job: Job) -> Result<Job, StoreError> {
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, job: Job) -> Result<Option<Job>, StoreError> {
        let mut jobs = self.jobs.write().await;
        match jobs.iter_mut().find(|j| j.id == job.id) {
            Some(slot) => {
                *slot = job.clone();
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    async fn delete_job(&self, id: &str) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() < before)
    }
}

#[async_trait]
impl Storage for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobRole, RecruiterProfile, UserKind};
    use chrono::Utc;

    fn create_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: email.to_string(),
            created_at: Utc::now(),
            kind: UserKind::Recruiter(RecruiterProfile::default()),
        }
    }

    fn create_job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            role: JobRole::DataScientist,
            pay: 80_000.0,
            location: None,
            description: String::new(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let store = InMemoryStore::new();

        store.create_user(create_user("1", "a@x.io")).await.unwrap();
        assert_eq!(store.get_user("1").await.unwrap().unwrap().email, "a@x.io");

        let mut updated = create_user("1", "b@x.io");
        updated.name = "Renamed".to_string();
        let result = store.update_user(updated).await.unwrap().unwrap();
        assert_eq!(result.name, "Renamed");

        assert!(store.update_user(create_user("2", "c@x.io")).await.unwrap().is_none());

        assert!(store.delete_user("1").await.unwrap());
        assert!(!store.delete_user("1").await.unwrap());
        assert!(store.get_user("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryStore::new();
        store.create_user(create_user("1", "a@x.io")).await.unwrap();
        store.create_user(create_user("2", "b@x.io")).await.unwrap();

        let result = store.create_user(create_user("3", "A@X.io")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));

        // Taking another user's email on update is rejected too
        let result = store.update_user(create_user("2", "a@x.io")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));

        // Keeping your own email is fine
        assert!(store.update_user(create_user("1", "a@x.io")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_jobs_listed_in_insertion_order() {
        let store = InMemoryStore::new();
        for id in ["c", "a", "b"] {
            store.create_job(create_job(id)).await.unwrap();
        }

        let ids: Vec<String> = store.list_jobs().await.unwrap().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        assert!(store.delete_job("a").await.unwrap());
        assert_eq!(store.list_jobs().await.unwrap().len(), 2);
    }
}
