use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::ProfileError;

/// A persisted user record, keyed by email in the store.
///
/// `taste_summary` starts empty and is overwritten — never appended —
/// whenever the dialogue controller decides an update is warranted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub taste_summary: String,
    pub registered_at: DateTime<Utc>,
}

/// JSON-file-backed user store with read-modify-write semantics.
///
/// Loaded once at startup; every mutation is persisted immediately.
/// Deletion is out of scope.
pub struct ProfileStore {
    path: PathBuf,
    users: RwLock<HashMap<String, UserProfile>>,
}

impl ProfileStore {
    /// Open the store at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let path = path.into();
        let users: HashMap<String, UserProfile> = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        info!(path = %path.display(), users = users.len(), "profile store opened");
        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile, ProfileError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(ProfileError::AlreadyRegistered);
        }

        let display_name = display_name
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        let profile = UserProfile {
            password: password.to_string(),
            display_name,
            taste_summary: String::new(),
            registered_at: Utc::now(),
        };
        users.insert(email.to_string(), profile.clone());
        self.persist(&users)?;

        info!(email, "registered user");
        Ok(profile)
    }

    pub async fn verify(&self, email: &str, password: &str) -> Result<UserProfile, ProfileError> {
        let users = self.users.read().await;
        match users.get(email) {
            Some(profile) if profile.password == password => Ok(profile.clone()),
            _ => Err(ProfileError::InvalidCredentials),
        }
    }

    pub async fn contains(&self, email: &str) -> bool {
        self.users.read().await.contains_key(email)
    }

    pub async fn taste_summary(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .await
            .get(email)
            .map(|p| p.taste_summary.clone())
    }

    /// Full overwrite of the taste summary, persisted immediately.
    pub async fn set_taste_summary(&self, email: &str, summary: &str) -> Result<(), ProfileError> {
        let mut users = self.users.write().await;
        let profile = users.get_mut(email).ok_or(ProfileError::UnknownUser)?;
        profile.taste_summary = summary.to_string();
        self.persist(&users)?;
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn persist(&self, users: &HashMap<String, UserProfile>) -> Result<(), ProfileError> {
        let content = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
