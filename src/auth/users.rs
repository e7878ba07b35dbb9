use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// One registered account, keyed by lowercased email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// On-disk user document store: a JSON map from email to record, rewritten
/// atomically (temp file + rename) on every mutation.
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    persist_path: PathBuf,
}

impl UserStore {
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let users = if path.exists() {
            let data =
                std::fs::read_to_string(path).context("Failed to read user store")?;
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self {
            users: RwLock::new(users),
            persist_path: path.to_path_buf(),
        })
    }

    /// Register a new account. The email must not already be taken.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AppError> {
        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

        let mut users = self.users.write();
        if users.contains_key(email) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        users.insert(
            email.to_string(),
            UserRecord {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash,
                created_at: Utc::now(),
            },
        );

        self.persist(&users)
            .map_err(AppError::Storage)?;
        Ok(())
    }

    /// Check credentials and return the matching account.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<UserRecord, AppError> {
        let users = self.users.read();
        let user = users.get(email).ok_or(AppError::InvalidCredentials)?;

        let ok = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification failed: {e}")))?;
        if !ok {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user.clone())
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Atomic write via temp file + rename.
    fn persist(&self, users: &HashMap<String, UserRecord>) -> Result<()> {
        let data = serde_json::to_string_pretty(users).context("Failed to serialize user store")?;
        let tmp_path = self.persist_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data).context("Failed to write user store")?;
        std::fs::rename(&tmp_path, &self.persist_path).context("Failed to replace user store")?;
        Ok(())
    }
}
