//! User identity store
//!
//! Usernames map to Argon2 PHC strings (per-user random salt, embedded in
//! the string). Saves replace the file atomically: write to a temp path,
//! then rename.

use crate::error::{RecircleError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const USERS_FILE_NAME: &str = "users.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserEntry {
    password_hash: String,
    created_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: BTreeMap<String, UserEntry>,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    AlreadyExists,
}

pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(USERS_FILE_NAME),
        })
    }

    pub fn register(&self, username: &str, password: &str) -> Result<Registration> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RecircleError::Auth("username must not be empty".into()));
        }

        let mut file = self.load()?;
        if file.users.contains_key(username) {
            return Ok(Registration::AlreadyExists);
        }

        file.users.insert(
            username.to_string(),
            UserEntry {
                password_hash: hash_password(password)?,
                created_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        self.save(&file)?;
        Ok(Registration::Created)
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let file = self.load()?;
        match file.users.get(username.trim()) {
            Some(entry) => verify_password(password, &entry.password_hash),
            None => Ok(false),
        }
    }

    pub fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.users.contains_key(username.trim()))
    }

    fn load(&self) -> Result<UsersFile> {
        if !self.path.exists() {
            return Ok(UsersFile::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| RecircleError::Storage(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, file: &UsersFile) -> Result<()> {
        let content = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RecircleError::Auth(format!("failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| RecircleError::Auth(format!("invalid stored hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
