//! Session handling
//!
//! The logged-in account lives in an explicit [`Session`] handed to
//! whoever needs it. The account is written to a JSON [`SessionStore`]
//! at login, signup and on every update, and removed at logout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::account::User;
use crate::data::Tuning;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// JSON file holding the current account
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory
    pub fn default_location() -> Self {
        use directories::ProjectDirs;

        let path = if let Some(proj_dirs) = ProjectDirs::from("com", "sweepx", "SweepX") {
            let mut path = proj_dirs.data_local_dir().to_path_buf();
            path.push("session.json");
            path
        } else {
            PathBuf::from("./session.json")
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored account, if any
    ///
    /// A file that no longer parses is removed and treated as absent.
    /// The stored level is recomputed from the XP total.
    pub fn load(&self) -> Result<Option<User>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<User>(&data) {
            Ok(mut user) => {
                user.sync_level();
                log::info!("Session loaded from {:?}", self.path);
                Ok(Some(user))
            }
            Err(e) => {
                log::warn!("Discarding unreadable session {:?}: {}", self.path, e);
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, json)?;

        log::debug!("Session saved to {:?}", self.path);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::debug!("Session cleared at {:?}", self.path);
        }
        Ok(())
    }
}

/// The current user plus the store backing it
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    tuning: Tuning,
    user: Option<User>,
}

impl Session {
    /// Start-up: pick up whatever account the store holds
    pub fn restore(store: SessionStore, tuning: Tuning) -> Result<Self, SessionError> {
        let user = store.load()?;
        Ok(Self { store, tuning, user })
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Log in with any email and a long enough password
    ///
    /// Resumes the stored account when the email matches, otherwise
    /// opens a starter account named after the email's local part.
    pub fn login(&mut self, email: &str, password: &str, now: DateTime<Utc>) -> Result<&User, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.chars().count() < self.tuning.min_password_len {
            return Err(SessionError::InvalidCredentials);
        }

        let user = match self.store.load()? {
            Some(stored) if stored.email.eq_ignore_ascii_case(email) => stored,
            _ => {
                let username = email.split('@').next().unwrap_or(email);
                User::new(email, username, self.tuning.starting_coins, now)
            }
        };

        log::info!("Logged in as {}", user.username);
        self.persist(user)
    }

    /// Register a new account and log into it
    pub fn signup(
        &mut self,
        email: &str,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&User, SessionError> {
        let email = email.trim();
        let username = username.trim();
        if email.is_empty() {
            return Err(SessionError::MissingField("email"));
        }
        if username.is_empty() {
            return Err(SessionError::MissingField("username"));
        }
        if password.chars().count() < self.tuning.min_password_len {
            return Err(SessionError::InvalidCredentials);
        }

        let user = User::new(email, username, self.tuning.starting_coins, now);
        log::info!("Signed up {} ({})", user.username, user.user_id);
        self.persist(user)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.user.take() {
            log::info!("Logged out {}", user.username);
        }
        self.store.clear()
    }

    /// Apply a change to the current account and persist it
    ///
    /// The in-memory account only changes once the save has succeeded.
    pub fn update<F, T>(&mut self, change: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut User) -> T,
    {
        let mut updated = self.user.clone().ok_or(SessionError::NotLoggedIn)?;
        let result = change(&mut updated);
        self.store.save(&updated)?;
        self.user = Some(updated);
        Ok(result)
    }

    fn persist(&mut self, user: User) -> Result<&User, SessionError> {
        self.store.save(&user)?;
        Ok(self.user.insert(user))
    }
}
