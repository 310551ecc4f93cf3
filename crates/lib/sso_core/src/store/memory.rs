//! In-process credential store.
//!
//! Honors the same error contract as [`PgStore`](super::PgStore). Email
//! uniqueness is enforced through the `DashMap` entry API, so concurrent
//! inserts of one email serialize on its shard.

use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{AppProvider, UserProvider, UserSaver};
use crate::error::AuthError;
use crate::models::{App, User};

#[derive(Debug)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    /// user id → email
    ids: DashMap<i64, String>,
    apps: DashMap<i32, App>,
    next_user_id: AtomicI64,
    next_app_id: AtomicI32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            ids: DashMap::new(),
            apps: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_app_id: AtomicI32::new(1),
        }
    }

    /// Register an application, returning its ID.
    pub fn insert_app(&self, name: &str, secret: &str) -> i32 {
        let id = self.next_app_id.fetch_add(1, Ordering::Relaxed);
        self.apps.insert(
            id,
            App {
                id,
                name: name.to_string(),
                secret: secret.to_string(),
            },
        );
        id
    }

    /// Grant or revoke the admin flag. Returns `NotFound` for unknown users.
    pub fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<(), AuthError> {
        let email = self
            .ids
            .get(&user_id)
            .map(|e| e.value().clone())
            .ok_or(AuthError::NotFound("user"))?;
        let mut user = self.users.get_mut(&email).ok_or(AuthError::NotFound("user"))?;
        user.is_admin = is_admin;
        Ok(())
    }

    /// Number of stored users with the given email (0 or 1).
    pub fn count_email(&self, email: &str) -> usize {
        usize::from(self.users.contains_key(email))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserSaver for MemoryStore {
    async fn save_user(&self, email: &str, name: &str, pass_hash: &[u8]) -> Result<i64, AuthError> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(AuthError::UserExists),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(User {
                    id,
                    email: email.to_string(),
                    name: name.to_string(),
                    pass_hash: pass_hash.to_vec(),
                    is_admin: false,
                });
                self.ids.insert(id, email.to_string());
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl UserProvider for MemoryStore {
    async fn user_by_email(&self, email: &str) -> Result<User, AuthError> {
        self.users
            .get(email)
            .map(|u| u.value().clone())
            .ok_or(AuthError::NotFound("user"))
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let email = self
            .ids
            .get(&user_id)
            .map(|e| e.value().clone())
            .ok_or(AuthError::NotFound("user"))?;
        self.users
            .get(&email)
            .map(|u| u.is_admin)
            .ok_or(AuthError::NotFound("user"))
    }
}

#[async_trait]
impl AppProvider for MemoryStore {
    async fn app_by_id(&self, app_id: i32) -> Result<App, AuthError> {
        self.apps
            .get(&app_id)
            .map(|a| a.value().clone())
            .ok_or(AuthError::NotFound("app"))
    }
}
