//! Persistence contract.
//!
//! The host stores the serialized [`AvatarConfig`] as an opaque string on the
//! user record. This crate only needs to hand that string over and read it
//! back; everything else about the record is owned by the host.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AvatarConfig;
use crate::error::StoreError;
use crate::projection::AvatarOwner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The slice of a user record the avatar code reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub title: Option<String>,
    /// Serialized configuration, exactly as last saved.
    pub avatar_config: Option<String>,
}

impl UserRecord {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            title: None,
            avatar_config: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn owner(&self) -> AvatarOwner {
        AvatarOwner::new(self.username.clone(), self.title.clone())
    }

    /// The stored configuration, or the default when absent or malformed.
    pub fn avatar(&self) -> AvatarConfig {
        AvatarConfig::load_or_default(self.avatar_config.as_deref())
    }
}

/// Save/load contract for serialized configurations.
pub trait AvatarStore {
    /// Replaces the stored configuration and returns the updated record.
    fn save(&mut self, user_id: UserId, json: &str) -> Result<UserRecord, StoreError>;

    /// Returns the stored configuration, or `None` if the user never saved one.
    fn load(&self, user_id: UserId) -> Result<Option<String>, StoreError>;
}

/// In-process store keyed by user id.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: HashMap<UserId, UserRecord>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, record: UserRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn insert(&mut self, record: UserRecord) {
        self.users.insert(record.id, record);
    }

    pub fn get(&self, user_id: UserId) -> Option<&UserRecord> {
        self.users.get(&user_id)
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::unavailable("memory store is offline"));
        }
        Ok(())
    }
}

impl AvatarStore for MemoryStore {
    fn save(&mut self, user_id: UserId, json: &str) -> Result<UserRecord, StoreError> {
        self.check_online()?;
        let record = self
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound(user_id))?;
        record.avatar_config = Some(json.to_string());
        Ok(record.clone())
    }

    fn load(&self, user_id: UserId) -> Result<Option<String>, StoreError> {
        self.check_online()?;
        self.users
            .get(&user_id)
            .map(|record| record.avatar_config.clone())
            .ok_or(StoreError::NotFound(user_id))
    }
}
