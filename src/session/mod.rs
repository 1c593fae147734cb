//! Session handling
//!
//! The persisted session blob, its key/value storage, and the guard every
//! dashboard passes through before issuing requests.

pub mod guard;
pub mod storage;
pub mod store;

pub use guard::{Denied, enter};
pub use storage::{FileStorage, SessionStorage};
pub use store::SessionStore;

use crate::models::{ResourceRef, Role};
use thiserror::Error;

/// An authenticated user, created at login and passed explicitly to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: ResourceRef,
    pub role: Role,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the storage file failed.
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file or a stored value is not valid JSON.
    #[error("Session storage is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}
