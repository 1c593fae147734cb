//! Loading, saving and clearing the persisted session.
//!
//! The canonical blob lives under `auth`. Older logins wrote a raw `token`
//! and a serialized `user` under separate keys; that pair is imported into
//! `auth` the first time it is seen and then removed, so only the canonical
//! shape is ever read afterwards.

use super::{Session, SessionError, SessionStorage};
use crate::consts::dashboard_consts::storage_keys;
use crate::models::{ResourceRef, Role};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredUser {
    #[serde(default)]
    id: Option<ResourceRef>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredAuth {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<StoredUser>,
}

impl StoredAuth {
    fn into_session(self) -> Option<Session> {
        let token = self.token.filter(|t| !t.trim().is_empty())?;
        let user = self.user?;
        let role = user.role?.parse::<Role>().ok()?;
        if role == Role::Unknown {
            return None;
        }
        Some(Session {
            token,
            user_id: user.id?,
            role,
            email: user.email.unwrap_or_default(),
            full_name: user.full_name.unwrap_or_default(),
        })
    }
}

impl From<&Session> for StoredAuth {
    fn from(session: &Session) -> Self {
        StoredAuth {
            token: Some(session.token.clone()),
            user: Some(StoredUser {
                id: Some(session.user_id),
                role: Some(session.role.to_string()),
                email: Some(session.email.clone()),
                full_name: Some(session.full_name.clone()),
            }),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Returns the stored session, or `None` for any absent, malformed or incomplete blob.
    ///
    /// Never fails: storage errors are logged and read as "no session".
    pub fn load(&self) -> Option<Session> {
        match self.storage.get(storage_keys::AUTH) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredAuth>(&raw) {
                Ok(auth) => auth.into_session(),
                Err(e) => {
                    debug!("Stored auth blob is malformed: {}", e);
                    None
                }
            },
            Ok(None) => self.import_legacy(),
            Err(e) => {
                warn!("Could not read session storage: {}", e);
                None
            }
        }
    }

    /// Persists a session under the canonical key only.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let blob = serde_json::to_string(&StoredAuth::from(session))?;
        self.storage.set(storage_keys::AUTH, &blob)
    }

    /// Removes every key a session may live under.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove(storage_keys::AUTH)?;
        self.storage.remove(storage_keys::LEGACY_TOKEN)?;
        self.storage.remove(storage_keys::LEGACY_USER)?;
        Ok(())
    }

    fn import_legacy(&self) -> Option<Session> {
        let token = self.storage.get(storage_keys::LEGACY_TOKEN).ok().flatten()?;
        let user_raw = self.storage.get(storage_keys::LEGACY_USER).ok().flatten()?;
        let user = match serde_json::from_str::<StoredUser>(&user_raw) {
            Ok(user) => user,
            Err(e) => {
                debug!("Legacy user blob is malformed: {}", e);
                return None;
            }
        };
        // Older pages stored the token JSON-encoded, newer ones raw.
        let token = serde_json::from_str::<String>(&token).unwrap_or(token);

        let session = StoredAuth {
            token: Some(token),
            user: Some(user),
        }
        .into_session()?;

        match self.save(&session) {
            Ok(()) => {
                if let Err(e) = self
                    .storage
                    .remove(storage_keys::LEGACY_TOKEN)
                    .and_then(|_| self.storage.remove(storage_keys::LEGACY_USER))
                {
                    warn!("Imported legacy session but could not remove old keys: {}", e);
                }
                debug!("Imported legacy session for user {}", session.user_id);
            }
            Err(e) => warn!("Could not persist imported legacy session: {}", e),
        }
        Some(session)
    }
}
