//! Session guard run once at the entry of every dashboard view.

use super::{Session, SessionStore};
use crate::models::Role;
use crate::network::Navigator;
use log::debug;
use thiserror::Error;

/// Why a view refused to start. The redirect has already happened when this is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Denied {
    #[error("No valid session")]
    NoSession,

    #[error("This view requires the {required} role, but you are logged in as {actual}")]
    WrongRole { required: Role, actual: Role },
}

/// Validates the stored session against the view's required role.
///
/// On success the session is returned and is not checked again for the rest
/// of the view. On failure the navigator is told to redirect to login and the
/// caller must not run the view.
pub fn enter(
    store: &SessionStore,
    required: Role,
    navigator: &dyn Navigator,
) -> Result<Session, Denied> {
    let denied = match store.load() {
        Some(session) if session.role == required => return Ok(session),
        Some(session) => Denied::WrongRole {
            required,
            actual: session.role,
        },
        None => Denied::NoSession,
    };
    debug!("Session guard denied entry: {}", denied);
    navigator.redirect_to_login();
    Err(denied)
}
