//! Dependent multi-resource aggregation.

pub mod aggregator;
pub mod outcome;

pub use aggregator::{Aggregated, Aggregator};
pub use outcome::{FetchOutcome, Lookup};

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::scripted::ScriptedTransport;
    use crate::models::{ResourceRef, Role};
    use crate::network::AuthenticatedIssuer;
    use crate::network::navigator::recording::RecordingNavigator;
    use crate::session::storage::MemoryStorage;
    use crate::session::{Session, SessionStore};
    use std::sync::Arc;

    pub fn issuer_as(
        role: Role,
        user_id: ResourceRef,
        transport: ScriptedTransport,
    ) -> AuthenticatedIssuer {
        let session = Session {
            token: "test-token".to_string(),
            user_id,
            role,
            email: format!("{}@example.com", role),
            full_name: "Test User".to_string(),
        };
        let store = SessionStore::new(Arc::new(MemoryStorage::default()));
        AuthenticatedIssuer::new(
            Arc::new(transport),
            session,
            store,
            Arc::new(RecordingNavigator::default()),
        )
    }

    pub fn issuer_over(transport: ScriptedTransport) -> AuthenticatedIssuer {
        issuer_as(Role::Admin, 1, transport)
    }
}
