//! Application state for the Leave Balance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::db::Database;
use crate::policy::LeavePolicy;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// storage handle and the leave policy in force.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    policy: Arc<LeavePolicy>,
}

impl AppState {
    /// Creates a new application state from an opened database and a policy.
    pub fn new(db: Database, policy: LeavePolicy) -> Self {
        Self {
            db,
            policy: Arc::new(policy),
        }
    }

    /// Returns the storage handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Returns the leave policy in force.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
