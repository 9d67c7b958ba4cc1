//! Leave policy configuration for the Leave Balance Engine.
//!
//! The accrual rates and cycle parameters that drive the calculator live
//! here as data. In particular the historical per-person accrual exception
//! is an entry in the overrides map, not a code branch, so future overrides
//! are configuration changes.

mod loader;
mod types;

pub use types::LeavePolicy;
