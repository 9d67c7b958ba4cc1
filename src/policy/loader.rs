//! Policy file loading.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::LeavePolicy;

impl LeavePolicy {
    /// Loads a policy from a YAML file.
    ///
    /// Override keys are normalized to lowercase on load, so a policy file
    /// may spell names however it likes.
    ///
    /// # Example policy file
    ///
    /// ```yaml
    /// annual_accrual_per_month: "1.25"
    /// accrual_overrides:
    ///   Sipho: "1.6666666666666667"
    /// sick_cycle_months: 36
    /// sick_cycle_days: "30"
    /// sick_ramp_months: 6
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` when the file cannot be read and
    /// `PolicyParseError` when it is not valid YAML for a policy.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::PolicyNotFound {
            path: path_str.clone(),
        })?;

        let policy: LeavePolicy =
            serde_yaml::from_str(&content).map_err(|e| EngineError::PolicyParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(policy.normalized())
    }
}
