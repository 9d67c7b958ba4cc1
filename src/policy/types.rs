//! Leave policy types.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The accrual rates and cycle parameters used by the balance calculator.
///
/// The built-in [`Default`] reproduces the observed production values; a
/// policy can also be loaded from a YAML file (see
/// [`LeavePolicy::from_file`]).
///
/// # Example
///
/// ```
/// use leave_engine::policy::LeavePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.accrual_rate_for("Thandi"), Decimal::new(125, 2));
/// // The override applies regardless of letter casing.
/// assert_eq!(
///     policy.accrual_rate_for("SIPHO"),
///     Decimal::from(20) / Decimal::from(12)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Annual leave days accrued per month employed at the standard rate.
    pub annual_accrual_per_month: Decimal,
    /// Accrual-rate overrides keyed by lowercase full first name.
    #[serde(default)]
    pub accrual_overrides: HashMap<String, Decimal>,
    /// Length of one sick leave cycle, in months.
    pub sick_cycle_months: u32,
    /// Days granted per full sick leave cycle.
    pub sick_cycle_days: Decimal,
    /// Tenure threshold, in months, below which sick entitlement ramps at
    /// one day per month employed.
    pub sick_ramp_months: u32,
}

impl LeavePolicy {
    /// Returns the annual accrual rate for an employee with the given first
    /// name, falling back to the standard rate when no override applies.
    ///
    /// Overrides match the full first name, case-insensitively.
    pub fn accrual_rate_for(&self, first_name: &str) -> Decimal {
        self.accrual_overrides
            .get(&first_name.trim().to_lowercase())
            .copied()
            .unwrap_or(self.annual_accrual_per_month)
    }

    /// Lowercases all override keys so lookups stay case-insensitive no
    /// matter how a policy file spelled them.
    pub(crate) fn normalized(mut self) -> Self {
        self.accrual_overrides = self
            .accrual_overrides
            .into_iter()
            .map(|(name, rate)| (name.trim().to_lowercase(), rate))
            .collect();
        self
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        let mut accrual_overrides = HashMap::new();
        // Long-standing exception inherited from the source system: Sipho
        // accrues 20 days per year instead of 15.
        accrual_overrides.insert("sipho".to_string(), Decimal::from(20) / Decimal::from(12));

        Self {
            annual_accrual_per_month: Decimal::new(125, 2),
            accrual_overrides,
            sick_cycle_months: 36,
            sick_cycle_days: Decimal::from(30),
            sick_ramp_months: 6,
        }
    }
}
