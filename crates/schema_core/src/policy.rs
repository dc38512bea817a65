//! Validation policy.
//!
//! Options that change how candidates are judged without changing the schema
//! itself.

use serde::{Deserialize, Serialize};

/// What to do with candidate keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFieldPolicy {
    /// Drop unknown keys silently
    #[default]
    Ignore,
    /// Report each unknown key as a violation
    Forbid,
}

/// Policy applied to every candidate a validator checks.
///
/// # Example
///
/// ```rust
/// use schema_core::{ExtraFieldPolicy, ValidationPolicy};
///
/// let policy = ValidationPolicy::new().with_extra_fields(ExtraFieldPolicy::Forbid);
/// assert_eq!(policy, ValidationPolicy::strict());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Handling of undeclared candidate keys
    #[serde(default)]
    pub extra_fields: ExtraFieldPolicy,
}

impl ValidationPolicy {
    /// Creates the permissive default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy that rejects undeclared keys.
    pub fn strict() -> Self {
        Self {
            extra_fields: ExtraFieldPolicy::Forbid,
        }
    }

    /// Sets the extra field handling.
    pub fn with_extra_fields(mut self, policy: ExtraFieldPolicy) -> Self {
        self.extra_fields = policy;
        self
    }

    /// Returns true if undeclared keys must be reported.
    pub fn forbids_extra_fields(&self) -> bool {
        self.extra_fields == ExtraFieldPolicy::Forbid
    }
}
