//! Versioned behaviour policies
//!
//! A policy records whether a deprecated construct is still accepted silently,
//! accepted with a warning, or rejected. The include directive consults exactly
//! one of them: whether a file produced by `export()` may be included directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Identifier of a compatibility policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyId {
    /// Disallow including the result of `export()`
    #[serde(rename = "CMP0024")]
    Cmp0024,
}

impl PolicyId {
    pub const ALL: [PolicyId; 1] = [PolicyId::Cmp0024];

    /// One-line summary used in policy warnings
    pub fn short_description(&self) -> &'static str {
        match self {
            PolicyId::Cmp0024 => "Disallow include export result.",
        }
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyId::Cmp0024 => write!(f, "CMP0024"),
        }
    }
}

impl FromStr for PolicyId {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyId::ALL
            .into_iter()
            .find(|id| id.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| eyre::eyre!("Unknown policy '{}'", s))
    }
}

/// State of a policy in the current scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    /// Old behaviour explicitly requested
    Old,
    /// Not set; old behaviour with a warning
    Warn,
    /// New behaviour explicitly requested
    New,
    /// New behaviour is required if the construct is used
    RequiredIfUsed,
    /// New behaviour is always required
    RequiredAlways,
}

impl PolicyStatus {
    pub const ALL: [PolicyStatus; 5] = [
        PolicyStatus::Old,
        PolicyStatus::Warn,
        PolicyStatus::New,
        PolicyStatus::RequiredIfUsed,
        PolicyStatus::RequiredAlways,
    ];
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyStatus::Old => write!(f, "OLD"),
            PolicyStatus::Warn => write!(f, "WARN"),
            PolicyStatus::New => write!(f, "NEW"),
            PolicyStatus::RequiredIfUsed => write!(f, "REQUIRED_IF_USED"),
            PolicyStatus::RequiredAlways => write!(f, "REQUIRED_ALWAYS"),
        }
    }
}

impl FromStr for PolicyStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyStatus::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| eyre::eyre!("Unknown policy status '{}'", s))
    }
}

/// What the include directive does with a generated export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    /// Include it without comment
    Proceed,
    /// Include it, but tell the author it should not be done
    Warn,
    /// Refuse to include it
    Abort,
}

/// Action for including an `export()` result under `status`
pub const fn export_include_action(status: PolicyStatus) -> PolicyAction {
    match status {
        PolicyStatus::Old => PolicyAction::Proceed,
        PolicyStatus::Warn => PolicyAction::Warn,
        PolicyStatus::New | PolicyStatus::RequiredIfUsed | PolicyStatus::RequiredAlways => {
            PolicyAction::Abort
        }
    }
}

/// Standard warning issued when a policy is used while unset
pub fn policy_warning(id: PolicyId) -> String {
    format!(
        "Policy {id} is not set: {}  Run \"cmake --help-policy {id}\" for policy details.  \
         Use the cmake_policy command to set the policy and suppress this warning.",
        id.short_description()
    )
}

/// Read access to policy state
pub trait PolicyStore {
    /// Status of `id` in the current policy scope
    fn policy_status(&self, id: PolicyId) -> PolicyStatus;
}

/// In-memory policy settings; unset policies report `WARN`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMap {
    settings: BTreeMap<PolicyId, PolicyStatus>,
}

impl PolicyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a policy, returning the previous status if there was one
    pub fn set(&mut self, id: PolicyId, status: PolicyStatus) -> Option<PolicyStatus> {
        self.settings.insert(id, status)
    }

    pub fn is_set(&self, id: PolicyId) -> bool {
        self.settings.contains_key(&id)
    }

    /// Build a map from textual `ID -> STATUS` pairs as found in configuration
    pub fn from_settings<'a, I>(settings: I) -> eyre::Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a PolicyStatus)>,
    {
        let mut map = Self::new();
        for (id, status) in settings {
            map.set(id.parse()?, *status);
        }
        Ok(map)
    }
}

impl PolicyStore for PolicyMap {
    fn policy_status(&self, id: PolicyId) -> PolicyStatus {
        self.settings.get(&id).copied().unwrap_or(PolicyStatus::Warn)
    }
}
