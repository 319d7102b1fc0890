//! Host compatibility of a single package release
//!
//! The marketplace publishes the requirements of a release as either:
//! - `[]` or `{}` - no requirements, always compatible
//! - `{"matomo": ">=4.0.0-b1,<5.0.0-b1", "php": ">=7.2"}` - comma separated
//!   range tokens per requirement key
//!
//! Only the `matomo` and `piwik` keys constrain the host. A lower bound is
//! mandatory, an upper bound is optional but must hold when present.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::version::dotted::Version;
use crate::version::error::RequirementError;

/// Requirement keys that refer to the host application
pub const HOST_KEYS: [&str; 2] = ["matomo", "piwik"];

/// Requirements declared by one package release
#[derive(Debug, Clone, PartialEq)]
pub enum Requirements {
    /// Wire shape `[]` or `{}`
    NoRequirements,
    /// Requirement key -> raw constraint value
    Keyed(IndexMap<String, Value>),
}

impl TryFrom<&Value> for Requirements {
    type Error = RequirementError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            // The marketplace serializes "nothing" as an empty list; any list is
            // treated the same way.
            Value::Array(_) => Ok(Requirements::NoRequirements),
            Value::Object(map) if map.is_empty() => Ok(Requirements::NoRequirements),
            Value::Object(map) => Ok(Requirements::Keyed(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
            other => Err(RequirementError::UnsupportedShape(other.to_string())),
        }
    }
}

/// Range operator at the start of a constraint token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gte,
    Lte,
    Gt,
    Lt,
}

impl Operator {
    /// Split the operator off a token, matching the longest prefix first
    pub fn split(token: &str) -> Option<(Self, &str)> {
        if let Some(rest) = token.strip_prefix(">=") {
            Some((Operator::Gte, rest))
        } else if let Some(rest) = token.strip_prefix("<=") {
            Some((Operator::Lte, rest))
        } else if let Some(rest) = token.strip_prefix('>') {
            Some((Operator::Gt, rest))
        } else {
            token.strip_prefix('<').map(|rest| (Operator::Lt, rest))
        }
    }

    fn holds(self, host: &Version, bound: &Version) -> bool {
        match self {
            Operator::Gte => host >= bound,
            Operator::Lte => host <= bound,
            Operator::Gt => host > bound,
            Operator::Lt => host < bound,
        }
    }

    fn is_upper(self) -> bool {
        matches!(self, Operator::Lte | Operator::Lt)
    }
}

/// Outcome of the most recent bound of each direction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    upper: Option<bool>,
    lower: Option<bool>,
}

impl Bounds {
    fn record(&mut self, operator: Operator, satisfied: bool) {
        if operator.is_upper() {
            self.upper = Some(satisfied);
        } else {
            self.lower = Some(satisfied);
        }
    }

    fn is_satisfied(&self) -> bool {
        matches!((self.upper, self.lower), (Some(true) | None, Some(true)))
    }
}

/// Evaluate a comma separated constraint list such as `>=3.0.0,<4.0.0`
///
/// Tokens whose version cannot be parsed are logged and skipped. Later tokens
/// of the same direction override earlier ones.
pub fn satisfies_constraints(constraints: &str, host: &Version) -> bool {
    let mut bounds = Bounds::default();

    for token in constraints.split(',').map(str::trim) {
        let Some((operator, rest)) = Operator::split(token) else {
            debug!("Ignoring constraint without operator: {:?}", token);
            continue;
        };

        let bound = match Version::parse_lenient(rest) {
            Ok(bound) => bound,
            Err(e) => {
                warn!("Skipping constraint {:?}: {}", token, e);
                continue;
            }
        };

        bounds.record(operator, operator.holds(host, &bound));
    }

    bounds.is_satisfied()
}

/// Decide whether a release with these requirements runs on `host`
///
/// Every host key present must be satisfied; a mapping without any host key
/// is never compatible.
pub fn is_compatible(requirements: &Requirements, host: &Version) -> Result<bool, RequirementError> {
    let Requirements::Keyed(map) = requirements else {
        return Ok(true);
    };

    let mut compatible = None;
    for (key, value) in map.iter().filter(|(k, _)| HOST_KEYS.contains(&k.as_str())) {
        let Value::String(constraints) = value else {
            return Err(RequirementError::NonStringConstraint {
                key: key.clone(),
                value: value.to_string(),
            });
        };

        let satisfied = satisfies_constraints(constraints, host);
        debug!("{} {:?} against {}: {}", key, constraints, host, satisfied);
        compatible = Some(compatible.unwrap_or(true) && satisfied);
    }

    Ok(compatible.unwrap_or(false))
}
