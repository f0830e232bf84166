//! Role labels and the capability flags derived from them.
//!
//! Roles arrive from the role store as plain string labels. Matching them
//! ad hoc with string comparisons invites silent typos, so the label set is
//! a closed enumeration: parsing happens once at the edge, and everything
//! downstream works with [`Role`] values and set-membership tests.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::IdentityError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A capability-granting role label.
///
/// A user may hold zero, one, or many roles. Assignment is set semantics:
/// duplicates carry no extra meaning and ordering is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator: sees the admin overview and broker
    /// management surfaces.
    Admin,
    /// Brokerage principal.
    Broker,
    /// Field agent working the customer/renewal dashboards.
    Agent,
}

impl Role {
    /// Every role, in no significant order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Broker, Role::Agent];

    /// The wire label stored in the role store.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Broker => "broker",
            Role::Agent => "agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "admin" => Ok(Role::Admin),
            "broker" => Ok(Role::Broker),
            "agent" => Ok(Role::Agent),
            other => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RoleSet
// ---------------------------------------------------------------------------

/// The set of roles assigned to a user.
///
/// Duplicates on input collapse; an empty set is a valid state meaning
/// "no elevated capabilities".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: HashSet<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role. Returns `false` if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Membership test — the primitive every capability flag reduces to.
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// `true` when the user holds no roles at all.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Number of distinct roles held.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Parses wire labels into a set.
    ///
    /// Unknown labels are not an error here — they are returned separately
    /// so the caller can decide how loudly to report them. Duplicates and
    /// ordering in the input are ignored.
    pub fn from_labels<'a, I>(labels: I) -> (RoleSet, Vec<String>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = RoleSet::new();
        let mut unknown = Vec::new();
        for label in labels {
            match label.parse::<Role>() {
                Ok(role) => {
                    set.insert(role);
                }
                Err(_) => unknown.push(label.to_string()),
            }
        }
        (set, unknown)
    }

    /// Derives the boolean capability flags for this set.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            is_admin: self.contains(Role::Admin),
            is_broker: self.contains(Role::Broker),
            is_agent: self.contains(Role::Agent),
        }
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Read-only capability flags, one per role label.
///
/// Each flag is true iff that label is present in the current user's role
/// set. These are *derived* values — recomputed whenever the role set
/// changes, never stored independently of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// `admin` is present.
    pub is_admin: bool,
    /// `broker` is present.
    pub is_broker: bool,
    /// `agent` is present.
    pub is_agent: bool,
}

impl Capabilities {
    /// `true` when no role grants anything.
    pub fn none(&self) -> bool {
        !self.is_admin && !self.is_broker && !self.is_agent
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Role parsing
    // =====================================================================

    #[test]
    fn test_from_str_known_labels_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("broker".parse::<Role>().unwrap(), Role::Broker);
        assert_eq!("agent".parse::<Role>().unwrap(), Role::Agent);
    }

    #[test]
    fn test_from_str_unknown_label_returns_error() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(
            matches!(err, IdentityError::UnknownRole(ref l) if l == "superuser"),
            "should reject labels outside the closed set"
        );
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        // Labels are stored lowercase; "Admin" is not a valid label.
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_as_str_round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    // =====================================================================
    // RoleSet
    // =====================================================================

    #[test]
    fn test_from_labels_collects_known_roles() {
        let (set, unknown) =
            RoleSet::from_labels(["agent", "admin"]);
        assert!(set.contains(Role::Agent));
        assert!(set.contains(Role::Admin));
        assert!(!set.contains(Role::Broker));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_from_labels_duplicates_collapse() {
        let (set, _) = RoleSet::from_labels(["agent", "agent", "agent"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_labels_reports_unknown_labels_separately() {
        let (set, unknown) =
            RoleSet::from_labels(["agent", "superuser", "root"]);
        assert_eq!(set.len(), 1);
        assert_eq!(unknown, vec!["superuser".to_string(), "root".to_string()]);
    }

    #[test]
    fn test_from_labels_empty_input_yields_empty_set() {
        let (set, unknown) = RoleSet::from_labels(std::iter::empty::<&str>());
        assert!(set.is_empty());
        assert!(unknown.is_empty());
    }

    // =====================================================================
    // Capabilities derivation
    // =====================================================================

    #[test]
    fn test_capabilities_mirror_set_membership() {
        let (set, _) = RoleSet::from_labels(["agent"]);
        let caps = set.capabilities();
        assert!(caps.is_agent);
        assert!(!caps.is_admin);
        assert!(!caps.is_broker);
    }

    #[test]
    fn test_capabilities_all_roles_all_flags() {
        let set: RoleSet = Role::ALL.into_iter().collect();
        let caps = set.capabilities();
        assert!(caps.is_admin && caps.is_broker && caps.is_agent);
        assert!(!caps.none());
    }

    #[test]
    fn test_capabilities_empty_set_grants_nothing() {
        let caps = RoleSet::new().capabilities();
        assert!(caps.none());
    }

    #[test]
    fn test_capabilities_recomputation_is_idempotent() {
        // Deriving twice from the same set yields the same flags.
        let (set, _) = RoleSet::from_labels(["broker", "agent"]);
        assert_eq!(set.capabilities(), set.capabilities());
    }
}
