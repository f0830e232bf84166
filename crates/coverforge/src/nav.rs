//! Portal routes and role-aware navigation.
//!
//! The shell renders one of two sidebars: the agent portal navigation, or
//! the admin navigation for users holding the `admin` role. Which items
//! appear — and the badge on the Renewals item — is decided here, against
//! the current [`AuthSnapshot`]; the shell just draws the list.

use std::fmt;

use coverforge_auth::AuthSnapshot;

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Every route the portal knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    // -- Public --
    /// Marketing landing page.
    Landing,
    Login,
    Signup,

    // -- Agent portal --
    Dashboard,
    Customers,
    Policies,
    /// Document intake. The scan pipeline itself lives elsewhere; this is
    /// just the route.
    Scan,
    Renewals,
    Analytics,
    Settings,

    // -- Admin --
    Admin,
    AdminBrokers,
    AdminStaff,
    AdminOrganizations,
    AdminReports,
    AdminAnalytics,
    AdminSecurity,
    AdminSettings,
}

impl Route {
    /// The URL path for this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Customers => "/customers",
            Route::Policies => "/policies",
            Route::Scan => "/scan",
            Route::Renewals => "/renewals",
            Route::Analytics => "/analytics",
            Route::Settings => "/settings",
            Route::Admin => "/admin",
            Route::AdminBrokers => "/admin/brokers",
            Route::AdminStaff => "/admin/staff",
            Route::AdminOrganizations => "/admin/organizations",
            Route::AdminReports => "/admin/reports",
            Route::AdminAnalytics => "/admin/analytics",
            Route::AdminSecurity => "/admin/security",
            Route::AdminSettings => "/admin/settings",
        }
    }

    /// Resolves a URL path back to a route.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Routes reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Route::Landing | Route::Login | Route::Signup)
    }

    /// Routes requiring the `admin` capability.
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            Route::Admin
                | Route::AdminBrokers
                | Route::AdminStaff
                | Route::AdminOrganizations
                | Route::AdminReports
                | Route::AdminAnalytics
                | Route::AdminSecurity
                | Route::AdminSettings
        )
    }

    const ALL: [Route; 18] = [
        Route::Landing,
        Route::Login,
        Route::Signup,
        Route::Dashboard,
        Route::Customers,
        Route::Policies,
        Route::Scan,
        Route::Renewals,
        Route::Analytics,
        Route::Settings,
        Route::Admin,
        Route::AdminBrokers,
        Route::AdminStaff,
        Route::AdminOrganizations,
        Route::AdminReports,
        Route::AdminAnalytics,
        Route::AdminSecurity,
        Route::AdminSettings,
    ];
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

// ---------------------------------------------------------------------------
// Navigation items
// ---------------------------------------------------------------------------

/// One entry in a navigation sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    /// Attention count rendered next to the label (e.g. renewals due).
    pub badge: Option<u64>,
}

impl NavItem {
    fn plain(label: &'static str, route: Route) -> Self {
        Self {
            label,
            route,
            badge: None,
        }
    }
}

/// The agent portal sidebar. `renewals_due` becomes the badge on the
/// Renewals item (omitted when zero).
pub fn agent_nav(renewals_due: u64) -> Vec<NavItem> {
    vec![
        NavItem::plain("Dashboard", Route::Dashboard),
        NavItem::plain("Customers", Route::Customers),
        NavItem::plain("Policies", Route::Policies),
        NavItem::plain("Scan Document", Route::Scan),
        NavItem {
            label: "Renewals",
            route: Route::Renewals,
            badge: (renewals_due > 0).then_some(renewals_due),
        },
        NavItem::plain("Analytics", Route::Analytics),
        NavItem::plain("Settings", Route::Settings),
    ]
}

/// The admin sidebar.
pub fn admin_nav() -> Vec<NavItem> {
    vec![
        NavItem::plain("Admin Dashboard", Route::Admin),
        NavItem::plain("Manage Brokers", Route::AdminBrokers),
        NavItem::plain("Staff Management", Route::AdminStaff),
        NavItem::plain("Organizations", Route::AdminOrganizations),
        NavItem::plain("System Reports", Route::AdminReports),
        NavItem::plain("Analytics", Route::AdminAnalytics),
        NavItem::plain("Security Center", Route::AdminSecurity),
        NavItem::plain("System Settings", Route::AdminSettings),
    ]
}

/// The sidebar for the current auth state: admin navigation for `admin`
/// users, the agent portal otherwise, nothing while signed out or still
/// loading.
pub fn nav_for(snapshot: &AuthSnapshot, renewals_due: u64) -> Vec<NavItem> {
    if snapshot.loading() || snapshot.user().is_none() {
        return Vec::new();
    }
    if snapshot.is_admin() {
        admin_nav()
    } else {
        agent_nav(renewals_due)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trips_every_route() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_unknown_is_none() {
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_admin_routes_all_require_admin() {
        for route in Route::ALL {
            assert_eq!(
                route.requires_admin(),
                route.path().starts_with("/admin"),
                "route {route} admin requirement should match its path"
            );
        }
    }

    #[test]
    fn test_public_routes_do_not_require_admin() {
        for route in Route::ALL {
            if route.is_public() {
                assert!(!route.requires_admin());
            }
        }
    }

    #[test]
    fn test_agent_nav_badges_renewals_when_due() {
        let nav = agent_nav(84);
        let renewals = nav
            .iter()
            .find(|i| i.route == Route::Renewals)
            .expect("renewals item");
        assert_eq!(renewals.badge, Some(84));
    }

    #[test]
    fn test_agent_nav_omits_badge_when_nothing_due() {
        let nav = agent_nav(0);
        let renewals = nav
            .iter()
            .find(|i| i.route == Route::Renewals)
            .unwrap();
        assert_eq!(renewals.badge, None);
    }

    #[test]
    fn test_admin_nav_targets_admin_routes_only() {
        assert!(admin_nav().iter().all(|i| i.route.requires_admin()));
    }
}
