//! Client-side routes (navigation targets, not server endpoints).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Signals,
    Positions,
    History,
    Analytics,
    Settings,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Signals,
        Route::Positions,
        Route::History,
        Route::Analytics,
        Route::Settings,
    ];

    /// Links shown in the dashboard header.
    pub const NAVIGATION: [Route; 6] = [
        Route::Dashboard,
        Route::Signals,
        Route::Positions,
        Route::History,
        Route::Analytics,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Signals => "/signals",
            Route::Positions => "/positions",
            Route::History => "/history",
            Route::Analytics => "/analytics",
            Route::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Signals => "Signals",
            Route::Positions => "Positions",
            Route::History => "History",
            Route::Analytics => "Analytics",
            Route::Settings => "Settings",
        }
    }

    /// Accepts "/dashboard", "dashboard" and trailing slashes.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = trimmed.strip_prefix('/').unwrap_or(trimmed);
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == normalized)
    }

    /// Protected routes pass through the session guard on every entry.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }

    /// Placeholder destinations are linked from the header but have no page.
    pub fn is_implemented(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Login | Route::Register | Route::Dashboard
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_normalization() {
        assert_eq!(Route::from_path("dashboard"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/login/"), Some(Route::Login));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn test_protection_and_placeholders() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::Dashboard.is_protected());
        assert!(Route::Settings.is_protected());
        assert!(Route::Dashboard.is_implemented());
        assert!(!Route::Analytics.is_implemented());
    }
}
