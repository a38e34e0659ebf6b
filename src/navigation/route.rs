use std::fmt;

/// Every place the client can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    EmailChecker,
    EmailHistory,
    Evaluation,
    Profile,
}

impl Route {
    /// Where the session guard and the 401 cascade send unauthenticated users.
    pub const LOGIN: Route = Route::Login;

    /// Entries of the navigation shell, in display order.
    pub const MENU: [Route; 5] = [
        Route::Dashboard,
        Route::EmailChecker,
        Route::Profile,
        Route::EmailHistory,
        Route::Evaluation,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::EmailChecker => "/email-checker",
            Route::EmailHistory => "/email-history",
            Route::Evaluation => "/evaluation",
            Route::Profile => "/profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Root => "Home",
            Route::Login => "Log in",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::EmailChecker => "Check email",
            Route::EmailHistory => "History",
            Route::Evaluation => "Rate the system",
            Route::Profile => "Profile",
        }
    }

    /// Routes that only render behind the session guard.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::EmailChecker
                | Route::EmailHistory
                | Route::Evaluation
                | Route::Profile
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
    fn test_paths_are_distinct() {
        let all = [
            Route::Root,
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::EmailChecker,
            Route::EmailHistory,
            Route::Evaluation,
            Route::Profile,
        ];
        let paths: std::collections::HashSet<_> = all.iter().map(Route::path).collect();
        assert_eq!(paths.len(), all.len());
        assert_eq!(Route::EmailHistory.to_string(), "/email-history");
    }

    #[test]
    fn test_public_routes() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(!Route::Root.is_protected());
        assert!(Route::MENU.iter().all(Route::is_protected));
    }
}
