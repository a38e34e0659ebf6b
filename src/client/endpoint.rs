use http::Method;

/// The backend endpoints this client depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ObtainToken,
    GoogleLogin,
    Register,
    AnalyzeEmail,
    EmailHistory,
    DashboardStats,
    SubmitEvaluation,
    UpdateProfile,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::ObtainToken,
        Endpoint::GoogleLogin,
        Endpoint::Register,
        Endpoint::AnalyzeEmail,
        Endpoint::EmailHistory,
        Endpoint::DashboardStats,
        Endpoint::SubmitEvaluation,
        Endpoint::UpdateProfile,
    ];

    /// Path relative to the configured base URL. Trailing slashes matter to the backend.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ObtainToken => "/token/",
            Endpoint::GoogleLogin => "/auth/google/",
            Endpoint::Register => "/register/",
            Endpoint::AnalyzeEmail => "/email/analyze/",
            Endpoint::EmailHistory => "/email/history/",
            Endpoint::DashboardStats => "/dashboard/stats/",
            Endpoint::SubmitEvaluation => "/evaluation/submit/",
            Endpoint::UpdateProfile => "/profile/update/",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::EmailHistory | Endpoint::DashboardStats => Method::GET,
            Endpoint::UpdateProfile => Method::PUT,
            _ => Method::POST,
        }
    }

    /// Whether the call must carry a bearer token. Calls to these endpoints
    /// are refused locally when no token is stored.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Endpoint::ObtainToken | Endpoint::GoogleLogin | Endpoint::Register
        )
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ObtainToken => "obtain_token",
            Endpoint::GoogleLogin => "google_login",
            Endpoint::Register => "register",
            Endpoint::AnalyzeEmail => "analyze_email",
            Endpoint::EmailHistory => "email_history",
            Endpoint::DashboardStats => "dashboard_stats",
            Endpoint::SubmitEvaluation => "submit_evaluation",
            Endpoint::UpdateProfile => "update_profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        let public: Vec<_> = Endpoint::ALL
            .iter()
            .filter(|e| !e.requires_auth())
            .map(Endpoint::path)
            .collect();
        assert_eq!(public, vec!["/token/", "/auth/google/", "/register/"]);

        assert_eq!(Endpoint::EmailHistory.method(), Method::GET);
        assert_eq!(Endpoint::DashboardStats.method(), Method::GET);
        assert_eq!(Endpoint::UpdateProfile.method(), Method::PUT);
        assert_eq!(Endpoint::AnalyzeEmail.method(), Method::POST);
        assert!(Endpoint::ALL.iter().all(|e| e.path().ends_with('/')));
    }
}
