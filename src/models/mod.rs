pub mod analysis;
pub mod auth;
pub mod evaluation;
pub mod history;
pub mod profile;
pub mod session;
pub mod stats;
pub mod user;

pub use analysis::{AnalysisDetails, AnalysisRequest, AnalysisResult};
pub use auth::{GoogleLoginRequest, LoginRequest, MessageResponse, RegisterRequest, TokenPair};
pub use evaluation::Evaluation;
pub use history::{HistoryEntry, HistoryResponse};
pub use profile::ProfileUpdate;
pub use session::Session;
pub use stats::DashboardStats;
pub use user::AuthenticatedUser;
