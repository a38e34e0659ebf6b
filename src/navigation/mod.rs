//! Routes, the session guard, and the navigator that applies both.

pub mod guard;
pub mod navigator;
pub mod route;

pub use guard::{AuthState, GuardDecision, SessionGuard};
pub use navigator::{Navigation, Navigator, ViewTicket};
pub use route::Route;
