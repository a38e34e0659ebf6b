//! Library exports for phishguard, shared between the binary and tests.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod navigation;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
pub mod views;
