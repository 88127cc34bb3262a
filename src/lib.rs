// ABOUTME: Library root for gcf-deploy - exposes the deployment workflow and its collaborators.
// ABOUTME: The main binary is in main.rs.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod package;
pub mod provider;
pub mod types;
