//! Application controller for LeadFlow.
//!
//! `CrmApp` owns the view state of one signed-in user, renders pages from
//! the store and runs every command.
//!
//! # Modules
//!
//! - `app` - `CrmApp` and rendering
//! - `session` - Bootstrap, login, logout and session restore
//! - `navigation` - Routes, table interactions and change subscriptions
//! - `commands` - Lead, activity, fundraiser and payment commands
//! - `admin` - User, campaign and CSV commands

mod admin;
mod app;
mod commands;
mod navigation;
mod session;

pub use app::CrmApp;
pub use navigation::watched_collections;
