//! Core CRM logic for LeadFlow.
//!
//! This crate contains pure logic with ZERO storage or I/O dependencies.
//! Every function takes the records it needs and returns new values; the
//! persistence layer and the application controller live in other crates.
//!
//! # Modules
//!
//! - `model` - Records, collections and the in-memory snapshot
//! - `auth` - Roles, session users and password hashing
//! - `visibility` - Which records a user may see
//! - `table` - Search, sort and pagination state for list views
//! - `join` - Denormalized display rows
//! - `router` - Location fragments, pages and view state
//! - `views` - Page rendering from a snapshot
//! - `forms` - Input validation for every command
//! - `csv` - Lead and payment import/export

pub mod auth;
pub mod csv;
pub mod forms;
pub mod join;
pub mod model;
pub mod router;
pub mod table;
pub mod views;
pub mod visibility;
