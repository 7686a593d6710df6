//! CRM records, their collections and the in-memory snapshot.
//!
//! # Modules
//!
//! - `collection` - Collection names and the `Record` trait
//! - `entities` - Users, campaigns, leads, activities, calls, fundraisers, payments
//! - `snapshot` - `CrmData`, every collection loaded at once

pub mod collection;
pub mod entities;
pub mod snapshot;

mod serde_helpers;

pub use collection::{Collection, Record, SCHEMA_VERSION};
pub use entities::{
    Activity, ActivityType, Call, Campaign, Fundraiser, Lead, Payment, Session, User,
};
pub use snapshot::{CollectedDrift, CrmData};
