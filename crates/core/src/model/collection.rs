//! Collection names and the `Record` trait.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Version of the canonical record schema.
///
/// Version 4 stores used `amount`, `desc` and `razorpayPageId` on fundraisers;
/// those names are still accepted on read.
pub const SCHEMA_VERSION: u32 = 5;

/// Named collections of the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Users and their roles.
    Users,
    /// Organisation/product pairs.
    Campaigns,
    /// Leads with embedded activities.
    Leads,
    /// Fundraisers tied to leads.
    Fundraisers,
    /// Payments tied to fundraisers.
    Payments,
    /// Top-level mirror of every activity.
    Calls,
    /// The single current-session record.
    Sessions,
}

impl Collection {
    /// Every collection, in storage order.
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Campaigns,
        Self::Leads,
        Self::Fundraisers,
        Self::Payments,
        Self::Calls,
        Self::Sessions,
    ];

    /// Fixed storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Campaigns => "campaigns",
            Self::Leads => "leads",
            Self::Fundraisers => "fundraisers",
            Self::Payments => "payments",
            Self::Calls => "calls",
            Self::Sessions => "sessions",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("Unknown collection: {s}"))
    }
}

/// A record stored as one JSON document in a collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection holding records of this type.
    const COLLECTION: Collection;

    /// The record's id within its collection.
    fn record_id(&self) -> &str;
}
