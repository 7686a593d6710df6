//! Typed IDs for type-safe record references.
//!
//! Ids are opaque strings (`<prefix>_<uuid>`), so records imported from older
//! stores keep whatever id they were created with. Using typed IDs prevents
//! accidentally passing a `LeadId` where a `FundraiserId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by generated ids.
            pub const PREFIX: &'static str = $prefix;

            /// Generates a new unique, time-ordered ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(UserId, "user", "Unique identifier for a user.");
typed_id!(CampaignId, "camp", "Unique identifier for a campaign.");
typed_id!(LeadId, "lead", "Unique identifier for a lead.");
typed_id!(CallId, "call", "Unique identifier for a call record.");
typed_id!(FundraiserId, "fund", "Unique identifier for a fundraiser.");
typed_id!(PaymentId, "pay", "Unique identifier for a payment.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
