//! Joins records with the names of related records for display.
//!
//! Every lookup is a linear scan of the related collection. A dangling
//! reference resolves to [`NOT_AVAILABLE`].

pub mod resolve;
pub mod rows;

pub use resolve::{
    NOT_AVAILABLE, call_rows, campaign_label, campaign_product, fundraiser_rows, lead_name,
    lead_rows, payment_rows, user_rows,
};
pub use rows::{CallRow, CampaignRow, FundraiserRow, LeadRow, PaymentRow, UserRow};
