//! Record visibility per user.
//!
//! Admins see every record. Executives see the leads and fundraisers they
//! own, the calls they made, and payments they recorded or that credit one
//! of their fundraisers. Collections without ownership (users, campaigns)
//! pass through unchanged.

pub mod filter;

#[cfg(test)]
mod filter_props;

pub use filter::Visibility;
