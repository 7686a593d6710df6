//! Typed repositories over a `DocumentStore`.

mod crm;
mod record;

pub use crm::CrmRepository;
pub use record::Repository;
