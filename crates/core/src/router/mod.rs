//! Hash-fragment routes and the view state they drive.
//!
//! # Modules
//!
//! - `page` - The pages of the application
//! - `route` - Parsing and building `#page?key=value` fragments
//! - `state` - `ViewState`: current user, route and table state

mod encoding;
pub mod page;
pub mod route;
pub mod state;

pub use page::Page;
pub use route::{Route, RouteParams};
pub use state::ViewState;
