//! Domain core for the restaurant site: menu, hero carousel and settings
//! types, the draft/publish workflow, CSV bridge, rate limiting and view
//! cache invalidation.
//!
//! Nothing in this crate talks to a database directly; persistence goes
//! through the [`store::ContentStore`] seam.

pub mod admin;
pub mod cache;
pub mod change_log;
pub mod csv;
pub mod error;
pub mod hero;
pub mod menu;
pub mod publish;
pub mod rate_limit;
pub mod roles;
pub mod session;
pub mod settings;
pub mod store;
pub mod types;
