//! Well-known role name constants.
//!
//! Role names arrive in the `role` claim of the session token.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
