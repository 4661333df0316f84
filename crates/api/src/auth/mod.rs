//! Session token handling.
//!
//! Tokens are issued by an external sign-in service sharing the HS256
//! secret; this crate only validates them.

pub mod jwt;
