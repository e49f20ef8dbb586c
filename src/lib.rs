//! # Gatepass
//!
//! `gatepass` is a small session-authenticated web service: visitors sign up with a
//! username and password, log in, and reach a dashboard that is gated behind a
//! server-issued session cookie.
//!
//! ## Credentials
//!
//! Passwords are hashed with bcrypt before they are stored; the database only ever
//! holds the digest. Username uniqueness is enforced by the database unique
//! constraint, not just the pre-insert lookup, so concurrent signups cannot race a
//! duplicate past the check.
//!
//! ## Sessions
//!
//! Logging in issues an opaque random token kept in an in-process store with a
//! configurable TTL and handed to the browser as an `HttpOnly` cookie. Every request
//! to a guarded page resolves the token explicitly; there is no implicit per-thread
//! user state. Login failures return a single unified message so usernames cannot
//! be enumerated.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
