//! # stackstart-settings
//!
//! Configuration for a stackstart run, read once from the process
//! environment at startup:
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `PORTAINER_URL` | yes | |
//! | `PORTAINER_API_KEY` | yes | |
//! | `STACK_SEQUENCE` | yes | |
//! | `WEBHOOK_URL` | no | none |
//! | `POLL_INTERVAL_SECONDS` | no | 5 |
//! | `POLL_TIMEOUT_SECONDS` | no | 300 |
//! | `VERIFY_TLS` | no | true |
//!
//! Malformed stack ids fail the load. Malformed numbers fall back to their
//! defaults. The two policies differ on purpose.
//!
//! The resulting [`Settings`] is passed by reference into each component
//! constructor; there is no global instance.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{parse_bool, parse_seconds, parse_stack_sequence};
pub use types::*;
