//! # stackstart-core
//!
//! Types shared by every stackstart crate: the remote [`Stack`] record, the
//! webhook [`Event`], the error enums, and the two seams the orchestrator is
//! written against ([`StackApi`] and [`Notifier`]).

pub mod api;
pub mod errors;
pub mod events;
pub mod notify;
pub mod stack;

pub use api::StackApi;
pub use errors::{ApiError, WebhookError};
pub use events::{Event, EventKind};
pub use notify::Notifier;
pub use stack::{STATUS_ACTIVE, Stack, StackId};
