//! Portainer implementation of [`stackstart_core::StackApi`].

pub mod client;

pub use client::{ACTION_TIMEOUT, FETCH_TIMEOUT, PortainerClient};
