//! Client library for the FiveStar Support feedback API.
//!
//! Registers customers and submits feedback on their behalf. Customer ids minted locally use
//! the offline scheme in [`fivestar_customer_id`].

#![forbid(unsafe_code)]

pub mod args;
pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod transport;

pub use client::*;
pub use config::ClientConfig;
pub use models::*;
