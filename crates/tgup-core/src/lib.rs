//! Core domain + application logic for `tgup`, the Telegram folder uploader.
//!
//! This crate is intentionally framework-agnostic. The Telegram client lives behind
//! the [`transport::port::UploadTransport`] port, implemented in `tgup-telegram`.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod sorter;
pub mod store;
pub mod transport;
pub mod uploader;

pub use errors::{Error, Result};
