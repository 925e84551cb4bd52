//! SkyDrop HTTP client.
//!
//! Async client for the four endpoints the web client consumes: upload
//! limits, multipart upload, QR asset download and artifact deletion.

pub mod client;

pub use client::{Client, Error};
