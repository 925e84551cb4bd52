//! Status message area for the SkyDrop client.
//!
//! Holds the single line of feedback shown under the upload form, tagged
//! with a kind the front end maps to styling.

pub mod message;

pub use message::{MessageArea, MessageKind, StatusMessage};
