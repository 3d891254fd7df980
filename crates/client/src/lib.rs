//! HTTP client for the downstream user/file service.
//!
//! Everything the relay forwards goes through [`FileServiceClient`]: filter
//! translation for listings, multipart re-encoding for uploads, and decoding
//! of the downstream JSON envelopes. Failures are classified into a small
//! taxonomy so callers can tell a timeout from a malformed body.

pub mod client;
pub mod error;

pub use client::FileServiceClient;
pub use error::{ClientError, ClientResult};
