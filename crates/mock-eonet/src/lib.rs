//! Mock EONET upstream for tests.
//!
//! This crate provides an in-process HTTP server that stands in for the NASA
//! EONET v3 API:
//! - `MockUpstream` - Serves a script of canned responses and records requests
//! - `ScriptedResponse` - One canned status + body
//! - `fixtures` - Realistic EONET payloads
//!
//! # Example
//!
//! ```rust
//! use mock_eonet::{fixtures, MockUpstream, ScriptedResponse};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let upstream = MockUpstream::start(vec![
//!         ScriptedResponse::status(503),
//!         ScriptedResponse::ok(fixtures::events_payload()),
//!     ])
//!     .await?;
//!
//!     println!("Fake EONET at {}", upstream.base_url());
//!     Ok(())
//! }
//! ```

pub mod fixtures;
mod upstream;

pub use upstream::{MockUpstream, RecordedRequest, ScriptedBody, ScriptedResponse};
