//! Security utilities.
//!
//! Currently limited to scrubbing credentials out of hosts and error
//! messages before they reach logs or the run summary.

pub mod credential_scrubber;

pub use credential_scrubber::{safe_error_message, scrub_credentials};
