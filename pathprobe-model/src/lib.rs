//! Wire types shared between the pathprobe service and its clients.
//!
//! These are the JSON shapes accepted and returned by the scan endpoint.
//! They carry no behaviour beyond small constructors; classification and
//! scheduling live in `pathprobe-core`.
#![allow(missing_docs)]

pub mod error;
pub mod scan;

pub use error::{ErrorBody, ErrorDetail};
pub use scan::{ScanRequest, ScanResponse, ScanStats, ScanStatus};
