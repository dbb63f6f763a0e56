//! Configuration types
//!
//! Board-agnostic configuration structures. With the `serde` feature they
//! can be deserialized from whatever format the firmware stores them in.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
