//! Safety monitoring
//!
//! Detects operator takeover so automatic sequences give control back.

pub mod takeover;

pub use takeover::{OverrideMonitor, OverrideStatus};
