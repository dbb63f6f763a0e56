//! Encoder hardware implementations
//!
//! - Quadrature decoding on two digital inputs
//! - Status-frame caches for motor-controller encoders

pub mod quadrature;
pub mod status;

pub use quadrature::QuadratureDecoder;
pub use status::{ControllerStatus, RevolutionStatus};
