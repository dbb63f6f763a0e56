//! Hardware driver implementations
//!
//! This crate provides embedded-hal implementations of the hardware traits
//! defined in hoist-core:
//!
//! - Encoders (quadrature decoding, motor-controller status caches)
//! - Motor output (PWM + direction)

#![no_std]
#![deny(unsafe_code)]

pub mod encoder;
pub mod motor;
