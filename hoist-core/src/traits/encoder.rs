//! Encoder hardware traits
//!
//! The three physical sources a position reading can come from. Each trait
//! exposes the device's native units; conversion into distance happens in
//! [`crate::sensor::Encoder`].

/// Quadrature encoder wired to two digital inputs
///
/// The counter accumulates pulses (both edges of both channels, or whatever
/// decoding the implementation chooses).
pub trait PulseCounter {
    /// Accumulated pulse count since the last reset
    fn count(&self) -> i32;

    /// Current pulse rate in pulses per second
    fn rate(&self) -> f32;

    /// Zero the accumulated count
    fn reset(&mut self);
}

/// Encoder plugged into a motor controller's sensor port
///
/// Readings arrive in the controller's status frames.
pub trait ControllerSensor {
    /// Selected sensor position in ticks
    fn selected_position(&self) -> i32;

    /// Selected sensor velocity in ticks per 100 ms
    fn selected_velocity(&self) -> i32;

    /// Overwrite the controller's accumulated position
    fn set_selected_position(&mut self, ticks: i32);
}

/// Encoder built into a brushless controller that reports revolutions
///
/// This device has no reset command.
pub trait RevolutionSensor {
    /// Shaft position in (fractional) revolutions
    fn position(&self) -> f32;

    /// Shaft velocity in revolutions per minute
    fn velocity(&self) -> f32;
}

/// Uniform position/velocity contract consumed by the lift controller
pub trait PositionSensor {
    /// Calibrated distance
    fn distance(&self) -> f32;

    /// Calibrated rate in distance units per second
    fn rate(&self) -> f32;
}

/// Uninhabited stand-in for backends an encoder was not built with
///
/// Lets `Encoder<Q, C, R>` name only the device it actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDevice {}

impl PulseCounter for NoDevice {
    fn count(&self) -> i32 {
        match *self {}
    }

    fn rate(&self) -> f32 {
        match *self {}
    }

    fn reset(&mut self) {
        match *self {}
    }
}

impl ControllerSensor for NoDevice {
    fn selected_position(&self) -> i32 {
        match *self {}
    }

    fn selected_velocity(&self) -> i32 {
        match *self {}
    }

    fn set_selected_position(&mut self, _ticks: i32) {
        match *self {}
    }
}

impl RevolutionSensor for NoDevice {
    fn position(&self) -> f32 {
        match *self {}
    }

    fn velocity(&self) -> f32 {
        match *self {}
    }
}
