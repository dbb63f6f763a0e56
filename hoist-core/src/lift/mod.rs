//! Lift control
//!
//! [`LiftController`] owns the lift encoder and motor. Sequences that need
//! the lift go through the [`Lift`] trait so they can be tested without a
//! real controller.

mod controller;

pub use controller::{LiftController, LiftState, SoftLimits, TravelDirection};

use crate::traits::{MotorOutput, PositionSensor};

/// Lift as seen by the deposit sequences
pub trait Lift {
    /// Current height
    fn current_position(&self) -> f32;

    /// Move to `target`, call until it returns `true`
    fn move_to_position(&mut self, target: f32, speed: f32) -> bool;

    /// Abandon any move in progress and hold
    fn release(&mut self);
}

impl<E: PositionSensor, M: MotorOutput> Lift for LiftController<E, M> {
    fn current_position(&self) -> f32 {
        LiftController::current_position(self)
    }

    fn move_to_position(&mut self, target: f32, speed: f32) -> bool {
        LiftController::move_to_position(self, target, speed)
    }

    fn release(&mut self) {
        LiftController::release(self)
    }
}

impl<T: Lift + ?Sized> Lift for &mut T {
    fn current_position(&self) -> f32 {
        (**self).current_position()
    }

    fn move_to_position(&mut self, target: f32, speed: f32) -> bool {
        (**self).move_to_position(target, speed)
    }

    fn release(&mut self) {
        (**self).release()
    }
}
