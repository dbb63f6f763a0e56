//! Lift position controller
//!
//! Drives the lift motor from its encoder under dynamic soft limits. Two
//! ways to command it:
//!
//! - [`drive_at_speed`](LiftController::drive_at_speed): direct speed for
//!   one tick (a held joystick re-issues it every tick)
//! - [`move_to_position`](LiftController::move_to_position): call until it
//!   returns `true`; the first call latches the target, later calls only
//!   report progress
//!
//! Nothing moves until [`update`](LiftController::update) runs, once per
//! control period:
//!
//! ```ignore
//! loop {
//!     lift.update(&manipulator);
//!     if lift.move_to_position(30.0, 1.0) {
//!         // at height
//!     }
//! }
//! ```

use crate::config::LiftConfig;
use crate::traits::{HeldPiece, LiftStatus, MotorOutput, PositionSensor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lift controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiftState {
    /// Holding position with a small effort
    #[default]
    Holding,
    /// Moving toward a latched target
    MovingToPosition,
    /// Applying a direct speed for one tick
    DirectDrive,
    /// Output off
    Stopped,
}

/// Direction of the move in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TravelDirection {
    /// No move in progress, or direction not chosen yet
    #[default]
    Neutral,
    /// Moving up; done once above the target
    Up,
    /// Moving down; done once below the target
    Down,
}

/// Current soft limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftLimits {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl SoftLimits {
    /// Check if a position is within bounds
    pub fn contains(&self, position: f32) -> bool {
        position >= self.min && position <= self.max
    }
}

/// Lift controller
pub struct LiftController<E, M> {
    sensor: E,
    motor: M,
    config: LiftConfig,
    state: LiftState,
    direction: TravelDirection,
    limits: SoftLimits,
    target_height: f32,
    target_speed: f32,
    /// Ready to latch the next move-to-position command
    command_armed: bool,
    /// Previous button value for press-triggered moves
    previous_button: bool,
}

impl<E: PositionSensor, M: MotorOutput> LiftController<E, M> {
    /// Create a lift controller
    ///
    /// The lower limit starts at the folded-arm floor until the first
    /// [`update`](Self::update) reads the manipulator.
    pub fn new(sensor: E, motor: M, config: LiftConfig) -> Self {
        Self {
            sensor,
            motor,
            limits: SoftLimits {
                min: config.folded_min_height,
                max: config.max_height,
            },
            config,
            state: LiftState::Holding,
            direction: TravelDirection::Neutral,
            target_height: 0.0,
            target_speed: 0.0,
            command_armed: true,
            previous_button: false,
        }
    }

    /// Current height (encoder distance)
    pub fn current_position(&self) -> f32 {
        self.sensor.distance()
    }

    /// Current state
    pub fn state(&self) -> LiftState {
        self.state
    }

    /// Direction of the move in progress
    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// Current soft limits
    pub fn limits(&self) -> SoftLimits {
        self.limits
    }

    /// Latched target height
    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    /// Latched target speed
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Whether the next move-to-position call will latch a new target
    pub fn is_command_armed(&self) -> bool {
        self.command_armed
    }

    /// Configuration in use
    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    /// Borrow the sensor
    pub fn sensor(&self) -> &E {
        &self.sensor
    }

    /// Mutably borrow the sensor (for recalibration)
    pub fn sensor_mut(&mut self) -> &mut E {
        &mut self.sensor
    }

    /// Borrow the motor
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Set the upper soft limit
    pub fn set_max_height(&mut self, max: f32) {
        self.limits.max = max;
    }

    /// Drive at a speed for one tick
    ///
    /// With `override_limits` the speed goes straight to the motor. Otherwise
    /// a speed that would push past a soft limit is ignored (the lift holds),
    /// and the rest is scaled by the up or down scalar.
    pub fn drive_at_speed(&mut self, speed: f32, override_limits: bool) {
        if override_limits {
            self.target_speed = speed;
            self.state = LiftState::DirectDrive;
            return;
        }

        let position = self.current_position();
        if (speed > 0.0 && position > self.limits.max)
            || (speed < 0.0 && position < self.limits.min)
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("lift: speed {} refused at {}", speed, position);
            self.state = LiftState::Holding;
            return;
        }

        self.target_speed = if speed > 0.0 {
            speed * self.config.up_scalar
        } else {
            speed * self.config.down_scalar
        };
        self.state = LiftState::DirectDrive;
    }

    /// Drive from a joystick axis, ignoring values inside the deadband
    pub fn drive_with_joystick(&mut self, axis: f32, override_limits: bool) {
        let deadband = self.config.joystick_deadband;
        if axis > deadband || axis < -deadband {
            self.drive_at_speed(axis, override_limits);
        }
    }

    /// Move to `target` at `speed`, call until it returns `true`
    ///
    /// The first call after the previous move finished latches the target;
    /// further calls do not change it. A target outside the soft limits
    /// completes at once without moving.
    pub fn move_to_position(&mut self, target: f32, speed: f32) -> bool {
        if self.command_armed {
            if !self.limits.contains(target) {
                #[cfg(feature = "defmt")]
                defmt::debug!("lift: target {} outside soft limits", target);
                self.state = LiftState::Holding;
                self.direction = TravelDirection::Neutral;
                return true;
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("lift: latched target {} at speed {}", target, speed);

            self.target_height = target;
            self.target_speed = if speed < 0.0 { -speed } else { speed };
            self.direction = TravelDirection::Neutral;
            self.state = LiftState::MovingToPosition;
            self.command_armed = false;
        }

        if self.state == LiftState::Holding {
            self.command_armed = true;
            return true;
        }
        false
    }

    /// Move to `target` at the default speed for the direction of travel
    pub fn move_to(&mut self, target: f32) -> bool {
        let speed = if self.current_position() < target {
            self.config.default_speed_up
        } else {
            self.config.default_speed_down
        };
        self.move_to_position(target, speed)
    }

    /// Start a move when `button` goes from released to pressed
    ///
    /// Holding the button does not re-trigger the move.
    pub fn move_to_position_on_press(&mut self, target: f32, speed: f32, button: bool) {
        if button && !self.previous_button {
            self.target_height = target;
            self.target_speed = if speed < 0.0 { -speed } else { speed };
            self.direction = TravelDirection::Neutral;
            self.command_armed = false;
            self.state = LiftState::MovingToPosition;
        }
        self.previous_button = button;
    }

    /// Drop a latched move and go back to holding
    ///
    /// The next [`move_to_position`](Self::move_to_position) latches a fresh
    /// target. A stopped lift stays stopped.
    pub fn release(&mut self) {
        if self.state != LiftState::Stopped {
            #[cfg(feature = "defmt")]
            if self.state == LiftState::MovingToPosition {
                defmt::debug!("lift: released move to {}", self.target_height);
            }
            self.state = LiftState::Holding;
        }
        self.direction = TravelDirection::Neutral;
        self.command_armed = true;
    }

    /// Turn the output off until the next command
    pub fn stop(&mut self) {
        self.state = LiftState::Stopped;
        self.direction = TravelDirection::Neutral;
        self.command_armed = true;
    }

    /// Run one control period
    ///
    /// Refreshes the lower soft limit from the manipulator, then advances the
    /// state machine and writes the motor.
    pub fn update<S: LiftStatus + ?Sized>(&mut self, status: &S) {
        self.limits.min = if status.is_deployed() {
            self.config.deployed_min_height
        } else {
            self.config.folded_min_height
        };

        match self.state {
            LiftState::MovingToPosition => self.update_moving(),
            LiftState::DirectDrive => {
                self.motor.set(self.target_speed);
                self.direction = TravelDirection::Neutral;
                self.command_armed = true;
                self.state = LiftState::Holding;
            }
            LiftState::Holding => {
                let effort = match status.held_piece() {
                    HeldPiece::Hatch => self.config.hold_effort_hatch,
                    HeldPiece::Cargo => self.config.hold_effort_cargo,
                    HeldPiece::None => self.config.hold_effort_none,
                };
                self.motor.set(effort);
                self.direction = TravelDirection::Neutral;
                self.command_armed = true;
            }
            LiftState::Stopped => self.motor.set(0.0),
        }
    }

    fn update_moving(&mut self) {
        // Limits may have moved since the target was latched
        if !self.limits.contains(self.target_height) {
            self.state = LiftState::Holding;
            self.direction = TravelDirection::Neutral;
            return;
        }

        let position = self.current_position();

        if self.direction == TravelDirection::Neutral {
            self.direction = if self.target_height < position {
                TravelDirection::Down
            } else {
                TravelDirection::Up
            };
        }

        let (passed, effort) = match self.direction {
            TravelDirection::Down => (position < self.target_height, -self.target_speed),
            _ => (position > self.target_height, self.target_speed),
        };

        if passed {
            #[cfg(feature = "defmt")]
            defmt::debug!("lift: reached {} (target {})", position, self.target_height);
            self.state = LiftState::Holding;
            self.direction = TravelDirection::Neutral;
            return;
        }

        self.motor.set(effort);
    }
}
