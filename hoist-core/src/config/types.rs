//! Configuration type definitions
//!
//! Every constant the lift and deposit logic depends on lives here, with
//! defaults matching the competition robot. Units are inches, degrees and
//! motor-effort proportions.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum monitored axes or buttons for the operator override
pub const MAX_OVERRIDE_INPUTS: usize = 8;

/// Number of selectable deposit levels
pub const LEVEL_COUNT: usize = 4;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Soft limits overlap or are inverted
    InvalidLimits,
    /// An effort or scalar lies outside `-1.0..=1.0` (or `0.0..=1.0`)
    ScalarOutOfRange,
    /// Deadband outside `0.0..1.0`
    InvalidDeadband,
    /// Encoder calibration cannot produce a distance
    InvalidCalibration,
    /// A tolerance or window is negative or empty
    InvalidWindow,
}

fn is_proportion(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_effort(value: f32) -> bool {
    (-1.0..=1.0).contains(&value)
}

/// Encoder calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Distance per tick (per revolution for revolution encoders)
    pub distance_per_tick: f32,
    /// Reverse the reading direction
    pub inverted: bool,
    /// Revolution-to-tick factor (revolution encoders only)
    pub ticks_per_revolution: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            distance_per_tick: 1.0,
            inverted: false,
            ticks_per_revolution: 1,
        }
    }
}

impl EncoderConfig {
    /// Check the calibration can produce a usable distance
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distance_per_tick == 0.0 || self.distance_per_tick.is_nan() {
            return Err(ConfigError::InvalidCalibration);
        }
        if self.ticks_per_revolution <= 0 {
            return Err(ConfigError::InvalidCalibration);
        }
        Ok(())
    }
}

/// Lift configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiftConfig {
    /// Initial upper soft limit
    pub max_height: f32,
    /// Lower soft limit while the arm is deployed
    pub deployed_min_height: f32,
    /// Lower soft limit while the arm is folded (keeps the lift clear of it)
    pub folded_min_height: f32,
    /// Joystick scaling when driving up
    pub up_scalar: f32,
    /// Joystick scaling when driving down
    pub down_scalar: f32,
    /// Default speed for [`move_to`](crate::lift::LiftController::move_to) upward
    pub default_speed_up: f32,
    /// Default speed for [`move_to`](crate::lift::LiftController::move_to) downward
    pub default_speed_down: f32,
    /// Holding effort with nothing in the intake
    pub hold_effort_none: f32,
    /// Holding effort with a hatch
    pub hold_effort_hatch: f32,
    /// Holding effort with cargo
    pub hold_effort_cargo: f32,
    /// Joystick deadband for manual driving
    pub joystick_deadband: f32,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            max_height: 72.0,
            deployed_min_height: 0.0,
            folded_min_height: 15.0,
            up_scalar: 1.0,
            down_scalar: 0.55,
            default_speed_up: 1.0,
            default_speed_down: 0.55,
            hold_effort_none: 0.05,
            hold_effort_hatch: 0.1,
            hold_effort_cargo: 0.1,
            joystick_deadband: 0.2,
        }
    }
}

impl LiftConfig {
    /// Check limits and scalars are consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deployed_min_height > self.folded_min_height
            || self.folded_min_height >= self.max_height
        {
            return Err(ConfigError::InvalidLimits);
        }

        let proportions = [
            self.up_scalar,
            self.down_scalar,
            self.default_speed_up,
            self.default_speed_down,
        ];
        if !proportions.iter().all(|v| is_proportion(*v)) {
            return Err(ConfigError::ScalarOutOfRange);
        }

        let efforts = [
            self.hold_effort_none,
            self.hold_effort_hatch,
            self.hold_effort_cargo,
        ];
        if !efforts.iter().all(|v| is_effort(*v)) {
            return Err(ConfigError::ScalarOutOfRange);
        }

        if !(0.0..1.0).contains(&self.joystick_deadband) {
            return Err(ConfigError::InvalidDeadband);
        }

        Ok(())
    }
}

/// Four values selected by deposit level
///
/// Levels 0-2 are the low, middle and top rocket openings; level 3 is the
/// cargo ship.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelTable {
    /// Value per level
    pub values: [f32; LEVEL_COUNT],
}

impl LevelTable {
    /// Create a table
    pub const fn new(values: [f32; LEVEL_COUNT]) -> Self {
        Self { values }
    }

    /// Value for `level`, falling back to level 0 for unknown levels
    pub fn get(&self, level: u8) -> f32 {
        self.values
            .get(level as usize)
            .copied()
            .unwrap_or(self.values[0])
    }
}

/// Deposit sequencing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepositConfig {
    /// Lift height per level with a hatch
    pub hatch_heights: LevelTable,
    /// Lift height per level with cargo
    pub cargo_heights: LevelTable,
    /// Arm angle per level with a hatch
    pub hatch_angles: LevelTable,
    /// Arm angle per level with cargo
    pub cargo_angles: LevelTable,
    /// Lift speed for staging and level moves
    pub lift_speed: f32,
    /// Arm speed for level and release moves
    pub arm_speed: f32,
    /// Arm speed while staging to the safe angle
    pub staging_arm_speed: f32,
    /// Arm angle that keeps the manipulator clear while the lift moves
    pub safe_arm_angle: f32,
    /// Lowest angle counted as safe
    pub safe_arm_min: f32,
    /// Highest angle counted as safe
    pub safe_arm_max: f32,
    /// Lift height for staging before alignment
    pub safe_lift_height: f32,
    /// Staging height tolerance (either side)
    pub safe_lift_tolerance: f32,
    /// Speed handed to the aligner
    pub align_speed: f32,
    /// Forward drive onto the target
    pub forward_to_deposit: f32,
    /// Forward drive speed
    pub forward_speed: f32,
    /// Full backup distance after a cargo deposit
    pub backup_distance: f32,
    /// Short backup distance after a hatch deposit
    pub fine_backup_distance: f32,
    /// Backup speed (magnitude)
    pub backup_speed: f32,
    /// Drive acceleration for deposit motions
    pub drive_acceleration: f32,
    /// Hold heading with the gyro during deposit motions
    pub heading_lock: bool,
    /// Arm drop that releases a hatch at the top level
    pub arm_release_drop: f32,
    /// Lift drop that releases a hatch at the other levels
    pub lift_release_drop: f32,
    /// Lift speed for the release drop
    pub lift_release_speed: f32,
    /// Arm angle the manipulator re-poses to after ejecting cargo
    pub cargo_repose_angle: f32,
    /// Arm speed for the autonomous hatch prep move
    pub prep_arm_speed: f32,
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            hatch_heights: LevelTable::new([10.0, 30.0, 50.0, 0.0]),
            cargo_heights: LevelTable::new([0.0, 26.0, 69.0, 0.0]),
            hatch_angles: LevelTable::new([35.0, 35.0, 45.0, 35.0]),
            cargo_angles: LevelTable::new([45.0, 45.0, 60.0, 45.0]),
            lift_speed: 1.0,
            arm_speed: 0.4,
            staging_arm_speed: 1.0,
            safe_arm_angle: 35.0,
            safe_arm_min: 30.0,
            safe_arm_max: 40.0,
            safe_lift_height: 15.0,
            safe_lift_tolerance: 3.0,
            align_speed: 0.25,
            forward_to_deposit: 2.0,
            forward_speed: 0.4,
            backup_distance: 10.0,
            fine_backup_distance: 4.0,
            backup_speed: 0.3,
            drive_acceleration: 0.1,
            heading_lock: true,
            arm_release_drop: 10.0,
            lift_release_drop: 3.0,
            lift_release_speed: 1.0,
            cargo_repose_angle: 45.0,
            prep_arm_speed: 0.8,
        }
    }
}

impl DepositConfig {
    /// Check speeds, windows and distances are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            self.lift_speed,
            self.arm_speed,
            self.staging_arm_speed,
            self.align_speed,
            self.forward_speed,
            self.backup_speed,
            self.drive_acceleration,
            self.lift_release_speed,
            self.prep_arm_speed,
        ];
        if !speeds.iter().all(|v| is_proportion(*v)) {
            return Err(ConfigError::ScalarOutOfRange);
        }

        if self.safe_arm_min > self.safe_arm_max
            || !(self.safe_arm_min..=self.safe_arm_max).contains(&self.safe_arm_angle)
            || self.safe_lift_tolerance < 0.0
        {
            return Err(ConfigError::InvalidWindow);
        }

        let distances = [
            self.forward_to_deposit,
            self.backup_distance,
            self.fine_backup_distance,
            self.arm_release_drop,
            self.lift_release_drop,
        ];
        if distances.iter().any(|v| *v < 0.0) {
            return Err(ConfigError::InvalidWindow);
        }

        Ok(())
    }
}

/// Operator override configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverrideConfig {
    /// Axis magnitude that counts as operator input (exclusive)
    pub deadband: f32,
    /// Axes watched for operator input
    pub axes: Vec<u8, MAX_OVERRIDE_INPUTS>,
    /// Buttons watched for operator input
    pub buttons: Vec<u8, MAX_OVERRIDE_INPUTS>,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        let mut axes = Vec::new();
        // Left and right driver sticks, Y axis
        let _ = axes.push(1);
        let _ = axes.push(5);

        Self {
            deadband: 0.2,
            axes,
            buttons: Vec::new(),
        }
    }
}

impl OverrideConfig {
    /// Check the deadband is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.deadband) {
            return Err(ConfigError::InvalidDeadband);
        }
        Ok(())
    }
}
