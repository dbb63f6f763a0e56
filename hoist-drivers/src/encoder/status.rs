//! Motor-controller encoder readings from status frames
//!
//! Smart motor controllers report their sensor readings in periodic status
//! frames over the robot's bus. These caches hold the latest frame so the
//! control loop can read them synchronously; the bus driver feeds them.

use hoist_core::traits::{ControllerSensor, RevolutionSensor};

/// Latest sensor-port reading from a motor controller
///
/// Position writes cannot reach the controller from here; they are queued
/// for the bus driver in [`take_position_command`](Self::take_position_command).
#[derive(Debug, Clone, Default)]
pub struct ControllerStatus {
    position: i32,
    velocity: i32,
    pending_position: Option<i32>,
    frames: u32,
}

impl ControllerStatus {
    /// Create an empty cache (reads zero until the first frame)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status frame
    ///
    /// `velocity` is in ticks per 100 ms, as the controller reports it. A
    /// frame arriving while a position write is still queued is ignored.
    pub fn on_frame(&mut self, position: i32, velocity: i32) {
        self.frames = self.frames.wrapping_add(1);
        if self.pending_position.is_some() {
            return;
        }
        self.position = position;
        self.velocity = velocity;
    }

    /// Take the queued position write, if any
    pub fn take_position_command(&mut self) -> Option<i32> {
        self.pending_position.take()
    }

    /// Number of frames received
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl ControllerSensor for ControllerStatus {
    fn selected_position(&self) -> i32 {
        self.position
    }

    fn selected_velocity(&self) -> i32 {
        self.velocity
    }

    fn set_selected_position(&mut self, ticks: i32) {
        #[cfg(feature = "defmt")]
        defmt::debug!("controller status: position set to {}", ticks);

        self.position = ticks;
        self.pending_position = Some(ticks);
    }
}

/// Latest reading from a brushless controller's built-in encoder
#[derive(Debug, Clone, Default)]
pub struct RevolutionStatus {
    revolutions: f32,
    rpm: f32,
    frames: u32,
}

impl RevolutionStatus {
    /// Create an empty cache (reads zero until the first frame)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status frame
    pub fn on_frame(&mut self, revolutions: f32, rpm: f32) {
        self.revolutions = revolutions;
        self.rpm = rpm;
        self.frames = self.frames.wrapping_add(1);
    }

    /// Number of frames received
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl RevolutionSensor for RevolutionStatus {
    fn position(&self) -> f32 {
        self.revolutions
    }

    fn velocity(&self) -> f32 {
        self.rpm
    }
}
