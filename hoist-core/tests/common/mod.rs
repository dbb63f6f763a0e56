//! Shared test doubles for the host integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use hoist_core::deposit::Mechanisms;
use hoist_core::lift::{Lift, LiftController};
use hoist_core::sensor::Encoder;
use hoist_core::traits::{
    Aligner, ControllerSensor, Drive, HeldPiece, LiftStatus, Manipulator, MotorOutput,
    PulseCounter, RevolutionSensor,
};

// ---------------------------------------------------------------------------
// Encoder hardware
// ---------------------------------------------------------------------------

pub struct Counter {
    pub count: i32,
    pub rate: f32,
}

impl PulseCounter for Counter {
    fn count(&self) -> i32 {
        self.count
    }

    fn rate(&self) -> f32 {
        self.rate
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

pub struct Talon {
    pub position: i32,
    pub velocity: i32,
}

impl ControllerSensor for Talon {
    fn selected_position(&self) -> i32 {
        self.position
    }

    fn selected_velocity(&self) -> i32 {
        self.velocity
    }

    fn set_selected_position(&mut self, ticks: i32) {
        self.position = ticks;
    }
}

pub struct Spark {
    pub revs: f32,
    pub rpm: f32,
}

impl RevolutionSensor for Spark {
    fn position(&self) -> f32 {
        self.revs
    }

    fn velocity(&self) -> f32 {
        self.rpm
    }
}

// ---------------------------------------------------------------------------
// Simulated lift: the motor turns a shaft the counter reads
// ---------------------------------------------------------------------------

/// Distance per encoder tick of the simulated lift
pub const LIFT_DISTANCE_PER_TICK: f32 = 0.1;

/// Ticks moved per tick of full effort
const TICKS_PER_FULL_EFFORT: f32 = 20.0;

/// Efforts this small only hold the carriage against gravity
const HOLD_THRESHOLD: f32 = 0.2;

#[derive(Clone, Default)]
pub struct Shaft(Rc<Cell<i32>>);

impl Shaft {
    pub fn at_height(height: f32) -> Self {
        Self(Rc::new(Cell::new((height / LIFT_DISTANCE_PER_TICK).round() as i32)))
    }

    pub fn ticks(&self) -> i32 {
        self.0.get()
    }

    pub fn turn(&self, ticks: i32) {
        self.0.set(self.0.get() + ticks);
    }

    pub fn height(&self) -> f32 {
        self.ticks() as f32 * LIFT_DISTANCE_PER_TICK
    }
}

pub struct ShaftCounter(pub Shaft);

impl PulseCounter for ShaftCounter {
    fn count(&self) -> i32 {
        self.0.ticks()
    }

    fn rate(&self) -> f32 {
        0.0
    }

    fn reset(&mut self) {
        self.0.turn(-self.0.ticks());
    }
}

pub struct ShaftMotor {
    shaft: Shaft,
    effort: f32,
    pub writes: u32,
}

impl MotorOutput for ShaftMotor {
    fn set(&mut self, effort: f32) {
        self.effort = effort;
        self.writes += 1;
        if effort > HOLD_THRESHOLD || effort < -HOLD_THRESHOLD {
            self.shaft.turn((effort * TICKS_PER_FULL_EFFORT) as i32);
        }
    }

    fn get(&self) -> f32 {
        self.effort
    }
}

pub type SimLift = LiftController<Encoder<ShaftCounter>, ShaftMotor>;

/// Lift controller over a simulated shaft at `height`
pub fn sim_lift(height: f32) -> (SimLift, Shaft) {
    let shaft = Shaft::at_height(height);
    let mut encoder = Encoder::quadrature(ShaftCounter(shaft.clone()));
    encoder.set_distance_per_tick(LIFT_DISTANCE_PER_TICK);
    let motor = ShaftMotor {
        shaft: shaft.clone(),
        effort: 0.0,
        writes: 0,
    };
    (
        LiftController::new(encoder, motor, Default::default()),
        shaft,
    )
}

// ---------------------------------------------------------------------------
// Deposit collaborators (all finish on the first call unless slowed)
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingDrive {
    pub straight: Vec<(f32, f32)>,
    pub stopped: bool,
    pub encoder_resets: u32,
}

impl Drive for RecordingDrive {
    fn drive_straight(
        &mut self,
        distance: f32,
        speed: f32,
        _acceleration: f32,
        _lock: bool,
    ) -> bool {
        self.straight.push((distance, speed));
        true
    }

    fn drive(&mut self, left: f32, right: f32) {
        self.stopped = left == 0.0 && right == 0.0;
    }

    fn reset_encoders(&mut self) {
        self.encoder_resets += 1;
    }
}

/// Lift that reaches any target at once
pub struct InstantLift {
    pub height: f32,
    pub targets: Vec<f32>,
}

impl InstantLift {
    pub fn at(height: f32) -> Self {
        Self {
            height,
            targets: Vec::new(),
        }
    }
}

impl Lift for InstantLift {
    fn current_position(&self) -> f32 {
        self.height
    }

    fn move_to_position(&mut self, target: f32, _speed: f32) -> bool {
        self.targets.push(target);
        self.height = target;
        true
    }
    fn release(&mut self) {}
}

pub struct Arm {
    pub angle: f32,
    pub deployed: bool,
    pub held: HeldPiece,
    pub targets: Vec<f32>,
    pub ejects: u32,
}

impl Arm {
    pub fn at(angle: f32) -> Self {
        Self {
            angle,
            deployed: true,
            held: HeldPiece::Hatch,
            targets: Vec::new(),
            ejects: 0,
        }
    }
}

impl LiftStatus for Arm {
    fn is_deployed(&self) -> bool {
        self.deployed
    }

    fn held_piece(&self) -> HeldPiece {
        self.held
    }
}

impl Manipulator for Arm {
    fn arm_angle(&self) -> f32 {
        self.angle
    }

    fn move_arm_to_position(&mut self, angle: f32, _speed: f32) -> bool {
        self.targets.push(angle);
        self.angle = angle;
        true
    }

    fn eject_cargo(&mut self) -> bool {
        self.ejects += 1;
        self.held = HeldPiece::None;
        true
    }
}

#[derive(Default)]
pub struct Camera {
    /// Calls to wait before reporting aligned
    pub delay: u32,
    pub aligns: u32,
    pub signal: bool,
}

impl Aligner for Camera {
    fn align(&mut self, _speed: f32) -> bool {
        self.aligns += 1;
        self.aligns > self.delay
    }

    fn rearm(&mut self) {
        self.aligns = 0;
    }

    fn set_signal(&mut self, on: bool) {
        self.signal = on;
    }
}

pub fn instant_rig(
    height: f32,
    angle: f32,
) -> Mechanisms<RecordingDrive, InstantLift, Arm, Camera> {
    Mechanisms {
        drive: RecordingDrive::default(),
        lift: InstantLift::at(height),
        arm: Arm::at(angle),
        aligner: Camera::default(),
    }
}
