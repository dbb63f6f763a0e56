//! Backend-agnostic encoder
//!
//! An [`Encoder`] wraps exactly one of three physical sources and converts
//! its native readings into ticks, distance and rate with a single
//! calibration scalar and inversion flag:
//!
//! | backend      | ticks                        | distance          | rate                 |
//! |--------------|------------------------------|-------------------|----------------------|
//! | quadrature   | pulse count                  | ticks × dpt       | pulses/s × dpt       |
//! | controller   | selected position            | ticks × dpt       | ticks/100ms × 10 × dpt |
//! | revolution   | trunc(revs × ticks_per_rev)  | revs × dpt        | rpm / 60 × dpt       |
//!
//! Every column is negated when the encoder is inverted. The revolution
//! backend's tick scaling does not feed its distance.

use crate::config::EncoderConfig;
use crate::traits::{ControllerSensor, NoDevice, PositionSensor, PulseCounter, RevolutionSensor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which backend an encoder reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncoderKind {
    /// Two-channel quadrature on digital inputs
    Quadrature,
    /// Sensor port of a motor controller
    Controller,
    /// Brushless controller reporting revolutions
    Revolution,
}

/// Which value [`Encoder::feedback`] reports to a control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeedbackMode {
    /// Position (distance)
    #[default]
    Displacement,
    /// Velocity (rate)
    Rate,
}

/// One consistent reading of an encoder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Tick count
    pub ticks: i32,
    /// Calibrated distance
    pub distance: f32,
    /// Calibrated rate (distance per second)
    pub rate: f32,
}

/// The physical source behind an [`Encoder`]
#[derive(Debug)]
pub enum EncoderBackend<Q, C, R> {
    /// Quadrature counter on digital inputs
    Quadrature(Q),
    /// Motor controller sensor port
    Controller(C),
    /// Revolution-reporting controller
    Revolution {
        /// The device
        sensor: R,
        /// Factor turning revolutions into integer ticks
        ticks_per_revolution: i32,
    },
}

/// Encoder over one of three backends
///
/// The unused type parameters default to [`NoDevice`], so an encoder names
/// only the device it was built with: `Encoder<MyCounter>`,
/// `Encoder<NoDevice, MyTalon>`, `Encoder<NoDevice, NoDevice, MySpark>`.
#[derive(Debug)]
pub struct Encoder<Q = NoDevice, C = NoDevice, R = NoDevice> {
    backend: EncoderBackend<Q, C, R>,
    distance_per_tick: f32,
    inverted: bool,
    feedback: FeedbackMode,
}

impl<Q: PulseCounter> Encoder<Q> {
    /// Create an encoder over a quadrature counter
    pub fn quadrature(counter: Q) -> Self {
        Self::from_backend(EncoderBackend::Quadrature(counter))
    }
}

impl<C: ControllerSensor> Encoder<NoDevice, C> {
    /// Create an encoder over a motor controller's sensor port
    pub fn controller(sensor: C) -> Self {
        Self::from_backend(EncoderBackend::Controller(sensor))
    }
}

impl<R: RevolutionSensor> Encoder<NoDevice, NoDevice, R> {
    /// Create an encoder over a revolution-reporting controller
    pub fn revolution(sensor: R, ticks_per_revolution: i32) -> Self {
        Self::from_backend(EncoderBackend::Revolution {
            sensor,
            ticks_per_revolution,
        })
    }
}

impl<Q, C, R> Encoder<Q, C, R>
where
    Q: PulseCounter,
    C: ControllerSensor,
    R: RevolutionSensor,
{
    /// Create an encoder from an explicit backend
    ///
    /// Calibration starts at one distance unit per tick, not inverted.
    pub fn from_backend(backend: EncoderBackend<Q, C, R>) -> Self {
        Self {
            backend,
            distance_per_tick: 1.0,
            inverted: false,
            feedback: FeedbackMode::Displacement,
        }
    }

    /// Apply a stored configuration
    ///
    /// `ticks_per_revolution` is ignored by backends that have none.
    pub fn apply_config(&mut self, config: &EncoderConfig) {
        self.distance_per_tick = config.distance_per_tick;
        self.inverted = config.inverted;
        self.set_ticks_per_revolution(config.ticks_per_revolution);
    }

    /// Backend this encoder reads from
    pub fn kind(&self) -> EncoderKind {
        match self.backend {
            EncoderBackend::Quadrature(_) => EncoderKind::Quadrature,
            EncoderBackend::Controller(_) => EncoderKind::Controller,
            EncoderBackend::Revolution { .. } => EncoderKind::Revolution,
        }
    }

    /// Borrow the backend
    pub fn backend(&self) -> &EncoderBackend<Q, C, R> {
        &self.backend
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&mut self) -> &mut EncoderBackend<Q, C, R> {
        &mut self.backend
    }

    fn sign(&self) -> f32 {
        if self.inverted {
            -1.0
        } else {
            1.0
        }
    }

    fn signed_ticks(&self, raw: i32) -> i32 {
        if self.inverted {
            raw.wrapping_neg()
        } else {
            raw
        }
    }

    /// Tick count, sign-adjusted for inversion
    pub fn ticks(&self) -> i32 {
        match &self.backend {
            EncoderBackend::Quadrature(counter) => self.signed_ticks(counter.count()),
            EncoderBackend::Controller(sensor) => self.signed_ticks(sensor.selected_position()),
            EncoderBackend::Revolution {
                sensor,
                ticks_per_revolution,
            } => {
                // `as` truncates toward zero
                let raw = (sensor.position() * *ticks_per_revolution as f32) as i32;
                self.signed_ticks(raw)
            }
        }
    }

    /// Calibrated distance
    pub fn distance(&self) -> f32 {
        match &self.backend {
            EncoderBackend::Quadrature(_) | EncoderBackend::Controller(_) => {
                self.ticks() as f32 * self.distance_per_tick
            }
            EncoderBackend::Revolution { sensor, .. } => {
                self.sign() * sensor.position() * self.distance_per_tick
            }
        }
    }

    /// Calibrated rate in distance units per second
    pub fn rate(&self) -> f32 {
        let native = match &self.backend {
            EncoderBackend::Quadrature(counter) => counter.rate(),
            // Native unit is ticks per 100 ms
            EncoderBackend::Controller(sensor) => sensor.selected_velocity() as f32 * 10.0,
            // Native unit is revolutions per minute
            EncoderBackend::Revolution { sensor, .. } => sensor.velocity() / 60.0,
        };
        self.sign() * native * self.distance_per_tick
    }

    /// Take a consistent snapshot of ticks, distance and rate
    pub fn measure(&self) -> Measurement {
        Measurement {
            ticks: self.ticks(),
            distance: self.distance(),
            rate: self.rate(),
        }
    }

    /// Zero the accumulated count
    ///
    /// Returns `false` for the revolution backend, which cannot be reset;
    /// its readings are left untouched.
    pub fn reset(&mut self) -> bool {
        match &mut self.backend {
            EncoderBackend::Quadrature(counter) => {
                counter.reset();
                true
            }
            EncoderBackend::Controller(sensor) => {
                sensor.set_selected_position(0);
                true
            }
            EncoderBackend::Revolution { .. } => false,
        }
    }

    /// Reverse the reading direction
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// Whether readings are reversed
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Set the distance travelled per tick
    ///
    /// For the revolution backend this is distance per revolution, since its
    /// distance is computed from revolutions directly.
    pub fn set_distance_per_tick(&mut self, distance_per_tick: f32) {
        self.distance_per_tick = distance_per_tick;
    }

    /// Distance travelled per tick
    pub fn distance_per_tick(&self) -> f32 {
        self.distance_per_tick
    }

    /// Set the revolution-to-tick factor
    ///
    /// No-op for backends other than revolution.
    pub fn set_ticks_per_revolution(&mut self, ticks: i32) {
        if let EncoderBackend::Revolution {
            ticks_per_revolution,
            ..
        } = &mut self.backend
        {
            *ticks_per_revolution = ticks;
        }
    }

    /// Revolution-to-tick factor, `0` for backends that have none
    pub fn ticks_per_revolution(&self) -> i32 {
        match self.backend {
            EncoderBackend::Revolution {
                ticks_per_revolution,
                ..
            } => ticks_per_revolution,
            _ => 0,
        }
    }

    /// Select what [`feedback`](Self::feedback) reports
    pub fn set_feedback_mode(&mut self, mode: FeedbackMode) {
        self.feedback = mode;
    }

    /// Current feedback mode
    pub fn feedback_mode(&self) -> FeedbackMode {
        self.feedback
    }

    /// Distance or rate, per the feedback mode
    pub fn feedback(&self) -> f32 {
        match self.feedback {
            FeedbackMode::Displacement => self.distance(),
            FeedbackMode::Rate => self.rate(),
        }
    }
}

impl<Q, C, R> PositionSensor for Encoder<Q, C, R>
where
    Q: PulseCounter,
    C: ControllerSensor,
    R: RevolutionSensor,
{
    fn distance(&self) -> f32 {
        Encoder::distance(self)
    }

    fn rate(&self) -> f32 {
        Encoder::rate(self)
    }
}
