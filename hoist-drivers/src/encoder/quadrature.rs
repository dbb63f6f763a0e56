//! Quadrature decoder on two digital inputs
//!
//! Full 4x decoding: every edge on either channel is one count. Channel A
//! leading B counts up.
//!
//! ```ignore
//! let mut encoder = Encoder::quadrature(QuadratureDecoder::new(pin_a, pin_b));
//!
//! // Fast timer (well above the max edge rate):
//! if let EncoderBackend::Quadrature(counter) = encoder.backend_mut() {
//!     counter.poll();
//! }
//!
//! // Control loop, every 20 ms:
//! if let EncoderBackend::Quadrature(counter) = encoder.backend_mut() {
//!     counter.latch_rate(0.020);
//! }
//! let height = encoder.distance();
//! ```

use embedded_hal::digital::InputPin;
use hoist_core::traits::PulseCounter;

/// Count change for `previous << 2 | current`, with `state = a << 1 | b`
///
/// Forward is 00 -> 10 -> 11 -> 01 -> 00. Transitions where both channels
/// changed are unreadable and count zero.
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

/// Quadrature decoder
pub struct QuadratureDecoder<A, B> {
    a: A,
    b: B,
    /// Last sampled `a << 1 | b`
    state: u8,
    count: i32,
    /// Count at the last rate latch
    latched_count: i32,
    /// Pulses per second over the last latch window
    rate: f32,
    /// Samples where both channels changed at once
    skipped: u32,
    /// A pin read failed
    fault: bool,
}

impl<A: InputPin, B: InputPin> QuadratureDecoder<A, B> {
    /// Create a decoder, sampling the pins for the starting state
    pub fn new(a: A, b: B) -> Self {
        let mut decoder = Self {
            a,
            b,
            state: 0,
            count: 0,
            latched_count: 0,
            rate: 0.0,
            skipped: 0,
            fault: false,
        };
        if let Some(state) = decoder.sample() {
            decoder.state = state;
        }
        decoder
    }

    fn sample(&mut self) -> Option<u8> {
        match (self.a.is_high(), self.b.is_high()) {
            (Ok(a), Ok(b)) => Some(((a as u8) << 1) | b as u8),
            _ => {
                #[cfg(feature = "defmt")]
                if !self.fault {
                    defmt::warn!("quadrature: pin read failed");
                }
                self.fault = true;
                None
            }
        }
    }

    /// Sample both channels and update the count
    ///
    /// Returns the count change (-1, 0 or 1). A failed pin read skips the
    /// sample and sets the fault flag.
    pub fn poll(&mut self) -> i8 {
        let Some(current) = self.sample() else {
            return 0;
        };

        let previous = self.state;
        if previous == current {
            return 0;
        }
        self.state = current;

        if previous ^ current == 0b11 {
            self.skipped = self.skipped.saturating_add(1);
            return 0;
        }

        let delta = TRANSITIONS[((previous << 2) | current) as usize];
        self.count = self.count.wrapping_add(delta as i32);
        delta
    }

    /// Recompute the rate from the counts since the previous call
    ///
    /// `elapsed_s` is the time since the previous call; a non-positive value
    /// leaves the rate unchanged.
    pub fn latch_rate(&mut self, elapsed_s: f32) {
        if elapsed_s <= 0.0 {
            return;
        }
        let pulses = self.count.wrapping_sub(self.latched_count);
        self.rate = pulses as f32 / elapsed_s;
        self.latched_count = self.count;
    }

    /// Samples dropped because both channels changed between polls
    ///
    /// A growing number means [`poll`](Self::poll) runs too slowly.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Whether a pin read has failed
    pub fn is_faulted(&self) -> bool {
        self.fault
    }

    /// Clear the fault flag
    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Give the pins back
    pub fn release(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: InputPin, B: InputPin> PulseCounter for QuadratureDecoder<A, B> {
    fn count(&self) -> i32 {
        self.count
    }

    fn rate(&self) -> f32 {
        self.rate
    }

    fn reset(&mut self) {
        self.count = 0;
        self.latched_count = 0;
        self.rate = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Input pin reading a shared level
    struct Level<'a>(&'a Cell<bool>);

    impl ErrorType for Level<'_> {
        type Error = Infallible;
    }

    impl InputPin for Level<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }
    }

    /// Input pin that always fails
    struct Broken;

    impl ErrorType for Broken {
        type Error = ErrorKind;
    }

    impl InputPin for Broken {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    /// Forward Gray sequence for (a, b), starting from both low
    const FORWARD: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];

    /// Reverse Gray sequence, starting from both low
    const REVERSE: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn drive(a: &Cell<bool>, b: &Cell<bool>, levels: (bool, bool)) {
        a.set(levels.0);
        b.set(levels.1);
    }

    #[test]
    fn test_forward_counts_every_edge() {
        let (a, b) = (Cell::new(false), Cell::new(false));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        for _ in 0..3 {
            for levels in FORWARD {
                drive(&a, &b, levels);
                assert_eq!(decoder.poll(), 1);
            }
        }
        assert_eq!(decoder.count(), 12);
    }

    #[test]
    fn test_reverse_counts_down() {
        let (a, b) = (Cell::new(false), Cell::new(false));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        for levels in REVERSE {
            drive(&a, &b, levels);
            assert_eq!(decoder.poll(), -1);
        }
        assert_eq!(decoder.count(), -4);
    }

    #[test]
    fn test_no_change_no_count() {
        let (a, b) = (Cell::new(true), Cell::new(true));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        assert_eq!(decoder.poll(), 0);
        assert_eq!(decoder.poll(), 0);
        assert_eq!(decoder.count(), 0);
    }

    #[test]
    fn test_double_transition_is_skipped() {
        let (a, b) = (Cell::new(false), Cell::new(false));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        drive(&a, &b, (true, true));
        assert_eq!(decoder.poll(), 0);
        assert_eq!(decoder.skipped(), 1);

        // Decoding resumes from the new state
        drive(&a, &b, (false, true));
        assert_eq!(decoder.poll(), 1);
    }

    #[test]
    fn test_rate_latch() {
        let (a, b) = (Cell::new(false), Cell::new(false));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        for levels in FORWARD {
            drive(&a, &b, levels);
            decoder.poll();
        }
        decoder.latch_rate(0.5);
        assert_eq!(decoder.rate(), 8.0);

        // No motion in the next window
        decoder.latch_rate(0.5);
        assert_eq!(decoder.rate(), 0.0);

        decoder.latch_rate(0.0);
        assert_eq!(decoder.rate(), 0.0);
    }

    #[test]
    fn test_reset() {
        let (a, b) = (Cell::new(false), Cell::new(false));
        let mut decoder = QuadratureDecoder::new(Level(&a), Level(&b));

        drive(&a, &b, FORWARD[0]);
        decoder.poll();
        decoder.reset();
        assert_eq!(decoder.count(), 0);
    }

    #[test]
    fn test_pin_error_sets_fault() {
        let level = Cell::new(false);
        let mut decoder = QuadratureDecoder::new(Level(&level), Broken);
        assert!(decoder.is_faulted());

        assert_eq!(decoder.poll(), 0);
        assert_eq!(decoder.count(), 0);

        decoder.clear_fault();
        assert!(!decoder.is_faulted());
    }
}
