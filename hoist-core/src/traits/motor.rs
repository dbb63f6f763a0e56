//! Motor output trait

/// A motor driven by a signed effort
///
/// Effort is a proportion of full output in `-1.0..=1.0`; positive drives
/// the mechanism up (or forward).
pub trait MotorOutput {
    /// Command an effort
    fn set(&mut self, effort: f32);

    /// Last commanded effort
    fn get(&self) -> f32;
}

impl<T: MotorOutput + ?Sized> MotorOutput for &mut T {
    fn set(&mut self, effort: f32) {
        (**self).set(effort)
    }

    fn get(&self) -> f32 {
        (**self).get()
    }
}
