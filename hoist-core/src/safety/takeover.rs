//! Operator takeover detection
//!
//! An automatic sequence keeps running only while the operator keeps their
//! hands off the watched sticks and buttons.

use crate::config::OverrideConfig;
use crate::traits::OperatorInput;

/// Result of a takeover check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverrideStatus {
    /// No operator input on any watched control
    Clear,
    /// A watched axis is outside the deadband
    Axis(u8),
    /// A watched button is pressed
    Button(u8),
}

impl OverrideStatus {
    /// Whether the operator is taking over
    pub fn is_active(&self) -> bool {
        !matches!(self, OverrideStatus::Clear)
    }
}

/// Watches operator controls for takeover
#[derive(Debug, Clone, Default)]
pub struct OverrideMonitor {
    config: OverrideConfig,
}

impl OverrideMonitor {
    /// Create a monitor for the given controls
    pub fn new(config: OverrideConfig) -> Self {
        Self { config }
    }

    /// Watched controls
    pub fn config(&self) -> &OverrideConfig {
        &self.config
    }

    /// Check the watched controls
    ///
    /// Axes are checked before buttons; the first active control is
    /// reported. An axis exactly at the deadband does not count.
    pub fn check<I: OperatorInput + ?Sized>(&self, input: &I) -> OverrideStatus {
        let deadband = self.config.deadband;

        for &axis in self.config.axes.iter() {
            let value = input.axis(axis);
            if value > deadband || value < -deadband {
                return OverrideStatus::Axis(axis);
            }
        }

        for &button in self.config.buttons.iter() {
            if input.button(button) {
                return OverrideStatus::Button(button);
            }
        }

        OverrideStatus::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Six axes, eight buttons
    struct Pad {
        axes: [f32; 6],
        buttons: [bool; 8],
    }

    impl Pad {
        fn idle() -> Self {
            Self {
                axes: [0.0; 6],
                buttons: [false; 8],
            }
        }
    }

    impl OperatorInput for Pad {
        fn axis(&self, index: u8) -> f32 {
            self.axes.get(index as usize).copied().unwrap_or(0.0)
        }

        fn button(&self, index: u8) -> bool {
            self.buttons.get(index as usize).copied().unwrap_or(false)
        }
    }

    #[test]
    fn test_idle_is_clear() {
        let monitor = OverrideMonitor::default();
        assert_eq!(monitor.check(&Pad::idle()), OverrideStatus::Clear);
        assert!(!monitor.check(&Pad::idle()).is_active());
    }

    #[test]
    fn test_deadband_is_exclusive() {
        let monitor = OverrideMonitor::default();
        let mut pad = Pad::idle();

        pad.axes[1] = 0.2;
        assert_eq!(monitor.check(&pad), OverrideStatus::Clear);
        pad.axes[1] = -0.2;
        assert_eq!(monitor.check(&pad), OverrideStatus::Clear);

        pad.axes[1] = -0.25;
        assert_eq!(monitor.check(&pad), OverrideStatus::Axis(1));
    }

    #[test]
    fn test_unwatched_axis_ignored() {
        let monitor = OverrideMonitor::default();
        let mut pad = Pad::idle();
        pad.axes[0] = 1.0;
        assert_eq!(monitor.check(&pad), OverrideStatus::Clear);

        pad.axes[5] = 0.9;
        assert_eq!(monitor.check(&pad), OverrideStatus::Axis(5));
    }

    #[test]
    fn test_watched_button() {
        let mut buttons = Vec::new();
        buttons.push(3).unwrap();
        let monitor = OverrideMonitor::new(OverrideConfig {
            buttons,
            ..Default::default()
        });

        let mut pad = Pad::idle();
        pad.buttons[2] = true;
        assert_eq!(monitor.check(&pad), OverrideStatus::Clear);

        pad.buttons[3] = true;
        assert_eq!(monitor.check(&pad), OverrideStatus::Button(3));
        assert!(monitor.check(&pad).is_active());
    }
}
