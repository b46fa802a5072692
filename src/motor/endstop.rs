//! End-stop hook polled before every step pulse.

use embedded_hal::digital::InputPin;

/// A limit sensor. When it reports triggered, the controller halts instead of
/// emitting the pulse.
pub trait EndStop {
    /// Whether the mechanism sits on its hard stop.
    fn is_triggered(&mut self) -> bool;
}

/// No sensor fitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEndStop;

impl EndStop for NoEndStop {
    #[inline]
    fn is_triggered(&mut self) -> bool {
        false
    }
}

impl<F> EndStop for F
where
    F: FnMut() -> bool,
{
    #[inline]
    fn is_triggered(&mut self) -> bool {
        self()
    }
}

/// Switch wired to a GPIO input.
///
/// A failed read counts as triggered.
#[derive(Debug)]
pub struct EndStopPin<P: InputPin> {
    pin: P,
    triggered_when_high: bool,
}

impl<P: InputPin> EndStopPin<P> {
    /// Normally-open switch to ground with a pull-up: triggered when low.
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            triggered_when_high: false,
        }
    }

    /// Switch that drives the line high when hit.
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            triggered_when_high: true,
        }
    }

    /// Release the underlying pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> EndStop for EndStopPin<P> {
    fn is_triggered(&mut self) -> bool {
        let level = if self.triggered_when_high {
            self.pin.is_high()
        } else {
            self.pin.is_low()
        };
        level.unwrap_or(true)
    }
}
