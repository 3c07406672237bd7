//! RGB indicator LED driver.
//!
//! Three PWM channels drive the R/G/B dies of a common-cathode LED.
//! Written against `embedded_hal::pwm::SetDutyCycle` so the same driver runs
//! on the board and against host stubs.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::error::HardwareError;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// ── Palette ────────────────────────────────────────────────────

pub const OFF: Rgb = (0, 0, 0);
pub const RED: Rgb = (255, 0, 0);
pub const GREEN: Rgb = (0, 255, 0);
pub const BLUE: Rgb = (0, 0, 255);
pub const CYAN: Rgb = (0, 255, 255);
pub const YELLOW: Rgb = (255, 255, 0);
pub const TEAL: Rgb = (0, 255, 128);
pub const PURPLE: Rgb = (128, 0, 128);

pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Rgb,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: OFF,
        }
    }

    /// Scale each 8-bit component onto the channel's duty range.
    ///
    /// All three channels are written even if one fails; the first error is
    /// returned and the cached colour is left unchanged.
    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), HardwareError> {
        let red = write_channel(&mut self.red, r, "red");
        let green = write_channel(&mut self.green, g, "green");
        let blue = write_channel(&mut self.blue, b, "blue");
        red.and(green).and(blue)?;
        self.current = (r, g, b);
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), HardwareError> {
        self.set_colour(0, 0, 0)
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}

fn write_channel(ch: &mut impl SetDutyCycle, level: u8, name: &str) -> Result<(), HardwareError> {
    ch.set_duty_cycle_fraction(u16::from(level), 255).map_err(|e| {
        warn!("LED | {} channel write failed: {:?}", name, e);
        HardwareError::PwmWrite
    })
}
