//! GPIO / peripheral pin assignments for the NeuroSync reference board
//! (RP2040-class MCU).
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Buttons (active-low with pull-up, falling-edge interrupt)
// ---------------------------------------------------------------------------

/// Next: cycle modes forward, or raise the edited parameter.
pub const BUTTON_NEXT_GPIO: u8 = 5;
/// Back: cycle modes backward, or lower the edited parameter.
pub const BUTTON_BACK_GPIO: u8 = 6;
/// Set: open/advance the edit overlay, or drive the training session.
pub const BUTTON_SET_GPIO: u8 = 22;

// ---------------------------------------------------------------------------
// Potentiometers simulating the EEG (attention) and GSR (relaxation) probes
// ---------------------------------------------------------------------------

pub const POT_ATTENTION_GPIO: u8 = 27;
pub const POT_RELAXATION_GPIO: u8 = 26;
/// ADC input index of the first analog-capable GPIO.
pub const ADC_BASE_GPIO: u8 = 26;
/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

// ---------------------------------------------------------------------------
// Buzzers
// ---------------------------------------------------------------------------

/// Primary feedback buzzer (success melody).
pub const BUZZER_PRIMARY_GPIO: u8 = 10;
/// Alert buzzer (error melody and beeps).
pub const BUZZER_ALERT_GPIO: u8 = 21;

// ---------------------------------------------------------------------------
// RGB indicator LED
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: u8 = 13;
pub const LED_G_GPIO: u8 = 11;
pub const LED_B_GPIO: u8 = 12;

// ---------------------------------------------------------------------------
// 5×5 WS2812 matrix
// ---------------------------------------------------------------------------

pub const MATRIX_GPIO: u8 = 7;
pub const MATRIX_PIXELS: usize = 25;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 128×64 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: u8 = 14;
pub const I2C_SCL_GPIO: u8 = 15;
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// PWM wrap value for the indicator LED (8-bit duty).
pub const PWM_WRAP: u16 = 255;

/// ADC input index for a potentiometer GPIO.
pub const fn adc_input(gpio: u8) -> u8 {
    gpio - ADC_BASE_GPIO
}
