//! Panel peripheral drivers: buttons, buzzers, text display, LED matrix
//! and the RGB indicator.

pub mod button;
pub mod buzzer;
pub mod display;
pub mod led_matrix;
pub mod status_led;
