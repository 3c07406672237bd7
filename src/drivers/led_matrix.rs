//! 5×5 pattern library for the WS2812 matrix.
//!
//! A [`Grid`] is a row-major on/off mask; the matrix driver lights every set
//! pixel in the single configured matrix colour.  Pixel `i` of the strip is
//! `grid[i / 5][i % 5]`.
//!
//! ## Patterns
//!
//! | Pattern       | Used for                                      |
//! |---------------|-----------------------------------------------|
//! | `FACE_NEUTRAL`| Normal, DeepRelaxation                        |
//! | `FACE_HAPPY`  | Concentrated, Flow, completed session         |
//! | `FACE_SAD`    | Distracted, Anxious, failed session           |
//! | `FOCUS`       | Attention objective (not started)             |
//! | `RELAXATION`  | Relaxation objective (not started)            |
//! | `WAVES`       | Flow objective (not started)                  |

use log::warn;

use crate::error::HardwareError;
use crate::pins::MATRIX_PIXELS;

/// Matrix side length.
pub const SIDE: usize = 5;

/// Row-major on/off mask.
pub type Grid = [[bool; SIDE]; SIDE];

const O: bool = false;
const X: bool = true;

pub const BLANK: Grid = [[O; SIDE]; SIDE];

pub const FACE_NEUTRAL: Grid = [
    [O, X, O, X, O],
    [O, X, O, X, O],
    [O, O, O, O, O],
    [X, O, O, O, X],
    [O, X, X, X, O],
];

pub const FACE_HAPPY: Grid = [
    [O, X, O, X, O],
    [O, X, O, X, O],
    [O, O, O, O, O],
    [X, X, X, X, X],
    [X, O, O, O, X],
];

pub const FACE_SAD: Grid = [
    [O, X, O, X, O],
    [O, X, O, X, O],
    [O, O, O, O, O],
    [O, X, X, X, O],
    [X, O, O, O, X],
];

pub const WAVES: Grid = [
    [O, O, X, O, O],
    [O, X, X, X, O],
    [X, X, X, X, X],
    [O, X, X, X, O],
    [O, O, X, O, O],
];

pub const FOCUS: Grid = WAVES;

pub const RELAXATION: Grid = [
    [X, O, O, O, X],
    [O, X, O, X, O],
    [O, O, X, O, O],
    [O, X, O, X, O],
    [X, O, O, O, X],
];

/// Light the first `count` pixels in strip order (clamped to 25).
pub fn fill_first(count: usize) -> Grid {
    let mut grid = BLANK;
    for i in 0..count.min(MATRIX_PIXELS) {
        grid[i / SIDE][i % SIDE] = true;
    }
    grid
}

/// Bar showing `fraction` of full scale: ⌊fraction × 25⌋ pixels.
pub fn fraction_bar(fraction: f32) -> Grid {
    let lit = (fraction.clamp(0.0, 1.0) * MATRIX_PIXELS as f32) as usize;
    fill_first(lit)
}

/// Session progress: ⌊25 / level_max⌋ pixels per level.
pub fn level_bar(level: u8, level_max: u8) -> Grid {
    let per_level = MATRIX_PIXELS / usize::from(level_max.max(1));
    fill_first(per_level * usize::from(level))
}

/// History summary: row 0 mean attention, row 1 mean relaxation (both in
/// fifths of full scale), rows 2–4 one pixel per completed session (≤ 15).
pub fn history(mean_attention: f32, mean_relaxation: f32, completed_sessions: u32) -> Grid {
    let mut grid = BLANK;
    let att = fifths(mean_attention / 100.0);
    let rel = fifths(mean_relaxation / 10.0);
    for col in 0..att {
        grid[0][col] = true;
    }
    for col in 0..rel {
        grid[1][col] = true;
    }
    let sessions = completed_sessions.min(15) as usize;
    for i in 0..sessions {
        let idx = 2 * SIDE + i;
        grid[idx / SIDE][idx % SIDE] = true;
    }
    grid
}

fn fifths(fraction: f32) -> usize {
    ((fraction.clamp(0.0, 1.0) * SIDE as f32) as usize).min(SIDE)
}

/// Number of lit pixels.
pub fn lit_count(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|&&p| p).count()
}

/// Flatten to strip order, mapping lit pixels to `colour` and the rest to
/// black.
pub fn to_strip(grid: &Grid, colour: (u8, u8, u8)) -> Strip {
    let mut strip = [(0, 0, 0); MATRIX_PIXELS];
    for (i, px) in grid.iter().flatten().enumerate() {
        if *px {
            strip[i] = colour;
        }
    }
    strip
}

// ── Driver ─────────────────────────────────────────────────────

/// One frame of strip colours, in strip order.
pub type Strip = [(u8, u8, u8); MATRIX_PIXELS];

/// A 25-pixel addressable strip (the WS2812 chain on the matrix pin).
pub trait PixelStrip {
    fn write(&mut self, pixels: &Strip) -> Result<(), HardwareError>;
}

/// Matrix driver: pattern in, colours out.  Skips the write when the
/// pattern has not changed.
pub struct LedMatrix<P> {
    strip: P,
    colour: (u8, u8, u8),
    shown: Option<Grid>,
}

impl<P: PixelStrip> LedMatrix<P> {
    pub fn new(strip: P, colour: (u8, u8, u8)) -> Self {
        Self {
            strip,
            colour,
            shown: None,
        }
    }

    pub fn show(&mut self, grid: &Grid) -> Result<(), HardwareError> {
        if self.shown.as_ref() == Some(grid) {
            return Ok(());
        }
        match self.strip.write(&to_strip(grid, self.colour)) {
            Ok(()) => {
                self.shown = Some(*grid);
                Ok(())
            }
            Err(e) => {
                warn!("MATRIX | write failed: {}", e);
                self.shown = None;
                Err(e)
            }
        }
    }

    /// Pattern currently on the strip, if the last write succeeded.
    pub fn shown(&self) -> Option<&Grid> {
        self.shown.as_ref()
    }

    pub fn strip(&self) -> &P {
        &self.strip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_first_is_row_major() {
        let g = fill_first(7);
        assert!(g[0].iter().all(|&p| p));
        assert!(g[1][0] && g[1][1]);
        assert!(!g[1][2]);
        assert_eq!(lit_count(&g), 7);
        assert_eq!(lit_count(&fill_first(100)), 25);
    }

    #[test]
    fn fraction_bar_floors() {
        assert_eq!(lit_count(&fraction_bar(0.3)), 7);
        assert_eq!(lit_count(&fraction_bar(0.7)), 17);
        assert_eq!(lit_count(&fraction_bar(1.0)), 25);
        assert_eq!(lit_count(&fraction_bar(-0.5)), 0);
    }

    #[test]
    fn level_bar_uses_whole_pixels_per_level() {
        assert_eq!(lit_count(&level_bar(1, 10)), 2);
        assert_eq!(lit_count(&level_bar(9, 10)), 18);
        assert_eq!(lit_count(&level_bar(3, 4)), 18);
    }

    #[test]
    fn history_rows() {
        let g = history(60.0, 9.9, 20);
        assert_eq!(g[0], [X, X, X, O, O]);
        assert_eq!(g[1], [X, X, X, X, O]);
        assert!(g[2..].iter().flatten().all(|&p| p));

        let g = history(0.0, 0.0, 6);
        assert_eq!(lit_count(&g), 6);
        assert!(g[2].iter().all(|&p| p));
        assert_eq!(g[3], [X, O, O, O, O]);
    }

    #[test]
    fn strip_colours_lit_pixels_only() {
        let strip = to_strip(&FACE_SAD, (20, 20, 50));
        assert_eq!(strip[0], (0, 0, 0));
        assert_eq!(strip[1], (20, 20, 50));
        assert_eq!(strip.iter().filter(|c| **c != (0, 0, 0)).count(), lit_count(&FACE_SAD));
    }

    #[test]
    fn faces_differ_only_in_mouth() {
        assert_eq!(FACE_HAPPY[..3], FACE_SAD[..3]);
        assert_eq!(FACE_NEUTRAL[..3], FACE_SAD[..3]);
        assert_ne!(FACE_HAPPY[3], FACE_SAD[3]);
    }

    struct Frames {
        writes: Vec<Strip>,
        fail: bool,
    }

    impl PixelStrip for Frames {
        fn write(&mut self, pixels: &Strip) -> Result<(), HardwareError> {
            if self.fail {
                return Err(HardwareError::PwmWrite);
            }
            self.writes.push(*pixels);
            Ok(())
        }
    }

    #[test]
    fn matrix_skips_unchanged_pattern() {
        let mut m = LedMatrix::new(
            Frames {
                writes: Vec::new(),
                fail: false,
            },
            (1, 2, 3),
        );
        m.show(&FACE_HAPPY).unwrap();
        m.show(&FACE_HAPPY).unwrap();
        m.show(&BLANK).unwrap();
        assert_eq!(m.strip().writes.len(), 2);
        assert_eq!(m.shown(), Some(&BLANK));
    }

    #[test]
    fn failed_write_forgets_shown_pattern() {
        let mut m = LedMatrix::new(
            Frames {
                writes: Vec::new(),
                fail: true,
            },
            (1, 2, 3),
        );
        assert_eq!(m.show(&WAVES), Err(HardwareError::PwmWrite));
        assert_eq!(m.shown(), None);
    }
}
