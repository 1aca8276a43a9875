//! Ratcheting trailing-stop state machine.
//!
//! Every trailing-stop indicator in the crate (Supertrend, ATR trailing stop,
//! OTT, QQE) is the same left fold over per-bar inputs
//! `(long_candidate, short_candidate, trigger)` carrying
//! `(level, direction)`:
//!
//! 1. Any NaN input → NaN output; the state is left untouched.
//! 2. First defined bar → direction from [`InitialDirection`], level is the
//!    active side's candidate.
//! 3. Long and `trigger < level` → flip short, level = short candidate.
//!    Short and `trigger > level` → flip long, level = long candidate.
//! 4. Otherwise the level ratchets: `max(long_candidate, level)` while long,
//!    `min(short_candidate, level)` while short.
//!
//! A flip is atomic: the reseeded level is the bar's output.
//!
//! # Example
//!
//! ```
//! use chart_ta::trend::trailing::{trailing_stop, Direction, InitialDirection};
//!
//! let long = vec![9.0_f64, 10.0, 9.5, 8.0];
//! let short = vec![11.0_f64, 12.0, 11.5, 10.0];
//! let trigger = vec![10.0_f64, 11.0, 10.5, 8.5];
//!
//! let out = trailing_stop(&long, &short, &trigger, InitialDirection::Long).unwrap();
//! assert_eq!(out.level, vec![9.0, 10.0, 10.0, 10.0]);
//! assert_eq!(out.direction[3], Some(Direction::Short));
//! assert!(out.flipped[3]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::{validate_same_len, SeriesElement};

/// Side of a trailing stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stop trails below price.
    Long,
    /// Stop trails above price.
    Short,
}

impl Direction {
    /// `+1` for long, `-1` for short.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }

    /// Whether this is [`Direction::Long`].
    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::Long)
    }
}

/// How the direction is chosen on the first defined bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialDirection {
    /// Start long.
    #[default]
    Long,
    /// Start short.
    Short,
    /// Long iff the trigger is above the midpoint of the two candidates.
    Midpoint,
}

impl InitialDirection {
    fn resolve<T: SeriesElement>(self, long: T, short: T, trigger: T) -> Direction {
        match self {
            Self::Long => Direction::Long,
            Self::Short => Direction::Short,
            Self::Midpoint => {
                if trigger > (long + short) / T::two() {
                    Direction::Long
                } else {
                    Direction::Short
                }
            }
        }
    }
}

/// Carried `(level, direction)` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingState<T> {
    /// Active stop level.
    pub level: T,
    /// Active side.
    pub direction: Direction,
}

impl<T: SeriesElement> TrailingState<T> {
    /// State on the first defined bar.
    #[must_use]
    pub fn start(long: T, short: T, trigger: T, initial: InitialDirection) -> Self {
        let direction = initial.resolve(long, short, trigger);
        let level = if direction.is_long() { long } else { short };
        Self { level, direction }
    }

    /// Advances one bar; returns `true` if the direction flipped.
    pub fn update(&mut self, long: T, short: T, trigger: T) -> bool {
        match self.direction {
            Direction::Long if trigger < self.level => {
                self.direction = Direction::Short;
                self.level = short;
                true
            }
            Direction::Short if trigger > self.level => {
                self.direction = Direction::Long;
                self.level = long;
                true
            }
            Direction::Long => {
                self.level = long.max(self.level);
                false
            }
            Direction::Short => {
                self.level = short.min(self.level);
                false
            }
        }
    }
}

/// Per-bar output of [`trailing_stop`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrailingOutput<T> {
    /// Active stop; NaN where any input was undefined.
    pub level: Vec<T>,
    /// Side after the bar; `None` before the first defined bar. Held through
    /// undefined bars.
    pub direction: Vec<Option<Direction>>,
    /// `true` on bars where the direction flipped.
    pub flipped: Vec<bool>,
}

impl<T: SeriesElement> TrailingOutput<T> {
    /// Stop level masked to the bars where the side is `side`.
    #[must_use]
    pub fn level_when(&self, side: Direction) -> Vec<T> {
        self.level
            .iter()
            .zip(&self.direction)
            .map(|(&level, &dir)| if dir == Some(side) { level } else { T::nan() })
            .collect()
    }

    /// `true` on bars where the direction flipped to `side`.
    #[must_use]
    pub fn flips_to(&self, side: Direction) -> Vec<bool> {
        self.flipped
            .iter()
            .zip(&self.direction)
            .map(|(&flipped, &dir)| flipped && dir == Some(side))
            .collect()
    }
}

/// Folds the trailing-stop state machine across all bars.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the three inputs differ in length.
pub fn trailing_stop<T: SeriesElement>(
    long: &[T],
    short: &[T],
    trigger: &[T],
    initial: InitialDirection,
) -> Result<TrailingOutput<T>> {
    validate_same_len(long, "long", short, "short")?;
    validate_same_len(long, "long", trigger, "trigger")?;

    let n = long.len();
    let mut output = TrailingOutput {
        level: vec![T::nan(); n],
        direction: vec![None; n],
        flipped: vec![false; n],
    };
    let mut state: Option<TrailingState<T>> = None;

    for i in 0..n {
        let (l, s, t) = (long[i], short[i], trigger[i]);
        if l.is_nan() || s.is_nan() || t.is_nan() {
            output.direction[i] = state.map(|st| st.direction);
            continue;
        }

        let current = match state {
            None => TrailingState::start(l, s, t, initial),
            Some(mut st) => {
                if st.update(l, s, t) {
                    output.flipped[i] = true;
                    tracing::trace!(
                        bar = i,
                        direction = ?st.direction,
                        level = st.level.to_f64(),
                        "trailing stop flipped"
                    );
                }
                st
            }
        };
        state = Some(current);
        output.level[i] = current.level;
        output.direction[i] = Some(current.direction);
    }

    Ok(output)
}
