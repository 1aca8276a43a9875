//! Trend and trailing-stop state machines.
//!
//! [`trailing`] holds the shared ratcheting fold; the remaining modules feed
//! it (Supertrend, ATR trailing stop, OTT, QQE) or run their own per-bar
//! state (HalfTrend, AlphaTrend).

pub mod alphatrend;
pub mod halftrend;
pub mod ott;
pub mod qqe;
pub mod supertrend;
pub mod trailing;

pub use alphatrend::{alphatrend, AlphaTrendOutput, ALPHATREND_SIGNAL_LAG};
pub use halftrend::{halftrend, HalfTrendOutput};
pub use ott::{ott, OttOutput, OTT_DISPLAY_LAG};
pub use qqe::{qqe, QqeOutput};
pub use supertrend::{atr_trailing_stop, supertrend};
pub use trailing::{trailing_stop, Direction, InitialDirection, TrailingOutput, TrailingState};
