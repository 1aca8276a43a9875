//! Zig-zag with swing labels and Fibonacci retracements.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns};
use crate::catalog::Indicator;
use crate::error::Result;
use crate::output::{
    BoxDrawing, Color, HLine, IndicatorResult, LabelDrawing, LineDrawing, LineStyle,
    MarkerPosition, Metadata,
};
use crate::pivots::{find_pivots, pivot_high, pivot_low, Pivot, PivotKind, ZigZag};

/// Zig-zag through confirmed pivots. Draws the legs as lines, labels each
/// swing HH/LH/HL/LL against the previous swing of the same kind, and adds
/// retracement lines plus a shaded box on the last leg.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZigZagFib {
    left: usize,
    right: usize,
    capacity: usize,
    show_labels: bool,
    show_fib: bool,
}

impl Default for ZigZagFib {
    fn default() -> Self {
        Self {
            left: 5,
            right: 5,
            capacity: 50,
            show_labels: true,
            show_fib: true,
        }
    }
}

impl ZigZagFib {
    /// Creates a zig-zag over (5, 5) pivots keeping 50 points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bars left of a pivot.
    ///
    /// Default: 5
    #[must_use]
    pub const fn left(mut self, left: usize) -> Self {
        self.left = left;
        self
    }

    /// Sets the confirmation bars right of a pivot.
    ///
    /// Default: 5
    #[must_use]
    pub const fn right(mut self, right: usize) -> Self {
        self.right = right;
        self
    }

    /// Sets how many zig-zag points are kept.
    ///
    /// Default: 50
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Toggles swing labels.
    #[must_use]
    pub const fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Toggles retracement lines.
    #[must_use]
    pub const fn show_fib(mut self, show: bool) -> Self {
        self.show_fib = show;
        self
    }
}

fn swing_label(point: &Pivot<f64>, previous_same_kind: Option<&Pivot<f64>>) -> &'static str {
    match (point.kind, previous_same_kind) {
        (PivotKind::High, None) => "H",
        (PivotKind::Low, None) => "L",
        (PivotKind::High, Some(prev)) if point.value > prev.value => "HH",
        (PivotKind::High, Some(_)) => "LH",
        (PivotKind::Low, Some(prev)) if point.value < prev.value => "LL",
        (PivotKind::Low, Some(_)) => "HL",
    }
}

impl Indicator for ZigZagFib {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "ZigZag Fibonacci",
            format!("ZZ {} {}", self.left, self.right),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let (high, low) = (bars.highs(), bars.lows());

        let pivots = find_pivots(&high, &low, self.left, self.right)?;
        let zigzag = ZigZag::from_pivots(pivots.iter().copied(), self.capacity)?;
        let points: Vec<&Pivot<f64>> = zigzag.points().collect();
        tracing::debug!(
            indicator = "zigzag_fib",
            bars = bars.len(),
            pivots = pivots.len(),
            points = points.len(),
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("pivot_high", &times, &pivot_high(&high, self.left, self.right)?)?;
        result.add_plot("pivot_low", &times, &pivot_low(&low, self.left, self.right)?)?;

        for leg in points.windows(2) {
            let (from, to) = (leg[0], leg[1]);
            let color = if to.kind == PivotKind::High {
                Color::GREEN
            } else {
                Color::RED
            };
            result.lines.push(LineDrawing {
                x1: times[from.index],
                y1: from.value,
                x2: times[to.index],
                y2: to.value,
                color,
                style: LineStyle::Solid,
                width: 2,
                extend_right: false,
            });
        }

        if self.show_labels {
            for (i, point) in points.iter().enumerate() {
                let previous = points[..i].iter().rev().find(|p| p.kind == point.kind).copied();
                let (position, color) = match point.kind {
                    PivotKind::High => (MarkerPosition::AboveBar, Color::GREEN),
                    PivotKind::Low => (MarkerPosition::BelowBar, Color::RED),
                };
                result.labels.push(LabelDrawing {
                    time: times[point.index],
                    price: point.value,
                    text: swing_label(point, previous).to_owned(),
                    color,
                    position,
                });
            }
        }

        if self.show_fib {
            for level in zigzag.fib_levels()? {
                result.hlines.push(HLine {
                    price: level.price,
                    color: Color::ORANGE,
                    title: Some(format!("{} ({:.2})", level.ratio, level.price)),
                    style: LineStyle::Dotted,
                });
            }
            if let Some((start, end)) = zigzag.last_leg() {
                result.boxes.push(BoxDrawing {
                    left: times[start.index],
                    top: start.value.max(end.value),
                    right: times[end.index],
                    bottom: start.value.min(end.value),
                    border_color: Color::ORANGE,
                    background: Some(Color::ORANGE.with_alpha(0x1a)),
                    text: None,
                });
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivots::FIB_RATIOS;

    fn swing_bars() -> Vec<Bar> {
        // peaks at 10 and 50 (second higher), troughs at 30 and 70 (second higher)
        let path = |i: usize| -> f64 {
            match i {
                0..=10 => 100.0 + i as f64,
                11..=30 => 110.0 - (i - 10) as f64,
                31..=50 => 90.0 + (i - 30) as f64 * 1.5,
                51..=70 => 120.0 - (i - 50) as f64,
                _ => 100.0 + (i - 70) as f64 * 0.5,
            }
        };
        (0..90)
            .map(|i| {
                let c = path(i);
                Bar::new(i as i64 * 60, c, c + 0.5, c - 0.5, c)
            })
            .collect()
    }

    #[test]
    fn test_zigzag_labels_and_lines() {
        let bars = swing_bars();
        let result = ZigZagFib::new().calculate(&bars).unwrap();
        let texts: Vec<&str> = result.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["H", "L", "HH", "HL"]);
        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.lines[0].x1, 600);
        assert_eq!(result.plots["pivot_high"][10].value, 110.5);
    }

    #[test]
    fn test_fib_on_last_leg() {
        let bars = swing_bars();
        let result = ZigZagFib::new().calculate(&bars).unwrap();
        assert_eq!(result.hlines.len(), FIB_RATIOS.len());
        // last leg: high 120.5 at 50 down to low 99.5 at 70
        assert!((result.hlines[0].price - 99.5).abs() < 1e-9);
        assert!((result.hlines[6].price - 120.5).abs() < 1e-9);

        assert_eq!(result.boxes.len(), 1);
        let leg = &result.boxes[0];
        assert_eq!((leg.left, leg.right), (3000, 4200));
        assert_eq!((leg.top, leg.bottom), (120.5, 99.5));
        assert_eq!(leg.background.as_ref().map(Color::as_str), Some("#ff98001a"));
    }

    #[test]
    fn test_fib_toggle_hides_levels_and_box() {
        let result = ZigZagFib::new()
            .show_fib(false)
            .calculate(&swing_bars())
            .unwrap();
        assert!(result.hlines.is_empty());
        assert!(result.boxes.is_empty());
        assert_eq!(result.lines.len(), 3);
    }

    #[test]
    fn test_flat_input_has_no_pivots() {
        let bars: Vec<Bar> = (0..30).map(|i| Bar::new(i, 1.0, 1.0, 1.0, 1.0)).collect();
        let result = ZigZagFib::new().calculate(&bars).unwrap();
        assert!(result.lines.is_empty());
        assert!(result.hlines.is_empty());
        assert!(result.boxes.is_empty());
    }
}
