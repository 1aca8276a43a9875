//! Renderable indicator output.
//!
//! An [`IndicatorResult`] is what every catalog indicator returns: metadata,
//! named plots with one point per input bar, and optional markers, fills,
//! reference lines, bar/background colors and drawing primitives. Maps use
//! `BTreeMap` so serialized key order is deterministic. Undefined plot
//! values are NaN in memory and `null` once serialized.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::traits::validate_same_len;

/// A CSS-style color string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    /// Bullish green.
    pub const GREEN: Self = Self::from_static("#26a69a");
    /// Bearish red.
    pub const RED: Self = Self::from_static("#ef5350");
    /// Neutral blue.
    pub const BLUE: Self = Self::from_static("#2962ff");
    /// Orange.
    pub const ORANGE: Self = Self::from_static("#ff9800");
    /// Purple.
    pub const PURPLE: Self = Self::from_static("#9c27b0");
    /// Yellow.
    pub const YELLOW: Self = Self::from_static("#ffeb3b");
    /// Teal.
    pub const TEAL: Self = Self::from_static("#00897b");
    /// Muted gray for reference lines.
    pub const GRAY: Self = Self::from_static("#787b86");
    /// White.
    pub const WHITE: Self = Self::from_static("#ffffff");

    /// Wraps a static color literal.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Wraps an owned color string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// The color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Adds an alpha channel to a `#rrggbb` color; other forms are returned
    /// unchanged.
    #[must_use]
    pub fn with_alpha(&self, alpha: u8) -> Self {
        if self.0.len() == 7 && self.0.starts_with('#') {
            Self::new(format!("{}{alpha:02x}", self.0))
        } else {
            self.clone()
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn serialize_nan_as_null<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// Display metadata of an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Full title.
    pub title: String,
    /// Short title for legends.
    pub short_title: String,
    /// Drawn on the price pane rather than in its own pane.
    pub overlay: bool,
}

impl Metadata {
    /// Creates metadata.
    #[must_use]
    pub fn new(title: impl Into<String>, short_title: impl Into<String>, overlay: bool) -> Self {
        Self {
            title: title.into(),
            short_title: short_title.into(),
            overlay,
        }
    }
}

/// One plot sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Bar time.
    pub time: i64,
    /// Value; NaN when undefined.
    #[serde(serialize_with = "serialize_nan_as_null")]
    pub value: f64,
    /// Per-point color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Where a marker sits relative to its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    /// Above the high.
    AboveBar,
    /// Below the low.
    BelowBar,
    /// On the bar.
    InBar,
}

/// Marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Circle.
    Circle,
    /// Square.
    Square,
    /// Label box pointing up.
    LabelUp,
    /// Label box pointing down.
    LabelDown,
}

/// A per-bar event marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Bar time.
    pub time: i64,
    /// Placement.
    pub position: MarkerPosition,
    /// Glyph.
    pub shape: MarkerShape,
    /// Color.
    pub color: Color,
    /// Optional caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Stroke style of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Solid.
    #[default]
    Solid,
    /// Dashed.
    Dashed,
    /// Dotted.
    Dotted,
}

/// Horizontal reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HLine {
    /// Price level.
    pub price: f64,
    /// Color.
    pub color: Color,
    /// Optional legend title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Stroke.
    pub style: LineStyle,
}

impl HLine {
    /// Dashed gray reference line, the common oscillator band style.
    #[must_use]
    pub fn reference(price: f64, title: impl Into<String>) -> Self {
        Self {
            price,
            color: Color::GRAY,
            title: Some(title.into()),
            style: LineStyle::Dashed,
        }
    }
}

/// Shaded region between two named plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    /// First plot key.
    pub plot1: String,
    /// Second plot key.
    pub plot2: String,
    /// Default color.
    pub color: Color,
    /// Per-bar color override, one entry per bar when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Option<Color>>>,
}

/// A color attached to one bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPoint {
    /// Bar time.
    pub time: i64,
    /// Color.
    pub color: Color,
}

/// Rectangle spanning a time and price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxDrawing {
    /// Left edge time.
    pub left: i64,
    /// Top price.
    pub top: f64,
    /// Right edge time.
    pub right: i64,
    /// Bottom price.
    pub bottom: f64,
    /// Outline color.
    pub border_color: Color,
    /// Fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Straight segment between two `(time, price)` anchors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDrawing {
    /// Start time.
    pub x1: i64,
    /// Start price.
    pub y1: f64,
    /// End time.
    pub x2: i64,
    /// End price.
    pub y2: f64,
    /// Color.
    pub color: Color,
    /// Stroke.
    pub style: LineStyle,
    /// Stroke width in pixels.
    pub width: u32,
    /// Continue past the second anchor.
    pub extend_right: bool,
}

/// Text label anchored at a bar and price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDrawing {
    /// Bar time.
    pub time: i64,
    /// Price anchor.
    pub price: f64,
    /// Text.
    pub text: String,
    /// Background color.
    pub color: Color,
    /// Placement relative to the anchor.
    pub position: MarkerPosition,
}

/// Everything an indicator hands to a charting surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    /// Titles and pane placement.
    pub metadata: Metadata,
    /// Named plots, one point per input bar.
    pub plots: BTreeMap<String, Vec<PlotPoint>>,
    /// Event markers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    /// Horizontal reference lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hlines: Vec<HLine>,
    /// Fills between plots.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Fill>,
    /// Candle color overrides.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bar_colors: Vec<ColorPoint>,
    /// Background color overrides.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub background_colors: Vec<ColorPoint>,
    /// Boxes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<BoxDrawing>,
    /// Line segments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineDrawing>,
    /// Labels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelDrawing>,
}

impl IndicatorResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            plots: BTreeMap::new(),
            markers: Vec::new(),
            hlines: Vec::new(),
            fills: Vec::new(),
            bar_colors: Vec::new(),
            background_colors: Vec::new(),
            boxes: Vec::new(),
            lines: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Adds a plot zipping `times` with `values`.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the slices differ in length.
    pub fn add_plot(&mut self, key: impl Into<String>, times: &[i64], values: &[f64]) -> Result<()> {
        validate_same_len(times, "times", values, "plot values")?;
        let points = times
            .iter()
            .zip(values)
            .map(|(&time, &value)| PlotPoint {
                time,
                value,
                color: None,
            })
            .collect();
        self.plots.insert(key.into(), points);
        Ok(())
    }

    /// Adds a plot with a per-point color.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the slices differ in length.
    pub fn add_colored_plot(
        &mut self,
        key: impl Into<String>,
        times: &[i64],
        values: &[f64],
        colors: &[Option<Color>],
    ) -> Result<()> {
        validate_same_len(times, "times", values, "plot values")?;
        validate_same_len(times, "times", colors, "plot colors")?;
        let points = times
            .iter()
            .zip(values)
            .zip(colors)
            .map(|((&time, &value), color)| PlotPoint {
                time,
                value,
                color: color.clone(),
            })
            .collect();
        self.plots.insert(key.into(), points);
        Ok(())
    }

    /// Adds one marker per `true` entry of `signals`.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the slices differ in length.
    pub fn add_signal_markers(
        &mut self,
        times: &[i64],
        signals: &[bool],
        position: MarkerPosition,
        shape: MarkerShape,
        color: &Color,
        text: Option<&str>,
    ) -> Result<()> {
        validate_same_len(times, "times", signals, "signals")?;
        self.markers.extend(
            times
                .iter()
                .zip(signals)
                .filter(|(_, signal)| **signal)
                .map(|(&time, _)| Marker {
                    time,
                    position,
                    shape,
                    color: color.clone(),
                    text: text.map(str::to_owned),
                }),
        );
        Ok(())
    }

    /// Values of a plot, if present.
    #[must_use]
    pub fn plot_values(&self, key: &str) -> Option<Vec<f64>> {
        self.plots
            .get(key)
            .map(|points| points.iter().map(|p| p.value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_nan_serializes_as_null() {
        let mut result = IndicatorResult::new(Metadata::new("Test", "T", true));
        result.add_plot("line", &[1, 2], &[f64::NAN, 1.5]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["plots"]["line"][0]["value"].is_null());
        assert_eq!(json["plots"]["line"][1]["value"], 1.5);
        assert!(json["plots"]["line"][0].get("color").is_none());
        // empty auxiliary arrays are omitted
        assert!(json.get("markers").is_none());
    }

    #[test]
    fn test_plot_length_mismatch() {
        let mut result = IndicatorResult::new(Metadata::new("Test", "T", false));
        assert!(result.add_plot("x", &[1, 2, 3], &[1.0]).is_err());
        assert!(result
            .add_colored_plot("x", &[1], &[1.0], &[None, None])
            .is_err());
    }

    #[test]
    fn test_signal_markers() {
        let mut result = IndicatorResult::new(Metadata::new("Test", "T", true));
        result
            .add_signal_markers(
                &[10, 20, 30],
                &[false, true, true],
                MarkerPosition::BelowBar,
                MarkerShape::ArrowUp,
                &Color::GREEN,
                Some("Buy"),
            )
            .unwrap();
        assert_eq!(result.markers.len(), 2);
        assert_eq!(result.markers[0].time, 20);
        let json = serde_json::to_value(&result.markers[0]).unwrap();
        assert_eq!(json["position"], "belowBar");
        assert_eq!(json["shape"], "arrowUp");
        assert_eq!(json["color"], "#26a69a");
    }

    #[test]
    fn test_color_alpha() {
        assert_eq!(Color::RED.with_alpha(0x40).as_str(), "#ef535040");
        let named = Color::new("red");
        assert_eq!(named.with_alpha(0x40), named);
    }

    #[test]
    fn test_box_serialization_omits_unset_fields() {
        let mut result = IndicatorResult::new(Metadata::new("Test", "T", true));
        result.boxes.push(BoxDrawing {
            left: 60,
            top: 12.0,
            right: 180,
            bottom: 10.0,
            border_color: Color::ORANGE,
            background: None,
            text: Some("leg".to_owned()),
        });
        let json = serde_json::to_value(&result).unwrap();
        let leg = &json["boxes"][0];
        assert_eq!(leg["left"], 60);
        assert_eq!(leg["bottom"], 10.0);
        assert_eq!(leg["border_color"], "#ff9800");
        assert!(leg.get("background").is_none());
        assert_eq!(leg["text"], "leg");
    }
}
