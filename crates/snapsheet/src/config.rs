use snapsheet_animation::SpringSpec;

use crate::error::ConfigurationError;
use crate::geometry::{Geometry, PixelOffset, SnapPoints};
use crate::style::SheetStyle;

/// Vertical movement (px) a drag must exceed before it displaces the sheet.
pub const DEFAULT_DRAG_SLOP: f32 = 5.0;

/// Which layer draws on top of the drag indicator.
///
/// This is rendering policy only: it decides where the background and shadow
/// go in the [`SheetFrame`](crate::SheetFrame), never how the sheet moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorPosition {
    /// Indicator floats over a transparent sheet, above the content card.
    Over,
    /// Indicator sits on the sheet background, under which the content continues.
    Under,
}

/// Sheet configuration as supplied by the host.
///
/// Nothing is validated until the config is handed to
/// [`BottomSheet::new`](crate::BottomSheet::new) or
/// [`BottomSheet::reconfigure`](crate::BottomSheet::reconfigure).
#[derive(Clone, Debug, PartialEq)]
pub struct SheetConfig {
    pub screen_height: f32,
    /// Snap points as `"NN%"` strings, in any order.
    pub points: Vec<String>,
    /// Snap point used by [`open`](crate::BottomSheet::open).
    pub index: usize,
    /// Persistent peek percentage. When set the sheet never fully hides and
    /// no backdrop is drawn.
    pub visible: Option<String>,
    pub style: SheetStyle,
    pub indicator_position: Option<IndicatorPosition>,
    pub spring: SpringSpec,
    pub drag_slop: f32,
}

impl SheetConfig {
    pub fn new<I, S>(screen_height: f32, points: I, index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            screen_height,
            points: points.into_iter().map(Into::into).collect(),
            index,
            visible: None,
            style: SheetStyle::default(),
            indicator_position: None,
            spring: SpringSpec::sheet(),
            drag_slop: DEFAULT_DRAG_SLOP,
        }
    }

    pub fn with_peek(mut self, visible: impl Into<String>) -> Self {
        self.visible = Some(visible.into());
        self
    }

    pub fn with_style(mut self, style: SheetStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_indicator_position(mut self, position: IndicatorPosition) -> Self {
        self.indicator_position = Some(position);
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_drag_slop(mut self, slop: f32) -> Self {
        self.drag_slop = slop;
        self
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedConfig, ConfigurationError> {
        if !self.screen_height.is_finite() || self.screen_height <= 0.0 {
            return Err(ConfigurationError::InvalidScreenHeight(self.screen_height));
        }
        let geometry = Geometry::new(self.screen_height);
        let points = SnapPoints::from_percentages(&geometry, self.points.as_slice())?;
        if self.index >= points.len() {
            return Err(ConfigurationError::InvalidIndex {
                index: self.index,
                len: points.len(),
            });
        }
        let peek = match &self.visible {
            Some(visible) => Some(
                geometry
                    .percentage_to_offset(visible)
                    .ok_or_else(|| ConfigurationError::InvalidPeek(visible.clone()))?,
            ),
            None => None,
        };
        Ok(ResolvedConfig {
            geometry,
            points,
            index: self.index,
            peek,
            style: self.style,
            indicator_position: self.indicator_position,
            spring: self.spring,
            drag_slop: self.drag_slop.max(0.0),
        })
    }
}

/// A validated [`SheetConfig`] with every percentage converted to pixels.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedConfig {
    pub geometry: Geometry,
    pub points: SnapPoints,
    pub index: usize,
    pub peek: Option<PixelOffset>,
    pub style: SheetStyle,
    pub indicator_position: Option<IndicatorPosition>,
    pub spring: SpringSpec,
    pub drag_slop: f32,
}

impl ResolvedConfig {
    /// Where [`close`](crate::BottomSheet::close) sends the sheet.
    pub fn closed_offset(&self) -> PixelOffset {
        self.peek.unwrap_or_else(|| self.geometry.hidden_offset())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
