//! What the host renderer draws for the current sheet state.

use crate::config::{IndicatorPosition, ResolvedConfig};
use crate::geometry::PixelOffset;
use crate::style::Color;

const SHEET_RADIUS: f32 = 16.0;
const CONTENT_RADIUS: f32 = 12.0;

/// Drop shadow applied to whichever layer carries elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_y: f32,
    pub opacity: f32,
    pub blur_radius: f32,
    pub elevation: f32,
}

impl Shadow {
    pub const SHEET: Shadow = Shadow {
        color: Color::BLACK,
        offset_y: 20.0,
        opacity: 0.9,
        blur_radius: 10.0,
        elevation: 22.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFrame {
    pub background: Color,
    pub corner_radius: f32,
    pub shadow: Option<Shadow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropFrame {
    pub color: Color,
    pub opacity: f32,
}

/// Everything needed to draw the sheet for one frame.
///
/// `sheet_layer` is translated by `offset` and hosts the drag indicator;
/// `content_layer` is the card holding the caller's content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetFrame {
    pub offset: PixelOffset,
    pub visible: bool,
    pub backdrop: Option<BackdropFrame>,
    pub sheet_layer: LayerFrame,
    pub content_layer: LayerFrame,
    pub indicator_color: Color,
}

pub(crate) fn project(
    config: &ResolvedConfig,
    offset: PixelOffset,
    visible: bool,
    backdrop_opacity: Option<f32>,
) -> SheetFrame {
    let style = &config.style;
    let under = config.indicator_position == Some(IndicatorPosition::Under);
    let over = config.indicator_position == Some(IndicatorPosition::Over);
    let shadow = |enabled: bool| (style.sheet.shadow && enabled).then_some(Shadow::SHEET);

    let sheet_layer = LayerFrame {
        background: if under {
            style.sheet.background
        } else {
            Color::TRANSPARENT
        },
        corner_radius: style.sheet.radius.unwrap_or(SHEET_RADIUS),
        shadow: shadow(under),
    };
    let content_layer = LayerFrame {
        background: style.sheet.background,
        corner_radius: style.sheet.radius.unwrap_or(CONTENT_RADIUS),
        shadow: shadow(over),
    };
    let indicator_color = match style.indicator.color {
        Some(color) => color,
        None if under => Color::BLACK,
        None => Color::WHITE,
    };
    let backdrop = backdrop_opacity
        .filter(|_| visible)
        .map(|opacity| BackdropFrame {
            color: style.backdrop.background,
            opacity,
        });

    SheetFrame {
        offset,
        visible,
        backdrop,
        sheet_layer,
        content_layer,
        indicator_color,
    }
}

#[cfg(test)]
#[path = "tests/projection_tests.rs"]
mod tests;
