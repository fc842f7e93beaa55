//! Passive styling data carried through to the render projection.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

/// Sheet surface styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceStyle {
    pub background: Color,
    /// Top corner radius; layers fall back to their own defaults when unset.
    pub radius: Option<f32>,
    pub shadow: bool,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            radius: None,
            shadow: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropStyle {
    pub background: Color,
    /// Opacity of the backdrop when the sheet rests at its last snap point.
    pub opacity: Option<f32>,
}

impl BackdropStyle {
    pub const DEFAULT_OPACITY: f32 = 0.5;

    pub fn max_opacity(&self) -> f32 {
        self.opacity.unwrap_or(Self::DEFAULT_OPACITY)
    }
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            opacity: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndicatorStyle {
    pub color: Option<Color>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SheetStyle {
    pub sheet: SurfaceStyle,
    pub backdrop: BackdropStyle,
    pub indicator: IndicatorStyle,
}

impl SheetStyle {
    pub fn with_background(mut self, background: Color) -> Self {
        self.sheet.background = background;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.sheet.radius = Some(radius);
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.sheet.shadow = shadow;
        self
    }

    pub fn with_backdrop(mut self, background: Color, opacity: f32) -> Self {
        self.backdrop = BackdropStyle {
            background,
            opacity: Some(opacity),
        };
        self
    }

    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.indicator.color = Some(color);
        self
    }
}
