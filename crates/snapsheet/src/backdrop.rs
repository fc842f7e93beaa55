use crate::geometry::PixelOffset;

/// Maps the sheet offset to backdrop opacity.
///
/// Opacity is `max_opacity` when the sheet rests at `from` (the last
/// configured snap point), falls linearly to zero at `to` (the hidden offset)
/// and is clamped outside that range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropRange {
    pub from: PixelOffset,
    pub to: PixelOffset,
    pub max_opacity: f32,
}

impl BackdropRange {
    pub fn new(from: PixelOffset, to: PixelOffset, max_opacity: f32) -> Self {
        Self {
            from,
            to,
            max_opacity,
        }
    }

    pub fn opacity_at(&self, offset: PixelOffset) -> f32 {
        let span = self.to - self.from;
        if span.abs() <= f32::EPSILON {
            return if offset < self.to { self.max_opacity } else { 0.0 };
        }
        let fraction = ((self.to - offset) / span).clamp(0.0, 1.0);
        fraction * self.max_opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_last_point_and_hidden() {
        let range = BackdropRange::new(300.0, 1000.0, 0.5);
        assert_eq!(range.opacity_at(300.0), 0.5);
        assert_eq!(range.opacity_at(1000.0), 0.0);
        assert!((range.opacity_at(650.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn clamps_outside_range() {
        let range = BackdropRange::new(300.0, 1000.0, 0.8);
        assert_eq!(range.opacity_at(0.0), 0.8);
        assert_eq!(range.opacity_at(-200.0), 0.8);
        assert_eq!(range.opacity_at(1400.0), 0.0);
    }

    #[test]
    fn degenerate_range_is_a_step() {
        let range = BackdropRange::new(1000.0, 1000.0, 0.5);
        assert_eq!(range.opacity_at(1000.0), 0.0);
        assert_eq!(range.opacity_at(999.0), 0.5);
    }
}
