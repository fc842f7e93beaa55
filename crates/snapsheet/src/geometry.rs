//! Conversion between percentage snap points and pixel offsets.
//!
//! Offsets are measured from the top of the screen to the top edge of the
//! sheet, so a smaller offset means a more expanded sheet and the screen
//! height itself means fully hidden.

use smallvec::SmallVec;

use crate::error::PointsError;

/// Distance in pixels from the top of the screen to the sheet's top edge.
pub type PixelOffset = f32;

/// Fraction of the screen height a released drag must land within for it to
/// commit to the nearest snap point.
pub const COMMIT_THRESHOLD_FRACTION: f32 = 0.15;

/// Parses a strict `^\d+%$` percentage and returns its numeric value.
pub fn parse_percentage(value: &str) -> Option<f32> {
    let digits = value.strip_suffix('%')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<f32>().ok().filter(|pct| pct.is_finite())
}

/// Returns the index and value of the point closest to `value`.
///
/// Ties go to the point that appears first in `points`.
pub fn nearest_point(points: &[PixelOffset], value: PixelOffset) -> Option<(usize, PixelOffset)> {
    let mut best: Option<(usize, PixelOffset)> = None;
    for (index, &point) in points.iter().enumerate() {
        match best {
            Some((_, current)) if (point - value).abs() >= (current - value).abs() => {}
            _ => best = Some((index, point)),
        }
    }
    best
}

/// Screen-dependent conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    screen_height: f32,
}

impl Geometry {
    pub fn new(screen_height: f32) -> Self {
        Self { screen_height }
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    /// `screen_height * (1 - pct / 100)`, or `None` if `pct` is not a valid percentage.
    pub fn percentage_to_offset(&self, pct: &str) -> Option<PixelOffset> {
        parse_percentage(pct).map(|value| self.screen_height * (1.0 - value / 100.0))
    }

    /// Offset at which the sheet is entirely below the screen.
    pub fn hidden_offset(&self) -> PixelOffset {
        self.screen_height
    }

    pub fn commit_threshold(&self) -> PixelOffset {
        self.screen_height * COMMIT_THRESHOLD_FRACTION
    }
}

/// Configured snap points converted to pixel offsets, in caller order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    offsets: SmallVec<[PixelOffset; 4]>,
}

impl SnapPoints {
    pub fn from_percentages<S: AsRef<str>>(
        geometry: &Geometry,
        points: &[S],
    ) -> Result<Self, PointsError> {
        if points.is_empty() {
            return Err(PointsError::Empty);
        }
        let offsets = points
            .iter()
            .map(|point| {
                let point = point.as_ref();
                geometry
                    .percentage_to_offset(point)
                    .ok_or_else(|| PointsError::Malformed(point.to_owned()))
            })
            .collect::<Result<SmallVec<_>, _>>()?;
        Ok(Self { offsets })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PixelOffset> {
        self.offsets.get(index).copied()
    }

    pub fn as_slice(&self) -> &[PixelOffset] {
        &self.offsets
    }

    /// The most expanded point.
    pub fn min(&self) -> PixelOffset {
        self.offsets.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// The most collapsed point.
    pub fn max(&self) -> PixelOffset {
        self.offsets.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Last point in configuration order.
    pub fn last(&self) -> PixelOffset {
        self.offsets[self.offsets.len() - 1]
    }

    pub fn nearest(&self, value: PixelOffset) -> (usize, PixelOffset) {
        // Non-empty by construction.
        nearest_point(&self.offsets, value).unwrap_or((0, self.offsets[0]))
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
