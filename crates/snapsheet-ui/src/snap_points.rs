//! Resting heights of the sheet, as fractions of the screen height.

use smallvec::SmallVec;

use crate::error::ConfigurationError;

/// Validated, strictly ascending list of snap fractions in `(0, 1]`.
///
/// Index 0 doubles as the near-dismiss threshold: gesture resolution never
/// leaves the sheet resting there (see [`SnapResolver`](crate::SnapResolver)).
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    points: SmallVec<[f32; 4]>,
}

impl SnapPoints {
    pub fn new(points: &[f32]) -> Result<Self, ConfigurationError> {
        Self::validate(points)?;
        Ok(Self {
            points: SmallVec::from_slice(points),
        })
    }

    pub fn validate(points: &[f32]) -> Result<(), ConfigurationError> {
        if points.is_empty() {
            return Err(ConfigurationError::EmptySnapPoints);
        }
        for (index, &value) in points.iter().enumerate() {
            // Written so that NaN fails too.
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigurationError::SnapPointOutOfRange { index, value });
            }
            if index > 0 {
                let previous = points[index - 1];
                if value == previous {
                    return Err(ConfigurationError::DuplicateSnapPoint { index });
                }
                if value < previous {
                    return Err(ConfigurationError::SnapPointsNotAscending { index });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.points.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.points
    }

    /// Vertical offset of the sheet's top edge when resting at `index`.
    ///
    /// Panics if `index` is out of range; callers validate indices first.
    pub fn offset_for(&self, index: usize, screen_height: f32) -> f32 {
        screen_height * (1.0 - self.points[index])
    }

    /// Visible fraction for a given top-edge offset, clamped to `[0, 1]`.
    /// An undefined offset reads as closed.
    pub fn fraction_for_offset(offset: f32, screen_height: f32) -> f32 {
        let fraction = 1.0 - offset / screen_height;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }

    /// Index whose fraction is closest to `fraction`; the lowest index wins ties.
    pub fn nearest_index(&self, fraction: f32) -> usize {
        let mut nearest = 0;
        let mut nearest_distance = (self.points[0] - fraction).abs();
        for (index, point) in self.points.iter().enumerate().skip(1) {
            let distance = (point - fraction).abs();
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }
        nearest
    }
}
