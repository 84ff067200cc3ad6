use serde::{Deserialize, Serialize};

/// One chart sample. `x` is the alignment key across generations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Ordered samples of one series.
pub type Series = Vec<DataPoint>;

/// Full multi-series dataset at one point in time.
///
/// Slot index is series identity: slot `i` of one generation is matched with
/// slot `i` of the next one.
pub type Generation = Vec<Series>;

/// Closed value interval used for axis bounds.
///
/// `ValueRange::EMPTY` (`0..0`) marks a generation without data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const EMPTY: Self = Self { min: 0.0, max: 0.0 };

    /// Creates a range, swapping bounds when given in descending order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Min/max over `values`, or `EMPTY` when there are none.
    ///
    /// Non-finite values are skipped so the result is always finite.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<Self>, value| match acc {
                None => Some(Self {
                    min: value,
                    max: value,
                }),
                Some(range) => Some(Self {
                    min: range.min.min(value),
                    max: range.max.max(value),
                }),
            })
            .unwrap_or(Self::EMPTY)
    }

    /// True for `0..0`.
    ///
    /// A generation whose values are all zero is indistinguishable from a
    /// generation without data and is treated the same way.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::{DataPoint, ValueRange};

    #[test]
    fn from_values_tracks_min_and_max() {
        let range = ValueRange::from_values([3.0, -2.0, 7.5, 0.0]);
        assert_eq!(range, ValueRange::new(-2.0, 7.5));
    }

    #[test]
    fn from_values_without_finite_samples_is_empty() {
        assert!(ValueRange::from_values(std::iter::empty()).is_empty());
        assert!(ValueRange::from_values([f64::NAN, f64::INFINITY]).is_empty());
    }

    #[test]
    fn new_normalizes_descending_bounds() {
        assert_eq!(ValueRange::new(5.0, 1.0), ValueRange { min: 1.0, max: 5.0 });
    }

    #[test]
    fn data_point_from_tuple() {
        assert_eq!(DataPoint::from((1.0, 2.0)), DataPoint::new(1.0, 2.0));
        assert!(!DataPoint::new(f64::NAN, 0.0).is_finite());
    }
}
