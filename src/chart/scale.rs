#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn of(values: impl IntoIterator<Item = u64>) -> Option<Self> {
        values.into_iter().fold(None, |extent, value| {
            let value = value as f64;
            Some(match extent {
                None => Self {
                    min: value,
                    max: value,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(value),
                    max: max.max(value),
                },
            })
        })
    }

    pub fn is_degenerate(self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }
}

/// Linear map from a value extent onto an output range. A degenerate extent
/// maps everything to the middle of the range.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain: Extent,
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: Extent, range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: u64) -> f32 {
        let (low, high) = self.range;
        if self.domain.is_degenerate() {
            return (low + high) * 0.5;
        }

        let t = (value as f64 - self.domain.min) / (self.domain.max - self.domain.min);
        low + ((high - low) as f64 * t) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_of_values() {
        assert_eq!(
            Extent::of([7, 3, 12, 3]),
            Some(Extent {
                min: 3.0,
                max: 12.0
            })
        );
        assert_eq!(Extent::of(Vec::new()), None);
    }

    #[test]
    fn maps_extent_endpoints_to_range() {
        let scale = LinearScale::new(Extent::of([10, 110]).unwrap(), (2.0, 50.0));
        assert_eq!(scale.apply(10), 2.0);
        assert_eq!(scale.apply(110), 50.0);
        assert!((scale.apply(60) - 26.0).abs() < 1e-4);
    }

    #[test]
    fn radius_is_monotonic() {
        let values = [0_u64, 1, 5, 17, 300, 9_000, 1_377_422_166];
        let scale = LinearScale::new(Extent::of(values).unwrap(), (2.0, 50.0));
        for pair in values.windows(2) {
            assert!(scale.apply(pair[0]) <= scale.apply(pair[1]));
        }
    }

    #[test]
    fn degenerate_extent_uses_midpoint() {
        let scale = LinearScale::new(Extent::of([4, 4, 4]).unwrap(), (2.0, 50.0));
        let radius = scale.apply(4);
        assert!(radius.is_finite());
        assert_eq!(radius, 26.0);
    }
}
