use std::collections::BTreeMap;

use netevents_core::EventType;

/// Chi-square critical value for 3 degrees of freedom at significance 0.001.
pub const CHI_SQUARE_CRITICAL_3DF: f64 = 16.266;

/// Running count of event types in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHistogram {
    counts: [u64; EventType::ALL.len()],
}

impl TypeHistogram {
    pub fn record(&mut self, kind: EventType) {
        self.counts[slot(kind)] += 1;
    }

    pub fn count(&self, kind: EventType) -> u64 {
        self.counts[slot(kind)]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Pearson chi-square statistic against the fixed type distribution.
    pub fn chi_square(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        EventType::ALL
            .iter()
            .map(|kind| {
                let expected = total * kind.expected_share();
                let diff = self.count(*kind) as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Whether the counts are consistent with the fixed distribution.
    pub fn fits_distribution(&self) -> bool {
        self.total() > 0 && self.chi_square() < CHI_SQUARE_CRITICAL_3DF
    }

    /// Counts keyed by type code, for reports.
    pub fn to_code_map(&self) -> BTreeMap<String, u64> {
        EventType::ALL
            .iter()
            .map(|kind| (kind.code().to_string(), self.count(*kind)))
            .collect()
    }
}

impl FromIterator<EventType> for TypeHistogram {
    fn from_iter<I: IntoIterator<Item = EventType>>(iter: I) -> Self {
        let mut histogram = TypeHistogram::default();
        for kind in iter {
            histogram.record(kind);
        }
        histogram
    }
}

fn slot(kind: EventType) -> usize {
    match kind {
        EventType::Standard => 0,
        EventType::Premium => 1,
        EventType::International => 2,
        EventType::ComplexRouting => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_proportions_have_zero_statistic() {
        let mut histogram = TypeHistogram::default();
        for (kind, count) in EventType::ALL.into_iter().zip([15, 20, 20, 45]) {
            for _ in 0..count * 10 {
                histogram.record(kind);
            }
        }
        assert_eq!(histogram.total(), 1000);
        assert!(histogram.chi_square().abs() < 1e-9);
        assert!(histogram.fits_distribution());
    }

    #[test]
    fn uniform_types_do_not_fit() {
        let histogram: TypeHistogram = EventType::ALL
            .into_iter()
            .cycle()
            .take(4000)
            .collect();
        assert!(histogram.chi_square() > CHI_SQUARE_CRITICAL_3DF);
        assert!(!histogram.fits_distribution());
    }

    #[test]
    fn empty_histogram_reports_zero() {
        let histogram = TypeHistogram::default();
        assert_eq!(histogram.chi_square(), 0.0);
        assert!(!histogram.fits_distribution());
        assert_eq!(histogram.to_code_map().get("5"), Some(&0));
    }
}
