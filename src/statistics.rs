//! Descriptive statistics over a fixed, in-memory sample set.
//!
//! A [`Statistics`] value owns its samples and answers independent queries
//! (mean, median, mode, percentile, standard deviation). Queries never touch
//! the stored order; the ones that need ordering sort a private copy.

use tracing::debug;

use crate::error::StatsError;

/// Fractional ranks closer to an integer than this are read as exact.
const RANK_EPSILON: f64 = 1e-9;

/// How [`Statistics::percentile_with`] reads an input of exactly `1`.
///
/// Inputs in `(0, 1)` are fractions and inputs in `(1, 100]` are
/// percentages. `1` itself sits between both ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentileBoundary {
    /// `1` matches neither range and degrades to `0`.
    #[default]
    Sentinel,
    /// `1` is the fraction `1.0`, i.e. the largest sample.
    WholeFraction,
}

impl PercentileBoundary {
    /// Maps a caller-supplied rank onto a fraction in `(0, 1]`, or `None`
    /// when the input is out of range.
    fn normalize(self, p: f64) -> Option<f64> {
        if 0.0 < p && p < 1.0 {
            Some(p)
        } else if p == 1.0 && self == PercentileBoundary::WholeFraction {
            Some(1.0)
        } else if 1.0 < p && p <= 100.0 {
            Some(p * 0.01)
        } else {
            None
        }
    }
}

/// Calculator over an immutable sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    samples: Vec<f64>,
}

impl Statistics {
    /// Stores `samples` as given. Empty input is accepted; queries then
    /// report [`StatsError::EmptyDataset`].
    pub fn new<I, T>(samples: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Statistics {
            samples: samples.into_iter().map(Into::into).collect(),
        }
    }

    /// Like [`Statistics::new`], but rejects empty input and non-finite
    /// values up front.
    pub fn try_new<I, T>(samples: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let stats = Self::new(samples);
        if stats.samples.is_empty() {
            return Err(StatsError::InvalidArgument(
                "at least one sample is required".into(),
            ));
        }
        if let Some((i, v)) = stats
            .samples
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(StatsError::InvalidArgument(format!(
                "sample {i} is not a finite number: {v}"
            )));
        }
        Ok(stats)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn non_empty(&self) -> Result<&[f64], StatsError> {
        if self.samples.is_empty() {
            Err(StatsError::EmptyDataset)
        } else {
            Ok(&self.samples)
        }
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    /// Sum of all samples divided by their count.
    pub fn mean(&self) -> Result<f64, StatsError> {
        let data = self.non_empty()?;
        Ok(data.iter().sum::<f64>() / data.len() as f64)
    }

    /// The middle value of the sorted samples. For an even count the two
    /// central values are averaged.
    pub fn median(&self) -> Result<f64, StatsError> {
        let n = self.non_empty()?.len();
        let sorted = self.sorted();
        let mid = n / 2;
        if n % 2 == 0 {
            Ok((sorted[mid] + sorted[mid - 1]) / 2.0)
        } else {
            Ok(sorted[mid])
        }
    }

    /// The most frequent value.
    ///
    /// When several values share the highest count, the smallest of them
    /// is returned.
    pub fn mode(&self) -> Result<f64, StatsError> {
        self.non_empty()?;
        let sorted = self.sorted();

        let mut best = (sorted[0], 0usize);
        let mut run = (sorted[0], 0usize);
        for &v in &sorted {
            if v == run.0 {
                run.1 += 1;
            } else {
                run = (v, 1);
            }
            // strictly greater: earlier (smaller) values win ties
            if run.1 > best.1 {
                best = run;
            }
        }
        debug!(value = best.0, count = best.1, "mode");
        Ok(best.0)
    }

    /// Percentile with linear interpolation between adjacent ranks.
    ///
    /// `p` is a fraction in `(0, 1)` or a percentage in `(1, 100]`. Any other
    /// input, including exactly `1`, yields `Ok(0.0)`. See
    /// [`Statistics::percentile_with`] for reading `1` as the maximum.
    ///
    /// ```
    /// use sample_stats::Statistics;
    /// let ages = Statistics::new([5, 31, 43, 48, 50, 41, 7, 11, 15, 39, 80,
    ///                             82, 32, 2, 8, 6, 25, 36, 27, 61, 31]);
    /// assert_eq!(ages.percentile(75.0), Ok(43.0));
    /// assert_eq!(ages.percentile(101.0), Ok(0.0));
    /// ```
    pub fn percentile(&self, p: f64) -> Result<f64, StatsError> {
        self.percentile_with(p, PercentileBoundary::Sentinel)
    }

    /// [`Statistics::percentile`] with an explicit reading of `p == 1`.
    pub fn percentile_with(&self, p: f64, boundary: PercentileBoundary) -> Result<f64, StatsError> {
        let Some(fraction) = boundary.normalize(p) else {
            debug!(p, ?boundary, "percentile out of range, returning 0");
            return Ok(0.0);
        };
        let n = self.non_empty()?.len();

        let rank = (n - 1) as f64 * fraction;
        let i = rank.trunc() as usize;
        let f = rank - rank.trunc();
        let sorted = self.sorted();

        if f.abs() < RANK_EPSILON {
            return Ok(sorted[i]);
        }
        match sorted.get(i + 1) {
            Some(next) => Ok(sorted[i] + f * (next - sorted[i])),
            None => Ok(sorted[i]),
        }
    }

    /// Mean of squared deviations from the mean, divided by `n` for a
    /// population or `n - 1` for a sample.
    pub fn variance(&self, sample: bool) -> Result<f64, StatsError> {
        let n = self.len();
        if n == 0 {
            return Err(StatsError::EmptyDataset);
        }
        if sample && n == 1 {
            return Err(StatsError::InsufficientSampleSize {
                required: 2,
                actual: n,
            });
        }

        let mean = self.mean()?;
        let mut carry = 0.0;
        for v in &self.samples {
            let d = v - mean;
            carry += d * d;
        }
        let divisor = if sample { n - 1 } else { n };
        Ok(carry / divisor as f64)
    }

    /// Population (`sample == false`) or sample standard deviation.
    pub fn std(&self, sample: bool) -> Result<f64, StatsError> {
        Ok(self.variance(sample)?.sqrt())
    }
}

impl<T: Into<f64>> FromIterator<T> for Statistics {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Statistics::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const GRADES: [i32; 13] = [99, 86, 87, 88, 111, 86, 103, 87, 94, 78, 77, 85, 86];
    const AGES: [i32; 21] = [
        5, 31, 43, 48, 50, 41, 7, 11, 15, 39, 80, 82, 32, 2, 8, 6, 25, 36, 27, 61, 31,
    ];
    const SPEEDS: [i32; 7] = [86, 87, 88, 86, 87, 85, 86];

    #[test]
    fn test_new_keeps_insertion_order() {
        let stats = Statistics::new([3.0, 1.0, 2.0]);
        assert_eq!(stats.samples(), &[3.0, 1.0, 2.0]);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_try_new_rejects_empty() {
        let result = Statistics::try_new(Vec::<f64>::new());
        assert!(matches!(result, Err(StatsError::InvalidArgument(_))));
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Statistics::try_new([1.0, bad]);
            assert!(
                matches!(result, Err(StatsError::InvalidArgument(_))),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_collect_from_iterator() {
        let stats: Statistics = (1u8..=4).collect();
        assert_eq!(stats.mean(), Ok(2.5));
    }

    #[test]
    fn test_mean() {
        assert_eq!(Statistics::new([2, 4, 6, 8]).mean(), Ok(5.0));
        assert_abs_diff_eq!(
            Statistics::new(SPEEDS).mean().unwrap(),
            605.0 / 7.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_queries_on_empty_set() {
        let stats = Statistics::new(Vec::<f64>::new());
        assert_eq!(stats.mean(), Err(StatsError::EmptyDataset));
        assert_eq!(stats.median(), Err(StatsError::EmptyDataset));
        assert_eq!(stats.mode(), Err(StatsError::EmptyDataset));
        assert_eq!(stats.percentile(50.0), Err(StatsError::EmptyDataset));
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(Statistics::new(GRADES).median(), Ok(87.0));
    }

    #[test]
    fn test_median_even_averages_center() {
        let stats = Statistics::new([77, 78, 85, 86, 86, 86, 87, 87, 94, 98, 99, 103]);
        assert_eq!(stats.median(), Ok(86.5));
        assert_eq!(Statistics::new([4.0]).median(), Ok(4.0));
    }

    #[test]
    fn test_median_does_not_reorder_samples() {
        let stats = Statistics::new(GRADES);
        stats.median().unwrap();
        stats.percentile(40.0).unwrap();
        let expected: Vec<f64> = GRADES.iter().map(|&v| v as f64).collect();
        assert_eq!(stats.samples(), expected.as_slice());
    }

    #[test]
    fn test_mode() {
        assert_eq!(Statistics::new(GRADES).mode(), Ok(86.0));
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        assert_eq!(Statistics::new([9, 3, 9, 3, 7]).mode(), Ok(3.0));
        assert_eq!(Statistics::new([5.5, 2.0, 8.0]).mode(), Ok(2.0));
    }

    #[test]
    fn test_percentile_documented_example() {
        assert_eq!(Statistics::new(AGES).percentile(75.0), Ok(43.0));
    }

    #[test]
    fn test_percentile_fraction_and_percentage_agree() {
        let stats = Statistics::new(AGES);
        assert_eq!(stats.percentile(0.75), stats.percentile(75.0));
        assert_eq!(stats.percentile(40.0), Ok(27.0));
    }

    #[test]
    fn test_percentile_interpolates() {
        // rank 3 * 0.5 = 1.5, halfway between 20 and 30
        let stats = Statistics::new([40, 10, 30, 20]);
        assert_abs_diff_eq!(stats.percentile(50.0).unwrap(), 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.percentile(0.1).unwrap(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_percentile_hundred_is_max() {
        assert_eq!(Statistics::new(AGES).percentile(100.0), Ok(82.0));
    }

    #[test]
    fn test_percentile_out_of_range_is_zero() {
        let stats = Statistics::new(AGES);
        for p in [0.0, -5.0, 100.5, 1000.0, f64::NAN] {
            assert_eq!(stats.percentile(p), Ok(0.0), "p = {p}");
        }
        assert_eq!(Statistics::new(Vec::<f64>::new()).percentile(-1.0), Ok(0.0));
    }

    #[test]
    fn test_percentile_one_boundary() {
        let stats = Statistics::new(AGES);
        assert_eq!(stats.percentile(1.0), Ok(0.0));
        assert_eq!(
            stats.percentile_with(1.0, PercentileBoundary::WholeFraction),
            Ok(82.0)
        );
        assert_eq!(
            stats.percentile_with(75.0, PercentileBoundary::WholeFraction),
            Ok(43.0)
        );
    }

    #[test]
    fn test_std_population() {
        let std = Statistics::new(SPEEDS).std(false).unwrap();
        assert_abs_diff_eq!(std, (40.0f64 / 49.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(std, 0.9035, epsilon = 1e-4);
    }

    #[test]
    fn test_std_sample() {
        let std = Statistics::new(SPEEDS).std(true).unwrap();
        assert_abs_diff_eq!(std, 0.9759, epsilon = 1e-4);
    }

    #[test]
    fn test_std_single_element() {
        let stats = Statistics::new([42.0]);
        assert_eq!(stats.std(false), Ok(0.0));
        assert_eq!(
            stats.std(true),
            Err(StatsError::InsufficientSampleSize {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_std_empty() {
        let stats = Statistics::new(Vec::<f64>::new());
        assert_eq!(stats.std(false), Err(StatsError::EmptyDataset));
        assert_eq!(stats.std(true), Err(StatsError::EmptyDataset));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let stats = Statistics::new(AGES);
        assert_eq!(stats.mean(), stats.mean());
        assert_eq!(stats.median(), stats.median());
        assert_eq!(stats.mode(), stats.mode());
        assert_eq!(stats.percentile(33.0), stats.percentile(33.0));
        assert_eq!(stats.std(true), stats.std(true));
    }
}
