use serde::{Deserialize, Serialize};

use crate::{Interval, Period, Symbol, UtcDateTime, ValidationError};

/// One observation of a time series. `value` is `None` when the feed marked
/// the observation missing. Consumers treat a non-finite `value` as absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub ts: UtcDateTime,
    pub value: Option<f64>,
}

impl Sample {
    /// NaN and infinities become an absent value.
    pub fn new(ts: UtcDateTime, value: Option<f64>) -> Self {
        Self {
            ts,
            value: value.filter(|v| v.is_finite()),
        }
    }

    pub fn observed(ts: UtcDateTime, value: f64) -> Self {
        Self::new(ts, Some(value))
    }

    /// The value when present and finite.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    pub const fn missing(ts: UtcDateTime) -> Self {
        Self { ts, value: None }
    }
}

/// Time-ordered observations of one instrument over one period.
///
/// Construction keeps the samples as given; ordering is checked by consumers
/// through [`Series::check_ordering`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Number of samples whose value is absent.
    pub fn missing_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|sample| sample.finite_value().is_none())
            .count()
    }

    /// Fails at the first index whose timestamp does not exceed its predecessor.
    pub fn check_ordering(&self) -> Result<(), ValidationError> {
        match self
            .samples
            .windows(2)
            .position(|pair| pair[1].ts <= pair[0].ts)
        {
            Some(position) => Err(ValidationError::UnorderedSeries {
                index: position + 1,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Closing-price history returned by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: Symbol,
    pub interval: Interval,
    pub period: Period,
    pub currency: Option<String>,
    pub closes: Series,
}

impl PriceHistory {
    pub fn new(symbol: Symbol, interval: Interval, period: Period, closes: Series) -> Self {
        Self {
            symbol,
            interval,
            period,
            currency: None,
            closes,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> UtcDateTime {
        UtcDateTime::from_unix_seconds(1_704_067_200 + n * 86_400).expect("valid day")
    }

    #[test]
    fn observed_maps_non_finite_to_missing() {
        assert_eq!(Sample::observed(day(0), f64::NAN).value, None);
        assert_eq!(Sample::observed(day(0), f64::INFINITY).value, None);
        assert_eq!(Sample::observed(day(0), 4.5).value, Some(4.5));
    }

    #[test]
    fn ordering_check_reports_first_offender() {
        let series: Series = [day(0), day(1), day(1), day(0)]
            .into_iter()
            .map(|ts| Sample::observed(ts, 1.0))
            .collect();

        assert_eq!(
            series.check_ordering(),
            Err(ValidationError::UnorderedSeries { index: 2 })
        );
    }

    #[test]
    fn empty_and_single_series_are_ordered() {
        assert!(Series::default().check_ordering().is_ok());
        assert!(Series::new(vec![Sample::missing(day(3))]).check_ordering().is_ok());
    }

    #[test]
    fn serializes_missing_values_as_null() {
        let series = Series::new(vec![Sample::observed(day(0), 2.0), Sample::missing(day(1))]);
        let json = serde_json::to_value(&series).expect("serializable");
        assert_eq!(json[0]["value"], serde_json::json!(2.0));
        assert!(json[1]["value"].is_null());
    }
}
