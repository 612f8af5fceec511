//! Report history with derived weight metrics
//!
//! `last_weight` and `percentage_change` are always computed against
//! chronological order. Display order is applied afterwards, never before,
//! otherwise each report would be compared with its successor.

use crate::models::{DisplayOrder, Report, ReportHistoryEntry};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on `percentage_change`
pub const PERCENTAGE_PRECISION: u32 = 1;

/// Build the history list for one user from an unordered set of reports
pub fn compute_history<I>(reports: I, order: DisplayOrder) -> Vec<ReportHistoryEntry>
where
    I: IntoIterator<Item = Report>,
{
    let mut sorted: Vec<Report> = reports.into_iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut entries: Vec<ReportHistoryEntry> = with_derived_metrics(sorted).collect();
    if order == DisplayOrder::NewestFirst {
        entries.reverse();
    }
    entries
}

/// Attach derived metrics to reports that are already in chronological order
///
/// Lazy, so a paginated source can feed it page by page as long as the
/// pages arrive oldest first.
pub fn with_derived_metrics<I>(reports: I) -> DerivedMetrics<I::IntoIter>
where
    I: IntoIterator<Item = Report>,
{
    DerivedMetrics {
        inner: reports.into_iter(),
        last_weight: None,
    }
}

/// Iterator returned by [`with_derived_metrics`]
#[derive(Debug, Clone)]
pub struct DerivedMetrics<I> {
    inner: I,
    last_weight: Option<f64>,
}

impl<I> Iterator for DerivedMetrics<I>
where
    I: Iterator<Item = Report>,
{
    type Item = ReportHistoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let report = self.inner.next()?;
        let last_weight = self.last_weight.replace(report.weight);
        let percentage_change = last_weight.and_then(|prev| percentage_change(prev, report.weight));
        Some(ReportHistoryEntry {
            report,
            last_weight,
            percentage_change,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Percentage change from `previous` to `current`, rounded to one decimal
///
/// Returns `None` when the previous weight is zero.
pub fn percentage_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let raw = (current - previous) / previous * 100.0;
    if !raw.is_finite() {
        return None;
    }
    Some(round_percentage(raw))
}

fn round_percentage(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(PERCENTAGE_PRECISION, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| {
            let scale = 10f64.powi(PERCENTAGE_PRECISION as i32);
            (value * scale).round() / scale
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn report(id: &str, date: &str, weight: f64) -> Report {
        Report {
            id: id.to_string(),
            images: vec![],
            weight,
            custom_fields: vec![],
            date: date.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn three_reports() -> Vec<Report> {
        vec![
            report("c", "2024-03-01T00:00:00Z", 185.0),
            report("a", "2024-01-01T00:00:00Z", 200.0),
            report("b", "2024-02-01T00:00:00Z", 190.0),
        ]
    }

    #[test]
    fn test_three_report_history_oldest_first() {
        let history = compute_history(three_reports(), DisplayOrder::OldestFirst);

        assert_eq!(history[0].report.id, "a");
        assert_eq!(history[0].last_weight, None);
        assert_eq!(history[0].percentage_change, None);

        assert_eq!(history[1].report.id, "b");
        assert_eq!(history[1].last_weight, Some(200.0));
        assert_eq!(history[1].percentage_change, Some(-5.0));

        assert_eq!(history[2].report.id, "c");
        assert_eq!(history[2].last_weight, Some(190.0));
        assert_eq!(history[2].percentage_change, Some(-2.6));
    }

    #[test]
    fn test_newest_first_keeps_chronological_metrics() {
        let history = compute_history(three_reports(), DisplayOrder::NewestFirst);
        let ids: Vec<&str> = history.iter().map(|e| e.report.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);

        assert_eq!(history[0].last_weight, Some(190.0));
        assert_eq!(history[0].percentage_change, Some(-2.6));
        assert_eq!(history[2].last_weight, None);
    }

    #[test]
    fn test_same_date_breaks_tie_by_id() {
        let reports = vec![
            report("k2", "2024-01-01T00:00:00Z", 90.0),
            report("k1", "2024-01-01T00:00:00Z", 100.0),
        ];
        let history = compute_history(reports, DisplayOrder::OldestFirst);
        assert_eq!(history[0].report.id, "k1");
        assert_eq!(history[1].percentage_change, Some(-10.0));
    }

    #[test]
    fn test_zero_previous_weight_has_no_change() {
        let reports = vec![
            report("a", "2024-01-01T00:00:00Z", 0.0),
            report("b", "2024-02-01T00:00:00Z", 80.0),
        ];
        let history = compute_history(reports, DisplayOrder::OldestFirst);
        assert_eq!(history[1].last_weight, Some(0.0));
        assert_eq!(history[1].percentage_change, None);
    }

    #[test]
    fn test_empty_history() {
        assert!(compute_history(Vec::new(), DisplayOrder::NewestFirst).is_empty());
    }

    #[test]
    fn test_percentage_change_rounding() {
        assert_eq!(percentage_change(80.0, 90.0), Some(12.5));
        assert_eq!(percentage_change(3.0, 4.0), Some(33.3));
        assert_eq!(percentage_change(3.0, 2.0), Some(-33.3));
        assert_eq!(percentage_change(150.0, 150.0), Some(0.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_display_order_does_not_change_metrics(
            weights in prop::collection::vec(1.0f64..500.0, 0..30)
        ) {
            let reports: Vec<Report> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| Report {
                    id: format!("k{i:03}"),
                    images: vec![],
                    weight: *w,
                    custom_fields: vec![],
                    date: DateTime::<Utc>::from_timestamp(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
                })
                .collect();

            let forward = compute_history(reports.clone(), DisplayOrder::OldestFirst);
            let mut backward = compute_history(reports, DisplayOrder::NewestFirst);
            backward.reverse();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_each_entry_points_at_predecessor(
            weights in prop::collection::vec(1.0f64..500.0, 1..30)
        ) {
            let reports: Vec<Report> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| Report {
                    id: format!("k{i:03}"),
                    images: vec![],
                    weight: *w,
                    custom_fields: vec![],
                    date: DateTime::<Utc>::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                })
                .collect();

            let history: Vec<ReportHistoryEntry> = with_derived_metrics(reports).collect();
            prop_assert_eq!(history[0].last_weight, None);
            for pair in history.windows(2) {
                prop_assert_eq!(pair[1].last_weight, Some(pair[0].report.weight));
                prop_assert!(pair[1].percentage_change.is_some());
            }
        }
    }
}
