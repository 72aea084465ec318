use crate::domain::ports::market_data::PricePoint;
use crate::domain::values::history_period::HistoryPeriod;
use crate::domain::values::symbol::Symbol;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub period: HistoryPeriod,
    pub points: Vec<PricePoint>,
}

/// Aggregate figures over a whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub first: f64,
    pub last: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// A series together with its summary, as printed by `history --json`.
#[derive(Debug, Serialize)]
pub struct SeriesReport<'a> {
    #[serde(flatten)]
    pub series: &'a PriceSeries,
    pub summary: Option<SeriesSummary>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, period: HistoryPeriod, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        points.sort_by_key(|p| p.date);
        Self {
            symbol,
            period,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let first = self.points.first()?.close;
        let last = self.points.last()?.close;
        let (high, low) = self
            .points
            .iter()
            .fold((f64::MIN, f64::MAX), |(hi, lo), p| (hi.max(p.close), lo.min(p.close)));
        let change = last - first;
        let percent_change = if first > 0.0 {
            change / first * 100.0
        } else {
            0.0
        };
        Some(SeriesSummary {
            first,
            last,
            high,
            low,
            change,
            percent_change,
        })
    }

    pub fn report(&self) -> SeriesReport<'_> {
        SeriesReport {
            series: self,
            summary: self.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            close,
        }
    }

    #[test]
    fn test_summary() {
        let series = PriceSeries::new(
            Symbol::parse("AAPL").unwrap(),
            HistoryPeriod::OneMonth,
            vec![point(3, 100.0), point(4, 120.0), point(5, 90.0), point(6, 110.0)],
        );
        let s = series.summary().unwrap();
        assert_eq!(s.first, 100.0);
        assert_eq!(s.last, 110.0);
        assert_eq!(s.high, 120.0);
        assert_eq!(s.low, 90.0);
        assert!((s.percent_change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_sorted_by_date() {
        let series = PriceSeries::new(
            Symbol::parse("AAPL").unwrap(),
            HistoryPeriod::FiveDays,
            vec![point(6, 3.0), point(3, 1.0), point(4, 2.0)],
        );
        let closes: Vec<f64> = series.points.iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zero_first_close_guarded() {
        let series = PriceSeries::new(
            Symbol::parse("X").unwrap(),
            HistoryPeriod::FiveDays,
            vec![point(3, 0.0), point(4, 5.0)],
        );
        assert_eq!(series.summary().unwrap().percent_change, 0.0);
    }

    #[test]
    fn test_report_json_carries_summary() {
        let series = PriceSeries::new(
            Symbol::parse("aapl").unwrap(),
            HistoryPeriod::FiveDays,
            vec![point(3, 100.0), point(4, 105.0)],
        );
        let json = serde_json::to_value(series.report()).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["points"][0]["date"], "2025-03-03");
        assert_eq!(json["summary"]["high"], 105.0);
        assert_eq!(json["summary"]["percent_change"], 5.0);

        let empty = PriceSeries::new(Symbol::parse("X").unwrap(), HistoryPeriod::Max, vec![]);
        let json = serde_json::to_value(empty.report()).unwrap();
        assert!(json["summary"].is_null());
    }

    #[test]
    fn test_empty_series_has_no_summary() {
        let series = PriceSeries::new(Symbol::parse("X").unwrap(), HistoryPeriod::Max, vec![]);
        assert!(series.is_empty());
        assert!(series.summary().is_none());
    }
}
