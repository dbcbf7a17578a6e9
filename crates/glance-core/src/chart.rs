//! Display-ready geometry for a line/area chart of a series.

use serde::Serialize;

use crate::api::ApiError;
use crate::{Series, SeriesPoint};

/// Series rebased so the lowest value sits on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    /// Points with `v - min`, so every value lies in `y_domain`.
    pub points: Vec<SeriesPoint>,
    pub x_domain: (i64, i64),
    pub y_domain: (f64, f64),
    /// Offset subtracted from every value.
    pub baseline: f64,
    /// Axis ticks at the first, middle and last timestamps.
    pub x_ticks: [i64; 3],
}

/// Builds the chart frame. An empty series yields `InsufficientData`.
pub fn chart_frame(series: &Series) -> Result<ChartFrame, ApiError> {
    let points = series.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(ApiError::insufficient_data("cannot chart an empty series"));
    };
    let middle = points[points.len() / 2];

    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
            (min.min(point.v), max.max(point.v))
        });

    Ok(ChartFrame {
        points: points
            .iter()
            .map(|point| SeriesPoint::new(point.t, point.v - min))
            .collect(),
        x_domain: (first.t, last.t),
        y_domain: (0.0, max - min),
        baseline: min,
        x_ticks: [first.t, middle.t, last.t],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    #[test]
    fn rebases_values_and_picks_ticks() {
        let series: Series = [(100, 12.0), (200, 10.0), (300, 15.0), (400, 11.0)]
            .into_iter()
            .map(|(t, v)| SeriesPoint::new(t, v))
            .collect();

        let frame = chart_frame(&series).expect("non-empty series");
        assert_eq!(frame.baseline, 10.0);
        assert_eq!(frame.y_domain, (0.0, 5.0));
        assert_eq!(frame.x_domain, (100, 400));
        assert_eq!(frame.x_ticks, [100, 300, 400]);
        assert_eq!(
            frame.points.iter().map(|p| p.v).collect::<Vec<_>>(),
            [2.0, 0.0, 5.0, 1.0]
        );
    }

    #[test]
    fn single_point_frame_is_flat() {
        let frame =
            chart_frame(&Series::new(vec![SeriesPoint::new(7, 3.0)])).expect("non-empty series");
        assert_eq!(frame.x_ticks, [7, 7, 7]);
        assert_eq!(frame.y_domain, (0.0, 0.0));
    }

    #[test]
    fn empty_series_cannot_be_charted() {
        let error = chart_frame(&Series::default()).expect_err("empty must fail");
        assert_eq!(error.kind(), ApiErrorKind::InsufficientData);
    }
}
