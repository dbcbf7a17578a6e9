use serde::{Deserialize, Serialize};

/// One observation of a metric: epoch seconds and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub t: i64,
    pub v: f64,
}

impl SeriesPoint {
    pub const fn new(t: i64, v: f64) -> Self {
        Self { t, v }
    }
}

/// Observations for one metric/asset pair, oldest first.
///
/// Ordering is whatever the remote source returned. Consumers treat the
/// first element as the oldest and the last as the current value;
/// [`Series::is_chronological`] reports whether that assumption holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    /// `true` when timestamps never decrease.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|pair| pair[0].t <= pair[1].t)
    }
}

impl From<Vec<SeriesPoint>> for Series {
    fn from(points: Vec<SeriesPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<SeriesPoint> for Series {
    fn from_iter<I: IntoIterator<Item = SeriesPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_array_of_points() {
        let series = Series::new(vec![SeriesPoint::new(1, 10.0), SeriesPoint::new(2, 30.5)]);
        let json = serde_json::to_string(&series).expect("serialize");
        assert_eq!(json, r#"[{"t":1,"v":10.0},{"t":2,"v":30.5}]"#);
    }

    #[test]
    fn detects_out_of_order_timestamps() {
        let ordered: Series = [SeriesPoint::new(1, 1.0), SeriesPoint::new(1, 2.0)]
            .into_iter()
            .collect();
        assert!(ordered.is_chronological());

        let shuffled = Series::new(vec![SeriesPoint::new(5, 1.0), SeriesPoint::new(2, 2.0)]);
        assert!(!shuffled.is_chronological());
        assert!(Series::default().is_chronological());
    }
}
