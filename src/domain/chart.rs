// Chart and metric data domain models
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// Headline value with an optional change annotation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTile {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
    pub delta: Option<f64>,
    pub delta_label: Option<String>,
    /// A falling value is good news (e.g. unemployment).
    pub inverse_delta: bool,
}

impl MetricTile {
    pub fn new(id: &str, title: &str, unit: &str, value: f64, precision: i32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            precision,
            delta: None,
            delta_label: None,
            inverse_delta: false,
        }
    }

    pub fn with_delta(mut self, delta: Option<f64>, label: &str) -> Self {
        self.delta_label = delta.map(|_| label.to_string());
        self.delta = delta;
        self
    }

    pub fn inverse(mut self) -> Self {
        self.inverse_delta = true;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: &str, name: &str, color: Option<&str>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            points,
        }
    }
}

/// One labelled slice or bar of a categorical chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

impl CategoryValue {
    pub fn new(label: &str, value: f64, color: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: color.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    MultiLine,
    Area,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn is_categorical(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Pie)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub fraction_digits: Option<i32>,
    /// Reference line drawn across the chart (e.g. zero growth).
    pub baseline: Option<f64>,
    pub series: Vec<SeriesData>,
    pub categories: Vec<CategoryValue>,
}

impl ChartData {
    pub fn time_series(id: &str, title: &str, unit: Option<&str>, kind: ChartKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            kind,
            y_min: None,
            y_max: None,
            fraction_digits: None,
            baseline: None,
            series: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn categorical(id: &str, title: &str, unit: Option<&str>, kind: ChartKind) -> Self {
        Self::time_series(id, title, unit, kind)
    }

    pub fn with_series(mut self, series: SeriesData) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryValue>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_bounds(mut self, y_min: Option<f64>, y_max: Option<f64>) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    pub fn with_fraction_digits(mut self, digits: i32) -> Self {
        self.fraction_digits = Some(digits);
        self
    }

    pub fn is_empty(&self) -> bool {
        if self.kind.is_categorical() {
            self.categories.is_empty()
        } else {
            self.series.iter().all(|s| s.points.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_delta_label_only_when_delta_present() {
        let tile = MetricTile::new("gdp", "Croissance", "%", 2.8, 1).with_delta(None, "vs mois précédent");
        assert!(tile.delta_label.is_none());

        let tile = MetricTile::new("gdp", "Croissance", "%", 2.8, 1)
            .with_delta(Some(0.2), "vs mois précédent")
            .inverse();
        assert_eq!(tile.delta, Some(0.2));
        assert!(tile.inverse_delta);
    }

    #[test]
    fn test_chart_emptiness_depends_on_kind() {
        let line = ChartData::time_series("g", "Growth", Some("%"), ChartKind::Line)
            .with_series(SeriesData::new("g", "Growth", None, vec![]));
        assert!(line.is_empty());

        let pie = ChartData::categorical("p", "Mix", None, ChartKind::Pie)
            .with_categories(vec![CategoryValue::new("Solaire", 1.0, Some("#FFD100"))]);
        assert!(!pie.is_empty());
    }

    #[test]
    fn test_chart_serializes_camel_case() {
        let chart = ChartData::time_series("g", "Growth", None, ChartKind::MultiLine).with_fraction_digits(1);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "multiLine");
        assert_eq!(json["fractionDigits"], 1);
    }
}
