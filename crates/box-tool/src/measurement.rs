//! Measurement snapshots and their formatted labels.

use serde::{Deserialize, Serialize};

use crate::params::BoxParameters;
use crate::refine::EmptyVolumeGrid;

/// Derived values; recomputed on every read, never stored by the tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub area: f64,
    pub volume: f64,
    pub refined_volume: f64,
    pub can_refine: bool,
}

impl Measurement {
    pub fn of(params: &BoxParameters, grid: &EmptyVolumeGrid, can_refine: bool) -> Self {
        Self {
            width: params.width.abs(),
            depth: params.depth.abs(),
            height: params.height.abs(),
            area: params.area(),
            volume: params.volume(),
            refined_volume: grid.refined_volume(params),
            can_refine,
        }
    }
}

/// Turns base-unit quantities into display strings.
pub trait UnitFormatter {
    fn format_length(&self, meters: f64) -> String;
    fn format_area(&self, square_meters: f64) -> String;
    fn format_volume(&self, cubic_meters: f64) -> String;
}

/// Plain metric output with a fixed number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricFormatter {
    pub decimals: usize,
}

impl Default for MetricFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl UnitFormatter for MetricFormatter {
    fn format_length(&self, meters: f64) -> String {
        if meters.abs() >= 1000.0 {
            format!("{:.*} km", self.decimals, meters / 1000.0)
        } else {
            format!("{:.*} m", self.decimals, meters)
        }
    }

    fn format_area(&self, square_meters: f64) -> String {
        format!("{:.*} m²", self.decimals, square_meters)
    }

    fn format_volume(&self, cubic_meters: f64) -> String {
        format!("{:.*} m³", self.decimals, cubic_meters)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementLabels {
    pub width: String,
    pub depth: String,
    pub height: String,
    pub area: String,
    pub volume: String,
    pub refined_volume: String,
}

impl MeasurementLabels {
    pub fn format(values: &Measurement, formatter: &dyn UnitFormatter) -> Self {
        Self {
            width: formatter.format_length(values.width),
            depth: formatter.format_length(values.depth),
            height: formatter.format_length(values.height),
            area: formatter.format_area(values.area),
            volume: formatter.format_volume(values.volume),
            refined_volume: formatter.format_volume(values.refined_volume),
        }
    }
}

/// Payload of every notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    pub values: Measurement,
    pub labels: MeasurementLabels,
}

impl MeasurementReport {
    pub fn new(values: Measurement, formatter: &dyn UnitFormatter) -> Self {
        Self {
            labels: MeasurementLabels::format(&values, formatter),
            values,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
