use measure_kernel::OrientedBox;

use crate::measurement::MeasurementReport;

/// Receives the tool's three notification kinds. All methods default to
/// doing nothing so listeners implement only what they need.
pub trait MeasurementObserver {
    /// After every change to the box or its refinement.
    fn on_update(&mut self, _report: &MeasurementReport) {}

    /// Once, when construction finishes.
    fn on_ready(&mut self, _report: &MeasurementReport, _shape: &OrientedBox) {}

    /// When a finalized box is dismissed by clicking off it.
    fn on_end(&mut self, _report: &MeasurementReport, _shape: &OrientedBox) {}
}
