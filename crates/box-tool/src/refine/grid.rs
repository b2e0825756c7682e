use measure_kernel::Point3d;
use serde::{Deserialize, Serialize};

use crate::params::BoxParameters;
use crate::scene::Scene;

/// Per-cell height of empty space between the top face and the surface
/// below it, in meters. Row-major, `resolution x resolution`.
///
/// An empty grid (no cells) means no refinement has completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyVolumeGrid {
    resolution: usize,
    cells: Vec<f64>,
}

impl EmptyVolumeGrid {
    /// A grid of zeros.
    pub fn zeros(resolution: usize) -> Self {
        Self {
            resolution,
            cells: vec![0.0; resolution * resolution],
        }
    }

    /// Build from rows; `None` if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let resolution = rows.len();
        if rows.iter().any(|row| row.len() != resolution) {
            return None;
        }
        Some(Self {
            resolution,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.resolution && col < self.resolution {
            self.cells.get(row * self.resolution + col).copied()
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.resolution && col < self.resolution {
            self.cells[row * self.resolution + col] = value;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.resolution.max(1))
    }

    pub fn total_empty_height(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn max(&self) -> Option<f64> {
        self.cells.iter().copied().reduce(f64::max)
    }

    /// Gross volume minus the empty space under the top face, floored at 0.
    pub fn refined_volume(&self, params: &BoxParameters) -> f64 {
        let gross = params.volume();
        if self.is_empty() {
            return gross;
        }
        let cell_area = params.area() / self.cell_count() as f64;
        (gross - cell_area * self.total_empty_height()).max(0.0)
    }
}

/// Cell-centre sample points on the top face, row-major.
///
/// Rows run from the anchor edge toward the depth end. Each row is
/// interpolated between the two top edges that run along the depth axis.
pub fn sample_points<S: Scene + ?Sized>(
    scene: &S,
    params: &BoxParameters,
    resolution: usize,
) -> Vec<Vec<Point3d>> {
    let [t0, t1, t2, t3] = params.top_face();
    let n = resolution as f64;
    (0..resolution)
        .map(|i| {
            let v = (i as f64 + 0.5) / n;
            let start = scene.interpolate(&t0, &t3, v);
            let end = scene.interpolate(&t1, &t2, v);
            (0..resolution)
                .map(|j| scene.interpolate(&start, &end, (j as f64 + 0.5) / n))
                .collect()
        })
        .collect()
}
