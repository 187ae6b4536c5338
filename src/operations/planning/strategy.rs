use std::f64::consts::TAU;

use crate::error::{ConfigError, Result};
use crate::math::{Point2, Vector2};

/// How the optimizer proposes new positions for the focused control point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SearchStrategy {
    /// Evenly spaced points on a circle around the control point, shrinking over time.
    #[default]
    Circle,
    /// Every node of a fixed lattice, regardless of the current position.
    Grid {
        /// Lattice node with index `(0, 0)`.
        origin: Point2,
        /// Spacing between neighbouring nodes.
        cell_size: f64,
        /// Number of nodes along x.
        columns: usize,
        /// Number of nodes along y.
        rows: usize,
    },
}

impl SearchStrategy {
    /// Generates candidates in a stable order.
    ///
    /// `center`, `radius` and `count` only apply to [`SearchStrategy::Circle`].
    #[must_use]
    pub fn candidates(&self, center: &Point2, radius: f64, count: usize) -> Vec<Point2> {
        match *self {
            Self::Circle => points_on_circle(center, radius, count),
            Self::Grid {
                origin,
                cell_size,
                columns,
                rows,
            } => grid_points(&origin, cell_size, columns, rows),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Self::Circle => Ok(()),
            Self::Grid {
                cell_size,
                columns,
                rows,
                ..
            } => {
                ConfigError::check_positive("cell_size", cell_size, f64::MAX)?;
                if columns == 0 || rows == 0 {
                    return Err(ConfigError::Invalid(format!(
                        "grid must have at least one node, got {columns} x {rows}"
                    ))
                    .into());
                }
                Ok(())
            }
        }
    }
}

/// Returns `count` points evenly spaced on a circle, starting at angle zero and
/// proceeding counter-clockwise.
#[must_use]
pub fn points_on_circle(center: &Point2, radius: f64, count: usize) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn grid_points(origin: &Point2, cell_size: f64, columns: usize, rows: usize) -> Vec<Point2> {
    let mut points = Vec::with_capacity(columns * rows);
    for x in 0..columns {
        for y in 0..rows {
            #[allow(clippy::cast_precision_loss)]
            let offset = Vector2::new(x as f64, y as f64) * cell_size;
            points.push(origin + offset);
        }
    }
    points
}
