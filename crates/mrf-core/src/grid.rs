//! Row-major 2-D grid buffers and boundary-aware neighborhood views.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MrfError};

/// Row-major 2-D buffer of samples or labels.
///
/// The engine borrows the input grid read-only for a whole run and owns the
/// label grid exclusively while iterating; index arithmetic is
/// `y * width + x` throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T: Copy> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Creates a grid with every site set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, MrfError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; width * height],
        })
    }

    /// Wraps an existing row-major buffer, validating its length.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, MrfError> {
        check_dimensions(width, height)?;
        if data.len() != width * height {
            return Err(MrfError::Grid(
                ErrorInfo::new("length-mismatch", "buffer length must equal width * height")
                    .with_context("expected", (width * height).to_string())
                    .with_context("actual", data.len().to_string()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in sites.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in sites.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of sites.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-site grid (unreachable via constructors).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the site at `(x, y)`. Panics on out-of-bounds coordinates.
    pub fn get(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Writes the site at `(x, y)`. Panics on out-of-bounds coordinates.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = value;
    }

    /// Immutable view of the underlying row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), MrfError> {
    if width == 0 || height == 0 {
        return Err(MrfError::Grid(
            ErrorInfo::new("zero-dimension", "grid dimensions must be positive")
                .with_context("width", width.to_string())
                .with_context("height", height.to_string()),
        ));
    }
    Ok(())
}

/// Reusable window of Chebyshev radius `r` centered on one site.
///
/// The window covers `(2r+1)^2` offsets in row-major order. Offsets that fall
/// outside the grid are flagged invalid and excluded from aggregation rather
/// than read as zero. The buffers are allocated once and recentered with
/// [`NeighborhoodView::fill_from`] as the scan advances.
#[derive(Debug, Clone)]
pub struct NeighborhoodView {
    radius: usize,
    values: Vec<f64>,
    valid: Vec<bool>,
}

impl NeighborhoodView {
    /// Allocates a view of the given radius. The radius stays fixed for the
    /// lifetime of the view.
    pub fn with_radius(radius: usize) -> Self {
        let side = 2 * radius + 1;
        Self {
            radius,
            values: vec![0.0; side * side],
            valid: vec![false; side * side],
        }
    }

    /// Window radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Recenters the view on `(x, y)`, converting samples to `f64` and
    /// marking out-of-bounds offsets invalid.
    pub fn fill_from<T: Copy + Into<f64>>(&mut self, grid: &Grid<T>, x: usize, y: usize) {
        let side = 2 * self.radius + 1;
        let r = self.radius as isize;
        for dy in -r..=r {
            for dx in -r..=r {
                let slot = ((dy + r) as usize) * side + (dx + r) as usize;
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                let inside = nx >= 0
                    && ny >= 0
                    && (nx as usize) < grid.width()
                    && (ny as usize) < grid.height();
                self.valid[slot] = inside;
                self.values[slot] = if inside {
                    grid.get(nx as usize, ny as usize).into()
                } else {
                    0.0
                };
            }
        }
    }

    /// Value stored at the center offset.
    pub fn center(&self) -> f64 {
        let side = 2 * self.radius + 1;
        self.values[self.radius * side + self.radius]
    }

    /// Iterates the values of all valid offsets, excluding the center.
    pub fn valid_neighbors(&self) -> impl Iterator<Item = f64> + '_ {
        let side = 2 * self.radius + 1;
        let center = self.radius * side + self.radius;
        (0..self.values.len()).filter_map(move |slot| {
            if slot != center && self.valid[slot] {
                Some(self.values[slot])
            } else {
                None
            }
        })
    }

    /// Number of valid offsets excluding the center.
    pub fn valid_count(&self) -> usize {
        self.valid_neighbors().count()
    }
}
