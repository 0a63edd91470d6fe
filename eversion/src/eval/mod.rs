//! Sampling the eversion surface onto a grid
//!
//! The usual entry point is [`GeometryConfig::run`], which picks a phase for
//! the requested time and fills a caller-owned [`Grid`].  The lower-level
//! [`print_scene`] and [`print_mesh`] functions are also exposed for callers
//! that want to drive a specific surface function directly.
use crate::{Error, jet::ThreeJet, jet::TwoJetVec, surface::SurfaceFn};
use rayon::prelude::*;

mod config;
pub use config::{GeometryConfig, PhaseSchedule, SampleRange, ThreadPool};

/// A single sample of the surface
///
/// Both fields are in single precision, ready to hand to a renderer.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct SurfacePoint {
    /// Position `(x, y, z)`
    pub vertex: [f32; 3],
    /// Unit normal, or all zeros where the surface is degenerate
    pub normal: [f32; 3],
}

/// Row-major grid of surface samples
///
/// Rows are latitude samples (`u`) and columns are longitude samples (`v`).
///
/// ```text
///        0 ------------> cols (v)
///        |             |
///        |             |
///        V--------------
///   rows (u)
/// ```
#[derive(Clone, Debug, Default)]
pub struct Grid {
    data: Vec<SurfacePoint>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a new grid of `rows × cols` default-valued points
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![SurfacePoint::default(); rows * cols],
            rows,
            cols,
        }
    }

    /// Builds a grid sized to hold every sample of the given ranges
    pub fn for_ranges(u: &SampleRange, v: &SampleRange) -> Self {
        Self::new(u.points(), v.points())
    }

    /// Number of latitude rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of longitude columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns a single row of the grid
    pub fn row(&self, j: usize) -> &[SurfacePoint] {
        &self.data[j * self.cols..][..self.cols]
    }

    /// Iterates over every point in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &SurfacePoint> + '_ {
        self.data.iter()
    }

    /// Returns the number of points in the grid
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks that the grid can hold every sample of the given ranges
    pub(crate) fn check_size(
        &self,
        u: &SampleRange,
        v: &SampleRange,
    ) -> Result<(), Error> {
        if self.rows != u.points() || self.cols != v.points() {
            Err(Error::BadGridSize(
                self.rows,
                self.cols,
                u.points(),
                v.points(),
            ))
        } else {
            Ok(())
        }
    }

    fn decode_position(&self, pos: (usize, usize)) -> usize {
        let (row, col) = pos;
        assert!(
            row < self.rows,
            "row ({row}) must be less than grid rows ({})",
            self.rows
        );
        assert!(
            col < self.cols,
            "column ({col}) must be less than grid columns ({})",
            self.cols
        );
        row * self.cols + col
    }
}

/// Indexes a grid with `(row, col)`
impl std::ops::Index<(usize, usize)> for Grid {
    type Output = SurfacePoint;
    fn index(&self, pos: (usize, usize)) -> &Self::Output {
        let index = self.decode_position(pos);
        &self.data[index]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, pos: (usize, usize)) -> &mut Self::Output {
        let index = self.decode_position(pos);
        &mut self.data[index]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a SurfacePoint;
    type IntoIter = std::slice::Iter<'a, SurfacePoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Converts a surface jet into a position and unit normal
///
/// The normal is `-(∂p/∂u × ∂p/∂v)`, normalized in double precision; if the
/// cross product vanishes, the normal is left as zero.
pub fn print_mesh(p: &TwoJetVec) -> SurfacePoint {
    let [x, y, z] = p.value();
    let [xu, yu, zu] = p.du();
    let [xv, yv, zv] = p.dv();
    let nx = yu * zv - zu * yv;
    let ny = zu * xv - xu * zv;
    let nz = xu * yv - yu * xv;
    let mut s = nx * nx + ny * ny + nz * nz;
    if s > 0.0 {
        s = (1.0 / s).sqrt();
    }
    SurfacePoint {
        vertex: [x as f32, y as f32, z as f32],
        normal: [(-nx * s) as f32, (-ny * s) as f32, (-nz * s) as f32],
    }
}

/// Returns the squared magnitude of `∂p/∂v`
fn speed_v2(p: &TwoJetVec) -> f64 {
    let [x, y, z] = p.dv();
    x * x + y * y + z * z
}

/// Samples a surface function over a grid
///
/// Row `j` is evaluated at `u.value(j)` and column `k` at `v.value(k)`.
/// Before each row, a probe at `v = 0` checks whether the surface is
/// degenerate in `v` (as it is at the poles); if so, that row's `u` is nudged
/// by `1e-9` towards the equator so that normals stay well-defined.
///
/// If either range has a `count` of 0, this is a no-op.  Otherwise, `grid`
/// must have exactly `u.points() × v.points()` cells.
///
/// If `threads` is `None`, rows are evaluated in order on the calling thread;
/// otherwise, they're distributed across the pool.  The results are identical.
pub fn print_scene(
    func: SurfaceFn,
    u: &SampleRange,
    v: &SampleRange,
    t: f64,
    grid: &mut Grid,
    num_strips: u32,
    threads: Option<&ThreadPool>,
) -> Result<(), Error> {
    if u.count == 0 || v.count == 0 {
        return Ok(());
    }
    grid.check_size(u, v)?;

    let fill = |(j, row): (usize, &mut [SurfacePoint])| {
        let mut uj = u.value(j);
        let probe = |uj| func(ThreeJet::u(uj), ThreeJet::v(0.0), t, num_strips);
        if speed_v2(&probe(uj)) == 0.0 {
            uj += if uj < 1.0 { 1e-9 } else { -1e-9 };
            log::trace!("row {j} is degenerate in v; perturbing u to {uj}");
        }
        for (k, out) in row.iter_mut().enumerate() {
            let vk = ThreeJet::v(v.value(k));
            *out = print_mesh(&func(ThreeJet::u(uj), vk, t, num_strips));
        }
    };

    let cols = grid.cols;
    if let Some(threads) = threads {
        threads.run(|| {
            grid.data.par_chunks_mut(cols).enumerate().for_each(fill)
        })
    } else {
        grid.data.chunks_mut(cols).enumerate().for_each(fill)
    }
    Ok(())
}
