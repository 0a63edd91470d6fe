//! Triangle meshes of the whole immersed sphere
//!
//! [`GeometryConfig::run`](crate::eval::GeometryConfig::run) only computes a
//! single fundamental patch: one strip of one hemisphere.  The rest of the
//! sphere is made of rotated copies of that patch; [`Sphere`] tracks the
//! display state and [`Sphere::mesh`] stitches the copies together.
//!
//! ```
//! use eversion::mesh::{MeshStyle, Sphere};
//!
//! let mut sphere = Sphere::default();
//! sphere.set_time(0.5);
//! let mesh = sphere.mesh(MeshStyle::Polygons, None)?;
//!
//! let mut stl = vec![];
//! mesh.write_stl(&mut stl)?;
//! assert_eq!(stl.len(), 84 + 50 * mesh.triangles.len());
//! # Ok::<(), eversion::Error>(())
//! ```
use crate::eval::Grid;
use nalgebra::{Rotation3, Vector3};

mod output;
mod sphere;

pub use sphere::{Animation, Sphere};

/// An indexed 3D mesh with per-vertex normals
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Triangles, as indices into [`Mesh::vertices`]
    pub triangles: Vec<Vector3<usize>>,
    /// Vertex positions
    pub vertices: Vec<Vector3<f32>>,
    /// Vertex normals, with the same length as [`Mesh::vertices`]
    pub normals: Vec<Vector3<f32>>,
}

impl Mesh {
    /// Builds a new (empty) mesh
    pub fn new() -> Self {
        Self::default()
    }
}

/// Which patches of each strip are turned into triangles
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum MeshStyle {
    /// Every patch
    #[default]
    Polygons,
    /// Alternating latitude bands, offset between the two hemispheres
    Bands,
    /// Alternating patches, like a checkerboard
    Checkered,
}

impl MeshStyle {
    /// Returns the longitude steps in latitude band `j` of hemisphere `h`
    fn columns(
        self,
        j: usize,
        h: usize,
        long: usize,
    ) -> Box<dyn Iterator<Item = usize>> {
        match self {
            MeshStyle::Polygons => Box::new(0..long),
            MeshStyle::Bands if (j & 1) == h => Box::new(0..long),
            MeshStyle::Bands => Box::new(std::iter::empty()),
            MeshStyle::Checkered => Box::new((j % 2..long).step_by(2)),
        }
    }
}

/// Copies of the fundamental patch that make up the sphere
pub(crate) struct Layout {
    /// Number of hemispheres to emit (1 or 2)
    pub hemispheres: usize,
    /// Number of strips to emit per hemisphere
    pub strips: usize,
    /// Number of strips in a full revolution
    pub num_strips: u32,
}

impl Layout {
    /// Transform for strip `s` of hemisphere `h`
    ///
    /// Hemisphere `h` is turned by `h` half-turns about `y`; within it, strip
    /// `s` is first turned about `z` so the strips tile the revolution.
    fn rotation(&self, h: usize, s: usize) -> Rotation3<f32> {
        let step = std::f32::consts::TAU / self.num_strips as f32;
        let k = if h == 0 { -(s as f32) } else { s as f32 + 1.0 };
        let hemi = Rotation3::from_axis_angle(
            &Vector3::y_axis(),
            h as f32 * std::f32::consts::PI,
        );
        hemi * Rotation3::from_axis_angle(&Vector3::z_axis(), k * step)
    }

    /// Stitches rotated copies of `grid` into a single mesh
    ///
    /// Rows of the grid are latitude samples; each band between rows `j` and
    /// `j + 1` is split into two triangles per longitude step, wound so that
    /// the face normal agrees with the stored vertex normals.
    pub fn build(&self, grid: &Grid, style: MeshStyle) -> Mesh {
        let mut out = Mesh::new();
        if grid.rows() < 2 || grid.cols() < 2 {
            return out;
        }
        let lat = grid.rows() - 1;
        let long = grid.cols() - 1;
        for h in 0..self.hemispheres {
            for s in 0..self.strips {
                let r = self.rotation(h, s);
                let base = out.vertices.len();
                for p in grid {
                    out.vertices.push(r * Vector3::from(p.vertex));
                    out.normals.push(r * Vector3::from(p.normal));
                }
                let index = |j: usize, k: usize| base + j * grid.cols() + k;
                for j in 0..lat {
                    for k in style.columns(j, h, long) {
                        let (a0, a1) = (index(j, k), index(j, k + 1));
                        let (b0, b1) = (index(j + 1, k), index(j + 1, k + 1));
                        out.triangles.push(Vector3::new(a0, a1, b0));
                        out.triangles.push(Vector3::new(a1, b1, b0));
                    }
                }
            }
        }
        out
    }
}
