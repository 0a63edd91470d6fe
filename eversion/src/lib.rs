//! Eversion is a library for evaluating a smooth sphere eversion: a regular
//! homotopy that turns a sphere inside out without tearing or creasing it.
//!
//! The construction is Thurston's corrugation method.  The sphere is cut into
//! `num_strips` longitudinal strips, and each strip is given a wavy
//! cross-section (a **corrugation**) that lets it pass through itself while
//! staying smooth.  The eversion then proceeds through five phases: the
//! corrugations grow, the poles push through each other, the surface twists,
//! the poles pull back apart, and the corrugations relax, leaving the sphere
//! inverted.
//!
//! # Jets
//! Surfaces are written as ordinary expressions over
//! [**jets**](crate::jet), which carry partial derivatives alongside each
//! value.  The surface normal at every sample comes from those exact partials
//! rather than from finite differences.
//!
//! ```
//! use eversion::jet::{Axis, ThreeJet};
//!
//! let u = ThreeJet::u(0.25);
//! let y = u * u * 3.0; // 3u²
//! assert_eq!(y.f, 0.1875);
//! assert_eq!(y.fu, 1.5);
//! assert_eq!(y.d(Axis::U).fu, 6.0);
//! ```
//!
//! # Evaluation
//! The [`surface`](crate::surface) module describes the eversion as a
//! function of `(u, v, t)`.  To sample it, build a
//! [`GeometryConfig`](crate::eval::GeometryConfig) and run it on a
//! [`Grid`](crate::eval::Grid):
//!
//! ```
//! use eversion::{eval::GeometryConfig, surface::Phase};
//!
//! let cfg = GeometryConfig {
//!     time: 0.05,
//!     ..Default::default()
//! };
//! let mut grid = cfg.grid();
//! let (phase, t) = cfg.run(&mut grid)?.unwrap();
//! assert_eq!(phase, Phase::Corrugate);
//! assert!((t - 0.5).abs() < 1e-12);
//! assert_eq!((grid.rows(), grid.cols()), (13, 13));
//! # Ok::<(), eversion::Error>(())
//! ```
//!
//! The grid covers a single strip of the northern hemisphere; the whole
//! sphere is made of rotated copies, which the [`mesh`](crate::mesh) module
//! assembles into a triangle mesh.
//!
//! # Feature flags
#![doc = document_features::document_features!()]
#![warn(missing_docs)]

pub mod eval;
pub mod jet;
pub mod surface;

#[cfg(feature = "mesh")]
pub mod mesh;

mod error;
pub use error::Error;
