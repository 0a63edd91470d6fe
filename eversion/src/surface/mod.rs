//! Parametric surfaces of the sphere eversion
//!
//! Everything in this module is a pure function of jets.  The surface is built
//! in three layers:
//! - Primitive immersions ([`arc`], [`straight`]) and the five checkpoint
//!   stages ([`stage0`] through [`stage4`]) describe the meridian of one strip
//! - [`add_figure_eight`] thickens that meridian into a corrugated ribbon and
//!   rotates it into place around the `z` axis
//! - Each named [`Phase`] combines a time-blended scene with a corrugation
//!   profile, giving a function of `(u, v, t, num_strips)`
//!
//! Latitude `u` runs from the north pole (`0`) through the equator (`1`) to
//! the south pole (`2`).  Longitude `v` spans one strip per unit, so
//! `v ∈ [0, num_strips]` covers a full revolution.
//!
//! ```
//! use eversion::{jet::ThreeJet, surface::Phase};
//!
//! let p = Phase::Corrugate.eval(ThreeJet::u(1.0), ThreeJet::v(0.0), 0.0, 8);
//! // Before corrugations appear, the equator lies on the unit sphere
//! let [x, y, z] = p.value();
//! assert!((x * x + y * y + z * z - 1.0).abs() < 1e-12);
//! ```
mod blend;
mod corrugate;
mod phase;
mod stage;

pub use blend::{FF_POW, FS_POW, ff_interp, fs_interp, t_interp, u_interp};
pub use corrugate::{add_figure_eight, figure_eight};
pub use phase::{
    Phase, SurfaceFn, bend_in, corrugate, push_through, scene01, scene12,
    scene23, scene34, twist, un_corrugate, un_push,
};
pub use stage::{
    arc, param1, param2, stage0, stage1, stage2, stage3, stage4, straight,
};
