//! Truncated Taylor series ("jets") in two parameters
//!
//! A jet carries the value of a function of `(u, v)` along with a fixed set of
//! its partial derivatives.  Arithmetic on jets applies the product and chain
//! rules exactly, so building a surface out of jet operations yields analytic
//! partials (and therefore analytic normals) for free.
//!
//! There are two scalar flavors:
//! - [`TwoJet`] stores `f, fu, fv, fuv`
//! - [`ThreeJet`] additionally stores `fuu, fvv, fuuv, fuvv`, which is enough
//!   to differentiate once with [`ThreeJet::d`] and get back a full
//!   [`TwoJet`].
//!
//! Trigonometric functions take their argument in **turns** rather than
//! radians: `x.sin()` is `sin(2π·x)`.
//!
//! ```
//! use eversion::jet::{Axis, ThreeJet};
//!
//! let u = ThreeJet::u(0.125);
//! let x = u.sin() * u;
//! // d/du [u·sin(2πu)] = sin(2πu) + 2πu·cos(2πu)
//! let expected = (std::f64::consts::TAU * 0.125).sin()
//!     + std::f64::consts::TAU * 0.125 * (std::f64::consts::TAU * 0.125).cos();
//! assert!((x.fu - expected).abs() < 1e-12);
//! assert_eq!(x.d(Axis::U).f, x.fu);
//! ```
mod three;
mod two;
mod vec;

pub use three::ThreeJet;
pub use two::TwoJet;
pub use vec::{ThreeJetVec, TwoJetVec};

/// Parameter axis of a jet
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Latitude parameter (index 0)
    U,
    /// Longitude parameter (index 1)
    V,
}

impl Axis {
    /// Converts from a numeric index (0 = `u`, 1 = `v`)
    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Axis::U),
            1 => Some(Axis::V),
            _ => None,
        }
    }

    /// Returns the numeric index of this axis
    pub fn index(self) -> usize {
        match self {
            Axis::U => 0,
            Axis::V => 1,
        }
    }
}
