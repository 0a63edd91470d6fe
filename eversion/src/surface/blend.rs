//! Blend weights used to interpolate between stages
//!
//! Each kernel has period 2 and is symmetric about `x = 1`; what matters
//! downstream is that their derivatives (not only their values) are smooth.
use crate::jet::ThreeJet;

/// Exponent of the corrugation form kernel [`ff_interp`]
pub const FF_POW: i32 = 3;

/// Exponent of the corrugation scale kernel [`fs_interp`]
pub const FS_POW: i32 = 3;

/// Folds `x` into `[0, 1]`, mirroring the second half of each period
fn fold(x: ThreeJet) -> ThreeJet {
    let x = x % 2.0;
    if x.f > 1.0 { x * -1.0 + 2.0 } else { x }
}

/// `n·x^(n-1) - (n-1)·x^n`, which rises from 0 to 1 on `[0, 1]` with zero
/// slope at `x = 1`
fn smooth_rise(x: ThreeJet, n: i32) -> ThreeJet {
    let n = n as f64;
    x.pow(n - 1.0) * n + x.pow(n) * (1.0 - n)
}

/// Wraps a plain time value as a jet with no `u`/`v` dependence
#[inline]
pub fn t_interp(x: f64) -> ThreeJet {
    ThreeJet::constant(x)
}

/// Cubic smoothstep `3x² - 2x³` along latitude
pub fn u_interp(x: ThreeJet) -> ThreeJet {
    let x = fold(x);
    x.pow(2.0) * 3.0 + x.pow(3.0) * -2.0
}

/// Corrugation form weight
///
/// The input is stretched slightly so that the weight is exactly 0 near the
/// poles and exactly 1 near the equator.
pub fn ff_interp(x: ThreeJet) -> ThreeJet {
    let x = fold(x) * 1.06 + -0.05;
    if x.f < 0.0 {
        ThreeJet::constant(0.0)
    } else if x.f > 1.0 {
        ThreeJet::constant(1.0)
    } else {
        smooth_rise(x, FF_POW)
    }
}

/// Corrugation scale weight, peaking at `-0.2` on the equator
pub fn fs_interp(x: ThreeJet) -> ThreeJet {
    smooth_rise(fold(x), FS_POW) * -0.2
}
