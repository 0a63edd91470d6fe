//! Primitive immersions and the five checkpoint stages of the eversion
use super::blend::u_interp;
use crate::jet::{ThreeJet, ThreeJetVec};

/// Bulged closed surface
///
/// `u ∈ [0, 4]` sweeps latitude (pole to pole is `[0, 2]`), `v` sweeps
/// longitude in turns.
pub fn arc(
    u: ThreeJet,
    v: ThreeJet,
    xsize: f64,
    ysize: f64,
    zsize: f64,
) -> ThreeJetVec {
    let u = u * 0.25;
    ThreeJetVec {
        x: u.sin() * v.sin() * xsize,
        y: u.sin() * v.cos() * ysize,
        z: u.cos() * zsize,
    }
}

/// Cylindrical closed surface, parametrized like [`arc`]
pub fn straight(
    u: ThreeJet,
    v: ThreeJet,
    xsize: f64,
    ysize: f64,
    zsize: f64,
) -> ThreeJetVec {
    let u = u * 0.25;
    ThreeJetVec {
        x: v.sin() * xsize,
        y: v.cos() * ysize,
        z: u.cos() * zsize,
    }
}

/// Splits `x` (mod 4) into a half-period and its offset
fn half_period(x: ThreeJet) -> (ThreeJet, f64) {
    let x = x % 4.0;
    if x.f > 2.0 { (x + -2.0, 2.0) } else { (x, 0.0) }
}

/// First latitude reparametrization
///
/// Quadratic splices with period 4, easing out of each pole.
pub fn param1(x: ThreeJet) -> ThreeJet {
    let (x, offset) = half_period(x);
    if x.f <= 1.0 {
        x * 2.0 + x.pow(2.0) * -1.0 + offset
    } else {
        x.pow(2.0) + x * -2.0 + (2.0 + offset)
    }
}

/// Second latitude reparametrization
///
/// Quadratic splices with period 4, easing into each pole.
pub fn param2(x: ThreeJet) -> ThreeJet {
    let (x, offset) = half_period(x);
    if x.f <= 1.0 {
        x.pow(2.0) + offset
    } else {
        x.pow(2.0) * -1.0 + x * 4.0 + (-2.0 + offset)
    }
}

/// The round-ended cylinder that starts the bend-in
pub fn stage0(u: ThreeJet, v: ThreeJet) -> ThreeJetVec {
    straight(u, v, 1.0, 1.0, 1.0)
}

/// The round sphere
pub fn stage1(u: ThreeJet, v: ThreeJet) -> ThreeJetVec {
    arc(u, v, 1.0, 1.0, 1.0)
}

/// Poles pushed through each other
pub fn stage2(u: ThreeJet, v: ThreeJet) -> ThreeJetVec {
    ThreeJetVec::interpolate(
        arc(param1(u), v, 0.9, 0.9, -1.0),
        arc(param2(u), v, 1.0, 1.0, 0.5),
        u_interp(u),
    )
}

/// [`stage2`] after a half-turn twist of each pole
pub fn stage3(u: ThreeJet, v: ThreeJet) -> ThreeJetVec {
    ThreeJetVec::interpolate(
        arc(param1(u), v, -0.9, -0.9, -1.0),
        arc(param2(u), v, -1.0, 1.0, -0.5),
        u_interp(u),
    )
}

/// The everted sphere, i.e. [`stage1`] mirrored through the origin
pub fn stage4(u: ThreeJet, v: ThreeJet) -> ThreeJetVec {
    arc(u, v, -1.0, -1.0, -1.0)
}
