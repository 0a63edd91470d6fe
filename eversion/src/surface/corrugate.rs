//! Corrugations: thickening a meridian into a fluted ribbon
use crate::jet::{Axis, ThreeJet, ThreeJetVec, TwoJet, TwoJetVec};

/// Closed transverse cross-section of a corrugation
///
/// `w` and `h` span the cross-section plane; `bend` is added to `h` in
/// proportion to the square of the local height, which keeps neighbouring
/// strips from crossing while the amplitude changes along the meridian.
/// `form` blends between a flat loop (`0`) and a figure-eight (`1`), and `v`
/// is the longitudinal parameter in turns (only its fractional part
/// matters).
pub fn figure_eight(
    w: TwoJetVec,
    h: TwoJetVec,
    bend: TwoJetVec,
    form: TwoJet,
    v: TwoJet,
) -> TwoJetVec {
    let v = v % 1.0;
    let mut height = ((v * 2.0).cos() + -1.0) * -1.0;
    if v.f > 0.25 && v.f < 0.75 {
        height = height * -1.0 + 4.0;
    }
    let height = height * 0.6;
    let h = h + bend * (height * height * (1.0 / 64.0));
    w * (v * 2.0).sin()
        + h * TwoJet::interpolate((v.cos() + -1.0) * -2.0, height, form)
}

/// Adds a corrugation to the meridian `p`, then places the result in its
/// strip
///
/// The local frame is built from the tangent `∂p/∂u` and the direction
/// `∂p/∂v`; the latter has its `v`-dependence annihilated so the frame varies
/// only along the meridian.  The corrugation amplitude is `form · scale`.
///
/// Finally the surface is rotated about `z` by `v / num_strips` turns, so
/// that `num_strips` copies of the strip tile a full revolution.
pub fn add_figure_eight(
    p: ThreeJetVec,
    u: ThreeJet,
    v: TwoJet,
    form: ThreeJet,
    scale: ThreeJet,
    num_strips: u32,
) -> TwoJetVec {
    let size = form * scale;
    let form = form * 2.0 + form * form * -1.0;
    let dv = p.d(Axis::V).annihilate(Axis::V);
    let p = p.annihilate(Axis::V);
    let du = p.d(Axis::U).normalize();
    let h = du.cross(&dv).normalize() * TwoJet::from(size);
    let w = h.cross(&du).normalize() * (TwoJet::from(size) * 1.1);
    let bend = du * size.d(Axis::U) * u.d(Axis::U).pow(-1.0);
    let section = figure_eight(w, h, bend, form.into(), v);
    (TwoJetVec::from(p) + section).rotate_z(v * (1.0 / num_strips as f64))
}
