//! Time-parametrized scenes and the six named phases of the eversion
use super::{
    add_figure_eight,
    blend::{ff_interp, fs_interp, t_interp, u_interp},
    stage::{arc, param1, param2, stage0, stage1, stage2, stage3, stage4},
};
use crate::jet::{ThreeJet, ThreeJetVec, TwoJetVec};

/// Signature shared by every phase function
///
/// Arguments are `(u, v, t, num_strips)`, where `u` and `v` are identity jets
/// and `t ∈ [0, 1]` is the time local to that phase.
pub type SurfaceFn = fn(ThreeJet, ThreeJet, f64, u32) -> TwoJetVec;

/// Blends the cylinder into the sphere
pub fn scene01(u: ThreeJet, v: ThreeJet, t: f64) -> ThreeJetVec {
    ThreeJetVec::interpolate(stage0(u, v), stage1(u, v), t_interp(t))
}

/// Pushes the poles through each other
pub fn scene12(u: ThreeJet, v: ThreeJet, t: f64) -> ThreeJetVec {
    ThreeJetVec::interpolate(stage1(u, v), stage2(u, v), t_interp(t))
}

/// Twists the two poles by half a turn in opposite directions
///
/// Unlike the other scenes, this one is not a straight blend between stages:
/// the northern half (`u ≤ 1`) and southern half rotate about `z` in opposite
/// senses while the inner surface rotates about `y`.
pub fn scene23(u: ThreeJet, v: ThreeJet, t: f64) -> ThreeJetVec {
    let t = t_interp(t).f * 0.5;
    let tt = if u.f <= 1.0 { t } else { -t };
    ThreeJetVec::interpolate(
        arc(param1(u), v, 0.9, 0.9, -1.0).rotate_z(ThreeJet::constant(tt)),
        arc(param2(u), v, 1.0, 1.0, 0.5).rotate_y(ThreeJet::constant(t)),
        u_interp(u),
    )
}

/// Pulls the poles back apart, now everted
pub fn scene34(u: ThreeJet, v: ThreeJet, t: f64) -> ThreeJetVec {
    ThreeJetVec::interpolate(stage3(u, v), stage4(u, v), t_interp(t))
}

/// Meridian jet (`v = 0`) used as the spine of every strip
#[inline]
fn meridian() -> ThreeJet {
    ThreeJet::v(0.0)
}

/// Bends a cylinder into the round sphere, with no corrugations
pub fn bend_in(u: ThreeJet, v: ThreeJet, t: f64, num_strips: u32) -> TwoJetVec {
    add_figure_eight(
        scene01(u, meridian(), t),
        u,
        v.into(),
        ThreeJet::constant(0.0),
        fs_interp(u),
        num_strips,
    )
}

/// Grows corrugations on the round sphere
pub fn corrugate(
    u: ThreeJet,
    v: ThreeJet,
    t: f64,
    num_strips: u32,
) -> TwoJetVec {
    add_figure_eight(
        stage1(u, meridian()),
        u,
        v.into(),
        ff_interp(u) * t_interp(t),
        fs_interp(u),
        num_strips,
    )
}

/// Pushes the corrugated poles through each other
pub fn push_through(
    u: ThreeJet,
    v: ThreeJet,
    t: f64,
    num_strips: u32,
) -> TwoJetVec {
    add_figure_eight(
        scene12(u, meridian(), t),
        u,
        v.into(),
        ff_interp(u),
        fs_interp(u),
        num_strips,
    )
}

/// Twists the corrugated surface
pub fn twist(u: ThreeJet, v: ThreeJet, t: f64, num_strips: u32) -> TwoJetVec {
    add_figure_eight(
        scene23(u, meridian(), t),
        u,
        v.into(),
        ff_interp(u),
        fs_interp(u),
        num_strips,
    )
}

/// Pulls the corrugated poles back apart
pub fn un_push(u: ThreeJet, v: ThreeJet, t: f64, num_strips: u32) -> TwoJetVec {
    add_figure_eight(
        scene34(u, meridian(), t),
        u,
        v.into(),
        ff_interp(u),
        fs_interp(u),
        num_strips,
    )
}

/// Flattens the corrugations, leaving the everted sphere
pub fn un_corrugate(
    u: ThreeJet,
    v: ThreeJet,
    t: f64,
    num_strips: u32,
) -> TwoJetVec {
    add_figure_eight(
        stage4(u, meridian()),
        u,
        v.into(),
        ff_interp(u) * t_interp(1.0 - t),
        fs_interp(u),
        num_strips,
    )
}

/// Named phase of the eversion
///
/// Variants are listed in timeline order, except for [`Phase::BendIn`],
/// which is a separate demonstration outside of the main timeline.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[allow(missing_docs)]
pub enum Phase {
    BendIn,
    Corrugate,
    PushThrough,
    Twist,
    UnPush,
    UnCorrugate,
}

impl Phase {
    /// Returns the surface function for this phase
    pub fn function(self) -> SurfaceFn {
        match self {
            Phase::BendIn => bend_in,
            Phase::Corrugate => corrugate,
            Phase::PushThrough => push_through,
            Phase::Twist => twist,
            Phase::UnPush => un_push,
            Phase::UnCorrugate => un_corrugate,
        }
    }

    /// Evaluates this phase at a single point
    #[inline]
    pub fn eval(
        self,
        u: ThreeJet,
        v: ThreeJet,
        t: f64,
        num_strips: u32,
    ) -> TwoJetVec {
        self.function()(u, v, t, num_strips)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    fn assert_close(a: TwoJetVec, b: TwoJetVec, eps: f64) {
        for (p, q) in a.value().iter().zip(b.value()) {
            assert!((p - q).abs() < eps, "{:?} != {:?}", a.value(), b.value());
        }
    }

    const SAMPLES: [(f64, f64); 4] =
        [(0.1, 0.2), (0.5, 0.75), (0.9, 0.4), (1.3, 0.1)];

    #[test]
    fn scenes_match_stages_at_endpoints() {
        for (u, v) in SAMPLES {
            let (u, v) = (ThreeJet::u(u), ThreeJet::v(v));
            assert_eq!(scene01(u, v, 0.0), stage0(u, v));
            assert_eq!(scene01(u, v, 1.0), stage1(u, v));
            assert_eq!(scene12(u, v, 1.0), stage2(u, v));
            assert_eq!(scene34(u, v, 0.0), stage3(u, v));

            // The twist starts at stage 2 and ends at stage 3
            let a = TwoJetVec::from(scene23(u, v, 0.0));
            assert_close(a, stage2(u, v).into(), 1e-12);
            let b = TwoJetVec::from(scene23(u, v, 1.0));
            assert_close(b, stage3(u, v).into(), 1e-12);
        }
    }

    #[test]
    fn corrugation_free_endpoints() {
        let n = 8;
        for (u, v) in SAMPLES {
            let (uj, vj) = (ThreeJet::u(u), ThreeJet::v(v));
            let sub = ThreeJet::v(v / n as f64);
            assert_close(
                corrugate(uj, vj, 0.0, n),
                stage1(uj, sub).into(),
                1e-12,
            );
            assert_close(
                un_corrugate(uj, vj, 1.0, n),
                stage4(uj, sub).into(),
                1e-12,
            );
            assert_close(
                bend_in(uj, vj, 0.0, n),
                stage0(uj, sub).into(),
                1e-12,
            );
        }
    }

    #[test]
    fn phases_meet_at_boundaries() {
        let n = 8;
        let pairs = [
            (Phase::BendIn, Phase::Corrugate),
            (Phase::Corrugate, Phase::PushThrough),
            (Phase::PushThrough, Phase::Twist),
            (Phase::Twist, Phase::UnPush),
            (Phase::UnPush, Phase::UnCorrugate),
        ];
        for (a, b) in pairs {
            for (u, v) in SAMPLES {
                let (u, v) = (ThreeJet::u(u), ThreeJet::v(v));
                let pa = a.eval(u, v, 1.0, n);
                let pb = b.eval(u, v, 0.0, n);
                assert_close(pa, pb, 1e-9);
            }
        }
    }

    #[test]
    fn phase_names() {
        let names: Vec<String> = Phase::iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            [
                "BendIn",
                "Corrugate",
                "PushThrough",
                "Twist",
                "UnPush",
                "UnCorrugate"
            ]
        );
        let s: &'static str = Phase::Twist.into();
        assert_eq!(s, "Twist");
    }
}
