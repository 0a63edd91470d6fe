use super::Axis;
use std::f64::consts::TAU;

/// A scalar function of `(u, v)`, truncated after the mixed second partial
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TwoJet {
    /// Value of the function
    pub f: f64,
    /// Partial derivative with respect to `u`
    pub fu: f64,
    /// Partial derivative with respect to `v`
    pub fv: f64,
    /// Mixed partial derivative `∂²f / ∂u∂v`
    pub fuv: f64,
}

impl TwoJet {
    /// Constructs a new jet
    #[inline]
    pub fn new(f: f64, fu: f64, fv: f64, fuv: f64) -> Self {
        Self { f, fu, fv, fuv }
    }

    /// Builds a jet with no derivatives
    #[inline]
    pub fn constant(f: f64) -> Self {
        Self::new(f, 0.0, 0.0, 0.0)
    }

    /// Raises the jet to a real power
    ///
    /// When the value is exactly zero, every derivative term is forced to
    /// zero instead of evaluating `0^(n - 1)`.
    #[inline]
    pub fn pow(self, n: f64) -> Self {
        let x0 = self.f.powf(n);
        let x1 = if self.f == 0.0 { 0.0 } else { n * x0 / self.f };
        let x2 = if self.f == 0.0 {
            0.0
        } else {
            (n - 1.0) * x1 / self.f
        };
        TwoJet {
            f: x0,
            fu: x1 * self.fu,
            fv: x1 * self.fv,
            fuv: x1 * self.fuv + x2 * self.fu * self.fv,
        }
    }

    /// Sine, with the argument measured in turns (i.e. `sin(2π·x)`)
    #[inline]
    pub fn sin(self) -> Self {
        let t = self * TAU;
        let s = t.f.sin();
        let c = t.f.cos();
        TwoJet {
            f: s,
            fu: c * t.fu,
            fv: c * t.fv,
            fuv: c * t.fuv - s * t.fu * t.fv,
        }
    }

    /// Cosine, with the argument measured in turns (i.e. `cos(2π·x)`)
    #[inline]
    pub fn cos(self) -> Self {
        let t = self * TAU;
        let s = t.f.cos();
        let c = -t.f.sin();
        TwoJet {
            f: s,
            fu: c * t.fu,
            fv: c * t.fv,
            fuv: c * t.fuv - s * t.fu * t.fv,
        }
    }

    /// Drops the derivative along the given axis, along with the mixed term
    #[inline]
    pub fn annihilate(self, axis: Axis) -> Self {
        TwoJet {
            f: self.f,
            fu: if axis == Axis::V { self.fu } else { 0.0 },
            fv: if axis == Axis::U { self.fv } else { 0.0 },
            fuv: 0.0,
        }
    }

    /// Blends `a · (1 - weight) + b · weight`, where the weight is itself a jet
    #[inline]
    pub fn interpolate(a: Self, b: Self, weight: Self) -> Self {
        a * (weight * -1.0 + 1.0) + b * weight
    }
}

impl From<f64> for TwoJet {
    #[inline]
    fn from(f: f64) -> Self {
        TwoJet::constant(f)
    }
}

impl std::ops::Add<TwoJet> for TwoJet {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        TwoJet {
            f: self.f + rhs.f,
            fu: self.fu + rhs.fu,
            fv: self.fv + rhs.fv,
            fuv: self.fuv + rhs.fuv,
        }
    }
}

impl std::ops::Add<f64> for TwoJet {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        TwoJet {
            f: self.f + rhs,
            ..self
        }
    }
}

impl std::ops::Sub<TwoJet> for TwoJet {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl std::ops::Mul<TwoJet> for TwoJet {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        TwoJet {
            f: self.f * rhs.f,
            fu: self.f * rhs.fu + self.fu * rhs.f,
            fv: self.f * rhs.fv + self.fv * rhs.f,
            fuv: self.f * rhs.fuv
                + self.fu * rhs.fv
                + self.fv * rhs.fu
                + self.fuv * rhs.f,
        }
    }
}

impl std::ops::Mul<f64> for TwoJet {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        TwoJet {
            f: self.f * rhs,
            fu: self.fu * rhs,
            fv: self.fv * rhs,
            fuv: self.fuv * rhs,
        }
    }
}

impl std::ops::Neg for TwoJet {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}

/// Wraps the value into `[0, rhs)`, leaving derivatives untouched
impl std::ops::Rem<f64> for TwoJet {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: f64) -> Self {
        TwoJet {
            f: self.f.rem_euclid(rhs),
            ..self
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pow_at_zero() {
        let x = TwoJet::new(0.0, 1.0, 2.0, 3.0).pow(-0.5);
        assert_eq!(x.fu, 0.0);
        assert_eq!(x.fv, 0.0);
        assert_eq!(x.fuv, 0.0);

        let x = TwoJet::new(0.0, 1.0, 2.0, 3.0).pow(2.0);
        assert_eq!(x, TwoJet::constant(0.0));
    }

    #[test]
    fn rem_wraps_value() {
        let x = TwoJet::new(-0.25, 1.0, 2.0, 3.0) % 1.0;
        assert_eq!(x, TwoJet::new(0.75, 1.0, 2.0, 3.0));
        let x = TwoJet::new(5.5, 1.0, 0.0, 0.0) % 2.0;
        assert_eq!(x.f, 1.5);
    }

    #[test]
    fn annihilate() {
        let x = TwoJet::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(x.annihilate(Axis::U), TwoJet::new(1.0, 0.0, 3.0, 0.0));
        assert_eq!(x.annihilate(Axis::V), TwoJet::new(1.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn sin_cos_use_turns() {
        let q = TwoJet::new(0.25, 1.0, 0.0, 0.0);
        let s = q.sin();
        assert!((s.f - 1.0).abs() < 1e-12);
        assert!(s.fu.abs() < 1e-12);
        let c = q.cos();
        assert!(c.f.abs() < 1e-12);
        assert!((c.fu + TAU).abs() < 1e-12);
    }
}
