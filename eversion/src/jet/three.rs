use super::{Axis, TwoJet};
use std::f64::consts::TAU;

/// A scalar function of `(u, v)`, carried one order beyond [`TwoJet`]
///
/// Along with the value, first and second partials, this stores the two
/// third-order terms `fuuv` and `fuvv`.  That's exactly enough to
/// differentiate once (with [`ThreeJet::d`]) and still have a complete
/// [`TwoJet`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ThreeJet {
    /// Value of the function
    pub f: f64,
    /// `∂f / ∂u`
    pub fu: f64,
    /// `∂f / ∂v`
    pub fv: f64,
    /// `∂²f / ∂u²`
    pub fuu: f64,
    /// `∂²f / ∂u∂v`
    pub fuv: f64,
    /// `∂²f / ∂v²`
    pub fvv: f64,
    /// `∂³f / ∂u²∂v`
    pub fuuv: f64,
    /// `∂³f / ∂u∂v²`
    pub fuvv: f64,
}

impl ThreeJet {
    /// Builds a jet from a value and first partials
    ///
    /// All higher-order terms are zero.
    #[inline]
    pub fn new(f: f64, fu: f64, fv: f64) -> Self {
        Self {
            f,
            fu,
            fv,
            ..Self::default()
        }
    }

    /// Builds a jet with no derivatives
    #[inline]
    pub fn constant(f: f64) -> Self {
        Self::new(f, 0.0, 0.0)
    }

    /// The identity jet in the `u` direction, evaluated at `u`
    #[inline]
    pub fn u(u: f64) -> Self {
        Self::new(u, 1.0, 0.0)
    }

    /// The identity jet in the `v` direction, evaluated at `v`
    #[inline]
    pub fn v(v: f64) -> Self {
        Self::new(v, 0.0, 1.0)
    }

    /// Differentiates along the given axis, dropping one order
    ///
    /// ```
    /// # use eversion::jet::{Axis, ThreeJet};
    /// let u = ThreeJet::u(0.3);
    /// let x = (u * u).sin();
    /// let du = x.d(Axis::U);
    /// assert_eq!(du.f, x.fu);
    /// assert_eq!(du.fu, x.fuu);
    /// ```
    #[inline]
    pub fn d(&self, axis: Axis) -> TwoJet {
        match axis {
            Axis::U => TwoJet::new(self.fu, self.fuu, self.fuv, self.fuuv),
            Axis::V => TwoJet::new(self.fv, self.fuv, self.fvv, self.fuvv),
        }
    }

    /// Raises the jet to a real power
    ///
    /// When the value is exactly zero, every derivative term is forced to
    /// zero.
    pub fn pow(self, n: f64) -> Self {
        let x = self;
        let x0 = x.f.powf(n);
        let (x1, x2, x3) = if x.f == 0.0 {
            (0.0, 0.0, 0.0)
        } else {
            let x1 = n * x0 / x.f;
            let x2 = (n - 1.0) * x1 / x.f;
            let x3 = (n - 2.0) * x2 / x.f;
            (x1, x2, x3)
        };
        ThreeJet {
            f: x0,
            fu: x1 * x.fu,
            fv: x1 * x.fv,
            fuu: x1 * x.fuu + x2 * x.fu * x.fu,
            fuv: x1 * x.fuv + x2 * x.fu * x.fv,
            fvv: x1 * x.fvv + x2 * x.fv * x.fv,
            fuuv: x1 * x.fuuv
                + x2 * (2.0 * x.fu * x.fuv + x.fv * x.fuu)
                + x3 * x.fu * x.fu * x.fv,
            fuvv: x1 * x.fuvv
                + x2 * (2.0 * x.fv * x.fuv + x.fu * x.fvv)
                + x3 * x.fu * x.fv * x.fv,
        }
    }

    /// Applies a scalar function given its value and first three derivatives
    /// at `t.f` (chain rule, up to the terms we track)
    #[inline]
    fn chain(t: Self, g0: f64, g1: f64, g2: f64, g3: f64) -> Self {
        ThreeJet {
            f: g0,
            fu: g1 * t.fu,
            fv: g1 * t.fv,
            fuu: g1 * t.fuu + g2 * t.fu * t.fu,
            fuv: g1 * t.fuv + g2 * t.fu * t.fv,
            fvv: g1 * t.fvv + g2 * t.fv * t.fv,
            fuuv: g1 * t.fuuv
                + g2 * (2.0 * t.fu * t.fuv + t.fv * t.fuu)
                + g3 * t.fu * t.fu * t.fv,
            fuvv: g1 * t.fuvv
                + g2 * (2.0 * t.fv * t.fuv + t.fu * t.fvv)
                + g3 * t.fu * t.fv * t.fv,
        }
    }

    /// Sine, with the argument measured in turns (i.e. `sin(2π·x)`)
    #[inline]
    pub fn sin(self) -> Self {
        let t = self * TAU;
        let (s, c) = t.f.sin_cos();
        Self::chain(t, s, c, -s, -c)
    }

    /// Cosine, with the argument measured in turns (i.e. `cos(2π·x)`)
    #[inline]
    pub fn cos(self) -> Self {
        let t = self * TAU;
        let (s, c) = t.f.sin_cos();
        Self::chain(t, c, -s, -c, s)
    }

    /// Drops every derivative along the given axis
    ///
    /// Mixed and third-order terms are zeroed as well; only the pure
    /// derivatives along the other axis survive.
    #[inline]
    pub fn annihilate(self, axis: Axis) -> Self {
        let mut out = ThreeJet::constant(self.f);
        match axis {
            Axis::U => {
                out.fv = self.fv;
                out.fvv = self.fvv;
            }
            Axis::V => {
                out.fu = self.fu;
                out.fuu = self.fuu;
            }
        }
        out
    }

    /// Blends `a · (1 - weight) + b · weight`, where the weight is itself a jet
    #[inline]
    pub fn interpolate(a: Self, b: Self, weight: Self) -> Self {
        a * (weight * -1.0 + 1.0) + b * weight
    }
}

impl From<f64> for ThreeJet {
    #[inline]
    fn from(f: f64) -> Self {
        ThreeJet::constant(f)
    }
}

/// Narrows to a [`TwoJet`], discarding `fuu`, `fvv` and third-order terms
impl From<ThreeJet> for TwoJet {
    #[inline]
    fn from(x: ThreeJet) -> Self {
        TwoJet::new(x.f, x.fu, x.fv, x.fuv)
    }
}

impl std::ops::Add<ThreeJet> for ThreeJet {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ThreeJet {
            f: self.f + rhs.f,
            fu: self.fu + rhs.fu,
            fv: self.fv + rhs.fv,
            fuu: self.fuu + rhs.fuu,
            fuv: self.fuv + rhs.fuv,
            fvv: self.fvv + rhs.fvv,
            fuuv: self.fuuv + rhs.fuuv,
            fuvv: self.fuvv + rhs.fuvv,
        }
    }
}

impl std::ops::Add<f64> for ThreeJet {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        ThreeJet {
            f: self.f + rhs,
            ..self
        }
    }
}

impl std::ops::Sub<ThreeJet> for ThreeJet {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl std::ops::Mul<ThreeJet> for ThreeJet {
    type Output = Self;

    #[inline]
    fn mul(self, y: Self) -> Self {
        let x = self;
        ThreeJet {
            f: x.f * y.f,
            fu: x.f * y.fu + x.fu * y.f,
            fv: x.f * y.fv + x.fv * y.f,
            fuu: x.f * y.fuu + 2.0 * x.fu * y.fu + x.fuu * y.f,
            fuv: x.f * y.fuv + x.fu * y.fv + x.fv * y.fu + x.fuv * y.f,
            fvv: x.f * y.fvv + 2.0 * x.fv * y.fv + x.fvv * y.f,
            fuuv: x.f * y.fuuv
                + 2.0 * x.fu * y.fuv
                + x.fv * y.fuu
                + 2.0 * x.fuv * y.fu
                + x.fuu * y.fv
                + x.fuuv * y.f,
            fuvv: x.f * y.fuvv
                + 2.0 * x.fv * y.fuv
                + x.fu * y.fvv
                + 2.0 * x.fuv * y.fv
                + x.fvv * y.fu
                + x.fuvv * y.f,
        }
    }
}

impl std::ops::Mul<f64> for ThreeJet {
    type Output = Self;

    #[inline]
    fn mul(self, d: f64) -> Self {
        ThreeJet {
            f: self.f * d,
            fu: self.fu * d,
            fv: self.fv * d,
            fuu: self.fuu * d,
            fuv: self.fuv * d,
            fvv: self.fvv * d,
            fuuv: self.fuuv * d,
            fuvv: self.fuvv * d,
        }
    }
}

impl std::ops::Neg for ThreeJet {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}

/// Wraps the value into `[0, rhs)`, leaving derivatives untouched
impl std::ops::Rem<f64> for ThreeJet {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: f64) -> Self {
        ThreeJet {
            f: self.f.rem_euclid(rhs),
            ..self
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn d_copies_fields() {
        let u = ThreeJet::u(0.31);
        let v = ThreeJet::v(0.77);
        let x = (u * v * 0.5).cos() * (u + v * 2.0).pow(3.0);

        let du = x.d(Axis::U);
        assert_eq!(du.f, x.fu);
        assert_eq!(du.fu, x.fuu);
        assert_eq!(du.fv, x.fuv);
        assert_eq!(du.fuv, x.fuuv);

        let dv = x.d(Axis::V);
        assert_eq!(dv.f, x.fv);
        assert_eq!(dv.fu, x.fuv);
        assert_eq!(dv.fv, x.fvv);
        assert_eq!(dv.fuv, x.fuvv);
    }

    #[test]
    fn narrowing() {
        let x = ThreeJet {
            f: 1.0,
            fu: 2.0,
            fv: 3.0,
            fuu: 4.0,
            fuv: 5.0,
            fvv: 6.0,
            fuuv: 7.0,
            fuvv: 8.0,
        };
        assert_eq!(TwoJet::from(x), TwoJet::new(1.0, 2.0, 3.0, 5.0));
    }

    #[test]
    fn annihilate() {
        let x = ThreeJet {
            f: 1.0,
            fu: 2.0,
            fv: 3.0,
            fuu: 4.0,
            fuv: 5.0,
            fvv: 6.0,
            fuuv: 7.0,
            fuvv: 8.0,
        };
        let a = x.annihilate(Axis::V);
        assert_eq!(a.fu, 2.0);
        assert_eq!(a.fuu, 4.0);
        assert_eq!(
            [a.fv, a.fuv, a.fvv, a.fuuv, a.fuvv],
            [0.0, 0.0, 0.0, 0.0, 0.0]
        );
        let a = x.annihilate(Axis::U);
        assert_eq!(a.fv, 3.0);
        assert_eq!(a.fvv, 6.0);
        assert_eq!(
            [a.fu, a.fuu, a.fuv, a.fuuv, a.fuvv],
            [0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn pow_at_zero() {
        let x = ThreeJet::new(0.0, 1.0, 1.0).pow(-1.0);
        assert_eq!(
            [x.fu, x.fv, x.fuu, x.fuv, x.fvv, x.fuuv, x.fuvv],
            [0.0; 7]
        );
    }
}
