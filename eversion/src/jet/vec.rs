//! Three-component vectors of jets
//!
//! Each vector type is a plain `(x, y, z)` triple; geometric operations apply
//! the scalar jet arithmetic component-wise, so every derivative term stays
//! exact.
use super::{Axis, ThreeJet, TwoJet};

macro_rules! jet_vec {
    ($name:ident, $scalar:ident) => {
        impl $name {
            /// Builds a new vector from its components
            #[inline]
            pub fn new(x: $scalar, y: $scalar, z: $scalar) -> Self {
                Self { x, y, z }
            }

            /// Dot product
            #[inline]
            pub fn dot(&self, w: &Self) -> $scalar {
                self.x * w.x + self.y * w.y + self.z * w.z
            }

            /// Cross product
            #[inline]
            pub fn cross(&self, w: &Self) -> Self {
                Self {
                    x: self.y * w.z - self.z * w.y,
                    y: self.z * w.x - self.x * w.z,
                    z: self.x * w.y - self.y * w.x,
                }
            }

            /// Scales the vector to unit length
            ///
            /// A zero-length vector becomes the zero vector.
            #[inline]
            pub fn normalize(&self) -> Self {
                let a = self.dot(self);
                let a = if a.f > 0.0 {
                    a.pow(-0.5)
                } else {
                    $scalar::constant(0.0)
                };
                *self * a
            }

            /// Rotates about the `x` axis by `angle` turns
            #[inline]
            pub fn rotate_x(&self, angle: $scalar) -> Self {
                let s = angle.sin();
                let c = angle.cos();
                Self {
                    x: self.x,
                    y: self.y * c + self.z * s,
                    z: self.z * c - self.y * s,
                }
            }

            /// Rotates about the `y` axis by `angle` turns
            #[inline]
            pub fn rotate_y(&self, angle: $scalar) -> Self {
                let s = angle.sin();
                let c = angle.cos();
                Self {
                    x: self.x * c - self.z * s,
                    y: self.y,
                    z: self.x * s + self.z * c,
                }
            }

            /// Rotates about the `z` axis by `angle` turns
            #[inline]
            pub fn rotate_z(&self, angle: $scalar) -> Self {
                let s = angle.sin();
                let c = angle.cos();
                Self {
                    x: self.x * c + self.y * s,
                    y: self.y * c - self.x * s,
                    z: self.z,
                }
            }

            /// Blends `a · (1 - weight) + b · weight`
            #[inline]
            pub fn interpolate(a: Self, b: Self, weight: $scalar) -> Self {
                a * (weight * -1.0 + 1.0) + b * weight
            }

            /// Annihilates the given axis on every component
            #[inline]
            pub fn annihilate(&self, axis: Axis) -> Self {
                Self {
                    x: self.x.annihilate(axis),
                    y: self.y.annihilate(axis),
                    z: self.z.annihilate(axis),
                }
            }
        }

        impl std::ops::Add<$name> for $name {
            type Output = Self;

            #[inline]
            fn add(self, w: Self) -> Self {
                Self {
                    x: self.x + w.x,
                    y: self.y + w.y,
                    z: self.z + w.z,
                }
            }
        }

        impl std::ops::Mul<$scalar> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, a: $scalar) -> Self {
                Self {
                    x: self.x * a,
                    y: self.y * a,
                    z: self.z * a,
                }
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, a: f64) -> Self {
                Self {
                    x: self.x * a,
                    y: self.y * a,
                    z: self.z * a,
                }
            }
        }
    };
}

/// A jet-valued 3D vector, truncated like [`TwoJet`]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TwoJetVec {
    /// `x` component
    pub x: TwoJet,
    /// `y` component
    pub y: TwoJet,
    /// `z` component
    pub z: TwoJet,
}

/// A jet-valued 3D vector, truncated like [`ThreeJet`]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ThreeJetVec {
    /// `x` component
    pub x: ThreeJet,
    /// `y` component
    pub y: ThreeJet,
    /// `z` component
    pub z: ThreeJet,
}

jet_vec!(TwoJetVec, TwoJet);
jet_vec!(ThreeJetVec, ThreeJet);

impl TwoJetVec {
    /// Returns the value of each component
    #[inline]
    pub fn value(&self) -> [f64; 3] {
        [self.x.f, self.y.f, self.z.f]
    }

    /// Returns the partial derivative `∂p / ∂u`
    #[inline]
    pub fn du(&self) -> [f64; 3] {
        [self.x.fu, self.y.fu, self.z.fu]
    }

    /// Returns the partial derivative `∂p / ∂v`
    #[inline]
    pub fn dv(&self) -> [f64; 3] {
        [self.x.fv, self.y.fv, self.z.fv]
    }
}

impl ThreeJetVec {
    /// Differentiates every component along the given axis
    #[inline]
    pub fn d(&self, axis: Axis) -> TwoJetVec {
        TwoJetVec {
            x: self.x.d(axis),
            y: self.y.d(axis),
            z: self.z.d(axis),
        }
    }
}

impl From<ThreeJetVec> for TwoJetVec {
    #[inline]
    fn from(v: ThreeJetVec) -> Self {
        TwoJetVec {
            x: v.x.into(),
            y: v.y.into(),
            z: v.z.into(),
        }
    }
}
