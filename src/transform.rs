use crate::{Error, Result};
use std::fmt;

/// A scale and an offset that transforms xyz coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las2g::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(3., transform.direct(1));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Applies the inverse transform, truncating the result toward zero.
    ///
    /// The offset is removed and the result multiplied by the reciprocal of the scale. For the
    /// default scale that reciprocal is exactly [POINT_SCALE](crate::raw::POINT_SCALE), so
    /// coordinates are written as `metres * 1e6`.
    ///
    /// Returns an error if the resultant value can't be represented as an i32.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las2g::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(0, transform.inverse(2.9).unwrap());
    /// assert_eq!(-1, transform.inverse(-2.).unwrap());
    /// ```
    pub fn inverse(&self, n: f64) -> Result<i32> {
        let scaled = ((n - self.offset) * self.scale.recip()).trunc();
        if scaled.is_nan() || scaled > f64::from(i32::MAX) || scaled < f64::from(i32::MIN) {
            Err(Error::InverseTransform {
                n,
                transform: *self,
            })
        } else {
            Ok(scaled as i32)
        }
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: crate::raw::DEFAULT_SCALE_FACTOR,
            offset: 0.,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} * x + {}`", self.scale, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large() {
        let transform = Transform::default();
        let n = i32::MAX as f64 * transform.scale + 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn too_small() {
        let transform = Transform::default();
        let n = i32::MIN as f64 * transform.scale - 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn nan() {
        assert!(Transform::default().inverse(f64::NAN).is_err());
    }

    #[test]
    fn micrometres() {
        let transform = Transform::default();
        assert_eq!(1_500_000, transform.inverse(1.5).unwrap());
        assert_eq!(-250_000, transform.inverse(-0.25).unwrap());
        assert!((transform.direct(1_500_000) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn default_reciprocal_is_point_scale() {
        assert_eq!(
            crate::raw::POINT_SCALE,
            crate::raw::DEFAULT_SCALE_FACTOR.recip()
        );
    }

    #[test]
    fn multiplies_then_truncates() {
        let transform = Transform::default();
        for n in [0.000249, 0.000251, 0.000489, -0.000249, 12.345678] {
            assert_eq!(
                (n * crate::raw::POINT_SCALE).trunc() as i32,
                transform.inverse(n).unwrap()
            );
        }
    }

    #[test]
    fn offset() {
        let transform = Transform {
            scale: 0.01,
            offset: 100.,
        };
        assert_eq!(150, transform.inverse(101.5).unwrap());
        assert_eq!(101.5, transform.direct(150));
    }
}
