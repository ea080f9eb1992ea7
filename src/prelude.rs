use crate::error::{Error, Result};
use core::ops::{Add, Div, Mul};

macro_rules! constrained_f64 {
    ( $name:ident, $closure:tt, $msg:expr) => {
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub struct $name(f64);

        impl $name {
            pub fn new(x: f64) -> Result<Self> {
                if ($closure)(x) {
                    Ok(Self(x))
                } else {
                    Err(Error::InvalidConfiguration {
                        name: stringify!($name),
                        message: $msg,
                    })
                }
            }

            pub fn unwrap(self) -> f64 {
                self.0
            }

            pub fn ln(self) -> f64 {
                self.0.ln()
            }
        }

        impl Add<f64> for $name {
            type Output = f64;

            fn add(self, other: f64) -> f64 {
                self.0 + other
            }
        }

        impl Add<$name> for f64 {
            type Output = f64;

            fn add(self, other: $name) -> f64 {
                self + other.0
            }
        }

        impl Mul<f64> for $name {
            type Output = f64;

            fn mul(self, other: f64) -> f64 {
                self.0 * other
            }
        }

        impl Mul<$name> for f64 {
            type Output = f64;

            fn mul(self, other: $name) -> f64 {
                self * other.0
            }
        }

        impl Div<f64> for $name {
            type Output = f64;

            fn div(self, other: f64) -> f64 {
                self.0 / other
            }
        }

        impl Div<$name> for f64 {
            type Output = f64;

            fn div(self, other: $name) -> f64 {
                self / other.0
            }
        }
    };
}

constrained_f64!(
    Mass,
    (|x: f64| x.is_finite() && x > 0.0),
    "must be finite and greater than zero"
);

constrained_f64!(
    Scale,
    (|x: f64| x.is_finite() && x > 0.0),
    "must be finite and greater than zero"
);

impl Mass {
    pub const ONE: Self = Self(1.0);
}

impl Scale {
    pub fn variance(self) -> f64 {
        self.0 * self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass() {
        assert_eq!(Mass::new(1.5).map(Mass::unwrap), Ok(1.5));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Mass::new(bad),
                Err(Error::InvalidConfiguration {
                    name: "Mass",
                    message: "must be finite and greater than zero"
                })
            );
        }
    }

    #[test]
    fn test_arithmetic() {
        let m = Mass::new(2.0).unwrap();
        assert_eq!(m + 3.0, 5.0);
        assert_eq!(3.0 + m, 5.0);
        assert_eq!(m / 4.0, 0.5);
        assert_eq!(4.0 / m, 2.0);
        assert_eq!(Scale::new(3.0).unwrap().variance(), 9.0);
    }
}
