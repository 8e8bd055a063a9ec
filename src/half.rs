//! Half-integers for spin quantities.
use std::fmt;
use std::ops::{Add, Div, Neg, Rem, Sub};
use num::{One, ToPrimitive, Zero};

/// Type that logically behaves like half-integers, but what is actually
/// stored is twice its logical value.
///
/// For example, `Half(3)` represents the fraction `3/2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Half<T>(pub T);

impl<T> fmt::Display for Half<T>
    where T: fmt::Display + Div<Output = T> + Rem<Output = T> +
             Zero + One + Clone
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.clone().try_get() {
            Ok(x) => write!(f, "{}", x),
            Err(d) => write!(f, "{}/2", d.0),
        }
    }
}

impl<T: Add<Output = T> + Clone> From<T> for Half<T> {
    #[inline]
    fn from(t: T) -> Self {
        Half(t.clone() + t)
    }
}

impl<T> Half<T> {
    /// Unwrap to twice its logical value.
    #[inline]
    pub fn twice(self) -> T {
        self.0
    }
}

impl<T: Clone + Div<Output = T> + Rem<Output = T> + Zero + One> Half<T> {
    /// Get the value if it's half-even.  Otherwise, returns `Err(self)`.
    #[inline]
    pub fn try_get(self) -> Result<T, Half<T>> {
        let two = T::one() + T::one();
        if (self.0.clone() % two.clone()).is_zero() {
            Ok(self.0 / two)
        } else {
            Err(self)
        }
    }
}

impl<T: ToPrimitive> Half<T> {
    /// Logical value as a floating-point number.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().map(|x| x / 2.0).unwrap_or(f64::NAN)
    }
}

impl<T: Add<U>, U> Add<Half<U>> for Half<T> {
    type Output = Half<T::Output>;
    #[inline]
    fn add(self, other: Half<U>) -> Self::Output {
        Half(self.0 + other.0)
    }
}

impl<T: Sub<U>, U> Sub<Half<U>> for Half<T> {
    type Output = Half<T::Output>;
    #[inline]
    fn sub(self, other: Half<U>) -> Self::Output {
        Half(self.0 - other.0)
    }
}

impl<T: Neg> Neg for Half<T> {
    type Output = Half<T::Output>;
    #[inline]
    fn neg(self) -> Self::Output {
        Half(-self.0)
    }
}

impl<T: Zero> Zero for Half<T> {
    #[inline]
    fn zero() -> Self {
        Half(Zero::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Half<i32> {
    /// Spin `S = (m − 1)/2` of a center with multiplicity `m = 2 S + 1`.
    #[inline]
    pub fn spin_of_multiplicity(multiplicity: u8) -> Self {
        Half(i32::from(multiplicity) - 1)
    }

    /// Spin projection `m = n − S` of the `n`-th state (counting from the
    /// lowest) of a multiplet with spin `self`.
    #[inline]
    pub fn projection(self, n: u8) -> Self {
        Half(2 * i32::from(n)) - self
    }

    /// Returns `S (S + 1)`.
    #[inline]
    pub fn casimir(self) -> f64 {
        let s = self.to_f64();
        s * (s + 1.0)
    }
}
