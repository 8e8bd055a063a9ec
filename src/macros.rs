/// Check whether two `f64` numbers are equal within the given
/// [`Toler`](utils/struct.Toler.html).
///
/// ```
/// #[macro_use]
/// extern crate spinblock;
///
/// use spinblock::utils::Toler;
///
/// fn main() {
///     toler_assert_eq!(Toler { abserr: 1e-2, relerr: 1e-3 }, 10.0, 10.02);
/// }
/// ```
#[macro_export]
macro_rules! toler_assert_eq {
    ($toler:expr, $left:expr, $right:expr) => {
        let toler = &$toler;
        let left = $left;
        let right = $right;
        assert!(toler.is_eq(left, right),
                "{} does not equal to {} within {:?}",
                left, right, toler)
    }
}

/// Check that two slices of `f64` agree elementwise within the given
/// [`Toler`](utils/struct.Toler.html).
#[macro_export]
macro_rules! toler_assert_all_eq {
    ($toler:expr, $left:expr, $right:expr) => {
        let toler = &$toler;
        let left: &[f64] = &$left;
        let right: &[f64] = &$right;
        assert_eq!(left.len(), right.len(), "lengths differ");
        for (i, (&l, &r)) in left.iter().zip(right).enumerate() {
            assert!(toler.is_eq(l, r),
                    "[{}]: {} does not equal to {} within {:?}",
                    i, l, r, toler)
        }
    }
}
