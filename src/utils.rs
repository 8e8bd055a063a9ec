use std::hash::Hash;
use conv::ValueInto;
use fnv::{FnvHashMap, FnvHashSet};

/// Shorthand for casting numbers.  Panics if out of range.
pub fn cast<T: ValueInto<U>, U>(x: T) -> U {
    x.value_into().expect("integer conversion failure")
}

/// Same as `cast`, but returns `None` if out of range.
pub fn try_cast<T: ValueInto<U>, U>(x: T) -> Option<U> {
    x.value_into().ok()
}

pub fn default_hash_map<K: Hash + Eq, V>() -> FnvHashMap<K, V> {
    Default::default()
}

pub fn default_hash_set<K: Hash + Eq>() -> FnvHashSet<K> {
    Default::default()
}

/// Error tolerance used for comparing floating-point numbers.
///
/// Two numbers `x` and `y` are considered equal if
/// `|x − y| ≤ abserr + relerr × max(|x|, |y|)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Toler {
    pub relerr: f64,
    pub abserr: f64,
}

/// `{ relerr: 1e-10, abserr: 1e-10 }`
impl Default for Toler {
    fn default() -> Self {
        Self {
            relerr: 1e-10,
            abserr: 1e-10,
        }
    }
}

impl Toler {
    pub fn is_eq(&self, x: f64, y: f64) -> bool {
        (x - y).abs() <= self.abserr + self.relerr * f64::max(x.abs(), y.abs())
    }
}
