//! Reductions of a `Space` into finer blocks.
//!
//! Every transform consumes a `Space` and returns a new one.  The total
//! dimension `∑ len × degeneracy` is conserved.
pub mod non_abelian;
pub mod positive_projections;
pub mod symmetrizer;
pub mod tz_sorter;

pub use self::non_abelian::NonAbelianSimplifier;
pub use self::positive_projections::PositiveProjectionsEliminator;
pub use self::symmetrizer::Symmetrizer;
pub use self::tz_sorter::TzSorter;

use super::error::Error;
use super::space::Space;

pub trait Transform {
    fn name(&self) -> String;

    fn apply(&self, space: Space) -> Result<Space, Error>;
}
