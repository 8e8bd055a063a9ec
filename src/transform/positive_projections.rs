use super::Transform;
use super::super::error::{unsupported, Error};
use super::super::index_converter::IndexConverter;
use super::super::space::Space;

/// Exploits the mirror symmetry `n[i] → m[i] − 1 − n[i]` of operators that
/// are even under time reversal: the block with total projection `tz`
/// has the same spectrum as the block with `max − tz`.
///
/// Blocks below the midpoint are kept with doubled degeneracy, the block at
/// the midpoint (if any) is kept as is, and blocks above it are dropped.
/// Requires a space sorted by `TzSorter`.
#[derive(Clone, Copy, Debug)]
pub struct PositiveProjectionsEliminator<'a> {
    converter: &'a IndexConverter,
}

impl<'a> PositiveProjectionsEliminator<'a> {
    pub fn new(converter: &'a IndexConverter) -> Self {
        Self { converter }
    }
}

impl<'a> Transform for PositiveProjectionsEliminator<'a> {
    fn name(&self) -> String {
        "PositiveProjectionsEliminator".to_owned()
    }

    fn apply(&self, mut space: Space) -> Result<Space, Error> {
        if !space.history.tz_sorted {
            return Err(unsupported(
                "PositiveProjectionsEliminator requires TzSorter"));
        }
        if space.history.positive_projections_eliminated {
            return Err(unsupported(
                "PositiveProjectionsEliminator has already been applied"));
        }
        let max_tz = self.converter.max_total_projection();
        let blocks = space.take_blocks();
        let num_parents = blocks.len();
        for mut block in blocks {
            let tz = block.properties.total_projection.ok_or_else(|| {
                unsupported("block without total projection")
            })?;
            if 2 * tz < max_tz {
                block.properties.degeneracy *= 2;
                space.blocks.push(block);
            } else if 2 * tz == max_tz {
                space.blocks.push(block);
            }
        }
        space.history.positive_projections_eliminated = true;
        debug!("{}: {} -> {} blocks",
               self.name(), num_parents, space.blocks.len());
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::TzSorter;

    #[test]
    fn test_eliminate() {
        for mults in vec![vec![2, 2, 2], vec![3, 3], vec![2, 3]] {
            let conv = IndexConverter::new(mults).unwrap();
            let ppe = PositiveProjectionsEliminator::new(&conv);
            assert!(ppe.apply(Space::trivial(&conv)).is_err());
            let space = TzSorter::new(&conv)
                .apply(Space::trivial(&conv)).unwrap();
            let space = ppe.apply(space).unwrap();
            space.check_dimension(&conv).unwrap();
            for block in &space.blocks {
                let tz = block.properties.total_projection.unwrap();
                assert!(2 * tz <= conv.max_total_projection());
            }
            assert!(ppe.apply(space).is_err());
        }
    }
}
