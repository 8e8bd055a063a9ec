use rayon::prelude::*;
use super::Transform;
use super::super::error::Error;
use super::super::index_converter::IndexConverter;
use super::super::space::{Block, BlockProperties, Space};

/// Splits every block by total projection `∑ n[i]`.
///
/// Each basis vector is routed by the total projection of its first
/// lexicographic index.  Basis vectors must therefore already be homogeneous
/// in total projection, which holds for every vector produced by a
/// permutation symmetrizer.  Debug builds verify this.
#[derive(Clone, Copy, Debug)]
pub struct TzSorter<'a> {
    converter: &'a IndexConverter,
}

impl<'a> TzSorter<'a> {
    pub fn new(converter: &'a IndexConverter) -> Self {
        Self { converter }
    }

    fn sort_block(&self, block: Block) -> Vec<Block> {
        let max_tz = self.converter.max_total_projection();
        let mut children: Vec<Block> = (0 ..= max_tz).map(|tz| {
            Block::new(BlockProperties {
                total_projection: Some(tz),
                .. block.properties.clone()
            })
        }).collect();
        for v in block.basis {
            let first = match v.first_index() {
                Some(first) => first,
                None => continue,
            };
            let tz = self.converter.decode_total_projection(first);
            debug_assert!(v.indices().all(|lex| {
                self.converter.decode_total_projection(lex) == tz
            }), "basis vector is not homogeneous in total projection");
            children[tz as usize].basis.push(v);
        }
        children.retain(|b| !b.is_empty());
        children
    }
}

impl<'a> Transform for TzSorter<'a> {
    fn name(&self) -> String {
        "TzSorter".to_owned()
    }

    fn apply(&self, mut space: Space) -> Result<Space, Error> {
        let blocks = space.take_blocks();
        let num_parents = blocks.len();
        space.blocks = blocks.into_par_iter()
            .map(|block| self.sort_block(block))
            .collect::<Vec<_>>()
            .into_iter()
            .flat_map(|children| children)
            .collect();
        space.history.tz_sorted = true;
        debug!("TzSorter: {} -> {} blocks", num_parents, space.blocks.len());
        Ok(space)
    }
}
