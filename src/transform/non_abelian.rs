use std::sync::Arc;
use super::Transform;
use super::super::error::{invalid_argument, unsupported, Error};
use super::super::group::Group;
use super::super::index_converter::IndexConverter;
use super::super::space::{Block, Space};

/// Marks the rows of the multidimensional representations of a non-Abelian
/// group as folded into the block degeneracy.
///
/// `Symmetrizer` already stores only row 0 of each representation with the
/// degeneracy multiplied by its dimension.  This step verifies that the
/// space is in that state and records it, so that later steps can rely on
/// it.  Requires that exactly one non-Abelian group, this one, has been
/// applied, and may be applied only once.
#[derive(Clone, Debug)]
pub struct NonAbelianSimplifier<'a> {
    converter: &'a IndexConverter,
    group: Arc<Group>,
}

impl<'a> NonAbelianSimplifier<'a> {
    pub fn new(converter: &'a IndexConverter, group: Arc<Group>)
               -> Result<Self, Error> {
        if group.is_abelian() {
            return Err(invalid_argument(format!(
                "{} is Abelian; nothing to simplify", group.kind())));
        }
        Ok(Self { converter, group })
    }

    /// The degeneracy of a block labeled with a `d`-dimensional
    /// representation must be a multiple of `d`.
    fn check_block(&self, k: usize, block: &Block) -> Result<(), Error> {
        let r = block.properties.representations[k];
        let d = self.group.representations()[r].dimension as u32;
        let degeneracy = block.properties.degeneracy;
        if degeneracy % d != 0 {
            return Err(invalid_argument(format!(
                "block degeneracy {} is not a multiple of the dimension {} \
                 of {}", degeneracy, d,
                self.group.representations()[r].name)));
        }
        Ok(())
    }
}

impl<'a> Transform for NonAbelianSimplifier<'a> {
    fn name(&self) -> String {
        format!("NonAbelianSimplifier({})", self.group.kind())
    }

    fn apply(&self, mut space: Space) -> Result<Space, Error> {
        if space.history.non_abelian_simplified {
            return Err(unsupported(
                "NonAbelianSimplifier has already been applied"));
        }
        let non_abelian: Vec<_> = space.history.non_abelian_groups().collect();
        let k = match non_abelian.len() {
            0 => return Err(unsupported(
                "NonAbelianSimplifier requires a non-Abelian symmetry")),
            1 => non_abelian[0].0,
            _ => return Err(unsupported(
                "NonAbelianSimplifier cannot handle more than one \
                 non-Abelian symmetry")),
        };
        if !space.history.groups[k].is_same_group(&self.group) {
            return Err(unsupported(format!(
                "{} has not been applied", self.group.kind())));
        }
        for block in &space.blocks {
            self.check_block(k, block)?;
        }
        space.check_dimension(self.converter)?;
        space.history.non_abelian_simplified = true;
        debug!("{}: {} blocks", self.name(), space.blocks.len());
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::group::GroupKind;
    use super::super::Symmetrizer;

    fn triangle() -> Arc<Group> {
        Arc::new(Group::new(GroupKind::S3, vec![vec![1, 2, 0], vec![0, 2, 1]])
                 .unwrap())
    }

    #[test]
    fn test_simplify() {
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        let group = triangle();
        let symmetrized = Symmetrizer::new(&conv, group.clone()).unwrap()
            .apply(Space::trivial(&conv)).unwrap();
        let space = NonAbelianSimplifier::new(&conv, group).unwrap()
            .apply(symmetrized.clone()).unwrap();
        assert_eq!(space.blocks, symmetrized.blocks);
        space.check_dimension(&conv).unwrap();
        // three spin-1/2: A1 holds the quartet (4), E the two doublets
        let e = space.blocks.iter()
            .find(|b| b.properties.representations == vec![2])
            .unwrap();
        assert_eq!(e.properties.degeneracy, 2);
        assert_eq!(e.len(), 2);
        assert!(space.history.non_abelian_simplified);
    }

    #[test]
    fn test_inconsistent_degeneracy() {
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        let group = triangle();
        let mut space = Symmetrizer::new(&conv, group.clone()).unwrap()
            .apply(Space::trivial(&conv)).unwrap();
        for block in &mut space.blocks {
            block.properties.degeneracy = 1;
        }
        match NonAbelianSimplifier::new(&conv, group).unwrap().apply(space) {
            Err(Error::InvalidArgument(_)) => (),
            r => panic!("unexpected: {:?}", r.map(|s| s.to_string())),
        }
    }

    #[test]
    fn test_rejections() {
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        let group = triangle();
        let simplifier = NonAbelianSimplifier::new(&conv, group.clone()).unwrap();
        // before the group has been applied
        assert!(simplifier.apply(Space::trivial(&conv)).is_err());
        let space = Symmetrizer::new(&conv, group.clone()).unwrap()
            .apply(Space::trivial(&conv)).unwrap();
        let space = simplifier.apply(space).unwrap();
        // twice
        match simplifier.apply(space) {
            Err(Error::Unsupported(_)) => (),
            r => panic!("unexpected: {:?}", r.map(|s| s.to_string())),
        }
        let swap = Arc::new(Group::new(GroupKind::S2, vec![vec![1, 0, 2]])
                            .unwrap());
        assert!(NonAbelianSimplifier::new(&conv, swap).is_err());
    }
}
