use crate::error::BayesTraitsError;
use crate::tree::translation::TranslationTable;
use crate::tree::tree::{NodeKey, Tree, TreeNode};
use itertools::Itertools;

/// Taxa that identify the immediate ancestor of one tip to BayesTraits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiblingGroup {
  /// Label under which BayesTraits reports the reconstructed ancestor
  pub ancestor_label: String,

  /// Every leaf below the tip's parent, translated, in encounter order. Includes the tip itself.
  pub taxa: Vec<String>,

  /// Same as `taxa`, but without the tip itself
  pub siblings: Vec<String>,
}

pub fn ancestor_label(tip_name: &str) -> String {
  format!("parent_of_{tip_name}")
}

/// Collects the leaves that, together with the tip, define the tip's parent node.
///
/// The parent's children are walked group by group. A leaf child contributes its own name and an internal
/// child contributes its whole leaf set, so polytomies and nested clades need no special handling. Names are
/// not deduplicated.
pub fn resolve_siblings(
  tree: &Tree,
  tip: NodeKey,
  translation: &TranslationTable,
) -> Result<SiblingGroup, BayesTraitsError> {
  let tip_name = tree.node(tip).map(|node| node.name.clone()).unwrap_or_default();
  let empty = || BayesTraitsError::EmptySiblingSet { tip: tip_name.clone() };

  let parent = tree.parent_of(tip).ok_or_else(empty)?;

  let mut leaves: Vec<&TreeNode> = vec![];
  for group in tree.child_groups(parent.key) {
    for entry in group {
      if entry.is_leaf() {
        leaves.push(entry);
      } else {
        leaves.extend(tree.leaves_under(entry.key));
      }
    }
  }

  let taxa = leaves
    .iter()
    .map(|leaf| translation.translate(&leaf.name).to_owned())
    .collect_vec();

  let siblings = leaves
    .iter()
    .filter(|leaf| leaf.key != tip)
    .map(|leaf| translation.translate(&leaf.name).to_owned())
    .collect_vec();

  if siblings.is_empty() {
    return Err(empty());
  }

  Ok(SiblingGroup {
    ancestor_label: ancestor_label(&tip_name),
    taxa,
    siblings,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tree::tree::tests::{get_binary_tree, get_mixed_tree, get_polytomy_tree};
  use eyre::Report;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  fn tip_key(tree: &Tree, name: &str) -> NodeKey {
    tree.tips().into_iter().find(|tip| tip.name == name).unwrap().key
  }

  #[rstest]
  fn binary_tree_sibling() -> Result<(), Report> {
    let tree = get_binary_tree()?;
    let group = resolve_siblings(&tree, tip_key(&tree, "A"), &TranslationTable::new())?;
    assert_eq!(group.siblings, vec!["B"]);
    assert_eq!(group.taxa, vec!["A", "B"]);
    assert_eq!(group.ancestor_label, "parent_of_A");
    Ok(())
  }

  #[rstest]
  fn polytomy_siblings_in_encounter_order() -> Result<(), Report> {
    let tree = get_polytomy_tree()?;
    let group = resolve_siblings(&tree, tip_key(&tree, "A"), &TranslationTable::new())?;
    assert_eq!(group.siblings, vec!["B", "B_prime"]);

    let group = resolve_siblings(&tree, tip_key(&tree, "B_prime"), &TranslationTable::new())?;
    assert_eq!(group.siblings, vec!["A", "B"]);
    assert_eq!(group.taxa, vec!["A", "B", "B_prime"]);
    Ok(())
  }

  #[rstest]
  fn internal_siblings_are_flattened() -> Result<(), Report> {
    let tree = get_mixed_tree()?;
    let group = resolve_siblings(&tree, tip_key(&tree, "D"), &TranslationTable::new())?;
    assert_eq!(group.siblings, vec!["A", "B", "C", "E", "F", "H"]);
    Ok(())
  }

  #[rstest]
  fn siblings_are_translated() -> Result<(), Report> {
    let tree = get_binary_tree()?;
    let translation = TranslationTable::from_tips(&tree);
    let group = resolve_siblings(&tree, tip_key(&tree, "D"), &translation)?;
    assert_eq!(group.taxa, vec!["2", "3"]);
    assert_eq!(group.siblings, vec!["2"]);
    assert_eq!(group.ancestor_label, "parent_of_D");
    Ok(())
  }

  #[rstest]
  fn unary_parent_has_no_siblings() -> Result<(), Report> {
    // ((A)X,B)root
    let mut tree = Tree::new();
    let root = tree.add_node("root");
    let x = tree.add_node("X");
    let a = tree.add_node("A");
    let b = tree.add_node("B");
    tree.add_edge(root, x, Some(0.2))?;
    tree.add_edge(x, a, Some(0.1))?;
    tree.add_edge(root, b, Some(0.3))?;
    tree.build()?;

    let err = resolve_siblings(&tree, tip_key(&tree, "A"), &TranslationTable::new()).unwrap_err();
    assert_eq!(err, BayesTraitsError::EmptySiblingSet { tip: "A".to_owned() });
    Ok(())
  }

  #[rstest]
  fn lone_root_has_no_siblings() {
    let mut tree = Tree::new();
    let root = tree.add_node("A");
    tree.build().unwrap();
    let err = resolve_siblings(&tree, root, &TranslationTable::new()).unwrap_err();
    assert!(matches!(err, BayesTraitsError::EmptySiblingSet { .. }));
  }
}
