use crate::io::nwk::{read_nwk, read_nwk_file};
use crate::make_internal_report;
use crate::tree::tree::{NodeKey, Tree};
use bio_types::phylogeny::Tree as NwkTree;
use eyre::{Report, WrapErr};
use indexmap::IndexMap;
use log::debug;
use std::io::Cursor;
use std::path::Path;

pub fn create_tree_from_nwk_file(filepath: impl AsRef<Path>) -> Result<Tree, Report> {
  let filepath = filepath.as_ref();
  let nwk_tree = read_nwk_file(filepath)?;
  create_tree_from_nwk_tree(&nwk_tree).wrap_err_with(|| format!("When reading file '{filepath:#?}'"))
}

pub fn create_tree_from_nwk_str(nwk_string: impl AsRef<str>) -> Result<Tree, Report> {
  let nwk_string = nwk_string.as_ref();
  create_tree_from_nwk_reader(Cursor::new(nwk_string))
    .wrap_err_with(|| format!("When reading Newick string:\n    '{nwk_string}'"))
}

pub fn create_tree_from_nwk_reader(s: impl std::io::Read) -> Result<Tree, Report> {
  let nwk_tree = read_nwk(s).wrap_err("When parsing Newick")?;
  create_tree_from_nwk_tree(&nwk_tree)
}

/// Copy a parsed Newick graph into a [Tree], keeping the order of children
pub fn create_tree_from_nwk_tree(nwk_tree: &NwkTree) -> Result<Tree, Report> {
  let mut tree = Tree::new();

  // Map of internal `nwk` node indices to `Tree` node keys
  let mut index_map = IndexMap::<usize, NodeKey>::new();
  for nwk_idx in nwk_tree.g.node_indices() {
    let inserted = tree.add_node(&nwk_tree.g[nwk_idx]);
    index_map.insert(nwk_idx.index(), inserted);
  }

  // Edges are stored in the order the parser created them, which keeps siblings in Newick order
  for (nwk_idx, nwk_edge) in nwk_tree.g.raw_edges().iter().enumerate() {
    let source = nwk_edge.source().index();
    let target = nwk_edge.target().index();

    let source = index_map
      .get(&source)
      .ok_or_else(|| make_internal_report!("When inserting edge {nwk_idx}: Node with index {source} not found"))?;

    let target = index_map
      .get(&target)
      .ok_or_else(|| make_internal_report!("When inserting edge {nwk_idx}: Node with index {target} not found"))?;

    tree.add_edge(*source, *target, Some(f64::from(nwk_edge.weight)))?;
  }

  tree.build()?;

  debug!(
    "Read tree with {} nodes and {} leaves",
    tree.num_nodes(),
    tree.num_leaves()
  );

  Ok(tree)
}

#[cfg(test)]
mod tests {
  use super::*;
  use itertools::Itertools;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  fn reads_tips_in_newick_order() -> Result<(), Report> {
    let tree = create_tree_from_nwk_str("((A:0.02,B:0.01)E:0.05,(C:0.01,D:0.01)F:0.05)root;")?;
    let tips = tree.tips().iter().map(|tip| tip.name.clone()).collect_vec();
    assert_eq!(tips, vec!["A", "B", "C", "D"]);
    assert_eq!(tree.root().map(|root| root.name.as_str()), Some("root"));
    Ok(())
  }

  #[rstest]
  fn reads_polytomy() -> Result<(), Report> {
    let tree = create_tree_from_nwk_str("((A:0.02,B:0.01,X:0.03)E:0.05,(C:0.01,D:0.01)F:0.05)root;")?;
    let a = tree.tips()[0].key;
    let e = tree.parent_of(a).unwrap();
    assert_eq!(e.name, "E");
    assert_eq!(e.children.len(), 3);
    Ok(())
  }

  #[rstest]
  fn unnamed_internal_nodes_get_empty_names() -> Result<(), Report> {
    let tree = create_tree_from_nwk_str("((A:0.02,B:0.01):0.05,(C:0.01,D:0.01):0.05)root;")?;
    let a = tree.tips()[0].key;
    assert_eq!(tree.parent_of(a).map(|node| node.name.as_str()), Some(""));
    Ok(())
  }
}
