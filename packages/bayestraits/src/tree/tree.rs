use crate::make_error;
use eyre::Report;
use itertools::Itertools;

pub type NodeKey = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
  pub key: NodeKey,
  pub name: String,
  pub parent: Option<NodeKey>,
  pub children: Vec<NodeKey>,
  pub branch_length: Option<f64>,
}

impl TreeNode {
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  #[inline]
  pub const fn is_root(&self) -> bool {
    self.parent.is_none()
  }
}

/// Rooted tree stored as an arena of nodes. Nodes refer to each other by [NodeKey] only.
///
/// Children are kept in insertion order, which for trees read from Newick is the left-to-right order of the
/// Newick string. All traversals are iterative, so tree depth is not limited by the call stack.
#[derive(Clone, Debug, Default)]
pub struct Tree {
  nodes: Vec<TreeNode>,
  root: Option<NodeKey>,
}

impl Tree {
  pub const fn new() -> Self {
    Self {
      nodes: Vec::new(),
      root: None,
    }
  }

  pub fn add_node(&mut self, name: impl AsRef<str>) -> NodeKey {
    let key = self.nodes.len();
    self.nodes.push(TreeNode {
      key,
      name: name.as_ref().to_owned(),
      parent: None,
      children: vec![],
      branch_length: None,
    });
    key
  }

  /// Attach `child` as the last child of `parent`. The branch length is stored on the child.
  pub fn add_edge(&mut self, parent: NodeKey, child: NodeKey, branch_length: Option<f64>) -> Result<(), Report> {
    if parent >= self.nodes.len() {
      return make_error!("When adding a tree edge {parent}->{child}: Node {parent} not found.");
    }
    if child >= self.nodes.len() {
      return make_error!("When adding a tree edge {parent}->{child}: Node {child} not found.");
    }
    if parent == child {
      return make_error!("When adding a tree edge {parent}->{child}: Attempted to connect node {parent} to itself.");
    }
    if let Some(existing) = self.nodes[child].parent {
      return make_error!(
        "When adding a tree edge {parent}->{child}: Node {child} already has a parent node {existing}."
      );
    }

    self.nodes[child].parent = Some(parent);
    self.nodes[child].branch_length = branch_length;
    self.nodes[parent].children.push(child);
    Ok(())
  }

  /// Finalize construction: find the single root and make sure every node hangs off it.
  pub fn build(&mut self) -> Result<(), Report> {
    let roots = self.nodes.iter().filter(|node| node.is_root()).map(|node| node.key).collect_vec();
    let root = match roots.as_slice() {
      [root] => *root,
      [] => return make_error!("When building tree: No root found."),
      _ => {
        return make_error!(
          "When building tree: Expected exactly one root, but found {}: {}",
          roots.len(),
          roots.iter().map(|key| self.describe(*key)).join(", ")
        )
      }
    };
    self.root = Some(root);

    let n_reachable = self.preorder_from(root).len();
    if n_reachable != self.nodes.len() {
      self.root = None;
      return make_error!(
        "When building tree: Only {n_reachable} of {} nodes are reachable from the root",
        self.nodes.len()
      );
    }

    Ok(())
  }

  pub fn root(&self) -> Option<&TreeNode> {
    self.root.and_then(|key| self.node(key))
  }

  pub fn node(&self, key: NodeKey) -> Option<&TreeNode> {
    self.nodes.get(key)
  }

  pub fn parent_of(&self, key: NodeKey) -> Option<&TreeNode> {
    self.node(key)?.parent.and_then(|parent| self.node(parent))
  }

  pub fn children_of(&self, key: NodeKey) -> Vec<&TreeNode> {
    self
      .node(key)
      .map(|node| node.children.iter().filter_map(|&child| self.node(child)).collect_vec())
      .unwrap_or_default()
  }

  /// Children of a node split into consecutive runs of leaves and of internal nodes.
  ///
  /// Flattening the groups gives back the children in their original order.
  pub fn child_groups(&self, key: NodeKey) -> Vec<Vec<&TreeNode>> {
    let groups = self.children_of(key).into_iter().chunk_by(|child| child.is_leaf());
    let groups = groups.into_iter().map(|(_, group)| group.collect_vec()).collect_vec();
    groups
  }

  pub fn num_nodes(&self) -> usize {
    self.nodes.len()
  }

  pub fn num_leaves(&self) -> usize {
    self.nodes.iter().filter(|node| node.is_leaf()).count()
  }

  /// Leaves of the whole tree in preorder, left to right. Empty if the tree is not built.
  pub fn tips(&self) -> Vec<&TreeNode> {
    self.root.map(|root| self.leaves_under(root)).unwrap_or_default()
  }

  /// All leaves of the subtree rooted at `key`, in preorder. A leaf yields just itself.
  pub fn leaves_under(&self, key: NodeKey) -> Vec<&TreeNode> {
    self.preorder_from(key).into_iter().filter(|node| node.is_leaf()).collect_vec()
  }

  fn preorder_from(&self, key: NodeKey) -> Vec<&TreeNode> {
    let mut visited = Vec::new();
    let mut stack = self.node(key).into_iter().collect_vec();
    while let Some(node) = stack.pop() {
      visited.push(node);
      stack.extend(node.children.iter().rev().filter_map(|&child| self.node(child)));
    }
    visited
  }

  fn describe(&self, key: NodeKey) -> String {
    match self.node(key) {
      Some(node) if !node.name.is_empty() => format!("'{}' (#{key})", node.name),
      _ => format!("#{key}"),
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::o;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  /// ((A,B)E,(C,D)F)root
  #[rustfmt::skip]
  pub fn get_binary_tree() -> Result<Tree, Report> {
    let mut tree = Tree::new();
    let root = tree.add_node("root");
    let    e = tree.add_node("E");
    let    a = tree.add_node("A");
    let    b = tree.add_node("B");
    let    f = tree.add_node("F");
    let    c = tree.add_node("C");
    let    d = tree.add_node("D");

    tree.add_edge(root, e, Some(0.05))?;
    tree.add_edge(e,    a, Some(0.02))?;
    tree.add_edge(e,    b, Some(0.01))?;
    tree.add_edge(root, f, Some(0.05))?;
    tree.add_edge(f,    c, Some(0.01))?;
    tree.add_edge(f,    d, Some(0.01))?;

    tree.build()?;
    Ok(tree)
  }

  /// ((A,B,B_prime)E,(C,D)F)root
  #[rustfmt::skip]
  pub fn get_polytomy_tree() -> Result<Tree, Report> {
    let mut tree = Tree::new();
    let root = tree.add_node("root");
    let    e = tree.add_node("E");
    let    a = tree.add_node("A");
    let    b = tree.add_node("B");
    let   bp = tree.add_node("B_prime");
    let    f = tree.add_node("F");
    let    c = tree.add_node("C");
    let    d = tree.add_node("D");

    tree.add_edge(root, e,  Some(0.05))?;
    tree.add_edge(e,    a,  Some(0.02))?;
    tree.add_edge(e,    b,  Some(0.01))?;
    tree.add_edge(e,    bp, Some(0.03))?;
    tree.add_edge(root, f,  Some(0.05))?;
    tree.add_edge(f,    c,  Some(0.01))?;
    tree.add_edge(f,    d,  Some(0.01))?;

    tree.build()?;
    Ok(tree)
  }

  /// (A,(B,C)G,D,E,(F,H)I)root: leaves and internal children interleaved under the root
  #[rustfmt::skip]
  pub fn get_mixed_tree() -> Result<Tree, Report> {
    let mut tree = Tree::new();
    let root = tree.add_node("root");
    let    a = tree.add_node("A");
    let    g = tree.add_node("G");
    let    b = tree.add_node("B");
    let    c = tree.add_node("C");
    let    d = tree.add_node("D");
    let    e = tree.add_node("E");
    let    i = tree.add_node("I");
    let    f = tree.add_node("F");
    let    h = tree.add_node("H");

    tree.add_edge(root, a, None)?;
    tree.add_edge(root, g, None)?;
    tree.add_edge(g,    b, None)?;
    tree.add_edge(g,    c, None)?;
    tree.add_edge(root, d, None)?;
    tree.add_edge(root, e, None)?;
    tree.add_edge(root, i, None)?;
    tree.add_edge(i,    f, None)?;
    tree.add_edge(i,    h, None)?;

    tree.build()?;
    Ok(tree)
  }

  fn names(nodes: &[&TreeNode]) -> Vec<String> {
    nodes.iter().map(|node| node.name.clone()).collect_vec()
  }

  #[rstest]
  fn tips_are_in_preorder() -> Result<(), Report> {
    let tree = get_polytomy_tree()?;
    assert_eq!(names(&tree.tips()), vec!["A", "B", "B_prime", "C", "D"]);
    assert_eq!(tree.num_leaves(), 5);
    assert_eq!(tree.num_nodes(), 8);
    Ok(())
  }

  #[rstest]
  fn leaves_under_internal_node_and_leaf() -> Result<(), Report> {
    let tree = get_mixed_tree()?;
    let root = tree.root().unwrap().key;
    assert_eq!(names(&tree.leaves_under(root)), vec!["A", "B", "C", "D", "E", "F", "H"]);

    let a = tree.tips()[0].key;
    assert_eq!(names(&tree.leaves_under(a)), vec!["A"]);
    Ok(())
  }

  #[rstest]
  fn child_groups_split_leaf_and_internal_runs() -> Result<(), Report> {
    let tree = get_mixed_tree()?;
    let root = tree.root().unwrap().key;
    let groups = tree.child_groups(root).iter().map(|group| names(group)).collect_vec();
    assert_eq!(
      groups,
      vec![
        vec![o!("A")],
        vec![o!("G")],
        vec![o!("D"), o!("E")],
        vec![o!("I")],
      ]
    );
    Ok(())
  }

  #[rstest]
  fn parent_navigation() -> Result<(), Report> {
    let tree = get_binary_tree()?;
    let c = tree.tips()[2];
    assert_eq!(c.name, "C");
    assert_eq!(tree.parent_of(c.key).map(|node| node.name.as_str()), Some("F"));
    assert!(tree.parent_of(tree.root().unwrap().key).is_none());
    assert_eq!(c.branch_length, Some(0.01));
    Ok(())
  }

  #[rstest]
  fn rejects_forest() {
    let mut tree = Tree::new();
    tree.add_node("A");
    tree.add_node("B");
    let err = tree.build().unwrap_err();
    assert!(err.to_string().contains("Expected exactly one root"));
    assert!(tree.tips().is_empty());
  }

  #[rstest]
  fn rejects_second_parent() -> Result<(), Report> {
    let mut tree = Tree::new();
    let p1 = tree.add_node("P1");
    let p2 = tree.add_node("P2");
    let a = tree.add_node("A");
    tree.add_edge(p1, a, None)?;
    assert!(tree.add_edge(p2, a, None).is_err());
    Ok(())
  }

  #[rstest]
  fn rejects_unreachable_cycle() -> Result<(), Report> {
    let mut tree = Tree::new();
    let root = tree.add_node("root");
    let a = tree.add_node("A");
    let x = tree.add_node("X");
    let y = tree.add_node("Y");
    tree.add_edge(root, a, None)?;
    tree.add_edge(x, y, None)?;
    tree.add_edge(y, x, None)?;
    let err = tree.build().unwrap_err();
    assert!(err.to_string().contains("reachable from the root"));
    Ok(())
  }
}
