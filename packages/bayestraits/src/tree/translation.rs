use crate::tree::tree::Tree;
use indexmap::IndexMap;

/// Maps tip names on the tree to the identifiers BayesTraits knows them by (usually the keys of the NEXUS
/// `translate` block). Names missing from the table pass through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
  ids: IndexMap<String, String>,
}

impl TranslationTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number every tip by its position in preorder, starting at zero
  pub fn from_tips(tree: &Tree) -> Self {
    tree
      .tips()
      .into_iter()
      .enumerate()
      .map(|(i, tip)| (tip.name.clone(), i))
      .collect()
  }

  /// Returns the previous identifier if the name was already present
  pub fn insert(&mut self, name: impl Into<String>, id: impl ToString) -> Option<String> {
    self.ids.insert(name.into(), id.to_string())
  }

  pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
    self.ids.get(name).map_or(name, String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  /// Entries as `(name, id)` in insertion order
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.ids.iter().map(|(name, id)| (name.as_str(), id.as_str()))
  }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TranslationTable {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut table = Self::new();
    for (name, id) in iter {
      table.insert(name, id);
    }
    table
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tree::tree::tests::get_polytomy_tree;
  use eyre::Report;
  use itertools::Itertools;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  fn numbers_tips_in_preorder() -> Result<(), Report> {
    let table = TranslationTable::from_tips(&get_polytomy_tree()?);
    assert_eq!(
      table.iter().collect_vec(),
      vec![("A", "0"), ("B", "1"), ("B_prime", "2"), ("C", "3"), ("D", "4")]
    );
    Ok(())
  }

  #[rstest]
  #[case("469810", "645058788")]
  #[case("457471", "645058789")]
  #[case("unknown", "unknown")]
  fn translates_or_passes_through(#[case] name: &str, #[case] expected: &str) {
    let table: TranslationTable = [("469810", "645058788"), ("457471", "645058789")].into_iter().collect();
    assert_eq!(table.translate(name), expected);
  }

  #[rstest]
  fn empty_table_passes_everything_through() {
    let table = TranslationTable::new();
    assert!(table.is_empty());
    assert_eq!(table.translate("A"), "A");
  }
}
