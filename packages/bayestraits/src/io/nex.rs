use crate::io::file::write_lines;
use crate::io::nwk::{write_nwk_str, WriteNwkOptions};
use crate::tree::translation::TranslationTable;
use crate::tree::tree::Tree;
use eyre::{Report, WrapErr};
use std::path::Path;

/// Lines of a NEXUS trees block in the form BayesTraits reads.
///
/// Tips are written by their translated identifiers and listed in a `translate` table. Internal node labels
/// other than the root are left out of the tree.
pub fn nex_lines_from_tree(
  tree: &Tree,
  translation: &TranslationTable,
  tree_name: &str,
) -> Result<Vec<String>, Report> {
  let nwk = write_nwk_str(tree, translation, &WriteNwkOptions { internal_names: false })?;

  let mut lines = vec!["#NEXUS".to_owned(), "begin trees;".to_owned()];

  if !translation.is_empty() {
    lines.push("\ttranslate".to_owned());
    let n_entries = translation.len();
    lines.extend(translation.iter().enumerate().map(|(i, (name, id))| {
      let terminator = if i + 1 == n_entries { ';' } else { ',' };
      format!("\t\t{id} {name}{terminator}")
    }));
  }

  lines.push(format!("\t\ttree {tree_name} = {nwk}"));
  lines.push("end;".to_owned());

  Ok(lines)
}

pub fn nex_write_file(
  filepath: impl AsRef<Path>,
  tree: &Tree,
  translation: &TranslationTable,
  tree_name: &str,
) -> Result<(), Report> {
  let filepath = filepath.as_ref();
  let lines = nex_lines_from_tree(tree, translation, tree_name)?
    .into_iter()
    .map(|line| line + "\n")
    .collect::<Vec<_>>();
  write_lines(filepath, &lines).wrap_err_with(|| format!("When writing NEXUS file '{filepath:#?}'"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::o;
  use crate::tree::tree::tests::get_binary_tree;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  fn writes_translate_block_and_tree() -> Result<(), Report> {
    let tree = get_binary_tree()?;
    let translation = TranslationTable::from_tips(&tree);
    let lines = nex_lines_from_tree(&tree, &translation, "tree1")?;
    assert_eq!(
      lines,
      vec![
        o!("#NEXUS"),
        o!("begin trees;"),
        o!("\ttranslate"),
        o!("\t\t0 A,"),
        o!("\t\t1 B,"),
        o!("\t\t2 C,"),
        o!("\t\t3 D;"),
        o!("\t\ttree tree1 = ((0:0.02,1:0.01):0.05,(2:0.01,3:0.01):0.05)root;"),
        o!("end;"),
      ]
    );
    Ok(())
  }

  #[rstest]
  fn omits_translate_block_for_empty_table() -> Result<(), Report> {
    let tree = get_binary_tree()?;
    let lines = nex_lines_from_tree(&tree, &TranslationTable::new(), "tree1")?;
    assert_eq!(lines[2], "\t\ttree tree1 = ((A:0.02,B:0.01):0.05,(C:0.01,D:0.01):0.05)root;");
    assert_eq!(lines.len(), 4);
    Ok(())
  }
}
