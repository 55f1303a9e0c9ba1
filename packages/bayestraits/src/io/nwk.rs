use crate::io::fs::read_file_to_string;
use crate::make_error;
use crate::tree::translation::TranslationTable;
use crate::tree::tree::Tree;
use bio::io::newick;
use bio_types::phylogeny::Tree as NwkTree;
use eyre::{Report, WrapErr};
use log::warn;
use smart_default::SmartDefault;
use std::io::{Read, Write};
use std::path::Path;

pub fn read_nwk_file(nwk_file_path: impl AsRef<Path>) -> Result<NwkTree, Report> {
  let nwk_file_path = nwk_file_path.as_ref();
  let nwk_str = read_file_to_string(nwk_file_path)?;
  read_nwk(nwk_str.as_bytes()).wrap_err_with(|| format!("When parsing Newick file {nwk_file_path:#?}"))
}

pub fn read_nwk(reader: impl Read) -> Result<NwkTree, Report> {
  let mut nwk_tree = newick::read(reader)?;

  nwk_tree.g.node_weights_mut().for_each(|weight| {
    if weight == "N/A" {
      *weight = "".to_owned();
    }
  });

  Ok(nwk_tree)
}

#[derive(Clone, SmartDefault)]
pub struct WriteNwkOptions {
  /// Write labels of internal nodes. The root label is always written.
  #[default = true]
  pub internal_names: bool,
}

pub fn write_nwk_str(tree: &Tree, translation: &TranslationTable, options: &WriteNwkOptions) -> Result<String, Report> {
  let mut buf = Vec::new();
  write_nwk_writer(&mut buf, tree, translation, options)?;
  Ok(String::from_utf8(buf)?)
}

/// Writes the tree in Newick format. Leaf names go through the translation table.
pub fn write_nwk_writer(
  writer: &mut impl Write,
  tree: &Tree,
  translation: &TranslationTable,
  options: &WriteNwkOptions,
) -> Result<(), Report> {
  let Some(root) = tree.root() else {
    return make_error!("When converting tree to Newick format: No root found.");
  };

  let mut stack = vec![(root, 0_usize)];
  while let Some((node, child_visit)) = stack.pop() {
    let children = tree.children_of(node.key);

    if child_visit < children.len() {
      stack.push((node, child_visit + 1));

      if child_visit == 0 {
        write!(writer, "(")?;
      } else {
        write!(writer, ",")?;
      }

      stack.push((children[child_visit], 0));
    } else {
      if child_visit > 0 {
        write!(writer, ")")?;
      }

      if node.is_leaf() {
        write!(writer, "{}", translation.translate(&node.name))?;
      } else if node.is_root() || options.internal_names {
        write!(writer, "{}", node.name)?;
      }

      if let Some(weight) = node.branch_length.filter(|_| !node.is_root()) {
        write!(writer, ":{}", format_weight(weight))?;
      }
    }
  }

  write!(writer, ";")?;

  Ok(())
}

/// Newick weights are read in single precision, so they are printed back in single precision too,
/// which reproduces the digits of the input.
pub fn format_weight(weight: f64) -> String {
  if !weight.is_finite() {
    warn!("When converting tree to Newick: Weight is invalid: '{weight}'");
  }
  #[allow(clippy::cast_possible_truncation)]
  let weight = weight as f32;
  format!("{weight}")
}
