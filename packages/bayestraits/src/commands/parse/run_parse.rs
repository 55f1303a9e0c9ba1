use crate::commands::parse::parse_args::BayesTraitsParseArgs;
use crate::io::fs::{add_extension, read_file_to_string};
use crate::make_error;
use crate::output::parse::{parse_reconstruction_output_str, ReconstructionOutput};
use crate::output::table::write_reconstruction_table;
use eyre::{Report, WrapErr};
use log::{info, warn};
use std::path::{Path, PathBuf};

pub fn run_parse(args: &BayesTraitsParseArgs) -> Result<(), Report> {
  let log = read_file_to_string(&args.input_log)?;
  let output = parse_reconstruction_output_str(&log)
    .wrap_err_with(|| format!("When parsing BayesTraits output {:#?}", args.input_log))?;
  write_reconstruction_tables(&args.output, &output, args.all_trees)
}

/// Table path for one tree when a table is written per tree
pub fn tree_table_path(output: impl AsRef<Path>, tree_number: usize) -> PathBuf {
  add_extension(output, format!("tree{tree_number}"))
}

/// Write the table of the first tree to `output`, or with `all_trees`, one table per tree next to it
pub fn write_reconstruction_tables(
  output: impl AsRef<Path>,
  reconstructions: &ReconstructionOutput,
  all_trees: bool,
) -> Result<(), Report> {
  let output = output.as_ref();

  let Some(first) = reconstructions.first() else {
    return make_error!("BayesTraits output contains no reconstructions");
  };

  if all_trees {
    for (tree_number, reconstruction) in &reconstructions.trees {
      let filepath = tree_table_path(output, *tree_number);
      write_reconstruction_table(&filepath, reconstruction)?;
      info!("Wrote reconstruction of tree {tree_number} to {filepath:#?}");
    }
    return Ok(());
  }

  if reconstructions.len() > 1 {
    warn!(
      "BayesTraits output contains {} trees. Writing only tree {}. Use --all-trees to write every tree.",
      reconstructions.len(),
      first.tree_number
    );
  }

  write_reconstruction_table(output, first)?;
  info!(
    "Wrote reconstruction of {} nodes and {} characters to {output:#?}",
    first.calls.len(),
    first.characters.len()
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;
  use std::fs;
  use tempfile::TempDir;

  #[rstest]
  #[case("out/reconstruction.tab", 1, "out/reconstruction.tab.tree1")]
  #[case("reconstruction", 12, "reconstruction.tree12")]
  fn names_per_tree_tables(#[case] output: &str, #[case] tree_number: usize, #[case] expected: &str) {
    assert_eq!(tree_table_path(output, tree_number), PathBuf::from(expected));
  }

  #[rstest]
  fn refuses_to_write_empty_output() {
    let result = write_reconstruction_tables("-", &ReconstructionOutput::default(), false);
    assert!(result.is_err());
  }

  const LOG: &str = "\
BayesTraits V2.0 (Feb 2013)
Tree No\tLh\tparent_of_A-Character(1)-State(0)\tparent_of_A-Character(1)-State(1)
1\t-1.5\t0.2\t0.8
2\t-1.7\t0.00001\t0.99999
";

  #[rstest]
  #[case(false, vec![("out.tsv", "#Trait\t1\nparent_of_A\t1|0.8\n")])]
  #[case(true, vec![
    ("out.tsv.tree1", "#Trait\t1\nparent_of_A\t1|0.8\n"),
    ("out.tsv.tree2", "#Trait\t1\nparent_of_A\t1|0.99999\n"),
  ])]
  fn writes_tables_from_saved_log(
    #[case] all_trees: bool,
    #[case] expected: Vec<(&str, &str)>,
  ) -> Result<(), Report> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("bayestraits.log"), LOG)?;
    let args = BayesTraitsParseArgs {
      input_log: dir.path().join("bayestraits.log"),
      output: dir.path().join("out.tsv"),
      all_trees,
    };

    run_parse(&args)?;

    for (filename, contents) in expected {
      assert_eq!(fs::read_to_string(dir.path().join(filename))?, contents);
    }
    assert_eq!(dir.path().join("out.tsv").exists(), !all_trees);
    Ok(())
  }

  #[rstest]
  fn fails_on_malformed_log() -> Result<(), Report> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("bayestraits.log"), "Tree No\tLh\tparent_of_A\n1\t-1.5\t0.2\n")?;
    let args = BayesTraitsParseArgs {
      input_log: dir.path().join("bayestraits.log"),
      output: dir.path().join("out.tsv"),
      all_trees: false,
    };

    let err = run_parse(&args).unwrap_err();

    assert!(err.to_string().contains("When parsing BayesTraits output"), "{err}");
    assert!(!dir.path().join("out.tsv").exists());
    Ok(())
  }
}
