use crate::commands::script::script_args::BayesTraitsScriptArgs;
use crate::io::file::write_lines;
use crate::io::nex::nex_write_file;
use crate::script::script::{generate_script, ScriptOptions};
use crate::tree::create_tree_from_nwk::create_tree_from_nwk_file;
use crate::tree::translation::TranslationTable;
use eyre::{Report, WrapErr};
use log::info;

/// Name of the tree inside NEXUS files written for BayesTraits
pub const NEXUS_TREE_NAME: &str = "tree1";

pub fn run_script(args: &BayesTraitsScriptArgs) -> Result<(), Report> {
  let tree = create_tree_from_nwk_file(&args.input_tree)?;

  let translation = match &args.nexus {
    Some(nexus) => {
      let translation = TranslationTable::from_tips(&tree);
      nex_write_file(nexus, &tree, &translation, NEXUS_TREE_NAME)?;
      info!("Wrote NEXUS tree with {} translated tips to {nexus:#?}", translation.len());
      translation
    }
    None => TranslationTable::new(),
  };

  let script = generate_script(&tree, &translation, &ScriptOptions::from(&args.options))
    .wrap_err_with(|| format!("When generating BayesTraits script for tree {:#?}", args.input_tree))?;

  write_lines(&args.output, &script.lines())?;
  info!(
    "Wrote BayesTraits script with {} AddMRCA commands to {:#?}",
    script.num_add_mrca(),
    args.output
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::script::script_args::BayesTraitsScriptOptionsArgs;
  use crate::script::method::{AnalysisMethod, ReconstructionMethod};
  use pretty_assertions::assert_eq;
  use rstest::rstest;
  use std::fs;
  use std::path::Path;
  use tempfile::TempDir;

  fn script_args(dir: &Path, nexus: bool) -> Result<BayesTraitsScriptArgs, Report> {
    fs::write(dir.join("tree.nwk"), "((A:0.1,B:0.2,X:0.3)E:0.1,(C:0.2,D:0.1)F:0.1)root;\n")?;
    Ok(BayesTraitsScriptArgs {
      input_tree: dir.join("tree.nwk"),
      output: dir.join("scripts/commands.txt"),
      nexus: nexus.then(|| dir.join("tree.nexus")),
      options: BayesTraitsScriptOptionsArgs {
        method: ReconstructionMethod::DiscreteIndependent,
        analysis_method: AnalysisMethod::Ml,
        single_rate: true,
        script_comments: false,
      },
    })
  }

  #[rstest]
  fn writes_translated_script_and_nexus() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let args = script_args(dir.path(), true)?;

    run_script(&args)?;

    assert_eq!(
      fs::read_to_string(&args.output)?,
      "\
2
1
RestrictAll q01
AddMRCA parent_of_A 0 1 2
AddMRCA parent_of_B 0 1 2
AddMRCA parent_of_X 0 1 2
AddMRCA parent_of_C 3 4
AddMRCA parent_of_D 3 4
run
"
    );

    let nexus = fs::read_to_string(dir.path().join("tree.nexus"))?;
    assert!(nexus.contains("\t\t2 X,\n\t\t3 C,\n"), "{nexus}");
    assert!(nexus.contains("\t\ttree tree1 = ((0:0.1,1:0.2,2:0.3):0.1,(3:0.2,4:0.1):0.1)root;\n"), "{nexus}");
    Ok(())
  }

  #[rstest]
  fn writes_script_with_tip_names_without_nexus() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let args = script_args(dir.path(), false)?;

    run_script(&args)?;

    let script = fs::read_to_string(&args.output)?;
    assert!(script.contains("AddMRCA parent_of_X A B X\n"), "{script}");
    assert!(script.contains("AddMRCA parent_of_D C D\n"), "{script}");
    assert!(!dir.path().join("tree.nexus").exists());
    Ok(())
  }
}
