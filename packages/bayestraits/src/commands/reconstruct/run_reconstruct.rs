use crate::commands::parse::run_parse::write_reconstruction_tables;
use crate::commands::reconstruct::reconstruct_args::BayesTraitsReconstructArgs;
use crate::commands::reconstruct::run_bayestraits::{predict_bayestraits_log_file, run_bayestraits};
use crate::commands::script::run_script::NEXUS_TREE_NAME;
use crate::io::file::write_lines;
use crate::io::nex::nex_write_file;
use crate::output::parse::parse_reconstruction_output_str;
use crate::script::script::{generate_script, ScriptOptions};
use crate::tree::create_tree_from_nwk::create_tree_from_nwk_file;
use crate::tree::translation::TranslationTable;
use eyre::{Report, WrapErr};
use log::{debug, info};
use std::time::Instant;

pub const NEXUS_TREE_FILENAME: &str = "tree.nexus";
pub const SCRIPT_FILENAME: &str = "bayestraits_commands.txt";

pub fn run_reconstruct(args: &BayesTraitsReconstructArgs) -> Result<(), Report> {
  let BayesTraitsReconstructArgs {
    input_tree,
    input_trait_data,
    output,
    outdir,
    bayestraits,
    all_trees,
    script,
  } = args;

  let start = Instant::now();

  let tree = create_tree_from_nwk_file(input_tree)?;
  let translation = TranslationTable::from_tips(&tree);
  info!(
    "Read tree with {} nodes and {} tips from {input_tree:#?}",
    tree.num_nodes(),
    tree.num_leaves()
  );

  let nexus_path = outdir.join(NEXUS_TREE_FILENAME);
  nex_write_file(&nexus_path, &tree, &translation, NEXUS_TREE_NAME)?;
  debug!("Wrote NEXUS tree to {nexus_path:#?}");

  let script = generate_script(&tree, &translation, &ScriptOptions::from(script))
    .wrap_err_with(|| format!("When generating BayesTraits script for tree {input_tree:#?}"))?;
  let script_path = outdir.join(SCRIPT_FILENAME);
  write_lines(&script_path, &script.lines())?;
  debug!("Wrote BayesTraits script to {script_path:#?}");

  let stdout = run_bayestraits(bayestraits, &nexus_path, input_trait_data, &script_path)?;
  debug!(
    "BayesTraits log is expected at {:#?}",
    predict_bayestraits_log_file(input_trait_data)
  );

  let reconstructions =
    parse_reconstruction_output_str(&stdout).wrap_err("When parsing BayesTraits standard output")?;
  info!(
    "Parsed reconstructions of {} trees, {} parent nodes requested",
    reconstructions.len(),
    script.num_add_mrca()
  );

  write_reconstruction_tables(output, &reconstructions, *all_trees)?;

  info!("Ancestral reconstruction finished in {:.3?}", start.elapsed());

  Ok(())
}
