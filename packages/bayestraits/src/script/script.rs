use crate::error::BayesTraitsError;
use crate::script::directive::ScriptDirective;
use crate::script::method::{AnalysisMethod, ReconstructionMethod};
use crate::script::siblings::resolve_siblings;
use crate::tree::translation::TranslationTable;
use crate::tree::tree::Tree;
use itertools::Itertools;
use log::debug;
use smart_default::SmartDefault;
use std::fmt::{Display, Formatter};

/// Rate parameter shared by all transitions when a single rate is requested
pub const SINGLE_RATE_PARAMETER: &str = "q01";

const SCRIPT_HEADER: &str = "BayesTraits script (autogenerated)";

#[derive(Clone, Debug, SmartDefault)]
pub struct ScriptOptions {
  pub method: ReconstructionMethod,

  pub analysis_method: AnalysisMethod,

  /// Precede menu answers with the prompts BayesTraits would print, so that saved scripts are readable
  #[default = true]
  pub include_comments: bool,

  /// Restrict all transition rates to a single shared rate
  pub single_rate: bool,
}

/// Ordered BayesTraits control script
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
  directives: Vec<ScriptDirective>,
}

impl Script {
  pub fn directives(&self) -> &[ScriptDirective] {
    &self.directives
  }

  /// Script lines, each terminated with exactly one newline
  pub fn lines(&self) -> Vec<String> {
    self.directives.iter().map(|directive| format!("{directive}\n")).collect_vec()
  }

  pub fn num_add_mrca(&self) -> usize {
    self
      .directives
      .iter()
      .filter(|directive| matches!(directive, ScriptDirective::AddMrca { .. }))
      .count()
  }
}

impl Display for Script {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.directives.iter().try_for_each(|directive| writeln!(f, "{directive}"))
  }
}

struct ScriptBuilder {
  include_comments: bool,
  directives: Vec<ScriptDirective>,
}

impl ScriptBuilder {
  const fn new(include_comments: bool) -> Self {
    Self {
      include_comments,
      directives: vec![],
    }
  }

  fn comment(&mut self, text: impl Into<String>) -> &mut Self {
    if self.include_comments {
      self.directives.push(ScriptDirective::comment(text));
    }
    self
  }

  fn push(&mut self, directive: ScriptDirective) -> &mut Self {
    self.directives.push(directive);
    self
  }

  fn extend(&mut self, directives: impl IntoIterator<Item = ScriptDirective>) -> &mut Self {
    self.directives.extend(directives);
    self
  }

  fn build(self) -> Script {
    Script {
      directives: self.directives,
    }
  }
}

/// One `AddMRCA` per tip, in preorder tip order, naming the tip's parent `parent_of_<tip>`.
///
/// The order fixes the order of node columns in the BayesTraits log.
pub fn add_mrca_directives(
  tree: &Tree,
  translation: &TranslationTable,
) -> Result<Vec<ScriptDirective>, BayesTraitsError> {
  tree
    .tips()
    .into_iter()
    .map(|tip| {
      let group = resolve_siblings(tree, tip.key, translation)?;
      Ok(ScriptDirective::AddMrca {
        label: group.ancestor_label,
        taxa: group.taxa,
      })
    })
    .collect()
}

/// Build the control script which makes BayesTraits reconstruct the parent of every tip.
pub fn generate_script(
  tree: &Tree,
  translation: &TranslationTable,
  options: &ScriptOptions,
) -> Result<Script, BayesTraitsError> {
  let ScriptOptions {
    method,
    analysis_method,
    include_comments,
    single_rate,
  } = *options;

  let mut builder = ScriptBuilder::new(include_comments);

  builder.comment(SCRIPT_HEADER).comment("Select method.  methods are:");
  for choice in ReconstructionMethod::ALL {
    builder.comment(format!("{})      {}", choice.menu_choice(), choice.menu_label()));
  }
  builder.push(ScriptDirective::Method(method));

  builder.comment("Select the analysis method to use.");
  for choice in AnalysisMethod::ALL {
    builder.comment(format!("{})      {}", choice.menu_choice(), choice.menu_label()));
  }
  builder.push(ScriptDirective::AnalysisMethod(analysis_method));

  if single_rate {
    builder
      .comment("Restrict to a single rate")
      .push(ScriptDirective::RestrictAll(SINGLE_RATE_PARAMETER.to_owned()));
  }

  builder
    .comment("Reconstruct parent nodes for each tip")
    .extend(add_mrca_directives(tree, translation)?)
    .push(ScriptDirective::Run);

  let script = builder.build();

  debug!(
    "Generated BayesTraits script: method '{method}', analysis '{analysis_method}', {} AddMRCA commands",
    script.num_add_mrca()
  );

  Ok(script)
}

/// Same as [generate_script], taking method names as strings. Names are validated before anything is generated.
pub fn make_bayestraits_script(
  tree: &Tree,
  translation: &TranslationTable,
  method: &str,
  analysis_method: &str,
  include_comments: bool,
  single_rate: bool,
) -> Result<Vec<String>, BayesTraitsError> {
  let options = ScriptOptions {
    method: method.parse()?,
    analysis_method: analysis_method.parse()?,
    include_comments,
    single_rate,
  };
  Ok(generate_script(tree, translation, &options)?.lines())
}
