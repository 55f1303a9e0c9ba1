use crate::script::method::{AnalysisMethod, ReconstructionMethod};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// One line of a BayesTraits control script.
///
/// BayesTraits reads its stdin as if a user typed into its interactive prompts, so the position of each
/// directive in the script matters: the two menu answers come first, commands follow, `run` comes last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptDirective {
  /// Ignored by BayesTraits. Must not contain line breaks.
  Comment(String),
  Method(ReconstructionMethod),
  AnalysisMethod(AnalysisMethod),
  /// Constrain all rates to the given rate parameter
  RestrictAll(String),
  /// Reconstruct the most recent common ancestor of `taxa` and report it as `label`
  AddMrca { label: String, taxa: Vec<String> },
  Run,
}

impl ScriptDirective {
  pub fn comment(text: impl Into<String>) -> Self {
    Self::Comment(text.into())
  }

  pub const fn is_comment(&self) -> bool {
    matches!(self, Self::Comment(_))
  }
}

impl Display for ScriptDirective {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Comment(text) => write!(f, "#{text}"),
      Self::Method(method) => write!(f, "{}", method.menu_choice()),
      Self::AnalysisMethod(method) => write!(f, "{}", method.menu_choice()),
      Self::RestrictAll(param) => write!(f, "RestrictAll {param}"),
      Self::AddMrca { label, taxa } => write!(f, "AddMRCA {label} {}", taxa.iter().join(" ")),
      Self::Run => write!(f, "run"),
    }
  }
}
