use thiserror::Error;

/// Failures of script generation and of BayesTraits log parsing.
///
/// Every variant is fatal: nothing in this crate retries or recovers from them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BayesTraitsError {
  #[error("Reconstruction method '{0}' is not supported. Possible values: {1}")]
  UnsupportedMethod(String, String),

  #[error("Analysis method '{0}' is not supported. Possible values: {1}")]
  UnsupportedAnalysisMethod(String, String),

  /// The tip has no parent, or its parent has no other reachable leaves
  #[error("No sibling names found for tip '{tip}'")]
  EmptySiblingSet { tip: String },

  #[error("Unable to parse BayesTraits header field '{field}': {reason}")]
  HeaderFieldParse { field: String, reason: String },

  #[error("Malformed BayesTraits data row {row}: {reason}")]
  MalformedRow { row: usize, reason: String },
}

impl BayesTraitsError {
  pub fn header_field(field: impl AsRef<str>, reason: impl Into<String>) -> Self {
    Self::HeaderFieldParse {
      field: field.as_ref().to_owned(),
      reason: reason.into(),
    }
  }

  pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
    Self::MalformedRow {
      row,
      reason: reason.into(),
    }
  }
}
