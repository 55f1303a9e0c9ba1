use crate::error::BayesTraitsError;
use crate::output::schema::{OutputSchema, ReconstructionKey};
use crate::utils::float_fmt::float_to_repr;
use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Most probable state of one character at one node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateCall {
  /// None if no state has a positive probability
  pub state: Option<String>,
  pub probability: f64,
}

impl StateCall {
  pub fn new(state: impl Into<String>, probability: f64) -> Self {
    Self {
      state: Some(state.into()),
      probability,
    }
  }
}

impl Display for StateCall {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.state.as_deref().unwrap_or("None");
    write!(f, "{state}|{}", float_to_repr(self.probability))
  }
}

/// Reconstruction reported for one tree (one data row of the results table)
#[derive(Clone, Debug, PartialEq)]
pub struct TreeReconstruction {
  pub tree_number: usize,
  pub likelihood: f64,
  pub rates: IndexMap<String, f64>,
  /// Characters in ascending order
  pub characters: Vec<usize>,
  /// Calls by node (ascending) and character (ascending)
  pub calls: BTreeMap<String, BTreeMap<usize, StateCall>>,
}

impl TreeReconstruction {
  pub fn call(&self, node: &str, character: usize) -> Option<&StateCall> {
    self.calls.get(node)?.get(&character)
  }
}

/// Reduce one data row to the maximum-likelihood state of every node and character known to the schema.
///
/// States are scanned in ascending order and a state only wins with a strictly greater probability, so
/// exact ties go to the first state in sorted order. `row` is used in error messages only.
pub fn reduce_row(row: usize, fields: &[&str], schema: &OutputSchema) -> Result<TreeReconstruction, BayesTraitsError> {
  let tree_number = get_field(row, fields, schema.tree_number, "Tree No")?;
  let tree_number = tree_number
    .trim()
    .parse::<usize>()
    .map_err(|err| BayesTraitsError::malformed_row(row, format!("tree number '{tree_number}': {err}")))?;

  let likelihood = parse_float(row, get_field(row, fields, schema.likelihood, "Lh")?, "Lh")?;

  let mut rates = IndexMap::new();
  for (name, &index) in &schema.rates {
    let value = get_field(row, fields, index, name)?;
    match value.trim().parse::<f64>() {
      Ok(rate) => {
        rates.insert(name.clone(), rate);
      }
      Err(_) => warn!("Row {row}: rate '{name}' has non-numeric value '{value}'. Skipping."),
    }
  }

  let characters = schema.characters.iter().copied().sorted().collect_vec();

  let mut calls = BTreeMap::new();
  for node in schema.nodes.iter().sorted() {
    let mut node_calls = BTreeMap::new();
    for &character in &characters {
      let mut best = StateCall::default();
      for state in schema.states_of(character).sorted() {
        let key = ReconstructionKey::new(node.as_str(), character, state);
        let Some(index) = schema.column_index(&key) else {
          continue;
        };
        let column = format!("{node}-Character({character})-State({state})");
        let probability = parse_float(row, get_field(row, fields, index, &column)?, &column)?;
        if probability > best.probability {
          best = StateCall::new(state, probability);
        }
      }
      node_calls.insert(character, best);
    }
    calls.insert(node.clone(), node_calls);
  }

  Ok(TreeReconstruction {
    tree_number,
    likelihood,
    rates,
    characters,
    calls,
  })
}

fn get_field<'a>(row: usize, fields: &[&'a str], index: usize, column: &str) -> Result<&'a str, BayesTraitsError> {
  fields.get(index).copied().ok_or_else(|| {
    BayesTraitsError::malformed_row(
      row,
      format!(
        "column '{column}' (field {}) is missing, the row has only {} fields",
        index + 1,
        fields.len()
      ),
    )
  })
}

fn parse_float(row: usize, value: &str, column: &str) -> Result<f64, BayesTraitsError> {
  value
    .trim()
    .parse::<f64>()
    .map_err(|err| BayesTraitsError::malformed_row(row, format!("column '{column}' has value '{value}': {err}")))
}
