use crate::error::BayesTraitsError;
use indexmap::{IndexMap, IndexSet};
use log::trace;

/// Prefix which identifies the header row of the BayesTraits results table
pub const HEADER_PREFIX: &str = "Tree No\tLh";

const TREE_NUMBER_FIELD: &str = "Tree No";
const LIKELIHOOD_FIELD: &str = "Lh";
const RATE_PREFIX: &str = "q";

/// Node, character and state encoded in a column name such as `parent_of_A-Character(1)-State(0)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReconstructionKey {
  pub node: String,
  pub character: usize,
  pub state: String,
}

impl ReconstructionKey {
  pub fn new(node: impl Into<String>, character: usize, state: impl Into<String>) -> Self {
    Self {
      node: node.into(),
      character,
      state: state.into(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
  TreeNumber,
  Likelihood,
  Rate(String),
  Reconstruction(ReconstructionKey),
  /// Blank header field
  Empty,
}

/// Column layout of a BayesTraits results table, inferred from its header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSchema {
  /// One entry per header field, in field order
  pub columns: Vec<Column>,
  pub tree_number: usize,
  pub likelihood: usize,
  pub rates: IndexMap<String, usize>,
  pub reconstructions: IndexMap<ReconstructionKey, usize>,
  /// Nodes in order of first appearance
  pub nodes: IndexSet<String>,
  /// Characters in order of first appearance
  pub characters: IndexSet<usize>,
  pub states_by_character: IndexMap<usize, IndexSet<String>>,
}

impl OutputSchema {
  pub fn column_index(&self, key: &ReconstructionKey) -> Option<usize> {
    self.reconstructions.get(key).copied()
  }

  pub fn states_of(&self, character: usize) -> impl Iterator<Item = &str> {
    self
      .states_by_character
      .get(&character)
      .into_iter()
      .flat_map(|states| states.iter().map(String::as_str))
  }
}

pub fn is_header_line(line: &str) -> bool {
  line.starts_with(HEADER_PREFIX)
}

/// Classify every tab-separated field of the header row.
///
/// `Tree No` and `Lh` must each occur exactly once. Fields starting with `q` are rate parameters and blank
/// fields are skipped. Everything else must be a `<node>-<name>(<character>)-<name>(<state>)` triple.
pub fn infer_schema(header_line: &str) -> Result<OutputSchema, BayesTraitsError> {
  let mut columns = Vec::new();
  let mut tree_number = None;
  let mut likelihood = None;
  let mut rates = IndexMap::new();
  let mut reconstructions = IndexMap::new();
  let mut nodes = IndexSet::new();
  let mut characters = IndexSet::new();
  let mut states_by_character = IndexMap::<usize, IndexSet<String>>::new();

  for (i, field) in header_line.split('\t').enumerate() {
    let column = if field == TREE_NUMBER_FIELD {
      set_once(&mut tree_number, i, field)?;
      Column::TreeNumber
    } else if field == LIKELIHOOD_FIELD {
      set_once(&mut likelihood, i, field)?;
      Column::Likelihood
    } else if field.starts_with(RATE_PREFIX) {
      rates.insert(field.to_owned(), i);
      Column::Rate(field.to_owned())
    } else if field.trim().is_empty() {
      Column::Empty
    } else {
      let key = parse_reconstruction_field(field)?;
      trace!("Header field {i}: {key:?}");

      nodes.insert(key.node.clone());
      characters.insert(key.character);
      states_by_character
        .entry(key.character)
        .or_default()
        .insert(key.state.clone());

      if reconstructions.insert(key.clone(), i).is_some() {
        return Err(BayesTraitsError::header_field(field, "duplicate column"));
      }
      Column::Reconstruction(key)
    };
    columns.push(column);
  }

  let tree_number =
    tree_number.ok_or_else(|| BayesTraitsError::header_field(TREE_NUMBER_FIELD, "column is missing"))?;
  let likelihood = likelihood.ok_or_else(|| BayesTraitsError::header_field(LIKELIHOOD_FIELD, "column is missing"))?;

  Ok(OutputSchema {
    columns,
    tree_number,
    likelihood,
    rates,
    reconstructions,
    nodes,
    characters,
    states_by_character,
  })
}

fn set_once(slot: &mut Option<usize>, index: usize, field: &str) -> Result<(), BayesTraitsError> {
  if slot.replace(index).is_some() {
    return Err(BayesTraitsError::header_field(field, "duplicate column"));
  }
  Ok(())
}

/// Parse `NodeName-Character(<int>)-State(<string>)`
pub fn parse_reconstruction_field(field: &str) -> Result<ReconstructionKey, BayesTraitsError> {
  let parts: Vec<&str> = field.split('-').collect();
  let [node, character, state] = parts.as_slice() else {
    return Err(BayesTraitsError::header_field(
      field,
      format!(
        "expected 3 '-'-separated parts (node, character, state), found {}",
        parts.len()
      ),
    ));
  };

  let node = node.trim();
  if node.is_empty() {
    return Err(BayesTraitsError::header_field(field, "node name is empty"));
  }

  let character = parenthesized(character)
    .ok_or_else(|| BayesTraitsError::header_field(field, "character part must end with '(<character id>)'"))?;
  let character = character.trim().parse::<usize>().map_err(|err| {
    BayesTraitsError::header_field(field, format!("character id '{character}' is not an integer: {err}"))
  })?;

  let state = parenthesized(state)
    .ok_or_else(|| BayesTraitsError::header_field(field, "state part must end with '(<state>)'"))?;

  Ok(ReconstructionKey::new(node, character, state))
}

/// Text inside the single trailing `(...)` group of `Name(value)`. Nothing may follow the `)`.
fn parenthesized(s: &str) -> Option<&str> {
  let (_, rest) = s.split_once('(')?;
  rest.strip_suffix(')').filter(|inner| !inner.contains(['(', ')']))
}
