use crate::error::BayesTraitsError;
use crate::output::reduce::{reduce_row, TreeReconstruction};
use crate::output::schema::{infer_schema, is_header_line, OutputSchema, HEADER_PREFIX};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, warn};

/// Everything parsed from one BayesTraits log
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconstructionOutput {
  /// None if the log never contained a results header
  pub schema: Option<OutputSchema>,
  /// Reconstructions by tree number, in order of appearance
  pub trees: IndexMap<usize, TreeReconstruction>,
}

impl ReconstructionOutput {
  /// Reconstruction of the first data row
  pub fn first(&self) -> Option<&TreeReconstruction> {
    self.trees.values().next()
  }

  pub fn len(&self) -> usize {
    self.trees.len()
  }

  pub fn is_empty(&self) -> bool {
    self.trees.is_empty()
  }
}

#[derive(Clone, Debug, PartialEq)]
enum ParserState {
  AwaitingHeader,
  HeaderParsed(OutputSchema),
}

/// Line-by-line parser of BayesTraits output.
///
/// Lines before the results header are discarded. The header fixes the schema for the rest of the input and
/// every following non-blank line is a data row.
#[derive(Clone, Debug)]
pub struct ReconstructionOutputParser {
  state: ParserState,
  line_number: usize,
  trees: IndexMap<usize, TreeReconstruction>,
}

impl Default for ReconstructionOutputParser {
  fn default() -> Self {
    Self::new()
  }
}

impl ReconstructionOutputParser {
  pub fn new() -> Self {
    Self {
      state: ParserState::AwaitingHeader,
      line_number: 0,
      trees: IndexMap::new(),
    }
  }

  pub fn schema(&self) -> Option<&OutputSchema> {
    match &self.state {
      ParserState::AwaitingHeader => None,
      ParserState::HeaderParsed(schema) => Some(schema),
    }
  }

  pub fn feed_line(&mut self, line: &str) -> Result<(), BayesTraitsError> {
    self.line_number += 1;
    let line = line.trim_end_matches(['\n', '\r']);

    if line.trim().is_empty() {
      return Ok(());
    }

    match &self.state {
      ParserState::AwaitingHeader => {
        if is_header_line(line) {
          let schema = infer_schema(line)?;
          debug!(
            "Found BayesTraits results header on line {}: {} nodes, {} characters, {} rate parameters",
            self.line_number,
            schema.nodes.len(),
            schema.characters.len(),
            schema.rates.len()
          );
          self.state = ParserState::HeaderParsed(schema);
        }
      }
      ParserState::HeaderParsed(schema) => {
        let fields = line.split('\t').collect_vec();
        let reconstruction = reduce_row(self.line_number, &fields, schema)?;
        let tree_number = reconstruction.tree_number;
        if self.trees.contains_key(&tree_number) {
          warn!(
            "Line {}: tree number {tree_number} was already reported. Keeping the first row.",
            self.line_number
          );
        } else {
          self.trees.insert(tree_number, reconstruction);
        }
      }
    }

    Ok(())
  }

  pub fn finish(self) -> ReconstructionOutput {
    let schema = match self.state {
      ParserState::AwaitingHeader => {
        warn!(
          "No BayesTraits results header (line starting with {:?}) found in {} lines of output",
          HEADER_PREFIX,
          self.line_number
        );
        None
      }
      ParserState::HeaderParsed(schema) => Some(schema),
    };

    ReconstructionOutput {
      schema,
      trees: self.trees,
    }
  }
}

/// Parse BayesTraits maximum-likelihood output into one reconstruction per tree
pub fn parse_reconstruction_output<I, S>(lines: I) -> Result<ReconstructionOutput, BayesTraitsError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut parser = ReconstructionOutputParser::new();
  for line in lines {
    parser.feed_line(line.as_ref())?;
  }
  Ok(parser.finish())
}

pub fn parse_reconstruction_output_str(output: &str) -> Result<ReconstructionOutput, BayesTraitsError> {
  parse_reconstruction_output(output.split('\n'))
}
