use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{ArgAction, Args};
use log::LevelFilter;
use std::str::FromStr;

const LEVEL_NAMES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Console verbosity flags shared by all subcommands.
///
/// `--silent` turns everything off. Otherwise each `-v` raises and each `-q` lowers the level given by
/// `--verbosity` by one step.
#[derive(Args, Debug, Clone)]
pub struct Verbosity {
  /// Set verbosity level of console output
  #[clap(long, global = true, default_value = "warn", display_order = 95)]
  #[clap(value_parser = PossibleValuesParser::new(LEVEL_NAMES).map(|name| parse_level(&name)))]
  pub verbosity: LevelFilter,

  /// Disable all console output
  #[clap(long, global = true, display_order = 96)]
  #[clap(conflicts_with_all = ["verbose", "quiet"])]
  pub silent: bool,

  /// Make console output more verbose. Repeat to increase verbosity further.
  #[clap(long, short = 'v', action = ArgAction::Count, global = true, display_order = 97)]
  #[clap(conflicts_with = "quiet")]
  pub verbose: u8,

  /// Make console output more quiet. Repeat to make it even more quiet.
  #[clap(long, short = 'q', action = ArgAction::Count, global = true, display_order = 98)]
  pub quiet: u8,
}

impl Verbosity {
  pub fn filter_level(&self) -> LevelFilter {
    if self.silent {
      return LevelFilter::Off;
    }
    let base = LevelFilter::iter()
      .position(|level| level == self.verbosity)
      .unwrap_or_default();
    let shifted = base
      .saturating_add(usize::from(self.verbose))
      .saturating_sub(usize::from(self.quiet));
    LevelFilter::iter().nth(shifted).unwrap_or(LevelFilter::max())
  }
}

fn parse_level(name: &str) -> LevelFilter {
  LevelFilter::from_str(name).unwrap_or(LevelFilter::Warn)
}
