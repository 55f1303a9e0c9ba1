use crate::io::fs::filename_maybe;
use chrono::Local;
use color_eyre::config::{HookBuilder, Theme};
use color_eyre::owo_colors::{OwoColorize, Style};
use env_logger::Env;
use log::{Level, LevelFilter, Record};
use std::io::Write;

/// Frames of these crates are hidden from error report backtraces
const RUNTIME_FRAME_PREFIXES: &[&str] = &["std::", "core::", "alloc::", "__rust", "eyre::", "color_eyre::"];

/// Log to stderr. Lines look like `2024-05-01 12:00:00.123 [I] run_reconstruct.rs:42: message`.
pub fn setup_logger(filter_level: LevelFilter) {
  env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
    .filter_level(filter_level)
    .format(|buf, record| {
      let date = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
      let location = source_location(record).unwrap_or_default();
      writeln!(
        buf,
        "{} {} {} {}",
        date.dimmed(),
        level_tag(record.level()),
        location.dimmed(),
        record.args()
      )
    })
    .init();
}

/// Install colored error reports and panic messages. Call once per process, before anything can fail.
pub fn global_init() {
  let theme = Theme::dark()
    .file(Style::new().green())
    .line_number(Style::new().yellow())
    .panic_message(Style::new().bright_red().bold())
    .hidden_frames(Style::new().dimmed());

  let hook = HookBuilder::default()
    .theme(theme)
    .display_env_section(false)
    .panic_section(format!(
      "This is a bug in {} {}. Please report it with the command line and the BayesTraits version used.",
      env!("CARGO_PKG_NAME"),
      env!("CARGO_PKG_VERSION"),
    ))
    .add_frame_filter(Box::new(|frames| {
      frames.retain(|frame| frame.name.as_deref().is_some_and(|name| !is_runtime_frame(name)));
    }));

  if let Err(err) = hook.install() {
    eprintln!("Unable to install error report handler: {err}");
  }
}

fn source_location(record: &Record) -> Option<String> {
  let file = record.file().and_then(filename_maybe)?;
  Some(match record.line() {
    Some(line) => format!("{file}:{line}:"),
    None => format!("{file}:"),
  })
}

/// One-letter level in brackets, colored by severity
fn level_tag(level: Level) -> String {
  let letter = level_letter(level);
  let letter = match level {
    Level::Error => letter.red().bold().to_string(),
    Level::Warn => letter.yellow().to_string(),
    Level::Info => letter.cyan().to_string(),
    Level::Debug => letter.green().dimmed().to_string(),
    Level::Trace => letter.dimmed().to_string(),
  };
  format!("[{letter}]")
}

const fn level_letter(level: Level) -> &'static str {
  match level {
    Level::Error => "E",
    Level::Warn => "W",
    Level::Info => "I",
    Level::Debug => "D",
    Level::Trace => "T",
  }
}

fn is_runtime_frame(name: &str) -> bool {
  let name = name.trim_start_matches('<');
  RUNTIME_FRAME_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  #[case(Some("packages/bayestraits/src/output/parse.rs"), Some(42), Some("parse.rs:42:"))]
  #[case(Some("src/io/nex.rs"), None, Some("nex.rs:"))]
  #[case(None, Some(7), None)]
  fn formats_source_location(
    #[case] file: Option<&'static str>,
    #[case] line: Option<u32>,
    #[case] expected: Option<&str>,
  ) {
    let record = Record::builder().file(file).line(line).build();
    assert_eq!(source_location(&record).as_deref(), expected);
  }

  #[rstest]
  #[case("std::panicking::begin_panic", true)]
  #[case("<core::option::Option<T>>::unwrap", true)]
  #[case("__rust_begin_short_backtrace", true)]
  #[case("color_eyre::config::PanicHook::panic_report", true)]
  #[case("bayestraits::commands::reconstruct::run_reconstruct::run_reconstruct", false)]
  #[case("clap_builder::parser::parser::Parser::get_matches_with", false)]
  fn hides_runtime_frames(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_runtime_frame(name), expected);
  }

  #[rstest]
  fn tags_levels_with_one_letter() {
    assert_eq!(level_letter(Level::Error), "E");
    assert_eq!(level_letter(Level::Trace), "T");
    assert!(level_tag(Level::Info).contains('I'));
  }
}
