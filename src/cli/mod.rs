/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface.
//!
//! This module contains the argument structures shared by the binaries of the
//! crate, the code storing score vectors, and the logger setup.

use crate::graphs::arc_list::ArcListOptions;
use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, ValueEnum};
use itertools::Itertools;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, SystemTime};

pub mod betweenness;

#[derive(Args, Debug)]
/// Shared CLI arguments for reading files containing arcs.
pub struct ArcsArgs {
    #[arg(long, default_value_t = '#')]
    /// Ignore lines that start with this symbol.
    pub line_comment_symbol: char,

    #[arg(long, default_value_t = 0)]
    /// How many lines to skip, ignoring comment lines.
    pub lines_to_skip: usize,

    #[arg(long)]
    /// How many lines to parse, after skipping the first lines_to_skip and
    /// ignoring comment lines.
    pub max_arcs: Option<usize>,

    #[arg(long, default_value_t = '\t')]
    /// The column separator.
    pub separator: char,

    #[arg(long, default_value_t = 0)]
    /// The index of the column containing the source node of an arc.
    pub source_column: usize,

    #[arg(long, default_value_t = 1)]
    /// The index of the column containing the target node of an arc.
    pub target_column: usize,

    #[arg(long, default_value_t = false)]
    /// Sources and destinations are not node identifiers starting from 0, but labels.
    pub labels: bool,
}

impl From<&ArcsArgs> for ArcListOptions {
    fn from(args: &ArcsArgs) -> Self {
        ArcListOptions {
            line_comment_symbol: args.line_comment_symbol,
            lines_to_skip: args.lines_to_skip,
            max_arcs: args.max_arcs,
            separator: args.separator,
            source_column: args.source_column,
            target_column: args.target_column,
            labels: args.labels,
        }
    }
}

/// Parses the number of threads from a string.
///
/// This function is meant to be used with `#[arg(...,  value_parser =
/// num_threads_parser)]`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "Number of threads must be greater than 0");
    Ok(num_threads)
}

/// Shared CLI arguments for commands that specify a number of threads.
#[derive(Args, Debug)]
pub struct NumThreadsArg {
    #[arg(
        short = 'j',
        long,
        default_value_t = num_cpus::get().max(1),
        value_parser = num_threads_parser
    )]
    /// The number of threads to use.
    pub num_threads: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Formats for storing vectors of floats.
pub enum FloatVectorFormat {
    /// Java-compatible format: a sequence of big-endian doubles.
    Java,
    /// ASCII format, one float per line.
    Ascii,
    /// A JSON Array.
    Json,
}

impl FloatVectorFormat {
    /// Stores float values in the specified `path` using the format defined by
    /// `self`.
    ///
    /// In textual formats, that is, ASCII and JSON, values are printed with
    /// `precision` decimal digits or, if `None`, with the shortest
    /// representation that parses back to the same value.
    pub fn store(
        &self,
        path: impl AsRef<Path>,
        values: &[f64],
        precision: Option<usize>,
    ) -> Result<()> {
        let path = path.as_ref();
        create_parent_dir(path)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create vector at {}", path.display()))?;
        log::info!(
            "Storing {} values in {:?} format at {}",
            values.len(),
            self,
            path.display()
        );
        self.write(BufWriter::new(file), values, precision)
            .with_context(|| format!("Could not write vector to {}", path.display()))
    }

    fn write(
        &self,
        mut out: impl Write,
        values: &[f64],
        precision: Option<usize>,
    ) -> std::io::Result<()> {
        let to_text = |&value: &f64| match precision {
            None => format!("{value}"),
            Some(precision) => format!("{value:.precision$}"),
        };
        match self {
            FloatVectorFormat::Java => {
                for value in values {
                    out.write_all(&value.to_be_bytes())?;
                }
            }
            FloatVectorFormat::Ascii => {
                for value in values {
                    writeln!(out, "{}", to_text(value))?;
                }
            }
            FloatVectorFormat::Json => {
                write!(out, "[{}]", values.iter().map(to_text).join(", "))?;
            }
        }
        out.flush()
    }
}

/// Creates all parent directories of the given file path.
pub fn create_parent_dir(file_path: impl AsRef<Path>) -> Result<()> {
    // ensure that the dst directory exists
    if let Some(parent_dir) = file_path.as_ref().parent() {
        std::fs::create_dir_all(parent_dir).with_context(|| {
            format!(
                "Failed to create the directory {:?}",
                parent_dir.to_string_lossy()
            )
        })?;
    }
    Ok(())
}

/// Parses a duration such as `1d2h3m4s567`.
///
/// Amounts followed by `d`, `h`, `m`, or `s` are days, hours, minutes, and
/// seconds; a trailing amount without suffix is in milliseconds.
fn parse_duration(value: &str) -> Result<Duration> {
    ensure!(!value.trim().is_empty(), "Empty duration");
    let mut total = Duration::ZERO;
    let mut digits = String::new();
    for c in value.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let seconds = match c {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            _ => bail!("Invalid duration suffix {c:?} in {value:?}"),
        };
        let amount = digits
            .parse::<u64>()
            .with_context(|| format!("Missing amount before {c:?} in {value:?}"))?;
        total += Duration::from_secs(amount * seconds);
        digits.clear();
    }
    if !digits.is_empty() {
        total += Duration::from_millis(digits.parse()?);
    }
    Ok(total)
}

/// Initializes the `env_logger` logger with a custom format including
/// timestamps with elapsed time since initialization.
pub fn init_env_logger() -> Result<()> {
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
    use jiff::SpanRound;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64);
        let span = span.round(span_round).map_err(std::io::Error::other)?;
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global=true, display_order = 1000)]
    /// How often to log progress. Default is 10s. You can use the suffixes "s"
    /// for seconds, "m" for minutes, "h" for hours, and "d" for days. If no
    /// suffix is provided it is assumed to be in milliseconds.
    /// Example: "1d2h3m4s567" is parsed as 1 day + 2 hours + 3 minutes + 4
    /// seconds + 567 milliseconds = 93784567 milliseconds.
    pub log_interval: Option<Duration>,
}

#[derive(Parser, Debug)]
#[command(name = "betweenness", version)]
/// Computes the betweenness centrality of a graph given as a list of arcs.
///
/// Noteworthy environment variables:
///
/// - RUST_MIN_STACK: minimum thread stack size (in bytes).
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>.
pub struct Cli {
    #[clap(flatten)]
    pub args: betweenness::CliArgs,
    #[clap(flatten)]
    pub global: GlobalArgs,
}

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::try_parse_from(args)?;
    betweenness::main(cli.global, cli.args)?;

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );

    Ok(())
}

/// Pretty-prints seconds in a human-readable format.
pub fn pretty_print_elapsed(elapsed: f64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (7 * 24 * 60 * 60, "week"),
        (24 * 60 * 60, "day"),
        (60 * 60, "hour"),
        (60, "minute"),
    ];
    let mut rest = elapsed as u64;
    let mut result = String::new();
    for (length, name) in UNITS {
        let count = rest / length;
        rest %= length;
        match count {
            0 => {}
            1 => result.push_str(&format!("1 {name} ")),
            _ => result.push_str(&format!("{count} {name}s ")),
        }
    }
    result.push_str(&format!("{:.3} seconds ({}s)", elapsed % 60.0, elapsed));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() -> Result<()> {
        assert_eq!(parse_duration("1500")?, Duration::from_millis(1500));
        assert_eq!(parse_duration("2m 3s")?, Duration::from_secs(123));
        assert_eq!(
            parse_duration("1d2h3m4s567")?,
            Duration::from_millis(93_784_567)
        );
        assert!(parse_duration("").is_err());
        assert!(parse_duration("3x").is_err());
        Ok(())
    }

    #[test]
    fn test_num_threads_parser() {
        assert_eq!(num_threads_parser("4").unwrap(), 4);
        assert!(num_threads_parser("0").is_err());
        assert!(num_threads_parser("four").is_err());
    }

    #[test]
    fn test_pretty_print_elapsed() {
        assert_eq!(pretty_print_elapsed(1.5), "1.500 seconds (1.5s)");
        assert_eq!(
            pretty_print_elapsed(3723.0),
            "1 hour 2 minutes 3.000 seconds (3723s)"
        );
    }

    mod float_vector_format {
        use super::*;

        #[test]
        fn test_ascii() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.txt");
            let values = [1.5, 2.75, 3.0];
            FloatVectorFormat::Ascii.store(&path, &values, None)?;
            let content = std::fs::read_to_string(&path)?;
            let parsed = content
                .lines()
                .map(|line| line.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()?;
            assert_eq!(parsed, values);
            Ok(())
        }

        #[test]
        fn test_ascii_with_precision() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.txt");
            FloatVectorFormat::Ascii.store(&path, &[1.123456789, 2.987654321], Some(3))?;
            let content = std::fs::read_to_string(&path)?;
            let lines: Vec<&str> = content.lines().collect();
            assert_eq!(lines, ["1.123", "2.988"]);
            Ok(())
        }

        #[test]
        fn test_json() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("nested").join("test.json");
            let values = vec![1.5, 2.75, 0.1];
            FloatVectorFormat::Json.store(&path, &values, None)?;
            let content = std::fs::read_to_string(&path)?;
            let parsed: Vec<f64> = serde_json::from_str(&content)?;
            assert_eq!(parsed, values);

            FloatVectorFormat::Json.store(&path, &[], None)?;
            assert_eq!(std::fs::read_to_string(&path)?, "[]");
            Ok(())
        }

        #[test]
        fn test_java() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.bin");
            let values = [1.0, -0.5];
            FloatVectorFormat::Java.store(&path, &values, Some(1))?;
            let bytes = std::fs::read(&path)?;
            assert_eq!(bytes.len(), 16);
            for (chunk, value) in bytes.chunks_exact(8).zip(values) {
                let chunk: [u8; 8] = chunk.try_into()?;
                assert_eq!(f64::from_be_bytes(chunk), value);
            }
            Ok(())
        }
    }
}
