use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::{Color, Colorize};
use serde_json::json;
use tracing::debug;

use tbdiff_match::{match_series, MatchConfig, MatchReport};
use tbdiff_patch::{parse_changesets, read_series};
use tbdiff_types::{ChangeSet, DiffLine, Interdiff, MatchRecord, Series};

use crate::cli::{Cli, ColorChoice, OutputFormat};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let painter = Painter::new(cli.color);
    let config = load_config(&cli)?;
    let left = load_series(&cli.left)?;
    let right = load_series(&cli.right)?;
    debug!(left = left.len(), right = right.len(), "loaded series");

    let report = match_series(&left, &right, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => render_text(&mut out, &report, &left, &right, painter)?,
        OutputFormat::Json => render_json(&mut out, &report, &left, &right)?,
    }
    out.flush()?;
    Ok(())
}

/// Settings file first, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<MatchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    if let Some(weight) = cli.creation_weight {
        config.creation_weight = weight;
    }
    if cli.no_patch {
        config.include_interdiff = false;
    }
    config.validate()?;
    Ok(config)
}

fn load_series(path: &Path) -> anyhow::Result<Series> {
    let raws = read_series(path).with_context(|| format!("reading series {}", path.display()))?;
    let changesets =
        parse_changesets(&raws).with_context(|| format!("parsing series {}", path.display()))?;
    Series::new(changesets).with_context(|| format!("loading series {}", path.display()))
}

#[derive(Clone, Copy, Debug)]
struct Painter {
    enabled: bool,
}

impl Painter {
    fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => {
                colored::control::set_override(true);
                true
            }
            ColorChoice::Never => {
                colored::control::set_override(false);
                false
            }
            ColorChoice::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
        };
        Self { enabled }
    }

    #[cfg(test)]
    fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn oneliner(index: usize, cs: &ChangeSet) -> String {
    format!("commit {}: {} {}", index + 1, cs.id.short(), cs.subject)
        .trim_end()
        .to_string()
}

fn render_text<W: Write>(
    out: &mut W,
    report: &MatchReport,
    left: &Series,
    right: &Series,
    painter: Painter,
) -> io::Result<()> {
    for (n, record) in report.records.iter().enumerate() {
        if n > 0 {
            writeln!(out)?;
        }
        match record {
            MatchRecord::Paired {
                left: l,
                right: r,
                interdiff,
            } => {
                writeln!(out, "{}", painter.paint(&oneliner(*l, &left[*l]), Color::Yellow))?;
                writeln!(out, "    matches {}", oneliner(*r, &right[*r]))?;
                if let Some(diff) = interdiff.as_ref().filter(|d| !d.is_empty()) {
                    writeln!(out, "    interdiff:")?;
                    render_interdiff(out, diff, painter)?;
                }
            }
            MatchRecord::LeftOnly { left: l } => {
                writeln!(out, "{}", painter.paint(&oneliner(*l, &left[*l]), Color::Yellow))?;
                writeln!(out, "    newly added in left side")?;
            }
            MatchRecord::RightOnly { right: r } => {
                writeln!(out, "newly added in right side")?;
                writeln!(
                    out,
                    "    {}",
                    painter.paint(&oneliner(*r, &right[*r]), Color::Yellow)
                )?;
            }
        }
    }
    Ok(())
}

fn render_interdiff<W: Write>(out: &mut W, diff: &Interdiff, painter: Painter) -> io::Result<()> {
    for hunk in &diff.hunks {
        writeln!(out, "        {}", painter.paint(&hunk.header(), Color::Cyan))?;
        for line in &hunk.lines {
            let text = line.to_unified();
            let text = match line {
                DiffLine::Added(_) => painter.paint(&text, Color::Green),
                DiffLine::Removed(_) => painter.paint(&text, Color::Red),
                DiffLine::Context(_) => text,
            };
            writeln!(out, "        {text}")?;
        }
    }
    Ok(())
}

fn render_json<W: Write>(
    out: &mut W,
    report: &MatchReport,
    left: &Series,
    right: &Series,
) -> anyhow::Result<()> {
    let describe = |series: &Series| {
        series
            .iter()
            .map(|cs| {
                json!({
                    "id": cs.id,
                    "subject": cs.subject,
                    "content": cs.content_id().to_hex(),
                })
            })
            .collect::<Vec<_>>()
    };
    let value = json!({
        "left": describe(left),
        "right": describe(right),
        "records": report.records,
        "total_cost": report.total_cost,
        "exact_matches": report.exact_matches,
    });
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
