//! Output formatting: tables, JSON, YAML and per-step console lines.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use ccprov_core::report::{PoolRow, ReservationRow, Section, SiteRow};
use ccprov_core::{StatusReport, StepOutcome, StepReport};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Color ────────────────────────────────────────────────────────────

/// Color only when stdout is a terminal and `NO_COLOR` is unset.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Console printer shared by the command handlers.
#[derive(Debug, Clone)]
pub struct Printer {
    pub quiet: bool,
    pub color: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            color: should_color(),
        }
    }

    pub fn line(&self, text: &str) {
        if self.quiet || text.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
    }

    pub fn heading(&self, text: &str) {
        if self.color {
            self.line(&format!("{}", text.bold()));
        } else {
            self.line(text);
        }
    }

    /// `  ✓ global pool US_CORP created`
    pub fn format_step(&self, step: &StepReport) -> String {
        let (mark, detail) = match &step.outcome {
            StepOutcome::Created => ("✓", "created".to_owned()),
            StepOutcome::Deleted => ("✓", "deleted".to_owned()),
            StepOutcome::Skipped { reason } => ("-", format!("skipped ({reason})")),
            StepOutcome::Failed { reason } => ("✗", format!("FAILED: {reason}")),
        };
        let text = format!("{mark} {} {} {detail}", step.kind, step.name);
        if !self.color {
            return format!("  {text}");
        }
        match step.outcome {
            StepOutcome::Created | StepOutcome::Deleted => format!("  {}", text.green()),
            StepOutcome::Skipped { .. } => format!("  {}", text.dimmed()),
            StepOutcome::Failed { .. } => format!("  {}", text.red()),
        }
    }

    pub fn summary(&self, verb: &str, reports: &[StepReport]) {
        let tally = Tally::of(reports);
        let text = format!(
            "{verb}: {} done, {} skipped, {} failed",
            tally.done, tally.skipped, tally.failed
        );
        if self.color && tally.failed > 0 {
            self.line(&format!("{}", text.red().bold()));
        } else if self.color {
            self.line(&format!("{}", text.green().bold()));
        } else {
            self.line(&text);
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    pub fn of(reports: &[StepReport]) -> Self {
        reports.iter().fold(Self::default(), |mut t, r| {
            match r.outcome {
                StepOutcome::Created | StepOutcome::Deleted => t.done += 1,
                StepOutcome::Skipped { .. } => t.skipped += 1,
                StepOutcome::Failed { .. } => t.failed += 1,
            }
            t
        })
    }
}

// ── Status report ────────────────────────────────────────────────────

#[derive(Tabled)]
struct PoolTableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "CIDR")]
    cidr: String,
    #[tabled(rename = "Used/Total")]
    usage: String,
}

#[derive(Tabled)]
struct SiteTableRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Hierarchy")]
    hierarchy: String,
}

#[derive(Tabled)]
struct ReservationTableRow {
    #[tabled(rename = "Building")]
    building: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "CIDR")]
    cidr: String,
    #[tabled(rename = "Used/Total")]
    usage: String,
}

fn usage(used: Option<u64>, total: Option<u64>) -> String {
    let show = |v: Option<u64>| v.map_or_else(|| "?".to_owned(), |n| n.to_string());
    format!("{}/{}", show(used), show(total))
}

impl From<&PoolRow> for PoolTableRow {
    fn from(p: &PoolRow) -> Self {
        Self {
            name: p.name.clone(),
            cidr: p.cidr.clone(),
            usage: usage(p.used, p.total),
        }
    }
}

impl From<&SiteRow> for SiteTableRow {
    fn from(s: &SiteRow) -> Self {
        Self {
            kind: s.kind.to_string(),
            hierarchy: s.hierarchy.clone(),
        }
    }
}

impl From<&ReservationRow> for ReservationTableRow {
    fn from(r: &ReservationRow) -> Self {
        Self {
            building: r.building.clone(),
            name: r.name.clone(),
            cidr: r.cidr.clone(),
            usage: usage(r.used, r.total),
        }
    }
}

/// Render the status report in the chosen format.
pub fn render_status(format: OutputFormat, report: &StatusReport) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Yaml => render_yaml(report),
        OutputFormat::Table => Ok([
            render_section::<_, PoolTableRow>("Global pools", &report.pools),
            render_section::<_, SiteTableRow>("Sites", &report.sites),
            render_section::<_, ReservationTableRow>("Reservations", &report.reservations),
        ]
        .join("\n\n")),
    }
}

fn render_section<'a, T, R>(title: &str, section: &'a Section<T>) -> String
where
    R: Tabled + From<&'a T>,
{
    let mut out = format!("{title} ({})", section.rows.len());
    if !section.rows.is_empty() {
        let rows: Vec<R> = section.rows.iter().map(R::from).collect();
        out.push('\n');
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    }
    for error in &section.errors {
        out.push_str("\n  error: ");
        out.push_str(error);
    }
    out
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}

pub fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}
