//! CSV export of a finished plan, for `--out`.
//!
//! Creates two files in the output directory:
//! - `schedule.csv`: one row per event, home-clock stamps plus the display label
//! - `recommendations.csv`: one row per recommended item
//!
//! This is a convenience of the demo binary; the planning crates own no
//! on-disk format.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use jl_plan::{Plan, PlanObserver};

pub const SCHEDULE_FILE: &str = "schedule.csv";
pub const RECOMMENDATIONS_FILE: &str = "recommendations.csv";

pub const SCHEDULE_HEADER: [&str; 9] = [
    "phase",
    "type",
    "start",
    "end",
    "time",
    "title",
    "description",
    "science_note",
    "suggestions",
];

pub const RECOMMENDATIONS_HEADER: [&str; 4] = ["category", "name", "description", "affiliate"];

/// Timestamp layout for the `start` / `end` columns (home clock).
pub const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Separator between suggestions in one cell.
pub const SUGGESTION_SEPARATOR: &str = "; ";

/// Writes a plan as two CSV tables.
pub struct CsvExport<W: Write> {
    schedule:        Writer<W>,
    recommendations: Writer<W>,
    finished:        bool,
}

impl CsvExport<File> {
    /// Create `dir` if needed and open (or truncate) the two CSV files in it.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let open = |name: &str| {
            let path = dir.join(name);
            File::create(&path).with_context(|| format!("opening {}", path.display()))
        };
        let export = Self::from_writers(open(SCHEDULE_FILE)?, open(RECOMMENDATIONS_FILE)?)?;
        tracing::debug!(dir = %dir.display(), "csv export opened");
        Ok(export)
    }
}

impl<W: Write> CsvExport<W> {
    /// Wrap two sinks and write the header rows.
    pub fn from_writers(schedule: W, recommendations: W) -> Result<Self> {
        let mut schedule = Writer::from_writer(schedule);
        schedule.write_record(SCHEDULE_HEADER)?;
        let mut recommendations = Writer::from_writer(recommendations);
        recommendations.write_record(RECOMMENDATIONS_HEADER)?;
        Ok(Self { schedule, recommendations, finished: false })
    }

    /// Write every event and recommended item, then [`finish`](Self::finish).
    pub fn write_plan(&mut self, plan: &Plan) -> Result<()> {
        for e in &plan.schedule {
            let start = e.start.format(STAMP_FORMAT).to_string();
            let end = e.end.map(|t| t.format(STAMP_FORMAT).to_string()).unwrap_or_default();
            let suggestions = e.suggestions.join(SUGGESTION_SEPARATOR);
            self.schedule.write_record([
                e.phase.as_str(),
                e.event_type.as_str(),
                start.as_str(),
                end.as_str(),
                e.time.as_str(),
                e.title.as_str(),
                e.description.as_str(),
                e.science_note.as_deref().unwrap_or_default(),
                suggestions.as_str(),
            ])?;
        }
        for rec in &plan.recommendations {
            for item in &rec.items {
                self.recommendations.write_record([
                    rec.category.as_str(),
                    item.name.as_str(),
                    item.description.as_str(),
                    if item.affiliate_flag { "1" } else { "0" },
                ])?;
            }
        }
        self.finish()
    }

    /// Flush both tables.  Once both flushes have succeeded further calls do
    /// nothing; after a failure the next call retries.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.schedule.flush().context("flushing schedule table")?;
        self.recommendations.flush().context("flushing recommendations table")?;
        self.finished = true;
        Ok(())
    }
}

/// A [`PlanObserver`] that exports the finished plan.
///
/// Observer callbacks cannot fail, so the first write error is kept until
/// [`take_error`](Self::take_error) is called.
pub struct ExportObserver<W: Write> {
    export:     CsvExport<W>,
    last_error: Option<anyhow::Error>,
}

impl<W: Write> ExportObserver<W> {
    pub fn new(export: CsvExport<W>) -> Self {
        Self { export, last_error: None }
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.last_error.take()
    }
}

impl<W: Write> PlanObserver for ExportObserver<W> {
    fn on_plan(&mut self, plan: &Plan) {
        if let Err(e) = self.export.write_plan(plan) {
            tracing::warn!(error = %e, "plan export failed");
            self.last_error.get_or_insert(e);
        }
    }
}
