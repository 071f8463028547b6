//! Per-file progress for census loads.

use indicatif::{ProgressBar, ProgressStyle};
use infobg_census::FileSummary;

use crate::ui;

const TEMPLATE: &str = "{spinner} {pos}/{len} {wide_msg}";

/// Bar over the census files, absent when progress is disabled.
pub struct FileProgress {
    bar: Option<ProgressBar>,
}

impl FileProgress {
    #[must_use]
    pub fn new(files: usize) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(u64::try_from(files).unwrap_or(u64::MAX));
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style);
        }
        bar.set_message("population tables");
        Self { bar: Some(bar) }
    }

    /// Count one loaded file.
    pub fn loaded(&self, summary: &FileSummary) {
        let Some(bar) = &self.bar else {
            return;
        };
        if let Some(name) = summary.file.file_name() {
            bar.set_message(format!(
                "{} ({} records)",
                name.to_string_lossy(),
                summary.records
            ));
        }
        bar.inc(1);
    }

    pub fn finish(&self, completed: bool) {
        if let Some(bar) = &self.bar {
            if completed {
                bar.finish_with_message("done");
            } else {
                bar.abandon_with_message("stopped");
            }
        }
    }
}
