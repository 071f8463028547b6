//! Year-batch loading: one table per publication, newest first.
//!
//! The newest file is authoritative and runs in strict mode: every row that
//! does not resolve is collected, written to the unresolved report, and the
//! run stops with [`BatchError::StrictUnresolved`]. Older files run
//! best-effort and their unresolved rows are dropped. Records are kept in
//! file order; a key `(settlement, date)` seen again is reconciled against
//! the first observation and any disagreement is recorded as a
//! [`KeyConflict`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use globset::{Glob, GlobMatcher};
use infobg_core::codes::SettlementCode;
use infobg_core::entities::CensusRecord;
use infobg_core::reconcile::{Admission, FirstSeen, Reconciliation};
use serde::{Deserialize, Serialize};

use crate::decode::SourceEncoding;
use crate::error::BatchError;
use crate::output;
use crate::resolver::{ResolveError, Resolver};
use crate::table::{TableRow, parse_table};

/// Where and how to read source tables.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub dir: PathBuf,
    /// Glob matched against file names, e.g. `tadr*`.
    pub pattern: String,
    pub encoding: SourceEncoding,
    /// Destination of the strict-mode unresolved report.
    pub report: Option<PathBuf>,
}

/// A strict-mode row that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRow {
    pub file: String,
    pub line: usize,
    pub district: String,
    pub municipality: String,
    pub settlement: String,
    pub reason: String,
}

impl UnresolvedRow {
    fn new(file: &Path, row: &TableRow, error: &ResolveError) -> Self {
        Self {
            file: file.display().to_string(),
            line: row.line,
            district: row.labels.district.clone(),
            municipality: row.labels.municipality.clone(),
            settlement: row.labels.settlement.clone(),
            reason: error.to_string(),
        }
    }
}

/// Same `(settlement, date)` key observed with different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyConflict {
    pub code: SettlementCode,
    pub date: NaiveDate,
    /// File of the later (losing) observation.
    pub file: PathBuf,
    pub outcome: Reconciliation,
}

/// Per-file counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file: PathBuf,
    pub strict: bool,
    pub rows: usize,
    pub records: usize,
    pub suppressed: usize,
    pub skipped: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// Every resolved record, newest file first. Not deduplicated.
    pub records: Vec<CensusRecord>,
    pub conflicts: Vec<KeyConflict>,
    pub files: Vec<FileSummary>,
    /// Read back from `census.json` rather than loaded from the tables.
    pub cached: bool,
}

impl BatchOutput {
    /// One record per key, the first (newest) observation winning.
    #[must_use]
    pub fn deduplicated(&self) -> Vec<CensusRecord> {
        let mut seen = FirstSeen::new();
        for record in &self.records {
            seen.admit(record.clone());
        }
        seen.into_vec()
    }
}

struct FileOutcome {
    records: Vec<CensusRecord>,
    unresolved: Vec<UnresolvedRow>,
    summary: FileSummary,
}

pub struct YearBatchLoader<'a> {
    resolver: Resolver<'a>,
    options: BatchOptions,
}

impl<'a> YearBatchLoader<'a> {
    #[must_use]
    pub const fn new(resolver: Resolver<'a>, options: BatchOptions) -> Self {
        Self { resolver, options }
    }

    /// Source files matching the pattern, most recent (greatest name) first.
    ///
    /// # Errors
    ///
    /// [`BatchError::MissingDirectory`], [`BatchError::Pattern`], or an I/O
    /// error while listing the directory.
    pub fn discover(&self) -> Result<Vec<PathBuf>, BatchError> {
        let dir = &self.options.dir;
        if !dir.is_dir() {
            return Err(BatchError::MissingDirectory(dir.clone()));
        }
        let matcher = compile_pattern(&self.options.pattern)?;
        let io_err = |source| BatchError::Io {
            path: dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let matches = path
                .file_name()
                .is_some_and(|name| matcher.is_match(Path::new(name)));
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(files)
    }

    /// Discover and load every file.
    ///
    /// # Errors
    ///
    /// As [`Self::discover`] and [`Self::run_files`].
    pub fn run(&self, progress: impl FnMut(&FileSummary)) -> Result<BatchOutput, BatchError> {
        let files = self.discover()?;
        self.run_files(&files, progress)
    }

    /// Return the cached `census.json` when allowed and present, otherwise
    /// run the batch.
    ///
    /// A cached output has no per-file summaries or conflicts.
    ///
    /// # Errors
    ///
    /// As [`Self::run`]; an unreadable cache is reported and ignored.
    pub fn load_or_run(
        &self,
        cache: &Path,
        use_cache: bool,
        progress: impl FnMut(&FileSummary),
    ) -> Result<BatchOutput, BatchError> {
        if use_cache && cache.is_file() {
            match output::read_census(cache) {
                Ok(records) => {
                    tracing::debug!(path = %cache.display(), records = records.len(), "census loaded from cache");
                    return Ok(BatchOutput {
                        records,
                        cached: true,
                        ..BatchOutput::default()
                    });
                }
                Err(error) => tracing::warn!(%error, "ignoring unreadable census cache"),
            }
        }
        self.run(progress)
    }

    /// Load `files` in the given order; the first one is strict.
    ///
    /// # Errors
    ///
    /// [`BatchError::StrictUnresolved`] after the strict file if any of its
    /// rows did not resolve (the report is written first), or read errors.
    /// A strict file that resolves cleanly removes any earlier report.
    pub fn run_files(
        &self,
        files: &[PathBuf],
        mut progress: impl FnMut(&FileSummary),
    ) -> Result<BatchOutput, BatchError> {
        let mut collected = BatchOutput::default();
        let mut seen: FirstSeen<CensusRecord> = FirstSeen::new();

        for (index, file) in files.iter().enumerate() {
            let strict = index == 0;
            let outcome = self.load_file(file, strict)?;

            if !outcome.unresolved.is_empty() {
                let count = outcome.unresolved.len();
                if let Some(report) = &self.options.report {
                    output::write_unresolved(report, &outcome.unresolved)?;
                }
                for row in &outcome.unresolved {
                    tracing::error!(file = %row.file, line = row.line, reason = %row.reason, "unresolved row");
                }
                return Err(BatchError::StrictUnresolved {
                    file: file.clone(),
                    count,
                    report: self.options.report.clone(),
                });
            }
            if strict {
                if let Some(report) = &self.options.report {
                    output::remove_unresolved(report)?;
                }
            }

            for record in outcome.records {
                if let Admission::Duplicate(reconciliation) = seen.admit(record.clone()) {
                    if !reconciliation.is_match() {
                        tracing::warn!(
                            code = %record.code,
                            date = %record.date,
                            file = %file.display(),
                            outcome = ?reconciliation,
                            "conflicting census observation, keeping first-seen"
                        );
                        collected.conflicts.push(KeyConflict {
                            code: record.code.clone(),
                            date: record.date,
                            file: file.clone(),
                            outcome: reconciliation,
                        });
                    }
                }
                collected.records.push(record);
            }

            tracing::info!(
                file = %file.display(),
                strict,
                records = outcome.summary.records,
                suppressed = outcome.summary.suppressed,
                dropped = outcome.summary.unresolved,
                "loaded census file"
            );
            progress(&outcome.summary);
            collected.files.push(outcome.summary);
        }

        Ok(collected)
    }

    fn load_file(&self, path: &Path, strict: bool) -> Result<FileOutcome, BatchError> {
        let text = self.options.encoding.read(path)?;
        let table = parse_table(&text);

        let mut summary = FileSummary {
            file: path.to_path_buf(),
            strict,
            rows: table.rows.len(),
            skipped: table.skipped.len(),
            ..FileSummary::default()
        };
        let mut records = Vec::new();
        let mut unresolved = Vec::new();

        for row in &table.rows {
            match self.resolver.resolve(&row.labels, row.counts) {
                Ok(Some(resolved)) => records.push(CensusRecord {
                    code: resolved.code,
                    district: resolved.district,
                    municipality: resolved.municipality,
                    date: row.date,
                    permanent: resolved.payload.permanent(),
                    current: resolved.payload.current(),
                }),
                Ok(None) => summary.suppressed += 1,
                Err(error) => {
                    summary.unresolved += 1;
                    if strict {
                        unresolved.push(UnresolvedRow::new(path, row, &error));
                    } else {
                        tracing::debug!(file = %path.display(), line = row.line, %error, "dropping unresolved row");
                    }
                }
            }
        }

        summary.records = records.len();
        Ok(FileOutcome {
            records,
            unresolved,
            summary,
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, BatchError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| BatchError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
