//! Filesystem persistence for reports.
//!
//! Reports live as pretty-printed JSON files named
//! `report-YYYY-MM-DDTHH-MM-SSZ.json`. The timestamp is encoded in the
//! filename (colons replaced with dashes for portability) and is the
//! sort key for rotation and read-back. Reads are tolerant: files with
//! unparseable names or contents are skipped with a warning, never
//! fatal to the monitoring loop.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use tracing::{info, warn};

use super::Report;

const REPORT_PREFIX: &str = "report-";
const REPORT_SUFFIX: &str = ".json";
const FILENAME_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Opens (creating if needed) the report directory.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one report, then rotates so at most `max_reports` files
    /// remain. A rotation failure is logged, not propagated: the
    /// report itself was persisted.
    pub fn save(&self, report: &Report, max_reports: usize) -> std::io::Result<PathBuf> {
        self.save_at(report, Utc::now(), max_reports)
    }

    fn save_at(
        &self,
        report: &Report,
        time: DateTime<Utc>,
        max_reports: usize,
    ) -> std::io::Result<PathBuf> {
        let filename = format!(
            "{REPORT_PREFIX}{}{REPORT_SUFFIX}",
            time.format(FILENAME_TIME_FORMAT)
        );
        let path = self.dir.join(&filename);

        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)?;
        info!("Report saved: {}", path.display());

        if let Err(e) = self.rotate(max_reports) {
            warn!("Report rotation failed: {}", e);
        }

        Ok(path)
    }

    /// Removes the oldest report files beyond `max_reports`. Files
    /// whose names don't parse are left alone. Returns the number of
    /// files removed.
    pub fn rotate(&self, max_reports: usize) -> std::io::Result<usize> {
        let mut reports = self.report_files()?;
        if reports.len() <= max_reports {
            return Ok(0);
        }

        // Oldest first.
        reports.sort_by_key(|(_, time)| *time);
        let overflow = reports.len() - max_reports;

        let mut removed = 0;
        for (path, _) in reports.into_iter().take(overflow) {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to delete old report {}: {}", path.display(), e),
            }
        }
        if removed > 0 {
            info!(
                "Rotating reports: keeping {}, removed {} oldest",
                max_reports, removed
            );
        }
        Ok(removed)
    }

    /// Reads all reports back, newest first, with the filename
    /// timestamp attached as an ISO 8601 string. Unreadable or
    /// unparseable files are skipped. A missing directory reads as
    /// empty.
    pub fn load_all(&self) -> std::io::Result<Vec<Report>> {
        let mut reports = match self.report_files() {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        // Newest first.
        reports.sort_by_key(|(_, time)| std::cmp::Reverse(*time));

        let mut loaded = Vec::with_capacity(reports.len());
        for (path, time) in reports {
            let content = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Failed to read report file {}: {}", path.display(), e);
                    continue;
                }
            };
            let mut report: Report = match serde_json::from_str(&content) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Failed to parse report file {}: {}", path.display(), e);
                    continue;
                }
            };
            report.timestamp = Some(time.to_rfc3339_opts(SecondsFormat::Millis, true));
            loaded.push(report);
        }
        Ok(loaded)
    }

    /// Deletes every report file. Returns the number deleted; a missing
    /// directory counts as nothing to clear.
    pub fn clear(&self) -> std::io::Result<usize> {
        let reports = match self.report_files() {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut deleted = 0;
        for (path, _) in reports {
            match std::fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!("Failed to delete report {}: {}", path.display(), e),
            }
        }
        Ok(deleted)
    }

    /// Lists report files with their filename timestamps. Files whose
    /// names don't match the report pattern are ignored.
    fn report_files(&self) -> std::io::Result<Vec<(PathBuf, DateTime<Utc>)>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match Self::parse_timestamp(name) {
                Some(time) => files.push((path, time)),
                None => {
                    if name.starts_with(REPORT_PREFIX) && name.ends_with(REPORT_SUFFIX) {
                        warn!("Failed to parse timestamp from filename: {}", name);
                    }
                }
            }
        }
        Ok(files)
    }

    /// Parses `report-YYYY-MM-DDTHH-MM-SSZ.json` back to a UTC time.
    fn parse_timestamp(filename: &str) -> Option<DateTime<Utc>> {
        let stamp = filename
            .strip_prefix(REPORT_PREFIX)?
            .strip_suffix(REPORT_SUFFIX)?;
        NaiveDateTime::parse_from_str(stamp, FILENAME_TIME_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}
