//! Catalog assembly: drives enumeration, extraction, normalization, and
//! naming into an ordered record sequence, reporting progress as it goes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::enumerate::Enumerator;
use crate::app::extract::extract_fragments;
use crate::app::ignore::{IgnoreRules, load_ignore_patterns};
use crate::app::name::derive_name;
use crate::app::normalize::normalize;
use crate::domain::errors::ScanError;
use crate::domain::model::{Catalog, CatalogRecord};
use crate::infra::config::Config;

/// Receiver for streamed scan output. Stands in for the presentation
/// surface's messaging channel: records arrive as soon as they exist, and
/// progress percentages arrive coalesced.
pub trait CatalogSink {
    fn record_added(&mut self, record: &CatalogRecord, index: usize);
    fn progress(&mut self, percent: u8);
}

/// Sink for batch callers that only want the returned [`Catalog`].
#[derive(Debug, Default)]
pub struct NullSink;

impl CatalogSink for NullSink {
    fn record_added(&mut self, _record: &CatalogRecord, _index: usize) {}
    fn progress(&mut self, _percent: u8) {}
}

/// One-shot scan service. All state is created per invocation and dropped
/// with the returned catalog; nothing carries over between scans.
#[derive(Debug)]
pub struct CatalogBuilder<'a> {
    config: &'a Config,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Batch scan: collect the full catalog without streaming.
    pub fn scan(&self, root: Option<&Path>) -> Result<Catalog, ScanError> {
        self.scan_with(root, &mut NullSink)
    }

    /// Scan `root`, streaming each record and throttled progress updates
    /// into `sink`. A `None` root resolves to an empty catalog; a root that
    /// does not exist is the one condition that fails the scan.
    pub fn scan_with(
        &self,
        root: Option<&Path>,
        sink: &mut dyn CatalogSink,
    ) -> Result<Catalog, ScanError> {
        let mut gate = ProgressGate::default();

        let Some(root) = root else {
            gate.finish(sink);
            return Ok(Catalog::default());
        };

        let patterns = load_ignore_patterns(root);
        let rules = match IgnoreRules::build(&patterns, &self.config.ignore.globs()) {
            Ok(rules) => rules,
            Err(err) => {
                tracing::warn!(error = %err, "ignore rules rejected, scanning without them");
                IgnoreRules::default()
            }
        };

        let files = Enumerator::from_config(self.config).enumerate(root, &rules)?;
        let total = files.total();

        let mut catalog = Catalog {
            records: Vec::new(),
            root: root.to_path_buf(),
        };
        let mut processed = 0usize;

        for path in &files.svg_files {
            self.process_file(path, true, &mut catalog, sink);
            processed += 1;
            gate.report(sink, processed, total);
        }
        for path in &files.host_files {
            self.process_file(path, false, &mut catalog, sink);
            processed += 1;
            gate.report(sink, processed, total);
        }

        gate.finish(sink);
        Ok(catalog)
    }

    /// Read one file and append its records. Unreadable files are skipped so
    /// a single bad file cannot blank out an otherwise successful catalog.
    fn process_file(
        &self,
        path: &PathBuf,
        is_pure_svg: bool,
        catalog: &mut Catalog,
        sink: &mut dyn CatalogSink,
    ) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                return;
            }
        };

        for (fragment_index, raw) in extract_fragments(&content, is_pure_svg).iter().enumerate() {
            let record = CatalogRecord {
                name: derive_name(path, fragment_index),
                fragment: normalize(raw),
                source_path: path.clone(),
            };
            let index = catalog.records.len();
            sink.record_added(&record, index);
            catalog.records.push(record);
        }
    }
}

/// Coalesces progress updates: a value is forwarded only when it exceeds the
/// last forwarded value by more than 1, and completion always lands on 100.
#[derive(Debug, Default)]
struct ProgressGate {
    last: u8,
    finished: bool,
}

impl ProgressGate {
    fn report(&mut self, sink: &mut dyn CatalogSink, processed: usize, total: usize) {
        if total == 0 {
            return;
        }
        let percent = ((processed * 100) / total).min(100) as u8;
        if percent > self.last.saturating_add(1) && percent < 100 {
            self.last = percent;
            sink.progress(percent);
        }
    }

    fn finish(&mut self, sink: &mut dyn CatalogSink) {
        if !self.finished {
            self.finished = true;
            self.last = 100;
            sink.progress(100);
        }
    }
}
