//! Batch Scheduler - parallel extraction over a rayon worker pool
//!
//! Each file is one independent job: it reads its own content, builds its own
//! parser and owns its tree. Results land in two append-only collectors that
//! are drained once every worker has finished.
//!
//! # Error Handling
//! - A per-file failure never fails the batch
//! - `errors` holds exactly one entry per file that reported a problem
//! - Files that produced a (possibly partial) `ParsedFile` appear in `parsed`
//!   even when they also reported an error

use crate::config::{available_cpus, ExtractorConfig, DEFAULT_MAX_WORKERS};
use crate::extractors::base::{DetailedParseError, ParsedFile, SourceFile};
use crate::extractors::factory::{extract_file, FileOutcome};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Receives per-file progress and failures while a batch runs
pub trait ProgressLogger: Send + Sync {
    fn log_progress(&self, current: usize, total: usize, path: &str);
    fn log_error(&self, path: &str, error: &DetailedParseError);
}

/// Default logger, forwards to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressLogger;

impl ProgressLogger for TracingProgressLogger {
    fn log_progress(&self, current: usize, total: usize, path: &str) {
        debug!("[{}/{}] {}", current, total, path);
    }

    fn log_error(&self, path: &str, error: &DetailedParseError) {
        warn!("failed to extract {}: {}", path, error);
    }
}

/// Append-only, shared between workers
struct Collector<T> {
    items: Mutex<Vec<T>>,
}

impl<T> Collector<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    fn push(&self, item: T) {
        self.items.lock().push(item);
    }

    fn into_inner(self) -> Vec<T> {
        self.items.into_inner()
    }
}

pub struct ParserPool {
    workers: usize,
    verbose: bool,
    logger: Arc<dyn ProgressLogger>,
    /// `None` when the dedicated pool could not be built; the global rayon pool is used instead
    threads: Option<rayon::ThreadPool>,
}

impl ParserPool {
    /// `workers == 0` means one per CPU; the count is capped at 16
    pub fn new(workers: usize) -> Self {
        Self::from_config(&ExtractorConfig {
            workers,
            ..Default::default()
        })
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        let workers = config.resolved_workers();
        let threads = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("polyglot-worker-{}", index))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("failed to build worker pool, using the global pool: {}", e);
                None
            }
        };
        Self {
            workers,
            verbose: config.verbose,
            logger: Arc::new(TracingProgressLogger),
            threads,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ProgressLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Extract every file. Order across the two sequences is not correlated.
    pub fn process(&self, files: &[SourceFile]) -> (Vec<ParsedFile>, Vec<DetailedParseError>) {
        if files.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let total = files.len();
        info!("extracting {} files with {} workers", total, self.workers);

        let parsed = Collector::with_capacity(total);
        let errors = Collector::with_capacity(0);
        let processed = AtomicUsize::new(0);

        let run = || {
            files.par_iter().for_each(|file| {
                let (file_result, error) = extract_guarded(file);
                if let Some(error) = error {
                    self.logger.log_error(&file.path, &error);
                    errors.push(error);
                }
                if let Some(file_result) = file_result {
                    parsed.push(file_result);
                }
                let current = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if self.verbose {
                    self.logger.log_progress(current, total, &file.path);
                }
            })
        };
        match &self.threads {
            Some(pool) => pool.install(run),
            None => run(),
        }

        let parsed = parsed.into_inner();
        let errors = errors.into_inner();
        info!(
            "extracted {} files, {} with errors",
            parsed.len(),
            errors.len()
        );
        (parsed, errors)
    }
}

impl Default for ParserPool {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A panicking extractor becomes a mapping error for that file only
fn extract_guarded(file: &SourceFile) -> FileOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| extract_file(file))).unwrap_or_else(|_| {
        (
            None,
            Some(DetailedParseError::mapping(
                &file.path,
                "extractor panicked while processing file",
            )),
        )
    })
}

/// Worker count suited to a batch of `file_count` files
pub fn optimal_worker_count(file_count: usize) -> usize {
    worker_count_for(file_count, available_cpus())
}

fn worker_count_for(file_count: usize, cpus: usize) -> usize {
    if file_count < 10 {
        cpus.min(2)
    } else if file_count < 50 {
        (cpus / 2).max(1)
    } else {
        cpus.min(DEFAULT_MAX_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::ParseErrorKind;
    use crate::language::Language;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingLogger {
        progress: Mutex<Vec<(usize, usize)>>,
        errors: Mutex<Vec<String>>,
    }

    impl ProgressLogger for RecordingLogger {
        fn log_progress(&self, current: usize, total: usize, _path: &str) {
            self.progress.lock().push((current, total));
        }

        fn log_error(&self, path: &str, _error: &DetailedParseError) {
            self.errors.lock().push(path.to_string());
        }
    }

    fn write(dir: &TempDir, name: &str, language: &str, content: &str) -> SourceFile {
        let abs = dir.path().join(name);
        fs::write(&abs, content).unwrap();
        SourceFile::new(name, abs.to_string_lossy(), language)
    }

    #[test]
    fn test_empty_input() {
        let pool = ParserPool::new(2);
        let (parsed, errors) = pool.process(&[]);
        assert!(parsed.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_two_unreadable_files_yield_two_errors() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            SourceFile::new("a.go", dir.path().join("a.go").to_string_lossy(), "go"),
            SourceFile::new("b.py", dir.path().join("b.py").to_string_lossy(), "python"),
        ];
        let (parsed, errors) = ParserPool::new(2).process(&files);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ParseErrorKind::Filesystem));
        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|f| f.symbols.is_empty()));
    }

    #[test]
    fn test_mixed_batch() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            write(&dir, "main.go", "go", "package main\nfunc main() {}\n"),
            write(&dir, "app.py", "python", "def run():\n    pass\n"),
            write(&dir, "App.kt", "kotlin", "class App\n"),
            write(&dir, "lib.rs", "rust", "fn main() {}\n"),
            write(&dir, "broken.java", "java", "class Broken {\n  void f( {\n}\n"),
        ];
        let logger = Arc::new(RecordingLogger::default());
        let mut pool = ParserPool::new(3).with_logger(logger.clone());
        pool.set_verbose(true);

        let (parsed, errors) = pool.process(&files);
        assert_eq!(parsed.len(), 4);
        assert_eq!(errors.len(), 2);
        let mut kinds: Vec<_> = errors.iter().map(|e| (e.file.as_str(), e.kind)).collect();
        kinds.sort_by_key(|(file, _)| *file);
        assert_eq!(
            kinds,
            vec![
                ("broken.java", ParseErrorKind::Parse),
                ("lib.rs", ParseErrorKind::Mapping),
            ]
        );

        let mut languages: Vec<_> = parsed.iter().map(|f| f.language).collect();
        languages.sort_by_key(|l| l.as_str());
        assert_eq!(
            languages,
            vec![Language::Go, Language::Java, Language::Kotlin, Language::Python]
        );

        let mut seen = logger.errors.lock().clone();
        seen.sort();
        assert_eq!(seen, vec!["broken.java", "lib.rs"]);
        let mut progress: Vec<usize> = logger.progress.lock().iter().map(|(n, _)| *n).collect();
        progress.sort();
        assert_eq!(progress, vec![1, 2, 3, 4, 5]);
        assert!(logger.progress.lock().iter().all(|(_, total)| *total == 5));
    }

    #[test]
    fn test_progress_is_silent_unless_verbose() {
        let dir = TempDir::new().unwrap();
        let files = vec![write(&dir, "a.py", "python", "x = 1\n")];
        let logger = Arc::new(RecordingLogger::default());
        let pool = ParserPool::new(1).with_logger(logger.clone());
        pool.process(&files);
        assert!(logger.progress.lock().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ExtractorConfig::from_json(r#"{"workers": 40, "verbose": true}"#).unwrap();
        let pool = ParserPool::from_config(&config);
        assert_eq!(pool.workers(), 16);
        assert!(pool.verbose);
        assert_eq!(ParserPool::new(3).workers(), 3);
    }

    #[test]
    fn test_worker_count_heuristic() {
        assert_eq!(worker_count_for(5, 8), 2);
        assert_eq!(worker_count_for(5, 1), 1);
        assert_eq!(worker_count_for(20, 8), 4);
        assert_eq!(worker_count_for(20, 1), 1);
        assert_eq!(worker_count_for(500, 8), 8);
        assert_eq!(worker_count_for(500, 64), 16);
        assert!(optimal_worker_count(100) >= 1);
    }
}
