//! Directory traversal producing the accepted file set.
//!
//! Uses the `ignore` crate to walk in a stable, name-sorted order. Ignored
//! directories are pruned through `filter_entry`, so nothing beneath them is
//! ever visited. Any I/O error aborts the walk.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::debug;

use crate::filter::{dotted_extension, FileFilter, FilterConfig, FilterResult};
use crate::language::language_for_extension;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop detected: {path}")]
    SymlinkLoop { path: PathBuf },
}

/// Options for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Respect .gitignore patterns in addition to the built-in ignore lists.
    pub respect_gitignore: bool,
}

/// One accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Root-relative path, always `/`-separated.
    pub path: String,
    pub size: u64,
    pub content: String,
    pub language: &'static str,
}

impl FileRecord {
    /// Create a record, deriving size and language from the path and content.
    pub fn new(path: impl Into<String>, content: String) -> Self {
        let path = path.into();
        let ext = dotted_extension(base_name(&path)).to_lowercase();
        Self {
            size: content.len() as u64,
            language: language_for_extension(&ext),
            path,
            content,
        }
    }

    /// Base name of the file.
    pub fn file_name(&self) -> &str {
        base_name(&self.path)
    }

    /// Number of lines in the content.
    pub fn line_count(&self) -> usize {
        let newlines = bytecount::count(self.content.as_bytes(), b'\n');
        if self.content.is_empty() || self.content.ends_with('\n') {
            newlines
        } else {
            newlines + 1
        }
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Result of walking one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Accepted files in walk order.
    pub files: Vec<FileRecord>,
    /// Every non-directory entry visited, accepted or not.
    pub total_files: usize,
    /// Cumulative size of examined files.
    pub total_size: u64,
}

/// Walk `root` with default options.
pub fn walk(root: &Path, config: &FilterConfig) -> Result<WalkOutcome, WalkError> {
    walk_with_options(root, config, &WalkOptions::default())
}

/// Walk `root`, filtering entries and reading accepted files.
///
/// Size accounting happens after the name checks and before the size cap and
/// binary sniff, so oversized and binary files still count toward
/// [`WalkOutcome::total_size`].
pub fn walk_with_options(
    root: &Path,
    config: &FilterConfig,
    options: &WalkOptions,
) -> Result<WalkOutcome, WalkError> {
    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WalkError::NotFound {
            path: root.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => WalkError::PermissionDenied {
            path: root.to_path_buf(),
        },
        _ => WalkError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let filter = FileFilter::new(config);
    let prune_config = config.clone();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if entry.depth() == 0 || !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            let keep = FileFilter::new(&prune_config).check_directory(&name).is_accept();
            if !keep {
                debug!(path = %entry.path().display(), "pruned ignored directory");
            }
            keep
        });

    if options.respect_gitignore {
        builder
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false);
    }

    let mut outcome = WalkOutcome::default();

    for result in builder.build() {
        let entry = result.map_err(convert_error)?;
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }

        outcome.total_files += 1;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        if let FilterResult::Reject(reason) = filter.check_name(&name) {
            debug!(path = %path.display(), %reason, "skipped");
            continue;
        }

        let size = entry.metadata().map_err(convert_error)?.len();
        outcome.total_size += size;

        if let FilterResult::Reject(reason) = filter.check_size(size) {
            debug!(path = %path.display(), size, %reason, "skipped");
            continue;
        }

        let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
        if let FilterResult::Reject(reason) = filter.check_content(&bytes) {
            debug!(path = %path.display(), %reason, "skipped");
            continue;
        }

        let content = String::from_utf8_lossy(&bytes).into_owned();
        let mut record = FileRecord::new(relative_path(root, path), content);
        record.size = size;
        outcome.files.push(record);
    }

    Ok(outcome)
}

/// Root-relative path joined with `/` regardless of platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn io_error(path: &Path, source: std::io::Error) -> WalkError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        WalkError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        WalkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn convert_error(err: ignore::Error) -> WalkError {
    match err {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(source) => io_error(&path, source),
            ignore::Error::Loop { child, .. } => WalkError::SymlinkLoop { path: child },
            other => WalkError::Io {
                path,
                source: std::io::Error::other(other.to_string()),
            },
        },
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            convert_error(*err)
        }
        ignore::Error::Loop { child, .. } => WalkError::SymlinkLoop { path: child },
        ignore::Error::Io(source) => io_error(Path::new("<walk error>"), source),
        other => WalkError::Io {
            path: PathBuf::from("<walk error>"),
            source: std::io::Error::other(other.to_string()),
        },
    }
}
