//! Fluent builder API for scanning projects.
//!
//! A scan walks one root, then runs technology detection and tree building
//! over the accepted files. Both stages only read the file set, so they run
//! side by side.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::detect::{primary_language, DetectedTechnology, PatternSet, TechnologyDetector};
use crate::errors::ProjectDumpError;
use crate::filter::FilterConfig;
use crate::tree::{build_tree, TreeNode};
use crate::walker::{walk_with_options, FileRecord, WalkOptions};

/// Aggregate statistics for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub root: PathBuf,
    /// Every non-directory entry visited, accepted or not.
    pub total_files: usize,
    /// Accepted files only.
    pub processed_files: usize,
    /// Cumulative size of examined files, in bytes.
    pub total_size: u64,
    pub technologies: Vec<DetectedTechnology>,
    pub primary_language: String,
}

/// Everything known about one scanned project.
#[derive(Debug, Clone)]
pub struct ProjectScan {
    pub summary: ProjectSummary,
    /// Accepted files in walk order.
    pub files: Vec<FileRecord>,
    pub tree: TreeNode,
}

/// Builder for scanning a project.
///
/// # Examples
///
/// ```no_run
/// use projectdump::builder::ProjectDump;
///
/// let scan = ProjectDump::new("./project")
///     .max_file_size(512 * 1024)
///     .scan()
///     .unwrap();
///
/// println!("{}: {}", scan.summary.root.display(), scan.summary.primary_language);
/// ```
pub struct ProjectDump {
    root: PathBuf,
    filter_config: FilterConfig,
    patterns: PatternSet,
    walk_options: WalkOptions,
}

impl ProjectDump {
    /// Create a new builder for the given root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter_config: FilterConfig::default(),
            patterns: PatternSet::builtin(),
            walk_options: WalkOptions::default(),
        }
    }

    /// Replace the filter configuration.
    pub fn filter_config(mut self, config: FilterConfig) -> Self {
        self.filter_config = config;
        self
    }

    /// Replace the technology patterns.
    pub fn patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// Override the per-file size cap.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.filter_config.max_file_size = bytes;
        self
    }

    /// Honor .gitignore files while walking.
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.walk_options.respect_gitignore = respect;
        self
    }

    /// Follow symbolic links while walking.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.walk_options.follow_symlinks = follow;
        self
    }

    /// Scan the project.
    pub fn scan(self) -> Result<ProjectScan, ProjectDumpError> {
        scan_project(
            &self.root,
            &self.filter_config,
            &self.patterns,
            &self.walk_options,
        )
    }
}

/// Scan one root with explicit configuration.
pub fn scan_project(
    root: &Path,
    filter_config: &FilterConfig,
    patterns: &PatternSet,
    walk_options: &WalkOptions,
) -> Result<ProjectScan, ProjectDumpError> {
    let outcome = walk_with_options(root, filter_config, walk_options)?;

    let detector = TechnologyDetector::new(patterns);
    let (technologies, tree) = rayon::join(
        || detector.detect(&outcome.files),
        || build_tree(&outcome.files),
    );

    let summary = ProjectSummary {
        root: root.to_path_buf(),
        total_files: outcome.total_files,
        processed_files: outcome.files.len(),
        total_size: outcome.total_size,
        primary_language: primary_language(&technologies),
        technologies,
    };

    info!(
        root = %root.display(),
        total = summary.total_files,
        processed = summary.processed_files,
        primary = %summary.primary_language,
        "scanned project"
    );

    Ok(ProjectScan {
        summary,
        files: outcome.files,
        tree,
    })
}

/// Scan several roots independently, keeping input order.
///
/// Fails with the first error if any root fails.
pub fn scan_all(
    roots: &[PathBuf],
    filter_config: &FilterConfig,
    patterns: &PatternSet,
    walk_options: &WalkOptions,
) -> Result<Vec<ProjectScan>, ProjectDumpError> {
    roots
        .par_iter()
        .map(|root| scan_project(root, filter_config, patterns, walk_options))
        .collect()
}
