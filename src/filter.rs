//! File filtering with blocklists, a dotfile allow-list, and content heuristics.
//!
//! Filtering is staged so the walker can account for sizes between the
//! name-based checks and the size/content checks:
//!
//! 1. [`FileFilter::check_directory`]: ignored directories are pruned.
//! 2. [`FileFilter::check_name`]: blocked extensions and hidden files.
//! 3. [`FileFilter::check_size`]: files over the size cap.
//! 4. [`FileFilter::check_content`]: binary sniffing on the leading bytes.

use std::collections::HashSet;
use std::fmt;

/// Default size cap for inspected files (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Number of leading bytes inspected for null bytes.
pub const BINARY_SNIFF_LEN: usize = 512;

const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "vendor",
    "__pycache__",
    ".idea",
    ".vscode",
    "build",
    "dist",
    "target",
    "bin",
    "obj",
    ".next",
    ".nuxt",
    "coverage",
    ".nyc_output",
    "logs",
    "tmp",
    "temp",
];

const IGNORED_EXTENSIONS: &[&str] = &[
    // Executables and libraries
    ".exe", ".dll", ".so", ".dylib",
    // Archives
    ".zip", ".tar", ".gz", ".rar",
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp",
    // Media
    ".mp4", ".avi", ".mov", ".mp3", ".wav",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    // JVM
    ".class", ".jar", ".war",
    // Objects
    ".o", ".obj", ".lib", ".a",
    // Python bytecode
    ".pyc", ".pyo", ".pyd",
];

const IMPORTANT_DOTFILES: &[&str] = &[
    ".gitignore",
    ".dockerignore",
    ".env",
    ".env.example",
    ".eslintrc",
    ".prettierrc",
    ".babelrc",
    ".travis.yml",
    ".github",
];

/// Immutable filter configuration, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Directory base names whose subtrees are never visited.
    pub ignored_dirs: HashSet<String>,
    /// Lowercase extensions (with leading dot) rejected without reading.
    pub ignored_extensions: HashSet<String>,
    /// Dotfiles that are kept despite the hidden-file rule.
    pub important_dotfiles: HashSet<String>,
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
    /// Leading bytes inspected for null bytes.
    pub sniff_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: to_set(IGNORED_DIRS),
            ignored_extensions: to_set(IGNORED_EXTENSIONS),
            important_dotfiles: to_set(IMPORTANT_DOTFILES),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            sniff_len: BINARY_SNIFF_LEN,
        }
    }
}

impl FilterConfig {
    /// Override the size cap.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Why an entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Directory on the ignore list; its subtree is pruned.
    IgnoredDirectory,
    /// Binary, archive, or compiled-artifact extension.
    IgnoredExtension,
    /// Dotfile not on the allow-list.
    Hidden,
    /// Larger than the configured size cap.
    TooLarge,
    /// Null byte found in the leading bytes.
    Binary,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectReason::IgnoredDirectory => "ignored directory",
            RejectReason::IgnoredExtension => "ignored extension",
            RejectReason::Hidden => "hidden file",
            RejectReason::TooLarge => "too large",
            RejectReason::Binary => "binary content",
        };
        f.write_str(reason)
    }
}

/// Outcome of a filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Accept,
    Reject(RejectReason),
}

impl FilterResult {
    pub fn is_accept(&self) -> bool {
        matches!(self, FilterResult::Accept)
    }
}

/// Applies a [`FilterConfig`] to filesystem entries.
#[derive(Debug, Clone, Copy)]
pub struct FileFilter<'a> {
    config: &'a FilterConfig,
}

impl<'a> FileFilter<'a> {
    pub fn new(config: &'a FilterConfig) -> Self {
        Self { config }
    }

    /// Directories on the ignore list are rejected and must not be descended.
    pub fn check_directory(&self, name: &str) -> FilterResult {
        if self.config.ignored_dirs.contains(name) {
            FilterResult::Reject(RejectReason::IgnoredDirectory)
        } else {
            FilterResult::Accept
        }
    }

    /// Name-only checks: blocked extensions first, then the dotfile policy.
    pub fn check_name(&self, name: &str) -> FilterResult {
        let ext = dotted_extension(name).to_lowercase();
        if self.config.ignored_extensions.contains(&ext) {
            return FilterResult::Reject(RejectReason::IgnoredExtension);
        }

        if name.starts_with('.') && !self.is_important_dotfile(name) {
            return FilterResult::Reject(RejectReason::Hidden);
        }

        FilterResult::Accept
    }

    /// Reject files above the size cap before any content is read.
    pub fn check_size(&self, size: u64) -> FilterResult {
        if size > self.config.max_file_size {
            FilterResult::Reject(RejectReason::TooLarge)
        } else {
            FilterResult::Accept
        }
    }

    /// Reject content that looks binary.
    pub fn check_content(&self, content: &[u8]) -> FilterResult {
        if is_binary(content, self.config.sniff_len) {
            FilterResult::Reject(RejectReason::Binary)
        } else {
            FilterResult::Accept
        }
    }

    fn is_important_dotfile(&self, name: &str) -> bool {
        let allowed = &self.config.important_dotfiles;
        if allowed.contains(name) {
            return true;
        }
        // `.env.local` is kept because `.env` is
        let ext = dotted_extension(name);
        allowed.contains(&name[..name.len() - ext.len()])
    }
}

/// Returns true when a null byte appears within the first `sniff_len` bytes.
///
/// Empty content is never binary.
pub fn is_binary(content: &[u8], sniff_len: usize) -> bool {
    let prefix = &content[..content.len().min(sniff_len)];
    prefix.contains(&0)
}

/// Extension of a base name including the leading dot, taken from the last
/// `.` in the name. Returns an empty string when there is no dot.
///
/// A dotfile's whole name is its extension: `.gitignore` → `.gitignore`.
pub fn dotted_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}
