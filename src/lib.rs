//! projectdump - Summarize a codebase into a single markdown document.
//!
//! projectdump walks directory trees, filters out non-essential files,
//! detects the technologies in use with heuristic scoring, and renders the
//! stack, layout, and sources of one or more projects.
//!
//! # Quick Start
//!
//! ```no_run
//! use projectdump::builder::ProjectDump;
//! use projectdump::report::{format_report, timestamp_now, ReportOptions};
//!
//! let scan = ProjectDump::new("./my-project").scan().unwrap();
//!
//! println!("Primary language: {}", scan.summary.primary_language);
//! for tech in &scan.summary.technologies {
//!     println!("{}: {:.0}%", tech.name, tech.confidence * 100.0);
//! }
//!
//! let report = format_report(&[scan], &ReportOptions::default(), &timestamp_now()).unwrap();
//! print!("{report}");
//! ```
//!
//! # Modules
//!
//! - [`filter`] - Directory pruning, extension/dotfile rules, binary sniffing
//! - [`language`] - Extension to language label mapping
//! - [`walker`] - Directory traversal producing file records
//! - [`detect`] - Technology detection scoring
//! - [`tree`] - Directory tree building and rendering
//! - [`builder`] - Fluent API for scanning projects
//! - [`report`] - Markdown and JSON reports

pub mod filter;
pub mod language;
pub mod errors;
pub mod walker;
pub mod detect;
pub mod tree;
pub mod builder;
pub mod report;

// Re-export key types at crate root for convenience
pub use builder::{scan_all, ProjectDump, ProjectScan, ProjectSummary};
pub use detect::{DetectedTechnology, PatternError, PatternSet, TechPattern, TechnologyDetector};
pub use errors::ProjectDumpError;
pub use filter::{FileFilter, FilterConfig, FilterResult, RejectReason};
pub use report::{OutputError, OutputFormat, ReportOptions};
pub use tree::{NodeKind, TreeNode};
pub use walker::{FileRecord, WalkError, WalkOptions};
