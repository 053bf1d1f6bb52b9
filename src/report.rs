//! Report assembly for scanned projects.
//!
//! Formats project summaries, directory trees, and file contents into a
//! markdown document, or JSON for programmatic access.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::builder::{ProjectScan, ProjectSummary};
use crate::language::syntax_tag;
use crate::tree::render_tree;
use crate::walker::FileRecord;

/// Errors that can occur during output formatting.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown document (default).
    #[default]
    Markdown,
    /// JSON for programmatic access.
    Json,
}

/// Options controlling the report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Related files listed per technology before summarizing the rest.
    pub max_related_files: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            max_related_files: 5,
        }
    }
}

/// Current local time in the report's timestamp format.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a report for one or more scanned projects.
pub fn format_report(
    scans: &[ProjectScan],
    options: &ReportOptions,
    generated_at: &str,
) -> Result<String, OutputError> {
    match options.format {
        OutputFormat::Markdown => Ok(format_markdown(scans, options, generated_at)),
        OutputFormat::Json => format_json(scans, generated_at),
    }
}

/// Write a report to `path`, or to stdout when `path` is `None`.
pub fn write_report(report: &str, path: Option<&Path>) -> Result<(), OutputError> {
    use std::io::Write;

    match path {
        Some(path) => std::fs::write(path, report)?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(report.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

// ============================================================================
// Markdown Formatting
// ============================================================================

fn format_markdown(scans: &[ProjectScan], options: &ReportOptions, generated_at: &str) -> String {
    let mut output = String::with_capacity(8192);

    output.push_str("# ProjectDump Analysis\n\n");
    output.push_str(&format!("**Generated on:** {}\n", generated_at));

    for (i, scan) in scans.iter().enumerate() {
        if i > 0 {
            output.push_str("---\n\n");
        }
        format_project(&mut output, scan, options);
    }

    output
}

fn format_project(output: &mut String, scan: &ProjectScan, options: &ReportOptions) {
    let summary = &scan.summary;

    output.push_str(&format!("**Project Path:** {}\n\n", summary.root.display()));

    output.push_str("## Project Summary\n\n");
    output.push_str(&format!("- **Primary Language:** {}\n", summary.primary_language));
    output.push_str(&format!("- **Total Files:** {}\n", summary.total_files));
    output.push_str(&format!("- **Processed Files:** {}\n", summary.processed_files));
    output.push_str(&format!("- **Project Size:** {}\n\n", format_kb(summary.total_size)));

    format_technologies(output, summary, options.max_related_files);

    output.push_str("## Directory Structure\n\n");
    output.push_str("```\n");
    output.push_str(&render_tree(&scan.tree));
    output.push_str("```\n\n");

    output.push_str("## Source Code\n\n");
    for (dir, files) in group_by_directory(&scan.files) {
        if !dir.is_empty() {
            output.push_str(&format!("### {}/\n\n", dir));
        }
        for file in files {
            format_file(output, file);
        }
    }
}

fn format_technologies(output: &mut String, summary: &ProjectSummary, max_files: usize) {
    if summary.technologies.is_empty() {
        return;
    }

    output.push_str("## Detected Technologies\n\n");
    for tech in &summary.technologies {
        output.push_str(&format!(
            "### {} ({:.1}% confidence)\n",
            tech.name,
            tech.confidence * 100.0
        ));
        output.push_str(&format!("*{}*\n\n", tech.description));

        if !tech.files.is_empty() {
            output.push_str("**Related files:**\n");
            for file in tech.files.iter().take(max_files) {
                output.push_str(&format!("- {}\n", file));
            }
            if tech.files.len() > max_files {
                output.push_str(&format!(
                    "- ... and {} more files\n",
                    tech.files.len() - max_files
                ));
            }
            output.push('\n');
        }
    }
}

fn format_file(output: &mut String, file: &FileRecord) {
    output.push_str(&format!("#### {}\n", file.path));
    output.push_str(&format!(
        "*Language: {} | Size: {} bytes | Lines: {}*\n\n",
        file.language,
        file.size,
        file.line_count()
    ));
    output.push_str(&format!("```{}\n", syntax_tag(file.language)));
    output.push_str(&file.content);
    if !file.content.ends_with('\n') {
        output.push('\n');
    }
    output.push_str("```\n\n");
}

/// Group files by parent directory; files within a directory are sorted by
/// path.
///
/// Root-level files use the empty key, so they always come first rather than
/// being sorted among the directories under a `root` heading.
fn group_by_directory(files: &[FileRecord]) -> BTreeMap<&str, Vec<&FileRecord>> {
    let mut groups: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
    for file in files {
        let dir = file.path.rsplit_once('/').map_or("", |(dir, _)| dir);
        groups.entry(dir).or_default().push(file);
    }
    for files in groups.values_mut() {
        files.sort_by(|a, b| a.path.cmp(&b.path));
    }
    groups
}

fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

// ============================================================================
// JSON Formatting
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a str,
    projects: Vec<JsonProject<'a>>,
}

#[derive(Serialize)]
struct JsonProject<'a> {
    #[serde(flatten)]
    summary: &'a ProjectSummary,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    size: u64,
    language: &'a str,
    lines: usize,
    content: &'a str,
}

fn format_json(scans: &[ProjectScan], generated_at: &str) -> Result<String, OutputError> {
    let projects = scans
        .iter()
        .map(|scan| JsonProject {
            summary: &scan.summary,
            files: scan
                .files
                .iter()
                .map(|f| JsonFile {
                    path: &f.path,
                    size: f.size,
                    language: f.language,
                    lines: f.line_count(),
                    content: &f.content,
                })
                .collect(),
        })
        .collect();

    let report = JsonReport {
        generated_at,
        projects,
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{PatternSet, TechnologyDetector};
    use crate::tree::build_tree;
    use std::path::PathBuf;

    fn scan_of(files: Vec<FileRecord>, total_files: usize) -> ProjectScan {
        let patterns = PatternSet::builtin();
        let technologies = TechnologyDetector::new(&patterns).detect(&files);
        let summary = ProjectSummary {
            root: PathBuf::from("/work/demo"),
            total_files,
            processed_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            primary_language: crate::detect::primary_language(&technologies),
            technologies,
        };
        ProjectScan {
            tree: build_tree(&files),
            summary,
            files,
        }
    }

    fn go_scan() -> ProjectScan {
        scan_of(
            vec![
                FileRecord::new("go.mod", "module x".into()),
                FileRecord::new("main.go", "package main\nfunc main(){}".into()),
                FileRecord::new("cmd/tool/run.go", "package tool\n".into()),
            ],
            4,
        )
    }

    #[test]
    fn test_markdown_sections() {
        let report = format_report(&[go_scan()], &ReportOptions::default(), "2024-01-01 00:00:00")
            .unwrap();

        assert!(report.starts_with("# ProjectDump Analysis\n\n"));
        assert!(report.contains("**Generated on:** 2024-01-01 00:00:00\n"));
        assert!(report.contains("**Project Path:** /work/demo\n"));
        assert!(report.contains("- **Primary Language:** Go\n"));
        assert!(report.contains("- **Total Files:** 4\n"));
        assert!(report.contains("- **Processed Files:** 3\n"));
        assert!(report.contains("### Go ("));
        assert!(report.contains("*Go programming language*"));
        assert!(report.contains("## Directory Structure\n\n```\n├── cmd/\n"));
        assert!(report.contains("### cmd/tool/\n\n#### cmd/tool/run.go\n"));
        assert!(report.contains("```go\npackage main\nfunc main(){}\n```\n"));
        assert!(report.contains("*Language: Go | Size: 13 bytes | Lines: 1*"));
    }

    #[test]
    fn test_root_files_listed_before_directories() {
        let report = format_report(&[go_scan()], &ReportOptions::default(), "t").unwrap();
        let root_file = report.find("#### go.mod").unwrap();
        let nested = report.find("#### cmd/tool/run.go").unwrap();
        assert!(root_file < nested);
    }

    #[test]
    fn test_related_files_truncated() {
        let files: Vec<FileRecord> = (0..7)
            .map(|i| FileRecord::new(format!("f{i}.rb"), String::new()))
            .collect();
        let report = format_report(&[scan_of(files, 7)], &ReportOptions::default(), "t").unwrap();

        assert!(report.contains("- f4.rb\n- ... and 2 more files\n"));
        assert!(!report.contains("- f5.rb\n"));
    }

    #[test]
    fn test_no_technologies_section_when_empty() {
        let report = format_report(&[scan_of(Vec::new(), 0)], &ReportOptions::default(), "t")
            .unwrap();
        assert!(!report.contains("## Detected Technologies"));
        assert!(report.contains("- **Primary Language:** Unknown\n"));
        assert!(report.contains("- **Project Size:** 0.00 KB\n"));
    }

    #[test]
    fn test_multiple_projects_separated() {
        let report = format_report(&[go_scan(), go_scan()], &ReportOptions::default(), "t")
            .unwrap();
        assert_eq!(report.matches("## Project Summary").count(), 2);
        assert_eq!(report.matches("# ProjectDump Analysis").count(), 1);
        assert!(report.contains("---\n\n**Project Path:**"));
    }

    #[test]
    fn test_json_output() {
        let options = ReportOptions {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let report = format_report(&[go_scan()], &options, "t").unwrap();
        let v: serde_json::Value = serde_json::from_str(&report).unwrap();

        let project = &v["projects"][0];
        assert_eq!(project["primary_language"], "Go");
        assert_eq!(project["total_files"], 4);
        assert_eq!(project["technologies"][0]["name"], "Go");
        assert_eq!(project["files"][0]["path"], "go.mod");
        assert_eq!(project["files"][1]["lines"], 2);
        assert_eq!(v["generated_at"], "t");
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0.00 KB");
        assert_eq!(format_kb(1536), "1.50 KB");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.md");
        write_report("# hi\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
