//! Extension-based language labels for per-file display.
//!
//! This is a static 1:1 table, independent of technology detection.

/// Label used for any extension not in the table.
pub const DEFAULT_LANGUAGE: &str = "Text";

/// Map a lowercase extension (with leading dot) to a language label.
///
/// # Examples
///
/// ```
/// use projectdump::language::language_for_extension;
///
/// assert_eq!(language_for_extension(".rs"), "Rust");
/// assert_eq!(language_for_extension(".h"), "C/C++");
/// assert_eq!(language_for_extension(".unknown"), "Text");
/// ```
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        ".js" | ".jsx" => "JavaScript",
        ".ts" | ".tsx" => "TypeScript",
        ".py" => "Python",
        ".go" => "Go",
        ".java" => "Java",
        ".cpp" | ".cc" | ".cxx" | ".hpp" => "C++",
        ".c" => "C",
        ".h" => "C/C++",
        ".rs" => "Rust",
        ".php" => "PHP",
        ".rb" => "Ruby",
        ".css" => "CSS",
        ".scss" => "SCSS",
        ".sass" => "Sass",
        ".less" => "Less",
        ".html" | ".htm" => "HTML",
        ".xml" => "XML",
        ".json" => "JSON",
        ".yaml" | ".yml" => "YAML",
        ".md" => "Markdown",
        ".sh" => "Shell",
        ".bash" => "Bash",
        ".ps1" => "PowerShell",
        ".sql" => "SQL",
        _ => DEFAULT_LANGUAGE,
    }
}

/// Code-fence tag for a language label.
pub fn syntax_tag(language: &str) -> &'static str {
    match language {
        "JavaScript" => "javascript",
        "TypeScript" => "typescript",
        "Python" => "python",
        "Go" => "go",
        "Java" => "java",
        "C++" | "C/C++" => "cpp",
        "C" => "c",
        "Rust" => "rust",
        "PHP" => "php",
        "Ruby" => "ruby",
        "CSS" => "css",
        "SCSS" => "scss",
        "Sass" => "sass",
        "Less" => "less",
        "HTML" => "html",
        "XML" => "xml",
        "JSON" => "json",
        "YAML" => "yaml",
        "Markdown" => "markdown",
        "Shell" | "Bash" => "bash",
        "PowerShell" => "powershell",
        "SQL" => "sql",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(language_for_extension(".go"), "Go");
        assert_eq!(language_for_extension(".tsx"), "TypeScript");
        assert_eq!(language_for_extension(".yml"), "YAML");
        assert_eq!(language_for_extension(".hpp"), "C++");
    }

    #[test]
    fn test_unknown_extension_is_text() {
        assert_eq!(language_for_extension(""), DEFAULT_LANGUAGE);
        assert_eq!(language_for_extension(".toml"), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_syntax_tags() {
        assert_eq!(syntax_tag("C/C++"), "cpp");
        assert_eq!(syntax_tag("Shell"), "bash");
        assert_eq!(syntax_tag(DEFAULT_LANGUAGE), "text");
        assert_eq!(syntax_tag(language_for_extension(".rs")), "rust");
    }
}
