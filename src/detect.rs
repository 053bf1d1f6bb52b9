//! Heuristic technology detection.
//!
//! Every accepted file is scored against every [`TechPattern`]: an exact
//! filename match is a strong signal, an extension match a weaker one, and
//! each keyword found in the content adds a little more. Scores are summed
//! per technology and normalized into a saturating confidence.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::filter::dotted_extension;
use crate::walker::FileRecord;

/// Score for an exact filename match.
pub const FILENAME_WEIGHT: f64 = 3.0;
/// Score for an extension match.
pub const EXTENSION_WEIGHT: f64 = 2.0;
/// Score for each distinct keyword found in the content.
pub const KEYWORD_WEIGHT: f64 = 0.5;
/// A technology is reported only when its total score exceeds this.
pub const DETECTION_THRESHOLD: f64 = 0.5;
/// Total score that maps to full confidence.
pub const CONFIDENCE_SCALE: f64 = 10.0;

/// Errors building a pattern set.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("duplicate technology pattern: {0}")]
    DuplicateName(String),
}

/// Detection rule for one technology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechPattern {
    pub name: String,
    pub description: String,
    /// Exact base names, compared case-sensitively.
    pub filenames: Vec<String>,
    /// Lowercase extensions including the leading dot.
    pub extensions: Vec<String>,
    /// Lowercase, distinct content substrings.
    pub keywords: Vec<String>,
}

impl TechPattern {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            filenames: Vec::new(),
            extensions: Vec::new(),
            keywords: Vec::new(),
        }
    }

    pub fn filenames(mut self, names: &[&str]) -> Self {
        self.filenames = names.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn extensions(mut self, exts: &[&str]) -> Self {
        self.extensions = exts.iter().map(|s| s.to_lowercase()).collect();
        self
    }

    /// Keywords are lowercased and de-duplicated, keeping first occurrence.
    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        let mut seen = HashSet::new();
        self.keywords = keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| seen.insert(k.clone()))
            .collect();
        self
    }

    /// Score one file. `content` must already be lowercased.
    fn score(&self, file_name: &str, ext: &str, content: &str) -> f64 {
        let mut score = 0.0;

        if self.filenames.iter().any(|f| f == file_name) {
            score += FILENAME_WEIGHT;
        }

        if self.extensions.iter().any(|e| e == ext) {
            score += EXTENSION_WEIGHT;
        }

        let matches = self
            .keywords
            .iter()
            .filter(|k| content.contains(k.as_str()))
            .count();
        score += matches as f64 * KEYWORD_WEIGHT;

        score
    }
}

/// An ordered set of patterns with unique names.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<TechPattern>,
}

impl PatternSet {
    /// Build a set, rejecting duplicate names.
    pub fn new(patterns: Vec<TechPattern>) -> Result<Self, PatternError> {
        let mut names = HashSet::new();
        for pattern in &patterns {
            if !names.insert(pattern.name.as_str()) {
                return Err(PatternError::DuplicateName(pattern.name.clone()));
            }
        }
        Ok(Self { patterns })
    }

    /// Built-in patterns.
    pub fn builtin() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }

    pub fn patterns(&self) -> &[TechPattern] {
        &self.patterns
    }

    pub fn get(&self, name: &str) -> Option<&TechPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_patterns() -> Vec<TechPattern> {
    vec![
        TechPattern::new("JavaScript", "JavaScript runtime and ecosystem")
            .filenames(&["package.json", "package-lock.json", "yarn.lock"])
            .extensions(&[".js", ".mjs", ".jsx"])
            .keywords(&["require(", "import ", "export ", "module.exports"]),
        TechPattern::new("TypeScript", "TypeScript - JavaScript with static typing")
            .filenames(&["tsconfig.json", "tslint.json"])
            .extensions(&[".ts", ".tsx"])
            .keywords(&["interface ", "type ", ": string", ": number"]),
        TechPattern::new("React", "React JavaScript library for building user interfaces")
            .extensions(&[".jsx", ".tsx"])
            .keywords(&["React.", "useState", "useEffect", "jsx"]),
        TechPattern::new("Node.js", "Node.js JavaScript runtime")
            .filenames(&["package.json"])
            .extensions(&[".js"])
            .keywords(&["require('", "module.exports", "process.env"]),
        TechPattern::new("Python", "Python programming language")
            .filenames(&["requirements.txt", "setup.py", "pyproject.toml", "Pipfile"])
            .extensions(&[".py", ".pyw"])
            .keywords(&["def ", "import ", "from ", "__init__"]),
        TechPattern::new("Go", "Go programming language")
            .filenames(&["go.mod", "go.sum"])
            .extensions(&[".go"])
            .keywords(&["package ", "func ", "import ", "type "]),
        TechPattern::new("Java", "Java programming language")
            .filenames(&["pom.xml", "build.gradle", "gradle.properties"])
            .extensions(&[".java"])
            .keywords(&["public class", "import java", "package "]),
        TechPattern::new("C++", "C++ programming language")
            .filenames(&["CMakeLists.txt", "Makefile"])
            .extensions(&[".cpp", ".cc", ".cxx", ".h", ".hpp"])
            .keywords(&["#include", "using namespace", "std::"]),
        TechPattern::new("C", "C programming language")
            .filenames(&["Makefile"])
            .extensions(&[".c", ".h"])
            .keywords(&["#include", "int main", "printf"]),
        TechPattern::new("Rust", "Rust systems programming language")
            .filenames(&["Cargo.toml", "Cargo.lock"])
            .extensions(&[".rs"])
            .keywords(&["fn ", "use ", "mod ", "pub "]),
        TechPattern::new("PHP", "PHP server-side scripting language")
            .filenames(&["composer.json", "composer.lock"])
            .extensions(&[".php"])
            .keywords(&["<?php", "function ", "$_GET", "$_POST"]),
        TechPattern::new("Ruby", "Ruby programming language")
            .filenames(&["Gemfile", "Gemfile.lock"])
            .extensions(&[".rb"])
            .keywords(&["def ", "class ", "require ", "end"]),
        TechPattern::new("CSS", "Cascading Style Sheets")
            .extensions(&[".css", ".scss", ".sass", ".less"])
            .keywords(&["{", "}", ":", ";", "@media"]),
        TechPattern::new("HTML", "HyperText Markup Language")
            .extensions(&[".html", ".htm"])
            .keywords(&["<html", "<body", "<div", "<!DOCTYPE"]),
        TechPattern::new("Docker", "Docker containerization platform")
            .filenames(&[
                "Dockerfile",
                "docker-compose.yml",
                "docker-compose.yaml",
                ".dockerignore",
            ])
            .keywords(&["FROM ", "RUN ", "COPY ", "CMD "]),
        TechPattern::new("Kubernetes", "Kubernetes container orchestration")
            .extensions(&[".yaml", ".yml"])
            .keywords(&["apiVersion:", "kind:", "metadata:", "spec:"]),
    ]
}

/// A technology found in a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedTechnology {
    pub name: String,
    /// Saturating score in `[0, 1]`.
    pub confidence: f64,
    pub description: String,
    /// Files that contributed, in discovery order.
    pub files: Vec<String>,
}

/// Scores files against a [`PatternSet`].
#[derive(Debug, Clone, Copy)]
pub struct TechnologyDetector<'a> {
    patterns: &'a PatternSet,
}

impl<'a> TechnologyDetector<'a> {
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self { patterns }
    }

    /// Detect technologies, ordered by descending confidence then name.
    ///
    /// # Examples
    ///
    /// ```
    /// use projectdump::detect::{PatternSet, TechnologyDetector};
    /// use projectdump::walker::FileRecord;
    ///
    /// let patterns = PatternSet::builtin();
    /// let files = vec![FileRecord::new("go.mod", "module x".into())];
    /// let techs = TechnologyDetector::new(&patterns).detect(&files);
    /// assert_eq!(techs[0].name, "Go");
    /// ```
    pub fn detect(&self, files: &[FileRecord]) -> Vec<DetectedTechnology> {
        let patterns = self.patterns.patterns();
        let mut scores = vec![0.0_f64; patterns.len()];
        let mut contributors: Vec<Vec<String>> = vec![Vec::new(); patterns.len()];

        for file in files {
            let file_name = file.file_name();
            let ext = dotted_extension(file_name).to_lowercase();
            let content = file.content.to_lowercase();

            for (idx, pattern) in patterns.iter().enumerate() {
                let score = pattern.score(file_name, &ext, &content);
                if score > 0.0 {
                    scores[idx] += score;
                    contributors[idx].push(file.path.clone());
                }
            }
        }

        let mut detected: Vec<DetectedTechnology> = patterns
            .iter()
            .zip(scores)
            .zip(contributors)
            .filter(|((_, score), _)| *score > DETECTION_THRESHOLD)
            .map(|((pattern, score), files)| DetectedTechnology {
                name: pattern.name.clone(),
                confidence: (score / CONFIDENCE_SCALE).min(1.0),
                description: pattern.description.clone(),
                files,
            })
            .collect();

        detected.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.name.cmp(&b.name))
        });

        detected
    }
}

/// Name of the highest-confidence technology, or `"Unknown"`.
pub fn primary_language(technologies: &[DetectedTechnology]) -> String {
    technologies
        .first()
        .map_or_else(|| "Unknown".to_string(), |t| t.name.clone())
}
