//! Line-oriented manifest parsing.
//!
//! A manifest is plain text: each logical line is blank, a comment, or a
//! dependency declaration with an optional trailing comment. A trailing
//! backslash continues the logical line. Comments and blank lines survive
//! parsing so edits can write the file back without destroying them.

use crate::ManifestResult;
use camino::Utf8Path;
use reqcheck_core::error::ReqError;
use reqcheck_core::types::constraint::ConstraintError;
use reqcheck_core::types::{Constraint, Declaration};
use std::fmt;
use tracing::debug;

/// Parsed manifest, preserving line structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub lines: Vec<ManifestLine>,
}

/// One logical line of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    /// Empty or whitespace-only line
    Blank,
    /// Full-line comment, stored verbatim
    Comment(String),
    /// Dependency declaration with optional trailing comment text
    Declaration {
        declaration: Declaration,
        comment: Option<String>,
    },
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Parse manifest text
    pub fn parse(content: &str) -> ManifestResult<Self> {
        parse_manifest(content)
    }

    /// Iterate over the declarations in file order
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.lines.iter().filter_map(|line| match line {
            ManifestLine::Declaration { declaration, .. } => Some(declaration),
            _ => None,
        })
    }

    /// Number of declarations in the manifest
    pub fn len(&self) -> usize {
        self.declarations().count()
    }

    /// Check if the manifest declares nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse manifest text into a Manifest
pub fn parse_manifest(content: &str) -> ManifestResult<Manifest> {
    let mut lines = Vec::new();
    let mut pending: Option<(String, usize)> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;

        // Backslash continuation joins physical lines before any other
        // interpretation
        let (joined, start_line) = match pending.take() {
            Some((mut buffer, start)) => {
                buffer.push(' ');
                buffer.push_str(raw.trim());
                (buffer, start)
            },
            None => (raw.to_string(), line_number),
        };

        if let Some(stripped) = joined.trim_end().strip_suffix('\\') {
            pending = Some((stripped.trim_end().to_string(), start_line));
            continue;
        }

        lines.push(parse_line(&joined, start_line)?);
    }

    // A dangling continuation still counts as a logical line
    if let Some((buffer, start_line)) = pending {
        lines.push(parse_line(&buffer, start_line)?);
    }

    let manifest = Manifest { lines };
    debug!(
        declarations = manifest.len(),
        lines = manifest.lines.len(),
        "parsed manifest"
    );

    Ok(manifest)
}

/// Parse one logical line
fn parse_line(raw: &str, line_number: usize) -> ManifestResult<ManifestLine> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(ManifestLine::Blank);
    }

    if trimmed.starts_with('#') {
        // Comments are kept verbatim, indentation included, so rendering
        // the manifest never rewrites them
        return Ok(ManifestLine::Comment(raw.to_string()));
    }

    // A trailing comment starts at a '#' preceded by whitespace
    let (body, comment) = match split_trailing_comment(trimmed) {
        Some((body, comment)) => (body.trim(), Some(comment.to_string())),
        None => (trimmed, None),
    };

    let declaration = parse_declaration(body, line_number)?;

    Ok(ManifestLine::Declaration {
        declaration,
        comment,
    })
}

/// Split off a trailing comment, if any
fn split_trailing_comment(line: &str) -> Option<(&str, &str)> {
    for (pos, c) in line.char_indices() {
        if c == '#' {
            let before = &line[..pos];
            if before
                .chars()
                .next_back()
                .is_some_and(|prev| prev.is_whitespace())
            {
                return Some((before, &line[pos..]));
            }
        }
    }
    None
}

/// Parse a declaration body: `name` or `name<op><version>`
pub fn parse_declaration(body: &str, line_number: usize) -> ManifestResult<Declaration> {
    // Syntax this tool deliberately does not model gets a distinct error
    if body.contains("://") {
        return Err(ReqError::UnsupportedSyntax {
            found: "URL requirement".to_string(),
            line: line_number,
        });
    }
    if let Some(pos) = body.find('[') {
        return Err(ReqError::UnsupportedSyntax {
            found: format!("extras '{}'", &body[pos..]),
            line: line_number,
        });
    }
    if body.contains(';') {
        return Err(ReqError::UnsupportedSyntax {
            found: "environment marker ';'".to_string(),
            line: line_number,
        });
    }

    let (name, rest) = match body.find(['=', '!', '<', '>', '~']) {
        Some(pos) => (body[..pos].trim_end(), Some(body[pos..].trim_start())),
        None => (body, None),
    };

    if !Declaration::is_valid_name(name) {
        return Err(ReqError::InvalidName {
            name: name.to_string(),
            line: line_number,
        });
    }

    let constraint = match rest {
        Some(rest) => {
            // One constraint per declaration; ranges are not part of the format
            if rest.contains(',') {
                return Err(ReqError::MultipleConstraints {
                    name: name.to_string(),
                    line: line_number,
                });
            }
            Some(parse_constraint(rest, line_number)?)
        },
        None => None,
    };

    Ok(Declaration::new(name.to_string(), constraint).at_line(line_number))
}

/// Parse a constraint, attaching the line number to any failure
fn parse_constraint(input: &str, line_number: usize) -> ManifestResult<Constraint> {
    input.parse().map_err(|e| match e {
        ConstraintError::UnknownOperator { input } => ReqError::UnknownOperator {
            op: input.chars().take(2).collect(),
            line: line_number,
        },
        ConstraintError::MissingVersion { op } => ReqError::InvalidVersion {
            version: String::new(),
            line: line_number,
            reason: format!("operator '{}' is missing a version", op),
        },
        ConstraintError::CompatibleTooShort { version } => ReqError::InvalidVersion {
            version,
            line: line_number,
            reason: "compatible-release needs at least two release segments".to_string(),
        },
        ConstraintError::Version(e) => ReqError::InvalidVersion {
            version: input
                .trim_start_matches(['=', '!', '<', '>', '~'])
                .trim()
                .to_string(),
            line: line_number,
            reason: e.to_string(),
        },
    })
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestLine::Blank => Ok(()),
            ManifestLine::Comment(text) => write!(f, "{}", text),
            ManifestLine::Declaration {
                declaration,
                comment,
            } => {
                write!(f, "{}", declaration)?;
                if let Some(comment) = comment {
                    write!(f, "  {}", comment)?;
                }
                Ok(())
            },
        }
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Load and parse a manifest from a file path
pub async fn load_from_file(path: &Utf8Path) -> ManifestResult<Manifest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ReqError::io(format!("Failed to read {}", path), e))?;

    parse_manifest(&content)
}

/// Write a manifest back to a file in canonical form
pub async fn save_to_file(path: &Utf8Path, manifest: &Manifest) -> ManifestResult<()> {
    tokio::fs::write(path, manifest.to_string())
        .await
        .map_err(|e| ReqError::io(format!("Failed to write {}", path), e))
}
