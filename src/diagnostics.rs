// Core module for recording compiler errors raised during lowering.
// Diagnostics are accumulated in a shared sink rather than thrown: a failed
// construct lowers to an empty operation sequence and its siblings continue,
// so one pass surfaces as many independent errors as possible.

use console::Style;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::location::{Location, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Error taxonomy for scope-violation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A name collision within the relevant namespace (one scope for stack
    /// entries, the whole program for global lists).
    DuplicateDeclaration,
    /// A reference to a name that resolves to nothing usable.
    NotDefined,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::DuplicateDeclaration => write!(f, "DuplicateDeclaration"),
            ErrorKind::NotDefined => write!(f, "NotDefined"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub level: Level,
    pub message: String,
    /// Dotted path of the component that raised the diagnostic.
    pub issuer: String,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn with(
        kind: ErrorKind,
        level: Level,
        message: String,
        issuer: String,
        location: Option<Location>,
        span: Option<Span>,
    ) -> Self {
        Diagnostic {
            kind,
            level,
            message,
            issuer,
            location,
            span,
        }
    }

    pub fn duplicate_declaration(
        message: String,
        issuer: &str,
        location: Option<Location>,
        span: Option<Span>,
    ) -> Self {
        Diagnostic::with(
            ErrorKind::DuplicateDeclaration,
            Level::Error,
            message,
            issuer.to_string(),
            location,
            span,
        )
    }

    pub fn not_defined(
        message: String,
        issuer: &str,
        location: Option<Location>,
        span: Option<Span>,
    ) -> Self {
        Diagnostic::with(
            ErrorKind::NotDefined,
            Level::Error,
            message,
            issuer.to_string(),
            location,
            span,
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, Level::Error | Level::Critical)
    }

    /// Pretty-print with a source snippet and caret under the location.
    /// `source` should be the contents of the file the location refers to.
    pub fn pretty_with_source(&self, source: &str) {
        let header = Style::new().bold().red();
        let sev = match self.level {
            Level::Critical => Style::new().on_red().white().bold(),
            Level::Error => Style::new().red().bold(),
            Level::Warning => Style::new().yellow().bold(),
            Level::Info => Style::new().blue().bold(),
        };

        println!(
            "{} {}",
            sev.apply_to(format!("[{}]", self.level)),
            header.apply_to(&self.message)
        );

        if let Some(loc) = &self.location {
            println!(" --> {}", loc);
            if let Some(line_str) = source.lines().nth(loc.line.saturating_sub(1)) {
                println!(" {:4} | {}", loc.line, line_str);
                let col = loc.column.saturating_sub(1);
                let caret_len = self
                    .span
                    .as_ref()
                    .map(|s| s.end.column.saturating_sub(s.start.column))
                    .unwrap_or(0)
                    .max(1);
                let mut caret_line = String::new();
                caret_line.push_str("      | ");
                caret_line.push_str(&" ".repeat(col));
                caret_line.push_str(&"^".repeat(caret_len));
                println!("{}", Style::new().green().apply_to(caret_line));
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match &self.location {
            Some(loc) => loc.to_string(),
            None => "unknown location".to_string(),
        };
        write!(
            f,
            "BRICKWORK | {} | {} | {} | {} | {}",
            self.level, self.kind, loc_str, self.issuer, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Append-only collector shared by reference across every nested lowering
/// context of one compilation. A non-empty sink after a full pass denotes a
/// failed build; the caller gates output emission on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, others: impl IntoIterator<Item = Diagnostic>) {
        for d in others {
            self.push(d);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Exit code for CLI front-ends: 0 = clean, 1 = warnings only,
    /// 2 = errors present.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            2
        } else if self
            .diagnostics
            .iter()
            .any(|d| d.level == Level::Warning)
        {
            1
        } else {
            0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.diagnostics)
    }

    pub fn print_all_pretty(&self, source_map: &impl Fn(&str) -> Option<&str>) {
        for d in &self.diagnostics {
            if let Some(loc) = &d.location {
                let source = source_map(&loc.file).unwrap_or("");
                d.pretty_with_source(source);
            } else {
                println!("{}", d);
            }
        }
    }
}
