//! Diagnostics and error reporting for the generator
//!
//! Nothing in a run aborts the batch: classification misses, per-entity emission failures and manifest
//! problems are recorded here and reported once the run has done all the work it can.

use std::fmt;

/// A diagnostic scoped to an entity or field.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Entity (`org.example.Customer`) or field (`org.example.Customer.contacts`) the message is about
    pub subject: Option<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            subject: None,
            hints: Vec::new(),
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Note, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, message)
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind)?;
        if let Some(subject) = &self.subject {
            write!(f, "[{}] ", subject)?;
        }
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticKind {
    Note,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Note => write!(f, "note"),
            DiagnosticKind::Warning => write!(f, "warning"),
            DiagnosticKind::Error => write!(f, "error"),
        }
    }
}

/// Ordered collection of the diagnostics raised during one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.push(Diagnostic::note(message));
    }

    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(message).with_subject(subject));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.kind == DiagnosticKind::Error)
    }

    /// Diagnostics about one subject (exact match).
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.items.iter().filter(move |d| d.subject.as_deref() == Some(subject))
    }
}

/// Print a diagnostic to stderr with a colored kind label
pub fn print_diagnostic(diagnostic: &Diagnostic) {
    let red = "\x1b[31m";
    let cyan = "\x1b[36m";
    let yellow = "\x1b[33m";
    let bold = "\x1b[1m";
    let reset = "\x1b[0m";

    let kind_color = match diagnostic.kind {
        DiagnosticKind::Error => red,
        DiagnosticKind::Warning => yellow,
        DiagnosticKind::Note => cyan,
    };

    eprintln!(
        "{bold}{kind_color}{kind}{reset}{bold}: {message}{reset}",
        kind = diagnostic.kind,
        message = diagnostic.message,
    );
    if let Some(subject) = &diagnostic.subject {
        eprintln!("  {cyan}-->{reset} {subject}");
    }
    for hint in &diagnostic.hints {
        eprintln!("  {cyan}= hint:{reset} {}", hint);
    }
}
