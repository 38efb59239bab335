//! Provides definition for diagnostics, which are normally errors and
//! warnings associated with catalog construction.
//!
//! Every fatal condition surfaces during the one-time build of the
//! catalog, so diagnostics point at rows in the static declaration
//! tables rather than positions in program text.

use plcstd_problems::Problem;

use crate::core::{FileId, TableSpan};

/// A label that refers to a table row and is associated with a message
/// related to that row.
///
/// Normally this indicates the location of an error along with a text
/// message describing that position.
#[derive(Debug)]
pub struct Label {
    /// The position of the label.
    pub span: TableSpan,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn span(span: TableSpan, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// A label for a particular row of a table.
    pub fn row(file_id: FileId, row: usize, message: impl Into<String>) -> Self {
        Self {
            span: TableSpan::row(file_id, row),
            message: message.into(),
        }
    }

    /// A "position" that refers to a table in its entirety rather than
    /// a particular row.
    pub fn file(file_id: FileId, message: impl Into<String>) -> Self {
        Self {
            span: TableSpan::file(file_id),
            message: message.into(),
        }
    }

    /// A label for elements built into the compiler, which have no
    /// table position.
    pub fn builtin(message: impl Into<String>) -> Self {
        Self {
            span: TableSpan::builtin(),
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the
/// category, a primary location and a possibly non-zero set of
/// secondary locations.
#[derive(Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The primary or first label.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the
    /// specified label.
    ///
    /// The label associates the problem to a particular position in a
    /// declaration table.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            primary,
            described: vec![],
            secondary: vec![],
        }
    }

    /// Adds to the problem description (primary text) additional
    /// context about the problem.
    ///
    /// This forms part of the main description and does not need to be
    /// related to a position in a table.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    /// Returns the description for the diagnostic. This may add in
    /// other data that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }
}
