//! Common items useful for working with IEC 61131-3 standard library
//! elements but not part of the standard.
use core::fmt;
use std::sync::Arc;
use std::{hash::Hash, hash::Hasher};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};

/// FileId identifies the origin of a declaration table.
///
/// Most elements come from the tables built into the compiler, but a
/// table can also be supplied from a file, in which case diagnostics
/// should name that file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FileId {
    /// A declaration table loaded from a file. The string is the file path.
    File(Arc<str>),
    /// Built-in to the compiler (the embedded standard tables).
    BuiltIn,
}

impl FileId {
    /// Creates a file identifier from the slice. The slice is normally
    /// the file path.
    pub fn from_string(path: &str) -> Self {
        FileId::File(Arc::from(path))
    }

    /// Creates a file identifier for the embedded standard tables.
    pub fn builtin() -> Self {
        FileId::BuiltIn
    }

    /// Returns true if this identifies an embedded table.
    pub fn is_builtin(&self) -> bool {
        matches!(self, FileId::BuiltIn)
    }
}

impl Default for FileId {
    fn default() -> Self {
        FileId::BuiltIn
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileId::File(path) => write!(f, "{}", path),
            FileId::BuiltIn => write!(f, "<builtin>"),
        }
    }
}

/// Location in a declaration table of a language element instance.
#[derive(Clone, Debug)]
pub struct TableSpan {
    /// The 1-indexed row in the source table. Row 0 refers to the table
    /// as a whole.
    pub row: usize,
    pub file_id: FileId,
}

impl TableSpan {
    /// Creates a span for a particular table row.
    pub fn row(file_id: FileId, row: usize) -> Self {
        Self { row, file_id }
    }

    /// A "position" that refers to a table in its entirety rather than
    /// a particular row.
    pub fn file(file_id: FileId) -> Self {
        Self { row: 0, file_id }
    }

    /// Creates a span for elements built into the compiler. These have
    /// no meaningful table position.
    pub fn builtin() -> Self {
        Self {
            row: 0,
            file_id: FileId::BuiltIn,
        }
    }

    /// Returns true if this span refers to a built-in element.
    pub fn is_builtin(&self) -> bool {
        self.file_id.is_builtin()
    }
}

impl Default for TableSpan {
    fn default() -> Self {
        TableSpan::builtin()
    }
}

impl PartialEq for TableSpan {
    fn eq(&self, _other: &Self) -> bool {
        // Two spans are equal by default. When comparing elements we
        // rarely want to know that they came from the same row, and
        // with this, rebuilt catalogs compare equal element for element.
        true
    }
}
impl Eq for TableSpan {}

lazy_static! {
    // Identifier rule from the standard: a letter or an underscore
    // followed by a letter or digit, then letters and digits with no
    // doubled and no trailing underscore. See section 2.1.2.
    static ref IDENTIFIER: Regex =
        Regex::new(r"^(?:[A-Za-z]|_[A-Za-z0-9])(?:_?[A-Za-z0-9])*$").unwrap();
}

/// Returns true if the candidate is a valid IEC 61131-3 identifier.
pub fn is_valid_identifier(candidate: &str) -> bool {
    IDENTIFIER.is_match(candidate)
}

/// Implements Identifier.
///
/// 61131-3 declares that identifiers are case insensitive. This class
/// ensures that we do case insensitive comparisons and can use
/// containers as appropriate.
///
/// See section 2.1.2.
pub struct Id {
    pub original: String,
    pub lower_case: String,
}

impl Id {
    /// Converts a `&str` into an `Identifier`.
    pub fn from(str: &str) -> Self {
        Id {
            original: String::from(str),
            lower_case: String::from(str).to_lowercase(),
        }
    }

    /// Converts an `Identifier` into a lower case `String`.
    pub fn lower_case(&self) -> &String {
        &self.lower_case
    }

    pub fn original(&self) -> &String {
        &self.original
    }
}

impl Clone for Id {
    fn clone(&self) -> Self {
        Id::from(self.original.as_str())
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.lower_case == other.lower_case
    }
}
impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower_case.hash(state);
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.original)
    }
}
