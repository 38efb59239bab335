//! Elements of the standard library block model.
//!
//! A block descriptor records everything the code generator and the
//! block picker need to know about one function, function block, or
//! program: its parameters, its documentation, and the generation
//! format selected for it.
use core::fmt;
use std::{hash::Hash, hash::Hasher};

use serde::Serialize;

use crate::core::{Id, TableSpan};

/// Implements a type identifier.
///
/// Types are all identifiers but we use a separate structure because it
/// is convenient to treat types and other identifiers separately.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeName {
    pub name: Id,
}

impl TypeName {
    /// Converts a `&str` into a `TypeName`.
    pub fn from(str: &str) -> Self {
        Self {
            name: Id::from(str),
        }
    }

    pub fn from_id(name: &Id) -> Self {
        Self { name: name.clone() }
    }
}

impl Eq for TypeName {}

impl Hash for TypeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}", &self.name))
    }
}

/// Edge modifier on an input parameter.
///
/// See section 2.5.2.2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeModifier {
    #[default]
    None,
    Negated,
    Rising,
    Falling,
}

impl EdgeModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeModifier::None => "none",
            EdgeModifier::Negated => "negated",
            EdgeModifier::Rising => "rising",
            EdgeModifier::Falling => "falling",
        }
    }
}

impl TryFrom<&str> for EdgeModifier {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "none" => Ok(EdgeModifier::None),
            "negated" => Ok(EdgeModifier::Negated),
            "rising" => Ok(EdgeModifier::Rising),
            "falling" => Ok(EdgeModifier::Falling),
            _ => Err("Value not convertible to an edge modifier"),
        }
    }
}

impl fmt::Display for EdgeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input or output parameter of a block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: Id,
    /// Declared type. This can be a concrete elementary type or an
    /// ANY* meta type for descriptors that keep a generic parameter.
    pub param_type: TypeName,
    pub modifier: EdgeModifier,
}

impl ParamSpec {
    pub fn new(name: &str, param_type: &str, modifier: EdgeModifier) -> Self {
        Self {
            name: Id::from(name),
            param_type: TypeName::from(param_type),
            modifier,
        }
    }
}

/// The kind of program organization unit a descriptor declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Function,
    FunctionBlock,
    Program,
}

/// The slot of the generated call that a conversion format targets.
///
/// The standard conversion tables only ever target the return slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatSlot {
    ReturnType,
}

/// The generation format selected for a descriptor: which slot receives
/// the value, the native routine implementing the conversion (`None`
/// for a plain cast), and the intermediate cast type when one is
/// required.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CodeFormat {
    pub slot: FormatSlot,
    pub routine: Option<String>,
    pub cast: Option<TypeName>,
}

/// Describes one block of the standard library.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockDescriptor {
    pub name: Id,
    pub kind: BlockKind,
    /// True when the block accepts a variable number of inputs.
    pub extensible: bool,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
    /// Comment shown in the block popup. Assembly reduces this to the
    /// first quoted segment of the raw table field.
    pub comment: String,
    /// Display signature, derived during assembly.
    pub usage: String,
    /// Generation format for conversion-style functions.
    pub generate: Option<CodeFormat>,
    /// Number that seeds the auto-named extra inputs of an extensible
    /// block.
    pub base_input_number: usize,
    #[serde(skip)]
    pub span: TableSpan,
}

/// A named group of blocks, in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub blocks: Vec<BlockDescriptor>,
}
