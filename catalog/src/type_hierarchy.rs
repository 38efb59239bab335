//! The type hierarchy stores the subtyping relation between the
//! elementary types and the ANY* meta types that the standard function
//! table is declared against.
//!
//! The hierarchy is a forest with a single root (ANY). Each node has at
//! most one parent and subtype queries walk the parent chain, which is
//! never more than a few nodes deep.

use std::collections::HashMap;

use plcstd_dsl::common::TypeName;
use plcstd_dsl::diagnostic::{Diagnostic, Label};
use plcstd_problems::Problem;

/// Name prefix reserved for meta types. Meta types group concrete types
/// for overload declarations and are never a parameter's runtime type.
const META_TYPE_PREFIX: &str = "any";

/// Declaration-ordered list of the types and their direct parent.
///
/// The order is load-bearing: `sub_types` results, and therefore the
/// order of generated overloads, follow it. Parents always precede
/// their children. WSTRING is not declared until the code generators
/// support it.
const TYPE_HIERARCHY: &[(&str, Option<&str>)] = &[
    ("ANY", None),
    ("ANY_DERIVED", Some("ANY")),
    ("ANY_ELEMENTARY", Some("ANY")),
    ("ANY_MAGNITUDE", Some("ANY_ELEMENTARY")),
    ("ANY_BIT", Some("ANY_ELEMENTARY")),
    ("ANY_NBIT", Some("ANY_BIT")),
    ("ANY_STRING", Some("ANY_ELEMENTARY")),
    ("ANY_DATE", Some("ANY_ELEMENTARY")),
    ("ANY_NUM", Some("ANY_MAGNITUDE")),
    ("ANY_REAL", Some("ANY_NUM")),
    ("ANY_INT", Some("ANY_NUM")),
    ("ANY_SINT", Some("ANY_INT")),
    ("ANY_UINT", Some("ANY_INT")),
    ("BOOL", Some("ANY_BIT")),
    ("SINT", Some("ANY_SINT")),
    ("INT", Some("ANY_SINT")),
    ("DINT", Some("ANY_SINT")),
    ("LINT", Some("ANY_SINT")),
    ("USINT", Some("ANY_UINT")),
    ("UINT", Some("ANY_UINT")),
    ("UDINT", Some("ANY_UINT")),
    ("ULINT", Some("ANY_UINT")),
    ("REAL", Some("ANY_REAL")),
    ("LREAL", Some("ANY_REAL")),
    ("TIME", Some("ANY_MAGNITUDE")),
    ("DATE", Some("ANY_DATE")),
    ("TOD", Some("ANY_DATE")),
    ("DT", Some("ANY_DATE")),
    ("STRING", Some("ANY_STRING")),
    ("BYTE", Some("ANY_NBIT")),
    ("WORD", Some("ANY_NBIT")),
    ("DWORD", Some("ANY_NBIT")),
    ("LWORD", Some("ANY_NBIT")),
];

/// Returns true if the name denotes a meta type.
pub fn is_meta_type(type_name: &TypeName) -> bool {
    type_name.name.lower_case().starts_with(META_TYPE_PREFIX)
}

/// The registered type forest.
#[derive(Debug)]
pub struct TypeHierarchy {
    /// Registration order; subtype queries report their results in this
    /// order so that generated code is stable across runs.
    declaration_order: Vec<TypeName>,
    parents: HashMap<TypeName, Option<TypeName>>,
}

impl TypeHierarchy {
    fn new() -> Self {
        Self {
            declaration_order: Vec::new(),
            parents: HashMap::new(),
        }
    }

    /// Adds the type into the hierarchy.
    ///
    /// Returns a diagnostic if the type is already registered or the
    /// parent is not.
    fn insert(&mut self, type_name: TypeName, parent: Option<TypeName>) -> Result<(), Diagnostic> {
        if let Some(parent) = &parent {
            if !self.contains(parent) {
                return Err(unknown_type(parent));
            }
        }
        if self.contains(&type_name) {
            return Err(Diagnostic::problem(
                Problem::TypeDeclNameDuplicated,
                Label::builtin(format!("Duplicate declaration of {}", type_name)),
            ));
        }
        self.declaration_order.push(type_name.clone());
        self.parents.insert(type_name, parent);
        Ok(())
    }

    /// Returns true if the type is registered.
    pub fn contains(&self, type_name: &TypeName) -> bool {
        self.parents.contains_key(type_name)
    }

    /// Returns true if the type is the reference type or a descendant
    /// of it. A reference of `None` is the universal wildcard and
    /// matches every registered type.
    ///
    /// Both the type and the reference must be registered; anything
    /// else is a static-table authoring bug and fails fast.
    pub fn is_of_type(
        &self,
        type_name: &TypeName,
        reference: Option<&TypeName>,
    ) -> Result<bool, Diagnostic> {
        if !self.contains(type_name) {
            return Err(unknown_type(type_name));
        }
        let Some(reference) = reference else {
            return Ok(true);
        };
        if !self.contains(reference) {
            return Err(unknown_type(reference));
        }
        let mut current = type_name;
        loop {
            if current == reference {
                return Ok(true);
            }
            match self.parents.get(current).and_then(Option::as_ref) {
                Some(parent) => current = parent,
                None => return Ok(false),
            }
        }
    }

    /// All concrete types belonging to the reference type, in
    /// declaration order. Meta type names themselves are excluded.
    pub fn sub_types(&self, reference: &TypeName) -> Result<Vec<TypeName>, Diagnostic> {
        let mut matching = Vec::new();
        for type_name in &self.declaration_order {
            if is_meta_type(type_name) {
                continue;
            }
            if self.is_of_type(type_name, Some(reference))? {
                matching.push(type_name.clone());
            }
        }
        Ok(matching)
    }

    /// Every registered type name, in declaration order.
    pub fn type_names(&self) -> impl Iterator<Item = &TypeName> {
        self.declaration_order.iter()
    }
}

fn unknown_type(type_name: &TypeName) -> Diagnostic {
    Diagnostic::problem(
        Problem::UnknownTypeName,
        Label::builtin(format!("No type named {}", type_name)),
    )
    .with_context("type", type_name.name.original())
}

/// Builds the type hierarchy from the built-in declarations.
pub struct TypeHierarchyBuilder {
    has_elementary_types: bool,
}

impl TypeHierarchyBuilder {
    pub fn new() -> Self {
        Self {
            has_elementary_types: false,
        }
    }

    pub fn with_elementary_types(mut self) -> Self {
        self.has_elementary_types = true;
        self
    }

    pub fn build(self) -> Result<TypeHierarchy, Diagnostic> {
        let mut hierarchy = TypeHierarchy::new();
        if self.has_elementary_types {
            for (name, parent) in TYPE_HIERARCHY.iter().copied() {
                hierarchy.insert(TypeName::from(name), parent.map(TypeName::from))?;
            }
        }
        Ok(hierarchy)
    }
}

impl Default for TypeHierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
