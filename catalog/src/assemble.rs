//! Assembly of the final block catalog.
//!
//! Assembly merges the hand-authored block categories with every
//! descriptor produced by overload expansion, derives the display
//! comment and usage signature of each descriptor, and builds the name
//! index. The result is an owned, immutable value: consumers share it
//! by reference and there is no module-level state.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use plcstd_dsl::common::{BlockDescriptor, Category};
use plcstd_dsl::diagnostic::Diagnostic;

use crate::blocks;
use crate::expand;
use crate::table::{self, DeclTable};
use crate::type_hierarchy::TypeHierarchyBuilder;

/// The assembled catalog: categories in declaration order plus an
/// index from block name to every registered variant.
#[derive(Debug, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    #[serde(skip)]
    index: IndexMap<String, Vec<(String, BlockDescriptor)>>,
}

impl Catalog {
    /// Assembles the catalog from the given categories, deriving the
    /// display comment and usage signature for every descriptor.
    pub fn assemble(mut categories: Vec<Category>) -> Self {
        for category in &mut categories {
            for block in &mut category.blocks {
                block.comment = table::unquote(&block.comment).to_string();
                block.usage = usage_signature(block);
            }
        }
        let mut index: IndexMap<String, Vec<(String, BlockDescriptor)>> = IndexMap::new();
        for category in &categories {
            for block in &category.blocks {
                index
                    .entry(block.name.lower_case().clone())
                    .or_default()
                    .push((category.name.clone(), block.clone()));
            }
        }
        debug!(
            "assembled {} categories with {} distinct names",
            categories.len(),
            index.len()
        );
        Self { categories, index }
    }

    /// The categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every variant registered under the name, with the category each
    /// belongs to. Lookup is case-insensitive. An unknown name yields
    /// an empty slice; it is not an error.
    pub fn find(&self, name: &str) -> &[(String, BlockDescriptor)] {
        self.index
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct block names, in first-registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index
            .values()
            .filter_map(|variants| variants.first())
            .map(|(_, block)| block.name.original().as_str())
    }
}

/// Display signature of a block: `type:name` pairs for the inputs,
/// then the outputs.
fn usage_signature(block: &BlockDescriptor) -> String {
    let inputs = block
        .inputs
        .iter()
        .map(|param| format!("{}:{}", param.param_type, param.name))
        .collect::<Vec<_>>()
        .join(", ");
    let outputs = block
        .outputs
        .iter()
        .map(|param| format!("{}:{}", param.param_type, param.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("\n ({}) => ({})", inputs, outputs)
}

/// Builds the standard library catalog from the embedded declaration
/// tables.
///
/// Construction happens once at startup and is pure: repeated builds
/// from the same tables yield catalogs that are equal by value, so a
/// reload can never diverge from the first build.
pub fn build_standard_catalog() -> Result<Catalog, Diagnostic> {
    let hierarchy = TypeHierarchyBuilder::new().with_elementary_types().build()?;
    debug!("type hierarchy ready");

    let table = DeclTable::standard()?;
    let template_categories = table::standard_function_templates(&table)?;

    let mut categories = blocks::standard_function_blocks();
    for template_category in &template_categories {
        let mut expanded = Vec::new();
        for template in &template_category.templates {
            expanded.extend(expand::expand(template, &hierarchy)?);
        }
        categories.push(Category {
            name: template_category.name.clone(),
            blocks: expanded,
        });
    }

    Ok(Catalog::assemble(categories))
}
