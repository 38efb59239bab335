//! Standard library catalog builder for IEC 61131-3 tooling.
//!
//! The catalog is built exactly once from static declaration tables:
//! the type hierarchy relates the elementary types to their ANY* meta
//! types, the overload expander instantiates generic function templates
//! over the concrete members of those meta types, and the conversion
//! tables select the native routine for each concrete type pair. The
//! assembled [`Catalog`](assemble::Catalog) is immutable and shared by
//! reference with the code generator, the block picker, and the keyword
//! collector.

pub mod assemble;
pub mod blocks;
pub mod conversion;
pub mod expand;
pub mod keywords;
pub mod ranges;
pub mod table;
pub mod type_hierarchy;

pub use assemble::{build_standard_catalog, Catalog};
pub use type_hierarchy::{TypeHierarchy, TypeHierarchyBuilder};
