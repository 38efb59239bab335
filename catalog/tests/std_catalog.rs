//! End-to-end checks of the catalog built from the embedded standard
//! tables.

use plcstd_catalog::{build_standard_catalog, Catalog};
use plcstd_dsl::common::{BlockKind, EdgeModifier, TypeName};
use plcstd_dsl::core::Id;

fn catalog() -> Catalog {
    build_standard_catalog().unwrap()
}

#[test]
fn catalog_when_built_then_block_categories_precede_function_categories() {
    let catalog = catalog();
    let names: Vec<_> = catalog
        .categories()
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Standard function blocks",
            "Additional function blocks",
            "Type conversion",
            "Numerical",
            "Time",
            "Bit-shift",
            "Bitwise",
            "Selection",
            "Comparison",
            "Character string",
        ]
    );
}

#[test]
fn catalog_when_add_looked_up_then_numerical_variant_exists() {
    let catalog = catalog();
    let variants = catalog.find("ADD");
    assert!(!variants.is_empty());
    let (category, descriptor) = variants
        .iter()
        .find(|(category, _)| category == "Numerical")
        .unwrap();
    assert_eq!(category, "Numerical");
    assert_eq!(descriptor.kind, BlockKind::Function);
    assert!(descriptor.extensible);
    assert_eq!(descriptor.base_input_number, 1);
    assert_eq!(descriptor.inputs.len(), 2);
    assert_eq!(descriptor.inputs[0].name, Id::from("IN1"));
    assert_eq!(descriptor.inputs[0].param_type, TypeName::from("ANY_NUM"));
    assert_eq!(descriptor.inputs[0].modifier, EdgeModifier::None);
    assert_eq!(descriptor.inputs[1].name, Id::from("IN2"));
    assert_eq!(descriptor.comment, "Addition");
}

#[test]
fn catalog_when_add_looked_up_then_time_overload_also_registered() {
    let catalog = catalog();
    let categories: Vec<_> = catalog
        .find("ADD")
        .iter()
        .map(|(category, _)| category.as_str())
        .collect();
    assert!(categories.contains(&"Numerical"));
    assert!(categories.contains(&"Time"));
}

#[test]
fn catalog_when_unknown_name_then_empty_result() {
    assert!(catalog().find("XYZZY").is_empty());
}

#[test]
fn catalog_when_conversion_expanded_then_move_pair_present() {
    let catalog = catalog();
    let variants = catalog.find("INT_TO_REAL");
    assert_eq!(variants.len(), 1);
    let (category, descriptor) = &variants[0];
    assert_eq!(category, "Type conversion");
    assert_eq!(descriptor.inputs[0].param_type, TypeName::from("INT"));
    assert_eq!(descriptor.outputs[0].param_type, TypeName::from("REAL"));
    let format = descriptor.generate.as_ref().unwrap();
    assert_eq!(format.routine.as_deref(), Some("__move_"));
    assert_eq!(format.cast, Some(TypeName::from("INT")));
}

#[test]
fn catalog_when_conversion_expanded_then_real_to_int_uses_native_routine() {
    let catalog = catalog();
    let (_, descriptor) = &catalog.find("REAL_TO_INT")[0];
    let format = descriptor.generate.as_ref().unwrap();
    assert_eq!(format.routine.as_deref(), Some("__real_to_sint"));
    assert_eq!(format.cast, None);
}

#[test]
fn catalog_when_conversion_expanded_then_no_identity_overload() {
    let catalog = catalog();
    assert!(catalog.find("INT_TO_INT").is_empty());
    assert!(catalog.find("STRING_TO_STRING").is_empty());
}

#[test]
fn catalog_when_conversion_expanded_then_unsupported_pairs_absent() {
    let catalog = catalog();
    assert!(catalog.find("TIME_TO_DATE").is_empty());
    assert!(catalog.find("DT_TO_DATE").is_empty());
}

#[test]
fn catalog_when_bcd_families_expanded_then_width_matched_pairs_only() {
    let catalog = catalog();
    assert_eq!(catalog.find("BCD_TO_USINT").len(), 1);
    assert_eq!(catalog.find("BCD_TO_UINT").len(), 1);
    assert_eq!(catalog.find("BCD_TO_UDINT").len(), 1);
    assert_eq!(catalog.find("BCD_TO_ULINT").len(), 1);
    assert!(catalog.find("BCD_TO_SINT").is_empty());

    let (_, decode) = &catalog.find("BCD_TO_USINT")[0];
    assert_eq!(decode.inputs[0].param_type, TypeName::from("BYTE"));
    assert_eq!(
        decode.generate.as_ref().unwrap().routine.as_deref(),
        Some("__bcd_to_uint")
    );

    assert_eq!(catalog.find("USINT_TO_BCD").len(), 1);
    assert_eq!(catalog.find("ULINT_TO_BCD").len(), 1);
    assert!(catalog.find("SINT_TO_BCD").is_empty());
}

#[test]
fn catalog_when_trunc_expanded_then_both_real_inputs_materialized() {
    let catalog = catalog();
    let variants = catalog.find("TRUNC_INT");
    assert_eq!(variants.len(), 2);
    let inputs: Vec<_> = variants
        .iter()
        .map(|(_, descriptor)| descriptor.inputs[0].param_type.clone())
        .collect();
    assert!(inputs.contains(&TypeName::from("REAL")));
    assert!(inputs.contains(&TypeName::from("LREAL")));
}

#[test]
fn catalog_when_usage_derived_then_signature_lists_types_and_names() {
    let catalog = catalog();
    let (_, abs) = &catalog.find("ABS")[0];
    assert_eq!(abs.usage, "\n (ANY_NUM:IN) => (ANY_NUM:OUT)");
    let (_, sel) = &catalog.find("SEL")[0];
    assert_eq!(sel.usage, "\n (BOOL:G, ANY:IN0, ANY:IN1) => (ANY:OUT)");
}

#[test]
fn catalog_when_limit_assembled_then_canonical_parameter_names_kept() {
    let catalog = catalog();
    let (_, limit) = &catalog.find("LIMIT")[0];
    let names: Vec<_> = limit
        .inputs
        .iter()
        .map(|param| param.name.original().clone())
        .collect();
    assert_eq!(names, vec!["MN", "IN", "MX"]);
    assert!(limit
        .inputs
        .iter()
        .all(|param| param.param_type == TypeName::from("ANY_ELEMENTARY")));
}

#[test]
fn catalog_when_function_blocks_assembled_then_comments_and_modifiers_survive() {
    let catalog = catalog();
    let (category, ton) = &catalog.find("TON")[0];
    assert_eq!(category, "Standard function blocks");
    assert_eq!(ton.kind, BlockKind::FunctionBlock);
    assert!(ton.comment.starts_with("On-delay timer"));

    let (_, ctu) = &catalog.find("CTU")[0];
    assert_eq!(ctu.inputs[0].modifier, EdgeModifier::Rising);

    let (_, ctu_dint) = &catalog.find("CTU_DINT")[0];
    assert_eq!(ctu_dint.comment, ctu.comment);
}

#[test]
fn catalog_when_rebuilt_then_equal_element_for_element() {
    let first = build_standard_catalog().unwrap();
    let second = build_standard_catalog().unwrap();
    assert_eq!(first, second);
}

#[test]
fn catalog_when_serialized_then_categories_exported() {
    let catalog = catalog();
    let json = serde_json::to_value(&catalog).unwrap();
    let categories = json.get("categories").unwrap().as_array().unwrap();
    assert_eq!(categories.len(), catalog.categories().len());
    let first = &categories[0];
    assert_eq!(
        first.get("name").unwrap().as_str(),
        Some("Standard function blocks")
    );
}
