//! Instantiates generic function templates over the concrete members
//! of their declared type classes.

use log::debug;
use plcstd_dsl::common::{BlockDescriptor, BlockKind, ParamSpec, TypeName};
use plcstd_dsl::core::Id;
use plcstd_dsl::diagnostic::{Diagnostic, Label};
use plcstd_problems::Problem;

use crate::conversion::select_format;
use crate::table::FunctionTemplate;
use crate::type_hierarchy::TypeHierarchy;

/// Expands one template into the concrete descriptors it declares.
///
/// A template without variation yields exactly one descriptor that
/// keeps its declared (possibly abstract) parameter types. A template
/// with variation yields one descriptor per accepted (input, output)
/// combination. Either wildcard marker triggers enumeration of both
/// variant sets; the markers themselves control only how the concrete
/// name is composed. A combination that resolves to no conversion
/// format is skipped, which is how invalid pairings are pruned.
pub fn expand(
    template: &FunctionTemplate,
    hierarchy: &TypeHierarchy,
) -> Result<Vec<BlockDescriptor>, Diagnostic> {
    let (input_variants, output_variants) = if template.varies_input || template.varies_output {
        let input_class = first_param_type(&template.inputs, template)?;
        let output_class = first_param_type(&template.outputs, template)?;
        (
            to_variants(hierarchy.sub_types(input_class)?),
            to_variants(hierarchy.sub_types(output_class)?),
        )
    } else {
        (vec![None], vec![None])
    };

    let mut descriptors = Vec::new();
    for in_type in &input_variants {
        for out_type in &output_variants {
            let mut inputs = template.inputs.clone();
            if let Some(in_type) = in_type {
                for param in &mut inputs {
                    // Substitute the resolved type into every input the
                    // declared class covers; other inputs keep their
                    // fixed types.
                    if hierarchy.is_of_type(in_type, Some(&param.param_type))? {
                        param.param_type = in_type.clone();
                    }
                }
            }
            let mut outputs = template.outputs.clone();
            if let (Some(out_type), Some(first)) = (out_type, outputs.first_mut()) {
                first.param_type = out_type.clone();
            }

            let generate = if let Some(family) = template.family {
                let input = inputs
                    .first()
                    .ok_or_else(|| missing_parameters(template))?;
                let output = outputs
                    .first()
                    .ok_or_else(|| missing_parameters(template))?;
                match select_format(family, hierarchy, &input.param_type, &output.param_type)? {
                    Some(format) => Some(format),
                    None => continue,
                }
            } else {
                None
            };

            descriptors.push(BlockDescriptor {
                name: concrete_name(template, in_type.as_ref(), out_type.as_ref()),
                kind: BlockKind::Function,
                extensible: template.extensible,
                inputs,
                outputs,
                comment: template.comment.clone(),
                usage: String::new(),
                generate,
                base_input_number: template.base_input_number,
                span: template.span.clone(),
            });
        }
    }
    debug!("{}: {} overloads", template.name, descriptors.len());
    Ok(descriptors)
}

fn to_variants(sub_types: Vec<TypeName>) -> Vec<Option<TypeName>> {
    sub_types.into_iter().map(Some).collect()
}

fn first_param_type<'a>(
    params: &'a [ParamSpec],
    template: &FunctionTemplate,
) -> Result<&'a TypeName, Diagnostic> {
    params
        .first()
        .map(|param| &param.param_type)
        .ok_or_else(|| missing_parameters(template))
}

fn missing_parameters(template: &FunctionTemplate) -> Diagnostic {
    Diagnostic::problem(
        Problem::TableFieldMissing,
        Label::span(
            template.span.clone(),
            "Template declares no parameter to vary",
        ),
    )
    .with_context("name", template.name.original())
}

fn concrete_name(
    template: &FunctionTemplate,
    in_type: Option<&TypeName>,
    out_type: Option<&TypeName>,
) -> Id {
    let base = template.name.original();
    let mut name = match (template.varies_input, in_type) {
        (true, Some(in_type)) => format!("{}_{}", in_type, base),
        _ => base.clone(),
    };
    if let (true, Some(out_type)) = (template.varies_output, out_type) {
        name = format!("{}_{}", name, out_type);
    }
    Id::from(&name)
}

#[cfg(test)]
mod tests {
    use plcstd_dsl::common::{EdgeModifier, ParamSpec};
    use plcstd_dsl::core::{Id, TableSpan};

    use super::*;
    use crate::conversion::ConversionFamily;
    use crate::type_hierarchy::TypeHierarchyBuilder;

    fn hierarchy() -> TypeHierarchy {
        TypeHierarchyBuilder::new()
            .with_elementary_types()
            .build()
            .unwrap()
    }

    fn template(
        name: &str,
        varies_input: bool,
        varies_output: bool,
        input_type: &str,
        output_type: &str,
        family: Option<ConversionFamily>,
    ) -> FunctionTemplate {
        FunctionTemplate {
            name: Id::from(name),
            varies_input,
            varies_output,
            extensible: false,
            inputs: vec![ParamSpec::new("IN", input_type, EdgeModifier::None)],
            outputs: vec![ParamSpec::new("OUT", output_type, EdgeModifier::None)],
            base_input_number: 1,
            family,
            comment: String::from("Data type conversion"),
            span: TableSpan::builtin(),
        }
    }

    #[test]
    fn expand_when_no_variation_then_single_generic_descriptor() {
        let template = template("ABS", false, false, "ANY_NUM", "ANY_NUM", None);
        let descriptors = expand(&template, &hierarchy()).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, Id::from("ABS"));
        assert_eq!(descriptors[0].inputs[0].param_type, TypeName::from("ANY_NUM"));
        assert!(descriptors[0].generate.is_none());
    }

    #[test]
    fn expand_when_both_wildcards_then_names_carry_both_types() {
        let template = template("TO", true, true, "ANY", "ANY", Some(ConversionFamily::AnyToAny));
        let descriptors = expand(&template, &hierarchy()).unwrap();
        let int_to_real = descriptors
            .iter()
            .find(|descriptor| descriptor.name == Id::from("INT_TO_REAL"))
            .unwrap();
        assert_eq!(int_to_real.inputs[0].param_type, TypeName::from("INT"));
        assert_eq!(int_to_real.outputs[0].param_type, TypeName::from("REAL"));
        assert!(int_to_real.generate.is_some());
    }

    #[test]
    fn expand_when_both_wildcards_then_no_identity_combination() {
        let template = template("TO", true, true, "ANY", "ANY", Some(ConversionFamily::AnyToAny));
        let descriptors = expand(&template, &hierarchy()).unwrap();
        assert!(!descriptors.is_empty());
        for descriptor in &descriptors {
            assert_ne!(
                descriptor.inputs[0].param_type, descriptor.outputs[0].param_type,
                "identity conversion materialized for {}",
                descriptor.name
            );
        }
    }

    #[test]
    fn expand_when_real_to_sint_classes_then_no_identity_combination() {
        let template = template(
            "TO",
            true,
            true,
            "ANY_REAL",
            "ANY_SINT",
            Some(ConversionFamily::AnyToAny),
        );
        let descriptors = expand(&template, &hierarchy()).unwrap();
        assert_eq!(descriptors.len(), 8);
        for descriptor in &descriptors {
            assert_ne!(
                descriptor.inputs[0].param_type,
                descriptor.outputs[0].param_type
            );
        }
    }

    #[test]
    fn expand_when_trailing_wildcard_only_then_name_carries_output_type() {
        let template = template(
            "TRUNC",
            false,
            true,
            "ANY_REAL",
            "ANY_INT",
            Some(ConversionFamily::AnyToAny),
        );
        let descriptors = expand(&template, &hierarchy()).unwrap();
        // Both REAL and LREAL instantiate each of the eight integer
        // outputs under the same concrete name.
        assert_eq!(descriptors.len(), 16);
        let trunc_int: Vec<_> = descriptors
            .iter()
            .filter(|descriptor| descriptor.name == Id::from("TRUNC_INT"))
            .collect();
        assert_eq!(trunc_int.len(), 2);
        assert!(trunc_int
            .iter()
            .any(|descriptor| descriptor.inputs[0].param_type == TypeName::from("REAL")));
        assert!(trunc_int
            .iter()
            .any(|descriptor| descriptor.inputs[0].param_type == TypeName::from("LREAL")));
    }

    #[test]
    fn expand_when_leading_wildcard_only_then_name_carries_input_type() {
        let template = template(
            "TO_BCD",
            true,
            false,
            "ANY_INT",
            "ANY_BIT",
            Some(ConversionFamily::AnyToBcd),
        );
        let descriptors = expand(&template, &hierarchy()).unwrap();
        let names: Vec<_> = descriptors
            .iter()
            .map(|descriptor| descriptor.name.original().clone())
            .collect();
        assert_eq!(
            names,
            vec!["USINT_TO_BCD", "UINT_TO_BCD", "UDINT_TO_BCD", "ULINT_TO_BCD"]
        );
        assert_eq!(descriptors[0].outputs[0].param_type, TypeName::from("BYTE"));
    }

    #[test]
    fn expand_when_other_inputs_outside_class_then_keep_fixed_types() {
        let mut template = template(
            "TO",
            true,
            true,
            "ANY_REAL",
            "ANY_SINT",
            Some(ConversionFamily::AnyToAny),
        );
        template
            .inputs
            .push(ParamSpec::new("N", "ANY_INT", EdgeModifier::None));
        let descriptors = expand(&template, &hierarchy()).unwrap();
        for descriptor in &descriptors {
            // The resolved real type never belongs to ANY_INT, so the
            // second input keeps its declared type.
            assert_eq!(descriptor.inputs[1].param_type, TypeName::from("ANY_INT"));
        }
    }
}
