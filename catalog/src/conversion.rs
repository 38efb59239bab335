//! Selection of the native conversion routine for a concrete
//! (input, output) type pair.
//!
//! Three independent rule tables exist: the general conversions, BCD
//! decoding, and BCD encoding. They are never merged; callers name the
//! table matching the function family. Rules are scanned in declared
//! order and the first match wins — broader rules placed before
//! narrower ones would shadow them, so the order is part of the
//! semantics and must not be rearranged.

use log::trace;
use plcstd_dsl::common::{CodeFormat, FormatSlot, TypeName};
use plcstd_dsl::diagnostic::Diagnostic;

use crate::type_hierarchy::TypeHierarchy;

/// The rule table a conversion-style template resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFamily {
    AnyToAny,
    BcdToAny,
    AnyToBcd,
}

impl ConversionFamily {
    fn rules(&self) -> &'static [ConversionRule] {
        match self {
            ConversionFamily::AnyToAny => ANY_TO_ANY_RULES,
            ConversionFamily::BcdToAny => BCD_TO_ANY_RULES,
            ConversionFamily::AnyToBcd => ANY_TO_BCD_RULES,
        }
    }
}

impl TryFrom<&str> for ConversionFamily {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "any_to_any" => Ok(ConversionFamily::AnyToAny),
            "bcd_to_any" => Ok(ConversionFamily::BcdToAny),
            "any_to_bcd" => Ok(ConversionFamily::AnyToBcd),
            _ => Err("Value not convertible to a conversion family"),
        }
    }
}

/// One ordered rule: the input and output type classes it covers and
/// the format it yields.
#[derive(Debug)]
pub struct ConversionRule {
    input_classes: &'static [&'static str],
    output_classes: &'static [&'static str],
    slot: FormatSlot,
    routine: Option<&'static str>,
    /// True when the generated code casts through the concrete input
    /// type.
    cast_to_input: bool,
}

impl ConversionRule {
    fn matches(
        &self,
        hierarchy: &TypeHierarchy,
        input: &TypeName,
        output: &TypeName,
    ) -> Result<bool, Diagnostic> {
        Ok(any_of_type(hierarchy, input, self.input_classes)?
            && any_of_type(hierarchy, output, self.output_classes)?)
    }

    fn format_for(&self, input: &TypeName) -> CodeFormat {
        CodeFormat {
            slot: self.slot,
            routine: self.routine.map(String::from),
            cast: if self.cast_to_input {
                Some(input.clone())
            } else {
                None
            },
        }
    }
}

const fn rule(
    input_classes: &'static [&'static str],
    output_classes: &'static [&'static str],
    routine: Option<&'static str>,
    cast_to_input: bool,
) -> ConversionRule {
    ConversionRule {
        input_classes,
        output_classes,
        slot: FormatSlot::ReturnType,
        routine,
        cast_to_input,
    }
}

/// General numeric, time, and string conversions.
static ANY_TO_ANY_RULES: &[ConversionRule] = &[
    // Conversions between the integer, bit, and real classes that the
    // target expresses as a plain move through the input type.
    rule(&["ANY_INT", "ANY_BIT"], &["ANY_NUM", "ANY_BIT"], Some("__move_"), true),
    rule(&["ANY_REAL"], &["ANY_REAL"], Some("__move_"), true),
    // Real to integer.
    rule(&["ANY_REAL"], &["ANY_SINT"], Some("__real_to_sint"), false),
    rule(&["ANY_REAL"], &["ANY_UINT"], Some("__real_to_uint"), false),
    rule(&["ANY_REAL"], &["ANY_BIT"], Some("__real_to_bit"), false),
    // To time.
    rule(&["ANY_INT", "ANY_BIT"], &["ANY_DATE", "TIME"], Some("__int_to_time"), false),
    rule(&["ANY_REAL"], &["ANY_DATE", "TIME"], Some("__real_to_time"), false),
    rule(&["ANY_STRING"], &["ANY_DATE", "TIME"], Some("__string_to_time"), false),
    // From time.
    rule(&["ANY_DATE", "TIME"], &["ANY_REAL"], Some("__time_to_real"), false),
    rule(&["ANY_DATE", "TIME"], &["ANY_INT", "ANY_NBIT"], Some("__time_to_int"), false),
    rule(&["TIME"], &["ANY_STRING"], Some("__time_to_string"), false),
    rule(&["DATE"], &["ANY_STRING"], Some("__date_to_string"), false),
    rule(&["TOD"], &["ANY_STRING"], Some("__tod_to_string"), false),
    rule(&["DT"], &["ANY_STRING"], Some("__dt_to_string"), false),
    // To string.
    rule(&["BOOL"], &["ANY_STRING"], Some("__bool_to_string"), false),
    rule(&["ANY_BIT"], &["ANY_STRING"], Some("__bit_to_string"), false),
    rule(&["ANY_REAL"], &["ANY_STRING"], Some("__real_to_string"), false),
    rule(&["ANY_SINT"], &["ANY_STRING"], Some("__sint_to_string"), false),
    rule(&["ANY_UINT"], &["ANY_STRING"], Some("__uint_to_string"), false),
    // From string.
    rule(&["ANY_STRING"], &["BOOL"], Some("__string_to_bool"), false),
    rule(&["ANY_STRING"], &["ANY_BIT"], Some("__string_to_bit"), false),
    rule(&["ANY_STRING"], &["ANY_SINT"], Some("__string_to_sint"), false),
    rule(&["ANY_STRING"], &["ANY_UINT"], Some("__string_to_uint"), false),
    rule(&["ANY_STRING"], &["ANY_REAL"], Some("__string_to_real"), false),
];

/// Binary-coded-decimal decoding.
static BCD_TO_ANY_RULES: &[ConversionRule] = &[
    rule(&["BYTE"], &["USINT"], Some("__bcd_to_uint"), false),
    rule(&["WORD"], &["UINT"], Some("__bcd_to_uint"), false),
    rule(&["DWORD"], &["UDINT"], Some("__bcd_to_uint"), false),
    rule(&["LWORD"], &["ULINT"], Some("__bcd_to_uint"), false),
];

/// Binary-coded-decimal encoding.
static ANY_TO_BCD_RULES: &[ConversionRule] = &[
    rule(&["USINT"], &["BYTE"], Some("__uint_to_bcd"), false),
    rule(&["UINT"], &["WORD"], Some("__uint_to_bcd"), false),
    rule(&["UDINT"], &["DWORD"], Some("__uint_to_bcd"), false),
    rule(&["ULINT"], &["LWORD"], Some("__uint_to_bcd"), false),
];

/// Selects the format of the first rule in the family's table that
/// covers the (input, output) pair.
///
/// `Ok(None)` means no rule applies — the caller omits the overload.
/// This is the normal skip signal, not an error. A pair with equal
/// input and output types never matches.
pub fn select_format(
    family: ConversionFamily,
    hierarchy: &TypeHierarchy,
    input: &TypeName,
    output: &TypeName,
) -> Result<Option<CodeFormat>, Diagnostic> {
    if input == output {
        return Ok(None);
    }
    for conversion_rule in family.rules() {
        if conversion_rule.matches(hierarchy, input, output)? {
            trace!(
                "{:?}: {} -> {} uses {:?}",
                family,
                input,
                output,
                conversion_rule.routine
            );
            return Ok(Some(conversion_rule.format_for(input)));
        }
    }
    Ok(None)
}

fn any_of_type(
    hierarchy: &TypeHierarchy,
    type_name: &TypeName,
    classes: &[&str],
) -> Result<bool, Diagnostic> {
    for class in classes {
        if hierarchy.is_of_type(type_name, Some(&TypeName::from(class)))? {
            return Ok(true);
        }
    }
    Ok(false)
}
