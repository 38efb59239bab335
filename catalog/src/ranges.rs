//! Declared value ranges for the concrete integer types and the
//! direct-address size prefix table.
//!
//! Both tables are declared constants, not computed: range-check code
//! generation and editor address validation must match the target
//! runtime exactly.

use plcstd_dsl::common::TypeName;

/// Inclusive bounds for a concrete integer type, used for range-check
/// code generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeRange {
    pub min: i64,
    pub max: i64,
}

/// Bounds per concrete integer type. LINT and ULINT carry 32-bit
/// bounds; the target runtime stores them in a C long.
const DATA_TYPE_RANGES: &[(&str, TypeRange)] = &[
    ("SINT", TypeRange { min: -(1i64 << 7), max: (1i64 << 7) - 1 }),
    ("INT", TypeRange { min: -(1i64 << 15), max: (1i64 << 15) - 1 }),
    ("DINT", TypeRange { min: -(1i64 << 31), max: (1i64 << 31) - 1 }),
    ("LINT", TypeRange { min: -(1i64 << 31), max: (1i64 << 31) - 1 }),
    ("USINT", TypeRange { min: 0, max: (1i64 << 8) - 1 }),
    ("UINT", TypeRange { min: 0, max: (1i64 << 16) - 1 }),
    ("UDINT", TypeRange { min: 0, max: (1i64 << 31) - 1 }),
    ("ULINT", TypeRange { min: 0, max: (1i64 << 31) - 1 }),
];

/// Returns the declared bounds for the type, or `None` when the type
/// has no range check (it is not a bounded integer type).
pub fn range_of(type_name: &TypeName) -> Option<TypeRange> {
    DATA_TYPE_RANGES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(type_name.name.original()))
        .map(|(_, range)| *range)
}

/// Concrete types that can be stored at a direct address with the
/// given size prefix (see section 2.4.1.1).
pub fn location_data_types(size_prefix: char) -> Option<&'static [&'static str]> {
    match size_prefix.to_ascii_uppercase() {
        'X' => Some(&["BOOL"]),
        'B' => Some(&["SINT", "USINT", "BYTE", "STRING"]),
        'W' => Some(&["INT", "UINT", "WORD", "WSTRING"]),
        'D' => Some(&["DINT", "UDINT", "REAL", "DWORD"]),
        'L' => Some(&["LINT", "ULINT", "LREAL", "LWORD"]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_of_when_sint_then_eight_bit_bounds() {
        let range = range_of(&TypeName::from("SINT")).unwrap();
        assert_eq!(range, TypeRange { min: -128, max: 127 });
    }

    #[test]
    fn range_of_when_lint_then_declared_32_bit_bounds() {
        let range = range_of(&TypeName::from("LINT")).unwrap();
        assert_eq!(range.min, -(1i64 << 31));
        assert_eq!(range.max, (1i64 << 31) - 1);
    }

    #[test]
    fn range_of_when_not_an_integer_type_then_none() {
        assert!(range_of(&TypeName::from("REAL")).is_none());
        assert!(range_of(&TypeName::from("STRING")).is_none());
    }

    #[test]
    fn location_data_types_when_double_word_then_includes_real() {
        let types = location_data_types('D').unwrap();
        assert!(types.contains(&"REAL"));
    }

    #[test]
    fn location_data_types_when_unknown_prefix_then_none() {
        assert!(location_data_types('Q').is_none());
    }
}
