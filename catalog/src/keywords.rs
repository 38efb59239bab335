//! Reserved-word harvesting for the language front ends.
//!
//! The parsers and editors treat every catalog block name and every
//! hierarchy type name as reserved. The static lists cover the fixed
//! keywords of the languages the catalog feeds.

use crate::assemble::Catalog;
use crate::type_hierarchy::TypeHierarchy;

/// Keywords of program organization unit declarations.
pub const POU_KEYWORDS: &[&str] = &[
    "EN",
    "ENO",
    "F_EDGE",
    "R_EDGE",
    "FUNCTION",
    "FUNCTION_BLOCK",
    "PROGRAM",
    "END_FUNCTION",
    "END_FUNCTION_BLOCK",
    "END_PROGRAM",
];

/// Keywords of type declarations.
pub const TYPE_KEYWORDS: &[&str] = &[
    "TYPE",
    "STRUCT",
    "END_TYPE",
    "END_STRUCT",
    "ARRAY",
    "OF",
    "T",
    "D",
    "TIME_OF_DAY",
    "DATE_AND_TIME",
];

/// Keywords of variable declarations.
pub const VAR_KEYWORDS: &[&str] = &[
    "VAR",
    "VAR_INPUT",
    "VAR_OUTPUT",
    "VAR_IN_OUT",
    "VAR_TEMP",
    "VAR_EXTERNAL",
    "END_VAR",
    "AT",
    "CONSTANT",
    "RETAIN",
    "NON_RETAIN",
];

/// Keywords of the structured text language.
pub const ST_KEYWORDS: &[&str] = &[
    "TRUE", "FALSE", "IF", "THEN", "ELSIF", "ELSE", "END_IF", "CASE", "OF", "END_CASE", "FOR",
    "TO", "BY", "DO", "END_FOR", "WHILE", "END_WHILE", "REPEAT", "UNTIL", "END_REPEAT", "EXIT",
    "RETURN", "NOT", "MOD", "AND", "XOR", "OR",
];

/// Keywords of the instruction list language.
pub const IL_KEYWORDS: &[&str] = &[
    "LD", "LDN", "ST", "STN", "S", "R", "AND", "ANDN", "OR", "ORN", "XOR", "XORN", "NOT", "ADD",
    "SUB", "MUL", "DIV", "MOD", "GT", "GE", "EQ", "NE", "LE", "LT", "JMP", "JMPC", "JMPCN", "CAL",
    "CALC", "CALCN", "RET", "RETC", "RETCN",
];

/// POU keywords plus every block name the catalog reserves.
pub fn pou_keywords(catalog: &Catalog) -> Vec<String> {
    let mut keywords = Vec::new();
    extend_unique(&mut keywords, POU_KEYWORDS.iter().copied());
    extend_unique(&mut keywords, catalog.names());
    keywords
}

/// Type declaration keywords plus every registered type name.
pub fn type_keywords(hierarchy: &TypeHierarchy) -> Vec<String> {
    let mut keywords = Vec::new();
    extend_unique(&mut keywords, TYPE_KEYWORDS.iter().copied());
    extend_unique(
        &mut keywords,
        hierarchy.type_names().map(|name| name.name.original().as_str()),
    );
    keywords
}

/// Every reserved word across the languages, deduplicated
/// case-insensitively in first-occurrence order.
pub fn iec_keywords(catalog: &Catalog, hierarchy: &TypeHierarchy) -> Vec<String> {
    let mut keywords = vec![
        String::from("E"),
        String::from("TRUE"),
        String::from("FALSE"),
    ];
    let pou = pou_keywords(catalog);
    let types = type_keywords(hierarchy);
    extend_unique(&mut keywords, pou.iter().map(String::as_str));
    extend_unique(&mut keywords, types.iter().map(String::as_str));
    extend_unique(&mut keywords, VAR_KEYWORDS.iter().copied());
    extend_unique(&mut keywords, ST_KEYWORDS.iter().copied());
    extend_unique(&mut keywords, IL_KEYWORDS.iter().copied());
    keywords
}

fn extend_unique<'a>(keywords: &mut Vec<String>, candidates: impl Iterator<Item = &'a str>) {
    for candidate in candidates {
        if !keywords
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(candidate))
        {
            keywords.push(candidate.to_string());
        }
    }
}
