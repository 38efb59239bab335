//! Problem codes for standard library catalog construction.
//!
//! The definitions live in `resources/problem-codes.csv` and are turned
//! into the `Problem` enumeration by the build script. Each problem has
//! a stable user-facing code and a constant message.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_when_unknown_type_then_stable_value() {
        assert_eq!(Problem::UnknownTypeName.code(), "P1003");
    }

    #[test]
    fn message_when_row_outside_category_then_describes_problem() {
        assert_eq!(
            Problem::RowOutsideCategory.message(),
            "Function declaration appears before any category header"
        );
    }
}
