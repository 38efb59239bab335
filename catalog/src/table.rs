//! Typed boundary over the declaration table that drives standard
//! function generation.
//!
//! The table loader proper is an external collaborator: it produces
//! rows of cells. This module locates the sections within those rows
//! and turns them into function templates. The wildcard naming
//! convention and the generation-format column are converted into
//! structured data here, at the boundary, so that nothing downstream
//! re-inspects name strings.

use std::collections::HashMap;

use log::debug;
use plcstd_dsl::common::{EdgeModifier, ParamSpec, TypeName};
use plcstd_dsl::core::{is_valid_identifier, FileId, Id, TableSpan};
use plcstd_dsl::diagnostic::{Diagnostic, Label};
use plcstd_problems::Problem;

use crate::conversion::ConversionFamily;

/// Marker of the section mapping canonical parameter names to types.
const VARIABLES_SECTION: &str = "Standard_functions_variables_types";
/// Marker of the section declaring the standard functions.
const FUNCTIONS_SECTION: &str = "Standard_functions_type";

static STANDARD_TABLE: &str = include_str!("../resources/iec_std.csv");

/// One row of a declaration table.
#[derive(Clone, Debug)]
pub struct DeclRow {
    /// 1-indexed row number in the source table.
    pub row: usize,
    pub cells: Vec<String>,
}

impl DeclRow {
    /// The cell at the index, or the empty string when the row is
    /// shorter than that.
    fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A declaration table produced by an external tabular loader.
#[derive(Debug)]
pub struct DeclTable {
    pub file_id: FileId,
    pub rows: Vec<DeclRow>,
}

impl DeclTable {
    /// Parses semicolon-separated table text. Quote handling is left to
    /// the section readers so that quoted category names and comments
    /// survive as written.
    pub fn parse(text: &str, file_id: FileId) -> Result<Self, Diagnostic> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(text.as_bytes());
        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|err| {
                Diagnostic::problem(
                    Problem::InvalidTable,
                    Label::row(file_id.clone(), index + 1, err.to_string()),
                )
            })?;
            rows.push(DeclRow {
                row: index + 1,
                cells: record.iter().map(|cell| cell.trim().to_string()).collect(),
            });
        }
        Ok(Self { file_id, rows })
    }

    /// The standard function table embedded in the crate.
    pub fn standard() -> Result<Self, Diagnostic> {
        Self::parse(STANDARD_TABLE, FileId::builtin())
    }

    fn span(&self, row: usize) -> TableSpan {
        TableSpan::row(self.file_id.clone(), row)
    }

    /// Finds a section marker row. Returns the index of the marker row
    /// and the header cells that follow the marker cell.
    fn find_section(&self, marker: &str) -> Result<(usize, Vec<String>), Diagnostic> {
        for (index, row) in self.rows.iter().enumerate() {
            if row.cell(0) == marker {
                return Ok((index, row.cells[1..].to_vec()));
            }
        }
        Err(Diagnostic::problem(
            Problem::TableSectionMissing,
            Label::file(
                self.file_id.clone(),
                format!("No section marker {}", marker),
            ),
        ))
    }
}

/// Returns the first double-quoted segment when one exists, otherwise
/// the text unchanged.
pub fn unquote(text: &str) -> &str {
    let mut parts = text.split('"');
    let _before = parts.next();
    match parts.next() {
        Some(inside) => inside,
        None => text,
    }
}

/// A generic function row, with the wildcard markers already converted
/// into structured variation flags.
#[derive(Clone, Debug)]
pub struct FunctionTemplate {
    /// Base name with the wildcard markers stripped.
    pub name: Id,
    /// True when the concrete name is prefixed with the resolved input
    /// type.
    pub varies_input: bool,
    /// True when the concrete name is suffixed with the resolved output
    /// type.
    pub varies_output: bool,
    pub extensible: bool,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
    pub base_input_number: usize,
    /// Conversion family resolved from the generation-format column.
    pub family: Option<ConversionFamily>,
    /// Raw comment field; assembly reduces it for display.
    pub comment: String,
    pub span: TableSpan,
}

/// A category of templates, in table-declaration order.
#[derive(Debug)]
pub struct TemplateCategory {
    pub name: String,
    pub templates: Vec<FunctionTemplate>,
}

/// Reads the variables section: canonical parameter name to declared
/// type.
pub fn standard_function_variables(
    table: &DeclTable,
) -> Result<HashMap<Id, TypeName>, Diagnostic> {
    let (start, headers) = table.find_section(VARIABLES_SECTION)?;
    let name_column = column(&headers, "name");
    let type_column = column(&headers, "type");
    let (Some(name_column), Some(type_column)) = (name_column, type_column) else {
        return Err(Diagnostic::problem(
            Problem::TableFieldMissing,
            Label::file(
                table.file_id.clone(),
                "Variables section must declare name and type columns",
            ),
        ));
    };
    let mut variables = HashMap::new();
    for row in &table.rows[start + 1..] {
        if row.cell(1).is_empty() {
            break;
        }
        // Data cells start after the blank marker cell.
        let name = row.cell(1 + name_column);
        let declared = row.cell(1 + type_column);
        if name.is_empty() || declared.is_empty() {
            return Err(Diagnostic::problem(
                Problem::TableFieldMissing,
                Label::span(
                    table.span(row.row),
                    "Variable rows need both a name and a type",
                ),
            ));
        }
        variables.insert(Id::from(name), TypeName::from(declared));
    }
    Ok(variables)
}

/// Reads the functions section into categories of templates.
pub fn standard_function_templates(
    table: &DeclTable,
) -> Result<Vec<TemplateCategory>, Diagnostic> {
    let variables = standard_function_variables(table)?;
    let (start, headers) = table.find_section(FUNCTIONS_SECTION)?;
    let columns = FunctionColumns::locate(&headers, table)?;
    let mut categories: Vec<TemplateCategory> = Vec::new();
    for row in &table.rows[start + 1..] {
        if row.cell(1).is_empty() {
            continue;
        }
        if !row.cell(0).is_empty() {
            categories.push(TemplateCategory {
                name: unquote(row.cell(0)).to_string(),
                templates: Vec::new(),
            });
        }
        let Some(category) = categories.last_mut() else {
            return Err(Diagnostic::problem(
                Problem::RowOutsideCategory,
                Label::span(
                    table.span(row.row),
                    "Declaration must follow a category header",
                ),
            ));
        };
        category
            .templates
            .push(parse_template(row, &columns, &variables, table)?);
    }
    debug!("parsed {} template categories", categories.len());
    Ok(categories)
}

/// Column positions within the functions section.
struct FunctionColumns {
    name: usize,
    extensible: usize,
    inputs: usize,
    outputs: usize,
    base_input_number: usize,
    generate: usize,
    comment: usize,
}

impl FunctionColumns {
    fn locate(headers: &[String], table: &DeclTable) -> Result<Self, Diagnostic> {
        let require = |header: &str| {
            column(headers, header).ok_or_else(|| {
                Diagnostic::problem(
                    Problem::TableFieldMissing,
                    Label::file(
                        table.file_id.clone(),
                        format!("Functions section has no {} column", header),
                    ),
                )
            })
        };
        Ok(Self {
            name: require("name")?,
            extensible: require("extensible")?,
            inputs: require("inputs")?,
            outputs: require("outputs")?,
            base_input_number: require("baseinputnumber")?,
            generate: require("generate")?,
            comment: require("comment")?,
        })
    }
}

fn column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header.eq_ignore_ascii_case(name))
}

fn parse_template(
    row: &DeclRow,
    columns: &FunctionColumns,
    variables: &HashMap<Id, TypeName>,
    table: &DeclTable,
) -> Result<FunctionTemplate, Diagnostic> {
    let span = table.span(row.row);
    let raw_name = row.cell(1 + columns.name);
    let varies_input = raw_name.starts_with('*');
    let varies_output = raw_name.ends_with('*');
    let base_name = raw_name.trim_matches(|c| c == '*' || c == '_');
    if !is_valid_identifier(base_name) {
        return Err(Diagnostic::problem(
            Problem::InvalidIdentifier,
            Label::span(span, "Function name is not usable as an identifier"),
        )
        .with_context("name", raw_name));
    }

    let extensible_cell = row.cell(1 + columns.extensible);
    let extensible = match extensible_cell.to_ascii_lowercase().as_str() {
        "yes" => true,
        "no" => false,
        _ => {
            return Err(Diagnostic::problem(
                Problem::InvalidExtensibleFlag,
                Label::span(span, "Extensible flag must be yes or no"),
            )
            .with_context("extensible", extensible_cell))
        }
    };

    let base_cell = row.cell(1 + columns.base_input_number);
    let base_input_number = if base_cell.is_empty() {
        1
    } else {
        base_cell.parse::<usize>().map_err(|_| {
            Diagnostic::problem(
                Problem::InvalidBaseInputNumber,
                Label::span(span.clone(), "Base input number must be an integer"),
            )
            .with_context("baseinputnumber", base_cell)
        })?
    };

    let inputs = parse_inputs(row.cell(1 + columns.inputs), variables, base_input_number);
    let outputs = vec![ParamSpec {
        name: Id::from("OUT"),
        param_type: TypeName::from(row.cell(1 + columns.outputs)),
        modifier: EdgeModifier::None,
    }];

    let generate_cell = row.cell(1 + columns.generate);
    let family = if generate_cell.is_empty() {
        None
    } else {
        Some(ConversionFamily::try_from(generate_cell).map_err(|_| {
            Diagnostic::problem(
                Problem::UnknownGenerationFormat,
                Label::span(span.clone(), "Generation format is not recognized"),
            )
            .with_context("generate", generate_cell)
        })?)
    };

    Ok(FunctionTemplate {
        name: Id::from(base_name),
        varies_input,
        varies_output,
        extensible,
        inputs,
        outputs,
        base_input_number,
        family,
        comment: row.cell(1 + columns.comment).to_string(),
        span,
    })
}

/// Translates an input declaration such as `(ANY_NUM, ANY_NUM)` into
/// named parameter specifications. A token naming a canonical variable
/// keeps that name and takes its declared type; the remaining
/// positional tokens are numbered from the base input number, except
/// that a single positional token is named plain IN.
fn parse_inputs(
    decl: &str,
    variables: &HashMap<Id, TypeName>,
    base: usize,
) -> Vec<ParamSpec> {
    let tokens: Vec<&str> = decl
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    let positional = tokens
        .iter()
        .filter(|token| !variables.contains_key(&Id::from(token)))
        .count();

    let mut counter = base;
    let mut params = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token_id = Id::from(token);
        if let Some(declared) = variables.get(&token_id) {
            params.push(ParamSpec {
                name: token_id,
                param_type: declared.clone(),
                modifier: EdgeModifier::None,
            });
        } else {
            let name = if positional > 1 {
                let name = format!("IN{}", counter);
                counter += 1;
                name
            } else {
                String::from("IN")
            };
            params.push(ParamSpec {
                name: Id::from(&name),
                param_type: TypeName::from(token),
                modifier: EdgeModifier::None,
            });
        }
    }
    params
}
