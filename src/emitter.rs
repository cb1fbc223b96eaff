//! Emission of the generated table
//!
//! Turns a [`ContentTable`] into the text of a Rust module:
//!
//! ```text
//! // Embedded files for crate `my_pkg`.
//! // Code generated by tplstack. DO NOT EDIT.
//!
//! /// `TPL` is the auto-generated file table, sorted by path.
//! pub static TPL: &[(&str, &[u8])] = &[
//!     // a.txt
//!     ("a.txt", "hello".as_bytes()),
//! ];
//! ```
//!
//! Entries are always written in key order, whatever order the table
//! iterates in. The module has no inner attributes or inner doc comments, so
//! it can be pulled in with `include!` as well as declared as a `mod`.
//! [`decode`] reads such a module back.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::canonical::Canonicalize;
use crate::encoder::{escape_comment, escape_str, static_ident, Literal};
use crate::error::{StackError, StackResult};
use crate::stacker::ContentTable;

/// Default name of the embedded variable
pub const DEFAULT_VAR_NAME: &str = "Tpl";

/// Names written into the envelope of the generated module
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub package_name: String,
    pub variable_name: String,
}

impl EmitOptions {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            variable_name: DEFAULT_VAR_NAME.to_string(),
        }
    }

    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = name.into();
        self
    }
}

/// Entries of a table in emission order
pub fn sorted_entries(table: &ContentTable) -> Vec<(&str, &[u8])> {
    let mut entries: Vec<(&str, &[u8])> = table
        .iter()
        .map(|(key, content)| (key.as_str(), content.as_slice()))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Render the module text without canonicalizing it
pub fn render(options: &EmitOptions, table: &ContentTable) -> StackResult<String> {
    let ident =
        static_ident(&options.variable_name).ok_or_else(|| StackError::InvalidVariableName {
            name: options.variable_name.clone(),
        })?;

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "// Embedded files for crate `{}`.",
        escape_comment(&options.package_name)
    );
    let _ = writeln!(out, "// Code generated by tplstack. DO NOT EDIT.");
    out.push('\n');
    let _ = writeln!(
        out,
        "/// `{}` is the auto-generated file table, sorted by path.",
        ident
    );
    let _ = writeln!(out, "pub static {}: &[(&str, &[u8])] = &[", ident);
    for (key, content) in sorted_entries(table) {
        let _ = writeln!(out, "    // {}", escape_comment(key));
        let _ = writeln!(
            out,
            "    (\"{}\", {}),",
            escape_str(key),
            Literal::from_content(content).to_expr()
        );
    }
    out.push_str("];\n");

    Ok(out)
}

/// Render the module and pass it through the canonicalizer
pub fn emit(
    options: &EmitOptions,
    table: &ContentTable,
    canonicalizer: &dyn Canonicalize,
) -> StackResult<String> {
    let raw = render(options, table)?;
    tracing::debug!(
        entries = table.len(),
        bytes = raw.len(),
        "rendered generated module"
    );
    canonicalizer.canonicalize(&raw)
}

/// Read the table back out of a generated module
///
/// Looks for the first `static` whose initializer is a slice of
/// `(key, value)` tuples as written by [`emit`].
pub fn decode(source: &str) -> StackResult<BTreeMap<String, Vec<u8>>> {
    let file = syn::parse_file(source).map_err(|e| StackError::EmissionSyntax {
        message: e.to_string(),
        source_text: source.to_string(),
    })?;

    let array = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Static(item) => match item.expr.as_ref() {
                syn::Expr::Reference(reference) => match reference.expr.as_ref() {
                    syn::Expr::Array(array) => Some(array),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .ok_or_else(|| decode_error("no static table found"))?;

    let mut table = BTreeMap::new();
    for (idx, elem) in array.elems.iter().enumerate() {
        let syn::Expr::Tuple(tuple) = elem else {
            return Err(decode_error(format!("entry {} is not a tuple", idx)));
        };
        if tuple.elems.len() != 2 {
            return Err(decode_error(format!("entry {} is not a pair", idx)));
        }
        let key = match &tuple.elems[0] {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(key),
                ..
            }) => key.value(),
            _ => return Err(decode_error(format!("entry {} has no string key", idx))),
        };
        let value = decode_value(&tuple.elems[1])
            .ok_or_else(|| decode_error(format!("entry `{}` has an unsupported value", key)))?;
        table.insert(key, value);
    }

    Ok(table)
}

fn decode_value(expr: &syn::Expr) -> Option<Vec<u8>> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::ByteStr(bytes),
            ..
        }) => Some(bytes.value()),
        syn::Expr::MethodCall(call) if call.method == "as_bytes" && call.args.is_empty() => {
            match call.receiver.as_ref() {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(text),
                    ..
                }) => Some(text.value().into_bytes()),
                _ => None,
            }
        }
        _ => None,
    }
}

fn decode_error(message: impl Into<String>) -> StackError {
    StackError::Decode {
        message: message.into(),
    }
}
