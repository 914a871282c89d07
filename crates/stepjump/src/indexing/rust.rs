//! Rust step implementation scanning.
//!
//! Source is parsed with `syn`. Every top-level function attribute whose
//! last path segment is `given`, `when`, `then` or `step` and whose first
//! argument is a string literal yields one occurrence, located on the
//! attribute line. Bare attributes and non-literal arguments
//! (`#[given(expr = "...")]`) are skipped.

use std::path::Path;

use syn::punctuated::Punctuated;
use syn::spanned::Spanned;

use super::{StepOccurrence, StepType};
use crate::error::SyntaxError;

/// Scan Rust source text for step implementations.
///
/// # Errors
///
/// Returns [`SyntaxError`] when the source cannot be parsed by `syn`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use stepjump::indexing::scan_rust_source;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = "#[given(\"a user named {name}\")]\nfn a_user(name: String) {}\n";
/// let steps = scan_rust_source(source, Path::new("steps.rs"))?;
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].description, "#[given(\"a user named {name}\")]");
/// assert_eq!(steps[0].line, 1);
/// # Ok(())
/// # }
/// ```
pub fn scan_rust_source(content: &str, filepath: &Path) -> Result<Vec<StepOccurrence>, SyntaxError> {
    let file = syn::parse_file(content).map_err(|err| SyntaxError {
        filepath: filepath.to_path_buf(),
        line: err.span().start().line.max(1),
        message: err.to_string(),
    })?;

    let steps: Vec<_> = file
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Fn(item_fn) => Some(item_fn),
            _ => None,
        })
        .flat_map(|item_fn| item_fn.attrs.iter())
        .filter_map(|attr| step_from_attribute(attr, filepath))
        .collect();

    tracing::debug!(path = %filepath.display(), steps = steps.len(), "scanned rust source");
    Ok(steps)
}

fn step_type_of(attr: &syn::Attribute) -> Option<StepType> {
    let ident = &attr.path().segments.last()?.ident;
    match ident.to_string().as_str() {
        "given" => Some(StepType::Given),
        "when" => Some(StepType::When),
        "then" => Some(StepType::Then),
        "step" => Some(StepType::Step),
        _ => None,
    }
}

/// The first positional argument, when it is a string literal.
fn pattern_literal(attr: &syn::Attribute) -> Option<String> {
    let list = attr.meta.require_list().ok()?;
    let args = list
        .parse_args_with(Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated)
        .ok()?;
    match args.first()? {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit),
            ..
        }) => Some(lit.value()),
        _ => None,
    }
}

fn step_from_attribute(attr: &syn::Attribute, filepath: &Path) -> Option<StepOccurrence> {
    let step_type = step_type_of(attr)?;
    let pattern = pattern_literal(attr)?;
    Some(StepOccurrence {
        step_type,
        description: format!("#[{step_type}({pattern:?})]"),
        name: pattern,
        filepath: filepath.to_path_buf(),
        line: attr.span().start().line,
    })
}
