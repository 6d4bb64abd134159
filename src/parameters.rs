//! Parameter resolution against a generator's declared variables.
//!
//! Resolution with fallback fills in defaults without validating them, since
//! defaults are placeholders that may legitimately violate their own pattern.
//! Validation resolves the same way, then enforces required-ness and patterns.

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::spec::{GeneratorSpec, Parameters, Value, VariableSpec};
use log::debug;
use regex::Regex;

/// Renders a string default as a standalone template with an empty context.
fn render_default(renderer: &dyn TemplateRenderer, name: &str, default: &str) -> Result<Value> {
    renderer
        .render(default, &minijinja::context! {})
        .map(Value::String)
        .map_err(|source| Error::InvalidDefaultError { name: name.to_string(), source })
}

/// Computes the default of a variable: string defaults are rendered, structured
/// defaults pass through unrendered.
fn default_value(
    renderer: &dyn TemplateRenderer,
    name: &str,
    variable: &VariableSpec,
) -> Result<Option<Value>> {
    match &variable.default_value {
        Some(Value::String(default)) => render_default(renderer, name, default).map(Some),
        Some(structured) => Ok(Some(structured.clone())),
        None => Ok(None),
    }
}

/// Builds a value for every declared variable from `supplied`, falling back to defaults.
///
/// # Arguments
/// * `renderer` - Renders string defaults
/// * `spec` - Generator whose variables are resolved
/// * `supplied` - Values given by the caller, used verbatim
/// * `nil_default` - Value for variables with neither a supplied value nor a default;
///   `None` leaves them out so validation reports them as missing
///
/// # Errors
/// * `Error::InvalidDefaultError` if a string default is not a valid template
pub fn resolve_with_fallback(
    renderer: &dyn TemplateRenderer,
    spec: &GeneratorSpec,
    supplied: &Parameters,
    nil_default: Option<&Value>,
) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for (name, variable) in &spec.variables {
        let value = match supplied.get(name) {
            Some(value) => Some(value.clone()),
            None => default_value(renderer, name, variable)?.or_else(|| nil_default.cloned()),
        };
        if let Some(value) = value {
            parameters.insert(name.clone(), value);
        }
    }
    Ok(parameters)
}

/// Resolves every declared variable from `supplied` or its default and validates it.
///
/// # Errors
/// * `Error::MissingParameterError` if a variable has neither value nor default
/// * `Error::PatternMismatchError` if the stringified value does not fully match the pattern
/// * `Error::InvalidDefaultError` / `Error::InvalidPatternError` for a malformed generator spec
pub fn resolve_and_validate(
    renderer: &dyn TemplateRenderer,
    spec: &GeneratorSpec,
    supplied: &Parameters,
) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for (name, variable) in &spec.variables {
        let value = match supplied.get(name) {
            Some(value) => value.clone(),
            None => default_value(renderer, name, variable)?
                .ok_or_else(|| Error::MissingParameterError(name.clone()))?,
        };

        if !variable.validation_pattern.is_empty() {
            validate_pattern(name, &variable.validation_pattern, &value)?;
        }
        parameters.insert(name.clone(), value);
    }
    debug!("Validated {} parameters", parameters.len());
    Ok(parameters)
}

fn validate_pattern(name: &str, pattern: &str, value: &Value) -> Result<()> {
    let regex = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|source| Error::InvalidPatternError { name: name.to_string(), source })?;
    if !regex.is_match(&value.to_string()) {
        return Err(Error::PatternMismatchError {
            name: name.to_string(),
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Fails on the first supplied key that the generator does not declare.
pub fn reject_unknown(spec: &GeneratorSpec, supplied: &Parameters) -> Result<()> {
    match supplied.keys().find(|key| !spec.variables.contains_key(*key)) {
        Some(key) => Err(Error::UnknownParameterError(key.clone())),
        None => Ok(()),
    }
}
