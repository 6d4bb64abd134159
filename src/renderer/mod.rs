//! Template rendering for scaffolder.
//!
//! Wraps MiniJinja behind the [`TemplateRenderer`] trait for the one-off strings of a
//! generator (target paths, conditions, string defaults) and provides [`Template`],
//! a parsed template unit that renders a source file body.
//!
//! - `filters`: helper filters registered on every environment

pub mod filters;

use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String, minijinja::Error>` - Rendered template string, or the
    ///   syntax or evaluation error that prevented it
    fn render(&self, template: &str, context: &minijinja::Value)
        -> std::result::Result<String, minijinja::Error>;

    /// Parses a template unit once so it can be rendered for several contexts.
    ///
    /// # Arguments
    /// * `name` - Name used in diagnostics
    /// * `source` - Raw template bytes
    /// * `just_copy` - Bypass parsing and copy the bytes through unchanged
    ///
    /// # Errors
    /// * `Error::TemplateParseError` if the source is not valid UTF-8 or not a valid template
    fn parse(&self, name: &str, source: Vec<u8>, just_copy: bool) -> Result<Template>;
}

/// MiniJinja-based template rendering engine.
#[derive(Clone)]
pub struct MiniJinjaRenderer {
    /// MiniJinja environment with the helper filters registered
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer with the helper filter library installed.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // Output is source code, never markup: no escaping regardless of file extension.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        // Printing or indexing into a missing value fails; `if` tests on it are false.
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);
        filters::register(&mut env);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &minijinja::Value,
    ) -> std::result::Result<String, minijinja::Error> {
        self.env.render_str(template, context)
    }

    fn parse(&self, name: &str, source: Vec<u8>, just_copy: bool) -> Result<Template> {
        if just_copy {
            return Ok(Template::Copy(source));
        }

        let text = String::from_utf8(source).map_err(|e| Error::TemplateParseError {
            path: name.to_string(),
            reason: e.to_string(),
        })?;

        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), text).map_err(|e| {
            Error::TemplateParseError { path: name.to_string(), reason: e.to_string() }
        })?;

        Ok(Template::Jinja { env, name: name.to_string() })
    }
}

/// A template unit ready to be rendered.
pub enum Template {
    /// Source bytes copied through unchanged; parameters are ignored.
    Copy(Vec<u8>),
    /// A parsed template registered under `name` in its own environment.
    Jinja { env: Environment<'static>, name: String },
}

impl Template {
    /// Renders the unit against `context` into a byte buffer.
    ///
    /// Rendering is a pure function of the template source and the context.
    pub fn render(
        &self,
        context: &minijinja::Value,
    ) -> std::result::Result<Vec<u8>, minijinja::Error> {
        match self {
            Template::Copy(bytes) => Ok(bytes.clone()),
            Template::Jinja { env, name } => {
                Ok(env.get_template(name)?.render(context)?.into_bytes())
            }
        }
    }
}
