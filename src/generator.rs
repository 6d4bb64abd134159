//! Render orchestration.
//! Drives a full render: loads the render spec and generator, resolves and validates
//! parameters, then renders every template unit into the target directory while
//! collecting a result per output file.

use crate::api::{Api, FileResult, Request, Response};
use crate::constants::{ITEM_KEY, SKIP_VALUES};
use crate::error::{Error, Result};
use crate::parameters::{reject_unknown, resolve_and_validate, resolve_with_fallback};
use crate::renderer::{MiniJinjaRenderer, Template, TemplateRenderer};
use crate::repository::{GeneratorDirectory, GeneratorSource, TargetDirectory, TargetStorage};
use crate::spec::{GeneratorSpec, Parameters, RenderSpec, TemplateSpec, Value};
use log::{debug, warn};
use std::path::Path;

/// The render pipeline. Holds no state across calls besides its renderer.
pub struct Generator {
    renderer: Box<dyn TemplateRenderer>,
}

impl Generator {
    pub fn new() -> Self {
        Self::with_renderer(Box::new(MiniJinjaRenderer::new()))
    }

    pub fn with_renderer(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Resolves parameters for `generator_name` and persists them as a render spec.
    ///
    /// With `supplied == None` every variable gets its default (or `""` when it has
    /// none) and nothing is validated. With supplied values, unknown names are
    /// rejected first, missing variables are left absent, and the result must pass
    /// validation before anything is written.
    pub fn write_render_spec_with(
        &self,
        source: &dyn GeneratorSource,
        target: &dyn TargetStorage,
        render_spec_file: Option<&str>,
        generator_name: &str,
        supplied: Option<&Parameters>,
    ) -> Result<Vec<FileResult>> {
        let spec = source.obtain_generator_spec(generator_name)?;

        let parameters = match supplied {
            None => {
                let empty = Value::from("");
                resolve_with_fallback(&*self.renderer, &spec, &Parameters::new(), Some(&empty))?
            }
            Some(supplied) => {
                reject_unknown(&spec, supplied)?;
                let resolved = resolve_with_fallback(&*self.renderer, &spec, supplied, None)?;
                resolve_and_validate(&*self.renderer, &spec, &resolved)?;
                resolved
            }
        };

        let render_spec = RenderSpec { generator_name: generator_name.to_string(), parameters };
        let file = target.write_render_spec(&render_spec, render_spec_file)?;
        Ok(vec![FileResult::success(file)])
    }

    /// Renders the generator named by the stored render spec.
    ///
    /// # Returns
    /// * `Ok` with one result per emitted file (skipped iterations emit none)
    /// * `Err` for failures before any template is processed
    pub fn render_with(
        &self,
        source: &dyn GeneratorSource,
        target: &dyn TargetStorage,
        render_spec_file: Option<&str>,
    ) -> Result<Vec<FileResult>> {
        let render_spec = target.obtain_render_spec(render_spec_file)?;
        let spec = source.obtain_generator_spec(&render_spec.generator_name)?;

        reject_unknown(&spec, &render_spec.parameters)?;
        let parameters = resolve_and_validate(&*self.renderer, &spec, &render_spec.parameters)?;

        debug!(
            "Rendering {} templates of generator '{}'",
            spec.templates.len(),
            render_spec.generator_name
        );
        Ok(self.render_all_templates(&spec, &parameters, source, target))
    }

    fn render_all_templates(
        &self,
        spec: &GeneratorSpec,
        parameters: &Parameters,
        source: &dyn GeneratorSource,
        target: &dyn TargetStorage,
    ) -> Vec<FileResult> {
        spec.templates
            .iter()
            .flat_map(|template| self.render_single_template(template, parameters, source, target))
            .collect()
    }

    fn render_single_template(
        &self,
        template: &TemplateSpec,
        parameters: &Parameters,
        source: &dyn GeneratorSource,
        target: &dyn TargetStorage,
    ) -> Vec<FileResult> {
        let path = &template.relative_source_path;
        debug!("Processing template: {path}");

        let unit = source
            .read_file(path)
            .and_then(|contents| self.renderer.parse(path, contents, template.just_copy));
        let unit = match unit {
            Ok(unit) => unit,
            Err(err) => {
                warn!("{err}");
                return vec![FileResult::failure(&template.relative_target_path, err)];
            }
        };

        if template.with_items.is_empty() {
            let context = minijinja::Value::from_serialize(parameters);
            return self
                .render_iteration(template, &unit, &context, "", target)
                .into_iter()
                .collect();
        }

        template
            .with_items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                // Derived from the base parameters each pass so nothing leaks between items.
                let mut overlay = parameters.clone();
                overlay.insert(ITEM_KEY.to_string(), item.clone());
                let context = minijinja::Value::from_serialize(&overlay);
                let label = format!(" for item #{}", idx + 1);
                self.render_iteration(template, &unit, &context, &label, target)
            })
            .collect()
    }

    /// Renders one output of a template unit. `None` means the condition skipped it.
    fn render_iteration(
        &self,
        template: &TemplateSpec,
        unit: &Template,
        context: &minijinja::Value,
        item: &str,
        target: &dyn TargetStorage,
    ) -> Option<FileResult> {
        let target_path = match self.renderer.render(&template.relative_target_path, context) {
            Ok(path) => path,
            Err(source) => {
                let err = Error::PathRenderError {
                    path: template.relative_target_path.clone(),
                    item: item.to_string(),
                    source,
                };
                warn!("{err}");
                return Some(FileResult::failure(&template.relative_target_path, err));
            }
        };

        match self.evaluate_condition(&template.condition, context) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Skipping {target_path}{item}: condition not met");
                return None;
            }
            Err(source) => {
                let err = Error::ConditionError {
                    condition: template.condition.clone(),
                    item: item.to_string(),
                    source,
                };
                warn!("{err}");
                return Some(FileResult::failure(target_path, err));
            }
        }

        let written = unit
            .render(context)
            .map_err(|source| Error::TemplateExecutionError {
                target: target_path.clone(),
                item: item.to_string(),
                source,
            })
            .and_then(|contents| target.write_file(&target_path, &contents));

        Some(match written {
            Ok(()) => FileResult::success(target_path),
            Err(err) => {
                warn!("{err}");
                FileResult::failure(target_path, err)
            }
        })
    }

    /// An empty condition is true; otherwise the rendered text is false only if it
    /// is exactly one of the skip values.
    fn evaluate_condition(
        &self,
        condition: &str,
        context: &minijinja::Value,
    ) -> std::result::Result<bool, minijinja::Error> {
        if condition.is_empty() {
            return Ok(true);
        }
        let rendered = self.renderer.render(condition, context)?;
        Ok(!SKIP_VALUES.contains(&rendered.as_str()))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new()
    }
}

impl Api for Generator {
    fn find_generator_names(&self, source_base_dir: &Path) -> Result<Vec<String>> {
        GeneratorDirectory::new(source_base_dir)?.find_generator_names()
    }

    fn obtain_generator_spec(
        &self,
        source_base_dir: &Path,
        generator_name: &str,
    ) -> Result<GeneratorSpec> {
        GeneratorDirectory::new(source_base_dir)?.obtain_generator_spec(generator_name)
    }

    fn write_render_spec_with_defaults(&self, request: &Request, generator_name: &str) -> Response {
        directories(request)
            .and_then(|(source, target)| {
                self.write_render_spec_with(
                    &source,
                    &target,
                    request.render_spec_file.as_deref(),
                    generator_name,
                    None,
                )
            })
            .into()
    }

    fn write_render_spec_with_values(
        &self,
        request: &Request,
        generator_name: &str,
        parameters: &Parameters,
    ) -> Response {
        directories(request)
            .and_then(|(source, target)| {
                self.write_render_spec_with(
                    &source,
                    &target,
                    request.render_spec_file.as_deref(),
                    generator_name,
                    Some(parameters),
                )
            })
            .into()
    }

    fn render(&self, request: &Request) -> Response {
        directories(request)
            .and_then(|(source, target)| {
                self.render_with(&source, &target, request.render_spec_file.as_deref())
            })
            .into()
    }
}

/// Validates both request directories before any I/O happens.
fn directories(request: &Request) -> Result<(GeneratorDirectory, TargetDirectory)> {
    Ok((
        GeneratorDirectory::new(&request.source_base_dir)?,
        TargetDirectory::new(&request.target_base_dir)?,
    ))
}
