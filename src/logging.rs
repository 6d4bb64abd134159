//! Call-boundary logging for any [`Api`] implementation.

use crate::api::{Api, Request, Response};
use crate::error::Result;
use crate::spec::{GeneratorSpec, Parameters};
use log::{debug, info, warn};
use std::path::Path;

/// Wraps an [`Api`] and logs entry and outcome of every call.
pub struct LoggingApi<A: Api> {
    wrapped: A,
}

impl<A: Api> LoggingApi<A> {
    pub fn new(wrapped: A) -> Self {
        Self { wrapped }
    }

    pub fn into_inner(self) -> A {
        self.wrapped
    }
}

fn log_result<T>(operation: &str, result: &Result<T>) {
    match result {
        Ok(_) => info!("{operation} successful"),
        Err(err) => warn!("{operation} failed: {err}"),
    }
}

fn log_response(operation: &str, response: &Response) {
    if response.success {
        info!("{operation} successful ({} files)", response.rendered_files.len());
        return;
    }
    for err in &response.errors {
        warn!("{operation} failed: {err}");
    }
    for file in response.rendered_files.iter().filter(|file| !file.success) {
        warn!("{operation} failed for {}", file.relative_file_path);
    }
}

impl<A: Api> Api for LoggingApi<A> {
    fn find_generator_names(&self, source_base_dir: &Path) -> Result<Vec<String>> {
        debug!("FindGeneratorNames(sourceDir={})", source_base_dir.display());
        let result = self.wrapped.find_generator_names(source_base_dir);
        log_result("FindGeneratorNames", &result);
        result
    }

    fn obtain_generator_spec(
        &self,
        source_base_dir: &Path,
        generator_name: &str,
    ) -> Result<GeneratorSpec> {
        debug!(
            "ObtainGeneratorSpec(sourceDir={}, generator={generator_name})",
            source_base_dir.display()
        );
        let result = self.wrapped.obtain_generator_spec(source_base_dir, generator_name);
        log_result("ObtainGeneratorSpec", &result);
        result
    }

    fn write_render_spec_with_defaults(&self, request: &Request, generator_name: &str) -> Response {
        debug!("WriteRenderSpecWithDefaults(request={request:?}, generator={generator_name})");
        let response = self.wrapped.write_render_spec_with_defaults(request, generator_name);
        log_response("WriteRenderSpecWithDefaults", &response);
        response
    }

    fn write_render_spec_with_values(
        &self,
        request: &Request,
        generator_name: &str,
        parameters: &Parameters,
    ) -> Response {
        debug!(
            "WriteRenderSpecWithValues(request={request:?}, generator={generator_name}, parameters={:?})",
            parameters.keys().collect::<Vec<_>>()
        );
        let response =
            self.wrapped.write_render_spec_with_values(request, generator_name, parameters);
        log_response("WriteRenderSpecWithValues", &response);
        response
    }

    fn render(&self, request: &Request) -> Response {
        debug!("Render(request={request:?})");
        let response = self.wrapped.render(request);
        log_response("Render", &response);
        response
    }
}
