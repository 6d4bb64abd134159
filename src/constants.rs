//! Common constants used throughout scaffolder.

/// Generator spec files are named `generator-<name>.yaml`
pub const GENERATOR_FILE_PREFIX: &str = "generator-";
pub const GENERATOR_FILE_SUFFIX: &str = ".yaml";

/// Render spec file written to the target directory unless the request overrides it
pub const DEFAULT_RENDER_SPEC_FILE: &str = "generated-main.yaml";

/// Parameter key holding the current element of a `with_items` iteration
pub const ITEM_KEY: &str = "item";

/// Rendered condition values that skip a template. Compared exactly and case-sensitively.
pub const SKIP_VALUES: [&str; 4] = ["false", "0", "no", "skip"];

pub(crate) fn generator_file_name(name: &str) -> String {
    format!("{GENERATOR_FILE_PREFIX}{name}{GENERATOR_FILE_SUFFIX}")
}
