use scaffolder::{
    api::{Request, Response},
    error::Error,
    render,
    spec::{Parameters, Value},
    write_render_spec_with_defaults, write_render_spec_with_values,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn request(dir: &str, target: &TempDir) -> Request {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(dir);
    Request::new(source, target.path())
}

fn params(entries: &[(&str, &str)]) -> Parameters {
    entries.iter().map(|(k, v)| (k.to_string(), Value::from(*v))).collect()
}

fn paths(response: &Response) -> Vec<&str> {
    response.rendered_files.iter().map(|file| file.relative_file_path.as_str()).collect()
}

fn read(target: &TempDir, path: &str) -> String {
    fs::read_to_string(target.path().join(path)).unwrap()
}

#[test_log::test]
fn test_render_greeting() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);

    let response = write_render_spec_with_values(&req, "greet", &params(&[("name", "Ada")]));
    assert!(response.success, "{:?}", response.errors);

    let response = render(&req);
    assert!(response.success);
    assert!(response.errors.is_empty());
    assert_eq!(paths(&response), vec!["greet.txt"]);
    assert!(response.rendered_files[0].success);
    assert_eq!(read(&target, "greet.txt"), "Hello Ada");
}

#[test_log::test]
fn test_render_with_items_in_order() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    assert!(write_render_spec_with_defaults(&req, "items").success);

    let response = render(&req);
    assert!(response.success);
    assert_eq!(paths(&response), vec!["out_1.txt", "out_2.txt", "out_3.txt"]);
    assert_eq!(read(&target, "out_2.txt"), "item 2\n");
}

#[test]
fn test_render_skip_values_are_exact() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    assert!(write_render_spec_with_defaults(&req, "conditions").success);

    let response = render(&req);
    assert!(response.success);
    assert_eq!(
        paths(&response),
        vec!["cond_true.txt", "cond_1.txt", "cond_anything.txt", "cond_False.txt", "cond_SKIP.txt"]
    );
    assert!(!target.path().join("cond_skip.txt").exists());
    assert!(!target.path().join("flag.txt").exists());
}

#[test]
fn test_render_condition_from_parameter() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    let mut supplied = Parameters::new();
    supplied.insert("enabled".to_string(), Value::Bool(true));
    assert!(write_render_spec_with_values(&req, "conditions", &supplied).success);

    let response = render(&req);
    assert!(response.success);
    assert_eq!(paths(&response).last(), Some(&"flag.txt"));
}

#[test_log::test]
fn test_render_full_generator() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    assert!(write_render_spec_with_defaults(&req, "full").success);

    let response = render(&req);
    assert!(response.success, "{:?}", response.rendered_files);
    assert_eq!(
        paths(&response),
        vec!["services/order_item.go", "services/user_account.go", "raw/my-service.txt"]
    );
    assert_eq!(
        read(&target, "services/order_item.go"),
        "package my_service\n\n// OrderItem listens on 8080, 9090\n"
    );
    assert_eq!(read(&target, "raw/my-service.txt"), "raw {{ serviceName }} {% not a template\n");
    assert!(!target.path().join("services/legacy.go").exists());
    assert!(!target.path().join("README.md").exists());
}

#[test]
fn test_render_full_generator_with_values() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    let response = write_render_spec_with_values(
        &req,
        "full",
        &params(&[("serviceName", "billing"), ("readme", "yes")]),
    );
    assert!(response.success, "{:?}", response.errors);

    let response = render(&req);
    assert!(response.success);
    assert_eq!(paths(&response).last(), Some(&"README.md"));
    assert_eq!(read(&target, "README.md"), "# Billing\n");
    assert!(target.path().join("raw/billing.txt").exists());
}

#[test]
fn test_render_structured_defaults() {
    let target = TempDir::new().unwrap();
    let req = request("valid-generator-structured", &target);
    assert!(write_render_spec_with_defaults(&req, "main").success);

    let response = render(&req);
    assert!(response.success);
    assert_eq!(
        read(&target, "main.txt"),
        "hello world\n- one\n- two\n  - sub 1\n  - sub 2\nEuropean wildcat (felis silvestris)\n"
    );
}

#[test_log::test]
fn test_render_collects_per_file_failures() {
    let target = TempDir::new().unwrap();
    let req = request("render-failures", &target);
    assert!(write_render_spec_with_defaults(&req, "failures").success);

    let response = render(&req);
    assert!(!response.success);
    assert!(response.errors.is_empty());
    assert_eq!(
        paths(&response),
        vec!["missing.txt", "broken.txt", "{{ name", "exec.txt", "ok.txt"]
    );

    let files = &response.rendered_files;
    assert!(matches!(files[0].errors[..], [Error::FileReadError { .. }]));
    assert!(matches!(files[1].errors[..], [Error::TemplateParseError { .. }]));
    assert!(matches!(files[2].errors[..], [Error::PathRenderError { .. }]));
    assert!(matches!(files[3].errors[..], [Error::TemplateExecutionError { .. }]));
    assert!(files[..4].iter().all(|file| !file.success));
    assert!(files[4].success);

    assert_eq!(read(&target, "ok.txt"), "hello world");
    assert!(!target.path().join("exec.txt").exists());
}

#[test]
fn test_render_write_failure_is_scoped_to_file() {
    let target = TempDir::new().unwrap();
    let req = request("render-failures", &target);
    assert!(write_render_spec_with_defaults(&req, "collision").success);

    let response = render(&req);
    assert!(!response.success);
    assert!(response.errors.is_empty());
    assert_eq!(paths(&response), vec!["a.txt", "a.txt/b.txt", "c.txt"]);

    let files = &response.rendered_files;
    assert!(files[0].success);
    assert!(matches!(
        &files[1].errors[..],
        [Error::WriteError { path, .. }] if path == "a.txt/b.txt"
    ));
    assert!(files[2].success);
    assert_eq!(read(&target, "c.txt"), "hello world");
}

#[test]
fn test_render_missing_attribute_on_scalar_fails() {
    let target = TempDir::new().unwrap();
    let req = request("render-failures", &target);
    assert!(write_render_spec_with_defaults(&req, "attributes").success);

    let response = render(&req);
    assert!(!response.success);
    assert_eq!(paths(&response), vec!["{{ name.foo }}d.txt", "attribute.txt", "ok_abc.txt"]);

    let files = &response.rendered_files;
    assert!(matches!(files[0].errors[..], [Error::PathRenderError { .. }]));
    assert!(matches!(files[1].errors[..], [Error::TemplateExecutionError { .. }]));
    assert!(files[2].success);
    assert!(!target.path().join("d.txt").exists());
    assert!(!target.path().join("attribute.txt").exists());
}

#[test]
fn test_render_without_render_spec() {
    let target = TempDir::new().unwrap();
    let response = render(&request("render-features", &target));

    assert!(!response.success);
    assert!(response.rendered_files.is_empty());
    assert!(matches!(response.errors[..], [Error::ReadError { .. }]));
}

#[test]
fn test_render_validates_stored_parameters() {
    let target = TempDir::new().unwrap();
    let req = request("render-features", &target);
    // defaults are written unvalidated, so the placeholder fqdn only fails at render time
    assert!(write_render_spec_with_defaults(&req, "patterns").success);

    let response = render(&req);
    assert!(!response.success);
    assert!(matches!(response.errors[..], [Error::PatternMismatchError { .. }]));
}

#[test]
fn test_render_rejects_unknown_stored_parameter() {
    let target = TempDir::new().unwrap();
    fs::write(
        target.path().join("generated-main.yaml"),
        "generator: greet\nparameters:\n  name: Ada\n  color: blue\n",
    )
    .unwrap();

    let response = render(&request("render-features", &target));
    assert!(!response.success);
    assert!(matches!(&response.errors[..], [Error::UnknownParameterError(key)] if key == "color"));
}

#[test]
fn test_render_unknown_generator_in_render_spec() {
    let target = TempDir::new().unwrap();
    fs::write(target.path().join("generated-main.yaml"), "generator: gone\n").unwrap();

    let response = render(&request("render-features", &target));
    assert!(!response.success);
    assert!(matches!(response.errors[..], [Error::SpecLoadError { .. }]));
}
