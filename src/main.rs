//! Scaffolder's main application entry point.
//! Parses the command line, runs the selected operation through the logged API,
//! and reports per-file outcomes.

use scaffolder::{
    api::{Api, Response},
    cli::{build_request, get_args, load_parameters, Args, Command},
    error::{default_error_handler, Error, Result},
    new_generator,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err),
    }
}

/// Prints every file result and top-level error; returns the response's success flag.
fn report(response: &Response) -> bool {
    for file in &response.rendered_files {
        println!("{file}");
    }
    for err in &response.errors {
        eprintln!("{err}");
    }
    response.success
}

/// Main application logic execution.
///
/// # Returns
/// * `Result<bool>` - Whether the operation succeeded; `Err` for failures of the
///   listing and spec operations, which have no per-file report
fn run(args: Args) -> Result<bool> {
    let api = new_generator();

    match args.command {
        Command::List { source_dir } => {
            for name in api.find_generator_names(&source_dir)? {
                println!("{name}");
            }
            Ok(true)
        }
        Command::Show { source_dir, name } => {
            let spec = api.obtain_generator_spec(&source_dir, &name)?;
            let yaml = serde_yaml::to_string(&spec).map_err(Error::SerializeError)?;
            print!("{yaml}");
            Ok(true)
        }
        Command::Defaults { source_dir, target_dir, name, render_spec } => {
            let request = build_request(source_dir, target_dir, render_spec);
            Ok(report(&api.write_render_spec_with_defaults(&request, &name)))
        }
        Command::Values { source_dir, target_dir, name, params, values, render_spec } => {
            let parameters = load_parameters(values.as_ref(), &params)?;
            let request = build_request(source_dir, target_dir, render_spec);
            Ok(report(&api.write_render_spec_with_values(&request, &name, &parameters)))
        }
        Command::Render { source_dir, target_dir, render_spec } => {
            let request = build_request(source_dir, target_dir, render_spec);
            Ok(report(&api.render(&request)))
        }
    }
}
