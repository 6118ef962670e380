//! CLI logic for the Umlmend diagram healer.
//!
//! Reads generated text, heals every diagram fragment in it and writes the
//! results to an output directory together with a manifest.

pub mod error_adapter;
pub mod manifest;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use log::info;

use umlmend::{DiagramHealer, UmlmendError, export, strip_fragments};

use manifest::Manifest;

/// Input path selecting standard input.
const STDIN: &str = "-";

/// Run the Umlmend CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `UmlmendError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), UmlmendError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Processing generated text"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(max_attempts) = args.max_attempts {
        app_config = app_config.with_max_attempts(max_attempts);
    }

    let source = read_input(&args.input)?;

    let healer = DiagramHealer::new(app_config);
    let healed = healer.heal(&source);

    let output_dir = Path::new(&args.output_dir);
    let paths = export::write_diagrams(&healed, output_dir, healer.config().output())?;
    let manifest_path = Manifest::new(&healed, &paths).write(output_dir)?;

    info!(
        diagrams = paths.len(),
        manifest:% = manifest_path.display();
        "Diagrams exported successfully"
    );

    if let Some(prose) = &args.prose {
        fs::write(prose, strip_fragments(&source))?;
        info!(prose_file = prose; "Prose exported successfully");
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String, UmlmendError> {
    if input == STDIN {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}
