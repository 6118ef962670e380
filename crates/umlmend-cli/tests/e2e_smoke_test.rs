use std::{fs, path::PathBuf};

use tempfile::tempdir;

use umlmend::{ValidationResult, validate};
use umlmend_cli::{Args, manifest::MANIFEST_FILE, run};

/// Collects all .txt files from a directory
fn collect_txt_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo inputs live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &str, output_dir: &str) -> Args {
    Args {
        input: input.to_string(),
        output_dir: output_dir.to_string(),
        config: None,
        max_attempts: None,
        prose: None,
        log_level: "off".to_string(),
    }
}

/// Written diagram files in output order, excluding the manifest
fn written_diagrams(dir: &PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("puml"))
        .collect();
    files.sort();
    files
}

#[test]
fn e2e_smoke_test_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_txt_files(demos_path());
    assert!(!demos.is_empty(), "No demo inputs found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        let output_dir = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().as_ref());

        let args = args(
            &demo_path.to_string_lossy(),
            &output_dir.to_string_lossy(),
        );

        if let Err(e) = run(&args) {
            failed_demos.push((demo_path.clone(), e.to_string()));
            continue;
        }

        assert!(output_dir.join(MANIFEST_FILE).is_file());
        for diagram_path in written_diagrams(&output_dir) {
            let text = fs::read_to_string(&diagram_path).unwrap();
            if validate(&text) != ValidationResult::Valid {
                failed_demos.push((diagram_path, "written diagram is invalid".to_string()));
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} demos passed", demos.len());
}

#[test]
fn e2e_manifest_and_prose() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let prose_path = temp_dir.path().join("prose.txt");
    let input = demos_path().join("hopeless.txt");

    let mut args = args(&input.to_string_lossy(), &output_dir.to_string_lossy());
    args.prose = Some(prose_path.to_string_lossy().to_string());
    run(&args).expect("run should succeed");

    // The empty fragment is dropped; the other one is replaced
    assert_eq!(written_diagrams(&output_dir).len(), 1);

    let manifest = fs::read_to_string(output_dir.join(MANIFEST_FILE)).unwrap();
    assert!(manifest.contains("outcome = \"fallback\""));
    assert!(manifest.contains("file = \"diagram-1.puml\""));

    let prose = fs::read_to_string(&prose_path).unwrap();
    assert!(prose.contains("I could not draw this one properly."));
    assert!(prose.contains("That is everything."));
    assert!(!prose.contains("@startuml"));
}

#[test]
fn e2e_max_attempts_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let input = demos_path().join("order_pipeline.txt");

    let mut args = args(&input.to_string_lossy(), &output_dir.to_string_lossy());
    args.max_attempts = Some(0);
    run(&args).expect("run should succeed");

    let manifest = fs::read_to_string(output_dir.join(MANIFEST_FILE)).unwrap();
    assert!(manifest.contains("attempts = 0"));
    assert!(!manifest.contains("outcome = \"healed\""));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.txt");
    let output_dir = temp_dir.path().join("out");

    let result = run(&args(&missing.to_string_lossy(), &output_dir.to_string_lossy()));

    assert!(matches!(result, Err(umlmend::UmlmendError::Io(_))));
}
