use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use scribble::ScribbleError;
use scribble_cli::{Args, CliError, run};

/// Collects all .toml scene files from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not in the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        compact: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_scene_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No demo scenes found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.excalidraw",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let contents = fs::read_to_string(&output_path).expect("Output not written");
                let value: serde_json::Value =
                    serde_json::from_str(&contents).expect("Output is not valid JSON");
                assert_eq!(value["type"], "excalidraw");
                assert!(
                    !value["elements"].as_array().unwrap().is_empty(),
                    "{} produced no elements",
                    demo_path.display()
                );
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

/// Checks `err` against the failure a scene in demos/errors/ is written to
/// trigger. Returns `None` for a scene with no recorded expectation.
fn is_expected_failure(stem: &str, err: &CliError) -> Option<bool> {
    let matched = match stem {
        "bad_color" | "translucent_color" => {
            matches!(err, CliError::SceneSyntax { message: m, .. } if m.contains("invalid color"))
        }
        "unknown_kind" => {
            matches!(err, CliError::SceneSyntax { message: m, .. } if m.contains("hexagon"))
        }
        "duplicate_id" => {
            matches!(err, CliError::Document(ScribbleError::DuplicateId(id)) if id == "box")
        }
        "short_arrow" => matches!(err, CliError::Document(ScribbleError::TooFewPoints(1))),
        "duplicate_name" => matches!(err, CliError::DuplicateName(name) if name == "a"),
        "unknown_name" => matches!(err, CliError::UnknownName { name, .. } if name == "missing"),
        _ => return None,
    };
    Some(matched)
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_scene_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut mismatched = Vec::new();

    for demo_path in &error_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy();
        let output_path = temp_dir.path().join(format!("error_{stem}.excalidraw"));

        let outcome = match run(&args_for(demo_path, &output_path)) {
            Ok(()) => "succeeded".to_string(),
            Err(err) => match is_expected_failure(&stem, &err) {
                Some(true) => continue,
                Some(false) => format!("failed with the wrong error: {err:?}"),
                None => format!("has no expected error recorded: {err:?}"),
            },
        };
        mismatched.push((demo_path.clone(), outcome));
    }

    if !mismatched.is_empty() {
        eprintln!("\nError demos that did not fail as expected:");
        for (path, outcome) in &mismatched {
            eprintln!("  - {}: {}", path.display(), outcome);
        }
        panic!(
            "{} error demo(s) did not fail as expected",
            mismatched.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_compact_flag_and_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scene_path = temp_dir.path().join("scene.toml");
    let config_path = temp_dir.path().join("config.toml");
    let output_path = temp_dir.path().join("scene.excalidraw");

    fs::write(
        &scene_path,
        "[[element]]\nkind = \"rectangle\"\nx = 0\ny = 0\nwidth = 10\nheight = 10\n",
    )
    .unwrap();
    fs::write(&config_path, "[style]\nbackground_color = \"#123456\"\n").unwrap();

    let mut args = args_for(&scene_path, &output_path);
    args.config = Some(config_path.to_string_lossy().to_string());
    args.compact = true;
    run(&args).expect("Scene should build");

    let contents = fs::read_to_string(&output_path).unwrap();
    assert!(!contents.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["appState"]["viewBackgroundColor"], "#123456");
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("absent.toml");
    let output = temp_dir.path().join("out.excalidraw");

    let err = run(&args_for(&input, &output)).unwrap_err();
    assert!(matches!(err, CliError::ReadScene { .. }));
    assert!(!output.exists());
}
