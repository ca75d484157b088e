use std::fs;

use tempfile::tempdir;

use living_archive::{ArchiveError, OutputFormat, catalog::Region};
use living_archive_cli::{Args, Command, error_adapter::to_reportables, execute, run};

fn args(command: Command) -> Args {
    Args {
        dataset: None,
        config: None,
        log_level: "off".to_string(),
        command,
    }
}

/// Runs `args` and returns what it printed.
fn output(args: &Args) -> Result<String, ArchiveError> {
    let mut out = Vec::new();
    execute(args, &mut out)?;
    Ok(String::from_utf8(out).expect("reports are UTF-8"))
}

#[test]
fn e2e_smoke_test_every_lineage_renders() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let entities = living_archive_dataset::bundled().expect("bundled dataset loads");

    let mut failed = Vec::new();
    for entity in &entities {
        for format in [OutputFormat::Svg, OutputFormat::Text] {
            let output_path = temp_dir
                .path()
                .join(format!("{}.{format}", entity.name().replace(' ', "_")));

            let args = args(Command::Lineage {
                name: entity.name().to_string(),
                format,
                output: Some(output_path.to_string_lossy().to_string()),
            });

            match run(&args) {
                Ok(()) => assert!(output_path.exists()),
                Err(e) => failed.push((entity.name().to_string(), format, e)),
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nLineages that failed:");
        for (name, format, err) in &failed {
            eprintln!("  - {name} ({format}): {err}");
        }
        panic!("{} lineage(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_lineage_text_to_stdout() {
    let printed = output(&args(Command::Lineage {
        name: "anansi".to_string(),
        format: OutputFormat::Text,
        output: None,
    }))
    .unwrap();

    assert!(printed.contains("ANANSI"));
    assert!(printed.contains("NYAME"));
    assert!(printed.contains("ASO"));
    assert!(printed.contains("(UNKNOWN)"));
    assert!(printed.contains("NTIKUMA"));
}

#[test]
fn e2e_unknown_entity_fails() {
    let err = output(&args(Command::Show {
        name: "Nobody".to_string(),
    }))
    .unwrap_err();

    assert!(matches!(err, ArchiveError::EntityNotFound(_)));
    assert_eq!(to_reportables(&err).len(), 1);
}

#[test]
fn e2e_browsing_commands() {
    let search = output(&args(Command::Search {
        query: "thunder".to_string(),
    }))
    .unwrap();
    assert!(search.contains("Sango (Divinity)"));

    let show = output(&args(Command::Show {
        name: "SANGO".to_string(),
    }))
    .unwrap();
    assert!(show.starts_with("SANGO\n"));
    assert!(show.contains("Oya, Osun, Oba"));

    let types = output(&args(Command::Types { entity_type: None })).unwrap();
    assert_eq!(types.lines().count(), 3);
    assert!(types.contains("The Divinities"));

    let region = output(&args(Command::Region {
        region: Region::WestAfrica,
        ethnicity: Some("Akan".to_string()),
    }))
    .unwrap();
    assert!(region.starts_with("West Africa\n"));
    assert!(region.contains("Anansi"));
    assert!(!region.contains("Sango"));

    let pantheons = output(&args(Command::Pantheons)).unwrap();
    assert!(pantheons.starts_with("Akan (7)"));

    let random = output(&args(Command::Random)).unwrap();
    assert!(!random.is_empty());
}

#[test]
fn e2e_normalize_round_trip() {
    let temp_dir = tempdir().unwrap();
    let first = temp_dir.path().join("normalized.json");
    let second = temp_dir.path().join("normalized-again.json");

    run(&args(Command::Normalize {
        output: first.to_string_lossy().to_string(),
    }))
    .unwrap();

    let mut again = args(Command::Normalize {
        output: second.to_string_lossy().to_string(),
    });
    again.dataset = Some(first.to_string_lossy().to_string());
    run(&again).unwrap();

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn e2e_custom_dataset_with_syntax_error() {
    let temp_dir = tempdir().unwrap();
    let dataset = temp_dir.path().join("broken.json");
    fs::write(&dataset, "[\n  {\"name\": \"Anansi\", \"entity_type\": \"Hero\"},\n]").unwrap();

    let mut broken = args(Command::Pantheons);
    broken.dataset = Some(dataset.to_string_lossy().to_string());

    let err = output(&broken).unwrap_err();
    let reportables = to_reportables(&err);
    assert_eq!(reportables.len(), 1);

    use miette::Diagnostic;
    assert!(reportables[0].source_code().is_some());
    assert!(reportables[0].labels().is_some());
}

#[test]
fn e2e_custom_dataset_lineage() {
    let temp_dir = tempdir().unwrap();
    let dataset = temp_dir.path().join("family.json");
    fs::write(
        &dataset,
        r#"[
            {"name": "Oduduwa", "entity_type": "Divinity",
             "relations": {"descendants": ["Oranmiyan", "Olowu", "Onipopo"]}},
            {"name": "Oranmiyan", "entity_type": "Hero"}
        ]"#,
    )
    .unwrap();

    let mut lineage = args(Command::Lineage {
        name: "Oduduwa".to_string(),
        format: OutputFormat::Text,
        output: None,
    });
    lineage.dataset = Some(dataset.to_string_lossy().to_string());

    let printed = output(&lineage).unwrap();
    assert!(printed.contains("ORANMIYAN"));
    assert!(printed.contains("(HERO)"));
    assert_eq!(printed.matches("(UNKNOWN)").count(), 2);
}

#[test]
fn e2e_image_coverage_commands() {
    let analyze = output(&args(Command::Analyze)).unwrap();
    assert!(analyze.contains("Total entities     20\n"));
    assert!(analyze.contains("Missing images     20\n"));
    assert!(analyze.contains("Visual coverage    0.0%\n"));

    let missing = output(&args(Command::ListMissing)).unwrap();
    assert!(missing.starts_with("Entities requiring visualization (20):\n"));
    assert_eq!(missing.lines().count(), 21);

    let preview = output(&args(Command::Preview {
        name: "anansi".to_string(),
        style: None,
    }))
    .unwrap();
    assert_eq!(
        preview,
        "Archival portrait of Anansi, trickster and keeper of stories of the Akan tradition\n"
    );
}

#[test]
fn e2e_custom_dataset_prompt_styles() {
    let temp_dir = tempdir().unwrap();
    let dataset = temp_dir.path().join("styled.json");
    fs::write(
        &dataset,
        r#"[
            {"name": "Mami Wata", "entity_type": "Divinity",
             "appearance": {"imageUrl": "https://example.org/mami-wata.png"},
             "rendering": {
                 "prompt_canon": "Water spirit with a python, canon",
                 "prompt_variants": [
                     {"style_id": "woodcut", "label": "Woodcut", "prompt": "Water spirit, woodcut"}
                 ]
             }},
            {"name": "Ninki Nanka", "entity_type": "Creature"}
        ]"#,
    )
    .unwrap();
    let with_dataset = |command: Command| {
        let mut args = args(command);
        args.dataset = Some(dataset.to_string_lossy().to_string());
        args
    };

    let analyze = output(&with_dataset(Command::Analyze)).unwrap();
    assert!(analyze.contains("Visual coverage    50.0%\n"));

    let missing = output(&with_dataset(Command::ListMissing)).unwrap();
    assert!(missing.contains("Ninki Nanka"));
    assert!(!missing.contains("Mami Wata"));

    let preview = |style: Option<&str>| {
        output(&with_dataset(Command::Preview {
            name: "Mami Wata".to_string(),
            style: style.map(str::to_string),
        }))
    };
    assert_eq!(preview(Some("woodcut")).unwrap(), "Water spirit, woodcut\n");
    assert_eq!(
        preview(Some("anime")).unwrap(),
        "Water spirit with a python, canon\n"
    );

    let err = output(&with_dataset(Command::Preview {
        name: "Ninki Nanka".to_string(),
        style: None,
    }))
    .unwrap_err();
    assert!(matches!(err, ArchiveError::MissingPrompt(_)));
}
