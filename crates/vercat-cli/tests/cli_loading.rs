//! Loading declarations and config files, and rendering catalog output

use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vercat::{
    build_catalog, load_declarations, render_fingerprints, render_plan, render_resolved, Config,
    OutputFormat, DEFAULT_CONFIG_FILE,
};
use vercat_accessors::CatalogOptions;
use vercat_core::DeclarationKind;

const DECLARATIONS: &str = r#"[
  { "name": "junit", "kind": "library", "group": "junit", "artifact": "junit", "version": "4.13.2" },
  { "name": "androidx.compose.ui", "kind": "library", "group": "androidx.compose.ui", "artifact": "ui" },
  { "name": "androidx.compose.ui.tooling", "kind": "library", "group": "androidx.compose.ui", "artifact": "ui-tooling" },
  { "name": "agp", "kind": "version", "required": "8.3.1" },
  { "name": "compose", "kind": "bundle", "members": ["androidx.compose.ui", "androidx.compose.ui.tooling"] },
  { "name": "android.application", "kind": "plugin", "id": "com.android.application", "version": "8.3.1" }
]"#;

fn write_declarations(dir: &TempDir, content: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join("declarations.json");
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_load_declarations() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_declarations(&dir, DECLARATIONS)?;

    let set = load_declarations(&path)?;
    assert_eq!(set.len(), 6);
    assert_eq!(set.of_kind(DeclarationKind::Library).count(), 3);
    assert_eq!(set.of_kind(DeclarationKind::Plugin).count(), 1);
    Ok(())
}

#[test]
fn test_load_declarations_reports_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_declarations(&dir, r#"[{ "name": "junit", "kind": "widget" }]"#)?;

    let err = load_declarations(&path).unwrap_err();
    assert!(format!("{}", err).contains("declarations.json"));

    let missing = dir.path().join("missing.json");
    assert!(load_declarations(&missing).is_err());
    Ok(())
}

#[test]
fn test_config_discovery() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    // No file: defaults
    let config = Config::discover(None, dir.path())?;
    assert_eq!(config.catalog, CatalogOptions::default());

    fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "[catalog]\nname = \"testLibs\"\nsource = \"gradle/test.versions.toml\"\n",
    )?;
    let config = Config::discover(None, dir.path())?;
    assert_eq!(config.catalog.name, "testLibs");
    assert_eq!(config.catalog.source, "gradle/test.versions.toml");

    // Partial tables keep the remaining defaults
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[catalog]\nname = \"tools\"\n")?;
    let config = Config::discover(Some(&explicit), dir.path())?;
    assert_eq!(config.catalog.name, "tools");
    assert_eq!(config.catalog.source, "libs.versions.toml");
    Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("nope.toml");
    assert!(Config::discover(Some(&missing), dir.path()).is_err());
    Ok(())
}

#[test]
fn test_name_override() {
    let config = Config::default().with_name(Some("deps".to_string()));
    assert_eq!(config.catalog.name, "deps");

    let config = Config::default().with_name(None);
    assert_eq!(config.catalog.name, "libs");
}

#[test]
fn test_render_resolved() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let set = load_declarations(&write_declarations(&dir, DECLARATIONS)?)?;
    let catalog = build_catalog(&Config::default(), &set)?;

    assert_eq!(
        render_resolved(&catalog, DeclarationKind::Library, "junit")?,
        "junit:junit:4.13.2"
    );
    assert_eq!(
        render_resolved(&catalog, DeclarationKind::Library, "androidx.compose.ui")?,
        "androidx.compose.ui:ui"
    );
    assert_eq!(render_resolved(&catalog, DeclarationKind::Version, "agp")?, "8.3.1");
    assert_eq!(
        render_resolved(&catalog, DeclarationKind::Plugin, "android.application")?,
        "com.android.application:8.3.1"
    );

    let err = render_resolved(&catalog, DeclarationKind::Library, "androidx.material").unwrap_err();
    assert!(err.to_string().contains("'material'"));
    Ok(())
}

#[test]
fn test_render_plan_formats() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let set = load_declarations(&write_declarations(&dir, DECLARATIONS)?)?;
    let config = Config::default().with_name(Some("deps".to_string()));
    let catalog = build_catalog(&config, &set)?;

    let outline = render_plan(&catalog, OutputFormat::Outline)?;
    assert!(outline.starts_with("LibrariesForDeps (deps)\n"));
    assert!(outline.contains("asProvider() -> androidx.compose.ui"));

    let json: serde_json::Value = serde_json::from_str(&render_plan(&catalog, OutputFormat::Json)?)?;
    assert_eq!(json["name"], "deps");
    assert_eq!(json["type_name"], "LibrariesForDeps");
    assert_eq!(json["kinds"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[test]
fn test_render_fingerprints() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let set = load_declarations(&write_declarations(&dir, DECLARATIONS)?)?;
    let catalog = build_catalog(&Config::default(), &set)?;

    let rendered = render_fingerprints(&catalog);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("library"));
    assert!(lines[3].starts_with("plugin"));
    for (line, fingerprint) in lines.iter().zip(catalog.fingerprints()) {
        assert!(line.ends_with(&fingerprint.hash));
    }
    Ok(())
}

#[test]
fn test_build_errors_name_the_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_declarations(
        &dir,
        r#"[
          { "name": "foo-bar", "kind": "library", "group": "g", "artifact": "a" },
          { "name": "foo_bar", "kind": "library", "group": "g", "artifact": "b" }
        ]"#,
    )?;
    let set = load_declarations(&path)?;

    let err = build_catalog(&Config::default(), &set).unwrap_err();
    assert!(err.to_string().contains("'libs'"));
    assert!(format!("{:#}", err).contains("fooBar"));
    Ok(())
}

#[test]
fn test_catalog_name_from_flag_or_config_is_validated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let set = load_declarations(&write_declarations(&dir, DECLARATIONS)?)?;

    for name in ["", "my.libs", "my libs"] {
        let config = Config::default().with_name(Some(name.to_string()));
        let err = build_catalog(&config, &set).unwrap_err();
        assert!(
            format!("{:#}", err).contains("Invalid catalog name"),
            "expected rejection of {:?}, got {:#}",
            name,
            err
        );
    }

    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[catalog]\nname = \"my.libs\"\n")?;
    let config = Config::discover(None, dir.path())?;
    assert!(build_catalog(&config, &set).is_err());
    Ok(())
}
