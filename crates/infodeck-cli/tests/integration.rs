//! Integration tests for the infodeck CLI commands
//!
//! Commands are driven through the library functions against scratch
//! directories.

use std::fs;
use std::io::Read;

use infodeck_cli::{
    check_command, cleanup_command, export_command, normalize_command, ExportArgs, OutputFormat,
};
use infodeck_export::{ExportFormat, ExportOptions};
use tempfile::TempDir;
use zip::ZipArchive;

const INFOGRAPHIC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="720" height="243">
  <rect x="0" y="0" width="720" height="243" fill="white"/>
  <foreignObject x="100" y="50" width="200" height="40">
    <span xmlns="http://www.w3.org/1999/xhtml" style="color:#1f6feb; font-size:20px; text-align:center; align-items:center;">增长 42%</span>
  </foreignObject>
</svg>"#;

const NATIVE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="20">Ready</text></svg>"#;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read_part(path: &std::path::Path, name: &str) -> String {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut contents = String::new();
    part.read_to_string(&mut contents).unwrap();
    contents
}

#[test]
fn export_pptx_writes_deck_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "chart.svg", INFOGRAPHIC);
    let out = dir.path().join("exports");

    let args = ExportArgs::new(&input, ExportFormat::Pptx)
        .with_output_dir(&out)
        .with_options(
            ExportOptions::new()
                .with_filename("quarterly")
                .with_title("Q1"),
        );
    let result = export_command(&args).unwrap();

    assert_eq!(result.identifier, "quarterly.pptx");
    assert_eq!(result.storage_path, out.join("quarterly.pptx"));
    assert!(result.storage_path.is_file());

    let svg = read_part(&result.storage_path, "ppt/media/image1.svg");
    assert!(!svg.contains("foreignObject"));
    assert!(svg.contains(">增长 42%</text>"));

    let slide = read_part(&result.storage_path, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:t>Q1</a:t>"));
    assert!(slide.contains("<p:pic "));
}

#[test]
fn export_svg_with_normalization() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "chart.svg", INFOGRAPHIC);

    let args = ExportArgs::new(&input, ExportFormat::Svg)
        .with_output_dir(dir.path().join("exports"))
        .with_options(ExportOptions::new().with_normalize_text(true));
    let result = export_command(&args).unwrap();

    assert!(result.identifier.ends_with(".svg"));
    let written = fs::read_to_string(&result.storage_path).unwrap();
    assert!(written.contains("<text "));
    assert!(written.contains(r#"text-anchor="middle""#));
}

#[test]
fn export_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "chart.svg", NATIVE);
    let out = dir.path().join("configured");
    let config = write_input(
        &dir,
        "infodeck.toml",
        &format!(
            "[output]\ndir = {:?}\nstem = \"board\"\n",
            out.to_string_lossy()
        ),
    );

    let args = ExportArgs::new(&input, ExportFormat::Svg).with_config(&config);
    let result = export_command(&args).unwrap();

    assert!(result.identifier.starts_with("board-"));
    assert!(result.storage_path.starts_with(&out));
}

#[test]
fn export_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let args = ExportArgs::new(dir.path().join("absent.svg"), ExportFormat::Pptx)
        .with_output_dir(dir.path().join("exports"));

    let err = export_command(&args).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
    assert!(!dir.path().join("exports").exists());
}

#[test]
fn export_malformed_input_reports_code() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "broken.svg", "<svg><g></svg>");
    let args = ExportArgs::new(&input, ExportFormat::Pptx)
        .with_output_dir(dir.path().join("exports"));

    let err = export_command(&args).unwrap_err();
    assert!(format!("{:#}", err).contains("EXP001"));
}

#[test]
fn normalize_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "chart.svg", INFOGRAPHIC);
    let output = dir.path().join("clean.svg");

    let report = normalize_command(&input, Some(&output)).unwrap();
    assert_eq!(report.replaced, 1);
    assert_eq!(report.skipped, 0);

    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("foreignObject"));
    assert!(written.contains(r##"fill="#1f6feb""##));
}

#[test]
fn check_reports_foreign_objects() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "chart.svg", INFOGRAPHIC);

    let report = check_command(&input, OutputFormat::Json).unwrap();
    assert!(!report.compatible);
    assert_eq!(report.foreign_objects, 1);
    assert_eq!(report.spans, 1);
}

#[test]
fn check_accepts_native_text() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "native.svg", NATIVE);

    let report = check_command(&input, OutputFormat::Text).unwrap();
    assert!(report.compatible);
    assert_eq!(report.text_elements, 1);
}

#[test]
fn cleanup_removes_export_once() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "native.svg", NATIVE);
    let out = dir.path().join("exports");

    let result = export_command(
        &ExportArgs::new(&input, ExportFormat::Svg).with_output_dir(&out),
    )
    .unwrap();

    assert!(cleanup_command(&result.identifier, Some(&out), None).unwrap());
    assert!(!result.storage_path.exists());
    assert!(!cleanup_command(&result.identifier, Some(&out), None).unwrap());
}

#[test]
fn cleanup_rejects_traversal() {
    let dir = TempDir::new().unwrap();
    let err = cleanup_command("../secret.txt", Some(dir.path()), None).unwrap_err();
    assert!(format!("{:#}", err).contains("EXP008"));
}
