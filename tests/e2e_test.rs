//! End-to-end tests for the cubedocs binary.

mod common;

use anyhow::Result;
use common::{SAMPLE_PAGES, create_test_site};
use std::fs;
use std::process::Command;

fn cubedocs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cubedocs"))
}

/// Tests full build execution generates valid output.
#[test]
fn test_build_e2e() -> Result<()> {
    // Arrange
    let site = create_test_site(SAMPLE_PAGES)?;
    let output = site.path().join("out");

    // Act
    let result = cubedocs()
        .arg("build")
        .arg(site.path())
        .arg("-o")
        .arg(&output)
        .output()?;

    // Assert
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8(result.stdout)?;
    assert!(stdout.contains("Generated 4 pages"), "{}", stdout);
    let index = fs::read_to_string(output.join("index.html"))?;
    assert!(index.contains("Cube Documentation"));
    Ok(())
}

/// Tests render prints the page selected by the location fragment.
#[test]
fn test_render_location_e2e() -> Result<()> {
    // Arrange
    let site = create_test_site(SAMPLE_PAGES)?;

    // Act
    let result = cubedocs()
        .arg("render")
        .arg(site.path())
        .args(["--location", "index.html#syntax"])
        .output()?;

    // Assert
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout)?;
    assert!(stdout.contains("<h1>Syntax</h1>"), "{}", stdout);
    assert!(stdout.contains("<iframe class=\"demo\""), "{}", stdout);
    Ok(())
}

/// Tests render of an unknown page prints the fallback message.
#[test]
fn test_render_missing_page_e2e() -> Result<()> {
    // Arrange
    let site = create_test_site(SAMPLE_PAGES)?;

    // Act
    let result = cubedocs()
        .arg("render")
        .arg(site.path())
        .args(["-l", "#does-not-exist"])
        .output()?;

    // Assert
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout)?;
    assert_eq!(stdout.trim_end(), cubedocs::LOAD_ERROR_HTML);
    Ok(())
}

/// Tests build rejects a directory without pages.
#[test]
fn test_build_invalid_root_e2e() -> Result<()> {
    // Arrange
    let dir = tempfile::TempDir::new()?;

    // Act
    let result = cubedocs().arg("build").arg(dir.path()).output()?;

    // Assert
    assert!(!result.status.success(), "Build without pages/ should fail");
    Ok(())
}

/// Tests the pipe subcommand relays interpreter output and exit status.
#[cfg(unix)]
#[test]
fn test_pipe_e2e() -> Result<()> {
    // Act: cat stands in for the interpreter
    let result = cubedocs().args(["pipe", "--program", "cat", "--dir", "."]).output()?;

    // Assert
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout)?;
    assert_eq!(stdout, "ls();command returned 0\n");
    Ok(())
}

/// Tests a missing interpreter is reported without failing.
#[test]
fn test_pipe_missing_program_e2e() -> Result<()> {
    // Act
    let result = cubedocs()
        .args(["pipe", "--program", "/nonexistent/cube", "--dir", "."])
        .output()?;

    // Assert
    assert!(result.status.success());
    assert!(result.stdout.is_empty());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Warning"));
    Ok(())
}
