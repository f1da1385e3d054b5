use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_missing_argument_prints_usage() {
    let work = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("pdfpix")
        .current_dir(work.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing PDF file"))
        .stderr(predicate::str::contains("Usage: pdfpix <path-to-pdf-file> [-b]"));

    assert!(!work.path().join("images").exists());
}

#[test]
fn test_nonexistent_pdf() {
    let work = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("pdfpix")
        .current_dir(work.path())
        .arg("nowhere.pdf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PDF file 'nowhere.pdf' does not exist"));

    assert!(!work.path().join("images").exists());
}

#[test]
fn test_nonexistent_pdf_in_buffered_mode() {
    let work = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("pdfpix")
        .current_dir(work.path())
        .args(["nowhere.pdf", "-b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_directory_is_rejected() {
    let work = tempfile::tempdir().unwrap();
    std::fs::create_dir(work.path().join("folder.pdf")).unwrap();

    cargo_bin_cmd!("pdfpix")
        .current_dir(work.path())
        .arg("folder.pdf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a file"));
}

#[test]
fn test_corrupt_pdf_keeps_previous_images() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("broken.pdf"), b"this is not a pdf").unwrap();
    let images = work.path().join("images");
    std::fs::create_dir(&images).unwrap();
    std::fs::write(images.join("image_000000.png"), b"previous run").unwrap();

    cargo_bin_cmd!("pdfpix")
        .current_dir(work.path())
        .arg("broken.pdf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse PDF"));

    assert!(images.join("image_000000.png").exists());
}

#[test]
fn test_help_lists_buffered_flag() {
    cargo_bin_cmd!("pdfpix")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--buffered"));
}
