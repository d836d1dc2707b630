//! Integration tests for error handling and edge cases.

use pdfdeck::config::{Config, OverwriteMode};
use pdfdeck::error::PdfDeckError;
use pdfdeck::export::Exporter;
use pdfdeck::io::{LopdfBackend, LopdfSource, WriteOptions};
use pdfdeck::pageset::{OrderSpec, PageSet, ReorderPolicy, Rotation, Snapshot, SnapshotEntry};
use pdfdeck::session::{Response, Session};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::write_pdf;

#[test]
fn test_error_nonexistent_source() {
    let err = LopdfSource::open(&PathBuf::from("/nonexistent/file.pdf")).unwrap_err();
    assert!(matches!(err, PdfDeckError::UnreadableSource { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_error_corrupted_pdf() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), b"this is not a pdf").unwrap();

    let err = LopdfSource::open(temp_file.path()).unwrap_err();
    assert!(matches!(err, PdfDeckError::UnreadableSource { .. }));
}

#[test]
fn test_vanished_source_aborts_export_without_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let b = write_pdf(dir.path(), "b.pdf", "B", 1);

    let snapshot = Snapshot::new(vec![
        SnapshotEntry::new(&a, 0, Rotation::NONE),
        SnapshotEntry::new(&b, 0, Rotation::NONE),
    ]);
    std::fs::remove_file(&b).unwrap();

    let output = dir.path().join("out.pdf");
    let err = Exporter::new(LopdfBackend::new())
        .export(&snapshot, &output)
        .unwrap_err();

    assert!(matches!(err, PdfDeckError::SourceUnavailable { ref path, .. } if *path == b));
    assert!(!output.exists());
    assert!(!dir.path().join("out.pdf.tmp").exists());
}

#[test]
fn test_index_past_end_of_source_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 2);

    let snapshot = Snapshot::new(vec![SnapshotEntry::new(&a, 2, Rotation::NONE)]);
    let output = dir.path().join("out.pdf");
    let err = Exporter::new(LopdfBackend::new())
        .export(&snapshot, &output)
        .unwrap_err();

    assert!(matches!(err, PdfDeckError::SourceUnavailable { ref path, .. } if *path == a));
    assert!(err.is_user_error());
    assert!(!output.exists());
}

#[test]
fn test_source_shrunk_after_select_keeps_session_alive() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);

    let mut session = Session::new(&Config::default());
    session.select(std::slice::from_ref(&a)).unwrap();
    session.execute_line("next").unwrap();
    session.execute_line("next").unwrap();
    let before = session.pages().snapshot();

    write_pdf(dir.path(), "a.pdf", "A", 1);
    let output = dir.path().join("out.pdf");
    let response = session
        .execute_line(&format!("export {}", output.display()))
        .unwrap();

    assert!(response.is_failure());
    assert!(!output.exists());
    assert_eq!(session.pages().snapshot(), before);
    assert_eq!(session.pages().cursor(), Some(2));
}

#[test]
fn test_no_clobber_keeps_existing_destination() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let output = dir.path().join("existing.pdf");
    std::fs::write(&output, b"precious").unwrap();

    let backend = LopdfBackend::with_write_options(WriteOptions {
        overwrite: OverwriteMode::NoClobber,
        ..Default::default()
    });
    let snapshot = Snapshot::new(vec![SnapshotEntry::new(&a, 0, Rotation::NONE)]);

    let err = Exporter::new(backend).export(&snapshot, &output).unwrap_err();
    assert!(matches!(err, PdfDeckError::OutputExists { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), b"precious");
}

#[test]
fn test_invalid_reorder_leaves_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);
    let source = LopdfSource::open(&a).unwrap();

    let mut pages = PageSet::new();
    pages.load(&[source]).unwrap();
    pages.next();
    pages.rotate_current(90);
    let before = pages.snapshot();

    for order in [vec![1, 2], vec![1, 2, 4], vec![1, 2, 3, 1]] {
        let err = pages
            .reorder(&OrderSpec::from_positions(order), ReorderPolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, PdfDeckError::InvalidOrder { .. }));
    }
    let err = pages
        .reorder(&OrderSpec::from_positions(vec![2, 2, 1]), ReorderPolicy::Strict)
        .unwrap_err();
    assert!(matches!(err, PdfDeckError::InvalidOrder { .. }));

    assert_eq!(pages.snapshot(), before);
    assert_eq!(pages.cursor(), Some(1));
}

#[test]
fn test_select_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("folder.pdf");
    std::fs::create_dir(&folder).unwrap();

    let mut session = Session::new(&Config::default());
    let response = session
        .execute_line(&format!("select {}", folder.display()))
        .unwrap();

    let Response::Failed { message } = response else {
        panic!("expected failure");
    };
    assert!(message.contains("Not a file"));
    assert!(session.pages().is_empty());
}

#[test]
fn test_unwritable_destination_is_reported() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let blocked = dir.path().join("blocked.pdf");
    std::fs::create_dir(&blocked).unwrap();

    let mut session = Session::new(&Config::default());
    session.select(&[a]).unwrap();
    let before = session.pages().snapshot();

    let response = session
        .execute_line(&format!("export {}", blocked.display()))
        .unwrap();
    assert!(response.is_failure());
    assert_eq!(session.pages().snapshot(), before);
}
