//! Export produces exactly the pages, order and rotation of the snapshot.

use pdfdeck::config::CompressionLevel;
use pdfdeck::export::Exporter;
use pdfdeck::io::{LopdfBackend, LopdfSource, WriteOptions, reader::open_all};
use pdfdeck::pageset::{OrderSpec, PageSet, ReorderPolicy, Rotation, Snapshot, SnapshotEntry};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{Fixture, labels_of, rotations_of, sizes_of, write_pdf};

fn load(paths: &[std::path::PathBuf]) -> PageSet {
    let sources: Vec<LopdfSource> = open_all(paths).unwrap();
    let mut pages = PageSet::new();
    pages.load(&sources).unwrap();
    pages
}

#[test]
fn test_load_then_export_is_identity() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 2);
    let b = write_pdf(dir.path(), "b.pdf", "B", 3);

    let pages = load(&[a, b]);
    let output = dir.path().join("out.pdf");
    let stats = Exporter::new(LopdfBackend::new())
        .export(&pages.snapshot(), &output)
        .unwrap();

    assert_eq!(stats.pages, 5);
    assert_eq!(stats.sources, 2);
    assert!(stats.bytes > 0);
    assert_eq!(labels_of(&output), vec!["A-0", "A-1", "B-0", "B-1", "B-2"]);
    assert_eq!(rotations_of(&output), vec![0; 5]);
}

#[test]
fn test_same_page_twice_with_different_rotation() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let b = write_pdf(dir.path(), "b.pdf", "B", 3);

    let snapshot = Snapshot::new(vec![
        SnapshotEntry::new(&a, 0, Rotation::from_degrees(90)),
        SnapshotEntry::new(&b, 2, Rotation::NONE),
        SnapshotEntry::new(&a, 0, Rotation::from_degrees(270)),
    ]);

    let output = dir.path().join("out.pdf");
    Exporter::new(LopdfBackend::new())
        .export(&snapshot, &output)
        .unwrap();

    assert_eq!(labels_of(&output), vec!["A-0", "B-2", "A-0"]);
    assert_eq!(rotations_of(&output), vec![90, 0, 270]);
}

#[test]
fn test_rotation_is_set_over_intrinsic_rotate() {
    let dir = TempDir::new().unwrap();
    let a = Fixture::new("A", 2).rotated(90).write(dir.path(), "a.pdf");

    let mut pages = load(&[a]);
    pages.next();
    pages.rotate_current(180);

    let output = dir.path().join("out.pdf");
    Exporter::new(LopdfBackend::new())
        .export(&pages.snapshot(), &output)
        .unwrap();

    // Stored rotation starts at 0, not at the page's own /Rotate.
    assert_eq!(rotations_of(&output), vec![0, 180]);
}

#[test]
fn test_edits_are_reflected_in_export() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);
    let b = write_pdf(dir.path(), "b.pdf", "B", 2);

    let mut pages = load(&[a, b]);
    pages.rotate_current(-90); // A-0
    pages.next();
    pages.delete_current(); // A-1
    pages
        .reorder(&OrderSpec::parse("4,3,2,1").unwrap(), ReorderPolicy::Strict)
        .unwrap();
    pages.rotate_current(90); // B-1

    let output = dir.path().join("out.pdf");
    Exporter::new(LopdfBackend::new())
        .export(&pages.snapshot(), &output)
        .unwrap();

    assert_eq!(labels_of(&output), vec!["B-1", "B-0", "A-2", "A-0"]);
    assert_eq!(rotations_of(&output), vec![90, 0, 0, 270]);
}

#[test]
fn test_page_sizes_survive_export() {
    let dir = TempDir::new().unwrap();
    let letter = write_pdf(dir.path(), "letter.pdf", "L", 1);
    let a4 = Fixture::new("P", 1).sized(595, 842).write(dir.path(), "a4.pdf");

    let pages = load(&[a4, letter]);
    let output = dir.path().join("out.pdf");
    Exporter::new(LopdfBackend::new())
        .export(&pages.snapshot(), &output)
        .unwrap();

    assert_eq!(sizes_of(&output), vec![(595, 842), (612, 792)]);
}

#[test]
fn test_export_reads_current_file_contents() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "Old", 2);
    let pages = load(std::slice::from_ref(&a));

    // Replaced on disk after loading.
    write_pdf(dir.path(), "a.pdf", "New", 2);

    let output = dir.path().join("out.pdf");
    Exporter::new(LopdfBackend::new())
        .export(&pages.snapshot(), &output)
        .unwrap();

    assert_eq!(labels_of(&output), vec!["New-0", "New-1"]);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_every_compression_level_loads_back(#[case] compression: CompressionLevel) {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);

    let pages = load(&[a]);
    let backend = LopdfBackend::with_write_options(WriteOptions {
        compression,
        ..Default::default()
    });

    let output = dir.path().join("out.pdf");
    Exporter::new(backend)
        .export(&pages.snapshot(), &output)
        .unwrap();

    assert_eq!(labels_of(&output), vec!["A-0", "A-1", "A-2"]);
}
