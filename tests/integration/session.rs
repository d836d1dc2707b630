//! Driving a whole session through command lines.

use pdfdeck::cli::{RunSummary, run_commands};
use pdfdeck::config::Config;
use pdfdeck::output::OutputFormatter;
use pdfdeck::pageset::PageView;
use pdfdeck::session::{Response, Session};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{labels_of, rotations_of, write_pdf};

#[test]
fn test_typical_editing_session() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "1-intro.pdf", "I", 2);
    write_pdf(dir.path(), "2-body.pdf", "B", 3);

    let mut session = Session::new(&Config::default());
    let mut run = |line: &str| session.execute_line(line).unwrap();

    let Response::Loaded { summary, view, .. } = run(&format!("select {}/*.pdf", dir.path().display()))
    else {
        panic!("expected the sources to load");
    };
    assert_eq!(summary.pages, 5);
    assert_eq!(
        view.to_string(),
        "[1/5] File: 1-intro.pdf, Page: 1, Rotation: 0°"
    );

    run("next");
    run("next");
    let shown = run("rotate-right");
    let Response::View { view } = shown else {
        panic!("expected a view");
    };
    assert_eq!(
        view.to_string(),
        "[3/5] File: 2-body.pdf, Page: 1, Rotation: 90°"
    );

    run("delete");
    run("reorder 4,3,2,1");
    let output = dir.path().join("result");
    let exported = run(&format!("export {}", output.display()));
    assert!(matches!(exported, Response::Exported { .. }));

    let output = output.with_extension("pdf");
    assert_eq!(labels_of(&output), vec!["B-2", "B-1", "I-1", "I-0"]);
    assert_eq!(rotations_of(&output), vec![0; 4]);
}

#[test]
fn test_rotation_follows_page_through_reorder() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);

    let mut session = Session::new(&Config::default());
    session.select(&[a]).unwrap();
    session.execute_line("rotate 180").unwrap();
    session.execute_line("reorder 3,2,1").unwrap();

    let Response::Listing { pages } = session.execute_line("list").unwrap() else {
        panic!("expected a listing");
    };
    let rotations: Vec<u16> = pages.iter().map(|entry| entry.rotation.degrees()).collect();
    assert_eq!(rotations, vec![0, 0, 180]);
}

#[test]
fn test_lenient_reorder_duplicates_pages() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 3);

    let mut session = Session::new(&Config::default());
    session.select(&[a]).unwrap();
    session.execute_line("rotate 90").unwrap();
    session.execute_line("reorder 1,1,1").unwrap();

    let output = dir.path().join("dup.pdf");
    session
        .execute_line(&format!("export {}", output.display()))
        .unwrap();

    assert_eq!(labels_of(&output), vec!["A-0", "A-0", "A-0"]);
    assert_eq!(rotations_of(&output), vec![90, 90, 90]);
}

#[test]
fn test_empty_session_commands_are_noops() {
    let mut session = Session::new(&Config::default());

    for line in ["show", "prev", "next", "delete", "rotate 90", "reorder"] {
        let response = session.execute_line(line).unwrap();
        assert!(
            matches!(
                response,
                Response::View {
                    view: PageView::Empty
                }
            ),
            "'{line}' on an empty session gave {response:?}"
        );
    }
    assert!(session.pages().is_empty());
}

#[tokio::test]
async fn test_script_run() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 2);
    let b = write_pdf(dir.path(), "b.pdf", "B", 1);
    let output = dir.path().join("scripted.pdf");

    let script = format!(
        "# rearrange two scans\n\
         select {} {}\n\
         rotate-left\n\
         reorder 3,1,2\n\
         reorder 1\n\
         export {}\n",
        a.display(),
        b.display(),
        output.display()
    );
    let script_path = dir.path().join("commands.txt");
    tokio::fs::write(&script_path, script).await.unwrap();

    let file = tokio::fs::File::open(&script_path).await.unwrap();
    let mut session = Session::new(&Config::default());
    let summary = run_commands(
        &mut session,
        &OutputFormatter::quiet(),
        tokio::io::BufReader::new(file),
        PathBuf::from(&script_path),
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            executed: 5,
            failed: 1
        }
    );
    assert_eq!(labels_of(&output), vec!["B-0", "A-0", "A-1"]);
    assert_eq!(rotations_of(&output), vec![0, 270, 0]);
}
