use std::fs;
use std::path::PathBuf;

use digest_core::{Output, OutputKind, OutputPayload};
use digest_engine::{ensure_output_dir, AtomicFileWriter, FileOutputSink, OutputSink};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("OUTPUT_article-summary.txt", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("OUTPUT_article-summary.txt", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("doc.txt", "data").is_err());
    assert!(!file_path.with_file_name("doc.txt").exists());
}

#[test]
fn file_sink_places_outputs_by_directory() {
    let temp = TempDir::new().unwrap();
    let sink = FileOutputSink::new(temp.path().to_path_buf());

    sink.emit(Output {
        kind: OutputKind::ExtractedArticle,
        payload: OutputPayload::Text("page text".into()),
        dir: None,
    })
    .unwrap();
    sink.emit(Output {
        kind: OutputKind::ClassifierScores,
        payload: OutputPayload::Scores(vec![0.5, 0.25]),
        dir: Some(PathBuf::from("nested")),
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("OUTPUT_article-summary.txt")).unwrap(),
        "page text"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("nested/OUTPUT_classifiers.json")).unwrap(),
        "[0.5,0.25]"
    );
}
