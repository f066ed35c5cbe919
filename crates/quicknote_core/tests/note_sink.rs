use quicknote_core::{CapturedNote, FileNoteSink, Locale, NoteSink};
use std::fs;
use uuid::Uuid;

#[test]
fn saves_trimmed_markdown_file_into_created_dir() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("QuickNote");
    let mut sink = FileNoteSink::new(&dir);
    let note = CapturedNote::new(
        Uuid::new_v4(),
        "  remember the keys \n\n".to_string(),
        Locale::En,
    );

    sink.save_note(&note).unwrap();

    let path = sink.path_for(&note);
    assert!(path.starts_with(&dir));
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("note-"));
    assert!(name.ends_with(".md"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "  remember the keys\n");
}

#[test]
fn separate_sessions_never_share_a_file() {
    let root = tempfile::tempdir().unwrap();
    let mut sink = FileNoteSink::new(root.path());

    let first = CapturedNote::new(Uuid::new_v4(), "one".to_string(), Locale::PtBr);
    let mut second = CapturedNote::new(Uuid::new_v4(), "two".to_string(), Locale::PtBr);
    second.captured_at_ms = first.captured_at_ms;
    sink.save_note(&first).unwrap();
    sink.save_note(&second).unwrap();

    assert_ne!(sink.path_for(&first), sink.path_for(&second));
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 2);
}
