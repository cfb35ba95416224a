use pdf_images::*;
use std::path::PathBuf;
use std::sync::Arc;

fn image_file(name: &str, size: usize) -> SelectedFile {
    SelectedFile::from_bytes(name, Arc::from(vec![0u8; size]), Some("image/png"), None)
}

fn text_file(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, Arc::from(b"text".to_vec()), Some("text/plain"), None)
}

fn last_message(session: &Session) -> (String, Severity) {
    let latest = session.notifications().latest().unwrap();
    (latest.message.clone(), latest.severity)
}

#[test]
fn test_new_session_is_idle_and_empty() {
    let session = Session::new();

    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.controls().convert_enabled);
    assert!(!session.controls().clear_enabled);
    assert_eq!(session.controls().convert_label, CONVERT_LABEL);
    assert!(!session.preview().visible);
    assert!(session.notifications().is_empty());
}

#[test]
fn test_add_files_updates_controls_and_preview() {
    let mut session = Session::new();
    let before = session.revision();

    let outcome = session
        .add_files(vec![image_file("a.png", 1), image_file("b.png", 2)])
        .unwrap();
    assert_eq!(outcome.added, 2);
    assert!(session.revision() > before);

    assert!(session.controls().convert_enabled);
    assert!(session.controls().clear_enabled);

    let preview = session.preview();
    assert!(preview.visible);
    let entries: Vec<(usize, &str)> = preview
        .entries
        .iter()
        .map(|e| (e.index, e.name.as_str()))
        .collect();
    assert_eq!(entries, vec![(0, "a.png"), (1, "b.png")]);

    assert_eq!(
        last_message(&session),
        ("2 image(s) added successfully".to_string(), Severity::Success)
    );
}

#[test]
fn test_success_message_counts_duplicates() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1)]);

    let outcome = session
        .add_files(vec![image_file("a.png", 1), image_file("b.png", 2)])
        .unwrap();
    assert_eq!(outcome.added, 1);
    assert_eq!(session.collection().len(), 2);
    assert_eq!(last_message(&session).0, "2 image(s) added successfully");
}

#[test]
fn test_invalid_selection_notifies_error() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1)]);
    let revision = session.revision();

    assert!(session.add_files(vec![text_file("notes.txt")]).is_none());
    assert_eq!(
        last_message(&session),
        ("Please select valid image files".to_string(), Severity::Error)
    );
    assert_eq!(session.collection().len(), 1);
    assert_eq!(session.revision(), revision);
}

#[test]
fn test_empty_selection_is_silent() {
    let mut session = Session::new();

    assert!(session.add_files(Vec::new()).is_none());
    assert!(session.notifications().is_empty());
}

#[test]
fn test_remove_last_file_hides_preview() {
    let mut session = Session::new();
    let file = image_file("only.png", 1);
    let id = file.id;
    session.add_files(vec![file]);
    let notifications = session.notifications().len();

    let removed = session.remove(id).unwrap();
    assert_eq!(removed.name, "only.png");
    assert!(!session.preview().visible);
    assert!(!session.controls().convert_enabled);
    assert!(!session.controls().clear_enabled);
    // Removal is silent
    assert_eq!(session.notifications().len(), notifications);

    assert!(matches!(
        session.remove_at(0),
        Err(ImageError::InvalidIndex { index: 0, len: 0 })
    ));
}

#[test]
fn test_clear_notifies_info() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1), image_file("b.png", 2)]);

    session.clear();
    assert!(session.collection().is_empty());
    assert!(!session.controls().clear_enabled);
    assert_eq!(
        last_message(&session),
        ("All images cleared".to_string(), Severity::Info)
    );
}

#[test]
fn test_reorder_refreshes_preview() {
    let mut session = Session::new();
    let a = image_file("a.png", 1);
    let b = image_file("b.png", 2);
    let b_id = b.id;
    session.add_files(vec![a, b]);

    assert!(session.move_up(b_id));
    assert_eq!(session.preview().entries[0].name, "b.png");
    assert!(!session.move_up(b_id));
}

#[test]
fn test_conversion_lifecycle() {
    let mut session = Session::new();
    assert!(session.start_conversion().is_none());

    session.add_files(vec![image_file("a.png", 1), image_file("b.png", 2)]);
    let files = session.start_conversion().unwrap();
    assert_eq!(files.len(), 2);

    assert!(session.is_converting());
    assert!(!session.controls().convert_enabled);
    assert_eq!(session.controls().convert_label, CONVERTING_LABEL);

    // No second conversion while busy
    assert!(session.start_conversion().is_none());

    // Edits during a run do not touch the snapshot
    session.clear();
    assert_eq!(files.len(), 2);

    session.finish_conversion(Ok(Some(ConvertReport {
        path: PathBuf::from("/tmp/converted_images.pdf"),
        page_count: 2,
    })));
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.controls().convert_label, CONVERT_LABEL);
    assert_eq!(
        last_message(&session),
        ("PDF created successfully!".to_string(), Severity::Success)
    );
}

#[test]
fn test_failed_conversion_resets_with_one_error() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1)]);
    session.start_conversion().unwrap();
    let before = session.notifications().len();

    session.finish_conversion(Err(ImageError::UnsupportedImage {
        name: "a.png".to_string(),
        reason: "image has no pixels".to_string(),
    }));

    assert!(!session.is_converting());
    assert!(session.controls().convert_enabled);
    assert_eq!(session.notifications().len(), before + 1);

    let (message, severity) = last_message(&session);
    assert_eq!(severity, Severity::Error);
    assert!(message.starts_with("Error creating PDF: "));
    assert!(message.contains("a.png"));
}

#[test]
fn test_failure_message_from_worker() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1)]);
    session.start_conversion().unwrap();

    session.conversion_failed("Worker channel closed");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(
        last_message(&session),
        (
            "Error creating PDF: Worker channel closed".to_string(),
            Severity::Error
        )
    );
}

#[test]
fn test_empty_run_finishes_silently() {
    let mut session = Session::new();
    session.add_files(vec![image_file("a.png", 1)]);
    session.start_conversion().unwrap();
    let before = session.notifications().len();

    session.conversion_succeeded(None);
    assert!(!session.is_converting());
    assert_eq!(session.notifications().len(), before);
}
