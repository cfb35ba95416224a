use pdf_images::*;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

fn image_file(name: &str, size: usize, modified_secs: u64) -> SelectedFile {
    SelectedFile::from_bytes(
        name,
        Arc::from(vec![0u8; size]),
        Some("image/png"),
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(modified_secs)),
    )
}

fn text_file(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, Arc::from(b"hello".to_vec()), Some("text/plain"), None)
}

fn names(collection: &ImageCollection) -> Vec<&str> {
    collection.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_add_preserves_input_order() {
    let mut collection = ImageCollection::new();
    let outcome = collection
        .add_files(vec![
            image_file("c.png", 10, 1),
            image_file("a.png", 20, 2),
            image_file("b.png", 30, 3),
        ])
        .unwrap();

    assert_eq!(outcome.accepted, 3);
    assert_eq!(outcome.added, 3);
    assert_eq!(collection.len(), 3);
    assert_eq!(names(&collection), vec!["c.png", "a.png", "b.png"]);
}

#[test]
fn test_duplicate_metadata_is_skipped() {
    let mut collection = ImageCollection::new();
    collection.add_files(vec![image_file("a.png", 10, 1)]).unwrap();

    // Same name, size and timestamp: treated as the same file
    let outcome = collection.add_files(vec![image_file("a.png", 10, 1)]).unwrap();
    assert_eq!(outcome.accepted, 1);
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.duplicates, 1);
    assert_eq!(collection.len(), 1);

    // Any differing field makes it a new file
    collection
        .add_files(vec![
            image_file("a.png", 11, 1),
            image_file("a.png", 10, 2),
            image_file("b.png", 10, 1),
        ])
        .unwrap();
    assert_eq!(collection.len(), 4);
}

#[test]
fn test_duplicates_within_one_batch_collapse() {
    let mut collection = ImageCollection::new();
    let outcome = collection
        .add_files(vec![image_file("a.png", 10, 1), image_file("a.png", 10, 1)])
        .unwrap();

    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.added, 1);
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_non_images_are_rejected_without_mutation() {
    let mut collection = ImageCollection::new();
    collection.add_files(vec![image_file("a.png", 10, 1)]).unwrap();

    let result = collection.add_files(vec![text_file("notes.txt"), text_file("readme.md")]);
    assert!(matches!(result, Err(ImageError::NoImages)));
    assert_eq!(names(&collection), vec!["a.png"]);
}

#[test]
fn test_mixed_selection_keeps_only_images() {
    let mut collection = ImageCollection::new();
    let outcome = collection
        .add_files(vec![text_file("notes.txt"), image_file("a.png", 10, 1)])
        .unwrap();

    assert_eq!(outcome.accepted, 1);
    assert_eq!(names(&collection), vec!["a.png"]);
}

#[test]
fn test_remove_at_keeps_relative_order() {
    let mut collection = ImageCollection::new();
    collection
        .add_files(vec![
            image_file("a.png", 1, 1),
            image_file("b.png", 2, 1),
            image_file("c.png", 3, 1),
            image_file("d.png", 4, 1),
        ])
        .unwrap();

    let removed = collection.remove_at(1).unwrap();
    assert_eq!(removed.name, "b.png");
    assert_eq!(names(&collection), vec!["a.png", "c.png", "d.png"]);

    match collection.remove_at(3) {
        Err(ImageError::InvalidIndex { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("Expected InvalidIndex, got {:?}", other),
    }
    assert_eq!(collection.len(), 3);
}

#[test]
fn test_remove_by_id_after_reorder() {
    let mut collection = ImageCollection::new();
    let a = image_file("a.png", 1, 1);
    let b = image_file("b.png", 2, 1);
    let c = image_file("c.png", 3, 1);
    let b_id = b.id;
    let c_id = c.id;
    collection.add_files(vec![a, b, c]).unwrap();

    assert!(collection.move_up(c_id));
    assert_eq!(names(&collection), vec!["a.png", "c.png", "b.png"]);

    // Positional index 1 is now "c", but the id still points at "b"
    let removed = collection.remove(b_id).unwrap();
    assert_eq!(removed.name, "b.png");
    assert_eq!(names(&collection), vec!["a.png", "c.png"]);
    assert!(collection.remove(b_id).is_none());
}

#[test]
fn test_move_at_edges_is_noop() {
    let mut collection = ImageCollection::new();
    let a = image_file("a.png", 1, 1);
    let b = image_file("b.png", 2, 1);
    let (a_id, b_id) = (a.id, b.id);
    collection.add_files(vec![a, b]).unwrap();

    assert!(!collection.move_up(a_id));
    assert!(!collection.move_down(b_id));
    assert!(collection.move_down(a_id));
    assert_eq!(names(&collection), vec!["b.png", "a.png"]);
    assert_eq!(collection.position(a_id), Some(1));
}

#[test]
fn test_clear_empties_collection() {
    let mut collection = ImageCollection::new();
    collection
        .add_files(vec![image_file("a.png", 1, 1), image_file("b.png", 2, 1)])
        .unwrap();

    collection.clear();
    assert!(collection.is_empty());

    collection.clear();
    assert_eq!(collection.len(), 0);
}

#[test]
fn test_mime_detection_from_name_and_content() {
    let png = SelectedFile::from_bytes("photo.PNG", Arc::from(vec![0u8; 4]), None, None);
    assert_eq!(png.mime, "image/png");
    assert!(png.is_image());

    let jpeg_magic = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let sniffed = SelectedFile::from_bytes("upload", Arc::from(jpeg_magic), Some(""), None);
    assert_eq!(sniffed.mime, "image/jpeg");

    let unknown = SelectedFile::from_bytes("data.bin", Arc::from(vec![1u8, 2, 3]), None, None);
    assert!(!unknown.is_image());
}

#[test]
fn test_from_path_reads_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.jpg");
    std::fs::write(&path, vec![0u8; 42]).unwrap();

    let file = SelectedFile::from_path(&path).unwrap();
    assert_eq!(file.name, "scan.jpg");
    assert_eq!(file.size, 42);
    assert_eq!(file.mime, "image/jpeg");
    assert!(file.last_modified.is_some());
    assert!(matches!(file.source, ImageSource::Path(_)));
}
