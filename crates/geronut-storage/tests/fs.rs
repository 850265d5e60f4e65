use geronut_storage::fs::{list_file_names, read_json, write_json};
use geronut_storage::StorageError;

#[test]
fn write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out.json");
    write_json(&path, &serde_json::json!({"a": 1})).unwrap();

    assert!(path.exists());
    assert_eq!(list_file_names(&dir.path().join("nested")).unwrap(), vec!["out.json"]);
    let back: serde_json::Value = read_json(&path).unwrap();
    assert_eq!(back["a"], 1);
}

#[test]
fn failed_write_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    write_json(&path, &serde_json::json!({"v": 1})).unwrap();

    // A directory squatting on the temp name makes the write fail.
    std::fs::create_dir(dir.path().join("out.json.tmp")).unwrap();
    assert!(write_json(&path, &serde_json::json!({"v": 2})).is_err());

    let back: serde_json::Value = read_json(&path).unwrap();
    assert_eq!(back["v"], 1);
}

#[test]
fn missing_directory_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_file_names(&dir.path().join("nada")).unwrap().is_empty());
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_json::<serde_json::Value>(&dir.path().join("x.json")).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}
