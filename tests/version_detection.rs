use qidata::file::{OpenMode, QiDataFile};
use qidata::metadata::Property;
use qidata::version::{identify_file_annotation_version, identify_with_ext, AnnotationVersion};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn jpg(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"jpeg").unwrap();
    path
}

fn write_sidecar(path: &PathBuf, uri: &str, prefix: &str, first_level: &str) {
    let doc = format!(
        r#"{{"namespaces":[{{"uri":"{uri}","prefix":"{prefix}","children":{{"{prefix}:{first_level}":{{}}}}}}]}}"#
    );
    fs::write(format!("{}.xmp.json", path.display()), doc).unwrap();
}

#[test]
fn file_written_by_the_adapter_is_current() {
    let dir = TempDir::new().unwrap();
    let path = jpg(&dir, "a.jpg");
    let mut file = QiDataFile::open(&path, OpenMode::Write).unwrap();
    file.add_annotation("jdoe", Property::new("k", "v"), None)
        .unwrap();
    file.close().unwrap();

    assert_eq!(
        identify_file_annotation_version(&path),
        Some(AnnotationVersion::V3)
    );
}

#[test]
fn legacy_layouts_are_told_apart() {
    let dir = TempDir::new().unwrap();
    let v1 = jpg(&dir, "v1.jpg");
    write_sidecar(&v1, "http://aldebaran.com/xmp/1", "aldebaran", "Face");
    let v2 = jpg(&dir, "v2.jpg");
    write_sidecar(&v2, "http://aldebaran.com/xmp/1", "aldebaran", "jdoe");

    assert_eq!(identify_file_annotation_version(&v1), Some(AnnotationVersion::V1));
    assert_eq!(identify_file_annotation_version(&v2), Some(AnnotationVersion::V2));
}

#[test]
fn unannotated_or_unreadable_files_have_no_version() {
    let dir = TempDir::new().unwrap();
    let plain = jpg(&dir, "plain.jpg");
    assert_eq!(identify_file_annotation_version(&plain), None);

    let broken = jpg(&dir, "broken.jpg");
    fs::write(dir.path().join("broken.jpg.xmp.json"), "garbage").unwrap();
    assert_eq!(identify_file_annotation_version(&broken), None);

    assert_eq!(identify_file_annotation_version(&dir.path().join("nope.jpg")), None);
}

#[test]
fn custom_sidecar_extension_is_honoured() {
    let dir = TempDir::new().unwrap();
    let path = jpg(&dir, "a.jpg");
    fs::write(
        dir.path().join("a.jpg.meta"),
        r#"{"namespaces":[{"uri":"http://softbank-robotics.com/qidata/1","prefix":"qidata"}]}"#,
    )
    .unwrap();

    assert_eq!(identify_with_ext(&path, ".meta"), Some(AnnotationVersion::V3));
    assert_eq!(identify_file_annotation_version(&path), None);
}
