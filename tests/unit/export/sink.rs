use super::*;

use crate::export::artifact::ExportFormat;

fn artifact(name: &str, bytes: &[u8]) -> Artifact {
    Artifact {
        file_name: name.to_owned(),
        format: ExportFormat::Json,
        bytes: bytes.to_vec(),
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn in_memory_sink_keeps_everything_in_order() {
    let mut sink = InMemorySink::new();
    sink.save(&artifact("a.json", b"[]")).unwrap();
    sink.save(&artifact("b.json", b"[1]")).unwrap();
    let names: Vec<&str> = sink.saved().iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.json", "b.json"]);
}

#[test]
fn dir_sink_writes_and_leaves_no_part_files() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("nested").join("exports");
    let mut sink = DirSink::new(&out, DirSinkOpts::default());

    let a = artifact("decision-wheels-1.json", b"[]");
    sink.save(&a).unwrap();
    assert_eq!(fs::read(sink.path_for(&a)).unwrap(), b"[]");
    assert_eq!(entries(&out), vec!["decision-wheels-1.json"]);

    sink.save(&artifact("decision-wheels-1.json", b"[2]")).unwrap();
    assert_eq!(fs::read(out.join("decision-wheels-1.json")).unwrap(), b"[2]");
}

#[test]
fn dir_sink_refuses_to_overwrite_when_asked() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path(), DirSinkOpts { overwrite: false });
    sink.save(&artifact("x.svg", b"<svg/>")).unwrap();
    let err = sink.save(&artifact("x.svg", b"other")).unwrap_err();
    assert!(matches!(err, WheelsError::Precondition(_)));
    assert_eq!(fs::read(tmp.path().join("x.svg")).unwrap(), b"<svg/>");
    assert_eq!(entries(tmp.path()), vec!["x.svg"]);
}

#[test]
fn dir_sink_rejects_path_like_names() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path(), DirSinkOpts::default());
    assert!(sink.save(&artifact("../escape.json", b"[]")).is_err());
    assert!(sink.save(&artifact("", b"[]")).is_err());
    assert!(entries(tmp.path()).is_empty());
}

#[test]
fn failed_rename_cleans_up_the_part_file() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory squatting on the destination name makes the final rename fail.
    fs::create_dir(tmp.path().join("taken.json")).unwrap();
    fs::write(tmp.path().join("taken.json").join("keep"), b"x").unwrap();

    let mut sink = DirSink::new(tmp.path(), DirSinkOpts::default());
    assert!(sink.save(&artifact("taken.json", b"[]")).is_err());
    assert_eq!(entries(tmp.path()), vec!["taken.json"]);
}

#[test]
fn commit_without_overwrite_keeps_a_file_that_appeared_meanwhile() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("late.json");
    let part_path = tmp.path().join(".late.json.part");
    fs::write(&part_path, b"ours").unwrap();
    // Another writer wins the race after the existence check.
    fs::write(&dest, b"theirs").unwrap();

    let mut part = PartFile {
        path: part_path.clone(),
        committed: false,
    };
    let err = commit(&mut part, &dest, false).unwrap_err();
    assert!(matches!(err, WheelsError::Precondition(_)));
    drop(part);

    assert_eq!(fs::read(&dest).unwrap(), b"theirs");
    assert!(!part_path.exists());
}

#[test]
fn commit_without_overwrite_links_and_drops_the_part() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("fresh.json");
    let part_path = tmp.path().join(".fresh.json.part");
    fs::write(&part_path, b"[]").unwrap();

    let mut part = PartFile {
        path: part_path.clone(),
        committed: false,
    };
    commit(&mut part, &dest, false).unwrap();
    drop(part);

    assert_eq!(fs::read(&dest).unwrap(), b"[]");
    assert_eq!(entries(tmp.path()), vec!["fresh.json"]);
}
