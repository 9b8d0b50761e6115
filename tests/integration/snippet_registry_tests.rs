use serde_json::json;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use monaco_prompt::snippets::{scan, SnippetFileError, SnippetRegistry};
use monaco_prompt::Snippet;

use crate::helpers::test_utils::write_file;

#[test]
fn test_mixed_single_object_and_array_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "pluginA/snippets/a.json",
        r#"{"label":"foo","insertText":"foo()"}"#,
    );
    write_file(
        root,
        "pluginB/snippets/b.json",
        r#"[
            {"label":"bar","insertText":"bar()","detail":"does bar"},
            {"insertText":"missing-label"}
        ]"#,
    );

    let registry = SnippetRegistry::new();
    registry.load(root);
    let snippets = registry.get_cached().expect("registry should be loaded");

    assert_eq!(
        snippets.as_slice(),
        &[
            Snippet {
                label: "foo".to_string(),
                insert_text: "foo()".to_string(),
                path: "pluginA/snippets/a.json".to_string(),
                detail: None,
                documentation: None,
            },
            Snippet {
                label: "bar".to_string(),
                insert_text: "bar()".to_string(),
                path: "pluginB/snippets/b.json".to_string(),
                detail: Some(json!("does bar")),
                documentation: None,
            },
        ]
    );
}

#[test]
fn test_malformed_file_does_not_abort_scan() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "pluginA/snippets/good.json", r#"{"label":"ok","insertText":"ok"}"#);
    write_file(root, "pluginC/snippets/bad.json", "{not json");
    write_file(root, "pluginD/snippets/also_good.json", r#"[{"label":"d","insertText":"d"}]"#);

    let registry = SnippetRegistry::new();
    let snippets = registry.load(root);

    let labels: Vec<_> = snippets.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["ok", "d"]);
    assert!(snippets.iter().all(|s| s.path != "pluginC/snippets/bad.json"));
}

/// Log sink shared between the test and the subscriber it installs.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_skipped_files_are_logged_with_their_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "pluginA/snippets/good.json", r#"{"label":"ok","insertText":"ok"}"#);
    write_file(root, "pluginC/snippets/bad.json", "{not json");
    let unreadable = root.join("pluginD/snippets/latin1.json");
    fs::create_dir_all(unreadable.parent().unwrap()).unwrap();
    fs::write(&unreadable, b"[{\"label\":\"caf\xe9\"}]").unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let snippets =
        tracing::subscriber::with_default(subscriber, || SnippetRegistry::new().load(root));

    assert_eq!(snippets.len(), 1);

    let output = logs.contents();
    let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 2, "{output}");

    let parse = warnings
        .iter()
        .find(|l| l.contains("pluginC/snippets/bad.json"))
        .expect("malformed file should be named in a warning");
    assert!(parse.contains("invalid json"), "{parse}");

    let read = warnings
        .iter()
        .find(|l| l.contains("pluginD/snippets/latin1.json"))
        .expect("unreadable file should be named in a warning");
    assert!(read.contains("failed to read"), "{read}");
}

#[test]
fn test_scan_outcome_lists_skipped_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "pluginC/snippets/bad.json", "{not json");
    write_file(root, "pluginE/snippets/fine.json", r#"[{"label":"e","insertText":"e"}]"#);

    let outcome = scan(root);

    assert_eq!(outcome.snippets.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(matches!(
        &outcome.skipped[0],
        SnippetFileError::Parse { path, .. } if path.ends_with("pluginC/snippets/bad.json")
    ));
}

#[test]
fn test_single_object_equals_one_element_array() {
    let single = TempDir::new().unwrap();
    let wrapped = TempDir::new().unwrap();
    let entry = r#"{"label":"x","insertText":"x()","documentation":"long"}"#;
    write_file(single.path(), "p/snippets/s.json", entry);
    write_file(wrapped.path(), "p/snippets/s.json", &format!("[{entry}]"));

    let a = SnippetRegistry::new().load(single.path());
    let b = SnippetRegistry::new().load(wrapped.path());

    assert_eq!(a, b);
}

#[test]
fn test_wrong_typed_required_fields_are_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "p/snippets/s.json",
        r#"[
            {"label": null, "insertText": "a"},
            {"label": "b", "insertText": 2},
            {"label": {"text": "c"}, "insertText": "c"},
            {"label": "d", "insertText": "d()"}
        ]"#,
    );

    let snippets = SnippetRegistry::new().load(root);

    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].label, "d");
}

#[test]
fn test_reload_fully_replaces_cache() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "p/snippets/one.json", r#"{"label":"one","insertText":"1"}"#);
    write_file(root, "q/snippets/two.json", r#"{"label":"two","insertText":"2"}"#);

    let registry = SnippetRegistry::new();
    assert_eq!(registry.load(root).len(), 2);

    fs::remove_dir_all(root.join("p")).unwrap();
    write_file(root, "q/snippets/three.json", r#"{"label":"three","insertText":"3"}"#);
    registry.load(root);

    let labels: Vec<_> = registry
        .get_cached()
        .unwrap()
        .iter()
        .map(|s| s.label.clone())
        .collect();
    assert_eq!(labels, vec!["three", "two"]);
}

#[test]
fn test_missing_root_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let registry = SnippetRegistry::new();

    assert!(registry.get_cached().is_none());
    let snippets = registry.load(&temp_dir.path().join("nowhere"));

    assert!(snippets.is_empty());
    assert!(registry.get_cached().is_some());
}

#[test]
fn test_serialized_shape() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "p/snippets/s.json",
        r#"[
            {"label":"a","insertText":"a()"},
            {"label":"b","insertText":"b()","detail":"d","documentation":"doc"}
        ]"#,
    );

    let snippets = SnippetRegistry::new().load(root);
    let value = serde_json::to_value(snippets.as_slice()).unwrap();

    assert_eq!(
        value,
        json!([
            {"label": "a", "insertText": "a()", "path": "p/snippets/s.json"},
            {
                "label": "b",
                "insertText": "b()",
                "path": "p/snippets/s.json",
                "detail": "d",
                "documentation": "doc"
            }
        ])
    );
}
