//! Load → chunk → report, end to end on a temporary docs directory.

use std::fs;
use std::io::Cursor;

use docsplit_core::FieldValue;
use docsplit_ingest::document::ExtractionError;
use docsplit_ingest::report::{save_json_report, save_text_report};
use docsplit_ingest::{create_chunks, load_directory, load_file, ChunkConfig};

fn paragraph(label: &str, sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("{label} sentence number {i} has a handful of plain words."))
        .collect::<Vec<_>>()
        .join(" ")
}

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        let run = docx_rs::Run::new().add_text(*text);
        docx = docx.add_paragraph(docx_rs::Paragraph::new().add_run(run));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

#[test]
fn loads_supported_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.md"), "# Heading\n\nBody text.").unwrap();
    fs::write(dir.path().join("a.txt"), "Plain text file.").unwrap();
    fs::write(dir.path().join("c.docx"), docx_bytes(&["Word paragraph."])).unwrap();
    fs::write(dir.path().join("e.csv"), "ignored,file").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("d.txt"), "Nested file.").unwrap();

    let docs = load_directory(dir.path(), false).unwrap();
    let names: Vec<_> = docs.iter().filter_map(|d| d.filename()).collect();
    assert_eq!(names, ["a.txt", "b.md", "c.docx"]);
    assert_eq!(docs[2].content, "Word paragraph.");
    assert_eq!(docs[2].metadata.get("type"), Some(&FieldValue::from("docx")));

    let docs = load_directory(dir.path(), true).unwrap();
    assert_eq!(docs.len(), 4);
}

#[test]
fn loaded_document_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Story.TXT");
    fs::write(&path, "Once upon a time.").unwrap();

    let doc = load_file(&path).unwrap();
    assert_eq!(doc.content, "Once upon a time.");
    assert_eq!(doc.metadata.get("filename"), Some(&FieldValue::from("Story.TXT")));
    assert_eq!(doc.metadata.get("extension"), Some(&FieldValue::from(".txt")));
    assert_eq!(doc.metadata.get("size_bytes"), Some(&FieldValue::Integer(17)));
    assert_eq!(
        doc.metadata.get("source").and_then(FieldValue::as_str),
        Some(path.display().to_string().as_str())
    );
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_directory(dir.path().join("nope"), false).unwrap_err();
    assert!(matches!(err, ExtractionError::NotFound(_)));
}

#[test]
fn directory_path_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_file(dir.path()), Err(ExtractionError::NotFound(_))));
}

#[test]
fn empty_file_loads_and_yields_no_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();
    let doc = load_file(&path).unwrap();
    assert!(create_chunks(&doc, &ChunkConfig::default()).is_empty());
}

#[test]
fn chunks_flow_into_reports() {
    let dir = tempfile::tempdir().unwrap();
    let docs_dir = dir.path().join("docs");
    fs::create_dir(&docs_dir).unwrap();
    let text = format!("{}\n\n{}", paragraph("Alpha", 8), paragraph("Beta", 8));
    fs::write(docs_dir.join("long.txt"), &text).unwrap();

    let docs = load_directory(&docs_dir, false).unwrap();
    assert_eq!(docs.len(), 1);
    let cfg = ChunkConfig::builder().max_size(200).overlap(40).build().unwrap();
    let chunks = create_chunks(&docs[0], &cfg);
    assert!(chunks.len() > 3);

    let results = dir.path().join("results").join("run1");
    let txt = results.join("chunks_long.txt.txt");
    let json = results.join("chunks_long.txt.json");
    save_text_report(&chunks, &txt).unwrap();
    save_json_report(&chunks, &json).unwrap();

    let report = fs::read_to_string(&txt).unwrap();
    assert!(report.contains(&format!("Total chunks: {}", chunks.len())));
    assert!(report.contains("long.txt"));

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), chunks.len());
    assert_eq!(arr[0]["chunk_index"], 0);
    assert_eq!(arr[0]["metadata"]["total_chunks"], chunks.len());
    assert_eq!(arr[0]["metadata"]["filename"], "long.txt");
    assert_eq!(
        arr[1]["metadata"]["original_document_id"],
        docs[0].doc_id.to_string()
    );
}

#[test]
fn documents_chunk_independently_across_threads() {
    let cfg = ChunkConfig::builder().max_size(120).overlap(30).build().unwrap();
    let texts: Vec<String> = (0..4).map(|i| paragraph(&format!("Doc{i}"), 20)).collect();
    let shared = &cfg;

    let results: Vec<Vec<String>> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| s.spawn(move || docsplit_ingest::split_text(t, shared)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (text, chunks) in texts.iter().zip(&results) {
        assert_eq!(chunks, &docsplit_ingest::split_text(text, &cfg));
    }
}
