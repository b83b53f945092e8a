//! Corpus assembly: demo documents, JSON corpus files, and local files.
//!
//! Everything is loaded into an [`InMemoryStore`] for the lifetime of the
//! process. Files are only ever read; nothing is written back.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use synapsex_core::models::Document;
use synapsex_core::store::demo_corpus;
use synapsex_core::store::memory::InMemoryStore;

use crate::config::{Config, DirectoryConfig};

/// Build the store described by `[corpus]`: demo documents first, then the
/// JSON corpus file, then the scanned directory.
pub fn build_store(config: &Config) -> Result<InMemoryStore> {
    let mut docs = Vec::new();

    if config.corpus.include_demo {
        docs.extend(demo_corpus());
    }

    if let Some(path) = &config.corpus.path {
        let loaded = load_corpus_file(path)?;
        tracing::info!(count = loaded.len(), path = %path.display(), "loaded corpus file");
        docs.extend(loaded);
    }

    if let Some(dir) = &config.corpus.directory {
        let scanned = scan_directory(dir)?;
        tracing::info!(count = scanned.len(), root = %dir.root.display(), "scanned corpus directory");
        docs.extend(scanned);
    }

    Ok(InMemoryStore::with_documents(docs))
}

/// Read a JSON array of documents.
pub fn load_corpus_file(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let docs: Vec<Document> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;
    Ok(docs)
}

/// Walk `dir.root` and turn every matching file into a document.
///
/// Results are sorted by path for deterministic corpus order.
pub fn scan_directory(dir: &DirectoryConfig) -> Result<Vec<Document>> {
    let root = &dir.root;
    if !root.exists() {
        bail!("Corpus directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&dir.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(dir.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut found = Vec::new();

    let walker = WalkDir::new(root).follow_links(dir.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        found.push(path.to_path_buf());
    }

    found.sort();

    found
        .iter()
        .map(|path| {
            let modified = std::fs::metadata(path)
                .and_then(|m| m.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            read_upload(path, modified)
        })
        .collect()
}

/// Turn one local file into a document, as an upload at `uploaded_at`.
///
/// Plain-text kinds (`txt`, `md`) keep their UTF-8 body. Binary kinds and
/// undecodable files get the pending-content placeholder.
pub fn read_upload(path: &Path, uploaded_at: DateTime<Utc>) -> Result<Document> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("Not a file: {}", path.display());
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let doc_type = synapsex_core::models::DocumentType::from_file_name(&file_name);
    let content = if doc_type.is_plain_text() {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                tracing::warn!(path = %path.display(), "file is not valid UTF-8, content left pending");
                None
            }
        }
    } else {
        None
    };

    Ok(Document::from_upload(
        &file_name,
        metadata.len(),
        content,
        uploaded_at,
    ))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use synapsex_core::models::{DocumentType, PENDING_CONTENT};
    use synapsex_core::store::DocumentStore;
    use tempfile::TempDir;

    fn dir_config(root: &Path) -> DirectoryConfig {
        DirectoryConfig {
            root: root.to_path_buf(),
            include_globs: vec!["**/*.md".to_string(), "**/*.txt".to_string()],
            exclude_globs: vec!["drafts/**".to_string()],
            follow_symlinks: false,
        }
    }

    #[test]
    fn test_read_upload_text_and_binary() {
        let tmp = TempDir::new().unwrap();
        let md = tmp.path().join("Release Notes.md");
        fs::write(&md, "Version two ships today.").unwrap();
        let pdf = tmp.path().join("scan.pdf");
        fs::write(&pdf, [0x25, 0x50, 0x44, 0x46, 0xff]).unwrap();

        let now = Utc::now();
        let doc = read_upload(&md, now).unwrap();
        assert_eq!(doc.title, "Release Notes");
        assert_eq!(doc.doc_type, DocumentType::Md);
        assert_eq!(doc.content, "Version two ships today.");
        assert_eq!(doc.size, 24);

        let doc = read_upload(&pdf, now).unwrap();
        assert_eq!(doc.doc_type, DocumentType::Pdf);
        assert_eq!(doc.content, PENDING_CONTENT);
        assert_eq!(doc.size, 5);
    }

    #[test]
    fn test_read_upload_invalid_utf8_is_pending() {
        let tmp = TempDir::new().unwrap();
        let txt = tmp.path().join("garbled.txt");
        fs::write(&txt, [0xc3, 0x28]).unwrap();
        let doc = read_upload(&txt, Utc::now()).unwrap();
        assert_eq!(doc.content, PENDING_CONTENT);
    }

    #[test]
    fn test_read_upload_rejects_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(read_upload(tmp.path(), Utc::now()).is_err());
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("b.md"), "Beta notes.").unwrap();
        fs::write(root.join("guides/a.txt"), "Alpha guide.").unwrap();
        fs::write(root.join("drafts/c.md"), "Draft.").unwrap();
        fs::write(root.join("image.png"), [0u8; 4]).unwrap();

        let docs = scan_directory(&dir_config(root)).unwrap();
        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let err = scan_directory(&dir_config(&tmp.path().join("nope"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_build_store_combines_sources() {
        let tmp = TempDir::new().unwrap();
        let corpus_path = tmp.path().join("corpus.json");
        fs::write(
            &corpus_path,
            r#"[{"id":"x1","title":"Extra","content":"Extra content.","type":"txt","uploadedAt":"2024-03-01T00:00:00Z","size":14}]"#,
        )
        .unwrap();
        let docs_dir = tmp.path().join("docs");
        fs::create_dir_all(&docs_dir).unwrap();
        fs::write(docs_dir.join("local.md"), "Local file.").unwrap();

        let mut cfg = Config::minimal();
        cfg.corpus.path = Some(corpus_path);
        cfg.corpus.directory = Some(dir_config(&docs_dir));

        let store = build_store(&cfg).unwrap();
        let docs = store.list_documents().await.unwrap();
        assert_eq!(docs.len(), 6);
        assert_eq!(docs[0].id, "1");
        assert_eq!(docs[4].id, "x1");
        assert_eq!(docs[5].title, "local");
    }

    #[test]
    fn test_bad_corpus_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_corpus_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
