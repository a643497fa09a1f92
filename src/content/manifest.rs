use serde::Deserialize;

use super::ArticleDescriptor;
use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    tags: Vec<String>,
    file: String,
}

/// Parse the manifest JSON into descriptors, preserving order.
pub fn parse_manifest(json: &str) -> Result<Vec<ArticleDescriptor>, LoadError> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(json).map_err(|e| LoadError::Manifest(e.to_string()))?;

    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = article_id(&entry.file);
        if id.is_empty() {
            log::warn!("manifest entry `{}` has no file locator, skipping", entry.title);
            continue;
        }
        if descriptors.iter().any(|d: &ArticleDescriptor| d.id == id) {
            log::warn!("duplicate article id `{}` in manifest, keeping first", id);
            continue;
        }
        descriptors.push(ArticleDescriptor {
            id,
            title: entry.title,
            author: entry.author,
            date: entry.date,
            tags: entry.tags,
            source_ref: entry.file,
        });
    }
    Ok(descriptors)
}

/// Stable id of a source locator: its last path segment minus the extension.
///
/// `posts/my-post.md` -> `my-post`
pub fn article_id(file: &str) -> String {
    let name = file.rsplit('/').next().unwrap_or(file);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let json = r#"[
            {"title": "Newest", "author": "A", "date": "March 2, 2024", "tags": ["rust", "web"], "file": "new-post.md"},
            {"title": "Older", "author": "B", "date": "Jan 1, 2023", "tags": [], "file": "posts/old.post.md"}
        ]"#;
        let list = parse_manifest(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "new-post");
        assert_eq!(list[0].tags, vec!["rust", "web"]);
        assert_eq!(list[1].id, "old.post");
        assert_eq!(list[1].source_ref, "posts/old.post.md");
    }

    #[test]
    fn missing_optional_fields_default() {
        let list = parse_manifest(r#"[{"title": "T", "file": "t.md"}]"#).unwrap();
        assert_eq!(list[0].author, "");
        assert!(list[0].tags.is_empty());
    }

    #[test]
    fn malformed_json_is_manifest_error() {
        assert!(matches!(
            parse_manifest("{not json"),
            Err(LoadError::Manifest(_))
        ));
        assert!(matches!(
            parse_manifest(r#"[{"title": "no file"}]"#),
            Err(LoadError::Manifest(_))
        ));
    }

    #[test]
    fn entry_without_locator_is_skipped() {
        let json = r#"[
            {"title": "Broken", "file": ""},
            {"title": "Fine", "file": "fine.md"}
        ]"#;
        let list = parse_manifest(json).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "fine");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let json = r#"[
            {"title": "One", "file": "a/x.md"},
            {"title": "Two", "file": "b/x.md"}
        ]"#;
        let list = parse_manifest(json).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "One");
    }

    #[test]
    fn article_id_strips_extension() {
        assert_eq!(article_id("my-post.md"), "my-post");
        assert_eq!(article_id("dir/sub/note"), "note");
        assert_eq!(article_id(".hidden"), ".hidden");
    }
}
