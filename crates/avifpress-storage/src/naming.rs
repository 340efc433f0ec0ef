//! Artifact naming scheme
//!
//! Incoming uploads get a millisecond timestamp plus a random fragment so two
//! uploads of the same original name in the same millisecond cannot overwrite
//! each other. Derived outputs are deterministic per (source, quality) so a
//! repeated request resolves to the same path.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Strip path components and hostile characters from a client-supplied
/// filename. The result never contains separators or parent-dir sequences.
pub fn sanitize_filename(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    let cleaned: String = last
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Unique on-disk name for an uploaded artifact.
pub fn incoming_file_name(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        millis,
        &nonce[..8],
        sanitize_filename(original)
    )
}

/// Default output name for a derived artifact:
/// `{stem}_compressed_{quality}%.avif`.
pub fn derived_file_name(source: &Path, quality_pct: i64) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}_compressed_{}%.avif", stem, quality_pct)
}

/// Resolve the output path for a derived artifact. An explicit override wins
/// verbatim; otherwise the default name is placed under `derived_dir`.
/// Pure function, no I/O.
pub fn resolve_derived_path(
    derived_dir: &Path,
    source: &Path,
    quality_pct: i64,
    output_override: Option<&Path>,
) -> PathBuf {
    match output_override {
        Some(path) => path.to_path_buf(),
        None => derived_dir.join(derived_file_name(source, quality_pct)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("...."), "upload");
        assert_eq!(sanitize_filename("///"), "upload");
    }

    #[test]
    fn test_incoming_names_are_unique() {
        let a = incoming_file_name("photo.jpg");
        let b = incoming_file_name("photo.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("photo.jpg"));
    }

    #[test]
    fn test_derived_file_name_pattern() {
        let name = derived_file_name(Path::new("tmp/123_ab_photo.jpg"), 80);
        assert_eq!(name, "123_ab_photo_compressed_80%.avif");
    }

    #[test]
    fn test_resolve_derived_path_is_deterministic() {
        let dir = Path::new("compressed");
        let source = Path::new("tmp/123_ab_photo.jpg");
        let a = resolve_derived_path(dir, source, 80, None);
        let b = resolve_derived_path(dir, source, 80, None);
        assert_eq!(a, b);
        assert_eq!(
            a,
            Path::new("compressed/123_ab_photo_compressed_80%.avif")
        );
    }

    #[test]
    fn test_resolve_derived_path_override_wins() {
        let dir = Path::new("compressed");
        let source = Path::new("tmp/photo.jpg");
        let explicit = Path::new("/somewhere/else/out.avif");
        let resolved = resolve_derived_path(dir, source, 50, Some(explicit));
        assert_eq!(resolved, explicit);
    }
}
