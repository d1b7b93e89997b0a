//! Run target: the output identity owned by one run

use std::path::{Path, PathBuf};

/// Slug used when the role yields no alphanumeric characters
pub const DEFAULT_SLUG: &str = "jobs";

/// Extension of the tabular artifact, without the dot
pub const ARTIFACT_EXTENSION: &str = "xlsx";

const SEPARATOR: char = '_';

/// Derives a filesystem-safe slug from free-text role input
///
/// Lower-cases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `_` and trims separators from both ends. An empty
/// result falls back to [`DEFAULT_SLUG`].
pub fn slugify(role: &str) -> String {
    let mut slug = String::with_capacity(role.len());
    let mut pending_separator = false;

    for c in role.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

/// Output identity of a single run
///
/// Created fresh per request and never reused. `output_id` doubles as the
/// artifact file stem and the public download reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub slug: String,
    pub output_id: String,
    pub output_path: PathBuf,
}

impl RunTarget {
    /// Builds a target inside `output_dir`
    ///
    /// Only the slug and the uniqueness token contribute to the file name, so
    /// no caller-controlled path component can escape the directory.
    pub fn new(output_dir: &Path, slug: &str, token: &str) -> Self {
        let output_id = format!("{}{}{}", slug, SEPARATOR, token);
        let output_path = output_dir.join(format!("{}.{}", output_id, ARTIFACT_EXTENSION));
        Self {
            slug: slug.to_string(),
            output_id,
            output_path,
        }
    }

    /// Artifact file name, e.g. `hr_manager_1700000000000_0.xlsx`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.output_id, ARTIFACT_EXTENSION)
    }

    /// Public download reference served by the orchestrator
    pub fn download_url(&self) -> String {
        format!("/downloads/{}", self.file_name())
    }
}

/// Checks that a requested download name is a bare artifact file name
///
/// Accepts a single path segment of `[A-Za-z0-9_.-]` ending in the artifact
/// extension. Anything with `..` or a separator is refused.
pub fn is_artifact_file_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(&format!(".{}", ARTIFACT_EXTENSION)) else {
        return false;
    };

    !stem.is_empty()
        && !name.contains("..")
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("HR Manager"), "hr_manager");
        assert_eq!(slugify("  Senior   Rust/Go Engineer!! "), "senior_rust_go_engineer");
        assert_eq!(slugify("C++ Dev 2"), "c_dev_2");
    }

    #[test]
    fn test_slugify_falls_back_to_default() {
        assert_eq!(slugify(""), DEFAULT_SLUG);
        assert_eq!(slugify("!!! --- ???"), DEFAULT_SLUG);
        assert_eq!(slugify("日本語"), DEFAULT_SLUG);
    }

    #[test]
    fn test_slugify_output_shape() {
        let inputs = [
            "HR Manager",
            "__a__b__",
            "../../etc/passwd",
            "Ünïcode Röle",
            "x",
            "  -- data   science -- ",
        ];

        for input in inputs {
            let slug = slugify(input);
            assert!(!slug.is_empty());
            assert!(!slug.starts_with('_'), "{slug}");
            assert!(!slug.ends_with('_'), "{slug}");
            assert!(!slug.contains("__"), "{slug}");
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{slug}"
            );
        }
    }

    #[test]
    fn test_slugify_path_traversal_is_neutralized() {
        assert_eq!(slugify("../../etc/passwd"), "etc_passwd");
    }

    #[test]
    fn test_run_target_paths() {
        let target = RunTarget::new(Path::new("/srv/downloads"), "hr_manager", "1700_3");
        assert_eq!(target.output_id, "hr_manager_1700_3");
        assert_eq!(target.file_name(), "hr_manager_1700_3.xlsx");
        assert_eq!(target.download_url(), "/downloads/hr_manager_1700_3.xlsx");
        assert_eq!(
            target.output_path,
            PathBuf::from("/srv/downloads/hr_manager_1700_3.xlsx")
        );
    }

    #[test]
    fn test_distinct_tokens_give_distinct_paths() {
        let dir = Path::new("/srv/downloads");
        let a = RunTarget::new(dir, "jobs", "1700_0");
        let b = RunTarget::new(dir, "jobs", "1700_1");
        assert_ne!(a.output_path, b.output_path);
    }

    #[test]
    fn test_artifact_file_name_validation() {
        assert!(is_artifact_file_name("hr_manager_1700_0.xlsx"));
        assert!(is_artifact_file_name("jobs-1.xlsx"));
        assert!(!is_artifact_file_name("../secret.xlsx"));
        assert!(!is_artifact_file_name("..xlsx"));
        assert!(!is_artifact_file_name(".xlsx"));
        assert!(!is_artifact_file_name("a/b.xlsx"));
        assert!(!is_artifact_file_name("a\\b.xlsx"));
        assert!(!is_artifact_file_name("jobs.csv"));
        assert!(!is_artifact_file_name("jobs"));
    }
}
