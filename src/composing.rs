//! Dialect composition over a fragment directory tree
//!
//! Fragment files live in a hierarchy where the root holds the shared
//! default declarations and each subdirectory level refines them for a more
//! specific dialect. Composing a dialect means walking from the root down to
//! the target dialect directory and merging every fragment file's
//! declarations along the way.
//!
//! Ordering is the whole point of the traversal:
//!
//! - all fragment files in a directory are processed before descending, so
//!   every declaration at one tree depth is captured before a deeper
//!   override of the same name replaces it;
//! - only the one subdirectory on the root-to-target path is entered;
//!   sibling dialect directories are skipped entirely;
//! - files within a directory are visited in lexicographic name order, so
//!   the result does not depend on platform `read_dir` order.
//!
//! A file that cannot be read or extracted is recorded as a failure and the
//! traversal moves on; fragment files are independent of each other.

use crate::extraction::{extract_declarations, DeclarationSet, ExtractError};
use crate::keyword::{keywords_from_assignment, Keyword};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default filename extension for grammar fragment files
pub const DEFAULT_FRAGMENT_EXTENSION: &str = "jj";

/// Result of composing one dialect: the merged declarations plus every
/// per-file failure encountered along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Composition {
    pub declarations: DeclarationSet,
    pub failures: Vec<FileFailure>,
}

impl Composition {
    /// All keywords declared by the accumulated token assignments, in
    /// declaration order, deduplicated by keyword equality.
    pub fn keywords(&self) -> Vec<Keyword> {
        let mut keywords: Vec<Keyword> = Vec::new();
        for assignment in &self.declarations.token_assignments {
            for keyword in keywords_from_assignment(assignment, None) {
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }
        }
        keywords
    }
}

/// A fragment file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Why a fragment file was skipped
#[derive(Debug, Clone, Serialize)]
pub enum FileError {
    /// File could not be read
    Io(String),
    /// Declaration extraction failed
    Extract(ExtractError),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Io(message) => write!(f, "read error: {}", message),
            FileError::Extract(error) => write!(f, "{}", error),
        }
    }
}

/// Error that aborts composition as a whole
#[derive(Debug)]
pub enum ComposeError {
    /// Target dialect directory is not under the root
    TargetOutsideRoot { root: PathBuf, target: PathBuf },
    /// A path segment between root and target is not valid UTF-8
    InvalidTarget(PathBuf),
    /// A directory on the dialect path does not exist
    MissingDirectory(PathBuf),
    /// A directory on the dialect path could not be listed
    Io { path: PathBuf, message: String },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::TargetOutsideRoot { root, target } => write!(
                f,
                "dialect directory {} is not under root {}",
                target.display(),
                root.display()
            ),
            ComposeError::InvalidTarget(path) => {
                write!(f, "dialect path {} is not valid UTF-8", path.display())
            }
            ComposeError::MissingDirectory(path) => {
                write!(f, "dialect directory {} does not exist", path.display())
            }
            ComposeError::Io { path, message } => {
                write!(f, "cannot list {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// Compute the ordered directory-name segments from `root` down to `target`.
///
/// An empty segment list means the target is the root itself.
pub fn dialect_path(root: &Path, target: &Path) -> Result<Vec<String>, ComposeError> {
    let relative = target
        .strip_prefix(root)
        .map_err(|_| ComposeError::TargetOutsideRoot {
            root: root.to_path_buf(),
            target: target.to_path_buf(),
        })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(segment) => segments.push(segment.to_owned()),
                None => return Err(ComposeError::InvalidTarget(target.to_path_buf())),
            },
            Component::CurDir => {}
            _ => return Err(ComposeError::InvalidTarget(target.to_path_buf())),
        }
    }
    Ok(segments)
}

/// Walks the fragment tree and accumulates declarations in override order
#[derive(Debug, Clone)]
pub struct DialectComposer {
    extension: String,
}

impl DialectComposer {
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_FRAGMENT_EXTENSION.to_string(),
        }
    }

    /// Use a different fragment filename extension (without the dot)
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Compose the dialect at `target`, layering its overrides over every
    /// directory between `root` and `target` inclusive.
    pub fn compose(&self, root: &Path, target: &Path) -> Result<Composition, ComposeError> {
        let segments = dialect_path(root, target)?;
        let mut composition = Composition::default();
        self.walk(root, &segments, &mut composition)?;
        Ok(composition)
    }

    fn walk(
        &self,
        dir: &Path,
        remaining: &[String],
        composition: &mut Composition,
    ) -> Result<(), ComposeError> {
        for file in self.fragment_files(dir)? {
            match self.extract_file(&file) {
                Ok(set) => composition.declarations.merge(set),
                Err(error) => composition.failures.push(FileFailure { path: file, error }),
            }
        }

        if let Some((next, rest)) = remaining.split_first() {
            let subdir = dir.join(next);
            if !subdir.is_dir() {
                return Err(ComposeError::MissingDirectory(subdir));
            }
            self.walk(&subdir, rest, composition)?;
        }

        Ok(())
    }

    /// Fragment files directly in `dir`, sorted by name
    fn fragment_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ComposeError> {
        let entries = fs::read_dir(dir).map_err(|error| ComposeError::Io {
            path: dir.to_path_buf(),
            message: error.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| ComposeError::Io {
                path: dir.to_path_buf(),
                message: error.to_string(),
            })?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
            {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn extract_file(&self, path: &Path) -> Result<DeclarationSet, FileError> {
        let text = fs::read_to_string(path).map_err(|error| FileError::Io(error.to_string()))?;
        extract_declarations(&text).map_err(FileError::Extract)
    }
}

impl Default for DialectComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose with the default fragment extension
pub fn compose(root: &Path, target: &Path) -> Result<Composition, ComposeError> {
    DialectComposer::new().compose(root, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    fn function(name: &str, body: &str) -> String {
        format!("T {name}() :\n{{\n}}\n{{ {body} }}\n")
    }

    #[test]
    fn test_dialect_path_segments() {
        let root = Path::new("/grammar");
        let target = Path::new("/grammar/ansi/mysql");
        assert_eq!(
            dialect_path(root, target).unwrap(),
            vec!["ansi".to_string(), "mysql".to_string()]
        );
        assert!(dialect_path(root, root).unwrap().is_empty());
    }

    #[test]
    fn test_dialect_path_outside_root() {
        let err = dialect_path(Path::new("/grammar"), Path::new("/elsewhere")).unwrap_err();
        assert!(matches!(err, ComposeError::TargetOutsideRoot { .. }));
    }

    #[test]
    fn test_deeper_declaration_overrides_shallower() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let dialect = root.join("mysql");
        fs::create_dir(&dialect).unwrap();

        write(root, "base.jj", &function("x", "base"));
        write(&dialect, "override.jj", &function("x", "mysql"));

        let composition = compose(root, &dialect).unwrap();
        assert!(composition.failures.is_empty());
        assert!(composition
            .declarations
            .functions
            .get("x")
            .unwrap()
            .contains("mysql"));
    }

    #[test]
    fn test_sibling_dialects_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("mysql")).unwrap();
        fs::create_dir(root.join("oracle")).unwrap();

        write(root, "base.jj", &function("x", "base"));
        write(&root.join("mysql"), "a.jj", &function("m", "mysql"));
        write(&root.join("oracle"), "a.jj", &function("o", "oracle"));

        let composition = compose(root, &root.join("mysql")).unwrap();
        let names: Vec<&String> = composition.declarations.functions.keys().collect();
        assert_eq!(names, vec!["x", "m"]);
    }

    #[test]
    fn test_files_in_name_order_within_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(root, "b.jj", &function("x", "from b"));
        write(root, "a.jj", &function("x", "from a"));

        let composition = compose(root, root).unwrap();
        // b.jj sorts after a.jj, so its definition wins
        assert!(composition
            .declarations
            .functions
            .get("x")
            .unwrap()
            .contains("from b"));
    }

    #[test]
    fn test_non_fragment_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(root, "base.jj", &function("x", "base"));
        write(root, "notes.txt", "T y() :\n{\n}\n{\n}\n");

        let composition = compose(root, root).unwrap();
        assert_eq!(composition.declarations.functions.len(), 1);
    }

    #[test]
    fn test_token_assignments_accumulate_in_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let dialect = root.join("pg");
        fs::create_dir(&dialect).unwrap();

        write(root, "base.jj", "TOKEN :\n{ <A: \"a\"> }\n");
        write(&dialect, "extra.jj", "TOKEN :\n{ <B: \"b\"> }\n");

        let composition = compose(root, &dialect).unwrap();
        let assignments = &composition.declarations.token_assignments;
        assert_eq!(assignments.len(), 2);
        assert!(assignments[0].contains("<A:"));
        assert!(assignments[1].contains("<B:"));
    }

    #[test]
    fn test_keywords_deduplicate_across_assignments() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let dialect = root.join("pg");
        fs::create_dir(&dialect).unwrap();

        write(root, "base.jj", "TOKEN :\n{ < SELECT: \"SELECT\" > }\n");
        write(
            &dialect,
            "extra.jj",
            "TOKEN :\n{ < select: \"select\" >\n  | < LATERAL: \"LATERAL\" > }\n",
        );

        let composition = compose(root, &dialect).unwrap();
        let keywords = composition.keywords();
        let names: Vec<&str> = keywords.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["SELECT", "LATERAL"]);
        // First occurrence wins for the value
        assert_eq!(keywords[0].value(), "\"SELECT\"");
    }

    #[test]
    fn test_bad_file_is_reported_and_traversal_continues() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let dialect = root.join("pg");
        fs::create_dir(&dialect).unwrap();

        write(root, "broken.jj", "T bad() :\nno block here\n");
        write(&dialect, "good.jj", &function("ok", "pg"));

        let composition = compose(root, &dialect).unwrap();
        assert_eq!(composition.failures.len(), 1);
        assert!(composition.failures[0].path.ends_with("broken.jj"));
        assert!(composition.declarations.functions.contains_key("ok"));
    }

    #[test]
    fn test_missing_dialect_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let err = compose(root, &root.join("nope")).unwrap_err();
        assert!(matches!(err, ComposeError::MissingDirectory(_)));
    }

    #[test]
    fn test_custom_extension() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(root, "base.frag", &function("x", "base"));
        write(root, "base.jj", &function("y", "base"));

        let composer = DialectComposer::with_extension("frag");
        let composition = composer.compose(root, root).unwrap();
        let names: Vec<&String> = composition.declarations.functions.keys().collect();
        assert_eq!(names, vec!["x"]);
    }
}
