//! Text sources: where the characters for the rain come from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Documents compiled into the binary.
const BUILTIN: &[(&str, &str)] = &[
    ("alice.txt", include_str!("../assets/alice.txt")),
    ("katakana.txt", include_str!("../assets/katakana.txt")),
    ("raven.txt", include_str!("../assets/raven.txt")),
];

/// Errors raised while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no document named '{0}'")]
    NotFound(String),
    #[error("failed to read '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' is not valid UTF-8 text")]
    Encoding(String),
}

/// A named collection of text documents.
pub trait TextSource {
    /// Names of the documents this source can read, in display order.
    fn list_documents(&self) -> Vec<String>;

    /// Read a document as a sequence of characters, one per cell.
    fn read_document(&self, name: &str) -> Result<Vec<char>, SourceError>;
}

/// Turn text into cell characters. Line breaks and tabs become spaces so
/// every character occupies exactly one cell.
pub fn to_cells(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c => c,
        })
        .collect()
}

/// The documents shipped with the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinDocuments;

impl TextSource for BuiltinDocuments {
    fn list_documents(&self) -> Vec<String> {
        BUILTIN.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn read_document(&self, name: &str) -> Result<Vec<char>, SourceError> {
        BUILTIN
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| to_cells(text))
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }
}

/// Regular files in a directory, listed by file name.
#[derive(Debug, Clone)]
pub struct DirectoryDocuments {
    root: PathBuf,
}

impl DirectoryDocuments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a document name to a path, refusing anything that could
    /// escape the directory.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(name))
    }
}

impl TextSource for DirectoryDocuments {
    fn list_documents(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %self.root.display(), error = %e, "cannot list documents");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    fn read_document(&self, name: &str) -> Result<Vec<char>, SourceError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| SourceError::NotFound(name.to_string()))?;
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(name.to_string())
            } else {
                SourceError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })?;
        let text = String::from_utf8(bytes).map_err(|_| SourceError::Encoding(name.to_string()))?;
        Ok(to_cells(&text))
    }
}

/// Several sources chained together. Earlier sources win on name clashes.
#[derive(Default)]
pub struct DocumentLibrary {
    sources: Vec<Box<dyn TextSource>>,
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in documents, followed by `documents_dir` when configured.
    pub fn standard(documents_dir: Option<&Path>) -> Self {
        let mut library = Self::new().with(BuiltinDocuments);
        if let Some(dir) = documents_dir {
            library = library.with(DirectoryDocuments::new(dir));
        }
        library
    }

    pub fn with(mut self, source: impl TextSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl TextSource for DocumentLibrary {
    fn list_documents(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for source in &self.sources {
            for name in source.list_documents() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn read_document(&self, name: &str) -> Result<Vec<char>, SourceError> {
        for source in &self.sources {
            match source.read_document(name) {
                Err(SourceError::NotFound(_)) => continue,
                result => return result,
            }
        }
        Err(SourceError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_to_cells_flattens_whitespace() {
        let cells = to_cells("a\nb\tc\r\n");
        assert_eq!(cells, vec!['a', ' ', 'b', ' ', 'c', ' ', ' ']);
        assert_eq!(to_cells("ア1"), vec!['ア', '1']);
    }

    #[test]
    fn test_builtin_documents() {
        let builtin = BuiltinDocuments;
        let names = builtin.list_documents();
        assert_eq!(names, vec!["alice.txt", "katakana.txt", "raven.txt"]);
        for name in &names {
            let chars = builtin.read_document(name).unwrap();
            assert!(!chars.is_empty());
            assert!(!chars.contains(&'\n'));
        }
        assert!(matches!(
            builtin.read_document("missing.txt"),
            Err(SourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_documents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("b.txt"), "bee").unwrap();
        fs::write(dir.join("a.txt"), "ay\n").unwrap();
        fs::write(dir.join("bad.bin"), [0xff, 0xfe, 0x00]).unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();

        let docs = DirectoryDocuments::new(dir);
        assert_eq!(docs.list_documents(), vec!["a.txt", "b.txt", "bad.bin"]);
        assert_eq!(docs.read_document("a.txt").unwrap(), vec!['a', 'y', ' ']);
        assert!(matches!(
            docs.read_document("bad.bin"),
            Err(SourceError::Encoding(_))
        ));
        assert!(matches!(
            docs.read_document("../a.txt"),
            Err(SourceError::NotFound(_))
        ));
        assert!(matches!(
            docs.read_document("gone.txt"),
            Err(SourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let docs = DirectoryDocuments::new(tmp.path().join("no-such-dir"));
        assert!(docs.list_documents().is_empty());
    }

    #[test]
    fn test_library_prefers_builtin_and_falls_through() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("alice.txt"), "shadowed").unwrap();
        fs::write(dir.join("zeta.txt"), "zz").unwrap();

        let library = DocumentLibrary::standard(Some(dir));
        let names = library.list_documents();
        assert_eq!(
            names,
            vec!["alice.txt", "katakana.txt", "raven.txt", "zeta.txt"]
        );
        assert_ne!(library.read_document("alice.txt").unwrap(), to_cells("shadowed"));
        assert_eq!(library.read_document("zeta.txt").unwrap(), vec!['z', 'z']);
        assert!(matches!(
            library.read_document("nope"),
            Err(SourceError::NotFound(_))
        ));
    }
}
