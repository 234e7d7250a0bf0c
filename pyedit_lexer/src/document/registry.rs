//! Open-document bookkeeping and file-system event handling

use super::buffer::{Document, DocumentError};
use crate::config::compile_time::document::MAX_OPEN_DOCUMENTS;
use crate::config::runtime::HighlightPreferences;
use crate::log_success;
use crate::logging::codes;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// Change reported by the file watcher. Paths may name a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Renamed { from: PathBuf, to: PathBuf },
    Deleted(PathBuf),
}

/// What happened to an open document as a result of a [`FileEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChange {
    Renamed {
        id: DocumentId,
        from: PathBuf,
        to: PathBuf,
    },
    Closed {
        id: DocumentId,
        path: PathBuf,
    },
}

#[derive(Debug)]
pub struct DocumentRegistry {
    documents: BTreeMap<DocumentId, Document>,
    next_id: u64,
    carry_string_state: bool,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
            next_id: 1,
            carry_string_state: false,
        }
    }

    pub fn from_preferences(prefs: &HighlightPreferences) -> Self {
        Self {
            carry_string_state: prefs.carry_string_state,
            ..Self::new()
        }
    }

    /// Open `path`, or return the id it is already open under
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<DocumentId, DocumentError> {
        let path = path.as_ref();
        if let Some(id) = self.find_by_path(path) {
            return Ok(id);
        }

        self.ensure_capacity()?;
        let document = Document::open(path)?;
        self.insert(document)
    }

    /// Track an already-loaded document
    pub fn insert(&mut self, document: Document) -> Result<DocumentId, DocumentError> {
        self.ensure_capacity()?;

        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents
            .insert(id, document.with_string_state_carry(self.carry_string_state));
        Ok(id)
    }

    fn ensure_capacity(&self) -> Result<(), DocumentError> {
        if self.documents.len() >= MAX_OPEN_DOCUMENTS {
            return Err(DocumentError::TooManyDocuments {
                max: MAX_OPEN_DOCUMENTS,
            });
        }
        Ok(())
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.path() == path)
            .map(|(id, _)| *id)
    }

    pub fn close(&mut self, id: DocumentId) -> Option<Document> {
        let document = self.documents.remove(&id)?;
        log_success!(codes::success::DOCUMENT_CLOSED, "Document closed",
            "id" => id,
            "path" => document.path().display()
        );
        Some(document)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentId, &Document)> {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    /// Apply a watcher event to every document at or below the event path
    pub fn handle(&mut self, event: &FileEvent) -> Vec<DocumentChange> {
        match event {
            FileEvent::Renamed { from, to } => self.rename(from, to),
            FileEvent::Deleted(path) => self.remove_under(path),
        }
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Vec<DocumentChange> {
        let moves: Vec<(DocumentId, PathBuf)> = self
            .documents
            .iter()
            .filter_map(|(id, document)| {
                let relative = document.path().strip_prefix(from).ok()?;
                let new_path = if relative.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(relative)
                };
                Some((*id, new_path))
            })
            .collect();

        // A document already open at a destination path is replaced by the moved one
        let replaced: Vec<DocumentId> = self
            .documents
            .iter()
            .filter(|(id, document)| {
                !moves.iter().any(|(moved, _)| moved == *id)
                    && moves.iter().any(|(_, target)| target == document.path())
            })
            .map(|(id, _)| *id)
            .collect();

        let mut changes: Vec<DocumentChange> = replaced
            .into_iter()
            .filter_map(|id| {
                self.close(id).map(|document| DocumentChange::Closed {
                    id,
                    path: document.path().to_path_buf(),
                })
            })
            .collect();

        for (id, new_path) in moves {
            let Some(document) = self.documents.get_mut(&id) else {
                continue;
            };
            let old_path = document.path().to_path_buf();
            document.set_path(new_path.clone());

            log_success!(codes::success::DOCUMENT_RENAMED, "Document renamed",
                "id" => id,
                "from" => old_path.display(),
                "to" => new_path.display()
            );
            changes.push(DocumentChange::Renamed {
                id,
                from: old_path,
                to: new_path,
            });
        }

        changes
    }

    fn remove_under(&mut self, path: &Path) -> Vec<DocumentChange> {
        let doomed: Vec<DocumentId> = self
            .documents
            .iter()
            .filter(|(_, doc)| doc.path().starts_with(path))
            .map(|(id, _)| *id)
            .collect();

        doomed
            .into_iter()
            .filter_map(|id| {
                self.close(id).map(|document| DocumentChange::Closed {
                    id,
                    path: document.path().to_path_buf(),
                })
            })
            .collect()
    }
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn registry_with(paths: &[&str]) -> (DocumentRegistry, Vec<DocumentId>) {
        let mut registry = DocumentRegistry::new();
        let ids = paths
            .iter()
            .map(|p| registry.insert(Document::from_text(*p, "")).unwrap())
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_open_reuses_existing_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.py");
        fs::write(&path, "x = 1\n").unwrap();

        let mut registry = DocumentRegistry::new();
        let first = registry.open(&path).unwrap();
        let second = registry.open(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).unwrap().text(), "x = 1\n");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempdir().unwrap();
        let mut registry = DocumentRegistry::new();
        assert_matches!(
            registry.open(dir.path().join("nope.py")),
            Err(DocumentError::NotFound { .. })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rename_single_file() {
        let (mut registry, ids) = registry_with(&["/p/a.txt", "/p/b.py"]);

        let changes = registry.handle(&FileEvent::Renamed {
            from: PathBuf::from("/p/a.txt"),
            to: PathBuf::from("/p/a.py"),
        });

        assert_eq!(
            changes,
            vec![DocumentChange::Renamed {
                id: ids[0],
                from: PathBuf::from("/p/a.txt"),
                to: PathBuf::from("/p/a.py"),
            }]
        );
        let renamed = registry.get(ids[0]).unwrap();
        assert_eq!(renamed.path(), Path::new("/p/a.py"));
        assert!(renamed.is_python());
    }

    #[test]
    fn test_rename_directory_moves_children() {
        let (mut registry, ids) = registry_with(&["/src/pkg/a.py", "/src/pkg/sub/b.py", "/src/pkgx/c.py"]);

        let changes = registry.handle(&FileEvent::Renamed {
            from: PathBuf::from("/src/pkg"),
            to: PathBuf::from("/lib/pkg"),
        });

        assert_eq!(changes.len(), 2);
        assert_eq!(registry.get(ids[0]).unwrap().path(), Path::new("/lib/pkg/a.py"));
        assert_eq!(registry.get(ids[1]).unwrap().path(), Path::new("/lib/pkg/sub/b.py"));
        // Sibling that merely shares a name prefix is untouched
        assert_eq!(registry.get(ids[2]).unwrap().path(), Path::new("/src/pkgx/c.py"));
    }

    #[test]
    fn test_rename_onto_open_document_closes_it() {
        let (mut registry, ids) = registry_with(&["/p/a.py", "/p/b.py"]);

        let changes = registry.handle(&FileEvent::Renamed {
            from: PathBuf::from("/p/a.py"),
            to: PathBuf::from("/p/b.py"),
        });

        assert_eq!(
            changes,
            vec![
                DocumentChange::Closed {
                    id: ids[1],
                    path: PathBuf::from("/p/b.py"),
                },
                DocumentChange::Renamed {
                    id: ids[0],
                    from: PathBuf::from("/p/a.py"),
                    to: PathBuf::from("/p/b.py"),
                },
            ]
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_path(Path::new("/p/b.py")), Some(ids[0]));
    }

    #[test]
    fn test_delete_closes_documents_under_path() {
        let (mut registry, ids) = registry_with(&["/w/x.py", "/w/d/y.py", "/w/z.py"]);

        let changes = registry.handle(&FileEvent::Deleted(PathBuf::from("/w/d")));
        assert_eq!(
            changes,
            vec![DocumentChange::Closed {
                id: ids[1],
                path: PathBuf::from("/w/d/y.py"),
            }]
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.get(ids[1]).is_none());

        let changes = registry.handle(&FileEvent::Deleted(PathBuf::from("/w/x.py")));
        assert_eq!(changes.len(), 1);
        assert_eq!(registry.find_by_path(Path::new("/w/z.py")), Some(ids[2]));
    }

    #[test]
    fn test_registry_applies_carry_preference() {
        let prefs = HighlightPreferences {
            carry_string_state: true,
            consistent_def_style: false,
            log_metrics: false,
        };
        let mut registry = DocumentRegistry::from_preferences(&prefs);
        let id = registry.insert(Document::from_text("a.py", "s = 'x y'")).unwrap();

        let classifier = crate::highlight::Classifier::python();
        let mut sink = crate::highlight::SpanRecorder::new();
        let document = registry.get_mut(id).unwrap();
        document.restyle(&classifier, 0, 6, &mut sink).unwrap();
        assert_eq!(document.checkpoint_count(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (mut registry, ids) = registry_with(&["/a.py"]);
        registry.close(ids[0]);
        let next = registry.insert(Document::from_text("/b.py", "")).unwrap();
        assert_ne!(ids[0], next);
        assert_eq!(next.to_string(), "doc-2");
    }
}
