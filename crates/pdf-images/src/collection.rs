use crate::types::*;
use std::collections::HashSet;

/// Result of an [`ImageCollection::add_files`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Candidates that passed the image filter, duplicates included
    pub accepted: usize,
    /// Files actually appended
    pub added: usize,
    /// Accepted files skipped because an equal file was already present
    pub duplicates: usize,
}

/// Ordered, deduplicated list of images staged for conversion
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    files: Vec<SelectedFile>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the image files among `candidates`, skipping duplicates.
    ///
    /// Fails with [`ImageError::NoImages`] and leaves the collection untouched
    /// when no candidate has an `image/*` MIME type.
    pub fn add_files(
        &mut self,
        candidates: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<AddOutcome> {
        let images: Vec<SelectedFile> = candidates.into_iter().filter(|f| f.is_image()).collect();

        if images.is_empty() {
            return Err(ImageError::NoImages);
        }

        let mut known: HashSet<FileKey> = self.files.iter().map(SelectedFile::key).collect();
        let accepted = images.len();
        let mut added = 0;

        for file in images {
            if known.insert(file.key()) {
                log::debug!("Adding {} ({} bytes)", file.name, file.size);
                self.files.push(file);
                added += 1;
            } else {
                log::debug!("Skipping duplicate {}", file.name);
            }
        }

        Ok(AddOutcome {
            accepted,
            added,
            duplicates: accepted - added,
        })
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SelectedFile> {
        if index >= self.files.len() {
            return Err(ImageError::InvalidIndex {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    pub fn remove(&mut self, id: FileId) -> Option<SelectedFile> {
        let index = self.position(id)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Swap a file with its predecessor. Returns false when it is already first.
    pub fn move_up(&mut self, id: FileId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.files.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Swap a file with its successor. Returns false when it is already last.
    pub fn move_down(&mut self, id: FileId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.files.len() => {
                self.files.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedFile> {
        self.files.iter()
    }

    /// Owned copy for work that must not observe later edits
    pub fn snapshot(&self) -> Vec<SelectedFile> {
        self.files.clone()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
