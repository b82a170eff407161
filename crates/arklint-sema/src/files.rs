//! Source-file registry.
//!
//! The checker classifies declarations by the file they come from: its
//! extension, whether it is a declaration file, and its location relative to
//! the configured ignore lists. Files are registered once and referenced by
//! `FileId` from every AST node.

/// Identifier of a registered source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileId(pub u32);

/// Metadata for one source file.
#[derive(Clone, Debug)]
pub struct SourceFileInfo {
    /// Normalized path, `/`-separated.
    pub path: String,
    /// Whether this is a declaration file (`.d.ts` / `.d.ets`).
    pub is_declaration_file: bool,
}

impl SourceFileInfo {
    /// The final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Lower-cased extension including the dot (`.ets`, `.ts`), or empty.
    pub fn extension_lowercase(&self) -> String {
        match self.file_name().rfind('.') {
            Some(dot) => self.file_name()[dot..].to_lowercase(),
            None => String::new(),
        }
    }

    /// Whether any `/`-separated path component equals `dir`.
    pub fn path_contains_directory(&self, dir: &str) -> bool {
        self.path.split('/').any(|component| component == dir)
    }
}

/// Append-only registry of source files.
#[derive(Default)]
pub struct FileRegistry {
    files: Vec<SourceFileInfo>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, is_declaration_file: bool) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFileInfo {
            path: path.into(),
            is_declaration_file,
        });
        id
    }

    pub fn get(&self, id: FileId) -> &SourceFileInfo {
        &self.files[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
