use crate::{
    classify::{Category, Classifier},
    errors::{FileOperation, IoError},
    filter::PathFilter,
    guid::identifier_for,
};
use indexmap::IndexMap;
use miette::Diagnostic;
use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    #[error("I/O error while scanning the source tree")]
    #[diagnostic(code(vcxgen::scan::io))]
    Io(#[from] IoError),

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(vcxgen::scan::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        root: PathBuf,
        source: std::path::StripPrefixError,
    },
}

/// Separator used by the IDE for include paths and filter names.
const SEPARATOR: char = '\\';

/// Position of a folder inside [`ProjectModel`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(usize);

/// Composite identity of a virtual folder: the category root it hangs under and
/// the physical directory chain leading to it. An empty chain is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderKey {
    pub category: Category,
    pub relative_path: Vec<String>,
}

impl FolderKey {
    pub fn root(category: Category) -> Self {
        Self {
            category,
            relative_path: Vec::new(),
        }
    }

    /// `Category Name` for roots, `Category Name\a\b` otherwise.
    pub fn filter_path(&self) -> String {
        let mut path = self.category.name().to_string();
        for segment in &self.relative_path {
            path.push(SEPARATOR);
            path.push_str(segment);
        }
        path
    }
}

#[derive(Debug, Clone)]
pub struct VirtualFolder {
    pub key: FolderKey,
    pub identifier: String,
    pub filter_path: String,
    /// Only category roots advertise extensions.
    pub extensions: Option<&'static str>,
    pub parent: Option<FolderId>,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub category: Category,
    /// Path relative to the generation root, e.g. `.\src\main.c`.
    pub include: String,
    pub folder: FolderId,
}

/// Everything both descriptors are rendered from.
///
/// Folders live in insertion order in an arena keyed by [`FolderKey`]; a folder
/// is only ever inserted after its parent, so walking [`ProjectModel::folders`]
/// front to back always meets ancestors first.
#[derive(Debug, Clone)]
pub struct ProjectModel {
    folders: IndexMap<FolderKey, VirtualFolder>,
    entries: [Vec<FileEntry>; 3],
}

impl Default for ProjectModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectModel {
    /// An empty model holding only the three category roots.
    pub fn new() -> Self {
        let mut folders = IndexMap::new();

        for category in Category::ALL {
            let key = FolderKey::root(category);
            folders.insert(
                key.clone(),
                VirtualFolder {
                    filter_path: key.filter_path(),
                    key,
                    identifier: category.root_identifier().to_string(),
                    extensions: Some(category.root_extensions()),
                    parent: None,
                },
            );
        }

        Self {
            folders,
            entries: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    pub fn folders(&self) -> impl Iterator<Item = &VirtualFolder> {
        self.folders.values()
    }

    pub fn folder(&self, id: FolderId) -> Option<&VirtualFolder> {
        self.folders.get_index(id.0).map(|(_, folder)| folder)
    }

    pub fn find_folder(&self, key: &FolderKey) -> Option<FolderId> {
        self.folders.get_index_of(key).map(FolderId)
    }

    pub fn entries(&self, category: Category) -> &[FileEntry] {
        &self.entries[category.index()]
    }

    /// Filter path of the folder owning `entry`.
    pub fn filter_of(&self, entry: &FileEntry) -> &str {
        self.folder(entry.folder)
            .map(|folder| folder.filter_path.as_str())
            .unwrap_or_else(|| entry.category.name())
    }

    /// Returns the folder for `(category, relative_path)`, declaring it and any
    /// missing ancestors first.
    fn ensure_folder(&mut self, category: Category, relative_path: &[String]) -> FolderId {
        let root = FolderKey::root(category);
        let mut parent = FolderId(self.folders.get_index_of(&root).unwrap_or_default());

        for depth in 1..=relative_path.len() {
            let key = FolderKey {
                category,
                relative_path: relative_path[..depth].to_vec(),
            };

            parent = match self.folders.get_index_of(&key) {
                Some(index) => FolderId(index),
                None => {
                    let filter_path = key.filter_path();
                    log::debug!("declaring filter: {}", filter_path);

                    let (index, _) = self.folders.insert_full(
                        key.clone(),
                        VirtualFolder {
                            identifier: identifier_for(&filter_path),
                            filter_path,
                            key,
                            extensions: None,
                            parent: Some(parent),
                        },
                    );
                    FolderId(index)
                }
            };
        }

        parent
    }

    /// Classifies the direct children of one directory and records them.
    fn add_directory(
        &mut self,
        relative_path: &[String],
        file_names: &[String],
        filter: &PathFilter,
        classifier: &Classifier,
    ) {
        let mut grouped: [Vec<&str>; 3] = [Vec::new(), Vec::new(), Vec::new()];

        for name in file_names {
            if filter.should_exclude_file(name) {
                log::debug!("skipping generated file: {}", name);
                continue;
            }
            if let Some(category) = classifier.classify(name) {
                grouped[category.index()].push(name);
            }
        }

        for category in Category::ALL {
            let names = &grouped[category.index()];
            if names.is_empty() {
                continue;
            }

            let folder = self.ensure_folder(category, relative_path);

            for name in names {
                self.entries[category.index()].push(FileEntry {
                    category,
                    include: include_path(relative_path, name),
                    folder,
                });
            }
        }
    }
}

fn include_path(relative_path: &[String], file_name: &str) -> String {
    let mut include = String::from(".");
    for segment in relative_path {
        include.push(SEPARATOR);
        include.push_str(segment);
    }
    include.push(SEPARATOR);
    include.push_str(file_name);
    include
}

fn relative_segments(path: &Path, root: &Path) -> Result<Vec<String>, ScanError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|error| ScanError::StripPrefix {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
            source: error,
        })?;

    Ok(relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_string()),
            _ => None,
        })
        .collect())
}

/// Walks `root` once and returns each kept directory (relative segments) with
/// the names of its direct child files, in pre-order.
fn collect_directories(
    root: &Path,
    filter: &PathFilter,
) -> Result<IndexMap<Vec<String>, Vec<String>>, ScanError> {
    let mut directories: IndexMap<Vec<String>, Vec<String>> = IndexMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let excluded = entry.file_type().is_dir()
                && filter.should_exclude_directory(entry.path(), root);
            if excluded {
                log::debug!("skipping excluded directory: {}", entry.path().display());
            }
            !excluded
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(root).to_path_buf();

                Err(IoError::new(FileOperation::Walk, path, error.into()))?
            }
        };

        if entry.file_type().is_dir() {
            let relative = relative_segments(entry.path(), root)?;
            directories.entry(relative).or_default();
        } else {
            let parent = entry.path().parent().unwrap_or(root);
            let relative = relative_segments(parent, root)?;

            directories
                .entry(relative)
                .or_default()
                .push(entry.file_name().to_string_lossy().to_string());
        }
    }

    Ok(directories)
}

/// Builds the virtual folder tree and file lists for everything under `root`.
///
/// Directories are visited in pre-order with siblings sorted by name, so the
/// result only depends on the tree's contents.
pub fn build_model(
    root: &Path,
    filter: &PathFilter,
    classifier: &Classifier,
) -> Result<ProjectModel, ScanError> {
    let mut model = ProjectModel::new();
    let mut processed: HashSet<Vec<String>> = HashSet::new();

    for (relative, files) in collect_directories(root, filter)? {
        if !processed.insert(relative.clone()) {
            continue;
        }

        model.add_directory(&relative, &files, filter, classifier);
    }

    log::debug!(
        "scanned {}: {} filters, {} sources, {} headers, {} resources",
        root.display(),
        model.folders.len(),
        model.entries(Category::Source).len(),
        model.entries(Category::Header).len(),
        model.entries(Category::Resource).len(),
    );

    Ok(model)
}
