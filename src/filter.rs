use std::path::{Component, Path};

/// Directory names that never take part in generation, compared case-insensitively.
pub const DEFAULT_EXCLUDED_DIRECTORIES: &[&str] = &["obj", "bin", "debug", "release"];

/// File name suffixes produced by kernel module builds.
pub const DEFAULT_GENERATED_SUFFIXES: &[&str] = &[".mod.c"];

/// Decides which directories and files participate in a generation run.
///
/// Built once with its exclusion tables and never mutated afterwards, so the
/// same instance can answer for every entry of a walk.
#[derive(Debug, Clone)]
pub struct PathFilter {
    excluded_directories: Vec<String>,
    generated_suffixes: Vec<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DIRECTORIES.iter().copied(),
            DEFAULT_GENERATED_SUFFIXES.iter().copied(),
        )
    }
}

impl PathFilter {
    pub fn new<D, S>(excluded_directories: D, generated_suffixes: S) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            excluded_directories: excluded_directories
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
            generated_suffixes: generated_suffixes
                .into_iter()
                .map(|suffix| suffix.as_ref().to_string())
                .collect(),
        }
    }

    /// Returns `true` when `path` must be skipped along with everything below it.
    ///
    /// Only the segments of `path` relative to `root` are inspected, so a root
    /// that itself lives under a hidden or `bin` directory is still scanned.
    pub fn should_exclude_directory(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);

        relative.components().any(|component| match component {
            Component::Normal(segment) => self.is_excluded_segment(&segment.to_string_lossy()),
            _ => false,
        })
    }

    /// Returns `true` for generated artifacts that must not be listed.
    pub fn should_exclude_file(&self, name: &str) -> bool {
        self.generated_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }

    fn is_excluded_segment(&self, segment: &str) -> bool {
        if segment.starts_with('.') && segment.len() > 1 {
            return true;
        }

        let lowered = segment.to_lowercase();

        self.excluded_directories.iter().any(|name| *name == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_segments_are_excluded() {
        let filter = PathFilter::default();
        let root = Path::new("/work/project");

        assert!(filter.should_exclude_directory(Path::new("/work/project/.git"), root));
        assert!(filter.should_exclude_directory(
            Path::new("/work/project/src/.cache/objs"),
            root
        ));
        assert!(!filter.should_exclude_directory(Path::new("/work/project/src"), root));
    }

    #[test]
    fn build_output_names_match_case_insensitively() {
        let filter = PathFilter::default();
        let root = Path::new("/work/project");

        assert!(filter.should_exclude_directory(Path::new("/work/project/Debug"), root));
        assert!(filter.should_exclude_directory(Path::new("/work/project/x/RELEASE/y"), root));
        assert!(filter.should_exclude_directory(Path::new("/work/project/obj"), root));
        assert!(!filter.should_exclude_directory(Path::new("/work/project/binutils"), root));
    }

    #[test]
    fn root_ancestors_are_not_inspected() {
        let filter = PathFilter::default();
        let root = Path::new("/home/me/.local/bin/project");

        assert!(!filter.should_exclude_directory(root, root));
        assert!(!filter.should_exclude_directory(&root.join("src"), root));
    }

    #[test]
    fn generated_suffix_only_matches_full_suffix() {
        let filter = PathFilter::default();

        assert!(filter.should_exclude_file("module.mod.c"));
        assert!(!filter.should_exclude_file("module.c"));
        assert!(!filter.should_exclude_file("mod.cpp"));
    }

    #[test]
    fn injected_tables_replace_defaults() {
        let filter = PathFilter::new(["Build"], [".gen.h"]);
        let root = Path::new("/p");

        assert!(filter.should_exclude_directory(Path::new("/p/build"), root));
        assert!(!filter.should_exclude_directory(Path::new("/p/obj"), root));
        assert!(filter.should_exclude_file("table.gen.h"));
        assert!(!filter.should_exclude_file("module.mod.c"));
    }
}
