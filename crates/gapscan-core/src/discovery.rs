use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::DiscoveryConfig;

/// Finds CloudFormation template files under a root directory.
pub struct TemplateFinder {
    root: PathBuf,
    config: DiscoveryConfig,
}

impl TemplateFinder {
    /// Creates a finder rooted at the given path with default discovery settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: DiscoveryConfig::default(),
        }
    }

    /// Creates a finder with custom discovery settings.
    pub fn with_config(root: impl Into<PathBuf>, config: DiscoveryConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Collects template paths, sorted for deterministic output.
    ///
    /// A root that is itself a file is returned as-is; the caller named it
    /// explicitly, so extension filters do not apply.
    pub fn find(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let exclude_dirs = self.config.exclude_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !exclude_dirs.iter().any(|d| d == name.as_ref())
            })
            .build();

        let mut templates = Vec::new();
        for entry in walker.flatten() {
            let path = entry.path();

            if !path.is_file() || !self.matches_extension(path) {
                continue;
            }

            templates.push(path.to_path_buf());
        }

        templates.sort();
        templates
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config
            .include_extensions
            .iter()
            .any(|e| e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_templates_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stack.yaml"), "Resources: {}").unwrap();
        fs::write(dir.path().join("stack.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

        let found = TemplateFinder::new(dir.path()).find();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["stack.json", "stack.yaml"]);
    }

    #[test]
    fn test_excluded_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("node_modules").join("pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("template.yaml"), "Resources: {}").unwrap();
        fs::write(dir.path().join("template.yaml"), "Resources: {}").unwrap();

        let found = TemplateFinder::new(dir.path()).find();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], dir.path().join("template.yaml"));
    }

    #[test]
    fn test_file_root_returned_directly() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("template.unusual");
        fs::write(&file, "Resources: {}").unwrap();

        let found = TemplateFinder::new(&file).find();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stack.template"), "{}").unwrap();
        fs::write(dir.path().join("stack.yaml"), "Resources: {}").unwrap();

        let config = DiscoveryConfig {
            include_extensions: vec!["template".to_string()],
            ..DiscoveryConfig::default()
        };
        let found = TemplateFinder::with_config(dir.path(), config).find();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], dir.path().join("stack.template"));
    }
}
