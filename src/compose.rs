//! Address composition
//!
//! Builds a new address for one asset from ordered optional fragments:
//!
//! ```text
//! {prefix0}.{prefix1}.{prefix2}.{FolderName}.{AssetName}.{postfix0}
//! ```
//!
//! Every part except the asset name is optional; an empty part is left out
//! together with its separator. Fragments are not sanitized: a fragment that
//! itself contains the separator is copied through as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Character placed between fragments
pub const SEPARATOR: char = '.';

/// Human-readable description of the composed format
pub const FORMAT_HINT: &str =
    "Example format, all optional:\n {prefix0}.{prefix1}.{prefix2}.{FolderName}.{AssetName}.{postfix}";

/// Naming fragments for one bulk rename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentSet {
    pub prefix0: String,
    pub prefix1: String,
    pub prefix2: String,
    pub postfix0: String,
    /// Insert the asset's containing folder name before its base name
    pub prepend_folder_name: bool,
}

impl FragmentSet {
    /// Prefixes in composition order
    #[must_use]
    pub fn prefixes(&self) -> [&str; 3] {
        [
            self.prefix0.as_str(),
            self.prefix1.as_str(),
            self.prefix2.as_str(),
        ]
    }

    /// True when composing would return the base name unchanged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes().iter().all(|p| p.is_empty())
            && self.postfix0.is_empty()
            && !self.prepend_folder_name
    }

    /// Compose an address from the fragments, an asset base name and the
    /// name of its containing folder
    ///
    /// An empty `folder_name` is skipped even when `prepend_folder_name` is
    /// set. The base name is always written.
    ///
    /// # Examples
    ///
    /// ```
    /// use addressor::compose::FragmentSet;
    ///
    /// let fragments = FragmentSet {
    ///     prefix0: "env".into(),
    ///     prefix2: "ui".into(),
    ///     prepend_folder_name: true,
    ///     ..FragmentSet::default()
    /// };
    /// assert_eq!(fragments.compose("Button", "Widgets"), "env.ui.Widgets.Button");
    /// ```
    #[must_use]
    pub fn compose(&self, base_name: &str, folder_name: &str) -> String {
        let mut address = String::with_capacity(50);

        for prefix in self.prefixes() {
            if !prefix.is_empty() {
                address.push_str(prefix);
                address.push(SEPARATOR);
            }
        }
        if self.prepend_folder_name && !folder_name.is_empty() {
            address.push_str(folder_name);
            address.push(SEPARATOR);
        }
        address.push_str(base_name);
        if !self.postfix0.is_empty() {
            address.push(SEPARATOR);
            address.push_str(&self.postfix0);
        }

        address
    }
}

/// Names derived from an asset path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetNames {
    /// File name without its last extension
    pub base_name: String,
    /// Name of the immediate parent directory, empty at the root
    pub folder_name: String,
}

impl AssetNames {
    /// Leading dots of hidden files and folders are dropped so they cannot
    /// produce two separators in a row.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let base_name = path
            .file_stem()
            .map(|s| undotted(&s.to_string_lossy()))
            .unwrap_or_default();
        let folder_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|s| undotted(&s.to_string_lossy()))
            .unwrap_or_default();
        Self {
            base_name,
            folder_name,
        }
    }
}

fn undotted(name: &str) -> String {
    name.trim_start_matches(SEPARATOR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(p0: &str, p1: &str, p2: &str, post: &str, folder: bool) -> FragmentSet {
        FragmentSet {
            prefix0: p0.into(),
            prefix1: p1.into(),
            prefix2: p2.into(),
            postfix0: post.into(),
            prepend_folder_name: folder,
        }
    }

    #[test]
    fn test_all_empty_returns_base_name() {
        let set = FragmentSet::default();
        assert!(set.is_empty());
        assert_eq!(set.compose("Icon", "Sprites"), "Icon");
    }

    #[test]
    fn test_skips_empty_middle_prefix() {
        let set = fragments("env", "", "ui", "", true);
        assert_eq!(set.compose("Button", "Widgets"), "env.ui.Widgets.Button");
    }

    #[test]
    fn test_postfix_only() {
        let set = fragments("", "", "", "hd", false);
        assert_eq!(set.compose("Icon", "Sprites"), "Icon.hd");
    }

    #[test]
    fn test_folder_ignored_when_flag_off() {
        let set = fragments("a", "", "", "", false);
        assert_eq!(set.compose("Icon", "Sprites"), "a.Icon");
    }

    #[test]
    fn test_empty_folder_name_is_omitted() {
        let set = fragments("env", "", "", "", true);
        assert_eq!(set.compose("Readme", ""), "env.Readme");
    }

    #[test]
    fn test_separator_in_fragment_is_not_sanitized() {
        let set = fragments("a.b", "", "", "", false);
        assert_eq!(set.compose("Icon", ""), "a.b.Icon");
    }

    #[test]
    fn test_no_stray_separators_for_any_combination() {
        let values = ["", "x", "yz"];
        for p0 in values {
            for p1 in values {
                for p2 in values {
                    for post in values {
                        for folder in [false, true] {
                            let set = fragments(p0, p1, p2, post, folder);
                            let out = set.compose("Base", "Dir");
                            assert!(!out.contains(".."), "double separator in {out}");
                            assert!(!out.starts_with(SEPARATOR), "leading separator in {out}");
                            assert!(!out.ends_with(SEPARATOR), "trailing separator in {out}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fragment_order() {
        let set = fragments("p0", "p1", "p2", "post", true);
        let out = set.compose("Base", "Dir");
        assert_eq!(out, "p0.p1.p2.Dir.Base.post");

        let positions: Vec<usize> = ["p0", "p1", "p2", "Dir", "Base", "post"]
            .iter()
            .map(|part| out.find(part).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_asset_names_from_path() {
        let names = AssetNames::from_path(Path::new("Assets/Widgets/Button.prefab"));
        assert_eq!(names.base_name, "Button");
        assert_eq!(names.folder_name, "Widgets");
    }

    #[test]
    fn test_asset_names_keeps_inner_dots() {
        let names = AssetNames::from_path(Path::new("Assets/Fx/spark.hd.png"));
        assert_eq!(names.base_name, "spark.hd");
    }

    #[test]
    fn test_hidden_names_do_not_double_separators() {
        let names = AssetNames::from_path(Path::new("Assets/.hidden"));
        assert_eq!(names.base_name, "hidden");
        let set = fragments("", "", "", "", true);
        assert_eq!(set.compose(&names.base_name, &names.folder_name), "Assets.hidden");

        let names = AssetNames::from_path(Path::new("Assets/.cache/.tmp.png"));
        assert_eq!(names.base_name, "tmp");
        assert_eq!(names.folder_name, "cache");
        assert_eq!(set.compose(&names.base_name, &names.folder_name), "cache.tmp");
    }

    #[test]
    fn test_asset_names_at_root() {
        let names = AssetNames::from_path(Path::new("Icon.png"));
        assert_eq!(names.base_name, "Icon");
        assert_eq!(names.folder_name, "");
    }
}
