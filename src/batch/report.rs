use std::fmt;
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

/// One entry that was renamed (and possibly relabelled)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renamed {
    pub id: String,
    pub previous: String,
    pub address: String,
    pub labels_changed: usize,
}

/// A selected id with no addressable entry behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    pub id: String,
    /// Known when the id is a registered asset that is not addressable
    pub asset_path: Option<PathBuf>,
}

impl fmt::Display for UnresolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.asset_path {
            Some(path) => write!(f, "{} is not part of the catalog", path.display()),
            None => write!(f, "{} is not part of the catalog", self.id),
        }
    }
}

/// Outcome of a batch
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub renamed: Vec<Renamed>,
    pub unresolved: Vec<UnresolvedEntry>,
    /// Catalog revision after the batched notification, if anything changed
    pub revision: Option<u64>,
}

impl ApplyReport {
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.renamed.len()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.unresolved.len()
    }

    /// Print each outcome followed by a summary
    pub fn print(&self, operation: &str, quiet: bool) {
        for item in &self.renamed {
            if quiet {
                println!("{}", item.address);
            } else if item.previous == item.address {
                println!("  {} {} (unchanged)", "=".dimmed(), item.address);
            } else {
                println!("  {} {} → {}", "✓".green(), item.previous, item.address.cyan());
            }
        }
        if quiet {
            return;
        }
        for item in &self.unresolved {
            eprintln!("  {} {item}", "⚠".yellow());
        }

        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Renamed:".green(), self.renamed.len());
        let relabelled = self.renamed.iter().filter(|r| r.labels_changed > 0).count();
        if relabelled > 0 {
            println!("  {} {}", "✓ Relabelled:".green(), relabelled);
        }
        if !self.unresolved.is_empty() {
            println!("  {} {}", "⊘ Not in catalog:".yellow(), self.unresolved.len());
        }
        if let Some(revision) = self.revision {
            println!("  {} {}", "Catalog revision:".dimmed(), revision);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_names_path_when_known() {
        let with_path = UnresolvedEntry {
            id: "g1".into(),
            asset_path: Some(PathBuf::from("Assets/Raw/notes.txt")),
        };
        assert_eq!(with_path.to_string(), "Assets/Raw/notes.txt is not part of the catalog");

        let without = UnresolvedEntry {
            id: "g2".into(),
            asset_path: None,
        };
        assert_eq!(without.to_string(), "g2 is not part of the catalog");
    }
}
