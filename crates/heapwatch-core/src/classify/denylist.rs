//! Operator-supplied exclusion list.
//!
//! A plain text file of comma-separated names to drop from constructor
//! reporting, loaded once at startup. A missing or unreadable file is
//! not an error: monitoring proceeds with an empty list and a warning.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

/// Loads the operator denylist from `path`.
pub fn load_manual_excludes(path: &Path) -> HashSet<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let excludes: HashSet<String> = content
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            info!(
                "Loaded {} manual exclusions from {}",
                excludes.len(),
                path.display()
            );
            excludes
        }
        Err(e) => {
            warn!(
                "Could not read manual exclusions file {} ({}). Proceeding without manual exclusions.",
                path.display(),
                e
            );
            HashSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_comma_separated_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Foo, Bar,,  Baz ,").unwrap();

        let excludes = load_manual_excludes(file.path());
        assert_eq!(excludes.len(), 3);
        assert!(excludes.contains("Foo"));
        assert!(excludes.contains("Bar"));
        assert!(excludes.contains("Baz"));
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let excludes = load_manual_excludes(Path::new("/nonexistent/excludes.txt"));
        assert!(excludes.is_empty());
    }
}
