use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// A fixed configuration text block with named placeholder tokens. Each
/// block mode selects exactly one template.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub body: &'static str,
    pub placeholders: &'static [&'static str],
}

impl Template {
    /// Substitutes placeholders in a single pass over the body. A
    /// replacement value is emitted verbatim and never re-scanned, so a
    /// value that happens to contain another placeholder token stays as-is.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body;
        'scan: while !rest.is_empty() {
            for (name, value) in values {
                if !name.is_empty() && rest.starts_with(name) {
                    out.push_str(value);
                    rest = &rest[name.len()..];
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
        out
    }

    /// True when a placeholder token survived rendering.
    pub fn leaks_placeholders(&self, rendered: &str) -> bool {
        self.placeholders.iter().any(|p| rendered.contains(p))
    }
}

/// Appends `fragment` (including its leading separation) to `path`,
/// creating the file if absent. Re-runs are safe: when the fragment is
/// already present the file is left untouched and `false` is returned.
pub fn append_unless_present(path: &Path, fragment: &str) -> Result<bool> {
    let body = fragment.trim();
    if body.is_empty() {
        return Ok(false);
    }

    let existing = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(Error::msg(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };
    if existing.contains(body) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::msg(format!("failed to create {}: {e}", parent.display())))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::msg(format!("failed to open {}: {e}", path.display())))?;
    file.write_all(fragment.as_bytes())
        .map_err(|e| Error::msg(format!("failed to append to {}: {e}", path.display())))?;
    Ok(true)
}
