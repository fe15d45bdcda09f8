use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Applies an ordered sequence of (match, replacement) substitutions to an
/// existing file, line by line. Each substitution rewrites the first
/// occurrence of its match on every line it appears on; a substitution that
/// matches nothing is not an error, so repeated runs are safe. The file is
/// only rewritten when something actually changed. Returns the number of
/// lines touched.
pub fn patch_lines(path: &Path, substitutions: &[(String, String)]) -> Result<usize> {
    let original = fs::read_to_string(path)
        .map_err(|e| Error::msg(format!("failed to read {}: {e}", path.display())))?;

    let mut touched = 0usize;
    let mut out = String::with_capacity(original.len());
    for line in original.split_inclusive('\n') {
        let mut current = line.to_string();
        let mut line_changed = false;
        for (find, replace) in substitutions {
            if !find.is_empty() && current.contains(find.as_str()) {
                current = current.replacen(find.as_str(), replace, 1);
                line_changed = true;
            }
        }
        if line_changed {
            touched += 1;
        }
        out.push_str(&current);
    }

    if out == original {
        return Ok(0);
    }
    fs::write(path, out)
        .map_err(|e| Error::msg(format!("failed to write {}: {e}", path.display())))?;
    Ok(touched)
}
