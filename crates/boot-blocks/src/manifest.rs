use std::fs;
use std::io::Write;
use std::path::Path;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{Error, Result};

/// Element whose text content is the single numeric first-boot flag.
pub const FLAG_ELEMENT: &str = "firstboot";

/// Boot phases a manifest block can be tagged with (the `type` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FirstBoot,
    NextBoot,
}

impl Phase {
    pub fn marker(self) -> &'static str {
        match self {
            Phase::FirstBoot => "onfirstboot",
            Phase::NextBoot => "onnextboot",
        }
    }

    /// Recognizes a marker from the closed set; anything else fails closed.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "onfirstboot" => Some(Phase::FirstBoot),
            "onnextboot" => Some(Phase::NextBoot),
            _ => None,
        }
    }
}

/// Removes every `block` element tagged with the phase marker, keeping the
/// order and content of everything else, then rewrites the manifest via a
/// temporary file and atomic rename so a crash never leaves a torn
/// document. With `clear_flag` the flag element's text is reset to `0`.
pub fn strip_phase(path: &Path, phase: Phase, clear_flag: bool) -> Result<()> {
    let data = fs::read_to_string(path)
        .map_err(|e| Error::msg(format!("failed to read manifest {}: {e}", path.display())))?;
    let mut root = Element::parse(data.as_bytes()).map_err(|e| {
        Error::not_found(format!(
            "manifest {} is not valid XML: {e}",
            path.display()
        ))
    })?;

    remove_marked(&mut root, phase.marker());

    if clear_flag && !reset_flag(&mut root) {
        return Err(Error::not_found(format!(
            "manifest {} has no <{}> element",
            path.display(),
            FLAG_ELEMENT
        )));
    }

    write_atomically(path, &root)
}

fn remove_marked(parent: &mut Element, marker: &str) {
    parent.children.retain(|node| match node {
        XMLNode::Element(el) => {
            !(el.name == "block" && el.attributes.get("type").is_some_and(|t| t == marker))
        }
        _ => true,
    });
    for node in parent.children.iter_mut() {
        if let XMLNode::Element(el) = node {
            remove_marked(el, marker);
        }
    }
}

/// Replaces the whole text of the first flag element found. Returns false
/// when the document has none.
fn reset_flag(el: &mut Element) -> bool {
    if el.name == FLAG_ELEMENT {
        el.children.clear();
        el.children.push(XMLNode::Text("0".to_string()));
        return true;
    }
    for node in el.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            if reset_flag(child) {
                return true;
            }
        }
    }
    false
}

fn write_atomically(path: &Path, root: &Element) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".manifest-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            Error::msg(format!(
                "failed to create temp file in {}: {e}",
                dir.display()
            ))
        })?;

    // The visual editor that produced the document writes no declaration;
    // keep the rewritten file in the same shape.
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(false);
    root.write_with_config(tmp.as_file_mut(), config)
        .map_err(|e| Error::msg(format!("failed to serialize manifest: {e}")))?;
    tmp.as_file_mut().flush()?;

    tmp.persist(path).map_err(|e| {
        Error::msg(format!(
            "failed to replace manifest {}: {e}",
            path.display()
        ))
    })?;
    Ok(())
}
