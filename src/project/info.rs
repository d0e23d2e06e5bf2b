//! Project name and version from the Maven descriptor.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::migrate::scan::find_first;
use crate::ports::filesystem::FileSystem;

const POM_FILE: &str = "pom.xml";
/// npm's default when the descriptor carries no version.
const FALLBACK_VERSION: &str = "1.0.0";

/// Identity of the migrated project, reused for the generated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Maven `artifactId`.
    pub name: String,
    /// Project version, or the parent's when the project inherits it.
    pub version: String,
}

/// Finds the first `pom.xml` under `root` and reads its identity.
///
/// # Errors
///
/// Returns an error if no descriptor exists, it cannot be read, or it has no
/// top-level `artifactId`.
pub fn read_project_info(fs: &dyn FileSystem, root: &Path) -> Result<ProjectInfo, String> {
    let pom = find_first(fs, root, POM_FILE)
        .ok_or_else(|| format!("No {POM_FILE} found under {}", root.display()))?;
    debug!(path = %pom.display(), "reading project descriptor");
    let content = fs
        .read_to_string(&pom)
        .map_err(|e| format!("Failed to read {}: {e}", pom.display()))?;
    parse_pom(&content).map_err(|e| format!("{}: {e}", pom.display()))
}

/// Element tags; comments and CDATA are matched so their contents are skipped.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<(/?)([A-Za-z_][\w.:-]*)[^>]*?(/?)>")
        .expect("valid tag pattern")
});

/// Predefined and numeric character references.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid entity pattern")
});

/// Text content of a leaf element, with CDATA unwrapped and references decoded.
fn element_text(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix("<![CDATA[").and_then(|r| r.strip_suffix("]]>")) {
        return inner.trim().to_string();
    }
    ENTITY
        .replace_all(raw, |caps: &Captures<'_>| {
            let name = &caps[1];
            match name {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => name
                    .strip_prefix("#x")
                    .map_or_else(|| name[1..].parse().ok(), |hex| u32::from_str_radix(hex, 16).ok())
                    .and_then(char::from_u32)
                    .map_or_else(|| caps[0].to_string(), String::from),
            }
        })
        .into_owned()
}

/// Extracts `project/artifactId` and `project/version` from descriptor text.
fn parse_pom(content: &str) -> Result<ProjectInfo, String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut opened_at: Vec<usize> = Vec::new();
    let mut name = None;
    let mut version = None;
    let mut parent_version = None;

    for caps in TAG.captures_iter(content) {
        let Some(tag) = caps.get(2) else { continue };
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        if self_closing {
            continue;
        }
        if !closing {
            stack.push(tag.as_str());
            opened_at.push(whole.end);
            continue;
        }

        let start = opened_at.pop().unwrap_or(whole.start);
        let text = element_text(&content[start..whole.start]);
        match stack.as_slice() {
            ["project", "artifactId"] => name = Some(text),
            ["project", "version"] => version = Some(text),
            ["project", "parent", "version"] => parent_version = Some(text),
            _ => {}
        }
        stack.pop();
    }

    let name = name.filter(|n| !n.is_empty()).ok_or("missing project/artifactId")?;
    let version = version.or(parent_version).filter(|v| !v.is_empty()).unwrap_or_else(|| {
        warn!(project = %name, "no version in descriptor, using {FALLBACK_VERSION}");
        FALLBACK_VERSION.to_string()
    });
    Ok(ProjectInfo { name, version })
}
