//! Link rewriting for exported Markdown documents
//!
//! A Notion export references other pages through three shapes: full Markdown
//! links whose destination is a relative path with a unique-id suffix, bare
//! relative paths floating in text, and absolute notion.so URLs. All three are
//! rewritten into Obsidian `[[wiki-link]]` syntax in a single forward scan so
//! that text consumed by an earlier shape is never re-matched by a later one.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Extensions treated as image references when they terminate a link
/// destination. Image files themselves are never renamed.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "gif", "jpg", "jpeg", "svg", "webp"];

/// Characters Obsidian refuses in note names; replaced with spaces in link text.
fn illegal_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[*"/\\<>:|?]"#).expect("valid regex"))
}

/// Signature of an external URL: a scheme separator, `www`, or a dotted-quad.
/// Full-link spans matching this stay exactly as written.
fn url_signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(://)|(w{3})|(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").expect("valid regex")
    })
}

/// `[text](destination)` plus any trailing whitespace, which is re-emitted
/// after the rewritten link.
fn full_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)(\s*)").expect("valid regex"))
}

/// A whitespace-delimited token ending in `.md`, optionally followed by a
/// closing parenthesis.
fn floater_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\S*\.md\)?").expect("valid regex"))
}

/// A token containing the hosted service's domain marker.
fn notion_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S*notion\.so\S*").expect("valid regex"))
}

/// True when the path ends in one of the recognized image extensions.
pub fn is_image_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Convert a relative path with an encoded-space unique-id suffix into a
/// wiki-link: the final `/`-segment is split on literal `%20`, the trailing
/// id token dropped, and the rest joined with real spaces.
///
/// `Some%20Folder/Page%20Title%20abcdef0123456789` becomes `[[Page Title]]`.
pub fn convert_relative_path(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let pieces: Vec<&str> = segment.split("%20").collect();
    let title = pieces[..pieces.len().saturating_sub(1)].join(" ");
    format!("[[{title}]]")
}

/// Convert a notion.so URL into a wiki-link: the final `/`-segment is split
/// on hyphens, the trailing unique id dropped, and the rest joined with
/// spaces.
pub fn convert_notion_link(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let pieces: Vec<&str> = segment.split('-').collect();
    let title = pieces[..pieces.len().saturating_sub(1)].join(" ");
    format!("[[{title}]]")
}

/// A planned move of one referenced image into the centralized `Images/`
/// directory under the export root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRelocation {
    /// Root-relative link path substituted into the document
    pub image_link_path: String,
    /// Where the image currently lives on disk
    pub original_file_path: PathBuf,
    /// Where the image will be moved
    pub new_file_path: PathBuf,
}

impl ImageRelocation {
    /// Compute the relocation for a raw link destination found in a document
    /// under `current_dir`.
    pub fn compute(root: &Path, current_dir: &Path, destination: &str) -> Self {
        let (dir_part, file_part) = match destination.rfind('/') {
            Some(idx) => (&destination[..idx], &destination[idx + 1..]),
            None => ("", destination),
        };

        // The file name keeps its encoded spaces decoded; the directory
        // portion goes through the wiki-link formatter and is unwrapped
        // again, reusing its segment cleaning.
        let image_title = file_part.split("%20").collect::<Vec<_>>().join(" ");
        let cleaned_dir = {
            let link = convert_relative_path(dir_part);
            link[2..link.len() - 2].to_string()
        };

        let relative = if cleaned_dir.is_empty() {
            image_title
        } else {
            format!("{cleaned_dir}/{image_title}")
        };
        let dir_from_root = current_dir.strip_prefix(root).unwrap_or(current_dir);
        let full_relative = if dir_from_root.as_os_str().is_empty() {
            relative
        } else {
            format!("{}/{relative}", dir_from_root.display())
        };

        ImageRelocation {
            image_link_path: format!("/Images/{full_relative}"),
            original_file_path: root.join(&full_relative),
            new_file_path: root.join("Images").join(&full_relative),
        }
    }
}

/// Result of rewriting one document body.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The rewritten content (identical to the input when nothing matched)
    pub content: String,
    /// Number of links actually rewritten across all three shapes
    pub links: usize,
    /// Image relocations discovered in this document, deduplicated,
    /// insertion order preserved
    pub images: Vec<ImageRelocation>,
}

/// Rewrite every internal link in `content` to wiki-link syntax.
///
/// Full links are handled first; the text between them is then scanned for
/// floating relative paths and notion.so URLs. Spans matching the URL
/// signature are preserved verbatim.
pub fn rewrite_links(root: &Path, current_dir: &Path, content: &str) -> RewriteOutcome {
    if !full_link_re().is_match(content)
        && !floater_re().is_match(content)
        && !notion_re().is_match(content)
    {
        return RewriteOutcome {
            content: content.to_string(),
            links: 0,
            images: Vec::new(),
        };
    }

    let mut out = String::with_capacity(content.len());
    let mut links = 0usize;
    let mut images: Vec<ImageRelocation> = Vec::new();
    let mut last = 0usize;

    for caps in full_link_re().captures_iter(content) {
        let span = caps.get(0).expect("capture group 0 always present");
        rewrite_free_text(&content[last..span.start()], &mut out, &mut links);
        last = span.end();

        if url_signature_re().is_match(span.as_str()) {
            // legitimate external link
            out.push_str(span.as_str());
            continue;
        }

        let destination = &caps[2];
        let new_text = if is_image_path(destination) {
            let relocation = ImageRelocation::compute(root, current_dir, destination);
            let link_path = relocation.image_link_path.clone();
            if !images.contains(&relocation) {
                images.push(relocation);
            }
            link_path
        } else {
            illegal_name_re().replace_all(&caps[1], " ").into_owned()
        };

        links += 1;
        out.push_str("[[");
        out.push_str(&new_text);
        out.push_str("]]");
        out.push_str(&caps[3]);
    }
    rewrite_free_text(&content[last..], &mut out, &mut links);

    RewriteOutcome {
        content: out,
        links,
        images,
    }
}

/// Rewrite floating relative paths and notion.so URLs in a text segment not
/// consumed by any full-link match.
fn rewrite_free_text(segment: &str, out: &mut String, links: &mut usize) {
    if segment.is_empty() {
        return;
    }

    let with_paths = floater_re().replace_all(segment, |caps: &regex::Captures| {
        *links += 1;
        convert_relative_path(&caps[0])
    });
    let with_notion = notion_re().replace_all(&with_paths, |caps: &regex::Captures| {
        *links += 1;
        convert_notion_link(&caps[0])
    });
    out.push_str(&with_notion);
}
