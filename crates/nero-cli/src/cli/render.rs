//! # Rendering
//!
//! Turns API results into terminal text. Two modes:
//! - **Human** (default): one line per item, styled with `console`.
//! - **JSON** (`--json`): the public wire schema, pretty-printed.
//!
//! Rendering functions return strings; the caller prints them.

use console::style;
use nero::api::MediaView;
use nero::{Format, Metadata, Repository};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepoSummary {
    pub id: String,
    pub backing: &'static str,
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl From<&Repository> for RepoSummary {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id().to_string(),
            backing: if repo.is_file_backed() {
                "file"
            } else {
                "memory"
            },
            items: repo.len(),
            root: repo.root().map(|root| root.display().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn media(&self, view: &MediaView) -> String {
        if self.json {
            return to_json(view);
        }
        media_line(view)
    }

    pub fn media_list(&self, views: &[MediaView]) -> String {
        if self.json {
            return to_json(views);
        }
        if views.is_empty() {
            return style("No items.").dim().to_string();
        }
        views.iter().map(media_line).collect::<Vec<_>>().join("\n")
    }

    pub fn removed(&self, view: &MediaView) -> String {
        if self.json {
            return to_json(view);
        }
        format!("Removed {}", style(view.id).cyan())
    }

    pub fn repos(&self, repos: &[RepoSummary]) -> String {
        if self.json {
            return to_json(repos);
        }
        if repos.is_empty() {
            return style("No repositories configured.").dim().to_string();
        }
        repos
            .iter()
            .map(|repo| {
                let mut line = format!(
                    "{}  {}  {} items",
                    style(&repo.id).bold(),
                    style(repo.backing).dim(),
                    repo.items
                );
                if let Some(root) = &repo.root {
                    line.push_str(&format!("  {}", style(root).dim()));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain data with string keys always serializes.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn media_line(view: &MediaView) -> String {
    let mut line = format!(
        "{}  {:<14}",
        style(view.id).cyan(),
        format_label(view.format)
    );
    if let Some(meta) = &view.meta {
        line.push_str("  ");
        line.push_str(&meta_summary(meta));
    }
    line.trim_end().to_string()
}

fn format_label(format: Format) -> &'static str {
    match format {
        Format::Image => "image",
        Format::AnimatedImage => "animated image",
        Format::Unknown => "unknown",
    }
}

fn meta_summary(meta: &Metadata) -> String {
    let fields: Vec<String> = match meta {
        Metadata::Generic {
            source,
            artist,
            artist_link,
        } => [
            ("source", source),
            ("artist", artist),
            ("artist_link", artist_link),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
        .collect(),
        Metadata::Anime { name } => name
            .iter()
            .map(|name| format!("name={}", name))
            .collect(),
    };

    let kind = style(meta.kind()).magenta().to_string();
    if fields.is_empty() {
        kind
    } else {
        format!("{} {}", kind, fields.join(" "))
    }
}
