//! WordPress REST API data transfer objects.
//!
//! Shapes follow the `wp/v2` core endpoints plus the `menus/v1` menu
//! endpoint. Only the fields the storefront renders are declared; serde
//! ignores the rest of the payload.

use serde::{Deserialize, Serialize};

/// A WordPress "rendered" field (`{ "rendered": "<p>…</p>" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// A CMS page (`/wp-json/wp/v2/pages`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpPage {
    pub id: u64,
    pub slug: String,
    pub title: Rendered,
    pub content: Rendered,
    #[serde(default)]
    pub modified: Option<String>,
}

/// A blog post (`/wp-json/wp/v2/posts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpPost {
    pub id: u64,
    pub slug: String,
    /// Publication date as the API sends it (`2024-05-01T09:30:00`).
    pub date: String,
    pub title: Rendered,
    pub excerpt: Rendered,
    pub content: Rendered,
}

/// A navigation menu (`/wp-json/menus/v1/menus/{slug}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpMenu {
    #[serde(default)]
    pub items: Vec<WpMenuItem>,
}

/// One entry of a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpMenuItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub target: Option<String>,
}
