//! Whole-site configuration document.
//!
//! The aggregate is stored and transferred as one JSON document. Field names
//! on the wire are camelCase (`isPublished`, `demoData`, ...).

use serde::{Deserialize, Serialize};

use super::demo::DemoData;
use super::page::PageDoc;

/// Root aggregate: theme, navigation, footer, pages and demo content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Informational document version.
    #[serde(default)]
    pub version: String,

    /// Brand and accent tokens.
    #[serde(default)]
    pub theme: ThemeTokens,

    /// Top navigation.
    #[serde(default)]
    pub nav: Nav,

    /// Footer links and note.
    #[serde(default)]
    pub footer: Footer,

    /// Pages in admin listing order. Resolution does not depend on order
    /// except for duplicate slugs, where the first one wins.
    pub pages: Vec<PageDoc>,

    /// Demo business collections that listing blocks enumerate.
    #[serde(default)]
    pub demo_data: DemoData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    pub brand_name: String,
    /// Accent colour token, e.g. "indigo".
    pub accent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nav {
    #[serde(default)]
    pub items: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub note: String,
}

/// A label/href pair used by navigation and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

impl SiteConfig {
    /// Find a page by id.
    pub fn find_page(&self, page_id: &str) -> Option<&PageDoc> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Return a new aggregate whose page `page_id` is replaced by `next`.
    ///
    /// The receiver is left untouched. An unknown id yields an equal copy.
    pub fn replace_page(&self, page_id: &str, next: PageDoc) -> SiteConfig {
        let pages = self
            .pages
            .iter()
            .map(|p| {
                if p.id == page_id {
                    next.clone()
                } else {
                    p.clone()
                }
            })
            .collect();
        SiteConfig {
            pages,
            ..self.clone()
        }
    }

    /// Return a new aggregate with `pages` swapped out wholesale.
    pub fn with_pages(&self, pages: Vec<PageDoc>) -> SiteConfig {
        SiteConfig {
            pages,
            ..self.clone()
        }
    }
}
