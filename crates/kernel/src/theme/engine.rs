//! Theme engine with Tera templates and suggestion resolution.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

use crate::content::block_render::format_price;
use crate::models::{DemoCar, SiteConfig};
use crate::routing::car_href;

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("page.html", include_str!("../../templates/page.html")),
    ("cars.html", include_str!("../../templates/cars.html")),
    ("notice.html", include_str!("../../templates/notice.html")),
];

/// Theme engine for rendering the site frame around page content.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Cache mapping suggestion lists to resolved template names.
    suggestion_cache: DashMap<String, String>,
}

/// Card data for the listing index template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CarCard<'a> {
    href: String,
    image_url: &'a str,
    title: &'a str,
    city: &'a str,
    year: i32,
    price: String,
}

impl<'a> From<&'a DemoCar> for CarCard<'a> {
    fn from(car: &'a DemoCar) -> Self {
        Self {
            href: car_href(&car.id),
            image_url: &car.image_url,
            title: &car.title,
            city: &car.city,
            year: car.year,
            price: format_price(car),
        }
    }
}

impl ThemeEngine {
    /// Create a theme engine with only the built-in templates.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES)
            .context("failed to parse built-in templates")?;
        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
        })
    }

    /// Create a theme engine loading templates from `template_dir`.
    ///
    /// Templates on disk take precedence; built-ins fill the gaps.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        let builtin = Self::builtin()?;
        tera.extend(&builtin.tera)
            .context("failed to merge built-in templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
        })
    }

    /// Built-ins, optionally overridden from a directory.
    pub fn from_dir(template_dir: Option<&Path>) -> Result<Self> {
        match template_dir {
            Some(dir) => Self::new(dir),
            None => Self::builtin(),
        }
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    /// Results are cached for performance.
    ///
    /// Example suggestions: `["page--cars--[id]", "page"]`
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }

        let cache_key = suggestions.join("|");
        if let Some(cached) = self.suggestion_cache.get(&cache_key) {
            return Some(cached.clone());
        }

        for suggestion in suggestions {
            let template_name = format!("{suggestion}.html");
            if self.tera.get_template(&template_name).is_ok() {
                self.suggestion_cache
                    .insert(cache_key, template_name.clone());
                return Some(template_name);
            }
        }

        // Negative results are not cached.
        None
    }

    /// Get page template suggestions for a slug.
    ///
    /// `cars/[id]` -> `page--cars--[id]`, `page`
    pub fn page_suggestions(slug: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        let normalized = slug.trim_matches('/').replace('/', "--");
        if !normalized.is_empty() {
            suggestions.push(format!("page--{normalized}"));
        }
        suggestions.push("page".to_string());
        suggestions
    }

    /// Wrap rendered content in the site frame.
    pub fn render_page(
        &self,
        site: &SiteConfig,
        slug: &str,
        title: &str,
        content: &str,
    ) -> Result<String> {
        let suggestions = Self::page_suggestions(slug);
        let suggestion_refs: Vec<&str> = suggestions.iter().map(|s| s.as_str()).collect();

        let template = self
            .resolve_template(&suggestion_refs)
            .unwrap_or_else(|| "page.html".to_string());

        let mut context = tera::Context::new();
        context.insert("brand_name", &site.theme.brand_name);
        context.insert("accent", &site.theme.accent);
        context.insert("nav_items", &site.nav.items);
        context.insert("footer_links", &site.footer.links);
        context.insert("footer_note", &site.footer.note);
        context.insert("title", title);
        context.insert("content", content);
        context.insert("path", &format!("/{}", slug.trim_matches('/')));

        self.tera
            .render(&template, &context)
            .context("failed to render page template")
    }

    /// Render the listing index content.
    pub fn render_car_index(&self, site: &SiteConfig, heading: &str) -> Result<String> {
        let cards: Vec<CarCard<'_>> = site.demo_data.cars.iter().map(CarCard::from).collect();
        let mut context = tera::Context::new();
        context.insert("heading", heading);
        context.insert("cars", &cards);
        self.tera
            .render("cars.html", &context)
            .context("failed to render listing index")
    }

    /// Render a plain notice fragment.
    pub fn render_notice(&self, message: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("message", message);
        self.tera
            .render("notice.html", &context)
            .context("failed to render notice")
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("cache_size", &self.suggestion_cache.len())
            .finish()
    }
}

/// Wrap ThemeEngine in Arc for sharing across handlers.
pub type SharedThemeEngine = Arc<ThemeEngine>;
