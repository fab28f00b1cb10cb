//! Slug-to-page resolution.
//!
//! Resolution is an exact match on the normalized slug. Template pages
//! (`cars/[id]`) only match their literal placeholder slug; binding a
//! concrete path to a template is the caller's job.

use std::collections::HashMap;

use crate::models::{PageDoc, SiteConfig};

/// Strip leading and trailing slashes.
pub fn normalize_slug(path: &str) -> &str {
    path.trim_matches('/')
}

/// Find the first page whose slug equals the normalized path.
///
/// Publication state is not checked here.
pub fn resolve<'a>(config: &'a SiteConfig, path: &str) -> Option<&'a PageDoc> {
    let slug = normalize_slug(path);
    config.pages.iter().find(|p| p.slug == slug)
}

/// Resolve for visitors: unpublished pages count as absent.
pub fn resolve_published<'a>(config: &'a SiteConfig, path: &str) -> Option<&'a PageDoc> {
    resolve(config, path).filter(|p| p.is_published)
}

/// Slugs shared by more than one page, in first-occurrence order.
///
/// Only the first of each group is reachable through [`resolve`].
pub fn duplicate_slugs(config: &SiteConfig) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for page in &config.pages {
        let count = counts.entry(page.slug.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(page.slug.clone());
        }
    }
    order
}
