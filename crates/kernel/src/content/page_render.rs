//! Page-level rendering entry points.
//!
//! Resolve, check visibility, then render each enabled block in order.

use serde::Serialize;

use super::block_render::{RenderContext, render_block};
use crate::models::{PageDoc, SiteConfig};
use crate::routes::helpers::html_escape;
use crate::routing::{CAR_DETAIL_TEMPLATE, resolve, resolve_published};

/// Output of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub html: String,
}

/// A page's rendered blocks in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_id: String,
    pub title: String,
    pub slug: String,
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedPage {
    /// Concatenated block markup.
    pub fn body_html(&self) -> String {
        self.blocks
            .iter()
            .map(|b| {
                format!(
                    "<div class=\"block block--{}\" data-block-id=\"{}\">{}</div>",
                    html_escape(&b.block_type),
                    html_escape(&b.id),
                    b.html
                )
            })
            .collect()
    }
}

/// Outcome of rendering a listing detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarPage {
    /// No car with that id.
    NotFound,
    /// The car exists but the detail template is missing or unpublished.
    TemplateMissing,
    Rendered(RenderedPage),
}

/// Render any page with an explicit context. Visibility is not checked.
pub fn render_document(page: &PageDoc, config: &SiteConfig, ctx: &RenderContext) -> RenderedPage {
    let blocks = page
        .blocks
        .iter()
        .filter_map(|block| {
            render_block(block, config, ctx).map(|html| RenderedBlock {
                id: block.id.clone(),
                block_type: block.block_type.clone(),
                html,
            })
        })
        .collect();

    RenderedPage {
        page_id: page.id.clone(),
        title: page.title.clone(),
        slug: page.slug.clone(),
        blocks,
    }
}

/// Visitor-facing render. `None` when the slug is unknown or unpublished.
pub fn render_page(config: &SiteConfig, slug: &str) -> Option<RenderedPage> {
    let page = resolve_published(config, slug)?;
    Some(render_document(page, config, &RenderContext::default()))
}

/// Admin preview by page id. Drafts are included; template pages are
/// previewed against the first demo car.
pub fn render_page_for_editor(config: &SiteConfig, page_id: &str) -> Option<RenderedPage> {
    let page = config.find_page(page_id)?;
    let ctx = if page.is_template() {
        config
            .demo_data
            .cars
            .first()
            .map(|car| RenderContext::for_entity(car.id.clone()))
            .unwrap_or_default()
    } else {
        RenderContext::default()
    };
    Some(render_document(page, config, &ctx))
}

/// Render the listing detail template for one car.
pub fn render_car_page(config: &SiteConfig, car_id: &str) -> CarPage {
    if config.demo_data.find_car(car_id).is_none() {
        return CarPage::NotFound;
    }
    match resolve(config, CAR_DETAIL_TEMPLATE).filter(|p| p.is_published) {
        Some(template) => CarPage::Rendered(render_document(
            template,
            config,
            &RenderContext::for_entity(car_id),
        )),
        None => CarPage::TemplateMissing,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::NO_LISTING_DATA;
    use crate::models::default_site;

    #[test]
    fn renders_enabled_blocks_in_order() {
        let mut config = default_site::site_config();
        let mut home = config.find_page("p_home").unwrap().clone();
        home.blocks[1].is_enabled = Some(false);
        config = config.replace_page("p_home", home);

        let page = render_page(&config, "/").unwrap();
        let ids: Vec<&str> = page.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["b_hero", "b_search", "b_strip", "b_offers", "b_sell", "b_news"]
        );
    }

    #[test]
    fn unpublished_page_is_not_found_for_visitors() {
        let mut config = default_site::site_config();
        let mut sell = config.find_page("p_sell").unwrap().clone();
        sell.is_published = false;
        config = config.replace_page("p_sell", sell);

        assert!(render_page(&config, "sell").is_none());
        assert!(render_page_for_editor(&config, "p_sell").is_some());
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let config = default_site::site_config();
        assert!(render_page(&config, "missing").is_none());
        assert!(render_page_for_editor(&config, "p_missing").is_none());
    }

    #[test]
    fn editor_preview_of_template_uses_first_car() {
        let config = default_site::site_config();
        let page = render_page_for_editor(&config, "p_car_detail_tpl").unwrap();
        assert!(page.blocks[0].html.contains("Toyota Corolla"));
    }

    #[test]
    fn visitor_template_without_context_shows_placeholder() {
        let config = default_site::site_config();
        let page = render_page(&config, "cars/[id]").unwrap();
        assert!(page.blocks[0].html.contains(NO_LISTING_DATA));
    }

    #[test]
    fn car_page_outcomes() {
        let config = default_site::site_config();
        assert_eq!(render_car_page(&config, "nope"), CarPage::NotFound);

        let CarPage::Rendered(page) = render_car_page(&config, "c4") else {
            panic!("expected rendered car page");
        };
        assert_eq!(page.page_id, "p_car_detail_tpl");
        assert!(page.blocks[0].html.contains("Honda CR-V"));

        let without_template =
            config.with_pages(config.pages.iter().filter(|p| !p.is_template()).cloned().collect());
        assert_eq!(render_car_page(&without_template, "c4"), CarPage::TemplateMissing);
    }

    #[test]
    fn body_html_wraps_blocks() {
        let config = default_site::site_config();
        let page = render_page(&config, "aiclips").unwrap();
        let html = page.body_html();
        assert!(
            html.starts_with(r#"<div class="block block--reels_viewer" data-block-id="b_viewer">"#)
        );
    }

    #[test]
    fn rendered_block_serializes_type() {
        let block = RenderedBlock {
            id: "b1".to_string(),
            block_type: "hero".to_string(),
            html: "<div></div>".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "hero");
    }
}
