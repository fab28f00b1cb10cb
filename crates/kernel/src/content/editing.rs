//! Editing operations over the site document.
//!
//! Every operation takes the current document and returns a new one; the
//! argument is never modified. An id that does not resolve makes the
//! operation a no-op that returns an equal copy.

use serde::Deserialize;

use super::block_types::BlockRegistry;
use crate::ids::IdGenerator;
use crate::models::{BlockInstance, Link, PageDoc, Props, SiteConfig};
use crate::routing::normalize_slug;

/// Title of a freshly added page.
pub const NEW_PAGE_TITLE: &str = "New page";

/// Slug of a freshly added page.
pub const NEW_PAGE_SLUG: &str = "new-page";

/// Direction for [`Editor::move_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// `-1` is up, `+1` is down; anything else is rejected.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(Self::Up),
            1 => Some(Self::Down),
            _ => None,
        }
    }
}

/// Partial page fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

/// Applies editing operations using a block catalogue and an id source.
pub struct Editor<'a> {
    registry: &'a BlockRegistry,
    ids: &'a dyn IdGenerator,
}

impl<'a> Editor<'a> {
    pub fn new(registry: &'a BlockRegistry, ids: &'a dyn IdGenerator) -> Self {
        Self { registry, ids }
    }

    /// Append a draft page with no blocks.
    pub fn add_page(&self, config: &SiteConfig) -> SiteConfig {
        let mut pages = config.pages.clone();
        pages.push(PageDoc {
            id: self.ids.new_id("p"),
            title: NEW_PAGE_TITLE.to_string(),
            slug: NEW_PAGE_SLUG.to_string(),
            is_published: false,
            blocks: Vec::new(),
        });
        config.with_pages(pages)
    }

    pub fn remove_page(&self, config: &SiteConfig, page_id: &str) -> SiteConfig {
        config.with_pages(
            config
                .pages
                .iter()
                .filter(|p| p.id != page_id)
                .cloned()
                .collect(),
        )
    }

    /// Shallow-merge `patch` into the page. Slugs are stored normalized.
    pub fn patch_page(&self, config: &SiteConfig, page_id: &str, patch: &PagePatch) -> SiteConfig {
        let Some(page) = config.find_page(page_id) else {
            return config.clone();
        };
        let mut next = page.clone();
        if let Some(title) = &patch.title {
            next.title.clone_from(title);
        }
        if let Some(slug) = &patch.slug {
            next.slug = normalize_slug(slug).to_string();
        }
        if let Some(is_published) = patch.is_published {
            next.is_published = is_published;
        }
        config.replace_page(page_id, next)
    }

    /// Append a block of `block_type` with a deep copy of its default props.
    /// Unknown types are a no-op.
    pub fn add_block(&self, config: &SiteConfig, page_id: &str, block_type: &str) -> SiteConfig {
        let Some(definition) = self.registry.get_definition(block_type) else {
            return config.clone();
        };
        self.update_page(config, page_id, |page| {
            let mut blocks = page.blocks.clone();
            blocks.push(BlockInstance::new(
                self.ids.new_id("b"),
                block_type,
                definition.default_props.clone(),
            ));
            page.with_blocks(blocks)
        })
    }

    pub fn remove_block(&self, config: &SiteConfig, page_id: &str, block_id: &str) -> SiteConfig {
        self.update_page(config, page_id, |page| {
            page.with_blocks(
                page.blocks
                    .iter()
                    .filter(|b| b.id != block_id)
                    .cloned()
                    .collect(),
            )
        })
    }

    /// Swap the block with its neighbour. No-op at either boundary.
    pub fn move_block(
        &self,
        config: &SiteConfig,
        page_id: &str,
        block_id: &str,
        direction: MoveDirection,
    ) -> SiteConfig {
        self.update_page(config, page_id, |page| {
            let Some(index) = page.block_index(block_id) else {
                return page.clone();
            };
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => Some(index + 1).filter(|&t| t < page.blocks.len()),
            };
            let Some(target) = target else {
                return page.clone();
            };
            let mut blocks = page.blocks.clone();
            blocks.swap(index, target);
            page.with_blocks(blocks)
        })
    }

    /// Enabled (`true` or unset) becomes `false`; `false` becomes unset.
    pub fn toggle_block(&self, config: &SiteConfig, page_id: &str, block_id: &str) -> SiteConfig {
        self.update_block(config, page_id, block_id, |block| BlockInstance {
            is_enabled: if block.is_enabled() { Some(false) } else { None },
            ..block.clone()
        })
    }

    /// Shallow-merge `partial` into the block's props. Keys are not checked
    /// against the block's fields.
    pub fn patch_block_props(
        &self,
        config: &SiteConfig,
        page_id: &str,
        block_id: &str,
        partial: &Props,
    ) -> SiteConfig {
        self.update_block(config, page_id, block_id, |block| {
            let mut next = block.clone();
            for (key, value) in partial {
                next.props.insert(key.clone(), value.clone());
            }
            next
        })
    }

    fn update_page(
        &self,
        config: &SiteConfig,
        page_id: &str,
        f: impl FnOnce(&PageDoc) -> PageDoc,
    ) -> SiteConfig {
        match config.find_page(page_id) {
            Some(page) => config.replace_page(page_id, f(page)),
            None => config.clone(),
        }
    }

    fn update_block(
        &self,
        config: &SiteConfig,
        page_id: &str,
        block_id: &str,
        f: impl FnOnce(&BlockInstance) -> BlockInstance,
    ) -> SiteConfig {
        self.update_page(config, page_id, |page| match page.find_block(block_id) {
            Some(block) => page.replace_block(block_id, f(block)),
            None => page.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Site-level settings
// ---------------------------------------------------------------------------

pub fn set_brand_name(config: &SiteConfig, brand_name: &str) -> SiteConfig {
    let mut next = config.clone();
    next.theme.brand_name = brand_name.to_string();
    next
}

/// Replace navigation from `Label|/path` lines. Blank lines and lines
/// missing either part are dropped.
pub fn set_nav_items_from_lines(config: &SiteConfig, lines: &str) -> SiteConfig {
    let items = lines
        .lines()
        .filter_map(|line| {
            let (label, href) = line.split_once('|')?;
            let (label, href) = (label.trim(), href.trim());
            (!label.is_empty() && !href.is_empty()).then(|| Link::new(label, href))
        })
        .collect();
    let mut next = config.clone();
    next.nav.items = items;
    next
}

pub fn set_footer_note(config: &SiteConfig, note: &str) -> SiteConfig {
    let mut next = config.clone();
    next.footer.note = note.to_string();
    next
}
