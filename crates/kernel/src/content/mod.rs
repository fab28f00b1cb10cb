//! Page composition engine.
//!
//! This module provides:
//! - BlockRegistry: the block catalogue and per-type field schema
//! - BlockProps: typed decode of stored block props
//! - render_block / render_page: the render dispatcher and page entry points
//! - BlockFormBuilder: edit forms generated from the schema
//! - Editor: pure editing operations over the site document

pub mod block_props;
pub mod block_render;
pub mod block_types;
pub mod editing;
mod form;
pub mod page_render;

pub use block_props::BlockProps;
pub use block_render::{NO_CLIPS, NO_LISTING_DATA, RenderContext, render_block};
pub use block_types::{BlockDefinition, BlockRegistry, FieldDescriptor, FieldKind};
pub use editing::{
    Editor, MoveDirection, PagePatch, set_brand_name, set_footer_note, set_nav_items_from_lines,
};
pub use form::{BlockFormBuilder, props_from_submission};
pub use page_render::{
    CarPage, RenderedBlock, RenderedPage, render_car_page, render_page, render_page_for_editor,
};
