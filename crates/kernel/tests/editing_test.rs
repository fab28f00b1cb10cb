#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Editing workflow tests: working copy, editor operations, save, render.

use std::sync::Arc;

use serde_json::json;
use vetrina_kernel::config_storage::{ConfigStore, MemoryConfigStore, WorkingCopy};
use vetrina_kernel::content::{
    BlockRegistry, Editor, MoveDirection, PagePatch, render_page, set_brand_name,
    set_nav_items_from_lines,
};
use vetrina_kernel::ids::SequentialIds;
use vetrina_kernel::models::{SiteConfig, into_props};
use vetrina_test_utils::{test_block, test_page, test_site};

fn fixture_site() -> SiteConfig {
    let site = test_site().with_page(
        test_page("p_home", "")
            .with_block(test_block("b1", "section_title").with_prop("title", json!("One")))
            .with_block(test_block("b2", "section_title").with_prop("title", json!("Two"))),
    );
    serde_json::from_value(site.build()).unwrap()
}

fn body(site: &SiteConfig, slug: &str) -> String {
    render_page(site, slug).map(|p| p.body_html()).unwrap_or_default()
}

#[tokio::test]
async fn edits_stay_private_until_saved() {
    let store = MemoryConfigStore::new(fixture_site());
    let ids = SequentialIds::new();
    let editor = Editor::new(BlockRegistry::standard(), &ids);

    let mut copy = WorkingCopy::load(&store).await;
    copy.edit(&editor, |e, c| e.add_block(c, "p_home", "spacer"));
    copy.apply(|c| set_brand_name(c, "Renamed"));

    let stored = store.load().await;
    assert_eq!(stored.find_page("p_home").unwrap().blocks.len(), 2);
    assert_eq!(stored.theme.brand_name, "TestBrand");

    copy.save(&store).await.unwrap();
    let stored = store.load().await;
    let blocks = &stored.find_page("p_home").unwrap().blocks;
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[2].id, "b_1");
    assert_eq!(blocks[2].props["h"], 24);
    assert_eq!(stored.theme.brand_name, "Renamed");
}

#[test]
fn reorder_and_toggle_change_rendered_output() {
    let ids = SequentialIds::new();
    let editor = Editor::new(BlockRegistry::standard(), &ids);
    let site = fixture_site();

    let moved = editor.move_block(&site, "p_home", "b2", MoveDirection::Up);
    let html = body(&moved, "");
    assert!(html.find("Two").unwrap() < html.find("One").unwrap());

    let hidden = editor.toggle_block(&moved, "p_home", "b2");
    let html = body(&hidden, "");
    assert!(!html.contains("Two"));
    assert!(html.contains("One"));

    let shown = editor.toggle_block(&hidden, "p_home", "b2");
    assert!(body(&shown, "").contains("Two"));
    assert_eq!(shown.find_page("p_home").unwrap().blocks[0].is_enabled, None);
}

#[test]
fn new_page_becomes_reachable_once_published() {
    let ids = SequentialIds::new();
    let editor = Editor::new(BlockRegistry::standard(), &ids);

    let site = editor.add_page(&fixture_site());
    let page_id = site.pages.last().unwrap().id.clone();
    assert_eq!(page_id, "p_1");
    assert!(render_page(&site, "new-page").is_none());

    let site = editor.patch_page(
        &site,
        &page_id,
        &PagePatch {
            slug: Some("/about/".to_string()),
            is_published: Some(true),
            ..PagePatch::default()
        },
    );
    let site = editor.add_block(&site, &page_id, "section_title");
    let title = into_props(json!({ "title": "About us" }));
    let site = editor.patch_block_props(&site, &page_id, "b_2", &title);

    let page = render_page(&site, "about").unwrap();
    assert_eq!(page.slug, "about");
    assert!(page.body_html().contains("About us"));
}

#[test]
fn removing_a_page_makes_it_unreachable() {
    let ids = SequentialIds::new();
    let editor = Editor::new(BlockRegistry::standard(), &ids);
    let site = editor.remove_page(&fixture_site(), "p_home");
    assert!(render_page(&site, "").is_none());
}

#[test]
fn rejected_import_leaves_copy_untouched() {
    let mut copy = WorkingCopy::new(fixture_site());
    let before = copy.config().clone();

    assert!(copy.import("{ broken").is_err());
    assert!(copy.import(r#"{"pages": "nope"}"#).is_err());
    assert_eq!(copy.config(), &before);

    let exported = copy.export().unwrap();
    copy.apply(|c| set_nav_items_from_lines(c, "Home|/\nbroken line"));
    assert_eq!(copy.config().nav.items.len(), 1);

    copy.import(&exported).unwrap();
    assert_eq!(copy.config(), &before);
}

#[tokio::test]
async fn concurrent_readers_keep_their_snapshot() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new(fixture_site()));
    let snapshot = store.load().await;

    store.save(set_brand_name(&snapshot, "Later")).await.unwrap();

    assert_eq!(snapshot.theme.brand_name, "TestBrand");
    assert_eq!(store.load().await.theme.brand_name, "Later");
}
