//! JSON endpoints for the admin editor.
//!
//! The editor works on its own copy of the site document and saves it back
//! wholesale with `PUT /api/site-config`.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config_storage::import_json;
use crate::content::{
    BlockDefinition, BlockFormBuilder, Editor, RenderedPage, props_from_submission,
    render_page_for_editor,
};
use crate::error::{AppError, AppResult};
use crate::models::SiteConfig;
use crate::state::AppState;

use super::helpers::warn_duplicate_slugs;

/// Create the admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/site-config", get(get_site_config).put(put_site_config))
        .route("/api/blocks", get(list_blocks))
        .route("/api/pages/{page_id}/preview", get(preview_page))
        .route("/api/pages/{page_id}/blocks/{block_id}", post(apply_block_form))
        .route("/api/pages/{page_id}/blocks/{block_id}/form", get(block_form))
}

async fn get_site_config(State(state): State<AppState>) -> Json<SiteConfig> {
    let site = state.store().load().await;
    Json((*site).clone())
}

/// Replace the whole document. The body must be an object with a `pages`
/// array.
async fn put_site_config(State(state): State<AppState>, body: String) -> AppResult<Json<Value>> {
    let site = import_json(&body)?;
    warn_duplicate_slugs(&site);
    let pages = site.pages.len();
    state.store().save(site).await?;
    info!(pages, "site document replaced");
    Ok(Json(json!({ "ok": true })))
}

async fn list_blocks(State(state): State<AppState>) -> Json<Vec<BlockDefinition>> {
    Json(state.registry().list_definitions().to_vec())
}

/// Rendered blocks of any page, drafts included.
async fn preview_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> AppResult<Json<RenderedPage>> {
    let site = state.store().load().await;
    render_page_for_editor(&site, &page_id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn block_form(
    State(state): State<AppState>,
    Path((page_id, block_id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let site = state.store().load().await;
    let block = site
        .find_page(&page_id)
        .and_then(|page| page.find_block(&block_id))
        .ok_or(AppError::NotFound)?;

    let Some(builder) = BlockFormBuilder::new(state.registry(), block) else {
        warn!(
            page_id = %page_id,
            block_id = %block_id,
            block_type = %block.block_type,
            "no edit form for unknown block type"
        );
        return Err(AppError::NotFound);
    };
    let action = format!("/api/pages/{page_id}/blocks/{block_id}");
    Ok(Html(builder.build(&action)))
}

/// Apply a submitted edit form to one block and save the document.
async fn apply_block_form(
    State(state): State<AppState>,
    Path((page_id, block_id)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    let site = state.store().load().await;
    let block = site
        .find_page(&page_id)
        .and_then(|page| page.find_block(&block_id))
        .ok_or(AppError::NotFound)?;
    let definition = state
        .registry()
        .get_definition(&block.block_type)
        .ok_or(AppError::NotFound)?;

    let patch = props_from_submission(definition, &form);
    let editor = Editor::new(state.registry(), state.ids());
    let next = editor.patch_block_props(&site, &page_id, &block_id, &patch);
    state.store().save(next).await?;

    info!(page_id = %page_id, block_id = %block_id, fields = patch.len(), "block props updated");
    Ok(Json(json!({ "ok": true })))
}
