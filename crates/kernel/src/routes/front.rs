//! Visitor-facing page routes.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::content::{CarPage, render_car_page, render_page};
use crate::error::{AppError, AppResult};
use crate::routing::car_id_from_path;
use crate::state::AppState;

use super::helpers::render_framed;

/// Shown when a listing exists but the detail template does not.
const TEMPLATE_NOT_FOUND: &str = "Page template not found.";

/// Create the visitor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/cars", get(car_index))
        .route("/{*path}", get(site_page))
}

async fn root_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    serve_page(&state, "").await
}

/// Paths matching the listing-detail template render that template;
/// everything else is an exact slug lookup.
async fn site_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Html<String>> {
    match car_id_from_path(&path) {
        Some(id) => car_detail(&state, &id).await,
        None => serve_page(&state, &path).await,
    }
}

/// Resolve a slug and render it for visitors.
async fn serve_page(state: &AppState, path: &str) -> AppResult<Html<String>> {
    let site = state.store().load().await;
    let Some(page) = render_page(&site, path) else {
        debug!(path, "no published page for slug");
        return Err(AppError::NotFound);
    };
    Ok(render_framed(state, &site, &page.slug, &page.title, &page.body_html()))
}

/// Listing index of every demo car.
async fn car_index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let site = state.store().load().await;
    let content = state.theme().render_car_index(&site, "Listings")?;
    Ok(render_framed(&state, &site, "cars", "Listings", &content))
}

/// Listing detail rendered through the `cars/[id]` template page.
async fn car_detail(state: &AppState, id: &str) -> AppResult<Html<String>> {
    let site = state.store().load().await;
    match render_car_page(&site, id) {
        CarPage::NotFound => Err(AppError::NotFound),
        CarPage::TemplateMissing => {
            let content = state.theme().render_notice(TEMPLATE_NOT_FOUND)?;
            Ok(render_framed(state, &site, "cars", "", &content))
        }
        CarPage::Rendered(page) => {
            let title = site
                .demo_data
                .find_car(id)
                .map_or_else(|| page.title.clone(), |car| car.title.clone());
            Ok(render_framed(state, &site, &page.slug, &title, &page.body_html()))
        }
    }
}
