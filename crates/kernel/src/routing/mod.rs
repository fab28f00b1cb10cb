//! Page resolution: exact slug lookup plus parametric templates.

mod resolver;
mod template;

pub use resolver::{duplicate_slugs, normalize_slug, resolve, resolve_published};
pub use template::{CAR_DETAIL_TEMPLATE, SlugTemplate, car_href, car_id_from_path};
