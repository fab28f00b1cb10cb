//! Parametric slug templates.
//!
//! A template slug marks variable segments with brackets, e.g. `cars/[id]`.
//! Matching is segment-wise: counts must agree, literal segments compare
//! exactly and placeholder segments bind any non-empty value.

use std::collections::HashMap;

use super::resolver::normalize_slug;

/// Slug of the listing-detail template page.
pub const CAR_DETAIL_TEMPLATE: &str = "cars/[id]";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed template slug with at least one placeholder segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugTemplate {
    segments: Vec<Segment>,
}

impl SlugTemplate {
    /// Parse a slug. Returns `None` when it has no placeholder segment.
    ///
    /// `[]` is not a placeholder; it stays a literal segment.
    pub fn parse(slug: &str) -> Option<Self> {
        let normalized = normalize_slug(slug);
        if normalized.is_empty() {
            return None;
        }

        let segments: Vec<Segment> = normalized
            .split('/')
            .map(|segment| match placeholder_name(segment) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        segments
            .iter()
            .any(|s| matches!(s, Segment::Param(_)))
            .then_some(Self { segments })
    }

    /// Match a concrete path, returning the placeholder bindings.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let normalized = normalize_slug(path);
        let parts: Vec<&str> = normalized.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bindings = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    bindings.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(bindings)
    }

    /// Substitute bindings into the template, producing an absolute path.
    ///
    /// Returns `None` when a placeholder has no binding.
    pub fn expand(&self, bindings: &[(&str, &str)]) -> Option<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(literal.as_str()),
                Segment::Param(name) => {
                    let (_, value) = bindings.iter().find(|(key, _)| key == name)?;
                    parts.push(*value);
                }
            }
        }
        Some(format!("/{}", parts.join("/")))
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}

/// Public path of a listing detail page.
pub fn car_href(car_id: &str) -> String {
    SlugTemplate::parse(CAR_DETAIL_TEMPLATE)
        .and_then(|template| template.expand(&[("id", car_id)]))
        .unwrap_or_else(|| format!("/cars/{car_id}"))
}

/// Car id bound by a request path matching the detail template.
pub fn car_id_from_path(path: &str) -> Option<String> {
    SlugTemplate::parse(CAR_DETAIL_TEMPLATE)?
        .matches(path)?
        .remove("id")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn literal_slugs_are_not_templates() {
        assert!(SlugTemplate::parse("").is_none());
        assert!(SlugTemplate::parse("search").is_none());
        assert!(SlugTemplate::parse("cars/c1").is_none());
        assert!(SlugTemplate::parse("cars/[]").is_none());
    }

    #[test]
    fn parses_single_placeholder() {
        let template = SlugTemplate::parse("/cars/[id]/").unwrap();
        assert_eq!(template, SlugTemplate::parse(CAR_DETAIL_TEMPLATE).unwrap());
        assert_eq!(template.expand(&[("id", "c1")]).as_deref(), Some("/cars/c1"));
    }

    #[test]
    fn matches_concrete_path() {
        let template = SlugTemplate::parse(CAR_DETAIL_TEMPLATE).unwrap();
        let bindings = template.matches("/cars/c1").unwrap();
        assert_eq!(bindings.get("id").map(String::as_str), Some("c1"));
    }

    #[test]
    fn rejects_wrong_segment_count_or_literal() {
        let template = SlugTemplate::parse(CAR_DETAIL_TEMPLATE).unwrap();
        assert!(template.matches("cars").is_none());
        assert!(template.matches("cars/c1/photos").is_none());
        assert!(template.matches("bikes/c1").is_none());
        assert!(template.matches("cars/").is_none());
    }

    #[test]
    fn multi_parameter_templates() {
        let template = SlugTemplate::parse("brands/[brand]/models/[model]").unwrap();

        let bindings = template.matches("brands/bmw/models/x5").unwrap();
        assert_eq!(bindings["brand"], "bmw");
        assert_eq!(bindings["model"], "x5");
        assert!(template.matches("brands/bmw/cars/x5").is_none());
    }

    #[test]
    fn expand_fills_placeholders() {
        let template = SlugTemplate::parse(CAR_DETAIL_TEMPLATE).unwrap();
        assert_eq!(template.expand(&[("id", "c7")]).as_deref(), Some("/cars/c7"));
        assert!(template.expand(&[("other", "x")]).is_none());
    }

    #[test]
    fn car_href_uses_detail_template() {
        assert_eq!(car_href("c2"), "/cars/c2");
    }

    #[test]
    fn car_id_is_bound_from_detail_paths_only() {
        assert_eq!(car_id_from_path("cars/c2").as_deref(), Some("c2"));
        assert_eq!(car_id_from_path(&car_href("c5")).as_deref(), Some("c5"));
        assert!(car_id_from_path("cars").is_none());
        assert!(car_id_from_path("search").is_none());
        assert!(car_id_from_path("cars/c2/photos").is_none());
    }
}
