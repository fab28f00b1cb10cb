//! Typed block properties.
//!
//! Stored props are an untyped JSON map. Before rendering, each instance is
//! decoded once into the record for its type. Missing or wrong-typed values
//! take the type's fallback, so a decoded record is always complete.

use serde_json::{Value, json};

use crate::models::{Props, into_props};

pub const DEFAULT_CAR_GRID_LIMIT: usize = 6;
pub const DEFAULT_CAR_LIST_LIMIT: usize = 10;
pub const DEFAULT_FAQ_LIMIT: usize = 6;
pub const DEFAULT_NEWS_LIMIT: usize = 3;
pub const DEFAULT_SPACER_HEIGHT: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroProps {
    pub headline: String,
    pub subline: String,
    /// `None` when unset or empty.
    pub bg_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiPromptProps {
    pub placeholder: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchWidgetProps {
    pub title: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarDetailProps {
    pub show_lead_button: bool,
    pub show_ask_ai: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarListProps {
    pub title: String,
    pub limit: usize,
    pub with_sidebar_hint: bool,
}

/// Title plus a prefix limit; shared by every collection block without
/// extra options.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingProps {
    pub title: String,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaSellProps {
    pub title: String,
    pub text: String,
    pub cta: String,
    pub href: String,
}

/// One decoded block, tagged by type.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockProps {
    Hero(HeroProps),
    AiPrompt(AiPromptProps),
    SearchWidget(SearchWidgetProps),
    SectionTitle { title: String },
    CarDetail(CarDetailProps),
    CarGrid(ListingProps),
    CarList(CarListProps),
    ReelsStrip { title: String },
    ReelsViewer { title: String },
    Faq(ListingProps),
    CtaSell(CtaSellProps),
    NewsCards(ListingProps),
    Spacer { height: u32 },
}

impl BlockProps {
    /// Decode stored props for `block_type`. `None` for an unknown type.
    pub fn decode(block_type: &str, props: &Props) -> Option<Self> {
        let decoded = match block_type {
            "hero" => Self::Hero(HeroProps {
                headline: text(props, "headline", ""),
                subline: text(props, "subline", ""),
                bg_image: Some(text(props, "bgImage", "")).filter(|s| !s.is_empty()),
            }),
            "ai_prompt" => Self::AiPrompt(AiPromptProps {
                placeholder: text(props, "placeholder", ""),
                cta: text(props, "cta", ""),
            }),
            "search_widget" => Self::SearchWidget(SearchWidgetProps {
                title: text(props, "title", ""),
                cta: text(props, "cta", ""),
            }),
            "section_title" => Self::SectionTitle {
                title: text(props, "title", ""),
            },
            "car_detail" => Self::CarDetail(CarDetailProps {
                show_lead_button: flag_on(props, "showLeadButton"),
                show_ask_ai: flag_on(props, "showAskAi"),
            }),
            "car_grid" => Self::CarGrid(listing(props, "", DEFAULT_CAR_GRID_LIMIT)),
            "car_list" => Self::CarList(CarListProps {
                title: text(props, "title", ""),
                limit: limit(props, DEFAULT_CAR_LIST_LIMIT),
                with_sidebar_hint: flag_off(props, "withSidebarHint"),
            }),
            "reels_strip" => Self::ReelsStrip {
                title: text(props, "title", ""),
            },
            "reels_viewer" => Self::ReelsViewer {
                title: text(props, "title", "Clips"),
            },
            "faq" => Self::Faq(listing(props, "FAQ", DEFAULT_FAQ_LIMIT)),
            "cta_sell" => Self::CtaSell(CtaSellProps {
                title: text(props, "title", ""),
                text: text(props, "text", ""),
                cta: text(props, "cta", ""),
                href: text(props, "href", "/"),
            }),
            "news_cards" => Self::NewsCards(listing(props, "", DEFAULT_NEWS_LIMIT)),
            "spacer" => Self::Spacer {
                height: number(props.get("h"))
                    .map(|h| u32::try_from(h.max(0)).unwrap_or(u32::MAX))
                    .unwrap_or(DEFAULT_SPACER_HEIGHT),
            },
            _ => return None,
        };
        Some(decoded)
    }

    /// Encode back into storage keys. Decoding the result yields `self`.
    ///
    /// Edit forms show these values so an unchanged submission keeps the
    /// rendered output.
    pub fn to_props(&self) -> Props {
        let value = match self {
            Self::Hero(p) => json!({
                "headline": p.headline,
                "subline": p.subline,
                "bgImage": p.bg_image.as_deref().unwrap_or_default(),
            }),
            Self::AiPrompt(p) => json!({ "placeholder": p.placeholder, "cta": p.cta }),
            Self::SearchWidget(p) => json!({ "title": p.title, "cta": p.cta }),
            Self::SectionTitle { title }
            | Self::ReelsStrip { title }
            | Self::ReelsViewer { title } => json!({ "title": title }),
            Self::CarDetail(p) => json!({
                "showLeadButton": p.show_lead_button,
                "showAskAi": p.show_ask_ai,
            }),
            Self::CarGrid(p) | Self::Faq(p) | Self::NewsCards(p) => {
                json!({ "title": p.title, "limit": p.limit })
            }
            Self::CarList(p) => json!({
                "title": p.title,
                "limit": p.limit,
                "withSidebarHint": p.with_sidebar_hint,
            }),
            Self::CtaSell(p) => json!({
                "title": p.title,
                "text": p.text,
                "cta": p.cta,
                "href": p.href,
            }),
            Self::Spacer { height } => json!({ "h": height }),
        };
        into_props(value)
    }
}

fn listing(props: &Props, title_fallback: &str, default_limit: usize) -> ListingProps {
    ListingProps {
        title: text(props, "title", title_fallback),
        limit: limit(props, default_limit),
    }
}

/// Scalars are stringified; null, absent, arrays and objects fall back.
fn text(props: &Props, key: &str, fallback: &str) -> String {
    match props.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => fallback.to_string(),
    }
}

/// Integer value of a number or numeric string, truncated toward zero.
fn number(value: Option<&Value>) -> Option<i64> {
    let float = match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64()?
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // `as` saturates at the i64 bounds and maps NaN to 0.
    float.is_finite().then_some(float.trunc() as i64)
}

/// Collection prefix length. Negative values count as zero.
fn limit(props: &Props, fallback: usize) -> usize {
    number(props.get("limit"))
        .map(|n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
        .unwrap_or(fallback)
}

/// On unless explicitly `false`.
fn flag_on(props: &Props, key: &str) -> bool {
    !matches!(props.get(key), Some(Value::Bool(false)))
}

/// Off unless explicitly `true`.
fn flag_off(props: &Props, key: &str) -> bool {
    matches!(props.get(key), Some(Value::Bool(true)))
}
