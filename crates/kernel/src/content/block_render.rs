//! Server-side block rendering.
//!
//! `render_block` is the dispatcher: disabled instances and unknown types
//! render nothing, everything else is decoded into [`BlockProps`] and
//! handed to the variant renderer. Collection blocks take a prefix of the
//! demo collection in stored order.

use std::fmt::Write as _;

use super::block_props::{
    AiPromptProps, BlockProps, CarDetailProps, CarListProps, CtaSellProps, HeroProps,
    ListingProps, SearchWidgetProps,
};
use crate::models::{BlockInstance, DemoCar, DemoData, SiteConfig};
use crate::routes::helpers::html_escape;
use crate::routing::car_href;

/// Placeholder shown by `car_detail` when the context car is unknown.
pub const NO_LISTING_DATA: &str = "No listing data.";

/// Notice shown by `reels_viewer` with an empty clip collection.
pub const NO_CLIPS: &str = "No clips yet.";

/// Side-channel data for variants that need more than their own props.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Concrete entity for template pages (a car id for `cars/[id]`).
    pub entity_id: Option<String>,
}

impl RenderContext {
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
        }
    }
}

/// Render one block instance, or nothing.
pub fn render_block(
    block: &BlockInstance,
    config: &SiteConfig,
    ctx: &RenderContext,
) -> Option<String> {
    if !block.is_enabled() {
        return None;
    }
    let props = BlockProps::decode(&block.block_type, &block.props)?;
    Some(render_props(&props, &config.demo_data, ctx))
}

/// Render an already decoded block.
pub fn render_props(props: &BlockProps, data: &DemoData, ctx: &RenderContext) -> String {
    match props {
        BlockProps::Hero(p) => render_hero(p),
        BlockProps::AiPrompt(p) => render_ai_prompt(p),
        BlockProps::SearchWidget(p) => render_search_widget(p),
        BlockProps::SectionTitle { title } => render_section_title(title),
        BlockProps::CarDetail(p) => render_car_detail(p, data, ctx.entity_id.as_deref()),
        BlockProps::CarGrid(p) => render_car_grid(p, data),
        BlockProps::CarList(p) => render_car_list(p, data),
        BlockProps::ReelsStrip { title } => render_reels_strip(title, data),
        BlockProps::ReelsViewer { title } => render_reels_viewer(title, data),
        BlockProps::Faq(p) => render_faq(p, data),
        BlockProps::CtaSell(p) => render_cta_sell(p),
        BlockProps::NewsCards(p) => render_news_cards(p, data),
        BlockProps::Spacer { height } => {
            format!("<div class=\"spacer\" style=\"height:{height}px\"></div>")
        }
    }
}

/// First `limit` items in stored order.
pub fn take_prefix<T>(items: &[T], limit: usize) -> &[T] {
    &items[..limit.min(items.len())]
}

/// Group an integer with comma thousands separators.
pub(crate) fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

/// Wrap content in a container section with an optional heading.
fn section(title: &str, body: &str) -> String {
    let heading = if title.is_empty() {
        String::new()
    } else {
        format!("<h2 class=\"section-heading\">{}</h2>", html_escape(title))
    };
    format!(
        "<section class=\"block-section\"><div class=\"container\">\
         {heading}{body}</div></section>"
    )
}

fn car_meta(car: &DemoCar) -> String {
    format!(
        "{} • {} • {} km",
        html_escape(&car.city),
        car.year,
        group_thousands(car.mileage_km)
    )
}

/// Display price, e.g. `11,700 $`. Unescaped.
pub(crate) fn format_price(car: &DemoCar) -> String {
    format!("{} {}", group_thousands(car.price), car.currency)
}

fn car_price(car: &DemoCar) -> String {
    html_escape(&format_price(car))
}

/// Percent-encode the characters that could end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_whitespace() || c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{byte:02X}");
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn or_dash(value: Option<&String>) -> String {
    value.map_or_else(|| "—".to_string(), |v| html_escape(v))
}

// ---------------------------------------------------------------------------
// Individual block renderers
// ---------------------------------------------------------------------------

fn render_hero(p: &HeroProps) -> String {
    let style = p.bg_image.as_deref().map_or_else(String::new, |url| {
        format!(
            " style=\"background-image:url('{}');\
             background-size:cover;background-position:center\"",
            html_escape(&css_url(url))
        )
    });
    format!(
        "<div class=\"hero\"{style}><div class=\"container\">\
         <h1>{}</h1><p class=\"hero-subline\">{}</p></div></div>",
        html_escape(&p.headline),
        html_escape(&p.subline)
    )
}

fn render_ai_prompt(p: &AiPromptProps) -> String {
    section(
        "",
        &format!(
            "<form class=\"ai-prompt\" action=\"/aichat\" method=\"get\">\
             <input type=\"text\" name=\"q\" placeholder=\"{}\">\
             <button type=\"submit\">{}</button></form>",
            html_escape(&p.placeholder),
            html_escape(&p.cta)
        ),
    )
}

fn render_search_widget(p: &SearchWidgetProps) -> String {
    section(
        &p.title,
        &format!(
            "<form class=\"search-widget\" action=\"/search\" method=\"get\">\
             <select name=\"category\"><option>Cars</option><option>Motorcycles</option>\
             <option>Commercial</option></select>\
             <input type=\"text\" name=\"model\" placeholder=\"Make / model\">\
             <input type=\"number\" name=\"price_from\" placeholder=\"Price from\">\
             <input type=\"number\" name=\"price_to\" placeholder=\"Price to\">\
             <button type=\"submit\">{}</button></form>",
            html_escape(&p.cta)
        ),
    )
}

fn render_section_title(title: &str) -> String {
    format!(
        "<div class=\"container section-title\"><h1>{}</h1></div>",
        html_escape(title)
    )
}

fn render_car_detail(p: &CarDetailProps, data: &DemoData, car_id: Option<&str>) -> String {
    let Some(car) = car_id.and_then(|id| data.find_car(id)) else {
        return format!(
            "<div class=\"container\"><div class=\"notice\">{NO_LISTING_DATA}</div></div>"
        );
    };

    let mut thumbs = String::new();
    let others = take_prefix(&data.cars, 6).iter().map(|c| c.image_url.as_str());
    for url in std::iter::once(car.image_url.as_str()).chain(others).take(5) {
        let _ = write!(
            thumbs,
            "<img class=\"thumb\" src=\"{}\" alt=\"thumb\">",
            html_escape(url)
        );
    }

    let mut actions = String::new();
    if p.show_lead_button {
        actions.push_str("<button type=\"button\" class=\"lead\">Request a callback</button>");
    }
    if p.show_ask_ai {
        actions.push_str("<a class=\"ask-ai\" href=\"/aichat\">Ask AI</a>");
    }

    format!(
        "<div class=\"container car-detail\">\
         <div class=\"gallery\"><div class=\"thumbs\">{thumbs}</div>\
         <img class=\"main\" src=\"{image}\" alt=\"{title}\"></div>\
         <div class=\"summary\"><h1>{title}</h1><div class=\"meta\">{meta}</div>\
         <div class=\"price\">{price}</div>\
         <dl class=\"specs\"><dt>Fuel</dt><dd>{fuel}</dd><dt>Gearbox</dt><dd>{gearbox}</dd>\
         <dt>Year</dt><dd>{year}</dd><dt>Mileage</dt><dd>{mileage} km</dd></dl>\
         <div class=\"actions\">{actions}</div></div></div>",
        image = html_escape(&car.image_url),
        title = html_escape(&car.title),
        meta = car_meta(car),
        price = car_price(car),
        fuel = or_dash(car.fuel.as_ref()),
        gearbox = or_dash(car.gearbox.as_ref()),
        year = car.year,
        mileage = group_thousands(car.mileage_km),
    )
}

fn render_car_card(car: &DemoCar) -> String {
    format!(
        "<a class=\"car-card\" href=\"{href}\">\
         <img src=\"{image}\" alt=\"{title}\">\
         <div class=\"car-title\">{title}</div><div class=\"meta\">{meta}</div>\
         <div class=\"price\">{price}</div></a>",
        href = html_escape(&car_href(&car.id)),
        image = html_escape(&car.image_url),
        title = html_escape(&car.title),
        meta = car_meta(car),
        price = car_price(car),
    )
}

fn render_car_grid(p: &ListingProps, data: &DemoData) -> String {
    let cards: String = take_prefix(&data.cars, p.limit)
        .iter()
        .map(render_car_card)
        .collect();
    section(&p.title, &format!("<div class=\"car-grid\">{cards}</div>"))
}

fn render_car_list(p: &CarListProps, data: &DemoData) -> String {
    let mut body = String::new();
    if p.with_sidebar_hint {
        body.push_str(
            "<div class=\"hint\">Search variant 2: a filter sidebar goes on the left.</div>",
        );
    }
    body.push_str("<div class=\"car-list\">");
    for car in take_prefix(&data.cars, p.limit) {
        let _ = write!(
            body,
            "<a class=\"car-row\" href=\"{href}\">\
             <img src=\"{image}\" alt=\"{title}\">\
             <div class=\"car-title\">{title}</div><div class=\"meta\">{meta}</div>\
             <div class=\"price\">{price}</div>\
             <div class=\"specs\">Fuel: {fuel} • Gearbox: {gearbox}</div></a>",
            href = html_escape(&car_href(&car.id)),
            image = html_escape(&car.image_url),
            title = html_escape(&car.title),
            meta = car_meta(car),
            price = car_price(car),
            fuel = or_dash(car.fuel.as_ref()),
            gearbox = or_dash(car.gearbox.as_ref()),
        );
    }
    body.push_str("</div>");
    section(&p.title, &body)
}

fn render_reels_strip(title: &str, data: &DemoData) -> String {
    let mut body = String::from("<div class=\"reels-strip\">");
    for reel in &data.reels {
        let _ = write!(
            body,
            "<a class=\"reel\" href=\"/aiclips\"><img src=\"{poster}\" alt=\"{title}\">\
             <div class=\"reel-title\">{title}</div><div class=\"author\">@{author}</div></a>",
            poster = html_escape(&reel.poster_url),
            title = html_escape(&reel.title),
            author = html_escape(&reel.author),
        );
    }
    body.push_str("</div>");
    section(title, &body)
}

fn render_reels_viewer(title: &str, data: &DemoData) -> String {
    let heading = format!("<h1>{}</h1>", html_escape(title));
    let Some(first) = data.reels.first() else {
        return format!(
            "<div class=\"container reels-viewer\">{heading}\
             <div class=\"notice\">{NO_CLIPS}</div></div>"
        );
    };

    let mut thumbs = String::new();
    for reel in take_prefix(&data.reels, 3) {
        let _ = write!(
            thumbs,
            "<a href=\"/aiclips\"><img src=\"{}\" alt=\"{}\"></a>",
            html_escape(&reel.poster_url),
            html_escape(&reel.title)
        );
    }

    format!(
        "<div class=\"container reels-viewer\">{heading}\
         <video src=\"{video}\" poster=\"{poster}\" controls></video>\
         <div class=\"reel-title\">{reel_title}</div><div class=\"author\">@{author}</div>\
         <div class=\"reel-thumbs\">{thumbs}</div></div>",
        video = html_escape(&first.video_url),
        poster = html_escape(&first.poster_url),
        reel_title = html_escape(&first.title),
        author = html_escape(&first.author),
    )
}

fn render_faq(p: &ListingProps, data: &DemoData) -> String {
    let items: String = take_prefix(&data.faq, p.limit)
        .iter()
        .map(|item| {
            format!(
                "<details class=\"faq-item\"><summary>{}</summary><p>{}</p></details>",
                html_escape(&item.q),
                html_escape(&item.a)
            )
        })
        .collect();
    section(&p.title, &format!("<div class=\"faq\">{items}</div>"))
}

fn render_cta_sell(p: &CtaSellProps) -> String {
    section(
        "",
        &format!(
            "<div class=\"cta\"><div><div class=\"cta-title\">{}</div>\
             <div class=\"cta-text\">{}</div></div>\
             <a class=\"button\" href=\"{}\">{}</a></div>",
            html_escape(&p.title),
            html_escape(&p.text),
            html_escape(&p.href),
            html_escape(&p.cta)
        ),
    )
}

fn render_news_cards(p: &ListingProps, data: &DemoData) -> String {
    let cards: String = take_prefix(&data.news, p.limit)
        .iter()
        .map(|n| {
            format!(
                "<article class=\"news-card\"><img src=\"{}\" alt=\"{title}\">\
                 <div class=\"news-title\">{title}</div><p>{}</p></article>",
                html_escape(&n.image_url),
                html_escape(&n.excerpt),
                title = html_escape(&n.title),
            )
        })
        .collect();
    section(&p.title, &format!("<div class=\"news-cards\">{cards}</div>"))
}
