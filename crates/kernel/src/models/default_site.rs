//! Built-in site document.
//!
//! Served whenever the store has nothing readable: first start, or a
//! corrupt persisted file.

use serde_json::{Value, json};

use super::demo::{DemoCar, DemoData, DemoFaq, DemoNews, DemoReel};
use super::page::{BlockInstance, PageDoc, into_props};
use super::site_config::{Footer, Link, Nav, SiteConfig, ThemeTokens};

/// Version stamp of the built-in document.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Build a fresh copy of the built-in document.
pub fn site_config() -> SiteConfig {
    SiteConfig {
        version: DEFAULT_VERSION.to_string(),
        theme: ThemeTokens {
            brand_name: "AICar".to_string(),
            accent: "indigo".to_string(),
        },
        nav: Nav {
            items: vec![
                Link::new("Cars", "/search"),
                Link::new("Clips", "/aiclips"),
                Link::new("Chat", "/aichat"),
            ],
        },
        footer: Footer {
            links: vec![
                Link::new("About", "/about"),
                Link::new("Privacy", "/privacy"),
                Link::new("Contacts", "/contacts"),
            ],
            note: "Demo build: content and media may be placeholders".to_string(),
        },
        pages: pages(),
        demo_data: demo_data(),
    }
}

fn pages() -> Vec<PageDoc> {
    vec![
        page(
            "p_home",
            "Home",
            "",
            vec![
                block(
                    "b_hero",
                    "hero",
                    json!({
                        "headline": "AICar: the smart way to pick a car",
                        "subline": "Listings, clips and an AI assistant in one place"
                    }),
                ),
                block(
                    "b_ai",
                    "ai_prompt",
                    json!({
                        "placeholder": "Ask the AI: \"Find a family car under $10,000\"",
                        "cta": "Ask"
                    }),
                ),
                block(
                    "b_search",
                    "search_widget",
                    json!({ "title": "Advanced search", "cta": "Find a car" }),
                ),
                block("b_strip", "reels_strip", json!({ "title": "Top clips" })),
                block(
                    "b_offers",
                    "car_grid",
                    json!({ "title": "Special offers", "limit": 6 }),
                ),
                block(
                    "b_sell",
                    "cta_sell",
                    json!({
                        "title": "Post a listing",
                        "text": "List your car in minutes and start getting leads.",
                        "cta": "Post a listing",
                        "href": "/sell"
                    }),
                ),
                block(
                    "b_news",
                    "news_cards",
                    json!({ "title": "News and reviews", "limit": 3 }),
                ),
            ],
        ),
        page(
            "p_search",
            "Advanced search",
            "search",
            vec![
                block(
                    "b_title",
                    "section_title",
                    json!({ "title": "Advanced search" }),
                ),
                block(
                    "b_search",
                    "search_widget",
                    json!({ "title": "Filters", "cta": "Search" }),
                ),
                block(
                    "b_hot",
                    "car_grid",
                    json!({ "title": "Hot deals", "limit": 4 }),
                ),
                block(
                    "b_list",
                    "car_list",
                    json!({ "title": "Results", "limit": 10 }),
                ),
            ],
        ),
        page(
            "p_search2",
            "Advanced search (variant 2)",
            "search-v2",
            vec![
                block(
                    "b_title",
                    "section_title",
                    json!({ "title": "Advanced search: variant 2" }),
                ),
                block(
                    "b_search",
                    "search_widget",
                    json!({ "title": "Filters", "cta": "Search" }),
                ),
                block(
                    "b_list",
                    "car_list",
                    json!({ "title": "Results", "limit": 12, "withSidebarHint": true }),
                ),
            ],
        ),
        page(
            "p_aiclips",
            "Clips",
            "aiclips",
            vec![block(
                "b_viewer",
                "reels_viewer",
                json!({ "title": "Clips" }),
            )],
        ),
        page(
            "p_aichat",
            "AI chat",
            "aichat",
            vec![
                block(
                    "b_hero",
                    "hero",
                    json!({
                        "headline": "AI chat",
                        "subline": "Ask a question, get car picks and advice"
                    }),
                ),
                block(
                    "b_ai",
                    "ai_prompt",
                    json!({
                        "placeholder": "For example: \"Which crossover is best under $15,000?\"",
                        "cta": "Ask"
                    }),
                ),
                block("b_faq", "faq", json!({ "title": "FAQ", "limit": 6 })),
            ],
        ),
        page(
            "p_sell",
            "Post a listing",
            "sell",
            vec![
                block(
                    "b_title",
                    "section_title",
                    json!({ "title": "Post a listing" }),
                ),
                block("b_spacer", "spacer", json!({ "h": 12 })),
                block(
                    "b_sell",
                    "cta_sell",
                    json!({
                        "title": "The demo form is simplified",
                        "text": "The full form with media upload comes next.",
                        "cta": "OK",
                        "href": "/"
                    }),
                ),
            ],
        ),
        page(
            "p_car_detail_tpl",
            "Template: listing",
            "cars/[id]",
            vec![
                block(
                    "b_car",
                    "car_detail",
                    json!({ "showAskAi": true, "showLeadButton": true }),
                ),
                block(
                    "b_sim",
                    "car_grid",
                    json!({ "title": "Similar listings", "limit": 4 }),
                ),
            ],
        ),
    ]
}

#[rustfmt::skip]
fn demo_data() -> DemoData {
    let cars = vec![
        car("c1", "Toyota Corolla", 9800, 2014, 165_000, "Chișinău", "Petrol", "AT", "corolla"),
        car("c2", "BMW 3 Series", 13900, 2013, 190_000, "Bălți", "Diesel", "AT", "bmw3"),
        car("c3", "Volkswagen Passat", 11700, 2015, 175_000, "Cahul", "Diesel", "MT", "passat"),
        car("c4", "Honda CR-V", 15800, 2012, 210_000, "Orhei", "Petrol", "AT", "crv"),
        car("c5", "Skoda Octavia", 10500, 2016, 150_000, "Chișinău", "Petrol", "MT", "octavia"),
        car("c6", "Mercedes C-Class", 16900, 2012, 220_000, "Ungheni", "Diesel", "AT", "cclass"),
        car("c7", "Mazda 6", 12400, 2015, 160_000, "Soroca", "Petrol", "AT", "mazda6"),
        car("c8", "Nissan Qashqai", 13200, 2016, 170_000, "Chișinău", "Diesel", "MT", "qashqai"),
    ];

    DemoData {
        cars,
        reels: vec![
            reel("r1", "Corolla: pros and cons", "1", "reel1", "c1"),
            reel("r2", "Passat: what to check", "2", "reel2", "c3"),
            reel("r3", "CR-V for the family", "3", "reel3", "c4"),
        ],
        news: vec![
            news("n1", "How to pick a car under $10k",
                "A short checklist for a sensible purchase.", "news1"),
            news("n2", "Top 5 buying mistakes", "What people most often overlook.", "news2"),
            news("n3", "Why inspection matters", "And how to avoid surprise repairs.", "news3"),
        ],
        faq: vec![
            faq("f1", "What is the AI chat?",
                "An AI consultant that helps pick a car and explains the details."),
            faq("f2", "Does the AI chat see real listings?",
                "In the demo it reads the sample data; \
                 in production it reads the listings database."),
            faq("f3", "Can I sell a car?", "Yes, through the \"Post a listing\" section."),
            faq("f4", "What are clips?", "Short video reviews of models."),
            faq("f5", "Is there moderation?", "Yes, content and listings are moderated."),
            faq("f6", "When is the production launch?",
                "After the demo, once the database, media and AI services move to production \
                 infrastructure."),
        ],
    }
}

fn page(id: &str, title: &str, slug: &str, blocks: Vec<BlockInstance>) -> PageDoc {
    PageDoc {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        is_published: true,
        blocks,
    }
}

fn block(id: &str, block_type: &str, props: Value) -> BlockInstance {
    BlockInstance::new(id, block_type, into_props(props))
}

fn image(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/1200/800")
}

fn video(seed: &str) -> String {
    format!("https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4?seed={seed}")
}

#[allow(clippy::too_many_arguments)]
fn car(
    id: &str,
    title: &str,
    price: i64,
    year: i32,
    mileage_km: i64,
    city: &str,
    fuel: &str,
    gearbox: &str,
    seed: &str,
) -> DemoCar {
    DemoCar {
        id: id.to_string(),
        title: title.to_string(),
        price,
        currency: "$".to_string(),
        year,
        mileage_km,
        city: city.to_string(),
        image_url: image(seed),
        fuel: Some(fuel.to_string()),
        gearbox: Some(gearbox.to_string()),
    }
}

fn reel(id: &str, title: &str, video_seed: &str, poster_seed: &str, car_id: &str) -> DemoReel {
    DemoReel {
        id: id.to_string(),
        title: title.to_string(),
        author: "AICar".to_string(),
        video_url: video(video_seed),
        poster_url: image(poster_seed),
        linked_car_id: Some(car_id.to_string()),
    }
}

fn news(id: &str, title: &str, excerpt: &str, seed: &str) -> DemoNews {
    DemoNews {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        image_url: image(seed),
    }
}

fn faq(id: &str, q: &str, a: &str) -> DemoFaq {
    DemoFaq {
        id: id.to_string(),
        q: q.to_string(),
        a: a.to_string(),
    }
}
