//! Composition model: the site document and its parts.

pub mod default_site;
pub mod demo;
pub mod page;
pub mod site_config;

pub use demo::{DemoCar, DemoData, DemoFaq, DemoNews, DemoReel};
pub use page::{BlockInstance, PageDoc, Props, into_props};
pub use site_config::{Footer, Link, Nav, SiteConfig, ThemeTokens};
