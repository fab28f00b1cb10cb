//! Demo business collections.
//!
//! Only their shape matters to the page engine: listing blocks enumerate
//! them in stored order, and the detail block looks cars up by id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoData {
    #[serde(default)]
    pub cars: Vec<DemoCar>,
    #[serde(default)]
    pub reels: Vec<DemoReel>,
    #[serde(default)]
    pub news: Vec<DemoNews>,
    #[serde(default)]
    pub faq: Vec<DemoFaq>,
}

impl DemoData {
    pub fn find_car(&self, car_id: &str) -> Option<&DemoCar> {
        self.cars.iter().find(|c| c.id == car_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoCar {
    pub id: String,
    pub title: String,
    pub price: i64,
    pub currency: String,
    pub year: i32,
    pub mileage_km: i64,
    pub city: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gearbox: Option<String>,
}

/// A short video clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReel {
    pub id: String,
    pub title: String,
    pub author: String,
    pub video_url: String,
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_car_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoNews {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoFaq {
    pub id: String,
    pub q: String,
    pub a: String,
}
