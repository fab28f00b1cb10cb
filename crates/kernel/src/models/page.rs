//! Page documents and placed block instances.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::routing::SlugTemplate;

/// Untyped property bag as stored. Decoded per block type at render time.
pub type Props = Map<String, Value>;

/// Unwrap a JSON object into a property map. Anything else yields an empty map.
pub fn into_props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

fn lenient_props<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Props, D::Error> {
    Value::deserialize(deserializer).map(into_props)
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// One addressable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDoc {
    /// Stable identifier, assigned at creation and never reused.
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Path without leading/trailing slashes. Empty for the site root.
    /// May contain a bracketed placeholder segment (`cars/[id]`).
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub is_published: bool,

    /// Rendering order.
    #[serde(default)]
    pub blocks: Vec<BlockInstance>,
}

/// One placed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstance {
    /// Unique within the owning page.
    pub id: String,

    /// Registry key. Unknown types are kept and render nothing.
    #[serde(rename = "type")]
    pub block_type: String,

    /// A stored non-object reads as empty props.
    #[serde(default, deserialize_with = "lenient_props")]
    pub props: Props,

    /// `Some(false)` disables rendering; absent means enabled. Non-boolean
    /// stored values read as absent.
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_enabled: Option<bool>,
}

impl PageDoc {
    /// Find a block by id.
    pub fn find_block(&self, block_id: &str) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Position of a block within the page.
    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// Return a new page whose block `block_id` is replaced by `next`.
    pub fn replace_block(&self, block_id: &str, next: BlockInstance) -> PageDoc {
        let blocks = self
            .blocks
            .iter()
            .map(|b| {
                if b.id == block_id {
                    next.clone()
                } else {
                    b.clone()
                }
            })
            .collect();
        PageDoc {
            blocks,
            ..self.clone()
        }
    }

    /// Return a new page with `blocks` swapped out wholesale.
    pub fn with_blocks(&self, blocks: Vec<BlockInstance>) -> PageDoc {
        PageDoc {
            blocks,
            ..self.clone()
        }
    }

    /// Whether the slug is a parametric template such as `cars/[id]`.
    pub fn is_template(&self) -> bool {
        SlugTemplate::parse(&self.slug).is_some()
    }
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            props,
            is_enabled: None,
        }
    }

    /// Anything but an explicit `false` counts as enabled.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled != Some(false)
    }
}
