//! Block edit forms.
//!
//! Generates the HTML edit form for one block instance from its type's
//! field descriptors. Stored values are shown as the renderer reads them;
//! absent keys show the definition's defaults.

use std::collections::HashMap;

use serde_json::Value;

use super::block_props::BlockProps;
use super::block_types::{BlockDefinition, BlockRegistry, FieldDescriptor, FieldKind};
use crate::models::{BlockInstance, Props};
use crate::routes::helpers::html_escape;

/// Builder for block edit forms.
pub struct BlockFormBuilder<'a> {
    definition: &'a BlockDefinition,
    block: &'a BlockInstance,
    /// Stored props after decode, so coercions match rendering.
    effective: Props,
}

impl<'a> BlockFormBuilder<'a> {
    /// Create a builder for `block`. `None` when its type is not registered.
    pub fn new(registry: &'a BlockRegistry, block: &'a BlockInstance) -> Option<Self> {
        let definition = registry.get_definition(&block.block_type)?;
        let effective = BlockProps::decode(&block.block_type, &block.props)
            .map(|decoded| decoded.to_props())
            .unwrap_or_default();
        Some(Self {
            definition,
            block,
            effective,
        })
    }

    /// Generate the edit form posting to `action`.
    pub fn build(&self, action: &str) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            r#"<form method="post" action="{}" class="block-form block-form--{}" data-block-id="{}">"#,
            html_escape(action),
            html_escape(&self.definition.block_type),
            html_escape(&self.block.id)
        ));
        html.push_str(&format!(
            r#"<h3 class="block-form-title">{}</h3>"#,
            html_escape(&self.definition.label)
        ));

        for field in &self.definition.fields {
            html.push_str(&self.render_field(field));
        }

        html.push_str(
            r#"
            <div class="form-actions">
                <button type="submit" class="button button--primary">Apply</button>
            </div>
        </form>"#,
        );

        html
    }

    /// Decoded stored value, else the definition default.
    fn current_value(&self, key: &str) -> Option<&Value> {
        if self.block.props.contains_key(key) {
            self.effective.get(key)
        } else {
            self.definition.default_props.get(key)
        }
    }

    fn render_field(&self, field: &FieldDescriptor) -> String {
        let key = html_escape(&field.key);
        let label = html_escape(&field.label);
        let value = self.current_value(&field.key);
        let id = format!("field-{key}");

        match field.kind {
            FieldKind::Text | FieldKind::Url => {
                let val = html_escape(&value_as_text(value));
                let input_type = if field.kind == FieldKind::Url { "url" } else { "text" };
                format!(
                    r#"
                    <div class="form-group">
                        <label for="{id}">{label}</label>
                        <input type="{input_type}" id="{id}" name="{key}" value="{val}" class="form-control">
                    </div>
                    "#
                )
            }

            FieldKind::Textarea => {
                let val = html_escape(&value_as_text(value));
                format!(
                    r#"
                    <div class="form-group">
                        <label for="{id}">{label}</label>
                        <textarea id="{id}" name="{key}" rows="3" class="form-control">{val}</textarea>
                    </div>
                    "#
                )
            }

            FieldKind::Number => {
                let val = value_as_number(value).map(|n| n.to_string()).unwrap_or_default();
                let min = field
                    .min
                    .map(|m| format!(r#" min="{m}""#))
                    .unwrap_or_default();
                let max = field
                    .max
                    .map(|m| format!(r#" max="{m}""#))
                    .unwrap_or_default();
                format!(
                    r#"
                    <div class="form-group">
                        <label for="{id}">{label}</label>
                        <input type="number" id="{id}" name="{key}" value="{val}"{min}{max} class="form-control">
                    </div>
                    "#
                )
            }

            FieldKind::Boolean => {
                let checked = if matches!(value, Some(Value::Bool(true))) {
                    " checked"
                } else {
                    ""
                };
                format!(
                    r#"
                    <div class="form-group form-group--checkbox">
                        <label>
                            <input type="checkbox" id="{id}" name="{key}" value="true"{checked}>
                            {label}
                        </label>
                    </div>
                    "#
                )
            }

            FieldKind::Image => {
                let url = value_as_text(value);
                let preview = if url.is_empty() {
                    String::new()
                } else {
                    format!(
                        r#"<img class="image-preview" src="{}" alt="">"#,
                        html_escape(&url)
                    )
                };
                let val = html_escape(&url);
                format!(
                    r#"
                    <div class="form-group form-group--image">
                        <label for="{id}">{label}</label>
                        <input type="url" id="{id}" name="{key}" value="{val}" placeholder="https://" class="form-control">
                        {preview}
                    </div>
                    "#
                )
            }
        }
    }
}

/// Turn a submitted edit form into a props patch.
///
/// Only declared fields are read. Unchecked checkboxes are absent from a
/// submission, so every boolean field is written. Numbers that do not
/// parse are skipped and keep their stored value.
pub fn props_from_submission(
    definition: &BlockDefinition,
    form: &HashMap<String, String>,
) -> Props {
    let mut props = Props::new();
    for field in &definition.fields {
        let submitted = form.get(&field.key);
        let value = match field.kind {
            FieldKind::Boolean => Some(Value::Bool(submitted.is_some())),
            FieldKind::Number => submitted
                .and_then(|raw| raw.trim().parse::<i64>().ok())
                .map(Value::from),
            FieldKind::Text | FieldKind::Textarea | FieldKind::Url | FieldKind::Image => {
                submitted.map(|raw| Value::String(raw.clone()))
            }
        };
        if let Some(value) = value {
            props.insert(field.key.clone(), value);
        }
    }
    props
}

fn value_as_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn value_as_number(value: Option<&Value>) -> Option<i64> {
    value?.as_i64()
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::into_props;
    use serde_json::json;

    fn form_for(block_type: &str, props: Value) -> Option<String> {
        let block = BlockInstance::new("b1", block_type, into_props(props));
        BlockFormBuilder::new(BlockRegistry::standard(), &block)
            .map(|builder| builder.build("/api/pages/p1/blocks/b1"))
    }

    #[test]
    fn unknown_type_has_no_form() {
        assert!(form_for("carousel", json!({})).is_none());
    }

    #[test]
    fn hero_form_has_one_control_per_field() {
        let form = form_for("hero", json!({ "headline": "Hello" })).unwrap();
        assert!(form.contains(r#"action="/api/pages/p1/blocks/b1""#));
        assert!(form.contains(r#"name="headline" value="Hello""#));
        assert!(form.contains(r#"<textarea id="field-subline" name="subline""#));
        assert!(form.contains(r#"name="bgImage""#));
    }

    #[test]
    fn missing_props_fall_back_to_defaults() {
        let form = form_for("hero", json!({})).unwrap();
        assert!(form.contains(r#"value="Headline""#));
        assert!(form.contains(">Subheadline</textarea>"));
    }

    #[test]
    fn number_field_carries_bounds() {
        let form = form_for("car_grid", json!({ "limit": 4 })).unwrap();
        assert!(form.contains(r#"name="limit" value="4" min="1" max="24""#));
    }

    #[test]
    fn boolean_field_reflects_state() {
        let form = form_for("car_detail", json!({ "showLeadButton": false })).unwrap();
        assert!(form.contains(r#"name="showLeadButton" value="true">"#));
        assert!(form.contains(r#"name="showAskAi" value="true" checked>"#));
    }

    #[test]
    fn url_field_uses_url_input() {
        let form = form_for("cta_sell", json!({})).unwrap();
        assert!(form.contains(r#"<input type="url" id="field-href" name="href" value="/sell""#));
    }

    #[test]
    fn image_preview_only_when_set() {
        let form = form_for("hero", json!({ "bgImage": "" })).unwrap();
        assert!(!form.contains("image-preview"));
        let form = form_for("hero", json!({ "bgImage": "https://x/y.jpg" })).unwrap();
        assert!(form.contains(r#"<img class="image-preview" src="https://x/y.jpg""#));
    }

    #[test]
    fn submission_is_coerced_per_field_kind() {
        let def = BlockRegistry::standard().get_definition("car_list").unwrap();
        let form: HashMap<String, String> = [
            ("title", "Found"),
            ("limit", " 12 "),
            ("unknown", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let props = props_from_submission(def, &form);
        assert_eq!(props["title"], "Found");
        assert_eq!(props["limit"], 12);
        assert_eq!(props["withSidebarHint"], false);
        assert!(!props.contains_key("unknown"));
    }

    #[test]
    fn unparseable_number_is_skipped() {
        let def = BlockRegistry::standard().get_definition("spacer").unwrap();
        let form = HashMap::from([("h".to_string(), "tall".to_string())]);
        assert!(props_from_submission(def, &form).is_empty());
    }

    #[test]
    fn loosely_typed_values_show_as_rendered() {
        let props = json!({ "showAskAi": "no", "showLeadButton": false });
        let form = form_for("car_detail", props).unwrap();
        assert!(form.contains(r#"name="showAskAi" value="true" checked>"#));
        assert!(form.contains(r#"name="showLeadButton" value="true">"#));

        let form = form_for("car_grid", json!({ "limit": "4.5" })).unwrap();
        assert!(form.contains(r#"name="limit" value="4""#));
    }

    /// Parse the `name`/`value` pairs a browser would submit.
    fn submit_unchanged(form: &str) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for input in form.split("<input").skip(1) {
            let attr = |name: &str| {
                let start = input.find(&format!("{name}=\""))? + name.len() + 2;
                let end = input[start..].find('"')? + start;
                Some(input[start..end].to_string())
            };
            let Some(key) = attr("name") else { continue };
            let is_checkbox = input.contains(r#"type="checkbox""#);
            if is_checkbox && !input.contains(" checked") {
                continue;
            }
            fields.insert(key, attr("value").unwrap_or_default());
        }
        for area in form.split("<textarea").skip(1) {
            let name_start = area.find("name=\"").unwrap() + 6;
            let name_end = area[name_start..].find('"').unwrap() + name_start;
            let body_start = area.find('>').unwrap() + 1;
            let body_end = area.find("</textarea>").unwrap();
            fields.insert(
                area[name_start..name_end].to_string(),
                area[body_start..body_end].to_string(),
            );
        }
        fields
    }

    #[test]
    fn unchanged_submission_keeps_rendered_output() {
        use crate::content::{RenderContext, render_block};
        use crate::models::default_site;

        let site = default_site::site_config();
        let ctx = RenderContext::for_entity("c1");
        let cases = [
            ("car_detail", json!({ "showAskAi": "no", "showLeadButton": 0 })),
            ("car_grid", json!({ "title": 7, "limit": "4.5" })),
            ("car_list", json!({ "title": "Found", "limit": -3, "withSidebarHint": "yes" })),
            ("spacer", json!({ "h": 12.9 })),
            ("hero", json!({ "headline": "Hi", "subline": true, "bgImage": "" })),
        ];

        for (block_type, props) in cases {
            let block = BlockInstance::new("b1", block_type, into_props(props));
            let form = BlockFormBuilder::new(BlockRegistry::standard(), &block)
                .unwrap()
                .build("/x");
            let def = BlockRegistry::standard().get_definition(block_type).unwrap();
            let patch = props_from_submission(def, &submit_unchanged(&form));

            let mut resubmitted = block.clone();
            resubmitted.props.extend(patch);
            assert_eq!(
                render_block(&resubmitted, &site, &ctx),
                render_block(&block, &site, &ctx),
                "{block_type}"
            );
        }
    }

    #[test]
    fn values_are_escaped() {
        let form = form_for("section_title", json!({ "title": "\"><script>" })).unwrap();
        assert!(form.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!form.contains("<script>"));
    }
}
