//! Builds a headless document matching a form schema

use anyhow::{bail, Context};
use formguard_form::{
    ControlKind, FieldSchema, FormSchema, MemoryControl, MemoryDocument, MemoryElement,
};
use formguard_validation::ValidatorKind;
use serde_json::{Map, Value};

/// Id of the root element when the schema names none
pub const DEFAULT_ROOT: &str = "form";

/// Control kind a validator expects to read from
fn control_kind(field: &FieldSchema) -> ControlKind {
    let kind = field
        .validator
        .as_ref()
        .and_then(Value::as_str)
        .and_then(ValidatorKind::from_key);
    match kind {
        Some(ValidatorKind::Checkbox) => ControlKind::Checkbox,
        Some(ValidatorKind::Radio) => ControlKind::Radio,
        Some(ValidatorKind::File) => ControlKind::File,
        Some(ValidatorKind::Select) => ControlKind::Select,
        _ => ControlKind::Text,
    }
}

fn control_for(selector: &str, id: String, kind: ControlKind) -> MemoryControl {
    let control = MemoryControl::new(id, kind);
    match selector.strip_prefix('.') {
        Some(class) => control.class(class),
        None => control,
    }
}

fn selector_name(selector: &str) -> &str {
    selector
        .strip_prefix('#')
        .or_else(|| selector.strip_prefix('.'))
        .unwrap_or(selector)
}

/// Create one control per single-element selector and one per supplied value
/// for group selectors, then load `values` into them
pub fn build_document(
    schema: &FormSchema,
    values: &Map<String, Value>,
) -> anyhow::Result<MemoryDocument> {
    let mut document = MemoryDocument::new();

    let root = schema.element.as_deref().map_or(DEFAULT_ROOT, selector_name);
    document.add_element(MemoryElement::new(root));
    if let Some(button) = &schema.submit_button {
        document.add_element(MemoryElement::new(selector_name(button)));
    }

    for field in &schema.fields {
        let kind = control_kind(field);

        if let Some(selector) = &field.elements {
            if !document.query(selector).is_empty() {
                continue;
            }
            let count = match values.get(selector) {
                Some(Value::Array(entries)) => entries.len(),
                _ => 1,
            };
            for position in 0..count {
                let id = format!("{}-{}", selector_name(selector), position);
                document.add(control_for(selector, id, kind));
            }
        } else if let Some(selector) = &field.element {
            if document.query(selector).is_empty() {
                document.add(control_for(selector, selector_name(selector).to_string(), kind));
            }
        }
    }

    for (selector, value) in values {
        document
            .fill(selector, value)
            .with_context(|| format!("Failed to apply the value for {}", selector))?;
    }

    tracing::debug!(
        target: "formguard::cli",
        "Built document with {} controls",
        document.controls().len()
    );
    Ok(document)
}

/// Parse the value document, which must be a JSON object
pub fn parse_values(source: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(source).context("Value document is not valid JSON")? {
        Value::Object(values) => Ok(values),
        other => bail!("Value document must be a JSON object, found {}", type_name(&other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formguard_form::Control;
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::from_json(
            &json!({
                "fields": [
                    { "element": "#email", "validator": "isEmail" },
                    { "elements": ".topics", "validator": "isCheckbox" },
                    { "element": "#cv", "validator": "isFile" }
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_controls_follow_validator_kinds() {
        let values = parse_values(
            r##"{ "#email": "ada@acme.com", ".topics": [true, false, true] }"##,
        )
        .unwrap();
        let document = build_document(&schema(), &values).unwrap();

        let email = document.query_one("#email").unwrap();
        assert_eq!(email.kind(), ControlKind::Text);
        assert_eq!(email.value(), Some("ada@acme.com".to_string()));

        let topics = document.query(".topics");
        assert_eq!(topics.len(), 3);
        assert!(topics.iter().all(|control| control.kind() == ControlKind::Checkbox));
        assert_eq!(document.query_one("#cv").unwrap().kind(), ControlKind::File);
        assert!(document.element(DEFAULT_ROOT).is_some());
    }

    #[test]
    fn test_unknown_selector_in_values() {
        let values = parse_values(r##"{ "#phone": "555" }"##).unwrap();
        let error = build_document(&schema(), &values).unwrap_err();
        assert!(error.to_string().contains("#phone"));
    }

    #[test]
    fn test_values_must_be_an_object() {
        let error = parse_values("[1, 2]").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Value document must be a JSON object, found an array"
        );
    }
}
