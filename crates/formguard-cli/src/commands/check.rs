use crate::document::{build_document, parse_values, DEFAULT_ROOT};
use anyhow::Context;
use formguard_form::{FormSchema, InvalidFieldReport, SubmitOutcome};
use formguard_validation::{Reporter, ValidatorRegistry};
use serde::Serialize;
use std::path::Path;

/// Outcome of checking one value document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub valid: bool,
    pub fields: usize,
    pub invalid_fields: Vec<InvalidFieldReport>,
}

/// Validate `values` against `schema` the way a submit would
pub fn check(schema: &FormSchema, values: &str, debug: bool) -> anyhow::Result<CheckReport> {
    let values = parse_values(values)?;
    let document = build_document(schema, &values)?;

    let mut builder = schema
        .to_builder(&document, &ValidatorRegistry::new())
        .context("Schema does not match the document")?
        .reporter(Reporter::new().debug(debug));

    if schema.element.is_none() {
        if let Some(root) = document.element(DEFAULT_ROOT) {
            builder = builder.element(root.as_target());
        }
    }

    let form = builder.build().context("Failed to build the form")?;
    let invalid_fields = match form.submit() {
        SubmitOutcome::Rejected(invalid) => invalid.iter().map(|field| field.report()).collect(),
        SubmitOutcome::Completed | SubmitOutcome::Cancelled => Vec::new(),
    };

    Ok(CheckReport {
        valid: invalid_fields.is_empty(),
        fields: form.field_count(),
        invalid_fields,
    })
}

/// Run the `check` command; returns whether the values passed
pub fn run(
    schema_path: &Path,
    values_path: &Path,
    json: bool,
    debug: bool,
) -> anyhow::Result<bool> {
    let schema = FormSchema::from_file(schema_path)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;
    let values = std::fs::read_to_string(values_path)
        .with_context(|| format!("Failed to read values {}", values_path.display()))?;

    let report = check(&schema, &values, debug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.valid {
        println!("All {} fields are valid", report.fields);
    } else {
        println!(
            "{} of {} fields are invalid:",
            report.invalid_fields.len(),
            report.fields
        );
        for field in &report.invalid_fields {
            println!("  {}: {}", field.field, field.error_message);
        }
    }

    Ok(report.valid)
}
