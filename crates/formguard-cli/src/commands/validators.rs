use formguard_validation::ValidatorRegistry;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidatorEntry {
    name: String,
    default_trigger: String,
}

fn entries(registry: &ValidatorRegistry) -> Vec<ValidatorEntry> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| {
            registry.get(&name).map(|validator| ValidatorEntry {
                default_trigger: validator.default_trigger().to_string(),
                name,
            })
        })
        .collect()
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let entries = entries(&ValidatorRegistry::with_defaults());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Registered validators:");
        for entry in &entries {
            println!("  {:<12} (live on {})", entry.name, entry.default_trigger);
        }
    }

    Ok(())
}
