use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use score::Score;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, JsonSchema)]
struct AllDefinitions {
    a1: Score,
    a2: Option<Score>,
}

fn save_schema<T: JsonSchema>() -> serde_json::Result<()> {
    let settings = SchemaSettings::draft07();
    let gen = settings.into_generator();
    let schema = gen.into_root_schema_for::<T>();
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{schema_str}");
    Ok(())
}

fn main() -> serde_json::Result<()> {
    save_schema::<AllDefinitions>()
}
