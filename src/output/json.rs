use crate::model::PackageList;
use anyhow::Result;

pub fn generate_json_string(packages: &PackageList) -> Result<String> {
    let mut json = serde_json::to_string_pretty(packages)?;
    json.push('\n');
    Ok(json)
}
