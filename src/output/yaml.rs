use crate::model::PackageList;
use anyhow::Result;

pub fn generate_yaml_string(packages: &PackageList) -> Result<String> {
    Ok(serde_yaml::to_string(packages)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(yaml: &str) -> Vec<String> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_block_sequence() {
        let packages: PackageList = ["github.com/foo/bar", "gopkg.in/yaml.v2"]
            .into_iter()
            .collect();
        assert_eq!(
            generate_yaml_string(&packages).unwrap(),
            "- github.com/foo/bar\n- gopkg.in/yaml.v2\n"
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(generate_yaml_string(&PackageList::new()).unwrap(), "[]\n");
    }

    #[test]
    fn test_ambiguous_scalars_read_back_as_strings() {
        let paths = [
            "0x10", "0o17", "0b101", ".inf", "-.inf", ".nan", "1e3", "1.5", "0777", "yes", "no",
            "on", "off", "y", "null", "~", "true", "a:", "a: b", "#tag", "@scope/pkg",
            "example.com/on",
        ];
        let packages: PackageList = paths.iter().copied().collect();

        let yaml = generate_yaml_string(&packages).unwrap();
        assert_eq!(read_back(&yaml), paths);
    }
}
