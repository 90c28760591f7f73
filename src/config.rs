use crate::error::ConfigError;
use std::fs;
use std::path::Path;

// One line of the profile file: env|project|cluster|zone|namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterProfile {
    pub environment: String,
    pub project: String,
    pub cluster: String,
    pub zone: String,
    pub namespace: String,
}

pub fn load(path: &Path) -> Result<Vec<ClusterProfile>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<Vec<ClusterProfile>, ConfigError> {
    let mut profiles = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(ConfigError::MalformedLine {
                line: line.to_string(),
            });
        }
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ConfigError::MissingField {
                line: line.to_string(),
            });
        }

        profiles.push(ClusterProfile {
            environment: fields[0].to_string(),
            project: fields[1].to_string(),
            cluster: fields[2].to_string(),
            zone: fields[3].to_string(),
            namespace: fields[4].to_string(),
        });
    }

    if profiles.is_empty() {
        return Err(ConfigError::EmptyConfiguration);
    }
    Ok(profiles)
}
