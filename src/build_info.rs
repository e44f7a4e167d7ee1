use serde::Serialize;

use crate::config::Settings;

/// Metadata describing the running build, shown in error page footers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub built: String,
    pub commit: String,
}

impl BuildInfo {
    pub fn new(built: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            built: built.into(),
            commit: commit.into(),
        }
    }
}

impl From<&Settings> for BuildInfo {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.built.clone(), settings.commit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taken_from_settings() {
        let settings = Settings {
            built: "2024-01-01T00:00:00Z".into(),
            commit: "abc123".into(),
            ..Settings::default()
        };
        assert_eq!(
            BuildInfo::from(&settings),
            BuildInfo::new("2024-01-01T00:00:00Z", "abc123")
        );
    }
}
