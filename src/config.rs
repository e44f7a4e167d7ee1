use crate::errors::Error;
use log::{debug, info};
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use rocket::figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: String,
    pub built: String,
    pub commit: String,
    pub default_locale: String,
    pub locales_dir: String,
    pub template_dir: String,
    pub static_dir: String,
    pub bind_addr: String,
    pub bind_port: u16,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            environment: "development".into(),
            built: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown").into(),
            commit: option_env!("GIT_COMMIT").unwrap_or("unknown").into(),
            default_locale: "en".into(),
            locales_dir: "locales".into(),
            template_dir: "templates".into(),
            static_dir: "static".into(),
            bind_addr: "0.0.0.0".into(),
            bind_port: 8000,
        }
    }
}

impl Settings {
    /// Defaults, overridden by `config.toml`, overridden by the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::raw().only(&[
                "ENVIRONMENT",
                "BUILT",
                "COMMIT",
                "DEFAULT_LOCALE",
                "LOCALES_DIR",
                "TEMPLATE_DIR",
                "STATIC_DIR",
                "BIND_ADDR",
                "BIND_PORT",
            ]))
    }

    pub fn extract(figment: &Figment) -> Result<Settings, Error> {
        Ok(figment.extract::<Settings>()?)
    }

    pub fn read_config() -> Result<Settings, Error> {
        info!("Loading configuration from environment variables and config.toml");
        let settings = Settings::extract(&Settings::figment())?;

        debug!(
            "Settings: Environment: {}, Built: {}, Commit: {}, DefaultLocale: {}, BindAddr: {}, BindPort: {}",
            settings.environment,
            settings.built,
            settings.commit,
            settings.default_locale,
            settings.bind_addr,
            settings.bind_port
        );

        info!("Successfully loaded configuration");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_development() {
        let settings = Settings::default();
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.default_locale, "en");
        assert_eq!(settings.bind_port, 8000);
        assert!(!settings.built.is_empty());
        assert!(!settings.commit.is_empty());
    }

    #[test]
    fn later_providers_override_defaults() {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(("environment", "production"))
            .merge(("commit", "abc123"))
            .merge(("bind_port", 9092));
        let settings = Settings::extract(&figment).unwrap();

        assert_eq!(settings.environment, "production");
        assert_eq!(settings.commit, "abc123");
        assert_eq!(settings.bind_port, 9092);
        assert_eq!(settings.template_dir, "templates");
    }

    #[test]
    fn rejects_malformed_values() {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(("bind_port", "not a port"));
        assert!(matches!(Settings::extract(&figment), Err(Error::Config(_))));
    }
}
