use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing translation for '{key}' in locale '{locale}'")]
    LocalizationMissing { locale: String, key: String },
    #[error("Could not render template '{0}'")]
    TemplateRenderFailure(String),
    #[error("No catalog loaded for locale '{0}'")]
    UnknownLocale(String),
    #[error("Invalid locale: {0}")]
    InvalidLocale(#[from] unic_langid::LanguageIdentifierError),
    #[error("Could not load catalogs: {0}")]
    Catalog(String),
    #[error("Could not parse config: {0}")]
    Config(#[from] rocket::figment::Error),
}
