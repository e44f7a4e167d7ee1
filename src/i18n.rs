use fluent_langneg::{accepted_languages, negotiate_languages, NegotiationStrategy};
use fluent_templates::{ArcLoader, Loader};
use log::{debug, info, warn};
use std::path::Path;
use unic_langid::LanguageIdentifier;

use crate::errors::Error;

/// Fluent ids cannot start with a digit, so message keys live in the
/// `.ftl` files behind this prefix.
const MESSAGE_PREFIX: &str = "msg-";

/// Fluent catalogs for every locale under the locales directory.
pub struct I18n {
    loader: ArcLoader,
    locales: Vec<LanguageIdentifier>,
    default_locale: LanguageIdentifier,
}

impl I18n {
    /// Loads `<dir>/<locale>/*.ftl`. Messages missing from a locale are
    /// looked up in `default_locale` instead.
    pub fn load(dir: impl AsRef<Path>, default_locale: &str) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let default_locale: LanguageIdentifier = default_locale.parse()?;
        info!("Loading translations from {}", dir.display());

        let loader = ArcLoader::builder(dir, default_locale.clone())
            .build()
            .map_err(|e| Error::Catalog(e.to_string()))?;

        let mut locales = loader.locales().cloned().collect::<Vec<_>>();
        locales.sort_by_key(|locale| locale.to_string());
        if !locales.contains(&default_locale) {
            return Err(Error::UnknownLocale(default_locale.to_string()));
        }
        debug!(
            "Loaded locales: {}",
            locales
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            loader,
            locales,
            default_locale,
        })
    }

    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    pub fn locales(&self) -> &[LanguageIdentifier] {
        &self.locales
    }

    /// Fails with `LocalizationMissing` when neither `locale` nor the default
    /// locale has `key`.
    pub fn lookup(&self, locale: &LanguageIdentifier, key: &str) -> Result<String, Error> {
        self.loader
            .try_lookup(locale, &format!("{MESSAGE_PREFIX}{key}"))
            .ok_or_else(|| Error::LocalizationMissing {
                locale: locale.to_string(),
                key: key.to_owned(),
            })
    }

    /// Like `lookup`, but returns the key itself when no catalog has it.
    pub fn translate(&self, locale: &LanguageIdentifier, key: &str) -> String {
        self.lookup(locale, key).unwrap_or_else(|e| {
            warn!("{}, using the key as text", e);
            key.to_owned()
        })
    }

    /// The loaded locale named by a path segment such as `cy` in `/cy/start`.
    pub fn locale_for_prefix(&self, segment: &str) -> Option<&LanguageIdentifier> {
        let requested: LanguageIdentifier = segment.parse().ok()?;
        self.locales.iter().find(|locale| **locale == requested)
    }

    /// A locale named by the path prefix wins, then the best match for the
    /// `Accept-Language` header, then the default locale.
    pub fn negotiate(
        &self,
        path_prefix: Option<&str>,
        accept_language: Option<&str>,
    ) -> &LanguageIdentifier {
        if let Some(locale) = path_prefix.and_then(|segment| self.locale_for_prefix(segment)) {
            return locale;
        }

        let requested = accepted_languages::parse(accept_language.unwrap_or_default());
        negotiate_languages(
            requested.as_slice(),
            self.locales.as_slice(),
            Some(&self.default_locale),
            NegotiationStrategy::Lookup,
        )
        .first()
        .copied()
        .unwrap_or(&self.default_locale)
    }
}
