//! Translation hook
//!
//! errcat never translates anything itself. Every piece of message text passes through a
//! [`Translator`] together with a [`Locale`] hint; the default translator is the identity.

use crate::config::constants::l10n::SYSTEM_LOCALE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Locale hint passed to the translation hook
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Return the stored value unprocessed
    Raw,
    /// Let the translator pick the locale
    Auto,
    /// Opaque locale name handed to the translator
    Named(String),
}

impl Locale {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Auto
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Raw => write!(f, "raw"),
            Locale::Auto => write!(f, "auto"),
            Locale::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Host translation mechanism
pub trait Translator: Send + Sync {
    /// Translate `text` for `locale`; never called with [`Locale::Raw`]
    fn translate(&self, text: &str, locale: &Locale) -> String;
}

/// Default translator returning every text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _locale: &Locale) -> String {
        text.to_string()
    }
}

/// Translator plus the locale system messages are composed in
///
/// Cheap to clone; shared by descriptors and the query engine.
#[derive(Clone)]
pub struct L10n {
    translator: Arc<dyn Translator>,
    system_locale: Locale,
}

impl L10n {
    pub fn new(translator: Arc<dyn Translator>, system_locale: Locale) -> Self {
        Self {
            translator,
            system_locale,
        }
    }

    /// Identity translation with a custom system locale
    pub fn identity(system_locale: Locale) -> Self {
        Self::new(Arc::new(IdentityTranslator), system_locale)
    }

    pub fn system_locale(&self) -> &Locale {
        &self.system_locale
    }

    /// Translate text; the raw locale short-circuits the hook
    pub fn translate(&self, text: &str, locale: &Locale) -> String {
        if locale.is_raw() {
            return text.to_string();
        }
        self.translator.translate(text, locale)
    }

    /// Translate for the system locale
    pub fn translate_system(&self, text: &str) -> String {
        self.translate(text, &self.system_locale)
    }
}

impl Default for L10n {
    fn default() -> Self {
        Self::identity(Locale::named(SYSTEM_LOCALE))
    }
}

impl fmt::Debug for L10n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L10n")
            .field("system_locale", &self.system_locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Prefixes every text with its locale, makes translation visible in assertions
    pub struct TaggingTranslator;

    impl Translator for TaggingTranslator {
        fn translate(&self, text: &str, locale: &Locale) -> String {
            if text.is_empty() {
                return String::new();
            }
            format!("[{}]{}", locale, text)
        }
    }

    pub fn tagging() -> L10n {
        L10n::new(Arc::new(TaggingTranslator), Locale::named("en"))
    }
}
