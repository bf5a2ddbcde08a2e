//! Error descriptors
//!
//! A descriptor is a runtime error instance of a catalog component. All of its data is
//! resolved once, inside the constructor: the properties lookup, the global code and the
//! frozen system message. Construction never fails; missing or broken configuration turns
//! into placeholder text that names the component and the code.

mod base;
pub mod message;

pub use base::{BaseError, BoxError};
pub use message::{compose, MessageParts};

use crate::config::constants::l10n::FE_STUB_TEXT;
use crate::l10n::{L10n, Locale};
use crate::registry::{CodeSchemeMember, ComponentRef};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub struct ErrorDescriptor {
    base: BaseError,
    base_code: i64,
    component: String,
    component_code: i64,
    formatted_code: String,
    context: String,
    details: String,
    message_base: String,
    show_fe: bool,
    l10n: L10n,
}

impl ErrorDescriptor {
    /// Plain error: `message` is final and no catalog data is consulted
    pub fn classic<C: CodeSchemeMember>(
        component: &C,
        message: &str,
        base_code: i64,
        l10n: &L10n,
    ) -> Self {
        Self {
            base: BaseError::new(message.to_string(), component.global_code(base_code)),
            base_code,
            component: component.identifier().to_string(),
            component_code: component.component_code(),
            formatted_code: component.format_code(base_code),
            context: String::new(),
            details: String::new(),
            message_base: message.to_string(),
            show_fe: false,
            l10n: l10n.clone(),
        }
    }

    /// Catalog error: message, context and visibility come from the properties table
    pub fn structured(
        component: &ComponentRef<'_>,
        base_code: i64,
        details: impl Into<String>,
        l10n: &L10n,
    ) -> Self {
        let identifier = component.identifier().to_string();
        let formatted_code = component.format_code(base_code);
        let properties = component.lookup(base_code);

        let (message_base, show_fe, context) = match properties {
            None => (message::unknown_message(&identifier, base_code), false, String::new()),
            Some(properties) if !properties.has_message() => (
                message::default_message(&identifier, &formatted_code, base_code),
                false,
                properties.context_text().to_string(),
            ),
            Some(properties) => (
                properties.message_text().to_string(),
                properties.show_fe_flag(),
                properties.context_text().to_string(),
            ),
        };
        let details = details.into();

        let system_message = compose(
            &l10n.translate_system(&message_base),
            MessageParts::new(
                &l10n.translate_system(&context),
                &l10n.translate_system(&details),
            ),
        );

        let mut descriptor = Self {
            base: BaseError::new(system_message, component.global_code(base_code)),
            base_code,
            component: identifier,
            component_code: component.component_code(),
            formatted_code,
            context,
            details,
            message_base,
            show_fe,
            l10n: l10n.clone(),
        };

        // the system message is frozen above, the frontend variant may diverge from it
        if let Some(properties) = properties {
            if descriptor.show_fe && properties.has_message_fe() {
                descriptor.message_base = properties.message_fe_text().to_string();
            }
        }

        descriptor
    }

    /// Chain a prior error
    pub fn caused_by(mut self, cause: impl Into<BoxError>) -> Self {
        self.base = self.base.with_cause(cause.into());
        self
    }

    pub fn base(&self) -> &BaseError {
        &self.base
    }

    /// Global code
    pub fn code(&self) -> i64 {
        self.base.code()
    }

    /// Local (or raw) code passed at construction
    pub fn base_code(&self) -> i64 {
        self.base_code
    }

    pub fn component_identifier(&self) -> &str {
        &self.component
    }

    pub fn component_code(&self) -> i64 {
        self.component_code
    }

    /// Frozen system message
    pub fn message(&self) -> &str {
        self.base.message()
    }

    pub fn can_show_fe(&self) -> bool {
        self.show_fe
    }

    pub fn context(&self, locale: &Locale) -> String {
        self.l10n.translate(&self.context, locale)
    }

    pub fn details(&self, locale: &Locale) -> String {
        self.l10n.translate(&self.details, locale)
    }

    pub fn message_base(&self, locale: &Locale) -> String {
        self.l10n.translate(&self.message_base, locale)
    }

    /// Message safe to show to end users
    ///
    /// Hidden errors only reveal the stub text and the formatted global code.
    pub fn message_fe(&self, locale: &Locale) -> String {
        if !self.show_fe {
            return format!(
                "{} {}",
                self.l10n.translate(FE_STUB_TEXT, locale),
                self.formatted_code
            );
        }

        compose(
            &self.message_base(locale),
            MessageParts::new(&self.context(locale), &self.details(locale)),
        )
    }

    /// Replace the context for messages composed from now on
    pub fn set_context(&mut self, value: &str) -> &mut Self {
        self.context = value.to_string();
        self
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl Error for ErrorDescriptor {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.base.source()
    }
}
