//! Catalog data: error properties, properties tables and components

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Static configuration of a single local code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorProperties {
    /// Where or what the error is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// System-facing message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Frontend-safe replacement for `message`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_fe: Option<String>,

    /// Whether the real message may be shown to end users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_fe: Option<bool>,
}

impl ErrorProperties {
    /// Properties with a system message
    pub fn message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }

    pub fn with_message_fe(mut self, message_fe: &str) -> Self {
        self.message_fe = Some(message_fe.to_string());
        self
    }

    pub fn with_show_fe(mut self, show_fe: bool) -> Self {
        self.show_fe = Some(show_fe);
        self
    }

    /// Context text, empty when absent
    pub fn context_text(&self) -> &str {
        self.context.as_deref().unwrap_or("")
    }

    /// System message text, empty when absent
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Frontend message text, empty when absent
    pub fn message_fe_text(&self) -> &str {
        self.message_fe.as_deref().unwrap_or("")
    }

    pub fn has_message(&self) -> bool {
        !self.message_text().is_empty()
    }

    pub fn has_message_fe(&self) -> bool {
        !self.message_fe_text().is_empty()
    }

    /// Configured `show_fe` flag, false when absent
    ///
    /// This is the raw configuration value. Descriptors additionally force it off when
    /// no message is configured.
    pub fn show_fe_flag(&self) -> bool {
        self.show_fe.unwrap_or(false)
    }
}

/// Local code → properties, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertiesTable {
    entries: IndexMap<i64, ErrorProperties>,
}

impl PropertiesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the properties of a local code
    ///
    /// A replaced code keeps its original position.
    pub fn insert(&mut self, code: i64, properties: ErrorProperties) -> Option<ErrorProperties> {
        self.entries.insert(code, properties)
    }

    /// Builder-style insert
    pub fn with(mut self, code: i64, properties: ErrorProperties) -> Self {
        self.insert(code, properties);
        self
    }

    pub fn get(&self, code: i64) -> Option<&ErrorProperties> {
        self.entries.get(&code)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &ErrorProperties)> {
        self.entries.iter().map(|(code, properties)| (*code, properties))
    }

    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(i64, ErrorProperties)> for PropertiesTable {
    fn from_iter<I: IntoIterator<Item = (i64, ErrorProperties)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Capabilities of a component beyond its numeric code scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    /// Only takes part in the numeric code scheme
    Global,
    /// Also carries a properties table and a section
    Customizable {
        properties: PropertiesTable,
        /// Overrides the catalog default section
        section: Option<String>,
    },
}

/// An error-producing component listed in a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    identifier: String,
    code: i64,
    kind: ComponentKind,
}

impl Component {
    /// Component with only a numeric code scheme
    pub fn global(identifier: &str, code: i64) -> Self {
        Self {
            identifier: identifier.to_string(),
            code,
            kind: ComponentKind::Global,
        }
    }

    /// Component with a properties table
    pub fn customizable(identifier: &str, code: i64, properties: PropertiesTable) -> Self {
        Self {
            identifier: identifier.to_string(),
            code,
            kind: ComponentKind::Customizable {
                properties,
                section: None,
            },
        }
    }

    /// Override the section; ignored for global-only components
    pub fn with_section(mut self, value: &str) -> Self {
        if let ComponentKind::Customizable { section, .. } = &mut self.kind {
            *section = Some(value.to_string());
        }
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Component code as configured, not validated
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn is_customizable(&self) -> bool {
        matches!(self.kind, ComponentKind::Customizable { .. })
    }

    pub fn properties(&self) -> Option<&PropertiesTable> {
        match &self.kind {
            ComponentKind::Customizable { properties, .. } => Some(properties),
            ComponentKind::Global => None,
        }
    }

    pub fn section_override(&self) -> Option<&str> {
        match &self.kind {
            ComponentKind::Customizable { section, .. } => section.as_deref(),
            ComponentKind::Global => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_defaults() {
        let properties = ErrorProperties::default();
        assert_eq!(properties.context_text(), "");
        assert!(!properties.has_message());
        assert!(!properties.show_fe_flag());
    }

    #[test]
    fn test_properties_builder() {
        let properties = ErrorProperties::message("bish bash bosh")
            .with_context("Default context")
            .with_show_fe(true);

        assert_eq!(properties.message_text(), "bish bash bosh");
        assert_eq!(properties.context_text(), "Default context");
        assert!(properties.show_fe_flag());
        assert!(!properties.has_message_fe());
    }

    #[test]
    fn test_table_keeps_declaration_order() {
        let table = PropertiesTable::new()
            .with(3, ErrorProperties::message("three"))
            .with(1, ErrorProperties::message("one"))
            .with(2, ErrorProperties::message("two"))
            .with(3, ErrorProperties::message("three again"));

        assert_eq!(table.codes().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(table.get(3).unwrap().message_text(), "three again");
        assert_eq!(table.len(), 3);
        assert!(table.get(4).is_none());
    }

    #[test]
    fn test_section_only_for_customizable() {
        let global = Component::global("Legacy", 4).with_section("ignored");
        assert_eq!(global.section_override(), None);
        assert!(global.properties().is_none());

        let custom = Component::customizable("A", 1, PropertiesTable::new()).with_section("weee");
        assert_eq!(custom.section_override(), Some("weee"));
        assert!(custom.is_customizable());
    }
}
