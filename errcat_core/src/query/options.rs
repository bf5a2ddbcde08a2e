//! Query options and filters

use crate::config::runtime::QueryPreferences;
use crate::l10n::Locale;
use crate::registry::{CodeSchemeMember, ComponentRef, ErrorProperties, HasSection};
use serde::{Deserialize, Serialize};

/// How a query reports and tolerates what it finds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Record validation errors under `__errors` and keep going
    pub collect_errors: bool,
    /// Skip invalid entries silently
    pub tolerate_invalid: bool,
    /// Emit extended records instead of composed messages
    pub extended: bool,
    /// Locale for report text, the catalog system locale when `None`
    pub locale: Option<Locale>,
    /// Validate only, emit no records
    pub skip_data: bool,
    /// Compact records use the frontend message when there is one
    pub prefer_frontend_message: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from `ERRCAT_QUERY_*` preferences
    pub fn from_preferences(preferences: &QueryPreferences) -> Self {
        Self {
            collect_errors: preferences.collect_errors,
            tolerate_invalid: preferences.tolerate_invalid,
            extended: preferences.extended,
            locale: preferences.locale.as_deref().map(Locale::named),
            skip_data: false,
            prefer_frontend_message: preferences.prefer_frontend_message,
        }
    }

    pub fn collect_errors(mut self, value: bool) -> Self {
        self.collect_errors = value;
        self
    }

    pub fn tolerate_invalid(mut self, value: bool) -> Self {
        self.tolerate_invalid = value;
        self
    }

    pub fn extended(mut self, value: bool) -> Self {
        self.extended = value;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn skip_data(mut self, value: bool) -> Self {
        self.skip_data = value;
        self
    }

    pub fn prefer_frontend_message(mut self, value: bool) -> Self {
        self.prefer_frontend_message = value;
        self
    }

    /// Validation errors do not abort the query
    pub fn is_lenient(&self) -> bool {
        self.collect_errors || self.tolerate_invalid
    }
}

/// Entry and code filters; `ex` excludes, `in` includes, empty values are disabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    pub base_code_from_ex: Option<i64>,
    pub base_code_to_ex: Option<i64>,
    pub base_code_from_in: Option<i64>,
    pub base_code_to_in: Option<i64>,
    pub base_code_list_ex: Vec<i64>,
    pub base_code_list_in: Vec<i64>,
    pub component_code_list_ex: Vec<i64>,
    pub component_code_list_in: Vec<i64>,
    /// Case-sensitive substrings of component identifiers
    pub identifier_part_list_ex: Vec<String>,
    pub identifier_part_list_in: Vec<String>,
    /// Only applied to components exposing a section
    pub section_list_ex: Vec<String>,
    pub section_list_in: Vec<String>,
    /// `Some(true)`: visible codes only, `Some(false)`: hidden codes only
    pub show_fe: Option<bool>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_code_from_ex(mut self, code: i64) -> Self {
        self.base_code_from_ex = Some(code);
        self
    }

    pub fn base_code_to_ex(mut self, code: i64) -> Self {
        self.base_code_to_ex = Some(code);
        self
    }

    pub fn base_code_from_in(mut self, code: i64) -> Self {
        self.base_code_from_in = Some(code);
        self
    }

    pub fn base_code_to_in(mut self, code: i64) -> Self {
        self.base_code_to_in = Some(code);
        self
    }

    pub fn base_code_list_ex<I: IntoIterator<Item = i64>>(mut self, codes: I) -> Self {
        self.base_code_list_ex.extend(codes);
        self
    }

    pub fn base_code_list_in<I: IntoIterator<Item = i64>>(mut self, codes: I) -> Self {
        self.base_code_list_in.extend(codes);
        self
    }

    pub fn component_code_list_ex<I: IntoIterator<Item = i64>>(mut self, codes: I) -> Self {
        self.component_code_list_ex.extend(codes);
        self
    }

    pub fn component_code_list_in<I: IntoIterator<Item = i64>>(mut self, codes: I) -> Self {
        self.component_code_list_in.extend(codes);
        self
    }

    pub fn identifier_part_list_ex<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_part_list_ex
            .extend(parts.into_iter().map(Into::into));
        self
    }

    pub fn identifier_part_list_in<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_part_list_in
            .extend(parts.into_iter().map(Into::into));
        self
    }

    pub fn section_list_ex<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_list_ex
            .extend(sections.into_iter().map(Into::into));
        self
    }

    pub fn section_list_in<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_list_in
            .extend(sections.into_iter().map(Into::into));
        self
    }

    pub fn show_fe(mut self, value: bool) -> Self {
        self.show_fe = Some(value);
        self
    }

    /// Component-level filters: configured code, section, identifier parts
    pub fn accepts_component(&self, component: &ComponentRef<'_>) -> bool {
        let code = component.configured_code();
        if self.component_code_list_ex.contains(&code) {
            return false;
        }
        if !self.component_code_list_in.is_empty() && !self.component_code_list_in.contains(&code)
        {
            return false;
        }

        if let Some(customizable) = component.customizable() {
            let section = customizable.section();
            if self.section_list_ex.iter().any(|s| s == section) {
                return false;
            }
            if !self.section_list_in.is_empty() && !self.section_list_in.iter().any(|s| s == section)
            {
                return false;
            }
        }

        let identifier = component.identifier();
        if self
            .identifier_part_list_ex
            .iter()
            .any(|part| identifier.contains(part.as_str()))
        {
            return false;
        }
        if !self.identifier_part_list_in.is_empty()
            && !self
                .identifier_part_list_in
                .iter()
                .any(|part| identifier.contains(part.as_str()))
        {
            return false;
        }

        true
    }

    /// Built-in local code filters, in order: lists, `show_fe`, exclusive range, inclusive range
    pub fn accepts_code(&self, base_code: i64, properties: &ErrorProperties) -> bool {
        if self.base_code_list_ex.contains(&base_code) {
            return false;
        }
        if !self.base_code_list_in.is_empty() && !self.base_code_list_in.contains(&base_code) {
            return false;
        }

        if let Some(show_fe) = self.show_fe {
            if show_fe != properties.show_fe_flag() {
                return false;
            }
        }

        !self.excluded_by_range(base_code) && self.included_by_range(base_code)
    }

    /// With `from <= to` only `[from, to]` is excluded; otherwise each bound excludes
    /// on its own side, so `from > to` excludes both tails.
    fn excluded_by_range(&self, base_code: i64) -> bool {
        let from_hit = self.base_code_from_ex.map_or(false, |from| base_code >= from);
        let to_hit = self.base_code_to_ex.map_or(false, |to| base_code <= to);

        match (self.base_code_from_ex, self.base_code_to_ex) {
            (Some(from), Some(to)) if from <= to => from_hit && to_hit,
            _ => from_hit || to_hit,
        }
    }

    /// With `from > to` codes outside `(to, from)` pass; otherwise `[from, to]` passes.
    fn included_by_range(&self, base_code: i64) -> bool {
        let below_from = self.base_code_from_in.map_or(false, |from| base_code < from);
        let above_to = self.base_code_to_in.map_or(false, |to| base_code > to);

        match (self.base_code_from_in, self.base_code_to_in) {
            (Some(from), Some(to)) if from > to => !(below_from && above_to),
            _ => !(below_from || above_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(filters: &QueryFilters, code: i64) -> bool {
        filters.accepts_code(code, &ErrorProperties::message("m"))
    }

    #[test]
    fn test_exclusive_range() {
        let filters = QueryFilters::new().base_code_from_ex(3).base_code_to_ex(5);
        let kept: Vec<i64> = (1..=7).filter(|&c| accepts(&filters, c)).collect();
        assert_eq!(kept, vec![1, 2, 6, 7]);

        let from_only = QueryFilters::new().base_code_from_ex(3);
        let kept: Vec<i64> = (1..=5).filter(|&c| accepts(&from_only, c)).collect();
        assert_eq!(kept, vec![1, 2]);

        let to_only = QueryFilters::new().base_code_to_ex(3);
        let kept: Vec<i64> = (1..=5).filter(|&c| accepts(&to_only, c)).collect();
        assert_eq!(kept, vec![4, 5]);
    }

    #[test]
    fn test_exclusive_range_reversed_excludes_either_side() {
        let filters = QueryFilters::new().base_code_from_ex(5).base_code_to_ex(3);
        let kept: Vec<i64> = (1..=7).filter(|&c| accepts(&filters, c)).collect();
        assert_eq!(kept, vec![4]);
    }

    #[test]
    fn test_inclusive_range() {
        let filters = QueryFilters::new().base_code_from_in(3).base_code_to_in(5);
        let kept: Vec<i64> = (1..=7).filter(|&c| accepts(&filters, c)).collect();
        assert_eq!(kept, vec![3, 4, 5]);

        let from_only = QueryFilters::new().base_code_from_in(2);
        assert!(!accepts(&from_only, 1));
        assert!(accepts(&from_only, 2));
    }

    #[test]
    fn test_inclusive_range_reversed_keeps_tails() {
        let filters = QueryFilters::new().base_code_from_in(5).base_code_to_in(3);
        let kept: Vec<i64> = (1..=7).filter(|&c| accepts(&filters, c)).collect();
        assert_eq!(kept, vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_code_lists() {
        let filters = QueryFilters::new()
            .base_code_list_in([1, 2, 3])
            .base_code_list_ex([2]);
        let kept: Vec<i64> = (1..=4).filter(|&c| accepts(&filters, c)).collect();
        assert_eq!(kept, vec![1, 3]);
    }

    #[test]
    fn test_show_fe_filter() {
        let visible = ErrorProperties::message("v").with_show_fe(true);
        let hidden = ErrorProperties::message("h");

        let only_visible = QueryFilters::new().show_fe(true);
        assert!(only_visible.accepts_code(1, &visible));
        assert!(!only_visible.accepts_code(1, &hidden));

        let only_hidden = QueryFilters::new().show_fe(false);
        assert!(only_hidden.accepts_code(1, &hidden));
        assert!(!only_hidden.accepts_code(1, &visible));
    }

    #[test]
    fn test_filters_deserialize_with_defaults() {
        let filters: QueryFilters =
            serde_json::from_str(r#"{"base_code_list_in": [1], "show_fe": true}"#).unwrap();
        assert_eq!(filters.base_code_list_in, vec![1]);
        assert_eq!(filters.show_fe, Some(true));
        assert!(filters.base_code_from_ex.is_none());
    }

    #[test]
    fn test_options_from_preferences() {
        let preferences = QueryPreferences {
            collect_errors: true,
            tolerate_invalid: false,
            extended: true,
            prefer_frontend_message: false,
            locale: Some("fr".to_string()),
        };
        let options = QueryOptions::from_preferences(&preferences);

        assert!(options.collect_errors);
        assert!(options.extended);
        assert!(options.is_lenient());
        assert_eq!(options.locale, Some(Locale::named("fr")));
    }
}
