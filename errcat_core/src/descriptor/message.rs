//! Message composition rules shared by descriptors and catalog reports

/// Optional parts wrapped around a base message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageParts<'a> {
    pub context: &'a str,
    pub details: &'a str,
}

impl<'a> MessageParts<'a> {
    pub fn new(context: &'a str, details: &'a str) -> Self {
        Self { context, details }
    }

    pub fn context(context: &'a str) -> Self {
        Self {
            context,
            details: "",
        }
    }
}

/// `"{context}: {message} ({details})"`, empty parts omitted with their separators
pub fn compose(message: &str, parts: MessageParts<'_>) -> String {
    let mut composed =
        String::with_capacity(message.len() + parts.context.len() + parts.details.len() + 5);

    if !parts.context.is_empty() {
        composed.push_str(parts.context);
        composed.push_str(": ");
    }

    composed.push_str(message);

    if !parts.details.is_empty() {
        composed.push_str(" (");
        composed.push_str(parts.details);
        composed.push(')');
    }

    composed
}

/// Placeholder for a local code missing from the properties table
pub fn unknown_message(component: &str, base_code: i64) -> String {
    format!("unknown base code {} for component {}", base_code, component)
}

/// Placeholder for a configured local code without a message
pub fn default_message(component: &str, formatted_code: &str, base_code: i64) -> String {
    format!("error {} ({}::{})", formatted_code, component, base_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_all_parts() {
        assert_eq!(
            compose("bish bash bosh", MessageParts::new("Default context", "value: 3")),
            "Default context: bish bash bosh (value: 3)"
        );
    }

    #[test]
    fn test_compose_omits_empty_parts() {
        assert_eq!(compose("plain", MessageParts::default()), "plain");
        assert_eq!(compose("msg", MessageParts::context("ctx")), "ctx: msg");
        assert_eq!(compose("msg", MessageParts::new("", "d")), "msg (d)");
        assert_eq!(compose("", MessageParts::default()), "");
    }

    #[test]
    fn test_placeholders_are_diagnosable() {
        let unknown = unknown_message("ExampleB", 3);
        assert!(unknown.contains('3'));
        assert!(unknown.contains("ExampleB"));

        let default = default_message("ExampleB", "100002", 2);
        assert!(default.contains("100002"));
        assert!(default.contains("ExampleB"));
    }
}
