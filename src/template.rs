//! Lightweight mustache-style message template.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// A message template with `{{variable}}` placeholders.
///
/// ```rust
/// use dispatchify::MessageTemplate;
/// use std::collections::HashMap;
///
/// let tpl = MessageTemplate::new("Hello {{name}}, your code is {{code}}.");
/// let vars = HashMap::from([
///     ("name".to_string(), "Alice".to_string()),
///     ("code".to_string(), "1234".to_string()),
/// ]);
/// assert_eq!(tpl.render(&vars), "Hello Alice, your code is 1234.");
/// ```
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    template: String,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Replaces all `{{key}}` placeholders with the corresponding values.
    /// Variables with no matching entry are left unchanged.
    pub fn render(&self, variables: &HashMap<String, String>) -> String {
        VARIABLE_RE
            .replace_all(&self.template, |caps: &Captures| {
                variables
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// The raw template string.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl std::fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_renders_all_variables() {
        let tpl = MessageTemplate::new("Hi {{name}}, order {{orderId}} shipped.");
        let rendered = tpl.render(&vars(&[("name", "Bob"), ("orderId", "ORD-7")]));
        assert_eq!(rendered, "Hi Bob, order ORD-7 shipped.");
    }

    #[test]
    fn test_unknown_variables_left_in_place() {
        let tpl = MessageTemplate::new("Hello {{name}}!");
        assert_eq!(tpl.render(&vars(&[])), "Hello {{name}}!");
    }

    #[test]
    fn test_repeated_variable() {
        let tpl = MessageTemplate::new("{{x}} and {{x}}");
        assert_eq!(tpl.render(&vars(&[("x", "y")])), "y and y");
    }

    #[test]
    fn test_template_without_placeholders() {
        let tpl = MessageTemplate::new("plain text");
        assert_eq!(tpl.render(&vars(&[("unused", "v")])), "plain text");
    }
}
