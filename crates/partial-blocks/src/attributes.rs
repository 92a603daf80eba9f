//! Directive maps rendered as HTML data attributes.

use crate::directive::{DirectiveValue, Directives};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EDGE_QUOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"]|['"]$"#).expect("Invalid edge quote regex"));

static DOUBLE_QUOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\?""#).expect("Invalid double quote regex"));

/// Render directives as `data-<key>="<value>"` pairs joined by spaces.
///
/// A formalized `wrap` becomes `data-wrap-before` / `data-wrap-after`, placed
/// after every other attribute.
///
/// ```
/// use partial_blocks::attributes::render;
/// use partial_blocks::directive::Directives;
///
/// let directives = Directives::parse("extract:box/card.html name:Card");
/// assert_eq!(render(&directives), r#"data-extract="box/card.html" data-name="Card""#);
/// ```
pub fn render(directives: &Directives) -> String {
    let mut attributes = Vec::with_capacity(directives.len() + 1);
    let mut wrap = None;

    for (key, value) in directives.iter() {
        match value {
            DirectiveValue::Wrap(pair) if key == "wrap" => wrap = Some(pair),
            _ => attributes.push(attribute(key, value)),
        }
    }

    if let Some(pair) = wrap {
        attributes.push(attribute("wrap-before", &pair.before));
        attributes.push(attribute("wrap-after", &pair.after));
    }

    attributes.join(" ")
}

fn attribute(key: &str, value: &impl Serialize) -> String {
    format!("data-{}=\"{}\"", key, attribute_value(value))
}

/// JSON-encode a value, strip one quote from each end and turn the
/// remaining double quotes into single quotes.
fn attribute_value(value: &impl Serialize) -> String {
    let encoded = serde_json::to_string(value).unwrap_or_default();
    let trimmed = EDGE_QUOTE_REGEX.replace_all(&encoded, "");
    DOUBLE_QUOTE_REGEX.replace_all(&trimmed, "'").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::WrapPair;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quotes_in_values_become_single_quotes() {
        let mut directives = Directives::new();
        directives.insert(
            "title",
            DirectiveValue::Text(r#"<b class="x">"#.to_string()),
        );
        assert_eq!(render(&directives), r#"data-title="<b class='x'>""#);
    }

    #[test]
    fn test_list_is_rendered_as_single_quoted_array() {
        let directives = Directives::parse("extract:a.html tags:one:two");
        assert_eq!(
            render(&directives),
            r#"data-extract="a.html" data-tags="['one','two']""#
        );
    }

    #[test]
    fn test_wrap_is_projected_last() {
        let mut directives = Directives::parse("extract:a.html brand:acme");
        directives.insert("wrap", DirectiveValue::Wrap(WrapPair::new("<ul>", "</ul>")));
        directives.insert("group", DirectiveValue::Text("lists".into()));
        assert_eq!(
            render(&directives),
            r#"data-extract="a.html" data-brand="acme" data-group="lists" data-wrap-before="<ul>" data-wrap-after="</ul>""#
        );
    }

    #[test]
    fn test_empty_values() {
        let mut directives = Directives::new();
        directives.insert("wrap", DirectiveValue::Wrap(WrapPair::default()));
        assert_eq!(render(&directives), r#"data-wrap-before="" data-wrap-after="""#);
    }

    #[test]
    fn test_empty_map_renders_nothing() {
        assert_eq!(render(&Directives::new()), "");
    }
}
