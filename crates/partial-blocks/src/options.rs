//! Run configuration.
//!
//! One immutable [`ExtractOptions`] value is built per run and borrowed by the
//! processor and the inventory builder. Keys are camelCase in every record
//! format and every field has a default, so a config file only needs the
//! keys it changes:
//!
//! ```toml
//! flatten = true
//! partialsDir = "dist/partials/"
//!
//! [templateWrap]
//! before = '<div class="sg-partial" {{wrapData}}>'
//! after = "</div>"
//! ```

use crate::scanner::UnterminatedPolicy;
use crate::wrap::{WrapPair, WrapSpec};
use serde::{Deserialize, Serialize};

/// Token in `templateWrap` replaced by the block's attribute string.
pub const WRAP_DATA_PLACEHOLDER: &str = "{{wrapData}}";

fn default_indent() -> String {
    "    ".to_string()
}

fn default_template_wrap() -> WrapPair {
    WrapPair::new(
        format!("<div class=\"partial\" {}>", WRAP_DATA_PLACEHOLDER),
        "</div>",
    )
}

/// Directive values applied when an annotation leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDefaults {
    pub brand: String,
    pub group: String,
    pub id: String,
}

/// Configuration of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// Replaces tabs in indentation; also one level of view-wrap indent.
    pub indent: String,
    /// Reduce every destination to its file name.
    pub flatten: bool,
    /// Joins normalized lines.
    pub line_separator: String,
    /// Container around the template variant.
    pub template_wrap: WrapPair,
    /// View wrap for blocks without a `wrap` directive.
    pub view_wrap: WrapSpec,
    pub unterminated: UnterminatedPolicy,
    pub defaults: BlockDefaults,

    // Only read by the persistence layer.
    pub base: String,
    pub partials_dir: String,
    pub storage_path: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            flatten: false,
            line_separator: "\n".to_string(),
            template_wrap: default_template_wrap(),
            view_wrap: WrapSpec::default(),
            unterminated: UnterminatedPolicy::default(),
            defaults: BlockDefaults::default(),
            base: "./".to_string(),
            partials_dir: "partials/".to_string(),
            storage_path: "inventory.json".to_string(),
        }
    }
}
