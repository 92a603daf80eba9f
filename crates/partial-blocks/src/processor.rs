//! Block processing: raw block in, fully resolved [`ExtractedBlock`] out.

use crate::attributes;
use crate::case::start_case;
use crate::directive::{DirectiveValue, Directives};
use crate::error::{BlockIssue, Result};
use crate::indent;
use crate::options::{ExtractOptions, WRAP_DATA_PLACEHOLDER};
use crate::scanner::RawBlock;
use crate::wrap::{WrapPair, WrapSpec};
use partial_fs::NormalizedPath;
use partial_fs::checksum::compute_parts_checksum;
use serde::{Serialize, Serializer};

/// A source document: its text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub origin: String,
    pub text: String,
}

impl Document {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }
}

/// One extracted partial with every rendered variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedBlock {
    /// Checksum identity used for deduplication.
    pub id: String,
    pub name: String,
    /// Serialized as `false` when there is no category.
    #[serde(serialize_with = "category_or_false")]
    pub category: Option<String>,
    pub group: String,
    pub brand: String,
    /// Relative path the partial is written to.
    pub destination: String,
    pub filename: String,
    /// Directory part of the `extract` value, with trailing `/`.
    pub path: String,
    pub options: Directives,
    /// The de-indented body.
    pub content: String,
    /// `content` inside the view wrap.
    pub view: String,
    /// `content` inside the template wrap.
    pub template: String,
    pub origin: String,
}

fn category_or_false<S: Serializer>(
    category: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match category {
        Some(category) => serializer.serialize_str(category),
        None => serializer.serialize_bool(false),
    }
}

/// Turns [`RawBlock`]s into [`ExtractedBlock`]s under one run configuration.
#[derive(Debug, Clone)]
pub struct BlockProcessor<'a> {
    options: &'a ExtractOptions,
    view_wrap: WrapPair,
}

impl<'a> BlockProcessor<'a> {
    /// # Errors
    ///
    /// Fails when the configured `viewWrap` cannot be formalized.
    pub fn new(options: &'a ExtractOptions) -> Result<Self> {
        Ok(Self {
            options,
            view_wrap: options.view_wrap.formalize()?,
        })
    }

    pub fn options(&self) -> &ExtractOptions {
        self.options
    }

    /// Process one raw block from the document `origin`.
    ///
    /// Returns the [`BlockIssue`] that keeps the block out of the inventory
    /// when the annotation has no destination or an unusable wrap.
    pub fn process(
        &self,
        raw: &RawBlock,
        origin: &str,
    ) -> std::result::Result<ExtractedBlock, BlockIssue> {
        let mut directives = Directives::parse(&raw.annotation);
        let Some(extract) = directives.destination() else {
            return Err(BlockIssue::MissingMandatoryDirective {
                line: raw.start_line,
            });
        };

        let extract = NormalizedPath::new(extract);
        let filename = extract.file_name().unwrap_or(extract.as_str()).to_string();
        let path = match extract.as_str().rfind('/') {
            Some(idx) => extract.as_str()[..=idx].to_string(),
            None => String::new(),
        };
        let destination = if self.options.flatten {
            filename.clone()
        } else {
            extract.as_str().to_string()
        };
        if !NormalizedPath::new(&destination).is_contained() {
            return Err(BlockIssue::UnsafeDestination {
                line: raw.start_line,
                destination,
            });
        }

        let name = directives
            .text("name")
            .unwrap_or_else(|| start_case(extract.file_stem().unwrap_or(&filename)));
        let category = directives
            .text("category")
            .or_else(|| extract.leading_dir().map(start_case));

        let defaults = &self.options.defaults;
        for (key, default) in [
            ("brand", &defaults.brand),
            ("group", &defaults.group),
            ("id", &defaults.id),
        ] {
            if !directives.contains(key) && !default.is_empty() {
                directives.insert(key, DirectiveValue::Text(default.clone()));
            }
        }
        let brand = directives.text("brand").unwrap_or_default();
        let group = directives.text("group").unwrap_or_default();

        let wrap = match directives.get("wrap") {
            Some(value) => WrapSpec::from(value)
                .formalize()
                .map_err(|e| BlockIssue::InvalidWrap {
                    line: raw.start_line,
                    message: e.to_string(),
                })?,
            None => self.view_wrap.clone(),
        };
        directives.insert("wrap", DirectiveValue::Wrap(wrap.clone()));

        let body = raw
            .content
            .trim_start_matches(['\n', '\r'])
            .trim_end();
        let lines = indent::normalize_lines(body, &self.options.indent);
        let separator = self.options.line_separator.as_str();
        let content = lines.join(separator);
        let view = self.render_view(&lines, &wrap, &content);
        let attributes = attributes::render(&directives);
        let template = self.render_template(&lines, &attributes, &content);

        let id = compute_parts_checksum(&[&destination, &attributes, &content, &view, &template]);

        tracing::debug!(
            origin,
            line = raw.start_line,
            destination = %destination,
            id = %id,
            "processed block"
        );

        Ok(ExtractedBlock {
            id,
            name,
            category,
            group,
            brand,
            destination,
            filename,
            path,
            options: directives,
            content,
            view,
            template,
            origin: origin.to_string(),
        })
    }

    fn render_view(&self, lines: &[String], wrap: &WrapPair, content: &str) -> String {
        if wrap.before.is_empty() {
            return content.to_string();
        }
        let mut view = Vec::with_capacity(lines.len() + 4);
        view.push(wrap.before.clone());
        view.push(String::new());
        view.extend(indent::raise(lines, &self.options.indent));
        view.push(String::new());
        view.push(wrap.after.clone());
        view.join(&self.options.line_separator)
    }

    fn render_template(&self, lines: &[String], attributes: &str, content: &str) -> String {
        let container = &self.options.template_wrap;
        if container.is_empty() {
            return content.to_string();
        }
        let mut template = Vec::with_capacity(lines.len() + 2);
        template.push(container.before.replace(WRAP_DATA_PLACEHOLDER, attributes));
        template.extend(lines.iter().cloned());
        template.push(container.after.replace(WRAP_DATA_PLACEHOLDER, attributes));
        template.join(&self.options.line_separator)
    }
}
