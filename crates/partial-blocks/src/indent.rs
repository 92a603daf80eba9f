//! Indentation normalization for extracted block bodies.
//!
//! A block copied out of a page carries the page's nesting as leading
//! whitespace. Cropping the block-wide minimum restores the indentation the
//! author gave the fragment itself.

/// Leading width reported for blank lines so they never decide the crop.
pub const BLANK_LINE_WIDTH: usize = usize::MAX;

/// Replace tab characters in a line's leading whitespace with `indent`.
pub fn expand_tabs(line: &str, indent: &str) -> String {
    let body = line.trim_start();
    let lead = &line[..line.len() - body.len()];
    if !lead.contains('\t') {
        return line.to_string();
    }
    let mut expanded = lead.replace('\t', indent);
    expanded.push_str(body);
    expanded
}

/// Number of leading whitespace characters, or [`BLANK_LINE_WIDTH`] for a
/// line with no content.
pub fn leading_width(line: &str) -> usize {
    if line.trim().is_empty() {
        return BLANK_LINE_WIDTH;
    }
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Smallest leading width across `lines`; [`BLANK_LINE_WIDTH`] if every line
/// is blank.
pub fn crop_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| leading_width(line.as_ref()))
        .min()
        .unwrap_or(BLANK_LINE_WIDTH)
}

/// Remove `width` leading characters from every line.
///
/// Blank lines become empty. A width of [`BLANK_LINE_WIDTH`] leaves the
/// lines untouched.
pub fn crop<S: AsRef<str>>(lines: &[S], width: usize) -> Vec<String> {
    if width == BLANK_LINE_WIDTH {
        return lines.iter().map(|l| l.as_ref().to_string()).collect();
    }
    lines
        .iter()
        .map(|line| line.as_ref().chars().skip(width).collect())
        .collect()
}

/// Prefix every non-empty line with `offset`. Empty lines stay empty.
pub fn raise<S: AsRef<str>>(lines: &[S], offset: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| match line.as_ref() {
            "" => String::new(),
            line => format!("{}{}", offset, line),
        })
        .collect()
}

/// Split `content` into lines with trailing whitespace removed, tabs in the
/// indentation expanded to `indent`, and the common indentation cropped.
pub fn normalize_lines(content: &str, indent: &str) -> Vec<String> {
    let lines: Vec<String> = content
        .split('\n')
        .map(|line| expand_tabs(line.trim_end(), indent))
        .collect();
    let width = crop_width(&lines);
    crop(&lines, width)
}

/// [`normalize_lines`] joined with `separator`.
pub fn normalize(content: &str, indent: &str, separator: &str) -> String {
    normalize_lines(content, indent).join(separator)
}
