//! Allow-list HTML cleaning for model-generated recaps.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

const ALLOWED_TAGS: [&str; 19] = [
    "div",
    "p",
    "br",
    "strong",
    "em",
    "ul",
    "ol",
    "li",
    "a",
    "code",
    "pre",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "span",
];

fn allowed_attributes() -> HashMap<&'static str, HashSet<&'static str>> {
    HashMap::from([
        ("a", HashSet::from(["href", "title", "target", "rel"])),
        ("span", HashSet::from(["class"])),
        ("div", HashSet::from(["class"])),
    ])
}

/// Strip every tag and attribute outside the recap allow-list.
///
/// Disallowed elements are unwrapped (their text survives, escaped); `script`
/// and `style` lose their content entirely. Links keep whatever `rel` the
/// model wrote; nothing is injected.
pub fn sanitize_recap_html(html: &str) -> String {
    Builder::default()
        .tags(ALLOWED_TAGS.into_iter().collect())
        .tag_attributes(allowed_attributes())
        .generic_attributes(HashSet::new())
        .link_rel(None)
        .clean(html)
        .to_string()
}

/// Escape text for use inside an HTML element.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
