//! Low-level DOM helpers shared by the locators.
//!
//! Portal pages are table soup with `&nbsp;` padding everywhere, so every
//! comparison goes through [`normalize`] first.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

pub(crate) static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("invalid selector: table"));
pub(crate) static TR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
pub(crate) static TH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("invalid selector: th"));
pub(crate) static TD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));
pub(crate) static B: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b").expect("invalid selector: b"));
pub(crate) static NOBR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nobr").expect("invalid selector: nobr"));
pub(crate) static DIV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("invalid selector: div"));
pub(crate) static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector: a[href]"));

/// Collapses runs of whitespace (including non-breaking spaces) to a single
/// space and trims the ends.
pub fn normalize(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content with text nodes concatenated as-is, then normalized.
pub(crate) fn text_of(element: ElementRef) -> String {
    normalize(&element.text().collect::<String>())
}

/// Text content with a space between text nodes, so `<b>A</b>B` reads "A B".
pub(crate) fn spaced_text_of(element: ElementRef) -> String {
    normalize(&element.text().collect::<Vec<_>>().join(" "))
}

/// `Some(text)` unless the element's normalized text is empty.
pub(crate) fn non_empty_text(element: ElementRef) -> Option<String> {
    let text = text_of(element);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn tag_name(element: ElementRef) -> &str {
    element.value().name()
}

/// Elements that follow `anchor` in document order, including its
/// descendants.
pub(crate) fn elements_after<'a>(
    doc: &'a Html,
    anchor: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let anchor_id = anchor.id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

/// Text nodes that follow `anchor` in document order, excluding the anchor's
/// own text. `stop` is checked on every element after the anchor; iteration
/// ends at the first match.
pub(crate) fn texts_after<'a, F>(
    doc: &'a Html,
    anchor: ElementRef<'a>,
    stop: F,
) -> impl Iterator<Item = &'a str> + 'a
where
    F: Fn(ElementRef<'a>) -> bool + 'a,
{
    let anchor_id = anchor.id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != anchor_id)
        .skip(1)
        .skip_while(move |node| node.ancestors().any(|ancestor| ancestor.id() == anchor_id))
        .take_while(move |node| ElementRef::wrap(*node).map_or(true, |el| !stop(el)))
        .filter_map(|node| node.value().as_text().map(|text| &**text))
}

/// First following sibling element with the given tag.
pub(crate) fn next_sibling_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| tag_name(*sibling) == tag)
}

/// Nearest preceding sibling element with the given tag.
pub(crate) fn prev_sibling_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| tag_name(*sibling) == tag)
}

/// Parent element, if the parent is an element.
pub(crate) fn parent_element(element: ElementRef) -> Option<ElementRef> {
    element.parent().and_then(ElementRef::wrap)
}

/// Element ancestors, nearest first.
pub(crate) fn ancestor_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.ancestors().filter_map(ElementRef::wrap)
}

/// First element in `scope` matching `selector` whose normalized text equals
/// `label` exactly.
pub(crate) fn find_labeled<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    label: &str,
) -> Option<ElementRef<'a>> {
    scope
        .select(selector)
        .find(|element| text_of(*element) == label)
}

/// Direct child elements with the given tag.
pub(crate) fn child_tags<'a>(
    element: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| tag_name(*child) == tag)
}
