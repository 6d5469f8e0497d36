//! Candidate token discovery in rendered HTML
//!
//! Parses a page with tree-sitter-html and yields the elements the
//! classifier looks at, each with the text of the node that follows it.
//! Token and successor text are DOM text content, so character references
//! such as `&#40;` arrive decoded.

use std::borrow::Cow;
use std::ops::Range;

use html_escape::decode_html_entities;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::class_list::ClassList;
use super::MarkupError;

/// Every element with a start tag; role filtering happens in Rust so tag
/// names can be compared case-insensitively
const ELEMENT_QUERY: &str = "(element (start_tag (tag_name) @tag)) @element";

/// Node kinds that are markup rather than character data
const MARKUP_KINDS: &[&str] = &[
    "start_tag",
    "end_tag",
    "self_closing_tag",
    "erroneous_end_tag",
    "comment",
    "doctype",
];

/// What kind of element a token was rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    /// `<code>` holding nothing but text; highlighting wraps its content
    InlineCode,
    /// `<span>` already carrying the identifier class
    Span,
}

/// Location of an element's `class` attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttr {
    /// Byte range of the value, including quotes when quoted
    pub value_range: Range<usize>,
    /// Quote character used in the source, if any
    pub quote: Option<char>,
}

/// One candidate token borrowed from the page source
#[derive(Debug, Clone)]
pub struct RenderedToken<'a> {
    pub role: TokenRole,
    /// Text content of the element with character references decoded
    pub text: Cow<'a, str>,
    /// Byte range of the element content between its tags
    pub inner: Range<usize>,
    /// Text of the immediately following sibling node
    pub successor: Option<Cow<'a, str>>,
    pub class_attr: Option<ClassAttr>,
    pub classes: ClassList,
}

/// Reusable parser plus compiled element query
pub struct MarkupScanner {
    parser: Parser,
    query: Query,
    element_capture: u32,
    tag_capture: u32,
}

impl MarkupScanner {
    pub fn new() -> Result<Self, MarkupError> {
        let language: Language = tree_sitter_html::LANGUAGE.into();

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| MarkupError::Language(e.to_string()))?;

        let query = Query::new(&language, ELEMENT_QUERY)
            .map_err(|e| MarkupError::Query(format!("{:?}", e)))?;
        let element_capture = query
            .capture_index_for_name("element")
            .ok_or_else(|| MarkupError::Query("missing @element capture".to_string()))?;
        let tag_capture = query
            .capture_index_for_name("tag")
            .ok_or_else(|| MarkupError::Query("missing @tag capture".to_string()))?;

        Ok(Self {
            parser,
            query,
            element_capture,
            tag_capture,
        })
    }

    /// Collect candidate tokens in document order
    ///
    /// Returns `None` if the parser produced no tree.
    pub fn scan<'a>(
        &mut self,
        html: &'a str,
        identifier_class: &str,
    ) -> Option<Vec<RenderedToken<'a>>> {
        let Some(tree) = self.parser.parse(html, None) else {
            tracing::warn!("HTML parser returned no tree, leaving page untouched");
            return None;
        };

        let mut tokens = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), html.as_bytes());

        while let Some(query_match) = matches.next() {
            let mut element = None;
            let mut tag = None;
            for capture in query_match.captures {
                if capture.index == self.element_capture {
                    element = Some(capture.node);
                } else if capture.index == self.tag_capture {
                    tag = Some(capture.node);
                }
            }
            let (Some(element), Some(tag)) = (element, tag) else {
                continue;
            };

            let tag_name = node_text(html, tag);
            let role = if tag_name.eq_ignore_ascii_case("code") {
                TokenRole::InlineCode
            } else if tag_name.eq_ignore_ascii_case("span") {
                TokenRole::Span
            } else {
                continue;
            };

            if let Some(token) = candidate(html, element, role, identifier_class) {
                tokens.push(token);
            }
        }

        tokens.sort_by_key(|t| t.inner.start);
        tracing::debug!("Scanned {} candidate tokens", tokens.len());
        Some(tokens)
    }
}

fn node_text<'a>(html: &'a str, node: Node) -> &'a str {
    html.get(node.byte_range()).unwrap_or("")
}

/// Build a token from a text-only element, or `None` if it does not qualify
fn candidate<'a>(
    html: &'a str,
    element: Node,
    role: TokenRole,
    identifier_class: &str,
) -> Option<RenderedToken<'a>> {
    let mut walk = element.walk();
    let children: Vec<Node> = element.children(&mut walk).collect();

    let (start_tag, rest) = children.split_first()?;
    // Implicitly closed elements have no end tag to anchor a rewrite on
    let (end_tag, content) = rest.split_last()?;
    if end_tag.kind() != "end_tag" {
        return None;
    }
    if !content
        .iter()
        .all(|n| matches!(n.kind(), "text" | "entity"))
    {
        return None;
    }

    let inner = start_tag.end_byte()..end_tag.start_byte();
    let text = decode_html_entities(html.get(inner.clone())?);

    let class_attr = class_attribute(html, *start_tag);
    let classes = class_attr
        .as_ref()
        .map(|(_, value)| ClassList::parse(value))
        .unwrap_or_default();

    if role == TokenRole::Span && !classes.contains(identifier_class) {
        return None;
    }

    Some(RenderedToken {
        role,
        text,
        inner,
        successor: successor_text(html, element).map(decode_text),
        class_attr: class_attr.map(|(attr, _)| attr),
        classes,
    })
}

/// Find the `class` attribute of a start tag and its unquoted value
fn class_attribute<'a>(html: &'a str, start_tag: Node) -> Option<(ClassAttr, &'a str)> {
    let mut walk = start_tag.walk();
    for attr in start_tag
        .children(&mut walk)
        .filter(|n| n.kind() == "attribute")
    {
        let mut attr_walk = attr.walk();
        let parts: Vec<Node> = attr.named_children(&mut attr_walk).collect();
        let Some(name) = parts.first() else {
            continue;
        };
        if !node_text(html, *name).eq_ignore_ascii_case("class") {
            continue;
        }

        // Bare `class` with no value carries no classes
        let value_node = parts.get(1)?;
        let raw = node_text(html, *value_node);
        return if value_node.kind() == "quoted_attribute_value" {
            let quote = raw.chars().next();
            let value = raw.trim_matches(|c| c == '"' || c == '\'');
            Some((
                ClassAttr {
                    value_range: value_node.byte_range(),
                    quote,
                },
                value,
            ))
        } else {
            Some((
                ClassAttr {
                    value_range: value_node.byte_range(),
                    quote: None,
                },
                raw,
            ))
        };
    }
    None
}

/// Text of the DOM node immediately after `element`
///
/// Character data directly after the element (including whitespace) forms
/// a text node and wins; otherwise the next element's text content is used.
/// Reaching the end of the parent means there is no successor.
fn successor_text<'a>(html: &'a str, element: Node) -> Option<Cow<'a, str>> {
    let gap_start = element.end_byte();

    let mut next = element.next_sibling();
    while let Some(node) = next {
        if matches!(node.kind(), "text" | "entity") {
            next = node.next_sibling();
        } else {
            break;
        }
    }

    let text_end = match next {
        Some(node) => node.start_byte(),
        None => element
            .parent()
            .map(|p| p.end_byte())
            .unwrap_or(gap_start),
    };
    if text_end > gap_start {
        return html.get(gap_start..text_end).map(Cow::Borrowed);
    }

    match next {
        None => None,
        Some(node) if node.kind() == "end_tag" => None,
        Some(node) if node.kind() == "element" => Some(text_content(html, node)),
        Some(node) => Some(Cow::Borrowed(node_text(html, node))),
    }
}

/// Resolve character references the way a DOM text node exposes them
fn decode_text(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(raw) => decode_html_entities(raw),
        Cow::Owned(raw) => Cow::Owned(decode_html_entities(&raw).into_owned()),
    }
}

/// Byte range between an element's start and end tags
fn inner_range(element: Node) -> Range<usize> {
    let mut walk = element.walk();
    let children: Vec<Node> = element.children(&mut walk).collect();

    let start = match children.first() {
        Some(first) if first.kind() == "start_tag" => first.end_byte(),
        _ => return element.end_byte()..element.end_byte(),
    };
    let end = match children.last() {
        Some(last) if last.kind() == "end_tag" => last.start_byte(),
        _ => element.end_byte(),
    };
    start..end.max(start)
}

/// DOM-style text content: the element's inner source with all tags removed
fn text_content<'a>(html: &'a str, element: Node) -> Cow<'a, str> {
    let range = inner_range(element);
    let mut out = String::new();
    let mut pos = range.start;
    strip_markup(html, element, &range, &mut pos, &mut out);

    if pos == range.start {
        return Cow::Borrowed(html.get(range).unwrap_or(""));
    }
    out.push_str(html.get(pos..range.end).unwrap_or(""));
    Cow::Owned(out)
}

fn strip_markup(html: &str, node: Node, range: &Range<usize>, pos: &mut usize, out: &mut String) {
    let mut walk = node.walk();
    for child in node.children(&mut walk) {
        // The element's own tags sit outside the inner range
        if child.end_byte() <= range.start || child.start_byte() >= range.end {
            continue;
        }
        if MARKUP_KINDS.contains(&child.kind()) {
            out.push_str(html.get(*pos..child.start_byte()).unwrap_or(""));
            *pos = child.end_byte();
        } else {
            strip_markup(html, child, range, pos, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(html: &str) -> Vec<RenderedToken<'_>> {
        MarkupScanner::new().unwrap().scan(html, "pln").unwrap()
    }

    #[test]
    fn test_identifier_span_is_candidate() {
        let tokens = scan(r#"<pre><span class="pln">PMEMoid</span></pre>"#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].role, TokenRole::Span);
        assert_eq!(tokens[0].text, "PMEMoid");
    }

    #[test]
    fn test_span_without_identifier_class_is_skipped() {
        let tokens = scan(r#"<pre><span class="kwd">struct</span><span>x</span></pre>"#);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_inline_code_is_candidate() {
        let tokens = scan("<p>Returns a <code>PMEMobjpool</code> handle.</p>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].role, TokenRole::InlineCode);
        assert_eq!(tokens[0].text, "PMEMobjpool");
        assert_eq!(tokens[0].successor.as_deref(), Some(" handle."));
    }

    #[test]
    fn test_code_with_child_elements_is_skipped() {
        let tokens = scan(r#"<code><span class="kwd">int</span> x</code>"#);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_code_wrapping_a_link_is_skipped() {
        let tokens = scan(r#"<p><code><a class="el" href="struct_p_m_e_moid.html">PMEMoid</a></code></p>"#);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_implicitly_closed_element_is_skipped() {
        // No end tag: the span runs to the end of its parent
        let tokens = scan(r#"<pre><span class="pln">PMEMoid</pre>"#);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_character_references_are_decoded() {
        let tokens = scan(
            r#"<pre><span class="pln">TOID</span>&#40;x)<span class="pln">P&#77;EMoid</span><span class="pun">&#x28;</span></pre>"#,
        );
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].successor.as_deref(), Some("(x)"));
        assert_eq!(tokens[1].text, "PMEMoid");
        assert_eq!(tokens[1].successor.as_deref(), Some("("));
    }

    #[test]
    fn test_successor_is_next_span_text() {
        let tokens = scan(
            r#"<pre><span class="pln">TOID</span><span class="pun">(</span><span class="kwd">struct</span></pre>"#,
        );
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].successor.as_deref(), Some("("));
    }

    #[test]
    fn test_successor_text_node_keeps_whitespace() {
        let tokens = scan(r#"<pre><span class="pln">TOID</span> (x)</pre>"#);
        assert_eq!(tokens[0].successor.as_deref(), Some(" (x)"));
    }

    #[test]
    fn test_last_child_has_no_successor() {
        let tokens = scan(r#"<pre><span class="pln">TOID</span></pre>"#);
        assert_eq!(tokens[0].successor, None);
    }

    #[test]
    fn test_successor_element_text_content_strips_tags() {
        let tokens = scan(
            r#"<p><code>TOID</code><a href="x"><b>my</b>_root</a></p>"#,
        );
        assert_eq!(tokens[0].successor.as_deref(), Some("my_root"));
    }

    #[test]
    fn test_class_attribute_quotes_are_recorded() {
        let html = "<span class='pln x'>a</span>";
        let tokens = scan(html);
        let attr = tokens[0].class_attr.as_ref().unwrap();
        assert_eq!(attr.quote, Some('\''));
        assert_eq!(&html[attr.value_range.clone()], "'pln x'");
        assert!(tokens[0].classes.contains("x"));
    }

    #[test]
    fn test_tag_names_are_case_insensitive() {
        let tokens = scan("<P><CODE>PMEMoid</CODE></P>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].role, TokenRole::InlineCode);
    }

    #[test]
    fn test_tokens_are_in_document_order() {
        let tokens = scan(
            r#"<pre><span class="pln">a</span><span class="pln">b</span></pre><code>c</code>"#,
        );
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_ref()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
