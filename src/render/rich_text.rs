//! Rich text formatting: annotated spans to nested inline markup.
//!
//! Each span becomes a text leaf, optionally wrapped in a hyperlink, then
//! wrapped once per active annotation. The annotation order is fixed by
//! [`LAYER_ORDER`] and determines nesting: the last applied layer is the
//! outermost, so a bold code span formats as `code(strong(text))` and a
//! colored span always has the styled container on the outside.

use crate::model::{Annotations, Color, Span};

use super::node::{Fill, FormattedSpan, FormattedText, Inline};

/// Browsing context for formatted links.
pub const LINK_TARGET: &str = "_blank";

/// Link relation keeping the new context from reaching its opener.
pub const LINK_REL: &str = "noopener noreferrer";

/// URL schemes the output renderers emit as link or image targets.
pub const SAFE_URL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Check if a URL may be written into rendered output.
///
/// Scheme-less (relative) URLs pass; otherwise the scheme must be one of
/// [`SAFE_URL_SCHEMES`]. Whitespace and control characters are ignored
/// while reading the scheme, as browsers do.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let Some((scheme, _)) = cleaned.split_once(':') else {
        return true;
    };
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    SAFE_URL_SCHEMES
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

/// One annotation wrapping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// `strong`
    Bold,
    /// `emphasis`
    Italic,
    /// `strikethrough`
    Strikethrough,
    /// `underline`
    Underline,
    /// `code`
    Code,
    /// Styled color container
    Color,
}

/// Annotation layers in application order, innermost first.
pub const LAYER_ORDER: [Layer; 6] = [
    Layer::Bold,
    Layer::Italic,
    Layer::Strikethrough,
    Layer::Underline,
    Layer::Code,
    Layer::Color,
];

impl Layer {
    /// Check if the annotations enable this layer.
    pub fn applies(self, annotations: &Annotations) -> bool {
        match self {
            Layer::Bold => annotations.bold,
            Layer::Italic => annotations.italic,
            Layer::Strikethrough => annotations.strikethrough,
            Layer::Underline => annotations.underline,
            Layer::Code => annotations.code,
            Layer::Color => !annotations.color.is_default(),
        }
    }

    /// Wrap content in this layer.
    pub fn wrap(self, annotations: &Annotations, inner: Inline) -> Inline {
        let child = Box::new(inner);
        match self {
            Layer::Bold => Inline::Strong { child },
            Layer::Italic => Inline::Emphasis { child },
            Layer::Strikethrough => Inline::Strikethrough { child },
            Layer::Underline => Inline::Underline { child },
            Layer::Code => Inline::Code { child },
            Layer::Color => match fill_for(&annotations.color) {
                Some(fill) => Inline::Styled { fill, child },
                None => *child,
            },
        }
    }
}

/// Format a span sequence.
///
/// Returns `None` when the sequence is absent and empty content when it
/// is empty. Never fails.
pub fn format(spans: Option<&[Span]>) -> Option<FormattedText> {
    let spans = spans?;
    Some(FormattedText {
        spans: spans
            .iter()
            .enumerate()
            .map(|(key, span)| FormattedSpan {
                key,
                node: format_span(span),
            })
            .collect(),
    })
}

/// Concatenate the plain text of a span sequence, ignoring all formatting.
pub fn flatten(spans: Option<&[Span]>) -> String {
    spans
        .map(|spans| spans.iter().map(|s| s.plain_text.as_str()).collect())
        .unwrap_or_default()
}

/// Format a single span: link first, then each annotation layer.
pub fn format_span(span: &Span) -> Inline {
    let mut node = Inline::text(span.plain_text.clone());

    if let Some(url) = span.link_url.as_deref().filter(|url| !url.is_empty()) {
        node = Inline::Link {
            href: url.to_string(),
            target: LINK_TARGET.to_string(),
            rel: LINK_REL.to_string(),
            child: Box::new(node),
        };
    }

    LAYER_ORDER
        .iter()
        .filter(|layer| layer.applies(&span.annotations))
        .fold(node, |inner, layer| layer.wrap(&span.annotations, inner))
}

fn fill_for(color: &Color) -> Option<Fill> {
    match color {
        Color::Default => None,
        Color::Foreground(name) => Some(Fill::Foreground(name.clone())),
        Color::Background(name) => Some(Fill::Background(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(text: &str, annotations: Annotations) -> Span {
        Span::text(text).with_annotations(annotations)
    }

    #[test]
    fn test_absent_and_empty() {
        assert!(format(None).is_none());
        assert_eq!(flatten(None), "");

        let empty = format(Some(&[])).unwrap();
        assert!(empty.is_empty());
        assert_eq!(flatten(Some(&[])), "");
    }

    #[test]
    fn test_plain_span() {
        let node = format_span(&Span::text("Hello"));
        assert_eq!(node, Inline::text("Hello"));
    }

    #[test]
    fn test_bold_code_nesting() {
        let span = annotated(
            "x",
            Annotations {
                bold: true,
                code: true,
                ..Default::default()
            },
        );
        assert_eq!(format_span(&span).layer_names(), vec!["code", "strong", "text"]);
    }

    #[test]
    fn test_full_nesting_order() {
        let span = annotated(
            "x",
            Annotations {
                bold: true,
                italic: true,
                strikethrough: true,
                underline: true,
                code: true,
                color: Color::parse("red"),
            },
        )
        .with_link("https://example.com");

        assert_eq!(
            format_span(&span).layer_names(),
            vec![
                "styled",
                "code",
                "underline",
                "strikethrough",
                "emphasis",
                "strong",
                "link",
                "text"
            ]
        );
    }

    #[test]
    fn test_link_hardening() {
        let node = format_span(&Span::text("site").with_link("https://example.com"));
        match node {
            Inline::Link {
                href, target, rel, ..
            } => {
                assert_eq!(href, "https://example.com");
                assert_eq!(target, "_blank");
                assert_eq!(rel, "noopener noreferrer");
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_link_ignored() {
        let node = format_span(&Span::text("x").with_link(""));
        assert_eq!(node, Inline::text("x"));
    }

    #[test]
    fn test_colors() {
        let background = format_span(&annotated(
            "a",
            Annotations {
                color: Color::parse("red_background"),
                ..Default::default()
            },
        ));
        assert!(matches!(
            background,
            Inline::Styled { fill: Fill::Background(ref c), .. } if c == "red"
        ));

        let foreground = format_span(&annotated(
            "b",
            Annotations {
                color: Color::parse("blue"),
                ..Default::default()
            },
        ));
        assert!(matches!(
            foreground,
            Inline::Styled { fill: Fill::Foreground(ref c), .. } if c == "blue"
        ));

        let plain = format_span(&annotated("c", Annotations::default()));
        assert_eq!(plain, Inline::text("c"));
    }

    #[test]
    fn test_keys_follow_position() {
        let spans = vec![Span::text("a"), Span::bold("b"), Span::text("c")];
        let formatted = format(Some(&spans)).unwrap();
        let keys: Vec<usize> = formatted.spans.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }

    #[test]
    fn test_flatten_ignores_annotations() {
        let spans = vec![Span::bold("A"), Span::text("B").with_link("https://b")];
        assert_eq!(flatten(Some(&spans)), "AB");
    }

    #[test]
    fn test_safe_url_schemes() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("HTTP://example.com"));
        assert!(is_safe_url("mailto:team@example.com"));
        assert!(is_safe_url("/docs/page?q=a:b"));
        assert!(is_safe_url("#section"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(" Java\tScript:alert(1)"));
        assert!(!is_safe_url("data:text/html,<p>x</p>"));
    }

    #[test]
    fn test_layer_order_is_fixed() {
        assert_eq!(LAYER_ORDER.first(), Some(&Layer::Bold));
        assert_eq!(LAYER_ORDER.last(), Some(&Layer::Color));
    }
}
