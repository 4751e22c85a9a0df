use crate::{align::AnnotatedSpan, renderer::GlossRenderer};

/// `<ruby>` markup, escaped for HTML text nodes. A span's grammatical class
/// becomes the element's `title`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRuby;

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

impl GlossRenderer for HtmlRuby {
    fn render(&self, span: &AnnotatedSpan, out: &mut String) {
        if !span.is_annotated {
            push_escaped(out, &span.original);
            return;
        }

        match &span.class {
            Some(class) => {
                out.push_str("<ruby title=\"");
                push_escaped(out, class);
                out.push_str("\">");
            }
            None => out.push_str("<ruby>"),
        }
        push_escaped(out, &span.original);
        out.push_str("<rt>");
        push_escaped(out, &span.reading);
        out.push_str("</rt></ruby>");
    }
}
