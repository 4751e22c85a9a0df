mod html;
mod inline;

pub use html::HtmlRuby;
pub use inline::InlineGloss;

use crate::{align::AnnotatedSpan, config::Markup};

/// A pluggable renderer that attaches readings to their text as "ruby"
/// annotations.
pub trait GlossRenderer: Send + Sync {
    /// Append `span` to `out`, with its reading attached when it has one.
    fn render(&self, span: &AnnotatedSpan, out: &mut String);

    /// Render a whole sequence of spans.
    fn render_all(&self, spans: &[AnnotatedSpan]) -> String {
        let mut out = String::with_capacity(spans.iter().map(|s| s.original.len() * 3).sum());
        for span in spans {
            self.render(span, &mut out);
        }

        out
    }
}

/// The built-in renderer for a markup choice.
pub fn for_markup(markup: Markup) -> Box<dyn GlossRenderer> {
    match markup {
        Markup::Html => Box::new(HtmlRuby),
        Markup::Inline => Box::new(InlineGloss::default()),
    }
}
