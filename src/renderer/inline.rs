use crate::{align::AnnotatedSpan, renderer::GlossRenderer};

/// Plain-text glosses in brackets after their text, e.g. `漢(kan)`.
#[derive(Debug, Clone, Copy)]
pub struct InlineGloss {
    open: char,
    close: char,
}

impl InlineGloss {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl Default for InlineGloss {
    fn default() -> Self {
        Self::new('(', ')')
    }
}

impl GlossRenderer for InlineGloss {
    fn render(&self, span: &AnnotatedSpan, out: &mut String) {
        out.push_str(&span.original);

        if span.is_annotated {
            out.push(self.open);
            out.push_str(&span.reading);
            out.push(self.close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_follow_the_original() {
        let spans = [
            AnnotatedSpan::annotated("한", "han".into()),
            AnnotatedSpan::annotated("글", "geul".into()),
            AnnotatedSpan::plain("!"),
        ];

        assert_eq!(InlineGloss::default().render_all(&spans), "한(han)글(geul)!");
        assert_eq!(InlineGloss::new('【', '】').render_all(&spans[..1]), "한【han】");
    }
}
