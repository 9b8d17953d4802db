use unicode_width::UnicodeWidthStr;

use crate::render::renderer::{RenderedText, Renderer, StaticRenderer};

/// Which side the callout tail hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tail {
    Left,
    Right,
}

/// Text boxed in a speech bubble.
#[derive(Clone, Debug)]
pub struct SpeechBubble {
    inner: StaticRenderer,
}

impl SpeechBubble {
    /// Box `text` (lines split on `\n`). `unicode` selects rounded box-drawing
    /// characters over plain ASCII.
    pub fn new(text: &str, tail: Option<Tail>, unicode: bool) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let inner_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        let (top, side, bottom) = if unicode {
            (
                ("╭─", "─", "─╮"),
                "│",
                ("╰─", "─", "─╯"),
            )
        } else {
            ((".-", "-", "-."), "|", ("`-", "-", "-`"))
        };

        let rule = |(l, mid, r): (&str, &str, &str)| format!("{l}{}{r}", mid.repeat(inner_width));
        let mut bubble = Vec::with_capacity(lines.len() + 4);
        bubble.push(rule(top));
        for line in &lines {
            let fill = " ".repeat(inner_width - line.width());
            bubble.push(format!("{side} {line}{fill} {side}"));
        }
        bubble.push(rule(bottom));

        match tail {
            Some(Tail::Left) => {
                bubble.push("  )/  ".to_owned());
                bubble.push("-\"`".to_owned());
            }
            Some(Tail::Right) => {
                let pad = " ".repeat(inner_width);
                bubble.push(format!("{pad}\\(  "));
                bubble.push(format!("{pad} `\"-"));
            }
            None => {}
        }

        Self {
            inner: StaticRenderer::from_images(vec![RenderedText::plain(&bubble)]),
        }
    }
}

impl Renderer for SpeechBubble {
    fn rendered_text(&mut self) -> RenderedText {
        self.inner.rendered_text()
    }

    fn max_height(&self) -> usize {
        self.inner.max_height()
    }

    fn max_width(&self) -> usize {
        self.inner.max_width()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/speech_bubble.rs"]
mod tests;
