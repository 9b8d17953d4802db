use crate::render::renderer::{CellColour, RenderedText, Renderer};

/// Reveals a source renderer one glyph per frame.
///
/// Glyphs are counted row-major across the whole block with a single
/// counter, so multi-row text types out line after line. Cells not yet
/// revealed are blank with no colour.
#[derive(Clone, Debug)]
pub struct Typewriter<R> {
    source: R,
    count: usize,
    total: Option<usize>,
}

impl<R: Renderer> Typewriter<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            count: 0,
            total: None,
        }
    }

    /// Glyphs shown so far.
    pub fn revealed(&self) -> usize {
        self.count
    }

    /// Whether every glyph of the last rendered source image is visible.
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.count >= total)
    }
}

impl<R: Renderer> Renderer for Typewriter<R> {
    fn rendered_text(&mut self) -> RenderedText {
        let source = self.source.rendered_text();
        let total = source.glyph_count();
        self.total = Some(total);
        self.count = (self.count + 1).min(total);

        let height = self.source.max_height().max(source.height());
        let width = self.source.max_width().max(
            source
                .rows
                .iter()
                .map(|r| r.chars().count())
                .max()
                .unwrap_or(0),
        );
        let mut cells = vec![vec![' '; width]; height];
        let mut colours = vec![vec![CellColour::default(); width]; height];

        let mut budget = self.count;
        'rows: for (y, row) in source.rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if budget == 0 {
                    break 'rows;
                }
                budget -= 1;
                cells[y][x] = ch;
                if let Some(colour) = source.colours.get(y).and_then(|c| c.get(x)) {
                    colours[y][x] = *colour;
                }
            }
        }

        RenderedText {
            rows: cells.into_iter().map(|row| row.into_iter().collect()).collect(),
            colours,
        }
    }

    fn max_height(&self) -> usize {
        self.source.max_height()
    }

    fn max_width(&self) -> usize {
        self.source.max_width()
    }

    fn reset(&mut self) {
        self.count = 0;
        self.total = None;
        self.source.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/typewriter.rs"]
mod tests;
