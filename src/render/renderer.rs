use unicode_width::UnicodeWidthStr;

/// Colour attributes of a single cell. `None` leaves the target's current
/// setting in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellColour {
    pub fg: Option<u8>,
    pub attr: Option<u8>,
    pub bg: Option<u8>,
}

impl CellColour {
    pub const fn fg(fg: u8) -> Self {
        Self {
            fg: Some(fg),
            attr: None,
            bg: None,
        }
    }
}

/// One rendered image: glyph rows plus a colour per glyph, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedText {
    pub rows: Vec<String>,
    pub colours: Vec<Vec<CellColour>>,
}

impl RenderedText {
    /// Plain text with no colour information.
    pub fn plain<S: AsRef<str>>(lines: &[S]) -> Self {
        let rows: Vec<String> = lines.iter().map(|l| l.as_ref().to_owned()).collect();
        let colours = rows
            .iter()
            .map(|r| vec![CellColour::default(); r.chars().count()])
            .collect();
        Self { rows, colours }
    }

    /// Number of glyphs across every row.
    pub fn glyph_count(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).sum()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in terminal columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.width()).max().unwrap_or(0)
    }
}

/// Source of text images for effects to paint.
pub trait Renderer {
    /// The image for the current frame. Animated renderers advance on every
    /// call.
    fn rendered_text(&mut self) -> RenderedText;

    /// Tallest image this renderer can produce, in rows.
    fn max_height(&self) -> usize;

    /// Widest image this renderer can produce, in columns.
    fn max_width(&self) -> usize;

    /// Rewind any animation state.
    fn reset(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn rendered_text(&mut self) -> RenderedText {
        (**self).rendered_text()
    }

    fn max_height(&self) -> usize {
        (**self).max_height()
    }

    fn max_width(&self) -> usize {
        (**self).max_width()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A fixed list of images, handed out in turn.
#[derive(Clone, Debug)]
pub struct StaticRenderer {
    images: Vec<RenderedText>,
    index: usize,
}

impl StaticRenderer {
    /// One image per string; lines are split on `\n`.
    pub fn new<S: AsRef<str>>(images: &[S]) -> Self {
        Self::from_images(
            images
                .iter()
                .map(|img| RenderedText::plain(&img.as_ref().split('\n').collect::<Vec<_>>()))
                .collect(),
        )
    }

    pub fn from_images(images: Vec<RenderedText>) -> Self {
        Self { images, index: 0 }
    }

    pub fn images(&self) -> &[RenderedText] {
        &self.images
    }
}

impl Renderer for StaticRenderer {
    fn rendered_text(&mut self) -> RenderedText {
        if self.images.is_empty() {
            return RenderedText::default();
        }
        let image = self.images[self.index].clone();
        self.index = (self.index + 1) % self.images.len();
        image
    }

    fn max_height(&self) -> usize {
        self.images.iter().map(RenderedText::height).max().unwrap_or(0)
    }

    fn max_width(&self) -> usize {
        self.images.iter().map(RenderedText::width).max().unwrap_or(0)
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
