//! Text layout primitive: turns a flat stream of draw operations into pages of
//! positioned lines.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards; the PDF backend flips them. Wrapping is
//! greedy, one word at a time, measured with the static tables in
//! `font_metrics`. A line that would cross the bottom margin moves to a fresh
//! page; cursor advances alone never open a page.

use serde::{Deserialize, Serialize};

use crate::render::font_metrics::{get_metrics, FontFace, FontMetricTable};

// ────────────────────────────────────────────────────────────────────────────
// Input: draw operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    /// A run of text set in `face` at `size` points. Sets the current font.
    Text {
        text: String,
        face: FontFace,
        size: f32,
        align: Align,
    },
    /// Advance the cursor by `lines` line heights of the current font.
    MoveDown { lines: f32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageGeometry {
    /// A4 portrait (595.28 × 841.89 pt) with 50pt margins on every side.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_top: 50.0,
            margin_right: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
        }
    }

    pub fn text_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest `y` a line box may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output: positioned lines
// ────────────────────────────────────────────────────────────────────────────

/// One printed line. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// The font a fresh document starts with, before any text run sets one.
const INITIAL_FACE: FontFace = FontFace::Regular;
const INITIAL_SIZE: f32 = 12.0;

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<LaidOutPage>,
    y: f32,
    face: FontFace,
    size: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage::default()],
            y: geometry.margin_top,
            face: INITIAL_FACE,
            size: INITIAL_SIZE,
        }
    }

    fn metrics(&self) -> &'static FontMetricTable {
        get_metrics(self.face)
    }

    fn line_height(&self) -> f32 {
        self.metrics().line_height_pt(self.size)
    }

    fn place(&mut self, text: String, align: Align) {
        let height = self.line_height();
        // A line taller than the whole text area still goes on the page it starts.
        if self.y + height > self.geometry.bottom_limit() && self.y > self.geometry.margin_top {
            self.pages.push(LaidOutPage::default());
            self.y = self.geometry.margin_top;
        }

        let x = match align {
            Align::Left => self.geometry.margin_left,
            Align::Center => {
                let width = self.metrics().measure_pt(&text, self.size);
                self.geometry.margin_left + ((self.geometry.text_width() - width) / 2.0).max(0.0)
            }
        };

        let line = PlacedLine {
            text,
            face: self.face,
            size: self.size,
            x,
            y: self.y,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += height;
    }
}

/// Lays out `ops` onto pages of `geometry`. Always returns at least one page.
pub fn lay_out(ops: &[DrawOp], geometry: &PageGeometry) -> Vec<LaidOutPage> {
    let mut cursor = Cursor::new(geometry);

    for op in ops {
        match op {
            DrawOp::Text {
                text,
                face,
                size,
                align,
            } => {
                cursor.face = *face;
                cursor.size = *size;
                let lines = wrap_text(text, cursor.metrics(), *size, geometry.text_width());
                for line in lines {
                    cursor.place(line, *align);
                }
            }
            DrawOp::MoveDown { lines } => {
                cursor.y += lines * cursor.line_height();
            }
        }
    }

    cursor.pages
}

/// Greedy word wrap of `text` into lines no wider than `max_width` points.
///
/// Explicit newlines start a new line; a blank paragraph between two newlines
/// becomes an empty line. A word wider than the line is split at character
/// boundaries. Whitespace-only input yields no lines at all.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }

    let space_w = metrics.space_width * size;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.measure_pt(word, size);

            if current.is_empty() {
                if word_w <= max_width {
                    current.push_str(word);
                    current_w = word_w;
                } else {
                    let (full, rest) = split_long_word(word, metrics, size, max_width);
                    lines.extend(full);
                    current_w = metrics.measure_pt(&rest, size);
                    current = rest;
                }
                continue;
            }

            if current_w + space_w + word_w <= max_width {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            } else {
                lines.push(std::mem::take(&mut current));
                if word_w <= max_width {
                    current.push_str(word);
                    current_w = word_w;
                } else {
                    let (full, rest) = split_long_word(word, metrics, size, max_width);
                    lines.extend(full);
                    current_w = metrics.measure_pt(&rest, size);
                    current = rest;
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Breaks an over-long word into full-width chunks plus a trailing remainder.
fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> (Vec<String>, String) {
    let mut full = Vec::new();
    let mut chunk = String::new();
    let mut chunk_w = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c) * size;
        if !chunk.is_empty() && chunk_w + w > max_width {
            full.push(std::mem::take(&mut chunk));
            chunk_w = 0.0;
        }
        chunk.push(c);
        chunk_w += w;
    }

    (full, chunk)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
