//! Text-mode backend.
//!
//! Rasterises each frame onto a grid of character cells and repaints the
//! terminal from the top-left corner. Labels are drawn horizontally at their
//! rotated positions; text rotation itself is not representable in cells.

use std::io::Write;

use rotary_ui::{RenderCommand, UIBatch};

use super::Backend;
use crate::config::HostSection;
use crate::error::ClockResult;

/// Moves the cursor home without clearing, so frames overwrite in place.
const CURSOR_HOME: &str = "\x1b[H";

/// One grid cell. `None` marks the right half of a double-width glyph.
type Cell = Option<char>;

/// Terminal presentation backend.
pub struct TerminalCanvas<W: Write> {
    out: W,
    columns: usize,
    rows: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Cell>,
    frame: String,
}

impl<W: Write> TerminalCanvas<W> {
    /// Creates a canvas sized by the `[host]` section, writing to `out`.
    #[must_use]
    pub fn new(out: W, host: &HostSection) -> Self {
        let columns = usize::from(host.columns);
        let rows = usize::from(host.rows);
        Self {
            out,
            columns,
            rows,
            cell_width: host.cell_width,
            cell_height: host.cell_height,
            cells: vec![Some(' '); columns * rows],
            // Worst case every cell holds a 3-byte glyph.
            frame: String::with_capacity(CURSOR_HOME.len() + rows * (columns * 3 + 1)),
        }
    }

    /// Returns row `row` of the last rasterised frame, if the grid has it.
    #[must_use]
    pub fn row_text(&self, row: usize) -> Option<String> {
        (row < self.rows).then(|| {
            self.cells[row * self.columns..(row + 1) * self.columns]
                .iter()
                .flatten()
                .collect()
        })
    }

    /// Gives back the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear(&mut self) {
        self.cells.fill(Some(' '));
    }

    fn draw(&mut self, command: &RenderCommand) {
        match command {
            // Fills are left to the terminal's own background.
            RenderCommand::Rect { .. } => {}
            RenderCommand::Text {
                text,
                center,
                color,
                ..
            } => {
                if color.is_transparent() || text.is_empty() {
                    return;
                }
                let width: usize = text.chars().map(glyph_width).sum();
                let (Some(column), Some(row)) = (
                    to_cell(center.x, self.cell_width),
                    to_cell(center.y, self.cell_height),
                ) else {
                    return;
                };
                let mut column = column.saturating_sub(to_isize(width / 2));
                for ch in text.chars() {
                    self.put(row, column, ch);
                    column = column.saturating_add(to_isize(glyph_width(ch)));
                }
            }
        }
    }

    /// Writes `ch` at (`row`, `column`), clipping and repairing any wide
    /// glyph it cuts in half.
    fn put(&mut self, row: isize, column: isize, ch: char) {
        let (Ok(row), Ok(column)) = (usize::try_from(row), usize::try_from(column)) else {
            return;
        };
        let wide = glyph_width(ch) == 2;
        if row >= self.rows || column + usize::from(wide) >= self.columns {
            return;
        }

        let base = row * self.columns;
        let span = column..column + 1 + usize::from(wide);
        for col in span.clone() {
            // Landing on the right half of a wide glyph orphans its left half.
            if self.cells[base + col].is_none() && col > 0 {
                self.cells[base + col - 1] = Some(' ');
            }
            // Landing on the left half orphans its right half.
            if col + 1 < self.columns
                && self.cells[base + col + 1].is_none()
                && self.cells[base + col].is_some()
            {
                self.cells[base + col + 1] = Some(' ');
            }
        }
        self.cells[base + span.start] = Some(ch);
        if wide {
            self.cells[base + span.start + 1] = None;
        }
    }
}

impl<W: Write> Backend for TerminalCanvas<W> {
    fn present(&mut self, batches: &[UIBatch]) -> ClockResult<()> {
        self.clear();
        let mut ordered: Vec<&UIBatch> = batches.iter().collect();
        ordered.sort_by_key(|batch| batch.z_index);
        for batch in ordered {
            for command in &batch.commands {
                self.draw(command);
            }
        }

        self.frame.clear();
        self.frame.push_str(CURSOR_HOME);
        for row in self.cells.chunks(self.columns.max(1)) {
            self.frame.extend(row.iter().flatten());
            self.frame.push('\n');
        }
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Cells taken by one glyph. CJK unit characters are double width.
fn glyph_width(ch: char) -> usize {
    if ch.is_ascii() {
        1
    } else {
        2
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_cell(pixels: f32, cell: f32) -> Option<isize> {
    let index = (pixels / cell).floor();
    index.is_finite().then(|| index as isize)
}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use rotary_shared::Vec2;
    use rotary_ui::{Color, Rect};

    use super::*;

    fn host(columns: u16, rows: u16) -> HostSection {
        HostSection {
            columns,
            rows,
            cell_width: 1.0,
            cell_height: 1.0,
            ..HostSection::default()
        }
    }

    fn text(text: &str, x: f32, y: f32) -> RenderCommand {
        RenderCommand::Text {
            text: text.to_string(),
            center: Vec2::new(x, y),
            rotation: 0.0,
            color: Color::WHITE,
            background: Color::TRANSPARENT,
            font_size: 10.0,
        }
    }

    fn batch(commands: Vec<RenderCommand>) -> UIBatch {
        UIBatch {
            commands,
            z_index: 0,
        }
    }

    #[test]
    fn test_text_is_centered_on_its_cell() {
        let mut canvas = TerminalCanvas::new(Vec::new(), &host(12, 3));
        canvas
            .present(&[batch(vec![text("2024年", 6.5, 1.5)])])
            .expect("writing to a Vec never fails");

        // Six cells wide, centered on column 6.
        assert_eq!(canvas.row_text(1).as_deref(), Some("   2024年   "));
        assert_eq!(canvas.row_text(0).as_deref(), Some(" ".repeat(12).as_str()));

        let out = String::from_utf8(canvas.into_inner()).expect("utf-8 frame");
        assert!(out.starts_with(CURSOR_HOME));
        assert!(out.contains("2024年"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_offscreen_text_is_clipped() {
        let mut canvas = TerminalCanvas::new(Vec::new(), &host(6, 2));
        canvas
            .present(&[batch(vec![
                text("05秒", -20.0, 0.0),
                text("05秒", 0.0, 9.0),
                text("ab", 0.5, 0.5),
            ])])
            .expect("writing to a Vec never fails");

        assert_eq!(canvas.row_text(0).as_deref(), Some("b     "));
        assert_eq!(canvas.row_text(1).as_deref(), Some(" ".repeat(6).as_str()));
        assert_eq!(canvas.row_text(2), None);
    }

    #[test]
    fn test_overwriting_half_a_wide_glyph_blanks_the_other_half() {
        let mut canvas = TerminalCanvas::new(Vec::new(), &host(8, 1));
        canvas
            .present(&[batch(vec![text("日", 2.0, 0.0), text("x", 2.0, 0.0)])])
            .expect("writing to a Vec never fails");
        assert_eq!(canvas.row_text(0).as_deref(), Some("  x     "));

        canvas
            .present(&[batch(vec![text("日", 2.0, 0.0), text("x", 1.0, 0.0)])])
            .expect("writing to a Vec never fails");
        assert_eq!(canvas.row_text(0).as_deref(), Some(" x      "));
    }

    #[test]
    fn test_fills_and_transparent_text_draw_nothing() {
        let mut canvas = TerminalCanvas::new(Vec::new(), &host(4, 1));
        let hidden = RenderCommand::Text {
            text: "xx".to_string(),
            center: Vec2::new(2.0, 0.0),
            rotation: 0.0,
            color: Color::TRANSPARENT,
            background: Color::WHITE,
            font_size: 10.0,
        };
        let fill = RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 4.0, 1.0),
            color: Color::WHITE,
        };
        canvas
            .present(&[batch(vec![fill, hidden])])
            .expect("writing to a Vec never fails");
        assert_eq!(canvas.row_text(0).as_deref(), Some("    "));
    }
}
