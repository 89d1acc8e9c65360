use std::fmt::Write;

use zapador_core::{MineField, VisibleCell};

fn cell_glyph(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Hidden => ' ',
        VisibleCell::Mine => '*',
        VisibleCell::Safe(count) => char::from_digit(count.into(), 10).unwrap(),
    }
}

/// Renders the player-facing board: column indices on top, row indices on
/// the left, one glyph per cell. Cells pad to the width of the largest
/// index so wide boards stay aligned.
pub fn render_board(field: &MineField) -> String {
    let size = field.size();
    let width = size.saturating_sub(1).to_string().len();
    let rule_len = (width + 2) + (width + 3) * size as usize;

    let mut out = String::new();

    let mut header = format!("{:pad$}", "", pad = width + 2);
    for col in 0..size {
        let _ = write!(header, " {:>width$}  ", col);
    }
    out.push_str(header.trim_end());
    out.push('\n');

    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for row in 0..size {
        let _ = write!(out, "{:>width$} |", row);
        for col in 0..size {
            let glyph = cell_glyph(field.visible_cell_at((row, col)));
            let _ = write!(out, " {:>width$} |", glyph);
        }
        out.push('\n');
    }

    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    out
}
