//! Plain-text rendering of step records for the terminal.

use std::fmt::Write;

use cipherviz_core::{CaesarStep, RailFenceStep, StepDetail, StepRecord};

/// Renders one record as a few lines of text.
pub fn render_record(record: &StepRecord) -> String {
    let mut out = String::new();
    let flag = if record.is_error {
        " [error]"
    } else if record.is_final {
        " [final]"
    } else {
        ""
    };
    let _ = writeln!(out, "#{} {}{}", record.id, record.title, flag);
    let _ = writeln!(out, "    {}", record.description);
    match &record.detail {
        StepDetail::Caesar(step) => render_caesar(&mut out, step),
        StepDetail::RailFence(step) => render_rail_fence(&mut out, step),
    }
    let _ = writeln!(out, "    result: {:?}", record.result_so_far());
    out
}

fn render_caesar(out: &mut String, step: &CaesarStep) {
    if let (Some(from), Some(to), Some(orig), Some(new)) = (
        step.current_char,
        step.output_char,
        step.original_alphabet_position,
        step.new_alphabet_position,
    ) {
        let _ = writeln!(
            out,
            "    {:?} ({:>2}) --{:+}--> {:?} ({:>2})",
            from, orig, step.shift_amount, to, new
        );
    }
}

fn render_rail_fence(out: &mut String, step: &RailFenceStep) {
    let rows = step.grid_snapshot.render_rows();
    for (index, row) in rows.iter().enumerate() {
        let marker = if step.cursor_row == Some(index) { '>' } else { ' ' };
        let _ = writeln!(out, "   {}|{}|", marker, row);
    }
    if let Some(col) = step.cursor_column {
        let _ = writeln!(out, "    {}^", " ".repeat(col + 1));
    }
}
