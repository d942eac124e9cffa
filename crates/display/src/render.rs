//! Plain-text rendering of the board.

use std::fmt::Write;

use lucky_six_core::draw::{BallColor, Draw};

use crate::state::{DisplayState, RequestState};

/// `125` -> `2m 05s`.
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

/// One ball, e.g. `42(blue)`.
pub fn format_ball(number: u8, color: BallColor) -> String {
    format!("{number:02}({color})")
}

fn format_colors(colors: &[BallColor]) -> String {
    colors
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_balls(draw: &Draw) -> String {
    draw.numbers
        .iter()
        .zip(draw.colors.iter())
        .map(|(&n, &c)| format_ball(n, c))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the whole screen.
pub fn render(state: &DisplayState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LUCKY SIX");
    let _ = writeln!(out);

    let current = state.board().and_then(|b| b.current_draw.as_ref());
    match (state.request(), current) {
        (RequestState::Failed(message), _) => {
            let _ = writeln!(out, "  Error: {message}");
        }
        (_, None) => {
            let _ = writeln!(out, "  Waiting for the first draw...");
        }
        (_, Some(draw)) => {
            let _ = writeln!(out, "  {}", format_balls(draw));
            let _ = writeln!(out, "  Sum: {} ({})", draw.sum, draw.high_low);
            let _ = writeln!(
                out,
                "  Winning colors: {}",
                format_colors(&draw.winning_colors)
            );
            let _ = writeln!(out, "  Draw ID: {}", draw.id);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Next draw in: {}", format_time(state.countdown()));

    let history = state.board().map(|b| b.history.as_slice()).unwrap_or_default();
    let _ = writeln!(out);
    let _ = writeln!(out, "History");
    if history.is_empty() {
        let _ = writeln!(out, "  No draws yet.");
    }
    for draw in history {
        let _ = writeln!(
            out,
            "  {}  {}  sum {:>3} {:<4} win: {}",
            draw.created_at.format("%H:%M:%S"),
            format_balls(draw),
            draw.sum,
            draw.high_low,
            format_colors(&draw.winning_colors),
        );
    }

    out
}
