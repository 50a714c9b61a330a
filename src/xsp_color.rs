// Terminal color handling: the per-count number palette and degradation
// to whatever color depth the terminal actually supports.

use ratatui::style::Color;
use term_color_support::ColorSupport;

// Classic number palette for counts 1..8: ((r, g, b), 256-index, basic ANSI)
const NUMBER_COLORS: [((u8, u8, u8), u8, Color); 8] = [
    ((255, 0, 0), 196, Color::Red),
    ((0, 255, 0), 46, Color::Green),
    ((0, 0, 255), 21, Color::Blue),
    ((255, 255, 0), 226, Color::Yellow),
    ((255, 0, 255), 201, Color::Magenta),
    ((0, 255, 255), 51, Color::Cyan),
    ((128, 0, 0), 88, Color::Red),
    ((128, 128, 0), 100, Color::Yellow),
];

/// Display color for a revealed neighbor count (1-8)
pub fn number_color(count: u8) -> Color {
    let support = ColorSupport::stdout();
    match NUMBER_COLORS.get((count as usize).wrapping_sub(1)) {
        Some(&(rgb, index256, basic)) => {
            if support.has_16m {
                Color::Rgb(rgb.0, rgb.1, rgb.2)
            } else if support.has_256 {
                Color::Indexed(index256)
            } else {
                basic
            }
        }
        None => Color::White,
    }
}

/// Adjust a standard ANSI color to the terminal's capabilities:
/// exact RGB under truecolor, a stable index under 256 colors,
/// the original variant on basic 16-color terminals.
pub fn adapt(color: Color) -> Color {
    let support = ColorSupport::stdout();
    let mapping = match color {
        Color::Black => Some(((12, 12, 12), 232)),
        Color::Red => Some(((197, 15, 31), 160)),
        Color::Green => Some(((19, 161, 14), 28)),
        Color::Yellow => Some(((193, 156, 0), 178)),
        Color::Gray => Some(((204, 204, 204), 250)),
        Color::DarkGray => Some(((118, 118, 118), 243)),
        Color::LightBlue => Some(((59, 120, 255), 63)),
        Color::White => Some(((242, 242, 242), 255)),
        _ => None, // custom RGB or indexed colors pass through
    };

    match mapping {
        Some((rgb, index256)) => {
            if support.has_16m {
                Color::Rgb(rgb.0, rgb.1, rgb.2)
            } else if support.has_256 {
                Color::Indexed(index256)
            } else {
                color
            }
        }
        None => color,
    }
}
