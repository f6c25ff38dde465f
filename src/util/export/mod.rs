use printpdf::Pt;

pub(crate) mod document;

const PT_TO_MM: f32 = 0.352_778_f32;
const MARGIN: f32 = 15.0;
const FONT_SIZE: Pt = Pt(10.0); // pt
const SMALL_FONT_SIZE: Pt = Pt(8.5); // pt
const PADDING: f32 = 2.0; // Mm
const LINE_WIDTH: f32 = 1.0; // pt
const THIN_LINE_WIDTH: f32 = 0.5; // pt

// Advance widths of the builtin Helvetica for ' ' to '~', in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' - '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' - '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' - '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' - 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' - 'Z'
    278, 278, 278, 469, 556, 333, // '[' - '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' - 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' - 'z'
    334, 260, 334, 584, // '{' - '~'
];
// Same range for Helvetica-Bold
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' - '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' - '9'
    333, 333, 584, 584, 584, 611, 975, // ':' - '@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A' - 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' - 'Z'
    333, 278, 333, 584, 556, 333, // '[' - '`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a' - 'm'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n' - 'z'
    389, 280, 389, 584, // '{' - '~'
];
const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// Width of `text` in Mm, set in the builtin Helvetica at `font_size`.
fn get_text_width(text: &str, font_size: Pt, bold: bool) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let widths = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                widths[(code - 32) as usize] as u32
            } else {
                DEFAULT_GLYPH_WIDTH as u32
            }
        })
        .sum();
    units as f32 / 1000.0 * font_size.0 * PT_TO_MM
}

/// Breaks `text` into lines no wider than `max_width` Mm, keeping its own
/// line breaks. A single word wider than that gets a line to itself.
fn wrap_text(text: &str, max_width: f32, font_size: Pt) -> Vec<String> {
    let mut lines = vec![];
    text.lines().for_each(|line| {
        let mut current = String::new();
        line.split_whitespace().for_each(|word| {
            if current.is_empty() {
                current.push_str(word);
                return;
            }
            let candidate = format!("{current} {word}");
            if get_text_width(&candidate, font_size, false) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            }
        });
        lines.push(current);
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(get_text_width("", FONT_SIZE, false), 0.0);
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = get_text_width("Window", Pt(10.0), false);
        let large = get_text_width("Window", Pt(20.0), false);
        assert!((large - 2.0 * small).abs() < 0.001);
    }

    #[test]
    fn digits_are_monospaced() {
        assert_eq!(
            get_text_width("1111", FONT_SIZE, false),
            get_text_width("8888", FONT_SIZE, false)
        );
        // 4 * 556/1000 * 10pt
        assert!((get_text_width("1234", FONT_SIZE, false) - 22.24 * PT_TO_MM).abs() < 0.001);
    }

    #[test]
    fn bold_uses_its_own_metrics() {
        assert!(get_text_width("Total", FONT_SIZE, true) > get_text_width("Total", FONT_SIZE, false));
        // digits have the same width in both
        assert_eq!(
            get_text_width("1,500", FONT_SIZE, true),
            get_text_width("1,500", FONT_SIZE, false)
        );
        // 'b' is 611 in bold, 556 in regular
        let diff = get_text_width("b", Pt(1000.0), true) - get_text_width("b", Pt(1000.0), false);
        assert!((diff - 55.0 * PT_TO_MM).abs() < 0.01);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        // 'aaaa' is 4 * 556/1000 * 10pt
        let word_width = get_text_width("aaaa", FONT_SIZE, false);
        let lines = wrap_text("aaaa aaaa aaaa", word_width * 2.5, FONT_SIZE);
        assert_eq!(lines, vec!["aaaa aaaa".to_owned(), "aaaa".to_owned()]);
    }

    #[test]
    fn wrapping_keeps_line_breaks_and_long_words() {
        let lines = wrap_text("5mm glass\n\nwindowframe", 5.0, FONT_SIZE);
        assert_eq!(
            lines,
            vec![
                "5mm".to_owned(),
                "glass".to_owned(),
                String::new(),
                "windowframe".to_owned()
            ]
        );
        assert!(wrap_text("", 50.0, FONT_SIZE).is_empty());
    }
}
