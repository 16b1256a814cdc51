//! CSS Text Module Level 3: Line breaking, white space.
//! Spec: <https://www.w3.org/TR/css-text-3/>

pub mod measurement;

pub use measurement::{
    FixedAdvanceMeasurer, MeasureError, RunMeasurement, TextMeasurer, TextMetrics,
};

use style_engine::WhiteSpace;

/// Whether `character` is collapsible white space under `white-space: normal`.
/// Non-breaking spaces (\u{00A0}) are not.
pub const fn is_collapsible_space(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

/// Collapse white-space sequences into a single space.
///
/// Unlike a trim-based collapse, a leading or trailing space survives: it
/// separates this run from its neighbours on the line, and the line box drops
/// it when it lands at a line start or a break.
pub fn collapse_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_whitespace = false;
    for character in input.chars() {
        if is_collapsible_space(character) {
            if !in_whitespace {
                output.push(' ');
            }
            in_whitespace = true;
        } else {
            output.push(character);
            in_whitespace = false;
        }
    }
    output
}

/// Apply the `white-space` processing rules for `mode` to a text run.
///
/// `normal` and `nowrap` collapse; `pre` keeps every space and normalizes
/// line endings to `\n`.
pub fn process_white_space(input: &str, mode: WhiteSpace) -> String {
    if mode.collapses() {
        collapse_whitespace(input)
    } else {
        input.replace("\r\n", "\n").replace('\r', "\n")
    }
}

/// True when the text would produce nothing visible once collapsed.
pub fn is_collapsible_only(input: &str, mode: WhiteSpace) -> bool {
    mode.collapses() && input.chars().all(is_collapsible_space)
}
