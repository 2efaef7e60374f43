//! Box-drawing helpers shared by the text reports.

use std::fmt;

pub(crate) const REPORT_WIDTH: usize = 100;

/// Centers `text` in `width` columns; extra padding goes to the right.
pub(crate) fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let total = width - len;
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(total - left))
}

pub(crate) fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}

/// Writes a double-lined box around a centered title.
pub(crate) fn write_banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let inner = REPORT_WIDTH - 2;
    writeln!(f, "╔{}╗", rule('═', inner))?;
    writeln!(f, "║{}║", center(title, inner))?;
    writeln!(f, "╚{}╝", rule('═', inner))
}

/// Writes a section heading between two light rules.
pub(crate) fn write_section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", rule('─', REPORT_WIDTH))?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", rule('─', REPORT_WIDTH))
}

pub(crate) fn check(pass: bool) -> &'static str {
    if pass { "✓" } else { "✗" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_puts_odd_padding_on_the_right() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcdef", 3), "abcdef");
    }

    #[test]
    fn center_counts_characters_not_bytes() {
        assert_eq!(center("Å", 3).chars().count(), 3);
    }
}
