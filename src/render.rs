//! Terminal status output for the CLI.
//!
//! Status lines go to stderr so stdout stays clean for CSS and JSON that
//! callers may pipe elsewhere.

use crossterm::style::{Color, Stylize};

use crate::brand::{validate_hex_color, ThemeConfig};

const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const INDENT: &str = "  ";
const SWATCH: &str = "■■";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }

    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!("{} {}", "•".with(Color::DarkGrey), title.bold());
        } else {
            eprintln!("{title}:");
        }
    }

    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{INDENT}{} {value}",
                format!("{key}:").with(Color::DarkCyan)
            );
        } else {
            eprintln!("{INDENT}{key}: {value}");
        }
    }

    pub fn detail(&self, text: &str) {
        eprintln!("{INDENT}{text}");
    }

    /// A color field with a sample block in that color when it parses.
    pub fn swatch(&self, key: &str, value: &str) {
        match swatch_color(value).filter(|_| self.color) {
            Some(rgb) => eprintln!(
                "{INDENT}{} {} {value}",
                format!("{key}:").with(Color::DarkCyan),
                SWATCH.with(rgb)
            ),
            None => self.field(key, value),
        }
    }

    /// Name, palette and logo of a theme.
    pub fn theme(&self, title: &str, theme: &ThemeConfig) {
        self.section(title);
        if let Some(id) = theme.id {
            self.field("id", &id.to_string());
        }
        self.field("nome_estabelecimento", theme.display_name());
        for (key, value) in theme.colors() {
            self.swatch(key, value);
        }
        if let Some(logo) = theme.logo() {
            self.field("logo_url", logo);
        }
        if let Some(active) = theme.active {
            self.field("ativo", if active { "yes" } else { "no" });
        }
    }
}

/// Parse `#RGB` / `#RRGGBB` into a terminal color.
fn swatch_color(value: &str) -> Option<Color> {
    if !validate_hex_color(value) {
        return None;
    }
    let digits = &value[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = if digits.len() == 3 {
        let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
        (expand(0)?, expand(1)?, expand(2)?)
    } else {
        (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )
    };
    Some(Color::Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_color_expands_short_hex() {
        assert_eq!(
            swatch_color("#0af"),
            Some(Color::Rgb {
                r: 0x00,
                g: 0xaa,
                b: 0xff
            })
        );
        assert_eq!(
            swatch_color("#00d1b2"),
            Some(Color::Rgb {
                r: 0x00,
                g: 0xd1,
                b: 0xb2
            })
        );
        assert_eq!(swatch_color("teal"), None);
    }
}
