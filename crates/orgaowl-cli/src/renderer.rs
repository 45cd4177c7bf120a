//! Markdown rendering to the terminal via termimad, with a plain fallback.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or verbatim.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::Reset);

        Self { rich_enabled, skin }
    }

    /// Renders line by line. Headers keep their `#` markers and checklist
    /// items get a check mark glyph.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(&decorate_checkbox(line));
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Replaces a leading markdown checkbox with a glyph; done items are struck
/// through.
fn decorate_checkbox(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("- [x] ") {
        format!("✔ ~~{rest}~~")
    } else if let Some(rest) = line.strip_prefix("- [ ] ") {
        format!("☐ {rest}")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_decorate_checkbox() {
        assert_eq!(decorate_checkbox("- [ ] Milk `abcd1234`"), "☐ Milk `abcd1234`");
        assert_eq!(decorate_checkbox("- [x] Eggs"), "✔ ~~Eggs~~");
        assert_eq!(decorate_checkbox("- A (1/2)"), "- A (1/2)");
    }
}
