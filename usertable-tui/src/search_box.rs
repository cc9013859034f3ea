//! Terminal search box with a clear button.

use unicode_width::UnicodeWidthStr;
use usertable_lib::search::SearchField;
use usertable_lib::view::Renderable;

use crate::buffer::{Buffer, Color, Span, Style, truncate};

const PROMPT: &str = " Search: ";
const CLEAR_BUTTON: &str = "[x]";

#[derive(Debug, Default)]
pub struct SearchBox {
    query: String,
    line: u16,
    width: u16,
    bound: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_area(&mut self, line: u16, width: u16) {
        self.line = line;
        self.width = width;
    }

    /// Mirror the search field's text.
    pub fn sync(&mut self, field: &SearchField) {
        self.query.clear();
        self.query.push_str(field.query());
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether the point is on the clear button.
    pub fn hit_clear(&self, x: u16, y: u16) -> bool {
        let button = CLEAR_BUTTON.width() as u16;
        y == self.line && x < self.width && x >= self.width.saturating_sub(button)
    }
}

impl Renderable<Buffer> for SearchBox {
    fn render(&self, target: &mut Buffer) {
        let button = CLEAR_BUTTON.width();
        let room = (self.width as usize).saturating_sub(PROMPT.width() + button + 1);
        // keep the end of a long query in view
        let shown: String = {
            let chars: Vec<char> = self.query.chars().collect();
            let mut start = 0;
            while chars[start..].iter().collect::<String>().width() > room {
                start += 1;
            }
            chars[start..].iter().collect()
        };
        let input = format!("{}▏", shown);
        let gap = (self.width as usize).saturating_sub(PROMPT.width() + input.width() + button);

        let clear_style = if self.query.is_empty() {
            Style::new().fg(Color::Muted).dim()
        } else {
            Style::new().fg(Color::Danger).bold()
        };
        target.set_line(
            self.line,
            vec![
                Span::new(PROMPT, Style::new().fg(Color::Accent).bold()),
                Span::plain(truncate(&input, room + 1)),
                Span::plain(" ".repeat(gap)),
                Span::new(CLEAR_BUTTON, clear_style),
            ],
        );
    }

    fn bind(&mut self) {
        self.bound = true;
    }

    fn unbind(&mut self) {
        self.bound = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_button_hit() {
        let mut search = SearchBox::new();
        search.set_area(0, 40);
        assert!(search.hit_clear(37, 0));
        assert!(search.hit_clear(39, 0));
        assert!(!search.hit_clear(36, 0));
        assert!(!search.hit_clear(38, 1));
    }

    #[test]
    fn test_render_shows_query_and_button() {
        let mut field = SearchField::new();
        field.set("*ann");
        let mut search = SearchBox::new();
        search.set_area(0, 40);
        search.sync(&field);

        let mut buffer = Buffer::new(40, 1);
        search.render(&mut buffer);
        let line = buffer.line_text(0);
        assert!(line.starts_with(" Search: *ann▏"));
        assert!(line.ends_with("[x]"));
        assert_eq!(line.width(), 40);
    }

    #[test]
    fn test_long_query_shows_its_end() {
        let mut field = SearchField::new();
        field.set("a".repeat(50) + "zz");
        let mut search = SearchBox::new();
        search.set_area(0, 30);
        search.sync(&field);

        let mut buffer = Buffer::new(30, 1);
        search.render(&mut buffer);
        let line = buffer.line_text(0);
        assert!(line.contains("zz▏"));
        assert!(line.ends_with("[x]"));
    }
}
