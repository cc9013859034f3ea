//! Line-oriented frame buffer the views draw into.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal colours used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Accent,
    Muted,
    Danger,
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// A frame of `height` lines, each at most `width` columns wide.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    lines: Vec<Vec<Span>>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            lines: vec![Vec::new(); height as usize],
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Replace line `y`. Lines outside the frame are dropped.
    pub fn set_line(&mut self, y: u16, spans: Vec<Span>) {
        if let Some(line) = self.lines.get_mut(y as usize) {
            *line = clip_spans(spans, self.width as usize);
        }
    }

    pub fn line(&self, y: u16) -> &[Span] {
        self.lines.get(y as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Plain text of line `y`.
    pub fn line_text(&self, y: u16) -> String {
        self.line(y).iter().map(|s| s.text.as_str()).collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = &[Span]> {
        self.lines.iter().map(Vec::as_slice)
    }
}

fn clip_spans(spans: Vec<Span>, width: usize) -> Vec<Span> {
    let mut used = 0;
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if used >= width {
            break;
        }
        let text = truncate(&span.text, width - used);
        used += text.width();
        out.push(Span::new(text, span.style));
    }
    out
}

/// Cut `text` to at most `width` display columns.
///
/// Control characters are dropped so record text cannot move the cursor or
/// send escape sequences to the terminal.
pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars().filter(|c| !c.is_control()) {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Cut or pad `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Like [`fit`], but pads on the left.
pub fn fit_right(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let used = cut.width();
    let mut out: String = std::iter::repeat_n(' ', width - used).collect();
    out.push_str(&cut);
    out
}
