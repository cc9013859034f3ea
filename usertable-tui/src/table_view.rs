//! Terminal rendering and hit-testing of the users table.

use usertable_lib::model::{Column, ColumnKind};
use usertable_lib::sort::SortMethod;
use usertable_lib::view::{Renderable, RowHandle, RowSet, TableView};

use crate::buffer::{Buffer, Color, Span, Style, fit, fit_right};

/// Fixed column widths; the user column takes what is left.
const RATING_WIDTH: u16 = 10;
const STORIES_WIDTH: u16 = 11;
const COMMENTS_WIDTH: u16 = 12;
const REGISTERED_WIDTH: u16 = 18;
const MIN_USER_WIDTH: u16 = 8;

/// Width of the drag handle cell at the right edge of each row.
pub const HANDLE_WIDTH: u16 = 3;
const HANDLE: &str = " ⠿ ";

/// What a point on the table hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    Header(Column),
    Row { row: RowHandle, on_handle: bool },
}

/// Screen area of the table: the header line and the rows below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableArea {
    /// Line of the header.
    pub top: u16,
    pub width: u16,
    /// Number of row lines below the header.
    pub rows: u16,
}

/// The users table as drawn in the terminal.
#[derive(Debug, Default)]
pub struct TerminalTable {
    rows: RowSet,
    sort: Option<(Column, SortMethod)>,
    bound: bool,
    scroll: usize,
    area: TableArea,
}

impl TerminalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn area(&self) -> TableArea {
        self.area
    }

    pub fn set_area(&mut self, area: TableArea) {
        self.area = area;
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.rows.len().saturating_sub(self.area.rows as usize);
        self.scroll = self.scroll.min(max);
    }

    /// Column widths for the current area, in display order.
    pub fn column_widths(&self) -> [u16; 5] {
        let fixed = RATING_WIDTH + STORIES_WIDTH + COMMENTS_WIDTH + REGISTERED_WIDTH + HANDLE_WIDTH;
        let user = self.area.width.saturating_sub(fixed).max(MIN_USER_WIDTH);
        [user, RATING_WIDTH, STORIES_WIDTH, COMMENTS_WIDTH, REGISTERED_WIDTH]
    }

    fn column_at(&self, x: u16) -> Option<Column> {
        let mut left = 0u16;
        for (i, width) in self.column_widths().into_iter().enumerate() {
            if x >= left && x < left + width {
                return Column::from_index(i);
            }
            left += width;
        }
        None
    }

    /// Resolve a screen point to a header cell or a row.
    pub fn hit(&self, x: u16, y: u16) -> Option<TableHit> {
        let area = self.area;
        if x >= area.width {
            return None;
        }
        if y == area.top {
            return self.column_at(x).map(TableHit::Header);
        }
        if y <= area.top || y > area.top + area.rows {
            return None;
        }
        let index = self.scroll + (y - area.top - 1) as usize;
        let row = self.rows.handle_at(index)?;
        Some(TableHit::Row {
            row,
            on_handle: x >= area.width.saturating_sub(HANDLE_WIDTH),
        })
    }

    fn header_line(&self) -> Vec<Span> {
        let widths = self.column_widths();
        let mut spans = Vec::with_capacity(Column::ALL.len() + 1);
        for (column, width) in Column::ALL.into_iter().zip(widths) {
            let indicator = match self.sort {
                Some((c, SortMethod::Ascending)) if c == column => " ▲",
                Some((c, SortMethod::Descending)) if c == column => " ▼",
                _ => "",
            };
            let label = format!(" {}{}", column.header(), indicator);
            let mut style = Style::new().bold().fg(Color::Accent);
            if self.rows.highlighted() == Some(column) {
                style = style.bg(Color::Highlight);
            }
            spans.push(Span::new(fit(&label, width as usize), style));
        }
        spans.push(Span::plain(fit("", HANDLE_WIDTH as usize)));
        spans
    }

    fn row_line(&self, cells: &[String], draggable: bool) -> Vec<Span> {
        let widths = self.column_widths();
        let mut spans = Vec::with_capacity(cells.len() + 1);
        for ((column, width), cell) in Column::ALL.into_iter().zip(widths).zip(cells) {
            // one column of padding on the left of every cell
            let inner = width.saturating_sub(2) as usize;
            let text = match column.kind() {
                ColumnKind::Number => format!(" {} ", fit_right(cell, inner)),
                ColumnKind::Text => format!(" {} ", fit(cell, inner)),
            };
            let mut style = Style::new();
            if self.rows.highlighted() == Some(column) {
                style = style.bg(Color::Highlight);
            }
            if draggable {
                style = style.reverse();
            }
            spans.push(Span::new(fit(&text, width as usize), style));
        }
        spans.push(Span::new(HANDLE, Style::new().fg(Color::Muted)));
        spans
    }
}

impl TableView for TerminalTable {
    fn rows(&self) -> &RowSet {
        &self.rows
    }

    fn rows_mut(&mut self) -> &mut RowSet {
        &mut self.rows
    }

    fn update(&mut self, records: &[&usertable_lib::Record]) -> Vec<RowHandle> {
        let handles = self
            .rows
            .rebuild(records.iter().copied(), usertable_lib::format::format_date);
        self.clamp_scroll();
        handles
    }

    fn set_sort_indicator(&mut self, sort: Option<(Column, SortMethod)>) {
        self.sort = sort;
    }

    fn bind(&mut self) {
        self.bound = true;
    }

    fn unbind(&mut self) {
        self.bound = false;
    }
}

impl Renderable<Buffer> for TerminalTable {
    fn render(&self, target: &mut Buffer) {
        let area = self.area;
        target.set_line(area.top, self.header_line());

        let visible = self.rows.rows().iter().skip(self.scroll).take(area.rows as usize);
        let mut y = area.top + 1;
        for row in visible {
            target.set_line(y, self.row_line(&row.cells, row.draggable));
            y += 1;
        }
        if self.rows.is_empty() && area.rows > 0 {
            target.set_line(
                area.top + 1,
                vec![Span::new(" No users match the search", Style::new().fg(Color::Muted))],
            );
        }
    }

    fn bind(&mut self) {
        TableView::bind(self);
    }

    fn unbind(&mut self) {
        TableView::unbind(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usertable_lib::model::{RawRecord, Record, assign_ids};

    fn table(names: &[&str], width: u16, rows: u16) -> (TerminalTable, Vec<Record>) {
        let data = assign_ids(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| RawRecord {
                    name: n.to_string(),
                    rating: i as f64,
                    stories: 1.0,
                    comments: 2.0,
                    date: "2014-04-21T12:30:00Z".into(),
                    avatar: String::new(),
                })
                .collect(),
        );
        let mut view = TerminalTable::new();
        view.set_area(TableArea { top: 2, width, rows });
        let refs: Vec<&Record> = data.iter().collect();
        view.update(&refs);
        (view, data)
    }

    #[test]
    fn test_column_widths_fill_area() {
        let (view, _) = table(&[], 80, 10);
        let widths = view.column_widths();
        assert_eq!(widths.iter().sum::<u16>() + HANDLE_WIDTH, 80);
        assert_eq!(widths[0], 80 - 54);
    }

    #[test]
    fn test_hit_header() {
        let (view, _) = table(&["Anna"], 80, 10);
        assert_eq!(view.hit(0, 2), Some(TableHit::Header(Column::User)));
        assert_eq!(view.hit(32, 2), Some(TableHit::Header(Column::Rating)));
        assert_eq!(view.hit(76, 2), Some(TableHit::Header(Column::Registered)));
        // handle column has no header
        assert_eq!(view.hit(78, 2), None);
    }

    #[test]
    fn test_hit_rows_and_handle() {
        let (view, _) = table(&["Anna", "Joe"], 80, 10);
        let handles = view.rows().handles();
        assert_eq!(
            view.hit(5, 3),
            Some(TableHit::Row { row: handles[0], on_handle: false })
        );
        assert_eq!(
            view.hit(78, 4),
            Some(TableHit::Row { row: handles[1], on_handle: true })
        );
        assert_eq!(view.hit(5, 5), None);
        assert_eq!(view.hit(5, 1), None);
        assert_eq!(view.hit(80, 3), None);
    }

    #[test]
    fn test_scroll_offsets_hits() {
        let (mut view, _) = table(&["a", "b", "c", "d", "e"], 80, 2);
        view.scroll_by(10);
        assert_eq!(view.scroll, 3);
        let handles = view.rows().handles();
        assert_eq!(
            view.hit(1, 3),
            Some(TableHit::Row { row: handles[3], on_handle: false })
        );
        view.scroll_by(-10);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_render_header_and_rows() {
        let (mut view, _) = table(&["Anna", "Joe"], 80, 5);
        view.set_sort_indicator(Some((Column::Rating, SortMethod::Descending)));
        let mut buffer = Buffer::new(80, 8);
        view.render(&mut buffer);

        let header = buffer.line_text(2);
        assert!(header.starts_with(" User"));
        assert!(header.contains("Rating ▼"));
        let first = buffer.line_text(3);
        assert!(first.starts_with(" Anna"));
        assert!(first.contains(".04.2014"));
        assert!(first.ends_with(HANDLE));
        assert!(buffer.line_text(4).starts_with(" Joe"));
    }

    #[test]
    fn test_render_highlight_and_drag_marker() {
        let (mut view, _) = table(&["Anna"], 80, 5);
        view.rows_mut().toggle_highlight(Column::Stories);
        let handle = view.rows().handles()[0];
        view.rows_mut().set_draggable(handle, true);

        let mut buffer = Buffer::new(80, 8);
        view.render(&mut buffer);
        assert_eq!(buffer.line(2)[2].style.bg, Some(Color::Highlight));
        assert_eq!(buffer.line(3)[2].style.bg, Some(Color::Highlight));
        assert!(buffer.line(3)[0].style.reverse);
        assert_eq!(buffer.line(3)[0].style.bg, None);
    }

    #[test]
    fn test_render_strips_escape_sequences_from_names() {
        let (view, _) = table(&["Eve\x1b[2J\x1b]0;title\x07\nX"], 80, 5);
        let mut buffer = Buffer::new(80, 8);
        view.render(&mut buffer);

        let line = buffer.line_text(3);
        assert!(line.starts_with(" Eve[2J]0;titleX"));
        assert!(!line.chars().any(char::is_control));
        assert!(line.ends_with(HANDLE));
    }

    #[test]
    fn test_render_empty_table() {
        let (view, _) = table(&[], 80, 5);
        let mut buffer = Buffer::new(80, 8);
        view.render(&mut buffer);
        assert!(buffer.line_text(3).contains("No users"));
    }
}
