//! Routes terminal input to the search box and the table, and lays out the
//! screen.

use usertable_lib::model::Column;
use usertable_lib::view::{Renderable, TableView};
use usertable_lib::{Application, Error, TableEvent};

use crate::buffer::{Buffer, Color, Span, Style};
use crate::event::{Input, Key};
use crate::search_box::SearchBox;
use crate::table_view::{TableArea, TableHit, TerminalTable};

const SEARCH_LINE: u16 = 0;
const HEADER_LINE: u16 = 2;
/// Lines that are not table rows: search, gap, header, status.
const CHROME_LINES: u16 = 4;

const HINT: &str = " click header: sort · ctrl/alt+click: delete · drag ⠿: reorder · esc: clear · ctrl+q: quit";

/// Screen state around the application.
pub struct Ui {
    app: Application<TerminalTable>,
    search_box: SearchBox,
    /// Header column under the pointer.
    hover: Option<Column>,
    status: String,
    quit: bool,
}

impl Ui {
    pub fn new(app: Application<TerminalTable>) -> Self {
        let mut search_box = SearchBox::new();
        search_box.bind();
        search_box.sync(app.search());
        let mut ui = Self {
            app,
            search_box,
            hover: None,
            status: String::new(),
            quit: false,
        };
        ui.update_status();
        ui
    }

    pub fn app(&self) -> &Application<TerminalTable> {
        &self.app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Fit the components to a `width` x `height` screen.
    pub fn layout(&mut self, width: u16, height: u16) {
        self.search_box.set_area(SEARCH_LINE, width);
        self.app.table_mut().view_mut().set_area(TableArea {
            top: HEADER_LINE,
            width,
            rows: height.saturating_sub(CHROME_LINES),
        });
    }

    pub fn draw(&self, buffer: &mut Buffer) {
        self.search_box.render(buffer);
        self.app.table().view().render(buffer);

        let status_line = buffer.height().saturating_sub(1);
        let table = self.app.table();
        let style = if table.view().rows().grabbing() {
            Style::new().fg(Color::Accent).bold()
        } else {
            Style::new().fg(Color::Muted)
        };
        let text = if table.is_dragging() {
            " moving row, release to drop".to_string()
        } else {
            format!("{} ·{}", self.status, HINT)
        };
        buffer.set_line(status_line, vec![Span::new(text, style)]);
    }

    /// Handle one input event.
    pub fn handle(&mut self, input: Input) -> Result<(), Error> {
        match input {
            Input::Key { key, modifiers } => match key {
                Key::Char('c' | 'q') if modifiers.ctrl => self.quit = true,
                Key::Char(c) if !modifiers.ctrl && !modifiers.alt => {
                    self.app.edit_search(|s| s.push(c))?;
                }
                Key::Backspace => self.app.edit_search(|s| s.pop())?,
                Key::Escape => self.app.edit_search(|s| s.clear())?,
                Key::Up => self.scroll(-1),
                Key::Down => self.scroll(1),
                Key::PageUp => self.scroll(-self.page()),
                Key::PageDown => self.scroll(self.page()),
                Key::Char(_) => {}
            },
            Input::Press { x, y, modifiers } => {
                if self.search_box.is_bound() && self.search_box.hit_clear(x, y) {
                    self.app.edit_search(|s| s.clear())?;
                } else if let Some(hit) = self.table_hit(x, y) {
                    let table = self.app.table_mut();
                    match hit {
                        TableHit::Header(column) => table.on_header_click(column)?,
                        TableHit::Row { row, .. } if modifiers.is_alternate() => {
                            table.on_row_click(row, modifiers);
                        }
                        TableHit::Row { row, on_handle: true } => {
                            table.on_drag_start(row);
                        }
                        TableHit::Row { .. } => {}
                    }
                }
            }
            Input::Drag { x, y } => {
                if self.app.table().is_dragging() {
                    if let Some(TableHit::Row { row, .. }) = self.table_hit(x, y) {
                        self.app.table_mut().on_drag_move(row);
                    }
                }
            }
            Input::Release { .. } => {
                self.app.table_mut().on_drag_end()?;
            }
            Input::Move { x, y } => {
                let over = match self.table_hit(x, y) {
                    Some(TableHit::Header(column)) => Some(column),
                    _ => None,
                };
                self.set_hover(over);
            }
            Input::Scroll { delta } => self.scroll(delta as isize * 3),
            Input::Resize { .. } => {}
        }

        self.search_box.sync(self.app.search());
        self.update_status();
        Ok(())
    }

    fn table_hit(&self, x: u16, y: u16) -> Option<TableHit> {
        let view = self.app.table().view();
        if !view.is_bound() {
            return None;
        }
        view.hit(x, y)
    }

    /// Leaving a header toggles its highlight off, entering one toggles it on.
    fn set_hover(&mut self, over: Option<Column>) {
        if over == self.hover {
            return;
        }
        let table = self.app.table_mut();
        if let Some(left) = self.hover {
            table.on_header_hover(left);
        }
        if let Some(entered) = over {
            table.on_header_hover(entered);
        }
        self.hover = over;
    }

    fn page(&self) -> isize {
        self.app.table().view().area().rows.max(1) as isize
    }

    fn scroll(&mut self, delta: isize) {
        self.app.table_mut().view_mut().scroll_by(delta);
    }

    fn update_status(&mut self) {
        let table = self.app.table_mut();
        for event in table.drain_events() {
            match event {
                TableEvent::Reordered(ids) => log::info!("rows reordered: {:?}", ids),
                TableEvent::Deleted(id) => log::info!("record {} deleted", id),
                other => log::debug!("{:?}", other),
            }
        }
        self.status = format!(
            " {} of {} users",
            table.visible_ids().len(),
            table.records().len()
        );
    }
}
