mod buffer;
mod config;
mod event;
mod paths;
mod search_box;
mod table_view;
mod terminal;
mod ui;

use std::fs::{self, File};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

use simplelog::WriteLogger;
use usertable_lib::Application;

use crate::buffer::Buffer;
use crate::config::Config;
use crate::table_view::TerminalTable;
use crate::terminal::Terminal;
use crate::ui::Ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    let source = match config.record_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // No UI is mounted when loading fails.
    let app = match Application::init(source.as_ref(), TerminalTable::new()).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(Ui::new(app)) {
        log::error!("terminal error: {}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(config: &Config) {
    paths::rotate_logs();

    let log_path = paths::log_file().unwrap_or_else(|| "usertable-tui.log".into());
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&log_path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(config.log_level, simplelog::Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", log_path.display(), e),
    }
}

fn run(mut ui: Ui) -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    let (mut width, mut height) = terminal.size()?;
    ui.layout(width, height);

    let mut dirty = true;
    loop {
        if dirty {
            let mut frame = Buffer::new(width, height);
            ui.draw(&mut frame);
            terminal.draw(&frame)?;
        }
        if ui.should_quit() {
            break;
        }

        let events = terminal.poll(POLL_INTERVAL)?;
        dirty = !events.is_empty();
        for raw in events {
            let Some(input) = event::translate(raw) else {
                continue;
            };
            if let event::Input::Resize { width: w, height: h } = input {
                (width, height) = (w, h);
                ui.layout(width, height);
            }
            if let Err(e) = ui.handle(input) {
                log::warn!("{}", e);
            }
        }
    }

    log::info!(
        "exiting with {} users",
        ui.app().table().records().len()
    );
    Ok(())
}
