use crate::app::App;
use crate::error::{AppError, Result, UiError};
use crate::options::AppOptions;
use crate::ui::Renderer;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Write};
use std::time::Duration;

pub struct TuiApplication {
    app: App,
    renderer: Renderer,
}

impl TuiApplication {
    pub fn new(options: &AppOptions) -> Self {
        Self {
            app: App::new(options),
            renderer: Renderer::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;
        log::info!("terminal session started");

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_terminal();
                return Err(terminal_init_error(err));
            }
        };

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();
        log::info!("terminal session finished");

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.app.is_running() {
            self.renderer
                .draw(terminal, &self.app)
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(16)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.app.handle_key_event(key_event),
                    Event::Paste(text) => self.app.paste(&text),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
        }

        Ok(())
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(terminal_init_error)?;
    write_enter_sequence(&mut stdout()).map_err(terminal_init_error)?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    write_leave_sequence(&mut stdout())
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

/// 代替画面へ切り替え、貼り付けを `Event::Paste` として受け取る
fn write_enter_sequence<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableBracketedPaste)
}

fn write_leave_sequence<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
}

/// 端末を通常状態へ戻す（パニック時用、失敗は無視）
pub fn restore_terminal() {
    let _ = leave_terminal();
}

fn terminal_init_error(err: impl std::fmt::Display) -> AppError {
    AppError::Ui(UiError::TerminalInit {
        message: err.to_string(),
    })
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
