//! Full-screen chat interface for the assistant webhook.

mod app;
mod chat_result;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::config::Config;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingChat, PendingTest};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for webhook calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut app = App::new(config.as_ref().clone());
    let mut pending_chat: Option<PendingChat> = None;
    let mut pending_test: Option<PendingTest> = None;

    // Mouse wheel scrolls the history
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    loop {
        if let Some(ref chat) = pending_chat
            && let Ok(exchange) = chat.result_rx.try_recv()
        {
            chat_result::handle_exchange(&mut app, exchange);
            pending_chat = None;
        }

        if let Some(ref test) = pending_test
            && let Ok(ok) = test.result_rx.try_recv()
        {
            chat_result::handle_connection_test(&mut app, ok);
            pending_test = None;
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => {
                    let _ = handlers::handle_mouse(mouse, &mut app);
                }
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            pending_chat: &mut pending_chat,
                            pending_test: &mut pending_test,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    log::info!("Chat closed after {} messages", app.conversation.len());
    terminal.show_cursor()?;
    Ok(())
}
