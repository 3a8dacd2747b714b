//! Terminal initialization and event streaming.
//!
//! Wraps ratatui's terminal with raw mode setup, a panic hook that puts
//! the terminal back, and a single stream merging crossterm input with
//! requested redraws. Redraw requests go through a capacity-1 broadcast
//! channel, so any burst of requests between two turns of the loop
//! coalesces into one draw.

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::io::Stdout;
use std::pin::Pin;
use tokio::select;
use tokio_stream::Stream;
use tokio_stream::StreamExt;

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Events the overlay's event loop consumes from the terminal side.
#[derive(Debug)]
pub enum TuiEvent {
    /// Keyboard event.
    Key(KeyEvent),
    /// Pasted text (from bracketed paste).
    Paste(String),
    /// Time to redraw.
    Draw,
}

/// Terminal wrapper owning the ratatui handle.
pub struct Tui {
    terminal: Terminal<TerminalBackend>,
    draw_tx: tokio::sync::broadcast::Sender<()>,
}

impl Tui {
    /// Initialize the terminal in raw mode on the alternate screen.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnableBracketedPaste)?;
        execute!(stdout(), EnterAlternateScreen)?;

        set_panic_hook();

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        // Capacity 1: pending redraw requests collapse into one.
        let (draw_tx, _) = tokio::sync::broadcast::channel(1);

        Ok(Self { terminal, draw_tx })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), DisableBracketedPaste)?;
        execute!(stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Get a handle for requesting redraws.
    pub fn frame_requester(&self) -> FrameRequester {
        FrameRequester {
            draw_tx: self.draw_tx.clone(),
        }
    }

    /// Merge crossterm input and redraw requests into one event stream.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();
        let mut draw_rx = self.draw_tx.subscribe();

        let event_stream = async_stream::stream! {
            loop {
                select! {
                    Some(Ok(event)) = crossterm_events.next() => {
                        match event {
                            Event::Key(key_event) => {
                                yield TuiEvent::Key(key_event);
                            }
                            Event::Resize(_, _) => {
                                yield TuiEvent::Draw;
                            }
                            Event::Paste(pasted) => {
                                yield TuiEvent::Paste(pasted);
                            }
                            _ => {}
                        }
                    }
                    result = draw_rx.recv() => {
                        match result {
                            Ok(_) => {
                                yield TuiEvent::Draw;
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                                // Missed requests still mean "redraw once".
                                yield TuiEvent::Draw;
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                                break;
                            }
                        }
                    }
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Handle for requesting redraws.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    draw_tx: tokio::sync::broadcast::Sender<()>,
}

impl FrameRequester {
    /// Request a redraw on the next turn of the event loop.
    pub fn schedule_frame(&self) {
        let _ = self.draw_tx.send(());
    }
}

/// Set a panic hook that restores the terminal before panicking.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste);
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requester_without_subscribers_does_not_panic() {
        let (draw_tx, _) = tokio::sync::broadcast::channel(1);
        let requester = FrameRequester { draw_tx };
        requester.schedule_frame();
    }

    #[tokio::test]
    async fn test_frame_requests_coalesce() {
        let (draw_tx, mut draw_rx) = tokio::sync::broadcast::channel(1);
        let requester = FrameRequester { draw_tx };

        requester.schedule_frame();
        requester.schedule_frame();
        requester.schedule_frame();

        // With capacity 1 the receiver sees at most a lag report plus the
        // one retained value: three requests never mean three draws.
        let mut draws = 0;
        match draw_rx.recv().await {
            Ok(()) | Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => draws += 1,
            Err(other) => panic!("unexpected recv error: {:?}", other),
        }
        while draw_rx.try_recv().is_ok() {
            draws += 1;
        }
        assert!(draws < 3);
    }
}
