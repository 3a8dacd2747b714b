//! Overlay application state and event loop.
//!
//! The loop multiplexes three independent sources with `tokio::select!`:
//! terminal events, host events, and submission outcomes. Each arm runs to
//! completion before the next event is taken, so handlers are atomic with
//! respect to each other, but nothing is promised about the relative order
//! of sources: an error report may land mid-keystroke, and a focus grab
//! may clear a status the user never read. State changes tolerate all of
//! those interleavings.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEvent;
use qb_core::{spawn_host, Config, HostConfig, MessageDispatcher, WindowControl};
use qb_protocol::Event;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use tokio::select;
use tokio::sync::broadcast;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::input::{interpret_key, InputAction};
use crate::state::{InputState, StatusMessage};
use crate::submit::{apply_outcome, submit, SubmissionOutcome};
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{InputBar, StatusLine};

/// Overlay application state.
pub struct App {
    /// The input value and status message.
    state: InputState,
    /// Whether the input field currently has keyboard focus.
    focused: bool,
    /// Placeholder shown while the field is empty.
    placeholder: String,
    /// Delay before the proactive focus grab after startup.
    focus_delay: Duration,
    /// Command dispatch collaborator.
    dispatcher: Arc<dyn MessageDispatcher>,
    /// Window visibility collaborator.
    window: Arc<dyn WindowControl>,
    /// Subscription to host-pushed events; dropped with the App.
    host_events: broadcast::Receiver<Event>,
    /// Sender handed to every spawned submission.
    outcome_tx: UnboundedSender<SubmissionOutcome>,
    /// Completed submissions, applied on the loop's turn.
    outcome_rx: UnboundedReceiver<SubmissionOutcome>,
    /// Flag to indicate if the application should exit.
    should_exit: bool,
}

impl App {
    /// Create a new App bound to its collaborators.
    pub fn new(
        dispatcher: Arc<dyn MessageDispatcher>,
        window: Arc<dyn WindowControl>,
        host_events: broadcast::Receiver<Event>,
        placeholder: String,
        focus_delay: Duration,
    ) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();

        Self {
            state: InputState::default(),
            focused: false,
            placeholder,
            focus_delay,
            dispatcher,
            window,
            host_events,
            outcome_tx,
            outcome_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        tui.frame_requester().schedule_frame();

        // Proactive focus shortly after startup, so the first focus-request
        // event is not required to make the field usable.
        let focus_grab = tokio::time::sleep(self.focus_delay);
        tokio::pin!(focus_grab);
        let mut focus_grabbed = false;
        let mut host_gone = false;

        while !self.should_exit {
            select! {
                () = &mut focus_grab, if !focus_grabbed => {
                    focus_grabbed = true;
                    self.apply_focus_request();
                    tui.frame_requester().schedule_frame();
                }
                event = self.host_events.recv(), if !host_gone => {
                    match event {
                        Ok(event) => {
                            self.handle_host_event(event);
                            tui.frame_requester().schedule_frame();
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "host event subscription lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            // Host gone; the overlay stays usable, dispatch
                            // will just fail.
                            host_gone = true;
                        }
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.handle_outcome(outcome);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        Ok(())
    }

    /// Handle events pushed by the host.
    fn handle_host_event(&mut self, event: Event) {
        match event {
            Event::FocusRequest => self.apply_focus_request(),
            Event::ErrorReport { message } => {
                self.state.set_status(StatusMessage::host_error(&message));
            }
        }
    }

    /// Focus the input field and drop any stale status message.
    ///
    /// The only path that unconditionally clears status. Idempotent.
    fn apply_focus_request(&mut self) {
        self.focused = true;
        self.state.clear_status();
    }

    /// Apply a completed submission.
    fn handle_outcome(&mut self, outcome: SubmissionOutcome) {
        apply_outcome(&mut self.state, outcome);
    }

    /// Handle terminal events (keyboard input, paste, draw).
    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(pasted) => {
                self.handle_paste(&pasted);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    self.render(frame);
                })?;
            }
        }
        Ok(())
    }

    /// Handle one keyboard event.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match interpret_key(key_event) {
            InputAction::Submit => {
                submit(&mut self.state, &self.dispatcher, &self.outcome_tx);
            }
            InputAction::Cancel => {
                // Toggle first, clear second: the field is empty by the
                // time the overlay is shown again.
                self.window.toggle_visibility();
                self.state.clear_value();
            }
            InputAction::Insert(c) => self.state.push_char(c),
            InputAction::Backspace => self.state.pop_char(),
            InputAction::Quit => self.should_exit = true,
            InputAction::Ignored => {}
        }
    }

    /// Pasted text flows in as an ordinary edit. The field is a single
    /// line, so control characters are dropped.
    fn handle_paste(&mut self, pasted: &str) {
        let line: String = pasted.chars().filter(|c| !c.is_control()).collect();
        self.state.push_str(&line);
    }

    /// Render the overlay: the spotlight box and, when present, the status
    /// line beneath it.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Spotlight input box
                Constraint::Length(1), // Status line
                Constraint::Min(0),
            ])
            .split(frame.area());

        let input_bar = InputBar::new(self.state.value(), &self.placeholder, self.focused);
        frame.render_widget(input_bar, chunks[0]);

        if let Some(status) = self.state.status() {
            frame.render_widget(StatusLine::new(status), chunks[1]);
        }
    }
}

/// Wire everything together and run the overlay until the user quits.
///
/// Spawns the host loop, initializes the terminal, runs the event loop,
/// and restores the terminal whatever happens.
pub async fn run_app(config: Config) -> Result<()> {
    let (handle, events_tx) = spawn_host(HostConfig {
        reject_all: config.reject_all,
    });
    let host_events = events_tx.subscribe();

    let dispatcher: Arc<dyn MessageDispatcher> = Arc::new(handle.clone());
    let window: Arc<dyn WindowControl> = Arc::new(handle.clone());

    let mut app = App::new(
        dispatcher,
        window,
        host_events,
        config.placeholder,
        Duration::from_millis(config.focus_delay_ms),
    );

    let mut tui = Tui::init()?;
    let result = app.run(&mut tui).await;

    handle.shutdown();
    tui.restore()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DISPATCH_FAILURE_MESSAGE, EMPTY_INPUT_WARNING};
    use async_trait::async_trait;
    use crossterm::event::KeyCode;
    use qb_core::DispatchResult;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RecordingDispatcher {
        calls: Mutex<Vec<String>>,
        result: DispatchResult,
    }

    impl RecordingDispatcher {
        fn new(result: DispatchResult) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                result,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned").clone()
        }
    }

    #[async_trait]
    impl MessageDispatcher for RecordingDispatcher {
        async fn process_message(&self, text: &str) -> DispatchResult {
            self.calls.lock().expect("poisoned").push(text.to_string());
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingWindow {
        toggles: AtomicUsize,
    }

    impl WindowControl for RecordingWindow {
        fn toggle_visibility(&self) {
            self.toggles.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_app(result: DispatchResult) -> (App, Arc<RecordingDispatcher>, Arc<RecordingWindow>) {
        let recorder = RecordingDispatcher::new(result);
        let window = Arc::new(RecordingWindow::default());
        // Host events are injected directly via handle_host_event in these
        // tests; the channel only satisfies the constructor.
        let (_events_tx, events_rx) = broadcast::channel(16);
        let dispatcher: Arc<dyn MessageDispatcher> = recorder.clone();
        let app = App::new(
            dispatcher,
            window.clone(),
            events_rx,
            "Type your task...".to_string(),
            Duration::from_millis(50),
        );
        (app, recorder, window)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_renders_placeholder_and_box() {
        let (app, _recorder, _window) = test_app(Ok(()));

        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| app.render(frame))
            .expect("draw failed");

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(content.contains("quickbar"));
        assert!(content.contains("Type your task..."));
    }

    #[tokio::test]
    async fn test_typing_edits_the_value_without_touching_status() {
        let (mut app, _recorder, _window) = test_app(Ok(()));

        type_text(&mut app, "hello");
        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));

        assert_eq!(app.state.value(), "hell");
        assert_eq!(app.state.status(), None);
    }

    #[tokio::test]
    async fn test_escape_toggles_visibility_and_clears_value() {
        let (mut app, _recorder, window) = test_app(Ok(()));
        type_text(&mut app, "half-typed");

        app.handle_key_event(KeyEvent::from(KeyCode::Esc));

        assert_eq!(app.state.value(), "");
        assert_eq!(window.toggles.load(Ordering::SeqCst), 1);

        // Escape on an already-empty field still toggles.
        app.handle_key_event(KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.state.value(), "");
        assert_eq!(window.toggles.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_submit_warns_and_never_dispatches() {
        let (mut app, recorder, _window) = test_app(Ok(()));
        type_text(&mut app, "  ");

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));

        assert_eq!(
            app.state.status(),
            Some(&StatusMessage::warning(EMPTY_INPUT_WARNING))
        );
        assert_eq!(app.state.value(), "  ");
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submission_clears_value() {
        let (mut app, recorder, _window) = test_app(Ok(()));
        type_text(&mut app, "hello");

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        let outcome = app.outcome_rx.recv().await.expect("no outcome");
        app.handle_outcome(outcome);

        assert_eq!(recorder.calls(), vec!["hello".to_string()]);
        assert_eq!(app.state.value(), "");
        assert_eq!(app.state.status(), None);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_value_and_reports() {
        let (mut app, _recorder, _window) =
            test_app(Err(qb_core::DispatchError::Rejected));
        type_text(&mut app, "hello");

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        let outcome = app.outcome_rx.recv().await.expect("no outcome");
        app.handle_outcome(outcome);

        assert_eq!(app.state.value(), "hello");
        assert_eq!(
            app.state.status(),
            Some(&StatusMessage::error(DISPATCH_FAILURE_MESSAGE))
        );
    }

    #[tokio::test]
    async fn test_focus_request_clears_status_idempotently() {
        let (mut app, _recorder, _window) = test_app(Ok(()));
        app.state.set_status(StatusMessage::error("stale"));

        app.handle_host_event(Event::FocusRequest);
        assert!(app.focused);
        assert_eq!(app.state.status(), None);

        // A repeated focus request with no intervening error changes
        // nothing further.
        app.handle_host_event(Event::FocusRequest);
        assert!(app.focused);
        assert_eq!(app.state.status(), None);
    }

    #[tokio::test]
    async fn test_error_report_overwrites_status_and_preserves_value() {
        let (mut app, _recorder, _window) = test_app(Ok(()));
        type_text(&mut app, "abc");
        app.state.set_status(StatusMessage::warning("old"));

        app.handle_host_event(Event::ErrorReport {
            message: "disk full".to_string(),
        });

        let status = app.state.status().expect("no status");
        assert!(status.text.contains("disk full"));
        assert_eq!(app.state.value(), "abc");
    }

    #[tokio::test]
    async fn test_quit_on_ctrl_c() {
        let (mut app, _recorder, _window) = test_app(Ok(()));
        assert!(!app.should_exit);

        app.handle_key_event(KeyEvent::new(
            KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        ));

        assert!(app.should_exit);
    }

    #[tokio::test]
    async fn test_paste_strips_control_characters() {
        let (mut app, _recorder, _window) = test_app(Ok(()));

        app.handle_paste("line one\nline two");

        assert_eq!(app.state.value(), "line oneline two");
    }
}
