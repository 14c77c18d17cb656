use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, warn};

use crate::game::{FileVocabulary, GameConfig, Winner};
use crate::input::{
    EventQueue, EventSender, InputEvent, InputHandler, KeyAction, PointerDevice, PointerFeedback,
};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, cell_to_pixel};
use crate::session::{Effect, Session, SessionState};
use crate::winners::WinnerLog;

type Backend = CrosstermBackend<Stderr>;

/// What the terminal task needs to translate mouse positions
#[derive(Debug, Clone, Copy)]
struct ScreenFeedback {
    field_area: Option<Rect>,
    pointer: PointerFeedback,
}

/// Snake on the keyboard against the pointer on the mouse, in one terminal
pub struct VersusMode {
    config: GameConfig,
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    winners: WinnerLog,
    /// Winner shown on the outcome screen
    outcome: Option<Winner>,
    /// Pointer bytes taken off the queue, processed or dropped
    pointer_bytes: u64,
}

impl VersusMode {
    pub fn new(config: GameConfig) -> Self {
        let vocabulary = FileVocabulary::new(config.words_path.clone());

        Self {
            session: Session::new(config.clone(), Box::new(vocabulary)),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(config.field),
            winners: WinnerLog::new(config.winners_path.clone()),
            outcome: None,
            pointer_bytes: 0,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_event_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let (tx, mut queue) = EventQueue::channel();
        let (feedback_tx, feedback_rx) = watch::channel(self.feedback());

        let period = Duration::from_secs_f64(1.0 / f64::from(self.config.tick_hz.max(1)));
        let tick_task = spawn_ticks(tx.clone(), period);
        let device = PointerDevice::new(self.config.field.cursor_start, self.config.field.pointer_max_delta);
        let terminal_task = spawn_terminal_events(tx, feedback_rx, device, self.config.field.grid_unit);

        let result = self.consume(terminal, &mut queue, &feedback_tx).await;

        tick_task.abort();
        terminal_task.abort();
        result
    }

    /// The single consuming loop; returns once the session has left
    async fn consume(
        &mut self,
        terminal: &mut Terminal<Backend>,
        queue: &mut EventQueue,
        feedback: &watch::Sender<ScreenFeedback>,
    ) -> Result<()> {
        let effects = self.session.start();
        self.apply_effects(terminal, queue, effects).await?;
        self.draw(terminal)?;
        feedback.send_replace(self.feedback());

        while !self.session.is_finished() {
            let Some(batch) = queue.next_batch().await else {
                warn!("all input sources closed");
                break;
            };

            let mut outcome_shown = false;
            for event in batch {
                if matches!(event, InputEvent::PointerByte(_)) {
                    self.pointer_bytes += 1;
                }
                // The rest of the batch belongs to a finished game
                if outcome_shown {
                    continue;
                }

                let before = self.session.state();
                let effects = self.session.handle_input(event);
                if before != SessionState::Play && self.session.state() == SessionState::Play {
                    self.metrics.on_game_start();
                }
                outcome_shown = self.apply_effects(terminal, queue, effects).await?;

                if self.session.is_finished() {
                    break;
                }
            }

            self.draw(terminal)?;
            feedback.send_replace(self.feedback());
        }

        info!(games = self.metrics.games_played, "leaving");
        Ok(())
    }

    /// Carry out effects the session left for us; true when the outcome screen ran
    async fn apply_effects(
        &mut self,
        terminal: &mut Terminal<Backend>,
        queue: &mut EventQueue,
        effects: Vec<Effect>,
    ) -> Result<bool> {
        let mut outcome_shown = false;

        for effect in effects {
            match effect {
                Effect::RenderMenu => self.draw(terminal)?,
                Effect::RecordWinner(winner) => {
                    self.metrics.on_game_over(winner);
                    if let Err(err) = self.winners.append(winner) {
                        error!(%err, "could not record the winner");
                    }
                }
                Effect::ShowOutcome(winner) => {
                    self.show_outcome(terminal, queue, winner).await?;
                    outcome_shown = true;
                }
                Effect::ReleaseAll => debug!("released all input sources"),
                other => debug!(?other, "effect handled by the session"),
            }
        }

        Ok(outcome_shown)
    }

    /// Hold the outcome screen, then throw away the input that piled up meanwhile
    async fn show_outcome(
        &mut self,
        terminal: &mut Terminal<Backend>,
        queue: &mut EventQueue,
        winner: Winner,
    ) -> Result<()> {
        self.outcome = Some(winner);
        self.draw(terminal)?;
        sleep(Duration::from_secs(self.config.outcome_secs)).await;
        self.outcome = None;

        let dropped = queue.drain_pending();
        self.pointer_bytes += dropped
            .iter()
            .filter(|e| matches!(e, InputEvent::PointerByte(_)))
            .count() as u64;
        self.session.abandon_pointer_input();
        debug!(dropped = dropped.len(), "input discarded during outcome screen");
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        if self.session.state() == SessionState::Play {
            self.metrics.update();
        }
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.session, &self.metrics, self.outcome);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn feedback(&self) -> ScreenFeedback {
        ScreenFeedback {
            field_area: self.renderer.field_area(),
            pointer: PointerFeedback {
                cursor: self.session.pointer().position(),
                consumed: self.pointer_bytes,
            },
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn spawn_ticks(tx: EventSender, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = interval(period);
        loop {
            timer.tick().await;
            if tx.send(InputEvent::Tick).is_err() {
                break;
            }
        }
    })
}

/// Keyboard and mouse producer
fn spawn_terminal_events(
    tx: EventSender,
    feedback: watch::Receiver<ScreenFeedback>,
    mut device: PointerDevice,
    grid_unit: i32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let handler = InputHandler::new();
        let mut events = EventStream::new();

        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    warn!(%err, "terminal event stream failed");
                    break;
                }
            };

            let outgoing: Vec<InputEvent> = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handler.handle_key_event(key) {
                        KeyAction::Steer(direction) => vec![InputEvent::Direction(direction)],
                        KeyAction::Select(button) => vec![InputEvent::Control(button)],
                        KeyAction::None => Vec::new(),
                    }
                }
                Event::Mouse(mouse) => {
                    let screen = *feedback.borrow();
                    mouse_bytes(&mut device, mouse, screen, grid_unit)
                        .into_iter()
                        .map(InputEvent::PointerByte)
                        .collect()
                }
                _ => Vec::new(),
            };

            for event in outgoing {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
    })
}

fn mouse_bytes(
    device: &mut PointerDevice,
    mouse: MouseEvent,
    screen: ScreenFeedback,
    grid_unit: i32,
) -> Vec<u8> {
    let Some(area) = screen.field_area else {
        return Vec::new();
    };
    let Some(target) = cell_to_pixel(area, grid_unit, mouse.column, mouse.row) else {
        return Vec::new();
    };

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            device.move_to(target, screen.pointer)
        }
        MouseEventKind::Down(MouseButton::Left) => device.press(target, screen.pointer),
        MouseEventKind::Up(MouseButton::Left) => device.release(target, screen.pointer),
        _ => Vec::new(),
    }
}
