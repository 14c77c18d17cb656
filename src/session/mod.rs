//! Session orchestration
//!
//! [`Session`] owns everything that lives for the whole process (cursor,
//! packet framer, subscriptions) plus the per-game [`MatchEngine`]. It routes
//! input events to the engines, feeds their verdicts into the transition
//! table and applies the effects it can handle itself. The rest is returned to
//! the caller.

pub mod machine;
pub mod menu;

pub use machine::{transition, Effect, SessionEvent, SessionState, Transition};
pub use menu::{ButtonRect, MenuButton, MenuLayout};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, trace};

use crate::error::GameError;
use crate::game::{Bounds, GameConfig, MatchEngine, Pointer, PlayField, StepResult, Vocabulary, Winner, WordGenerator};
use crate::input::{EventClass, InputEvent, PacketFramer, PointerSample, Subscriptions};

impl From<MenuButton> for SessionEvent {
    fn from(button: MenuButton) -> Self {
        match button {
            MenuButton::Play => SessionEvent::PlayButton,
            MenuButton::Exit => SessionEvent::ExitButton,
        }
    }
}

pub struct Session {
    state: SessionState,
    config: GameConfig,
    layout: MenuLayout,
    subscriptions: Subscriptions,
    pointer: Pointer,
    framer: PacketFramer,
    hovered: Option<MenuButton>,
    engine: Option<MatchEngine>,
    vocabulary: Box<dyn Vocabulary>,
    generator: WordGenerator,
    rng: StdRng,
    last_winner: Option<Winner>,
}

impl Session {
    pub fn new(config: GameConfig, vocabulary: Box<dyn Vocabulary>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: SessionState::Init,
            layout: MenuLayout::default(),
            subscriptions: Subscriptions::new(),
            pointer: Pointer::new(config.field),
            framer: PacketFramer::new(),
            hovered: None,
            engine: None,
            vocabulary,
            generator: WordGenerator::new(config.field),
            rng,
            last_winner: None,
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn field(&self) -> &PlayField {
        &self.config.field
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Menu button under the cursor
    pub fn hovered(&self) -> Option<MenuButton> {
        self.hovered
    }

    /// The running game, present only in `Play`
    pub fn engine(&self) -> Option<&MatchEngine> {
        self.engine.as_ref()
    }

    pub fn last_winner(&self) -> Option<Winner> {
        self.last_winner
    }

    pub fn is_subscribed(&self, class: EventClass) -> bool {
        self.subscriptions.is_subscribed(class)
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Leave
    }

    /// Leave `Init` for the menu
    pub fn start(&mut self) -> Vec<Effect> {
        self.dispatch(SessionEvent::Startup)
    }

    /// Process one input event and return the effects left for the caller
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<Effect> {
        if !self.subscriptions.accepts(&event) {
            trace!(?event, "dropping unsubscribed event");
            return Vec::new();
        }

        match event {
            InputEvent::Tick => self.on_tick(),
            InputEvent::Direction(direction) => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.buffer_direction(direction);
                }
                Vec::new()
            }
            InputEvent::PointerByte(byte) => self.on_pointer_byte(byte),
            InputEvent::Control(button) => self.dispatch(button.into()),
        }
    }

    /// Forget a partially received pointer packet
    pub fn abandon_pointer_input(&mut self) {
        if self.framer.is_mid_packet() {
            debug!("dropping a partial pointer packet");
        }
        self.framer.reset();
    }

    fn on_tick(&mut self) -> Vec<Effect> {
        let Some(engine) = self.engine.as_mut() else {
            return Vec::new();
        };
        match engine.on_tick() {
            Some(result) => self.conclude("snake step", result),
            None => Vec::new(),
        }
    }

    fn on_pointer_byte(&mut self, byte: u8) -> Vec<Effect> {
        match self.framer.push(byte) {
            Ok(Some(sample)) => self.on_pointer_sample(sample),
            Ok(None) => Vec::new(),
            Err(err) => {
                trace!(%err, "resynchronising pointer stream");
                Vec::new()
            }
        }
    }

    fn on_pointer_sample(&mut self, sample: PointerSample) -> Vec<Effect> {
        match self.state {
            SessionState::Menu => {
                self.pointer.update_position(sample.delta_x, sample.delta_y, Bounds::Menu);
                self.hovered = self.layout.hit(self.pointer.position());
                match self.hovered {
                    Some(button) if sample.left_button => self.dispatch(button.into()),
                    _ => Vec::new(),
                }
            }
            SessionState::Play => {
                self.pointer.update_position(sample.delta_x, sample.delta_y, Bounds::Play);
                if !sample.left_button {
                    return Vec::new();
                }
                let Some(engine) = self.engine.as_mut() else {
                    return Vec::new();
                };
                let result = engine.on_click(&self.pointer);
                self.conclude("pointer click", result)
            }
            SessionState::Init | SessionState::Leave => Vec::new(),
        }
    }

    fn conclude(&mut self, source: &str, result: StepResult) -> Vec<Effect> {
        match result.winner {
            Some(winner) => {
                info!(source, verdict = ?result.verdict, %winner, "game decided");
                self.dispatch(SessionEvent::EndGame(winner))
            }
            None => Vec::new(),
        }
    }

    fn dispatch(&mut self, event: SessionEvent) -> Vec<Effect> {
        let transition = match transition(self.state, event) {
            Ok(transition) => transition,
            Err(err) => {
                debug!(%err, "ignoring event");
                return Vec::new();
            }
        };

        let mut external = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::Subscribe(class) => self.subscriptions.subscribe(class),
                Effect::Unsubscribe(class) => self.subscriptions.unsubscribe(class),
                Effect::StartPlay => {
                    if let Err(err) = self.start_play() {
                        error!(%err, "could not start a game");
                        return external;
                    }
                }
                Effect::ReleasePlay => self.engine = None,
                Effect::RecordWinner(winner) => {
                    self.last_winner = Some(winner);
                    external.push(effect);
                }
                other => external.push(other),
            }
        }

        info!(from = ?self.state, to = ?transition.next, "session transition");
        self.state = transition.next;
        external
    }

    fn start_play(&mut self) -> Result<(), GameError> {
        let lines = self.vocabulary.lines()?;
        let words = self.generator.generate(&lines, &mut self.rng)?;
        let engine = MatchEngine::new(words, self.config.field, self.config.ticks_per_step)?;

        info!(words = engine.words().len(), "game started");
        self.engine = Some(engine);
        Ok(())
    }
}
