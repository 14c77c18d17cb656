//! Session transition table
//!
//! A pure function from `(state, event)` to the next state plus the effects the
//! owner has to carry out, in order. Nothing here touches devices or files.

use crate::error::GameError;
use crate::game::Winner;
use crate::input::EventClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Init,
    Menu,
    Play,
    /// Terminal
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Startup,
    PlayButton,
    ExitButton,
    EndGame(Winner),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Subscribe(EventClass),
    Unsubscribe(EventClass),
    RenderMenu,
    /// Generate the word list and set up both players
    StartPlay,
    /// Drop the word list and the snake
    ReleasePlay,
    RecordWinner(Winner),
    ShowOutcome(Winner),
    /// Tear down everything held for the process lifetime
    ReleaseAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: SessionState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }
}

pub fn transition(state: SessionState, event: SessionEvent) -> Result<Transition, GameError> {
    use Effect::*;

    let transition = match (state, event) {
        (SessionState::Init, SessionEvent::Startup) => Transition::to(
            SessionState::Menu,
            vec![
                Subscribe(EventClass::Tick),
                Subscribe(EventClass::Pointer),
                RenderMenu,
            ],
        ),
        (SessionState::Menu, SessionEvent::PlayButton) => Transition::to(
            SessionState::Play,
            vec![StartPlay, Subscribe(EventClass::Direction)],
        ),
        (SessionState::Menu, SessionEvent::ExitButton) => Transition::to(
            SessionState::Leave,
            vec![
                Unsubscribe(EventClass::Tick),
                Unsubscribe(EventClass::Pointer),
                ReleaseAll,
            ],
        ),
        (SessionState::Play, SessionEvent::EndGame(winner)) => Transition::to(
            SessionState::Menu,
            vec![
                ReleasePlay,
                Unsubscribe(EventClass::Direction),
                RecordWinner(winner),
                ShowOutcome(winner),
                RenderMenu,
            ],
        ),
        (state, event) => return Err(GameError::IllegalTransition { state, event }),
    };

    Ok(transition)
}
