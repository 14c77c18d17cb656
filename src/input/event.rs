//! Merged input channel
//!
//! Every producer (tick timer, keyboard, pointer) sends into one unbounded
//! channel. The consuming loop wakes up, drains whatever is already queued and
//! processes that batch class by class before waiting again.

use tokio::sync::mpsc;

use crate::game::Direction;
use crate::session::MenuButton;

/// Event classes in processing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventClass {
    Tick,
    Direction,
    Pointer,
    Control,
}

impl EventClass {
    pub const ALL: [EventClass; 4] = [
        EventClass::Tick,
        EventClass::Direction,
        EventClass::Pointer,
        EventClass::Control,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Tick,
    Direction(Direction),
    /// One raw byte of the pointer packet stream
    PointerByte(u8),
    /// Menu selection from the keyboard
    Control(MenuButton),
}

impl InputEvent {
    pub fn class(&self) -> EventClass {
        match self {
            InputEvent::Tick => EventClass::Tick,
            InputEvent::Direction(_) => EventClass::Direction,
            InputEvent::PointerByte(_) => EventClass::Pointer,
            InputEvent::Control(_) => EventClass::Control,
        }
    }
}

/// Which event classes are currently delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriptions {
    active: [bool; EventClass::ALL.len()],
}

impl Default for Subscriptions {
    fn default() -> Self {
        let mut active = [false; EventClass::ALL.len()];
        active[EventClass::Control.index()] = true;
        Self { active }
    }
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, class: EventClass) {
        self.active[class.index()] = true;
    }

    /// Keyboard menu controls cannot be unsubscribed
    pub fn unsubscribe(&mut self, class: EventClass) {
        if class != EventClass::Control {
            self.active[class.index()] = false;
        }
    }

    pub fn is_subscribed(&self, class: EventClass) -> bool {
        self.active[class.index()]
    }

    pub fn accepts(&self, event: &InputEvent) -> bool {
        self.is_subscribed(event.class())
    }
}

pub type EventSender = mpsc::UnboundedSender<InputEvent>;

/// Receiving end of the merged channel
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl EventQueue {
    pub fn channel() -> (EventSender, EventQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, EventQueue { rx })
    }

    /// Wait for at least one event and return everything queued at that point,
    /// ordered by class. Returns `None` once every sender is gone.
    pub async fn next_batch(&mut self) -> Option<Vec<InputEvent>> {
        let first = self.rx.recv().await?;
        let mut batch = vec![first];
        while let Ok(event) = self.rx.try_recv() {
            batch.push(event);
        }
        prioritize(&mut batch);
        Some(batch)
    }

    /// Take everything already queued without waiting
    pub fn drain_pending(&mut self) -> Vec<InputEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            drained.push(event);
        }
        drained
    }
}

/// Order a batch by class; arrival order within a class is kept
pub fn prioritize(batch: &mut [InputEvent]) {
    batch.sort_by_key(InputEvent::class);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prioritize_keeps_arrival_order_within_class() {
        let mut batch = vec![
            InputEvent::PointerByte(8),
            InputEvent::Direction(Direction::Up),
            InputEvent::Control(MenuButton::Exit),
            InputEvent::Tick,
            InputEvent::PointerByte(1),
            InputEvent::Direction(Direction::Left),
        ];
        prioritize(&mut batch);

        assert_eq!(
            batch,
            vec![
                InputEvent::Tick,
                InputEvent::Direction(Direction::Up),
                InputEvent::Direction(Direction::Left),
                InputEvent::PointerByte(8),
                InputEvent::PointerByte(1),
                InputEvent::Control(MenuButton::Exit),
            ]
        );
    }

    #[test]
    fn test_subscriptions_start_with_controls_only() {
        let subs = Subscriptions::new();
        assert!(subs.is_subscribed(EventClass::Control));
        assert!(!subs.is_subscribed(EventClass::Tick));
        assert!(!subs.is_subscribed(EventClass::Direction));
        assert!(!subs.is_subscribed(EventClass::Pointer));
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut subs = Subscriptions::new();
        subs.subscribe(EventClass::Direction);
        assert!(subs.accepts(&InputEvent::Direction(Direction::Down)));

        subs.unsubscribe(EventClass::Direction);
        assert!(!subs.accepts(&InputEvent::Direction(Direction::Down)));

        subs.unsubscribe(EventClass::Control);
        assert!(subs.accepts(&InputEvent::Control(MenuButton::Play)));
    }

    #[tokio::test]
    async fn test_next_batch_drains_queue() {
        let (tx, mut queue) = EventQueue::channel();
        tx.send(InputEvent::PointerByte(8)).unwrap();
        tx.send(InputEvent::Tick).unwrap();

        let batch = queue.next_batch().await.unwrap();
        assert_eq!(batch, vec![InputEvent::Tick, InputEvent::PointerByte(8)]);

        tx.send(InputEvent::Tick).unwrap();
        assert_eq!(queue.drain_pending(), vec![InputEvent::Tick]);
        assert!(queue.drain_pending().is_empty());

        drop(tx);
        assert!(queue.next_batch().await.is_none());
    }
}
