use crate::CardKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    SessionStarted { seed: u64 },
    SpinStarted { speed: f64 },
    SpinIgnored,
    SpinStopped { slot: usize, rotation: f64 },
    CardRevealed { slot: usize, card: CardKind },
    EffectApplied {
        card: CardKind,
        description: String,
        gold: i64,
        multiplier: f64,
        bonus: i64,
    },
    SlotAlreadyRevealed { slot: usize },
    AllRevealed { gold: i64 },
}

impl Event {
    pub fn describe(&self) -> String {
        match self {
            Event::SessionStarted { seed } => format!("session started (seed {seed})"),
            Event::SpinStarted { speed } => format!("spin started at {speed} deg/tick"),
            Event::SpinIgnored => "wheel is already spinning".to_string(),
            Event::SpinStopped { slot, rotation } => {
                format!("wheel stopped on slot {slot} ({rotation:.1} deg)")
            }
            Event::CardRevealed { slot, card } => format!("slot {slot} revealed {card}"),
            Event::EffectApplied {
                description,
                gold,
                multiplier,
                bonus,
                ..
            } => format!("{description} | gold {gold} x{multiplier:.2} +{bonus}"),
            Event::SlotAlreadyRevealed { slot } => {
                format!("slot {slot} was already revealed, nothing happens")
            }
            Event::AllRevealed { gold } => format!("every card revealed, final gold {gold}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
