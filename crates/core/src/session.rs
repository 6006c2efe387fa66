use crate::{
    apply_effect, CardKind, ConfigError, EffectReport, Event, EventBus, GameConfig, GameState,
    RngState, SlotBoard, SlotError, SpinTick, Wheel,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid card set: {0}")]
    Slots(#[from] SlotError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Revealed { slot: usize, report: EffectReport },
    AlreadyRevealed { slot: usize },
}

impl TickOutcome {
    pub fn slot(&self) -> usize {
        match self {
            TickOutcome::Revealed { slot, .. } | TickOutcome::AlreadyRevealed { slot } => *slot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub revealed: bool,
    /// Only known once the slot has been revealed.
    pub card: Option<CardKind>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameView {
    pub rotation: f64,
    pub spinning: bool,
    pub pointed_slot: usize,
    pub slots: Vec<SlotView>,
    pub gold_label: String,
}

#[derive(Debug)]
pub struct Session {
    pub config: GameConfig,
    pub state: GameState,
    pub board: SlotBoard,
    pub wheel: Wheel,
    rng: RngState,
    spins: u32,
}

impl Session {
    pub fn new(
        config: GameConfig,
        cards: &[CardKind],
        mut rng: RngState,
        events: &mut EventBus,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let wheel = Wheel::new(config.wheel.clone())?;
        let board = SlotBoard::assign(cards, config.wheel.slot_count, &mut rng)?;
        let state = GameState::from_start(&config.start);
        log::info!(
            "session seeded with {} over {} slots",
            rng.seed(),
            board.len()
        );
        events.push(Event::SessionStarted { seed: rng.seed() });
        Ok(Self {
            config,
            state,
            board,
            wheel,
            rng,
            spins: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn spins(&self) -> u32 {
        self.spins
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    pub fn is_complete(&self) -> bool {
        self.board.all_revealed()
    }

    /// Spin trigger from the input layer. Only honoured while the wheel is idle.
    pub fn request_spin(&mut self, events: &mut EventBus) -> bool {
        if !self.wheel.start_spin() {
            events.push(Event::SpinIgnored);
            return false;
        }
        self.spins += 1;
        log::debug!("spin {} started", self.spins);
        events.push(Event::SpinStarted {
            speed: self.wheel.speed(),
        });
        true
    }

    /// Advances the wheel by one frame. Returns an outcome only on the tick
    /// where a spin comes to rest.
    pub fn tick(&mut self, events: &mut EventBus) -> Option<TickOutcome> {
        let SpinTick::Stopped { slot, rotation } = self.wheel.tick() else {
            return None;
        };
        events.push(Event::SpinStopped { slot, rotation });
        Some(self.reveal(slot, events))
    }

    fn reveal(&mut self, slot: usize, events: &mut EventBus) -> TickOutcome {
        let Some(card) = self.board.reveal(slot) else {
            log::debug!("slot {slot} already revealed");
            events.push(Event::SlotAlreadyRevealed { slot });
            return TickOutcome::AlreadyRevealed { slot };
        };
        events.push(Event::CardRevealed { slot, card });
        let report = apply_effect(card, &mut self.state);
        log::info!("slot {slot}: {}", report.description);
        events.push(Event::EffectApplied {
            card,
            description: report.description.clone(),
            gold: self.state.gold,
            multiplier: self.state.multiplier,
            bonus: self.state.noble_traitor_bonus,
        });
        if self.board.all_revealed() {
            events.push(Event::AllRevealed {
                gold: self.state.gold,
            });
        }
        TickOutcome::Revealed { slot, report }
    }

    /// Starts a spin and ticks it to rest. `None` if a spin was already running.
    pub fn run_spin(&mut self, events: &mut EventBus) -> Option<TickOutcome> {
        if !self.request_spin(events) {
            return None;
        }
        loop {
            if let Some(outcome) = self.tick(events) {
                return Some(outcome);
            }
        }
    }

    pub fn view(&self) -> FrameView {
        let slots = (0..self.board.len())
            .map(|index| {
                let revealed = self.board.is_revealed(index);
                SlotView {
                    index,
                    revealed,
                    card: if revealed {
                        self.board.card_at(index)
                    } else {
                        None
                    },
                }
            })
            .collect();
        FrameView {
            rotation: self.wheel.rotation(),
            spinning: self.wheel.is_spinning(),
            pointed_slot: self.wheel.slot_under_pointer(),
            slots,
            gold_label: self.state.gold_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> (Session, EventBus) {
        let mut events = EventBus::default();
        let session = Session::new(
            GameConfig::default(),
            &CardKind::ALL,
            RngState::from_seed(seed),
            &mut events,
        )
        .expect("session");
        (session, events)
    }

    #[test]
    fn starts_idle_with_hidden_slots() {
        let (session, mut events) = session(3);
        let view = session.view();
        assert!(!view.spinning);
        assert_eq!(view.gold_label, "Gold: 500");
        assert!(view.slots.iter().all(|slot| !slot.revealed && slot.card.is_none()));
        let drained: Vec<Event> = events.drain().collect();
        assert_eq!(drained, vec![Event::SessionStarted { seed: 3 }]);
    }

    #[test]
    fn spin_request_ignored_while_spinning() {
        let (mut session, mut events) = session(3);
        assert!(session.request_spin(&mut events));
        assert!(session.tick(&mut events).is_none());
        assert!(!session.request_spin(&mut events));
        assert_eq!(session.spins(), 1);
        assert!(events.drain().any(|event| event == Event::SpinIgnored));
    }

    #[test]
    fn first_spin_reveals_slot_five_and_applies_its_card() {
        let (mut session, mut events) = session(11);
        let card = session.board.card_at(5).expect("card");
        let outcome = session.run_spin(&mut events).expect("outcome");
        match outcome {
            TickOutcome::Revealed { slot, report } => {
                assert_eq!(slot, 5);
                assert_eq!(report.card, card);
                assert_eq!(report.after, session.state);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        let view = session.view();
        assert!(view.slots[5].revealed);
        assert_eq!(view.slots[5].card, Some(card));
        assert_eq!(view.pointed_slot, 5);
    }

    #[test]
    fn landing_twice_on_a_slot_does_not_reapply() {
        let (mut session, mut events) = session(5);
        let first = session.run_spin(&mut events).expect("first");
        assert_eq!(first.slot(), 5);
        let state_after_first = session.state;
        // A default spin nets 22.5 degrees, which keeps slot 5 under the pointer.
        let second = session.run_spin(&mut events).expect("second");
        assert_eq!(second, TickOutcome::AlreadyRevealed { slot: 5 });
        assert_eq!(session.state, state_after_first);
        assert_eq!(session.board.revealed_count(), 1);
        assert!(events
            .drain()
            .any(|event| event == Event::SlotAlreadyRevealed { slot: 5 }));
    }

    #[test]
    fn completes_after_every_slot_revealed() {
        let (mut session, mut events) = session(9);
        let mut guard = 0;
        while !session.is_complete() {
            session.run_spin(&mut events);
            guard += 1;
            assert!(guard < 10_000, "wheel never covered every slot");
        }
        assert!(events
            .drain()
            .any(|event| matches!(event, Event::AllRevealed { .. })));
    }
}
