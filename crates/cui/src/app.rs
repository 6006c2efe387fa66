use anyhow::{Context, Result};
use cardwheel_core::{CardKind, Event, EventBus, RngState, Session, TickOutcome};
use cardwheel_data::Assets;
use std::collections::VecDeque;

const MAX_EVENT_LOG: usize = 200;

pub struct App {
    pub session: Session,
    pub events: EventBus,
    card_names: Vec<(CardKind, String)>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(assets: &Assets, seed: Option<u64>) -> Result<Self> {
        let rng = seed
            .map(RngState::from_seed)
            .unwrap_or_else(RngState::from_entropy);
        let mut events = EventBus::default();
        let session = Session::new(assets.config.clone(), &assets.kinds(), rng, &mut events)
            .context("start session")?;
        let card_names = assets
            .catalog
            .iter()
            .map(|card| (card.kind, card.display_name.clone()))
            .collect();
        let mut app = Self {
            session,
            events,
            card_names,
            event_log: VecDeque::new(),
            status_line: "press space to spin".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.flush_events();
        Ok(app)
    }

    pub fn spin(&mut self) {
        if self.session.request_spin(&mut self.events) {
            self.status_line = "spinning...".to_string();
        } else {
            self.status_line = "the wheel is still spinning".to_string();
        }
        self.flush_events();
    }

    pub fn on_tick(&mut self) {
        let Some(outcome) = self.session.tick(&mut self.events) else {
            return;
        };
        self.status_line = match outcome {
            TickOutcome::Revealed { slot, report } => {
                format!("slot {slot}: {}", report.description)
            }
            TickOutcome::AlreadyRevealed { slot } => {
                format!("slot {slot} is already face up, spin again")
            }
        };
        self.flush_events();
    }

    pub fn card_name(&self, kind: CardKind) -> &str {
        self.card_names
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, name)| name.as_str())
            .unwrap_or_else(|| kind.display_name())
    }

    /// Label shown on the wheel and in the slot list; hidden cards show their back.
    pub fn slot_label(&self, slot: usize) -> String {
        if !self.session.board.is_revealed(slot) {
            return "??".to_string();
        }
        self.session
            .board
            .card_at(slot)
            .map(|card| self.card_name(card).to_string())
            .unwrap_or_else(|| "??".to_string())
    }

    pub fn next_hint(&self) -> &'static str {
        if self.session.is_spinning() {
            "wait for the wheel"
        } else if self.session.is_complete() {
            "all cards revealed, q to quit"
        } else {
            "space spin"
        }
    }

    fn describe_event(&self, event: &Event) -> String {
        match event {
            Event::CardRevealed { slot, card } => {
                format!("slot {slot} revealed {}", self.card_name(*card))
            }
            other => other.describe(),
        }
    }

    fn flush_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            if matches!(event, Event::SpinStarted { .. }) {
                continue;
            }
            let line = self.describe_event(&event);
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}
