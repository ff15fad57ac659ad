//! One draw cycle: `Idle -> Spinning -> Resolved -> [AwaitingConfirmation] -> Awarded | Cancelled -> Idle`.
use failure::Error;
use rand::Rng;
use ledger::errors::LedgerError;
use ledger::model::{Participant, Prize};
use ledger::store::{Award, LedgerStore};
use wheel::WheelConfig;
use wheel::engine::{Tick, WheelEngine};
use wheel::errors::WheelError;
use wheel::spin::{random_extra_degrees, Spin};

#[derive(Debug, Fail, PartialEq)]
pub enum DrawError {
    #[fail(display = "No drawn participant is awaiting confirmation")]
    NotAwaitingConfirmation,
    #[fail(display = "The draw session has been torn down")]
    TornDown
}

/// Whether a resolved spin awards its prize immediately or waits for `confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    Auto,
    Manual
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPhase {
    Idle,
    Spinning,
    AwaitingConfirmation { participant: Participant }
}

/// State-changed notifications for renderers and dialogs.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    SpinStarted { start_rotation: f64, final_rotation: f64 },
    Frame { angle: f64 },
    Resolved { index: usize, name: String },
    Awarded { award: Award },
    NoPrizeAvailable { name: String },
    Cancelled { name: String },
    WinnersCleared,
    RosterChanged
}

pub trait DrawListener {
    fn on_event(&mut self, event: &DrawEvent);
}

impl<F> DrawListener for F where F: FnMut(&DrawEvent) {
    fn on_event(&mut self, event: &DrawEvent) {
        self(event)
    }
}

/// What a tick produced, from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    Idle,
    Turning { angle: f64 },
    AwaitingConfirmation { name: String },
    Awarded(Award)
}

/// A wheel and a ledger owned together.
///
/// The segments of a spin are the pool as it was when the spin started; the
/// resolved index is mapped back to that snapshot and then awarded by id.
pub struct DrawSession {
    engine: WheelEngine,
    ledger: LedgerStore,
    policy: ConfirmPolicy,
    phase: DrawPhase,
    drawn: Vec<Participant>,
    listeners: Vec<Box<dyn DrawListener>>,
    torn_down: bool
}

impl DrawSession {
    pub fn new(config: WheelConfig, policy: ConfirmPolicy) -> DrawSession {
        DrawSession::with_ledger(config, policy, LedgerStore::new())
    }

    pub fn with_ledger(config: WheelConfig, policy: ConfirmPolicy, ledger: LedgerStore) -> DrawSession {
        DrawSession {
            engine: WheelEngine::new(config),
            ledger,
            policy,
            phase: DrawPhase::Idle,
            drawn: vec![],
            listeners: vec![],
            torn_down: false
        }
    }

    pub fn subscribe<L: DrawListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn phase(&self) -> &DrawPhase {
        &self.phase
    }

    pub fn policy(&self) -> ConfirmPolicy {
        self.policy
    }

    pub fn rotation(&self) -> f64 {
        self.engine.rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    pub fn import_participants(&mut self, participants: Vec<Participant>) {
        self.ledger.set_participants(participants);
        self.emit(DrawEvent::RosterChanged);
    }

    pub fn add_participant(&mut self, name: &str, student_id: Option<&str>) -> Result<Participant, Error> {
        let participant = self.ledger.add_participant(name, student_id)?;
        self.emit(DrawEvent::RosterChanged);
        Ok(participant)
    }

    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, Error> {
        let participant = self.ledger.remove_participant(id)?;
        self.emit(DrawEvent::RosterChanged);
        Ok(participant)
    }

    pub fn add_prize(&mut self, name: &str, image: &str, quantity: u32) -> Result<Prize, Error> {
        let prize = self.ledger.add_prize(name, image, quantity)?;
        self.emit(DrawEvent::RosterChanged);
        Ok(prize)
    }

    pub fn clear_winners(&mut self) {
        self.ledger.clear_winners();
        self.emit(DrawEvent::WinnersCleared);
    }

    pub fn spin<R: Rng>(&mut self, rng: &mut R, now_ms: f64) -> Result<Spin, Error> {
        let extra = random_extra_degrees(rng);
        self.spin_with_offset(extra, now_ms)
    }

    pub fn spin_with_offset(&mut self, extra_degrees: f64, now_ms: f64) -> Result<Spin, Error> {
        if self.torn_down {
            return Err(DrawError::TornDown.into());
        }
        if let DrawPhase::AwaitingConfirmation { .. } = self.phase {
            return Err(WheelError::SpinInProgress.into());
        }
        let segments = self.ledger.segments();
        let spin = self.engine.start_spin_with_offset(&segments, extra_degrees, now_ms)?;
        self.drawn = self.ledger.participants().to_vec();
        self.phase = DrawPhase::Spinning;
        self.emit(DrawEvent::SpinStarted { start_rotation: spin.start_rotation(), final_rotation: spin.final_rotation() });
        Ok(spin)
    }

    /// Advance the animation. A resolved spin either awards right away or
    /// parks the participant until `confirm` or `cancel`, depending on the policy.
    pub fn tick<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> Result<DrawOutcome, Error> {
        if self.torn_down {
            return Ok(DrawOutcome::Idle);
        }
        match self.engine.tick(now_ms) {
            Tick::Idle => Ok(self.resting_outcome()),
            Tick::Turning { angle } => {
                self.emit(DrawEvent::Frame { angle });
                Ok(DrawOutcome::Turning { angle })
            }
            Tick::Stopped { winner, .. } => self.resolve(winner, rng)
        }
    }

    pub fn confirm<R: Rng>(&mut self, rng: &mut R) -> Result<Award, Error> {
        let participant = match self.phase {
            DrawPhase::AwaitingConfirmation { ref participant } => participant.clone(),
            _ => return Err(DrawError::NotAwaitingConfirmation.into())
        };
        self.award(participant, rng)
    }

    pub fn cancel(&mut self) -> Result<(), Error> {
        let participant = match self.phase {
            DrawPhase::AwaitingConfirmation { ref participant } => participant.clone(),
            _ => return Err(DrawError::NotAwaitingConfirmation.into())
        };
        self.phase = DrawPhase::Idle;
        info!("Draw of {} cancelled", participant.name);
        self.emit(DrawEvent::Cancelled { name: participant.name });
        Ok(())
    }

    /// Stop everything. Later ticks do nothing and no winner is ever resolved.
    pub fn teardown(&mut self) {
        self.engine.cancel();
        self.torn_down = true;
        self.phase = DrawPhase::Idle;
        self.drawn.clear();
        debug!("Draw session torn down");
    }

    fn resting_outcome(&self) -> DrawOutcome {
        match self.phase {
            DrawPhase::AwaitingConfirmation { ref participant } => DrawOutcome::AwaitingConfirmation { name: participant.name.clone() },
            _ => DrawOutcome::Idle
        }
    }

    fn resolve<R: Rng>(&mut self, index: usize, rng: &mut R) -> Result<DrawOutcome, Error> {
        let drawn = ::std::mem::replace(&mut self.drawn, vec![]);
        self.phase = DrawPhase::Idle;
        let participant = match drawn.into_iter().nth(index) {
            Some(participant) => participant,
            None => return Ok(DrawOutcome::Idle)
        };
        debug!("Wheel resolved on {} ({})", participant.name, index);
        self.emit(DrawEvent::Resolved { index, name: participant.name.clone() });

        match self.policy {
            ConfirmPolicy::Auto => self.award(participant, rng).map(DrawOutcome::Awarded),
            ConfirmPolicy::Manual => {
                let name = participant.name.clone();
                self.phase = DrawPhase::AwaitingConfirmation { participant };
                Ok(DrawOutcome::AwaitingConfirmation { name })
            }
        }
    }

    fn award<R: Rng>(&mut self, participant: Participant, rng: &mut R) -> Result<Award, Error> {
        self.phase = DrawPhase::Idle;
        match self.ledger.award_prize(&participant.id, rng) {
            Ok(award) => {
                self.emit(DrawEvent::Awarded { award: award.clone() });
                Ok(award)
            }
            Err(LedgerError::NoPrizesAvailable) => {
                self.emit(DrawEvent::NoPrizeAvailable { name: participant.name });
                Err(LedgerError::NoPrizesAvailable.into())
            }
            Err(error) => Err(error.into())
        }
    }

    fn emit(&mut self, event: DrawEvent) {
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }
}
