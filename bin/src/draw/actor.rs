use lucky_wheel::draw::{ConfirmPolicy, DrawEvent, DrawOutcome, DrawPhase, DrawSession};
use lucky_wheel::ledger::errors::LedgerError;
use lucky_wheel::ledger::store::LedgerStats;
use lucky_wheel::roster::export::{export_winners, WinnerTable};
use actix::{Actor, Context, Message, Handler};
use actix::dev::{MessageResponse, ResponseChannel};
use failure::Error;
use rand::thread_rng;
use super::message::{ExportWinners, FinishReason, FrameResponse, FrameTick, GetStats, Summary};
use config::Config;

/// Single owner of the draw session. Every frame and every award happens inside
/// one handler call, so the ledger never sees two writers.
pub struct DrawActor {
    session: DrawSession
}

impl Actor for DrawActor {
    type Context = Context<Self>;
}

fn log_event(event: &DrawEvent) {
    match *event {
        DrawEvent::SpinStarted { start_rotation, final_rotation } => debug!("Spinning from {:.1} to {:.1}", start_rotation, final_rotation),
        DrawEvent::Frame { angle } => trace!("Wheel at {:.1}", angle),
        DrawEvent::Resolved { index, ref name } => info!("Wheel stopped on {} (segment {})", name, index),
        DrawEvent::Awarded { ref award } => debug!("{} awarded to {}", award.prize.name, award.winner.name),
        DrawEvent::NoPrizeAvailable { ref name } => warn!("No more prizes available for {}", name),
        DrawEvent::Cancelled { ref name } => info!("Draw of {} cancelled", name),
        DrawEvent::WinnersCleared => info!("Winners cleared"),
        DrawEvent::RosterChanged => debug!("Roster changed"),
    }
}

impl DrawActor {
    pub fn from_config(config: &Config) -> Result<DrawActor, Error> {
        let mut session = DrawSession::new(config.wheel.clone(), ConfirmPolicy::Auto);
        session.subscribe(log_event);
        session.import_participants(config.participants.clone());
        for prize in &config.prizes {
            session.add_prize(&prize.name, &prize.image, prize.quantity)?;
        }
        Ok(DrawActor { session })
    }

    fn finish_reason(stats: &LedgerStats) -> Option<FinishReason> {
        if stats.participants == 0 {
            Some(FinishReason::NoParticipantsLeft)
        } else if stats.remaining_prizes == 0 {
            Some(FinishReason::NoPrizesLeft)
        } else {
            None
        }
    }

    fn frame(&mut self, now_ms: f64) -> Result<FrameResponse, Error> {
        let mut rng = thread_rng();
        if *self.session.phase() == DrawPhase::Idle {
            if let Some(reason) = DrawActor::finish_reason(&self.session.ledger().stats()) {
                return Ok(FrameResponse::Finished { reason });
            }
            self.session.spin(&mut rng, now_ms)?;
        }
        match self.session.tick(now_ms, &mut rng)? {
            DrawOutcome::Turning { angle } => Ok(FrameResponse::Turning { angle }),
            DrawOutcome::Awarded(award) => Ok(FrameResponse::Awarded { award }),
            DrawOutcome::Idle | DrawOutcome::AwaitingConfirmation { .. } => Ok(FrameResponse::Turning { angle: self.session.rotation() }),
        }
    }
}

impl Message for FrameTick {
    type Result = FrameResponse;
}

impl<A, M> MessageResponse<A, M> for FrameResponse
    where
        A: Actor,
        M: Message<Result=FrameResponse>,
{
    fn handle<R: ResponseChannel<M>>(self, _: &mut A::Context, tx: Option<R>) {
        if let Some(tx) = tx {
            tx.send(self);
        }
    }
}

impl Handler<FrameTick> for DrawActor {
    type Result = FrameResponse;

    fn handle(&mut self, msg: FrameTick, _ctx: &mut Context<Self>) -> Self::Result {
        match self.frame(msg.now_ms) {
            Ok(response) => response,
            Err(e) => match e.downcast::<LedgerError>() {
                Ok(LedgerError::NoPrizesAvailable) => FrameResponse::Finished { reason: FinishReason::NoPrizesLeft },
                Ok(other_ledger_error) => FrameResponse::UnexpectedError { error: other_ledger_error.into() },
                Err(error) => FrameResponse::UnexpectedError { error }
            }
        }
    }
}

impl Message for ExportWinners {
    type Result = Result<WinnerTable, Error>;
}

impl Handler<ExportWinners> for DrawActor {
    type Result = Result<WinnerTable, Error>;

    fn handle(&mut self, _msg: ExportWinners, _ctx: &mut Context<Self>) -> Self::Result {
        export_winners(self.session.ledger().winners()).map_err(|error| error.into())
    }
}

impl Message for GetStats {
    type Result = Summary;
}

impl<A, M> MessageResponse<A, M> for Summary
    where
        A: Actor,
        M: Message<Result=Summary>,
{
    fn handle<R: ResponseChannel<M>>(self, _: &mut A::Context, tx: Option<R>) {
        if let Some(tx) = tx {
            tx.send(self);
        }
    }
}

impl Handler<GetStats> for DrawActor {
    type Result = Summary;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Context<Self>) -> Self::Result {
        Summary { stats: self.session.ledger().stats() }
    }
}
