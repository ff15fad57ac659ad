use actix::prelude::Addr;
use tokio::timer::Interval;
use std::time::{Duration, Instant};
use tokio::prelude::future::Future;
use tokio::prelude::Stream;

use draw::actor::DrawActor;
use draw::message::{FrameTick, FrameResponse};

fn elapsed_ms(origin: Instant, instant: Instant) -> f64 {
    let elapsed = instant.duration_since(origin);
    elapsed.as_secs() as f64 * 1000.0 + f64::from(elapsed.subsec_nanos()) / 1_000_000.0
}

/// Stand-in for the display refresh: one `FrameTick` per interval until the draw finishes.
pub fn frame_interval(interval_ms: u64, addr: Addr<DrawActor>) -> impl Future<Item=(), Error=()> + 'static {
    let origin = Instant::now();
    Interval::new(origin, Duration::from_millis(interval_ms))
        .map_err(|err| error!("Frame timer failure : {}", err))
        .and_then(move |instant| addr.send(FrameTick { now_ms: elapsed_ms(origin, instant) })
            .map_err(|err| error!("Error on sending frame tick : {}", err)))
        .for_each(move |res| {
            match res {
                FrameResponse::Turning { angle } => {
                    trace!("Frame at {:.1}", angle);
                    Ok(())
                }
                FrameResponse::Awarded { award } => {
                    info!("{} won {} ({} left)", award.winner.name, award.prize.name, award.prize.quantity);
                    Ok(())
                }
                FrameResponse::Finished { reason } => {
                    info!("Draw finished : {:?}", reason);
                    Err(())
                }
                FrameResponse::UnexpectedError { error: ref e } => {
                    error!("Unexpected error during the draw \n{:?}", e);
                    Err(())
                }
            }
        })
}
