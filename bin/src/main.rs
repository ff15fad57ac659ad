extern crate actix;
extern crate tokio;
extern crate lucky_wheel;
#[macro_use]
extern crate failure_derive;
extern crate failure;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate rand;
#[cfg(test)] #[macro_use] extern crate matches;

mod config;
mod draw;
mod errors;
mod frame_loop;

use actix::prelude::{System, Arbiter, Actor};
use config::Config;
use draw::actor::DrawActor;
use draw::message::{ExportWinners, GetStats};
use tokio::prelude::future::Future;
use std::process;

fn main() {
    env_logger::init();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration : {}", e);
            process::exit(2);
        }
    };

    info!("Starting lucky wheel with {} participants and {} prizes", config.participants.len(), config.prizes.len());
    let system = System::new("lucky-wheel");

    let actor = match DrawActor::from_config(&config) {
        Ok(actor) => actor,
        Err(e) => {
            error!("Cannot prepare the draw : {}", e);
            process::exit(2);
        }
    };
    let addr = actor.start();

    let export_addr = addr.clone();
    let stats_addr = addr.clone();
    Arbiter::spawn(frame_loop::frame_interval(config.frame_interval_ms, addr)
        .then(move |_| export_addr.send(ExportWinners {})
            .map_err(|err| error!("Error on sending export message : {}", err)))
        .map(|table| match table {
            Ok(table) => print!("{}", table),
            Err(e) => warn!("{}", e)
        })
        .and_then(move |_| stats_addr.send(GetStats {})
            .map_err(|err| error!("Error on sending stats message : {}", err)))
        .then(|summary| {
            if let Ok(summary) = summary {
                info!("{} winners, {} participants left, {} prizes left", summary.stats.winners, summary.stats.participants, summary.stats.remaining_prizes);
            }
            System::current().stop();
            Ok::<(), ()>(())
        }));

    system.run();
}
