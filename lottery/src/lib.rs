extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate log;
#[cfg(test)] #[macro_use] extern crate matches;
extern crate rand;
extern crate uuid;

pub mod wheel;
pub mod ledger;
pub mod roster;
pub mod draw;
