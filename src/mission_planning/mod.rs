// Mission planning module

pub mod sequencer;
pub mod demo;

pub use sequencer::*;
