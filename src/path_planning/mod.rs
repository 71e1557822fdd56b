// Path Planning algorithms module

pub mod motion;
pub mod a_star;

pub use motion::*;
pub use a_star::*;
