pub mod board_state;

pub use board_state::*;
