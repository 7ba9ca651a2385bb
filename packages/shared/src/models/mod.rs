pub mod action;
pub mod api;
pub mod game_session;
pub mod outcome;
pub mod session_state;
