pub mod board;
pub mod clock;
pub mod ordering;
pub mod queue;
pub mod refresh;
pub mod stock;
pub mod transition;
pub mod urgency;
