pub mod board;
pub mod driver;
pub mod lenient;
pub mod order;
pub mod urgency;
