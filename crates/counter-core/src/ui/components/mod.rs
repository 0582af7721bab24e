pub mod button;
pub mod counter;

pub use button::Button;
pub use counter::CounterBadge;
