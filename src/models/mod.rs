pub mod closed_roll;
pub mod event;
pub mod event_kind;
pub mod roll;
pub mod shift;

pub use closed_roll::ClosedRoll;
pub use event::Event;
pub use event_kind::EventKind;
pub use roll::Roll;
pub use shift::Shift;
