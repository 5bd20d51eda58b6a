// Services layer for business logic
// Services own business logic and validation, calling storage directly.
// CategoryService and EventService never call each other.

pub mod category;
pub mod event;

pub use category::CategoryService;
pub use event::EventService;
