pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod reveals;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::{App, Command, Mode};
pub use event::{AppEvent, EventHandler, SubmitResult};
pub use theme::Theme;
