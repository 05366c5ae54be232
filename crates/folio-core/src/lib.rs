pub mod config;
pub mod content;
pub mod error;
pub mod form;
pub mod motion;
pub mod navigation;
pub mod relay;

pub use config::{AppConfig, MotionConfig, RelayConfig, WaitlistConfig};
pub use content::SiteContent;
pub use error::{Error, Result};
pub use navigation::{Route, Section};
pub use relay::{HttpRelay, SubmissionPayload, SubmissionRelay, WaitlistClient};
