//! Client-side forms: the contact form with its submission state machine and
//! the waitlist form with pre-submit email validation.

pub mod contact;
pub mod validate;
pub mod waitlist;

pub use contact::{ContactForm, SubmissionStatus, SubmitOutcome};
pub use validate::{Field, FieldErrors};
pub use waitlist::{WaitlistForm, WaitlistSubmission};
