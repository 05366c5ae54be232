pub mod config;
pub mod contact;
pub mod projects;
pub mod run;
pub mod waitlist;
