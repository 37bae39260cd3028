//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against the remote directory gateway.

pub mod explore;
pub mod featured;
pub mod mine;
pub mod moderation;
pub mod search;
pub mod show;
pub mod submit;
pub mod suggest;
pub mod tags;
