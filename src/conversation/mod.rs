// src/conversation/mod.rs

//! Profile conversations: steps, drafts, the flow rules, prompts and the
//! per-user session store.

pub mod draft;
pub mod flow;
pub mod prompts;
pub mod session;
pub mod step;

pub use flow::{Flow, FlowLimits, Input, Mode, Reaction};
pub use session::{BrowseState, Session, SessionStore};
