//! AI career advice — single-shot prompt/response passthrough to the
//! generative-text collaborator. Only generated prose leaves this module,
//! never raw document data.

pub mod handlers;
pub mod prompts;
