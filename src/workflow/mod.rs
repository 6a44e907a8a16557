//! Interactive workflows: guided creation and the edit/merge state machine

pub mod create;
pub mod edit;

pub use create::{prompt_body, prompt_content_type, prompt_method, prompt_new_request};
pub use edit::{apply_edits, EditRequest, EditState};
