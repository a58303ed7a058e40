//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{next_version, run_tag_workflow, TagWorkflowArgs, WorkflowResult};
