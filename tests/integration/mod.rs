//! Integration tests for the repomod transformation engine

mod support;

mod discovery;
mod end_to_end;
mod failure_policy;
mod host_filesystem;
mod multi_pass;
mod overlay_properties;
