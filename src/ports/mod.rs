//! Port traits: the seams between the pipelines and their collaborators.

pub mod artifact_port;
pub mod config_port;
pub mod data_port;
pub mod metrics_port;
pub mod report_port;
