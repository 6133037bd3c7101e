pub mod machine;
pub mod targets;
