pub mod local_runner;
pub mod remote_compiler;
