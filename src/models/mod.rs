pub mod code;
pub mod execution;
pub mod user;
pub mod webhook;

pub use code::CodeArtifact;
pub use execution::{RunCodeRequest, SaveCodeRequest, UploadRequest};
pub use user::{QuotaSnapshot, User};
pub use webhook::{AccountSnapshot, QuotaEvent, UpdateEvent};
