use crate::{config::Config, database::Database, services::remote_compiler::RemoteCompiler};

pub mod docs;
pub mod files;
pub mod run_code;
pub mod site;
pub mod webhooks;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub compiler: RemoteCompiler,
    pub config: Config,
}
