//! Client for the remote compiler service (JDoodle-style API). One blocking
//! call per request; transport and decode failures surface as upstream
//! errors, never as retries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct RemoteCompiler {
    http: reqwest::Client,
    execute_url: String,
    credit_url: String,
    client_id: String,
    client_secret: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteBody<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    script: &'a str,
    language: &'a str,
    stdin: Option<&'a str>,
    compile_only: bool,
    version_index: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreditBody<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct CreditReply {
    used: u64,
}

impl RemoteCompiler {
    pub fn new(config: &Config) -> Self {
        RemoteCompiler {
            http: reqwest::Client::new(),
            execute_url: config.compiler_url.clone(),
            credit_url: config.compiler_credit_url.clone(),
            client_id: config.compiler_client_id.clone(),
            client_secret: config.compiler_client_secret.clone(),
        }
    }

    /// Submits the script and returns the service's JSON reply. Credentials
    /// go in the body and are never logged.
    pub async fn execute(
        &self,
        script: &str,
        language: &str,
        stdin: Option<&str>,
        compile_only: bool,
    ) -> Result<Value> {
        let body = ExecuteBody {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            script,
            language,
            stdin,
            compile_only,
            version_index: "0",
        };

        tracing::info!(language, compile_only, "dispatching script to compiler service");

        let response = self
            .http
            .post(&self.execute_url)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "compiler service returned {status}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed compiler reply: {e}")))
    }

    /// Credits consumed against the service account.
    pub async fn credits_used(&self) -> Result<u64> {
        let body = CreditBody {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        let response = self
            .http
            .post(&self.credit_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "credit endpoint returned {status}"
            )));
        }

        let reply = response
            .json::<CreditReply>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed credit reply: {e}")))?;

        Ok(reply.used)
    }
}
