use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::RunCodeRequest,
    services::local_runner::{strip_display_calls, LocalRunner, PlotCapability},
    utils::{
        files::Collection,
        languages,
        support::{self, EXTRA_RESPONSE_INSTRUCTIONS},
    },
};

/// Runs submitted code: locally when the resolved language is the local
/// interpreter marker, otherwise through the remote compiler service.
#[utoipa::path(
    post,
    path = "/run_code",
    tag = "execution",
    request_body = RunCodeRequest,
    responses(
        (status = 200, description = "Execution result envelope"),
        (status = 400, description = "Empty code"),
        (status = 502, description = "Compiler service unreachable or malformed reply"),
    )
)]
pub async fn run_code(
    State(state): State<AppState>,
    Json(request): Json<RunCodeRequest>,
) -> Result<Json<Value>> {
    let script = request.code.unwrap_or_default();
    let language = request.language.unwrap_or_default();
    let language_code = languages::resolve(&language);
    tracing::info!(language = %language_code, "run_code request");

    if script.trim().is_empty() {
        tracing::info!("run_code: rejecting empty script before dispatch");
        return Err(AppError::EmptyCode);
    }

    if language_code == languages::LOCAL_INTERPRETER {
        return run_local(&state, &script, request.input.as_deref()).await;
    }

    let mut reply = state
        .compiler
        .execute(
            &script,
            &language_code,
            request.input.as_deref(),
            request.compile_only,
        )
        .await?;

    if let Some(envelope) = reply.as_object_mut() {
        envelope.insert("id".to_string(), json!(generate_code_id()));
        envelope.insert("support".to_string(), json!(support::support_message()));
        envelope.insert(
            "extra_response_instructions".to_string(),
            json!(EXTRA_RESPONSE_INSTRUCTIONS),
        );
    }

    Ok(Json(reply))
}

async fn run_local(state: &AppState, script: &str, stdin: Option<&str>) -> Result<Json<Value>> {
    let runner = LocalRunner::new(&state.config.interpreter_bin);

    if PlotCapability::detect(script).renders_plot() {
        tracing::info!("run_code: capturing plot instead of display call");
        let stripped = strip_display_calls(script);
        let png = runner.run_with_plot_capture(&stripped).await?;

        let filename = plot_filename();
        state
            .database
            .put_blob(Collection::Images, &filename, &png)
            .await?;

        return Ok(Json(json!({
            "output": format!("{}/download/{}", state.config.plugin_url, filename),
            "support": support::support_message(),
            "extra_response_instructions": EXTRA_RESPONSE_INSTRUCTIONS,
        })));
    }

    let output = runner.run(script, stdin).await?;
    Ok(Json(json!({
        "result": {
            "output": output,
            "support": support::support_message(),
            "extra_response_instructions": EXTRA_RESPONSE_INSTRUCTIONS,
        }
    })))
}

/// Remote-service quota usage for the configured account.
#[utoipa::path(
    get,
    path = "/credit_limit",
    tag = "execution",
    responses(
        (status = 200, description = "Credits used"),
        (status = 502, description = "Credit endpoint unreachable"),
    )
)]
pub async fn credit_limit(State(state): State<AppState>) -> Result<Json<Value>> {
    let used = state.compiler.credits_used().await?;
    Ok(Json(json!({ "credits": used })))
}

fn generate_code_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Filename for a captured plot, stored in the image collection.
fn plot_filename() -> String {
    format!("graph_{}.png", rand::random::<u32>() % 100_000 + 1)
}
