use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RunCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Piped to the program's stdin.
    #[serde(default)]
    pub input: Option<String>,
    /// Ask the remote service to compile without running.
    #[serde(rename = "compileOnly", default)]
    pub compile_only: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveCodeRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: Option<String>,
    /// Text-decodable file contents.
    #[serde(default)]
    pub data: Option<String>,
}
