//! Kubernetes provisioner error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeError {
    /// ヘルスチェック検証エラー。メッセージは互換契約なので変更不可。
    #[error("healthcheck: only GET method is supported in kubernetes provisioner")]
    UnsupportedHealthcheckMethod,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Kubernetes API error: {0}")]
    Api(String),

    #[error("process {process}: {source}")]
    Process {
        process: String,
        #[source]
        source: Box<KubeError>,
    },

    #[error(transparent)]
    Core(#[from] tsuruflow_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KubeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KubeError::NotFound(_))
    }

    /// パイプラインがエラーに失敗プロセス名を注釈する
    pub fn for_process(self, process: &str) -> Self {
        KubeError::Process {
            process: process.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, KubeError>;
