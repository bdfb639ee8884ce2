//! クラスタ関連の設定

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// コンテナが公開する固定ポート
pub const DEFAULT_CONTAINER_PORT: u16 = 8888;

/// リソースを配置する既定の namespace
pub const DEFAULT_NAMESPACE: &str = "tsuru";

/// ClusterConfig - provisioner の動作設定
///
/// JSON から読めるが、全フィールドに既定値があるので
/// `ClusterConfig::default()` だけでも動く。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// リソースを配置する namespace
    pub namespace: String,
    /// unit 登録 callback の宛先（tsuru API のベース URL）
    pub api_url: String,
    /// 登録 callback に付ける bearer token（空でもよい）
    pub registration_token: String,
    /// コンテナが公開する固定ポート
    pub container_port: u16,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            api_url: "http://localhost:8080".to_string(),
            registration_token: String::new(),
            container_port: DEFAULT_CONTAINER_PORT,
        }
    }
}

impl ClusterConfig {
    /// JSON ファイルから設定を読み込む
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
