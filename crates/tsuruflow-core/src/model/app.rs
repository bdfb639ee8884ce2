//! アプリケーション定義

use serde::{Deserialize, Serialize};

/// App - provisioner から見たアプリケーション情報（読み取り専用）
///
/// アプリの永続化や認可は扱いません。reconcile に必要な
/// メタデータだけを運びます。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct App {
    /// アプリ名
    pub name: String,
    /// プラットフォーム（空でもよい）
    #[serde(default)]
    pub platform: String,
    /// 配置先プール
    #[serde(default)]
    pub pool: String,
    /// 所有チーム
    #[serde(default)]
    pub team_owner: String,
    /// ルーター名
    #[serde(default)]
    pub router_name: String,
    /// ルーター種別
    #[serde(default)]
    pub router_type: String,
    /// TSURU_HOST 環境変数に渡す値（空でもよい）
    #[serde(default)]
    pub host: String,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
