//! イメージメタデータ定義

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ヘルスチェック宣言
///
/// method が空の場合は GET とみなします。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Healthcheck {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
}

/// イメージが宣言するプロセス一覧とヘルスチェック
///
/// プロセスは BTreeMap に保持する。reconcile の順序を
/// 辞書順で決定的にするため。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// プロセス名 → コマンド
    #[serde(default)]
    pub processes: BTreeMap<String, String>,
    #[serde(default)]
    pub healthcheck: Option<Healthcheck>,
}

impl ImageMetadata {
    /// プロセスのコマンドを引く。未宣言ならエラー。
    pub fn command_for(&self, process: &str) -> Result<&str> {
        self.processes
            .get(process)
            .map(String::as_str)
            .ok_or_else(|| CoreError::ProcessNotFound(process.to_string()))
    }

    /// 宣言されたプロセス名（辞書順）
    pub fn process_names(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }
}
