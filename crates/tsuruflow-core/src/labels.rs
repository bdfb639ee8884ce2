//! State Codec（ラベル部分）: ProcessState ↔ ラベルの相互変換
//!
//! ラベルスキーマはビット単位の互換契約です。キーは全て
//! `tsuru.io/` プレフィックスを共有します。

use crate::model::App;
use crate::state::{ProcessState, RunningMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 全ラベルキー共通の名前空間プレフィックス
pub const LABEL_PREFIX: &str = "tsuru.io/";

/// provisioner 識別子（ラベル値）
pub const PROVISIONER_NAME: &str = "kubernetes";

/// ラベルの集合。BTreeMap で順序を決定的に保つ。
pub type Labels = BTreeMap<String, String>;

fn put(labels: &mut Labels, key: &str, value: impl Into<String>) {
    labels.insert(format!("{LABEL_PREFIX}{key}"), value.into());
}

fn get<'a>(labels: &'a Labels, key: &str) -> Option<&'a str> {
    labels.get(&format!("{LABEL_PREFIX}{key}")).map(String::as_str)
}

/// LabelSet - リソースとその pod template に付与するラベル一式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub labels: Labels,
}

impl LabelSet {
    /// アプリ・プロセス・状態からフルラベルを組み立てる
    pub fn for_process(app: &App, process: &str, state: &ProcessState) -> Self {
        let mut labels = Labels::new();
        put(&mut labels, "is-tsuru", "true");
        put(&mut labels, "is-service", "true");
        put(&mut labels, "is-build", "false");
        put(&mut labels, "is-deploy", "false");
        put(&mut labels, "is-isolated-run", "false");
        put(
            &mut labels,
            "is-stopped",
            (state.running_mode == RunningMode::Stopped).to_string(),
        );
        put(
            &mut labels,
            "is-asleep",
            (state.running_mode == RunningMode::Asleep).to_string(),
        );
        put(&mut labels, "app-name", app.name.clone());
        put(&mut labels, "app-process", process);
        put(&mut labels, "app-process-replicas", state.target.to_string());
        put(&mut labels, "app-platform", app.platform.clone());
        put(&mut labels, "app-pool", app.pool.clone());
        put(&mut labels, "router-name", app.router_name.clone());
        put(&mut labels, "router-type", app.router_type.clone());
        put(&mut labels, "provisioner", PROVISIONER_NAME);
        put(&mut labels, "restarts", state.restarts.to_string());
        Self { labels }
    }

    /// rollout を跨いで pod にマッチし続ける狭い selector 部分集合
    ///
    /// template 側のラベルは状態で変わるため、selector には
    /// 不変のキーだけを使う。
    pub fn selector(app_name: &str, process: &str) -> Labels {
        let mut labels = Labels::new();
        put(&mut labels, "app-name", app_name);
        put(&mut labels, "app-process", process);
        put(&mut labels, "is-build", "false");
        put(&mut labels, "is-isolated-run", "false");
        labels
    }

    /// ラベルから ProcessState を復元する。欠けたキーは既定値で埋める。
    pub fn decode_state(labels: &Labels) -> ProcessState {
        let target = get(labels, "app-process-replicas")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let restarts = get(labels, "restarts")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let stopped = get(labels, "is-stopped") == Some("true");
        let asleep = get(labels, "is-asleep") == Some("true");
        let running_mode = if stopped {
            RunningMode::Stopped
        } else if asleep {
            RunningMode::Asleep
        } else {
            RunningMode::Running
        };
        ProcessState {
            target,
            running_mode,
            restarts,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        get(&self.labels, key)
    }

    pub fn app_replicas(&self) -> u32 {
        Self::decode_state(&self.labels).target
    }

    pub fn is_stopped(&self) -> bool {
        self.get("is-stopped") == Some("true")
    }

    pub fn is_asleep(&self) -> bool {
        self.get("is-asleep") == Some("true")
    }

    pub fn restarts(&self) -> u32 {
        Self::decode_state(&self.labels).restarts
    }
}
