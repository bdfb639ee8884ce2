//! アプリ単位の reconcile パイプライン
//!
//! プロセス名 → Instruction の集合を Service Manager へ辞書順に
//! fan-out する。並列化はしない。逐次実行にすることでエラーの
//! 帰属先と部分適用の範囲が決定的になる。

use crate::client::KubeClient;
use crate::error::Result;
use crate::manager::ServiceManager;
use std::collections::BTreeMap;
use tracing::info;
use tsuruflow_core::{App, ImageMetadata, Instruction};

/// プロセス名 → 遷移指示。BTreeMap なので反復は常に辞書順。
pub type ProcessSpec = BTreeMap<String, Instruction>;

/// アプリの全指示を逐次 reconcile する
///
/// - `None` または空の指定は「イメージが宣言する全プロセスの撤去」
/// - 指名されたプロセスだけを変更し、宣言済みでも未指名のものには触れない
/// - 最初のエラーで停止し、失敗したプロセス名を注釈して返す。
///   適用済みの reconcile は巻き戻さないので、呼び出し側は部分適用を
///   前提に冪等に再実行すること
pub async fn run_service_pipeline<C: KubeClient>(
    manager: &ServiceManager<C>,
    app: &App,
    metadata: &ImageMetadata,
    image: &str,
    spec: Option<ProcessSpec>,
) -> Result<()> {
    match spec {
        Some(spec) if !spec.is_empty() => {
            for (process, instruction) in &spec {
                manager
                    .deploy_process(app, process, metadata, image, instruction)
                    .await
                    .map_err(|e| e.for_process(process))?;
            }
        }
        _ => {
            info!(app = %app.name, "tearing down all processes");
            for process in metadata.process_names() {
                manager
                    .remove_service(app, process)
                    .await
                    .map_err(|e| e.for_process(process))?;
            }
        }
    }
    Ok(())
}
