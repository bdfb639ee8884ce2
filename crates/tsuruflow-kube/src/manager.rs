//! Service Manager: プロセス単位の reconcile
//!
//! State Codec（純関数）とリモート読み書きを配線するだけの層。
//! 状態の read-modify-write は CAS 保護されないため、同一アプリへの
//! 並行パイプライン実行は外部ロックで直列化されている前提。

use crate::build::{build_deployment, build_service};
use crate::client::KubeClient;
use crate::config::ClusterConfig;
use crate::error::Result;
use crate::resources::deployment_name;
use tracing::{debug, info};
use tsuruflow_core::{App, ImageMetadata, Instruction, LabelSet, ProcessState};

fn ignore_not_found(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}

pub struct ServiceManager<C: KubeClient> {
    client: C,
    config: ClusterConfig,
}

impl<C: KubeClient> ServiceManager<C> {
    pub fn new(client: C, config: ClusterConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// 1 プロセスを指示どおりに reconcile する
    ///
    /// 前回状態は deployment の pod template ラベルから復元する。
    /// deployment 側の upsert が失敗したら service 側は試みない。
    /// service 側の失敗は deployment を取り消さずそのまま返す。
    pub async fn deploy_process(
        &self,
        app: &App,
        process: &str,
        metadata: &ImageMetadata,
        image: &str,
        instruction: &Instruction,
    ) -> Result<()> {
        let command = metadata.command_for(process)?;
        let name = deployment_name(&app.name, process);
        let namespace = &self.config.namespace;

        let existing = match self.client.deployment(namespace, &name).await {
            Ok(deployment) => Some(deployment),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        let previous = existing
            .as_ref()
            .map(|d| LabelSet::decode_state(&d.spec.template.labels));
        let state = ProcessState::next(previous.as_ref(), instruction)?;

        // 検証エラーはリモート変更前にここで出る
        let deployment =
            build_deployment(&self.config, app, process, command, image, &state, metadata)?;
        let service = build_service(&self.config, app, process, &state);

        debug!(
            app = %app.name,
            process,
            replicas = state.live(),
            target = state.target,
            "reconciling deployment"
        );
        if existing.is_some() {
            self.client.replace_deployment(&deployment).await?;
        } else {
            self.client.create_deployment(&deployment).await?;
        }

        match self.client.service(namespace, &name).await {
            Ok(_) => self.client.replace_service(&service).await?,
            Err(e) if e.is_not_found() => self.client.create_service(&service).await?,
            Err(e) => return Err(e),
        }
        info!(app = %app.name, process, "process reconciled");
        Ok(())
    }

    /// プロセスとそのリソース一式を削除する
    ///
    /// 順序は exposure → primary → 残骸（replica set / pod）。
    /// 既に無いものの削除は成功扱い。途中で失敗したら即座に返し、
    /// それまでの削除は取り消さない。
    pub async fn remove_service(&self, app: &App, process: &str) -> Result<()> {
        let namespace = &self.config.namespace;
        let name = deployment_name(&app.name, process);
        ignore_not_found(self.client.delete_service(namespace, &name).await)?;
        ignore_not_found(self.client.delete_deployment(namespace, &name).await)?;
        let selector = LabelSet::selector(&app.name, process);
        self.client.delete_replica_sets(namespace, &selector).await?;
        self.client.delete_pods(namespace, &selector).await?;
        info!(app = %app.name, process, "process removed");
        Ok(())
    }
}
