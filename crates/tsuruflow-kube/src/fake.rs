//! テスト用のインメモリ KubeClient（fake clientset 相当）
//!
//! 操作名ごとにエラーを注入でき、実行された操作の記録も取れる。

use crate::client::KubeClient;
use crate::error::{KubeError, Result};
use crate::resources::{Deployment, Pod, ReplicaSet, Service, selector_matches};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tsuruflow_core::Labels;

fn key(namespace: &str, name: &str) -> String {
    format!("{namespace}/{name}")
}

#[derive(Default)]
struct FakeState {
    deployments: BTreeMap<String, Deployment>,
    services: BTreeMap<String, Service>,
    replica_sets: BTreeMap<String, ReplicaSet>,
    pods: BTreeMap<String, Pod>,
    fail_on: HashMap<String, String>,
    ops: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeKubeClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeKubeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した操作を注入エラーで失敗させる
    pub fn fail_on(&self, op: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_on
            .insert(op.to_string(), message.to_string());
    }

    /// 実行された操作の記録（`"create_deployment myapp-p1"` 形式）
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    /// 過去の rollout の残骸を直接投入する
    pub fn add_replica_set(&self, rs: ReplicaSet) {
        let mut state = self.state.lock().unwrap();
        let k = key(&rs.metadata.namespace, &rs.metadata.name);
        state.replica_sets.insert(k, rs);
    }

    pub fn add_pod(&self, pod: Pod) {
        let mut state = self.state.lock().unwrap();
        let k = key(&pod.metadata.namespace, &pod.metadata.name);
        state.pods.insert(k, pod);
    }

    /// 操作を記録し、注入エラーがあればロックを返す前に失敗する
    fn begin(&self, op: &str, target: &str) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("{op} {target}"));
        if let Some(message) = state.fail_on.get(op) {
            return Err(KubeError::Api(message.clone()));
        }
        Ok(state)
    }
}

#[async_trait]
impl KubeClient for FakeKubeClient {
    async fn deployment(&self, namespace: &str, name: &str) -> Result<Deployment> {
        let state = self.begin("get_deployment", name)?;
        state
            .deployments
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| KubeError::NotFound(format!("deployments/{name}")))
    }

    async fn create_deployment(&self, deployment: &Deployment) -> Result<()> {
        let mut state = self.begin("create_deployment", &deployment.metadata.name)?;
        let k = key(&deployment.metadata.namespace, &deployment.metadata.name);
        state.deployments.insert(k, deployment.clone());
        Ok(())
    }

    async fn replace_deployment(&self, deployment: &Deployment) -> Result<()> {
        let mut state = self.begin("replace_deployment", &deployment.metadata.name)?;
        let k = key(&deployment.metadata.namespace, &deployment.metadata.name);
        if !state.deployments.contains_key(&k) {
            return Err(KubeError::NotFound(format!(
                "deployments/{}",
                deployment.metadata.name
            )));
        }
        state.deployments.insert(k, deployment.clone());
        Ok(())
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<()> {
        let mut state = self.begin("delete_deployment", name)?;
        state
            .deployments
            .remove(&key(namespace, name))
            .map(|_| ())
            .ok_or_else(|| KubeError::NotFound(format!("deployments/{name}")))
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>> {
        let state = self.begin("list_deployments", namespace)?;
        Ok(state
            .deployments
            .values()
            .filter(|d| d.metadata.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn service(&self, namespace: &str, name: &str) -> Result<Service> {
        let state = self.begin("get_service", name)?;
        state
            .services
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| KubeError::NotFound(format!("services/{name}")))
    }

    async fn create_service(&self, service: &Service) -> Result<()> {
        let mut state = self.begin("create_service", &service.metadata.name)?;
        let k = key(&service.metadata.namespace, &service.metadata.name);
        state.services.insert(k, service.clone());
        Ok(())
    }

    async fn replace_service(&self, service: &Service) -> Result<()> {
        let mut state = self.begin("replace_service", &service.metadata.name)?;
        let k = key(&service.metadata.namespace, &service.metadata.name);
        if !state.services.contains_key(&k) {
            return Err(KubeError::NotFound(format!(
                "services/{}",
                service.metadata.name
            )));
        }
        state.services.insert(k, service.clone());
        Ok(())
    }

    async fn delete_service(&self, namespace: &str, name: &str) -> Result<()> {
        let mut state = self.begin("delete_service", name)?;
        state
            .services
            .remove(&key(namespace, name))
            .map(|_| ())
            .ok_or_else(|| KubeError::NotFound(format!("services/{name}")))
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>> {
        let state = self.begin("list_services", namespace)?;
        Ok(state
            .services
            .values()
            .filter(|s| s.metadata.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn delete_replica_sets(&self, namespace: &str, selector: &Labels) -> Result<()> {
        let mut state = self.begin("delete_replica_sets", namespace)?;
        state.replica_sets.retain(|_, rs| {
            rs.metadata.namespace != namespace || !selector_matches(&rs.metadata.labels, selector)
        });
        Ok(())
    }

    async fn list_replica_sets(&self, namespace: &str) -> Result<Vec<ReplicaSet>> {
        let state = self.begin("list_replica_sets", namespace)?;
        Ok(state
            .replica_sets
            .values()
            .filter(|rs| rs.metadata.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn delete_pods(&self, namespace: &str, selector: &Labels) -> Result<()> {
        let mut state = self.begin("delete_pods", namespace)?;
        state.pods.retain(|_, pod| {
            pod.metadata.namespace != namespace
                || !selector_matches(&pod.metadata.labels, selector)
        });
        Ok(())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        let state = self.begin("list_pods", namespace)?;
        Ok(state
            .pods
            .values()
            .filter(|pod| pod.metadata.namespace == namespace)
            .cloned()
            .collect())
    }
}
