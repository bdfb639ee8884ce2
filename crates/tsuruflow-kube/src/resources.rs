//! オーケストレーションリソースの形
//!
//! リモート API 自体は外部コラボレータなので、ここでは provisioner が
//! 生成・消費する形とラベルだけを固定します。deployment / service は
//! app + process から決定的に命名され、独立した identity を持ちません。

use serde::{Deserialize, Serialize};
use tsuruflow_core::Labels;

/// `{app}-{process}` の決定的な命名
pub fn deployment_name(app: &str, process: &str) -> String {
    format!("{app}-{process}")
}

/// selector の全キーが labels に同じ値で含まれるか
pub fn selector_matches(labels: &Labels, selector: &Labels) -> bool {
    selector
        .iter()
        .all(|(k, v)| labels.get(k).is_some_and(|lv| lv == v))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: Labels,
}

/// プロセスを表す primary resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub metadata: ObjectMeta,
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    pub replicas: u32,
    pub revision_history_limit: u32,
    pub strategy: DeploymentStrategy,
    /// 狭い selector 部分集合（labels::LabelSet::selector）
    pub selector: Labels,
    pub template: PodTemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStrategy {
    pub kind: String,
    pub rolling_update: RollingUpdate,
}

impl DeploymentStrategy {
    /// rollout 中に可用キャパシティを減らさない rolling update
    pub fn rolling_update() -> Self {
        Self {
            kind: "RollingUpdate".to_string(),
            rolling_update: RollingUpdate {
                max_surge: "100%".to_string(),
                max_unavailable: "0".to_string(),
            },
        }
    }
}

impl Default for DeploymentStrategy {
    fn default() -> Self {
        Self::rolling_update()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingUpdate {
    pub max_surge: String,
    pub max_unavailable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodTemplateSpec {
    pub labels: Labels,
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSpec {
    pub node_selector: Labels,
    pub restart_policy: String,
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub env: Vec<EnvVar>,
    #[serde(default)]
    pub readiness_probe: Option<Probe>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub http_get: HttpGetAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpGetAction {
    pub path: String,
    pub port: u16,
}

/// ネットワーク到達性を表す exposure resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub selector: Labels,
    pub ports: Vec<ServicePort>,
    pub service_type: ServiceType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    ClusterIp,
    NodePort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePort {
    pub protocol: String,
    pub port: u16,
    pub target_port: u16,
}

/// 過去の rollout が残す replica group（teardown 時の掃除対象）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaSet {
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub metadata: ObjectMeta,
}
