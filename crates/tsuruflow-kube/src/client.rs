//! Orchestration API abstraction
//!
//! The remote Kubernetes-like API is an external collaborator. This trait
//! fixes only the calls the reconciliation engine needs: create / get /
//! update / delete / list per resource kind, scoped by namespace and label
//! selector. No retry, no backoff, no timeout policy of our own — a
//! transient remote failure propagates as-is to the caller.

use crate::error::Result;
use crate::resources::{Deployment, Pod, ReplicaSet, Service};
use async_trait::async_trait;
use tsuruflow_core::Labels;

/// Kubernetes resource API seam
///
/// Get and delete of an absent object must yield `KubeError::NotFound`;
/// callers that need idempotent teardown translate that into success.
#[async_trait]
pub trait KubeClient: Send + Sync {
    async fn deployment(&self, namespace: &str, name: &str) -> Result<Deployment>;
    async fn create_deployment(&self, deployment: &Deployment) -> Result<()>;
    async fn replace_deployment(&self, deployment: &Deployment) -> Result<()>;
    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<()>;
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>>;

    async fn service(&self, namespace: &str, name: &str) -> Result<Service>;
    async fn create_service(&self, service: &Service) -> Result<()>;
    async fn replace_service(&self, service: &Service) -> Result<()>;
    async fn delete_service(&self, namespace: &str, name: &str) -> Result<()>;
    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>>;

    /// selector にマッチする replica set をまとめて削除する
    async fn delete_replica_sets(&self, namespace: &str, selector: &Labels) -> Result<()>;
    async fn list_replica_sets(&self, namespace: &str) -> Result<Vec<ReplicaSet>>;

    /// selector にマッチする pod をまとめて削除する
    async fn delete_pods(&self, namespace: &str, selector: &Labels) -> Result<()>;
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
}
