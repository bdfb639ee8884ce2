//! Resource Builder: ProcessState とメタデータからリソース記述を組み立てる
//!
//! ここは純粋な変換のみで、リモート呼び出しは行いません。
//! 検証エラー（ヘルスチェック等）はリモート変更の前にここで出ます。

use crate::config::ClusterConfig;
use crate::error::{KubeError, Result};
use crate::resources::{
    Container, Deployment, DeploymentSpec, DeploymentStrategy, EnvVar, HttpGetAction, ObjectMeta,
    PodSpec, PodTemplateSpec, Probe, Service, ServicePort, ServiceSpec, ServiceType,
    deployment_name,
};
use tsuruflow_core::{App, Healthcheck, ImageMetadata, LabelSet, Labels, ProcessState};

/// 慣習的なアプリ作業ディレクトリ。存在すればそこへ cd する。
const APP_CURRENT_DIR: &str = "/home/application/current";

/// unit 登録 callback のタイムアウト秒
const REGISTER_TIMEOUT_SECS: u32 = 15;

/// 保持する rollout リビジョン数
const REVISION_HISTORY_LIMIT: u32 = 10;

/// primary resource（deployment 相当）を組み立てる
pub fn build_deployment(
    config: &ClusterConfig,
    app: &App,
    process: &str,
    command: &str,
    image: &str,
    state: &ProcessState,
    metadata: &ImageMetadata,
) -> Result<Deployment> {
    let readiness_probe = build_readiness_probe(config, metadata.healthcheck.as_ref())?;
    let name = deployment_name(&app.name, process);
    let labels = LabelSet::for_process(app, process, state);
    let port = config.container_port.to_string();
    let mut node_selector = Labels::new();
    node_selector.insert("pool".to_string(), app.pool.clone());
    Ok(Deployment {
        metadata: ObjectMeta {
            name: name.clone(),
            namespace: config.namespace.clone(),
            labels: Labels::new(),
        },
        spec: DeploymentSpec {
            replicas: state.live(),
            revision_history_limit: REVISION_HISTORY_LIMIT,
            strategy: DeploymentStrategy::rolling_update(),
            selector: LabelSet::selector(&app.name, process),
            template: PodTemplateSpec {
                labels: labels.labels,
                spec: PodSpec {
                    node_selector,
                    restart_policy: "Always".to_string(),
                    containers: vec![Container {
                        name,
                        image: image.to_string(),
                        command: wrapped_command(config, app, command),
                        env: vec![
                            EnvVar::new("TSURU_PROCESSNAME", process),
                            EnvVar::new("TSURU_HOST", app.host.clone()),
                            EnvVar::new("port", port.clone()),
                            EnvVar::new("PORT", port),
                        ],
                        readiness_probe,
                    }],
                },
            },
        },
    })
}

/// exposure resource（service 相当）を組み立てる
///
/// live == 0 でも常に作る。selector は狭い部分集合なので
/// rollout を跨いで pod にマッチし続ける。
pub fn build_service(
    config: &ClusterConfig,
    app: &App,
    process: &str,
    state: &ProcessState,
) -> Service {
    Service {
        metadata: ObjectMeta {
            name: deployment_name(&app.name, process),
            namespace: config.namespace.clone(),
            labels: LabelSet::for_process(app, process, state).labels,
        },
        spec: ServiceSpec {
            selector: LabelSet::selector(&app.name, process),
            ports: vec![ServicePort {
                protocol: "TCP".to_string(),
                port: config.container_port,
                target_port: config.container_port,
            }],
            service_type: ServiceType::NodePort,
        },
    }
}

/// コンテナのコマンドをシェルラッパーで包む
///
/// 作業ディレクトリがあれば cd し、自分自身の unit を best-effort で
/// 登録（失敗は無視）した後、プロセスコマンドを exec で置き換える。
fn wrapped_command(config: &ClusterConfig, app: &App, command: &str) -> Vec<String> {
    let register = format!(
        "curl -fsSL -m{timeout} -XPOST -d\"hostname=$(hostname)\" -o/dev/null -H\"Content-Type:application/x-www-form-urlencoded\" -H\"Authorization:bearer {token}\" {api}/apps/{app}/units/register || true",
        timeout = REGISTER_TIMEOUT_SECS,
        token = config.registration_token,
        api = config.api_url.trim_end_matches('/'),
        app = app.name,
    );
    let script = format!(
        "[ -d {dir} ] && cd {dir}; {register}; exec {command}",
        dir = APP_CURRENT_DIR,
    );
    vec!["/bin/sh".to_string(), "-lc".to_string(), script]
}

/// readiness probe はヘルスチェック宣言があるときだけ作る
///
/// GET 以外の method はリモート変更前の検証エラーになる。
fn build_readiness_probe(
    config: &ClusterConfig,
    healthcheck: Option<&Healthcheck>,
) -> Result<Option<Probe>> {
    let Some(hc) = healthcheck else {
        return Ok(None);
    };
    if hc.path.is_empty() {
        return Ok(None);
    }
    if !hc.method.is_empty() && !hc.method.eq_ignore_ascii_case("GET") {
        return Err(KubeError::UnsupportedHealthcheckMethod);
    }
    Ok(Some(Probe {
        http_get: HttpGetAction {
            path: hc.path.clone(),
            port: config.container_port,
        },
    }))
}
