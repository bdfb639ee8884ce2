//! tsuruflow Kubernetes provisioner
//!
//! アプリの宣言的な指示（プロセスごとの希望状態）を Kubernetes 相当の
//! リソースへ変換し、状態をリソースのラベルだけに永続化する
//! reconciliation エンジン。
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 pipeline                      │
//! │   ProcessSpec (name → Instruction) をプロセス │
//! │   ごとに辞書順で fan-out                      │
//! └──────────────────┬───────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────┐
//! │              ServiceManager                   │
//! │   deploy_process / remove_service             │
//! └───────┬───────────────────────┬──────────────┘
//!         │                       │
//! ┌───────▼────────┐     ┌────────▼─────────┐
//! │ resource build │     │ trait KubeClient │
//! │ (deployment /  │     │ (外部 API の継ぎ目)│
//! │  service 記述) │     └──────────────────┘
//! └────────────────┘
//! ```

pub mod build;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod pipeline;
pub mod resources;

#[cfg(test)]
pub(crate) mod fake;

pub use build::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use manager::*;
pub use pipeline::*;
pub use resources::*;
