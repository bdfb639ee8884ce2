//! モデル定義
//!
//! provisioner が読み取る外部メタデータのモデルを定義します。
//! アプリ・イメージの永続化自体は外部コラボレータの責務です。

mod app;
mod image;

// Re-exports
pub use app::*;
pub use image::*;
