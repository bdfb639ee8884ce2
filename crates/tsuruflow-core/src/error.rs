use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("矛盾した指示です: {0}")]
    ConflictingInstruction(String),

    #[error("レプリカ数を負にはできません: target={target} increment={increment}")]
    NegativeReplicas { target: u32, increment: i32 },

    #[error("プロセスが見つかりません: {0}")]
    ProcessNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
