//! プロセス状態と遷移関数（State Codec の遷移部分）
//!
//! 状態は専用ストアを持たず、オーケストレーションリソースの
//! ラベルだけに永続化されます（ラベル変換は labels モジュール）。
//! ここは純関数のみで、リモート依存なしにテストできます。

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// 稼働モード
///
/// 永続化上の is-stopped / is-asleep の 2 つの bool を 1 つの enum に
/// 畳む。stopped かつ asleep という組み合わせを型で排除するため。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunningMode {
    #[default]
    Running,
    Stopped,
    Asleep,
}

/// ProcessState - ラベルとして永続化されるプロセス状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// 記憶された希望レプリカ数（stop/sleep 中も保持される）
    pub target: u32,
    pub running_mode: RunningMode,
    /// Restart のたびに単調増加するカウンタ
    pub restarts: u32,
}

/// Instruction - パイプライン呼び出しごとに 1 つ渡される遷移指示
///
/// 全フィールドがゼロ値の指示は no-op で、前回状態をそのまま
/// 再現します（冪等なチェックポイント呼び出しとして使う）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub stop: bool,
    #[serde(default)]
    pub sleep: bool,
    #[serde(default)]
    pub restart: bool,
    /// 希望レプリカ数への符号付き差分
    #[serde(default)]
    pub increment: i32,
}

impl Instruction {
    pub fn is_noop(&self) -> bool {
        !self.start && !self.stop && !self.sleep && !self.restart && self.increment == 0
    }

    /// モードフラグは 1 呼び出しにつき高々 1 つ。increment は
    /// stop/sleep とは組み合わせ不可（挙動が未定義のため拒否）。
    pub fn validate(&self) -> Result<()> {
        let modes = [self.start, self.stop, self.sleep, self.restart]
            .iter()
            .filter(|b| **b)
            .count();
        if modes > 1 {
            return Err(CoreError::ConflictingInstruction(
                "モードフラグは同時に 1 つまでです".to_string(),
            ));
        }
        if self.increment != 0 && (self.stop || self.sleep) {
            return Err(CoreError::ConflictingInstruction(
                "increment は stop/sleep と併用できません".to_string(),
            ));
        }
        Ok(())
    }
}

impl ProcessState {
    /// 現在実際に起動していてほしいレプリカ数
    pub fn live(&self) -> u32 {
        if self.running_mode == RunningMode::Running {
            self.target
        } else {
            0
        }
    }

    /// 前回状態と指示から次の状態を計算する（純関数）
    ///
    /// - `Start`: running へ。target が 0 なら 1 に（初回起動）
    /// - `Increment(n)`: モードに関係なく target を更新。
    ///   停止中は live は 0 のまま、再開に備えて target だけ進む
    /// - `Stop` / `Sleep`: target は再開用に保持したままモード変更
    /// - `Restart`: running へ戻し restarts を 1 増やす。
    ///   未作成のプロセスに対しては Start と同様に target=1 で作成
    /// - no-op: 前回状態をそのまま返す
    pub fn next(prev: Option<&ProcessState>, instruction: &Instruction) -> Result<ProcessState> {
        instruction.validate()?;
        let mut state = prev.copied().unwrap_or_default();
        if instruction.start || instruction.restart {
            state.running_mode = RunningMode::Running;
            if state.target == 0 {
                state.target = 1;
            }
            if instruction.restart {
                state.restarts += 1;
            }
        } else if instruction.stop {
            state.running_mode = RunningMode::Stopped;
        } else if instruction.sleep {
            state.running_mode = RunningMode::Asleep;
        }
        if instruction.increment != 0 {
            let target = i64::from(state.target) + i64::from(instruction.increment);
            if target < 0 {
                return Err(CoreError::NegativeReplicas {
                    target: state.target,
                    increment: instruction.increment,
                });
            }
            state.target = target as u32;
        }
        Ok(state)
    }
}
