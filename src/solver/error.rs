use thiserror::Error;

use crate::conversion::ConversionError;

/// 희석 계산 중 발생 가능한 오류. 모두 입력에서 결정되므로 재시도 대상이 아니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// 빈 칸이 정확히 하나가 아님
    #[error("정확히 한 칸만 비워 두어야 합니다 (빈 칸 {empty}개)")]
    InvalidSelection { empty: usize },
    /// 필수 값이 없거나 숫자가 아님
    #[error("{field} 값이 올바른 숫자가 아닙니다: {input:?}")]
    InvalidNumber { field: &'static str, input: String },
    /// 단위 표에 없는 단위
    #[error(transparent)]
    UnknownUnit(#[from] ConversionError),
    /// 계산된 분모가 정확히 0
    #[error("0으로 나눌 수 없습니다 ({solving} 계산 중)")]
    DivisionByZero { solving: &'static str },
}

impl CalcError {
    /// 화면에 보여 줄 번역 문자열 키.
    pub fn message_key(&self) -> &'static str {
        match self {
            CalcError::InvalidSelection { .. } => "error.invalid_selection",
            CalcError::InvalidNumber { .. } => "error.invalid_number",
            CalcError::UnknownUnit(_) => "error.unknown_unit",
            CalcError::DivisionByZero { .. } => "error.division_by_zero",
        }
    }
}
