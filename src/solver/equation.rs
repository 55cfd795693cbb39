use std::borrow::Borrow;

use tracing::debug;

use super::CalcError;
use crate::conversion::{scale_factor, to_base};
use crate::format::format_general;
use crate::quantity::{QuantityKind, QuantitySlot};

/// 곱셈 등식의 왼쪽/오른쪽.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// 등식을 구성하는 물리량 하나.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// i18n 키 및 CLI 인자 이름
    pub key: &'static str,
    /// 기본 표시 이름
    pub label: &'static str,
    pub kind: QuantityKind,
    pub side: Side,
}

/// `왼쪽 항들의 곱 = 오른쪽 항들의 곱` 형태의 등식.
///
/// 입력 칸 순서는 `terms` 순서와 같다. 정확히 한 칸이 비어 있어야 하며,
/// 비어 있는 항은 반대쪽 곱을 같은 쪽 나머지 항들의 곱으로 나누어 구한다.
#[derive(Debug, Clone, Copy)]
pub struct ProductEquation {
    pub name: &'static str,
    pub terms: &'static [Term],
}

/// 풀이 결과. 값은 비어 있던 칸에서 선택한 단위로 표시된다.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub term: Term,
    pub value: f64,
    pub unit: String,
}

impl Solution {
    /// `%g` 형식의 값 문자열.
    pub fn formatted_value(&self) -> String {
        format_general(self.value)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} {}",
            self.term.label,
            self.formatted_value(),
            self.unit
        )
    }
}

impl ProductEquation {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 비어 있는 칸 하나를 구한다.
    ///
    /// 입력 칸 수가 항 수와 다르면 풀지 않고 `InvalidSelection`을 돌려준다.
    /// 이때 `empty`는 값이 채워지지 않은 항의 수이다.
    pub fn solve<S: Borrow<QuantitySlot>>(&self, slots: &[S]) -> Result<Solution, CalcError> {
        let slots: Vec<&QuantitySlot> = slots
            .iter()
            .map(<S as Borrow<QuantitySlot>>::borrow)
            .collect();
        if slots.len() != self.terms.len() {
            let filled = slots
                .iter()
                .take(self.terms.len())
                .filter(|s| !s.is_empty())
                .count();
            return Err(CalcError::InvalidSelection {
                empty: self.terms.len() - filled,
            });
        }

        let empty: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
            .collect();
        let missing = match empty.as_slice() {
            [i] => *i,
            _ => return Err(CalcError::InvalidSelection { empty: empty.len() }),
        };

        // 숫자 검사를 단위 검사보다 먼저 한다.
        let mut values = vec![0.0; slots.len()];
        for (i, (term, slot)) in self.terms.iter().zip(&slots).enumerate() {
            if i != missing {
                values[i] = parse_value(term.label, slot.value.as_deref())?;
            }
        }

        let mut base = vec![0.0; slots.len()];
        for (i, (term, slot)) in self.terms.iter().zip(&slots).enumerate() {
            if i != missing {
                base[i] = to_base(term.kind, values[i], &slot.unit)?;
            }
        }
        let target = self.terms[missing];
        let display_factor = scale_factor(target.kind, &slots[missing].unit)?;

        let mut numerator = 1.0;
        let mut divisor = 1.0;
        for (i, term) in self.terms.iter().enumerate() {
            if i == missing {
                continue;
            }
            if term.side == target.side {
                divisor *= base[i];
            } else {
                numerator *= base[i];
            }
        }
        if divisor == 0.0 {
            return Err(CalcError::DivisionByZero {
                solving: target.label,
            });
        }

        let value = numerator / divisor / display_factor;
        debug!(
            equation = self.name,
            solving = target.key,
            value,
            unit = %slots[missing].unit,
            "solved"
        );
        Ok(Solution {
            term: target,
            value,
            unit: slots[missing].unit.clone(),
        })
    }
}

/// 입력 문자열을 유한한 실수로 해석한다. 비어 있거나 숫자가 아니면 오류.
pub fn parse_value(field: &'static str, raw: Option<&str>) -> Result<f64, CalcError> {
    let raw = raw.unwrap_or_default().trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::InvalidNumber {
            field,
            input: raw.to_string(),
        })
}
