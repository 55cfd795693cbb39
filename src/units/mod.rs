//! 단위 정의 및 변환 모듈 모음.
//!
//! 각 단위 표는 `기준값 = 입력값 * 배율` 관계를 따른다. 기준 단위의 배율은 항상 1이다.

pub mod mass;
pub mod mass_concentration;
pub mod molar_concentration;
pub mod volume;

pub use mass::{convert_mass, MassUnit};
pub use mass_concentration::{convert_mass_concentration, MassConcentrationUnit};
pub use molar_concentration::{convert_molar_concentration, MolarConcentrationUnit};
pub use volume::{convert_volume, VolumeUnit};

/// 하나의 단위 표에 속한 단위가 공통으로 제공하는 동작.
pub trait Unit: Copy + PartialEq + 'static {
    /// 표에 포함된 모든 단위. 첫 번째 항목이 기준 단위이다.
    const ALL: &'static [Self];

    /// 화면과 설정 파일에서 쓰는 단위 기호.
    fn symbol(self) -> &'static str;

    /// 기준 단위 대비 배율.
    fn factor(self) -> f64;

    /// 기호로 단위를 찾는다. 대소문자를 구분한다.
    fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.symbol() == symbol)
    }

    fn to_base(self, value: f64) -> f64 {
        value * self.factor()
    }

    fn from_base(self, value: f64) -> f64 {
        value / self.factor()
    }
}

/// 표에 있는 모든 단위 기호를 순서대로 돌려준다.
pub fn symbols<U: Unit>() -> Vec<&'static str> {
    U::ALL.iter().map(|u| u.symbol()).collect()
}
