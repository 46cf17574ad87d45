use crate::Taxonomy;

/// Диапазон входного напряжения усилителя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRange {
    /// ±2 В
    V2,
    /// ±5 В
    V5,
}

impl InputRange {
    /// Полная шкала в вольтах
    pub fn volts(&self) -> f64 {
        match self {
            InputRange::V2 => 2.0,
            InputRange::V5 => 5.0,
        }
    }
}

impl Taxonomy for InputRange {
    const ALL: &'static [Self] = &[InputRange::V2, InputRange::V5];

    fn as_token(&self) -> &'static str {
        match self {
            InputRange::V2 => "2V",
            InputRange::V5 => "5V",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            InputRange::V2 => "±2 V full scale",
            InputRange::V5 => "±5 V full scale",
        }
    }
}

impl std::fmt::Display for InputRange {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for InputRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown input range: '{s}'. Use: {}", Self::tokens()))
    }
}
