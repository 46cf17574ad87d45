use crate::Taxonomy;

/// Кодировка отсчётов в файле .DAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEncoding {
    /// 16-битный АЦП, 2-байтовые целые
    Integer,
    /// 24-битный АЦП, 4-байтовые целые
    Long,
}

impl FileEncoding {
    /// Разрядность АЦП в битах
    pub fn bit_resolution(&self) -> u32 {
        match self {
            FileEncoding::Integer => 16,
            FileEncoding::Long => 24,
        }
    }

    /// Размер одного отсчёта в файле, байт
    pub fn byte_width(&self) -> usize {
        match self {
            FileEncoding::Integer => 2,
            FileEncoding::Long => 4, // 24 бита в 32-битном слове
        }
    }

    /// Минимальное значение отсчёта для данной разрядности.
    pub fn min_count(&self) -> i32 {
        -(1 << (self.bit_resolution() - 1))
    }

    /// Максимальное значение отсчёта для данной разрядности.
    pub fn max_count(&self) -> i32 {
        (1 << (self.bit_resolution() - 1)) - 1
    }
}

impl Taxonomy for FileEncoding {
    const ALL: &'static [Self] = &[FileEncoding::Integer, FileEncoding::Long];

    fn as_token(&self) -> &'static str {
        match self {
            FileEncoding::Integer => "INTEGER",
            FileEncoding::Long => "LONG",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            FileEncoding::Integer => "Integer (16-bit A/D, 2-byte integers)",
            FileEncoding::Long => "Long (24-bit A/D, 4-byte integers)",
        }
    }
}

impl std::fmt::Display for FileEncoding {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for FileEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown file type: '{s}'. Use: {}", Self::tokens()))
    }
}
