use crate::Taxonomy;

/// Порядок хранения каналов в файле .DAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageLayout {
    /// Отсчёты каналов чередуются внутри каждого индекса выборки
    Interlaced,
}

impl Taxonomy for StorageLayout {
    const ALL: &'static [Self] = &[StorageLayout::Interlaced];

    fn as_token(&self) -> &'static str {
        match self {
            StorageLayout::Interlaced => "INTERLACED",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            StorageLayout::Interlaced => "Interlaced (round-robin across channels)",
        }
    }
}

impl std::fmt::Display for StorageLayout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for StorageLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown storage mode: '{s}'. Use: {}", Self::tokens()))
    }
}
