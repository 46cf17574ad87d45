use crate::Taxonomy;

/// Модель регистратора TEAC, записавшего файл
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// LX-10
    Lx10,
    /// LX-20
    Lx20,
    /// LX-110
    Lx110,
    /// LX-120
    Lx120,
}

impl DeviceKind {
    /// Ключ строки версий прошивки, например `lx10_version` для `LX-10`.
    pub fn version_key(&self) -> String {
        format!("{}_version", self.as_token().replace('-', "").to_lowercase())
    }
}

impl Taxonomy for DeviceKind {
    const ALL: &'static [Self] = &[
        DeviceKind::Lx10,
        DeviceKind::Lx20,
        DeviceKind::Lx110,
        DeviceKind::Lx120,
    ];

    fn as_token(&self) -> &'static str {
        match self {
            DeviceKind::Lx10 => "LX-10",
            DeviceKind::Lx20 => "LX-20",
            DeviceKind::Lx110 => "LX-110",
            DeviceKind::Lx120 => "LX-120",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            DeviceKind::Lx10 => "TEAC LX-10 recording unit",
            DeviceKind::Lx20 => "TEAC LX-20 recording unit",
            DeviceKind::Lx110 => "TEAC LX-110 recording unit",
            DeviceKind::Lx120 => "TEAC LX-120 recording unit",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown device: '{s}'. Use: {}", Self::tokens()))
    }
}
