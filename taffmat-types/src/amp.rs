use crate::Taxonomy;

/// Тип входного усилителя канала (суффикс имени канала, например
/// `LX-10_DC100K`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmpKind {
    /// DC-усилитель, полоса 100 кГц
    Dc100k,
}

impl AmpKind {
    /// Определяет усилитель по имени канала: берётся часть после последнего
    /// `_`.
    pub fn from_channel_name(name: &str) -> Option<Self> {
        let (_, suffix) = name.rsplit_once('_')?;
        Self::from_token(suffix)
    }
}

impl Taxonomy for AmpKind {
    const ALL: &'static [Self] = &[AmpKind::Dc100k];

    fn as_token(&self) -> &'static str {
        match self {
            AmpKind::Dc100k => "DC100K",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            AmpKind::Dc100k => "DC amplifier, 100 kHz bandwidth",
        }
    }
}

impl std::fmt::Display for AmpKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for AmpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown amplifier: '{s}'. Use: {}", Self::tokens()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amp_from_channel_name() {
        assert_eq!(AmpKind::from_channel_name("LX-10_DC100K"), Some(AmpKind::Dc100k));
        assert_eq!(AmpKind::from_channel_name("LX10_DC100K"), Some(AmpKind::Dc100k));
        assert_eq!(AmpKind::from_channel_name("DC100K"), None);
        assert_eq!(AmpKind::from_channel_name("LX-10_AC1M"), None);
    }
}
