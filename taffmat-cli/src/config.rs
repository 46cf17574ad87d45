use std::path::PathBuf;

/// Формат вывода отчёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Человекочитаемая сводка.
    #[default]
    Text,
    /// JSON с отступами.
    Json,
}

/// Конфигурация одного запуска `taffmat`.
#[derive(Debug, Clone, Default)]
pub struct InfoConfig {
    /// Базовое имя записи или путь к .HDR
    pub path: PathBuf,
    /// Формат отчёта
    pub format: OutputFormat,
    /// Сколько кадров .DAT вывести (0: не открывать .DAT)
    pub samples: u64,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl InfoConfig {
    /// Нужно ли открывать файл данных.
    pub fn wants_samples(&self) -> bool {
        self.samples > 0
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OutputFormat
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{s}'. Use: text, json")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_fromstr() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display_round_trip() {
        for f in [OutputFormat::Text, OutputFormat::Json] {
            assert_eq!(f.to_string().parse::<OutputFormat>().unwrap(), f);
        }
    }

    #[test]
    fn test_default_config() {
        let c = InfoConfig::default();
        assert_eq!(c.format, OutputFormat::Text);
        assert!(!c.wants_samples());
    }
}
