use crate::Taxonomy;

/// Событие, запускающее или останавливающее запись
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Команда с управляющего ПК
    Command,
    /// Кнопка на передней панели
    Panel,
    /// Превышение уровня сигнала
    Level,
    /// Заданные дата и время
    Date,
    /// Таймер
    Timer,
    /// Внешний сигнал
    External,
    /// Истечение времени ожидания
    TimeOut,
}

impl Taxonomy for TriggerKind {
    const ALL: &'static [Self] = &[
        TriggerKind::Command,
        TriggerKind::Panel,
        TriggerKind::Level,
        TriggerKind::Date,
        TriggerKind::Timer,
        TriggerKind::External,
        TriggerKind::TimeOut,
    ];

    fn as_token(&self) -> &'static str {
        match self {
            TriggerKind::Command => "COMMAND",
            TriggerKind::Panel => "PANEL",
            TriggerKind::Level => "LEVEL",
            TriggerKind::Date => "DATE",
            TriggerKind::Timer => "TIMER",
            TriggerKind::External => "EXT",
            TriggerKind::TimeOut => "TIME_OUT",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            TriggerKind::Command => "Command from host",
            TriggerKind::Panel => "Front panel key",
            TriggerKind::Level => "Signal level",
            TriggerKind::Date => "Date and time",
            TriggerKind::Timer => "Timer",
            TriggerKind::External => "External trigger input",
            TriggerKind::TimeOut => "Time out",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| format!("Unknown trigger: '{s}'. Use: {}", Self::tokens()))
    }
}
