/// Закрытое перечисление, значения которого записываются в заголовке
/// текстовым токеном.
///
/// `as_token` служит единственной таблицей соответствия: `from_token` ищет по ней,
/// запись заголовка использует её же.
pub trait Taxonomy: Sized + Copy + 'static {
    /// Все варианты в порядке объявления.
    const ALL: &'static [Self];

    /// Канонический токен (как в файле .HDR).
    fn as_token(&self) -> &'static str;

    /// Человекочитаемое описание.
    fn description(&self) -> &'static str;

    /// Поиск варианта по токену (с учётом регистра).
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_token() == token)
    }

    /// Список допустимых токенов через запятую (для сообщений об ошибках).
    fn tokens() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
