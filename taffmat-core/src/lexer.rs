//! Лексический проход: сырые байты заголовка → таблица `ключ → значение`.
//!
//! Проход никогда не завершается ошибкой. Некорректные значения
//! обнаруживаются позже, в декодерах полей, чтобы сообщение об ошибке
//! называло конкретный ключ.

use std::collections::BTreeMap;

use log::trace;
use taffmat_types::{TaffmatError, TaffmatResult};

/// Таблица строк заголовка: ключи в нижнем регистре, значения без
/// окружающих пробелов.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    entries: BTreeMap<String, String>,
}

impl HeaderFields {
    /// Разбирает заголовок построчно.
    ///
    /// Каждая строка делится по первой последовательности пробельных
    /// символов. Строка без пробелов (`ID_END`, `DATA`) сохраняется как ключ
    /// с пустым значением. При повторе ключа побеждает последнее вхождение:
    /// регистраторы пишут `TIME` дважды, и только вторая форма (пара
    /// начало/конец) несёт нужный смысл.
    pub fn lex(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut entries = BTreeMap::new();

        for line in text.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((k, v)) => (k, v.trim()),
                None => (line, ""),
            };

            let key = key.to_lowercase();
            trace!("hdr[{key}] = {value}");
            entries.insert(key, value.to_string());
        }

        Self { entries }
    }

    /// Значение ключа (ключ в нижнем регистре).
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Значение обязательного ключа или `MissingField`.
    pub fn require(
        &self,
        key: &str,
    ) -> TaffmatResult<&str> {
        self.get(key).ok_or_else(|| TaffmatError::missing(key))
    }

    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Все пары в порядке ключей.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_basic_lines() {
        let f = HeaderFields::lex(b"DATASET UTEST001\nVERSION 1\nRATE   96000  \n");

        assert_eq!(f.get("dataset"), Some("UTEST001"));
        assert_eq!(f.get("version"), Some("1"));
        assert_eq!(f.get("rate"), Some("96000"));
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn test_lex_value_keeps_inner_spaces() {
        let f = HeaderFields::lex(b"MEMO Sample recordings for unit_testing taffmat.py\n");
        assert_eq!(
            f.get("memo"),
            Some("Sample recordings for unit_testing taffmat.py")
        );
    }

    #[test]
    fn test_lex_markers_without_value() {
        let f = HeaderFields::lex(b"DATA\nID_END\n");
        assert_eq!(f.get("data"), Some(""));
        assert_eq!(f.get("id_end"), Some(""));
    }

    #[test]
    fn test_lex_last_duplicate_wins() {
        let f = HeaderFields::lex(b"TIME 13:35:37.00\nRATE 1\nTIME 20130209133537,20130209133550\n");
        assert_eq!(f.get("time"), Some("20130209133537,20130209133550"));
    }

    #[test]
    fn test_lex_skips_blank_and_whitespace_lines() {
        let f = HeaderFields::lex(b"\n   \nDATASET X\r\n\t\n \n");
        assert_eq!(f.len(), 1);
        assert_eq!(f.get("dataset"), Some("X"));
    }

    #[test]
    fn test_lex_tab_separator() {
        let f = HeaderFields::lex(b"NUM_SERIES\t8\n");
        assert_eq!(f.get("num_series"), Some("8"));
    }

    #[test]
    fn test_require_missing() {
        let f = HeaderFields::lex(b"DATASET X\n");
        let err = f.require("rate").unwrap_err();
        assert!(matches!(err, TaffmatError::MissingField { ref key } if key == "rate"));
    }

    #[test]
    fn test_lex_invalid_utf8_does_not_fail() {
        let f = HeaderFields::lex(b"MEMO caf\xe9\nDATASET X\n");
        assert_eq!(f.get("dataset"), Some("X"));
        assert!(f.contains("memo"));
    }
}
