use thiserror::Error;

/// Результат для операций TAFFmat
pub type TaffmatResult<T> = std::result::Result<T, TaffmatError>;

/// Типы ошибок формата TAFFmat.
///
/// Ключи в сообщениях приводятся в нижний регистр, так же как их
/// нормализует лексический проход.
#[derive(Debug, Error)]
pub enum TaffmatError {
    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Путь к заголовку с расширением, отличным от `.HDR`
    #[error("Bad header extension: '{0}' (expected .HDR or none)")]
    BadExtension(String),

    /// Обязательный ключ отсутствует в заголовке
    #[error("Missing field: '{key}'")]
    MissingField { key: String },

    /// Значение ключа не удалось декодировать
    #[error("Malformed field '{key}': {reason}")]
    MalformedField { key: String, reason: String },

    /// Несовместимая версия формата
    #[error("Unsupported version: found {found}, expected {expected}")]
    VersionUnsupported { found: i64, expected: u32 },

    /// Длина вектора не совпадает с `num_series`
    #[error("Cardinality mismatch for '{key}': got {got} elements, expected {expected}")]
    CardinalityMismatch {
        key: String,
        got: usize,
        expected: usize,
    },

    /// Нет дескриптора канала `CHi_i`
    #[error("Missing channel descriptor 'ch{index}_{index}'")]
    ChannelMissing { index: usize },

    /// Неизвестный диапазон входа во фрагменте `RANGE=`
    #[error("Unknown input range '{raw}' in '{key}'")]
    RangeUnknown { key: String, raw: String },

    /// Файл данных закончился раньше `num_samples` кадров
    #[error("Data truncated: expected {expected} samples per channel, found {found}")]
    DataTruncated { expected: u64, found: u64 },

    /// Размер файла данных не совпадает с заголовком
    #[error("Data size mismatch: expected {expected} bytes, found {found}")]
    DataSizeMismatch { expected: u64, found: u64 },

    /// Отсчёт не помещается в разрядность АЦП
    #[error("Sample {value} out of range for {bits}-bit encoding")]
    SampleOutOfRange { value: i32, bits: u32 },
}

impl TaffmatError {
    /// Удобные конструкторы
    pub fn missing<S: Into<String>>(key: S) -> Self {
        Self::MissingField { key: key.into() }
    }

    pub fn malformed<K: Into<String>, R: Into<String>>(
        key: K,
        reason: R,
    ) -> Self {
        Self::MalformedField {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
