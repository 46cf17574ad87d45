use chrono::NaiveDateTime;

use crate::{AmpKind, DeviceKind, FileEncoding, InputRange, StorageLayout, TriggerKind};

/// Единственная поддерживаемая версия заголовка
pub const TAFFMAT_VERSION: u32 = 1;

/// Заголовок записи TAFFmat (файл .HDR)
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Метка набора данных (`DATASET`)
    pub dataset: String,
    /// Базовое имя записи (без расширения), задаётся вызывающим
    pub base_name: String,
    /// Версия формата заголовка
    pub file_version: u32,
    /// Начало записи (локальное время регистратора, без часового пояса)
    pub start_time: NaiveDateTime,
    /// Окончание записи
    pub stop_time: NaiveDateTime,
    /// Частота дискретизации на канал, Гц
    pub rate: u32,
    /// Количество каналов
    pub num_series: usize,
    /// Количество выборок на канал
    pub num_samples: u64,
    /// Порядок хранения каналов
    pub storage_mode: StorageLayout,
    /// Время первой выборки относительно триггера, с
    pub x_offset: f64,
    /// Заметка оператора
    pub memo: String,
    /// Модель регистратора
    pub device: DeviceKind,
    /// Кодировка отсчётов
    pub file_type: FileEncoding,
    /// Каналы в порядке номеров, `channels.len() == num_series`
    pub channels: Vec<Channel>,
    /// Необязательные поля заголовка
    pub details: RecordingDetails,
}

/// Описание одного канала (серии)
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Имя канала, например `LX-10_DC100K`
    pub name: String,
    /// Номер канала, начиная с 1
    pub number: usize,
    /// Единицы измерения (`VERT_UNITS`)
    pub units: String,
    /// Коэффициент калибровки
    pub slope: f64,
    /// Смещение калибровки
    pub y_offset: f64,
    /// Входной усилитель
    pub amp: AmpKind,
    /// Диапазон входа
    pub range: InputRange,
    /// Фильтр включён
    pub filter: bool,
}

/// Поля заголовка, которые регистраторы пишут не всегда.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingDetails {
    pub comment: String,
    pub horz_units: String,
    /// Метки серий из `SERIES`
    pub series: Vec<String>,
    /// Платы усилителей в слотах (`SLOT1_AMP`, `SLOT2_AMP`)
    pub amps: Vec<SlotAmp>,
    pub id_no: Option<u32>,
    /// Носитель записи, например `PCCARD` или `MO`
    pub rec_mode: Option<String>,
    pub start_trigger: Option<TriggerCondition>,
    pub stop_condition: Option<TriggerCondition>,
    /// Индексы выборок, отмеченных оператором
    pub marks: Vec<u64>,
    pub memo_lengths: Vec<u32>,
    /// Версии компонентов регистратора (`LX10_VERSION` и т.п.)
    pub device_version: Vec<String>,
    pub voice_memo: Option<VoiceMemo>,
}

/// Плата усилителя в одном из слотов регистратора
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAmp {
    /// Номер слота (1 или 2)
    pub slot: u8,
    /// Тип платы, например `AD_AMP`
    pub name: String,
    /// Число каналов платы
    pub num_channels: u32,
    pub pld_version: String,
    pub firmware_version: String,
}

/// Условие запуска или остановки записи, например `COMMAND,PRE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCondition {
    pub kind: TriggerKind,
    /// Уточнение после запятой (`PRE`, `POST`)
    pub qualifier: Option<String>,
}

/// Голосовая заметка, записанная вместе с данными
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceMemo {
    pub bits: u8,
    /// Длина в байтах
    pub length: u64,
}

impl Header {
    /// Разрядность АЦП
    pub fn bit_resolution(&self) -> u32 {
        self.file_type.bit_resolution()
    }

    /// Размер одного отсчёта, байт
    pub fn byte_width(&self) -> usize {
        self.file_type.byte_width()
    }

    /// Размер кадра (одна выборка всех каналов), байт
    pub fn frame_size(&self) -> usize {
        self.num_series * self.byte_width()
    }

    /// Ожидаемый размер файла .DAT, байт.
    ///
    /// `None`, если размер не помещается в `u64` (например, `NUM_SAMPS`
    /// близко к `u64::MAX`).
    pub fn data_size(&self) -> Option<u64> {
        (self.num_series as u64)
            .checked_mul(self.byte_width() as u64)?
            .checked_mul(self.num_samples)
    }

    /// Длительность записи по числу выборок, с
    pub fn duration_secs(&self) -> f64 {
        self.num_samples as f64 / self.rate as f64
    }

    /// Время выборки `index` относительно триггера, с
    pub fn sample_time(
        &self,
        index: u64,
    ) -> f64 {
        self.x_offset + index as f64 / self.rate as f64
    }

    /// Канал по номеру (с 1).
    pub fn channel(
        &self,
        number: usize,
    ) -> Option<&Channel> {
        number
            .checked_sub(1)
            .and_then(|i| self.channels.get(i))
    }
}

impl Channel {
    /// Переводит отсчёт АЦП в инженерные единицы: `slope × count + y_offset`.
    pub fn calibrate(
        &self,
        count: i32,
    ) -> f64 {
        self.slope * count as f64 + self.y_offset
    }
}

impl std::fmt::Display for TriggerCondition {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{},{q}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
