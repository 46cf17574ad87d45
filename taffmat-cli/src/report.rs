//! Отчёт о записи для вывода в терминал или JSON.

use serde::Serialize;
use taffmat_types::{Header, Taxonomy};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Снимок заголовка, пригодный для сериализации.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderReport {
    pub dataset: String,
    pub base_name: String,
    pub device: String,
    pub device_description: String,
    pub start_time: String,
    pub stop_time: String,
    pub duration_secs: f64,
    pub rate_hz: u32,
    pub num_series: usize,
    pub num_samples: u64,
    pub file_type: String,
    pub bit_resolution: u32,
    /// `None`, если размер не помещается в `u64`
    pub data_size_bytes: Option<u64>,
    pub x_offset: f64,
    pub memo: String,
    pub channels: Vec<ChannelReport>,
    /// Первые кадры .DAT в инженерных единицах
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SampleRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub number: usize,
    pub name: String,
    pub units: String,
    pub range: String,
    pub filter: bool,
    pub slope: f64,
    pub y_offset: f64,
}

/// Один кадр: время от начала и значение каждого канала.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub index: u64,
    pub time_secs: f64,
    pub values: Vec<f64>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl HeaderReport {
    pub fn from_header(h: &Header) -> Self {
        Self {
            dataset: h.dataset.clone(),
            base_name: h.base_name.clone(),
            device: h.device.to_string(),
            device_description: h.device.description().to_string(),
            start_time: h.start_time.format(TIME_FORMAT).to_string(),
            stop_time: h.stop_time.format(TIME_FORMAT).to_string(),
            duration_secs: h.duration_secs(),
            rate_hz: h.rate,
            num_series: h.num_series,
            num_samples: h.num_samples,
            file_type: h.file_type.to_string(),
            bit_resolution: h.bit_resolution(),
            data_size_bytes: h.data_size(),
            x_offset: h.x_offset,
            memo: h.memo.clone(),
            channels: h
                .channels
                .iter()
                .map(|c| ChannelReport {
                    number: c.number,
                    name: c.name.clone(),
                    units: c.units.clone(),
                    range: c.range.to_string(),
                    filter: c.filter,
                    slope: c.slope,
                    y_offset: c.y_offset,
                })
                .collect(),
            samples: Vec::new(),
        }
    }

    /// Добавляет кадр, переводя отсчёты АЦП через калибровку каналов.
    pub fn push_frame(
        &mut self,
        header: &Header,
        index: u64,
        counts: &[i32],
    ) {
        self.samples.push(SampleRow {
            index,
            time_secs: header.sample_time(index),
            values: header
                .channels
                .iter()
                .zip(counts)
                .map(|(ch, &count)| ch.calibrate(count))
                .collect(),
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для HeaderReport
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for HeaderReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Dataset       : {}", self.dataset)?;
        writeln!(f, "  Device        : {} ({})", self.device, self.device_description)?;
        writeln!(f, "  Start         : {}", self.start_time)?;
        writeln!(f, "  Stop          : {}", self.stop_time)?;
        writeln!(f, "  Rate          : {} Hz", self.rate_hz)?;
        writeln!(f, "  Samples       : {}", self.num_samples)?;
        writeln!(f, "  Duration      : {:.3}s", self.duration_secs)?;
        match self.data_size_bytes {
            Some(size) => writeln!(
                f,
                "  File type     : {} ({}-bit, {} bytes)",
                self.file_type, self.bit_resolution, size
            )?,
            None => writeln!(
                f,
                "  File type     : {} ({}-bit, size overflows)",
                self.file_type, self.bit_resolution
            )?,
        }
        writeln!(f, "  X offset      : {}", self.x_offset)?;
        if !self.memo.is_empty() {
            writeln!(f, "  Memo          : {}", self.memo)?;
        }
        writeln!(f, "  Channels      : {}", self.num_series)?;
        for c in &self.channels {
            writeln!(
                f,
                "    CH{:<3} {:<16} {:>3} filter={:<3} slope={:e} offset={:e} {}",
                c.number,
                c.name,
                c.range,
                if c.filter { "ON" } else { "OFF" },
                c.slope,
                c.y_offset,
                c.units
            )?;
        }

        if !self.samples.is_empty() {
            writeln!(f, "  First frames  :")?;
            for row in &self.samples {
                let values: Vec<String> = row.values.iter().map(|v| format!("{v:.6}")).collect();
                writeln!(
                    f,
                    "    [{}] t={:.6}s  {}",
                    row.index,
                    row.time_secs,
                    values.join("  ")
                )?;
            }
        }

        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
