//! Сборка [`Header`] из таблицы полей.
//!
//! Порядок декодирования фиксирован: сначала скаляры, затем векторы
//! калибровки (их длина проверяется по `num_series`), затем каналы.

use log::debug;
use taffmat_types::{
    Channel, DeviceKind, FileEncoding, Header, RecordingDetails, StorageLayout, TaffmatError,
    TaffmatResult, Taxonomy, TAFFMAT_VERSION,
};

use crate::{
    fields::{
        decode_channel, decode_enum, decode_float, decode_float_vec, decode_int, decode_int_vec,
        decode_slot_amp, decode_str_vec, decode_time_pair, decode_trigger, decode_voice_memo,
    },
    lexer::HeaderFields,
};

/// Ключ дескриптора канала `i` (с 1), например `ch3_3`.
pub fn channel_key(index: usize) -> String {
    format!("ch{index}_{index}")
}

/// Собирает заголовок из уже разобранных строк.
pub fn assemble_header(
    fields: &HeaderFields,
    base_name: &str,
) -> TaffmatResult<Header> {
    let dataset = fields.get("dataset").unwrap_or_default().to_string();
    let memo = fields.get("memo").unwrap_or_default().to_string();

    // любое целое, отличное от 1 (в том числе отрицательное), не поддерживается
    let found: i64 = decode_int("version", fields.require("version")?)?;
    if found != i64::from(TAFFMAT_VERSION) {
        return Err(TaffmatError::VersionUnsupported {
            found,
            expected: TAFFMAT_VERSION,
        });
    }
    let file_version = TAFFMAT_VERSION;

    let storage_mode: StorageLayout =
        decode_enum("storage_mode", fields.require("storage_mode")?)?;

    let rate: u32 = decode_int("rate", fields.require("rate")?)?;
    if rate == 0 {
        return Err(TaffmatError::malformed("rate", "must be positive"));
    }

    let num_series: usize = decode_int("num_series", fields.require("num_series")?)?;
    if num_series == 0 {
        return Err(TaffmatError::malformed("num_series", "must be positive"));
    }

    let num_samples: u64 = decode_int("num_samps", fields.require("num_samps")?)?;

    let file_type: FileEncoding = decode_enum("file_type", fields.require("file_type")?)?;
    let device: DeviceKind = decode_enum("device", fields.require("device")?)?;

    let (start_time, stop_time) = decode_time_pair("time", fields.require("time")?)?;

    let x_offset = decode_float("x_offset", fields.require("x_offset")?)?;

    let slopes = decode_column("slope", fields.require("slope")?, num_series)?;
    let y_offsets = decode_column("y_offset", fields.require("y_offset")?, num_series)?;
    let units = match fields.get("vert_units") {
        Some(raw) => decode_units(raw, num_series)?,
        None => vec![String::new(); num_series],
    };

    let mut channels = Vec::with_capacity(num_series);
    for i in 1..=num_series {
        let key = channel_key(i);
        let raw = fields
            .get(&key)
            .ok_or(TaffmatError::ChannelMissing { index: i })?;
        let desc = decode_channel(&key, raw)?;

        channels.push(Channel {
            name: desc.name,
            number: i,
            units: units[i - 1].clone(),
            slope: slopes[i - 1],
            y_offset: y_offsets[i - 1],
            amp: desc.amp,
            range: desc.range,
            filter: desc.filter,
        });
    }

    let details = decode_details(fields, device)?;

    debug!(
        "Parsed header '{dataset}': {device}, {num_series} ch × {num_samples} samples @ {rate} Hz, {}",
        file_type.description()
    );

    Ok(Header {
        dataset,
        base_name: base_name.to_string(),
        file_version,
        start_time,
        stop_time,
        rate,
        num_series,
        num_samples,
        storage_mode,
        x_offset,
        memo,
        device,
        file_type,
        channels,
        details,
    })
}

/// Числовой столбец каналов; длина должна совпадать с `num_series`.
fn decode_column(
    key: &str,
    raw: &str,
    num_series: usize,
) -> TaffmatResult<Vec<f64>> {
    let values = decode_float_vec(key, raw)?;
    check_cardinality(key, values.len(), num_series)?;
    Ok(values)
}

fn decode_units(
    raw: &str,
    num_series: usize,
) -> TaffmatResult<Vec<String>> {
    let units = decode_str_vec(raw);
    check_cardinality("vert_units", units.len(), num_series)?;

    // единица измерения занимает один токен; пробел внутри означает склеенную строку
    if let Some(bad) = units.iter().find(|u| u.contains(char::is_whitespace)) {
        return Err(TaffmatError::malformed(
            "vert_units",
            format!("unit '{bad}' contains whitespace"),
        ));
    }

    Ok(units)
}

fn check_cardinality(
    key: &str,
    got: usize,
    expected: usize,
) -> TaffmatResult<()> {
    if got != expected {
        return Err(TaffmatError::CardinalityMismatch {
            key: key.to_string(),
            got,
            expected,
        });
    }
    Ok(())
}

/// Необязательные ключи. Отсутствующий ключ даёт значение по умолчанию,
/// некорректный приводит к ошибке.
fn decode_details(
    fields: &HeaderFields,
    device: DeviceKind,
) -> TaffmatResult<RecordingDetails> {
    let mut details = RecordingDetails {
        comment: fields.get("comment").unwrap_or_default().to_string(),
        horz_units: fields.get("horz_units").unwrap_or_default().to_string(),
        series: fields.get("series").map(decode_str_vec).unwrap_or_default(),
        rec_mode: fields
            .get("rec_mode")
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        device_version: fields
            .get(&device.version_key())
            .map(decode_str_vec)
            .unwrap_or_default(),
        ..RecordingDetails::default()
    };

    for slot in 1..=2u8 {
        let key = format!("slot{slot}_amp");
        if let Some(raw) = fields.get(&key) {
            details.amps.push(decode_slot_amp(&key, raw, slot)?);
        }
    }

    if let Some(raw) = fields.get("id_no") {
        details.id_no = Some(decode_int("id_no", raw)?);
    }
    if let Some(raw) = fields.get("start_trigger") {
        details.start_trigger = Some(decode_trigger("start_trigger", raw)?);
    }
    if let Some(raw) = fields.get("stop_condition") {
        details.stop_condition = Some(decode_trigger("stop_condition", raw)?);
    }
    if let Some(raw) = fields.get("mark") {
        details.marks = decode_int_vec("mark", raw)?;
    }
    if let Some(raw) = fields.get("memo_length") {
        details.memo_lengths = decode_int_vec("memo_length", raw)?;
    }
    if let Some(raw) = fields.get("voice_memo") {
        details.voice_memo = Some(decode_voice_memo("voice_memo", raw)?);
    }

    Ok(details)
}

#[cfg(test)]
mod tests {
    use taffmat_types::{InputRange, TriggerKind};

    use super::*;

    const MINIMAL: &str = "DATASET T1
VERSION 1
RATE 1000
NUM_SERIES 2
NUM_SAMPS 10
STORAGE_MODE INTERLACED
FILE_TYPE LONG
DEVICE LX-120
TIME 20200101000000,20200101000010
X_OFFSET 0
SLOPE 1,2
Y_OFFSET 0,0
CH1_1 LX-120_DC100K,RANGE=2V
CH2_2 LX-120_DC100K,RANGE=5V,FILTER=OFF
";

    fn assemble(text: &str) -> TaffmatResult<Header> {
        assemble_header(&HeaderFields::lex(text.as_bytes()), "T1")
    }

    fn without(key: &str) -> String {
        MINIMAL
            .lines()
            .filter(|l| !l.starts_with(key))
            .map(|l| format!("{l}\n"))
            .collect()
    }

    #[test]
    fn test_minimal_header() {
        let h = assemble(MINIMAL).unwrap();

        assert_eq!(h.base_name, "T1");
        assert_eq!(h.device, DeviceKind::Lx120);
        assert_eq!(h.file_type, FileEncoding::Long);
        assert_eq!(h.channels.len(), 2);
        assert_eq!(h.channels[1].range, InputRange::V5);
        assert_eq!(h.channels[0].units, "", "VERT_UNITS отсутствует");
        assert_eq!(h.memo, "");
        assert_eq!(h.details, RecordingDetails::default());
    }

    #[test]
    fn test_missing_required_keys() {
        for key in [
            "VERSION",
            "RATE",
            "NUM_SERIES",
            "NUM_SAMPS",
            "STORAGE_MODE",
            "FILE_TYPE",
            "DEVICE",
            "TIME",
            "X_OFFSET",
            "SLOPE",
            "Y_OFFSET",
        ] {
            let err = assemble(&without(key)).unwrap_err();
            assert!(
                matches!(err, TaffmatError::MissingField { key: ref k } if *k == key.to_lowercase()),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn test_missing_dataset_is_empty() {
        let h = assemble(&without("DATASET")).unwrap();
        assert_eq!(h.dataset, "");
    }

    #[test]
    fn test_missing_channel() {
        let err = assemble(&without("CH2_2")).unwrap_err();
        assert!(matches!(err, TaffmatError::ChannelMissing { index: 2 }));
    }

    #[test]
    fn test_zero_rate_and_series_rejected() {
        let err = assemble(&MINIMAL.replace("RATE 1000", "RATE 0")).unwrap_err();
        assert!(err.to_string().contains("rate"));

        let err = assemble(&MINIMAL.replace("NUM_SERIES 2", "NUM_SERIES 0")).unwrap_err();
        assert!(err.to_string().contains("num_series"));
    }

    #[test]
    fn test_negative_and_wide_versions_unsupported() {
        for v in ["-1", "0", "4294967297"] {
            let err = assemble(&MINIMAL.replace("VERSION 1", &format!("VERSION {v}"))).unwrap_err();
            assert!(
                matches!(err, TaffmatError::VersionUnsupported { found, expected: 1 } if found.to_string() == v),
                "{v}: {err}"
            );
        }
    }

    #[test]
    fn test_huge_num_samps_parses() {
        let h = assemble(&MINIMAL.replace("NUM_SAMPS 10", &format!("NUM_SAMPS {}", u64::MAX)))
            .unwrap();
        assert_eq!(h.num_samples, u64::MAX);
        assert_eq!(h.data_size(), None);
    }

    #[test]
    fn test_unknown_storage_mode() {
        let err = assemble(&MINIMAL.replace("INTERLACED", "BLOCKED")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("storage_mode"));
        assert!(msg.contains("BLOCKED"));
    }

    #[test]
    fn test_y_offset_cardinality() {
        let err = assemble(&MINIMAL.replace("Y_OFFSET 0,0", "Y_OFFSET 0,0,0")).unwrap_err();
        assert!(matches!(
            err,
            TaffmatError::CardinalityMismatch { ref key, got: 3, expected: 2 } if key == "y_offset"
        ));
    }

    #[test]
    fn test_vert_units() {
        let h = assemble(&format!("{MINIMAL}VERT_UNITS V,mV\n")).unwrap();
        assert_eq!(h.channels[0].units, "V");
        assert_eq!(h.channels[1].units, "mV");

        let err = assemble(&format!("{MINIMAL}VERT_UNITS V\n")).unwrap_err();
        assert!(matches!(err, TaffmatError::CardinalityMismatch { .. }));

        // склеенная строка VERT_UNITS ... HORZ_UNITS Sec
        let err = assemble(&format!("{MINIMAL}VERT_UNITS V,V HORZ_UNITS Sec\n")).unwrap_err();
        assert!(err.to_string().contains("vert_units"));
    }

    #[test]
    fn test_details_decoded() {
        let text = format!(
            "{MINIMAL}SLOT2_AMP DA_AMP,8,V02.19  ,\nID_NO 7\nREC_MODE MO\n\
             START_TRIGGER LEVEL\nSTOP_CONDITION COMMAND,POST\nMARK 100,200,300\n\
             LX120_VERSION V0.03,02200000\nVOICE_MEMO 8BITS,327680\nSERIES CH1_A, CH2_B\n"
        );
        let h = assemble(&text).unwrap();
        let d = &h.details;

        assert_eq!(d.amps.len(), 1);
        assert_eq!(d.amps[0].slot, 2);
        assert_eq!(d.id_no, Some(7));
        assert_eq!(d.rec_mode.as_deref(), Some("MO"));
        assert_eq!(d.start_trigger.as_ref().map(|t| t.kind), Some(TriggerKind::Level));
        assert_eq!(
            d.stop_condition.as_ref().and_then(|t| t.qualifier.as_deref()),
            Some("POST")
        );
        assert_eq!(d.marks, vec![100, 200, 300]);
        assert_eq!(d.device_version, vec!["V0.03", "02200000"]);
        assert_eq!(d.voice_memo.map(|m| m.length), Some(327_680));
        assert_eq!(d.series, vec!["CH1_A", "CH2_B"]);
    }

    #[test]
    fn test_other_device_version_ignored() {
        let h = assemble(&format!("{MINIMAL}LX10_VERSION V1\n")).unwrap();
        assert!(h.details.device_version.is_empty());
    }

    #[test]
    fn test_malformed_optional_key_fails() {
        let err = assemble(&format!("{MINIMAL}ID_NO one\n")).unwrap_err();
        assert!(err.to_string().contains("id_no"));

        let err = assemble(&format!("{MINIMAL}START_TRIGGER BUTTON\n")).unwrap_err();
        assert!(err.to_string().contains("BUTTON"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let h = assemble(&format!("{MINIMAL}START_PRE_COUNT 7500\nFOO\n")).unwrap();
        assert_eq!(h.num_series, 2);
    }

    #[test]
    fn test_channel_key() {
        assert_eq!(channel_key(1), "ch1_1");
        assert_eq!(channel_key(12), "ch12_12");
    }
}
