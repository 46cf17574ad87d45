//! Декодеры полей заголовка.
//!
//! Каждая функция принимает ключ (для сообщения об ошибке) и сырое значение
//! и возвращает типизированное поле либо `MalformedField`.

use std::{fmt::Display, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use taffmat_types::{
    AmpKind, InputRange, SlotAmp, TaffmatError, TaffmatResult, Taxonomy, TriggerCondition,
    VoiceMemo,
};

/// Длина метки времени `YYYYMMDDhhmmss`
pub const TIMESTAMP_LEN: usize = 14;

/// Разобранный дескриптор канала `CHi_i` (без калибровки).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub name: String,
    pub amp: AmpKind,
    pub range: InputRange,
    pub filter: bool,
}

/// Целое число без лишних символов.
pub fn decode_int<T>(
    key: &str,
    raw: &str,
) -> TaffmatResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let s = raw.trim();
    // FromStr для целых принимает ведущий '+', регистратор его не пишет
    if s.starts_with('+') {
        return Err(TaffmatError::malformed(key, format!("'{s}' has a leading '+'")));
    }
    s.parse::<T>()
        .map_err(|e| TaffmatError::malformed(key, format!("'{s}' is not an integer: {e}")))
}

/// Число с плавающей точкой (десятичная или экспоненциальная запись).
pub fn decode_float(
    key: &str,
    raw: &str,
) -> TaffmatResult<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(TaffmatError::malformed(key, "empty value"));
    }

    let v: f64 = s
        .parse()
        .map_err(|e| TaffmatError::malformed(key, format!("'{s}' is not a number: {e}")))?;

    if !v.is_finite() {
        return Err(TaffmatError::malformed(key, format!("'{s}' is not finite")));
    }

    Ok(v)
}

/// Значение перечисления по таблице токенов.
pub fn decode_enum<T: Taxonomy>(
    key: &str,
    raw: &str,
) -> TaffmatResult<T> {
    let s = raw.trim();
    T::from_token(s).ok_or_else(|| {
        TaffmatError::malformed(
            key,
            format!("unknown token '{s}' (expected one of: {})", T::tokens()),
        )
    })
}

/// Вектор чисел через запятую; порядок сохраняется.
pub fn decode_float_vec(
    key: &str,
    raw: &str,
) -> TaffmatResult<Vec<f64>> {
    raw.split(',').map(|e| decode_float(key, e)).collect()
}

/// Вектор целых через запятую.
pub fn decode_int_vec<T>(
    key: &str,
    raw: &str,
) -> TaffmatResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    raw.split(',').map(|e| decode_int(key, e)).collect()
}

/// Список строк через запятую. Пустое значение даёт пустой список.
pub fn decode_str_vec(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|e| e.trim().to_string()).collect()
}

/// Метка времени `YYYYMMDDhhmmss` без часового пояса.
pub fn decode_timestamp(
    key: &str,
    raw: &str,
) -> TaffmatResult<NaiveDateTime> {
    let s = raw.trim();
    if s.len() != TIMESTAMP_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaffmatError::malformed(
            key,
            format!("'{s}' is not a YYYYMMDDhhmmss timestamp"),
        ));
    }

    // только ASCII-цифры, срезы по байтам безопасны
    let num = |r: std::ops::Range<usize>| -> u32 {
        s[r].bytes().fold(0, |acc, b| acc * 10 + (b - b'0') as u32)
    };

    NaiveDate::from_ymd_opt(num(0..4) as i32, num(4..6), num(6..8))
        .and_then(|d| d.and_hms_opt(num(8..10), num(10..12), num(12..14)))
        .ok_or_else(|| TaffmatError::malformed(key, format!("'{s}' is not a valid date/time")))
}

/// Пара `начало,конец`.
pub fn decode_time_pair(
    key: &str,
    raw: &str,
) -> TaffmatResult<(NaiveDateTime, NaiveDateTime)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(TaffmatError::malformed(
            key,
            format!("expected 2 timestamps, found {} in '{}'", parts.len(), raw.trim()),
        ));
    }

    Ok((decode_timestamp(key, parts[0])?, decode_timestamp(key, parts[1])?))
}

/// `ON` / `OFF`.
pub fn decode_switch(
    key: &str,
    raw: &str,
) -> TaffmatResult<bool> {
    match raw.trim() {
        "ON" => Ok(true),
        "OFF" => Ok(false),
        s => Err(TaffmatError::malformed(key, format!("expected ON or OFF, found '{s}'"))),
    }
}

/// Дескриптор канала `NAME(,KEY=VALUE)*`.
///
/// `RANGE` обязателен, `FILTER` по умолчанию выключен. Неизвестные фрагменты
/// пропускаются.
pub fn decode_channel(
    key: &str,
    raw: &str,
) -> TaffmatResult<ChannelDescriptor> {
    let mut parts = raw.split(',');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(TaffmatError::malformed(key, "empty channel name"));
    }

    let amp = AmpKind::from_channel_name(name).ok_or_else(|| {
        TaffmatError::malformed(
            key,
            format!(
                "no known amplifier suffix in channel name '{name}' (expected one of: {})",
                AmpKind::tokens()
            ),
        )
    })?;

    let mut range = None;
    let mut filter = false;

    for fragment in parts.map(str::trim).filter(|f| !f.is_empty()) {
        let Some((k, v)) = fragment.split_once('=') else {
            debug!("{key}: ignoring fragment '{fragment}'");
            continue;
        };

        match k.trim() {
            "RANGE" => {
                let v = v.trim();
                range = Some(InputRange::from_token(v).ok_or_else(|| {
                    TaffmatError::RangeUnknown {
                        key: key.to_string(),
                        raw: v.to_string(),
                    }
                })?);
            }
            "FILTER" => filter = decode_switch(key, v)?,
            other => debug!("{key}: ignoring fragment '{other}'"),
        }
    }

    let range = range.ok_or_else(|| TaffmatError::malformed(key, "missing RANGE fragment"))?;

    Ok(ChannelDescriptor {
        name: name.to_string(),
        amp,
        range,
        filter,
    })
}

/// Плата усилителя `NAME,NUM_CHANNELS,PLD_VERSION,FIRMWARE_VERSION`.
pub fn decode_slot_amp(
    key: &str,
    raw: &str,
    slot: u8,
) -> TaffmatResult<SlotAmp> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts[0].is_empty() {
        return Err(TaffmatError::malformed(
            key,
            format!("expected NAME,NUM_CHANNELS[,PLD,FIRMWARE], found '{}'", raw.trim()),
        ));
    }

    Ok(SlotAmp {
        slot,
        name: parts[0].to_string(),
        num_channels: decode_int(key, parts[1])?,
        pld_version: parts.get(2).copied().unwrap_or_default().to_string(),
        firmware_version: parts.get(3).copied().unwrap_or_default().to_string(),
    })
}

/// Условие триггера `KIND(,QUALIFIER)?`.
pub fn decode_trigger(
    key: &str,
    raw: &str,
) -> TaffmatResult<TriggerCondition> {
    let (kind, qualifier) = match raw.split_once(',') {
        Some((k, q)) => (k, Some(q.trim())),
        None => (raw, None),
    };

    Ok(TriggerCondition {
        kind: decode_enum(key, kind)?,
        qualifier: qualifier
            .filter(|q| !q.is_empty())
            .map(str::to_string),
    })
}

/// Голосовая заметка `<BITS>BITS,<LENGTH>`.
pub fn decode_voice_memo(
    key: &str,
    raw: &str,
) -> TaffmatResult<VoiceMemo> {
    let Some((bits, length)) = raw.split_once(',') else {
        return Err(TaffmatError::malformed(
            key,
            format!("expected <N>BITS,<LENGTH>, found '{}'", raw.trim()),
        ));
    };

    let bits = bits.trim();
    let bits = bits
        .strip_suffix("BITS")
        .ok_or_else(|| TaffmatError::malformed(key, format!("'{bits}' lacks BITS suffix")))?;

    Ok(VoiceMemo {
        bits: decode_int(key, bits)?,
        length: decode_int(key, length)?,
    })
}
