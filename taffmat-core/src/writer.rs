//! Запись заголовка .HDR.
//!
//! Ключи выводятся в том порядке, в котором их пишут регистраторы LX.
//! Столбцы `SLOPE`, `Y_OFFSET`, `VERT_UNITS` собираются из каналов.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use taffmat_types::{Channel, Header, TaffmatError, TaffmatResult};

use crate::{
    header::channel_key,
    reader::{resolve_base, sibling_path, HEADER_EXT},
};

/// Формирует текст заголовка.
///
/// Строка `TIME` с часами пишется раньше пары начало/конец, поэтому при
/// разборе (последнее вхождение побеждает) восстанавливается пара.
pub fn write_header(header: &Header) -> TaffmatResult<String> {
    if header.channels.len() != header.num_series {
        return Err(TaffmatError::CardinalityMismatch {
            key: "channels".to_string(),
            got: header.channels.len(),
            expected: header.num_series,
        });
    }

    let d = &header.details;
    let mut out = String::new();

    push_line(&mut out, "DATASET", &header.dataset);
    push_line(&mut out, "VERSION", &header.file_version.to_string());
    if !d.series.is_empty() {
        push_line(&mut out, "SERIES", &d.series.join(","));
    }
    push_line(&mut out, "DATE", &header.start_time.format("%m-%d-%Y").to_string());
    push_line(&mut out, "TIME", &header.start_time.format("%H:%M:%S.00").to_string());
    push_line(&mut out, "RATE", &header.rate.to_string());
    if header.channels.iter().any(|c| !c.units.is_empty()) {
        push_line(&mut out, "VERT_UNITS", &join_column(header, |c| c.units.clone()));
    }
    if !d.horz_units.is_empty() {
        push_line(&mut out, "HORZ_UNITS", &d.horz_units);
    }
    if !d.comment.is_empty() {
        push_line(&mut out, "COMMENT", &d.comment);
    }
    push_line(&mut out, "NUM_SERIES", &header.num_series.to_string());
    push_line(&mut out, "STORAGE_MODE", &header.storage_mode.to_string());
    push_line(&mut out, "FILE_TYPE", &header.file_type.to_string());
    push_line(&mut out, "SLOPE", &join_column(header, |c| format_sci(c.slope)));
    push_line(&mut out, "X_OFFSET", &format_decimal(header.x_offset));
    push_line(&mut out, "Y_OFFSET", &join_column(header, |c| format_sci(c.y_offset)));
    push_line(&mut out, "NUM_SAMPS", &header.num_samples.to_string());
    push_line(&mut out, "DATA", "");
    push_line(&mut out, "DEVICE", &header.device.to_string());

    for amp in &d.amps {
        push_line(
            &mut out,
            &format!("SLOT{}_AMP", amp.slot),
            &format!(
                "{},{},{},{}",
                amp.name, amp.num_channels, amp.pld_version, amp.firmware_version
            ),
        );
    }

    for ch in &header.channels {
        push_line(
            &mut out,
            &channel_key(ch.number).to_uppercase(),
            &format!(
                "{},RANGE={},FILTER={}",
                ch.name,
                ch.range,
                if ch.filter { "ON" } else { "OFF" }
            ),
        );
    }

    if let Some(id) = d.id_no {
        push_line(&mut out, "ID_NO", &id.to_string());
    }
    push_line(
        &mut out,
        "TIME",
        &format!(
            "{},{}",
            header.start_time.format("%Y%m%d%H%M%S"),
            header.stop_time.format("%Y%m%d%H%M%S")
        ),
    );
    if let Some(mode) = &d.rec_mode {
        push_line(&mut out, "REC_MODE", mode);
    }
    if let Some(t) = &d.start_trigger {
        push_line(&mut out, "START_TRIGGER", &t.to_string());
    }
    if let Some(t) = &d.stop_condition {
        push_line(&mut out, "STOP_CONDITION", &t.to_string());
    }
    if !d.marks.is_empty() {
        push_line(&mut out, "MARK", &join(&d.marks));
    }
    push_line(&mut out, "ID_END", "");
    if let Some(vm) = d.voice_memo {
        push_line(&mut out, "VOICE_MEMO", &format!("{}BITS,{}", vm.bits, vm.length));
    }
    if !d.device_version.is_empty() {
        push_line(
            &mut out,
            &header.device.version_key().to_uppercase(),
            &d.device_version.join(","),
        );
    }
    if !d.memo_lengths.is_empty() {
        push_line(&mut out, "MEMO_LENGTH", &join(&d.memo_lengths));
    }
    push_line(&mut out, "MEMO", &header.memo);

    Ok(out)
}

/// Записывает `<base>.HDR` и возвращает путь к нему.
pub fn write_header_file<P: AsRef<Path>>(
    path: P,
    header: &Header,
) -> TaffmatResult<PathBuf> {
    let base = resolve_base(path.as_ref())?;
    let hdr_path = sibling_path(&base, HEADER_EXT);
    let text = write_header(header)?;

    fs::write(&hdr_path, text.as_bytes())?;
    debug!("Wrote {} bytes to {:?}", text.len(), hdr_path);

    Ok(hdr_path)
}

fn push_line(
    out: &mut String,
    key: &str,
    value: &str,
) {
    out.push_str(key);
    if !value.is_empty() {
        out.push(' ');
        out.push_str(value);
    }
    out.push('\n');
}

fn join_column<F>(
    header: &Header,
    f: F,
) -> String
where
    F: Fn(&Channel) -> String,
{
    header.channels.iter().map(f).collect::<Vec<_>>().join(",")
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Экспоненциальная запись регистратора: `8.000000e-005`.
///
/// Если шесть знаков мантиссы теряют точность, используется кратчайшая
/// точная запись (`1.2345678e-5`).
pub fn format_sci(v: f64) -> String {
    let s = format!("{v:.6e}");
    let recorder = match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:03}", exp.abs())
        }
        None => s,
    };

    if recorder.parse::<f64>() == Ok(v) {
        recorder
    } else {
        format!("{v:e}")
    }
}

/// Десятичная запись: `0.0`, `-5.0`, `0.25`.
pub fn format_decimal(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
