//! Пример: запись синтетической записи TAFFmat
//!
//! Создаёт пару `REC0001.HDR` / `REC0001.DAT` с двумя каналами
//! (синус и пила), которую затем читает пример `read_header`.

use chrono::NaiveDate;
use taffmat_core::{create_data, write_header_file};
use taffmat_types::{
    AmpKind, Channel, DeviceKind, FileEncoding, Header, InputRange, RecordingDetails,
    StorageLayout, TAFFMAT_VERSION,
};

const RATE: u32 = 10_000;
const NUM_SAMPLES: u64 = 20_000;

fn channel(
    number: usize,
    range: InputRange,
) -> Channel {
    Channel {
        name: "LX-110_DC100K".to_string(),
        number,
        units: "V".to_string(),
        // полная шкала INTEGER: 32768 отсчётов
        slope: range.volts() / 32_768.0,
        y_offset: 0.0,
        amp: AmpKind::Dc100k,
        range,
        filter: false,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = "taffmat-core/REC0001";

    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or("invalid start time")?;
    let stop = start + chrono::Duration::seconds((NUM_SAMPLES / RATE as u64) as i64);

    let header = Header {
        dataset: "REC0001".to_string(),
        base_name: base.to_string(),
        file_version: TAFFMAT_VERSION,
        start_time: start,
        stop_time: stop,
        rate: RATE,
        num_series: 2,
        num_samples: NUM_SAMPLES,
        storage_mode: StorageLayout::Interlaced,
        x_offset: 0.0,
        memo: "synthetic recording".to_string(),
        device: DeviceKind::Lx110,
        file_type: FileEncoding::Integer,
        channels: vec![channel(1, InputRange::V2), channel(2, InputRange::V5)],
        details: RecordingDetails {
            horz_units: "Sec".to_string(),
            series: vec!["CH1_LX-110_DC100K".to_string(), "CH2_LX-110_DC100K".to_string()],
            ..RecordingDetails::default()
        },
    };

    // --- Отсчёты ---
    let mut writer = create_data(&header)?;
    for i in 0..NUM_SAMPLES {
        let t = i as f64 / RATE as f64;
        let sine = (2.0 * std::f64::consts::PI * 50.0 * t).sin() * 16_000.0;
        let saw = (i % 1000) as i32 * 32 - 16_000;
        writer.write_frame(&[sine as i32, saw])?;
    }
    let frames = writer.finish()?;

    // --- Заголовок ---
    let hdr_path = write_header_file(base, &header)?;

    println!("✓ Wrote {frames} frames");
    println!("  Header : {:?}", hdr_path);
    println!("  Size   : {:?} bytes", header.data_size());

    Ok(())
}
