//! Пример: чтение записи TAFFmat
//!
//! Демонстрирует:
//! - разбор заголовка `.HDR` через read_header
//! - открытие `.DAT` с проверкой размера
//! - перевод первых отсчётов в инженерные единицы

use taffmat_core::{open_data, read_header};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "taffmat-core/REC0001".to_string());

    // --- Заголовок ---
    let h = match read_header(&base) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("✗ Header parse failed: {e}");
            return Err(Box::new(e));
        }
    };

    println!("✓ Header parsed");
    println!("  Dataset   : {}", h.dataset);
    println!("  Device    : {}", h.device);
    println!("  Start     : {}", h.start_time);
    println!("  Stop      : {}", h.stop_time);
    println!("  Rate      : {} Hz", h.rate);
    println!("  Channels  : {}", h.num_series);
    println!("  Samples   : {}", h.num_samples);
    println!("  File type : {} ({}-bit)", h.file_type, h.bit_resolution());
    println!("  Duration  : {:.3} s", h.duration_secs());

    for ch in &h.channels {
        println!(
            "  CH{:<2} {:<16} range={} slope={:e} offset={:e} {}",
            ch.number, ch.name, ch.range, ch.slope, ch.y_offset, ch.units
        );
    }

    // --- Данные ---
    let reader = open_data(&h)?;
    println!("\nFirst frames:");
    for (i, frame) in reader.take(3).enumerate() {
        let values: Vec<String> = frame?
            .iter()
            .zip(&h.channels)
            .map(|(&count, ch)| format!("{:.6}", ch.calibrate(count)))
            .collect();
        println!("  [{i}] t={:.6}s  {}", h.sample_time(i as u64), values.join("  "));
    }

    Ok(())
}
