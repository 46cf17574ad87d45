use log::{debug, info};
use taffmat_core::{open_data, read_header};

use crate::{CliResult, HeaderReport, InfoConfig, OutputFormat};

/// Читает запись по конфигурации и возвращает готовый к выводу отчёт.
pub fn inspect(config: &InfoConfig) -> CliResult<String> {
    let header = read_header(&config.path)?;
    info!(
        "{}: {} channels, {} samples",
        header.dataset, header.num_series, header.num_samples
    );

    let mut report = HeaderReport::from_header(&header);

    if config.wants_samples() {
        let reader = open_data(&header)?;
        for (index, frame) in (0u64..).zip(reader.take(config.samples as usize)) {
            report.push_frame(&header, index, &frame?);
        }
        debug!("Collected {} frames", report.samples.len());
    }

    match config.format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => Ok(report.to_json()?),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;

    use taffmat_types::TaffmatError;

    use super::*;
    use crate::CliError;

    const HDR: &str = "DATASET CLI0001
VERSION 1
RATE 100
NUM_SERIES 1
NUM_SAMPS 3
STORAGE_MODE INTERLACED
FILE_TYPE INTEGER
DEVICE LX-20
TIME 20200101000000,20200101000003
X_OFFSET 0
SLOPE 0.5
Y_OFFSET 0
CH1_1 LX-20_DC100K,RANGE=2V,FILTER=OFF
";

    fn write_recording(dir: &std::path::Path) -> std::path::PathBuf {
        let base = dir.join("CLI0001");
        fs::write(dir.join("CLI0001.HDR"), HDR).unwrap();
        let data: Vec<u8> = [2i16, 4, 6].iter().flat_map(|v| v.to_le_bytes()).collect();
        fs::write(dir.join("CLI0001.DAT"), data).unwrap();
        base
    }

    #[test]
    fn test_inspect_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = InfoConfig {
            path: write_recording(dir.path()),
            ..InfoConfig::default()
        };

        let out = inspect(&config).unwrap();
        assert!(out.contains("CLI0001"));
        assert!(out.contains("LX-20"));
    }

    #[test]
    fn test_inspect_json_with_samples() {
        let dir = tempfile::tempdir().unwrap();
        let config = InfoConfig {
            path: write_recording(dir.path()),
            format: OutputFormat::Json,
            samples: 10,
        };

        let out = inspect(&config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        // запрошено больше кадров, чем есть в записи
        let samples = json["samples"].as_array().unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2]["values"][0], 3.0);
    }

    #[test]
    fn test_inspect_missing_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_recording(dir.path());
        fs::remove_file(dir.path().join("CLI0001.DAT")).unwrap();

        let config = InfoConfig {
            path: base,
            samples: 1,
            ..InfoConfig::default()
        };
        let err = inspect(&config).unwrap_err();
        assert!(matches!(err, CliError::Taffmat(TaffmatError::Io(_))));
    }
}
