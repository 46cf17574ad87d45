//! Синтетические записи для бенчмарков.

use taffmat_core::DatWriter;
use taffmat_types::{Header, TaffmatResult};

/// Текст заголовка LX-120 с `n` каналами формата LONG.
pub fn make_header_text(
    n: usize,
    num_samples: u64,
) -> String {
    let column = |v: &str| vec![v; n].join(",");
    let mut s = format!(
        "DATASET BENCH001\nVERSION 1\nTIME 20240301120000,20240301120100\nRATE 10000\n\
         VERT_UNITS {}\nNUM_SERIES {n}\nSTORAGE_MODE INTERLACED\nFILE_TYPE LONG\n\
         SLOPE {}\nX_OFFSET 0.0\nY_OFFSET {}\nNUM_SAMPS {num_samples}\nDEVICE LX-120\n",
        column("V"),
        column("8.000000e-005"),
        column("0.000000e+000"),
    );
    for i in 1..=n {
        s.push_str(&format!("CH{i}_{i} LX-120_DC100K,RANGE=5V,FILTER=OFF\n"));
    }
    s.push_str("MEMO benchmark\n");
    s
}

/// Содержимое .DAT: `num_samples` кадров пилообразного сигнала.
pub fn make_data(header: &Header) -> TaffmatResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(header.data_size().unwrap_or(0) as usize);
    let mut writer = DatWriter::new(&mut buf, header);
    for i in 0..header.num_samples {
        let frame: Vec<i32> = (0..header.num_series as i64)
            .map(|ch| ((i as i64 * 37 + ch * 1000) % 200_000 - 100_000) as i32)
            .collect();
        writer.write_frame(&frame)?;
    }
    writer.finish()?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use taffmat_core::parse_header;

    use super::*;

    #[test]
    fn test_fixture_is_consistent() {
        let h = parse_header(make_header_text(4, 10).as_bytes(), "BENCH001").unwrap();
        assert_eq!(h.channels.len(), 4);
        assert_eq!(Some(make_data(&h).unwrap().len() as u64), h.data_size());
    }
}
