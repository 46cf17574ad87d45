//! Библиотека чтения и записи формата TAFFmat
//!
//! TAFFmat (TEAC Data Acquisition File Format): формат регистраторов TEAC
//! серии LX. Запись состоит из двух файлов с общим базовым именем: текстового
//! заголовка `.HDR` и двоичных отсчётов `.DAT`.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use taffmat_core::{open_data, read_calibrated, read_header};
//!
//! let header = read_header("UTEST001.HDR")?;
//! println!("{} каналов, {} Гц", header.num_series, header.rate);
//!
//! let mut reader = open_data(&header)?;
//! let series = read_calibrated(&mut reader, &header)?;
//! println!("CH1[0] = {} {}", series[0][0], header.channels[0].units);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data;
pub mod fields;
pub mod header;
pub mod lexer;
pub mod reader;
pub mod writer;

pub use data::*;
pub use header::*;
pub use lexer::*;
pub use reader::*;
pub use writer::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
