//! Отсчёты файла .DAT.
//!
//! Знаковые little-endian целые шириной `FileEncoding::byte_width()`,
//! каналы чередуются внутри каждой выборки (кадра).

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use taffmat_types::{FileEncoding, Header, TaffmatError, TaffmatResult};

use crate::reader::{open_sibling, sibling_path, DATA_EXT};

/// Потоковый читатель кадров .DAT.
pub struct DatReader<R: Read> {
    reader: BufReader<R>,
    encoding: FileEncoding,
    num_series: usize,
    num_samples: u64,
    frames_read: u64,
    done: bool,
}

/// Потоковый писатель кадров .DAT.
pub struct DatWriter<W: Write> {
    writer: BufWriter<W>,
    encoding: FileEncoding,
    num_series: usize,
    frames_written: u64,
}

impl<R: Read> DatReader<R> {
    /// Создаёт читатель по параметрам заголовка.
    pub fn new(
        inner: R,
        header: &Header,
    ) -> Self {
        Self {
            reader: BufReader::new(inner),
            encoding: header.file_type,
            num_series: header.num_series,
            num_samples: header.num_samples,
            frames_read: 0,
            done: false,
        }
    }

    /// Возвращает следующий кадр (по отсчёту на канал) или `None` после
    /// `num_samples` кадров.
    pub fn next_frame(&mut self) -> Option<TaffmatResult<Vec<i32>>> {
        if self.done || self.frames_read >= self.num_samples {
            return None;
        }

        let mut frame = Vec::with_capacity(self.num_series);
        for _ in 0..self.num_series {
            let count = match self.encoding {
                FileEncoding::Integer => self.reader.read_i16::<LittleEndian>().map(i32::from),
                FileEncoding::Long => self.reader.read_i32::<LittleEndian>(),
            };

            match count {
                Ok(v) => frame.push(v),
                Err(e) => {
                    self.done = true;
                    if e.kind() == io::ErrorKind::UnexpectedEof {
                        return Some(Err(TaffmatError::DataTruncated {
                            expected: self.num_samples,
                            found: self.frames_read,
                        }));
                    }
                    return Some(Err(e.into()));
                }
            }
        }

        self.frames_read += 1;
        Some(Ok(frame))
    }

    /// Количество прочитанных кадров.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: Read> Iterator for DatReader<R> {
    type Item = TaffmatResult<Vec<i32>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}

/// Открывает `<base>.DAT` записи и проверяет его размер по заголовку.
pub fn open_data(header: &Header) -> TaffmatResult<DatReader<File>> {
    let expected = header
        .data_size()
        .ok_or_else(|| TaffmatError::malformed("num_samps", "data size overflows u64"))?;

    let (file, path) = open_sibling(Path::new(&header.base_name), DATA_EXT)?;

    let found = file.metadata()?.len();
    if found != expected {
        return Err(TaffmatError::DataSizeMismatch { expected, found });
    }

    debug!(
        "Opened {:?}: {} frames × {} bytes",
        path,
        header.num_samples,
        header.frame_size()
    );

    Ok(DatReader::new(file, header))
}

/// Читает все кадры.
pub fn read_all_frames<R: Read>(reader: &mut DatReader<R>) -> TaffmatResult<Vec<Vec<i32>>> {
    let mut frames = Vec::new();
    while let Some(frame) = reader.next_frame() {
        frames.push(frame?);
    }
    Ok(frames)
}

/// Читает оставшиеся кадры и раскладывает их по каналам в инженерных
/// единицах: `result[ch][sample]`.
pub fn read_calibrated<R: Read>(
    reader: &mut DatReader<R>,
    header: &Header,
) -> TaffmatResult<Vec<Vec<f64>>> {
    let mut series = vec![Vec::new(); header.channels.len()];

    while let Some(frame) = reader.next_frame() {
        for ((out, ch), count) in series.iter_mut().zip(&header.channels).zip(frame?) {
            out.push(ch.calibrate(count));
        }
    }

    Ok(series)
}

impl<W: Write> DatWriter<W> {
    pub fn new(
        inner: W,
        header: &Header,
    ) -> Self {
        Self {
            writer: BufWriter::new(inner),
            encoding: header.file_type,
            num_series: header.num_series,
            frames_written: 0,
        }
    }

    /// Записывает один кадр: ровно `num_series` отсчётов в пределах
    /// разрядности АЦП.
    pub fn write_frame(
        &mut self,
        frame: &[i32],
    ) -> TaffmatResult<()> {
        if frame.len() != self.num_series {
            return Err(TaffmatError::CardinalityMismatch {
                key: "frame".to_string(),
                got: frame.len(),
                expected: self.num_series,
            });
        }

        let (min, max) = (self.encoding.min_count(), self.encoding.max_count());
        if let Some(&value) = frame.iter().find(|&&v| v < min || v > max) {
            return Err(TaffmatError::SampleOutOfRange {
                value,
                bits: self.encoding.bit_resolution(),
            });
        }

        for &v in frame {
            match self.encoding {
                // диапазон проверен выше
                FileEncoding::Integer => self.writer.write_i16::<LittleEndian>(v as i16)?,
                FileEncoding::Long => self.writer.write_i32::<LittleEndian>(v)?,
            }
        }

        self.frames_written += 1;
        Ok(())
    }

    /// Количество записанных кадров.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Сбрасывает буфер и возвращает число записанных кадров.
    pub fn finish(mut self) -> TaffmatResult<u64> {
        self.writer.flush()?;
        Ok(self.frames_written)
    }
}

/// Создаёт `<base>.DAT` для записи.
pub fn create_data(header: &Header) -> TaffmatResult<DatWriter<File>> {
    let path = sibling_path(Path::new(&header.base_name), DATA_EXT);
    let file = File::create(&path)?;
    debug!("Created {:?}", path);
    Ok(DatWriter::new(file, header))
}
