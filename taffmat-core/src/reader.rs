//! Публичный фасад чтения заголовка.

use std::{
    ffi::OsString,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use taffmat_types::{Header, TaffmatError, TaffmatResult};

use crate::{header::assemble_header, lexer::HeaderFields};

/// Расширение файла заголовка
pub const HEADER_EXT: &str = "HDR";

/// Расширение файла данных
pub const DATA_EXT: &str = "DAT";

/// Разбирает заголовок из байтов. Чистая функция: ввода/вывода нет.
pub fn parse_header(
    bytes: &[u8],
    base_name: &str,
) -> TaffmatResult<Header> {
    assemble_header(&HeaderFields::lex(bytes), base_name)
}

/// Читает `<base>.HDR` и разбирает его.
///
/// Принимает базовое имя без расширения или путь с `.HDR` (регистр не
/// важен). Для любого другого расширения `BadExtension`.
pub fn read_header<P: AsRef<Path>>(path: P) -> TaffmatResult<Header> {
    let base = resolve_base(path.as_ref())?;
    let (mut file, hdr_path) = open_sibling(&base, HEADER_EXT)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    debug!("Read {} bytes from {:?}", bytes.len(), hdr_path);

    parse_header(&bytes, &base.to_string_lossy())
}

/// Отбрасывает расширение `.HDR` (в любом регистре).
pub fn resolve_base(path: &Path) -> TaffmatResult<PathBuf> {
    match path.extension() {
        None => Ok(path.to_path_buf()),
        Some(ext) if ext.is_empty() || ext.eq_ignore_ascii_case(HEADER_EXT) => {
            Ok(path.with_extension(""))
        }
        Some(ext) => Err(TaffmatError::BadExtension(ext.to_string_lossy().into_owned())),
    }
}

/// `<base>.<ext>` без замены точек внутри базового имени.
pub fn sibling_path(
    base: &Path,
    ext: &str,
) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Открывает `<base>.<EXT>`, а если его нет, то `<base>.<ext>` в нижнем
/// регистре.
pub(crate) fn open_sibling(
    base: &Path,
    ext: &str,
) -> TaffmatResult<(File, PathBuf)> {
    let upper = sibling_path(base, &ext.to_uppercase());
    match File::open(&upper) {
        Ok(f) => Ok((f, upper)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let lower = sibling_path(base, &ext.to_lowercase());
            let f = File::open(&lower).map_err(|le| {
                // нет ни одного варианта: сообщаем про канонический
                if le.kind() == io::ErrorKind::NotFound {
                    e
                } else {
                    le
                }
            })?;
            warn!("{:?} not found, using {:?}", upper, lower);
            Ok((f, lower))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base() {
        assert_eq!(resolve_base(Path::new("rec/UTEST001")).unwrap(), Path::new("rec/UTEST001"));
        assert_eq!(
            resolve_base(Path::new("rec/UTEST001.HDR")).unwrap(),
            Path::new("rec/UTEST001")
        );
        assert_eq!(
            resolve_base(Path::new("rec/UTEST001.hdr")).unwrap(),
            Path::new("rec/UTEST001")
        );
        assert_eq!(
            resolve_base(Path::new("rec/UTEST001.Hdr")).unwrap(),
            Path::new("rec/UTEST001")
        );
    }

    #[test]
    fn test_resolve_base_bad_extension() {
        let err = resolve_base(Path::new("rec/UTEST001.DAT")).unwrap_err();
        assert!(matches!(err, TaffmatError::BadExtension(ref e) if e == "DAT"));

        assert!(resolve_base(Path::new("UTEST001.txt")).is_err());
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(sibling_path(Path::new("a/b"), "HDR"), Path::new("a/b.HDR"));
        assert_eq!(sibling_path(Path::new("a.v1/b"), "dat"), Path::new("a.v1/b.dat"));
    }

    #[test]
    fn test_read_header_missing_file_is_io() {
        let err = read_header("/nonexistent/dir/NOPE").unwrap_err();
        assert!(matches!(err, TaffmatError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
