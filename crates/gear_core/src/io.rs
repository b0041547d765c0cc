//! Cursor helpers shared by the codecs.
//!
//! Archives are read from and written to anything seekable, which in practice is a
//! [`std::io::Cursor`] over a buffer that is already fully resident. Writers emit
//! placeholders and come back to patch them, readers hop between sections; both
//! lean on [`TemporarySeek`] to get back to where they were.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};

use binrw::{BinReaderExt, BinWriterExt, Endian};
use tracing::trace;

use crate::error::{FormatError, Result};

/// Scoped cursor save point.
///
/// Records the stream position when created and seeks back to it when dropped, so
/// an early `?` inside the scope still leaves the caller's cursor untouched.
pub struct TemporarySeek<'a, S: Seek + ?Sized> {
    inner: &'a mut S,
    restore: u64,
}

impl<'a, S: Seek + ?Sized> TemporarySeek<'a, S> {
    /// Save the current position of `inner`
    pub fn new(inner: &'a mut S) -> io::Result<Self> {
        let restore = inner.stream_position()?;
        Ok(TemporarySeek { inner, restore })
    }

    /// The position that will be restored
    pub fn restore_position(&self) -> u64 {
        self.restore
    }
}

impl<S: Seek + ?Sized> Deref for TemporarySeek<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.inner
    }
}

impl<S: Seek + ?Sized> DerefMut for TemporarySeek<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.inner
    }
}

impl<S: Seek + ?Sized> Drop for TemporarySeek<'_, S> {
    fn drop(&mut self) {
        // errors cannot surface from drop
        let _ = self.inner.seek(SeekFrom::Start(self.restore));
    }
}

/// Positioning helpers available on every [`Seek`] stream
pub trait SeekExt: Seek {
    /// Start a [`TemporarySeek`] scope
    fn temporary_seek(&mut self) -> io::Result<TemporarySeek<'_, Self>> {
        TemporarySeek::new(self)
    }

    /// Move to an absolute position
    fn seek_to(&mut self, position: u64) -> io::Result<u64> {
        self.seek(SeekFrom::Start(position))
    }

    /// Total length of the stream, leaving the cursor where it was
    fn stream_length(&mut self) -> io::Result<u64> {
        let mut scope = self.temporary_seek()?;
        let length = scope.seek(SeekFrom::End(0))?;
        Ok(length)
    }

    /// Write zeros until the position is a multiple of `alignment`
    fn align_with_zeros(&mut self, alignment: u64) -> io::Result<u64>
    where
        Self: Write,
    {
        let position = self.stream_position()?;
        let padding = padding_for(position, alignment);
        if padding > 0 {
            trace!(position, alignment, padding, "padding");
            io::copy(&mut io::repeat(0).take(padding), self)?;
        }
        Ok(position + padding)
    }
}

impl<S: Seek + ?Sized> SeekExt for S {}

/// Bytes needed to bring `position` up to a multiple of `alignment`
pub fn padding_for(position: u64, alignment: u64) -> u64 {
    if alignment <= 1 {
        return 0;
    }
    (alignment - position % alignment) % alignment
}

/// Read four bytes and compare them against `expected`.
pub fn expect_magic<R: Read + Seek>(reader: &mut R, expected: &[u8; 4]) -> Result<()> {
    let offset = reader.stream_position()?;
    let found: [u8; 4] = read_array(reader)?;
    if &found != expected {
        return Err(FormatError::BadMagic {
            offset,
            expected: String::from_utf8_lossy(expected).into_owned(),
            found: String::from_utf8_lossy(&found).into_owned(),
        }
        .into());
    }
    Ok(())
}

/// Read exactly `N` raw bytes.
pub fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read `length` bytes starting at the absolute `start`, restoring the cursor
/// afterwards.
///
/// The range is validated against the stream length first so a corrupt offset is
/// reported with its position instead of surfacing as a bare end of file.
pub fn read_range<R: Read + Seek>(
    reader: &mut R,
    what: &'static str,
    start: u64,
    length: u64,
) -> Result<Vec<u8>> {
    let stream_length = reader.stream_length()?;
    let end = start.saturating_add(length);
    if end > stream_length {
        return Err(FormatError::OutOfBounds {
            what,
            start,
            end,
            length: stream_length,
        }
        .into());
    }

    let mut scope = reader.temporary_seek()?;
    scope.seek_to(start)?;
    let mut data = vec![0u8; length as usize];
    scope.read_exact(&mut data)?;
    Ok(data)
}

/// Read a `u32` in the given byte order
pub fn read_u32<R: Read + Seek>(reader: &mut R, endian: Endian) -> Result<u32> {
    Ok(reader.read_type(endian)?)
}

/// Write a `u32` at the absolute `position`, restoring the cursor afterwards
pub fn patch_u32<W: Write + Seek>(writer: &mut W, position: u64, value: u32, endian: Endian) -> Result<()> {
    let mut scope = writer.temporary_seek()?;
    scope.seek_to(position)?;
    scope.write_type(&value, endian)?;
    trace!(position, value, "patched");
    Ok(())
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Read, Seek, SeekFrom, Write};

    use binrw::Endian;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, FormatError, Result};
    use crate::io::{expect_magic, padding_for, patch_u32, read_range, SeekExt};

    #[test]
    fn temporary_seek_restores_position() -> Result<()> {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        cursor.seek(SeekFrom::Start(3))?;

        {
            let mut scope = cursor.temporary_seek()?;
            assert_eq!(scope.restore_position(), 3);
            scope.seek(SeekFrom::Start(12))?;
            assert_eq!(scope.stream_position()?, 12);
        }

        assert_eq!(cursor.stream_position()?, 3);
        Ok(())
    }

    #[test]
    fn temporary_seek_restores_on_early_return() -> Result<()> {
        fn failing(cursor: &mut Cursor<Vec<u8>>) -> Result<()> {
            let mut scope = cursor.temporary_seek()?;
            scope.seek(SeekFrom::Start(6))?;
            let mut buf = [0u8; 8];
            scope.read_exact(&mut buf)?;
            Ok(())
        }

        let mut cursor = Cursor::new(vec![0u8; 8]);
        cursor.seek(SeekFrom::Start(1))?;

        assert!(failing(&mut cursor).is_err());
        assert_eq!(cursor.stream_position()?, 1);
        Ok(())
    }

    #[test]
    fn align_pads_with_zeros() -> Result<()> {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_all(&[0xAA; 5])?;

        assert_eq!(cursor.align_with_zeros(8)?, 8);
        assert_eq!(cursor.align_with_zeros(8)?, 8);
        assert_eq!(cursor.get_ref(), &vec![0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0, 0, 0]);

        assert_eq!(padding_for(0x1001, 0x1000), 0xFFF);
        assert_eq!(padding_for(7, 1), 0);
        Ok(())
    }

    #[test]
    fn bad_magic_reports_offset() -> Result<()> {
        let mut cursor = Cursor::new(b"xxNARX".to_vec());
        cursor.seek(SeekFrom::Start(2))?;

        match expect_magic(&mut cursor, b"NARC") {
            Err(Error::Format(FormatError::BadMagic { offset, found, .. })) => {
                assert_eq!(offset, 2);
                assert_eq!(found, "NARX");
            }
            other => panic!("unexpected result {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn read_range_checks_bounds() -> Result<()> {
        let mut cursor = Cursor::new(vec![1, 2, 3, 4, 5]);

        assert_eq!(read_range(&mut cursor, "payload", 1, 3)?, vec![2, 3, 4]);
        assert_eq!(cursor.stream_position()?, 0);

        assert!(matches!(
            read_range(&mut cursor, "payload", 4, 2),
            Err(Error::Format(FormatError::OutOfBounds { start: 4, end: 6, length: 5, .. }))
        ));
        Ok(())
    }

    #[test]
    fn patch_respects_byte_order() -> Result<()> {
        let mut cursor = Cursor::new(vec![0u8; 8]);
        cursor.seek(SeekFrom::End(0))?;

        patch_u32(&mut cursor, 0, 0x11223344, Endian::Little)?;
        patch_u32(&mut cursor, 4, 0x11223344, Endian::Big)?;

        assert_eq!(cursor.stream_position()?, 8);
        assert_eq!(
            cursor.into_inner(),
            vec![0x44, 0x33, 0x22, 0x11, 0x11, 0x22, 0x33, 0x44]
        );
        Ok(())
    }
}
