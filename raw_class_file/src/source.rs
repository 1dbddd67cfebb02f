//! Big endian primitive reading and writing.
//!
//! The class file format is big endian throughout, there's no way to configure that.
use std::io::{Read, Write};
use crate::error::{ClassFileError, Result};

/// A sequential source of bytes, like a file or a buffer.
///
/// Implemented for anything that implements [`Read`]. A short read is reported as [`ClassFileError::UnexpectedEof`].
pub trait ByteSource {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]>;
	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>>;

	fn read_byte(&mut self) -> Result<u8> {
		Ok(u8::from_be_bytes(self.read_n()?))
	}
	fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_n()?))
	}
	fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_n()?))
	}
	fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_n()?))
	}
	fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_n()?))
	}
	fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_n()?))
	}
}

impl<T: Read> ByteSource for T {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0u8; N];
		self.read_exact(&mut buf)?;
		Ok(buf)
	}

	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>> {
		// Don't trust `size` for the allocation, it comes straight from the input.
		let mut vec = Vec::with_capacity(size.min(1 << 16));
		let read = self.take(size as u64).read_to_end(&mut vec)?;
		if read != size {
			return Err(ClassFileError::UnexpectedEof);
		}
		Ok(vec)
	}
}

/// The mirror of [`ByteSource`], implemented for anything that implements [`Write`].
pub trait ByteSink {
	fn write_u8_slice(&mut self, buf: &[u8]) -> Result<()>;

	fn write_u8(&mut self, value: u8) -> Result<()> {
		self.write_u8_slice(&[value])
	}
	fn write_u16(&mut self, value: u16) -> Result<()> {
		self.write_u8_slice(&value.to_be_bytes())
	}
	fn write_u32(&mut self, value: u32) -> Result<()> {
		self.write_u8_slice(&value.to_be_bytes())
	}
	fn write_i8(&mut self, value: i8) -> Result<()> {
		self.write_u8_slice(&value.to_be_bytes())
	}
	fn write_i16(&mut self, value: i16) -> Result<()> {
		self.write_u8_slice(&value.to_be_bytes())
	}
	fn write_i32(&mut self, value: i32) -> Result<()> {
		self.write_u8_slice(&value.to_be_bytes())
	}

	fn write_usize_as_u8(&mut self, value: usize, what: &'static str) -> Result<()> {
		let value = u8::try_from(value).map_err(|_| ClassFileError::CountOverflow { what, len: value })?;
		self.write_u8(value)
	}
	fn write_usize_as_u16(&mut self, value: usize, what: &'static str) -> Result<()> {
		let value = u16::try_from(value).map_err(|_| ClassFileError::CountOverflow { what, len: value })?;
		self.write_u16(value)
	}
	fn write_usize_as_u32(&mut self, value: usize, what: &'static str) -> Result<()> {
		let value = u32::try_from(value).map_err(|_| ClassFileError::CountOverflow { what, len: value })?;
		self.write_u32(value)
	}
}

impl<T: Write> ByteSink for T {
	fn write_u8_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.write_all(buf)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::error::ClassFileError;
	use super::{ByteSink, ByteSource};

	#[test]
	fn big_endian() {
		let mut r: &[u8] = &[0xca, 0xfe, 0xba, 0xbe, 0x12, 0x34, 0xff];
		assert_eq!(r.read_u32().unwrap(), 0xcafebabe);
		assert_eq!(r.read_u16().unwrap(), 0x1234);
		assert_eq!(r.read_i8().unwrap(), -1);
	}

	#[test]
	fn short_read_is_eof() {
		let mut r: &[u8] = &[0x00];
		assert!(matches!(r.read_u16(), Err(ClassFileError::UnexpectedEof)));

		let mut r: &[u8] = &[1, 2, 3];
		assert!(matches!(r.read_u8_vec(4), Err(ClassFileError::UnexpectedEof)));
	}

	#[test]
	fn count_overflow() {
		let mut w = Vec::new();
		w.write_usize_as_u16(0x1_0000, "interfaces").unwrap_err();
		w.write_usize_as_u16(0xffff, "interfaces").unwrap();
		w.write_i32(-2).unwrap();
		assert_eq!(w, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
	}
}
