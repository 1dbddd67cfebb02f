//! The constant pool: its entries and the 1-indexed table holding them.
use std::fmt::{Display, Formatter};
use crate::error::{ClassFileError, Result};
use crate::macros::jvms_notation;
use crate::source::ByteSink;

jvms_notation! {
	/// A single `cp_info` structure.
	///
	/// All the `*_index` fields are indices into the same constant pool. Nothing checks that they point at an entry of
	/// the right kind.
	enum ConstantPoolEntry {
		tag: u8,
		Class = 7 {
			name_index: u16,
		},
		Fieldref = 9 {
			class_index: u16,
			name_and_type_index: u16,
		},
		Methodref = 10 {
			class_index: u16,
			name_and_type_index: u16,
		},
		InterfaceMethodref = 11 {
			class_index: u16,
			name_and_type_index: u16,
		},
		String = 8 {
			string_index: u16,
		},
		Integer = 3 {
			bytes: u32,
		},
		Float = 4 {
			bytes: u32,
		},
		/// Takes up two indices in the constant pool.
		Long = 5 {
			high_bytes: u32,
			low_bytes: u32,
		},
		/// Takes up two indices in the constant pool.
		Double = 6 {
			high_bytes: u32,
			low_bytes: u32,
		},
		NameAndType = 12 {
			name_index: u16,
			descriptor_index: u16,
		},
		/// The raw bytes, in "modified UTF-8". They're not decoded.
		Utf8 = 1 {
			bytes: Vec<u8> [u16],
		},
		MethodHandle = 15 {
			reference_kind: u8,
			reference_index: u16,
		},
		MethodType = 16 {
			descriptor_index: u16,
		},
		InvokeDynamic = 18 {
			bootstrap_method_attr_index: u16,
			name_and_type_index: u16,
		},
		_ => ClassFileError::InvalidConstantTag,
	}
}

impl ConstantPoolEntry {
	pub fn utf8(string: &str) -> ConstantPoolEntry {
		ConstantPoolEntry::Utf8 { bytes: string.as_bytes().to_vec() }
	}

	pub fn long(value: i64) -> ConstantPoolEntry {
		let value = value as u64;
		ConstantPoolEntry::Long { high_bytes: (value >> 32) as u32, low_bytes: value as u32 }
	}

	pub fn double(value: f64) -> ConstantPoolEntry {
		let value = value.to_bits();
		ConstantPoolEntry::Double { high_bytes: (value >> 32) as u32, low_bytes: value as u32 }
	}

	pub fn kind(&self) -> ConstantKind {
		match self {
			ConstantPoolEntry::Class { .. } => ConstantKind::Class,
			ConstantPoolEntry::Fieldref { .. } => ConstantKind::Fieldref,
			ConstantPoolEntry::Methodref { .. } => ConstantKind::Methodref,
			ConstantPoolEntry::InterfaceMethodref { .. } => ConstantKind::InterfaceMethodref,
			ConstantPoolEntry::String { .. } => ConstantKind::String,
			ConstantPoolEntry::Integer { .. } => ConstantKind::Integer,
			ConstantPoolEntry::Float { .. } => ConstantKind::Float,
			ConstantPoolEntry::Long { .. } => ConstantKind::Long,
			ConstantPoolEntry::Double { .. } => ConstantKind::Double,
			ConstantPoolEntry::NameAndType { .. } => ConstantKind::NameAndType,
			ConstantPoolEntry::Utf8 { .. } => ConstantKind::Utf8,
			ConstantPoolEntry::MethodHandle { .. } => ConstantKind::MethodHandle,
			ConstantPoolEntry::MethodType { .. } => ConstantKind::MethodType,
			ConstantPoolEntry::InvokeDynamic { .. } => ConstantKind::InvokeDynamic,
		}
	}

	/// The number of constant pool indices this entry occupies.
	pub fn width(&self) -> u16 {
		match self {
			ConstantPoolEntry::Long { .. } | ConstantPoolEntry::Double { .. } => 2,
			_ => 1,
		}
	}

	/// Turns the bytes of an `Utf8` entry into a string, one `char` per byte.
	///
	/// This is only meant for displaying, and only correct for ASCII.
	pub fn utf8_lossy(&self) -> Option<String> {
		match self {
			ConstantPoolEntry::Utf8 { bytes } => Some(bytes_to_string(bytes)),
			_ => None,
		}
	}
}

pub(crate) fn bytes_to_string(bytes: &[u8]) -> String {
	bytes.iter().map(|&b| b as char).collect()
}

/// The kind of a [`ConstantPoolEntry`], without any data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
	Class,
	Fieldref,
	Methodref,
	InterfaceMethodref,
	String,
	Integer,
	Float,
	Long,
	Double,
	NameAndType,
	Utf8,
	MethodHandle,
	MethodType,
	InvokeDynamic,
}

impl Display for ConstantKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			ConstantKind::Class => "Class",
			ConstantKind::Fieldref => "Fieldref",
			ConstantKind::Methodref => "Methodref",
			ConstantKind::InterfaceMethodref => "InterfaceMethodref",
			ConstantKind::String => "String",
			ConstantKind::Integer => "Integer",
			ConstantKind::Float => "Float",
			ConstantKind::Long => "Long",
			ConstantKind::Double => "Double",
			ConstantKind::NameAndType => "NameAndType",
			ConstantKind::Utf8 => "Utf8",
			ConstantKind::MethodHandle => "MethodHandle",
			ConstantKind::MethodType => "MethodType",
			ConstantKind::InvokeDynamic => "InvokeDynamic",
		};
		f.write_str(name)
	}
}

/// The constant pool of a class file.
///
/// Indices start at `1`. A [`ConstantPoolEntry::Long`] or [`ConstantPoolEntry::Double`] at index `n` makes index `n + 1`
/// unusable, so there may be fewer entries than indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantPool {
	entries: Vec<ConstantPoolEntry>,
	/// Maps `index - 1` to the position in `entries`. `None` marks the second index of a long or double.
	slots: Vec<Option<usize>>,
}

impl ConstantPool {
	pub fn new() -> ConstantPool {
		ConstantPool::default()
	}

	/// Appends an entry, returning the index it's stored at.
	pub fn push(&mut self, entry: ConstantPoolEntry) -> usize {
		let index = self.slots.len() + 1;
		self.slots.push(Some(self.entries.len()));
		if entry.width() == 2 {
			self.slots.push(None);
		}
		self.entries.push(entry);
		index
	}

	pub fn get(&self, index: u16) -> Result<&ConstantPoolEntry> {
		let slot = (index as usize).checked_sub(1)
			.and_then(|slot| self.slots.get(slot))
			.ok_or(ClassFileError::ConstantPoolIndexOutOfRange(index))?;
		match slot {
			Some(position) => Ok(&self.entries[*position]),
			None => Err(ClassFileError::UnusableConstantPoolIndex(index)),
		}
	}

	pub fn get_utf8(&self, index: u16) -> Result<&[u8]> {
		match self.get(index)? {
			ConstantPoolEntry::Utf8 { bytes } => Ok(bytes),
			entry => Err(ClassFileError::WrongConstantKind { index, expected: ConstantKind::Utf8, actual: entry.kind() }),
		}
	}

	/// Like [`ConstantPool::get_utf8`], but converts the bytes like [`ConstantPoolEntry::utf8_lossy`] does.
	pub fn get_utf8_lossy(&self, index: u16) -> Result<String> {
		self.get_utf8(index).map(bytes_to_string)
	}

	/// Resolves a `Class` entry to the name it points to.
	pub fn get_class_name(&self, index: u16) -> Result<String> {
		match self.get(index)? {
			ConstantPoolEntry::Class { name_index } => self.get_utf8_lossy(*name_index),
			entry => Err(ClassFileError::WrongConstantKind { index, expected: ConstantKind::Class, actual: entry.kind() }),
		}
	}

	/// The number of entries. See [`ConstantPool::count`] for the number of used indices.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The value of the `constant_pool_count` item: one more than the highest index.
	pub fn count(&self) -> usize {
		self.slots.len() + 1
	}

	pub fn entries(&self) -> &[ConstantPoolEntry] {
		&self.entries
	}

	/// Iterates over all entries together with their index.
	pub fn iter(&self) -> impl Iterator<Item = (usize, &ConstantPoolEntry)> {
		self.slots.iter()
			.enumerate()
			.filter_map(|(slot, position)| position.map(|position| (slot + 1, &self.entries[position])))
	}

	pub fn encode(&self, writer: &mut impl ByteSink) -> Result<()> {
		writer.write_usize_as_u16(self.count(), "constant_pool_count")?;
		for entry in &self.entries {
			entry.encode(writer)?;
		}
		Ok(())
	}

	pub fn encoded_len(&self) -> usize {
		2 + self.entries.iter().map(ConstantPoolEntry::encoded_len).sum::<usize>()
	}
}

impl From<Vec<ConstantPoolEntry>> for ConstantPool {
	fn from(value: Vec<ConstantPoolEntry>) -> Self {
		value.into_iter().collect()
	}
}

impl FromIterator<ConstantPoolEntry> for ConstantPool {
	fn from_iter<T: IntoIterator<Item=ConstantPoolEntry>>(iter: T) -> Self {
		let mut pool = ConstantPool::new();
		for entry in iter {
			pool.push(entry);
		}
		pool
	}
}
