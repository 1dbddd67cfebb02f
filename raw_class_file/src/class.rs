use std::io::{Read, Write};
use log::{debug, trace};
use crate::attribute::Attribute;
use crate::error::{ClassFileError, Result};
use crate::macros::jvms_notation;
use crate::parser::{Parser, ParserOptions};
use crate::pool::{ConstantPool, ConstantPoolEntry};
use crate::source::{ByteSink, ByteSource};

/// The first four bytes of every class file.
pub const MAGIC: u32 = 0xCAFEBABE;

jvms_notation! {
	struct FieldInfo {
		access_flags: u16,
		name_index: u16,
		descriptor_index: u16,
		attributes: Vec<Attribute> [u16],
	}
}

jvms_notation! {
	struct MethodInfo {
		access_flags: u16,
		name_index: u16,
		descriptor_index: u16,
		attributes: Vec<Attribute> [u16],
	}
}

/// A class file, with everything that's in the binary form except the `magic` and the counts of the lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
	pub minor_version: u16,
	pub major_version: u16,
	pub constant_pool: ConstantPool,
	pub access_flags: u16,
	pub this_class: u16,
	/// `0` only for `java/lang/Object`.
	pub super_class: u16,
	pub interfaces: Vec<u16>,
	pub fields: Vec<FieldInfo>,
	pub methods: Vec<MethodInfo>,
	pub attributes: Vec<Attribute>,
}

impl ClassFile {
	pub fn read(reader: &mut impl Read) -> Result<ClassFile> {
		Parser::new(reader).decode_class_file()
	}

	pub fn read_with_options(reader: &mut impl Read, options: ParserOptions) -> Result<ClassFile> {
		Parser::with_options(reader, options).decode_class_file()
	}

	pub fn write(&self, writer: &mut impl Write) -> Result<()> {
		self.encode(writer)
	}

	/// Converts the class file to binary representation.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut vec = Vec::with_capacity(self.length());
		self.encode(&mut vec)?;
		Ok(vec)
	}

	/// The length of the class file produced by [`Self::to_bytes`], in bytes.
	pub fn length(&self) -> usize {
		4 + 2 + 2 +
			self.constant_pool.encoded_len() +
			2 + 2 + 2 +
			2 + 2 * self.interfaces.len() +
			2 + self.fields.iter().map(FieldInfo::encoded_len).sum::<usize>() +
			2 + self.methods.iter().map(MethodInfo::encoded_len).sum::<usize>() +
			2 + self.attributes.iter().map(Attribute::encoded_len).sum::<usize>()
	}

	pub(crate) fn decode<S: ByteSource>(parser: &mut Parser<S>) -> Result<ClassFile> {
		let magic = parser.consume_u32()?;
		if magic != MAGIC {
			return Err(ClassFileError::BadMagic(magic));
		}
		let minor_version = parser.consume_u16()?;
		let major_version = parser.consume_u16()?;

		let constant_pool_count = parser.consume_u16()?;
		let mut index = 1u32;
		while index < constant_pool_count as u32 {
			let entry = ConstantPoolEntry::decode(parser)?;
			index += entry.width() as u32;
			parser.context_mut().add_constant(entry);
		}
		if index > constant_pool_count as u32 {
			// a long or double in the last slot, its second index is past the end
			return Err(ClassFileError::ConstantPoolIndexOutOfRange(constant_pool_count));
		}
		trace!("read constant pool with {} entries for {constant_pool_count} indices", parser.context().constant_pool().len());

		let access_flags = parser.consume_u16()?;
		let this_class = parser.consume_u16()?;
		let super_class = parser.consume_u16()?;

		let interfaces_count = parser.consume_u16()?;
		let mut interfaces = Vec::with_capacity(interfaces_count as usize);
		for _ in 0..interfaces_count {
			interfaces.push(parser.consume_u16()?);
		}

		let fields_count = parser.consume_u16()?;
		let mut fields = Vec::with_capacity(fields_count as usize);
		for _ in 0..fields_count {
			let field = FieldInfo::decode(parser)?;
			trace!("read field {:?}", parser.context().get_constant_utf8(field.name_index).unwrap_or_default());
			fields.push(field);
		}

		let methods_count = parser.consume_u16()?;
		let mut methods = Vec::with_capacity(methods_count as usize);
		for _ in 0..methods_count {
			let method = MethodInfo::decode(parser)?;
			trace!("read method {:?}", parser.context().get_constant_utf8(method.name_index).unwrap_or_default());
			methods.push(method);
		}

		let attributes_count = parser.consume_u16()?;
		let mut attributes = Vec::with_capacity(attributes_count as usize);
		for _ in 0..attributes_count {
			attributes.push(parser.decode_attribute()?);
		}

		let constant_pool = parser.context().constant_pool().clone();
		debug!(
			"read class {:?} version {major_version}.{minor_version}: {} fields, {} methods, {} attributes, {} bytes",
			constant_pool.get_class_name(this_class).unwrap_or_default(),
			fields.len(),
			methods.len(),
			attributes.len(),
			parser.context().byte_offset(),
		);

		Ok(ClassFile {
			minor_version,
			major_version,
			constant_pool,
			access_flags,
			this_class,
			super_class,
			interfaces,
			fields,
			methods,
			attributes,
		})
	}

	pub fn encode(&self, writer: &mut impl ByteSink) -> Result<()> {
		writer.write_u32(MAGIC)?;
		writer.write_u16(self.minor_version)?;
		writer.write_u16(self.major_version)?;
		self.constant_pool.encode(writer)?;
		writer.write_u16(self.access_flags)?;
		writer.write_u16(self.this_class)?;
		writer.write_u16(self.super_class)?;

		writer.write_usize_as_u16(self.interfaces.len(), "interfaces_count")?;
		for interface in &self.interfaces {
			writer.write_u16(*interface)?;
		}
		writer.write_usize_as_u16(self.fields.len(), "fields_count")?;
		for field in &self.fields {
			field.encode(writer)?;
		}
		writer.write_usize_as_u16(self.methods.len(), "methods_count")?;
		for method in &self.methods {
			method.encode(writer)?;
		}
		writer.write_usize_as_u16(self.attributes.len(), "attributes_count")?;
		for attribute in &self.attributes {
			attribute.encode(writer)?;
		}

		trace!("wrote class file of {} bytes", self.length());
		Ok(())
	}
}
