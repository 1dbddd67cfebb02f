use log::trace;
use crate::attribute::Attribute;
use crate::class::ClassFile;
use crate::context::ParserContext;
use crate::error::Result;
use crate::instruction::Instruction;
use crate::source::ByteSource;

/// What to do with an attribute whose name isn't known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAttributePolicy {
	/// Fail with [`crate::ClassFileError::UnknownAttribute`].
	#[default]
	Reject,
	/// Keep the payload as [`Attribute::Unknown`], and write it back unchanged.
	Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
	pub unknown_attributes: UnknownAttributePolicy,
	/// How deep attributes may nest. Attributes of classes, fields and methods are at depth `1`, the ones inside a
	/// `Code` attribute at depth `2`.
	pub max_attribute_depth: usize,
}

impl Default for ParserOptions {
	fn default() -> Self {
		ParserOptions {
			unknown_attributes: UnknownAttributePolicy::Reject,
			max_attribute_depth: 8,
		}
	}
}

/// Decodes class files, or parts of them, from a [`ByteSource`].
///
/// Every byte read goes through one of the `consume_*` methods, which keep the byte offset in the [`ParserContext`]
/// up to date.
#[derive(Debug)]
pub struct Parser<S> {
	source: S,
	context: ParserContext,
	options: ParserOptions,
}

impl<S: ByteSource> Parser<S> {
	pub fn new(source: S) -> Parser<S> {
		Parser::with_options(source, ParserOptions::default())
	}

	pub fn with_options(source: S, options: ParserOptions) -> Parser<S> {
		Parser { source, context: ParserContext::new(), options }
	}

	pub fn context(&self) -> &ParserContext {
		&self.context
	}

	/// Parsing a single attribute or instruction may need constants or a code start offset set up beforehand.
	pub fn context_mut(&mut self) -> &mut ParserContext {
		&mut self.context
	}

	pub fn into_context(self) -> ParserContext {
		self.context
	}

	pub fn options(&self) -> &ParserOptions {
		&self.options
	}

	pub fn decode_class_file(&mut self) -> Result<ClassFile> {
		ClassFile::decode(self)
	}

	pub fn decode_instruction(&mut self) -> Result<Instruction> {
		Instruction::decode(self)
	}

	pub fn decode_attribute(&mut self) -> Result<Attribute> {
		Attribute::decode(self)
	}

	pub fn consume_u8(&mut self) -> Result<u8> {
		let value = self.source.read_byte()?;
		self.context.advance(1);
		Ok(value)
	}

	pub fn consume_u16(&mut self) -> Result<u16> {
		let value = self.source.read_u16()?;
		self.context.advance(2);
		Ok(value)
	}

	pub fn consume_u32(&mut self) -> Result<u32> {
		let value = self.source.read_u32()?;
		self.context.advance(4);
		Ok(value)
	}

	pub fn consume_i8(&mut self) -> Result<i8> {
		let value = self.source.read_i8()?;
		self.context.advance(1);
		Ok(value)
	}

	pub fn consume_i16(&mut self) -> Result<i16> {
		let value = self.source.read_i16()?;
		self.context.advance(2);
		Ok(value)
	}

	pub fn consume_i32(&mut self) -> Result<i32> {
		let value = self.source.read_i32()?;
		self.context.advance(4);
		Ok(value)
	}

	pub fn consume_u8_vec(&mut self, size: usize) -> Result<Vec<u8>> {
		let value = self.source.read_u8_vec(size)?;
		self.context.advance(size);
		Ok(value)
	}

	/// Reads `size` bytes, expecting all of them to be zero. Returns the index of the first nonzero byte otherwise.
	pub(crate) fn consume_zeros(&mut self, size: usize) -> Result<Option<usize>> {
		let mut nonzero = None;
		for i in 0..size {
			if self.consume_u8()? != 0 && nonzero.is_none() {
				nonzero = Some(i);
			}
		}
		if let Some(i) = nonzero {
			trace!("nonzero padding byte {i} at offset {}", self.context.byte_offset());
		}
		Ok(nonzero)
	}
}
