use crate::error::{ClassFileError, Result};
use crate::pool::{ConstantPool, ConstantPoolEntry};

/// The state of one parse.
///
/// Holds the constant pool read so far, so that attribute names can be resolved, and the offsets needed to align the
/// operands of `tableswitch` and `lookupswitch`.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
	constant_pool: ConstantPool,
	byte_offset: u64,
	code_start_offset: u64,
	attribute_depth: usize,
}

impl ParserContext {
	pub fn new() -> ParserContext {
		ParserContext::default()
	}

	/// Appends an entry to the constant pool, returning its index.
	pub fn add_constant(&mut self, entry: ConstantPoolEntry) -> usize {
		self.constant_pool.push(entry)
	}

	pub fn get_constant(&self, index: u16) -> Result<&ConstantPoolEntry> {
		self.constant_pool.get(index)
	}

	pub fn get_constant_utf8(&self, index: u16) -> Result<String> {
		self.constant_pool.get_utf8_lossy(index)
	}

	pub fn constant_pool(&self) -> &ConstantPool {
		&self.constant_pool
	}

	/// The number of bytes consumed so far.
	pub fn byte_offset(&self) -> u64 {
		self.byte_offset
	}

	pub fn set_code_start_offset(&mut self, offset: u64) {
		self.code_start_offset = offset;
	}

	/// The byte offset of the first instruction of the `Code` attribute currently being parsed.
	pub fn code_start_offset(&self) -> u64 {
		self.code_start_offset
	}

	pub(crate) fn advance(&mut self, n: usize) {
		self.byte_offset += n as u64;
	}

	pub(crate) fn enter_attribute(&mut self, max_depth: usize) -> Result<()> {
		if self.attribute_depth >= max_depth {
			return Err(ClassFileError::AttributeNestingTooDeep(max_depth));
		}
		self.attribute_depth += 1;
		Ok(())
	}

	pub(crate) fn leave_attribute(&mut self) {
		self.attribute_depth = self.attribute_depth.saturating_sub(1);
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::context::ParserContext;
	use crate::error::ClassFileError;
	use crate::pool::ConstantPoolEntry;

	#[test]
	fn constants() {
		let mut context = ParserContext::new();
		assert_eq!(context.add_constant(ConstantPoolEntry::Class { name_index: 2 }), 1);
		assert_eq!(context.add_constant(ConstantPoolEntry::utf8("Minimum")), 2);

		assert_eq!(context.get_constant(1).unwrap(), &ConstantPoolEntry::Class { name_index: 2 });
		assert_eq!(context.get_constant_utf8(2).unwrap(), "Minimum");
		assert!(matches!(context.get_constant_utf8(1), Err(ClassFileError::WrongConstantKind { index: 1, .. })));
		assert!(matches!(context.get_constant(3), Err(ClassFileError::ConstantPoolIndexOutOfRange(3))));
	}

	#[test]
	fn attribute_depth() {
		let mut context = ParserContext::new();
		context.enter_attribute(2).unwrap();
		context.enter_attribute(2).unwrap();
		assert!(matches!(context.enter_attribute(2), Err(ClassFileError::AttributeNestingTooDeep(2))));
		context.leave_attribute();
		context.enter_attribute(2).unwrap();
	}
}
