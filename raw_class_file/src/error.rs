use crate::pool::ConstantKind;

/// Everything that can go wrong while decoding or encoding a class file.
///
/// None of these are recoverable inside the crate: decoding stops at the first one and hands it to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ClassFileError {
	#[error("wrong magic: got {0:#x}, expected 0xCAFEBABE")]
	BadMagic(u32),
	#[error("unexpected constant pool tag {0}")]
	InvalidConstantTag(u8),
	#[error("unimplemented opcode {0:#04x}")]
	UnimplementedOpcode(u8),
	#[error("opcode {0:#04x} can't be used with `wide`")]
	InvalidWideOpcode(u8),
	#[error("malformed instruction with opcode {opcode:#04x}: {reason}")]
	MalformedInstruction {
		opcode: u8,
		reason: String,
	},
	#[error("unknown attribute {0:?}")]
	UnknownAttribute(String),
	#[error("no constant pool entry at index {0}")]
	ConstantPoolIndexOutOfRange(u16),
	#[error("constant pool index {0} is the unusable second slot of a long or double")]
	UnusableConstantPoolIndex(u16),
	#[error("expected constant pool entry {expected} at index {index}, got {actual}")]
	WrongConstantKind {
		index: u16,
		expected: ConstantKind,
		actual: ConstantKind,
	},
	#[error("`code_length` is {declared}, but the instructions take up {decoded} bytes")]
	CodeLengthMismatch {
		declared: u32,
		decoded: u32,
	},
	#[error("attribute {name:?} declares a length of {declared}, but its content is {actual} bytes long")]
	AttributeLengthMismatch {
		name: String,
		declared: u32,
		actual: u64,
	},
	#[error("unknown stack map frame type {0}")]
	InvalidStackMapFrame(u8),
	#[error("unknown verification type tag {0}")]
	InvalidVerificationType(u8),
	#[error("attributes nested deeper than {0} levels")]
	AttributeNestingTooDeep(usize),
	#[error("{what} has {len} elements, too many to write its length")]
	CountOverflow {
		what: &'static str,
		len: usize,
	},
	#[error("unexpected end of data")]
	UnexpectedEof,
	#[error("io error: {0}")]
	Io(std::io::Error),
}

impl From<std::io::Error> for ClassFileError {
	fn from(value: std::io::Error) -> Self {
		if value.kind() == std::io::ErrorKind::UnexpectedEof {
			ClassFileError::UnexpectedEof
		} else {
			ClassFileError::Io(value)
		}
	}
}

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;
