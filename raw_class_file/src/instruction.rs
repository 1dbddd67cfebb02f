//! Instructions, as they appear in the `code` array of a `Code` attribute.
use crate::error::{ClassFileError, Result};
use crate::opcode::{Opcode, opcode_to_category, OperandShape, TypeTag};
use crate::parser::Parser;
use crate::source::{ByteSink, ByteSource};

/// The value an opcode like `iconst_3` or `aload_0` has built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplicitValue {
	Null,
	M1,
	Zero,
	One,
	Two,
	Three,
	Four,
	Five,
}

impl ImplicitValue {
	const fn from_index(index: u8) -> ImplicitValue {
		match index {
			0 => ImplicitValue::Zero,
			1 => ImplicitValue::One,
			2 => ImplicitValue::Two,
			3 => ImplicitValue::Three,
			4 => ImplicitValue::Four,
			_ => ImplicitValue::Five,
		}
	}

	/// The numeric value, or `None` for `aconst_null`.
	pub const fn as_int(self) -> Option<i32> {
		match self {
			ImplicitValue::Null => None,
			ImplicitValue::M1 => Some(-1),
			ImplicitValue::Zero => Some(0),
			ImplicitValue::One => Some(1),
			ImplicitValue::Two => Some(2),
			ImplicitValue::Three => Some(3),
			ImplicitValue::Four => Some(4),
			ImplicitValue::Five => Some(5),
		}
	}
}

/// An instruction whose operand is folded into the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImplicitInstruction {
	pub opcode: Opcode,
	/// For loads and stores this is the local variable index.
	pub value: ImplicitValue,
}

const fn compute_implicit(byte: u8) -> Option<ImplicitInstruction> {
	let value = match byte {
		0x01 => ImplicitValue::Null,
		0x02 => ImplicitValue::M1,
		0x03..=0x08 => ImplicitValue::from_index(byte - 0x03),
		0x09..=0x0a => ImplicitValue::from_index(byte - 0x09),
		0x0b..=0x0d => ImplicitValue::from_index(byte - 0x0b),
		0x0e..=0x0f => ImplicitValue::from_index(byte - 0x0e),
		0x1a..=0x2d => ImplicitValue::from_index((byte - 0x1a) % 4),
		0x3b..=0x4e => ImplicitValue::from_index((byte - 0x3b) % 4),
		_ => return None,
	};
	match Opcode::from_byte(byte) {
		Some(opcode) => Some(ImplicitInstruction { opcode, value }),
		None => None,
	}
}

const IMPLICIT_INSTRUCTIONS: [Option<ImplicitInstruction>; 256] = {
	let mut table = [None; 256];
	let mut byte = 0;
	while byte < 256 {
		table[byte] = compute_implicit(byte as u8);
		byte += 1;
	}
	table
};

/// Looks up the instruction an implicit opcode stands for. Returns `None` for all other bytes.
pub fn implicit_instruction(byte: u8) -> Option<ImplicitInstruction> {
	IMPLICIT_INSTRUCTIONS[byte as usize]
}

/// The `atype` operand of `newarray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
	Boolean = 4,
	Char = 5,
	Float = 6,
	Double = 7,
	Byte = 8,
	Short = 9,
	Int = 10,
	Long = 11,
}

impl ArrayType {
	pub fn from_atype(atype: u8) -> Option<ArrayType> {
		Some(match atype {
			4 => ArrayType::Boolean,
			5 => ArrayType::Char,
			6 => ArrayType::Float,
			7 => ArrayType::Double,
			8 => ArrayType::Byte,
			9 => ArrayType::Short,
			10 => ArrayType::Int,
			11 => ArrayType::Long,
			_ => return None,
		})
	}

	pub fn atype(self) -> u8 {
		self as u8
	}

	/// The name of the element type, as it's written in java source code.
	pub fn name(self) -> &'static str {
		match self {
			ArrayType::Boolean => "boolean",
			ArrayType::Char => "char",
			ArrayType::Float => "float",
			ArrayType::Double => "double",
			ArrayType::Byte => "byte",
			ArrayType::Short => "short",
			ArrayType::Int => "int",
			ArrayType::Long => "long",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSwitch {
	/// The number of zero bytes between the opcode and `default`.
	pub padding: u8,
	pub default: i32,
	pub low: i32,
	/// Should be `low + offsets.len() - 1`.
	pub high: i32,
	pub offsets: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSwitch {
	/// The number of zero bytes between the opcode and `default`.
	pub padding: u8,
	pub default: i32,
	/// Pairs of `match` and `offset`, sorted by `match`.
	pub pairs: Vec<(i32, i32)>,
}

/// An instruction prefixed by `wide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wide {
	/// One of the loads or stores, or `ret`.
	Local {
		opcode: Opcode,
		index: u16,
	},
	Iinc {
		index: u16,
		increment: i16,
	},
}

impl Wide {
	/// The opcode of the widened instruction.
	pub fn opcode(&self) -> Opcode {
		match self {
			Wide::Local { opcode, .. } => *opcode,
			Wide::Iinc { .. } => Opcode::Iinc,
		}
	}
}

/// A single decoded instruction.
///
/// Instructions keep the exact form they were read in: `iload_0`, `iload 0` and `wide iload 0` are different values,
/// so that writing them back gives the same bytes. Branch offsets are relative to the pc of the instruction.
///
/// The `opcode` fields are not checked when writing: an `Instruction::Local` with `Opcode::Getstatic` as opcode writes
/// something that doesn't decode to the same instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
	/// An instruction without any operands.
	Plain(Opcode),
	Implicit(ImplicitInstruction),
	Bipush(i8),
	Sipush(i16),
	/// `ldc`, which has a one byte constant pool index.
	Ldc(u8),
	/// `ldc_w` or `ldc2_w`.
	LdcWide {
		opcode: Opcode,
		index: u16,
	},
	/// A load or store with an explicit local variable index, or `ret`.
	Local {
		opcode: Opcode,
		index: u8,
	},
	Iinc {
		index: u8,
		increment: i8,
	},
	/// The conditional branches, `goto` and `jsr`.
	Branch {
		opcode: Opcode,
		offset: i16,
	},
	/// `goto_w` or `jsr_w`.
	BranchWide {
		opcode: Opcode,
		offset: i32,
	},
	/// An instruction with a constant pool index as its only operand, like `getfield`, `invokevirtual` or `new`.
	PoolRef {
		opcode: Opcode,
		index: u16,
	},
	InvokeInterface {
		index: u16,
		count: u8,
	},
	InvokeDynamic {
		index: u16,
	},
	NewArray(ArrayType),
	MultiANewArray {
		index: u16,
		dimensions: u8,
	},
	TableSwitch(TableSwitch),
	LookupSwitch(LookupSwitch),
	Wide(Wide),
}

fn malformed(opcode: Opcode, reason: impl Into<String>) -> ClassFileError {
	ClassFileError::MalformedInstruction { opcode: opcode.byte(), reason: reason.into() }
}

impl Instruction {
	pub fn opcode(&self) -> Opcode {
		match self {
			Instruction::Plain(opcode) => *opcode,
			Instruction::Implicit(implicit) => implicit.opcode,
			Instruction::Bipush(_) => Opcode::Bipush,
			Instruction::Sipush(_) => Opcode::Sipush,
			Instruction::Ldc(_) => Opcode::Ldc,
			Instruction::LdcWide { opcode, .. } => *opcode,
			Instruction::Local { opcode, .. } => *opcode,
			Instruction::Iinc { .. } => Opcode::Iinc,
			Instruction::Branch { opcode, .. } => *opcode,
			Instruction::BranchWide { opcode, .. } => *opcode,
			Instruction::PoolRef { opcode, .. } => *opcode,
			Instruction::InvokeInterface { .. } => Opcode::Invokeinterface,
			Instruction::InvokeDynamic { .. } => Opcode::Invokedynamic,
			Instruction::NewArray(_) => Opcode::Newarray,
			Instruction::MultiANewArray { .. } => Opcode::Multianewarray,
			Instruction::TableSwitch(_) => Opcode::Tableswitch,
			Instruction::LookupSwitch(_) => Opcode::Lookupswitch,
			Instruction::Wide(_) => Opcode::Wide,
		}
	}

	/// The type this instruction works on. For `wide`, that's the type of the widened instruction.
	pub fn ty(&self) -> TypeTag {
		match self {
			Instruction::Wide(wide) => wide.opcode().type_tag(),
			_ => self.opcode().type_tag(),
		}
	}

	/// The number of bytes following the opcode.
	pub fn operand_len(&self) -> usize {
		match self {
			Instruction::Plain(_) | Instruction::Implicit(_) => 0,
			Instruction::Bipush(_) | Instruction::Ldc(_) | Instruction::Local { .. } | Instruction::NewArray(_) => 1,
			Instruction::Sipush(_) | Instruction::LdcWide { .. } | Instruction::Iinc { .. } | Instruction::Branch { .. } |
				Instruction::PoolRef { .. } => 2,
			Instruction::MultiANewArray { .. } => 3,
			Instruction::InvokeInterface { .. } | Instruction::InvokeDynamic { .. } | Instruction::BranchWide { .. } => 4,
			Instruction::TableSwitch(table) => table.padding as usize + 12 + 4 * table.offsets.len(),
			Instruction::LookupSwitch(lookup) => lookup.padding as usize + 8 + 8 * lookup.pairs.len(),
			Instruction::Wide(Wide::Local { .. }) => 3,
			Instruction::Wide(Wide::Iinc { .. }) => 5,
		}
	}

	/// The total number of bytes this instruction takes up, including the opcode.
	pub fn size_in_bytes(&self) -> usize {
		1 + self.operand_len()
	}

	/// Returns the bytes following the opcode, exactly as [`Instruction::encode`] writes them.
	pub fn operand_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.size_in_bytes());
		self.encode(&mut bytes)?;
		bytes.remove(0);
		Ok(bytes)
	}

	pub(crate) fn decode<S: ByteSource>(parser: &mut Parser<S>) -> Result<Instruction> {
		let byte = parser.consume_u8()?;
		let shape = opcode_to_category(byte);
		let opcode = match Opcode::from_byte(byte) {
			Some(opcode) if shape != OperandShape::Invalid => opcode,
			_ => return Err(ClassFileError::UnimplementedOpcode(byte)),
		};

		Ok(match shape {
			OperandShape::None => Instruction::Plain(opcode),
			OperandShape::Implicit => {
				let implicit = implicit_instruction(byte).ok_or(ClassFileError::UnimplementedOpcode(byte))?;
				Instruction::Implicit(implicit)
			},
			OperandShape::OneByte => match opcode {
				Opcode::Bipush => Instruction::Bipush(parser.consume_i8()?),
				Opcode::Ldc => Instruction::Ldc(parser.consume_u8()?),
				Opcode::Newarray => {
					let atype = parser.consume_u8()?;
					let array_type = ArrayType::from_atype(atype)
						.ok_or_else(|| malformed(opcode, format!("unknown array type {atype}")))?;
					Instruction::NewArray(array_type)
				},
				_ => Instruction::Local { opcode, index: parser.consume_u8()? },
			},
			OperandShape::TwoBytes => match opcode {
				Opcode::Sipush => Instruction::Sipush(parser.consume_i16()?),
				Opcode::LdcW | Opcode::Ldc2W => Instruction::LdcWide { opcode, index: parser.consume_u16()? },
				Opcode::Iinc => Instruction::Iinc { index: parser.consume_u8()?, increment: parser.consume_i8()? },
				Opcode::Ifeq | Opcode::Ifne | Opcode::Iflt | Opcode::Ifge | Opcode::Ifgt | Opcode::Ifle |
				Opcode::IfIcmpeq | Opcode::IfIcmpne | Opcode::IfIcmplt | Opcode::IfIcmpge | Opcode::IfIcmpgt |
				Opcode::IfIcmple | Opcode::IfAcmpeq | Opcode::IfAcmpne | Opcode::Goto | Opcode::Jsr |
				Opcode::Ifnull | Opcode::Ifnonnull => Instruction::Branch { opcode, offset: parser.consume_i16()? },
				_ => Instruction::PoolRef { opcode, index: parser.consume_u16()? },
			},
			OperandShape::ThreeBytes => {
				Instruction::MultiANewArray { index: parser.consume_u16()?, dimensions: parser.consume_u8()? }
			},
			OperandShape::FourBytes => match opcode {
				Opcode::Invokeinterface => {
					let index = parser.consume_u16()?;
					let count = parser.consume_u8()?;
					if parser.consume_u8()? != 0 {
						return Err(malformed(opcode, "fourth operand byte must be zero"));
					}
					Instruction::InvokeInterface { index, count }
				},
				Opcode::Invokedynamic => {
					let index = parser.consume_u16()?;
					if parser.consume_u16()? != 0 {
						return Err(malformed(opcode, "third and fourth operand bytes must be zero"));
					}
					Instruction::InvokeDynamic { index }
				},
				_ => Instruction::BranchWide { opcode, offset: parser.consume_i32()? },
			},
			OperandShape::Variable => match opcode {
				Opcode::Tableswitch => Instruction::TableSwitch(decode_table_switch(parser)?),
				Opcode::Lookupswitch => Instruction::LookupSwitch(decode_lookup_switch(parser)?),
				_ => Instruction::Wide(decode_wide(parser)?),
			},
			OperandShape::Invalid => return Err(ClassFileError::UnimplementedOpcode(byte)),
		})
	}

	pub fn encode(&self, writer: &mut impl ByteSink) -> Result<()> {
		writer.write_u8(self.opcode().byte())?;
		match self {
			Instruction::Plain(_) | Instruction::Implicit(_) => {},
			Instruction::Bipush(value) => writer.write_i8(*value)?,
			Instruction::Sipush(value) => writer.write_i16(*value)?,
			Instruction::Ldc(index) => writer.write_u8(*index)?,
			Instruction::LdcWide { index, .. } => writer.write_u16(*index)?,
			Instruction::Local { index, .. } => writer.write_u8(*index)?,
			Instruction::Iinc { index, increment } => {
				writer.write_u8(*index)?;
				writer.write_i8(*increment)?;
			},
			Instruction::Branch { offset, .. } => writer.write_i16(*offset)?,
			Instruction::BranchWide { offset, .. } => writer.write_i32(*offset)?,
			Instruction::PoolRef { index, .. } => writer.write_u16(*index)?,
			Instruction::InvokeInterface { index, count } => {
				writer.write_u16(*index)?;
				writer.write_u8(*count)?;
				writer.write_u8(0)?;
			},
			Instruction::InvokeDynamic { index } => {
				writer.write_u16(*index)?;
				writer.write_u16(0)?;
			},
			Instruction::NewArray(array_type) => writer.write_u8(array_type.atype())?,
			Instruction::MultiANewArray { index, dimensions } => {
				writer.write_u16(*index)?;
				writer.write_u8(*dimensions)?;
			},
			Instruction::TableSwitch(table) => {
				if table.high as i64 - table.low as i64 + 1 != table.offsets.len() as i64 {
					return Err(malformed(Opcode::Tableswitch, format!(
						"{} offsets for the range {} to {}", table.offsets.len(), table.low, table.high,
					)));
				}
				write_padding(writer, table.padding)?;
				writer.write_i32(table.default)?;
				writer.write_i32(table.low)?;
				writer.write_i32(table.high)?;
				for offset in &table.offsets {
					writer.write_i32(*offset)?;
				}
			},
			Instruction::LookupSwitch(lookup) => {
				write_padding(writer, lookup.padding)?;
				writer.write_i32(lookup.default)?;
				let npairs = i32::try_from(lookup.pairs.len())
					.map_err(|_| ClassFileError::CountOverflow { what: "lookupswitch npairs", len: lookup.pairs.len() })?;
				writer.write_i32(npairs)?;
				for (key, offset) in &lookup.pairs {
					writer.write_i32(*key)?;
					writer.write_i32(*offset)?;
				}
			},
			Instruction::Wide(Wide::Local { opcode, index }) => {
				writer.write_u8(opcode.byte())?;
				writer.write_u16(*index)?;
			},
			Instruction::Wide(Wide::Iinc { index, increment }) => {
				writer.write_u8(Opcode::Iinc.byte())?;
				writer.write_u16(*index)?;
				writer.write_i16(*increment)?;
			},
		}
		Ok(())
	}
}

/// Reads the zero bytes that align the operands of a switch to a multiple of four, counted from the start of the code.
///
/// Nonzero padding is refused, since encoding always writes zeros and couldn't give back the same bytes.
fn consume_switch_padding<S: ByteSource>(parser: &mut Parser<S>, opcode: Opcode) -> Result<u8> {
	let position = parser.context().byte_offset().wrapping_sub(parser.context().code_start_offset());
	let padding = ((4 - position % 4) % 4) as u8;
	if parser.consume_zeros(padding as usize)?.is_some() {
		return Err(malformed(opcode, "nonzero padding byte"));
	}
	Ok(padding)
}

fn write_padding(writer: &mut impl ByteSink, padding: u8) -> Result<()> {
	for _ in 0..padding {
		writer.write_u8(0)?;
	}
	Ok(())
}

fn decode_table_switch<S: ByteSource>(parser: &mut Parser<S>) -> Result<TableSwitch> {
	let padding = consume_switch_padding(parser, Opcode::Tableswitch)?;
	let default = parser.consume_i32()?;
	let low = parser.consume_i32()?;
	let high = parser.consume_i32()?;
	if low > high {
		return Err(malformed(Opcode::Tableswitch, format!("low {low} is greater than high {high}")));
	}

	let count = (high as i64 - low as i64 + 1) as usize;
	let mut offsets = Vec::with_capacity(count.min(1 << 14));
	for _ in 0..count {
		offsets.push(parser.consume_i32()?);
	}

	Ok(TableSwitch { padding, default, low, high, offsets })
}

fn decode_lookup_switch<S: ByteSource>(parser: &mut Parser<S>) -> Result<LookupSwitch> {
	let padding = consume_switch_padding(parser, Opcode::Lookupswitch)?;
	let default = parser.consume_i32()?;
	let npairs = parser.consume_i32()?;
	if npairs < 0 {
		return Err(malformed(Opcode::Lookupswitch, format!("npairs is negative: {npairs}")));
	}

	let mut pairs = Vec::with_capacity((npairs as usize).min(1 << 14));
	for _ in 0..npairs {
		let key = parser.consume_i32()?;
		let offset = parser.consume_i32()?;
		pairs.push((key, offset));
	}

	Ok(LookupSwitch { padding, default, pairs })
}

fn decode_wide<S: ByteSource>(parser: &mut Parser<S>) -> Result<Wide> {
	let byte = parser.consume_u8()?;
	match Opcode::from_byte(byte) {
		Some(Opcode::Iinc) => Ok(Wide::Iinc { index: parser.consume_u16()?, increment: parser.consume_i16()? }),
		Some(opcode @ (
			Opcode::Iload | Opcode::Lload | Opcode::Fload | Opcode::Dload | Opcode::Aload |
			Opcode::Istore | Opcode::Lstore | Opcode::Fstore | Opcode::Dstore | Opcode::Astore |
			Opcode::Ret
		)) => Ok(Wide::Local { opcode, index: parser.consume_u16()? }),
		_ => Err(ClassFileError::InvalidWideOpcode(byte)),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::error::ClassFileError;
	use crate::instruction::{ArrayType, implicit_instruction, ImplicitInstruction, ImplicitValue, Instruction, Wide};
	use crate::opcode::{Opcode, TypeTag};
	use crate::parser::Parser;

	fn decode_all(bytes: &[u8]) -> Vec<Instruction> {
		let len = bytes.len() as u64;
		let mut parser = Parser::new(bytes);
		let mut instructions = Vec::new();
		while parser.context().byte_offset() < len {
			instructions.push(parser.decode_instruction().unwrap());
		}
		instructions
	}

	fn decode_one(bytes: &[u8]) -> Result<Instruction, ClassFileError> {
		Parser::new(bytes).decode_instruction()
	}

	#[test]
	fn implicit_table() {
		assert_eq!(implicit_instruction(0x01), Some(ImplicitInstruction { opcode: Opcode::AconstNull, value: ImplicitValue::Null }));
		assert_eq!(implicit_instruction(0x08), Some(ImplicitInstruction { opcode: Opcode::Iconst5, value: ImplicitValue::Five }));
		assert_eq!(implicit_instruction(0x2a), Some(ImplicitInstruction { opcode: Opcode::Aload0, value: ImplicitValue::Zero }));
		assert_eq!(implicit_instruction(0x4e), Some(ImplicitInstruction { opcode: Opcode::Astore3, value: ImplicitValue::Three }));
		assert_eq!(implicit_instruction(0x10), None);
		assert_eq!(implicit_instruction(0x00), None);

		let implicit = (0..=u8::MAX).filter(|&b| implicit_instruction(b).is_some()).count();
		assert_eq!(implicit, 15 + 20 + 20);
	}

	#[test]
	fn constructor_body() {
		let code = decode_all(&[0x2a, 0xb7, 0x00, 0x01, 0xb1]);
		assert_eq!(code, vec![
			Instruction::Implicit(ImplicitInstruction { opcode: Opcode::Aload0, value: ImplicitValue::Zero }),
			Instruction::PoolRef { opcode: Opcode::Invokespecial, index: 1 },
			Instruction::Plain(Opcode::Return),
		]);
		assert_eq!(code[0].ty(), TypeTag::Reference);
		assert_eq!(code[1].operand_bytes().unwrap(), vec![0x00, 0x01]);
	}

	#[test]
	fn operands() {
		assert_eq!(decode_one(&[0x10, 0xff]).unwrap(), Instruction::Bipush(-1));
		assert_eq!(decode_one(&[0x11, 0x80, 0x00]).unwrap(), Instruction::Sipush(i16::MIN));
		assert_eq!(decode_one(&[0x84, 0x02, 0xfe]).unwrap(), Instruction::Iinc { index: 2, increment: -2 });
		assert_eq!(decode_one(&[0xa7, 0xff, 0xfd]).unwrap(), Instruction::Branch { opcode: Opcode::Goto, offset: -3 });
		assert_eq!(decode_one(&[0xbc, 0x0a]).unwrap(), Instruction::NewArray(ArrayType::Int));
		assert_eq!(decode_one(&[0xc5, 0x00, 0x07, 0x02]).unwrap(), Instruction::MultiANewArray { index: 7, dimensions: 2 });
		assert_eq!(decode_one(&[0xb9, 0x00, 0x03, 0x02, 0x00]).unwrap(), Instruction::InvokeInterface { index: 3, count: 2 });
		assert_eq!(decode_one(&[0xc4, 0x84, 0x01, 0x00, 0xff, 0x9c]).unwrap(), Instruction::Wide(Wide::Iinc { index: 256, increment: -100 }));
		assert_eq!(decode_one(&[0x12, 0x05]).unwrap(), Instruction::Ldc(5));
		assert_eq!(decode_one(&[0x13, 0x00, 0x05]).unwrap(), Instruction::LdcWide { opcode: Opcode::LdcW, index: 5 });
	}

	#[test]
	fn rejected() {
		assert!(matches!(decode_one(&[0xca]), Err(ClassFileError::UnimplementedOpcode(0xca))));
		assert!(matches!(decode_one(&[0xd0]), Err(ClassFileError::UnimplementedOpcode(0xd0))));
		assert!(matches!(decode_one(&[0xc4, 0x10, 0x00]), Err(ClassFileError::InvalidWideOpcode(0x10))));
		assert!(matches!(decode_one(&[0xbc, 0x03]), Err(ClassFileError::MalformedInstruction { opcode: 0xbc, .. })));
		assert!(matches!(decode_one(&[0xba, 0x00, 0x01, 0x00, 0x01]), Err(ClassFileError::MalformedInstruction { opcode: 0xba, .. })));
		assert!(matches!(decode_one(&[0xb6, 0x00]), Err(ClassFileError::UnexpectedEof)));
	}
}
