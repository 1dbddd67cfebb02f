//! Opcodes, and how many operand bytes each of them has.

/// The type an instruction works on or produces.
///
/// Only used for displaying instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
	Byte,
	Short,
	Int,
	Long,
	Char,
	Float,
	Double,
	Reference,
	None,
}

macro_rules! opcodes {
	( $( $name:ident = $byte:literal, $mnemonic:literal, $ty:ident; )* ) => {
		/// All opcodes of the JVM instruction set, including the reserved ones.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		#[repr(u8)]
		pub enum Opcode {
			$( $name = $byte, )*
		}

		impl Opcode {
			pub const fn from_byte(byte: u8) -> Option<Opcode> {
				match byte {
					$( $byte => Some(Opcode::$name), )*
					_ => None,
				}
			}

			pub const fn mnemonic(self) -> &'static str {
				match self {
					$( Opcode::$name => $mnemonic, )*
				}
			}

			pub const fn type_tag(self) -> TypeTag {
				match self {
					$( Opcode::$name => TypeTag::$ty, )*
				}
			}
		}
	};
}

opcodes! {
	Nop = 0x00, "nop", None;
	AconstNull = 0x01, "aconst_null", Reference;
	IconstM1 = 0x02, "iconst_m1", Int;
	Iconst0 = 0x03, "iconst_0", Int;
	Iconst1 = 0x04, "iconst_1", Int;
	Iconst2 = 0x05, "iconst_2", Int;
	Iconst3 = 0x06, "iconst_3", Int;
	Iconst4 = 0x07, "iconst_4", Int;
	Iconst5 = 0x08, "iconst_5", Int;
	Lconst0 = 0x09, "lconst_0", Long;
	Lconst1 = 0x0a, "lconst_1", Long;
	Fconst0 = 0x0b, "fconst_0", Float;
	Fconst1 = 0x0c, "fconst_1", Float;
	Fconst2 = 0x0d, "fconst_2", Float;
	Dconst0 = 0x0e, "dconst_0", Double;
	Dconst1 = 0x0f, "dconst_1", Double;
	Bipush = 0x10, "bipush", Int;
	Sipush = 0x11, "sipush", Int;
	Ldc = 0x12, "ldc", None;
	LdcW = 0x13, "ldc_w", None;
	Ldc2W = 0x14, "ldc2_w", None;
	Iload = 0x15, "iload", Int;
	Lload = 0x16, "lload", Long;
	Fload = 0x17, "fload", Float;
	Dload = 0x18, "dload", Double;
	Aload = 0x19, "aload", Reference;
	Iload0 = 0x1a, "iload_0", Int;
	Iload1 = 0x1b, "iload_1", Int;
	Iload2 = 0x1c, "iload_2", Int;
	Iload3 = 0x1d, "iload_3", Int;
	Lload0 = 0x1e, "lload_0", Long;
	Lload1 = 0x1f, "lload_1", Long;
	Lload2 = 0x20, "lload_2", Long;
	Lload3 = 0x21, "lload_3", Long;
	Fload0 = 0x22, "fload_0", Float;
	Fload1 = 0x23, "fload_1", Float;
	Fload2 = 0x24, "fload_2", Float;
	Fload3 = 0x25, "fload_3", Float;
	Dload0 = 0x26, "dload_0", Double;
	Dload1 = 0x27, "dload_1", Double;
	Dload2 = 0x28, "dload_2", Double;
	Dload3 = 0x29, "dload_3", Double;
	Aload0 = 0x2a, "aload_0", Reference;
	Aload1 = 0x2b, "aload_1", Reference;
	Aload2 = 0x2c, "aload_2", Reference;
	Aload3 = 0x2d, "aload_3", Reference;
	Iaload = 0x2e, "iaload", Int;
	Laload = 0x2f, "laload", Long;
	Faload = 0x30, "faload", Float;
	Daload = 0x31, "daload", Double;
	Aaload = 0x32, "aaload", Reference;
	Baload = 0x33, "baload", Byte;
	Caload = 0x34, "caload", Char;
	Saload = 0x35, "saload", Short;
	Istore = 0x36, "istore", Int;
	Lstore = 0x37, "lstore", Long;
	Fstore = 0x38, "fstore", Float;
	Dstore = 0x39, "dstore", Double;
	Astore = 0x3a, "astore", Reference;
	Istore0 = 0x3b, "istore_0", Int;
	Istore1 = 0x3c, "istore_1", Int;
	Istore2 = 0x3d, "istore_2", Int;
	Istore3 = 0x3e, "istore_3", Int;
	Lstore0 = 0x3f, "lstore_0", Long;
	Lstore1 = 0x40, "lstore_1", Long;
	Lstore2 = 0x41, "lstore_2", Long;
	Lstore3 = 0x42, "lstore_3", Long;
	Fstore0 = 0x43, "fstore_0", Float;
	Fstore1 = 0x44, "fstore_1", Float;
	Fstore2 = 0x45, "fstore_2", Float;
	Fstore3 = 0x46, "fstore_3", Float;
	Dstore0 = 0x47, "dstore_0", Double;
	Dstore1 = 0x48, "dstore_1", Double;
	Dstore2 = 0x49, "dstore_2", Double;
	Dstore3 = 0x4a, "dstore_3", Double;
	Astore0 = 0x4b, "astore_0", Reference;
	Astore1 = 0x4c, "astore_1", Reference;
	Astore2 = 0x4d, "astore_2", Reference;
	Astore3 = 0x4e, "astore_3", Reference;
	Iastore = 0x4f, "iastore", Int;
	Lastore = 0x50, "lastore", Long;
	Fastore = 0x51, "fastore", Float;
	Dastore = 0x52, "dastore", Double;
	Aastore = 0x53, "aastore", Reference;
	Bastore = 0x54, "bastore", Byte;
	Castore = 0x55, "castore", Char;
	Sastore = 0x56, "sastore", Short;
	Pop = 0x57, "pop", None;
	Pop2 = 0x58, "pop2", None;
	Dup = 0x59, "dup", None;
	DupX1 = 0x5a, "dup_x1", None;
	DupX2 = 0x5b, "dup_x2", None;
	Dup2 = 0x5c, "dup2", None;
	Dup2X1 = 0x5d, "dup2_x1", None;
	Dup2X2 = 0x5e, "dup2_x2", None;
	Swap = 0x5f, "swap", None;
	Iadd = 0x60, "iadd", Int;
	Ladd = 0x61, "ladd", Long;
	Fadd = 0x62, "fadd", Float;
	Dadd = 0x63, "dadd", Double;
	Isub = 0x64, "isub", Int;
	Lsub = 0x65, "lsub", Long;
	Fsub = 0x66, "fsub", Float;
	Dsub = 0x67, "dsub", Double;
	Imul = 0x68, "imul", Int;
	Lmul = 0x69, "lmul", Long;
	Fmul = 0x6a, "fmul", Float;
	Dmul = 0x6b, "dmul", Double;
	Idiv = 0x6c, "idiv", Int;
	Ldiv = 0x6d, "ldiv", Long;
	Fdiv = 0x6e, "fdiv", Float;
	Ddiv = 0x6f, "ddiv", Double;
	Irem = 0x70, "irem", Int;
	Lrem = 0x71, "lrem", Long;
	Frem = 0x72, "frem", Float;
	Drem = 0x73, "drem", Double;
	Ineg = 0x74, "ineg", Int;
	Lneg = 0x75, "lneg", Long;
	Fneg = 0x76, "fneg", Float;
	Dneg = 0x77, "dneg", Double;
	Ishl = 0x78, "ishl", Int;
	Lshl = 0x79, "lshl", Long;
	Ishr = 0x7a, "ishr", Int;
	Lshr = 0x7b, "lshr", Long;
	Iushr = 0x7c, "iushr", Int;
	Lushr = 0x7d, "lushr", Long;
	Iand = 0x7e, "iand", Int;
	Land = 0x7f, "land", Long;
	Ior = 0x80, "ior", Int;
	Lor = 0x81, "lor", Long;
	Ixor = 0x82, "ixor", Int;
	Lxor = 0x83, "lxor", Long;
	Iinc = 0x84, "iinc", None;
	I2l = 0x85, "i2l", Long;
	I2f = 0x86, "i2f", Float;
	I2d = 0x87, "i2d", Double;
	L2i = 0x88, "l2i", Int;
	L2f = 0x89, "l2f", Float;
	L2d = 0x8a, "l2d", Double;
	F2i = 0x8b, "f2i", Int;
	F2l = 0x8c, "f2l", Long;
	F2d = 0x8d, "f2d", Double;
	D2i = 0x8e, "d2i", Int;
	D2l = 0x8f, "d2l", Long;
	D2f = 0x90, "d2f", Float;
	I2b = 0x91, "i2b", Byte;
	I2c = 0x92, "i2c", Char;
	I2s = 0x93, "i2s", Short;
	Lcmp = 0x94, "lcmp", Int;
	Fcmpl = 0x95, "fcmpl", Int;
	Fcmpg = 0x96, "fcmpg", Int;
	Dcmpl = 0x97, "dcmpl", Int;
	Dcmpg = 0x98, "dcmpg", Int;
	Ifeq = 0x99, "ifeq", None;
	Ifne = 0x9a, "ifne", None;
	Iflt = 0x9b, "iflt", None;
	Ifge = 0x9c, "ifge", None;
	Ifgt = 0x9d, "ifgt", None;
	Ifle = 0x9e, "ifle", None;
	IfIcmpeq = 0x9f, "if_icmpeq", None;
	IfIcmpne = 0xa0, "if_icmpne", None;
	IfIcmplt = 0xa1, "if_icmplt", None;
	IfIcmpge = 0xa2, "if_icmpge", None;
	IfIcmpgt = 0xa3, "if_icmpgt", None;
	IfIcmple = 0xa4, "if_icmple", None;
	IfAcmpeq = 0xa5, "if_acmpeq", None;
	IfAcmpne = 0xa6, "if_acmpne", None;
	Goto = 0xa7, "goto", None;
	Jsr = 0xa8, "jsr", None;
	Ret = 0xa9, "ret", None;
	Tableswitch = 0xaa, "tableswitch", None;
	Lookupswitch = 0xab, "lookupswitch", None;
	Ireturn = 0xac, "ireturn", Int;
	Lreturn = 0xad, "lreturn", Long;
	Freturn = 0xae, "freturn", Float;
	Dreturn = 0xaf, "dreturn", Double;
	Areturn = 0xb0, "areturn", Reference;
	Return = 0xb1, "return", None;
	Getstatic = 0xb2, "getstatic", None;
	Putstatic = 0xb3, "putstatic", None;
	Getfield = 0xb4, "getfield", None;
	Putfield = 0xb5, "putfield", None;
	Invokevirtual = 0xb6, "invokevirtual", None;
	Invokespecial = 0xb7, "invokespecial", None;
	Invokestatic = 0xb8, "invokestatic", None;
	Invokeinterface = 0xb9, "invokeinterface", None;
	Invokedynamic = 0xba, "invokedynamic", None;
	New = 0xbb, "new", Reference;
	Newarray = 0xbc, "newarray", Reference;
	Anewarray = 0xbd, "anewarray", Reference;
	Arraylength = 0xbe, "arraylength", Int;
	Athrow = 0xbf, "athrow", None;
	Checkcast = 0xc0, "checkcast", Reference;
	Instanceof = 0xc1, "instanceof", Int;
	Monitorenter = 0xc2, "monitorenter", None;
	Monitorexit = 0xc3, "monitorexit", None;
	Wide = 0xc4, "wide", None;
	Multianewarray = 0xc5, "multianewarray", Reference;
	Ifnull = 0xc6, "ifnull", None;
	Ifnonnull = 0xc7, "ifnonnull", None;
	GotoW = 0xc8, "goto_w", None;
	JsrW = 0xc9, "jsr_w", None;
	Breakpoint = 0xca, "breakpoint", None;
	Impdep1 = 0xfe, "impdep1", None;
	Impdep2 = 0xff, "impdep2", None;
}

impl Opcode {
	pub const fn byte(self) -> u8 {
		self as u8
	}

	pub const fn shape(self) -> OperandShape {
		opcode_to_category(self.byte())
	}
}

impl std::fmt::Display for Opcode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.mnemonic())
	}
}

/// How the operands following an opcode are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
	None,
	/// The operand is part of the opcode, like the `0` in `iload_0`.
	Implicit,
	OneByte,
	TwoBytes,
	ThreeBytes,
	FourBytes,
	/// `tableswitch`, `lookupswitch` and `wide`.
	Variable,
	/// Reserved or unassigned opcodes. These can't appear in a class file.
	Invalid,
}

impl OperandShape {
	/// The number of operand bytes, if it doesn't depend on the operands themselves.
	pub const fn operand_len(self) -> Option<usize> {
		match self {
			OperandShape::None | OperandShape::Implicit => Some(0),
			OperandShape::OneByte => Some(1),
			OperandShape::TwoBytes => Some(2),
			OperandShape::ThreeBytes => Some(3),
			OperandShape::FourBytes => Some(4),
			OperandShape::Variable | OperandShape::Invalid => None,
		}
	}
}

/// Maps any byte to the shape of the operands of the opcode it stands for.
pub const fn opcode_to_category(byte: u8) -> OperandShape {
	match byte {
		0x00 => OperandShape::None,
		0x01..=0x0f => OperandShape::Implicit,
		0x10 => OperandShape::OneByte, // bipush
		0x11 => OperandShape::TwoBytes, // sipush
		0x12 => OperandShape::OneByte, // ldc
		0x13..=0x14 => OperandShape::TwoBytes,
		0x15..=0x19 => OperandShape::OneByte,
		0x1a..=0x2d => OperandShape::Implicit,
		0x2e..=0x35 => OperandShape::None,
		0x36..=0x3a => OperandShape::OneByte,
		0x3b..=0x4e => OperandShape::Implicit,
		0x4f..=0x83 => OperandShape::None,
		0x84 => OperandShape::TwoBytes, // iinc
		0x85..=0x98 => OperandShape::None,
		0x99..=0xa8 => OperandShape::TwoBytes,
		0xa9 => OperandShape::OneByte, // ret
		0xaa..=0xab => OperandShape::Variable,
		0xac..=0xb1 => OperandShape::None,
		0xb2..=0xb8 => OperandShape::TwoBytes,
		0xb9..=0xba => OperandShape::FourBytes,
		0xbb => OperandShape::TwoBytes,
		0xbc => OperandShape::OneByte, // newarray
		0xbd => OperandShape::TwoBytes,
		0xbe..=0xbf => OperandShape::None,
		0xc0..=0xc1 => OperandShape::TwoBytes,
		0xc2..=0xc3 => OperandShape::None,
		0xc4 => OperandShape::Variable, // wide
		0xc5 => OperandShape::ThreeBytes, // multianewarray
		0xc6..=0xc7 => OperandShape::TwoBytes,
		0xc8..=0xc9 => OperandShape::FourBytes,
		_ => OperandShape::Invalid,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::opcode::{Opcode, opcode_to_category, OperandShape, TypeTag};

	#[test]
	fn every_byte_has_a_category() {
		for byte in 0..=u8::MAX {
			let shape = opcode_to_category(byte);
			match Opcode::from_byte(byte) {
				Some(Opcode::Breakpoint | Opcode::Impdep1 | Opcode::Impdep2) | None => {
					assert_eq!(shape, OperandShape::Invalid, "byte {byte:#04x}");
				},
				Some(opcode) => {
					assert_eq!(opcode.byte(), byte);
					assert_ne!(shape, OperandShape::Invalid, "opcode {opcode}");
				},
			}
		}
	}

	#[test]
	fn names() {
		assert_eq!(Opcode::from_byte(0x2a), Some(Opcode::Aload0));
		assert_eq!(Opcode::Aload0.mnemonic(), "aload_0");
		assert_eq!(Opcode::Invokespecial.to_string(), "invokespecial");
		assert_eq!(Opcode::Lastore.type_tag(), TypeTag::Long);
		assert_eq!(Opcode::I2c.type_tag(), TypeTag::Char);
		assert_eq!(Opcode::Tableswitch.shape(), OperandShape::Variable);
		assert_eq!(Opcode::from_byte(0xcb), None);
	}
}
