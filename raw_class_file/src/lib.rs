//! This crate contains a binary representation of a java class file, with the bytecode decoded into instructions.
//!
//! See the [Java Virtual Machine Specification, Chapter 4](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html)
//! for what the structures mean. Decoding a class file and encoding it again gives back the exact same bytes. Only the
//! structure is checked, not whether the constant pool references make sense.
//!
//! This code creates the same class as `javac` version `1.8` would, if ran on the class
//! ```java,ignore
//! public class Minimum {
//!     public Minimum() {}
//! }
//! ```
//!
//! You can write this to a `Vec<u8>` by using the [ClassFile::to_bytes] function.
//! ```
//! # use pretty_assertions::assert_eq;
//! use raw_class_file::{Attribute, ClassFile, ConstantPoolEntry, flags, ImplicitInstruction, ImplicitValue};
//! use raw_class_file::{Instruction, LineNumberTableEntry, MethodInfo, Opcode};
//! let class = ClassFile {
//!     minor_version: 0,
//!     major_version: 52,
//!     constant_pool: vec![
//!         // the constant pool indices start at 1, not at 0
//!         ConstantPoolEntry::Methodref { class_index: 3, name_and_type_index: 10 },
//!         ConstantPoolEntry::Class { name_index: 11 },
//!         ConstantPoolEntry::Class { name_index: 12 },
//!         ConstantPoolEntry::utf8("<init>"),
//!         ConstantPoolEntry::utf8("()V"),
//!         ConstantPoolEntry::utf8("Code"),
//!         ConstantPoolEntry::utf8("LineNumberTable"),
//!         ConstantPoolEntry::utf8("SourceFile"),
//!         ConstantPoolEntry::utf8("Minimum.java"),
//!         ConstantPoolEntry::NameAndType { name_index: 4, descriptor_index: 5 },
//!         ConstantPoolEntry::utf8("Minimum"),
//!         ConstantPoolEntry::utf8("java/lang/Object"),
//!     ].into(),
//!     access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
//!     this_class: 2,
//!     super_class: 3,
//!     interfaces: vec![],
//!     fields: vec![],
//!     methods: vec![
//!         MethodInfo {
//!             access_flags: flags::ACC_PUBLIC,
//!             name_index: 4,
//!             descriptor_index: 5,
//!             attributes: vec![
//!                 Attribute::Code {
//!                     attribute_name_index: 6,
//!                     max_stack: 1,
//!                     max_locals: 1,
//!                     code: vec![
//!                         Instruction::Implicit(ImplicitInstruction { opcode: Opcode::Aload0, value: ImplicitValue::Zero }),
//!                         Instruction::PoolRef { opcode: Opcode::Invokespecial, index: 1 },
//!                         Instruction::Plain(Opcode::Return),
//!                     ],
//!                     exception_table: vec![],
//!                     attributes: vec![
//!                         Attribute::LineNumberTable {
//!                             attribute_name_index: 7,
//!                             line_number_table: vec![
//!                                 LineNumberTableEntry { start_pc: 0, line_number: 1 },
//!                             ],
//!                         }
//!                     ],
//!                 },
//!             ],
//!         }
//!     ],
//!     attributes: vec![
//!         Attribute::SourceFile {
//!             attribute_name_index: 8,
//!             sourcefile_index: 9,
//!         }
//!     ],
//! };
//!
//! let bytes = class.to_bytes().unwrap();
//!
//! let class_2 = ClassFile::read(&mut std::io::Cursor::new(&bytes)).unwrap();
//!
//! assert_eq!(bytes.len(), class_2.length());
//! assert_eq!(class, class_2);
//! ```
//!
//! Parsing is done by a [`Parser`], which keeps its state in a [`ParserContext`]. Use [`Parser::with_options`] to keep
//! attributes this crate doesn't know about, instead of failing on them.

mod macros;
mod source;
mod error;
mod pool;
mod context;
mod parser;
mod opcode;
mod instruction;
mod stack_map;
mod attribute;
mod class;
pub mod flags;

use std::io::Read;

pub use source::{ByteSink, ByteSource};
pub use error::{ClassFileError, Result};
pub use pool::{ConstantKind, ConstantPool, ConstantPoolEntry};
pub use context::ParserContext;
pub use parser::{Parser, ParserOptions, UnknownAttributePolicy};
pub use opcode::{Opcode, opcode_to_category, OperandShape, TypeTag};
pub use instruction::{ArrayType, implicit_instruction, ImplicitInstruction, ImplicitValue, Instruction, LookupSwitch, TableSwitch, Wide};
pub use stack_map::{StackMapFrame, VerificationTypeInfo};
pub use attribute::{Attribute, AttributeKind, BootstrapMethodsEntry, code_length, ExceptionTableEntry, InnerClassesEntry};
pub use attribute::{LineNumberTableEntry, LocalVariableTableEntry, LocalVariableTypeTableEntry, MethodParametersEntry};
pub use class::{ClassFile, FieldInfo, MAGIC, MethodInfo};

/// Decodes a whole class file with the default [`ParserOptions`].
pub fn decode_class_file(source: impl Read) -> Result<ClassFile> {
	Parser::new(source).decode_class_file()
}

/// Encodes a class file, recomputing all counts and attribute lengths.
pub fn encode_class_file(class: &ClassFile) -> Result<Vec<u8>> {
	class.to_bytes()
}
