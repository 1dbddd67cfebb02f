//! Attributes of classes, fields, methods and `Code` attributes.
//!
//! On disk an attribute doesn't carry a tag: what its payload means is decided by the `Utf8` constant its
//! `attribute_name_index` points to.
use log::trace;
use crate::error::{ClassFileError, Result};
use crate::instruction::Instruction;
use crate::macros::jvms_notation;
use crate::parser::{Parser, UnknownAttributePolicy};
use crate::source::{ByteSink, ByteSource};
use crate::stack_map::StackMapFrame;

/// The attributes that can be decoded into something other than [`Attribute::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
	ConstantValue,
	Code,
	StackMapTable,
	Exceptions,
	InnerClasses,
	EnclosingMethod,
	Synthetic,
	Signature,
	SourceFile,
	SourceDebugExtension,
	LineNumberTable,
	LocalVariableTable,
	LocalVariableTypeTable,
	Deprecated,
	BootstrapMethods,
	MethodParameters,
	NestHost,
	NestMembers,
}

impl AttributeKind {
	pub fn from_name(name: &[u8]) -> Option<AttributeKind> {
		Some(match name {
			b"ConstantValue" => AttributeKind::ConstantValue,
			b"Code" => AttributeKind::Code,
			b"StackMapTable" => AttributeKind::StackMapTable,
			b"Exceptions" => AttributeKind::Exceptions,
			b"InnerClasses" => AttributeKind::InnerClasses,
			b"EnclosingMethod" => AttributeKind::EnclosingMethod,
			b"Synthetic" => AttributeKind::Synthetic,
			b"Signature" => AttributeKind::Signature,
			b"SourceFile" => AttributeKind::SourceFile,
			b"SourceDebugExtension" => AttributeKind::SourceDebugExtension,
			b"LineNumberTable" => AttributeKind::LineNumberTable,
			b"LocalVariableTable" => AttributeKind::LocalVariableTable,
			b"LocalVariableTypeTable" => AttributeKind::LocalVariableTypeTable,
			b"Deprecated" => AttributeKind::Deprecated,
			b"BootstrapMethods" => AttributeKind::BootstrapMethods,
			b"MethodParameters" => AttributeKind::MethodParameters,
			b"NestHost" => AttributeKind::NestHost,
			b"NestMembers" => AttributeKind::NestMembers,
			_ => return None,
		})
	}

	pub fn name(self) -> &'static str {
		match self {
			AttributeKind::ConstantValue => "ConstantValue",
			AttributeKind::Code => "Code",
			AttributeKind::StackMapTable => "StackMapTable",
			AttributeKind::Exceptions => "Exceptions",
			AttributeKind::InnerClasses => "InnerClasses",
			AttributeKind::EnclosingMethod => "EnclosingMethod",
			AttributeKind::Synthetic => "Synthetic",
			AttributeKind::Signature => "Signature",
			AttributeKind::SourceFile => "SourceFile",
			AttributeKind::SourceDebugExtension => "SourceDebugExtension",
			AttributeKind::LineNumberTable => "LineNumberTable",
			AttributeKind::LocalVariableTable => "LocalVariableTable",
			AttributeKind::LocalVariableTypeTable => "LocalVariableTypeTable",
			AttributeKind::Deprecated => "Deprecated",
			AttributeKind::BootstrapMethods => "BootstrapMethods",
			AttributeKind::MethodParameters => "MethodParameters",
			AttributeKind::NestHost => "NestHost",
			AttributeKind::NestMembers => "NestMembers",
		}
	}
}

jvms_notation! {
	struct ExceptionTableEntry {
		start_pc: u16,
		end_pc: u16,
		handler_pc: u16,
		/// `0` catches everything, as `finally` does.
		catch_type: u16,
	}
}

jvms_notation! {
	struct LineNumberTableEntry {
		start_pc: u16,
		line_number: u16,
	}
}

jvms_notation! {
	struct LocalVariableTableEntry {
		start_pc: u16,
		length: u16,
		name_index: u16,
		descriptor_index: u16,
		index: u16,
	}
}

jvms_notation! {
	struct LocalVariableTypeTableEntry {
		start_pc: u16,
		length: u16,
		name_index: u16,
		signature_index: u16,
		index: u16,
	}
}

jvms_notation! {
	struct InnerClassesEntry {
		inner_class_info_index: u16,
		outer_class_info_index: u16,
		inner_name_index: u16,
		inner_class_access_flags: u16,
	}
}

jvms_notation! {
	struct BootstrapMethodsEntry {
		bootstrap_method_ref: u16,
		bootstrap_arguments: Vec<u16> [u16],
	}
}

jvms_notation! {
	struct MethodParametersEntry {
		name_index: u16,
		access_flags: u16,
	}
}

/// An `attribute_info` structure.
///
/// The `attribute_length` isn't stored: it's computed from the content when writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
	ConstantValue {
		attribute_name_index: u16,
		constantvalue_index: u16,
	},
	Code {
		attribute_name_index: u16,
		max_stack: u16,
		max_locals: u16,
		code: Vec<Instruction>,
		exception_table: Vec<ExceptionTableEntry>,
		attributes: Vec<Attribute>,
	},
	StackMapTable {
		attribute_name_index: u16,
		entries: Vec<StackMapFrame>,
	},
	Exceptions {
		attribute_name_index: u16,
		exception_index_table: Vec<u16>,
	},
	InnerClasses {
		attribute_name_index: u16,
		classes: Vec<InnerClassesEntry>,
	},
	EnclosingMethod {
		attribute_name_index: u16,
		class_index: u16,
		method_index: u16,
	},
	Synthetic {
		attribute_name_index: u16,
	},
	Signature {
		attribute_name_index: u16,
		signature_index: u16,
	},
	SourceFile {
		attribute_name_index: u16,
		sourcefile_index: u16,
	},
	SourceDebugExtension {
		attribute_name_index: u16,
		debug_extension: Vec<u8>,
	},
	LineNumberTable {
		attribute_name_index: u16,
		/// In the order of the class file, which is not necessarily sorted by `start_pc`.
		line_number_table: Vec<LineNumberTableEntry>,
	},
	LocalVariableTable {
		attribute_name_index: u16,
		local_variable_table: Vec<LocalVariableTableEntry>,
	},
	LocalVariableTypeTable {
		attribute_name_index: u16,
		local_variable_type_table: Vec<LocalVariableTypeTableEntry>,
	},
	Deprecated {
		attribute_name_index: u16,
	},
	BootstrapMethods {
		attribute_name_index: u16,
		bootstrap_methods: Vec<BootstrapMethodsEntry>,
	},
	MethodParameters {
		attribute_name_index: u16,
		parameters: Vec<MethodParametersEntry>,
	},
	NestHost {
		attribute_name_index: u16,
		host_class_index: u16,
	},
	NestMembers {
		attribute_name_index: u16,
		classes: Vec<u16>,
	},
	/// An attribute with a name not in [`AttributeKind`], only produced with [`UnknownAttributePolicy::Preserve`].
	Unknown {
		attribute_name_index: u16,
		info: Vec<u8>,
	},
}

impl Attribute {
	pub fn attribute_name_index(&self) -> u16 {
		match self {
			Attribute::ConstantValue { attribute_name_index, .. } |
			Attribute::Code { attribute_name_index, .. } |
			Attribute::StackMapTable { attribute_name_index, .. } |
			Attribute::Exceptions { attribute_name_index, .. } |
			Attribute::InnerClasses { attribute_name_index, .. } |
			Attribute::EnclosingMethod { attribute_name_index, .. } |
			Attribute::Synthetic { attribute_name_index } |
			Attribute::Signature { attribute_name_index, .. } |
			Attribute::SourceFile { attribute_name_index, .. } |
			Attribute::SourceDebugExtension { attribute_name_index, .. } |
			Attribute::LineNumberTable { attribute_name_index, .. } |
			Attribute::LocalVariableTable { attribute_name_index, .. } |
			Attribute::LocalVariableTypeTable { attribute_name_index, .. } |
			Attribute::Deprecated { attribute_name_index } |
			Attribute::BootstrapMethods { attribute_name_index, .. } |
			Attribute::MethodParameters { attribute_name_index, .. } |
			Attribute::NestHost { attribute_name_index, .. } |
			Attribute::NestMembers { attribute_name_index, .. } |
			Attribute::Unknown { attribute_name_index, .. } => *attribute_name_index,
		}
	}

	/// Returns `None` for [`Attribute::Unknown`].
	pub fn kind(&self) -> Option<AttributeKind> {
		Some(match self {
			Attribute::ConstantValue { .. } => AttributeKind::ConstantValue,
			Attribute::Code { .. } => AttributeKind::Code,
			Attribute::StackMapTable { .. } => AttributeKind::StackMapTable,
			Attribute::Exceptions { .. } => AttributeKind::Exceptions,
			Attribute::InnerClasses { .. } => AttributeKind::InnerClasses,
			Attribute::EnclosingMethod { .. } => AttributeKind::EnclosingMethod,
			Attribute::Synthetic { .. } => AttributeKind::Synthetic,
			Attribute::Signature { .. } => AttributeKind::Signature,
			Attribute::SourceFile { .. } => AttributeKind::SourceFile,
			Attribute::SourceDebugExtension { .. } => AttributeKind::SourceDebugExtension,
			Attribute::LineNumberTable { .. } => AttributeKind::LineNumberTable,
			Attribute::LocalVariableTable { .. } => AttributeKind::LocalVariableTable,
			Attribute::LocalVariableTypeTable { .. } => AttributeKind::LocalVariableTypeTable,
			Attribute::Deprecated { .. } => AttributeKind::Deprecated,
			Attribute::BootstrapMethods { .. } => AttributeKind::BootstrapMethods,
			Attribute::MethodParameters { .. } => AttributeKind::MethodParameters,
			Attribute::NestHost { .. } => AttributeKind::NestHost,
			Attribute::NestMembers { .. } => AttributeKind::NestMembers,
			Attribute::Unknown { .. } => return None,
		})
	}

	pub(crate) fn decode<S: ByteSource>(parser: &mut Parser<S>) -> Result<Attribute> {
		let attribute_name_index = parser.consume_u16()?;
		let attribute_length = parser.consume_u32()?;

		let kind = AttributeKind::from_name(parser.context().constant_pool().get_utf8(attribute_name_index)?);
		let Some(kind) = kind else {
			let name = parser.context().get_constant_utf8(attribute_name_index)?;
			return match parser.options().unknown_attributes {
				UnknownAttributePolicy::Reject => Err(ClassFileError::UnknownAttribute(name)),
				UnknownAttributePolicy::Preserve => {
					trace!("keeping unknown attribute {name:?} of {attribute_length} bytes");
					let info = parser.consume_u8_vec(attribute_length as usize)?;
					Ok(Attribute::Unknown { attribute_name_index, info })
				},
			};
		};

		let max_depth = parser.options().max_attribute_depth;
		parser.context_mut().enter_attribute(max_depth)?;
		let start = parser.context().byte_offset();
		let attribute = decode_payload(parser, kind, attribute_name_index, attribute_length);
		parser.context_mut().leave_attribute();
		let attribute = attribute?;

		let actual = parser.context().byte_offset() - start;
		if actual != attribute_length as u64 {
			return Err(ClassFileError::AttributeLengthMismatch {
				name: kind.name().to_owned(),
				declared: attribute_length,
				actual,
			});
		}
		trace!("read attribute {} of {attribute_length} bytes", kind.name());

		Ok(attribute)
	}

	pub fn encode(&self, writer: &mut impl ByteSink) -> Result<()> {
		let mut payload = Vec::with_capacity(self.encoded_len() - 6);
		self.encode_payload(&mut payload)?;

		writer.write_u16(self.attribute_name_index())?;
		writer.write_usize_as_u32(payload.len(), "attribute_length")?;
		writer.write_u8_slice(&payload)
	}

	pub fn encoded_len(&self) -> usize {
		6 + self.payload_len()
	}

	fn encode_payload(&self, writer: &mut Vec<u8>) -> Result<()> {
		match self {
			Attribute::ConstantValue { constantvalue_index: index, .. } |
			Attribute::Signature { signature_index: index, .. } |
			Attribute::SourceFile { sourcefile_index: index, .. } |
			Attribute::NestHost { host_class_index: index, .. } => writer.write_u16(*index)?,
			Attribute::Code { max_stack, max_locals, code, exception_table, attributes, .. } => {
				writer.write_u16(*max_stack)?;
				writer.write_u16(*max_locals)?;
				writer.write_usize_as_u32(code_length(code), "code_length")?;
				for instruction in code {
					instruction.encode(writer)?;
				}
				encode_vec(writer, exception_table, "exception_table_length", ExceptionTableEntry::encode)?;
				encode_vec(writer, attributes, "attributes_count", Attribute::encode)?;
			},
			Attribute::StackMapTable { entries, .. } => {
				encode_vec(writer, entries, "number_of_entries", StackMapFrame::encode)?;
			},
			Attribute::Exceptions { exception_index_table: indices, .. } |
			Attribute::NestMembers { classes: indices, .. } => {
				writer.write_usize_as_u16(indices.len(), "number_of_classes")?;
				for index in indices {
					writer.write_u16(*index)?;
				}
			},
			Attribute::InnerClasses { classes, .. } => {
				encode_vec(writer, classes, "number_of_classes", InnerClassesEntry::encode)?;
			},
			Attribute::EnclosingMethod { class_index, method_index, .. } => {
				writer.write_u16(*class_index)?;
				writer.write_u16(*method_index)?;
			},
			Attribute::Synthetic { .. } | Attribute::Deprecated { .. } => {},
			Attribute::SourceDebugExtension { debug_extension: bytes, .. } |
			Attribute::Unknown { info: bytes, .. } => writer.write_u8_slice(bytes)?,
			Attribute::LineNumberTable { line_number_table, .. } => {
				encode_vec(writer, line_number_table, "line_number_table_length", LineNumberTableEntry::encode)?;
			},
			Attribute::LocalVariableTable { local_variable_table, .. } => {
				encode_vec(writer, local_variable_table, "local_variable_table_length", LocalVariableTableEntry::encode)?;
			},
			Attribute::LocalVariableTypeTable { local_variable_type_table, .. } => {
				encode_vec(writer, local_variable_type_table, "local_variable_type_table_length", LocalVariableTypeTableEntry::encode)?;
			},
			Attribute::BootstrapMethods { bootstrap_methods, .. } => {
				encode_vec(writer, bootstrap_methods, "num_bootstrap_methods", BootstrapMethodsEntry::encode)?;
			},
			Attribute::MethodParameters { parameters, .. } => {
				writer.write_usize_as_u8(parameters.len(), "parameters_count")?;
				for parameter in parameters {
					parameter.encode(writer)?;
				}
			},
		}
		Ok(())
	}

	fn payload_len(&self) -> usize {
		match self {
			Attribute::ConstantValue { .. } | Attribute::Signature { .. } | Attribute::SourceFile { .. } |
				Attribute::NestHost { .. } => 2,
			Attribute::Code { code, exception_table, attributes, .. } => {
				2 + 2 + 4 + code_length(code) +
					2 + exception_table.iter().map(ExceptionTableEntry::encoded_len).sum::<usize>() +
					2 + attributes.iter().map(Attribute::encoded_len).sum::<usize>()
			},
			Attribute::StackMapTable { entries, .. } => 2 + entries.iter().map(StackMapFrame::encoded_len).sum::<usize>(),
			Attribute::Exceptions { exception_index_table: indices, .. } |
				Attribute::NestMembers { classes: indices, .. } => 2 + 2 * indices.len(),
			Attribute::InnerClasses { classes, .. } => 2 + classes.iter().map(InnerClassesEntry::encoded_len).sum::<usize>(),
			Attribute::EnclosingMethod { .. } => 4,
			Attribute::Synthetic { .. } | Attribute::Deprecated { .. } => 0,
			Attribute::SourceDebugExtension { debug_extension: bytes, .. } |
				Attribute::Unknown { info: bytes, .. } => bytes.len(),
			Attribute::LineNumberTable { line_number_table, .. } => 2 + 4 * line_number_table.len(),
			Attribute::LocalVariableTable { local_variable_table, .. } => 2 + 10 * local_variable_table.len(),
			Attribute::LocalVariableTypeTable { local_variable_type_table, .. } => 2 + 10 * local_variable_type_table.len(),
			Attribute::BootstrapMethods { bootstrap_methods, .. } => {
				2 + bootstrap_methods.iter().map(BootstrapMethodsEntry::encoded_len).sum::<usize>()
			},
			Attribute::MethodParameters { parameters, .. } => 1 + 4 * parameters.len(),
		}
	}
}

/// The sum of the sizes of all instructions.
pub fn code_length(code: &[Instruction]) -> usize {
	code.iter().map(Instruction::size_in_bytes).sum()
}

fn decode_payload<S: ByteSource>(
	parser: &mut Parser<S>,
	kind: AttributeKind,
	attribute_name_index: u16,
	attribute_length: u32,
) -> Result<Attribute> {
	Ok(match kind {
		AttributeKind::ConstantValue => Attribute::ConstantValue {
			attribute_name_index,
			constantvalue_index: parser.consume_u16()?,
		},
		AttributeKind::Code => {
			let max_stack = parser.consume_u16()?;
			let max_locals = parser.consume_u16()?;
			let code = decode_code(parser)?;
			let exception_table = decode_vec(parser, ExceptionTableEntry::decode)?;
			let attributes = decode_vec(parser, Attribute::decode)?;
			Attribute::Code { attribute_name_index, max_stack, max_locals, code, exception_table, attributes }
		},
		AttributeKind::StackMapTable => Attribute::StackMapTable {
			attribute_name_index,
			entries: decode_vec(parser, StackMapFrame::decode)?,
		},
		AttributeKind::Exceptions => Attribute::Exceptions {
			attribute_name_index,
			exception_index_table: decode_vec(parser, Parser::consume_u16)?,
		},
		AttributeKind::InnerClasses => Attribute::InnerClasses {
			attribute_name_index,
			classes: decode_vec(parser, InnerClassesEntry::decode)?,
		},
		AttributeKind::EnclosingMethod => Attribute::EnclosingMethod {
			attribute_name_index,
			class_index: parser.consume_u16()?,
			method_index: parser.consume_u16()?,
		},
		AttributeKind::Synthetic => Attribute::Synthetic { attribute_name_index },
		AttributeKind::Signature => Attribute::Signature {
			attribute_name_index,
			signature_index: parser.consume_u16()?,
		},
		AttributeKind::SourceFile => Attribute::SourceFile {
			attribute_name_index,
			sourcefile_index: parser.consume_u16()?,
		},
		AttributeKind::SourceDebugExtension => Attribute::SourceDebugExtension {
			attribute_name_index,
			debug_extension: parser.consume_u8_vec(attribute_length as usize)?,
		},
		AttributeKind::LineNumberTable => Attribute::LineNumberTable {
			attribute_name_index,
			line_number_table: decode_vec(parser, LineNumberTableEntry::decode)?,
		},
		AttributeKind::LocalVariableTable => Attribute::LocalVariableTable {
			attribute_name_index,
			local_variable_table: decode_vec(parser, LocalVariableTableEntry::decode)?,
		},
		AttributeKind::LocalVariableTypeTable => Attribute::LocalVariableTypeTable {
			attribute_name_index,
			local_variable_type_table: decode_vec(parser, LocalVariableTypeTableEntry::decode)?,
		},
		AttributeKind::Deprecated => Attribute::Deprecated { attribute_name_index },
		AttributeKind::BootstrapMethods => Attribute::BootstrapMethods {
			attribute_name_index,
			bootstrap_methods: decode_vec(parser, BootstrapMethodsEntry::decode)?,
		},
		AttributeKind::MethodParameters => {
			let count = parser.consume_u8()?;
			let mut parameters = Vec::with_capacity(count as usize);
			for _ in 0..count {
				parameters.push(MethodParametersEntry::decode(parser)?);
			}
			Attribute::MethodParameters { attribute_name_index, parameters }
		},
		AttributeKind::NestHost => Attribute::NestHost {
			attribute_name_index,
			host_class_index: parser.consume_u16()?,
		},
		AttributeKind::NestMembers => Attribute::NestMembers {
			attribute_name_index,
			classes: decode_vec(parser, Parser::consume_u16)?,
		},
	})
}

/// Reads `code_length` and then instructions until exactly that many bytes are used up.
fn decode_code<S: ByteSource>(parser: &mut Parser<S>) -> Result<Vec<Instruction>> {
	let code_length = parser.consume_u32()?;

	let code_start = parser.context().byte_offset();
	parser.context_mut().set_code_start_offset(code_start);

	let mut code = Vec::new();
	let mut decoded = 0u64;
	while decoded < code_length as u64 {
		let instruction = parser.decode_instruction()?;
		decoded += instruction.size_in_bytes() as u64;
		code.push(instruction);
	}

	if decoded != code_length as u64 {
		return Err(ClassFileError::CodeLengthMismatch {
			declared: code_length,
			decoded: u32::try_from(decoded).unwrap_or(u32::MAX),
		});
	}
	trace!("read {} instructions in {code_length} bytes of code", code.len());

	Ok(code)
}

fn decode_vec<S: ByteSource, T>(
	parser: &mut Parser<S>,
	mut decode: impl FnMut(&mut Parser<S>) -> Result<T>,
) -> Result<Vec<T>> {
	let count = parser.consume_u16()?;
	let mut vec = Vec::with_capacity(count as usize);
	for _ in 0..count {
		vec.push(decode(parser)?);
	}
	Ok(vec)
}

fn encode_vec<W: ByteSink, T>(
	writer: &mut W,
	vec: &[T],
	what: &'static str,
	mut encode: impl FnMut(&T, &mut W) -> Result<()>,
) -> Result<()> {
	writer.write_usize_as_u16(vec.len(), what)?;
	for t in vec {
		encode(t, writer)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::attribute::{Attribute, AttributeKind, LineNumberTableEntry};
	use crate::error::ClassFileError;
	use crate::parser::Parser;
	use crate::pool::ConstantPoolEntry;

	fn parser_with_names<'a>(bytes: &'a [u8], names: &[&str]) -> Parser<&'a [u8]> {
		let mut parser = Parser::new(bytes);
		for name in names {
			parser.context_mut().add_constant(ConstantPoolEntry::utf8(name));
		}
		parser
	}

	#[test]
	fn kind_names() {
		assert_eq!(AttributeKind::from_name(b"LineNumberTable"), Some(AttributeKind::LineNumberTable));
		assert_eq!(AttributeKind::from_name(b"RuntimeVisibleAnnotations"), None);
		assert_eq!(AttributeKind::NestMembers.name(), "NestMembers");
	}

	#[test]
	fn line_number_table() {
		let bytes: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x00, 0x04, 0x00, 0x02];
		let mut parser = parser_with_names(bytes, &["LineNumberTable"]);
		let attribute = parser.decode_attribute().unwrap();

		assert_eq!(attribute, Attribute::LineNumberTable {
			attribute_name_index: 1,
			line_number_table: vec![
				LineNumberTableEntry { start_pc: 0, line_number: 3 },
				LineNumberTableEntry { start_pc: 4, line_number: 2 },
			],
		});

		let mut written = Vec::new();
		attribute.encode(&mut written).unwrap();
		assert_eq!(written, bytes);
		assert_eq!(attribute.encoded_len(), bytes.len());
	}

	#[test]
	fn declared_length_must_match() {
		let bytes: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x00, 0x07, 0x00];
		let mut parser = parser_with_names(bytes, &["SourceFile"]);
		match parser.decode_attribute() {
			Err(ClassFileError::AttributeLengthMismatch { name, declared: 3, actual: 2 }) => assert_eq!(name, "SourceFile"),
			other => panic!("expected an AttributeLengthMismatch error, got {other:?}"),
		}
	}

	#[test]
	fn method_parameters_count_is_a_byte() {
		let attribute = Attribute::MethodParameters {
			attribute_name_index: 1,
			parameters: vec![crate::attribute::MethodParametersEntry { name_index: 2, access_flags: 0x0010 }],
		};
		let mut written = Vec::new();
		attribute.encode(&mut written).unwrap();
		assert_eq!(written, vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x01, 0x00, 0x02, 0x00, 0x10]);

		let mut parser = parser_with_names(&written, &["MethodParameters"]);
		assert_eq!(parser.decode_attribute().unwrap(), attribute);
	}
}
