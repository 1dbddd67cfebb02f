//! Renders a [`ClassFile`] the way `javap -verbose` does.
//!
//! The output only approximates the one of `javap`: descriptors are turned into java types, but signatures and
//! annotations aren't looked at.
use std::fmt::Write;
use anyhow::{Context, Result};
use raw_class_file::flags::{self, flag_names, FlagTarget};
use raw_class_file::{Attribute, ClassFile, ClassFileError, ConstantKind, ConstantPool, ConstantPoolEntry, FieldInfo};
use raw_class_file::{Instruction, LookupSwitch, MethodInfo, StackMapFrame, TableSwitch, Wide};

/// Renders the whole class file, including the constant pool and the bytecode of all methods.
pub(crate) fn render(class: &ClassFile) -> Result<String> {
	let mut printer = Printer { pool: &class.constant_pool, out: String::new() };
	printer.class(class)?;
	Ok(printer.out)
}

struct Printer<'a> {
	pool: &'a ConstantPool,
	out: String,
}

impl Printer<'_> {
	fn class(&mut self, class: &ClassFile) -> Result<()> {
		let this_class = self.pool.get_class_name(class.this_class)
			.context("failed to resolve the name of this_class")?;

		let mut keywords = Vec::new();
		if class.access_flags & flags::ACC_PUBLIC != 0 {
			keywords.push("public");
		}
		if class.access_flags & flags::ACC_FINAL != 0 {
			keywords.push("final");
		}
		if class.access_flags & flags::ACC_INTERFACE != 0 {
			keywords.push("interface");
		} else {
			if class.access_flags & flags::ACC_ABSTRACT != 0 {
				keywords.push("abstract");
			}
			keywords.push("class");
		}
		writeln!(self.out, "{} {}", keywords.join(" "), this_class.replace('/', "."))?;

		writeln!(self.out, "  minor version: {}", class.minor_version)?;
		writeln!(self.out, "  major version: {}", class.major_version)?;
		writeln!(self.out, "  flags: {}", format_flags(class.access_flags, FlagTarget::Class))?;
		self.with_comment(&format!("  this_class: #{}", class.this_class), Some(this_class.clone()), 42)?;
		// java/lang/Object has no super class
		let super_class = (class.super_class != 0).then(|| self.pool.get_class_name(class.super_class).ok()).flatten();
		self.with_comment(&format!("  super_class: #{}", class.super_class), super_class, 42)?;
		writeln!(self.out, "  interfaces: {}, fields: {}, methods: {}, attributes: {}",
			class.interfaces.len(), class.fields.len(), class.methods.len(), class.attributes.len())?;

		self.constant_pool()?;

		writeln!(self.out, "{{")?;
		let simple_name = this_class.rsplit('/').next().unwrap_or(&this_class).to_owned();
		for (i, field) in class.fields.iter().enumerate() {
			if i != 0 {
				writeln!(self.out)?;
			}
			self.field(field)?;
		}
		for (i, method) in class.methods.iter().enumerate() {
			if i != 0 || !class.fields.is_empty() {
				writeln!(self.out)?;
			}
			self.method(method, &simple_name)?;
		}
		writeln!(self.out, "}}")?;

		for attribute in &class.attributes {
			self.class_attribute(attribute)?;
		}
		Ok(())
	}

	fn constant_pool(&mut self) -> Result<()> {
		writeln!(self.out, "Constant pool:")?;
		let pool = self.pool;
		for (index, entry) in pool.iter() {
			let arguments = match entry {
				ConstantPoolEntry::Class { name_index } => format!("#{name_index}"),
				ConstantPoolEntry::Fieldref { class_index, name_and_type_index } |
				ConstantPoolEntry::Methodref { class_index, name_and_type_index } |
				ConstantPoolEntry::InterfaceMethodref { class_index, name_and_type_index } =>
					format!("#{class_index}.#{name_and_type_index}"),
				ConstantPoolEntry::String { string_index } => format!("#{string_index}"),
				ConstantPoolEntry::NameAndType { name_index, descriptor_index } => format!("#{name_index}:#{descriptor_index}"),
				ConstantPoolEntry::MethodHandle { reference_kind, reference_index } => format!("{reference_kind}:#{reference_index}"),
				ConstantPoolEntry::MethodType { descriptor_index } => format!("#{descriptor_index}"),
				ConstantPoolEntry::InvokeDynamic { bootstrap_method_attr_index, name_and_type_index } =>
					format!("#{bootstrap_method_attr_index}:#{name_and_type_index}"),
				ConstantPoolEntry::Integer { .. } | ConstantPoolEntry::Float { .. } | ConstantPoolEntry::Long { .. } |
				ConstantPoolEntry::Double { .. } | ConstantPoolEntry::Utf8 { .. } => {
					let value = constant_value(pool, entry)?;
					writeln!(self.out, "{:>5} = {:<19}{value}", format!("#{index}"), entry.kind().to_string())?;
					continue;
				},
			};
			let line = format!("{:>5} = {:<19}{arguments}", format!("#{index}"), entry.kind().to_string());
			self.with_comment(&line, constant_value(pool, entry).ok(), 42)?;
		}
		Ok(())
	}

	fn field(&mut self, field: &FieldInfo) -> Result<()> {
		let name = self.pool.get_utf8_lossy(field.name_index).context("failed to resolve a field name")?;
		let descriptor = self.pool.get_utf8_lossy(field.descriptor_index).context("failed to resolve a field descriptor")?;

		let ty = java_type(&descriptor).map_or_else(|| descriptor.clone(), |(ty, _)| ty);
		writeln!(self.out, "  {}{ty} {name};", modifiers(field.access_flags, FlagTarget::Field))?;
		writeln!(self.out, "    descriptor: {descriptor}")?;
		writeln!(self.out, "    flags: {}", format_flags(field.access_flags, FlagTarget::Field))?;
		for attribute in &field.attributes {
			self.member_attribute(attribute)?;
		}
		Ok(())
	}

	fn method(&mut self, method: &MethodInfo, simple_name: &str) -> Result<()> {
		let name = self.pool.get_utf8_lossy(method.name_index).context("failed to resolve a method name")?;
		let descriptor = self.pool.get_utf8_lossy(method.descriptor_index).context("failed to resolve a method descriptor")?;

		let modifiers = modifiers(method.access_flags, FlagTarget::Method);
		match (name.as_str(), method_types(&descriptor)) {
			("<clinit>", _) => writeln!(self.out, "  static {{}};")?,
			("<init>", Some((parameters, _))) => writeln!(self.out, "  {modifiers}{simple_name}({});", parameters.join(", "))?,
			(_, Some((parameters, return_type))) =>
				writeln!(self.out, "  {modifiers}{return_type} {name}({});", parameters.join(", "))?,
			(_, None) => writeln!(self.out, "  {modifiers}{name}{descriptor};")?,
		}
		writeln!(self.out, "    descriptor: {descriptor}")?;
		writeln!(self.out, "    flags: {}", format_flags(method.access_flags, FlagTarget::Method))?;
		for attribute in &method.attributes {
			self.member_attribute(attribute)?;
		}
		Ok(())
	}

	/// Attributes of fields and methods.
	fn member_attribute(&mut self, attribute: &Attribute) -> Result<()> {
		match attribute {
			Attribute::Code { max_stack, max_locals, code, exception_table, attributes, .. } => {
				writeln!(self.out, "    Code:")?;
				writeln!(self.out, "      stack={max_stack}, locals={max_locals}")?;
				let mut pc = 0;
				for instruction in code {
					self.instruction(pc, instruction)?;
					pc += instruction.size_in_bytes();
				}
				if !exception_table.is_empty() {
					writeln!(self.out, "      Exception table:")?;
					writeln!(self.out, "         from    to  target type")?;
					for entry in exception_table {
						let catch_type = if entry.catch_type == 0 {
							"any".to_owned()
						} else {
							format!("Class {}", self.pool.get_class_name(entry.catch_type)?)
						};
						writeln!(self.out, "        {:>5} {:>5} {:>5}   {catch_type}", entry.start_pc, entry.end_pc, entry.handler_pc)?;
					}
				}
				for attribute in attributes {
					self.code_attribute(attribute)?;
				}
			},
			Attribute::ConstantValue { constantvalue_index, .. } => {
				let entry = self.pool.get(*constantvalue_index)?;
				writeln!(self.out, "    ConstantValue: {} {}", value_kind(entry.kind()), constant_value(self.pool, entry)?)?;
			},
			Attribute::Exceptions { exception_index_table, .. } => {
				writeln!(self.out, "    Exceptions:")?;
				let names = exception_index_table.iter()
					.map(|&index| self.pool.get_class_name(index).map(|name| name.replace('/', ".")))
					.collect::<raw_class_file::Result<Vec<_>>>()?;
				writeln!(self.out, "      throws {}", names.join(", "))?;
			},
			Attribute::Signature { signature_index, .. } => {
				self.with_comment(&format!("    Signature: #{signature_index}"), self.pool.get_utf8_lossy(*signature_index).ok(), 42)?;
			},
			Attribute::MethodParameters { parameters, .. } => {
				writeln!(self.out, "    MethodParameters:")?;
				writeln!(self.out, "      Name                           Flags")?;
				for parameter in parameters {
					let name = if parameter.name_index == 0 {
						"<no name>".to_owned()
					} else {
						self.pool.get_utf8_lossy(parameter.name_index)?
					};
					writeln!(self.out, "      {name:<30} {}", parameter_flags(parameter.access_flags))?;
				}
			},
			Attribute::Deprecated { .. } => writeln!(self.out, "    Deprecated: true")?,
			Attribute::Synthetic { .. } => writeln!(self.out, "    Synthetic: true")?,
			other => self.generic_attribute("    ", other)?,
		}
		Ok(())
	}

	/// Attributes inside a `Code` attribute.
	fn code_attribute(&mut self, attribute: &Attribute) -> Result<()> {
		match attribute {
			Attribute::LineNumberTable { line_number_table, .. } => {
				writeln!(self.out, "      LineNumberTable:")?;
				for entry in line_number_table {
					writeln!(self.out, "        line {}: {}", entry.line_number, entry.start_pc)?;
				}
			},
			Attribute::LocalVariableTable { local_variable_table, .. } => {
				writeln!(self.out, "      LocalVariableTable:")?;
				writeln!(self.out, "        Start  Length  Slot  Name   Signature")?;
				for entry in local_variable_table {
					let name = self.pool.get_utf8_lossy(entry.name_index)?;
					let descriptor = self.pool.get_utf8_lossy(entry.descriptor_index)?;
					writeln!(self.out, "        {:>5}  {:>6}  {:>4}  {name:>5}   {descriptor}", entry.start_pc, entry.length, entry.index)?;
				}
			},
			Attribute::LocalVariableTypeTable { local_variable_type_table, .. } => {
				writeln!(self.out, "      LocalVariableTypeTable:")?;
				writeln!(self.out, "        Start  Length  Slot  Name   Signature")?;
				for entry in local_variable_type_table {
					let name = self.pool.get_utf8_lossy(entry.name_index)?;
					let signature = self.pool.get_utf8_lossy(entry.signature_index)?;
					writeln!(self.out, "        {:>5}  {:>6}  {:>4}  {name:>5}   {signature}", entry.start_pc, entry.length, entry.index)?;
				}
			},
			Attribute::StackMapTable { entries, .. } => {
				writeln!(self.out, "      StackMapTable: number_of_entries = {}", entries.len())?;
				for frame in entries {
					writeln!(self.out, "        frame_type = {} /* {} */", frame.frame_type()?, frame_name(frame))?;
				}
			},
			other => self.generic_attribute("      ", other)?,
		}
		Ok(())
	}

	fn class_attribute(&mut self, attribute: &Attribute) -> Result<()> {
		match attribute {
			Attribute::SourceFile { sourcefile_index, .. } => {
				writeln!(self.out, "SourceFile: \"{}\"", self.pool.get_utf8_lossy(*sourcefile_index)?)?;
			},
			Attribute::Signature { signature_index, .. } => {
				self.with_comment(&format!("Signature: #{signature_index}"), self.pool.get_utf8_lossy(*signature_index).ok(), 42)?;
			},
			Attribute::NestHost { host_class_index, .. } => {
				writeln!(self.out, "NestHost: class {}", self.pool.get_class_name(*host_class_index)?)?;
			},
			Attribute::NestMembers { classes, .. } => {
				writeln!(self.out, "NestMembers:")?;
				for &class in classes {
					writeln!(self.out, "  {}", self.pool.get_class_name(class)?)?;
				}
			},
			Attribute::InnerClasses { classes, .. } => {
				writeln!(self.out, "InnerClasses:")?;
				for entry in classes {
					let inner = self.pool.get_class_name(entry.inner_class_info_index)?;
					let line = format!("  {}#{}; // class {inner}", modifiers(entry.inner_class_access_flags, FlagTarget::Class),
						entry.inner_class_info_index);
					writeln!(self.out, "{line}")?;
				}
			},
			Attribute::EnclosingMethod { class_index, method_index, .. } => {
				let class = self.pool.get_class_name(*class_index)?;
				let method = if *method_index == 0 {
					String::new()
				} else {
					format!(".{}", name_and_type(self.pool, *method_index)?)
				};
				writeln!(self.out, "EnclosingMethod: #{class_index}.#{method_index} // {class}{method}")?;
			},
			Attribute::BootstrapMethods { bootstrap_methods, .. } => {
				writeln!(self.out, "BootstrapMethods:")?;
				for (i, method) in bootstrap_methods.iter().enumerate() {
					let handle = self.pool.get(method.bootstrap_method_ref)?;
					writeln!(self.out, "  {i}: #{} {}", method.bootstrap_method_ref, constant_value(self.pool, handle)?)?;
					writeln!(self.out, "    Method arguments:")?;
					for &argument in &method.bootstrap_arguments {
						let value = constant_value(self.pool, self.pool.get(argument)?)?;
						writeln!(self.out, "      #{argument} {value}")?;
					}
				}
			},
			Attribute::Deprecated { .. } => writeln!(self.out, "Deprecated: true")?,
			Attribute::Synthetic { .. } => writeln!(self.out, "Synthetic: true")?,
			other => self.generic_attribute("", other)?,
		}
		Ok(())
	}

	/// Attributes without a special rendering: only the name and the length are shown.
	fn generic_attribute(&mut self, indent: &str, attribute: &Attribute) -> Result<()> {
		let name = self.pool.get_utf8_lossy(attribute.attribute_name_index())?;
		writeln!(self.out, "{indent}{name}: length = 0x{:x}", attribute.encoded_len() - 6)?;
		Ok(())
	}

	fn instruction(&mut self, pc: usize, instruction: &Instruction) -> Result<()> {
		let mnemonic = instruction.opcode().mnemonic();
		let prefix = format!("{pc:>10}: ");
		let target = |offset: i64| pc as i64 + offset;

		let (text, comment) = match instruction {
			Instruction::Plain(_) | Instruction::Implicit(_) => (mnemonic.to_owned(), None),
			Instruction::Bipush(value) => (format!("{mnemonic} {value}"), None),
			Instruction::Sipush(value) => (format!("{mnemonic} {value}"), None),
			Instruction::Ldc(index) => (format!("{mnemonic} #{index}"), self.reference(u16::from(*index))),
			Instruction::LdcWide { index, .. } | Instruction::PoolRef { index, .. } =>
				(format!("{mnemonic} #{index}"), self.reference(*index)),
			Instruction::Local { index, .. } => (format!("{mnemonic} {index}"), None),
			Instruction::Iinc { index, increment } => (format!("{mnemonic} {index}, {increment}"), None),
			Instruction::Branch { offset, .. } => (format!("{mnemonic} {}", target(i64::from(*offset))), None),
			Instruction::BranchWide { offset, .. } => (format!("{mnemonic} {}", target(i64::from(*offset))), None),
			Instruction::InvokeInterface { index, count } => (format!("{mnemonic} #{index},  {count}"), self.reference(*index)),
			Instruction::InvokeDynamic { index } => (format!("{mnemonic} #{index},  0"), self.reference(*index)),
			Instruction::NewArray(ty) => (format!("{mnemonic} {}", ty.name()), None),
			Instruction::MultiANewArray { index, dimensions } =>
				(format!("{mnemonic} #{index},  {dimensions}"), self.reference(*index)),
			Instruction::Wide(Wide::Local { opcode, index }) => (format!("{mnemonic} {} {index}", opcode.mnemonic()), None),
			Instruction::Wide(Wide::Iinc { index, increment }) =>
				(format!("{mnemonic} iinc {index}, {increment}"), None),
			Instruction::TableSwitch(table) => return self.table_switch(&prefix, pc, table),
			Instruction::LookupSwitch(lookup) => return self.lookup_switch(&prefix, pc, lookup),
		};
		self.with_comment(&format!("{prefix}{text}"), comment, 46)
	}

	fn table_switch(&mut self, prefix: &str, pc: usize, table: &TableSwitch) -> Result<()> {
		writeln!(self.out, "{prefix}tableswitch   {{ // {} to {}", table.low, table.high)?;
		for (key, offset) in (i64::from(table.low)..).zip(&table.offsets) {
			writeln!(self.out, "{key:>24}: {}", pc as i64 + i64::from(*offset))?;
		}
		writeln!(self.out, "{:>24}: {}", "default", pc as i64 + i64::from(table.default))?;
		writeln!(self.out, "            }}")?;
		Ok(())
	}

	fn lookup_switch(&mut self, prefix: &str, pc: usize, lookup: &LookupSwitch) -> Result<()> {
		writeln!(self.out, "{prefix}lookupswitch  {{ // {}", lookup.pairs.len())?;
		for (key, offset) in &lookup.pairs {
			writeln!(self.out, "{key:>24}: {}", pc as i64 + i64::from(*offset))?;
		}
		writeln!(self.out, "{:>24}: {}", "default", pc as i64 + i64::from(lookup.default))?;
		writeln!(self.out, "            }}")?;
		Ok(())
	}

	/// The comment `javap` puts next to an instruction referencing the constant pool.
	fn reference(&self, index: u16) -> Option<String> {
		let entry = self.pool.get(index).ok()?;
		let value = constant_value(self.pool, entry).ok()?;
		Some(format!("{} {value}", value_kind(entry.kind())))
	}

	/// Writes `line`, followed by `// comment` starting at `column`, if there's a comment.
	fn with_comment(&mut self, line: &str, comment: Option<String>, column: usize) -> Result<()> {
		match comment {
			Some(comment) => writeln!(self.out, "{line:<width$} // {comment}", width = column - 1)?,
			None => writeln!(self.out, "{line}")?,
		}
		Ok(())
	}
}

fn format_flags(access_flags: u16, target: FlagTarget) -> String {
	format!("(0x{access_flags:04x}) {}", flag_names(access_flags, target).join(", ")).trim_end().to_owned()
}

/// The java keywords for the access flags, each followed by a space.
fn modifiers(access_flags: u16, target: FlagTarget) -> String {
	let mut keywords: Vec<(u16, &str)> = vec![
		(flags::ACC_PUBLIC, "public"),
		(flags::ACC_PRIVATE, "private"),
		(flags::ACC_PROTECTED, "protected"),
		(flags::ACC_STATIC, "static"),
		(flags::ACC_FINAL, "final"),
	];
	match target {
		FlagTarget::Class => keywords.push((flags::ACC_ABSTRACT, "abstract")),
		FlagTarget::Field => {
			keywords.push((flags::ACC_VOLATILE, "volatile"));
			keywords.push((flags::ACC_TRANSIENT, "transient"));
		},
		FlagTarget::Method => {
			keywords.push((flags::ACC_SYNCHRONIZED, "synchronized"));
			keywords.push((flags::ACC_NATIVE, "native"));
			keywords.push((flags::ACC_ABSTRACT, "abstract"));
		},
	}
	keywords.into_iter()
		.filter(|(flag, _)| access_flags & flag != 0)
		.map(|(_, keyword)| format!("{keyword} "))
		.collect()
}

fn parameter_flags(access_flags: u16) -> String {
	[(flags::ACC_FINAL, "final"), (flags::ACC_SYNTHETIC, "synthetic"), (flags::ACC_MANDATED, "mandated")].iter()
		.filter(|(flag, _)| access_flags & flag != 0)
		.map(|(_, name)| *name)
		.collect::<Vec<_>>()
		.join(" ")
}

fn frame_name(frame: &StackMapFrame) -> &'static str {
	match frame {
		StackMapFrame::SameFrame { .. } => "same",
		StackMapFrame::SameLocals1StackItemFrame { .. } => "same_locals_1_stack_item",
		StackMapFrame::SameLocals1StackItemFrameExtended { .. } => "same_locals_1_stack_item_frame_extended",
		StackMapFrame::ChopFrame { .. } => "chop",
		StackMapFrame::SameFrameExtended { .. } => "same_frame_extended",
		StackMapFrame::AppendFrame { .. } => "append",
		StackMapFrame::FullFrame { .. } => "full_frame",
	}
}

/// The word `javap` puts in front of a resolved constant.
fn value_kind(kind: ConstantKind) -> &'static str {
	match kind {
		ConstantKind::Class => "class",
		ConstantKind::Fieldref => "Field",
		ConstantKind::Methodref => "Method",
		ConstantKind::InterfaceMethodref => "InterfaceMethod",
		ConstantKind::String => "String",
		ConstantKind::Integer => "int",
		ConstantKind::Float => "float",
		ConstantKind::Long => "long",
		ConstantKind::Double => "double",
		ConstantKind::NameAndType => "NameAndType",
		ConstantKind::Utf8 => "Utf8",
		ConstantKind::MethodHandle => "MethodHandle",
		ConstantKind::MethodType => "MethodType",
		ConstantKind::InvokeDynamic => "InvokeDynamic",
	}
}

fn reference_kind_name(reference_kind: u8) -> String {
	match reference_kind {
		1 => "REF_getField".to_owned(),
		2 => "REF_getStatic".to_owned(),
		3 => "REF_putField".to_owned(),
		4 => "REF_putStatic".to_owned(),
		5 => "REF_invokeVirtual".to_owned(),
		6 => "REF_invokeStatic".to_owned(),
		7 => "REF_invokeSpecial".to_owned(),
		8 => "REF_newInvokeSpecial".to_owned(),
		9 => "REF_invokeInterface".to_owned(),
		other => format!("REF_{other}"),
	}
}

/// Constructor and static initializer names are quoted, like `javap` does.
fn member_name(name: String) -> String {
	if name.starts_with('<') {
		format!("\"{name}\"")
	} else {
		name
	}
}

fn name_and_type(pool: &ConstantPool, index: u16) -> raw_class_file::Result<String> {
	match pool.get(index)? {
		ConstantPoolEntry::NameAndType { name_index, descriptor_index } => Ok(format!("{}:{}",
			member_name(pool.get_utf8_lossy(*name_index)?),
			pool.get_utf8_lossy(*descriptor_index)?,
		)),
		entry => Err(ClassFileError::WrongConstantKind { index, expected: ConstantKind::NameAndType, actual: entry.kind() }),
	}
}

/// Resolves all the references of a constant, and turns it into text.
fn constant_value(pool: &ConstantPool, entry: &ConstantPoolEntry) -> raw_class_file::Result<String> {
	Ok(match entry {
		ConstantPoolEntry::Class { name_index } => pool.get_utf8_lossy(*name_index)?,
		ConstantPoolEntry::Fieldref { class_index, name_and_type_index } |
		ConstantPoolEntry::Methodref { class_index, name_and_type_index } |
		ConstantPoolEntry::InterfaceMethodref { class_index, name_and_type_index } =>
			format!("{}.{}", pool.get_class_name(*class_index)?, name_and_type(pool, *name_and_type_index)?),
		ConstantPoolEntry::String { string_index } => pool.get_utf8_lossy(*string_index)?,
		ConstantPoolEntry::Integer { bytes } => (*bytes as i32).to_string(),
		ConstantPoolEntry::Float { bytes } => format!("{}f", f32::from_bits(*bytes)),
		ConstantPoolEntry::Long { high_bytes, low_bytes } =>
			format!("{}l", ((u64::from(*high_bytes) << 32) | u64::from(*low_bytes)) as i64),
		ConstantPoolEntry::Double { high_bytes, low_bytes } =>
			format!("{}d", f64::from_bits((u64::from(*high_bytes) << 32) | u64::from(*low_bytes))),
		ConstantPoolEntry::NameAndType { name_index, descriptor_index } =>
			format!("{}:{}", member_name(pool.get_utf8_lossy(*name_index)?), pool.get_utf8_lossy(*descriptor_index)?),
		ConstantPoolEntry::Utf8 { .. } => entry.utf8_lossy().unwrap_or_default(),
		ConstantPoolEntry::MethodHandle { reference_kind, reference_index } => {
			let referenced = pool.get(*reference_index)?;
			format!("{} {}", reference_kind_name(*reference_kind), constant_value(pool, referenced)?)
		},
		ConstantPoolEntry::MethodType { descriptor_index } => pool.get_utf8_lossy(*descriptor_index)?,
		ConstantPoolEntry::InvokeDynamic { bootstrap_method_attr_index, name_and_type_index } =>
			format!("#{bootstrap_method_attr_index}:{}", name_and_type(pool, *name_and_type_index)?),
	})
}

/// Parses one field type off the start of `descriptor`, returning it as a java type and the rest of the descriptor.
fn java_type(descriptor: &str) -> Option<(String, &str)> {
	let mut chars = descriptor.chars();
	let ty = match chars.next()? {
		'B' => "byte",
		'C' => "char",
		'D' => "double",
		'F' => "float",
		'I' => "int",
		'J' => "long",
		'S' => "short",
		'Z' => "boolean",
		'V' => "void",
		'L' => {
			let (name, rest) = descriptor[1..].split_once(';')?;
			return Some((name.replace('/', "."), rest));
		},
		'[' => {
			let (inner, rest) = java_type(&descriptor[1..])?;
			return Some((format!("{inner}[]"), rest));
		},
		_ => return None,
	};
	Some((ty.to_owned(), chars.as_str()))
}

/// Splits a method descriptor into the java types of its parameters and its return type.
fn method_types(descriptor: &str) -> Option<(Vec<String>, String)> {
	let mut rest = descriptor.strip_prefix('(')?;
	let mut parameters = Vec::new();
	loop {
		if let Some(after) = rest.strip_prefix(')') {
			let (return_type, rest) = java_type(after)?;
			return rest.is_empty().then_some((parameters, return_type));
		}
		let (parameter, after) = java_type(rest)?;
		parameters.push(parameter);
		rest = after;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use raw_class_file::{ClassFile, decode_class_file, Instruction, LookupSwitch, Opcode, TableSwitch};
	use crate::javap::{java_type, method_types, Printer, render};

	const MINIMUM: &[u8] = include_bytes!("../raw_class_file/tests/Minimum.class");

	#[test]
	fn minimum() {
		let class = decode_class_file(MINIMUM).unwrap();
		let expected = "\
public class Minimum
  minor version: 0
  major version: 52
  flags: (0x0021) ACC_PUBLIC, ACC_SUPER
  this_class: #2                          // Minimum
  super_class: #3                         // java/lang/Object
  interfaces: 0, fields: 0, methods: 1, attributes: 1
Constant pool:
   #1 = Methodref          #3.#10         // java/lang/Object.\"<init>\":()V
   #2 = Class              #11            // Minimum
   #3 = Class              #12            // java/lang/Object
   #4 = Utf8               <init>
   #5 = Utf8               ()V
   #6 = Utf8               Code
   #7 = Utf8               LineNumberTable
   #8 = Utf8               SourceFile
   #9 = Utf8               Minimum.java
  #10 = NameAndType        #4:#5          // \"<init>\":()V
  #11 = Utf8               Minimum
  #12 = Utf8               java/lang/Object
{
  public Minimum();
    descriptor: ()V
    flags: (0x0001) ACC_PUBLIC
    Code:
      stack=1, locals=1
         0: aload_0
         1: invokespecial #1                  // Method java/lang/Object.\"<init>\":()V
         4: return
      LineNumberTable:
        line 1: 0
}
SourceFile: \"Minimum.java\"
";
		assert_eq!(render(&class).unwrap(), expected);
	}

	#[test]
	fn branches_and_switches() {
		let class = ClassFile::read(&mut std::io::Cursor::new(MINIMUM)).unwrap();
		let mut printer = Printer { pool: &class.constant_pool, out: String::new() };

		printer.instruction(3, &Instruction::Branch { opcode: Opcode::Ifeq, offset: -3 }).unwrap();
		printer.instruction(0, &Instruction::TableSwitch(TableSwitch {
			padding: 3,
			default: 40,
			low: 0,
			high: 1,
			offsets: vec![20, 30],
		})).unwrap();
		printer.instruction(8, &Instruction::LookupSwitch(LookupSwitch {
			padding: 3,
			default: 12,
			pairs: vec![(-5, 10)],
		})).unwrap();

		let expected = "         3: ifeq 0
         0: tableswitch   { // 0 to 1
                       0: 20
                       1: 30
                 default: 40
            }
         8: lookupswitch  { // 1
                      -5: 18
                 default: 20
            }
";
		assert_eq!(printer.out, expected);
	}

	#[test]
	fn descriptors() {
		assert_eq!(java_type("[[Ljava/lang/String;I"), Some(("java.lang.String[][]".to_owned(), "I")));
		assert_eq!(java_type("Q"), None);
		assert_eq!(method_types("(IJ[Z)V"), Some((vec!["int".to_owned(), "long".to_owned(), "boolean[]".to_owned()], "void".to_owned())));
		assert_eq!(method_types("(I"), None);
		assert_eq!(method_types("()VV"), None);
	}
}
