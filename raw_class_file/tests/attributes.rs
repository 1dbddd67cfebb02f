use pretty_assertions::assert_eq;
use raw_class_file::{Attribute, BootstrapMethodsEntry, ClassFile, ClassFileError, ConstantKind, ConstantPoolEntry};
use raw_class_file::{decode_class_file, ExceptionTableEntry, FieldInfo, flags, InnerClassesEntry, Instruction};
use raw_class_file::{LocalVariableTableEntry, MethodInfo, Opcode, Parser, ParserOptions, StackMapFrame};
use raw_class_file::{UnknownAttributePolicy, VerificationTypeInfo};

const MINIMUM: &[u8] = include_bytes!("Minimum.class");

fn with_unknown_attribute() -> Vec<u8> {
	let mut class = decode_class_file(MINIMUM).unwrap();
	let name_index = class.constant_pool.push(ConstantPoolEntry::utf8("RuntimeVisibleAnnotations")) as u16;
	class.attributes.push(Attribute::Unknown {
		attribute_name_index: name_index,
		info: vec![0x00, 0x01, 0x00, 0x0b, 0x00, 0x00],
	});
	class.to_bytes().unwrap()
}

#[test]
fn unknown_attribute_is_rejected() {
	let bytes = with_unknown_attribute();
	match decode_class_file(bytes.as_slice()) {
		Err(ClassFileError::UnknownAttribute(name)) => assert_eq!(name, "RuntimeVisibleAnnotations"),
		other => panic!("expected an UnknownAttribute error, got {other:?}"),
	}
}

#[test]
fn unknown_attribute_is_preserved() {
	let bytes = with_unknown_attribute();
	let options = ParserOptions {
		unknown_attributes: UnknownAttributePolicy::Preserve,
		..ParserOptions::default()
	};
	let class = ClassFile::read_with_options(&mut bytes.as_slice(), options).unwrap();

	assert_eq!(class.attributes[1], Attribute::Unknown {
		attribute_name_index: 13,
		info: vec![0x00, 0x01, 0x00, 0x0b, 0x00, 0x00],
	});
	assert_eq!(class.attributes[1].kind(), None);
	assert_eq!(class.to_bytes().unwrap(), bytes);
}

#[test]
fn name_must_be_utf8() {
	// name_index 1 points at a Class entry
	let bytes: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02];
	let mut parser = Parser::new(bytes);
	parser.context_mut().add_constant(ConstantPoolEntry::Class { name_index: 2 });
	parser.context_mut().add_constant(ConstantPoolEntry::utf8("SourceFile"));

	match parser.decode_attribute() {
		Err(ClassFileError::WrongConstantKind { index: 1, expected: ConstantKind::Utf8, actual: ConstantKind::Class }) => {},
		other => panic!("expected a WrongConstantKind error, got {other:?}"),
	}
}

#[test]
fn name_index_out_of_range() {
	let bytes: &[u8] = &[0x00, 0x05, 0x00, 0x00, 0x00, 0x00];
	assert!(matches!(Parser::new(bytes).decode_attribute(), Err(ClassFileError::ConstantPoolIndexOutOfRange(5))));
}

#[test]
fn code_overrun() {
	// code_length is 2, but invokespecial takes up 3 bytes
	let bytes: &[u8] = &[
		0x00, 0x01, 0x00, 0x00, 0x00, 0x0f,
		0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
		0xb7, 0x00, 0x01,
		0x00, 0x00, 0x00, 0x00,
	];
	let mut parser = Parser::new(bytes);
	parser.context_mut().add_constant(ConstantPoolEntry::utf8("Code"));

	assert!(matches!(parser.decode_attribute(), Err(ClassFileError::CodeLengthMismatch { declared: 2, decoded: 3 })));
}

#[test]
fn nesting_depth_is_limited() {
	let options = ParserOptions {
		max_attribute_depth: 1,
		..ParserOptions::default()
	};
	// the LineNumberTable inside the Code attribute is at depth 2
	let result = ClassFile::read_with_options(&mut std::io::Cursor::new(MINIMUM), options);
	assert!(matches!(result, Err(ClassFileError::AttributeNestingTooDeep(1))));
}

#[test]
fn all_kinds_round_trip() {
	let names = [
		"ConstantValue", "Code", "StackMapTable", "Exceptions", "InnerClasses", "EnclosingMethod", "Synthetic",
		"Signature", "SourceFile", "SourceDebugExtension", "LineNumberTable", "LocalVariableTable",
		"LocalVariableTypeTable", "Deprecated", "BootstrapMethods", "MethodParameters", "NestHost", "NestMembers",
	];
	let mut constant_pool: Vec<ConstantPoolEntry> = names.iter().map(|name| ConstantPoolEntry::utf8(name)).collect();
	// 19 and 20
	constant_pool.push(ConstantPoolEntry::Class { name_index: 21 });
	constant_pool.push(ConstantPoolEntry::Class { name_index: 22 });
	constant_pool.push(ConstantPoolEntry::utf8("Everything"));
	constant_pool.push(ConstantPoolEntry::utf8("java/lang/Object"));
	// 23 and 24
	constant_pool.push(ConstantPoolEntry::utf8("run"));
	constant_pool.push(ConstantPoolEntry::utf8("(I)V"));

	let code = Attribute::Code {
		attribute_name_index: 2,
		max_stack: 1,
		max_locals: 2,
		code: vec![
			Instruction::Local { opcode: Opcode::Iload, index: 1 },
			Instruction::Branch { opcode: Opcode::Ifeq, offset: 4 },
			Instruction::Plain(Opcode::Return),
			Instruction::Plain(Opcode::Return),
		],
		exception_table: vec![
			ExceptionTableEntry { start_pc: 0, end_pc: 5, handler_pc: 6, catch_type: 0 },
		],
		attributes: vec![
			Attribute::StackMapTable {
				attribute_name_index: 3,
				entries: vec![
					StackMapFrame::SameFrame { offset_delta: 6 },
					StackMapFrame::FullFrame {
						offset_delta: 0,
						locals: vec![VerificationTypeInfo::Object { cpool_index: 19 }, VerificationTypeInfo::Integer {}],
						stack: vec![],
					},
				],
			},
			Attribute::LocalVariableTable {
				attribute_name_index: 12,
				local_variable_table: vec![
					LocalVariableTableEntry { start_pc: 0, length: 7, name_index: 23, descriptor_index: 24, index: 1 },
				],
			},
			Attribute::LocalVariableTypeTable {
				attribute_name_index: 13,
				local_variable_type_table: vec![],
			},
		],
	};

	let class = ClassFile {
		minor_version: 0,
		major_version: 61,
		constant_pool: constant_pool.into(),
		access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
		this_class: 19,
		super_class: 20,
		interfaces: vec![],
		fields: vec![
			FieldInfo {
				access_flags: flags::ACC_STATIC | flags::ACC_FINAL,
				name_index: 23,
				descriptor_index: 24,
				attributes: vec![
					Attribute::ConstantValue { attribute_name_index: 1, constantvalue_index: 21 },
					Attribute::Synthetic { attribute_name_index: 7 },
					Attribute::Deprecated { attribute_name_index: 14 },
				],
			},
		],
		methods: vec![
			MethodInfo {
				access_flags: flags::ACC_PUBLIC,
				name_index: 23,
				descriptor_index: 24,
				attributes: vec![
					code,
					Attribute::Exceptions { attribute_name_index: 4, exception_index_table: vec![20] },
					Attribute::Signature { attribute_name_index: 8, signature_index: 24 },
					Attribute::MethodParameters {
						attribute_name_index: 16,
						parameters: vec![raw_class_file::MethodParametersEntry { name_index: 23, access_flags: 0 }],
					},
				],
			},
		],
		attributes: vec![
			Attribute::InnerClasses {
				attribute_name_index: 5,
				classes: vec![
					InnerClassesEntry { inner_class_info_index: 19, outer_class_info_index: 20, inner_name_index: 21, inner_class_access_flags: 0 },
				],
			},
			Attribute::EnclosingMethod { attribute_name_index: 6, class_index: 20, method_index: 0 },
			Attribute::SourceDebugExtension { attribute_name_index: 10, debug_extension: b"SMAP\n".to_vec() },
			Attribute::BootstrapMethods {
				attribute_name_index: 15,
				bootstrap_methods: vec![
					BootstrapMethodsEntry { bootstrap_method_ref: 1, bootstrap_arguments: vec![2, 3] },
				],
			},
			Attribute::NestHost { attribute_name_index: 17, host_class_index: 20 },
			Attribute::NestMembers { attribute_name_index: 18, classes: vec![19, 20] },
		],
	};

	let bytes = class.to_bytes().unwrap();
	assert_eq!(bytes.len(), class.length());

	let read = decode_class_file(bytes.as_slice()).unwrap();
	assert_eq!(read, class);
	assert_eq!(read.to_bytes().unwrap(), bytes);
}
