use pretty_assertions::assert_eq;
use raw_class_file::{Attribute, ClassFile, ClassFileError, ConstantPoolEntry, decode_class_file, encode_class_file, flags};
use raw_class_file::{ImplicitInstruction, ImplicitValue, Instruction, LineNumberTableEntry, MethodInfo, Opcode, Parser};

const MINIMUM: &[u8] = include_bytes!("Minimum.class");

fn minimum() -> ClassFile {
	ClassFile {
		minor_version: 0,
		major_version: 52,
		constant_pool: vec![
			ConstantPoolEntry::Methodref { class_index: 3, name_and_type_index: 10 },
			ConstantPoolEntry::Class { name_index: 11 },
			ConstantPoolEntry::Class { name_index: 12 },
			ConstantPoolEntry::utf8("<init>"),
			ConstantPoolEntry::utf8("()V"),
			ConstantPoolEntry::utf8("Code"),
			ConstantPoolEntry::utf8("LineNumberTable"),
			ConstantPoolEntry::utf8("SourceFile"),
			ConstantPoolEntry::utf8("Minimum.java"),
			ConstantPoolEntry::NameAndType { name_index: 4, descriptor_index: 5 },
			ConstantPoolEntry::utf8("Minimum"),
			ConstantPoolEntry::utf8("java/lang/Object"),
		].into(),
		access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
		this_class: 2,
		super_class: 3,
		interfaces: vec![],
		fields: vec![],
		methods: vec![
			MethodInfo {
				access_flags: flags::ACC_PUBLIC,
				name_index: 4,
				descriptor_index: 5,
				attributes: vec![
					Attribute::Code {
						attribute_name_index: 6,
						max_stack: 1,
						max_locals: 1,
						code: vec![
							Instruction::Implicit(ImplicitInstruction { opcode: Opcode::Aload0, value: ImplicitValue::Zero }),
							Instruction::PoolRef { opcode: Opcode::Invokespecial, index: 1 },
							Instruction::Plain(Opcode::Return),
						],
						exception_table: vec![],
						attributes: vec![
							Attribute::LineNumberTable {
								attribute_name_index: 7,
								line_number_table: vec![
									LineNumberTableEntry { start_pc: 0, line_number: 1 },
								],
							},
						],
					},
				],
			},
		],
		attributes: vec![
			Attribute::SourceFile {
				attribute_name_index: 8,
				sourcefile_index: 9,
			},
		],
	}
}

#[test]
fn round_trip() {
	let class = decode_class_file(MINIMUM).unwrap();
	let bytes = encode_class_file(&class).unwrap();

	assert_eq!(bytes.as_slice(), MINIMUM);
	assert_eq!(class.length(), MINIMUM.len());
}

#[test]
fn decoded_structure() {
	let class = decode_class_file(MINIMUM).unwrap();

	assert_eq!(class, minimum());
	assert_eq!(class.constant_pool.get_class_name(class.this_class).unwrap(), "Minimum");
	assert_eq!(class.constant_pool.get_class_name(class.super_class).unwrap(), "java/lang/Object");
}

#[test]
fn synthesized() {
	let class = minimum();
	let bytes = class.to_bytes().unwrap();
	assert_eq!(bytes.as_slice(), MINIMUM);

	let read = ClassFile::read(&mut std::io::Cursor::new(&bytes)).unwrap();
	assert_eq!(read.access_flags, class.access_flags);
	assert_eq!(read.constant_pool.entries(), class.constant_pool.entries());
	assert_eq!(read.methods.len(), 1);

	let Attribute::Code { code, attributes, .. } = &read.methods[0].attributes[0] else {
		panic!("expected a Code attribute, got {:?}", read.methods[0].attributes[0]);
	};
	let opcodes: Vec<Opcode> = code.iter().map(Instruction::opcode).collect();
	assert_eq!(opcodes, vec![Opcode::Aload0, Opcode::Invokespecial, Opcode::Return]);
	assert_eq!(attributes.len(), 1);
	assert_eq!(read, class);
}

#[test]
fn parser_context_after_decoding() {
	let mut parser = Parser::new(MINIMUM);
	parser.decode_class_file().unwrap();
	let context = parser.into_context();

	assert_eq!(context.byte_offset(), MINIMUM.len() as u64);
	assert_eq!(context.get_constant(1).unwrap(), &ConstantPoolEntry::Methodref { class_index: 3, name_and_type_index: 10 });
	assert_eq!(context.get_constant_utf8(12).unwrap(), "java/lang/Object");
	assert!(matches!(context.get_constant(0), Err(ClassFileError::ConstantPoolIndexOutOfRange(0))));
	assert!(matches!(context.get_constant(13), Err(ClassFileError::ConstantPoolIndexOutOfRange(13))));
	// the first instruction sits after the header, the pool, 8 bytes of method_info, 14 bytes of Code header
	assert_eq!(context.code_start_offset(), 0x9d);
}

#[test]
fn truncated() {
	for len in 0..MINIMUM.len() {
		match decode_class_file(&MINIMUM[..len]) {
			Err(ClassFileError::UnexpectedEof) => {},
			other => panic!("expected UnexpectedEof for a prefix of {len} bytes, got {other:?}"),
		}
	}
}

#[test]
fn bad_magic() {
	let mut bytes = MINIMUM.to_vec();
	bytes[3] = 0xbf;
	assert!(matches!(decode_class_file(bytes.as_slice()), Err(ClassFileError::BadMagic(0xcafebabf))));
}

#[test]
fn write_to_writer() {
	let mut written = Vec::new();
	minimum().write(&mut written).unwrap();
	assert_eq!(written.as_slice(), MINIMUM);
}
