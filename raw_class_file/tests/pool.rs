use pretty_assertions::assert_eq;
use raw_class_file::{ClassFile, ClassFileError, ConstantPool, ConstantPoolEntry, decode_class_file, Parser};

/// A class without members whose constant pool starts with a long.
fn class_with_long() -> ClassFile {
	ClassFile {
		minor_version: 0,
		major_version: 52,
		constant_pool: vec![
			ConstantPoolEntry::long(0x0123_4567_89ab_cdef),
			ConstantPoolEntry::Class { name_index: 4 },
			ConstantPoolEntry::utf8("WithLong"),
			ConstantPoolEntry::Class { name_index: 6 },
			ConstantPoolEntry::utf8("java/lang/Object"),
			ConstantPoolEntry::double(1.5),
			ConstantPoolEntry::Integer { bytes: (-7i32) as u32 },
		].into(),
		access_flags: 0,
		this_class: 3,
		super_class: 5,
		interfaces: vec![],
		fields: vec![],
		methods: vec![],
		attributes: vec![],
	}
}

#[test]
fn long_takes_two_slots() {
	let class = class_with_long();
	assert_eq!(class.constant_pool.count(), 10);

	let bytes = class.to_bytes().unwrap();
	// constant_pool_count
	assert_eq!(&bytes[8..10], &[0x00, 0x0a]);

	let mut parser = Parser::new(bytes.as_slice());
	let read = parser.decode_class_file().unwrap();
	assert_eq!(read, class);

	let context = parser.context();
	assert_eq!(context.get_constant(1).unwrap(), &ConstantPoolEntry::Long { high_bytes: 0x0123_4567, low_bytes: 0x89ab_cdef });
	assert!(matches!(context.get_constant(2), Err(ClassFileError::UnusableConstantPoolIndex(2))));
	assert_eq!(context.get_constant(3).unwrap(), &ConstantPoolEntry::Class { name_index: 4 });
	assert_eq!(context.get_constant_utf8(4).unwrap(), "WithLong");
	assert!(matches!(context.get_constant(8), Err(ClassFileError::UnusableConstantPoolIndex(8))));
	assert_eq!(context.get_constant(9).unwrap(), &ConstantPoolEntry::Integer { bytes: 0xffff_fff9 });
	assert!(matches!(context.get_constant(10), Err(ClassFileError::ConstantPoolIndexOutOfRange(10))));

	assert_eq!(read.constant_pool.get_class_name(read.this_class).unwrap(), "WithLong");
}

#[test]
fn long_in_the_last_slot() {
	let mut bytes = class_with_long().to_bytes().unwrap();
	// claim one index less, so that the double at index 7 hangs over the end
	bytes[9] = 0x08;

	assert!(matches!(decode_class_file(bytes.as_slice()), Err(ClassFileError::ConstantPoolIndexOutOfRange(8))));
}

#[test]
fn utf8_fidelity() {
	let entry = ConstantPoolEntry::utf8("Minimum.java");
	let mut bytes = Vec::new();
	entry.encode(&mut bytes).unwrap();

	let mut expected = vec![0x01, 0x00, 0x0c];
	expected.extend(b"Minimum.java");
	assert_eq!(bytes, expected);

	let pool = ConstantPool::from_iter([entry]);
	assert_eq!(pool.get_utf8_lossy(1).unwrap(), "Minimum.java");
}

#[test]
fn invalid_tag() {
	let bytes: &[u8] = &[0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02, 0x02, 0x00, 0x00];
	assert!(matches!(decode_class_file(bytes), Err(ClassFileError::InvalidConstantTag(2))));
}
