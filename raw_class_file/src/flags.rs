//! Access flags of classes, fields, methods and inner classes.
//!
//! Some bits mean different things depending on what they're attached to.

pub const ACC_PUBLIC: u16       = 0x0001; // class, field, method, inner class
pub const ACC_PRIVATE: u16      = 0x0002; // field, method, inner class
pub const ACC_PROTECTED: u16    = 0x0004; // field, method, inner class
pub const ACC_STATIC: u16       = 0x0008; // field, method, inner class
pub const ACC_FINAL: u16        = 0x0010; // class, field, method, inner class, parameter
pub const ACC_SUPER: u16        = 0x0020; // class
pub const ACC_SYNCHRONIZED: u16 = 0x0020; // method
pub const ACC_VOLATILE: u16     = 0x0040; // field
pub const ACC_BRIDGE: u16       = 0x0040; // method
pub const ACC_TRANSIENT: u16    = 0x0080; // field
pub const ACC_VARARGS: u16      = 0x0080; // method
pub const ACC_NATIVE: u16       = 0x0100; // method
pub const ACC_INTERFACE: u16    = 0x0200; // class, inner class
pub const ACC_ABSTRACT: u16     = 0x0400; // class, method, inner class
pub const ACC_STRICT: u16       = 0x0800; // method
pub const ACC_SYNTHETIC: u16    = 0x1000; // class, field, method, inner class, parameter
pub const ACC_ANNOTATION: u16   = 0x2000; // class, inner class
pub const ACC_ENUM: u16         = 0x4000; // class, field, inner class
pub const ACC_MODULE: u16       = 0x8000; // class
pub const ACC_MANDATED: u16     = 0x8000; // parameter

/// What a set of access flags belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
	Class,
	Field,
	Method,
}

const CLASS_FLAGS: &[(u16, &str)] = &[
	(ACC_PUBLIC, "ACC_PUBLIC"),
	(ACC_FINAL, "ACC_FINAL"),
	(ACC_SUPER, "ACC_SUPER"),
	(ACC_INTERFACE, "ACC_INTERFACE"),
	(ACC_ABSTRACT, "ACC_ABSTRACT"),
	(ACC_SYNTHETIC, "ACC_SYNTHETIC"),
	(ACC_ANNOTATION, "ACC_ANNOTATION"),
	(ACC_ENUM, "ACC_ENUM"),
	(ACC_MODULE, "ACC_MODULE"),
];

const FIELD_FLAGS: &[(u16, &str)] = &[
	(ACC_PUBLIC, "ACC_PUBLIC"),
	(ACC_PRIVATE, "ACC_PRIVATE"),
	(ACC_PROTECTED, "ACC_PROTECTED"),
	(ACC_STATIC, "ACC_STATIC"),
	(ACC_FINAL, "ACC_FINAL"),
	(ACC_VOLATILE, "ACC_VOLATILE"),
	(ACC_TRANSIENT, "ACC_TRANSIENT"),
	(ACC_SYNTHETIC, "ACC_SYNTHETIC"),
	(ACC_ENUM, "ACC_ENUM"),
];

const METHOD_FLAGS: &[(u16, &str)] = &[
	(ACC_PUBLIC, "ACC_PUBLIC"),
	(ACC_PRIVATE, "ACC_PRIVATE"),
	(ACC_PROTECTED, "ACC_PROTECTED"),
	(ACC_STATIC, "ACC_STATIC"),
	(ACC_FINAL, "ACC_FINAL"),
	(ACC_SYNCHRONIZED, "ACC_SYNCHRONIZED"),
	(ACC_BRIDGE, "ACC_BRIDGE"),
	(ACC_VARARGS, "ACC_VARARGS"),
	(ACC_NATIVE, "ACC_NATIVE"),
	(ACC_ABSTRACT, "ACC_ABSTRACT"),
	(ACC_STRICT, "ACC_STRICT"),
	(ACC_SYNTHETIC, "ACC_SYNTHETIC"),
];

/// The names of the flags set in `access_flags`, in the order of their bits. Bits without a meaning for `target` are
/// left out.
pub fn flag_names(access_flags: u16, target: FlagTarget) -> Vec<&'static str> {
	let table = match target {
		FlagTarget::Class => CLASS_FLAGS,
		FlagTarget::Field => FIELD_FLAGS,
		FlagTarget::Method => METHOD_FLAGS,
	};
	table.iter()
		.filter(|(flag, _)| access_flags & flag != 0)
		.map(|(_, name)| *name)
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::flags::{ACC_PUBLIC, ACC_SUPER, flag_names, FlagTarget};

	#[test]
	fn names_depend_on_target() {
		assert_eq!(flag_names(ACC_PUBLIC | ACC_SUPER, FlagTarget::Class), vec!["ACC_PUBLIC", "ACC_SUPER"]);
		assert_eq!(flag_names(ACC_PUBLIC | ACC_SUPER, FlagTarget::Method), vec!["ACC_PUBLIC", "ACC_SYNCHRONIZED"]);
		assert_eq!(flag_names(ACC_PUBLIC | ACC_SUPER, FlagTarget::Field), vec!["ACC_PUBLIC"]);
	}
}
