//! The entries of the `StackMapTable` attribute.
use crate::error::{ClassFileError, Result};
use crate::macros::jvms_notation;
use crate::parser::Parser;
use crate::source::{ByteSink, ByteSource};

jvms_notation! {
	enum VerificationTypeInfo {
		tag: u8,
		Top = 0 {},
		Integer = 1 {},
		Float = 2 {},
		Double = 3 {},
		Long = 4 {},
		Null = 5 {},
		UninitializedThis = 6 {},
		Object = 7 {
			cpool_index: u16,
		},
		/// `offset` is the pc of the `new` instruction creating the object.
		Uninitialized = 8 {
			offset: u16,
		},
		_ => ClassFileError::InvalidVerificationType,
	}
}

/// A `stack_map_frame`.
///
/// The frame type byte isn't stored, it's computed from the variant and the `offset_delta` or number of locals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackMapFrame {
	/// Frame types `0..=63`.
	SameFrame {
		offset_delta: u8,
	},
	/// Frame types `64..=127`.
	SameLocals1StackItemFrame {
		offset_delta: u8,
		stack: VerificationTypeInfo,
	},
	SameLocals1StackItemFrameExtended {
		offset_delta: u16,
		stack: VerificationTypeInfo,
	},
	/// Removes the last `k` locals, `k` is in `1..=3`.
	ChopFrame {
		k: u8,
		offset_delta: u16,
	},
	SameFrameExtended {
		offset_delta: u16,
	},
	/// Adds one to three locals.
	AppendFrame {
		offset_delta: u16,
		locals: Vec<VerificationTypeInfo>,
	},
	FullFrame {
		offset_delta: u16,
		locals: Vec<VerificationTypeInfo>,
		stack: Vec<VerificationTypeInfo>,
	},
}

impl StackMapFrame {
	pub fn frame_type(&self) -> Result<u8> {
		match self {
			StackMapFrame::SameFrame { offset_delta } if *offset_delta <= 63 => Ok(*offset_delta),
			StackMapFrame::SameLocals1StackItemFrame { offset_delta, .. } if *offset_delta <= 63 => Ok(offset_delta + 64),
			StackMapFrame::SameLocals1StackItemFrameExtended { .. } => Ok(247),
			StackMapFrame::ChopFrame { k: k @ 1..=3, .. } => Ok(251 - k),
			StackMapFrame::SameFrameExtended { .. } => Ok(251),
			StackMapFrame::AppendFrame { locals, .. } if (1..=3).contains(&locals.len()) => Ok(251 + locals.len() as u8),
			StackMapFrame::FullFrame { .. } => Ok(255),
			StackMapFrame::SameFrame { offset_delta } | StackMapFrame::SameLocals1StackItemFrame { offset_delta, .. } => {
				Err(ClassFileError::CountOverflow { what: "offset_delta of a same frame", len: *offset_delta as usize })
			},
			StackMapFrame::ChopFrame { k, .. } => {
				Err(ClassFileError::CountOverflow { what: "k of a chop frame", len: *k as usize })
			},
			StackMapFrame::AppendFrame { locals, .. } => {
				Err(ClassFileError::CountOverflow { what: "locals of an append frame", len: locals.len() })
			},
		}
	}

	pub(crate) fn decode<S: ByteSource>(parser: &mut Parser<S>) -> Result<StackMapFrame> {
		let frame_type = parser.consume_u8()?;
		Ok(match frame_type {
			0..=63 => StackMapFrame::SameFrame { offset_delta: frame_type },
			64..=127 => StackMapFrame::SameLocals1StackItemFrame {
				offset_delta: frame_type - 64,
				stack: VerificationTypeInfo::decode(parser)?,
			},
			247 => StackMapFrame::SameLocals1StackItemFrameExtended {
				offset_delta: parser.consume_u16()?,
				stack: VerificationTypeInfo::decode(parser)?,
			},
			248..=250 => StackMapFrame::ChopFrame { k: 251 - frame_type, offset_delta: parser.consume_u16()? },
			251 => StackMapFrame::SameFrameExtended { offset_delta: parser.consume_u16()? },
			252..=254 => {
				let offset_delta = parser.consume_u16()?;
				let mut locals = Vec::with_capacity((frame_type - 251) as usize);
				for _ in 251..frame_type {
					locals.push(VerificationTypeInfo::decode(parser)?);
				}
				StackMapFrame::AppendFrame { offset_delta, locals }
			},
			255 => {
				let offset_delta = parser.consume_u16()?;
				let locals = decode_verification_types(parser)?;
				let stack = decode_verification_types(parser)?;
				StackMapFrame::FullFrame { offset_delta, locals, stack }
			},
			_ => return Err(ClassFileError::InvalidStackMapFrame(frame_type)),
		})
	}

	pub fn encode(&self, writer: &mut impl ByteSink) -> Result<()> {
		writer.write_u8(self.frame_type()?)?;
		match self {
			StackMapFrame::SameFrame { .. } => {},
			StackMapFrame::SameLocals1StackItemFrame { stack, .. } => stack.encode(writer)?,
			StackMapFrame::SameLocals1StackItemFrameExtended { offset_delta, stack } => {
				writer.write_u16(*offset_delta)?;
				stack.encode(writer)?;
			},
			StackMapFrame::ChopFrame { offset_delta, .. } | StackMapFrame::SameFrameExtended { offset_delta } => {
				writer.write_u16(*offset_delta)?;
			},
			StackMapFrame::AppendFrame { offset_delta, locals } => {
				writer.write_u16(*offset_delta)?;
				for local in locals {
					local.encode(writer)?;
				}
			},
			StackMapFrame::FullFrame { offset_delta, locals, stack } => {
				writer.write_u16(*offset_delta)?;
				encode_verification_types(writer, locals, "number_of_locals")?;
				encode_verification_types(writer, stack, "number_of_stack_items")?;
			},
		}
		Ok(())
	}

	pub fn encoded_len(&self) -> usize {
		let types = |types: &[VerificationTypeInfo]| types.iter().map(VerificationTypeInfo::encoded_len).sum::<usize>();
		1 + match self {
			StackMapFrame::SameFrame { .. } => 0,
			StackMapFrame::SameLocals1StackItemFrame { stack, .. } => stack.encoded_len(),
			StackMapFrame::SameLocals1StackItemFrameExtended { stack, .. } => 2 + stack.encoded_len(),
			StackMapFrame::ChopFrame { .. } | StackMapFrame::SameFrameExtended { .. } => 2,
			StackMapFrame::AppendFrame { locals, .. } => 2 + types(locals),
			StackMapFrame::FullFrame { locals, stack, .. } => 2 + 2 + types(locals) + 2 + types(stack),
		}
	}
}

fn decode_verification_types<S: ByteSource>(parser: &mut Parser<S>) -> Result<Vec<VerificationTypeInfo>> {
	let count = parser.consume_u16()?;
	let mut types = Vec::with_capacity(count as usize);
	for _ in 0..count {
		types.push(VerificationTypeInfo::decode(parser)?);
	}
	Ok(types)
}

fn encode_verification_types(writer: &mut impl ByteSink, types: &[VerificationTypeInfo], what: &'static str) -> Result<()> {
	writer.write_usize_as_u16(types.len(), what)?;
	for ty in types {
		ty.encode(writer)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use crate::error::ClassFileError;
	use crate::parser::Parser;
	use crate::stack_map::{StackMapFrame, VerificationTypeInfo};

	#[test]
	fn frames() {
		let bytes: &[u8] = &[
			0x05, // same_frame
			0x41, 0x01, // same_locals_1_stack_item_frame, Integer
			0xf9, 0x00, 0x10, // chop_frame, k = 2
			0xfd, 0x00, 0x02, 0x07, 0x00, 0x09, 0x04, // append_frame, Object #9, Long
			0xff, 0x00, 0x03, 0x00, 0x01, 0x06, 0x00, 0x01, 0x08, 0x00, 0x0c, // full_frame
		];
		let mut parser = Parser::new(bytes);
		let mut frames = Vec::new();
		for _ in 0..5 {
			frames.push(StackMapFrame::decode(&mut parser).unwrap());
		}

		assert_eq!(frames, vec![
			StackMapFrame::SameFrame { offset_delta: 5 },
			StackMapFrame::SameLocals1StackItemFrame { offset_delta: 1, stack: VerificationTypeInfo::Integer {} },
			StackMapFrame::ChopFrame { k: 2, offset_delta: 16 },
			StackMapFrame::AppendFrame {
				offset_delta: 2,
				locals: vec![VerificationTypeInfo::Object { cpool_index: 9 }, VerificationTypeInfo::Long {}],
			},
			StackMapFrame::FullFrame {
				offset_delta: 3,
				locals: vec![VerificationTypeInfo::UninitializedThis {}],
				stack: vec![VerificationTypeInfo::Uninitialized { offset: 12 }],
			},
		]);

		let mut written = Vec::new();
		for frame in &frames {
			frame.encode(&mut written).unwrap();
		}
		assert_eq!(written, bytes);
		assert_eq!(frames.iter().map(StackMapFrame::encoded_len).sum::<usize>(), bytes.len());
	}

	#[test]
	fn reserved_frame_types() {
		let bytes: &[u8] = &[0x80];
		assert!(matches!(StackMapFrame::decode(&mut Parser::new(bytes)), Err(ClassFileError::InvalidStackMapFrame(0x80))));

		let bytes: &[u8] = &[0x40, 0x09];
		assert!(matches!(StackMapFrame::decode(&mut Parser::new(bytes)), Err(ClassFileError::InvalidVerificationType(9))));

		let frame = StackMapFrame::AppendFrame { offset_delta: 0, locals: vec![] };
		assert!(frame.encode(&mut Vec::new()).is_err());
	}
}
