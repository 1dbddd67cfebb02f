/// Generates a struct or a tag-dispatched enum together with its `decode`, `encode` and `encoded_len` functions.
///
/// Fields are read and written in declaration order. A `Vec<T> [u16]` field is prefixed by its length, stored as the type
/// in the brackets. Any type that isn't a primitive must itself provide `decode`, `encode` and `encoded_len`.
macro_rules! jvms_notation {
	// rules used for writing
	(write, $w:ident, $v:expr, Vec<$it:tt> [$lt:tt]) => {
		jvms_notation!(write_len, $w, $v.len(), $lt);
		for i in $v {
			jvms_notation!(write, $w, i, $it);
		}
	};
	(write, $w:ident, $v:expr, u8) => { $crate::source::ByteSink::write_u8($w, *$v)?; };
	(write, $w:ident, $v:expr, u16) => { $crate::source::ByteSink::write_u16($w, *$v)?; };
	(write, $w:ident, $v:expr, u32) => { $crate::source::ByteSink::write_u32($w, *$v)?; };
	(write, $w:ident, $v:expr, $_t:ty) => { $v.encode($w)?; };
	(write_len, $w:ident, $len:expr, u8) => { $crate::source::ByteSink::write_usize_as_u8($w, $len, stringify!($len))?; };
	(write_len, $w:ident, $len:expr, u16) => { $crate::source::ByteSink::write_usize_as_u16($w, $len, stringify!($len))?; };
	(write_len, $w:ident, $len:expr, u32) => { $crate::source::ByteSink::write_usize_as_u32($w, $len, stringify!($len))?; };
	// rules used for reading
	(read, $p:ident, Vec<$it:tt> [$lt:tt]) => {{
		let len = jvms_notation!(read, $p, $lt);
		let mut vec = Vec::with_capacity(len as usize);
		for _ in 0..len {
			vec.push(jvms_notation!(read, $p, $it));
		}
		vec
	}};
	(read, $p:ident, u8) => { $p.consume_u8()? };
	(read, $p:ident, u16) => { $p.consume_u16()? };
	(read, $p:ident, u32) => { $p.consume_u32()? };
	(read, $p:ident, $t:ty) => { <$t>::decode($p)? };
	// rules used for calculating lengths
	(len, $v:expr, Vec<$it:tt> [$lt:tt]) => {{
		let mut len = jvms_notation!(len, (), $lt);
		for _i in $v {
			len += jvms_notation!(len, _i, $it);
		}
		len
	}};
	(len, $v:expr, u8) => {{ let _ = &$v; 1 }};
	(len, $v:expr, u16) => {{ let _ = &$v; 2 }};
	(len, $v:expr, u32) => {{ let _ = &$v; 4 }};
	(len, $v:expr, $_t:ty) => { $v.encoded_len() };
	// rules actually used in the definition of things
	(
		$(#[$meta:meta])*
		struct $n:ident {
			$(
				$(#[$i_meta:meta])*
				$i:ident: $it:ident $(<$iit:tt> [$lt:tt])?,
			)*
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq)]
		pub struct $n {
			$(
				$(#[$i_meta])*
				pub $i: $it $(<$iit>)?,
			)*
		}

		impl $n {
			pub(crate) fn decode<S: $crate::source::ByteSource>(parser: &mut $crate::parser::Parser<S>) -> $crate::error::Result<$n> {
				$( let $i = jvms_notation!(read, parser, $it $(<$iit> [$lt])?); )*
				Ok($n {
					$( $i, )*
				})
			}

			pub fn encode(&self, writer: &mut impl $crate::source::ByteSink) -> $crate::error::Result<()> {
				$( jvms_notation!(write, writer, &self.$i, $it $(<$iit> [$lt])?); )*
				Ok(())
			}

			pub fn encoded_len(&self) -> usize {
				0 $( + jvms_notation!(len, &self.$i, $it $(<$iit> [$lt])?) )*
			}
		}
	};
	(
		$(#[$meta:meta])*
		enum $n:ident {
			$t:ident: u8,
			$(
				$(#[$v_meta:meta])*
				$v:ident = $tv:literal {
					$( $i:ident: $it:ident $(<$iit:tt> [$lt:tt])?, )*
				},
			)*
			_ => $f:path,
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq)]
		pub enum $n {
			$(
				$(#[$v_meta])*
				$v {
					$( $i: $it $(<$iit>)?, )*
				},
			)*
		}

		impl $n {
			pub(crate) fn decode<S: $crate::source::ByteSource>(parser: &mut $crate::parser::Parser<S>) -> $crate::error::Result<$n> {
				let $t = parser.consume_u8()?;
				match $t {
					$( $tv => {
						$( let $i = jvms_notation!(read, parser, $it $(<$iit> [$lt])?); )*
						Ok($n::$v {
							$( $i, )*
						})
					}, )*
					$t => Err($f($t)),
				}
			}

			pub fn encode(&self, writer: &mut impl $crate::source::ByteSink) -> $crate::error::Result<()> {
				$crate::source::ByteSink::write_u8(writer, self.tag())?;
				match self {
					$( $n::$v { $( $i, )* } => {
						$( jvms_notation!(write, writer, $i, $it $(<$iit> [$lt])?); )*
					}, )*
				}
				Ok(())
			}

			pub fn encoded_len(&self) -> usize {
				match self {
					$( $n::$v { $( $i, )* } => {
						1 $( + jvms_notation!(len, $i, $it $(<$iit> [$lt])?) )*
					}, )*
				}
			}

			/// The tag byte this is stored with.
			pub fn tag(&self) -> u8 {
				match self {
					$( $n::$v { .. } => $tv, )*
				}
			}
		}
	};
}

pub(crate) use jvms_notation;
