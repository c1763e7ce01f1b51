//! Canonical byte encoding for options.
//!
//! Layout: `[version][tag][payload]`, integers big-endian. Tag `0x00` is the
//! empty option; every other tag is a [`Kind::tag`]. Decoding routes through
//! the construction router, so a cached scalar comes back as its canonical
//! instance and empty/null come back as their singletons.

use crate::error::{DecodeError, EncodeError};
use crate::kind::{Kind, Value};
use crate::router;
use crate::scalar::Scalar;
use crate::variant::{Opt, ScalarOpt};

// ——— Canonical encoding version ———

const ENC_V1: u8 = 1; // version tag for canonical encodings
const TAG_NONE: u8 = 0x00;

type Result<T> = core::result::Result<T, DecodeError>;

/// Fixed-width payload encoding for a scalar kind.
pub trait ScalarWire: Sized {
    fn encode(self, out: &mut Vec<u8>);
    fn decode(data: &mut &[u8]) -> Result<Self>;
}

/// Payload encoding for reference values stored in an [`Opt`].
pub trait RefCodec: Sized {
    fn encode_ref(&self, out: &mut Vec<u8>) -> core::result::Result<(), EncodeError>;
    fn decode_ref(data: &mut &[u8]) -> Result<Self>;
}

macro_rules! impl_wire_be_bytes {
    ($($t:ty),*) => {
        $(
            impl ScalarWire for $t {
                fn encode(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }

                fn decode(data: &mut &[u8]) -> Result<Self> {
                    Ok(<$t>::from_be_bytes(read_fixed(data)?))
                }
            }
        )*
    };
}

// Floats go through their raw bits, so NaN payloads and signed zeros
// survive.
impl_wire_be_bytes!(i8, i16, i32, i64, f32, f64);

impl ScalarWire for bool {
    fn encode(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }

    fn decode(data: &mut &[u8]) -> Result<Self> {
        match read_u8(data)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }
}

impl ScalarWire for char {
    fn encode(self, out: &mut Vec<u8>) {
        encode_u32(u32::from(self), out);
    }

    fn decode(data: &mut &[u8]) -> Result<Self> {
        let raw = read_u32(data)?;
        char::from_u32(raw).ok_or(DecodeError::InvalidChar(raw))
    }
}

impl RefCodec for Vec<u8> {
    fn encode_ref(&self, out: &mut Vec<u8>) -> core::result::Result<(), EncodeError> {
        encode_bytes(self, out)
    }

    fn decode_ref(data: &mut &[u8]) -> Result<Self> {
        read_vec(data)
    }
}

impl RefCodec for String {
    fn encode_ref(&self, out: &mut Vec<u8>) -> core::result::Result<(), EncodeError> {
        encode_bytes(self.as_bytes(), out)
    }

    fn decode_ref(data: &mut &[u8]) -> Result<Self> {
        String::from_utf8(read_vec(data)?).map_err(|e| DecodeError::InvalidPayload(e.to_string()))
    }
}

impl<K: Scalar> ScalarOpt<K> {
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + 8);
        out.push(ENC_V1);
        match self.present() {
            Some(p) => {
                out.push(K::KIND.tag());
                p.get().encode(&mut out);
            }
            None => out.push(TAG_NONE),
        }
        out
    }

    pub fn from_canonical_bytes(mut data: &[u8]) -> Result<Self> {
        read_version(&mut data)?;
        let opt = match read_tag(&mut data)? {
            None => ScalarOpt::none(),
            Some(kind) if kind == K::KIND => resolve_scalar(K::decode(&mut data)?),
            Some(found) => return Err(DecodeError::WrongKind { expected: K::KIND, found }),
        };
        if !data.is_empty() {
            return Err(DecodeError::TrailingBytes);
        }
        Ok(opt)
    }
}

impl<R: RefCodec> Opt<R> {
    /// Fails only when a reference payload is longer than `u32::MAX` bytes.
    pub fn to_canonical_bytes(&self) -> core::result::Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(2 + 8);
        out.push(ENC_V1);
        match self.kind() {
            Some(kind) => out.push(kind.tag()),
            None => out.push(TAG_NONE),
        }
        match self {
            Opt::None | Opt::Null => {}
            Opt::Ref(r) => r.encode_ref(&mut out)?,
            Opt::Bool(p) => p.get().encode(&mut out),
            Opt::I8(p) => p.get().encode(&mut out),
            Opt::I16(p) => p.get().encode(&mut out),
            Opt::Char(p) => p.get().encode(&mut out),
            Opt::I32(p) => p.get().encode(&mut out),
            Opt::I64(p) => p.get().encode(&mut out),
            Opt::F32(p) => p.get().encode(&mut out),
            Opt::F64(p) => p.get().encode(&mut out),
        }
        Ok(out)
    }

    pub fn from_canonical_bytes(mut data: &[u8]) -> Result<Self> {
        read_version(&mut data)?;
        let Some(kind) = read_tag(&mut data)? else {
            return finish(Opt::None, data);
        };
        let value = match kind {
            Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(bool::decode(&mut data)?),
            Kind::I8 => Value::I8(i8::decode(&mut data)?),
            Kind::I16 => Value::I16(i16::decode(&mut data)?),
            Kind::Char => Value::Char(char::decode(&mut data)?),
            Kind::I32 => Value::I32(i32::decode(&mut data)?),
            Kind::I64 => Value::I64(i64::decode(&mut data)?),
            Kind::F32 => Value::F32(f32::decode(&mut data)?),
            Kind::F64 => Value::F64(f64::decode(&mut data)?),
            Kind::Ref => Value::Ref(R::decode_ref(&mut data)?),
        };
        let opt = router::option_of(value);
        if opt.is_cached() {
            log::trace!("decoded {} option resolved to its canonical instance", kind);
        }
        finish(opt, data)
    }
}

fn finish<T>(decoded: T, data: &[u8]) -> Result<T> {
    if !data.is_empty() {
        return Err(DecodeError::TrailingBytes);
    }
    Ok(decoded)
}

fn resolve_scalar<K: Scalar>(value: K) -> ScalarOpt<K> {
    let opt = ScalarOpt::of(value);
    if opt.is_cached() {
        log::trace!("decoded {} option resolved to its canonical instance", K::KIND);
    }
    opt
}

fn read_version(data: &mut &[u8]) -> Result<()> {
    let ver = read_u8(data)?;
    if ver != ENC_V1 {
        return Err(DecodeError::UnsupportedVersion(ver));
    }
    Ok(())
}

/// `None` for the empty tag.
fn read_tag(data: &mut &[u8]) -> Result<Option<Kind>> {
    let tag = read_u8(data)?;
    if tag == TAG_NONE {
        return Ok(None);
    }
    Kind::from_tag(tag).map(Some).ok_or(DecodeError::UnknownTag(tag))
}

// ——— Encoding primitives ———

pub(crate) fn encode_u32(v: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn length_prefix(len: usize) -> core::result::Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge(len))
}

/// `u32` length prefix followed by the bytes.
pub(crate) fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) -> core::result::Result<(), EncodeError> {
    encode_u32(length_prefix(bytes.len())?, out);
    out.extend_from_slice(bytes);
    Ok(())
}

pub(crate) fn read_u8(data: &mut &[u8]) -> Result<u8> {
    let (&v, rest) = data.split_first().ok_or(DecodeError::UnexpectedEof)?;
    *data = rest;
    Ok(v)
}

pub(crate) fn read_u32(data: &mut &[u8]) -> Result<u32> {
    Ok(u32::from_be_bytes(read_fixed(data)?))
}

pub(crate) fn read_fixed<const N: usize>(data: &mut &[u8]) -> Result<[u8; N]> {
    if data.len() < N {
        return Err(DecodeError::UnexpectedEof);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&data[..N]);
    *data = &data[N..];
    Ok(out)
}

pub(crate) fn read_vec(data: &mut &[u8]) -> Result<Vec<u8>> {
    let len = read_u32(data)? as usize;
    if data.len() < len {
        return Err(DecodeError::UnexpectedEof);
    }
    let v = data[..len].to_vec();
    *data = &data[len..];
    Ok(v)
}
