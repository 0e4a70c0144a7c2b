//! Typed, named property arrays.
//!
//! A property is one of a closed set of value kinds. Numeric and vector kinds
//! hold an array of elements; the string kind holds exactly one string, since
//! the format stores a single null-terminated payload for it.
//!
//! Names and string payloads are kept as the raw bytes found on disk. They are
//! only checked for UTF-8 when borrowed as `&str`.

use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{
    read_array, read_cstring, read_fixed_bytes, read_property_header, read_vectors,
    tags, write_cstring, write_f32s, write_property_header, PropertyHeader,
    PROPERTY_HEADER_SIZE,
};
use crate::util::{Error, Result, Vec2, Vec3, Vec4};

/// Property value kind, discriminated by its on-disk tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyKind {
    /// Unsigned 8-bit integer
    Byte = tags::BYTE,
    /// Unsigned 16-bit integer
    Short = tags::SHORT,
    /// Unsigned 32-bit integer
    Integer32 = tags::INTEGER32,
    /// Unsigned 64-bit integer (also used for node hash references)
    Integer64 = tags::INTEGER64,
    /// 32-bit float
    Float = tags::FLOAT,
    /// 64-bit float
    Double = tags::DOUBLE,
    /// Single null-terminated string
    String = tags::STRING,
    /// Two 32-bit floats
    Vector2 = tags::VECTOR2,
    /// Three 32-bit floats
    Vector3 = tags::VECTOR3,
    /// Four 32-bit floats
    Vector4 = tags::VECTOR4,
}

impl PropertyKind {
    /// All kinds, in tag declaration order.
    pub const ALL: [Self; 10] = [
        Self::Byte,
        Self::Short,
        Self::Integer32,
        Self::Integer64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Vector2,
        Self::Vector3,
        Self::Vector4,
    ];

    /// The on-disk tag.
    #[inline]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its on-disk tag.
    pub fn from_tag(tag: u16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == tag)
            .ok_or(Error::UnsupportedPropertyKind(tag))
    }

    /// Size in bytes of one element. Strings count bytes.
    #[inline]
    pub const fn element_size(self) -> usize {
        match self {
            Self::Byte | Self::String => 1,
            Self::Short => 2,
            Self::Integer32 | Self::Float => 4,
            Self::Integer64 | Self::Double | Self::Vector2 => 8,
            Self::Vector3 => 12,
            Self::Vector4 => 16,
        }
    }

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer32 => "int32",
            Self::Integer64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Vector2 => "vec2",
            Self::Vector3 => "vec3",
            Self::Vector4 => "vec4",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property payload, one variant per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValues {
    Byte(Vec<u8>),
    Short(Vec<u16>),
    Integer32(Vec<u32>),
    Integer64(Vec<u64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// String bytes without the terminator.
    String(Vec<u8>),
    Vector2(Vec<Vec2>),
    Vector3(Vec<Vec3>),
    Vector4(Vec<Vec4>),
}

impl PropertyValues {
    /// Zero-filled payload with `count` elements (an empty string for strings).
    pub fn with_len(kind: PropertyKind, count: usize) -> Self {
        match kind {
            PropertyKind::Byte => Self::Byte(vec![0; count]),
            PropertyKind::Short => Self::Short(vec![0; count]),
            PropertyKind::Integer32 => Self::Integer32(vec![0; count]),
            PropertyKind::Integer64 => Self::Integer64(vec![0; count]),
            PropertyKind::Float => Self::Float(vec![0.0; count]),
            PropertyKind::Double => Self::Double(vec![0.0; count]),
            PropertyKind::String => Self::String(Vec::new()),
            PropertyKind::Vector2 => Self::Vector2(vec![Vec2::ZERO; count]),
            PropertyKind::Vector3 => Self::Vector3(vec![Vec3::ZERO; count]),
            PropertyKind::Vector4 => Self::Vector4(vec![Vec4::ZERO; count]),
        }
    }

    /// Kind of the stored values.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Byte(_) => PropertyKind::Byte,
            Self::Short(_) => PropertyKind::Short,
            Self::Integer32(_) => PropertyKind::Integer32,
            Self::Integer64(_) => PropertyKind::Integer64,
            Self::Float(_) => PropertyKind::Float,
            Self::Double(_) => PropertyKind::Double,
            Self::String(_) => PropertyKind::String,
            Self::Vector2(_) => PropertyKind::Vector2,
            Self::Vector3(_) => PropertyKind::Vector3,
            Self::Vector4(_) => PropertyKind::Vector4,
        }
    }

    /// Number of values. Always 1 for strings.
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Integer32(v) => v.len(),
            Self::Integer64(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::String(_) => 1,
            Self::Vector2(v) => v.len(),
            Self::Vector3(v) => v.len(),
            Self::Vector4(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes the payload occupies on disk.
    pub fn payload_len(&self) -> usize {
        match self {
            Self::String(s) => s.len() + 1,
            other => other.len() * other.kind().element_size(),
        }
    }

    /// The header's array length field: element count, or string bytes
    /// including the terminator.
    fn array_len(&self) -> usize {
        match self {
            Self::String(s) => s.len() + 1,
            other => other.len(),
        }
    }

    fn decode<R: Read>(kind: PropertyKind, array_len: u32, r: &mut R) -> Result<Self> {
        let n = array_len as usize;
        let values = match kind {
            PropertyKind::Byte => Self::Byte(read_array(r, n, |r, dst| r.read_exact(dst))?),
            PropertyKind::Short => {
                Self::Short(read_array(r, n, |r, dst| r.read_u16_into::<LittleEndian>(dst))?)
            }
            PropertyKind::Integer32 => {
                Self::Integer32(read_array(r, n, |r, dst| r.read_u32_into::<LittleEndian>(dst))?)
            }
            PropertyKind::Integer64 => {
                Self::Integer64(read_array(r, n, |r, dst| r.read_u64_into::<LittleEndian>(dst))?)
            }
            PropertyKind::Float => {
                Self::Float(read_array(r, n, |r, dst| r.read_f32_into::<LittleEndian>(dst))?)
            }
            PropertyKind::Double => {
                Self::Double(read_array(r, n, |r, dst| r.read_f64_into::<LittleEndian>(dst))?)
            }
            PropertyKind::String => Self::String(read_cstring(r)?),
            PropertyKind::Vector2 => Self::Vector2(read_vectors(r, n)?),
            PropertyKind::Vector3 => Self::Vector3(read_vectors(r, n)?),
            PropertyKind::Vector4 => Self::Vector4(read_vectors(r, n)?),
        };
        Ok(values)
    }

    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Self::Byte(v) => w.write_all(v)?,
            Self::Short(v) => {
                for &x in v {
                    w.write_u16::<LittleEndian>(x)?;
                }
            }
            Self::Integer32(v) => {
                for &x in v {
                    w.write_u32::<LittleEndian>(x)?;
                }
            }
            Self::Integer64(v) => {
                for &x in v {
                    w.write_u64::<LittleEndian>(x)?;
                }
            }
            Self::Float(v) => write_f32s(w, v)?,
            Self::Double(v) => {
                for &x in v {
                    w.write_f64::<LittleEndian>(x)?;
                }
            }
            Self::String(s) => write_cstring(w, s)?,
            Self::Vector2(v) => write_f32s(w, bytemuck::cast_slice(v))?,
            Self::Vector3(v) => write_f32s(w, bytemuck::cast_slice(v))?,
            Self::Vector4(v) => write_f32s(w, bytemuck::cast_slice(v))?,
        }
        Ok(())
    }
}

/// Element types that can be read from and written to an array property.
///
/// Strings are not included; use [`Property::as_str`] and
/// [`Property::set_string`] for them.
pub trait PropertyValue: Copy + 'static {
    /// Kind a property must have to hold this type.
    const KIND: PropertyKind;

    /// Borrow the values if they are of this type.
    fn slice(values: &PropertyValues) -> Option<&[Self]>;

    /// Mutably borrow the values if they are of this type.
    fn vec_mut(values: &mut PropertyValues) -> Option<&mut Vec<Self>>;

    /// Wrap owned values.
    fn wrap(values: Vec<Self>) -> PropertyValues;
}

macro_rules! impl_property_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const KIND: PropertyKind = PropertyKind::$variant;

                #[inline]
                fn slice(values: &PropertyValues) -> Option<&[Self]> {
                    match values {
                        PropertyValues::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn vec_mut(values: &mut PropertyValues) -> Option<&mut Vec<Self>> {
                    match values {
                        PropertyValues::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn wrap(values: Vec<Self>) -> PropertyValues {
                    PropertyValues::$variant(values)
                }
            }
        )*
    };
}

impl_property_value! {
    u8 => Byte,
    u16 => Short,
    u32 => Integer32,
    u64 => Integer64,
    f32 => Float,
    f64 => Double,
    Vec2 => Vector2,
    Vec3 => Vector3,
    Vec4 => Vector4,
}

/// A named, typed property.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: Vec<u8>,
    values: PropertyValues,
}

impl Property {
    /// Create a property with `count` zeroed values of `kind`.
    pub fn new(kind: PropertyKind, name: impl Into<Vec<u8>>, count: usize) -> Self {
        Self {
            name: name.into(),
            values: PropertyValues::with_len(kind, count),
        }
    }

    /// Create a property from a raw kind tag.
    pub fn create(kind_tag: u16, name: impl Into<Vec<u8>>, count: usize) -> Result<Self> {
        let kind = PropertyKind::from_tag(kind_tag)?;
        Ok(Self::new(kind, name, count))
    }

    /// Create a property holding `values`.
    pub fn from_values<T: PropertyValue>(name: impl Into<Vec<u8>>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values: T::wrap(values),
        }
    }

    /// Create a string property. Accepts text or raw bytes.
    pub fn from_string(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            values: PropertyValues::String(value.into()),
        }
    }

    /// Name for display; invalid UTF-8 is replaced.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Name exactly as stored.
    #[inline]
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    /// Name as text, failing on invalid UTF-8.
    pub fn name_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.name)?)
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.values.kind()
    }

    #[inline]
    pub fn values(&self) -> &PropertyValues {
        &self.values
    }

    /// Number of values (1 for strings).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the values as `T`.
    pub fn get<T: PropertyValue>(&self) -> Result<&[T]> {
        T::slice(&self.values).ok_or_else(|| self.mismatch(T::KIND))
    }

    /// Borrow the first value as `T`.
    pub fn first<T: PropertyValue>(&self) -> Result<&T> {
        self.get::<T>()?
            .first()
            .ok_or_else(|| Error::EmptyValues(self.name().into_owned()))
    }

    /// Borrow the string value as text.
    pub fn as_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(self.as_bytes()?)?)
    }

    /// Borrow the string value's raw bytes.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match &self.values {
            PropertyValues::String(s) => Ok(s),
            _ => Err(self.mismatch(PropertyKind::String)),
        }
    }

    /// Replace all values. `T` must match the property's kind.
    pub fn set_values<T: PropertyValue>(&mut self, values: Vec<T>) -> Result<()> {
        let kind = self.kind();
        let slot = T::vec_mut(&mut self.values)
            .ok_or_else(|| Error::mismatch(T::KIND.name(), kind.name()))?;
        *slot = values;
        Ok(())
    }

    /// Append values. `T` must match the property's kind.
    pub fn add_values<T: PropertyValue>(&mut self, values: impl IntoIterator<Item = T>) -> Result<()> {
        let kind = self.kind();
        let slot = T::vec_mut(&mut self.values)
            .ok_or_else(|| Error::mismatch(T::KIND.name(), kind.name()))?;
        slot.extend(values);
        Ok(())
    }

    /// Replace the string value.
    pub fn set_string(&mut self, value: impl Into<Vec<u8>>) -> Result<()> {
        match &mut self.values {
            PropertyValues::String(s) => {
                *s = value.into();
                Ok(())
            }
            other => Err(Error::mismatch(PropertyKind::String.name(), other.kind().name())),
        }
    }

    /// Exact number of bytes [`Property::encode`] writes.
    pub fn encoded_length(&self) -> usize {
        PROPERTY_HEADER_SIZE + self.name.len() + self.values.payload_len()
    }

    /// Decode one property: header, name bytes, payload.
    pub fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let header = read_property_header(r)?;
        let kind = PropertyKind::from_tag(header.kind_tag)?;
        let name = read_fixed_bytes(r, header.name_len as usize)?;
        let values = PropertyValues::decode(kind, header.array_len, r)?;
        let property = Self { name, values };
        tracing::trace!(name = %property.name(), kind = %kind, len = property.len(), "decoded property");
        Ok(property)
    }

    /// Encode header, name bytes and payload.
    pub fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        let name_len = u16::try_from(self.name.len())
            .map_err(|_| Error::invalid(format!("property name too long: {} bytes", self.name.len())))?;
        let array_len = u32::try_from(self.values.array_len())
            .map_err(|_| Error::invalid(format!("property '{}' has too many values", self.name())))?;

        write_property_header(
            w,
            &PropertyHeader {
                kind_tag: self.kind().tag(),
                name_len,
                array_len,
            },
        )?;
        w.write_all(&self.name)?;
        self.values.encode(w)
    }

    fn mismatch(&self, expected: PropertyKind) -> Error {
        Error::mismatch(expected.name(), self.kind().name())
    }
}
