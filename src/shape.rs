//! Mutable views into destination values, classified by shape.
//!
//! Every type that parameters can be written into implements [`Params`], which
//! hands out a [`Location`]: one variant per shape the writer knows how to
//! handle. Structs get their implementation from `#[derive(Params)]`; the std
//! scalars, collections and pointer types are covered here.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

/// A value that a parameter tree can be written into.
pub trait Params {
    /// Returns a mutable view of this value, classified by shape.
    fn location(&mut self) -> Location<'_>;
}

/// A place a value can be written, borrowed from the caller's live object.
pub enum Location<'a> {
    /// A primitive leaf.
    Scalar(ScalarMut<'a>),
    /// A struct with named fields.
    Struct(&'a mut dyn StructMut),
    /// A keyed collection.
    Map(&'a mut dyn MapMut),
    /// A growable sequence.
    Slice(&'a mut dyn SliceMut),
    /// An owning or nullable pointer.
    Pointer(&'a mut dyn PointerMut),
    /// A fixed-size array. Accepted as a write root, never written into.
    Array,
    /// Any other type; the string names it in diagnostics.
    Unsupported(&'static str),
}

impl Location<'_> {
    /// Short name of this shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Location::Scalar(scalar) => scalar.kind(),
            Location::Struct(_) => "struct",
            Location::Map(_) => "map",
            Location::Slice(_) => "slice",
            Location::Pointer(_) => "pointer",
            Location::Array => "array",
            Location::Unsupported(kind) => *kind,
        }
    }
}

/// A mutable reference to one of the supported primitive types.
#[allow(missing_docs)]
pub enum ScalarMut<'a> {
    String(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
}

impl ScalarMut<'_> {
    /// The declared kind of the referenced value, e.g. `"u16"`.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarMut::String(_) => "string",
            ScalarMut::I8(_) => "i8",
            ScalarMut::I16(_) => "i16",
            ScalarMut::I32(_) => "i32",
            ScalarMut::I64(_) => "i64",
            ScalarMut::I128(_) => "i128",
            ScalarMut::Isize(_) => "isize",
            ScalarMut::U8(_) => "u8",
            ScalarMut::U16(_) => "u16",
            ScalarMut::U32(_) => "u32",
            ScalarMut::U64(_) => "u64",
            ScalarMut::U128(_) => "u128",
            ScalarMut::Usize(_) => "usize",
            ScalarMut::F32(_) => "f32",
            ScalarMut::F64(_) => "f64",
            ScalarMut::Bool(_) => "bool",
        }
    }
}

/// Static description of one struct field, generated by `#[derive(Params)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// The field's name as declared in Rust.
    pub name: &'static str,
    /// Alias from `#[param(rename = "...")]`.
    pub rename: Option<&'static str>,
    /// Alias from `#[serde(rename = "...")]`.
    pub serde_rename: Option<&'static str>,
}

/// A struct whose fields can be looked up by index.
pub trait StructMut {
    /// The fields visible to the writer, in declaration order.
    fn fields(&self) -> &'static [FieldInfo];

    /// Mutable access to the field at `index` in [`StructMut::fields`].
    ///
    /// Returns `None` for fields marked `#[param(read_only)]`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Params>;
}

/// A map keyed by path segments.
pub trait MapMut {
    /// Whether keys can be built from path segments at all.
    fn has_string_keys(&self) -> bool;

    /// The entry stored under `key`, inserting a default value if absent.
    ///
    /// Returns `None` when `key` cannot be converted to the map's key type.
    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Params>;
}

/// A growable sequence of elements.
pub trait SliceMut {
    /// Current number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends default elements until the length is at least `len`. Never shrinks.
    fn grow_to(&mut self, len: usize);

    /// Mutable access to the element at `index`, if in bounds.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Params>;
}

/// A pointer that owns its target, allocating one on demand.
pub trait PointerMut {
    /// Whether the pointer currently has no target.
    fn is_null(&self) -> bool;

    /// The pointee, allocated with its default value first if the pointer is null.
    fn get_or_alloc(&mut self) -> &mut dyn Params;
}

/// Key types a [`MapMut`] can be built from.
pub trait MapKey: Sized {
    /// Whether this key type is built from path segments.
    const STRING_LIKE: bool;

    /// Builds a key from a path segment.
    fn from_param_key(key: &str) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Params for $ty {
                fn location(&mut self) -> Location<'_> {
                    Location::Scalar(ScalarMut::$variant(self))
                }
            }
        )*
    };
}

impl_scalar! {
    String => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

macro_rules! impl_unsupported {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Params for $ty {
                fn location(&mut self) -> Location<'_> {
                    Location::Unsupported($kind)
                }
            }
        )*
    };
}

impl_unsupported! {
    char => "char",
    () => "unit",
}

impl<T, const N: usize> Params for [T; N] {
    fn location(&mut self) -> Location<'_> {
        Location::Array
    }
}

impl<T: Params> Params for Box<T> {
    fn location(&mut self) -> Location<'_> {
        Location::Pointer(self)
    }
}

impl<T: Params> PointerMut for Box<T> {
    fn is_null(&self) -> bool {
        false
    }

    fn get_or_alloc(&mut self) -> &mut dyn Params {
        &mut **self
    }
}

impl<T: Params + Default> Params for Option<T> {
    fn location(&mut self) -> Location<'_> {
        Location::Pointer(self)
    }
}

impl<T: Params + Default> PointerMut for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn get_or_alloc(&mut self) -> &mut dyn Params {
        self.get_or_insert_with(T::default)
    }
}

impl<T: Params + Default> Params for Vec<T> {
    fn location(&mut self) -> Location<'_> {
        Location::Slice(self)
    }
}

impl<T: Params + Default> SliceMut for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn grow_to(&mut self, len: usize) {
        if Vec::len(self) < len {
            self.resize_with(len, T::default);
        }
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Params> {
        let element = self.get_mut(index)?;
        Some(element)
    }
}

impl<K, V, S> Params for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Params + Default,
    S: BuildHasher,
{
    fn location(&mut self) -> Location<'_> {
        Location::Map(self)
    }
}

impl<K, V, S> MapMut for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Params + Default,
    S: BuildHasher,
{
    fn has_string_keys(&self) -> bool {
        K::STRING_LIKE
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Params> {
        let key = K::from_param_key(key)?;
        Some(self.entry(key).or_default())
    }
}

impl<K, V> Params for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Params + Default,
{
    fn location(&mut self) -> Location<'_> {
        Location::Map(self)
    }
}

impl<K, V> MapMut for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Params + Default,
{
    fn has_string_keys(&self) -> bool {
        K::STRING_LIKE
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Params> {
        let key = K::from_param_key(key)?;
        Some(self.entry(key).or_default())
    }
}

macro_rules! impl_string_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const STRING_LIKE: bool = true;

                fn from_param_key(key: &str) -> Option<Self> {
                    Some(key.into())
                }
            }
        )*
    };
}

impl_string_key!(String, Box<str>, Rc<str>, Arc<str>);

impl MapKey for Cow<'static, str> {
    const STRING_LIKE: bool = true;

    fn from_param_key(key: &str) -> Option<Self> {
        Some(Cow::Owned(key.to_owned()))
    }
}

macro_rules! impl_opaque_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const STRING_LIKE: bool = false;

                fn from_param_key(_key: &str) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

impl_opaque_key!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char
);
