#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod coerce;
mod error;
mod load;
mod resolve;
mod shape;
mod tree;
mod write;

pub use error::{ParamError, ParamErrorKind, Severity, WriteError, WriteErrors};
pub use load::{LoadOptions, load};
pub use paramtree_derive::Params;
pub use shape::{
    FieldInfo, Location, MapKey, MapMut, Params, PointerMut, ScalarMut, SliceMut, StructMut,
};
pub use tree::{Node, PATH_SEPARATOR};

type Result<T> = std::result::Result<T, ParamError>;

/// Writes `(path, value)` pairs into `destination`.
///
/// Paths are split on `/` and matched against struct fields, map keys and
/// slice indices. Every failure is collected; the returned error is a warning
/// (see [`ParamError::is_warning`]) when all of them were unmapped or
/// malformed paths.
pub fn write<T, I, K, V>(destination: &mut T, params: I) -> Result<()>
where
    T: Params,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let tree: Node = params.into_iter().collect();
    write_tree(&tree, destination)
}

/// Writes an already built tree into `destination`.
///
/// The destination must be a struct or a fixed-size array; anything else is
/// rejected before a single value is written.
pub fn write_tree<T: Params>(tree: &Node, destination: &mut T) -> Result<()> {
    match destination.location() {
        Location::Struct(_) | Location::Array => {}
        other => {
            log::debug!("Rejecting {} as write root", other.kind());
            return Err(ParamErrorKind::InvalidRoot(other.kind()).into());
        }
    }

    log::trace!("Writing tree of depth {}", tree.depth());
    tree.write(destination).into_result()
}
