//! Derive macro generating `paramtree::Params` for structs with named fields.
//!
//! The generated code exposes one `FieldInfo` per visible field, in
//! declaration order, plus an index-based accessor the writer uses to reach
//! each field mutably.

mod params;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro implementing `Params` and `StructMut`.
///
/// # Field Attributes
/// - `#[param(rename = "name")]` - Path segment addressing this field, checked first
/// - `#[param(skip)]` - Hide the field; segments naming it are unknown fields
/// - `#[param(read_only)]` - The field is matched but refuses writes
///
/// `#[serde(rename = "name")]` (or `rename(deserialize = "name")`) is read as
/// the second-priority alias. The field name itself comes last.
///
/// ```ignore
/// #[derive(Params, Default)]
/// pub struct ServerConfig {
///     #[param(rename = "listen_port")]
///     pub port: u16,               // listen_port
///     #[serde(rename = "hostName")]
///     pub host: String,            // hostName
///     pub tls: Option<TlsConfig>,  // tls/...
/// }
/// ```
#[proc_macro_derive(Params, attributes(param, serde))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    params::generate_impl(&input).into()
}
