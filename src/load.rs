use crate::{
    ParamErrorKind, Params, Result,
    tree::{Node, PATH_SEPARATOR},
};

/// How [`load`] treats a flat parameter listing.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Stripped from every parameter name. Names without it are skipped.
    pub prefix: String,
    /// Treat a warning outcome (only unmapped or malformed paths) as success.
    /// Fatal outcomes are returned regardless.
    pub ignore_unmapped: bool,
    /// Reject any parameter path with more segments than this.
    pub max_depth: Option<usize>,
}

impl LoadOptions {
    /// Options stripping `prefix` from every parameter name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        LoadOptions {
            prefix: prefix.into(),
            ..Self::default()
        }
    }
}

/// Writes parameters named as in a hierarchical key-value store into
/// `destination`.
///
/// Parameter names are matched against [`LoadOptions::prefix`] first; the
/// remainder, with any leading separator dropped, is the path written.
/// Nothing is written if the root is unsuitable or a path is too deep.
pub fn load<T, I, K, V>(params: I, options: &LoadOptions, destination: &mut T) -> Result<()>
where
    T: Params,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    log::trace!("Loading params with prefix '{}'", options.prefix);

    let mut tree = Node::new();
    for (name, value) in params {
        let name = name.as_ref();
        let Some(path) = name.strip_prefix(options.prefix.as_str()) else {
            log::debug!("Skipping param '{name}' outside prefix '{}'", options.prefix);
            continue;
        };
        let path = path.trim_start_matches(PATH_SEPARATOR);

        if let Some(max_depth) = options.max_depth {
            let depth = path.split(PATH_SEPARATOR).count();
            if depth > max_depth {
                return Err(ParamErrorKind::PathTooDeep {
                    path: path.to_owned(),
                    depth,
                    max_depth,
                }
                .into());
            }
        }

        tree.insert(path, value);
    }

    match crate::write_tree(&tree, destination) {
        Err(error) if error.is_warning() && options.ignore_unmapped => {
            log::warn!("Ignoring unmapped params: {error}");
            Ok(())
        }
        result => result,
    }
}
