//! Writing a parameter tree into a destination value.

use crate::{
    coerce,
    error::{WriteError, WriteErrors},
    resolve,
    shape::{Location, MapMut, Params, SliceMut, StructMut},
    tree::Node,
};

impl Node {
    /// Writes this tree into `destination`, collecting every failure instead
    /// of stopping at the first.
    ///
    /// Failure paths are relative to this node. Existing map entries and
    /// slice elements are updated in place; anything the tree does not
    /// mention is left as it was.
    pub fn write(&self, destination: &mut dyn Params) -> WriteErrors {
        if self.is_leaf() {
            return match &self.value {
                Some(value) => write_leaf(value, destination),
                None => WriteErrors::new(),
            };
        }

        let mut errors = WriteErrors::new();

        if self.has_self_value() {
            errors.push(WriteError::path_level(
                "ignoring self value of key that has child keys",
            ));
        }

        let location = deref(destination.location());
        log::trace!("Writing {} children into {}", self.children.len(), location.kind());

        match location {
            Location::Struct(destination) => errors.merge(self.write_struct(destination)),
            Location::Map(destination) => errors.merge(self.write_map(destination)),
            Location::Slice(destination) => errors.merge(self.write_slice(destination)),
            other => errors.push(WriteError::fatal(format!(
                "unhandleable destination type: {}",
                other.kind()
            ))),
        }

        errors
    }

    fn write_struct(&self, destination: &mut dyn StructMut) -> WriteErrors {
        let mut errors = WriteErrors::new();
        for (key, child) in &self.children {
            let Some(index) = resolve::resolve_field(destination.fields(), key) else {
                log::debug!("No field matches '{key}'");
                errors.push(WriteError::path_level("unknown field").at(key));
                continue;
            };
            let child_errors = match destination.field_mut(index) {
                Some(field) => child.write(field),
                None => WriteError::fatal("value is not writable").into(),
            };
            errors.merge_child(key, child_errors);
        }
        errors
    }

    fn write_map(&self, destination: &mut dyn MapMut) -> WriteErrors {
        if !destination.has_string_keys() {
            return WriteError::fatal("can only write to maps with string keys").into();
        }

        let mut errors = WriteErrors::new();
        for (key, child) in &self.children {
            match destination.entry_mut(key) {
                Some(entry) => errors.merge_child(key, child.write(entry)),
                None => errors.push(WriteError::fatal("cannot build map key").at(key)),
            }
        }
        errors
    }

    fn write_slice(&self, destination: &mut dyn SliceMut) -> WriteErrors {
        let mut errors = WriteErrors::new();
        let mut indexed = Vec::with_capacity(self.children.len());
        for (key, child) in &self.children {
            match parse_index(key) {
                Some(index) => indexed.push((index, child)),
                None => errors.push(WriteError::path_level("not a numeric index").at(key)),
            }
        }

        if let Some(max_index) = indexed.iter().map(|(index, _)| *index).max() {
            if destination.len() <= max_index {
                log::debug!(
                    "Growing slice from {} to {} elements",
                    destination.len(),
                    max_index + 1
                );
                destination.grow_to(max_index + 1);
            }
        }

        for (index, child) in indexed {
            let key = index.to_string();
            match destination.element_mut(index) {
                Some(element) => errors.merge_child(&key, child.write(element)),
                None => errors.push(WriteError::fatal("index out of range").at(key)),
            }
        }
        errors
    }
}

fn write_leaf(value: &str, destination: &mut dyn Params) -> WriteErrors {
    match deref(destination.location()) {
        Location::Scalar(scalar) => match coerce::write_scalar(scalar, value) {
            Ok(()) => WriteErrors::new(),
            Err(error) => error.into(),
        },
        other => WriteError::fatal(format!(
            "cannot write param: destination is of unsupported type {}",
            other.kind()
        ))
        .into(),
    }
}

/// A slice index no sequence can reach (above `isize::MAX`) is not an index.
fn parse_index(key: &str) -> Option<usize> {
    key.parse::<usize>()
        .ok()
        .filter(|index| isize::try_from(*index).is_ok())
}

/// Follows pointers down to their target, allocating empty ones on the way.
fn deref(mut location: Location<'_>) -> Location<'_> {
    while let Location::Pointer(pointer) = location {
        if pointer.is_null() {
            log::debug!("Allocating value behind empty pointer");
        }
        location = pointer.get_or_alloc().location();
    }
    location
}
