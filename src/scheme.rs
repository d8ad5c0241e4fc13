//! Scheme selection.
//!
//! A session resolves input against any number of *named* schemes at once
//! (OR'd into a [`SchemeSet`]) or against a single *indexed* scheme. Output
//! is a separate selection of at most one named or one indexed scheme.
//!
//! Scheme names are looked up in the named table first, then the indexed
//! table, so a named scheme shadows an indexed scheme of the same name.

use bitflags::bitflags;

use crate::dataset::{Dataset, ValueRef};
use crate::error::ResolveError;

/// Capacity ceiling of a [`SchemeSet`], and so of the named-scheme table.
pub const MAX_NAMED_SCHEMES: usize = u32::BITS as usize;

bitflags! {
    /// Set of named schemes, one bit per position in the dataset's
    /// sorted named-scheme table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SchemeSet: u32 {
        const _ = !0;
    }
}

impl SchemeSet {
    /// A set holding only the scheme at `position`.
    ///
    /// Positions at or above [`MAX_NAMED_SCHEMES`] yield the empty set.
    #[must_use]
    pub fn single(position: usize) -> Self {
        u32::try_from(position)
            .ok()
            .and_then(|p| 1u32.checked_shl(p))
            .map_or_else(Self::empty, Self::from_bits_retain)
    }

    /// Iterate the scheme positions in ascending order.
    pub fn positions(self) -> impl Iterator<Item = usize> {
        let bits = self.bits();
        (0..MAX_NAMED_SCHEMES).filter(move |&p| bits & (1 << p) != 0)
    }
}

/// Active input and output scheme selections for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeState {
    pub(crate) input: SchemeSet,
    pub(crate) input_index: Option<usize>,
    pub(crate) default_scheme: Option<usize>,
    pub(crate) default_value: Option<ValueRef>,
    pub(crate) output: SchemeSet,
    pub(crate) output_index: Option<usize>,
}

impl SchemeState {
    /// Active named input schemes.
    #[must_use]
    pub const fn input(&self) -> SchemeSet {
        self.input
    }

    /// Active indexed input scheme, by table position.
    #[must_use]
    pub const fn input_index(&self) -> Option<usize> {
        self.input_index
    }

    /// Active named output scheme, as a set of at most one bit.
    #[must_use]
    pub const fn output(&self) -> SchemeSet {
        self.output
    }

    /// Active indexed output scheme, by table position.
    #[must_use]
    pub const fn output_index(&self) -> Option<usize> {
        self.output_index
    }

    /// Named scheme whose default is the session default, if any.
    #[must_use]
    pub const fn default_scheme(&self) -> Option<usize> {
        self.default_scheme
    }

    /// The recorded session default value.
    #[must_use]
    pub const fn default_value(&self) -> Option<ValueRef> {
        self.default_value
    }

    /// True when no input scheme of either kind is active.
    #[must_use]
    pub fn is_input_empty(&self) -> bool {
        self.input.is_empty() && self.input_index.is_none()
    }

    /// Clear input and output selections. The default value is kept.
    pub fn clear(&mut self) {
        self.input = SchemeSet::empty();
        self.input_index = None;
        self.output = SchemeSet::empty();
        self.output_index = None;
    }

    /// Activate one input scheme by name.
    ///
    /// A named scheme is added to the input set; if the set was empty its
    /// default becomes the session default. An indexed scheme replaces the
    /// active indexed scheme; its first slot becomes the session default
    /// only while no named scheme is active.
    pub fn activate(&mut self, dataset: &Dataset, name: &str) -> Result<(), ResolveError> {
        if let Some(position) = dataset.find_named_scheme(name) {
            if dataset.find_indexed_scheme(name).is_some() {
                log::debug!("scheme {name} is both named and indexed; using named");
            }
            if self.input.is_empty() {
                self.default_scheme = Some(position);
                self.default_value = Some(dataset.named_scheme_default(position));
            }
            self.input |= SchemeSet::single(position);
            log::debug!("activated named input scheme {name} (bit {position})");
            return Ok(());
        }

        let Some(position) = dataset.find_indexed_scheme(name) else {
            log::debug!("unknown input scheme {name}");
            return Err(ResolveError::SchemeUnknown(name.to_string()));
        };
        if self.input_index != Some(position) {
            self.input_index = Some(position);
            if self.input.is_empty() {
                self.default_value = dataset.indexed_slots(position).first().copied();
            }
        }
        log::debug!("activated indexed input scheme {name}");
        Ok(())
    }

    /// Select the output scheme by name.
    ///
    /// Returns whether the selection changed.
    pub fn select_output(&mut self, dataset: &Dataset, name: &str) -> Result<bool, ResolveError> {
        if let Some(position) = dataset.find_named_scheme(name) {
            let bit = SchemeSet::single(position);
            if self.output.contains(bit) {
                return Ok(false);
            }
            self.output = bit;
            self.output_index = None;
            log::debug!("selected named output scheme {name}");
            return Ok(true);
        }

        let Some(position) = dataset.find_indexed_scheme(name) else {
            log::debug!("unknown output scheme {name}");
            return Err(ResolveError::SchemeUnknown(name.to_string()));
        };
        if self.output_index == Some(position) {
            return Ok(false);
        }
        self.output_index = Some(position);
        self.output = SchemeSet::empty();
        log::debug!("selected indexed output scheme {name}");
        Ok(true)
    }
}

/// Split a scheme list on spaces, tabs and commas, skipping empty tokens.
pub fn scheme_tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split([' ', '\t', ','])
        .filter(|token| !token.is_empty())
}
