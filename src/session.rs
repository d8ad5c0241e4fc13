//! Resolver sessions.
//!
//! A [`Session`] owns all mutable resolver state: the scheme selections,
//! the current value, the cached output name, the name cache and the
//! canonicalization buffer. The dataset it reads is shared and immutable.
//!
//! # Examples
//!
//! ```
//! use swatch::Session;
//!
//! let mut session = Session::new();
//! session.activate_input_schemes("x11").unwrap();
//! session.select_output_scheme("x11").unwrap();
//!
//! session.resolve("Red").unwrap();
//! assert_eq!(session.rgba().unwrap().bytes(), [255, 0, 0, 255]);
//! assert_eq!(session.name().unwrap(), "red");
//! ```

use crate::builtin;
use crate::cache::{CacheStats, DEFAULT_CACHE_CAPACITY, NameCache};
use crate::dataset::{Dataset, ValueRef};
use crate::error::ResolveError;
use crate::scheme::{SchemeState, scheme_tokens};
use crate::space::Rgba;

/// One caller's resolver state over a shared dataset.
#[derive(Debug)]
pub struct Session<'d> {
    pub(crate) dataset: &'d Dataset,
    pub(crate) schemes: SchemeState,
    pub(crate) cache: NameCache,
    pub(crate) value: Option<ValueRef>,
    pub(crate) out_name: Option<usize>,
    pub(crate) canon: String,
}

impl Default for Session<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Session<'static> {
    /// Create a session over the built-in palette with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dataset(builtin::dataset())
    }

    /// Configure a session.
    #[must_use]
    pub fn builder() -> SessionBuilder<'static> {
        SessionBuilder::new()
    }
}

impl<'d> Session<'d> {
    /// Create a session over `dataset` with default settings.
    #[must_use]
    pub fn with_dataset(dataset: &'d Dataset) -> Self {
        Self {
            dataset,
            schemes: SchemeState::default(),
            cache: NameCache::new(DEFAULT_CACHE_CAPACITY),
            value: None,
            out_name: None,
            canon: String::new(),
        }
    }

    /// The dataset this session resolves against.
    #[must_use]
    pub const fn dataset(&self) -> &'d Dataset {
        self.dataset
    }

    /// Current scheme selections.
    #[must_use]
    pub const fn schemes(&self) -> &SchemeState {
        &self.schemes
    }

    /// Name cache hit and miss counters.
    #[must_use]
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The current value, if one has been resolved or defaulted.
    #[must_use]
    pub const fn value(&self) -> Option<ValueRef> {
        self.value
    }

    /// Activate one more input scheme.
    ///
    /// The first scheme activated into an empty selection establishes the
    /// session default; if no value is current yet it becomes current.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] if `name` is in neither
    /// scheme table.
    pub fn activate_input_scheme(&mut self, name: &str) -> Result<(), ResolveError> {
        self.schemes.activate(self.dataset, name)?;
        self.out_name = None;
        if self.value.is_none()
            && let Some(default) = self.schemes.default_value()
        {
            self.set_value(default);
        }
        Ok(())
    }

    /// Replace the input selection with a list of schemes.
    ///
    /// The list is split on spaces, tabs and commas. Input and output
    /// selections are cleared first; the name cache is kept. Tokens are
    /// activated left to right and the first unknown token stops
    /// processing, leaving earlier tokens active.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] for the first unknown token.
    pub fn activate_input_schemes(&mut self, list: &str) -> Result<(), ResolveError> {
        self.schemes.clear();
        self.out_name = None;
        for token in scheme_tokens(list) {
            self.activate_input_scheme(token)?;
        }
        Ok(())
    }

    /// Select the output scheme by name.
    ///
    /// The cached output name is dropped only if the selection changes.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] if `name` is in neither
    /// scheme table.
    pub fn select_output_scheme(&mut self, name: &str) -> Result<(), ResolveError> {
        if self.schemes.select_output(self.dataset, name)? {
            self.out_name = None;
        }
        Ok(())
    }

    /// The recorded session default value.
    #[must_use]
    pub const fn session_default_value(&self) -> Option<ValueRef> {
        self.schemes.default_value()
    }

    /// Make the session default the current value.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] if no scheme has ever
    /// established a default.
    pub fn reset_to_default(&mut self) -> Result<(), ResolveError> {
        let default = self
            .schemes
            .default_value()
            .ok_or_else(|| ResolveError::SchemeUnknown(String::new()))?;
        self.set_value(default);
        Ok(())
    }

    /// Make `value` current, dropping the cached output name if it changed.
    pub(crate) fn set_value(&mut self, value: ValueRef) {
        if self.value != Some(value) {
            self.value = Some(value);
            self.out_name = None;
        }
    }

    fn current(&self) -> Result<ValueRef, ResolveError> {
        self.value
            .ok_or_else(|| ResolveError::ColorUnknown(String::new()))
    }

    /// The current value as quantized channels.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorUnknown`] if no value is current.
    pub fn rgba(&self) -> Result<Rgba, ResolveError> {
        Ok(self.dataset.rgba(self.current()?))
    }

    /// The current value as normalized channels.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorUnknown`] if no value is current.
    pub fn rgba_f64(&self) -> Result<[f64; 4], ResolveError> {
        Ok(self.rgba()?.normalized())
    }

    /// The current value as HSV plus alpha.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorUnknown`] if no value is current.
    pub fn hsva(&self) -> Result<[f64; 4], ResolveError> {
        Ok(self.rgba()?.to_hsva())
    }

    /// The current value as CMYK.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorUnknown`] if no value is current.
    pub fn cmyk(&self) -> Result<[f64; 4], ResolveError> {
        Ok(self.rgba()?.to_cmyk())
    }
}

/// Builder for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder<'d> {
    dataset: &'d Dataset,
    cache_capacity: usize,
    schemes: Option<String>,
    output: Option<String>,
}

impl Default for SessionBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder<'static> {
    /// Start from the built-in palette and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset: builtin::dataset(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            schemes: None,
            output: None,
        }
    }
}

impl<'d> SessionBuilder<'d> {
    /// Resolve against a different dataset.
    #[must_use]
    pub fn dataset<'e>(self, dataset: &'e Dataset) -> SessionBuilder<'e> {
        SessionBuilder {
            dataset,
            cache_capacity: self.cache_capacity,
            schemes: self.schemes,
            output: self.output,
        }
    }

    /// Set the name cache capacity. Zero is treated as one.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Input schemes to activate on build.
    #[must_use]
    pub fn schemes(mut self, list: &str) -> Self {
        self.schemes = Some(list.to_string());
        self
    }

    /// Output scheme to select on build.
    #[must_use]
    pub fn output(mut self, name: &str) -> Self {
        self.output = Some(name.to_string());
        self
    }

    /// Create the session.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] if a configured scheme is
    /// unknown.
    pub fn build(self) -> Result<Session<'d>, ResolveError> {
        let mut session = Session::with_dataset(self.dataset);
        session.cache = NameCache::new(self.cache_capacity);
        if let Some(list) = &self.schemes {
            session.activate_input_schemes(list)?;
        }
        if let Some(name) = &self.output {
            session.select_output_scheme(name)?;
        }
        Ok(session)
    }
}
