//! Reverse lookup: from the current value to a display name.

use crate::dataset::ValueRef;
use crate::error::ResolveError;
use crate::session::Session;

impl<'d> Session<'d> {
    /// The current value's name in the named output scheme.
    ///
    /// Aliases are tried in dataset order and the first one belonging to the
    /// output scheme wins. The answer is cached until the value or the
    /// output selection changes.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::ColorUnknown`] if no value is current,
    /// - [`ResolveError::ColorNoName`] if the value has no alias in the
    ///   output scheme, has no names at all, or the output scheme is indexed
    ///   or unset.
    pub fn name(&mut self) -> Result<&'d str, ResolveError> {
        let dataset = self.dataset;
        if let Some(index) = self.out_name {
            return Ok(dataset.name_str(index));
        }

        let value = self
            .value
            .ok_or_else(|| ResolveError::ColorUnknown(String::new()))?;
        let output = self.schemes.output();
        if output.is_empty() {
            return Err(ResolveError::ColorNoName);
        }
        let ValueRef::Named(value) = value else {
            return Err(ResolveError::ColorNoName);
        };

        let (index, _) = dataset
            .aliases(value)
            .find(|(_, entry)| entry.schemes().intersects(output))
            .ok_or(ResolveError::ColorNoName)?;
        self.out_name = Some(index);
        Ok(dataset.name_str(index))
    }

    /// The current value as display text: its output-scheme name, or
    /// `#rrggbbaa` when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorUnknown`] if no value is current.
    pub fn display(&mut self) -> Result<String, ResolveError> {
        match self.name() {
            Ok(name) => Ok(name.to_string()),
            Err(ResolveError::ColorNoName) => Ok(self.rgba()?.hex()),
            Err(err) => Err(err),
        }
    }
}
