//! Read-only palette tables.
//!
//! A [`Dataset`] holds every table the resolver reads:
//!
//! - named schemes, sorted by name (a scheme's position is its bit in a
//!   [`SchemeSet`]),
//! - indexed schemes, sorted by name, each owning a contiguous run of slots,
//! - named-color entries, sorted by name; entries sharing a name form a run
//!   in priority order,
//! - values that have names, sorted by RGBA, each pointing at its run of
//!   aliases,
//! - values without names (reachable only through indexed schemes), sorted
//!   by RGBA.
//!
//! All strings live in one pool and are addressed by offset.
//!
//! Datasets never change after [`DatasetBuilder::build`], so a single
//! dataset can back any number of sessions on any number of threads.

use std::collections::HashMap;

use crate::error::DatasetError;
use crate::scheme::{MAX_NAMED_SCHEMES, SchemeSet};
use crate::space::Rgba;

/// A string in the dataset's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolStr {
    offset: u32,
    len: u32,
}

/// Reference to a resolved value.
///
/// Two sessions holding equal `ValueRef`s hold the same value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueRef {
    /// Index into the named-value table.
    Named(usize),
    /// Index into the no-name value table.
    Unnamed(usize),
}

/// A named scheme.
#[derive(Debug, Clone, Copy)]
pub struct NamedScheme {
    name: PoolStr,
    default_name: usize,
}

/// An indexed scheme.
#[derive(Debug, Clone, Copy)]
pub struct IndexedScheme {
    name: PoolStr,
    first_slot: usize,
}

/// One named-color entry: a name, the schemes it belongs to and its value.
#[derive(Debug, Clone, Copy)]
pub struct NameEntry {
    name: PoolStr,
    schemes: SchemeSet,
    value: usize,
}

impl NameEntry {
    /// Schemes this entry belongs to.
    #[must_use]
    pub const fn schemes(&self) -> SchemeSet {
        self.schemes
    }

    /// Index of this entry's value in the named-value table.
    #[must_use]
    pub const fn value(&self) -> usize {
        self.value
    }
}

/// A value with at least one name.
#[derive(Debug, Clone, Copy)]
pub struct NamedValue {
    rgba: Rgba,
    first_alias: usize,
}

impl NamedValue {
    /// The value's channels.
    #[must_use]
    pub const fn rgba(&self) -> Rgba {
        self.rgba
    }
}

/// Immutable palette tables.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    strings: String,
    named_schemes: Vec<NamedScheme>,
    indexed_schemes: Vec<IndexedScheme>,
    names: Vec<NameEntry>,
    aliases: Vec<usize>,
    values: Vec<NamedValue>,
    unnamed_values: Vec<Rgba>,
    slots: Vec<ValueRef>,
}

impl Dataset {
    /// Start assembling a dataset.
    #[must_use]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Resolve a pooled string.
    #[must_use]
    pub fn str(&self, s: PoolStr) -> &str {
        let start = s.offset as usize;
        self.strings.get(start..start + s.len as usize).unwrap_or_default()
    }

    /// Number of named schemes.
    #[must_use]
    pub fn named_scheme_count(&self) -> usize {
        self.named_schemes.len()
    }

    /// Number of indexed schemes.
    #[must_use]
    pub fn indexed_scheme_count(&self) -> usize {
        self.indexed_schemes.len()
    }

    /// Find a named scheme's position by name.
    #[must_use]
    pub fn find_named_scheme(&self, name: &str) -> Option<usize> {
        self.named_schemes
            .binary_search_by(|s| self.str(s.name).cmp(name))
            .ok()
    }

    /// Find an indexed scheme's position by name.
    #[must_use]
    pub fn find_indexed_scheme(&self, name: &str) -> Option<usize> {
        self.indexed_schemes
            .binary_search_by(|s| self.str(s.name).cmp(name))
            .ok()
    }

    /// Name of the named scheme at `position`.
    #[must_use]
    pub fn named_scheme_name(&self, position: usize) -> &str {
        self.named_schemes
            .get(position)
            .map_or("", |s| self.str(s.name))
    }

    /// Name of the indexed scheme at `position`.
    #[must_use]
    pub fn indexed_scheme_name(&self, position: usize) -> &str {
        self.indexed_schemes
            .get(position)
            .map_or("", |s| self.str(s.name))
    }

    /// Declared default value of the named scheme at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    #[must_use]
    pub fn named_scheme_default(&self, position: usize) -> ValueRef {
        let entry = &self.names[self.named_schemes[position].default_name];
        ValueRef::Named(entry.value)
    }

    /// Slots of the indexed scheme at `position`.
    ///
    /// A scheme's slots run from its own first slot to the next scheme's
    /// first slot, or to the end of the slot table for the last scheme.
    #[must_use]
    pub fn indexed_slots(&self, position: usize) -> &[ValueRef] {
        let Some(scheme) = self.indexed_schemes.get(position) else {
            return &[];
        };
        let last = self
            .indexed_schemes
            .get(position + 1)
            .map_or(self.slots.len(), |next| next.first_slot);
        &self.slots[scheme.first_slot..last]
    }

    /// Number of named-color entries.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// The named-color entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn name(&self, index: usize) -> &NameEntry {
        &self.names[index]
    }

    /// The string of the named-color entry at `index`.
    #[must_use]
    pub fn name_str(&self, index: usize) -> &str {
        self.names.get(index).map_or("", |entry| self.str(entry.name))
    }

    /// All named-color entries in table order.
    pub fn names(&self) -> impl Iterator<Item = (usize, &NameEntry)> {
        self.names.iter().enumerate()
    }

    /// The run of entries spelled `key`, in priority order.
    pub fn name_run<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (usize, &'a NameEntry)> {
        let start = self.names.partition_point(|entry| self.str(entry.name) < key);
        self.names[start..]
            .iter()
            .take_while(move |entry| self.str(entry.name) == key)
            .enumerate()
            .map(move |(offset, entry)| (start + offset, entry))
    }

    /// Number of values with names.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// All named values in table order.
    pub fn values(&self) -> impl Iterator<Item = (usize, &NamedValue)> {
        self.values.iter().enumerate()
    }

    /// Number of values without names.
    #[must_use]
    pub fn unnamed_value_count(&self) -> usize {
        self.unnamed_values.len()
    }

    /// Channels of a resolved value.
    ///
    /// # Panics
    ///
    /// Panics if the reference did not come from this dataset.
    #[must_use]
    pub fn rgba(&self, value: ValueRef) -> Rgba {
        match value {
            ValueRef::Named(i) => self.values[i].rgba,
            ValueRef::Unnamed(i) => self.unnamed_values[i],
        }
    }

    /// Exact lookup by channels: named values first, then unnamed values.
    #[must_use]
    pub fn find_rgba(&self, rgba: Rgba) -> Option<ValueRef> {
        if let Ok(i) = self.values.binary_search_by_key(&rgba, |v| v.rgba) {
            return Some(ValueRef::Named(i));
        }
        self.unnamed_values
            .binary_search(&rgba)
            .ok()
            .map(ValueRef::Unnamed)
    }

    /// Every name denoting the named value at `value`, in alias order.
    pub fn aliases(&self, value: usize) -> impl Iterator<Item = (usize, &NameEntry)> {
        let first = self.values.get(value).map_or(self.aliases.len(), |v| v.first_alias);
        self.aliases[first..]
            .iter()
            .map(move |&index| (index, &self.names[index]))
            .take_while(move |(_, entry)| entry.value == value)
    }
}

/// Assembles a [`Dataset`] from declarations.
///
/// Names are stored lowercase with whitespace removed, the same form the
/// resolver looks them up in. Declaring the same name and value in several
/// schemes yields one entry belonging to all of them. Entries that share a
/// name but differ in value keep their declaration order, which is their
/// resolution priority; aliases of a value are likewise ordered by
/// declaration.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    named: Vec<(String, String)>,
    indexed: Vec<(String, Vec<Rgba>)>,
    colors: Vec<(String, String, Rgba)>,
}

impl DatasetBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named scheme and the name of its default color.
    #[must_use]
    pub fn named_scheme(mut self, name: &str, default_name: &str) -> Self {
        self.named.push((name.to_string(), fold_name(default_name)));
        self
    }

    /// Declare an indexed scheme with its slots in index order.
    #[must_use]
    pub fn indexed_scheme(mut self, name: &str, slots: impl IntoIterator<Item = Rgba>) -> Self {
        self.indexed.push((name.to_string(), slots.into_iter().collect()));
        self
    }

    /// Add one named color to a named scheme.
    #[must_use]
    pub fn color(mut self, scheme: &str, name: &str, rgba: Rgba) -> Self {
        self.colors.push((scheme.to_string(), fold_name(name), rgba));
        self
    }

    /// Add several named colors to a named scheme.
    #[must_use]
    pub fn colors(mut self, scheme: &str, colors: &[(&str, Rgba)]) -> Self {
        for &(name, rgba) in colors {
            self = self.color(scheme, name, rgba);
        }
        self
    }

    /// Sort, merge and link the declared tables.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if a scheme is declared twice, a color names
    /// an undeclared scheme, a default name is missing from its scheme, an
    /// indexed scheme is empty, or there are more than
    /// [`MAX_NAMED_SCHEMES`] named schemes.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let mut pool = Pool::default();

        // Named schemes: sorted position is the scheme's bit.
        if self.named.len() > MAX_NAMED_SCHEMES {
            return Err(DatasetError::TooManySchemes(self.named.len()));
        }
        let mut named = self.named;
        named.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = named.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(DatasetError::DuplicateScheme(pair[0].0.clone()));
        }
        let position_of: HashMap<&str, usize> = named
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.as_str(), i))
            .collect();

        // Merge (name, value) pairs declared in several schemes.
        let mut merged: Vec<(String, SchemeSet, Rgba)> = Vec::new();
        let mut merged_index: HashMap<(&str, Rgba), usize> = HashMap::new();
        for (scheme, name, rgba) in &self.colors {
            let Some(&position) = position_of.get(scheme.as_str()) else {
                return Err(DatasetError::UndeclaredScheme(scheme.clone()));
            };
            let bit = SchemeSet::single(position);
            if let Some(&i) = merged_index.get(&(name.as_str(), *rgba)) {
                merged[i].1 |= bit;
            } else {
                merged_index.insert((name.as_str(), *rgba), merged.len());
                merged.push((name.clone(), bit, *rgba));
            }
        }

        // Named values, sorted by channels.
        let mut rgbas: Vec<Rgba> = merged.iter().map(|(_, _, rgba)| *rgba).collect();
        rgbas.sort_unstable();
        rgbas.dedup();

        // Name table: stable sort keeps declaration order inside each run.
        let mut order: Vec<usize> = (0..merged.len()).collect();
        order.sort_by(|&a, &b| merged[a].0.cmp(&merged[b].0));
        let mut names = Vec::with_capacity(merged.len());
        let mut declared_at = Vec::with_capacity(merged.len());
        for &i in &order {
            let (name, schemes, rgba) = &merged[i];
            let value = rgbas.binary_search(rgba).unwrap_or_default();
            names.push(NameEntry {
                name: pool.intern(name)?,
                schemes: *schemes,
                value,
            });
            declared_at.push(i);
        }

        // Alias list: names grouped by value, declaration order within a value.
        let mut aliases: Vec<usize> = (0..names.len()).collect();
        aliases.sort_by_key(|&n| (names[n].value, declared_at[n]));
        let mut values: Vec<NamedValue> = rgbas
            .iter()
            .map(|&rgba| NamedValue {
                rgba,
                first_alias: aliases.len(),
            })
            .collect();
        for (t, &n) in aliases.iter().enumerate().rev() {
            values[names[n].value].first_alias = t;
        }

        let mut named_schemes = Vec::with_capacity(named.len());
        for (position, (scheme, default_name)) in named.iter().enumerate() {
            let bit = SchemeSet::single(position);
            let start = names.partition_point(|e| pool.get(e.name) < default_name.as_str());
            let default = names[start..]
                .iter()
                .take_while(|e| pool.get(e.name) == default_name.as_str())
                .position(|e| e.schemes.intersects(bit))
                .ok_or_else(|| DatasetError::MissingDefault {
                    scheme: scheme.clone(),
                    name: default_name.clone(),
                })?;
            named_schemes.push(NamedScheme {
                name: pool.intern(scheme)?,
                default_name: start + default,
            });
        }

        // Indexed schemes: slots laid out in sorted scheme order.
        let mut indexed = self.indexed;
        indexed.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = indexed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(DatasetError::DuplicateScheme(pair[0].0.clone()));
        }
        if let Some((name, _)) = indexed.iter().find(|(_, slots)| slots.is_empty()) {
            return Err(DatasetError::EmptyIndexedScheme(name.clone()));
        }
        let mut unnamed_values: Vec<Rgba> = indexed
            .iter()
            .flat_map(|(_, slots)| slots.iter().copied())
            .filter(|rgba| rgbas.binary_search(rgba).is_err())
            .collect();
        unnamed_values.sort_unstable();
        unnamed_values.dedup();

        let mut indexed_schemes = Vec::with_capacity(indexed.len());
        let mut slots = Vec::new();
        for (name, scheme_slots) in &indexed {
            indexed_schemes.push(IndexedScheme {
                name: pool.intern(name)?,
                first_slot: slots.len(),
            });
            slots.extend(scheme_slots.iter().map(|rgba| {
                rgbas.binary_search(rgba).map_or_else(
                    |_| ValueRef::Unnamed(unnamed_values.binary_search(rgba).unwrap_or_default()),
                    ValueRef::Named,
                )
            }));
        }

        log::debug!(
            "assembled dataset: {} named schemes, {} indexed schemes, {} names, {} values, {} unnamed values",
            named_schemes.len(),
            indexed_schemes.len(),
            names.len(),
            values.len(),
            unnamed_values.len()
        );

        Ok(Dataset {
            strings: pool.strings,
            named_schemes,
            indexed_schemes,
            names,
            aliases,
            values,
            unnamed_values,
            slots,
        })
    }
}

/// Lowercase a color name and drop its whitespace.
pub(crate) fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Default)]
struct Pool {
    strings: String,
}

impl Pool {
    fn intern(&mut self, s: &str) -> Result<PoolStr, DatasetError> {
        let offset = u32::try_from(self.strings.len()).map_err(|_| DatasetError::PoolOverflow)?;
        let len = u32::try_from(s.len()).map_err(|_| DatasetError::PoolOverflow)?;
        self.strings.push_str(s);
        Ok(PoolStr { offset, len })
    }

    fn get(&self, s: PoolStr) -> &str {
        let start = s.offset as usize;
        self.strings.get(start..start + s.len as usize).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const DARK_RED: Rgba = Rgba::opaque(170, 0, 0);
    const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    fn dataset() -> Dataset {
        DatasetBuilder::new()
            .named_scheme("web", "black")
            .named_scheme("term", "black")
            .colors("web", &[("black", BLACK), ("red", RED), ("Bright Red", RED)])
            .colors("term", &[("black", BLACK), ("red", DARK_RED)])
            .indexed_scheme("ramp", [BLACK, Rgba::opaque(1, 2, 3), RED])
            .indexed_scheme("dim", [Rgba::opaque(1, 2, 3)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_schemes_sorted_by_name() {
        let ds = dataset();
        assert_eq!(ds.find_named_scheme("term"), Some(0));
        assert_eq!(ds.find_named_scheme("web"), Some(1));
        assert_eq!(ds.find_indexed_scheme("dim"), Some(0));
        assert_eq!(ds.find_indexed_scheme("ramp"), Some(1));
        assert_eq!(ds.find_named_scheme("ramp"), None);
        assert_eq!(ds.named_scheme_name(1), "web");
        assert_eq!(ds.indexed_scheme_name(0), "dim");
    }

    #[test]
    fn test_shared_name_and_value_merge() {
        let ds = dataset();
        let run: Vec<_> = ds.name_run("black").collect();
        assert_eq!(run.len(), 1);
        assert_eq!(run[0].1.schemes().positions().count(), 2);
    }

    #[test]
    fn test_name_run_keeps_declaration_order() {
        let ds = dataset();
        let run: Vec<_> = ds.name_run("red").map(|(_, e)| ds.rgba(ValueRef::Named(e.value()))).collect();
        assert_eq!(run, vec![RED, DARK_RED]);
        assert_eq!(ds.name_run("blue").count(), 0);
    }

    #[test]
    fn test_names_are_folded() {
        let ds = dataset();
        assert_eq!(ds.name_run("brightred").count(), 1);
    }

    #[test]
    fn test_find_rgba() {
        let ds = dataset();
        assert!(matches!(ds.find_rgba(RED), Some(ValueRef::Named(_))));
        assert_eq!(ds.find_rgba(Rgba::opaque(1, 2, 3)), Some(ValueRef::Unnamed(0)));
        assert_eq!(ds.find_rgba(Rgba::opaque(4, 5, 6)), None);
        assert_eq!(ds.unnamed_value_count(), 1);
    }

    #[test]
    fn test_aliases() {
        let ds = dataset();
        let Some(ValueRef::Named(red)) = ds.find_rgba(RED) else {
            panic!("red should be named");
        };
        let names: Vec<_> = ds.aliases(red).map(|(i, _)| ds.name_str(i)).collect();
        assert_eq!(names, vec!["red", "brightred"]);
    }

    #[test]
    fn test_indexed_slots() {
        let ds = dataset();
        let ramp = ds.find_indexed_scheme("ramp").unwrap();
        let slots: Vec<_> = ds.indexed_slots(ramp).iter().map(|&v| ds.rgba(v)).collect();
        assert_eq!(slots, vec![BLACK, Rgba::opaque(1, 2, 3), RED]);
        assert_eq!(ds.indexed_slots(0).len(), 1);
        assert!(ds.indexed_slots(9).is_empty());
    }

    #[test]
    fn test_default_name() {
        let ds = dataset();
        assert_eq!(ds.rgba(ds.named_scheme_default(0)), BLACK);
    }

    #[test]
    fn test_build_errors() {
        let err = DatasetBuilder::new()
            .color("nowhere", "red", RED)
            .build()
            .unwrap_err();
        assert_eq!(err, DatasetError::UndeclaredScheme("nowhere".to_string()));

        let err = DatasetBuilder::new()
            .named_scheme("web", "teal")
            .color("web", "red", RED)
            .build()
            .unwrap_err();
        assert!(matches!(err, DatasetError::MissingDefault { .. }));

        let err = DatasetBuilder::new()
            .indexed_scheme("empty", Vec::new())
            .build()
            .unwrap_err();
        assert_eq!(err, DatasetError::EmptyIndexedScheme("empty".to_string()));

        let mut builder = DatasetBuilder::new();
        for i in 0..=MAX_NAMED_SCHEMES {
            builder = builder.named_scheme(&format!("s{i}"), "c");
        }
        assert_eq!(
            builder.build().unwrap_err(),
            DatasetError::TooManySchemes(MAX_NAMED_SCHEMES + 1)
        );
    }
}
