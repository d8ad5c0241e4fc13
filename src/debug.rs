//! Human-readable dumps of session state, for diagnostics.
//!
//! Every report ends with a blank line so several can be concatenated.

use std::fmt::Write as _;

use crate::dataset::{Dataset, ValueRef};
use crate::scheme::SchemeSet;
use crate::session::Session;

fn push_scheme_list(out: &mut String, dataset: &Dataset, set: SchemeSet) {
    out.push('(');
    for (i, position) in set.positions().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(dataset.named_scheme_name(position));
    }
    out.push(')');
}

impl Session<'_> {
    /// Active schemes, one per line, marked `(in)`, `(out)`, `(default)`
    /// and `(indexed)`.
    #[must_use]
    pub fn debug_schemes(&self) -> String {
        let dataset = self.dataset;
        let state = &self.schemes;
        let mut out = String::from("schemes:\n");

        for position in 0..dataset.named_scheme_count() {
            let bit = SchemeSet::single(position);
            let input = state.input().contains(bit);
            let output = state.output().contains(bit);
            if !input && !output {
                continue;
            }
            out.push_str(dataset.named_scheme_name(position));
            if input {
                out.push_str(" (in)");
                if state.default_scheme() == Some(position) {
                    out.push_str(" (default)");
                }
            }
            if output {
                out.push_str(" (out)");
            }
            out.push('\n');
        }

        match (state.input_index(), state.output_index()) {
            (Some(input), output) => {
                out.push_str(dataset.indexed_scheme_name(input));
                out.push_str(" (indexed) (in)");
                if let Some(output) = output {
                    if output != input {
                        out.push('\n');
                        out.push_str(dataset.indexed_scheme_name(output));
                        out.push_str(" (indexed)");
                    }
                    out.push_str(" (out)");
                }
                out.push('\n');
            }
            (None, Some(output)) => {
                out.push_str(dataset.indexed_scheme_name(output));
                out.push_str(" (indexed) (out)\n");
            }
            (None, None) => {}
        }

        out.push('\n');
        out
    }

    /// Every name reachable through the active input schemes, with the
    /// indexed input scheme's slots.
    #[must_use]
    pub fn debug_names(&self) -> String {
        let mut out = String::from("names (in):\n");
        self.push_names(&mut out, self.schemes.input(), self.schemes.input_index());
        out
    }

    /// Like [`debug_names`](Self::debug_names), for the output scheme.
    #[must_use]
    pub fn debug_out_names(&self) -> String {
        let mut out = String::from("names (out):\n");
        self.push_names(&mut out, self.schemes.output(), self.schemes.output_index());
        out
    }

    fn push_names(&self, out: &mut String, set: SchemeSet, indexed: Option<usize>) {
        let dataset = self.dataset;
        let default = self.schemes.default_value();

        if !set.is_empty() {
            for (index, entry) in dataset.names() {
                let shared = entry.schemes() & set;
                if shared.is_empty() {
                    continue;
                }
                out.push_str(dataset.name_str(index));
                push_scheme_list(out, dataset, shared);
                let value = ValueRef::Named(entry.value());
                let _ = write!(out, " {}", dataset.rgba(value));
                if default == Some(value) {
                    out.push_str(" (default)");
                }
                out.push('\n');
            }
        }

        if let Some(position) = indexed {
            let scheme = dataset.indexed_scheme_name(position);
            for (slot, value) in dataset.indexed_slots(position).iter().enumerate() {
                let _ = writeln!(out, "{slot}({scheme}) {}", dataset.rgba(*value));
            }
        }

        out.push('\n');
    }

    /// Every named value with at least one alias in the active input
    /// schemes, followed by those aliases.
    ///
    /// Indexed-scheme membership is not listed.
    #[must_use]
    pub fn debug_values(&self) -> String {
        let dataset = self.dataset;
        let input = self.schemes.input();
        let mut out = String::from("values:\n");

        for (value, named) in dataset.values() {
            let mut found = false;
            for (index, entry) in dataset.aliases(value) {
                let shared = entry.schemes() & input;
                if shared.is_empty() {
                    continue;
                }
                if !found {
                    let _ = write!(out, "{}", named.rgba());
                    found = true;
                }
                out.push(' ');
                out.push_str(dataset.name_str(index));
                push_scheme_list(&mut out, dataset, shared);
            }
            if found {
                out.push('\n');
            }
        }

        out.push('\n');
        out
    }
}
