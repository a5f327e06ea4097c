//! Serialization of parsed nodes.
//!
//! Nodes are immutable; everything that varies between runs (indent width, the random
//! source used by class emission) lives in the [`Emitter`] passed down the tree.

use rand::seq::SliceRandom;
use rand::RngCore;

pub struct Emitter<'a> {
    indent_width: usize,
    rng: &'a mut dyn RngCore,
    classes_shuffled: usize,
}

impl<'a> Emitter<'a> {
    pub fn new(indent_width: usize, rng: &'a mut dyn RngCore) -> Self {
        Self {
            indent_width,
            rng,
            classes_shuffled: 0,
        }
    }

    pub fn pad(&self, indent: usize) -> String {
        " ".repeat(indent)
    }

    /// Indentation one level below `indent`.
    pub fn nested(&self, indent: usize) -> usize {
        indent + self.indent_width
    }

    /// Permutes `items` in place with the injected random source.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut *self.rng);
    }

    pub fn record_class(&mut self) {
        self.classes_shuffled += 1;
    }

    pub fn classes_shuffled(&self) -> usize {
        self.classes_shuffled
    }
}

pub trait Refactor {
    /// Source text for this node. `indent` is the column the node itself starts at;
    /// nested blocks indent relative to it.
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String;
}

pub fn refactor_list<T: Refactor>(
    items: &[T],
    out: &mut Emitter<'_>,
    indent: usize,
    join: &str,
) -> String {
    items
        .iter()
        .map(|item| item.refactor(out, indent))
        .collect::<Vec<_>>()
        .join(join)
}
