//! Parse, shuffle, re-emit.
//!
//! [`obfuscate_with`] is the whole transform over an injected random source.
//! [`Obfuscator`] owns a seedable generator and the settings, the way a run of the CLI
//! uses them.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::Settings;
use crate::errors::ObfuscatorError;
use crate::syntax::{parse_source, Emitter, Refactor, ReservedWords, TopLevel};

// Using a concrete, seedable PRNG for determinism.
type SmallRng = Xoshiro256StarStar;

/// Result of one transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obfuscated {
    pub code: String,
    /// Top-level elements parsed, whitespace included.
    pub elements: usize,
    pub classes_shuffled: usize,
}

/// Serializes `elements` in order, shuffling class members with `rng`.
pub fn render_elements(
    elements: &[TopLevel],
    indent_width: usize,
    rng: &mut dyn RngCore,
) -> Obfuscated {
    let mut out = Emitter::new(indent_width, rng);
    let code = elements
        .iter()
        .map(|element| element.refactor(&mut out, 0))
        .collect::<String>();
    Obfuscated {
        code,
        elements: elements.len(),
        classes_shuffled: out.classes_shuffled(),
    }
}

pub fn obfuscate_with(source: &str, settings: &Settings, rng: &mut dyn RngCore) -> Obfuscated {
    let elements = parse_source(source, Arc::new(settings.reserved()));
    render_elements(&elements, settings.indent, rng)
}

pub struct Obfuscator {
    settings: Settings,
    reserved: Arc<ReservedWords>,
    prng: SmallRng,
}

impl Obfuscator {
    /// Seeds from `settings.seed` when present, from OS entropy otherwise.
    pub fn new(settings: Settings) -> Self {
        let prng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            reserved: Arc::new(settings.reserved()),
            settings,
            prng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn parse(&self, source: &str) -> Vec<TopLevel> {
        parse_source(source, Arc::clone(&self.reserved))
    }

    pub fn render(&mut self, elements: &[TopLevel]) -> Obfuscated {
        render_elements(elements, self.settings.indent, &mut self.prng)
    }

    pub fn obfuscate(&mut self, source: &str) -> Obfuscated {
        let elements = self.parse(source);
        self.render(&elements)
    }

    /// Reads `input`, transforms it and writes `output`. Nothing is written unless the
    /// input could be read.
    pub fn obfuscate_file(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<Obfuscated, ObfuscatorError> {
        let source = read_source(input)?;
        let result = self.obfuscate(&source);
        fs::write(output, &result.code).map_err(|e| ObfuscatorError::write_output(output, e))?;
        Ok(result)
    }
}

pub fn read_source(path: &Path) -> Result<String, ObfuscatorError> {
    fs::read_to_string(path).map_err(|e| ObfuscatorError::read_input(path, e))
}
