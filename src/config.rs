//! Translation settings.
//!
//! A [`Config`] is built once by the command line layer and then only ever
//! borrowed by the translator and the scaffold generator.

use crate::error::{Bf2cError, Result};

/// Default number of cells, the classic 30KB tape
pub const DEFAULT_ARRAY_SIZE: usize = 30_000;

/// Bits per cell of the generated program's array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
    #[default]
    Bits8,
    Bits16,
    Bits32,
}

impl CellWidth {
    /// The unsigned C type used for one cell.
    pub fn c_type(self) -> &'static str {
        match self {
            CellWidth::Bits8 => "uint8_t",
            CellWidth::Bits16 => "uint16_t",
            CellWidth::Bits32 => "uint32_t",
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            CellWidth::Bits8 => 8,
            CellWidth::Bits16 => 16,
            CellWidth::Bits32 => 32,
        }
    }
}

/// What `,` stores when the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Store 0.
    ZeroOnEof,
    /// Store EOF (-1) truncated to the cell width.
    #[default]
    MinusOneOnEof,
    /// Leave the cell untouched.
    NoEffectOnEof,
}

/// Meaning of the single bare argument accepted by the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultParam {
    #[default]
    None,
    Output,
    Input,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    cell_width: CellWidth,
    array_size: usize,
    eof_policy: EofPolicy,
    default_param: DefaultParam,
    force_flush: bool,
    version_text: Option<Vec<u8>>,
    copyright_text: Option<Vec<u8>>,
}

impl Config {
    /// Creates a configuration with the given array size and defaults for
    /// everything else. The size must be at least one cell.
    pub fn new(array_size: usize) -> Result<Self> {
        if array_size < 1 {
            return Err(Bf2cError::InvalidArraySize(array_size));
        }
        Ok(Config::sized(array_size))
    }

    fn sized(array_size: usize) -> Self {
        Config {
            cell_width: CellWidth::default(),
            array_size,
            eof_policy: EofPolicy::default(),
            default_param: DefaultParam::default(),
            force_flush: false,
            version_text: None,
            copyright_text: None,
        }
    }

    pub fn with_cell_width(mut self, cell_width: CellWidth) -> Self {
        self.cell_width = cell_width;
        self
    }

    pub fn with_eof_policy(mut self, eof_policy: EofPolicy) -> Self {
        self.eof_policy = eof_policy;
        self
    }

    pub fn with_default_param(mut self, default_param: DefaultParam) -> Self {
        self.default_param = default_param;
        self
    }

    pub fn with_force_flush(mut self, force_flush: bool) -> Self {
        self.force_flush = force_flush;
        self
    }

    pub fn with_version_text(mut self, text: Option<Vec<u8>>) -> Self {
        self.version_text = text;
        self
    }

    pub fn with_copyright_text(mut self, text: Option<Vec<u8>>) -> Self {
        self.copyright_text = text;
        self
    }

    pub fn cell_width(&self) -> CellWidth {
        self.cell_width
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn eof_policy(&self) -> EofPolicy {
        self.eof_policy
    }

    /// The default parameter as requested, before it is resolved against
    /// the operators the source actually uses.
    pub fn default_param(&self) -> DefaultParam {
        self.default_param
    }

    pub fn force_flush(&self) -> bool {
        self.force_flush
    }

    pub fn version_text(&self) -> Option<&[u8]> {
        self.version_text.as_deref()
    }

    pub fn copyright_text(&self) -> Option<&[u8]> {
        self.copyright_text.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::sized(DEFAULT_ARRAY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_brainfuck() {
        let config = Config::default();
        assert_eq!(config.cell_width(), CellWidth::Bits8);
        assert_eq!(config.array_size(), 30_000);
        assert_eq!(config.eof_policy(), EofPolicy::MinusOneOnEof);
        assert_eq!(config.default_param(), DefaultParam::None);
        assert!(!config.force_flush());
        assert!(config.version_text().is_none());
        assert!(config.copyright_text().is_none());
        assert_eq!(Config::new(DEFAULT_ARRAY_SIZE).unwrap(), config);
    }

    #[test]
    fn zero_array_size_is_rejected() {
        assert!(matches!(
            Config::new(0),
            Err(Bf2cError::InvalidArraySize(0))
        ));
        assert_eq!(Config::new(1).unwrap().array_size(), 1);
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = Config::new(64)
            .unwrap()
            .with_cell_width(CellWidth::Bits16)
            .with_eof_policy(EofPolicy::NoEffectOnEof)
            .with_default_param(DefaultParam::Message)
            .with_force_flush(true)
            .with_version_text(Some(b"v1".to_vec()))
            .with_copyright_text(Some(b"(c)".to_vec()));
        assert_eq!(config.cell_width().c_type(), "uint16_t");
        assert_eq!(config.cell_width().bits(), 16);
        assert_eq!(config.eof_policy(), EofPolicy::NoEffectOnEof);
        assert_eq!(config.default_param(), DefaultParam::Message);
        assert!(config.force_flush());
        assert_eq!(config.version_text(), Some(&b"v1"[..]));
        assert_eq!(config.copyright_text(), Some(&b"(c)"[..]));
    }
}
