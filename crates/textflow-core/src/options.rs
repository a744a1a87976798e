//! Aggregated extraction options.

use crate::element::AssemblerOptions;
use crate::error::TextflowError;
use crate::layout::LineOptions;
use crate::words::WordOptions;

/// All tuning knobs for one page pass.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractOptions {
    pub assembler: AssemblerOptions,
    pub words: WordOptions,
    pub lines: LineOptions,
}

impl ExtractOptions {
    /// Reject tolerances the algorithms cannot work with.
    ///
    /// Tolerances and ratios must be finite and non-negative, and a column
    /// group needs at least one line.
    pub fn validate(&self) -> Result<(), TextflowError> {
        let tolerances = [
            ("assembler.baseline_epsilon", self.assembler.baseline_epsilon),
            ("assembler.distance_ratio", self.assembler.distance_ratio),
            ("words.gap_ratio", self.words.gap_ratio),
            ("lines.baseline_epsilon", self.lines.baseline_epsilon),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(TextflowError::invalid_option(name, value));
            }
        }
        if self.lines.min_group_lines == 0 {
            return Err(TextflowError::invalid_option("lines.min_group_lines", 0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.assembler.baseline_epsilon, 0.1);
        assert_eq!(opts.assembler.distance_ratio, 1.3);
        assert!(opts.assembler.fold_scripts);
        assert_eq!(opts.words.gap_ratio, 1.5);
        assert_eq!(opts.lines.baseline_epsilon, 1.0);
        assert_eq!(opts.lines.min_columns, 2);
        assert_eq!(opts.lines.min_group_lines, 2);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_negative_tolerance() {
        let mut opts = ExtractOptions::default();
        opts.assembler.baseline_epsilon = -0.5;
        assert_eq!(
            opts.validate(),
            Err(TextflowError::InvalidOption {
                name: "assembler.baseline_epsilon".to_string(),
                value: "-0.5".to_string(),
            })
        );
    }

    #[test]
    fn rejects_non_finite_ratio() {
        let mut opts = ExtractOptions::default();
        opts.words.gap_ratio = f64::NAN;
        assert!(matches!(
            opts.validate(),
            Err(TextflowError::InvalidOption { name, .. }) if name == "words.gap_ratio"
        ));
    }

    #[test]
    fn rejects_zero_group_lines() {
        let mut opts = ExtractOptions::default();
        opts.lines.min_group_lines = 0;
        assert!(opts.validate().is_err());
    }
}
