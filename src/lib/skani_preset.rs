use std::fmt::{Display, Formatter};
use clap::ValueEnum;

/// skani speed/accuracy presets, each passed to skani as a bare `--<name>` flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SkaniPreset {
    /// 2x faster, less accurate
    Fast,
    /// 2x slower, more accurate
    Medium,
    /// 4x slower, most accurate
    Slow,
    /// For genomes < 20 kb
    SmallGenomes,
}

impl SkaniPreset {
    pub fn flag(&self) -> String {
        format!("--{self}")
    }
}

impl Display for SkaniPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            SkaniPreset::Fast => "fast",
            SkaniPreset::Medium => "medium",
            SkaniPreset::Slow => "slow",
            SkaniPreset::SmallGenomes => "small-genomes",
        })
    }
}
