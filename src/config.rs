use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use crate::PruningRule;

// ====================
// PUBLIC CONSTANTS
// ====================

pub const DEFAULT_PALETTE: &str = "obraz-A.jpg";
pub const DEFAULT_CANVAS: &str = "obraz-B.jpg";
pub const DEFAULT_OUTPUT: &str = "obraz-C.png";

// ====================
// PUBLIC STRUCTS
// ====================

#[non_exhaustive]
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ConfigError {
    #[error("unknown palette preset \"{0}\", expected one of 16, 27, 64, 128, 256")]
    UnknownPreset(String),
    #[error("unknown pruning rule \"{0}\", expected \"absolute\" or \"squared\"")]
    UnknownPruningRule(String)
}

/// Bundled palette images, named by how many colors they hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PalettePreset {
    Colors16,
    Colors27,
    Colors64,
    Colors128,
    Colors256
}

impl PalettePreset {
    pub const ALL: [PalettePreset; 5] = [
        PalettePreset::Colors16,
        PalettePreset::Colors27,
        PalettePreset::Colors64,
        PalettePreset::Colors128,
        PalettePreset::Colors256
    ];

    pub fn colors(&self) -> u32 {
        match self {
            PalettePreset::Colors16 => 16,
            PalettePreset::Colors27 => 27,
            PalettePreset::Colors64 => 64,
            PalettePreset::Colors128 => 128,
            PalettePreset::Colors256 => 256
        }
    }

    pub fn path(&self) -> PathBuf {
        Path::new("Palettes").join(format!("{}colors.png", self.colors()))
    }
}

impl FromStr for PalettePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches("colors");
        PalettePreset::ALL.into_iter()
            .find(|preset| preset.colors().to_string() == trimmed)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl Display for PalettePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.colors())
    }
}

impl FromStr for PruningRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" | "abs" => Ok(PruningRule::AbsoluteDelta),
            "squared" | "square" => Ok(PruningRule::SquaredDelta),
            _ => Err(ConfigError::UnknownPruningRule(s.to_string()))
        }
    }
}

impl Display for PruningRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PruningRule::AbsoluteDelta => write!(f, "absolute"),
            PruningRule::SquaredDelta => write!(f, "squared")
        }
    }
}

/// Everything one recolor job needs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RecolorConfig {
    pub palette: PathBuf,
    pub canvas: PathBuf,
    pub output: PathBuf,
    pub rule: PruningRule,
    pub parallel: bool
}

impl RecolorConfig {

    /// An explicit palette path wins over a preset. Without either, the default palette image is used.
    pub fn resolve_palette(palette: Option<PathBuf>, preset: Option<PalettePreset>) -> PathBuf {
        palette
            .or_else(|| preset.map(|preset| preset.path()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PALETTE))
    }
}

impl Default for RecolorConfig {
    fn default() -> Self {
        RecolorConfig {
            palette: PathBuf::from(DEFAULT_PALETTE),
            canvas: PathBuf::from(DEFAULT_CANVAS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            rule: PruningRule::default(),
            parallel: cfg!(feature = "parallel")
        }
    }
}
