//! Encoder effort settings.

use derive_enum_all_values::AllValues;

/// Selects how much work the block encoders put into choosing endpoints.
///
/// The quality only changes which endpoints and indices are chosen; the bit layout of
/// the produced blocks is identical for every setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum CompressionQuality {
    /// Single pass over the block using the bounding box of its colours.
    Fast,
    /// Principal axis fit plus a least squares refinement; also considers the
    /// three colour mode and the six step alpha mode when they reduce error.
    #[default]
    Normal,
}

impl CompressionQuality {
    /// Short lowercase name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
        }
    }
}

impl core::str::FromStr for CompressionQuality {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_values()
            .iter()
            .copied()
            .find(|quality| quality.name().eq_ignore_ascii_case(s))
            .ok_or("unknown quality; expected one of fast, normal")
    }
}
