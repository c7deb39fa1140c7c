use crate::error::MaturityError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Geographic regions the maturity score is reported for.
///
/// Variants are declared in identifier order so the derived `Ord` matches
/// ascending `id()`, which the ranking uses as its tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Apac,
    Europe,
    LatinAmerica,
    MiddleEastAfrica,
    NorthAmerica,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Apac,
        Region::Europe,
        Region::LatinAmerica,
        Region::MiddleEastAfrica,
        Region::NorthAmerica,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Region::Apac => "apac",
            Region::Europe => "europe",
            Region::LatinAmerica => "latin_america",
            Region::MiddleEastAfrica => "middle_east_africa",
            Region::NorthAmerica => "north_america",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Apac => "APAC",
            Region::Europe => "Europe",
            Region::LatinAmerica => "Latin America",
            Region::MiddleEastAfrica => "Middle East & Africa",
            Region::NorthAmerica => "North America",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Region {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| {
                region.id().eq_ignore_ascii_case(needle)
                    || region.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| MaturityError::UnknownRegion(needle.to_string()))
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}
