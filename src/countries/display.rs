use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountryField {
    PopulationSize,
    BorderCount,
    TimezoneCount,
    LanguageCount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionField {
    CountryCount,
    TimezoneCount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayType {
    Country(CountryField),
    Region(RegionField),
}

impl DisplayType {
    pub const ALL: [Self; 6] = [
        Self::Country(CountryField::PopulationSize),
        Self::Country(CountryField::BorderCount),
        Self::Country(CountryField::TimezoneCount),
        Self::Country(CountryField::LanguageCount),
        Self::Region(RegionField::CountryCount),
        Self::Region(RegionField::TimezoneCount),
    ];

    pub fn groups_by_region(self) -> bool {
        matches!(self, Self::Region(_))
    }

    /// The form value; region options carry the `Region` marker.
    pub fn value(self) -> &'static str {
        match self {
            Self::Country(CountryField::PopulationSize) => "populationSize",
            Self::Country(CountryField::BorderCount) => "noBorders",
            Self::Country(CountryField::TimezoneCount) => "noTimezones",
            Self::Country(CountryField::LanguageCount) => "noLanguages",
            Self::Region(RegionField::CountryCount) => "noCountriesRegion",
            Self::Region(RegionField::TimezoneCount) => "noTimezonesRegion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Country(CountryField::PopulationSize) => "Population",
            Self::Country(CountryField::BorderCount) => "Borders",
            Self::Country(CountryField::TimezoneCount) => "Timezones",
            Self::Country(CountryField::LanguageCount) => "Languages",
            Self::Region(RegionField::CountryCount) => "Countries per region",
            Self::Region(RegionField::TimezoneCount) => "Timezones per region",
        }
    }
}

impl Default for DisplayType {
    fn default() -> Self {
        Self::Country(CountryField::PopulationSize)
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for DisplayType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.contains("Region") {
            return match value {
                "noCountriesRegion" | "countryCountRegion" => {
                    Ok(Self::Region(RegionField::CountryCount))
                }
                "noTimezonesRegion" | "timezoneCountRegion" => {
                    Ok(Self::Region(RegionField::TimezoneCount))
                }
                _ => Err(anyhow!("unknown region display type: {value}")),
            };
        }

        match value {
            "populationSize" => Ok(Self::Country(CountryField::PopulationSize)),
            "noBorders" | "borderCount" => Ok(Self::Country(CountryField::BorderCount)),
            "noTimezones" | "timezoneCount" => Ok(Self::Country(CountryField::TimezoneCount)),
            "noLanguages" | "languageCount" => Ok(Self::Country(CountryField::LanguageCount)),
            _ => Err(anyhow!("unknown display type: {value}")),
        }
    }
}
