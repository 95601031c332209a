use std::collections::{HashMap, HashSet};

use super::display::{CountryField, RegionField};
use super::parse::RawCountry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryView {
    pub name: String,
    pub code: String,
    pub region: String,
    pub population_size: u64,
    pub border_count: usize,
    pub timezone_count: usize,
    pub language_count: usize,
}

impl CountryView {
    pub fn value(&self, field: CountryField) -> u64 {
        match field {
            CountryField::PopulationSize => self.population_size,
            CountryField::BorderCount => self.border_count as u64,
            CountryField::TimezoneCount => self.timezone_count as u64,
            CountryField::LanguageCount => self.language_count as u64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionView {
    pub name: String,
    pub country_count: usize,
    pub timezone_count: usize,
}

impl RegionView {
    pub fn value(&self, field: RegionField) -> u64 {
        match field {
            RegionField::CountryCount => self.country_count as u64,
            RegionField::TimezoneCount => self.timezone_count as u64,
        }
    }
}

/// Distinct region names in first-seen order. The order is the ordinal
/// color domain, so it must only depend on the input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    names: Vec<String>,
    index_by_name: HashMap<String, usize>,
}

impl RegionSet {
    fn insert(&mut self, name: &str) -> usize {
        if let Some(&index) = self.index_by_name.get(name) {
            return index;
        }

        let index = self.names.len();
        self.names.push(name.to_owned());
        self.index_by_name.insert(name.to_owned(), index);
        index
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for RegionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        let mut regions = Self::default();
        for name in names {
            regions.insert(name);
        }
        regions
    }
}

#[derive(Clone, Debug)]
pub enum Aggregation {
    PerCountry {
        records: Vec<CountryView>,
        regions: RegionSet,
    },
    PerRegion {
        records: Vec<RegionView>,
    },
}

impl Aggregation {
    pub fn len(&self) -> usize {
        match self {
            Self::PerCountry { records, .. } => records.len(),
            Self::PerRegion { records } => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn aggregate(countries: &[RawCountry], group_by_region: bool) -> Aggregation {
    if group_by_region {
        Aggregation::PerRegion {
            records: group_by_region_name(countries),
        }
    } else {
        let mut regions = RegionSet::default();
        let records = countries
            .iter()
            .map(|country| {
                regions.insert(&country.region);
                CountryView {
                    name: country.name.clone(),
                    code: country.code.clone(),
                    region: country.region.clone(),
                    population_size: country.population,
                    border_count: country.borders.len(),
                    timezone_count: country.timezones.len(),
                    language_count: country.languages.len(),
                }
            })
            .collect();
        Aggregation::PerCountry { records, regions }
    }
}

fn group_by_region_name(countries: &[RawCountry]) -> Vec<RegionView> {
    let mut regions = RegionSet::default();
    let mut members: Vec<(usize, HashSet<&str>)> = Vec::new();

    for country in countries {
        let index = regions.insert(&country.region);
        if index == members.len() {
            members.push((0, HashSet::new()));
        }

        let (country_count, timezones) = &mut members[index];
        *country_count += 1;
        timezones.extend(country.timezones.iter().map(String::as_str));
    }

    regions
        .iter()
        .zip(members)
        .map(|(name, (country_count, timezones))| RegionView {
            name: name.to_owned(),
            country_count,
            timezone_count: timezones.len(),
        })
        .collect()
}
