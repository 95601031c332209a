use eframe::egui::Color32;

use crate::countries::{CountryField, CountryView, RegionField, RegionSet, RegionView};
use crate::util::format_thousands;

use super::palette::{OrdinalScale, SET2, categorical};
use super::scale::{Extent, LinearScale};

pub(super) struct BubbleSeed {
    pub(super) name: String,
    pub(super) tooltip: String,
    pub(super) color: Color32,
    pub(super) value: u64,
    pub(super) radius: f32,
}

fn radius_scale(values: impl IntoIterator<Item = u64>, range: (f32, f32)) -> Option<LinearScale> {
    Extent::of(values).map(|extent| LinearScale::new(extent, range))
}

pub(super) fn country_tooltip(view: &CountryView, field: CountryField) -> String {
    format!(
        "{} ({})\n{}\n{}",
        view.name,
        view.code,
        view.region,
        format_thousands(view.value(field))
    )
}

pub(super) fn region_tooltip(view: &RegionView) -> String {
    format!(
        "{}\nNo. Countries: {}\nNo. Timezones: {}",
        view.name, view.country_count, view.timezone_count
    )
}

pub(super) fn country_bubbles(
    records: &[CountryView],
    regions: &RegionSet,
    field: CountryField,
    radius_range: (f32, f32),
) -> Vec<BubbleSeed> {
    let Some(scale) = radius_scale(records.iter().map(|view| view.value(field)), radius_range)
    else {
        return Vec::new();
    };
    let colors = OrdinalScale::new(regions, &SET2);

    records
        .iter()
        .map(|view| {
            let value = view.value(field);
            BubbleSeed {
                name: format!("{} {}", view.name, view.code),
                tooltip: country_tooltip(view, field),
                color: colors.color(&view.region),
                value,
                radius: scale.apply(value),
            }
        })
        .collect()
}

pub(super) fn region_bubbles(
    records: &[RegionView],
    field: RegionField,
    radius_range: (f32, f32),
) -> Vec<BubbleSeed> {
    let Some(scale) = radius_scale(records.iter().map(|view| view.value(field)), radius_range)
    else {
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .map(|(index, view)| {
            let value = view.value(field);
            BubbleSeed {
                name: view.name.clone(),
                tooltip: region_tooltip(view),
                color: categorical(index),
                value,
                radius: scale.apply(value),
            }
        })
        .collect()
}
