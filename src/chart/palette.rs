use eframe::egui::Color32;

use crate::countries::RegionSet;

pub const CATEGORY10: [Color32; 10] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
];

pub const SET2: [Color32; 8] = [
    Color32::from_rgb(0x66, 0xc2, 0xa5),
    Color32::from_rgb(0xfc, 0x8d, 0x62),
    Color32::from_rgb(0x8d, 0xa0, 0xcb),
    Color32::from_rgb(0xe7, 0x8a, 0xc3),
    Color32::from_rgb(0xa6, 0xd8, 0x54),
    Color32::from_rgb(0xff, 0xd9, 0x2f),
    Color32::from_rgb(0xe5, 0xc4, 0x94),
    Color32::from_rgb(0xb3, 0xb3, 0xb3),
];

const UNKNOWN_REGION: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

pub fn categorical(index: usize) -> Color32 {
    CATEGORY10[index % CATEGORY10.len()]
}

pub struct OrdinalScale<'a> {
    domain: &'a RegionSet,
    range: &'static [Color32],
}

impl<'a> OrdinalScale<'a> {
    pub fn new(domain: &'a RegionSet, range: &'static [Color32]) -> Self {
        Self { domain, range }
    }

    pub fn color(&self, key: &str) -> Color32 {
        match self.domain.position(key) {
            Some(index) if !self.range.is_empty() => self.range[index % self.range.len()],
            _ => UNKNOWN_REGION,
        }
    }
}
