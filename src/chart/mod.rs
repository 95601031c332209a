mod bubbles;
mod palette;
mod physics;
mod scale;
mod scheduler;
mod svg;

use anyhow::{Result, bail};
use eframe::egui::{Color32, Vec2, vec2};
use tracing::info;

use crate::countries::{Aggregation, DisplayType};

use bubbles::{BubbleSeed, country_bubbles, region_bubbles};
use physics::{LayoutNode, Simulation, SimulationParams};
pub use scheduler::{TickOutcome, TickScheduler};
pub use svg::render_svg;

#[derive(Clone, Copy, Debug)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub radius_range: (f32, f32),
    pub collision_padding: f32,
    pub simulation: SimulationParams,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            radius_range: (2.0, 50.0),
            collision_padding: 2.0,
            simulation: SimulationParams::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bubble {
    pub name: String,
    pub tooltip: String,
    pub color: Color32,
    pub value: u64,
    pub radius: f32,
    pub position: Vec2,
}

pub struct ChartSurface {
    size: Vec2,
    generation: u64,
    bubbles: Vec<Bubble>,
}

impl ChartSurface {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            size: vec2(config.width, config.height),
            generation: 0,
            bubbles: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.generation += 1;
    }

    fn install(&mut self, seeds: Vec<BubbleSeed>, nodes: &[LayoutNode]) {
        self.bubbles = seeds
            .into_iter()
            .zip(nodes)
            .map(|(seed, node)| Bubble {
                name: seed.name,
                tooltip: seed.tooltip,
                color: seed.color,
                value: seed.value,
                radius: seed.radius,
                position: node.position,
            })
            .collect();
    }

    fn apply_positions(&mut self, nodes: &[LayoutNode]) {
        for (bubble, node) in self.bubbles.iter_mut().zip(nodes) {
            bubble.position = node.position;
        }
    }
}

/// Replaces the surface contents with one bubble per record and returns the
/// scheduler that lays them out. The display type must belong to the
/// aggregation's mode; on mismatch the surface is left untouched.
pub fn render(
    surface: &mut ChartSurface,
    aggregation: &Aggregation,
    display: DisplayType,
    config: &ChartConfig,
) -> Result<TickScheduler> {
    let seeds = match (aggregation, display) {
        (Aggregation::PerCountry { records, regions }, DisplayType::Country(field)) => {
            country_bubbles(records, regions, field, config.radius_range)
        }
        (Aggregation::PerRegion { records }, DisplayType::Region(field)) => {
            region_bubbles(records, field, config.radius_range)
        }
        (Aggregation::PerCountry { .. }, DisplayType::Region(_)) => {
            bail!("display type {display} needs records grouped by region")
        }
        (Aggregation::PerRegion { .. }, DisplayType::Country(_)) => {
            bail!("display type {display} needs per-country records")
        }
    };

    surface.clear();

    let radii = seeds
        .iter()
        .map(|seed| seed.radius + config.collision_padding)
        .collect::<Vec<_>>();
    let params = SimulationParams {
        center: surface.size() * 0.5,
        ..config.simulation
    };
    let simulation = Simulation::new(&radii, params);
    surface.install(seeds, simulation.nodes());

    let mode = display.value();
    info!(
        display = mode,
        bubbles = surface.bubbles().len(),
        generation = surface.generation(),
        "chart rendered"
    );

    Ok(TickScheduler::new(simulation, surface.generation()))
}
