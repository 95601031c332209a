use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::ChartSurface;
use super::physics::Simulation;

#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Settled,
    Cancelled,
}

pub struct TickScheduler {
    simulation: Simulation,
    generation: u64,
    cancel: CancelHandle,
}

impl TickScheduler {
    pub(super) fn new(simulation: Simulation, generation: u64) -> Self {
        Self {
            simulation,
            generation,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn ticks(&self) -> usize {
        self.simulation.ticks()
    }

    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.is_settled()
    }

    pub fn tick(&mut self, surface: &mut ChartSurface) -> TickOutcome {
        if self.cancel.is_cancelled() {
            return TickOutcome::Cancelled;
        }
        if surface.generation() != self.generation {
            debug!(
                stale = self.generation,
                current = surface.generation(),
                "dropping tick from superseded chart"
            );
            self.cancel.cancel();
            return TickOutcome::Cancelled;
        }

        if self.simulation.is_settled() {
            return TickOutcome::Settled;
        }

        let running = self.simulation.step();
        surface.apply_positions(self.simulation.nodes());
        if running {
            TickOutcome::Running
        } else {
            TickOutcome::Settled
        }
    }

    pub fn run_to_completion(&mut self, surface: &mut ChartSurface) -> TickOutcome {
        loop {
            match self.tick(surface) {
                TickOutcome::Running => continue,
                outcome => return outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartConfig, render};
    use crate::countries::{CountryField, DisplayType, RawCountry, aggregate};

    fn countries() -> Vec<RawCountry> {
        ["Peru", "Chad", "Laos", "Oman"]
            .iter()
            .enumerate()
            .map(|(index, name)| RawCountry {
                name: (*name).to_owned(),
                code: name[..3].to_uppercase(),
                region: "Somewhere".to_owned(),
                population: (index as u64 + 1) * 1_000,
                borders: Vec::new(),
                timezones: Vec::new(),
                languages: Vec::new(),
            })
            .collect()
    }

    fn start(surface: &mut ChartSurface) -> TickScheduler {
        render(
            surface,
            &aggregate(&countries(), false),
            DisplayType::Country(CountryField::PopulationSize),
            &ChartConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn ticks_move_bubbles() {
        let mut surface = ChartSurface::new(&ChartConfig::default());
        let mut scheduler = start(&mut surface);
        let before = surface.bubbles()[0].position;

        assert_eq!(scheduler.tick(&mut surface), TickOutcome::Running);
        assert_eq!(scheduler.ticks(), 1);
        assert_ne!(surface.bubbles()[0].position, before);
    }

    #[test]
    fn superseded_scheduler_does_not_draw() {
        let mut surface = ChartSurface::new(&ChartConfig::default());
        let mut stale = start(&mut surface);
        let mut current = start(&mut surface);
        let snapshot = surface
            .bubbles()
            .iter()
            .map(|bubble| bubble.position)
            .collect::<Vec<_>>();

        assert_eq!(stale.tick(&mut surface), TickOutcome::Cancelled);
        assert_eq!(stale.ticks(), 0);
        assert!(stale.cancel_handle().is_cancelled());
        let after = surface
            .bubbles()
            .iter()
            .map(|bubble| bubble.position)
            .collect::<Vec<_>>();
        assert_eq!(snapshot, after);

        assert_eq!(current.tick(&mut surface), TickOutcome::Running);
    }

    #[test]
    fn cancelled_handle_stops_ticks() {
        let mut surface = ChartSurface::new(&ChartConfig::default());
        let mut scheduler = start(&mut surface);
        scheduler.cancel_handle().cancel();

        assert_eq!(scheduler.run_to_completion(&mut surface), TickOutcome::Cancelled);
        assert_eq!(scheduler.ticks(), 0);
    }

    #[test]
    fn cleared_surface_ignores_old_ticks() {
        let mut surface = ChartSurface::new(&ChartConfig::default());
        let mut scheduler = start(&mut surface);
        surface.clear();

        assert_eq!(scheduler.tick(&mut surface), TickOutcome::Cancelled);
        assert!(surface.bubbles().is_empty());
    }

    #[test]
    fn settles_and_stays_settled() {
        let mut surface = ChartSurface::new(&ChartConfig::default());
        let mut scheduler = start(&mut surface);

        assert_eq!(scheduler.run_to_completion(&mut surface), TickOutcome::Settled);
        let ticks = scheduler.ticks();
        assert_eq!(scheduler.tick(&mut surface), TickOutcome::Settled);
        assert_eq!(scheduler.ticks(), ticks);
        assert!(scheduler.alpha() < 0.001);
    }
}
