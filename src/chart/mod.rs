mod interaction;
mod mode;
mod nodes;
mod physics;

use eframe::egui::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::breach::Record;
use crate::config::{Canvas, ChartConfig};

pub use interaction::TooltipContent;
pub use mode::{Mode, ModeController, TitleLabel};
pub use nodes::VisualNode;
pub use physics::{LayoutEngine, Observer};

/// A loaded chart: the node set under a layout engine plus the active mode.
pub struct BubbleChart {
    canvas: Canvas,
    engine: LayoutEngine,
    modes: ModeController,
}

impl BubbleChart {
    pub fn new(records: &[Record], config: &ChartConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(records, config, &mut rng)
    }

    pub fn with_rng<R: Rng>(records: &[Record], config: &ChartConfig, rng: &mut R) -> Self {
        let canvas = config.canvas;
        let nodes = nodes::build_nodes(records, canvas, rng);
        let engine = LayoutEngine::new(
            nodes,
            config.layout,
            canvas.center_y(),
            Mode::Grouped.target_fn(canvas),
        );

        let mut chart = Self {
            canvas,
            engine,
            modes: ModeController::default(),
        };
        chart.set_mode(Mode::Grouped);
        chart
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn nodes(&self) -> &[VisualNode] {
        self.engine.nodes()
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.modes.active()
    }

    pub fn titles(&self) -> &[TitleLabel] {
        self.modes.titles()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.modes.set_mode(mode, &mut self.engine, self.canvas);
    }

    pub fn apply_command(&mut self, name: &str) {
        self.set_mode(Mode::from_command(name));
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.engine.set_observer(observer);
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn advance(&mut self, delta_seconds: f32) -> usize {
        self.engine.advance(delta_seconds)
    }

    /// Ticks until the engine stops on its own or `max_ticks` is reached.
    pub fn settle(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks && self.engine.is_running() {
            self.engine.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn node_at(&self, point: Vec2, radius_scale: f32) -> Option<usize> {
        interaction::node_at(self.nodes(), point, radius_scale)
    }

    pub fn tooltip(&self, index: usize) -> Option<TooltipContent> {
        self.nodes().get(index).map(TooltipContent::for_node)
    }
}
