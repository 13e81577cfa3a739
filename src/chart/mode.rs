use serde::Serialize;

use crate::config::Canvas;

use super::nodes::VisualNode;
use super::physics::{LayoutEngine, TargetFn};

pub const YEARS: [i32; 7] = [2015, 2016, 2017, 2018, 2019, 2020, 2021];
pub const SOURCES: [&str; 4] = [
    "Hacking",
    "Theft/Loss",
    "Improper Disposal",
    "Unauthorized Access",
];
const SOURCE_TITLE_OFFSETS: [f32; 4] = [0.0, 30.0, 25.0, 35.0];
const TITLE_Y: f32 = 40.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "all")]
    Grouped,
    #[serde(rename = "year")]
    ByYear,
    #[serde(rename = "source")]
    BySource,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Grouped, Mode::ByYear, Mode::BySource];

    /// Toolbar command names. Anything unrecognised selects the grouped view.
    pub fn from_command(name: &str) -> Self {
        match name.trim() {
            "year" => Self::ByYear,
            "source" => Self::BySource,
            _ => Self::Grouped,
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            Self::Grouped => "all",
            Self::ByYear => "year",
            Self::BySource => "source",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grouped => "All Breaches",
            Self::ByYear => "Breaches by Year",
            Self::BySource => "Breaches by Source",
        }
    }

    pub fn shows_titles(self) -> bool {
        !matches!(self, Self::Grouped)
    }

    /// Target x for `node`. Years and sources outside the fixed tables fall back
    /// to the canvas center.
    pub fn target_x(self, node: &VisualNode, canvas: Canvas) -> f32 {
        let slot = match self {
            Self::Grouped => None,
            Self::ByYear => year_slot(node.year).map(|index| year_x(index, canvas)),
            Self::BySource => source_slot(&node.source).map(|index| source_x(index, canvas)),
        };
        slot.unwrap_or_else(|| canvas.center_x())
    }

    pub fn target_fn(self, canvas: Canvas) -> TargetFn {
        Box::new(move |node: &VisualNode| self.target_x(node, canvas))
    }

    pub fn titles(self, canvas: Canvas) -> Vec<TitleLabel> {
        match self {
            Self::Grouped => Vec::new(),
            Self::ByYear => YEARS
                .iter()
                .enumerate()
                .map(|(index, year)| TitleLabel {
                    text: year.to_string(),
                    x: year_x(index, canvas),
                    y: TITLE_Y,
                })
                .collect(),
            Self::BySource => SOURCES
                .iter()
                .zip(SOURCE_TITLE_OFFSETS)
                .enumerate()
                .map(|(index, (source, offset))| TitleLabel {
                    text: (*source).to_owned(),
                    x: source_x(index, canvas) + offset,
                    y: TITLE_Y,
                })
                .collect(),
        }
    }
}

fn year_slot(year: i32) -> Option<usize> {
    YEARS.iter().position(|candidate| *candidate == year)
}

fn source_slot(source: &str) -> Option<usize> {
    SOURCES.iter().position(|candidate| *candidate == source)
}

fn year_x(index: usize, canvas: Canvas) -> f32 {
    (index + 1) as f32 * canvas.width / (YEARS.len() + 1) as f32
}

fn source_x(index: usize, canvas: Canvas) -> f32 {
    (index + 1) as f32 * canvas.width / (SOURCES.len() + 1) as f32
}

/// Tracks the active mode and its visible title labels.
#[derive(Debug, Default)]
pub struct ModeController {
    active: Mode,
    titles: Vec<TitleLabel>,
}

impl ModeController {
    pub fn active(&self) -> Mode {
        self.active
    }

    pub fn titles(&self) -> &[TitleLabel] {
        &self.titles
    }

    /// Re-selecting the active mode while it is relaxing or already settled
    /// leaves the layout alone. Its targets are unchanged, and a reheat can
    /// only rotate clusters about their pull points.
    pub fn set_mode(&mut self, mode: Mode, engine: &mut LayoutEngine, canvas: Canvas) {
        if mode == self.active && (engine.is_running() || engine.is_settled()) {
            log::debug!("{} view already active", mode.command());
            return;
        }

        self.titles.clear();
        self.active = mode;
        if mode.shows_titles() {
            self.titles = mode.titles(canvas);
        }
        engine.restart(mode.target_fn(canvas));
        log::info!("switched to {} view", mode.command());
    }
}
