use eframe::egui::Vec2;

use crate::util::format_with_commas;

use super::nodes::VisualNode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub amount: String,
    pub year: String,
}

impl TooltipContent {
    pub fn for_node(node: &VisualNode) -> Self {
        Self {
            title: node.name.clone(),
            amount: format_with_commas(node.value),
            year: if node.year == 0 {
                String::new()
            } else {
                node.year.to_string()
            },
        }
    }

    pub fn rows(&self) -> [(&'static str, &str); 3] {
        [
            ("Title", self.title.as_str()),
            ("Amount", self.amount.as_str()),
            ("Year", self.year.as_str()),
        ]
    }
}

/// Index of the node under `point` (world space), with every radius scaled by
/// `radius_scale` to match what is drawn. Overlapping circles resolve to the
/// one whose center is closest.
pub fn node_at(nodes: &[VisualNode], point: Vec2, radius_scale: f32) -> Option<usize> {
    let radius_scale = radius_scale.max(0.0);
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let distance = (node.pos - point).length();
            (distance <= node.radius * radius_scale).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
