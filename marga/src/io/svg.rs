//! SVG rendering of the waypoint graph.
//!
//! Waypoints are placed with [`WaypointGraph::layout_positions`] (north up,
//! east right). The picture shows:
//! - Edges between waypoints
//! - Labelled waypoint markers
//! - A highlighted route (optional)
//! - The sensed trajectory of a navigation run (optional)

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};
use std::path::Path;

use log::info;

use crate::core::EnuVector;
use crate::error::Result;
use crate::graph::{WaypointGraph, WaypointId};

/// SVG color scheme
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    pub background: &'static str,
    pub edge: &'static str,
    pub waypoint: &'static str,
    pub label: &'static str,
    pub route: &'static str,
    pub trajectory: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            background: "#F8F8F8",
            edge: "#999999",
            waypoint: "#2222AA",
            label: "#333333",
            route: "#FF8800",
            trajectory: "#22AA22",
        }
    }
}

/// Rendering configuration
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per meter
    pub scale: f32,
    /// Edge and trajectory line width
    pub line_width: f32,
    /// Waypoint marker radius in pixels
    pub marker_radius: f32,
    /// Padding around the drawing in pixels
    pub padding: f32,
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            line_width: 2.0,
            marker_radius: 6.0,
            padding: 40.0,
            colors: SvgColorScheme::default(),
        }
    }
}

struct Node {
    name: String,
    position: EnuVector,
}

/// Builder for a graph picture
pub struct SvgVisualizer {
    config: SvgConfig,
    nodes: HashMap<WaypointId, Node>,
    /// Insertion order of `nodes`
    order: Vec<WaypointId>,
    edges: Vec<(WaypointId, WaypointId)>,
    route: Vec<WaypointId>,
    trajectory: Vec<EnuVector>,
    title: Option<String>,
}

impl SvgVisualizer {
    /// Lay out `graph` for rendering
    pub fn new(graph: &WaypointGraph, config: SvgConfig) -> Self {
        let positions = graph.layout_positions();
        let mut nodes = HashMap::with_capacity(graph.len());
        let mut order = Vec::with_capacity(graph.len());
        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut seen = HashSet::new();

        for wp in graph.iter() {
            let position = positions.get(&wp.id()).copied().unwrap_or_default();
            nodes.insert(
                wp.id(),
                Node {
                    name: wp.name().to_string(),
                    position,
                },
            );
            order.push(wp.id());

            for (neighbor, _) in wp.neighbors() {
                let key = if wp.id() < neighbor {
                    (wp.id(), neighbor)
                } else {
                    (neighbor, wp.id())
                };
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }

        Self {
            config,
            nodes,
            order,
            edges,
            route: Vec::new(),
            trajectory: Vec::new(),
            title: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Highlight a route
    pub fn with_route(mut self, route: &[WaypointId]) -> Self {
        self.route = route.to_vec();
        self
    }

    /// Draw sensed positions of a navigation run
    pub fn with_trajectory(mut self, positions: Vec<EnuVector>) -> Self {
        self.trajectory = positions;
        self
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // fmt::Write into a String never fails
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Write the rendering to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;
        info!("Saved graph picture to {}", path.display());
        Ok(())
    }

    fn bounds(&self) -> (EnuVector, EnuVector) {
        let points = self
            .nodes
            .values()
            .map(|n| n.position)
            .chain(self.trajectory.iter().copied());

        let mut min = EnuVector::planar(f32::INFINITY, f32::INFINITY);
        let mut max = EnuVector::planar(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min.east = min.east.min(p.east);
            min.north = min.north.min(p.north);
            max.east = max.east.max(p.east);
            max.north = max.north.max(p.north);
        }

        if min.east > max.east {
            // Nothing to draw
            return (EnuVector::ZERO, EnuVector::planar(1.0, 1.0));
        }
        (min, max)
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let (min, max) = self.bounds();
        let scale = self.config.scale;
        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };

        let width = (max.east - min.east) * scale + 2.0 * padding;
        let height = (max.north - min.north) * scale + 2.0 * padding + title_height;

        // North up: SVG y grows downward
        let project = |p: EnuVector| -> (f32, f32) {
            (
                padding + (p.east - min.east) * scale,
                title_height + padding + (max.north - p.north) * scale,
            )
        };

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.config.colors.background
        )?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r#"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="{}">{}</text>"#,
                width / 2.0,
                self.config.colors.label,
                escape(title)
            )?;
        }

        writeln!(svg, r#"  <g id="edges">"#)?;
        for (a, b) in &self.edges {
            let (Some(na), Some(nb)) = (self.nodes.get(a), self.nodes.get(b)) else {
                continue;
            };
            let (x1, y1) = project(na.position);
            let (x2, y2) = project(nb.position);
            writeln!(
                svg,
                r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
                x1, y1, x2, y2, self.config.colors.edge, self.config.line_width
            )?;
        }
        writeln!(svg, "  </g>")?;

        let route: Vec<EnuVector> = self
            .route
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|n| n.position))
            .collect();
        self.write_polyline(svg, "route", &route, self.config.colors.route, 2.0, &project)?;
        self.write_polyline(
            svg,
            "trajectory",
            &self.trajectory,
            self.config.colors.trajectory,
            1.0,
            &project,
        )?;

        writeln!(svg, r#"  <g id="waypoints">"#)?;
        for id in &self.order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let (x, y) = project(node.position);
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                x, y, self.config.marker_radius, self.config.colors.waypoint
            )?;
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11" fill="{}">{}</text>"#,
                x + self.config.marker_radius + 2.0,
                y - self.config.marker_radius,
                self.config.colors.label,
                escape(&node.name)
            )?;
        }
        writeln!(svg, "  </g>")?;

        writeln!(svg, "</svg>")
    }

    fn write_polyline(
        &self,
        svg: &mut String,
        id: &str,
        points: &[EnuVector],
        color: &str,
        width_factor: f32,
        project: &impl Fn(EnuVector) -> (f32, f32),
    ) -> fmt::Result {
        if points.len() < 2 {
            return Ok(());
        }

        let mut d = String::new();
        for (i, p) in points.iter().enumerate() {
            let (x, y) = project(*p);
            let cmd = if i == 0 { "M" } else { " L" };
            write!(d, "{} {:.1} {:.1}", cmd, x, y)?;
        }
        writeln!(
            svg,
            r#"  <path id="{}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" opacity="0.8"/>"#,
            id,
            d,
            color,
            self.config.line_width * width_factor
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
