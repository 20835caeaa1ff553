use std::fmt::Write as _;

use web_time::Instant;

use hookwork_core::{Scene, SceneNode, View, ViewKind};

pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    build_started: Option<Instant>,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            frame_count: 0,
            build_started: None,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Call right before composing.
    pub fn begin_build(&mut self) {
        self.build_started = Some(Instant::now());
    }

    /// Call once the frame is composed and painted.
    pub fn end_build(&mut self, scene: &Scene) {
        self.frame_count += 1;
        let build_ms = self
            .build_started
            .take()
            .map(|t| t.elapsed().as_secs_f32() * 1000.0)
            .unwrap_or_default();
        let metrics = Metrics {
            build_ms,
            scene_nodes: scene.nodes.len(),
        };
        log::debug!(
            "frame {}: {:.2} ms, {} lines",
            self.frame_count,
            metrics.build_ms,
            metrics.scene_nodes
        );
        self.metrics = Some(metrics);
    }

    pub fn overlay(&self, scene: &mut Scene) {
        let mut lines = vec![format!("frame: {}", self.frame_count)];
        if let Some(m) = &self.metrics {
            lines.push(format!("build: {:.2} ms", m.build_ms));
            lines.push(format!("lines: {}", m.scene_nodes));
        }
        scene.nodes.push(SceneNode::Text {
            indent: 0,
            text: format!("[{}]", lines.join("  |  ")),
        });
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub build_ms: f32,
    pub scene_nodes: usize,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    pub fn frame(&mut self, scene: &mut Scene) {
        if self.hud.inspector_enabled {
            self.hud.overlay(scene);
        }
    }
}

/// Indented outline of a laid-out view tree, one view per line.
pub fn dump_tree(root: &View) -> String {
    fn walk(v: &View, depth: usize, out: &mut String) {
        let _ = write!(out, "{:width$}#{} ", "", v.id, width = depth * 2);
        let _ = match &v.kind {
            ViewKind::Text { text } => write!(out, "Text {text:?}"),
            ViewKind::Button { text, .. } => write!(out, "Button {text:?}"),
            ViewKind::TextField { hint, .. } => write!(out, "TextField hint={hint:?}"),
            other => write!(out, "{other:?}"),
        };
        if let Some(key) = &v.key {
            let _ = write!(out, " key={key:?}");
        }
        out.push('\n');
        for child in &v.children {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_counts_frames_and_overlays() {
        let mut inspector = Inspector::new();
        let mut scene = Scene::default();

        inspector.hud.begin_build();
        inspector.hud.end_build(&scene);
        inspector.frame(&mut scene);
        assert!(scene.nodes.is_empty());

        inspector.hud.toggle_inspector();
        inspector.frame(&mut scene);
        assert_eq!(inspector.hud.frame_count(), 1);
        match &scene.nodes[..] {
            [SceneNode::Text { text, .. }] => {
                assert!(text.starts_with("[frame: 1  |  build: "));
                assert!(text.ends_with("lines: 0]"));
            }
            other => panic!("unexpected overlay {other:?}"),
        }
    }

    #[test]
    fn test_dump_tree() {
        let mut root = View::new(1, ViewKind::Column);
        let mut item = View::new(2, ViewKind::ListItem).key("7");
        item.children = vec![View::new(
            3,
            ViewKind::Text {
                text: "Ada".into(),
            },
        )];
        root.children = vec![item];
        assert_eq!(
            dump_tree(&root),
            "#1 Column\n  #2 ListItem key=\"7\"\n    #3 Text \"Ada\"\n"
        );
    }
}
