use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use hookwork_core::runtime::SemNode;
use hookwork_core::*;
use hookwork_devtools::Inspector;
use hookwork_ui::{TextFieldState, layout, paint, render_text};

use crate::RunError;
use crate::common::{button_by_label, field_by_key, nth_button, nth_field};

/// What holds input focus. Fields are tracked by state key because view ids
/// are reassigned on every composition.
#[derive(Clone, Debug, PartialEq)]
enum Focus {
    Field(String),
    View(ViewId),
}

#[derive(Default)]
struct Alerts {
    pending: VecDeque<String>,
    log: Vec<String>,
}

/// Owns the root view and everything a platform keeps between frames:
/// scheduler, last frame, painted scene, text field states, focus and
/// alerts. Both the terminal runner and the test harness drive one.
pub struct Host {
    root: Box<dyn FnMut(&mut Scheduler) -> View>,
    sched: Scheduler,
    inspector: Inspector,
    frame_cache: Option<Frame>,
    scene: Scene,
    paints: u64,
    textfield_states: HashMap<String, Rc<RefCell<TextFieldState>>>,
    focus: Option<Focus>,
    alerts: Rc<RefCell<Alerts>>,
    _alert_handler: AlertHandlerGuard,
    a11y: Box<dyn A11yBridge>,
}

impl Host {
    pub fn new(root: impl FnMut(&mut Scheduler) -> View + 'static) -> Self {
        let alerts = Rc::new(RefCell::new(Alerts::default()));
        let sink = alerts.clone();
        let alert_handler = set_alert_handler(move |msg| {
            let mut a = sink.borrow_mut();
            a.pending.push_back(msg.to_string());
            a.log.push(msg.to_string());
        });

        Self {
            root: Box::new(root),
            sched: Scheduler::new(),
            inspector: Inspector::new(),
            frame_cache: None,
            scene: Scene::default(),
            paints: 0,
            textfield_states: HashMap::new(),
            focus: None,
            alerts,
            _alert_handler: alert_handler,
            a11y: Box::new(LogA11y),
        }
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn inspector_mut(&mut self) -> &mut Inspector {
        &mut self.inspector
    }

    /// Composes the root, runs the frame's effects and repaints.
    pub fn compose(&mut self) {
        self.inspector.hud.begin_build();
        let frame = self.sched.compose(&mut self.root, layout);
        self.a11y.publish_tree(&frame.semantics_nodes);
        self.frame_cache = Some(frame);
        self.resolve_focus();
        self.apply_focus_request();
        if let Some(scene) = self.paint_frame() {
            self.inspector.hud.end_build(&scene);
            self.present(scene);
        }
        if let Some(frame) = &self.frame_cache {
            log::trace!("{}", hookwork_devtools::dump_tree(&frame.root));
        }
    }

    /// Paints the cached frame again (focus moved, text edited). The HUD
    /// keeps the metrics of the last composition.
    pub fn repaint(&mut self) {
        if let Some(scene) = self.paint_frame() {
            self.present(scene);
        }
    }

    fn paint_frame(&self) -> Option<Scene> {
        let frame = self.frame_cache.as_ref()?;
        Some(paint(frame, &self.textfield_states, self.sched.focused))
    }

    fn present(&mut self, mut scene: Scene) {
        self.inspector.frame(&mut scene);
        self.scene = scene;
        self.paints += 1;
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame_cache.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn text(&self) -> String {
        render_text(&self.scene)
    }

    pub fn compositions(&self) -> u64 {
        self.sched.compositions()
    }

    pub fn paints(&self) -> u64 {
        self.paints
    }

    /// Semantics node of the focused view.
    pub fn focused(&self) -> Option<&SemNode> {
        let id = self.sched.focused?;
        self.frame_cache
            .as_ref()?
            .semantics_nodes
            .iter()
            .find(|n| n.id == id)
    }

    /// State key of the focused text field.
    pub fn focused_field(&self) -> Option<&str> {
        match &self.focus {
            Some(Focus::Field(key)) => Some(key),
            _ => None,
        }
    }

    pub fn field_text(&self, key: &str) -> Option<String> {
        self.textfield_states
            .get(key)
            .map(|s| s.borrow().text.clone())
    }

    /// Oldest unacknowledged alert.
    pub fn pending_alert(&self) -> Option<String> {
        self.alerts.borrow().pending.front().cloned()
    }

    pub fn acknowledge_alert(&mut self) -> Option<String> {
        self.alerts.borrow_mut().pending.pop_front()
    }

    /// Every alert raised so far, acknowledged or not.
    pub fn alert_log(&self) -> Vec<String> {
        self.alerts.borrow().log.clone()
    }

    fn ensure_ready(&self) -> Result<&Frame, RunError> {
        if let Some(msg) = self.pending_alert() {
            return Err(RunError::AlertPending(msg));
        }
        self.frame_cache.as_ref().ok_or(RunError::NotComposed)
    }

    /// Activates the `n`-th painted button.
    pub fn click(&mut self, n: usize) -> Result<(), RunError> {
        let on_click = nth_button(self.ensure_ready()?, n)
            .and_then(|h| h.on_click.clone())
            .ok_or(RunError::NoSuchButton(n.to_string()))?;
        on_click();
        self.apply_focus_request();
        Ok(())
    }

    /// Activates the first button labelled `label`.
    pub fn click_label(&mut self, label: &str) -> Result<(), RunError> {
        let on_click = button_by_label(self.ensure_ready()?, label)
            .and_then(|h| h.on_click.clone())
            .ok_or_else(|| RunError::NoSuchButton(label.to_string()))?;
        on_click();
        self.apply_focus_request();
        Ok(())
    }

    /// Focuses the `n`-th text field.
    pub fn focus_field(&mut self, n: usize) -> Result<(), RunError> {
        let id = nth_field(self.ensure_ready()?, n)
            .map(|h| h.id)
            .ok_or(RunError::NoSuchField(n))?;
        self.focus_view(id);
        Ok(())
    }

    /// Types `text` at the caret of the `n`-th text field, focusing it, and
    /// reports the field's new value to its `on_change`.
    pub fn type_into(&mut self, n: usize, text: &str) -> Result<(), RunError> {
        self.edit_field(n, |state| state.insert_text(text))
    }

    /// Deletes the selection or the grapheme before the caret in the `n`-th
    /// text field, focusing it.
    pub fn backspace(&mut self, n: usize) -> Result<(), RunError> {
        self.edit_field(n, TextFieldState::delete_backward)
    }

    fn edit_field(
        &mut self,
        n: usize,
        edit: impl FnOnce(&mut TextFieldState),
    ) -> Result<(), RunError> {
        let (id, key, on_change) = {
            let hit = nth_field(self.ensure_ready()?, n).ok_or(RunError::NoSuchField(n))?;
            (
                hit.id,
                hit.tf_state_key.clone().unwrap_or_default(),
                hit.on_text_change.clone(),
            )
        };
        self.focus_view(id);

        let value = {
            let state = self.textfield_states.entry(key).or_default();
            let mut state = state.borrow_mut();
            let before = state.text.clone();
            edit(&mut state);
            (state.text != before).then(|| state.text.clone())
        };
        if let (Some(cb), Some(value)) = (on_change, value) {
            cb(value);
        }
        self.repaint();
        Ok(())
    }

    fn apply_focus_request(&mut self) {
        if let Some(id) = take_focus_request() {
            self.focus_view(id);
        }
    }

    fn focus_view(&mut self, id: ViewId) {
        let Some(frame) = &self.frame_cache else {
            return;
        };
        let Some(hit) = frame.hit(id).filter(|h| h.focusable) else {
            log::warn!("focus request for #{id}, which cannot take focus");
            return;
        };

        let focus = match &hit.tf_state_key {
            Some(key) => {
                self.textfield_states.entry(key.clone()).or_default();
                Focus::Field(key.clone())
            }
            None => Focus::View(id),
        };
        if self.focus.as_ref() == Some(&focus) && self.sched.focused == Some(id) {
            return;
        }
        self.focus = Some(focus);
        self.sched.focused = Some(id);
        let node = self.focused().cloned();
        self.a11y.focus_changed(node.as_ref());
        self.repaint();
    }

    /// Maps the remembered focus onto the new frame's ids.
    fn resolve_focus(&mut self) {
        let Some(frame) = &self.frame_cache else {
            return;
        };
        self.sched.focused = match &self.focus {
            Some(Focus::Field(key)) => field_by_key(frame, key).map(|h| h.id),
            Some(Focus::View(id)) => frame.hit(*id).map(|h| h.id),
            None => None,
        };
        if self.sched.focused.is_none() && self.focus.take().is_some() {
            self.a11y.focus_changed(None);
        }
    }
}

/// Accessibility bridge. Hosts publish semantics after every composition.
pub trait A11yBridge {
    fn publish_tree(&mut self, nodes: &[SemNode]);
    fn focus_changed(&mut self, node: Option<&SemNode>);
}

struct LogA11y;

impl A11yBridge for LogA11y {
    fn publish_tree(&mut self, nodes: &[SemNode]) {
        log::trace!("a11y: publish {} nodes", nodes.len());
    }

    fn focus_changed(&mut self, node: Option<&SemNode>) {
        if let Some(n) = node {
            log::debug!("a11y focus: {:?} {:?}", n.role, n.label);
        } else {
            log::debug!("a11y focus: none");
        }
    }
}
