use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::*;
use crate::foundation::core::{FrameIndex, StopFrame};
use crate::input::event::KeyCode;
use crate::scene::effect::{CloneState, Effect, SaveState, effect_handle};

type Log = Rc<RefCell<Vec<String>>>;

struct Probe {
    label: &'static str,
    stop: StopFrame,
    consume: bool,
    stateful: bool,
    scene: Option<Weak<Scene>>,
    log: Log,
}

impl Probe {
    fn new(label: &'static str, log: &Log) -> Self {
        Self {
            label,
            stop: StopFrame::SceneEnd,
            consume: false,
            stateful: false,
            scene: None,
            log: Rc::clone(log),
        }
    }

    fn stop_at(mut self, frame: u64) -> Self {
        self.stop = StopFrame::At(FrameIndex(frame));
        self
    }

    fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    fn stateful(mut self) -> Self {
        self.stateful = true;
        self
    }

    fn record(&self, what: &str) {
        self.log.borrow_mut().push(format!("{}:{what}", self.label));
    }
}

impl Effect for Probe {
    fn reset(&mut self) {
        self.record("reset");
    }

    fn update(&mut self, frame: FrameIndex) {
        self.record(&format!("update{}", frame.0));
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        self.record("event");
        if self.consume { None } else { Some(event) }
    }

    fn stop_frame(&self) -> StopFrame {
        self.stop
    }

    fn register_scene(&mut self, scene: Weak<Scene>) {
        self.scene = Some(scene);
    }

    fn as_state_clone(&self) -> Option<&dyn CloneState> {
        if self.stateful { Some(self as &dyn CloneState) } else { None }
    }

    fn as_state_save(&mut self) -> Option<&mut dyn SaveState> {
        if self.stateful { Some(self as &mut dyn SaveState) } else { None }
    }
}

impl CloneState for Probe {
    fn clone_state(&self, _canvas: Option<Canvas>, scene: &Scene) {
        self.record(&format!("clone->{}", scene.name().unwrap_or("?")));
    }
}

impl SaveState for Probe {
    fn save_state(&mut self) {
        self.record("save");
    }
}

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| *e == entry).count()
}

#[test]
fn derives_duration_from_latest_stop_frame() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("e1", &log).stop_at(10)),
            effect_handle(Probe::new("e2", &log).stop_at(25)),
        ],
        SceneOptions::default(),
    )
    .unwrap();
    assert_eq!(scene.duration(), SceneDuration::Frames(25));

    scene.add_effect(effect_handle(Probe::new("e3", &log).stop_at(100)), true);
    assert_eq!(scene.duration(), SceneDuration::Frames(25));
    assert_eq!(scene.len(), 3);
}

#[test]
fn derived_duration_is_unbounded_when_all_effects_run_to_scene_end() {
    let log = log();
    let scene = Scene::new(
        vec![effect_handle(Probe::new("e1", &log))],
        SceneOptions::default(),
    )
    .unwrap();
    assert_eq!(scene.duration(), SceneDuration::Unbounded);
}

#[test]
fn explicit_duration_wins() {
    let log = log();
    let scene = Scene::new(
        vec![effect_handle(Probe::new("e1", &log).stop_at(10))],
        SceneOptions::frames(200).named("intro").clear(false),
    )
    .unwrap();
    assert_eq!(scene.duration(), SceneDuration::Frames(200));
    assert_eq!(scene.name(), Some("intro"));
    assert!(!scene.clear());
}

#[test]
fn empty_scene_needs_explicit_duration() {
    let err = Scene::new(Vec::new(), SceneOptions::default()).unwrap_err();
    assert!(matches!(err, ReelError::NoEffects));

    let scene = Scene::new(Vec::new(), SceneOptions::unbounded()).unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.duration(), SceneDuration::Unbounded);
}

#[test]
fn zero_frame_duration_is_rejected() {
    let err = Scene::new(Vec::new(), SceneOptions::frames(0)).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn construction_links_without_resetting() {
    let log = log();
    let probe = Rc::new(RefCell::new(Probe::new("e1", &log)));
    let handle: EffectHandle = probe.clone();
    let scene = Scene::new(vec![handle], SceneOptions::unbounded()).unwrap();

    assert!(entries(&log).is_empty());
    let linked = probe.borrow().scene.as_ref().and_then(Weak::upgrade).unwrap();
    assert!(Rc::ptr_eq(&linked, &scene));
}

#[test]
fn add_effect_resets_on_request_and_goes_on_top() {
    let log = log();
    let scene = Scene::new(Vec::new(), SceneOptions::unbounded()).unwrap();
    scene.add_effect(effect_handle(Probe::new("a", &log)), false);
    scene.add_effect(effect_handle(Probe::new("b", &log)), true);
    assert_eq!(entries(&log), vec!["b:reset"]);

    scene.process_event(Event::key(KeyCode::Enter));
    assert_eq!(entries(&log), vec!["b:reset", "b:event", "a:event"]);
}

#[test]
fn remove_effect_by_identity() {
    let log = log();
    let a = effect_handle(Probe::new("a", &log));
    let b = effect_handle(Probe::new("b", &log));
    let scene = Scene::new(vec![a.clone(), b.clone()], SceneOptions::unbounded()).unwrap();

    scene.remove_effect(&a).unwrap();
    assert_eq!(scene.len(), 1);
    assert!(Rc::ptr_eq(&scene.effects()[0], &b));

    let err = scene.remove_effect(&a).unwrap_err();
    assert!(matches!(err, ReelError::EffectNotFound));
}

#[test]
fn dispatch_stops_at_first_consumer() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("bottom", &log)),
            effect_handle(Probe::new("middle", &log).consuming()),
            effect_handle(Probe::new("top", &log)),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();

    let out = scene.process_event(Event::key(KeyCode::Char('x')));
    assert_eq!(out, None);
    assert_eq!(entries(&log), vec!["top:event", "middle:event"]);
}

#[test]
fn unconsumed_event_is_returned() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("a", &log)),
            effect_handle(Probe::new("b", &log)),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();
    let event = Event::key(KeyCode::Escape);
    assert_eq!(scene.process_event(event), Some(event));
    assert_eq!(count(&log, "a:event"), 1);
    assert_eq!(count(&log, "b:event"), 1);
}

#[test]
fn update_runs_in_registration_order() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("a", &log)),
            effect_handle(Probe::new("b", &log)),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();
    scene.update(FrameIndex(3));
    assert_eq!(entries(&log), vec!["a:update3", "b:update3"]);
}

#[test]
fn reset_with_old_scene_migrates_capable_effects_only() {
    let old_log = log();
    let old = Scene::new(
        vec![
            effect_handle(Probe::new("plain", &old_log)),
            effect_handle(Probe::new("form", &old_log).stateful()),
            effect_handle(Probe::new("popup", &old_log).stateful()),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();

    let new_log = log();
    let new = Scene::new(
        vec![
            effect_handle(Probe::new("n1", &new_log)),
            effect_handle(Probe::new("n2", &new_log)),
        ],
        SceneOptions::unbounded().named("rebuilt"),
    )
    .unwrap();

    new.reset(Some(&old), Some(Canvas::new(100, 40).unwrap()));

    assert_eq!(count(&new_log, "n1:reset"), 1);
    assert_eq!(count(&new_log, "n2:reset"), 1);
    assert_eq!(
        entries(&old_log),
        vec!["form:clone->rebuilt", "popup:clone->rebuilt"]
    );
}

/// Hands its state over by mutably borrowing every effect of the new scene.
struct Transplant {
    label: &'static str,
    log: Log,
}

impl Effect for Transplant {
    fn reset(&mut self) {}

    fn update(&mut self, _frame: FrameIndex) {}

    fn name(&self) -> Option<&str> {
        Some(self.label)
    }

    fn as_state_clone(&self) -> Option<&dyn CloneState> {
        Some(self as &dyn CloneState)
    }
}

impl CloneState for Transplant {
    fn clone_state(&self, _canvas: Option<Canvas>, scene: &Scene) {
        for effect in scene.effects() {
            let guard = effect.borrow_mut();
            let target = guard.name().unwrap_or("?");
            self.log.borrow_mut().push(format!("{}->{target}", self.label));
        }
    }
}

#[test]
fn handles_shared_between_scenes_are_not_migrated() {
    let log = log();
    let shared = effect_handle(Transplant {
        label: "widget",
        log: Rc::clone(&log),
    });
    let old = Scene::new(
        vec![
            Rc::clone(&shared),
            effect_handle(Transplant {
                label: "form",
                log: Rc::clone(&log),
            }),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();

    let new = Scene::new(
        vec![
            Rc::clone(&shared),
            effect_handle(Transplant {
                label: "form2",
                log: Rc::clone(&log),
            }),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();

    new.reset(Some(&old), None);
    assert_eq!(entries(&log), vec!["form->widget", "form->form2"]);
}

#[test]
fn first_run_reset_does_not_migrate() {
    let log = log();
    let scene = Scene::new(
        vec![effect_handle(Probe::new("form", &log).stateful())],
        SceneOptions::unbounded(),
    )
    .unwrap();
    scene.reset(None, None);
    assert_eq!(entries(&log), vec!["form:reset"]);
}

#[test]
fn exit_saves_capable_effects_once() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("plain", &log)),
            effect_handle(Probe::new("form", &log).stateful()),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();
    scene.exit();
    assert_eq!(entries(&log), vec!["form:save"]);
}

struct Spawner {
    scene: Option<Weak<Scene>>,
    log: Log,
}

impl Effect for Spawner {
    fn reset(&mut self) {}

    fn update(&mut self, _frame: FrameIndex) {}

    fn process_event(&mut self, event: Event) -> Option<Event> {
        if let Some(scene) = self.scene.as_ref().and_then(Weak::upgrade) {
            scene.add_effect(effect_handle(Probe::new("popup", &self.log).consuming()), true);
        }
        Some(event)
    }

    fn register_scene(&mut self, scene: Weak<Scene>) {
        self.scene = Some(scene);
    }
}

#[test]
fn effects_added_mid_dispatch_join_from_next_pass() {
    let log = log();
    let scene = Scene::new(
        vec![
            effect_handle(Probe::new("base", &log)),
            effect_handle(Spawner {
                scene: None,
                log: Rc::clone(&log),
            }),
        ],
        SceneOptions::unbounded(),
    )
    .unwrap();

    let event = Event::key(KeyCode::Char('p'));
    assert_eq!(scene.process_event(event), Some(event));
    assert_eq!(entries(&log), vec!["popup:reset", "base:event"]);
    assert_eq!(scene.len(), 3);

    log.borrow_mut().clear();
    assert_eq!(scene.process_event(event), None);
    assert_eq!(entries(&log), vec!["popup:event"]);
}
