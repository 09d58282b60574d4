use skiff_input::{Key, KeyEvent, command_for};
use skiff_kernel::SceneState;

/// One step of a key script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Press then release.
    Tap(Key),
    Press(Key),
    Release(Key),
    /// Run this many fixed ticks.
    Ticks(u32),
}

impl Step {
    /// Parse one whitespace-free token: `up`, `+x`, `-x` or `tick:N`.
    pub fn parse(token: &str) -> Option<Step> {
        if let Some(n) = token.strip_prefix("tick:") {
            return n.parse().ok().map(Step::Ticks);
        }
        if let Some(k) = token.strip_prefix('+') {
            return k.parse().ok().map(Step::Press);
        }
        if let Some(k) = token.strip_prefix('-') {
            return k.parse().ok().map(Step::Release);
        }
        token.parse().ok().map(Step::Tap)
    }
}

/// Parse a whitespace-separated script. Tokens that do not parse are
/// skipped with a warning.
pub fn parse(script: &str) -> Vec<Step> {
    script
        .split_whitespace()
        .filter_map(|token| {
            let step = Step::parse(token);
            if step.is_none() {
                tracing::warn!("skipping unrecognized script token `{token}`");
            }
            step
        })
        .collect()
}

/// Drive `scene` through `steps` the way the event loop would: commands are
/// applied as they arrive and one frame is drawn whenever a redraw is
/// pending after a step or tick.
pub fn run(scene: &mut SceneState, steps: &[Step]) {
    for step in steps {
        match *step {
            Step::Tap(key) => {
                send(scene, KeyEvent::pressed(key));
                send(scene, KeyEvent::released(key));
                present(scene);
            }
            Step::Press(key) => {
                send(scene, KeyEvent::pressed(key));
                present(scene);
            }
            Step::Release(key) => {
                send(scene, KeyEvent::released(key));
                present(scene);
            }
            Step::Ticks(n) => {
                for _ in 0..n {
                    scene.tick();
                    present(scene);
                }
            }
        }
    }
}

fn send(scene: &mut SceneState, event: KeyEvent) {
    if let Some(command) = command_for(event) {
        scene.apply(command);
    }
}

fn present(scene: &mut SceneState) {
    if scene.take_redraw() {
        scene.advance_frame();
    }
}
