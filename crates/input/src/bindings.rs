use crate::key::{Key, KeyEvent, KeyState};
use skiff_common::{Direction, Side};
use skiff_kernel::{CameraRig, HoldControl, SceneCommand};

/// Translate a key transition into the scene command it triggers, if any.
///
/// Edge-triggered keys (movement, searchlight, rig selection, look-target
/// toggle) act on press; movement keys also act on release. Zoom and dolly
/// keys report both transitions so the fixed tick can see them held.
pub fn command_for(event: KeyEvent) -> Option<SceneCommand> {
    use KeyState::{Pressed, Released};

    let command = match (event.key, event.state) {
        (Key::Digit1, Pressed) => SceneCommand::SelectRig(CameraRig::FreeRoam),
        (Key::Digit2, Pressed) => SceneCommand::SelectRig(CameraRig::Overhead),
        (Key::Digit3, Pressed) => SceneCommand::SelectRig(CameraRig::Chase),
        (Key::R, Pressed) => SceneCommand::SelectRig(CameraRig::Original),

        (Key::ArrowUp, Pressed) => SceneCommand::Move(Direction::Forward),
        (Key::ArrowDown, Pressed) => SceneCommand::Move(Direction::Backward),
        (Key::ArrowLeft, Pressed) => SceneCommand::Move(Direction::Left),
        (Key::ArrowRight, Pressed) => SceneCommand::Move(Direction::Right),
        (Key::ArrowUp | Key::ArrowDown, Released) => SceneCommand::StopFan,
        (Key::ArrowLeft | Key::ArrowRight, Released) => SceneCommand::CenterRudder,

        (Key::A, Pressed) => SceneCommand::Searchlight(Side::Left),
        (Key::D, Pressed) => SceneCommand::Searchlight(Side::Right),

        (Key::X, state) => hold(HoldControl::ZoomIn, state),
        (Key::Z, state) => hold(HoldControl::ZoomOut, state),
        (Key::Q, state) => hold(HoldControl::DollyIn, state),
        (Key::E, state) => hold(HoldControl::DollyOut, state),

        (Key::F, Pressed) => SceneCommand::ToggleLookTarget,

        (Key::Digit1 | Key::Digit2 | Key::Digit3 | Key::R, Released)
        | (Key::A | Key::D | Key::F, Released) => return None,
    };
    tracing::trace!("{} {:?} -> {:?}", event.key, event.state, command);
    Some(command)
}

fn hold(control: HoldControl, state: KeyState) -> SceneCommand {
    SceneCommand::Hold {
        control,
        held: state == KeyState::Pressed,
    }
}
