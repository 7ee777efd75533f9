use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// A raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state gathered between two redraws.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: [f32; 2],
    /// Wheel movement in lines; positive is away from the user.
    pub mouse_wheel: f32,
    pub mouse_pressed: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.mouse_wheel = 0.0;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
}

/// Keyboard shortcuts of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleMusic,
    VolumeUp,
    VolumeDown,
    Reset,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] =
        [Action::ToggleMusic, Action::VolumeUp, Action::VolumeDown, Action::Reset, Action::Quit];
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered since the last frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

impl ActionMap<Action> {
    /// `M` music, `-`/`=` volume, `R` reset, `Esc` quit.
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.bind(Action::ToggleMusic, InputSource::Key(KeyCode::KeyM));
        map.bind(Action::VolumeDown, InputSource::Key(KeyCode::Minus));
        map.bind(Action::VolumeDown, InputSource::Key(KeyCode::NumpadSubtract));
        map.bind(Action::VolumeUp, InputSource::Key(KeyCode::Equal));
        map.bind(Action::VolumeUp, InputSource::Key(KeyCode::NumpadAdd));
        map.bind(Action::Reset, InputSource::Key(KeyCode::KeyR));
        map.bind(Action::Quit, InputSource::Key(KeyCode::Escape));
        map
    }

    /// Every action triggered by `input`, in [`Action::ALL`] order.
    pub fn triggered(&self, input: &InputState) -> Vec<Action> {
        Action::ALL.into_iter().filter(|a| self.is_pressed(*a, input)).collect()
    }
}
