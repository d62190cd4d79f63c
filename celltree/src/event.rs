/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    DoubleClick,
    ContextMenu,
    /// Pointer entered the target (non-bubbling, like `mouseenter`).
    Enter,
    /// Pointer left the target (non-bubbling, like `mouseleave`).
    Leave,
}

impl PointerKind {
    /// DOM-style event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::ContextMenu => "contextmenu",
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
        }
    }
}

/// Raw pointer event targeted at a node of a rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// ID of the deepest node under the pointer, if any.
    pub target: Option<String>,
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: Some(target.into()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    /// Event with no resolvable target (pointer left the document, etc).
    pub fn untargeted(kind: PointerKind) -> Self {
        Self {
            kind,
            target: None,
            x: 0,
            y: 0,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
