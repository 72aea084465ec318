use crate::domain::values::direction::Direction;

/// Semantic roles for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Success,
    Error,
    Warning,
    Heading,
    Accent,
    Plain,
}

impl From<Direction> for Role {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Role::Success,
            Direction::Down => Role::Error,
            Direction::Unknown => Role::Plain,
        }
    }
}

/// Maps roles to ANSI sequences. A plain theme emits text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

const RESET: &str = "\x1b[0m";

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn ansi() -> Self {
        Self::new(true)
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn code(&self, role: Role) -> &'static str {
        if !self.color {
            return "";
        }
        match role {
            Role::Success => "\x1b[92m",
            Role::Error => "\x1b[91m",
            Role::Warning => "\x1b[93m",
            Role::Heading => "\x1b[1m\x1b[96m",
            Role::Accent => "\x1b[96m",
            Role::Plain => "",
        }
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        let code = self.code(role);
        if code.is_empty() {
            text.to_string()
        } else {
            format!("{code}{text}{RESET}")
        }
    }

    /// Bold text, used for prompts and table headers.
    pub fn bold(&self, text: &str) -> String {
        if self.color {
            format!("\x1b[1m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Horizontal rule of `width` characters.
    pub fn rule(&self, ch: char, width: usize) -> String {
        self.paint(Role::Accent, &ch.to_string().repeat(width))
    }
}
