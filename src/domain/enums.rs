/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingLink,
    /// A fired reminder is on screen; all other input is blocked until dismissed
    Reminder,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Day,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Calendar => Focus::Day,
            Focus::Day => Focus::Calendar,
        }
    }
}
