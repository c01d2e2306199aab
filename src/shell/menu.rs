//! Main menu options.

/// Lines printed before every option prompt.
pub const MENU_LINES: [&str; 9] = [
    "### Contacts Book ###",
    "1. Load contacts from file",
    "2. Store contacts to file",
    "3. Show contacts",
    "4. Add new contact",
    "5. Edit existing contact",
    "6. Delete contact",
    "7. Merge duplicate contacts",
    "8. Exit",
];

/// Option selected from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    /// Replace the store with the contents of a file.
    Load,
    /// Write the store to a file.
    Store,
    /// Print every contact with its position.
    Show,
    /// Append a new contact.
    Add,
    /// Patch an existing contact.
    Edit,
    /// Remove a contact.
    Delete,
    /// Merge duplicate pairs interactively.
    Merge,
    /// Leave the shell.
    Exit,
}

impl MenuOption {
    /// Parses the user's answer. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Load),
            "2" => Some(Self::Store),
            "3" => Some(Self::Show),
            "4" => Some(Self::Add),
            "5" => Some(Self::Edit),
            "6" => Some(Self::Delete),
            "7" => Some(Self::Merge),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}
