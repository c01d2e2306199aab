//! Menu loop, prompts and shell configuration.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use thiserror::Error;

use crate::{
    contact::{Contact, ContactPatch},
    core::{
        merge::DuplicateResolver,
        store::{ContactStore, StoreError},
    },
    persist::file::{FileSink, FileSource},
    types::{MergeChoice, Position},
};

use super::menu::{MENU_LINES, MenuOption};

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    /// A store operation was rejected.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Interactive behaviour toggles.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Ask before overwriting an existing file on store.
    pub confirm_overwrite: bool,
    /// Clear the terminal after each menu choice.
    pub clear_screen: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            confirm_overwrite: true,
            clear_screen: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Reads one line without its terminator. `None` on end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompts for each label in turn. `None` if input ends midway.
    fn prompt_all<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            *value = answer;
        }
        Ok(Some(values))
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// `Some(true)` only for a `Y`/`y` answer.
    fn confirm(&mut self, text: &str) -> io::Result<Option<bool>> {
        Ok(self
            .prompt(text)?
            .map(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))
    }
}

/// Asks the user which record of a duplicate pair to keep.
///
/// Only an exact `2` keeps the second record; anything else, including end of
/// input, keeps the first. A terminal error stops the merge.
struct PromptResolver<'a, R, W> {
    term: &'a mut Terminal<R, W>,
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> PromptResolver<'_, R, W> {
    fn ask(&mut self, first: &Contact, second: &Contact) -> io::Result<MergeChoice> {
        self.term.say("Duplicate found:")?;
        self.term.say(&format!("1. {first}"))?;
        self.term.say(&format!("2. {second}"))?;
        let answer = self.term.prompt("Keep [1] or [2]? ")?;
        Ok(match answer.as_deref() {
            Some("2") => MergeChoice::KeepSecond,
            _ => MergeChoice::KeepFirst,
        })
    }
}

impl<R: BufRead, W: Write> DuplicateResolver for PromptResolver<'_, R, W> {
    fn resolve(&mut self, first: &Contact, second: &Contact) -> Option<MergeChoice> {
        match self.ask(first, second) {
            Ok(choice) => Some(choice),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

/// Menu-driven shell over a contact store.
///
/// Generic over its input and output so scripted sessions can drive it.
pub struct Shell<R, W> {
    store: ContactStore,
    term: Terminal<R, W>,
    config: ShellConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Wraps `store` in a shell reading `input` and writing `output`.
    pub fn new(store: ContactStore, input: R, output: W, config: ShellConfig) -> Self {
        Self {
            store,
            term: Terminal { input, output },
            config,
        }
    }

    /// Ends the session, handing back the store.
    pub fn into_store(self) -> ContactStore {
        self.store
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            for line in MENU_LINES {
                self.term.say(line)?;
            }
            let Some(answer) = self.term.prompt("Select an option: ")? else {
                tracing::debug!("input closed, leaving shell");
                return Ok(());
            };
            if self.config.clear_screen {
                self.term.clear()?;
            }

            let flow = match MenuOption::parse(&answer) {
                Some(option) => self.handle_option(option)?,
                None => {
                    self.term.say("Invalid option.\n")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn handle_option(&mut self, option: MenuOption) -> Result<Flow, ShellError> {
        tracing::trace!(?option, "menu option selected");
        match option {
            MenuOption::Load => self.load(),
            MenuOption::Store => self.save(),
            MenuOption::Show => self.show().map(|()| Flow::Continue),
            MenuOption::Add => self.add(),
            MenuOption::Edit => self.edit(),
            MenuOption::Delete => self.delete(),
            MenuOption::Merge => self.merge(),
            MenuOption::Exit => self.exit(),
        }
    }

    fn load(&mut self) -> Result<Flow, ShellError> {
        self.term.say("### Load Contacts ###")?;
        let Some(filename) = self.term.prompt("Filename: ")? else {
            return Ok(Flow::Exit);
        };
        if filename.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        if !Path::new(&filename).exists() {
            self.term.say("File not found.\n")?;
            return Ok(Flow::Continue);
        }

        match self.store.load(&mut FileSource::open(&filename)) {
            Ok(count) => {
                tracing::info!("Loaded {} contacts from {}", count, filename);
                self.term.say("Contacts loaded successfully.\n")?;
            }
            Err(err) => {
                tracing::warn!("Failed to load {}: {}", filename, err);
                self.term.say("Error reading file.\n")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow, ShellError> {
        self.term.say("### Store Contacts ###")?;
        let Some(filename) = self.term.prompt("Filename: ")? else {
            return Ok(Flow::Exit);
        };
        if filename.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        if self.config.confirm_overwrite && Path::new(&filename).exists() {
            let question = format!("WARNING: File \"{filename}\" already exists. Override? [Y/N] ");
            match self.term.confirm(&question)? {
                Some(true) => {}
                Some(false) => return Ok(Flow::Continue),
                None => return Ok(Flow::Exit),
            }
        }

        match self.store.save(&mut FileSink::create(&filename)) {
            Ok(count) => {
                tracing::info!("Stored {} contacts to {}", count, filename);
                self.term.say("Contacts stored successfully.\n")?;
            }
            Err(err) => {
                tracing::warn!("Failed to store {}: {}", filename, err);
                self.term.say("Error writing file.\n")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> Result<(), ShellError> {
        self.term.say("### Contact List ###")?;
        if self.store.is_empty() {
            self.term.say("No contacts found.\n")?;
            return Ok(());
        }
        for (position, contact) in self.store.list() {
            writeln!(self.term.output, "{position}. {contact}")?;
        }
        self.term.say("")?;
        Ok(())
    }

    fn add(&mut self) -> Result<Flow, ShellError> {
        self.term.say("### Add New Contact ###")?;
        let Some([first, last, phone, email]) =
            self.term
                .prompt_all(["First Name: ", "Last Name: ", "Phone: ", "Email: "])?
        else {
            return Ok(Flow::Exit);
        };
        let contact = Contact::new(first, last, phone, email);

        match self
            .term
            .confirm(&format!("\nAdd this contact? [Y/N]\n{contact}\n"))?
        {
            Some(true) => {
                self.store.add(contact);
                self.term.say("Contact added.\n")?;
            }
            Some(false) => self.term.say("Operation canceled.\n")?,
            None => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow, ShellError> {
        let Some(position) = self.select("Select contact number to edit or leave blank to cancel: ")?
        else {
            return Ok(Flow::Continue);
        };
        if let Some(contact) = self.store.get(position) {
            let line = format!("Editing: {contact}");
            self.term.say(&line)?;
        }

        let Some([first_name, last_name, phone, email]) = self.term.prompt_all([
            "New First Name (leave blank to keep): ",
            "New Last Name (leave blank to keep): ",
            "New Phone (leave blank to keep): ",
            "New Email (leave blank to keep): ",
        ])?
        else {
            return Ok(Flow::Exit);
        };
        let patch = ContactPatch {
            first_name: Some(first_name),
            last_name: Some(last_name),
            phone: Some(phone),
            email: Some(email),
        };

        self.store.update_at(position, &patch)?;
        self.term.say("Contact updated.\n")?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow, ShellError> {
        let Some(position) =
            self.select("Select contact number to delete or leave blank to cancel: ")?
        else {
            return Ok(Flow::Continue);
        };
        let Some(contact) = self.store.get(position) else {
            return Ok(Flow::Continue);
        };

        let question = format!("Are you sure to delete: {contact} [Y/N]\n");
        match self.term.confirm(&question)? {
            Some(true) => {
                self.store.remove_at(position)?;
                self.term.say("Contact deleted.\n")?;
            }
            Some(false) => self.term.say("Operation canceled.\n")?,
            None => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Shows the list and reads a valid position. `None` when canceled.
    fn select(&mut self, question: &str) -> Result<Option<Position>, ShellError> {
        self.show()?;
        let answer = self.term.prompt(question)?;
        let position = answer
            .as_deref()
            .and_then(|a| a.trim().parse::<Position>().ok())
            .filter(|p| self.store.get(*p).is_some());
        if position.is_none() {
            self.term.say("Canceled or invalid index.\n")?;
        }
        Ok(position)
    }

    fn merge(&mut self) -> Result<Flow, ShellError> {
        self.term.say("### Merge Duplicate Contacts ###")?;
        let mut resolver = PromptResolver {
            term: &mut self.term,
            error: None,
        };
        let merged = self.store.merge_duplicates(&mut resolver);
        if let Some(err) = resolver.error {
            return Err(err.into());
        }

        tracing::debug!("Merged {} duplicate pairs", merged);
        if merged > 0 {
            self.term.say(&format!("Merged {merged} duplicates.\n"))?;
        } else {
            self.term.say("No duplicates found.\n")?;
        }
        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow, ShellError> {
        if self.store.has_unsaved_changes() {
            self.term.say(
                "WARNING: You have made changes to the contact list that have not been stored.",
            )?;
        }
        match self.term.confirm("Are you sure you want to exit? [Y/N] ")? {
            Some(true) | None => {
                self.term
                    .say("Thank you for using Contacts Book! Until next time!")?;
                Ok(Flow::Exit)
            }
            Some(false) => {
                if self.config.clear_screen {
                    self.term.clear()?;
                }
                Ok(Flow::Continue)
            }
        }
    }
}
