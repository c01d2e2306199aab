//! Delimited line codec and the source/sink seams used by the store.

/// File-backed line source and sink.
pub mod file;

use thiserror::Error;

use crate::contact::Contact;

/// Field separator of the persisted line format.
pub const DELIMITER: &str = ",";

/// Failure reading from a [`LineSource`] or writing to a [`LineSink`].
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying source or sink could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Something the store can load raw lines from.
pub trait LineSource {
    /// Reads every line. Either all lines are returned or an error is.
    fn read_lines(&mut self) -> PersistResult<Vec<String>>;
}

/// Something the store can save formatted lines to.
pub trait LineSink {
    /// Writes `lines` in order, replacing previous content.
    fn write_lines(&mut self, lines: &[String]) -> PersistResult<()>;
}

impl LineSource for Vec<String> {
    fn read_lines(&mut self) -> PersistResult<Vec<String>> {
        Ok(self.clone())
    }
}

impl LineSource for &[&str] {
    fn read_lines(&mut self) -> PersistResult<Vec<String>> {
        Ok(self.iter().map(|line| line.to_string()).collect())
    }
}

impl LineSink for Vec<String> {
    fn write_lines(&mut self, lines: &[String]) -> PersistResult<()> {
        self.clear();
        self.extend_from_slice(lines);
        Ok(())
    }
}

/// Parses `first,last,phone,email`. Any other field count yields `None`.
pub fn parse_line(line: &str) -> Option<Contact> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    match fields.as_slice() {
        [first, last, phone, email] => Some(Contact::new(*first, *last, *phone, *email)),
        _ => None,
    }
}

/// Formats a contact as one line. Embedded delimiters are not escaped.
pub fn format_line(contact: &Contact) -> String {
    [
        contact.first_name.as_str(),
        contact.last_name.as_str(),
        contact.phone.as_str(),
        contact.email.as_str(),
    ]
    .join(DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exactly_four_fields() {
        assert_eq!(
            parse_line("Ada,Lovelace,555,ada@x"),
            Some(Contact::new("Ada", "Lovelace", "555", "ada@x"))
        );
        assert_eq!(parse_line(",,,"), Some(Contact::default()));
    }

    #[test]
    fn rejects_other_field_counts() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("Ada,Lovelace,555"), None);
        assert_eq!(parse_line("Ada,Lovelace,555,ada@x,extra"), None);
    }

    #[test]
    fn formats_in_field_order() {
        let c = Contact::new("Ada", "Lovelace", "555", "ada@x");
        assert_eq!(format_line(&c), "Ada,Lovelace,555,ada@x");
    }

    #[test]
    fn embedded_delimiter_corrupts_line() {
        let c = Contact::new("Ada", "Lovelace, Countess", "555", "ada@x");
        assert_eq!(parse_line(&format_line(&c)), None);
    }
}
