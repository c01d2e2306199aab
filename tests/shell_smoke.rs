use std::{
    fs,
    io::{self, BufReader, Cursor, Read},
};

use tempfile::TempDir;

use contactbook::{
    contact::Contact,
    core::store::ContactStore,
    shell::session::{Shell, ShellConfig},
};

fn config() -> ShellConfig {
    ShellConfig {
        clear_screen: false,
        ..ShellConfig::default()
    }
}

/// Runs one scripted session and returns the final store plus everything printed.
fn run_script(store: ContactStore, script: &str) -> (ContactStore, String) {
    let mut output = Vec::new();
    let mut shell = Shell::new(store, Cursor::new(script.as_bytes().to_vec()), &mut output, config());
    shell.run().expect("shell run");
    let store = shell.into_store();
    (store, String::from_utf8(output).expect("utf8"))
}

fn jo_doe() -> ContactStore {
    ContactStore::from_contacts(vec![Contact::new("Jo", "Doe", "1", "a@x")])
}

#[test]
fn add_show_and_exit_with_unsaved_warning() {
    let (store, out) = run_script(ContactStore::new(), "4\nJo\nDoe\n1\na@x\nY\n3\n8\nY\n");

    assert_eq!(store.contacts(), &[Contact::new("Jo", "Doe", "1", "a@x")]);
    assert!(out.contains("### Contacts Book ###"));
    assert!(out.contains("Contact added."));
    assert!(out.contains("1. Name: Jo Doe, Phone: 1, Email: a@x"));
    assert!(out.contains("WARNING: You have made changes to the contact list that have not been stored."));
    assert!(out.ends_with("Thank you for using Contacts Book! Until next time!\n"));
}

#[test]
fn declined_add_keeps_store_clean() {
    let (store, out) = run_script(ContactStore::new(), "4\nJo\nDoe\n1\na@x\nn\n8\ny\n");

    assert!(store.is_empty());
    assert!(!store.has_unsaved_changes());
    assert!(out.contains("Operation canceled."));
    assert!(!out.contains("WARNING"));
}

#[test]
fn store_then_load_through_menu() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("book.txt");
    let path_str = path.to_str().expect("utf8 path");

    let (store, out) = run_script(jo_doe(), &format!("2\n{path_str}\n8\nY\n"));
    assert!(out.contains("Contacts stored successfully."));
    assert!(!store.has_unsaved_changes());
    assert_eq!(fs::read_to_string(&path).expect("read"), "Jo,Doe,1,a@x\n");

    let (loaded, out) = run_script(ContactStore::new(), &format!("1\n{path_str}\n3\n8\nY\n"));
    assert!(out.contains("Contacts loaded successfully."));
    assert!(out.contains("1. Name: Jo Doe, Phone: 1, Email: a@x"));
    assert_eq!(loaded.contacts(), store.contacts());
}

#[test]
fn declined_overwrite_leaves_file_and_dirty_flag() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("book.txt");
    fs::write(&path, "Max,Roe,2,b@x\n").expect("seed");

    let mut store = jo_doe();
    store.add(Contact::new("Ann", "Lee", "3", "c@x"));
    let script = format!("2\n{}\nN\n8\nY\n", path.display());
    let (store, out) = run_script(store, &script);

    assert!(out.contains("already exists. Override? [Y/N]"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "Max,Roe,2,b@x\n");
    assert!(store.has_unsaved_changes());
}

#[test]
fn load_reports_missing_file() {
    let tmp = TempDir::new().expect("tmp");
    let script = format!("1\n{}\n8\nY\n", tmp.path().join("absent.txt").display());

    let (store, out) = run_script(jo_doe(), &script);

    assert!(out.contains("File not found."));
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_keeps_blank_fields() {
    let (store, out) = run_script(jo_doe(), "5\n1\n\n\n999\n\n8\nY\n");

    assert!(out.contains("Editing: Name: Jo Doe, Phone: 1, Email: a@x"));
    assert!(out.contains("Contact updated."));
    assert_eq!(store.contacts(), &[Contact::new("Jo", "Doe", "999", "a@x")]);
    assert!(store.has_unsaved_changes());
}

#[test]
fn edit_with_invalid_index_is_canceled() {
    let (store, out) = run_script(jo_doe(), "5\n7\n5\nabc\n8\nY\n");

    assert_eq!(out.matches("Canceled or invalid index.").count(), 2);
    assert!(!store.has_unsaved_changes());
}

#[test]
fn delete_after_confirmation() {
    let (store, out) = run_script(jo_doe(), "6\n1\ny\n8\nY\n");

    assert!(out.contains("Are you sure to delete: Name: Jo Doe, Phone: 1, Email: a@x [Y/N]"));
    assert!(out.contains("Contact deleted."));
    assert!(store.is_empty());
}

#[test]
fn merge_asks_and_keeps_second() {
    let store = ContactStore::from_contacts(vec![
        Contact::new("Jo", "Doe", "1", "a@x"),
        Contact::new("JO", "DOE", "2", "b@x"),
    ]);

    let (store, out) = run_script(store, "7\n2\n7\n8\nY\n");

    assert!(out.contains("Duplicate found:\n1. Name: Jo Doe, Phone: 1, Email: a@x\n2. Name: JO DOE, Phone: 2, Email: b@x\n"));
    assert!(out.contains("Merged 1 duplicates."));
    assert!(out.contains("No duplicates found."));
    assert_eq!(store.contacts(), &[Contact::new("JO", "DOE", "2", "b@x")]);
}

#[test]
fn invalid_option_then_end_of_input() {
    let (store, out) = run_script(ContactStore::new(), "9\n");

    assert!(out.contains("Invalid option."));
    assert!(store.is_empty());
}

#[test]
fn declined_exit_returns_to_menu() {
    let (_, out) = run_script(ContactStore::new(), "8\nN\n8\ny\n");

    assert_eq!(out.matches("### Contacts Book ###").count(), 2);
    assert_eq!(out.matches("Thank you for using Contacts Book!").count(), 1);
}

#[test]
fn merge_answer_must_be_exactly_two() {
    let store = ContactStore::from_contacts(vec![
        Contact::new("Jo", "Doe", "1", "a@x"),
        Contact::new("JO", "DOE", "2", "b@x"),
    ]);

    let (store, out) = run_script(store, "7\n 2\n8\nY\n");

    assert!(out.contains("Merged 1 duplicates."));
    assert_eq!(store.contacts(), &[Contact::new("Jo", "Doe", "1", "a@x")]);
}

struct BrokenTerminal;

impl Read for BrokenTerminal {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("terminal gone"))
    }
}

#[test]
fn terminal_failure_stops_merge_without_dropping_records() {
    let contacts = vec![
        Contact::new("Jo", "Doe", "1", "a@x"),
        Contact::new("jo", "doe", "2", "b@x"),
        Contact::new("JO", "DOE", "3", "c@x"),
    ];
    let input = BufReader::new(Cursor::new(b"7\n".to_vec()).chain(BrokenTerminal));
    let mut output = Vec::new();
    let mut shell = Shell::new(
        ContactStore::from_contacts(contacts.clone()),
        input,
        &mut output,
        config(),
    );

    let result = shell.run();
    let store = shell.into_store();

    assert!(result.is_err());
    assert_eq!(store.contacts(), contacts.as_slice());
    assert!(!store.has_unsaved_changes());
}
