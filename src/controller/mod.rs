//! Controller Module
//!
//! Interactive menu over any [`BookStore`].
//!
//! ## Responsibilities
//! - Show the menu and dispatch the selection
//! - Collect field values, including keep-current merging for updates
//! - Report store failures as messages; only I/O on the terminal itself
//!   is returned as an error
//!
//! The controller owns no persistence logic.

mod menu;
mod prompt;

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{BookshelfError, Result};
use crate::record::Record;
use crate::store::BookStore;

pub use menu::{sort_key_for, MenuChoice, MENU_TEXT};
pub use prompt::Prompter;

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Unwrap a prompt answer, or quit the loop when input has ended
macro_rules! answer {
    ($prompt:expr) => {
        match $prompt? {
            Some(value) => value,
            None => return Ok(Flow::Quit),
        }
    };
}

/// Menu-driven front end
pub struct Controller<S, R, W> {
    store: S,
    prompter: Prompter<R, W>,
}

impl<S: BookStore, R: BufRead, W: Write> Controller<S, R, W> {
    pub fn new(store: S, input: R, output: W) -> Self {
        Self {
            store,
            prompter: Prompter::new(input, output),
        }
    }

    /// Run until Exit is chosen or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say(MENU_TEXT)?;
            let Some(selection) = self.prompter.line("Choose: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&selection) {
                Some(MenuChoice::Add) => self.add_record()?,
                Some(MenuChoice::DisplayAll) => self.display_all()?,
                Some(MenuChoice::Search) => self.search_by_id()?,
                Some(MenuChoice::Update) => self.update_record()?,
                Some(MenuChoice::Delete) => self.delete_record()?,
                Some(MenuChoice::Sort) => self.sort_records()?,
                Some(MenuChoice::Export) => self.export_csv()?,
                Some(MenuChoice::Exit) => {
                    self.prompter.say("Bye.")?;
                    break;
                }
                None => {
                    self.prompter.say("Invalid option.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Hand back the store and the output sink
    pub fn into_parts(self) -> (S, W) {
        (self.store, self.prompter.into_output())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn add_record(&mut self) -> Result<Flow> {
        let id = answer!(self.prompter.integer("Enter ID (number): "));
        let title = answer!(self.prompter.line("Enter Title: "));
        let author = answer!(self.prompter.line("Enter Author: "));
        let year = answer!(self.prompter.integer("Enter Year: "));
        let isbn = answer!(self.prompter.line("Enter ISBN: "));
        let status = answer!(self.prompter.line("Enter Status (available/loaned): "));

        let record = Record::new(id, title, author, year, isbn, status);
        match self.store.add(record) {
            Ok(()) => self.prompter.say("Book added successfully!")?,
            Err(BookshelfError::DuplicateId(id)) => self
                .prompter
                .say(format!("Failed to add book: ID {} already exists.", id))?,
            Err(e) => self.report_failure("Failed to add book", e)?,
        }
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> Result<Flow> {
        match self.store.get_all() {
            Ok(records) => self.show_records("--- Book Records ---", &records)?,
            Err(e) => self.report_failure("Failed to read books", e)?,
        }
        Ok(Flow::Continue)
    }

    fn search_by_id(&mut self) -> Result<Flow> {
        let id = answer!(self.prompter.integer("Enter ID to search: "));
        match self.store.find_by_id(id) {
            Ok(Some(record)) => {
                self.prompter.say("Found:")?;
                self.prompter.say(record.to_string())?;
            }
            Ok(None) => self.prompter.say("Not found.")?,
            Err(e) => self.report_failure("Search failed", e)?,
        }
        Ok(Flow::Continue)
    }

    fn update_record(&mut self) -> Result<Flow> {
        let id = answer!(self.prompter.integer("Enter ID to update: "));
        let current = match self.store.find_by_id(id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.prompter.say("Not found.")?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.report_failure("Update failed", e)?;
                return Ok(Flow::Continue);
            }
        };

        self.prompter.say("Leave blank to keep current.")?;
        let mut updated = current.clone();

        let title = answer!(self.prompter.line(&format!("Title [{}]: ", current.title)));
        keep_or_replace(&mut updated.title, title);

        let author = answer!(self.prompter.line(&format!("Author [{}]: ", current.author)));
        keep_or_replace(&mut updated.author, author);

        let year = answer!(self.prompter.line(&format!("Year [{}]: ", current.year)));
        if !year.is_empty() {
            match year.trim().parse() {
                Ok(year) => updated.year = year,
                Err(_) => self.prompter.say("Invalid year. Keeping old.")?,
            }
        }

        let isbn = answer!(self.prompter.line(&format!("ISBN [{}]: ", current.isbn)));
        keep_or_replace(&mut updated.isbn, isbn);

        let status = answer!(self.prompter.line(&format!("Status [{}]: ", current.status)));
        keep_or_replace(&mut updated.status, status);

        match self.store.update(id, updated) {
            Ok(()) => self.prompter.say("Updated.")?,
            Err(e) => self.report_failure("Update failed", e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_record(&mut self) -> Result<Flow> {
        let id = answer!(self.prompter.integer("Enter ID to delete: "));
        if !answer!(self.prompter.confirm("Are you sure? (y/n): ")) {
            self.prompter.say("Cancelled.")?;
            return Ok(Flow::Continue);
        }

        match self.store.remove(id) {
            Ok(()) => self.prompter.say("Deleted.")?,
            Err(BookshelfError::NotFound(_)) => self.prompter.say("Not found.")?,
            Err(e) => self.report_failure("Delete failed", e)?,
        }
        Ok(Flow::Continue)
    }

    fn sort_records(&mut self) -> Result<Flow> {
        self.prompter.say("Sort by: 1) Title  2) Year  3) Author  4) ID")?;
        let key = sort_key_for(answer!(self.prompter.integer("Choose: ")));
        let direction = answer!(self.prompter.line("Ascending? 1=yes 0=no: "));
        let ascending = direction.trim().parse::<i32>().map_or(true, |v| v != 0);

        tracing::debug!(key = %key, ascending, "Sorting records");
        match self.store.sort_by(key, ascending) {
            Ok(records) => self.show_records("--- Sorted Books ---", &records)?,
            Err(e) => self.report_failure("Sort failed", e)?,
        }
        Ok(Flow::Continue)
    }

    fn export_csv(&mut self) -> Result<Flow> {
        let path = answer!(self.prompter.line("Output CSV path (e.g., books.csv): "));
        if path.is_empty() {
            self.prompter.say("Cancelled.")?;
            return Ok(Flow::Continue);
        }

        match self.store.export_csv(Path::new(&path)) {
            Ok(_) => self.prompter.say(format!("Exported to {}", path))?,
            Err(e) => self.report_failure("Export failed", e)?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Output Helpers
    // =========================================================================

    fn show_records(&mut self, heading: &str, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            self.prompter.say("No books found.")?;
            return Ok(());
        }
        self.prompter.say(format!("\n{}", heading))?;
        for record in records {
            self.prompter.say(record.to_string())?;
        }
        Ok(())
    }

    fn report_failure(&mut self, action: &str, error: BookshelfError) -> Result<()> {
        tracing::warn!(error = %error, "{}", action);
        self.prompter.say(format!("{}: {}", action, error))?;
        Ok(())
    }
}

/// Replace `field` unless the answer is blank
fn keep_or_replace(field: &mut String, answer: String) {
    if !answer.is_empty() {
        *field = answer;
    }
}
