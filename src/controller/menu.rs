//! Menu choices

use crate::query::SortKey;

/// Menu banner shown before every selection
pub const MENU_TEXT: &str = "\n=== Record Management System ===\n\
1) Add book\n\
2) Display all\n\
3) Search by ID\n\
4) Update book\n\
5) Delete book\n\
6) Sort & display\n\
7) Export CSV\n\
0) Exit";

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    DisplayAll,
    Search,
    Update,
    Delete,
    Sort,
    Export,
    Exit,
}

impl MenuChoice {
    /// Map the typed selection to a choice; anything unknown is `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<i32>().ok()? {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::DisplayAll),
            3 => Some(MenuChoice::Search),
            4 => Some(MenuChoice::Update),
            5 => Some(MenuChoice::Delete),
            6 => Some(MenuChoice::Sort),
            7 => Some(MenuChoice::Export),
            0 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Sort key for the number typed at the sort prompt; Title by default
pub fn sort_key_for(selection: i32) -> SortKey {
    match selection {
        2 => SortKey::Year,
        3 => SortKey::Author,
        4 => SortKey::Id,
        _ => SortKey::Title,
    }
}
