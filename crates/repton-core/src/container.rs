// crates/repton-core/src/container.rs
//
// The archive formats themselves (tape images, disk catalogues) live outside
// this crate. They are reached through `Container`.

use crate::error::{MapError, Result};

/// A named file inside an archive, with the metadata needed to write it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: Vec<u8>,
    pub load: u32,
    pub exec: u32,
    pub data: Vec<u8>,
}

impl Entry {
    pub fn new(name: &[u8], data: Vec<u8>) -> Self {
        Entry {
            name: name.to_vec(),
            load: 0,
            exec: 0,
            data,
        }
    }

    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

pub trait Container {
    fn entry_count(&self) -> usize;

    fn entry(&self, index: usize) -> Option<&Entry>;

    /// Replace the data of entry `index`, keeping its name and addresses.
    fn replace_entry(&mut self, index: usize, data: Vec<u8>) -> Result<()>;

    /// First entry whose name equals `name`.
    fn find_entry_by_name(&self, name: &[u8]) -> Result<(usize, &Entry)> {
        (0..self.entry_count())
            .filter_map(|i| self.entry(i).map(|e| (i, e)))
            .find(|(_, e)| e.name == name)
            .ok_or_else(|| MapError::NotFound(String::from_utf8_lossy(name).into_owned()))
    }

    /// Shape signal used to recognise container revisions. Defaults to the
    /// number of entries.
    fn revision_shape(&self) -> usize {
        self.entry_count()
    }
}

/// In-memory container: an ordered list of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryList {
    pub entries: Vec<Entry>,
}

impl EntryList {
    pub fn new(entries: Vec<Entry>) -> Self {
        EntryList { entries }
    }
}

impl Container for EntryList {
    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    fn replace_entry(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        let count = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            MapError::Validation(format!("entry index {index} out of range ({count} entries)"))
        })?;
        entry.data = data;
        Ok(())
    }
}
