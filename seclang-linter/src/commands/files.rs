use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::commands::{RECURSIVE_SUFFIX, RULE_FILE_SUPPORTED_EXTENSIONS};
use crate::errors::{Error, Result};

pub(crate) type Comparator = fn(&DirEntry, &DirEntry) -> Ordering;

pub(crate) fn read_file_content(file: File) -> std::result::Result<Vec<u8>, std::io::Error> {
    let mut file_content = Vec::new();
    let mut buf_reader = BufReader::new(file);
    buf_reader.read_to_end(&mut file_content)?;
    Ok(file_content)
}

pub(crate) fn get_files_with_filter<S, F>(file: &Path, sort: S, filter: F) -> Result<Vec<PathBuf>>
where
    S: FnMut(&DirEntry, &DirEntry) -> Ordering + Send + Sync + 'static,
    F: Fn(&DirEntry) -> bool,
{
    let mut selected = Vec::with_capacity(10);
    let walker = WalkDir::new(file).sort_by(sort).into_iter();
    let dir_check = |entry: &DirEntry| {
        // select directories to traverse
        if entry.path().is_dir() {
            return true;
        }
        filter(entry)
    };
    for entry in walker.filter_entry(dir_check) {
        let entry = entry?;
        if entry.path().is_file() {
            selected.push(entry.into_path());
        }
    }

    Ok(selected)
}

pub(crate) fn has_a_supported_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|extension| name.ends_with(extension))
}

///
/// Rule files named by the command line, in argument order. Files are taken as given,
/// directories (and the `dir/...` form) are walked recursively for `.conf` files using
/// `sort` to order siblings.
///
pub(crate) fn collect_rule_files(paths: &[String], sort: Comparator) -> Result<Vec<PathBuf>> {
    let mut selected = Vec::new();
    for each in paths {
        let trimmed = each.strip_suffix(RECURSIVE_SUFFIX).unwrap_or(each);
        let trimmed = if trimmed.is_empty() { "." } else { trimmed };
        let path = Path::new(trimmed);
        if !path.exists() {
            return Err(Error::FileNotFoundError(each.clone()));
        }

        if path.is_file() {
            selected.push(path.to_path_buf());
            continue;
        }

        let found = get_files_with_filter(path, sort, |entry| {
            entry
                .file_name()
                .to_str()
                .map_or(false, |name| {
                    has_a_supported_extension(name, &RULE_FILE_SUPPORTED_EXTENSIONS)
                })
        })?;
        debug!("{} rule file(s) under {}", found.len(), path.display());
        selected.extend(found);
    }
    Ok(selected)
}

#[derive(Debug)]
pub(crate) struct Iter<'i, T, C>
where
    C: Fn(Vec<u8>, &PathBuf) -> Result<T>,
{
    files: &'i [PathBuf],
    index: usize,
    converter: C,
}

impl<'i, T, C> Iterator for Iter<'i, T, C>
where
    C: Fn(Vec<u8>, &PathBuf) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.files.len() {
            return None;
        }
        let next = &self.files[self.index];
        self.index += 1;
        let file = match File::open(next) {
            Ok(file) => file,
            Err(e) => return Some(Err(Error::from(e))),
        };
        let content = match read_file_content(file) {
            Ok(content) => content,
            Err(e) => return Some(Err(Error::from(e))),
        };
        Some((self.converter)(content, next))
    }
}

pub(crate) fn iterate_over<T, C>(files: &[PathBuf], converter: C) -> Iter<T, C>
where
    C: Fn(Vec<u8>, &PathBuf) -> Result<T>,
{
    Iter {
        files,
        converter,
        index: 0,
    }
}

pub(crate) fn alphabetical(first: &DirEntry, second: &DirEntry) -> Ordering {
    first.file_name().cmp(second.file_name())
}

pub(crate) fn last_modified(first: &DirEntry, second: &DirEntry) -> Ordering {
    if let Ok(first) = first.metadata() {
        if let Ok(second) = second.metadata() {
            if let Ok(first) = first.modified() {
                if let Ok(second) = second.modified() {
                    return first.cmp(&second);
                }
            }
        }
    }

    Ordering::Equal
}

pub(crate) fn regular_ordering(_first: &DirEntry, _second: &DirEntry) -> Ordering {
    Ordering::Equal
}
