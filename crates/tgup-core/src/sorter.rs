//! Directory listing in the order uploads are sent.

use std::{
    cmp::Ordering,
    fs,
    iter::Peekable,
    path::{Path, PathBuf},
    str::Chars,
};

const HIDDEN_PREFIX: char = '.';

/// A visible child of a directory, as seen on this visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    /// Follows symlinks; false when the target cannot be stat'ed.
    pub is_dir: bool,
}

/// List `dir` without hidden entries, in case-insensitive natural order.
///
/// Never fails: an unreadable directory is logged and reads as empty, so one bad
/// folder does not stop the rest of the walk. Ties keep `read_dir` order.
pub fn sorted_entries(dir: &Path) -> Vec<DirectoryEntry> {
    let rd = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot read directory; treating as empty");
            return Vec::new();
        }
    };

    let mut keyed: Vec<(String, DirectoryEntry)> = rd
        .flatten()
        .filter_map(|ent| {
            let name = ent.file_name().to_string_lossy().into_owned();
            if name.starts_with(HIDDEN_PREFIX) {
                return None;
            }
            let path = ent.path();
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            Some((name.to_lowercase(), DirectoryEntry { name, path, is_dir }))
        })
        .collect();

    keyed.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Natural string ordering: digit runs compare by numeric value.
///
/// `"file2" < "file10"`. Leading zeros are ignored, so `"img01"` and `"img1"` compare
/// equal. Case-sensitive; callers lowercase first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digits(&mut ai);
                let run_b = take_digits(&mut bi);
                let ord = cmp_digit_runs(&run_a, &run_b);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        it.next();
    }
    run
}

// Length first so runs longer than any integer type still order correctly.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(natural_cmp("file10", "file2"), Ordering::Greater);
        assert_eq!(natural_cmp("a1b2", "a1b10"), Ordering::Less);
        assert_eq!(natural_cmp("img01", "img1"), Ordering::Equal);
        assert_eq!(natural_cmp("x", "x1"), Ordering::Less);
        assert_eq!(natural_cmp("1", "a"), Ordering::Less);
        assert_eq!(
            natural_cmp("part99999999999999999999999", "part100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn sorts_naturally_and_hides_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["img10.png", "img2.png", "img1.png", ".hidden"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let entries = sorted_entries(dir.path());
        assert_eq!(names(&entries), vec!["img1.png", "img2.png", "img10.png"]);
        assert!(entries.iter().all(|e| !e.is_dir));
    }

    #[test]
    fn ignores_case_and_flags_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("B.txt"), b"x").unwrap();
        fs::write(dir.path().join("a.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("Chapter 3")).unwrap();
        fs::create_dir(dir.path().join("chapter 12")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let entries = sorted_entries(dir.path());
        assert_eq!(
            names(&entries),
            vec!["a.txt", "B.txt", "Chapter 3", "chapter 12"]
        );
        let dirs: Vec<bool> = entries.iter().map(|e| e.is_dir).collect();
        assert_eq!(dirs, vec![false, false, true, true]);
        assert_eq!(entries[2].path, dir.path().join("Chapter 3"));
    }

    #[test]
    fn unreadable_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sorted_entries(&dir.path().join("does-not-exist")).is_empty());

        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        assert!(sorted_entries(&file).is_empty());
    }

    #[test]
    fn rereads_the_filesystem_each_call() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one"), b"x").unwrap();
        assert_eq!(sorted_entries(dir.path()).len(), 1);

        fs::write(dir.path().join("two"), b"x").unwrap();
        assert_eq!(sorted_entries(dir.path()).len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let entries = sorted_entries(dir.path());
        assert_eq!(names(&entries), vec!["alias", "dangling", "real"]);
        let dirs: Vec<bool> = entries.iter().map(|e| e.is_dir).collect();
        assert_eq!(dirs, vec![true, false, true]);
    }
}
