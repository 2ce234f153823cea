// code.rs - Source Structure Report Module
// Caches the bot's own source files once at startup and serves the ^code
// command, which reports character and line counts per cached file.
// Invocation is a pure formatting pass; no file I/O happens after startup.
//
// Used by: main.rs (snapshot build + command registration)

use serenity::{
    client::Context,
    framework::standard::{macros::command, macros::group, CommandResult},
    model::channel::Message,
    prelude::TypeMapKey,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::embed::add_mapped_fields;

/// Directories scanned when the snapshot is built.
pub const SOURCE_DIRS: &[&str] = &["src", "src/commands"];

/// Name of the synthetic entry holding every source joined together.
pub const TOTAL_ENTRY: &str = "Total";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to list source directory '{path}': {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read source file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Immutable snapshot of the bot's source files, keyed by file name.
/// Entries keep insertion order; the last entry is always the synthetic
/// "Total" built from every other entry joined with newlines.
#[derive(Debug)]
pub struct SourceSnapshot {
    entries: Vec<(String, String)>,
}

impl SourceSnapshot {
    /// Read every `.rs` file found directly in each of `dirs`.
    ///
    /// File names are sorted within a directory so the entry order is
    /// deterministic; a name seen again in a later directory replaces the
    /// earlier content. Any unreadable directory or file is an error, the
    /// caller treats that as fatal.
    pub fn build(dirs: &[&str]) -> Result<Self, SnapshotError> {
        let mut entries: Vec<(String, String)> = Vec::new();

        for dir in dirs {
            let listing = fs::read_dir(dir).map_err(|source| SnapshotError::ListDir {
                path: PathBuf::from(dir),
                source,
            })?;

            let mut files: Vec<(String, PathBuf)> = Vec::new();
            for entry in listing {
                let entry = entry.map_err(|source| SnapshotError::ListDir {
                    path: PathBuf::from(dir),
                    source,
                })?;
                let path = entry.path();
                if path.is_file() && path.extension().map_or(false, |ext| ext == "rs") {
                    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                        files.push((name.to_string(), path.clone()));
                    }
                }
            }
            files.sort();

            for (name, path) in files {
                let content =
                    fs::read_to_string(&path).map_err(|source| SnapshotError::ReadFile {
                        path: path.clone(),
                        source,
                    })?;
                match entries.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(slot) => slot.1 = content,
                    None => entries.push((name, content)),
                }
            }
        }

        let total = entries
            .iter()
            .map(|(_, content)| content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        entries.push((TOTAL_ENTRY.to_string(), total));

        Ok(Self { entries })
    }

    /// Entries in snapshot order, the synthetic total last.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Client-data slot for the snapshot built in main.
pub struct SourceSnapshotContainer;

impl TypeMapKey for SourceSnapshotContainer {
    type Value = Arc<SourceSnapshot>;
}

fn field_title(name: &str) -> String {
    if name == TOTAL_ENTRY {
        format!("📊 {}", TOTAL_ENTRY)
    } else {
        format!("📝 {}", name)
    }
}

fn field_body(content: &str) -> String {
    format!(
        "`{}` characters\n`{}` lines",
        content.chars().count(),
        content.lines().count()
    )
}

#[command]
/// Report the size of every source file the bot is built from.
pub async fn code(ctx: &Context, msg: &Message) -> CommandResult {
    let snapshot = {
        let data = ctx.data.read().await;
        data.get::<SourceSnapshotContainer>()
            .cloned()
            .ok_or("source snapshot missing from client data")?
    };

    let bot_name = ctx.cache.current_user().name;

    msg.channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title("Code Structure");
                e.description(format!(
                    "> This is the whole code structure of {}!",
                    bot_name
                ));
                add_mapped_fields(
                    e,
                    snapshot.entries(),
                    |name| field_title(name),
                    |content| field_body(content),
                    true,
                )
            })
        })
        .await?;

    Ok(())
}

#[group]
#[commands(code)]
pub struct CodeCog;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Unique scratch directory per test, cleaned up on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "ember_bot_snapshot_{}_{}",
                tag,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }

        fn write(&self, rel: &str, content: &str) {
            let path = self.0.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn path(&self, rel: &str) -> String {
            self.0.join(rel).to_string_lossy().into_owned()
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_total_is_ordered_join_of_entries() {
        let scratch = Scratch::new("total");
        scratch.write("a/alpha.rs", "fn a() {}\n");
        scratch.write("a/beta.rs", "fn b() {}\n");

        let dir = scratch.path("a");
        let snapshot = SourceSnapshot::build(&[dir.as_str()]).unwrap();

        let entries: Vec<(&str, &str)> = snapshot.entries().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "alpha.rs");
        assert_eq!(entries[1].0, "beta.rs");
        assert_eq!(entries[2].0, TOTAL_ENTRY);
        assert_eq!(entries[2].1, "fn a() {}\n\nfn b() {}\n");
    }

    #[test]
    fn test_non_source_files_are_skipped() {
        let scratch = Scratch::new("skip");
        scratch.write("a/keep.rs", "fn k() {}\n");
        scratch.write("a/notes.txt", "not source\n");

        let dir = scratch.path("a");
        let snapshot = SourceSnapshot::build(&[dir.as_str()]).unwrap();
        let names: Vec<&str> = snapshot.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["keep.rs", TOTAL_ENTRY]);
    }

    #[test]
    fn test_later_directory_overrides_same_name() {
        let scratch = Scratch::new("override");
        scratch.write("a/dup.rs", "old\n");
        scratch.write("b/dup.rs", "new\n");

        let first = scratch.path("a");
        let second = scratch.path("b");
        let snapshot = SourceSnapshot::build(&[first.as_str(), second.as_str()]).unwrap();

        let entries: Vec<(&str, &str)> = snapshot.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("dup.rs", "new\n"));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let missing = Path::new("/nonexistent/ember_bot_sources")
            .to_string_lossy()
            .into_owned();
        match SourceSnapshot::build(&[missing.as_str()]) {
            Err(SnapshotError::ListDir { .. }) => {}
            other => panic!("expected ListDir error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_field_body_counts_characters_and_lines() {
        let content = "héllo\nworld\n";
        assert_eq!(field_body(content), "`12` characters\n`2` lines");
    }

    #[test]
    fn test_field_body_is_idempotent() {
        let scratch = Scratch::new("idempotent");
        scratch.write("a/one.rs", "fn one() {}\nfn two() {}\n");

        let dir = scratch.path("a");
        let snapshot = SourceSnapshot::build(&[dir.as_str()]).unwrap();

        let first: Vec<String> = snapshot
            .entries()
            .map(|(_, content)| field_body(content))
            .collect();
        let second: Vec<String> = snapshot
            .entries()
            .map(|(_, content)| field_body(content))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_entry_gets_distinct_icon() {
        assert_eq!(field_title("main.rs"), "📝 main.rs");
        assert_eq!(field_title(TOTAL_ENTRY), "📊 Total");
    }
}
