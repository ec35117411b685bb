use std::io::{self, Write};
use std::sync::Arc;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

use lexicon_store::{normalize_word, Dictionary};

use crate::queue::{Mutation, MutationQueue, Outcome};

const MENU: &[&str] = &[
    "1. Add Word",
    "2. Define Word",
    "3. Remove Word",
    "4. List Words",
    "5. Exit",
];

/// Run the interactive menu until the user picks "Exit" or input ends.
///
/// Adds and removes go through a [`MutationQueue`]; `report` receives their
/// outcomes. Define and list read the dictionary directly. Before returning,
/// the queue is drained and the dictionary flushed, even when the session
/// ended on an I/O error.
pub async fn run_menu<R, W, F>(
    dictionary: Arc<dyn Dictionary>,
    input: R,
    out: &mut W,
    report: F,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    F: FnMut(Outcome) + Send + 'static,
{
    let queue = MutationQueue::spawn(Arc::clone(&dictionary), report);
    let session = menu_loop(dictionary.as_ref(), &queue, input.lines(), out).await;

    let applied = queue.close().await;
    if let Err(e) = dictionary.flush() {
        warn!(error = %e, "final flush failed");
        writeln!(out, "{} {e}", "Warning:".yellow())?;
    }
    session?;
    applied?;
    writeln!(out, "Goodbye!")?;
    Ok(())
}

async fn menu_loop<R, W>(
    dictionary: &dyn Dictionary,
    queue: &MutationQueue,
    mut lines: Lines<R>,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        for item in MENU {
            writeln!(out, "{item}")?;
        }
        let Some(choice) = prompt(&mut lines, out, "Choose an action (1-5): ").await? else {
            writeln!(out)?;
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some(word) = prompt(&mut lines, out, "Enter word: ").await? else { return Ok(()) };
                let Some(definition) = prompt(&mut lines, out, "Enter definition: ").await? else {
                    return Ok(());
                };
                match normalize_word(&word) {
                    Some(word) => {
                        let definition = definition.trim().to_owned();
                        queue.submit(Mutation::Add { word, definition }).await?;
                    }
                    None => writeln!(out, "{}", "Word must not be empty.".red())?,
                }
            }
            "2" => {
                let Some(word) = prompt(&mut lines, out, "Enter word to define: ").await? else {
                    return Ok(());
                };
                match normalize_word(&word).map(|w| dictionary.get(&w)) {
                    Some(Ok(entry)) => writeln!(out, "Definition: {}", entry.to_string().cyan())?,
                    Some(Err(e)) if e.is_not_found() => writeln!(out, "{}", "Word not found.".yellow())?,
                    Some(Err(e)) => writeln!(out, "{} {e}", "Error:".red())?,
                    None => writeln!(out, "{}", "Word must not be empty.".red())?,
                }
            }
            "3" => {
                let Some(word) = prompt(&mut lines, out, "Enter word to remove: ").await? else {
                    return Ok(());
                };
                match normalize_word(&word) {
                    Some(word) => queue.submit(Mutation::Remove { word }).await?,
                    None => writeln!(out, "{}", "Word must not be empty.".red())?,
                }
            }
            "4" => print_entries(dictionary, out)?,
            "5" => return Ok(()),
            _ => writeln!(
                out,
                "{}",
                "Invalid choice. Please choose a number between 1 and 5.".red()
            )?,
        }
    }
}

/// Write every entry as `word: definition`, sorted by word.
pub fn print_entries<W: Write>(dictionary: &dyn Dictionary, out: &mut W) -> anyhow::Result<()> {
    let entries = dictionary.list();
    if entries.is_empty() {
        writeln!(out, "The dictionary is empty.")?;
        return Ok(());
    }
    writeln!(out, "Words in the dictionary:")?;
    for (word, entry) in &entries {
        writeln!(out, "  {}: {}", word.bold(), entry)?;
    }
    Ok(())
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write!(out, "{label}")?;
        out.flush()?;
        match lines.next_line().await {
            Ok(line) => return Ok(line),
            // The offending line has been consumed; ask again.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "ignoring malformed input line");
                writeln!(out)?;
                writeln!(out, "{}", "Input must be valid UTF-8 text.".red())?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use lexicon_store::{FileDictionary, InMemoryDictionary};

    async fn run_script(
        dictionary: Arc<dyn Dictionary>,
        script: &str,
    ) -> (String, Vec<String>) {
        run_bytes(dictionary, script.as_bytes()).await
    }

    async fn run_bytes(dictionary: Arc<dyn Dictionary>, script: &[u8]) -> (String, Vec<String>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut out = Vec::new();
        run_menu(dictionary, script, &mut out, move |o| {
            sink.lock().unwrap().push(o.to_string())
        })
        .await
        .unwrap();
        let reports = seen.lock().unwrap().clone();
        (String::from_utf8(out).unwrap(), reports)
    }

    #[tokio::test]
    async fn add_and_remove_through_queue() {
        let dict = Arc::new(InMemoryDictionary::new());
        let (output, reports) = run_script(
            dict.clone(),
            "1\n  go \ngopher language\n1\nrust\ncrab\n3\ngo\n5\n",
        )
        .await;

        assert_eq!(dict.words(), vec!["rust"]);
        assert_eq!(dict.get("rust").unwrap().definition(), "crab");
        assert_eq!(
            reports,
            vec![
                "Word added successfully!",
                "Word added successfully!",
                "Word removed successfully!",
            ]
        );
        assert!(output.contains("Choose an action (1-5): "));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn define_existing_and_missing() {
        let dict = Arc::new(InMemoryDictionary::new());
        dict.add("rust", "crab").unwrap();
        let (output, _) = run_script(dict, "2\nrust\n2\nnope\n5\n").await;
        assert!(output.contains("Definition: "));
        assert!(output.contains("crab"));
        assert!(output.contains("Word not found."));
    }

    #[tokio::test]
    async fn list_shows_sorted_entries() {
        let dict = Arc::new(InMemoryDictionary::new());
        dict.add("b", "second").unwrap();
        dict.add("a", "first").unwrap();
        let (output, _) = run_script(dict, "4\n5\n").await;

        let first = output.find("first").unwrap();
        let second = output.find("second").unwrap();
        assert!(first < second);
        assert!(output.contains("Words in the dictionary:"));
    }

    #[tokio::test]
    async fn list_empty_dictionary() {
        let (output, _) = run_script(Arc::new(InMemoryDictionary::new()), "4\n5\n").await;
        assert!(output.contains("The dictionary is empty."));
    }

    #[tokio::test]
    async fn invalid_choice_redisplays_menu() {
        let (output, _) = run_script(Arc::new(InMemoryDictionary::new()), "9\nabc\n5\n").await;
        assert_eq!(output.matches("Invalid choice").count(), 2);
        assert_eq!(output.matches("5. Exit").count(), 3);
    }

    #[tokio::test]
    async fn blank_word_is_rejected() {
        let dict = Arc::new(InMemoryDictionary::new());
        let (output, reports) = run_script(dict.clone(), "1\n   \nsomething\n5\n").await;
        assert!(output.contains("Word must not be empty."));
        assert!(reports.is_empty());
        assert!(dict.is_empty());
    }

    #[tokio::test]
    async fn end_of_input_drains_and_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let dict = Arc::new(FileDictionary::open(&path));

        let (_, reports) = run_script(dict, "1\ngo\ngopher\n").await;
        assert_eq!(reports.len(), 1);

        let reopened = FileDictionary::open(&path);
        assert_eq!(reopened.get("go").unwrap().definition(), "gopher");
    }

    #[tokio::test]
    async fn truncated_add_submits_nothing() {
        let dict = Arc::new(InMemoryDictionary::new());
        let (_, reports) = run_script(dict.clone(), "1\ngo\n").await;
        assert!(reports.is_empty());
        assert!(dict.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let dict = Arc::new(FileDictionary::open(&path));

        let (output, reports) = run_bytes(dict.clone(), b"1\ngo\ngopher\n\xff\xfe\n5\n").await;
        assert!(output.contains("Input must be valid UTF-8 text."));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(reports, vec!["Word added successfully!"]);
        assert!(dict.contains("go"));
        assert_eq!(FileDictionary::open(&path).get("go").unwrap().definition(), "gopher");
    }

    struct FailingReader;

    impl tokio::io::AsyncRead for FailingReader {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "terminal gone")))
        }
    }

    #[tokio::test]
    async fn read_error_still_drains_and_flushes() {
        use tokio::io::AsyncReadExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let dict = Arc::new(FileDictionary::open(&path));

        let input = tokio::io::BufReader::new((&b"1\ngo\ngopher\n"[..]).chain(FailingReader));
        let mut out = Vec::new();
        let err = run_menu(dict.clone(), input, &mut out, |_| {}).await.unwrap_err();

        assert!(err.to_string().contains("terminal gone"));
        assert!(dict.contains("go"));
        assert_eq!(FileDictionary::open(&path).get("go").unwrap().definition(), "gopher");
    }
}
