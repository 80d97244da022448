//! Morphological analyzers
//!
//! The pipeline needs two independent word-level analyses:
//!
//! - a primary [`MorphAnalyzer`] that splits text into words and yields lemma
//!   plus grammatical tags (mystem-compatible JSON output);
//! - a secondary [`WordTagger`] that assigns a tag set to each kept word.
//!
//! External programs are driven as child processes. Their stdin is written by
//! a separate task so that a full stdout pipe cannot block the writer.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::AnalyzerSettings;
use crate::utils::error::AnalyzerError;

/// One reading of a word: lemma and grammatical tags
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reading {
    #[serde(rename = "lex")]
    pub lemma: String,

    #[serde(rename = "gr")]
    pub tags: String,
}

/// Analyzer output for one text fragment
///
/// Whitespace and punctuation fragments carry no readings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordAnalysis {
    pub text: String,

    #[serde(default)]
    pub analysis: Vec<Reading>,
}

impl WordAnalysis {
    pub fn new(text: impl Into<String>, analysis: Vec<Reading>) -> Self {
        Self {
            text: text.into(),
            analysis,
        }
    }

    /// First reading, the one the pipeline uses
    pub fn primary(&self) -> Option<&Reading> {
        self.analysis.first()
    }
}

/// Primary morphological analyzer
#[async_trait]
pub trait MorphAnalyzer: Send + Sync {
    /// Split `text` into fragments and analyze each word
    async fn analyze(&self, text: &str) -> Result<Vec<WordAnalysis>, AnalyzerError>;
}

/// Secondary word tagger
#[async_trait]
pub trait WordTagger: Send + Sync {
    /// Tag each word; the result has exactly one entry per input word
    async fn tag(&self, words: &[String]) -> Result<Vec<Option<String>>, AnalyzerError>;
}

/// Analyzer backed by the `mystem` binary in JSON mode
#[derive(Debug, Clone)]
pub struct MystemAnalyzer {
    program: String,
    args: Vec<String>,
}

impl MystemAnalyzer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &AnalyzerSettings) -> Result<Self, AnalyzerError> {
        if settings.mystem_path.trim().is_empty() {
            return Err(AnalyzerError::NotConfigured("mystem_path".to_string()));
        }
        Ok(Self::new(&settings.mystem_path, settings.mystem_args.clone()))
    }
}

#[async_trait]
impl MorphAnalyzer for MystemAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Vec<WordAnalysis>, AnalyzerError> {
        let output = run_program(&self.program, &self.args, text).await?;
        parse_mystem_output(&output)
    }
}

/// Parse mystem JSON output: one JSON array of fragments per line
pub fn parse_mystem_output(output: &str) -> Result<Vec<WordAnalysis>, AnalyzerError> {
    let mut fragments = Vec::new();

    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed: Vec<WordAnalysis> = serde_json::from_str(line).map_err(|e| {
            AnalyzerError::InvalidOutput(format!("line {}: {e}", index + 1))
        })?;
        fragments.extend(parsed);
    }

    Ok(fragments)
}

/// Tagger driven by an external command reading one word per line
///
/// The command must answer with exactly one line per word; an empty line means
/// the word is unknown to it.
#[derive(Debug, Clone)]
pub struct CommandTagger {
    program: String,
    args: Vec<String>,
}

impl CommandTagger {
    /// Build from a command line, program first
    pub fn new(command: &[String]) -> Result<Self, AnalyzerError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| AnalyzerError::NotConfigured("tagger_command".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl WordTagger for CommandTagger {
    async fn tag(&self, words: &[String]) -> Result<Vec<Option<String>>, AnalyzerError> {
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let mut input = words.join("\n");
        input.push('\n');

        let output = run_program(&self.program, &self.args, &input).await?;
        let tags: Vec<Option<String>> = output
            .lines()
            .map(|line| {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            })
            .collect();

        if tags.len() != words.len() {
            return Err(AnalyzerError::OutputMismatch {
                expected: words.len(),
                actual: tags.len(),
            });
        }
        Ok(tags)
    }
}

/// In-memory `word<TAB>tags` lexicon
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, String>,
}

impl LexiconTagger {
    /// Parse lexicon content; blank lines and `#` comments are skipped
    pub fn parse(content: &str) -> Result<Self, AnalyzerError> {
        let mut entries = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, tags) = line.split_once('\t').ok_or_else(|| {
                AnalyzerError::InvalidOutput(format!(
                    "lexicon line {} has no tab separator",
                    index + 1
                ))
            })?;
            entries.insert(word.trim().to_lowercase(), tags.trim().to_string());
        }

        Ok(Self { entries })
    }

    pub async fn load(path: &Path) -> Result<Self, AnalyzerError> {
        let content = tokio::fs::read_to_string(path).await?;
        let lexicon = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), entries = lexicon.len(), "Loaded lexicon");
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl WordTagger for LexiconTagger {
    async fn tag(&self, words: &[String]) -> Result<Vec<Option<String>>, AnalyzerError> {
        Ok(words
            .iter()
            .map(|word| self.entries.get(&word.to_lowercase()).cloned())
            .collect())
    }
}

/// Build the secondary tagger from settings
///
/// A tagger command wins over a lexicon file. With neither configured every
/// word gets an empty secondary tag set.
pub async fn build_tagger(settings: &AnalyzerSettings) -> Result<Box<dyn WordTagger>, AnalyzerError> {
    if !settings.tagger_command.is_empty() {
        return Ok(Box::new(CommandTagger::new(&settings.tagger_command)?));
    }
    if let Some(path) = &settings.lexicon_path {
        return Ok(Box::new(LexiconTagger::load(path).await?));
    }

    tracing::warn!("No secondary tagger configured, secondary tags will be empty");
    Ok(Box::new(LexiconTagger::default()))
}

/// Run a program with `input` on stdin and return its stdout
async fn run_program(program: &str, args: &[String], input: &str) -> Result<String, AnalyzerError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| AnalyzerError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| AnalyzerError::InvalidOutput(format!("{program}: stdin not captured")))?;
    let bytes = input.as_bytes().to_vec();
    let writer = tokio::spawn(async move {
        stdin.write_all(&bytes).await?;
        stdin.shutdown().await
    });

    let output = child.wait_with_output().await?;
    let written = writer
        .await
        .map_err(|e| AnalyzerError::Io(std::io::Error::other(e)))?;

    if !output.status.success() {
        return Err(AnalyzerError::Exit {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    // A successful program may stop reading early
    if let Err(e) = written {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }

    String::from_utf8(output.stdout)
        .map_err(|e| AnalyzerError::InvalidOutput(format!("{program}: {e}")))
}
