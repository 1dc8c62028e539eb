//! Line-oriented session driver
//!
//! Each input line is parsed into a [`Command`], turned into messages for
//! the runtime, and answered with whatever changed. Offsets are char
//! offsets; list positions shown to the user start at 1.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::editable::Selection;
use crate::gateway::Attachment;
use crate::messages::{
    AssistMsg, DocumentMsg, FindMsg, IllustrationMsg, Msg, SelectionMsg, SpellMsg, SuggestionMsg,
};
use crate::model::{AppModel, ProactiveSuggestion, RephraseSuggestion, SpellcheckError};
use crate::runtime::Runtime;
use crate::util::{read_attachment, DocumentStats};

/// Longest wait for a foreground request
const FOREGROUND_TIMEOUT: Duration = Duration::from_secs(30);

pub const HELP: &str = "\
select <start> <end>     capture a selection
clear                    clear the selection
type <at> <text>         insert text
delete <start> <end>     delete a span
transform <instruction>  rewrite the selection
rephrase                 offer alternative phrasings
apply <n>                use phrasing n
accept | dismiss         act on the proactive suggestion
suggest                  analyze the document now
spell                    check spelling now
correct <n> [text]       fix spelling error n
ignore <n>               ignore spelling error n
find <text>              search the document
next | prev              move between matches
replace <text>           replace the current match
replace-all <text>       replace every match
insert <at> <prompt>     generate text at an offset
attach <path>            attach a file to the next draft
draft <prompt>           write a new document
illustrate               illustrate the selection
storybook                illustrate every paragraph
page next|prev|close     navigate the storybook
prompts                  creative writing prompts
stats | show | state     inspect the session
quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Prev,
    Close,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { start: usize, end: usize },
    Clear,
    Type { at: usize, text: String },
    Delete { start: usize, end: usize },
    Transform(String),
    Rephrase,
    Apply(usize),
    Accept,
    Dismiss,
    Suggest,
    Spell,
    Correct {
        index: usize,
        replacement: Option<String>,
    },
    Ignore(usize),
    Find(String),
    Next,
    Prev,
    Replace(String),
    ReplaceAll(String),
    Insert { at: usize, prompt: String },
    Attach(PathBuf),
    Draft(String),
    Illustrate,
    Storybook,
    Page(PageAction),
    Prompts,
    Stats,
    Show,
    State,
    Help,
    Quit,
}

fn parse_offset(word: Option<&str>, name: &str) -> Result<usize, String> {
    let word = word.ok_or_else(|| format!("missing <{}>", name))?;
    word.parse()
        .map_err(|_| format!("<{}> must be a number, got {:?}", name, word))
}

/// 1-based list position → index
fn parse_position(word: Option<&str>) -> Result<usize, String> {
    match parse_offset(word, "n")? {
        0 => Err("<n> starts at 1".to_string()),
        n => Ok(n - 1),
    }
}

fn require_text(rest: &str, name: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("missing <{}>", name))
    } else {
        Ok(rest.to_string())
    }
}

/// Split off the first `n` whitespace-separated words, keeping the rest verbatim
fn split_words(line: &str, n: usize) -> (Vec<&str>, &str) {
    let mut words = Vec::with_capacity(n);
    let mut rest = line.trim_start();
    while words.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        words.push(&rest[..end]);
        rest = rest[end..].strip_prefix(' ').unwrap_or(rest[end..].trim_start());
    }
    (words, rest)
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (head, rest) = split_words(line, 1);
    let Some(&name) = head.first() else {
        return Err("empty command".to_string());
    };

    let command = match name {
        "select" | "delete" => {
            let (args, _) = split_words(rest, 2);
            let start = parse_offset(args.first().copied(), "start")?;
            let end = parse_offset(args.get(1).copied(), "end")?;
            if name == "select" {
                Command::Select { start, end }
            } else {
                Command::Delete { start, end }
            }
        }
        "clear" => Command::Clear,
        "type" | "insert" => {
            let (args, text) = split_words(rest, 1);
            let at = parse_offset(args.first().copied(), "at")?;
            if name == "type" {
                Command::Type {
                    at,
                    text: require_text(text, "text")?,
                }
            } else {
                Command::Insert {
                    at,
                    prompt: require_text(text, "prompt")?,
                }
            }
        }
        "transform" => Command::Transform(require_text(rest, "instruction")?),
        "rephrase" => Command::Rephrase,
        "apply" => Command::Apply(parse_position(Some(rest.trim()).filter(|s| !s.is_empty()))?),
        "accept" => Command::Accept,
        "dismiss" => Command::Dismiss,
        "suggest" => Command::Suggest,
        "spell" => Command::Spell,
        "correct" => {
            let (args, text) = split_words(rest, 1);
            Command::Correct {
                index: parse_position(args.first().copied())?,
                replacement: (!text.is_empty()).then(|| text.to_string()),
            }
        }
        "ignore" => Command::Ignore(parse_position(Some(rest.trim()).filter(|s| !s.is_empty()))?),
        "find" => Command::Find(require_text(rest, "text")?),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "replace" => Command::Replace(rest.to_string()),
        "replace-all" => Command::ReplaceAll(rest.to_string()),
        "attach" => Command::Attach(PathBuf::from(require_text(rest.trim(), "path")?)),
        "draft" => Command::Draft(require_text(rest, "prompt")?),
        "illustrate" => Command::Illustrate,
        "storybook" => Command::Storybook,
        "page" => match rest.trim() {
            "next" | "" => Command::Page(PageAction::Next),
            "prev" => Command::Page(PageAction::Prev),
            "close" => Command::Page(PageAction::Close),
            other => return Err(format!("unknown page action {:?}", other)),
        },
        "prompts" => Command::Prompts,
        "stats" => Command::Stats,
        "show" => Command::Show,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {:?} (try `help`)", other)),
    };
    Ok(command)
}

/// Serializable view of the session for the `state` command
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub content: String,
    pub revision: u64,
    pub stats: DocumentStats,
    pub selection: Option<&'a Selection>,
    pub suggestion: Option<&'a ProactiveSuggestion>,
    pub rephrase_options: Vec<&'a RephraseSuggestion>,
    pub spelling_errors: &'a [SpellcheckError],
    pub find_matches: Vec<(usize, usize)>,
    pub creative_prompts: &'a [String],
    pub busy: bool,
}

impl<'a> SessionSnapshot<'a> {
    pub fn of(model: &'a AppModel) -> Self {
        Self {
            content: model.content(),
            revision: model.revision(),
            stats: model.stats(),
            selection: model.selection.get(),
            suggestion: model.suggestions.proactive(),
            rephrase_options: model
                .suggestions
                .rephrase_for(model.selection.generation())
                .map(|batch| batch.options.iter().collect())
                .unwrap_or_default(),
            spelling_errors: model.spellcheck.errors(),
            find_matches: model
                .find
                .matches()
                .iter()
                .map(|r| (r.start, r.end))
                .collect(),
            creative_prompts: &model.creative_prompts,
            busy: model.dispatcher.is_busy() || model.illustrations.is_pending(),
        }
    }
}

/// What the driver should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session {
    runtime: Runtime,
    attachments: Vec<Attachment>,
}

impl Session {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            attachments: Vec::new(),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.runtime.model
    }

    /// Run one command and describe the result
    pub fn execute(&mut self, command: Command) -> Flow {
        self.runtime.process_async_messages();
        self.runtime.model.status.clear();

        let output = match command {
            Command::Quit => return Flow::Quit,
            Command::Help => HELP.to_string(),
            Command::Show => render_document(&self.runtime.model),
            Command::Stats => self.runtime.model.stats().label(),
            Command::State => {
                serde_json::to_string_pretty(&SessionSnapshot::of(&self.runtime.model))
                    .unwrap_or_else(|e| format!("error: {}", e))
            }
            Command::Attach(path) => match read_attachment(&path) {
                Ok(attachment) => {
                    self.attachments.push(attachment);
                    format!("{} attachment(s) queued", self.attachments.len())
                }
                Err(e) => e.user_message(&crate::util::files::filename_for_display(&path)),
            },
            other => {
                self.run(other);
                self.describe()
            }
        };
        Flow::Continue(output)
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Select { start, end } => self.send(Msg::select(start, end)),
            Command::Clear => self.send(Msg::Selection(SelectionMsg::Clear)),
            Command::Type { at, text } => self.send(Msg::insert(at, text)),
            Command::Delete { start, end } => {
                self.send(Msg::Document(DocumentMsg::Delete { start, end }))
            }
            Command::Transform(instruction) => {
                self.send(Msg::transform(instruction));
                self.wait_foreground();
            }
            Command::Rephrase => {
                self.send(Msg::Assist(AssistMsg::RequestRephrase));
                self.wait_foreground();
            }
            Command::Apply(idx) => self.send(Msg::Assist(AssistMsg::ApplyRephrase(idx))),
            Command::Accept => self.send(Msg::Suggestion(SuggestionMsg::Accept)),
            Command::Dismiss => self.send(Msg::Suggestion(SuggestionMsg::Dismiss)),
            Command::Suggest => {
                let revision = self.runtime.model.revision();
                self.send(Msg::Suggestion(SuggestionMsg::AnalysisReady { revision }));
                self.runtime
                    .wait_until(FOREGROUND_TIMEOUT, |model| !model.analyzing);
            }
            Command::Spell => {
                let revision = self.runtime.model.revision();
                self.send(Msg::Spell(SpellMsg::CheckReady { revision }));
                self.runtime.wait_until(FOREGROUND_TIMEOUT, |model| {
                    model.spellcheck.checked_revision == Some(revision)
                        || model.content().trim().is_empty()
                });
            }
            Command::Correct { index, replacement } => {
                self.send(Msg::Spell(SpellMsg::Correct { index, replacement }))
            }
            Command::Ignore(index) => self.send(Msg::Spell(SpellMsg::Ignore(index))),
            Command::Find(query) => self.send(Msg::Find(FindMsg::SetQuery(query))),
            Command::Next => self.send(Msg::Find(FindMsg::Next)),
            Command::Prev => self.send(Msg::Find(FindMsg::Prev)),
            Command::Replace(text) => {
                self.send(Msg::Find(FindMsg::SetReplacement(text)));
                self.send(Msg::Find(FindMsg::ReplaceCurrent));
            }
            Command::ReplaceAll(text) => {
                self.send(Msg::Find(FindMsg::SetReplacement(text)));
                self.send(Msg::Find(FindMsg::ReplaceAll));
            }
            Command::Insert { at, prompt } => {
                self.send(Msg::Assist(AssistMsg::RequestInsertion { at, prompt }));
                self.wait_foreground();
            }
            Command::Draft(prompt) => {
                let attachments = std::mem::take(&mut self.attachments);
                self.send(Msg::Assist(AssistMsg::RequestDraft {
                    prompt,
                    attachments,
                }));
                self.wait_foreground();
            }
            Command::Illustrate => {
                self.send(Msg::Illustration(IllustrationMsg::IllustrateSelection));
                self.wait_foreground();
            }
            Command::Storybook => {
                self.send(Msg::Illustration(IllustrationMsg::Storybook));
                self.wait_foreground();
            }
            Command::Page(action) => {
                let msg = match action {
                    PageAction::Next => IllustrationMsg::NextPage,
                    PageAction::Prev => IllustrationMsg::PrevPage,
                    PageAction::Close => IllustrationMsg::CloseStorybook,
                };
                self.send(Msg::Illustration(msg));
            }
            Command::Prompts => {
                self.runtime.model.creative_prompts.clear();
                self.send(Msg::Assist(AssistMsg::RequestCreativePrompts));
                self.runtime.wait_until(FOREGROUND_TIMEOUT, |model| {
                    !model.creative_prompts.is_empty()
                });
            }
            Command::Show
            | Command::Stats
            | Command::State
            | Command::Attach(_)
            | Command::Help
            | Command::Quit => {}
        }
    }

    fn send(&mut self, msg: Msg) {
        self.runtime.dispatch(msg);
    }

    fn wait_foreground(&mut self) {
        let done = self.runtime.wait_until(FOREGROUND_TIMEOUT, |model| {
            !model.dispatcher.is_busy()
                && !model.illustrations.is_pending()
                && model
                    .illustrations
                    .storybook
                    .as_ref()
                    .map_or(true, |book| book.is_complete())
        });
        if !done {
            self.runtime
                .model
                .status
                .error("Still waiting for the assistant; results will appear later");
        }
    }

    /// Status line, or a compact view of the document
    fn describe(&self) -> String {
        let model = &self.runtime.model;
        match model.status.visible() {
            Some(message) => format!("{}\n{}", message.text, render_document(model)),
            None => render_document(model),
        }
    }
}

/// Document text with the selection bracketed, plus any pending offers
pub fn render_document(model: &AppModel) -> String {
    let content = model.content();
    let mut out = match model.selection.get() {
        Some(sel) => {
            let chars: Vec<char> = content.chars().collect();
            let before: String = chars[..sel.start.min(chars.len())].iter().collect();
            let inner: String = chars[sel.start.min(chars.len())..sel.end.min(chars.len())]
                .iter()
                .collect();
            let after: String = chars[sel.end.min(chars.len())..].iter().collect();
            format!("{}[{}]{}", before, inner, after)
        }
        None => content,
    };

    if let Some(suggestion) = model.suggestions.proactive() {
        out.push_str(&format!(
            "\nsuggestion: {:?} → {:?} ({})",
            suggestion.snippet, suggestion.suggestion, suggestion.reason
        ));
    }
    if let Some(batch) = model.suggestions.rephrase_for(model.selection.generation()) {
        for (i, option) in batch.options.iter().enumerate() {
            out.push_str(&format!("\n  {}. {} ({})", i + 1, option.phrasing, option.nuance));
        }
    }
    for (i, error) in model.spellcheck.errors().iter().enumerate() {
        out.push_str(&format!(
            "\nspelling {}: {:?} at {} → {}",
            i + 1,
            error.word,
            error.index,
            error.suggestions.join(", ")
        ));
    }
    if !model.find.query.is_empty() {
        out.push_str(&format!(
            "\nfind {:?}: {}",
            model.find.query,
            model.find.position_label()
        ));
    }
    if let Some(book) = &model.illustrations.storybook {
        let (ready, total) = book.progress();
        if let Some(page) = book.current_page() {
            out.push_str(&format!(
                "\nstorybook page {}/{} ({} of {} ready): {}",
                book.current_index() + 1,
                total,
                ready,
                total,
                page.text
            ));
        }
    }
    if !model.illustrations.gallery.is_empty() {
        out.push_str(&format!(
            "\nillustrations: {}",
            model.illustrations.gallery.len()
        ));
    }
    for prompt in &model.creative_prompts {
        out.push_str(&format!("\nprompt: {}", prompt));
    }
    out
}

/// Drive a session from `input` until EOF or `quit`
pub fn run(session: &mut Session, input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => match session.execute(command) {
                Flow::Continue(text) => writeln!(output, "{}", text)?,
                Flow::Quit => break,
            },
            Err(e) => writeln!(output, "error: {}", e)?,
        }
        output.flush()?;
    }
    Ok(())
}
