use crate::builtins::{Builtin, BUILTINS};
use crate::error::Result;
use crate::tokenizer::token_spans;
use dirs::home_dir;
use log::debug;
use nu_ansi_term::{Color, Style};
use reedline::{
    DefaultHinter, FileBackedHistory, Highlighter, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, Signal, StyledText,
};
use std::borrow::Cow;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "# ";

/// Supplies the interpreter with one line of input at a time.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from any buffered reader, writing a prompt before each one.
pub struct BufReadSource<R, W> {
    reader: R,
    prompt_out: W,
    prompt: Option<&'static str>,
}

impl<R: BufRead, W: Write> BufReadSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self {
            reader,
            prompt_out,
            prompt: Some(PROMPT),
        }
    }

    pub fn without_prompt(mut self) -> Self {
        self.prompt = None;
        self
    }

    pub fn prompt_out(&self) -> &W {
        &self.prompt_out
    }
}

impl<R: BufRead, W: Write> LineSource for BufReadSource<R, W> {
    fn read_line(&mut self) -> Result<Option<String>> {
        if let Some(prompt) = self.prompt {
            self.prompt_out.write_all(prompt.as_bytes())?;
            self.prompt_out.flush()?;
        }

        let mut buffer = Vec::new();
        if self.reader.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }

        Ok(Some(match String::from_utf8(buffer) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }))
    }
}

/// Interactive line editor with history, hints and command highlighting.
pub struct EditorSource {
    editor: Reedline,
    prompt: ShellPrompt,
}

impl EditorSource {
    pub fn new() -> Self {
        let mut editor = Reedline::create()
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(Style::new().italic().fg(Color::LightGray)),
            ))
            .with_highlighter(Box::new(CommandHighlighter::new(&BUILTINS)));

        if let Some(history) = home_dir()
            .map(|home| home.join(".lsh_history"))
            .and_then(|path| FileBackedHistory::with_file(100, path).ok())
            .map(Box::new)
        {
            editor = editor.with_history(history);
        } else {
            eprintln!("NOTE: Failed to load history. Persistence is now disabled.")
        }

        Self {
            editor,
            prompt: ShellPrompt,
        }
    }
}

impl Default for EditorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(buffer) => Ok(Some(buffer)),
            Signal::CtrlC => {
                debug!("line abandoned");
                Ok(Some(String::new()))
            }
            Signal::CtrlD => Ok(None),
        }
    }
}

#[derive(Clone)]
pub struct ShellPrompt;

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed(PROMPT)
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

pub static BUILTIN_COLOR: Color = Color::LightBlue;
pub static COMMAND_COLOR: Color = Color::Green;
pub static DEFAULT_COLOR: Color = Color::White;

/// Colors the command word, distinguishing builtins from external programs.
pub struct CommandHighlighter {
    builtins: &'static [Builtin],
}

impl CommandHighlighter {
    pub fn new(builtins: &'static [Builtin]) -> Self {
        Self { builtins }
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let default = Style::new().fg(DEFAULT_COLOR);

        let Some(command) = token_spans(line).into_iter().next() else {
            styled_text.push((default, line.to_string()));
            return styled_text;
        };

        let color = match Builtin::lookup(self.builtins, &line[command.clone()]) {
            Some(_) => BUILTIN_COLOR,
            None => COMMAND_COLOR,
        };

        if command.start > 0 {
            styled_text.push((default, line[..command.start].to_string()));
        }
        styled_text.push((Style::new().fg(color), line[command.clone()].to_string()));
        if command.end < line.len() {
            styled_text.push((default, line[command.end..].to_string()));
        }

        styled_text
    }
}
