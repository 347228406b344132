use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{Answer, AnswerMeta};
use crate::catalog;
use crate::error::AskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Input,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Question,
    ClassLevel,
    Subject,
    Chapter,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Question => Focus::ClassLevel,
            Focus::ClassLevel => Focus::Subject,
            Focus::Subject => Focus::Chapter,
            Focus::Chapter => Focus::Question,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Question => Focus::Chapter,
            Focus::ClassLevel => Focus::Question,
            Focus::Subject => Focus::ClassLevel,
            Focus::Chapter => Focus::Subject,
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Submit,
    Quit,
}

/// One item in the conversation log.
pub enum Entry {
    Question(String),
    Answer {
        text: String,
        meta: Option<AnswerMeta>,
    },
    Error {
        message: String,
        diagnostic: Option<String>,
    },
}

pub struct App {
    pub mode: Mode,
    pub focus: Focus,
    pub input: String,
    pub entries: Vec<Entry>,
    // Inline validation prompt, shown instead of the status line
    pub notice: Option<String>,
    pub status: Option<String>,
    pub scroll_offset: u16,
    pub show_diagnostics: bool,
    pub class_idx: usize,
    pub subject_idx: usize,
    pub chapter_idx: usize,
    pub chapters: &'static [&'static str],
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::Input,
            focus: Focus::Question,
            input: String::new(),
            entries: Vec::new(),
            notice: None,
            status: None,
            scroll_offset: 0,
            show_diagnostics: false,
            class_idx: 0,
            subject_idx: 0,
            chapter_idx: 0,
            chapters: catalog::chapters_for(catalog::SUBJECTS[0]),
        }
    }

    pub fn selected_class(&self) -> &'static str {
        catalog::CLASS_LEVELS[self.class_idx]
    }

    pub fn selected_subject(&self) -> &'static str {
        catalog::SUBJECTS[self.subject_idx]
    }

    pub fn selected_chapter(&self) -> Option<&'static str> {
        self.chapters.get(self.chapter_idx).copied()
    }

    /// Replaces the chapter list with the new subject's catalog entries and
    /// resets the chapter selection.
    pub fn select_subject(&mut self, idx: usize) {
        self.subject_idx = idx % catalog::SUBJECTS.len();
        self.chapters = catalog::chapters_for(self.selected_subject());
        self.chapter_idx = 0;
    }

    /// Keys are only interpreted while accepting input; the Loading state is
    /// what serializes submissions.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.mode != Mode::Input {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
                {
                    // Modified Enter never submits; it breaks the line.
                    if self.focus == Focus::Question {
                        self.input.push('\n');
                    }
                    None
                } else {
                    Some(Command::Submit)
                }
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Esc => {
                if self.focus == Focus::Question && !self.input.is_empty() {
                    self.clear_input();
                    None
                } else {
                    Some(Command::Quit)
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.show_diagnostics = !self.show_diagnostics;
                None
            }
            KeyCode::Char(c)
                if self.focus == Focus::Question
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.push_char(c);
                None
            }
            KeyCode::Backspace if self.focus == Focus::Question => {
                self.pop_char();
                None
            }
            KeyCode::Up => {
                self.step_selection(-1);
                None
            }
            KeyCode::Down => {
                self.step_selection(1);
                None
            }
            KeyCode::Left if self.focus != Focus::Question => {
                self.step_selection(-1);
                None
            }
            KeyCode::Right if self.focus != Focus::Question => {
                self.step_selection(1);
                None
            }
            _ => None,
        }
    }

    fn step_selection(&mut self, delta: i32) {
        match self.focus {
            Focus::Question => {
                if delta < 0 {
                    self.scroll_up();
                } else {
                    self.scroll_down();
                }
            }
            Focus::ClassLevel => {
                self.class_idx = step(self.class_idx, delta, catalog::CLASS_LEVELS.len());
            }
            Focus::Subject => {
                let idx = step(self.subject_idx, delta, catalog::SUBJECTS.len());
                self.select_subject(idx);
            }
            Focus::Chapter => {
                self.chapter_idx = step(self.chapter_idx, delta, self.chapters.len());
            }
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.notice = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn set_loading(&mut self) {
        self.mode = Mode::Loading;
    }

    /// Unconditional cleanup after a submission: accept input again, clear
    /// the question, and put the cursor back in the question field.
    pub fn finish_submit(&mut self) {
        self.mode = Mode::Input;
        self.clear_input();
        self.focus = Focus::Question;
        self.scroll_offset = 0;
    }

    pub fn push_question(&mut self, question: &str) {
        self.entries.push(Entry::Question(question.to_string()));
    }

    pub fn push_answer(&mut self, answer: Answer) {
        self.entries.push(Entry::Answer {
            text: answer.text,
            meta: answer.meta,
        });
    }

    pub fn push_error(&mut self, err: &AskError) {
        self.entries.push(Entry::Error {
            message: err.user_message(),
            diagnostic: err.diagnostic(),
        });
    }

    pub fn set_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }
}

fn step(idx: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (idx as i32 + delta).rem_euclid(len as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_plain_enter_submits() {
        let mut app = App::new();
        app.input = "why is the sky blue?".to_string();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Some(Command::Submit));
    }

    #[test]
    fn test_shift_enter_inserts_newline_instead_of_submitting() {
        let mut app = App::new();
        app.input = "first line".to_string();
        let cmd = app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert_eq!(cmd, None);
        assert_eq!(app.input, "first line\n");
    }

    #[test]
    fn test_subject_change_repopulates_chapters() {
        let mut app = App::new();
        assert_eq!(app.selected_subject(), "Maths");
        app.chapter_idx = 3;

        app.focus = Focus::Subject;
        app.handle_key(key(KeyCode::Down));

        assert_eq!(app.selected_subject(), "Physics");
        assert_eq!(app.chapters, catalog::chapters_for("Physics"));
        assert_eq!(app.chapter_idx, 0);
    }

    #[test]
    fn test_keys_are_ignored_while_loading() {
        let mut app = App::new();
        app.input = "pending".to_string();
        app.set_loading();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(app.input, "pending");
    }

    #[test]
    fn test_finish_submit_clears_input_and_refocuses_question() {
        let mut app = App::new();
        app.input = "what is refraction?".to_string();
        app.focus = Focus::Chapter;
        app.set_loading();

        app.finish_submit();

        assert_eq!(app.mode, Mode::Input);
        assert!(app.input.is_empty());
        assert_eq!(app.focus, Focus::Question);
    }

    #[test]
    fn test_typing_clears_validation_notice() {
        let mut app = App::new();
        app.set_notice("Type a question before submitting.");
        app.handle_key(key(KeyCode::Char('w')));
        assert!(app.notice.is_none());
        assert_eq!(app.input, "w");
    }

    #[test]
    fn test_ctrl_d_toggles_diagnostics() {
        let mut app = App::new();
        let cmd = app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(cmd, None);
        assert!(app.show_diagnostics);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_class_selector_wraps() {
        let mut app = App::new();
        app.focus = Focus::ClassLevel;
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_class(), "10");
    }
}
