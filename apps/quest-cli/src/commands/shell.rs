// shell.rs — Interactive quest session.
//
// A menu-driven loop over one in-memory store, the way the game is meant to
// be played: create goals, record events, check the score, save and load at
// will. Every command error is printed and the loop carries on; only the
// terminal going away ends the session early.

use std::path::PathBuf;

use anyhow::Context;
use quest_goal::{GoalDraft, GoalType};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::goal::goal_index;
use crate::render;
use crate::session::Session;

const MENU: &str = "\
Menu Options:
  1. Create New Goal
  2. List Goals
  3. Save Goals [path]
  4. Load Goals [path]
  5. Record Event [number]
  6. View Achievements
  7. Quit
(also: score, help)";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Create,
    List,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Record(Option<usize>),
    Achievements,
    Score,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a menu number or command word plus an optional argument.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "1" | "create" | "new" => ShellCommand::Create,
            "2" | "list" | "ls" => ShellCommand::List,
            "3" | "save" => ShellCommand::Save(arg.map(PathBuf::from)),
            "4" | "load" => ShellCommand::Load(arg.map(PathBuf::from)),
            "5" | "record" => {
                let number = arg
                    .map(|a| {
                        a.parse::<usize>()
                            .map_err(|_| format!("'{}' is not a goal number", a))
                    })
                    .transpose()?;
                ShellCommand::Record(number)
            }
            "6" | "achievements" => ShellCommand::Achievements,
            "score" | "level" => ShellCommand::Score,
            "help" | "?" | "menu" => ShellCommand::Help,
            "7" | "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(format!("Invalid choice '{}'. Type 'help' for the menu.", other)),
        };
        Ok(command)
    }
}

/// Source of answers to interactive questions.
pub trait Prompt {
    /// Ask a question. `None` means the input was closed.
    fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>>;
}

impl Prompt for DefaultEditor {
    fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        match self.readline(question) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("failed to read input: {}", e)),
        }
    }
}

pub fn execute(session: &mut Session) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    run(session, &mut editor)
}

/// Drive the shell until the player quits or input ends.
pub fn run(session: &mut Session, input: &mut impl Prompt) -> anyhow::Result<()> {
    println!("Welcome to Eternal Quest!");
    println!("Playing from {}", session.save_file.display());
    println!("{}", "=".repeat(40));

    loop {
        println!();
        println!("{}", session.store.score());
        println!();
        println!("{}", MENU);

        let Some(line) = input.ask("Select a choice from the menu: ")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        if let Err(e) = dispatch(session, input, command) {
            tracing::debug!("shell command failed: {:#}", e);
            println!("Error: {:#}", e);
        }
    }

    if session.unreadable_save {
        println!(
            "Not autosaving over unreadable {}; use save to overwrite it.",
            session.save_file.display()
        );
    } else if session.config.settings.storage.autosave {
        match session.save() {
            Ok(()) => println!("Progress saved to {}", session.save_file.display()),
            Err(e) => println!("Error: could not save progress: {}", e),
        }
    }
    println!("Thank you for playing Eternal Quest! Keep striving!");
    Ok(())
}

fn dispatch(
    session: &mut Session,
    input: &mut impl Prompt,
    command: ShellCommand,
) -> anyhow::Result<()> {
    match command {
        ShellCommand::Create => create(session, input),
        ShellCommand::List => {
            println!("{}", render::goal_list(&session.store));
            Ok(())
        }
        ShellCommand::Save(path) => {
            let path = path.unwrap_or_else(|| session.save_file.clone());
            if path == session.save_file {
                session.save()?;
                session.unreadable_save = false;
            } else {
                session.save_as(&path)?;
            }
            println!("Goals saved to {}", path.display());
            Ok(())
        }
        ShellCommand::Load(path) => {
            let path = path.unwrap_or_else(|| session.save_file.clone());
            session.load_from(&path)?;
            println!(
                "Loaded {} goal(s) from {}",
                session.store.len(),
                path.display()
            );
            Ok(())
        }
        ShellCommand::Record(number) => record(session, input, number),
        ShellCommand::Achievements => {
            println!("{}", render::achievements(&session.store));
            Ok(())
        }
        ShellCommand::Score => {
            println!("{}", session.store.score());
            Ok(())
        }
        ShellCommand::Help => {
            println!("Pick a menu number or type a command word.");
            Ok(())
        }
        ShellCommand::Quit => Ok(()),
    }
}

fn create(session: &mut Session, input: &mut impl Prompt) -> anyhow::Result<()> {
    println!("The types of Goals are:");
    for (i, kind) in GoalType::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, kind.summary());
    }

    let kind_answer = require(input, "Which type of goal would you like to create? ")?;
    let kind: GoalType = kind_answer.parse()?;

    let mut draft = GoalDraft::new(
        kind_answer,
        require(input, "What is the name of your goal? ")?,
        require(input, "What is a short description of it? ")?,
        require(
            input,
            "What is the amount of points associated with this goal? ",
        )?,
    );
    if kind == GoalType::Checklist {
        let target = require(
            input,
            "How many times does this goal need to be accomplished for a bonus? ",
        )?;
        let bonus = require(
            input,
            "What is the bonus for accomplishing it that many times? ",
        )?;
        draft = draft.with_checklist(bonus, target);
    }

    let id = session.create(&draft)?;
    if kind == GoalType::Negative {
        println!("Remember: you'll LOSE points each time you record this goal!");
    }
    println!("Goal created successfully! (#{})", id + 1);
    Ok(())
}

fn record(
    session: &mut Session,
    input: &mut impl Prompt,
    number: Option<usize>,
) -> anyhow::Result<()> {
    let number = match number {
        Some(n) => n,
        None => {
            println!("{}", render::goal_list(&session.store));
            if session.store.is_empty() {
                return Ok(());
            }
            let answer = require(input, "Which goal did you accomplish? ")?;
            answer
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not a goal number", answer.trim()))?
        }
    };

    let index = goal_index(number, session.store.len())?;
    let outcome = session.record(index)?;
    println!("{}", render::outcome(&session.store, &outcome));
    Ok(())
}

/// Ask a question whose answer is required to continue.
fn require(input: &mut impl Prompt, question: &str) -> anyhow::Result<String> {
    input
        .ask(question)?
        .context("input closed before the question was answered")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use quest_goal::{Achievement, QuestConfig};
    use tempfile::TempDir;

    /// Replays scripted answers, then reports closed input.
    struct Script(VecDeque<String>);

    impl Script {
        fn new(lines: &[&str]) -> Self {
            Self(lines.iter().map(|l| l.to_string()).collect())
        }
    }

    impl Prompt for Script {
        fn ask(&mut self, _question: &str) -> anyhow::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    fn open(project: &TempDir) -> Session {
        Session::open(QuestConfig::for_project(project.path()), None).unwrap()
    }

    #[test]
    fn parse_menu_numbers_and_words() {
        assert_eq!(ShellCommand::parse("1"), Ok(ShellCommand::Create));
        assert_eq!(ShellCommand::parse(" List "), Ok(ShellCommand::List));
        assert_eq!(
            ShellCommand::parse("save backup.txt"),
            Ok(ShellCommand::Save(Some(PathBuf::from("backup.txt"))))
        );
        assert_eq!(ShellCommand::parse("4"), Ok(ShellCommand::Load(None)));
        assert_eq!(ShellCommand::parse("5 2"), Ok(ShellCommand::Record(Some(2))));
        assert_eq!(ShellCommand::parse("record"), Ok(ShellCommand::Record(None)));
        assert_eq!(ShellCommand::parse("7"), Ok(ShellCommand::Quit));
        assert!(ShellCommand::parse("record two").is_err());
        assert!(ShellCommand::parse("9").is_err());
    }

    #[test]
    fn full_session_creates_records_and_autosaves() {
        let project = TempDir::new().unwrap();
        let mut session = open(&project);
        let mut script = Script::new(&[
            "1", "checklist", "Temple", "attend", "10", "3", "5",
            "5", "1",
            "record 1",
            "5", "1",
            "7",
        ]);

        run(&mut session, &mut script).unwrap();

        assert_eq!(session.store.total_score(), 35);
        assert!(session.store.get(0).unwrap().is_complete());
        assert_eq!(open(&project).store, session.store);
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let project = TempDir::new().unwrap();
        let mut session = open(&project);
        let mut script = Script::new(&[
            "1", "weekly",
            "1", "simple", "Hike", "peak", "lots",
            "load missing.txt",
            "nonsense",
            "1", "negative", "Soda", "", "20",
            "5 3",
            "5", "0",
            "5 1",
        ]);

        run(&mut session, &mut script).unwrap();

        assert_eq!(session.store.len(), 1);
        assert_eq!(session.store.total_score(), -20);
    }

    #[test]
    fn failed_load_keeps_store() {
        let project = TempDir::new().unwrap();
        let bad = project.path().join("bad.txt");
        std::fs::write(&bad, "5\nFooGoal:a|b|1|1\n").unwrap();

        let mut session = open(&project);
        let load = format!("load {}", bad.display());
        let mut script = Script::new(&["1", "eternal", "Pray", "", "5", "5 1", load.as_str()]);

        run(&mut session, &mut script).unwrap();
        assert_eq!(session.store.len(), 1);
        assert_eq!(session.store.total_score(), 5);
    }

    #[test]
    fn save_and_load_alternate_file() {
        let project = TempDir::new().unwrap();
        let backup = project.path().join("backup.txt");
        let save = format!("save {}", backup.display());
        let load = format!("load {}", backup.display());

        let mut session = open(&project);
        let mut script = Script::new(&[
            "1", "simple", "Hike", "", "100",
            save.as_str(),
            "5 1",
            load.as_str(),
        ]);
        run(&mut session, &mut script).unwrap();

        // The load replaced the recorded event with the backup's state.
        assert_eq!(session.store.total_score(), 0);
        assert!(!session.store.get(0).unwrap().is_complete());
    }

    #[test]
    fn autosave_can_be_disabled() {
        let project = TempDir::new().unwrap();
        let mut config = QuestConfig::for_project(project.path());
        config.settings.storage.autosave = false;
        let save_file = config.save_file.clone();

        let mut session = Session::open(config, None).unwrap();
        let mut script = Script::new(&["1", "eternal", "Pray", "", "5"]);
        run(&mut session, &mut script).unwrap();

        assert_eq!(session.store.len(), 1);
        assert!(!save_file.exists());
    }

    #[test]
    fn achievements_unlock_through_shell() {
        let project = TempDir::new().unwrap();
        let mut session = open(&project);
        let mut lines: Vec<String> = Vec::new();
        for i in 0..10 {
            lines.push("1".to_string());
            lines.push("simple".to_string());
            lines.push(format!("Goal {}", i));
            lines.push(String::new());
            lines.push("10".to_string());
        }
        for i in 1..=10 {
            lines.push(format!("5 {}", i));
        }
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        run(&mut session, &mut Script::new(&refs)).unwrap();

        assert_eq!(session.store.achievements(), &[Achievement::GoalCrusher]);
        assert_eq!(session.store.total_score(), 100);
    }

    #[test]
    fn unreadable_save_starts_empty_and_is_not_autosaved() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());
        config.ensure_dirs().unwrap();
        std::fs::write(&config.save_file, "oops\n").unwrap();
        let save_file = config.save_file.clone();

        let mut session = Session::open_or_recover(config, None);
        let mut script = Script::new(&["1", "eternal", "Pray", "", "5", "5 1", "7"]);
        run(&mut session, &mut script).unwrap();

        assert_eq!(session.store.total_score(), 5);
        assert_eq!(std::fs::read_to_string(&save_file).unwrap(), "oops\n");

        // An explicit save takes over the file, and autosave resumes.
        let mut script = Script::new(&["3", "5 1", "7"]);
        run(&mut session, &mut script).unwrap();
        assert!(!session.unreadable_save);
        let reopened = Session::open(QuestConfig::for_project(project.path()), None).unwrap();
        assert_eq!(reopened.store.total_score(), 10);
    }
}
