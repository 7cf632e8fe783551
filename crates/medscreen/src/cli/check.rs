//! Interactive symptom checker

use super::output;
use anyhow::Result;
use colored::Colorize;
use medscreen_questionnaire::{Diagnosis, Questionnaire, SessionState};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// A line typed at the checker prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Yes,
    No,
    Restart,
    Quit,
    Help,
}

impl Reply {
    /// Parse user input; `None` for anything unrecognized
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            ":restart" | ":r" => Some(Self::Restart),
            ":quit" | ":q" | ":exit" => Some(Self::Quit),
            ":help" | ":h" => Some(Self::Help),
            _ => None,
        }
    }
}

/// One user's pass through the questionnaire
pub struct CheckSession {
    questionnaire: Questionnaire,
    state: SessionState,
}

impl CheckSession {
    pub fn new(questionnaire: Questionnaire) -> Self {
        let state = questionnaire.start();
        Self {
            questionnaire,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Numbered prompt for the current question, `None` once complete
    pub fn prompt(&self) -> Option<String> {
        let question = self.questionnaire.current_question(&self.state).ok()?;
        Some(format!(
            "[{}/{}] {}",
            self.state.current_step() + 1,
            self.questionnaire.len(),
            question.prompt
        ))
    }

    /// Answer the current question; returns the diagnosis after the last one
    pub fn answer(&mut self, yes: bool) -> crate::Result<Option<Diagnosis>> {
        self.state = self.questionnaire.answer(&self.state, yes)?;
        if self.questionnaire.status(&self.state)?.is_complete() {
            return Ok(Some(self.questionnaire.result(&self.state)?));
        }
        Ok(None)
    }

    /// Start over after a completed run
    pub fn restart(&mut self) -> crate::Result<()> {
        self.state = self.questionnaire.restart(&self.state)?;
        Ok(())
    }
}

/// Run the symptom checker on the terminal
pub fn run() -> Result<()> {
    println!("{}", "Symptom Checker".cyan().bold());
    println!(
        "Answer {} or {}. Type {} for help, {} to quit",
        "y".green(),
        "n".green(),
        ":help".green(),
        ":quit".green()
    );
    println!();

    let mut session = CheckSession::new(Questionnaire::standard());
    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = match session.prompt() {
            Some(question) => {
                println!("{}", question.as_str().bold());
                "(y/n) > "
            }
            None => "(:restart/:quit) > ",
        };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let outcome = match Reply::parse(&line) {
            Some(Reply::Yes) => session.answer(true),
            Some(Reply::No) => session.answer(false),
            Some(Reply::Restart) => session.restart().map(|()| None),
            Some(Reply::Quit) => break,
            Some(Reply::Help) => {
                print_help();
                continue;
            }
            None => {
                eprintln!("{}", output::format_warning("Please answer 'y' or 'n'"));
                continue;
            }
        };

        match outcome {
            Ok(Some(diagnosis)) => print_diagnosis(&diagnosis),
            Ok(None) => {}
            Err(e) => eprintln!("{}", output::format_error(&e.into())),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_diagnosis(diagnosis: &Diagnosis) {
    println!();
    match diagnosis {
        Diagnosis::NoConditionDetected => println!("{}", diagnosis.to_string().as_str().green().bold()),
        Diagnosis::Condition { .. } => println!("{}", diagnosis.to_string().as_str().yellow().bold()),
    }
    println!("Type {} to check again", ":restart".green());
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}        Answer yes", "y, yes".green());
    println!("  {}         Answer no", "n, no".green());
    println!("  {}  Start over once every question is answered", ":restart, :r".green());
    println!("  {}     Quit", ":quit, :q".green());
    println!("  {}     Show this help", ":help, :h".green());
}
