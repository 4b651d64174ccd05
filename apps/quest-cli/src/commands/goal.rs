// goal.rs — Goal subcommands: create, list, record.

use anyhow::Context;
use clap::Subcommand;
use quest_goal::{GoalDraft, GoalType};

use crate::render;
use crate::session::Session;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Create {
        /// Goal type: simple, eternal, checklist or negative (or 1-4).
        kind: String,
        /// Goal name (e.g., "Read scriptures").
        name: String,
        /// Short description.
        #[arg(long, short, default_value = "")]
        description: String,
        /// Points per event (points lost, for negative goals).
        #[arg(long, allow_hyphen_values = true)]
        points: String,
        /// Checklist only: bonus for reaching the target.
        #[arg(long, allow_hyphen_values = true)]
        bonus: Option<String>,
        /// Checklist only: number of events needed for the bonus.
        #[arg(long, allow_hyphen_values = true)]
        target: Option<String>,
    },
    /// List all goals.
    List,
    /// Record an event against a goal.
    Record {
        /// Goal number, as shown by `quest goal list`.
        number: usize,
    },
}

pub fn execute(cmd: &GoalCommands, session: &mut Session) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::Create {
            kind,
            name,
            description,
            points,
            bonus,
            target,
        } => {
            let draft = GoalDraft {
                kind: kind.clone(),
                name: name.clone(),
                description: description.clone(),
                points: points.clone(),
                bonus: bonus.clone(),
                target: target.clone(),
            };
            create_goal(session, &draft)
        }
        GoalCommands::List => {
            println!("{}", render::goal_list(&session.store));
            Ok(())
        }
        GoalCommands::Record { number } => record_goal(session, *number),
    }
}

fn create_goal(session: &mut Session, draft: &GoalDraft) -> anyhow::Result<()> {
    let id = session.create(draft)?;
    session.save()?;

    if let Some(goal) = session.store.get(id) {
        println!("Goal created: #{}", id + 1);
        println!("  {}", goal);
        if goal.goal_type() == GoalType::Negative && goal.points() > 0 {
            println!("Remember: you'll LOSE points each time you record this goal!");
        }
    }
    Ok(())
}

/// `number` is 1-based, as displayed.
fn record_goal(session: &mut Session, number: usize) -> anyhow::Result<()> {
    let index = goal_index(number, session.store.len())?;
    let outcome = session.record(index)?;
    session.save()?;
    println!("{}", render::outcome(&session.store, &outcome));
    Ok(())
}

/// Convert a displayed goal number into a store index.
pub fn goal_index(number: usize, len: usize) -> anyhow::Result<usize> {
    number
        .checked_sub(1)
        .filter(|&index| index < len)
        .with_context(|| format!("invalid goal number {} (there are {} goal(s))", number, len))
}
