// render.rs — Text shown to the player. Shared by subcommands and the shell.

use quest_goal::{Achievement, EventOutcome, GoalStore, GoalType};

/// Numbered goal list, 1-based as the player addresses goals.
pub fn goal_list(store: &GoalStore) -> String {
    if store.is_empty() {
        return "No goals yet. Create one to begin your quest.".to_string();
    }
    let mut out = String::from("The goals are:");
    for (i, line) in store.list_goals().enumerate() {
        out.push_str(&format!("\n{:>3}. {}", i + 1, line));
    }
    out
}

/// Result of recording an event.
pub fn outcome(store: &GoalStore, outcome: &EventOutcome) -> String {
    let mut lines = Vec::new();
    let finished_simple = store
        .get(outcome.goal_id)
        .is_some_and(|g| g.goal_type() == GoalType::Simple && outcome.points == 0);

    match outcome.points {
        p if p > 0 => {
            lines.push(format!("Congratulations! You have earned {} points!", p));
            lines.push(format!("You now have {} points.", outcome.total_score));
        }
        p if p < 0 => {
            lines.push(format!("Ouch. You lost {} points.", -p));
            lines.push(format!(
                "You now have {} points. Keep trying!",
                outcome.total_score
            ));
        }
        _ if finished_simple => lines.push("This goal is already complete!".to_string()),
        _ => lines.push(format!(
            "Event recorded. No points this time; you have {} points.",
            outcome.total_score
        )),
    }

    if outcome.leveled_up() {
        lines.push(format!(
            "LEVEL UP! You are now Level {}: {}!",
            outcome.level_after,
            quest_goal::level::title_for(outcome.level_after)
        ));
    }

    for achievement in &outcome.unlocked {
        lines.push(format!(
            "NEW ACHIEVEMENT UNLOCKED: {}! ({})",
            achievement.name(),
            achievement.description()
        ));
    }

    lines.join("\n")
}

/// Unlocked achievements followed by the whole catalog.
pub fn achievements(store: &GoalStore) -> String {
    let mut out = String::from("YOUR ACHIEVEMENTS\n=================");
    if store.achievements().is_empty() {
        out.push_str("\nNo achievements yet. Keep working on your goals!");
    } else {
        for achievement in store.achievements() {
            out.push_str(&format!("\n  * {}", achievement));
        }
    }

    out.push_str("\n\nAvailable achievements:");
    for achievement in Achievement::CATALOG {
        out.push_str(&format!(
            "\n  - {} ({})",
            achievement.name(),
            achievement.description()
        ));
    }
    out
}
