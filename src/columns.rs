use crate::config::{Config, TOTAL};
use crate::error::Result;

/// Projects paired by position with the goal column each is measured against.
///
/// Only projects with a subgoal get an individual pair; everything else is
/// covered by `Total` against the essential goal, which always comes last.
pub fn project_goal_pairs(config: &Config, total_only: bool) -> Result<(Vec<String>, Vec<String>)> {
    config.date_column()?;
    let goal = config.goal_column()?.to_string();
    if total_only {
        return Ok((vec![TOTAL.to_string()], vec![goal]));
    }

    let (mut projects, mut goals): (Vec<String>, Vec<String>) = config
        .project_columns
        .iter()
        .filter_map(|p| {
            config
                .subgoal_columns
                .get(p)
                .map(|g| (p.clone(), g.clone()))
        })
        .unzip();
    projects.push(TOTAL.to_string());
    goals.push(goal);
    Ok((projects, goals))
}

/// Columns of a derived series worth charting, optionally without goals.
pub fn progress_columns<'a>(
    names: impl IntoIterator<Item = &'a str>,
    config: &Config,
    omit_goals: bool,
) -> Vec<String> {
    let goals = if omit_goals {
        config.goal_labels()
    } else {
        Vec::new()
    };
    names
        .into_iter()
        .filter(|n| !goals.iter().any(|g| g == n))
        .map(str::to_string)
        .collect()
}
