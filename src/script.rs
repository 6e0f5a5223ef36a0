use std::fmt;
use std::fmt::{Display, Formatter};

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::debug;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{space0, space1, u32 as parse_id};
use nom::combinator::{all_consuming, eof, map, rest};
use nom::sequence::{pair, preceded, separated_pair, terminated};
use nom::IResult;
use serde::Serialize;

use crate::community::DetectionStep;
use crate::social_graph::SocialGraph;
use crate::types::{Community, Partition, Suggestion, UserId};

/// One line of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUser { id: UserId, name: String },
    RemoveUser(UserId),
    Name(UserId),
    Connect(UserId, UserId),
    Disconnect(UserId, UserId),
    Path(UserId, UserId),
    Suggest(UserId),
    Communities,
    History,
}

/// The printable result of a query command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Name { id: UserId, name: String },
    Path { start: UserId, end: UserId, path: Vec<UserId> },
    Suggestions { id: UserId, suggestions: Vec<Suggestion> },
    Communities { communities: Partition },
    History { steps: Vec<DetectionStep> },
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(word), space1)
}

fn id_pair(input: &str) -> IResult<&str, (UserId, UserId)> {
    separated_pair(parse_id, space1, parse_id)(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        map(
            preceded(keyword("user"), pair(parse_id, alt((preceded(space1, rest), eof)))),
            |(id, name): (UserId, &str)| Command::AddUser { id, name: name.trim().to_string() },
        ),
        map(preceded(keyword("remove"), parse_id), Command::RemoveUser),
        map(preceded(keyword("name"), parse_id), Command::Name),
        map(preceded(keyword("connect"), id_pair), |(a, b)| Command::Connect(a, b)),
        map(preceded(keyword("disconnect"), id_pair), |(a, b)| Command::Disconnect(a, b)),
        map(preceded(keyword("path"), id_pair), |(a, b)| Command::Path(a, b)),
        map(preceded(keyword("suggest"), parse_id), Command::Suggest),
        map(tag("communities"), |_| Command::Communities),
        map(tag("history"), |_| Command::History),
    ))(input)
}

/// Parse one trimmed, non-comment line.
pub fn parse_command(line: &str) -> Result<Command> {
    match all_consuming(terminated(command, space0))(line) {
        Ok((_, parsed)) => Ok(parsed),
        Err(e) => bail!("cannot parse command `{}`: {}", line, e),
    }
}

/// Parse a whole script, skipping blank lines and `#` comments.
/// Each command comes with its 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = vec![];
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = parse_command(line).with_context(|| format!("line {}", index + 1))?;
        commands.push((index + 1, parsed));
    }
    Ok(commands)
}

/// Apply one command, queries produce an output and mutations produce none.
pub fn execute(graph: &mut SocialGraph, command: &Command) -> Option<CommandOutput> {
    match command {
        Command::AddUser { id, name } => {
            graph.add_user(name, *id);
            None
        }
        Command::RemoveUser(id) => {
            graph.remove_user(*id);
            None
        }
        Command::Connect(a, b) => {
            graph.add_connection(*a, *b);
            None
        }
        Command::Disconnect(a, b) => {
            graph.remove_connection(*a, *b);
            None
        }
        Command::Name(id) => Some(CommandOutput::Name {
            id: *id,
            name: graph.get_name(*id),
        }),
        Command::Path(start, end) => Some(CommandOutput::Path {
            start: *start,
            end: *end,
            path: graph.shortest_path(*start, *end),
        }),
        Command::Suggest(id) => Some(CommandOutput::Suggestions {
            id: *id,
            suggestions: graph.suggest_friends_with_counts(*id),
        }),
        Command::Communities => Some(CommandOutput::Communities {
            communities: graph.detect_communities(),
        }),
        Command::History => Some(CommandOutput::History {
            steps: graph.detect_community_history(),
        }),
    }
}

/// Replay every command against `graph` in order and collect the query outputs.
pub fn run_script(graph: &mut SocialGraph, commands: &[(usize, Command)]) -> Vec<CommandOutput> {
    let mut outputs = vec![];
    for (line, command) in commands {
        debug!("Line {}: {:?}", line, command);
        if let Some(output) = execute(graph, command) {
            outputs.push(output);
        }
    }
    outputs
}

fn format_ids(ids: &[UserId]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.iter().join(" ")
    }
}

fn format_partition(partition: &[Community]) -> String {
    partition
        .iter()
        .map(|community| format!("{{{}}}", community.iter().join(", ")))
        .join(" ")
}

impl Display for CommandOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Name { id, name } => write!(f, "name {}: {}", id, name),
            CommandOutput::Path { start, end, path } => {
                write!(f, "path {} -> {}: {}", start, end, format_ids(path))
            }
            CommandOutput::Suggestions { id, suggestions } => {
                if suggestions.is_empty() {
                    return write!(f, "suggest {}: none", id);
                }
                let listed = suggestions
                    .iter()
                    .map(|s| format!("{}({})", s.id, s.mutual_count))
                    .join(" ");
                write!(f, "suggest {}: {}", id, listed)
            }
            CommandOutput::Communities { communities } => {
                write!(f, "communities: {}", format_partition(communities))
            }
            CommandOutput::History { steps } => {
                if steps.is_empty() {
                    return write!(f, "history: no edges");
                }
                for (index, step) in steps.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "step {}: removed {} score {:.3} -> {}",
                        index + 1,
                        step.removed,
                        step.score,
                        format_partition(&step.partition)
                    )?;
                }
                Ok(())
            }
        }
    }
}
