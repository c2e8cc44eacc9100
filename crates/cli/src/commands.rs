//! CLI subcommands.

use crate::config::OutputFormat;
use crate::input::{parse_list, InputError};
use crate::render;
use anyhow::Context;
use clap::Subcommand;
use jobring::{assign, validate_servers, Distribution, HashRing, Replica};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of running a command.
pub type CommandResult = anyhow::Result<()>;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assign a comma-separated job list to a comma-separated server list.
    Assign {
        /// Jobs, e.g. `0,1,2,3`.
        #[arg(long)]
        jobs: String,
        /// Servers, e.g. `0,1,2`.
        #[arg(long)]
        servers: String,
        /// JSON distribution from an earlier run to compare against.
        #[arg(long)]
        previous: Option<PathBuf>,
    },
    /// Print the replicas of the ring built from a server list.
    Ring {
        /// Servers, e.g. `0,1,2`.
        #[arg(long)]
        servers: String,
    },
    /// Prompt for jobs and servers until end of input.
    Interactive,
}

impl Command {
    pub fn execute(
        &self,
        format: OutputFormat,
        input: impl BufRead,
        mut out: impl Write,
    ) -> CommandResult {
        match self {
            Command::Assign {
                jobs,
                servers,
                previous,
            } => {
                let previous = previous.as_deref().map(load_distribution).transpose()?;
                let jobs = parse_list(jobs)?;
                let servers = parse_list(servers)?;
                let distribution = assign(&mut HashRing::new(), &jobs, &servers)?;
                render::write_assignment(&mut out, format, &distribution, previous.as_ref())
            }
            Command::Ring { servers } => {
                let replicas = build_replicas(&parse_list(servers)?)?;
                render::write_replicas(&mut out, format, &replicas)
            }
            Command::Interactive => interactive(format, input, out),
        }
    }
}

fn load_distribution(path: &std::path::Path) -> anyhow::Result<Distribution> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse distribution in {}", path.display()))
}

fn build_replicas(servers: &[String]) -> jobring::Result<Vec<Replica>> {
    validate_servers(servers)?;
    let mut ring = HashRing::new();
    for server in servers {
        ring.add_server(server)?;
    }
    Ok(ring.replicas().collect())
}

const INTRO: &str = "\
This is a program to do consistent hashing of jobs to servers provided.

Enter comma separated jobs list followed by enter at the prompt \"Jobs\" - e.g Jobs=>0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22
And comma separated server list followed by enter at the prompt \"Servers\" - e.g Servers=>0,1,2,3,4

The program will output the distribution of jobs to servers
";

/// Reads one line after printing `label`. `None` on end of input.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Reads a list at `label`, reporting blank input. `Ok(None)` on end of input.
fn read_list(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> anyhow::Result<Option<Result<Vec<String>, InputError>>> {
    let Some(line) = prompt(input, out, label)? else {
        return Ok(None);
    };
    let parsed = parse_list(&line);
    if let Err(err) = &parsed {
        writeln!(out, "{err}")?;
    }
    Ok(Some(parsed))
}

fn interactive(
    format: OutputFormat,
    mut input: impl BufRead,
    mut out: impl Write,
) -> CommandResult {
    writeln!(out, "{INTRO}")?;

    let mut ring = HashRing::new();
    let mut previous: Option<Distribution> = None;

    loop {
        let jobs = match read_list(&mut input, &mut out, "Jobs=>")? {
            None => break,
            Some(Err(_)) => continue,
            Some(Ok(jobs)) => jobs,
        };
        let servers = match read_list(&mut input, &mut out, "Servers=>")? {
            None => break,
            Some(Err(_)) => continue,
            Some(Ok(servers)) => servers,
        };

        match assign(&mut ring, &jobs, &servers) {
            Ok(distribution) => {
                render::write_assignment(&mut out, format, &distribution, previous.as_ref())?;
                previous = Some(distribution);
            }
            Err(err) => {
                warn!(%err, "assignment rejected");
                writeln!(out, "{err}")?;
            }
        }
    }

    info!("input closed, leaving interactive session");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobring::{Error, MAX_SERVERS};
    use std::io::Cursor;

    fn run(command: Command, format: OutputFormat, input: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        command.execute(format, Cursor::new(input.to_owned()), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn assign_cmd(jobs: &str, servers: &str) -> Command {
        Command::Assign {
            jobs: jobs.to_owned(),
            servers: servers.to_owned(),
            previous: None,
        }
    }

    #[test]
    fn test_assign_text() {
        let out = run(assign_cmd("0,1", "0,1,2"), OutputFormat::Text, "").unwrap();
        assert_eq!(
            out,
            "Node is 0 and job list is [0]\nNode is 1 and job list is [1]\n"
        );
    }

    #[test]
    fn test_assign_rejects_blank() {
        let err = run(assign_cmd("", "0"), OutputFormat::Text, "").unwrap_err();
        assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::Empty));
    }

    #[test]
    fn test_assign_rejects_only_separators() {
        let err = run(assign_cmd(",,", "0"), OutputFormat::Text, "").unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptyInput));
    }

    #[test]
    fn test_assign_with_previous_file() {
        let path = std::env::temp_dir().join(format!("jobring-prev-{}.json", std::process::id()));
        let previous = jobring::assign_fresh(&["0", "1"], &["0", "1", "2"]).unwrap();
        std::fs::write(&path, serde_json::to_string(&previous).unwrap()).unwrap();

        let command = Command::Assign {
            jobs: "0,1".to_owned(),
            servers: "0,1".to_owned(),
            previous: Some(path.clone()),
        };
        let out = run(command, OutputFormat::Json, "").unwrap();
        std::fs::remove_file(&path).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["distribution"]["0"], serde_json::json!(["0"]));
        assert_eq!(doc["stable_servers"], serde_json::json!(["0", "1"]));
    }

    #[test]
    fn test_ring_dump() {
        let command = Command::Ring {
            servers: "0".to_owned(),
        };
        let out = run(command, OutputFormat::Text, "").unwrap();
        assert_eq!(out, "Dumping nodes 3\n0 2665\n0 2990\n0 3539\n");
    }

    #[test]
    fn test_ring_dump_checks_server_limit() {
        let servers: Vec<String> = (0..=MAX_SERVERS).map(|i| i.to_string()).collect();
        let command = Command::Ring {
            servers: servers.join(","),
        };
        let err = run(command, OutputFormat::Text, "").unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::TooManyServers {
                count: MAX_SERVERS + 1,
                limit: MAX_SERVERS
            })
        );

        let command = Command::Ring {
            servers: ",".to_owned(),
        };
        let err = run(command, OutputFormat::Text, "").unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptyInput));
    }

    #[test]
    fn test_ring_help_describes_servers() {
        use clap::CommandFactory;
        let mut cmd = crate::config::CliConfig::command();
        let ring = cmd.find_subcommand_mut("ring").unwrap();
        let servers = ring
            .get_arguments()
            .find(|arg| arg.get_id() == "servers")
            .unwrap();
        assert!(servers.get_help().is_some());
    }

    #[test]
    fn test_interactive_session() {
        let input = "\n0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22\n0,1,2,3,4\n\
                     0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22\n0,1,3,4\n";
        let out = run(Command::Interactive, OutputFormat::Text, input).unwrap();

        assert!(out.starts_with("This is a program"));
        assert!(out.contains("Jobs=>Empty input encountered. Try again\n"));
        assert!(out.contains("Node is 2 and job list is [2, 21, 22]\n"));
        assert!(out.contains("Node is 0 and job list is [0, 2, 20]\n"));
        assert!(out.contains("Servers with unchanged job list: 2 [1, 3]\n"));
    }

    #[test]
    fn test_interactive_reports_rejection() {
        let out = run(Command::Interactive, OutputFormat::Text, "0\n,\n").unwrap();
        assert!(out.contains("jobs or servers empty\n"));
    }
}
