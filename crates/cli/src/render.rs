//! Text and JSON rendering.

use crate::config::OutputFormat;
use anyhow::Context;
use jobring::{Distribution, Replica};
use serde_json::json;
use std::io::Write;

/// Writes one `Node is .. and job list is ..` line per server.
pub fn write_distribution(
    out: &mut impl Write,
    distribution: &Distribution,
) -> std::io::Result<()> {
    for (server, jobs) in distribution.iter() {
        writeln!(out, "Node is {} and job list is [{}]", server, jobs.join(", "))?;
    }
    Ok(())
}

/// Writes a distribution, plus the servers unchanged since `previous` if given.
pub fn write_assignment(
    out: &mut impl Write,
    format: OutputFormat,
    distribution: &Distribution,
    previous: Option<&Distribution>,
) -> anyhow::Result<()> {
    let stable = previous.map(|previous| distribution.stable_servers(previous));
    match format {
        OutputFormat::Text => {
            write_distribution(out, distribution)?;
            if let Some(stable) = stable {
                writeln!(
                    out,
                    "Servers with unchanged job list: {} [{}]",
                    stable.len(),
                    stable.join(", ")
                )?;
            }
        }
        OutputFormat::Json => {
            let doc = match stable {
                Some(stable) => json!({ "distribution": distribution, "stable_servers": stable }),
                None => json!({ "distribution": distribution }),
            };
            serde_json::to_writer(&mut *out, &doc).context("failed to write JSON output")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes the replicas of a ring in ring order.
pub fn write_replicas(
    out: &mut impl Write,
    format: OutputFormat,
    replicas: &[Replica],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Dumping nodes {}", replicas.len())?;
            for replica in replicas {
                writeln!(out, "{} {}", replica.owner, replica.position)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, replicas).context("failed to write JSON output")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobring::Position;

    fn sample() -> Distribution {
        let mut d = Distribution::new();
        d.push("0", "0");
        d.push("0", "20");
        d.push("2", "2");
        d
    }

    fn text(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_lines() {
        let s = text(|out| write_distribution(out, &sample()).unwrap());
        assert_eq!(
            s,
            "Node is 0 and job list is [0, 20]\nNode is 2 and job list is [2]\n"
        );
    }

    #[test]
    fn test_text_with_previous() {
        let mut previous = Distribution::new();
        previous.push("2", "2");
        let s = text(|out| {
            write_assignment(out, OutputFormat::Text, &sample(), Some(&previous)).unwrap()
        });
        assert!(s.ends_with("Servers with unchanged job list: 1 [2]\n"));
    }

    #[test]
    fn test_json() {
        let s = text(|out| write_assignment(out, OutputFormat::Json, &sample(), None).unwrap());
        assert_eq!(s, "{\"distribution\":{\"0\":[\"0\",\"20\"],\"2\":[\"2\"]}}\n");
    }

    #[test]
    fn test_replica_dump() {
        let replicas = vec![Replica::new("a", Position::from_raw(5))];
        let s = text(|out| write_replicas(out, OutputFormat::Text, &replicas).unwrap());
        assert_eq!(s, "Dumping nodes 1\na 5\n");
        let s = text(|out| write_replicas(out, OutputFormat::Json, &replicas).unwrap());
        assert_eq!(s, "[{\"owner\":\"a\",\"position\":5}]\n");
    }
}
