//! Assigning jobs to servers.

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::partitioner::Partitioner;
use crate::ring::HashRing;
use tracing::debug;

/// Maximum number of jobs per assignment.
pub const MAX_JOBS: usize = 4096;

/// Maximum number of servers per assignment.
pub const MAX_SERVERS: usize = 1000;

/// Checks assignment inputs without touching any state.
pub fn validate<J: AsRef<str>, S: AsRef<str>>(jobs: &[J], servers: &[S]) -> Result<()> {
    if jobs.is_empty() || servers.is_empty() {
        return Err(Error::EmptyInput);
    }
    if jobs.len() > MAX_JOBS {
        return Err(Error::TooManyJobs {
            count: jobs.len(),
            limit: MAX_JOBS,
        });
    }
    validate_servers(servers)
}

/// Checks a server list on its own, for callers that build a ring without jobs.
pub fn validate_servers<S: AsRef<str>>(servers: &[S]) -> Result<()> {
    if servers.is_empty() {
        return Err(Error::EmptyInput);
    }
    if servers.len() > MAX_SERVERS {
        return Err(Error::TooManyServers {
            count: servers.len(),
            limit: MAX_SERVERS,
        });
    }
    Ok(())
}

/// Rebuilds `ring` from `servers` and distributes `jobs` over it.
///
/// Servers are added in input order, which fixes how collisions resolve.
/// Jobs are assigned in input order. The ring is only reset once the inputs
/// pass [`validate`], so a rejected call leaves it as it was.
pub fn assign<P, J, S>(ring: &mut HashRing<P>, jobs: &[J], servers: &[S]) -> Result<Distribution>
where
    P: Partitioner,
    J: AsRef<str>,
    S: AsRef<str>,
{
    validate(jobs, servers)?;

    ring.reset();
    for server in servers {
        ring.add_server(server.as_ref())?;
    }

    let mut distribution = Distribution::new();
    for job in jobs {
        let job = job.as_ref();
        let owner = ring.locate(job)?;
        distribution.push(owner, job);
    }

    debug!(
        jobs = jobs.len(),
        servers = servers.len(),
        owners = distribution.server_count(),
        "assigned jobs"
    );
    Ok(distribution)
}

/// Builds a fresh ring and assigns `jobs` to `servers`.
pub fn assign_fresh<J: AsRef<str>, S: AsRef<str>>(
    jobs: &[J],
    servers: &[S],
) -> Result<Distribution> {
    assign(&mut HashRing::new(), jobs, servers)
}
