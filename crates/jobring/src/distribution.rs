//! Jobs grouped by the server that owns them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from server id to the jobs it owns.
///
/// Servers are kept in id order; each job list keeps the order jobs were
/// assigned in. Only servers that received at least one job appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    jobs: BTreeMap<String, Vec<String>>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `job` to the list of `server`, creating the list on first use.
    pub fn push(&mut self, server: &str, job: impl Into<String>) {
        match self.jobs.get_mut(server) {
            Some(list) => list.push(job.into()),
            None => {
                self.jobs.insert(server.to_owned(), vec![job.into()]);
            }
        }
    }

    /// Jobs owned by `server`, if it received any.
    pub fn jobs_for(&self, server: &str) -> Option<&[String]> {
        self.jobs.get(server).map(Vec::as_slice)
    }

    /// Server owning `job`, if the job was assigned.
    pub fn owner_of(&self, job: &str) -> Option<&str> {
        self.jobs
            .iter()
            .find(|(_, jobs)| jobs.iter().any(|j| j == job))
            .map(|(server, _)| server.as_str())
    }

    /// Servers that received at least one job.
    pub fn servers(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(String::as_str)
    }

    /// `(server, jobs)` pairs in server order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.jobs
            .iter()
            .map(|(server, jobs)| (server.as_str(), jobs.as_slice()))
    }

    /// Number of servers with at least one job.
    pub fn server_count(&self) -> usize {
        self.jobs.len()
    }

    /// Total number of jobs across all servers.
    pub fn job_count(&self) -> usize {
        self.jobs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Servers whose job list is identical in `previous` and `self`.
    pub fn stable_servers<'a>(&'a self, previous: &Distribution) -> Vec<&'a str> {
        self.jobs
            .iter()
            .filter(|(server, jobs)| previous.jobs.get(*server) == Some(*jobs))
            .map(|(server, _)| server.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
