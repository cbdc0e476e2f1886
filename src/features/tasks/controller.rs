use crate::api::{ApiClient, ApiError, ApiVersion, Task};

/// A remote call the controller wants issued.
///
/// Commands are executed off the UI loop by [`execute`]; their completions
/// come back as [`NetEvent`]s and are applied through
/// [`TaskController::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load {
        seq: u64,
        version: ApiVersion,
    },
    Add {
        description: String,
        version: ApiVersion,
    },
    Delete {
        description: String,
        version: ApiVersion,
    },
}

/// Completion of a remote call.
#[derive(Debug)]
pub enum NetEvent {
    Loaded {
        seq: u64,
        result: Result<Vec<Task>, ApiError>,
    },
    AddFinished {
        result: Result<(), ApiError>,
    },
    DeleteFinished {
        result: Result<(), ApiError>,
    },
}

/// Run one command against the service and report its completion.
pub async fn execute(client: &ApiClient, command: Command) -> NetEvent {
    match command {
        Command::Load { seq, version } => NetEvent::Loaded {
            seq,
            result: client.fetch_tasks(version).await,
        },
        Command::Add {
            description,
            version,
        } => NetEvent::AddFinished {
            result: client.add_task(version, &description).await,
        },
        Command::Delete {
            description,
            version,
        } => NetEvent::DeleteFinished {
            result: client.delete_task(version, &description).await,
        },
    }
}

/// State owner for the task list screen.
///
/// Holds the snapshot mirrored from the server, the draft being composed,
/// the search query, and the active API dialect. The server is the source of
/// truth: add and delete never patch the snapshot locally, they trigger a
/// full reload instead, so the snapshot is only ever replaced wholesale.
///
/// Reloads carry a sequence token. A response whose token is older than the
/// most recently issued reload is discarded, so rapid dialect switching or
/// repeated refreshes cannot let a slow stale response overwrite newer data.
pub struct TaskController {
    snapshot: Vec<Task>,
    draft: String,
    query: String,
    version: ApiVersion,
    issued_seq: u64,
    reloading: bool,
}

impl TaskController {
    pub fn new(version: ApiVersion) -> Self {
        Self {
            snapshot: Vec::new(),
            draft: String::new(),
            query: String::new(),
            version,
            issued_seq: 0,
            reloading: false,
        }
    }

    pub fn snapshot(&self) -> &[Task] {
        &self.snapshot
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Replace the draft text. Anything goes, including whitespace; the
    /// server decides what it accepts.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Replace the search query. Purely local, never sent to the server.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Submit the current draft as a new task.
    ///
    /// The draft is forwarded verbatim, empty drafts included. It is only
    /// cleared once the add call resolves at the transport level, in
    /// [`Self::handle_event`].
    pub fn submit_draft(&self) -> Command {
        Command::Add {
            description: self.draft.clone(),
            version: self.version,
        }
    }

    /// Mark a task done, which deletes it on the server.
    ///
    /// Keyed by description under both dialects; with duplicate descriptions
    /// the server picks the first match, which is documented behavior.
    pub fn delete_task(&self, description: &str) -> Command {
        Command::Delete {
            description: description.to_string(),
            version: self.version,
        }
    }

    /// Issue a full reload of the snapshot under the current dialect.
    pub fn request_reload(&mut self) -> Command {
        self.issued_seq += 1;
        self.reloading = true;
        Command::Load {
            seq: self.issued_seq,
            version: self.version,
        }
    }

    /// Switch dialect and reload under it. Draft and query are untouched.
    pub fn set_version(&mut self, version: ApiVersion) -> Command {
        self.version = version;
        self.request_reload()
    }

    /// Apply a completed remote call, possibly producing a follow-up command.
    pub fn handle_event(&mut self, event: NetEvent) -> Option<Command> {
        match event {
            NetEvent::Loaded { seq, result } => {
                if seq != self.issued_seq {
                    tracing::debug!("discarding stale list response (seq {seq})");
                    return None;
                }
                self.reloading = false;
                match result {
                    Ok(tasks) => self.snapshot = tasks,
                    Err(e) => {
                        // Fail safe to empty rather than showing stale data.
                        tracing::warn!("list fetch failed: {e}");
                        self.snapshot.clear();
                    }
                }
                None
            }
            NetEvent::AddFinished { result } => match result {
                Ok(()) => {
                    self.draft.clear();
                    Some(self.request_reload())
                }
                Err(e) => {
                    tracing::warn!("add failed: {e}");
                    None
                }
            },
            NetEvent::DeleteFinished { result } => match result {
                Ok(()) => Some(self.request_reload()),
                Err(e) => {
                    tracing::warn!("delete failed: {e}");
                    None
                }
            },
        }
    }

    /// The snapshot filtered by the current query.
    ///
    /// Case-insensitive substring match on the description; the query is
    /// trimmed first, and an empty or whitespace-only query returns the whole
    /// snapshot. Order is always the snapshot's order.
    pub fn filtered_view(&self) -> Vec<&Task> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.snapshot.iter().collect();
        }
        self.snapshot
            .iter()
            .filter(|task| task.description.to_lowercase().contains(&needle))
            .collect()
    }
}
