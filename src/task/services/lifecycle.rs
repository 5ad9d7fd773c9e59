//! Service layer for creating, editing, deleting and commenting on tasks.
//!
//! Every operation resolves the acting user's [`TaskCapability`] once and
//! branches on it. Notification drafts are built before the write and handed
//! to the repository so they commit with the task change.

use super::{
    CreateTaskRequest, ForbiddenAction, TaskLifecycleError, TaskLifecycleResult, TaskUpdate,
};
use crate::notification::{domain::NotificationDraft, services::NotificationDispatcher};
use crate::task::{
    domain::{
        AppliedChanges, CommentText, NewTask, SlugCandidates, Task, TaskCapability, TaskChanges,
        TaskComment, TaskDomainError, TaskLookup, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{UserId, Username},
    ports::UserDirectory,
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Insert,
    Update,
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    dispatcher: NotificationDispatcher,
}

impl<R, D, C> TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default dispatcher.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            dispatcher: NotificationDispatcher::default(),
        }
    }

    /// Replaces the notification dispatcher.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Creates a task owned by `creator`.
    ///
    /// Every collaborator receives an assignment notification.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad title, status or priority and
    /// [`TaskLifecycleError::UnknownUsers`] when an assignee username does
    /// not resolve. Nothing is stored in either case.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        creator: UserId,
    ) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title: raw_title,
            description,
            status: raw_status,
            priority: raw_priority,
            due_date,
            assigned_usernames,
        } = request;

        let title = TaskTitle::new(raw_title)?;
        let status = raw_status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()
            .map_err(TaskDomainError::from)?
            .unwrap_or_default();
        let priority = raw_priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()
            .map_err(TaskDomainError::from)?
            .unwrap_or_default();
        let assignees = self.resolve_usernames(&assigned_usernames).await?;

        let task = Task::new(
            NewTask {
                title,
                description,
                status,
                priority,
                due_date,
                creator,
                assignees,
            },
            &*self.clock,
        );
        let drafts: Vec<NotificationDraft> = task
            .assignees()
            .iter()
            .filter_map(|assignee| self.dispatcher.assigned(&task, *assignee, &*self.clock))
            .collect();

        let stored = self.save(task, &drafts, WriteMode::Insert).await?;
        tracing::info!(
            task_id = %stored.id(),
            creator = %creator,
            assignees = stored.assignees().len(),
            "task created"
        );
        self.dispatcher.publish(&drafts);
        Ok(stored)
    }

    /// Returns a task the user may view.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// the user is neither its creator nor a collaborator.
    pub async fn get_task(&self, lookup: &TaskLookup, actor: UserId) -> TaskLifecycleResult<Task> {
        let (task, _) = self.load_visible(lookup, actor).await?;
        Ok(task)
    }

    /// Returns a visible task together with the actor's capability on it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] under the same conditions as
    /// [`Self::get_task`].
    pub async fn get_task_with_capability(
        &self,
        lookup: &TaskLookup,
        actor: UserId,
    ) -> TaskLifecycleResult<(Task, TaskCapability)> {
        self.load_visible(lookup, actor).await
    }

    /// Applies `update` on behalf of `actor`.
    ///
    /// The creator may change any field. With `partial` unset the update is
    /// a full replacement: title, description, status and priority must all
    /// be present, and an absent due date or collaborator list clears it.
    /// A collaborator may only send a status. Newly added collaborators are
    /// notified, and a status that actually changes notifies the creator and
    /// every other collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for invisible tasks,
    /// [`TaskLifecycleError::Forbidden`] when a collaborator sends other
    /// fields, and a validation error for bad or missing input. The task is
    /// left untouched on every error.
    pub async fn update_task(
        &self,
        lookup: &TaskLookup,
        actor: UserId,
        update: TaskUpdate,
        partial: bool,
    ) -> TaskLifecycleResult<Task> {
        let (mut task, capability) = self.load_visible(lookup, actor).await?;

        let applied = match capability {
            TaskCapability::Owner => {
                let changes = self.owner_changes(update, partial).await?;
                task.apply_changes(changes, &*self.clock)
            }
            TaskCapability::Collaborator => {
                let status = collaborator_status(&update)?;
                AppliedChanges {
                    previous_status: task.update_status(status, &*self.clock),
                    ..AppliedChanges::default()
                }
            }
            TaskCapability::None => return Err(TaskLifecycleError::NotFound(lookup.to_string())),
        };

        let mut drafts: Vec<NotificationDraft> = applied
            .added_assignees
            .iter()
            .filter_map(|assignee| self.dispatcher.assigned(&task, *assignee, &*self.clock))
            .collect();
        if applied.status_changed() {
            drafts.extend(self.dispatcher.status_changed(&task, &*self.clock));
        }

        let saved = self.save(task, &drafts, WriteMode::Update).await?;
        tracing::info!(
            task_id = %saved.id(),
            actor = %actor,
            status = %saved.status(),
            status_changed = applied.status_changed(),
            added_assignees = applied.added_assignees.len(),
            "task updated"
        );
        tracing::debug!(task_id = %saved.id(), notifications = drafts.len(), "notifications queued");
        self.dispatcher.publish(&drafts);
        Ok(saved)
    }

    /// Deletes a task together with its comments and notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] when a collaborator tries
    /// and [`TaskLifecycleError::NotFound`] when the task is not visible.
    pub async fn delete_task(&self, lookup: &TaskLookup, actor: UserId) -> TaskLifecycleResult<()> {
        let (task, capability) = self.load_visible(lookup, actor).await?;
        if !capability.can_edit() {
            return Err(TaskLifecycleError::Forbidden(ForbiddenAction::Delete));
        }
        self.repository
            .delete(task.id())
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(_) => TaskLifecycleError::NotFound(lookup.to_string()),
                other => TaskLifecycleError::Repository(other),
            })?;
        tracing::info!(task_id = %task.id(), actor = %actor, "task deleted");
        Ok(())
    }

    /// Posts a comment on a visible task.
    ///
    /// Text that is blank after trimming is dropped and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is not visible.
    pub async fn add_comment(
        &self,
        lookup: &TaskLookup,
        actor: UserId,
        text: &str,
    ) -> TaskLifecycleResult<Option<TaskComment>> {
        let (task, _) = self.load_visible(lookup, actor).await?;
        let Ok(body) = CommentText::new(text) else {
            tracing::debug!(task_id = %task.id(), "blank comment dropped");
            return Ok(None);
        };
        let comment = TaskComment::new(task.id(), actor, body, &*self.clock);
        self.repository.add_comment(&comment).await?;
        Ok(Some(comment))
    }

    /// Lists the comments on a visible task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is not visible.
    pub async fn list_comments(
        &self,
        lookup: &TaskLookup,
        actor: UserId,
    ) -> TaskLifecycleResult<Vec<TaskComment>> {
        let (task, _) = self.load_visible(lookup, actor).await?;
        Ok(self.repository.comments_for(task.id()).await?)
    }

    async fn load_visible(
        &self,
        lookup: &TaskLookup,
        actor: UserId,
    ) -> TaskLifecycleResult<(Task, TaskCapability)> {
        let found = match lookup {
            TaskLookup::Id(id) => self.repository.find_by_id(*id).await?,
            TaskLookup::Slug(slug) => self.repository.find_by_slug(slug).await?,
        };
        let Some(task) = found else {
            return Err(TaskLifecycleError::NotFound(lookup.to_string()));
        };
        let capability = task.capability_of(actor);
        if !capability.can_view() {
            return Err(TaskLifecycleError::NotFound(lookup.to_string()));
        }
        Ok((task, capability))
    }

    async fn owner_changes(&self, update: TaskUpdate, partial: bool) -> TaskLifecycleResult<TaskChanges> {
        if !partial {
            let missing = update.missing_for_replace();
            if !missing.is_empty() {
                return Err(TaskLifecycleError::MissingFields(missing));
            }
        }

        let TaskUpdate {
            title,
            description,
            status,
            priority,
            due_date,
            assigned_usernames,
        } = update;

        let assignees = match assigned_usernames {
            Some(names) => Some(self.resolve_usernames(&names).await?),
            None if partial => None,
            None => Some(BTreeSet::new()),
        };
        let due = if partial {
            due_date
        } else {
            Some(due_date.flatten())
        };

        Ok(TaskChanges {
            title: title.map(TaskTitle::new).transpose()?,
            description,
            status: status
                .as_deref()
                .map(TaskStatus::try_from)
                .transpose()
                .map_err(TaskDomainError::from)?,
            priority: priority
                .as_deref()
                .map(TaskPriority::try_from)
                .transpose()
                .map_err(TaskDomainError::from)?,
            due_date: due,
            assignees,
        })
    }

    /// Resolves usernames to identifiers, reporting every unknown name.
    async fn resolve_usernames(&self, names: &[String]) -> TaskLifecycleResult<BTreeSet<UserId>> {
        let mut requested: Vec<&str> = Vec::with_capacity(names.len());
        for name in names.iter().map(|name| name.trim()) {
            if !name.is_empty() && !requested.contains(&name) {
                requested.push(name);
            }
        }
        if requested.is_empty() {
            return Ok(BTreeSet::new());
        }

        let valid: Vec<Username> = requested
            .iter()
            .filter_map(|name| Username::new(*name).ok())
            .collect();
        let found = self.directory.find_by_usernames(&valid).await?;

        let unknown: Vec<String> = requested
            .iter()
            .filter(|name| !found.iter().any(|user| user.username().as_str() == **name))
            .map(|name| (*name).to_owned())
            .collect();
        if !unknown.is_empty() {
            return Err(TaskLifecycleError::UnknownUsers(unknown));
        }
        Ok(found.iter().map(|user| user.id()).collect())
    }

    /// Writes the task, allocating a slug first when it has none.
    ///
    /// Candidates already taken are skipped; a unique-index violation from a
    /// concurrent writer moves on to the next candidate.
    async fn save(
        &self,
        task: Task,
        drafts: &[NotificationDraft],
        mode: WriteMode,
    ) -> TaskLifecycleResult<Task> {
        if task.slug().is_some() {
            self.write(&task, drafts, mode).await?;
            return Ok(task);
        }

        for candidate in SlugCandidates::for_title(task.title()) {
            if self.repository.slug_exists(&candidate).await? {
                tracing::debug!(slug = %candidate, "slug taken, trying next");
                continue;
            }
            let mut slugged = task.clone();
            slugged.assign_slug(candidate.clone())?;
            match self.write(&slugged, drafts, mode).await {
                Ok(()) => {
                    tracing::info!(task_id = %slugged.id(), slug = %candidate, "slug assigned");
                    return Ok(slugged);
                }
                Err(TaskRepositoryError::DuplicateSlug(taken)) => {
                    tracing::debug!(slug = %taken, "slug claimed concurrently, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(TaskLifecycleError::SlugExhausted(task.title().to_string()))
    }

    async fn write(
        &self,
        task: &Task,
        drafts: &[NotificationDraft],
        mode: WriteMode,
    ) -> Result<(), TaskRepositoryError> {
        match mode {
            WriteMode::Insert => self.repository.store(task, drafts).await,
            WriteMode::Update => self.repository.update(task, drafts).await,
        }
    }
}

/// Extracts the status from a collaborator update, rejecting other fields.
fn collaborator_status(update: &TaskUpdate) -> TaskLifecycleResult<TaskStatus> {
    let disallowed: Vec<&'static str> = update
        .present_fields()
        .into_iter()
        .filter(|field| *field != "status")
        .collect();
    if !disallowed.is_empty() {
        return Err(TaskLifecycleError::Forbidden(ForbiddenAction::EditFields(disallowed)));
    }
    let raw = update.status.as_deref().ok_or(TaskLifecycleError::StatusRequired)?;
    TaskStatus::try_from(raw).map_err(|err| TaskLifecycleError::Domain(err.into()))
}
