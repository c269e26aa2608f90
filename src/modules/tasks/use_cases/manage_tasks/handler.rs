use crate::modules::tasks::adapters::outbound::task_repository::TaskRepository;
use crate::modules::tasks::core::task::{TaskRecord, sort_for_display};
use crate::modules::tasks::use_cases::manage_tasks::decide::{CreateTask, decide_create};
use crate::modules::tasks::use_cases::manage_tasks::decision::{DecideError, Decision};
use crate::shared::core::primitives::{Clock, CurrentUser};
use crate::shared::infrastructure::change_feed::{Change, ChangeFeed};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain rejected: {0}")]
    Domain(#[from] DecideError),

    #[error("task {0} not found")]
    NotFound(String),

    #[error("task repository failed: {0}")]
    Repository(String),
}

pub struct TaskHandler<TRepository>
where
    TRepository: TaskRepository + 'static,
{
    repository: Arc<TRepository>,
    clock: Arc<dyn Clock>,
    feed: ChangeFeed,
}

impl<TRepository> TaskHandler<TRepository>
where
    TRepository: TaskRepository + 'static,
{
    pub fn new(repository: Arc<TRepository>, clock: Arc<dyn Clock>, feed: ChangeFeed) -> Self {
        Self {
            repository,
            clock,
            feed,
        }
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        text: String,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> Result<TaskRecord, ApplicationError> {
        let command = CreateTask {
            task_id: Uuid::now_v7().to_string(),
            owner: user.id.clone(),
            text,
            start_time,
            end_time,
            created_at: self.clock.now_millis(),
        };

        let task = match decide_create(command) {
            Decision::Accepted { task } => task,
            Decision::Rejected { reason } => return Err(reason.into()),
        };

        self.repository
            .insert(task.clone())
            .await
            .map_err(repository_error)?;
        self.notify(user);
        Ok(task)
    }

    pub async fn toggle(
        &self,
        user: &CurrentUser,
        task_id: &str,
    ) -> Result<TaskRecord, ApplicationError> {
        let current = self
            .repository
            .get(&user.id, task_id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| ApplicationError::NotFound(task_id.to_string()))?;

        let next = current.toggle(self.clock.now_millis());
        if !self
            .repository
            .update(next.clone())
            .await
            .map_err(repository_error)?
        {
            return Err(ApplicationError::NotFound(task_id.to_string()));
        }
        self.notify(user);
        Ok(next)
    }

    pub async fn delete(&self, user: &CurrentUser, task_id: &str) -> Result<(), ApplicationError> {
        let deleted = self
            .repository
            .delete(&user.id, task_id)
            .await
            .map_err(repository_error)?;
        if !deleted {
            return Err(ApplicationError::NotFound(task_id.to_string()));
        }
        self.notify(user);
        Ok(())
    }

    /// The owner's tasks in display order.
    pub async fn list(&self, owner: &str) -> Result<Vec<TaskRecord>, ApplicationError> {
        let mut tasks = self
            .repository
            .list_by_owner(owner)
            .await
            .map_err(repository_error)?;
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    fn notify(&self, user: &CurrentUser) {
        self.feed.publish(Change::Tasks {
            owner: user.id.clone(),
        });
    }
}

fn repository_error(err: anyhow::Error) -> ApplicationError {
    tracing::error!(error = %err, "task repository call failed");
    ApplicationError::Repository(err.to_string())
}

#[cfg(test)]
mod task_handler_tests {
    use super::*;
    use crate::modules::tasks::adapters::outbound::task_repository_in_memory::InMemoryTaskRepository;
    use crate::shared::core::primitives::FixedClock;
    use rstest::{fixture, rstest};

    type Handler = TaskHandler<InMemoryTaskRepository>;

    #[fixture]
    fn user() -> CurrentUser {
        CurrentUser::new("user-fixed-0001", Some("Ada".into()))
    }

    fn make_handler(repository: InMemoryTaskRepository) -> (Handler, Arc<FixedClock>, ChangeFeed) {
        let clock = Arc::new(FixedClock::at(1_000));
        let feed = ChangeFeed::new();
        let handler = TaskHandler::new(Arc::new(repository), clock.clone(), feed.clone());
        (handler, clock, feed)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_toggle_and_delete(user: CurrentUser) {
        let (handler, clock, feed) = make_handler(InMemoryTaskRepository::new());
        let mut changes = feed.subscribe();

        let task = handler
            .create(&user, " Read chapter 3 ".into(), None, Some("10:30".into()))
            .await
            .unwrap();
        assert_eq!(task.text, "Read chapter 3");
        assert_eq!(task.created_at, Some(1_000));

        clock.advance(60_000);
        let toggled = handler.toggle(&user, &task.task_id).await.unwrap();
        assert!(toggled.done);
        assert_eq!(toggled.completed_at, Some(61_000));

        let reopened = handler.toggle(&user, &task.task_id).await.unwrap();
        assert!(!reopened.done);
        assert_eq!(reopened.completed_at, None);

        handler.delete(&user, &task.task_id).await.unwrap();
        assert!(handler.list(&user.id).await.unwrap().is_empty());

        for _ in 0..4 {
            assert_eq!(
                changes.recv().await.unwrap(),
                Change::Tasks {
                    owner: user.id.clone()
                }
            );
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_open_tasks_first(user: CurrentUser) {
        let (handler, _, _) = make_handler(InMemoryTaskRepository::new());
        let first = handler.create(&user, "first".into(), None, None).await.unwrap();
        handler.create(&user, "second".into(), None, None).await.unwrap();
        handler.toggle(&user, &first.task_id).await.unwrap();

        let texts: Vec<String> = handler
            .list(&user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.text)
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_blank_tasks_without_writing(user: CurrentUser) {
        let (handler, _, _) = make_handler(InMemoryTaskRepository::new());
        let result = handler.create(&user, "   ".into(), None, None).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DecideError::EmptyText))
        ));
        assert!(handler.list(&user.id).await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_unknown_tasks(user: CurrentUser) {
        let (handler, _, _) = make_handler(InMemoryTaskRepository::new());
        assert!(matches!(
            handler.toggle(&user, "missing").await,
            Err(ApplicationError::NotFound(_))
        ));
        assert!(matches!(
            handler.delete(&user, "missing").await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_repository_failures(user: CurrentUser) {
        let mut repository = InMemoryTaskRepository::new();
        repository.toggle_offline();
        let (handler, _, _) = make_handler(repository);
        assert!(matches!(
            handler.create(&user, "x".into(), None, None).await,
            Err(ApplicationError::Repository(_))
        ));
    }
}
