use async_graphql::{Context, ID, Object, Result as GqlResult, SimpleObject};

use crate::modules::tasks::core::task::TaskRecord;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTask {
    pub task_id: ID,
    pub owner: String,
    pub text: String,
    pub done: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl From<TaskRecord> for GqlTask {
    fn from(task: TaskRecord) -> Self {
        Self {
            task_id: ID(task.task_id),
            owner: task.owner,
            text: task.text,
            done: task.done,
            start_time: task.start_time,
            end_time: task.end_time,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

fn gql_error(err: impl std::fmt::Display) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

#[derive(Default)]
pub struct TasksQuery;

#[Object]
impl TasksQuery {
    async fn tasks(&self, context: &Context<'_>, user_id: String) -> GqlResult<Vec<GqlTask>> {
        let state = context.data_unchecked::<AppState>();
        let tasks = state.tasks.list(&user_id).await.map_err(gql_error)?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct TasksMutation;

#[Object]
impl TasksMutation {
    async fn create_task(
        &self,
        context: &Context<'_>,
        user_id: String,
        text: String,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> GqlResult<GqlTask> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, None);
        let task = state
            .tasks
            .create(&user, text, start_time, end_time)
            .await
            .map_err(gql_error)?;
        Ok(task.into())
    }

    async fn toggle_task(
        &self,
        context: &Context<'_>,
        user_id: String,
        task_id: ID,
    ) -> GqlResult<GqlTask> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, None);
        let task = state
            .tasks
            .toggle(&user, &task_id)
            .await
            .map_err(gql_error)?;
        Ok(task.into())
    }

    async fn delete_task(&self, context: &Context<'_>, user_id: String, task_id: ID) -> GqlResult<ID> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, None);
        state
            .tasks
            .delete(&user, &task_id)
            .await
            .map_err(gql_error)?;
        Ok(task_id)
    }
}
