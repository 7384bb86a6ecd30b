//! Call log service

use validator::Validate;

use crate::{
    error::AppResult,
    models::call_log::{CallLog, CreateCallLog, UpdateCallLog},
    repository::Repository,
    services::notifications::{ChangeAction, ChangeNotifier, Entity},
};

#[derive(Clone)]
pub struct CallLogsService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl CallLogsService {
    pub fn new(repository: Repository, notifier: ChangeNotifier) -> Self {
        Self { repository, notifier }
    }

    /// Call logs are shared by every role
    pub async fn list(&self) -> AppResult<Vec<CallLog>> {
        self.repository.call_logs.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<CallLog> {
        self.repository.call_logs.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCallLog) -> AppResult<i32> {
        data.validate()?;
        let id = self.repository.call_logs.create(data).await?;
        self.notifier.publish(Entity::CallLog, ChangeAction::Created, Some(id));
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: &UpdateCallLog) -> AppResult<()> {
        data.validate()?;
        self.repository.call_logs.update(id, data).await?;
        self.notifier.publish(Entity::CallLog, ChangeAction::Updated, Some(id));
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.call_logs.delete(id).await?;
        self.notifier.publish(Entity::CallLog, ChangeAction::Deleted, Some(id));
        Ok(())
    }
}
