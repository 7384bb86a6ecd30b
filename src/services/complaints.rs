//! Complaint lifecycle service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        complaint::{Complaint, CreateComplaint, LifecycleState, TransitionRules, UpdateComplaint},
        user::ScopeQuery,
    },
    repository::complaints::ComplaintStore,
    services::notifications::{ChangeAction, ChangeNotifier, Entity},
};

#[derive(Clone)]
pub struct ComplaintsService {
    store: Arc<dyn ComplaintStore>,
    notifier: ChangeNotifier,
    rules: TransitionRules,
}

impl ComplaintsService {
    pub fn new(store: Arc<dyn ComplaintStore>, notifier: ChangeNotifier, rules: TransitionRules) -> Self {
        Self { store, notifier, rules }
    }

    /// Complaints visible to the caller; engineers only see their department's assets
    pub async fn list(&self, scope: &ScopeQuery) -> AppResult<Vec<Complaint>> {
        self.store.list(scope.department_filter()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Complaint> {
        self.store.get(id).await
    }

    pub async fn create(&self, data: &CreateComplaint) -> AppResult<i32> {
        data.validate()?;
        let id = self.store.create(data).await?;
        tracing::info!(comp_id = id, asset_id = data.asset_id, "Complaint raised");
        self.notifier.publish(Entity::Complaint, ChangeAction::Created, Some(id));
        Ok(id)
    }

    /// Apply a partial update, returning the resulting lifecycle columns
    pub async fn update(&self, id: i32, data: &UpdateComplaint) -> AppResult<LifecycleState> {
        data.validate()?;
        let state = self.store.update(id, data, self.rules).await?;
        tracing::info!(comp_id = id, status = %state.comp_status, "Complaint updated");
        self.notifier.publish(Entity::Complaint, ChangeAction::Updated, Some(id));
        Ok(state)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        self.notifier.publish(Entity::Complaint, ChangeAction::Deleted, Some(id));
        Ok(())
    }
}
