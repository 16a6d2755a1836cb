// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The user-management screen.

use std::sync::Arc;
use tracing::{debug, info};

use innkeep::{Callbacks, ConflictPolicy, Mutator, Store};
use innkeep_domain::{User, UserId, UserPatch, UserRole, find_user, validate_user_fields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::pipeline::RequestPipeline;
use crate::session::SessionAccessor;
use crate::transport::{Request, Transport};

/// Controller for the admin-only user list.
pub struct UserBoard<T, A> {
    pipeline: Arc<RequestPipeline<T, A>>,
    users: Store<Vec<User>>,
    mutator: Mutator<UserId>,
    notifier: Notifier,
}

fn refuse_self(
    actor: &AuthenticatedActor,
    id: UserId,
    rule: &str,
    message: &str,
) -> Result<(), ApiError> {
    if actor.id == id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from(rule),
            message: String::from(message),
        });
    }
    Ok(())
}

impl<T, A> UserBoard<T, A>
where
    T: Transport,
    A: SessionAccessor,
{
    #[must_use]
    pub fn new(
        pipeline: Arc<RequestPipeline<T, A>>,
        notifier: Notifier,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            pipeline,
            users: Store::default(),
            mutator: Mutator::new(policy),
            notifier,
        }
    }

    /// The visible users.
    #[must_use]
    pub const fn users(&self) -> &Store<Vec<User>> {
        &self.users
    }

    /// Returns true while a change to user `id` is being saved.
    #[must_use]
    pub fn is_saving(&self, id: UserId) -> bool {
        self.mutator.is_in_flight(&id)
    }

    fn current(&self, id: UserId) -> Result<User, ApiError> {
        self.users
            .read(|users| find_user(users, id).cloned())
            .map_err(ApiError::from)
    }

    /// Fetches every account and replaces the visible list.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the request fails.
    pub async fn load(&self, actor: &AuthenticatedActor) -> Result<usize, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;

        let fetched: Vec<User> = self
            .pipeline
            .fetch(Request::get("/users"))
            .await
            .inspect_err(|err| self.notifier.error(format!("Could not load users: {err}")))?;

        let count: usize = fetched.len();
        let _previous = self.users.replace_all(fetched);

        debug!(count, "Loaded users");
        Ok(count)
    }

    fn active_patch(
        &self,
        actor: &AuthenticatedActor,
        id: UserId,
        next: impl FnOnce(&User) -> bool,
    ) -> Result<UserPatch, ApiError> {
        let current: User = self.current(id)?;
        let is_active: bool = next(&current);
        if !is_active {
            refuse_self(
                actor,
                id,
                "self_deactivation",
                "You cannot deactivate your own account",
            )?;
        }

        info!(user_id = %id, is_active, actor = %actor.id, "Updating account status");
        Ok(UserPatch::active(is_active))
    }

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if the actor is not an
    /// admin, deactivates their own account, the user is not visible, or a
    /// change to the user is still being saved.
    pub async fn set_active(
        &self,
        actor: &AuthenticatedActor,
        id: UserId,
        is_active: bool,
    ) -> Result<bool, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;
        self.save_patch(id, || self.active_patch(actor, id, |_| is_active), describe_active)
            .await
    }

    /// Flips the active flag of an account.
    ///
    /// The flag is read once the user is claimed, so a toggle queued behind
    /// another change flips the value that change left behind.
    ///
    /// # Errors
    ///
    /// See [`UserBoard::set_active`].
    pub async fn toggle_active(
        &self,
        actor: &AuthenticatedActor,
        id: UserId,
    ) -> Result<bool, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;
        self.save_patch(
            id,
            || self.active_patch(actor, id, |current| !current.is_active),
            describe_active,
        )
        .await
    }

    /// Assigns a new role to an account.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if the actor is not an
    /// admin, changes their own role, the user is not visible, or a change to
    /// the user is still being saved.
    pub async fn change_role(
        &self,
        actor: &AuthenticatedActor,
        id: UserId,
        role: UserRole,
    ) -> Result<bool, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;
        refuse_self(actor, id, "self_role_change", "You cannot change your own role")?;

        self.save_patch(
            id,
            || {
                let current: User = self.current(id)?;
                info!(
                    user_id = %id,
                    from = %current.role,
                    to = %role,
                    actor = %actor.id,
                    "Changing role"
                );
                Ok(UserPatch::role(role))
            },
            |saved: &User| format!("{} is now {}", saved.name, saved.role),
        )
        .await
    }

    async fn save_patch(
        &self,
        id: UserId,
        prepare: impl FnOnce() -> Result<UserPatch, ApiError>,
        describe: impl FnOnce(&User) -> String + Send,
    ) -> Result<bool, ApiError> {
        self.mutator
            .run_prepared(
                &[id],
                || {
                    let patch: UserPatch = prepare()?;
                    let request: Request = Request::patch(format!("/users/{id}"), &patch)?;
                    Ok::<_, ApiError>((patch, request))
                },
                |(patch, _): &(UserPatch, Request)| {
                    self.users.update_records(|u: &User| u.id == id, patch)
                },
                |(_, request): &(UserPatch, Request)| {
                    self.pipeline.fetch::<User>(request.clone())
                },
                Callbacks::labelled(format!("update user {id}"))
                    .on_success(|saved: User| self.notifier.success(describe(&saved)))
                    .on_failure(|err: ApiError| {
                        self.notifier
                            .error(format!("Could not update user #{id}: {err}"));
                    }),
            )
            .await
    }

    /// Creates an account. The new row shows up before the backend confirms.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if the actor is not an
    /// admin, the fields are invalid, or the id or email is already listed.
    pub async fn add(&self, actor: &AuthenticatedActor, user: User) -> Result<bool, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;
        validate_user_fields(&user)?;

        let id: UserId = user.id;
        let request: Request = Request::post("/users", &user)?;

        self.mutator
            .run_prepared(
                &[id],
                || {
                    self.refuse_duplicate(&user)?;
                    info!(
                        user_id = %id,
                        role = %user.role,
                        actor = %actor.id,
                        "Creating account"
                    );
                    Ok::<(), ApiError>(())
                },
                |_| self.users.insert_record(user.clone()),
                |_| self.pipeline.fetch::<User>(request),
                Callbacks::labelled(format!("create user {id}"))
                    .on_success(|created: User| {
                        self.notifier.success(format!("{} created", created.name));
                    })
                    .on_failure(|err: ApiError| {
                        self.notifier.error(format!("Could not create user: {err}"));
                    }),
            )
            .await
    }

    fn refuse_duplicate(&self, user: &User) -> Result<(), ApiError> {
        let duplicate: bool = self.users.read(|users| {
            users
                .iter()
                .any(|u| u.id == user.id || u.email.eq_ignore_ascii_case(&user.email))
        });
        if duplicate {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("unique_user"),
                message: format!(
                    "A user with id {} or email {} already exists",
                    user.id, user.email
                ),
            });
        }
        Ok(())
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if the actor is not an
    /// admin, deletes their own account, the user is not visible, or a
    /// change to the user is still being saved.
    pub async fn remove(
        &self,
        actor: &AuthenticatedActor,
        id: UserId,
    ) -> Result<bool, ApiError> {
        AuthorizationService::authorize_manage_users(actor)?;
        refuse_self(actor, id, "self_deletion", "You cannot delete your own account")?;
        let name: String = self.current(id)?.name;
        let request: Request = Request::delete(format!("/users/{id}"));

        self.mutator
            .run_prepared(
                &[id],
                || {
                    self.current(id)?;
                    info!(user_id = %id, actor = %actor.id, "Deleting account");
                    Ok::<(), ApiError>(())
                },
                |_| self.users.remove_records(|u: &User| u.id == id),
                |_| self.pipeline.send(request),
                Callbacks::labelled(format!("delete user {id}"))
                    .on_success(|_| self.notifier.success(format!("{name} deleted")))
                    .on_failure(|err: ApiError| {
                        self.notifier
                            .error(format!("Could not delete user #{id}: {err}"));
                    }),
            )
            .await
    }
}

fn describe_active(saved: &User) -> String {
    let verb: &str = if saved.is_active { "activated" } else { "deactivated" };
    format!("{} {verb}", saved.name)
}
