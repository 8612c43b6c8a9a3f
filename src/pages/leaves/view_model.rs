use chrono::NaiveDate;
use leptos::*;

use crate::api::{
    ApiClient, ApiError, CreateLeaveRequest, LeaveRequestResponse, ListQuery, PageResponse,
    UpdateLeaveRequest,
};
use crate::pages::shared::MessageState;
use crate::state::session::SessionState;
use crate::utils::debounce::Debouncer;

use super::conflict::ConflictCheckResult;
use super::repository::LeavesRepository;
use super::types::{summarize_page, LeaveSummary};
use super::utils::{
    ensure_can_cancel, ensure_can_edit, ensure_can_review, LeaveFilterState, LeaveFormState,
};

/// Quiet interval between a date edit and the advisory conflict probe.
pub const CONFLICT_CHECK_DEBOUNCE_MS: u32 = 400;

/// Which listing the view model drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// The signed-in employee's own requests.
    Mine,
    /// Every employee's requests (reviewer screens).
    All,
}

#[derive(Clone)]
pub enum LeaveSubmit {
    Create(CreateLeaveRequest),
    Edit {
        id: String,
        payload: UpdateLeaveRequest,
    },
}

#[derive(Clone)]
pub struct Decision {
    pub request: LeaveRequestResponse,
    pub comment: Option<String>,
}

#[derive(Clone)]
pub struct AdvisoryProbe {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub exclude_id: Option<String>,
}

#[derive(Clone)]
pub struct LeavesViewModel {
    pub scope: ListScope,
    pub form: LeaveFormState,
    pub filter: LeaveFilterState,
    pub form_message: RwSignal<MessageState>,
    pub list_message: RwSignal<MessageState>,
    /// Result of the last advisory probe; `None` until a valid range has
    /// been entered (or after a reset).
    pub advisory: RwSignal<Option<ConflictCheckResult>>,
    pub editing: RwSignal<Option<LeaveRequestResponse>>,
    pub session: ReadSignal<SessionState>,
    pub list_resource: Resource<(u32, ListQuery), Result<PageResponse<LeaveRequestResponse>, ApiError>>,
    pub submit_action: Action<LeaveSubmit, Result<(), ApiError>>,
    pub cancel_action: Action<LeaveRequestResponse, Result<(), ApiError>>,
    pub approve_action: Action<Decision, Result<(), ApiError>>,
    pub reject_action: Action<Decision, Result<(), ApiError>>,
    pub advisory_action: Action<AdvisoryProbe, ConflictCheckResult>,
    debouncer: Debouncer,
    reload: RwSignal<u32>,
}

fn no_session() -> ApiError {
    ApiError::forbidden("No active session.")
}

fn apply_submit_result(
    result: Option<Result<(), ApiError>>,
    form_message: RwSignal<MessageState>,
    editing: RwSignal<Option<LeaveRequestResponse>>,
    form: LeaveFormState,
    advisory: RwSignal<Option<ConflictCheckResult>>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                form_message.update(|msg| msg.set_success("Leave request submitted."));
                editing.set(None);
                form.reset();
                advisory.set(None);
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => form_message.update(|msg| msg.set_error(err)),
        }
    }
}

fn apply_list_mutation_result(
    result: Option<Result<(), ApiError>>,
    success_message: &str,
    list_message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                list_message.update(|msg| msg.set_success(success_message));
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => list_message.update(|msg| msg.set_error(err)),
        }
    }
}

impl LeavesViewModel {
    pub fn new(scope: ListScope, session: ReadSignal<SessionState>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(LeavesRepository::new(api));

        let form = LeaveFormState::default();
        let filter = LeaveFilterState::default();
        let form_message = create_rw_signal(MessageState::default());
        let list_message = create_rw_signal(MessageState::default());
        let advisory = create_rw_signal(None::<ConflictCheckResult>);
        let editing = create_rw_signal(None::<LeaveRequestResponse>);
        let reload = create_rw_signal(0u32);
        let debouncer = Debouncer::new(CONFLICT_CHECK_DEBOUNCE_MS);

        let list_resource = create_resource(
            move || (reload.get(), filter.to_query()),
            move |(_, query)| {
                let repo = repository.get_value();
                async move {
                    match scope {
                        ListScope::Mine => repo.list_mine(&query).await,
                        ListScope::All => repo.list(&query).await,
                    }
                }
            },
        );

        // The submission gate: the conflict check runs once more,
        // synchronously before the create/edit call, and a detected
        // conflict blocks the submission outright. An unavailable check
        // does not block; the backend re-validates either way.
        let submit_action = create_action(move |submit: &LeaveSubmit| {
            let repo = repository.get_value();
            let submit = submit.clone();
            async move {
                let (start, end, exclude_id) = match &submit {
                    LeaveSubmit::Create(payload) => (payload.start_date, payload.end_date, None),
                    LeaveSubmit::Edit { id, payload } => {
                        let start = payload
                            .start_date
                            .ok_or_else(|| ApiError::validation("Enter the start date as YYYY-MM-DD."))?;
                        let end = payload
                            .end_date
                            .ok_or_else(|| ApiError::validation("Enter the end date as YYYY-MM-DD."))?;
                        (start, end, Some(id.clone()))
                    }
                };
                let probe = repo
                    .check_date_conflict(start, end, exclude_id.as_deref())
                    .await;
                if probe.has_conflict {
                    return Err(ApiError::validation(
                        "The selected dates overlap an already approved leave request.",
                    ));
                }
                match submit {
                    LeaveSubmit::Create(payload) => repo.create(&payload).await.map(|_| ()),
                    LeaveSubmit::Edit { id, payload } => {
                        repo.update(&id, &payload).await.map(|_| ())
                    }
                }
            }
        });

        let cancel_action = create_action(move |request: &LeaveRequestResponse| {
            let repo = repository.get_value();
            let request = request.clone();
            async move {
                let user = session.get_untracked().user.ok_or_else(no_session)?;
                ensure_can_cancel(&request, &user)?;
                repo.cancel(&request.id).await.map(|_| ())
            }
        });

        let approve_action = create_action(move |decision: &Decision| {
            let repo = repository.get_value();
            let decision = decision.clone();
            async move {
                let user = session.get_untracked().user.ok_or_else(no_session)?;
                ensure_can_review(&decision.request, &user)?;
                repo.approve(&decision.request.id, decision.comment.as_deref())
                    .await
                    .map(|_| ())
            }
        });

        let reject_action = create_action(move |decision: &Decision| {
            let repo = repository.get_value();
            let decision = decision.clone();
            async move {
                let user = session.get_untracked().user.ok_or_else(no_session)?;
                ensure_can_review(&decision.request, &user)?;
                repo.reject(&decision.request.id, decision.comment.as_deref())
                    .await
                    .map(|_| ())
            }
        });

        let advisory_action = create_action(move |probe: &AdvisoryProbe| {
            let repo = repository.get_value();
            let probe = probe.clone();
            async move {
                let result = repo
                    .check_date_conflict(probe.start, probe.end, probe.exclude_id.as_deref())
                    .await;
                advisory.set(Some(result.clone()));
                result
            }
        });

        create_effect(move |_| {
            apply_submit_result(
                submit_action.value().get(),
                form_message,
                editing,
                form,
                advisory,
                reload,
            );
        });
        create_effect(move |_| {
            apply_list_mutation_result(
                cancel_action.value().get(),
                "Leave request cancelled.",
                list_message,
                reload,
            );
        });
        create_effect(move |_| {
            apply_list_mutation_result(
                approve_action.value().get(),
                "Leave request approved.",
                list_message,
                reload,
            );
        });
        create_effect(move |_| {
            apply_list_mutation_result(
                reject_action.value().get(),
                "Leave request rejected.",
                list_message,
                reload,
            );
        });
        Self {
            scope,
            form,
            filter,
            form_message,
            list_message,
            advisory,
            editing,
            session,
            list_resource,
            submit_action,
            cancel_action,
            approve_action,
            reject_action,
            advisory_action,
            debouncer,
            reload,
        }
    }

    /// Debounced advisory probe; the shell calls this on every date edit.
    /// A new edit replaces any probe that has not fired yet, so at most one
    /// check is in flight per form.
    pub fn on_date_range_change(&self) {
        let form = self.form;
        let editing = self.editing;
        let advisory = self.advisory;
        let advisory_action = self.advisory_action;
        self.debouncer.schedule(move || match form.parsed_range() {
            Some((start, end)) => {
                let exclude_id = editing.get_untracked().map(|request| request.id);
                advisory_action.dispatch(AdvisoryProbe {
                    start,
                    end,
                    exclude_id,
                });
            }
            None => advisory.set(None),
        });
    }

    pub fn cancel_pending_conflict_check(&self) {
        self.debouncer.cancel();
    }

    /// Fires a scheduled probe immediately instead of waiting out the quiet
    /// interval. Native builds only (tests).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn flush_pending_conflict_check(&self) {
        self.debouncer.flush();
    }

    /// Validates the form and dispatches the create or edit submission.
    /// Ownership and lifecycle guards run here, before any network call.
    pub fn submit(&self) {
        self.cancel_pending_conflict_check();
        let submit = match self.editing.get_untracked() {
            Some(original) => {
                let user = match self.session.get_untracked().user {
                    Some(user) => user,
                    None => {
                        self.form_message.update(|msg| msg.set_error(no_session()));
                        return;
                    }
                };
                if let Err(err) = ensure_can_edit(&original, &user) {
                    self.form_message.update(|msg| msg.set_error(err));
                    return;
                }
                match self.form.to_update_payload() {
                    Ok(payload) => LeaveSubmit::Edit {
                        id: original.id,
                        payload,
                    },
                    Err(err) => {
                        self.form_message.update(|msg| msg.set_error(err));
                        return;
                    }
                }
            }
            None => match self.form.to_create_payload() {
                Ok(payload) => LeaveSubmit::Create(payload),
                Err(err) => {
                    self.form_message.update(|msg| msg.set_error(err));
                    return;
                }
            },
        };
        self.form_message.update(|msg| msg.clear());
        self.submit_action.dispatch(submit);
    }

    /// Loads a request into the form for editing. Rejected up front when
    /// the caller does not own the request or it is no longer pending.
    pub fn begin_edit(&self, request: &LeaveRequestResponse) {
        let user = match self.session.get_untracked().user {
            Some(user) => user,
            None => {
                self.list_message.update(|msg| msg.set_error(no_session()));
                return;
            }
        };
        if let Err(err) = ensure_can_edit(request, &user) {
            self.list_message.update(|msg| msg.set_error(err));
            return;
        }
        self.list_message.update(|msg| msg.clear());
        self.form.load_from_response(request);
        self.advisory.set(None);
        self.editing.set(Some(request.clone()));
    }

    pub fn stop_edit(&self) {
        self.cancel_pending_conflict_check();
        self.editing.set(None);
        self.form.reset();
        self.advisory.set(None);
    }

    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    /// Current page projected for the list view.
    pub fn summaries(&self) -> Signal<Vec<LeaveSummary>> {
        let resource = self.list_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .map(|page| summarize_page(&page.items))
                .unwrap_or_default()
        })
    }

    pub fn on_edit(&self) -> Callback<LeaveRequestResponse> {
        let vm = self.clone();
        Callback::new(move |request: LeaveRequestResponse| vm.begin_edit(&request))
    }

    pub fn on_cancel_request(&self) -> Callback<LeaveRequestResponse> {
        let cancel_action = self.cancel_action;
        Callback::new(move |request: LeaveRequestResponse| {
            cancel_action.dispatch(request);
        })
    }
}

pub fn use_leaves_view_model() -> LeavesViewModel {
    match use_context::<LeavesViewModel>() {
        Some(vm) => vm,
        None => {
            let (session, _) = crate::state::session::use_session();
            let vm = LeavesViewModel::new(ListScope::Mine, session);
            provide_context(vm.clone());
            vm
        }
    }
}
